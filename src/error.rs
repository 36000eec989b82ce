use std::path::PathBuf;
use thiserror::Error;

use crate::php;

#[derive(Debug, Error)]
pub enum EnvSettingsError {
    #[error("Unknown key '{key}' in {path} (line {line})")]
    UnknownKey {
        key: String,
        path: PathBuf,
        line: usize,
    },

    #[error("Unknown keys in config file")]
    UnknownKeys(Vec<EnvSettingsError>),

    #[error("Failed to parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    JsonError {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to read {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    ConfigError(#[from] confique::Error),

    #[error("Invalid value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("Parse error: {0}")]
    TemplateSyntax(#[from] php::ParseError),

    #[error("Setting '{path}' is an empty mapping; it needs at least one entry")]
    EmptyComposite { path: String },

    #[error("Invalid setting '{path}': {reason}")]
    InvalidSetting { path: String, reason: String },

    #[error("No settings found at '{pointer}' in {path}")]
    SettingsPointerNotFound { path: PathBuf, pointer: String },
}
