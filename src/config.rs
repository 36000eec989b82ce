//! The project configuration file, `env-settings.toml`.
//!
//! ```toml
//! output = "web/sites/default/settings.php"
//! template = "web/sites/default/default.settings.php"
//! settings_file = "composer.json"
//!
//! [settings.databases.default.default]
//! database = "DB_NAME"
//! host = "DB_HOST"
//!
//! [dotenv]
//! out_file = ".env"
//! ```

use std::path::{Path, PathBuf};

use confique::Config;
use serde::Deserialize;
use tracing::debug;

use crate::error::EnvSettingsError;
use crate::mapping;
use crate::settings::GeneratorOptions;
use crate::types::SettingsMap;

pub const DEFAULT_FILE_NAME: &str = "env-settings.toml";
pub const DEFAULT_ENV_PREFIX: &str = "DRUPAL_ENV_SETTINGS";

#[derive(Config, Debug, Clone)]
pub struct ProjectConfig {
    /// Where the generated settings file is written.
    #[config(default = "web/sites/default/settings.php")]
    pub output: PathBuf,

    /// PHP file the generated code is appended to. Empty when unset.
    pub template: Option<PathBuf>,

    /// File included by the generated guard, relative to the Drupal root.
    #[config(default = "../config.php")]
    pub include_file: String,

    /// Spaces per indentation level in generated code.
    #[config(deserialize_with = deserialize_indent, default = 2)]
    pub indent: usize,

    /// JSON or TOML file holding the settings mapping.
    pub settings_file: Option<PathBuf>,

    /// JSON pointer to the mapping inside a `.json` settings file.
    #[config(default = "/extra/drupal-env-settings")]
    pub settings_pointer: String,

    /// Inline settings mapping. Entries here win over `settings_file`.
    pub settings: Option<toml::Table>,

    #[config(nested)]
    pub dotenv: DotEnvConfig,
}

#[derive(Config, Debug, Clone)]
pub struct DotEnvConfig {
    /// Where the `.env` file is written.
    #[config(default = ".env")]
    pub out_file: PathBuf,

    /// Header for the `.env` file. A default comment when unset.
    pub template: Option<PathBuf>,
}

impl ProjectConfig {
    /// Generator options derived from this config.
    pub fn generator_options(&self) -> GeneratorOptions {
        GeneratorOptions {
            include_file: self.include_file.clone(),
            indent: self.indent,
            ..GeneratorOptions::default()
        }
    }

    /// The settings mapping: `settings_file` entries first, then inline ones.
    ///
    /// Relative paths resolve against `root`.
    pub fn settings_map(&self, root: &Path) -> Result<SettingsMap, EnvSettingsError> {
        let mut map = match &self.settings_file {
            Some(file) => load_settings_file(&root.join(file), &self.settings_pointer)?,
            None => SettingsMap::new(),
        };
        if let Some(inline) = &self.settings {
            map.extend(mapping::settings_from_toml(inline)?);
        }
        Ok(map)
    }
}

/// Accept the indent as an integer (config files) or a numeric string
/// (environment variables, which are never narrowed).
fn deserialize_indent<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Indent {
        Spaces(usize),
        Text(String),
    }

    match Indent::deserialize(deserializer)? {
        Indent::Spaces(n) => Ok(n),
        Indent::Text(s) => s.trim().parse().map_err(|_| {
            serde::de::Error::custom(format!("invalid indent '{s}', expected a number of spaces"))
        }),
    }
}

/// Read a settings mapping from a file. `.json` files are read at `pointer`;
/// anything else is parsed as TOML and read whole.
pub fn load_settings_file(path: &Path, pointer: &str) -> Result<SettingsMap, EnvSettingsError> {
    let content = std::fs::read_to_string(path).map_err(|e| EnvSettingsError::IoError {
        path: path.to_path_buf(),
        source: e,
    })?;
    debug!(path = %path.display(), "reading settings file");

    if path.extension().is_some_and(|ext| ext == "json") {
        let value: serde_json::Value =
            serde_json::from_str(&content).map_err(|e| EnvSettingsError::JsonError {
                path: path.to_path_buf(),
                source: e,
            })?;
        let settings =
            value
                .pointer(pointer)
                .ok_or_else(|| EnvSettingsError::SettingsPointerNotFound {
                    path: path.to_path_buf(),
                    pointer: pointer.to_string(),
                })?;
        mapping::settings_from_json(settings)
    } else {
        let table: toml::Table =
            toml::from_str(&content).map_err(|e| EnvSettingsError::ParseError {
                path: path.to_path_buf(),
                source: e,
            })?;
        mapping::settings_from_toml(&table)
    }
}
