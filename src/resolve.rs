//! Core resolution pipeline: merge all config layers and produce a typed config.
//!
//! Operates on pre-loaded data (`ResolveInput`) with no I/O, so the whole
//! pipeline is testable with synthetic inputs.

use std::path::PathBuf;

use confique::Config;
use serde::Deserialize;
use toml::{Table, Value};

use crate::env;
use crate::error::EnvSettingsError;
use crate::merge::merge_into;
use crate::overrides;
use crate::validate;

/// All pre-loaded data needed to resolve a config.
pub struct ResolveInput {
    /// File contents, first = lowest priority.
    pub files: Vec<(PathBuf, String)>,
    /// Raw environment variable pairs.
    pub env_vars: Vec<(String, String)>,
    /// Env var prefix. `None` disables the env layer.
    pub env_prefix: Option<String>,
    /// Programmatic overrides as `(dotted_key, value)` pairs.
    pub overrides: Vec<(String, Value)>,
    /// Reject unknown keys in config files.
    pub strict: bool,
}

/// Resolve configuration from pre-loaded inputs.
///
/// 1. Validate each file (if strict) and parse it to a `toml::Table`
/// 2. Deep-merge files, later over earlier
/// 3. Deep-merge the env table on top
/// 4. Deep-merge overrides on top
/// 5. Deserialize the merged table into `C::Layer`
/// 6. `C::builder().preloaded(layer).load()` fills defaults
pub fn resolve<C: Config>(input: ResolveInput) -> Result<C, EnvSettingsError>
where
    C::Layer: for<'de> Deserialize<'de>,
{
    let mut merged = Table::new();
    for (path, content) in &input.files {
        if input.strict {
            validate::validate_unknown_keys::<C>(content, path)?;
        }
        let table: Table = toml::from_str(content).map_err(|e| EnvSettingsError::ParseError {
            path: path.clone(),
            source: e,
        })?;
        merge_into(&mut merged, table);
    }

    if let Some(prefix) = &input.env_prefix {
        merge_into(&mut merged, env::env_to_table(prefix, input.env_vars));
    }

    if !input.overrides.is_empty() {
        merge_into(&mut merged, overrides::overrides_to_table(&input.overrides));
    }

    let layer: C::Layer = Value::Table(merged)
        .try_into()
        .map_err(|e: toml::de::Error| EnvSettingsError::InvalidValue {
            key: "<merged>".into(),
            reason: e.to_string(),
        })?;

    C::builder()
        .preloaded(layer)
        .load()
        .map_err(EnvSettingsError::from)
}
