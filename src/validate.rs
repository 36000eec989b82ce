//! Strict mode: reject unknown keys in project config files.
//!
//! Deserializes through `serde_ignored` into the config's layer type (all
//! fields optional) and reports every key the layer does not consume, with the
//! file path and a best-effort line number.

use std::path::Path;

use confique::Config;
use serde::Deserialize;

use crate::error::EnvSettingsError;

/// Fail with [`EnvSettingsError::UnknownKeys`] if `content` has keys unknown to `C`.
///
/// Anything under a table-valued field such as `settings` is accepted as is.
pub fn validate_unknown_keys<C: Config>(content: &str, path: &Path) -> Result<(), EnvSettingsError>
where
    C::Layer: for<'de> Deserialize<'de>,
{
    let mut unknown_keys: Vec<String> = Vec::new();

    let deserializer = toml::Deserializer::new(content);
    let _layer: C::Layer = serde_ignored::deserialize(deserializer, |ignored_path| {
        unknown_keys.push(ignored_path.to_string());
    })
    .map_err(|e| EnvSettingsError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;

    if unknown_keys.is_empty() {
        return Ok(());
    }

    let errors = unknown_keys
        .into_iter()
        .map(|key| {
            let line = find_key_line(content, &key);
            EnvSettingsError::UnknownKey {
                key,
                path: path.to_path_buf(),
                line,
            }
        })
        .collect();

    Err(EnvSettingsError::UnknownKeys(errors))
}

/// 1-indexed line of `dotted_key` in TOML `content`, or 0 if not found.
///
/// Tracks `[section]` headers and matches the last segment as a bare key inside
/// the right section. Quoted keys and inline tables are not located.
fn find_key_line(content: &str, dotted_key: &str) -> usize {
    let segments: Vec<&str> = dotted_key.split('.').collect();
    let Some((leaf, expected_section)) = segments.split_last() else {
        return 0;
    };

    let mut current_section: Vec<String> = Vec::new();

    for (i, line) in content.lines().enumerate() {
        let trimmed = line.trim();

        if trimmed.starts_with('[') && !trimmed.starts_with("[[") {
            let header = trimmed.trim_start_matches('[').trim_end_matches(']').trim();
            current_section = header.split('.').map(|s| s.trim().to_string()).collect();
            continue;
        }

        let in_right_section = expected_section.len() == current_section.len()
            && expected_section
                .iter()
                .zip(&current_section)
                .all(|(a, b)| *a == b);

        if in_right_section
            && let Some(after_key) = trimmed.strip_prefix(leaf)
            && after_key.trim_start().starts_with('=')
        {
            return i + 1;
        }
    }
    0
}
