//! Build a [`SettingsMap`] from the project's declared settings.
//!
//! Strings are leaves naming environment variables; tables and objects are
//! composites. Object keys that read as canonical decimal integers become
//! integer array keys, the same normalization PHP applies to array keys.

use crate::error::EnvSettingsError;
use crate::types::{Key, SettingsMap, ValueSpec};

/// Build a settings map from a TOML table, such as the inline `[settings]` section.
pub fn settings_from_toml(table: &toml::Table) -> Result<SettingsMap, EnvSettingsError> {
    let mut map = SettingsMap::new();
    for (name, value) in table {
        map.insert(name.as_str(), toml_spec(value, name)?);
    }
    Ok(map)
}

/// Build a settings map from a JSON object, such as a `composer.json` `extra` entry.
pub fn settings_from_json(value: &serde_json::Value) -> Result<SettingsMap, EnvSettingsError> {
    let object = value
        .as_object()
        .ok_or_else(|| EnvSettingsError::InvalidSetting {
            path: String::new(),
            reason: format!("expected an object of settings, found {}", json_kind(value)),
        })?;
    let mut map = SettingsMap::new();
    for (name, value) in object {
        map.insert(name.as_str(), json_spec(value, name)?);
    }
    Ok(map)
}

/// Every environment variable the mapping reads, deduplicated, in first-appearance order.
pub fn env_var_names(settings: &SettingsMap) -> Vec<String> {
    let mut names = Vec::new();
    for (_, spec) in settings.iter() {
        collect_names(spec, &mut names);
    }
    names
}

fn collect_names(spec: &ValueSpec, names: &mut Vec<String>) {
    match spec {
        ValueSpec::Leaf(name) => {
            if !names.contains(name) {
                names.push(name.clone());
            }
        }
        ValueSpec::Composite(entries) => {
            for (_, child) in entries {
                collect_names(child, names);
            }
        }
    }
}

fn toml_spec(value: &toml::Value, path: &str) -> Result<ValueSpec, EnvSettingsError> {
    match value {
        toml::Value::String(s) => Ok(ValueSpec::Leaf(s.clone())),
        toml::Value::Table(table) => {
            let mut entries = Vec::with_capacity(table.len());
            for (key, child) in table {
                entries.push((array_key(key), toml_spec(child, &format!("{path}.{key}"))?));
            }
            composite(entries, path)
        }
        toml::Value::Array(items) => {
            let mut entries = Vec::with_capacity(items.len());
            for (i, child) in items.iter().enumerate() {
                entries.push((Key::Integer(i as i64), toml_spec(child, &format!("{path}.{i}"))?));
            }
            composite(entries, path)
        }
        other => Err(EnvSettingsError::InvalidSetting {
            path: path.to_string(),
            reason: format!(
                "expected an environment variable name or a table, found {}",
                other.type_str()
            ),
        }),
    }
}

fn json_spec(value: &serde_json::Value, path: &str) -> Result<ValueSpec, EnvSettingsError> {
    match value {
        serde_json::Value::String(s) => Ok(ValueSpec::Leaf(s.clone())),
        serde_json::Value::Object(object) => {
            let mut entries = Vec::with_capacity(object.len());
            for (key, child) in object {
                entries.push((array_key(key), json_spec(child, &format!("{path}.{key}"))?));
            }
            composite(entries, path)
        }
        serde_json::Value::Array(items) => {
            let mut entries = Vec::with_capacity(items.len());
            for (i, child) in items.iter().enumerate() {
                entries.push((Key::Integer(i as i64), json_spec(child, &format!("{path}.{i}"))?));
            }
            composite(entries, path)
        }
        other => Err(EnvSettingsError::InvalidSetting {
            path: path.to_string(),
            reason: format!(
                "expected an environment variable name or an object, found {}",
                json_kind(other)
            ),
        }),
    }
}

fn composite(entries: Vec<(Key, ValueSpec)>, path: &str) -> Result<ValueSpec, EnvSettingsError> {
    if entries.is_empty() {
        return Err(EnvSettingsError::EmptyComposite {
            path: path.to_string(),
        });
    }
    Ok(ValueSpec::Composite(entries))
}

/// `"7"` and `"-3"` become integer keys; `"07"`, `"+1"` and `"-0"` stay strings.
fn array_key(key: &str) -> Key {
    let digits = key.strip_prefix('-').unwrap_or(key);
    let canonical = !digits.is_empty()
        && digits.bytes().all(|b| b.is_ascii_digit())
        && (digits == "0" || !digits.starts_with('0'))
        && key != "-0";
    match key.parse::<i64>() {
        Ok(n) if canonical => Key::Integer(n),
        _ => Key::String(key.to_string()),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
