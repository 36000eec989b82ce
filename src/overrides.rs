//! Convert dotted-key programmatic overrides into a nested `toml::Table`.
//!
//! Each `("dotenv.out_file", Value)` pair is expanded into the nested table
//! structure needed for deep-merge with the other config layers.

use std::collections::HashSet;

use confique::meta::{FieldKind, Meta};
use toml::{Table, Value};

/// Convert dotted-key overrides into a nested `toml::Table`.
///
/// If multiple entries target the same key, the last one wins.
pub fn overrides_to_table(entries: &[(String, Value)]) -> Table {
    let mut table = Table::new();
    for (dotted_key, value) in entries {
        set_nested(&mut table, dotted_key, value.clone());
    }
    table
}

fn set_nested(table: &mut Table, dotted_key: &str, value: Value) {
    let (parents, leaf) = match dotted_key.rsplit_once('.') {
        Some((parents, leaf)) => (Some(parents), leaf),
        None => (None, dotted_key),
    };

    let mut current = table;
    for segment in parents.into_iter().flat_map(|p| p.split('.')) {
        let entry = current
            .entry(segment)
            .or_insert_with(|| Value::Table(Table::new()));
        if !entry.is_table() {
            *entry = Value::Table(Table::new());
        }
        current = match entry {
            Value::Table(next) => next,
            _ => return,
        };
    }
    current.insert(leaf.to_string(), value);
}

/// Collect all leaf key paths from a confique `Meta` tree.
///
/// Returns dotted paths like `"output"` and `"dotenv.out_file"`. Section names
/// (nested structs) are excluded.
pub fn valid_keys(meta: &Meta) -> HashSet<String> {
    let mut keys = HashSet::new();
    collect_keys(meta, "", &mut keys);
    keys
}

/// Whether `key` names a leaf, or a path inside a table-valued leaf such as
/// `settings.databases`.
pub fn is_valid_key(keys: &HashSet<String>, key: &str) -> bool {
    keys.contains(key)
        || keys
            .iter()
            .any(|k| key.strip_prefix(k.as_str()).is_some_and(|rest| rest.starts_with('.')))
}

fn collect_keys(meta: &Meta, prefix: &str, keys: &mut HashSet<String>) {
    for field in meta.fields {
        let dotted = if prefix.is_empty() {
            field.name.to_string()
        } else {
            format!("{prefix}.{}", field.name)
        };
        match &field.kind {
            FieldKind::Leaf { .. } => {
                keys.insert(dotted);
            }
            FieldKind::Nested { meta, .. } => {
                collect_keys(meta, &dotted, keys);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProjectConfig;
    use confique::Config;

    fn entries(pairs: &[(&str, Value)]) -> Vec<(String, Value)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn flat_key() {
        let table = overrides_to_table(&entries(&[("output", Value::String("out.php".into()))]));
        assert_eq!(table["output"].as_str().unwrap(), "out.php");
    }

    #[test]
    fn nested_key() {
        let table =
            overrides_to_table(&entries(&[("dotenv.out_file", Value::String(".env.local".into()))]));
        let dotenv = table["dotenv"].as_table().unwrap();
        assert_eq!(dotenv["out_file"].as_str().unwrap(), ".env.local");
    }

    #[test]
    fn settings_path() {
        let table = overrides_to_table(&entries(&[(
            "settings.databases.default.default.host",
            Value::String("DB_HOST".into()),
        )]));
        assert_eq!(
            table["settings"]["databases"]["default"]["default"]["host"]
                .as_str()
                .unwrap(),
            "DB_HOST"
        );
    }

    #[test]
    fn scalar_parent_is_replaced_by_table() {
        let table = overrides_to_table(&entries(&[
            ("settings", Value::String("x".into())),
            ("settings.debug", Value::String("APP_DEBUG".into())),
        ]));
        assert_eq!(table["settings"]["debug"].as_str().unwrap(), "APP_DEBUG");
    }

    #[test]
    fn empty_list_empty_table() {
        assert!(overrides_to_table(&[]).is_empty());
    }

    #[test]
    fn last_entry_wins_for_same_key() {
        let table = overrides_to_table(&entries(&[
            ("indent", Value::Integer(2)),
            ("indent", Value::Integer(4)),
        ]));
        assert_eq!(table["indent"].as_integer().unwrap(), 4);
    }

    #[test]
    fn valid_keys_collects_all_leaf_paths() {
        let keys = valid_keys(&ProjectConfig::META);
        for key in [
            "output",
            "template",
            "include_file",
            "indent",
            "settings_file",
            "settings_pointer",
            "settings",
            "dotenv.out_file",
            "dotenv.template",
        ] {
            assert!(keys.contains(key), "missing {key}");
        }
        assert_eq!(keys.len(), 9);
        assert!(!keys.contains("dotenv"));
    }

    #[test]
    fn paths_inside_leaves_are_valid() {
        let keys = valid_keys(&ProjectConfig::META);
        assert!(is_valid_key(&keys, "settings.databases.default"));
        assert!(is_valid_key(&keys, "dotenv.template"));
        assert!(!is_valid_key(&keys, "dotenv"));
        assert!(!is_valid_key(&keys, "outputs"));
        assert!(!is_valid_key(&keys, "settingsx.a"));
    }
}
