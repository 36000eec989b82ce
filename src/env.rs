use toml::{Table, Value};

/// Build a `toml::Table` from environment variables matching `{PREFIX}__*`.
///
/// Double underscore `__` separates nesting levels; a single `_` is part of
/// the segment. Segments are lowercased, so
/// `DRUPAL_ENV_SETTINGS__DOTENV__OUT_FILE` sets `dotenv.out_file`.
///
/// Values are always strings. A path such as `OUTPUT=123` or a settings leaf
/// naming an env var must not change type; typed fields such as `indent`
/// parse the string themselves.
pub fn env_to_table(prefix: &str, vars: impl IntoIterator<Item = (String, String)>) -> Table {
    let needle = format!("{prefix}__");
    let mut table = Table::new();

    for (key, value) in vars {
        let Some(rest) = key.strip_prefix(&needle) else {
            continue;
        };
        if rest.is_empty() {
            continue;
        }

        let segments: Vec<&str> = rest.split("__").collect();
        insert_nested(&mut table, &segments, Value::String(value));
    }

    table
}

fn insert_nested(table: &mut Table, segments: &[&str], value: Value) {
    let Some((first, rest)) = segments.split_first() else {
        return;
    };
    let key = first.to_lowercase();

    if rest.is_empty() {
        table.insert(key, value);
    } else {
        let sub = table
            .entry(&key)
            .or_insert_with(|| Value::Table(Table::new()));
        if let Value::Table(sub_table) = sub {
            insert_nested(sub_table, rest, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_ENV_PREFIX;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn table(pairs: &[(&str, &str)]) -> Table {
        env_to_table(DEFAULT_ENV_PREFIX, vars(pairs))
    }

    #[test]
    fn simple_key() {
        let table = table(&[("DRUPAL_ENV_SETTINGS__OUTPUT", "web/settings.php")]);
        assert_eq!(table["output"].as_str().unwrap(), "web/settings.php");
    }

    #[test]
    fn nested_key() {
        let table = table(&[("DRUPAL_ENV_SETTINGS__DOTENV__OUT_FILE", ".env.local")]);
        let dotenv = table["dotenv"].as_table().unwrap();
        assert_eq!(dotenv["out_file"].as_str().unwrap(), ".env.local");
    }

    #[test]
    fn single_underscore_preserved() {
        let table = table(&[("DRUPAL_ENV_SETTINGS__INCLUDE_FILE", "../private.php")]);
        assert_eq!(table["include_file"].as_str().unwrap(), "../private.php");
    }

    #[test]
    fn numeric_values_stay_strings() {
        let table = table(&[
            ("DRUPAL_ENV_SETTINGS__INDENT", "4"),
            ("DRUPAL_ENV_SETTINGS__OUTPUT", "123"),
            ("DRUPAL_ENV_SETTINGS__SETTINGS__X", "123"),
        ]);
        assert_eq!(table["indent"].as_str().unwrap(), "4");
        assert_eq!(table["output"].as_str().unwrap(), "123");
        assert_eq!(table["settings"]["x"].as_str().unwrap(), "123");
    }

    #[test]
    fn bool_and_float_like_values_stay_strings() {
        let table = table(&[
            ("DRUPAL_ENV_SETTINGS__A", "true"),
            ("DRUPAL_ENV_SETTINGS__B", "1.5"),
        ]);
        assert_eq!(table["a"].as_str().unwrap(), "true");
        assert_eq!(table["b"].as_str().unwrap(), "1.5");
    }

    #[test]
    fn settings_leaf_value_keeps_case() {
        let table = table(&[("DRUPAL_ENV_SETTINGS__SETTINGS__HASH_SALT", "HASH_SALT")]);
        assert_eq!(
            table["settings"]["hash_salt"].as_str().unwrap(),
            "HASH_SALT"
        );
    }

    #[test]
    fn no_matching_prefix_ignored() {
        assert!(table(&[("OTHER__OUTPUT", "x")]).is_empty());
    }

    #[test]
    fn bare_prefix_ignored() {
        assert!(table(&[("DRUPAL_ENV_SETTINGS", "x"), ("DRUPAL_ENV_SETTINGS__", "y")]).is_empty());
    }

    #[test]
    fn prefix_with_single_underscore_not_matched() {
        assert!(table(&[("DRUPAL_ENV_SETTINGS_OUTPUT", "x")]).is_empty());
    }

    #[test]
    fn custom_prefix() {
        let table = env_to_table("SITE", vars(&[("SITE__INDENT", "3")]));
        assert_eq!(table["indent"].as_str().unwrap(), "3");
    }
}
