//! Shared value types: the settings mapping, search paths and actions.
//!
//! # The settings mapping
//!
//! A [`SettingsMap`] maps PHP variable names to [`ValueSpec`]s. A leaf names
//! the environment variable to read at runtime; a composite is a nested,
//! ordered mapping whose keys become array keys:
//!
//! ```text
//! databases.default.default.host = "DB_HOST"   →  $databases['default']['default']['host'] = getenv('DB_HOST');
//! ```
//!
//! Order is significant everywhere: it is the order assignments and array
//! items appear in the generated file.
//!
//! # Project config discovery
//!
//! [`SearchPath`] lists the directories searched for the project config file,
//! in **priority-ascending** order (last = highest). All found files are
//! deep-merged.
//!
//! | Pattern | Search paths |
//! |---------|--------------|
//! | Project root only | `[Cwd]` |
//! | Nearest `composer.json` (default) | `[Ancestors(Marker("composer.json"))]` |
//! | Shared defaults + project | `[Path("/etc/drupal-env-settings"), Cwd]` |

use std::path::PathBuf;

/// An array key in the generated code.
#[derive(Debug, Clone, PartialEq)]
pub enum Key {
    String(String),
    Integer(i64),
    Float(f64),
    /// Written as the integer `0` or `1`.
    Bool(bool),
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::String(s.into())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::String(s)
    }
}

impl From<i64> for Key {
    fn from(i: i64) -> Self {
        Key::Integer(i)
    }
}

impl From<f64> for Key {
    fn from(f: f64) -> Self {
        Key::Float(f)
    }
}

impl From<bool> for Key {
    fn from(b: bool) -> Self {
        Key::Bool(b)
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Key::String(s) => write!(f, "{s}"),
            Key::Integer(i) => write!(f, "{i}"),
            Key::Float(x) => write!(f, "{x}"),
            Key::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// What a setting resolves to.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueSpec {
    /// Name of the environment variable read at runtime.
    Leaf(String),
    /// Nested mapping, in order. Never empty when used for generation.
    Composite(Vec<(Key, ValueSpec)>),
}

impl ValueSpec {
    pub fn leaf(env_var: impl Into<String>) -> Self {
        ValueSpec::Leaf(env_var.into())
    }

    pub fn composite<K: Into<Key>>(entries: impl IntoIterator<Item = (K, ValueSpec)>) -> Self {
        ValueSpec::Composite(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Ordered mapping of PHP variable name to its value specification.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsMap {
    entries: Vec<(String, ValueSpec)>,
}

impl SettingsMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry. An existing name keeps its position and takes the new value.
    pub fn insert(&mut self, name: impl Into<String>, spec: ValueSpec) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = spec,
            None => self.entries.push((name, spec)),
        }
    }

    /// Insert every entry of `other`, in its order.
    pub fn extend(&mut self, other: SettingsMap) {
        for (name, spec) in other.entries {
            self.insert(name, spec);
        }
    }

    pub fn get(&self, name: &str) -> Option<&ValueSpec> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ValueSpec)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<N: Into<String>> FromIterator<(N, ValueSpec)> for SettingsMap {
    fn from_iter<I: IntoIterator<Item = (N, ValueSpec)>>(iter: I) -> Self {
        let mut map = SettingsMap::new();
        for (name, spec) in iter {
            map.insert(name, spec);
        }
        map
    }
}

/// Where to look for project config files.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchPath {
    /// The project root.
    Cwd,
    /// An explicit directory; relative paths resolve against the project root.
    Path(PathBuf),
    /// Walk from the project root toward the filesystem root, expanding into
    /// every directory on the way (shallowest first).
    Ancestors(Boundary),
}

/// How far [`SearchPath::Ancestors`] walks.
#[derive(Debug, Clone, PartialEq)]
pub enum Boundary {
    Root,
    /// Stop (inclusive) at the first directory containing this file or directory.
    Marker(&'static str),
}

/// An operation, independent of any CLI framework.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Write the PHP settings file. `None` fields fall back to the project config.
    Generate {
        output: Option<PathBuf>,
        template: Option<PathBuf>,
    },
    /// Write the `.env` file listing every environment variable the settings read.
    Configure {
        out_file: Option<PathBuf>,
        template: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_replaces_in_place() {
        let mut map = SettingsMap::new();
        map.insert("a", ValueSpec::leaf("A"));
        map.insert("b", ValueSpec::leaf("B"));
        map.insert("a", ValueSpec::leaf("A2"));
        let names: Vec<&str> = map.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(map.get("a"), Some(&ValueSpec::leaf("A2")));
    }

    #[test]
    fn extend_appends_new_and_overrides_existing() {
        let mut base: SettingsMap = [("a", ValueSpec::leaf("A")), ("b", ValueSpec::leaf("B"))]
            .into_iter()
            .collect();
        let overlay: SettingsMap = [("c", ValueSpec::leaf("C")), ("a", ValueSpec::leaf("X"))]
            .into_iter()
            .collect();
        base.extend(overlay);
        let entries: Vec<(&str, &ValueSpec)> = base.iter().collect();
        assert_eq!(entries[0], ("a", &ValueSpec::leaf("X")));
        assert_eq!(entries[1], ("b", &ValueSpec::leaf("B")));
        assert_eq!(entries[2], ("c", &ValueSpec::leaf("C")));
    }

    #[test]
    fn composite_converts_keys() {
        let spec = ValueSpec::composite([(0i64, ValueSpec::leaf("X"))]);
        assert_eq!(
            spec,
            ValueSpec::Composite(vec![(Key::Integer(0), ValueSpec::leaf("X"))])
        );
    }

    #[test]
    fn key_display() {
        assert_eq!(Key::from("host").to_string(), "host");
        assert_eq!(Key::from(3i64).to_string(), "3");
        assert_eq!(Key::from(true).to_string(), "true");
    }
}
