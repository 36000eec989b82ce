//! Settings tree builder: turns a [`SettingsMap`] into PHP statements.
//!
//! Each top-level entry becomes exactly one assignment. The assignment target
//! starts as `$name`; while the value is a composite with a single entry, the
//! entry's key is moved onto the target as a subscript (`$name['k1']['k2']`)
//! and the value replaced by the entry's value. What remains is either a leaf,
//! assigned as a `getenv()` call, or a multi-entry composite, assigned as an
//! array literal.
//!
//! Collapsing only happens along the target. Inside an array literal, nested
//! composites are always written as nested literals, even when they have a
//! single entry. The two paths are [`build_assignment`] and [`build_array`].

use crate::error::EnvSettingsError;
use crate::php::{ArrayItem, Comment, Document, Expr, IncludeKind, Scalar, Stmt};
use crate::types::{Key, SettingsMap, ValueSpec};

/// Comment marking the start of generated content.
pub const GENERATED_COMMENT: &str = "/**
 * Content after this line was autogenerated by drupal-env-settings.
 */";

/// Comment above the include guard.
pub const INCLUDE_COMMENT: &str = "/**
 * Load dynamic configuration from file outside of Drupal root.
 */";

/// Comment above the first environment-derived assignment.
pub const ENVIRONMENT_COMMENT: &str = "/**
 * Load settings from the environment.
 */";

/// Out-of-tree config file, relative to the Drupal root.
pub const INCLUDE_FILE: &str = "../config.php";

/// Fixed text and names the builder writes into generated code.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorOptions {
    /// Path tested and included by the include guard.
    pub include_file: String,
    pub generated_comment: String,
    pub include_comment: String,
    pub environment_comment: String,
    /// Runtime function used to read an environment variable.
    pub lookup_function: String,
    /// Spaces per indentation level.
    pub indent: usize,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            include_file: INCLUDE_FILE.into(),
            generated_comment: GENERATED_COMMENT.into(),
            include_comment: INCLUDE_COMMENT.into(),
            environment_comment: ENVIRONMENT_COMMENT.into(),
            lookup_function: "getenv".into(),
            indent: 2,
        }
    }
}

/// Encode a key as a literal. Booleans become the integers 0 and 1.
pub fn scalar(key: &Key) -> Expr {
    Expr::Scalar(match key {
        Key::String(s) => Scalar::String(s.clone()),
        Key::Integer(i) => Scalar::Int(*i),
        Key::Bool(b) => Scalar::Int(i64::from(*b)),
        Key::Float(f) => Scalar::Float(*f),
    })
}

/// `getenv('NAME')`
pub fn lookup(env_var: &str, options: &GeneratorOptions) -> Expr {
    Expr::call(options.lookup_function.as_str(), vec![Expr::string(env_var)])
}

/// Build an array literal from composite entries, recursing into nested
/// composites without collapsing them.
pub fn build_array(
    entries: &[(Key, ValueSpec)],
    options: &GeneratorOptions,
) -> Result<Expr, EnvSettingsError> {
    array_at(entries, options, &mut Vec::new())
}

fn array_at(
    entries: &[(Key, ValueSpec)],
    options: &GeneratorOptions,
    path: &mut Vec<String>,
) -> Result<Expr, EnvSettingsError> {
    if entries.is_empty() {
        return Err(EnvSettingsError::EmptyComposite {
            path: path.join("."),
        });
    }
    let mut items = Vec::with_capacity(entries.len());
    for (key, value) in entries {
        let value = match value {
            ValueSpec::Leaf(env_var) => lookup(env_var, options),
            ValueSpec::Composite(nested) => {
                path.push(key.to_string());
                let nested = array_at(nested, options, path)?;
                path.pop();
                nested
            }
        };
        items.push(ArrayItem {
            key: Some(scalar(key)),
            value,
        });
    }
    Ok(Expr::Array(items))
}

/// Build the assignment expression for one top-level setting, collapsing
/// single-entry composites into subscripts on the target.
pub fn build_assignment(
    name: &str,
    spec: &ValueSpec,
    options: &GeneratorOptions,
) -> Result<Expr, EnvSettingsError> {
    let mut target = Expr::variable(name);
    let mut path = vec![name.to_string()];
    let mut spec = spec;

    while let ValueSpec::Composite(entries) = spec {
        match entries.as_slice() {
            [(key, value)] => {
                target = target.dim(scalar(key));
                path.push(key.to_string());
                spec = value;
            }
            _ => break,
        }
    }

    let value = match spec {
        ValueSpec::Leaf(env_var) => lookup(env_var, options),
        ValueSpec::Composite(entries) => array_at(entries, options, &mut path)?,
    };
    Ok(target.assign(value))
}

/// Append the guarded include of the out-of-tree config file.
pub fn inject_config_loader(doc: &mut Document, options: &GeneratorOptions) {
    let path = Expr::string(options.include_file.as_str());
    let stmt = Stmt::If {
        cond: Expr::call("file_exists", vec![path.clone()]),
        body: vec![Stmt::expression(Expr::Include {
            kind: IncludeKind::IncludeOnce,
            path: Box::new(path),
        })],
        comments: vec![
            Comment::new(options.generated_comment.as_str()),
            Comment::new(options.include_comment.as_str()),
        ],
    };
    doc.push(stmt);
}

/// Append one assignment per setting, in order. The first carries the
/// environment comment. Returns the number of statements appended.
///
/// All assignments are built before any is appended, so an invalid mapping
/// leaves `doc` unchanged.
pub fn inject_settings(
    doc: &mut Document,
    settings: &SettingsMap,
    options: &GeneratorOptions,
) -> Result<usize, EnvSettingsError> {
    let mut stmts = Vec::with_capacity(settings.len());
    for (name, spec) in settings.iter() {
        let stmt = Stmt::expression(build_assignment(name, spec, options)?);
        stmts.push(if stmts.is_empty() {
            stmt.with_comments(vec![Comment::new(options.environment_comment.as_str())])
        } else {
            stmt
        });
    }
    let count = stmts.len();
    for stmt in stmts {
        doc.push(stmt);
    }
    Ok(count)
}
