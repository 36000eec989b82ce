//! Generate a Drupal `settings.php` whose values come from the environment.
//!
//! Point the tool at a PHP template and a mapping from PHP variables to
//! environment variable names, and it appends code that loads an optional
//! local config file and then assigns every mapped setting from `getenv()`:
//!
//! ```toml
//! # env-settings.toml
//! [settings.databases.default.default]
//! database = "DB_NAME"
//! host = "DB_HOST"
//! ```
//!
//! ```php
//! if (file_exists('../config.php')) {
//!   include_once '../config.php';
//! }
//!
//! /**
//!  * Load settings from the environment.
//!  */
//! $databases['default']['default'] = [
//!   'database' => getenv('DB_NAME'),
//!   'host' => getenv('DB_HOST'),
//! ];
//! ```
//!
//! The template is parsed against the PHP grammar (`tree-sitter-php`), not
//! pattern-matched: a template with any syntax error is rejected and nothing
//! is written. Template content is reproduced
//! byte for byte ahead of the generated code.
//!
//! # Layers
//!
//! The tool's own configuration (output path, template, mapping) resolves
//! through layers, each sparse:
//!
//! ```text
//! Compiled defaults     #[config(default = ...)]
//!        ↑ overridden by
//! Config files          env-settings.toml along the search paths, later wins
//!        ↑ overridden by
//! Environment vars      DRUPAL_ENV_SETTINGS__KEY
//!        ↑ overridden by
//! Overrides             .override_value() and CLI flags
//! ```
//!
//! # Library use
//!
//! ```ignore
//! let result = Project::builder()
//!     .root("/srv/site")
//!     .handle(&Action::Generate { output: None, template: None })?;
//! println!("{result}");
//! ```
//!
//! The pieces are usable on their own: [`php::parse`] and
//! [`Document::render`](php::Document::render) for templates, [`settings`]
//! for building statements, [`generate_source`] for the pure pipeline.
//!
//! The clap front end lives behind the `clap` feature (on by default).

pub mod error;
pub mod php;
pub mod settings;
pub mod types;

mod builder;
#[cfg(feature = "clap")]
mod cli;
mod config;
mod dotenv;
mod env;
mod file;
mod generate;
mod mapping;
pub(crate) mod merge;
mod ops;
mod overrides;
mod resolve;
mod validate;

#[cfg(test)]
mod fixtures;

pub use builder::{Project, ProjectBuilder};
#[cfg(feature = "clap")]
pub use cli::{Cli, Command};
pub use config::{DotEnvConfig, ProjectConfig, load_settings_file};
pub use dotenv::{render_dotenv, write_dotenv};
pub use error::EnvSettingsError;
pub use generate::{generate, generate_source};
pub use mapping::{env_var_names, settings_from_json, settings_from_toml};
pub use ops::ActionResult;
pub use resolve::{ResolveInput, resolve};
pub use settings::GeneratorOptions;
pub use types::{Action, Boundary, Key, SearchPath, SettingsMap, ValueSpec};
