//! Clap front end for the `drupal-env-settings` binary.
//!
//! Compiled only with the `clap` feature (on by default). The bridge to the
//! library is [`Command::into_action()`], which yields a clap-free
//! [`Action`](crate::Action), and [`Cli::project_builder()`], which maps the
//! global flags onto a [`ProjectBuilder`](crate::ProjectBuilder).

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::builder::{Project, ProjectBuilder};
use crate::types::Action;

/// Generate a Drupal settings.php that reads its values from the environment.
#[derive(Debug, Parser)]
#[command(name = "drupal-env-settings", version, about)]
pub struct Cli {
    /// Project root. Relative paths in the config resolve against it.
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Extra project config file, loaded with the highest priority.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Accept unknown keys in project config files.
    #[arg(long, global = true)]
    pub no_strict: bool,

    /// More log output (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// File included by the generated guard, relative to the Drupal root.
    #[arg(long, global = true)]
    pub include_file: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Write settings.php from the template and the settings mapping.
    Generate {
        /// Output file (default from config: web/sites/default/settings.php).
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// PHP template to append to.
        #[arg(short, long)]
        template: Option<PathBuf>,
    },
    /// Write a .env file listing every environment variable the settings read.
    Configure {
        /// Output file (default from config: .env).
        #[arg(short, long)]
        out_file: Option<PathBuf>,
        /// File whose contents head the .env file.
        #[arg(short, long)]
        template: Option<PathBuf>,
    },
}

impl Command {
    pub fn into_action(self) -> Action {
        match self {
            Command::Generate { output, template } => Action::Generate { output, template },
            Command::Configure { out_file, template } => Action::Configure { out_file, template },
        }
    }
}

impl Cli {
    /// A project builder configured from the global flags.
    pub fn project_builder(&self) -> ProjectBuilder {
        let mut builder = Project::builder()
            .strict(!self.no_strict)
            .override_value("include_file", self.include_file.clone());
        if let Some(root) = &self.root {
            builder = builder.root(root);
        }
        if let Some(config) = &self.config {
            builder = builder.config_file(config);
        }
        builder
    }

    /// Default log filter for the verbosity flag.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}
