//! Flat `.env` file generation.
//!
//! One `NAME=value` line per variable, under a header that is either the
//! contents of a template file or a default comment.

use std::path::Path;

use tracing::{debug, info};

use crate::error::EnvSettingsError;
use crate::ops::ActionResult;

pub const DEFAULT_HEADER: &str = "# Drupal environmental configuration.";

/// Pure function: render `.env` content for `vars` under `template`.
pub fn render_dotenv(vars: &[(String, String)], template: Option<&str>) -> String {
    let header = match template {
        Some(t) if !t.is_empty() => t,
        _ => DEFAULT_HEADER,
    };
    let lines: Vec<String> = vars
        .iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect();
    format!("{header}\n{}\n", lines.join("\n"))
}

/// I/O wrapper: read the optional template, render and write `out_file`.
pub fn write_dotenv(
    out_file: &Path,
    vars: &[(String, String)],
    template_path: Option<&Path>,
) -> Result<ActionResult, EnvSettingsError> {
    let template = match template_path {
        Some(path) => {
            debug!(path = %path.display(), "reading .env template");
            Some(
                std::fs::read_to_string(path).map_err(|e| EnvSettingsError::IoError {
                    path: path.to_path_buf(),
                    source: e,
                })?,
            )
        }
        None => None,
    };

    if let Some(parent) = out_file.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| EnvSettingsError::IoError {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let content = render_dotenv(vars, template.as_deref());
    std::fs::write(out_file, content).map_err(|e| EnvSettingsError::IoError {
        path: out_file.to_path_buf(),
        source: e,
    })?;
    info!(path = %out_file.display(), variables = vars.len(), ".env file written");

    Ok(ActionResult::DotEnvWritten {
        path: out_file.to_path_buf(),
        variables: vars.len(),
    })
}
