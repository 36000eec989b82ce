//! Project config file discovery and loading.
//!
//! Each [`SearchPath`] resolves against the project root to one or more
//! directories, listed priority-ascending. `Ancestors` expands inline,
//! shallowest first, so the project root itself has the highest priority.
//! Every directory is then checked for `{dir}/{file_name}`; all found
//! files are returned in order for the resolve pipeline to deep-merge.
//!
//! Missing files are skipped. Other I/O errors propagate.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::EnvSettingsError;
use crate::types::{Boundary, SearchPath};

/// Walk from `start` toward the filesystem root, shallowest first.
///
/// With [`Boundary::Marker`] the walk stops (inclusive) at the first directory
/// containing the marker, falling back to the root if it is never found.
pub fn expand_ancestors_from(start: &Path, boundary: &Boundary) -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    let mut current = start;

    loop {
        dirs.push(current.to_path_buf());

        if let Boundary::Marker(name) = boundary
            && current.join(name).exists()
        {
            break;
        }

        match current.parent() {
            Some(parent) => current = parent,
            None => break,
        }
    }

    dirs.reverse();
    dirs
}

/// Expand search paths into concrete directories, priority-ascending.
pub fn expand_search_paths(search_paths: &[SearchPath], root: &Path) -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    for sp in search_paths {
        match sp {
            SearchPath::Cwd => dirs.push(root.to_path_buf()),
            SearchPath::Path(p) => dirs.push(root.join(p)),
            SearchPath::Ancestors(boundary) => dirs.extend(expand_ancestors_from(root, boundary)),
        }
    }
    dirs
}

/// Load every `{dir}/{file_name}` found across the expanded search paths.
pub fn load_config_files(
    search_paths: &[SearchPath],
    file_name: &str,
    root: &Path,
) -> Result<Vec<(PathBuf, String)>, EnvSettingsError> {
    let mut results = Vec::new();
    for dir in expand_search_paths(search_paths, root) {
        let file_path = dir.join(file_name);
        match std::fs::read_to_string(&file_path) {
            Ok(content) => {
                debug!(path = %file_path.display(), "found project config");
                results.push((file_path, content));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
            Err(e) => {
                return Err(EnvSettingsError::IoError {
                    path: file_path,
                    source: e,
                });
            }
        }
    }
    Ok(results)
}

/// Load a config file the user named explicitly. A missing file is an error.
pub fn load_explicit_file(path: &Path) -> Result<(PathBuf, String), EnvSettingsError> {
    let content = std::fs::read_to_string(path).map_err(|e| EnvSettingsError::IoError {
        path: path.to_path_buf(),
        source: e,
    })?;
    debug!(path = %path.display(), "loaded explicit project config");
    Ok((path.to_path_buf(), content))
}
