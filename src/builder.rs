use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::{DEFAULT_ENV_PREFIX, DEFAULT_FILE_NAME, ProjectConfig};
use crate::dotenv;
use crate::error::EnvSettingsError;
use crate::file;
use crate::generate;
use crate::mapping;
use crate::ops::ActionResult;
use crate::overrides;
use crate::resolve::{self, ResolveInput};
use crate::settings::GeneratorOptions;
use crate::types::{Action, Boundary, SearchPath, SettingsMap};

/// A loaded project: its resolved configuration, root directory and the
/// environment captured at load time.
#[derive(Debug, Clone)]
pub struct Project {
    config: ProjectConfig,
    root: PathBuf,
    env_vars: Vec<(String, String)>,
}

impl Project {
    pub fn builder() -> ProjectBuilder {
        ProjectBuilder::new()
    }

    pub fn config(&self) -> &ProjectConfig {
        &self.config
    }

    /// Directory relative paths resolve against.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The settings mapping declared by the project.
    pub fn settings(&self) -> Result<SettingsMap, EnvSettingsError> {
        self.config.settings_map(&self.root)
    }

    pub fn generator_options(&self) -> GeneratorOptions {
        self.config.generator_options()
    }

    /// Value of `name` in the captured environment.
    pub fn env_value(&self, name: &str) -> Option<&str> {
        self.env_vars
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Run an action. Explicit paths in `action` take precedence over the config.
    pub fn handle(&self, action: &Action) -> Result<ActionResult, EnvSettingsError> {
        match action {
            Action::Generate { output, template } => {
                let output = self.path(output.as_ref().unwrap_or(&self.config.output));
                let template = match template.as_ref().or(self.config.template.as_ref()) {
                    Some(path) => {
                        let path = self.path(path);
                        debug!(path = %path.display(), "reading template");
                        std::fs::read_to_string(&path)
                            .map_err(|e| EnvSettingsError::IoError { path, source: e })?
                    }
                    None => String::new(),
                };
                let settings = self.settings()?;
                debug!(entries = settings.len(), "resolved settings mapping");
                generate::generate(&output, &settings, &template, &self.generator_options())
            }
            Action::Configure { out_file, template } => {
                let out_file = self.path(out_file.as_ref().unwrap_or(&self.config.dotenv.out_file));
                let template = template
                    .as_ref()
                    .or(self.config.dotenv.template.as_ref())
                    .map(|p| self.path(p));
                let vars: Vec<(String, String)> = mapping::env_var_names(&self.settings()?)
                    .into_iter()
                    .map(|name| {
                        let value = self.env_value(&name).unwrap_or_default().to_string();
                        (name, value)
                    })
                    .collect();
                dotenv::write_dotenv(&out_file, &vars, template.as_deref())
            }
        }
    }

    fn path(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }
}

/// Builder for discovering and loading a [`Project`].
///
/// Layers, lowest priority first: compiled defaults, config files found along
/// the search paths, then explicit config files, `{PREFIX}__*` environment
/// variables, and programmatic overrides.
pub struct ProjectBuilder {
    root: Option<PathBuf>,
    file_name: Option<String>,
    search_paths: Option<Vec<SearchPath>>,
    config_files: Vec<PathBuf>,
    env_prefix: Option<String>,
    env_enabled: bool,
    env_vars: Option<Vec<(String, String)>>,
    strict: bool,
    overrides: Vec<(String, toml::Value)>,
}

impl ProjectBuilder {
    fn new() -> Self {
        Self {
            root: None,
            file_name: None,
            search_paths: None,
            config_files: Vec::new(),
            env_prefix: None,
            env_enabled: true,
            env_vars: None,
            strict: true,
            overrides: Vec::new(),
        }
    }

    /// Project root (default: the current working directory).
    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    /// Config file name (default: `env-settings.toml`).
    pub fn file_name(mut self, name: &str) -> Self {
        self.file_name = Some(name.to_string());
        self
    }

    /// Replace the default search paths. Last entry has the highest priority.
    pub fn search_paths(mut self, paths: Vec<SearchPath>) -> Self {
        self.search_paths = Some(paths);
        self
    }

    /// Append a search path to the defaults or the list set so far.
    pub fn add_search_path(mut self, path: SearchPath) -> Self {
        self.search_paths
            .get_or_insert_with(default_search_paths)
            .push(path);
        self
    }

    /// Load this file on top of everything found along the search paths.
    /// Unlike discovered files it must exist.
    pub fn config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_files.push(path.into());
        self
    }

    /// Environment variable prefix (default: `DRUPAL_ENV_SETTINGS`).
    pub fn env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    /// Ignore `{PREFIX}__*` variables. The environment is still captured for `.env` values.
    pub fn no_env(mut self) -> Self {
        self.env_enabled = false;
        self
    }

    /// Use these variables instead of the process environment.
    pub fn env_vars(mut self, vars: Vec<(String, String)>) -> Self {
        self.env_vars = Some(vars);
        self
    }

    /// Reject unknown keys in config files (default: `true`).
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Override a config key, highest priority. `None` values are ignored.
    pub fn override_value<V: Into<toml::Value>>(mut self, key: &str, value: Option<V>) -> Self {
        if let Some(v) = value {
            self.overrides.push((key.to_string(), v.into()));
        }
        self
    }

    fn effective_file_name(&self) -> &str {
        self.file_name.as_deref().unwrap_or(DEFAULT_FILE_NAME)
    }

    fn effective_search_paths(&self) -> Vec<SearchPath> {
        self.search_paths.clone().unwrap_or_else(default_search_paths)
    }

    fn effective_env_prefix(&self) -> Option<String> {
        if !self.env_enabled {
            return None;
        }
        Some(
            self.env_prefix
                .clone()
                .unwrap_or_else(|| DEFAULT_ENV_PREFIX.to_string()),
        )
    }

    fn effective_root(&self) -> Result<PathBuf, EnvSettingsError> {
        match &self.root {
            Some(root) => Ok(root.clone()),
            None => std::env::current_dir().map_err(|e| EnvSettingsError::IoError {
                path: PathBuf::from("."),
                source: e,
            }),
        }
    }

    fn check_overrides(&self) -> Result<(), EnvSettingsError> {
        let valid = overrides::valid_keys(&<ProjectConfig as confique::Config>::META);
        match self
            .overrides
            .iter()
            .find(|(key, _)| !overrides::is_valid_key(&valid, key))
        {
            Some((key, _)) => Err(EnvSettingsError::InvalidValue {
                key: key.clone(),
                reason: "not a configuration key".into(),
            }),
            None => Ok(()),
        }
    }

    /// Discover, load and resolve the project configuration.
    pub fn load(self) -> Result<Project, EnvSettingsError> {
        self.check_overrides()?;
        let root = self.effective_root()?;
        debug!(root = %root.display(), "loading project");

        let mut files =
            file::load_config_files(&self.effective_search_paths(), self.effective_file_name(), &root)?;
        for path in &self.config_files {
            files.push(file::load_explicit_file(&root.join(path))?);
        }

        let env_prefix = self.effective_env_prefix();
        let env_vars = self.env_vars.unwrap_or_else(|| std::env::vars().collect());

        let config = resolve::resolve(ResolveInput {
            files,
            env_vars: env_vars.clone(),
            env_prefix,
            overrides: self.overrides,
            strict: self.strict,
        })?;

        Ok(Project {
            config,
            root,
            env_vars,
        })
    }

    /// Load the project and run `action` against it.
    pub fn handle(self, action: &Action) -> Result<ActionResult, EnvSettingsError> {
        self.load()?.handle(action)
    }
}

fn default_search_paths() -> Vec<SearchPath> {
    vec![SearchPath::Ancestors(Boundary::Marker("composer.json"))]
}
