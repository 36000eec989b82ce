//! Settings file generation: parse the template, append the generated
//! statements, write the result.
//!
//! [`generate_source`] is pure and does all the work on strings.
//! [`generate`] wraps it with the filesystem side: a template that fails to
//! parse is reported and nothing is written; otherwise the parent directory
//! chain is created and the output file overwritten in full.

use std::path::Path;

use tracing::{debug, error, info};

use crate::error::EnvSettingsError;
use crate::ops::ActionResult;
use crate::php;
use crate::settings::{self, GeneratorOptions};
use crate::types::SettingsMap;

/// Pure function: produce the settings file source for `template` and `settings`.
///
/// Returns the source and the number of environment assignments in it.
pub fn generate_source(
    settings: &SettingsMap,
    template: &str,
    options: &GeneratorOptions,
) -> Result<(String, usize), EnvSettingsError> {
    let mut doc = php::parse(template)?;
    debug!(statements = doc.len(), "parsed template");

    settings::inject_config_loader(&mut doc, options);
    let assignments = settings::inject_settings(&mut doc, settings, options)?;

    Ok((doc.render(options.indent), assignments))
}

/// I/O wrapper: generate and write the settings file to `output`.
///
/// A template parse failure is not an error here: it is logged and returned
/// as [`ActionResult::TemplateRejected`], and the filesystem is not touched.
pub fn generate(
    output: &Path,
    settings: &SettingsMap,
    template: &str,
    options: &GeneratorOptions,
) -> Result<ActionResult, EnvSettingsError> {
    let (source, assignments) = match generate_source(settings, template, options) {
        Ok(generated) => generated,
        Err(EnvSettingsError::TemplateSyntax(e)) => {
            error!(line = e.line(), "template rejected: {e}");
            return Ok(ActionResult::TemplateRejected {
                message: e.message().to_string(),
            });
        }
        Err(e) => return Err(e),
    };

    if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| EnvSettingsError::IoError {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    std::fs::write(output, &source).map_err(|e| EnvSettingsError::IoError {
        path: output.to_path_buf(),
        source: e,
    })?;
    info!(path = %output.display(), assignments, "settings file written");

    Ok(ActionResult::SettingsWritten {
        path: output.to_path_buf(),
        assignments,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::{DRUPAL_SETTINGS_PHP, TEMPLATE, drupal_settings, leaf};
    use crate::settings::{ENVIRONMENT_COMMENT, GENERATED_COMMENT};
    use crate::types::ValueSpec;
    use std::fs;
    use tempfile::TempDir;

    fn opts() -> GeneratorOptions {
        GeneratorOptions::default()
    }

    #[test]
    fn empty_template_gets_open_tag_and_generated_tail() {
        let (source, count) = generate_source(&drupal_settings(), "", &opts()).unwrap();
        assert_eq!(count, 3);
        assert_eq!(source, format!("<?php\n\n{DRUPAL_SETTINGS_PHP}"));
    }

    #[test]
    fn template_is_an_exact_prefix() {
        let (source, _) = generate_source(&drupal_settings(), TEMPLATE, &opts()).unwrap();
        assert!(source.starts_with(TEMPLATE));
        assert_eq!(source, format!("{TEMPLATE}\n{DRUPAL_SETTINGS_PHP}"));
    }

    #[test]
    fn include_guard_precedes_assignments() {
        let (source, _) = generate_source(&drupal_settings(), TEMPLATE, &opts()).unwrap();
        let guard = source.find("if (file_exists('../config.php'))").unwrap();
        let first = source.find("$databases['default']['default']").unwrap();
        assert!(guard < first);
    }

    #[test]
    fn provenance_comments_appear_once() {
        let (source, _) = generate_source(&drupal_settings(), TEMPLATE, &opts()).unwrap();
        assert_eq!(source.matches(GENERATED_COMMENT).count(), 1);
        assert_eq!(source.matches(ENVIRONMENT_COMMENT).count(), 1);
    }

    #[test]
    fn empty_mapping_still_writes_guard() {
        let (source, count) = generate_source(&SettingsMap::new(), "", &opts()).unwrap();
        assert_eq!(count, 0);
        assert!(source.contains("include_once '../config.php';"));
        assert!(!source.contains(ENVIRONMENT_COMMENT));
    }

    #[test]
    fn output_is_deterministic() {
        let settings = drupal_settings();
        let first = generate_source(&settings, TEMPLATE, &opts()).unwrap();
        let second = generate_source(&settings, TEMPLATE, &opts()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn malformed_template_is_syntax_error() {
        let result = generate_source(&drupal_settings(), "<?php\n$a = [1, 2;\n", &opts());
        assert!(matches!(result, Err(EnvSettingsError::TemplateSyntax(_))));
    }

    #[test]
    fn writes_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.php");
        let settings: SettingsMap = [("debug", leaf("APP_DEBUG"))].into_iter().collect();

        let result = generate(&path, &settings, "", &opts()).unwrap();
        assert_eq!(
            result,
            ActionResult::SettingsWritten {
                path: path.clone(),
                assignments: 1
            }
        );
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.ends_with("$debug = getenv('APP_DEBUG');\n"));
    }

    #[test]
    fn creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("web").join("sites").join("default").join("settings.php");
        generate(&path, &drupal_settings(), "", &opts()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn overwrites_existing_output_in_full() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.php");
        fs::write(&path, "<?php\n$stale = 'previous run';\n".repeat(50)).unwrap();

        generate(&path, &drupal_settings(), "", &opts()).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(!content.contains("stale"));
        assert_eq!(content, format!("<?php\n\n{DRUPAL_SETTINGS_PHP}"));
    }

    #[test]
    fn repeat_runs_are_byte_identical() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.php");
        generate(&path, &drupal_settings(), TEMPLATE, &opts()).unwrap();
        let first = fs::read(&path).unwrap();
        generate(&path, &drupal_settings(), TEMPLATE, &opts()).unwrap();
        assert_eq!(fs::read(&path).unwrap(), first);
    }

    #[test]
    fn parse_failure_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out").join("settings.php");

        let result = generate(&path, &drupal_settings(), "<?php\nif ($a) {\n", &opts()).unwrap();
        match result {
            ActionResult::TemplateRejected { message } => {
                assert!(message.starts_with("Syntax error"), "{message}")
            }
            other => panic!("Expected TemplateRejected, got {other:?}"),
        }
        assert!(!path.exists());
        assert!(!path.parent().unwrap().exists());
    }

    #[test]
    fn parse_failure_keeps_previous_output() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.php");
        fs::write(&path, "<?php\n// previous\n").unwrap();

        let result = generate(&path, &drupal_settings(), "<?php\n/* open", &opts()).unwrap();
        assert!(!result.is_success());
        assert_eq!(fs::read_to_string(&path).unwrap(), "<?php\n// previous\n");
    }

    #[test]
    fn balanced_but_invalid_templates_are_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.php");

        for body in ["$a = ;", "$a = 1 2;", "function {}", "$a = [1,,2];", "= = =;"] {
            let template = format!("<?php\n{body}\n");
            let result = generate(&path, &drupal_settings(), &template, &opts()).unwrap();
            assert!(
                matches!(result, ActionResult::TemplateRejected { .. }),
                "{body}: {result:?}"
            );
            assert!(!path.exists(), "{body}");
        }
    }

    #[test]
    fn braceless_and_alternative_control_flow_is_accepted() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.php");

        for template in [
            "<?php\nif ($a) $b = 1; else $b = 2;\n",
            "<?php\nif ($a): $b = 1; else: $b = 2; endif;\n",
            "<?php\nif ($a) $b = 1;\nelseif ($c) $b = 2;\nelse $b = 3;\n",
        ] {
            let result = generate(&path, &drupal_settings(), template, &opts()).unwrap();
            assert!(result.is_success(), "{template}: {result:?}");
            let content = fs::read_to_string(&path).unwrap();
            assert_eq!(content, format!("{template}\n{DRUPAL_SETTINGS_PHP}"));
        }
    }

    #[test]
    fn invalid_mapping_is_an_error_and_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.php");
        let settings: SettingsMap = [("x", ValueSpec::Composite(vec![]))].into_iter().collect();

        let result = generate(&path, &settings, "", &opts());
        assert!(matches!(result, Err(EnvSettingsError::EmptyComposite { .. })));
        assert!(!path.exists());
    }
}
