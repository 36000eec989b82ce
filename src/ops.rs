//! Result types for the operations behind `generate` and `configure`.

use std::fmt;
use std::path::PathBuf;

/// Result of an action. Returned to the caller for display.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionResult {
    /// The PHP settings file was written.
    SettingsWritten { path: PathBuf, assignments: usize },
    /// The template is not valid PHP; nothing was written.
    TemplateRejected { message: String },
    /// The `.env` file was written.
    DotEnvWritten { path: PathBuf, variables: usize },
}

impl ActionResult {
    /// Whether the action produced its output file.
    pub fn is_success(&self) -> bool {
        !matches!(self, ActionResult::TemplateRejected { .. })
    }
}

impl fmt::Display for ActionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionResult::SettingsWritten { path, assignments } => write!(
                f,
                "Settings written to {} ({assignments} environment assignment{})",
                path.display(),
                if *assignments == 1 { "" } else { "s" }
            ),
            ActionResult::TemplateRejected { message } => write!(f, "Parse error: {message}"),
            ActionResult::DotEnvWritten { path, variables } => write!(
                f,
                "Environment file written to {} ({variables} variable{})",
                path.display(),
                if *variables == 1 { "" } else { "s" }
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_written_display() {
        let result = ActionResult::SettingsWritten {
            path: "web/sites/default/settings.php".into(),
            assignments: 3,
        };
        assert_eq!(
            result.to_string(),
            "Settings written to web/sites/default/settings.php (3 environment assignments)"
        );
    }

    #[test]
    fn singular_counts() {
        let result = ActionResult::DotEnvWritten {
            path: ".env".into(),
            variables: 1,
        };
        assert_eq!(result.to_string(), "Environment file written to .env (1 variable)");
    }

    #[test]
    fn rejected_template_is_not_success() {
        let result = ActionResult::TemplateRejected {
            message: "Syntax error, unexpected EOF on line 2".into(),
        };
        assert!(!result.is_success());
        assert_eq!(
            result.to_string(),
            "Parse error: Syntax error, unexpected EOF on line 2"
        );
    }
}
