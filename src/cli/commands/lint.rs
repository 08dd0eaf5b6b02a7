//! Lint command implementation.
//!
//! The `toolprobe lint` command validates configuration files without
//! probing anything.

use crate::cli::args::LintArgs;
use crate::config::{load_config, validate_config, Diagnostic, Severity};
use crate::error::{Result, ToolprobeError};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult, ProjectContext, EXIT_NO_CONFIG};

/// The lint command implementation.
pub struct LintCommand {
    context: ProjectContext,
    args: LintArgs,
}

impl LintCommand {
    /// Create a new lint command.
    pub fn new(context: ProjectContext, args: LintArgs) -> Self {
        Self { context, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &LintArgs {
        &self.args
    }

    fn is_json(&self) -> bool {
        self.args.format == "json"
    }

    fn show_diagnostic(ui: &mut dyn UserInterface, diagnostic: &Diagnostic) {
        let location = match (&diagnostic.tool, &diagnostic.field) {
            (Some(tool), Some(field)) => format!("tools.{}.{}", tool, field),
            (None, Some(field)) => field.clone(),
            (Some(tool), None) => format!("tools.{}", tool),
            (None, None) => String::new(),
        };
        let line = format!("{}: {} [{}]", location, diagnostic.message, diagnostic.rule);
        match diagnostic.severity {
            Severity::Error => ui.error(&line),
            Severity::Warning => ui.warning(&line),
        }
    }
}

impl Command for LintCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = match load_config(
            &self.context.project_root,
            self.context.config_override.as_deref(),
        ) {
            Ok(c) => c,
            Err(ToolprobeError::ConfigNotFound { path }) => {
                ui.error(&format!("No configuration found at {}", path.display()));
                return Ok(CommandResult::failure(EXIT_NO_CONFIG));
            }
            Err(ToolprobeError::ConfigParseError { path, message }) => {
                ui.error(&format!("Parse error in {}: {}", path.display(), message));
                return Ok(CommandResult::failure(1));
            }
            Err(e) => return Err(e),
        };

        let diagnostics = validate_config(&config);
        let errors = diagnostics.iter().filter(|d| d.is_error()).count();
        let warnings = diagnostics.len() - errors;
        let should_fail = errors > 0 || (self.args.strict && warnings > 0);

        if self.is_json() {
            let output = serde_json::to_string_pretty(&diagnostics)
                .map_err(|e| ToolprobeError::Other(e.into()))?;
            ui.message(&output);
        } else if diagnostics.is_empty() {
            ui.success("Configuration is valid!");
        } else {
            for diagnostic in &diagnostics {
                Self::show_diagnostic(ui, diagnostic);
            }
            ui.message(&format!("{} error(s), {} warning(s)", errors, warnings));
        }

        if should_fail {
            Ok(CommandResult::failure(1))
        } else {
            Ok(CommandResult::success())
        }
    }
}
