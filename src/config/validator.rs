//! Configuration validation rules.
//!
//! Every problem is collected rather than stopping at the first one, so a
//! single `toolprobe lint` run shows everything that needs fixing.
//!
//! Errors make a tool entry unusable. Warnings flag entries that are legal
//! but probably not what the author meant.

use regex::Regex;
use serde::Serialize;

use crate::config::schema::{ProbeConfig, ToolConfig, VersionCommand};
use crate::error::{Result, ToolprobeError};
use crate::version::compare_versions;

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

/// A validation finding with context.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Rule identifier
    pub rule: String,
    /// Human-readable message
    pub message: String,
    /// Tool name if the finding is tool-specific
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool: Option<String>,
    /// Offending field
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl Diagnostic {
    fn error(rule: &str, tool: &str, field: &str, message: String) -> Self {
        Self {
            severity: Severity::Error,
            rule: rule.to_string(),
            message,
            tool: Some(tool.to_string()),
            field: Some(field.to_string()),
        }
    }

    fn warning(rule: &str, tool: Option<&str>, field: &str, message: String) -> Self {
        Self {
            severity: Severity::Warning,
            rule: rule.to_string(),
            message,
            tool: tool.map(String::from),
            field: Some(field.to_string()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Validate a whole configuration.
pub fn validate_config(config: &ProbeConfig) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    if config.tools.is_empty() {
        diagnostics.push(Diagnostic::warning(
            "no-tools",
            None,
            "tools",
            "No tools are configured".to_string(),
        ));
    }

    if config.target.host.is_none()
        && (config.target.ssh_program.is_some() || !config.target.ssh_options.is_empty())
    {
        diagnostics.push(Diagnostic::warning(
            "ssh-without-host",
            None,
            "target",
            "ssh settings are ignored because no target host is set".to_string(),
        ));
    }

    for (name, tool) in &config.tools {
        diagnostics.extend(validate_tool(name, tool));
    }

    diagnostics
}

/// Validate one tool entry.
pub fn validate_tool(name: &str, tool: &ToolConfig) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    let executable = tool.executable.as_deref().map(str::trim).unwrap_or("");
    if executable.is_empty() {
        diagnostics.push(Diagnostic::error(
            "missing-executable",
            name,
            "executable",
            format!("Tool '{}' must name an executable", name),
        ));
    }

    let argv = tool.version_argv();
    let pattern = present(&tool.version_pattern);
    let min = present(&tool.version_min);
    let max = present(&tool.version_max);

    if argv.is_empty() {
        diagnostics.push(Diagnostic::warning(
            "no-version-check",
            Some(name),
            "version_cmd",
            format!("Tool '{}' has no version command; its version will not be checked", name),
        ));
        if pattern.is_some() || min.is_some() || max.is_some() {
            diagnostics.push(Diagnostic::warning(
                "version-settings-ignored",
                Some(name),
                "version_cmd",
                format!(
                    "Tool '{}' sets a version pattern or bounds without a version command; they are ignored",
                    name
                ),
            ));
        }
        return diagnostics;
    }

    let single_entry = match &tool.version_cmd {
        Some(VersionCommand::List(items)) if items.len() == 1 => Some(items[0].trim()),
        Some(VersionCommand::Lines(text)) if !text.contains('\n') => Some(text.trim()),
        _ => None,
    };
    if let Some(single) = single_entry.filter(|s| s.contains(' ')) {
        diagnostics.push(Diagnostic::warning(
            "command-with-spaces",
            Some(name),
            "version_cmd",
            format!(
                "Tool '{}' runs '{}' as a single program name; put each argument on its own line or list entry",
                name, single
            ),
        ));
    }

    match pattern {
        None => diagnostics.push(Diagnostic::error(
            "missing-pattern",
            name,
            "version_pattern",
            format!("Tool '{}' has a version command but no version pattern", name),
        )),
        Some(pattern) => {
            if let Err(e) = Regex::new(pattern) {
                diagnostics.push(Diagnostic::error(
                    "invalid-pattern",
                    name,
                    "version_pattern",
                    format!("Tool '{}' has an invalid version pattern: {}", name, e),
                ));
            }
            if min.is_none() && max.is_none() {
                diagnostics.push(Diagnostic::error(
                    "missing-bounds",
                    name,
                    "version_min",
                    format!(
                        "Tool '{}' has a version command and pattern but neither version_min nor version_max",
                        name
                    ),
                ));
            }
        }
    }

    if let (Some(min), Some(max)) = (min, max) {
        if compare_versions(min, max).is_gt() {
            diagnostics.push(Diagnostic::error(
                "inverted-range",
                name,
                "version_min",
                format!(
                    "Tool '{}' has version_min {} greater than version_max {}",
                    name, min, max
                ),
            ));
        }
    }

    diagnostics
}

/// Validate and return Result (for convenience).
///
/// # Errors
///
/// Returns `ConfigValidationError` if any rule reports an error. Warnings
/// are not failures.
pub fn validate(config: &ProbeConfig) -> Result<()> {
    let errors: Vec<_> = validate_config(config)
        .into_iter()
        .filter(Diagnostic::is_error)
        .map(|d| d.message)
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ToolprobeError::ConfigValidationError {
            message: errors.join("; "),
        })
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
