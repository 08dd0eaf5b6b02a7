//! Configuration schema types.
//!
//! These types map directly to the YAML configuration format. See the
//! [module docs](crate::config) for a complete example.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::validator::{validate_tool, Severity};
use crate::error::{Result, ToolprobeError};
use crate::locator::ExecutableConvention;
use crate::probe::ToolProbeRequest;
use crate::version::split_command_lines;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Machine the tools are expected on
    pub target: TargetConfig,

    /// Named tool entries
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub tools: BTreeMap<String, ToolConfig>,
}

impl ProbeConfig {
    /// Look up a tool entry by name.
    pub fn tool(&self, name: &str) -> Result<&ToolConfig> {
        self.tools
            .get(name)
            .ok_or_else(|| ToolprobeError::UnknownTool {
                name: name.to_string(),
            })
    }
}

/// Where probes run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    /// ssh destination; absent means the local machine
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    /// ssh client binary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssh_program: Option<String>,

    /// Extra ssh arguments placed before the host
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ssh_options: Vec<String>,

    /// Executable naming convention of the target
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<ExecutableConvention>,
}

/// Version command, given as a list or as one argument per line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VersionCommand {
    List(Vec<String>),
    Lines(String),
}

impl VersionCommand {
    /// Program and arguments with blank entries dropped.
    pub fn argv(&self) -> Vec<String> {
        match self {
            VersionCommand::List(items) => items
                .iter()
                .filter(|item| !item.trim().is_empty())
                .cloned()
                .collect(),
            VersionCommand::Lines(text) => split_command_lines(text),
        }
    }
}

/// One named tool.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Executable name or path
    #[serde(alias = "executable_path", skip_serializing_if = "Option::is_none")]
    pub executable: Option<String>,

    /// Directory the search starts from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_root: Option<PathBuf>,

    /// Offset from the executable's directory to the tool's home
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relative_path: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_cmd: Option<VersionCommand>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_pattern: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_min: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_max: Option<String>,
}

impl ToolConfig {
    /// Version command argv, empty when none is configured.
    pub fn version_argv(&self) -> Vec<String> {
        self.version_cmd
            .as_ref()
            .map(VersionCommand::argv)
            .unwrap_or_default()
    }

    /// Turn this entry into a probe request.
    ///
    /// Refuses entries with validation errors; warnings are logged.
    pub fn to_request(&self, name: &str) -> Result<ToolProbeRequest> {
        let diagnostics = validate_tool(name, self);
        let errors: Vec<_> = diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .map(|d| d.message.clone())
            .collect();
        if !errors.is_empty() {
            return Err(ToolprobeError::ConfigValidationError {
                message: errors.join("; "),
            });
        }
        for warning in diagnostics.iter().filter(|d| d.severity == Severity::Warning) {
            if warning.rule == "no-version-check" {
                tracing::debug!("{}", warning.message);
            } else {
                tracing::warn!("{}", warning.message);
            }
        }

        let mut builder = ToolProbeRequest::builder(self.executable.clone().unwrap_or_default())
            .name(name)
            .version_command(self.version_argv());
        if let Some(root) = &self.search_root {
            builder = builder.search_root(root);
        }
        if let Some(offset) = &self.relative_path {
            builder = builder.relative_home(offset);
        }
        // Pattern and bounds only take part when there is a command to run.
        if self.version_cmd.is_some() {
            if let Some(pattern) = &self.version_pattern {
                builder = builder.version_pattern(pattern);
            }
            if let Some(min) = &self.version_min {
                builder = builder.version_min(min);
            }
            if let Some(max) = &self.version_max {
                builder = builder.version_max(max);
            }
        }
        builder.build()
    }
}
