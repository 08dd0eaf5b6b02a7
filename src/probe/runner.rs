//! The locate, gate, probe, parse and validate workflow.

use crate::error::{Result, ToolprobeError};
use crate::locator::{display_command, locate, Machine};
use crate::version::{check_version_in_range, extract_version, RangeCheck};

use super::outcome::{ProbeReport, VersionOutcome};
use super::request::ToolProbeRequest;

/// Runs probes against one machine.
///
/// Holds no state between probes; every call searches the filesystem and
/// runs the version command again.
pub struct Prober<'m> {
    machine: &'m dyn Machine,
}

impl<'m> Prober<'m> {
    pub fn new(machine: &'m dyn Machine) -> Self {
        Self { machine }
    }

    /// The machine probes run on.
    pub fn machine(&self) -> &dyn Machine {
        self.machine
    }

    /// Probe one tool.
    ///
    /// Succeeds with the tool's location once it is found and its version,
    /// when checked, is acceptable. Any failure ends the probe.
    pub fn probe(&self, request: &ToolProbeRequest) -> Result<ProbeReport> {
        let tool = request.name();
        tracing::debug!(
            "Probing '{}' for {} under {} on {}",
            tool,
            request.executable(),
            request.search_root().display(),
            self.machine.describe()
        );

        let location = locate(
            self.machine,
            request.executable(),
            request.search_root(),
            request.relative_home(),
        )?;

        let (Some(command), Some(pattern)) = (request.version_command(), request.version_pattern())
        else {
            tracing::debug!("'{}' found at {}", tool, location.home_directory.display());
            return Ok(ProbeReport {
                tool: tool.to_string(),
                location,
                version: None,
            });
        };

        let output = self
            .machine
            .run(&location.home_directory, command)
            .map_err(|e| ToolprobeError::ProbeExecutionError {
                tool: tool.to_string(),
                command: display_command(command),
                message: e.to_string(),
            })?;

        if !output.success() {
            tracing::debug!(
                "'{}' exited with status {:?}",
                display_command(command),
                output.status
            );
        }
        if !output.stderr.is_empty() {
            tracing::debug!("stderr of '{}': {}", tool, output.stderr_text().trim_end());
        }

        let raw_output = output.stdout_text();
        let parsed_version = extract_version(pattern, &raw_output);

        let comparison = if request.has_bounds() {
            check_version_in_range(
                request.version_min(),
                request.version_max(),
                parsed_version.as_deref(),
            )
        } else {
            RangeCheck::NotEvaluated
        };

        if !comparison.is_acceptable() {
            return Err(ToolprobeError::VersionOutOfRange {
                tool: tool.to_string(),
                home: location.home_directory,
                version: parsed_version,
                min: request.version_min().map(String::from),
                max: request.version_max().map(String::from),
                comparison,
            });
        }

        tracing::debug!(
            "'{}' found at {} with version {}",
            tool,
            location.home_directory.display(),
            parsed_version.as_deref().unwrap_or("(unparsed)")
        );

        Ok(ProbeReport {
            tool: tool.to_string(),
            location,
            version: Some(VersionOutcome {
                raw_output,
                parsed_version,
                comparison,
            }),
        })
    }
}
