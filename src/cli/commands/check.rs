//! Check command implementation.
//!
//! The `toolprobe check` command probes one tool described entirely on the
//! command line, without reading any configuration file.

use crate::cli::args::CheckArgs;
use crate::config::TargetConfig;
use crate::error::{Result, ToolprobeError};
use crate::probe::{Prober, ToolProbeRequest};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult, ProjectContext};
use super::report::{show_result, to_json};

/// The check command implementation.
pub struct CheckCommand {
    context: ProjectContext,
    args: CheckArgs,
}

impl CheckCommand {
    /// Create a new check command.
    pub fn new(context: ProjectContext, args: CheckArgs) -> Self {
        Self { context, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &CheckArgs {
        &self.args
    }

    /// Build the probe request described by the arguments.
    pub fn request(&self) -> Result<ToolProbeRequest> {
        let args = &self.args;
        let mut builder = ToolProbeRequest::builder(args.executable.as_str())
            .name(args.executable.as_str())
            .search_root(&args.root)
            .version_command(&args.version_cmd);
        if let Some(offset) = &args.relative_path {
            builder = builder.relative_home(offset);
        }
        if let Some(pattern) = &args.version_pattern {
            builder = builder.version_pattern(pattern);
        }
        if let Some(min) = &args.min {
            builder = builder.version_min(min);
        }
        if let Some(max) = &args.max {
            builder = builder.version_max(max);
        }
        builder.build()
    }
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let request = match self.request() {
            Ok(r) => r,
            Err(e @ ToolprobeError::InvalidRequest { .. }) => {
                ui.error(&e.to_string());
                return Ok(CommandResult::failure(1));
            }
            Err(e) => return Err(e),
        };

        let machine = self.context.machine(&TargetConfig::default());
        tracing::debug!(
            "Checking '{}' under {} on {}",
            request.executable(),
            request.search_root().display(),
            machine.describe()
        );
        let result = Prober::new(machine.as_ref()).probe(&request);
        let success = result.is_ok();

        let results = vec![(request.name().to_string(), result)];
        if self.args.json {
            ui.message(&to_json(&results)?);
        } else {
            for (tool, result) in &results {
                show_result(ui, tool, result);
            }
        }

        if success {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(1))
        }
    }
}
