//! Probe command implementation.
//!
//! The `toolprobe probe` command checks configured tools on the target
//! machine and reports where each one lives.

use crate::cli::args::ProbeArgs;
use crate::config::{load_config, ProbeConfig};
use crate::error::{Result, ToolprobeError};
use crate::probe::{ProbeReport, Prober};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult, ProjectContext, EXIT_NO_CONFIG};
use super::report::{show_result, to_json};

/// The probe command implementation.
pub struct ProbeCommand {
    context: ProjectContext,
    args: ProbeArgs,
}

impl ProbeCommand {
    /// Create a new probe command.
    pub fn new(context: ProjectContext, args: ProbeArgs) -> Self {
        Self { context, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &ProbeArgs {
        &self.args
    }

    /// Names of the tools to probe, in report order.
    fn selected_tools(&self, config: &ProbeConfig) -> Vec<String> {
        if self.args.tools.is_empty() {
            config.tools.keys().cloned().collect()
        } else {
            self.args.tools.clone()
        }
    }

    /// Probe every selected tool, collecting each outcome.
    pub fn run_probes(&self, config: &ProbeConfig) -> Vec<(String, Result<ProbeReport>)> {
        let machine = self.context.machine(&config.target);
        let prober = Prober::new(machine.as_ref());

        self.selected_tools(config)
            .into_iter()
            .map(|name| {
                let result = config
                    .tool(&name)
                    .and_then(|tool| tool.to_request(&name))
                    .and_then(|request| prober.probe(&request));
                (name, result)
            })
            .collect()
    }
}

impl Command for ProbeCommand {
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
            Err(e) => return Err(e),
        };

        if config.tools.is_empty() && self.args.tools.is_empty() {
            if !self.args.json {
                ui.warning("No tools configured");
            } else {
                ui.message("[]");
            }
            return Ok(CommandResult::success());
        }

        if !self.args.json {
            let count = self.selected_tools(&config).len();
            let label = if count == 1 { "tool" } else { "tools" };
            ui.show_header(&format!("Probing {} {}", count, label));
        }

        let results = self.run_probes(&config);
        let failed = results.iter().filter(|(_, r)| r.is_err()).count();

        if self.args.json {
            ui.message(&to_json(&results)?);
        } else {
            for (tool, result) in &results {
                show_result(ui, tool, result);
            }
            if failed == 0 {
                ui.message(&format!("All {} passed", results.len()));
            } else {
                ui.message(&format!("{} of {} failed", failed, results.len()));
            }
        }

        if failed == 0 {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(1))
        }
    }
}
