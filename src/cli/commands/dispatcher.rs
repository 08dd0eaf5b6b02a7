//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands, ProbeArgs};
use crate::config::TargetConfig;
use crate::error::Result;
use crate::locator::{LocalMachine, Machine, SshMachine};
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Exit code when no configuration file exists.
pub const EXIT_NO_CONFIG: i32 = 2;

/// Where a command runs: project root, config override and target host.
#[derive(Debug, Clone, Default)]
pub struct ProjectContext {
    pub project_root: PathBuf,
    pub config_override: Option<PathBuf>,
    pub host: Option<String>,
}

impl ProjectContext {
    /// Create a context for `project_root` with no overrides.
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            ..Default::default()
        }
    }

    /// Build the machine probes run on.
    ///
    /// `--host` wins over `target.host`; with neither, the local machine is
    /// used and relative search roots resolve against the project root.
    pub fn machine(&self, target: &TargetConfig) -> Box<dyn Machine> {
        match self.host.as_ref().or(target.host.as_ref()) {
            Some(host) => {
                let mut machine = SshMachine::new(host.clone())
                    .with_options(target.ssh_options.clone())
                    .with_convention(target.platform.unwrap_or_default());
                if let Some(program) = &target.ssh_program {
                    machine = machine.with_program(program.clone());
                }
                Box::new(machine)
            }
            None => {
                let mut machine = LocalMachine::with_base_dir(&self.project_root);
                if let Some(platform) = target.platform {
                    machine = machine.with_convention(platform);
                }
                Box::new(machine)
            }
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    context: ProjectContext,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given project root.
    pub fn new(project_root: PathBuf) -> Self {
        Self {
            context: ProjectContext::new(project_root),
        }
    }

    /// Create a dispatcher from parsed global flags.
    pub fn from_cli(project_root: PathBuf, cli: &Cli) -> Self {
        Self {
            context: ProjectContext {
                project_root,
                config_override: cli.config.clone(),
                host: cli.host.clone(),
            },
        }
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.context.project_root
    }

    /// Dispatch and execute a command.
    ///
    /// Routes the CLI subcommand to the appropriate command implementation
    /// and executes it.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Some(Commands::Probe(args)) => {
                super::probe::ProbeCommand::new(self.context.clone(), args.clone()).execute(ui)
            }
            Some(Commands::Check(args)) => {
                super::check::CheckCommand::new(self.context.clone(), args.clone()).execute(ui)
            }
            Some(Commands::Lint(args)) => {
                super::lint::LintCommand::new(self.context.clone(), args.clone()).execute(ui)
            }
            Some(Commands::TestVersion(args)) => {
                super::test_version::TestVersionCommand::new(args.clone()).execute(ui)
            }
            None => {
                // Default to probing every configured tool
                super::probe::ProbeCommand::new(self.context.clone(), ProbeArgs::default())
                    .execute(ui)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::ExecutableConvention;
    use clap::Parser;

    #[test]
    fn command_result_success() {
        let result = CommandResult::success();
        assert!(result.success);
        assert_eq!(result.exit_code, 0);
    }

    #[test]
    fn command_result_failure() {
        let result = CommandResult::failure(EXIT_NO_CONFIG);
        assert!(!result.success);
        assert_eq!(result.exit_code, 2);
    }

    #[test]
    fn dispatcher_keeps_project_root() {
        let dispatcher = CommandDispatcher::new(PathBuf::from("/project"));
        assert_eq!(dispatcher.project_root(), Path::new("/project"));
    }

    #[test]
    fn from_cli_carries_global_flags() {
        let cli = Cli::try_parse_from(["toolprobe", "--host", "ci@agent", "lint"]).unwrap();
        let dispatcher = CommandDispatcher::from_cli(PathBuf::from("/p"), &cli);
        assert_eq!(dispatcher.context.host.as_deref(), Some("ci@agent"));
    }

    #[test]
    fn local_machine_without_host() {
        let context = ProjectContext::new("/p");
        let machine = context.machine(&TargetConfig::default());
        assert_eq!(machine.describe(), "local");
    }

    #[test]
    fn target_host_selects_ssh() {
        let context = ProjectContext::new("/p");
        let target = TargetConfig {
            host: Some("builder".to_string()),
            platform: Some(ExecutableConvention::Windows),
            ..Default::default()
        };
        let machine = context.machine(&target);
        assert_eq!(machine.describe(), "ssh://builder");
        assert_eq!(machine.convention(), ExecutableConvention::Windows);
    }

    #[test]
    fn host_flag_overrides_target() {
        let context = ProjectContext {
            host: Some("override".to_string()),
            ..ProjectContext::new("/p")
        };
        let target = TargetConfig {
            host: Some("configured".to_string()),
            ..Default::default()
        };
        assert_eq!(context.machine(&target).describe(), "ssh://override");
    }
}
