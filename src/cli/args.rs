//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// toolprobe - Verify pre-installed tools and their versions.
#[derive(Debug, Parser)]
#[command(name = "toolprobe")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides default .toolprobe/config.yml)
    #[arg(short, long, global = true, env = "TOOLPROBE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Probe on this ssh host instead of the configured target
    #[arg(long, global = true, value_name = "HOST")]
    pub host: Option<String>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Probe configured tools (default if no command specified)
    Probe(ProbeArgs),

    /// Probe a single tool given on the command line
    Check(CheckArgs),

    /// Validate configuration files
    Lint(LintArgs),

    /// Try a version pattern and range against sample output
    TestVersion(TestVersionArgs),
}

/// Arguments for the `probe` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ProbeArgs {
    /// Tools to probe (all configured tools if omitted)
    pub tools: Vec<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CheckArgs {
    /// Executable name or path to look for
    #[arg(short, long)]
    pub executable: String,

    /// Directory to search from
    #[arg(short, long, default_value = ".")]
    pub root: PathBuf,

    /// Offset from the executable's directory to the tool's home
    #[arg(long, value_name = "PATH")]
    pub relative_path: Option<String>,

    /// Version command; repeat once per argument
    #[arg(long = "version-cmd", value_name = "ARG", allow_hyphen_values = true)]
    pub version_cmd: Vec<String>,

    /// Pattern whose first group is the version
    #[arg(long, value_name = "REGEX")]
    pub version_pattern: Option<String>,

    /// Minimum accepted version (inclusive)
    #[arg(long, value_name = "VERSION")]
    pub min: Option<String>,

    /// Maximum accepted version (inclusive)
    #[arg(long, value_name = "VERSION")]
    pub max: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `lint` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct LintArgs {
    /// Output format: human, json
    #[arg(long, default_value = "human")]
    pub format: String,

    /// Treat warnings as errors
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the `test-version` command.
#[derive(Debug, Clone, clap::Args)]
pub struct TestVersionArgs {
    /// Pattern whose first group is the version
    #[arg(long, value_name = "REGEX")]
    pub pattern: String,

    /// Minimum accepted version (inclusive)
    #[arg(long, value_name = "VERSION")]
    pub min: Option<String>,

    /// Maximum accepted version (inclusive)
    #[arg(long, value_name = "VERSION")]
    pub max: Option<String>,

    /// Sample version command output
    pub sample: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_probe_with_tools() {
        let cli = Cli::try_parse_from(["toolprobe", "probe", "jdk", "maven", "--json"]).unwrap();
        match cli.command {
            Some(Commands::Probe(args)) => {
                assert_eq!(args.tools, vec!["jdk", "maven"]);
                assert!(args.json);
            }
            other => panic!("expected probe, got {other:?}"),
        }
    }

    #[test]
    fn no_subcommand_is_allowed() {
        let cli = Cli::try_parse_from(["toolprobe", "--quiet"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.quiet);
    }

    #[test]
    fn parses_check_with_hyphenated_command() {
        let cli = Cli::try_parse_from([
            "toolprobe",
            "check",
            "--executable",
            "java",
            "--root",
            "/opt",
            "--version-cmd",
            "java",
            "--version-cmd",
            "-version",
            "--min",
            "11",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Check(args)) => {
                assert_eq!(args.executable, "java");
                assert_eq!(args.root, PathBuf::from("/opt"));
                assert_eq!(args.version_cmd, vec!["java", "-version"]);
                assert_eq!(args.min.as_deref(), Some("11"));
                assert!(args.max.is_none());
            }
            other => panic!("expected check, got {other:?}"),
        }
    }

    #[test]
    fn check_requires_executable() {
        assert!(Cli::try_parse_from(["toolprobe", "check"]).is_err());
    }

    #[test]
    fn global_flags_work_after_subcommand() {
        let cli =
            Cli::try_parse_from(["toolprobe", "lint", "--host", "ci@agent", "--debug"]).unwrap();
        assert_eq!(cli.host.as_deref(), Some("ci@agent"));
        assert!(cli.debug);
    }

    #[test]
    fn parses_test_version() {
        let cli = Cli::try_parse_from([
            "toolprobe",
            "test-version",
            "--pattern",
            r"v(\d+)",
            "--max",
            "20",
            "node v18.2.0",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::TestVersion(args)) => {
                assert_eq!(args.sample, "node v18.2.0");
                assert_eq!(args.max.as_deref(), Some("20"));
            }
            other => panic!("expected test-version, got {other:?}"),
        }
    }
}
