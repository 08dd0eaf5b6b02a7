//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. Every command that touches a
//! machine receives a [`ProjectContext`], so `--project`, `--config` and
//! `--host` apply the same way everywhere.

pub mod check;
pub mod dispatcher;
pub mod lint;
pub mod probe;
pub mod report;
pub mod test_version;

pub use dispatcher::{Command, CommandDispatcher, CommandResult, ProjectContext};
