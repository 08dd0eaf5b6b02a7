//! toolprobe - Verify pre-installed tools and their versions.
//!
//! toolprobe checks that command-line tools an automated process depends on
//! are installed where expected, works out each tool's home directory from
//! the executable it finds, and optionally runs a version command to confirm
//! the installed version falls inside an accepted range. Probes run on the
//! local machine or on a remote host over ssh.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading, parsing, and validation
//! - [`error`] - Error types and result aliases
//! - [`locator`] - Machines and executable search
//! - [`probe`] - Probe requests, orchestration and reports
//! - [`ui`] - Terminal output
//! - [`version`] - Version extraction and range checks
//!
//! # Example
//!
//! ```
//! use toolprobe::version::{compare_versions, check_version_in_range, RangeCheck};
//! use std::cmp::Ordering;
//!
//! assert_eq!(compare_versions("1.10", "1.9"), Ordering::Greater);
//! assert_eq!(compare_versions("1.2", "1.2.0"), Ordering::Equal);
//! assert_eq!(
//!     check_version_in_range(Some("11"), None, Some("17.0.2")),
//!     RangeCheck::InRange
//! );
//! ```
//!
//! For file-based config loading, see the integration tests.

pub mod cli;
pub mod config;
pub mod error;
pub mod locator;
pub mod probe;
pub mod ui;
pub mod version;

pub use error::{FailureKind, Result, ToolprobeError};
pub use locator::{LocalMachine, Machine, ResolvedLocation, SshMachine};
pub use probe::{ProbeReport, Prober, ToolProbeRequest};
