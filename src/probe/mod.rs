//! Probe orchestration.
//!
//! A probe finds a tool's executable, derives its home directory and, when a
//! version command and pattern are configured, checks the installed version.
//!
//! ```
//! use toolprobe::locator::MockMachine;
//! use toolprobe::probe::{Prober, ToolProbeRequest};
//!
//! let mut machine = MockMachine::new();
//! machine.add_file("/opt/x/bin/tool");
//! machine.set_output(&["tool", "--version"], "Tool, version 3.2.1\n");
//!
//! let request = ToolProbeRequest::builder("tool")
//!     .search_root("/opt")
//!     .version_command(["tool", "--version"])
//!     .version_pattern(r"version (\d+\.\d+\.\d+)")
//!     .version_min("3.0.0")
//!     .version_max("3.5.0")
//!     .build()
//!     .unwrap();
//!
//! let report = Prober::new(&machine).probe(&request).unwrap();
//! assert_eq!(report.parsed_version(), Some("3.2.1"));
//! ```

pub mod outcome;
pub mod request;
pub mod runner;

pub use crate::locator::ResolvedLocation;
pub use outcome::{ProbeReport, VersionOutcome};
pub use request::{ToolProbeRequest, ToolProbeRequestBuilder};
pub use runner::Prober;
