//! Version extraction and range checking.
//!
//! # Modules
//!
//! - [`extract`] - Pull a version token out of command output
//! - [`compare`] - Dotted-segment ordering and inclusive range checks
//!
//! # Example
//!
//! ```
//! use regex::Regex;
//! use toolprobe::version::{check_version_in_range, extract_version, RangeCheck};
//!
//! let pattern = Regex::new(r"version (\d+\.\d+\.\d+)").unwrap();
//! let version = extract_version(&pattern, "Tool, version 3.2.1\n");
//! assert_eq!(version.as_deref(), Some("3.2.1"));
//!
//! let result = check_version_in_range(Some("3.0.0"), Some("3.5.0"), version.as_deref());
//! assert_eq!(result, RangeCheck::InRange);
//! ```

pub mod compare;
pub mod extract;

pub use compare::{check_version_in_range, compare_versions, RangeCheck};
pub use extract::{extract_version, split_command_lines};
