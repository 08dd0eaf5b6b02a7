//! Configuration loading, parsing, and validation.
//!
//! This module handles all aspects of configuration:
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Deep merging in [`merger`]
//! - Validation in [`validator`]
//!
//! # Example
//!
//! ```
//! use toolprobe::config::{load_merged_config, validate};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let config_dir = temp.path().join(".toolprobe");
//! fs::create_dir_all(&config_dir).unwrap();
//! fs::write(
//!     config_dir.join("config.yml"),
//!     "tools:\n  maven:\n    executable: mvn\n    search_root: /opt/maven\n",
//! )
//! .unwrap();
//!
//! let config = load_merged_config(temp.path()).unwrap();
//! validate(&config).unwrap();
//! assert_eq!(config.tools["maven"].executable.as_deref(), Some("mvn"));
//! ```
//!
//! # Configuration File Locations
//!
//! 1. Project config (`.toolprobe/config.yml`)
//! 2. Local overrides (`.toolprobe/config.local.yml`)

pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

pub use loader::{
    find_project_root, load_config, load_config_file, load_config_value, load_merged_config,
    parse_config, project_config_path, ConfigPaths, CONFIG_DIR,
};
pub use merger::{deep_merge, merge_configs};
pub use schema::{ProbeConfig, TargetConfig, ToolConfig, VersionCommand};
pub use validator::{validate, validate_config, validate_tool, Diagnostic, Severity};
