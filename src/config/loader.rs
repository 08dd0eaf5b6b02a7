//! Configuration file discovery and loading.
//!
//! A project keeps its configuration in `.toolprobe/config.yml`. An optional
//! `.toolprobe/config.local.yml` next to it is laid over the project file,
//! which lets a single machine adjust bounds or paths without touching the
//! shared file.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::merger::merge_configs;
use crate::config::schema::ProbeConfig;
use crate::error::{Result, ToolprobeError};

/// Directory holding the configuration files.
pub const CONFIG_DIR: &str = ".toolprobe";

/// Paths to configuration files in merge order (later overrides earlier).
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    /// Project config: .toolprobe/config.yml
    pub project: Option<PathBuf>,

    /// Local overrides: .toolprobe/config.local.yml
    pub project_local: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover config files for the given project root.
    pub fn discover(project_root: &Path) -> Self {
        Self {
            project: existing(project_config_path(project_root)),
            project_local: existing(project_root.join(CONFIG_DIR).join("config.local.yml")),
        }
    }

    /// Returns all existing config paths in merge order.
    pub fn all_existing(&self) -> Vec<&PathBuf> {
        self.project.iter().chain(self.project_local.iter()).collect()
    }

    /// Check if the project config exists.
    pub fn has_project_config(&self) -> bool {
        self.project.is_some()
    }
}

/// Location of the project config file, whether or not it exists.
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(CONFIG_DIR).join("config.yml")
}

/// Find the project root by walking up from `start`.
///
/// The first directory containing `.toolprobe` wins; a `.git` directory is
/// the fallback.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut fallback = None;
    for dir in start.ancestors() {
        if dir.join(CONFIG_DIR).is_dir() {
            return Some(dir.to_path_buf());
        }
        if fallback.is_none() && dir.join(".git").exists() {
            fallback = Some(dir.to_path_buf());
        }
    }
    fallback
}

/// Load a config file as raw YAML for merging.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_value(path: &Path) -> Result<serde_yaml::Value> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ToolprobeError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            ToolprobeError::Io(e)
        }
    })?;

    serde_yaml::from_str(&content).map_err(|e| ToolprobeError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load a single config file into a [`ProbeConfig`].
pub fn load_config_file(path: &Path) -> Result<ProbeConfig> {
    let value = load_config_value(path)?;
    parse_config_value(merge_configs(&[value]), path)
}

/// Parse YAML text into a [`ProbeConfig`].
///
/// `source_path` is only used for error reporting.
pub fn parse_config(content: &str, source_path: &Path) -> Result<ProbeConfig> {
    let value: serde_yaml::Value =
        serde_yaml::from_str(content).map_err(|e| ToolprobeError::ConfigParseError {
            path: source_path.to_path_buf(),
            message: e.to_string(),
        })?;
    parse_config_value(merge_configs(&[value]), source_path)
}

/// Load and merge the project config with its local overrides.
///
/// # Errors
///
/// Returns `ConfigNotFound` if no project config exists.
/// Returns `ConfigParseError` if either file is invalid.
pub fn load_merged_config(project_root: &Path) -> Result<ProbeConfig> {
    let paths = ConfigPaths::discover(project_root);

    if !paths.has_project_config() {
        return Err(ToolprobeError::ConfigNotFound {
            path: project_config_path(project_root),
        });
    }

    let mut layers = Vec::new();
    for path in paths.all_existing() {
        tracing::debug!("Loading config layer {}", path.display());
        layers.push(load_config_value(path)?);
    }

    parse_config_value(merge_configs(&layers), &project_config_path(project_root))
}

/// Load config with optional path override.
///
/// If `config_override` is provided, loads only that file without merging.
/// Otherwise, discovers and merges the project's config files.
pub fn load_config(project_root: &Path, config_override: Option<&Path>) -> Result<ProbeConfig> {
    match config_override {
        Some(path) => load_config_file(path),
        None => load_merged_config(project_root),
    }
}

fn parse_config_value(value: serde_yaml::Value, path: &Path) -> Result<ProbeConfig> {
    serde_yaml::from_value(value).map_err(|e| ToolprobeError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn existing(path: PathBuf) -> Option<PathBuf> {
    path.exists().then_some(path)
}
