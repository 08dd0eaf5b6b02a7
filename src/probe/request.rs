//! Validated input of a single probe.

use std::path::{Path, PathBuf};

use regex::Regex;

use crate::error::{Result, ToolprobeError};
use crate::version::compare_versions;

/// Everything needed to probe one tool.
///
/// Built through [`ToolProbeRequest::builder`]; immutable afterwards.
#[derive(Debug, Clone)]
pub struct ToolProbeRequest {
    name: String,
    executable: String,
    search_root: PathBuf,
    relative_home: Option<PathBuf>,
    version_command: Option<Vec<String>>,
    version_pattern: Option<Regex>,
    version_min: Option<String>,
    version_max: Option<String>,
}

impl ToolProbeRequest {
    /// Start building a request for `executable`.
    pub fn builder(executable: impl Into<String>) -> ToolProbeRequestBuilder {
        ToolProbeRequestBuilder::new(executable)
    }

    /// Name used in diagnostics.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Executable name or path to look for.
    pub fn executable(&self) -> &str {
        &self.executable
    }

    /// Directory the search starts from.
    pub fn search_root(&self) -> &Path {
        &self.search_root
    }

    /// Offset from the executable's directory to the tool's home.
    pub fn relative_home(&self) -> Option<&Path> {
        self.relative_home.as_deref()
    }

    /// Program and arguments that print the version.
    pub fn version_command(&self) -> Option<&[String]> {
        self.version_command.as_deref()
    }

    pub fn version_pattern(&self) -> Option<&Regex> {
        self.version_pattern.as_ref()
    }

    pub fn version_min(&self) -> Option<&str> {
        self.version_min.as_deref()
    }

    pub fn version_max(&self) -> Option<&str> {
        self.version_max.as_deref()
    }

    /// Whether the probe will run the version command at all.
    pub fn checks_version(&self) -> bool {
        self.version_command.is_some() && self.version_pattern.is_some()
    }

    /// Whether at least one version bound is configured.
    pub fn has_bounds(&self) -> bool {
        self.version_min.is_some() || self.version_max.is_some()
    }
}

/// Builder for [`ToolProbeRequest`].
#[derive(Debug, Clone)]
pub struct ToolProbeRequestBuilder {
    name: Option<String>,
    executable: String,
    search_root: PathBuf,
    relative_home: Option<PathBuf>,
    version_command: Vec<String>,
    version_pattern: Option<String>,
    version_min: Option<String>,
    version_max: Option<String>,
}

impl ToolProbeRequestBuilder {
    /// Create a builder searching the current directory for `executable`.
    pub fn new(executable: impl Into<String>) -> Self {
        Self {
            name: None,
            executable: executable.into(),
            search_root: PathBuf::from("."),
            relative_home: None,
            version_command: Vec::new(),
            version_pattern: None,
            version_min: None,
            version_max: None,
        }
    }

    /// Set the tool name used in diagnostics (defaults to the executable).
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn search_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.search_root = root.into();
        self
    }

    pub fn relative_home(mut self, offset: impl Into<PathBuf>) -> Self {
        self.relative_home = Some(offset.into());
        self
    }

    /// Set the version command as program plus arguments.
    pub fn version_command<I, S>(mut self, argv: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.version_command = argv.into_iter().map(Into::into).collect();
        self
    }

    /// Set the pattern the version token is extracted with.
    pub fn version_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.version_pattern = Some(pattern.into());
        self
    }

    pub fn version_min(mut self, min: impl Into<String>) -> Self {
        self.version_min = Some(min.into());
        self
    }

    pub fn version_max(mut self, max: impl Into<String>) -> Self {
        self.version_max = Some(max.into());
        self
    }

    /// Validate and build the request.
    ///
    /// Empty strings count as absent. Fails on an empty executable, a
    /// pattern that does not compile, or a minimum above the maximum.
    pub fn build(self) -> Result<ToolProbeRequest> {
        let executable = self.executable.trim().to_string();
        let name = non_empty(self.name).unwrap_or_else(|| executable.clone());
        let invalid = |message: String| ToolprobeError::InvalidRequest {
            tool: name.clone(),
            message,
        };

        if executable.is_empty() {
            return Err(invalid("executable must not be empty".to_string()));
        }

        let version_command: Vec<String> = self
            .version_command
            .into_iter()
            .filter(|arg| !arg.is_empty())
            .collect();

        let version_pattern = match non_empty(self.version_pattern) {
            Some(pattern) => Some(
                Regex::new(&pattern)
                    .map_err(|e| invalid(format!("invalid version pattern: {}", e)))?,
            ),
            None => None,
        };

        let version_min = non_empty(self.version_min);
        let version_max = non_empty(self.version_max);
        if let (Some(min), Some(max)) = (&version_min, &version_max) {
            if compare_versions(min, max).is_gt() {
                return Err(invalid(format!(
                    "minimum version {} is greater than maximum version {}",
                    min, max
                )));
            }
        }

        let relative_home = self
            .relative_home
            .filter(|p| !p.as_os_str().is_empty() && p != Path::new("."));

        Ok(ToolProbeRequest {
            name,
            executable,
            search_root: self.search_root,
            relative_home,
            version_command: (!version_command.is_empty()).then_some(version_command),
            version_pattern,
            version_min,
            version_max,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_request_has_defaults() {
        let request = ToolProbeRequest::builder("gradle").build().unwrap();
        assert_eq!(request.name(), "gradle");
        assert_eq!(request.executable(), "gradle");
        assert_eq!(request.search_root(), Path::new("."));
        assert!(request.relative_home().is_none());
        assert!(request.version_command().is_none());
        assert!(!request.checks_version());
        assert!(!request.has_bounds());
    }

    #[test]
    fn full_request_keeps_every_field() {
        let request = ToolProbeRequest::builder("java")
            .name("jdk")
            .search_root("/opt/jdk")
            .relative_home("..")
            .version_command(["java", "-version"])
            .version_pattern(r#"version "([\d.]+)"#)
            .version_min("11")
            .version_max("17.99")
            .build()
            .unwrap();

        assert_eq!(request.name(), "jdk");
        assert_eq!(request.search_root(), Path::new("/opt/jdk"));
        assert_eq!(request.relative_home(), Some(Path::new("..")));
        assert_eq!(
            request.version_command(),
            Some(&["java".to_string(), "-version".to_string()][..])
        );
        assert!(request.checks_version());
        assert!(request.has_bounds());
        assert_eq!(request.version_min(), Some("11"));
        assert_eq!(request.version_max(), Some("17.99"));
    }

    #[test]
    fn empty_executable_is_rejected() {
        let err = ToolProbeRequest::builder("  ").build().unwrap_err();
        assert!(matches!(err, ToolprobeError::InvalidRequest { .. }));
    }

    #[test]
    fn bad_pattern_is_rejected() {
        let err = ToolProbeRequest::builder("tool")
            .version_pattern("version (")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("invalid version pattern"));
    }

    #[test]
    fn min_above_max_is_rejected() {
        let err = ToolProbeRequest::builder("tool")
            .name("t")
            .version_min("2.0")
            .version_max("1.10")
            .build()
            .unwrap_err();
        match err {
            ToolprobeError::InvalidRequest { tool, message } => {
                assert_eq!(tool, "t");
                assert!(message.contains("greater than"));
            }
            other => panic!("expected InvalidRequest, got {other:?}"),
        }
    }

    #[test]
    fn equal_bounds_are_allowed() {
        let request = ToolProbeRequest::builder("tool")
            .version_min("1.2")
            .version_max("1.2.0")
            .build();
        assert!(request.is_ok());
    }

    #[test]
    fn empty_strings_count_as_absent() {
        let request = ToolProbeRequest::builder("tool")
            .name("")
            .relative_home(".")
            .version_command(["", ""])
            .version_pattern("")
            .version_min("")
            .version_max(" ")
            .build()
            .unwrap();

        assert_eq!(request.name(), "tool");
        assert!(request.relative_home().is_none());
        assert!(request.version_command().is_none());
        assert!(request.version_pattern().is_none());
        assert!(!request.has_bounds());
    }

    #[test]
    fn pattern_without_bounds_is_legal() {
        let request = ToolProbeRequest::builder("tool")
            .version_command(["tool", "--version"])
            .version_pattern(r"(\d+\.\d+)")
            .build()
            .unwrap();
        assert!(request.checks_version());
        assert!(!request.has_bounds());
    }
}
