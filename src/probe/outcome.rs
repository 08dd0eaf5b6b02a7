//! Results of a successful probe.

use std::path::Path;

use serde::Serialize;

use crate::locator::ResolvedLocation;
use crate::version::RangeCheck;

/// What the version command said and how it compared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionOutcome {
    /// Captured standard output, decoded as UTF-8.
    pub raw_output: String,

    /// Version token extracted from the output.
    pub parsed_version: Option<String>,

    pub comparison: RangeCheck,
}

/// A tool that was found and, if configured, passed its version check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeReport {
    /// Tool name from the request.
    pub tool: String,

    #[serde(flatten)]
    pub location: ResolvedLocation,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<VersionOutcome>,
}

impl ProbeReport {
    /// The tool's home directory.
    pub fn home_directory(&self) -> &Path {
        &self.location.home_directory
    }

    pub fn executable_path(&self) -> &Path {
        &self.location.executable_path
    }

    /// Parsed version, if the version command ran and matched.
    pub fn parsed_version(&self) -> Option<&str> {
        self.version
            .as_ref()
            .and_then(|v| v.parsed_version.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn report(version: Option<VersionOutcome>) -> ProbeReport {
        ProbeReport {
            tool: "node".to_string(),
            location: ResolvedLocation {
                executable_path: PathBuf::from("/opt/node/bin/node"),
                home_directory: PathBuf::from("/opt/node"),
            },
            version,
        }
    }

    #[test]
    fn accessors_expose_location() {
        let report = report(None);
        assert_eq!(report.home_directory(), Path::new("/opt/node"));
        assert_eq!(report.executable_path(), Path::new("/opt/node/bin/node"));
        assert!(report.parsed_version().is_none());
    }

    #[test]
    fn serializes_flat_location_and_version() {
        let report = report(Some(VersionOutcome {
            raw_output: "v20.1.0\n".to_string(),
            parsed_version: Some("20.1.0".to_string()),
            comparison: RangeCheck::InRange,
        }));
        assert_eq!(report.parsed_version(), Some("20.1.0"));

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["tool"], "node");
        assert_eq!(json["home_directory"], "/opt/node");
        assert_eq!(json["executable_path"], "/opt/node/bin/node");
        assert_eq!(json["version"]["parsed_version"], "20.1.0");
        assert_eq!(json["version"]["comparison"], "in_range");
    }

    #[test]
    fn omits_version_when_not_checked() {
        let json = serde_json::to_value(report(None)).unwrap();
        assert!(json.get("version").is_none());
    }
}
