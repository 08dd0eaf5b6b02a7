//! Rendering of probe results for the terminal and as JSON.

use serde::Serialize;

use crate::error::{FailureKind, Result, ToolprobeError};
use crate::locator::ResolvedLocation;
use crate::probe::{ProbeReport, VersionOutcome};
use crate::ui::UserInterface;

/// One tool's result in `--json` output.
#[derive(Debug, Serialize)]
pub struct ProbeResultJson {
    pub tool: String,
    pub success: bool,
    #[serde(flatten)]
    pub location: Option<ResolvedLocation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<VersionOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorJson>,
}

/// A failure in `--json` output.
///
/// Version and bounds are only present for out-of-range versions.
#[derive(Debug, Serialize)]
pub struct ErrorJson {
    pub kind: FailureKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<String>,
}

impl ErrorJson {
    pub fn from_error(error: &ToolprobeError) -> Self {
        let mut json = Self {
            kind: error.kind(),
            message: error.to_string(),
            version: None,
            min: None,
            max: None,
        };
        if let ToolprobeError::VersionOutOfRange { version, min, max, .. } = error {
            json.version = version.clone();
            json.min = min.clone();
            json.max = max.clone();
        }
        json
    }
}

impl ProbeResultJson {
    pub fn from_result(tool: &str, result: &Result<ProbeReport>) -> Self {
        match result {
            Ok(report) => Self {
                tool: report.tool.clone(),
                success: true,
                location: Some(report.location.clone()),
                version: report.version.clone(),
                error: None,
            },
            Err(e) => Self {
                tool: tool.to_string(),
                success: false,
                location: None,
                version: None,
                error: Some(ErrorJson::from_error(e)),
            },
        }
    }
}

/// Serialize results as a pretty JSON array.
pub fn to_json(results: &[(String, Result<ProbeReport>)]) -> Result<String> {
    let entries: Vec<_> = results
        .iter()
        .map(|(tool, result)| ProbeResultJson::from_result(tool, result))
        .collect();
    serde_json::to_string_pretty(&entries).map_err(|e| ToolprobeError::Other(e.into()))
}

/// Show one tool's result.
pub fn show_result(ui: &mut dyn UserInterface, tool: &str, result: &Result<ProbeReport>) {
    match result {
        Ok(report) => {
            if ui.output_mode().shows_progress() {
                let line = match report.parsed_version() {
                    Some(version) => format!(
                        "{}: {} ({})",
                        tool,
                        report.home_directory().display(),
                        version
                    ),
                    None => format!("{}: {}", tool, report.home_directory().display()),
                };
                ui.success(&line);
            }
            ui.show_detail("executable", &report.executable_path().display().to_string());
            if let Some(outcome) = &report.version {
                ui.show_detail("output", outcome.raw_output.trim_end());
            }
        }
        Err(e) => ui.error(&format!("{}: {}", tool, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::{MockUI, OutputMode};
    use crate::version::RangeCheck;
    use std::path::PathBuf;

    fn report() -> ProbeReport {
        ProbeReport {
            tool: "jdk".to_string(),
            location: ResolvedLocation {
                executable_path: PathBuf::from("/opt/jdk/bin/java"),
                home_directory: PathBuf::from("/opt/jdk"),
            },
            version: Some(VersionOutcome {
                raw_output: "openjdk version \"17.0.2\"\n".to_string(),
                parsed_version: Some("17.0.2".to_string()),
                comparison: RangeCheck::InRange,
            }),
        }
    }

    fn not_found() -> ToolprobeError {
        ToolprobeError::NotFound {
            executable: "mvn".to_string(),
            search_root: PathBuf::from("/opt"),
        }
    }

    #[test]
    fn success_line_includes_home_and_version() {
        let mut ui = MockUI::new();
        show_result(&mut ui, "jdk", &Ok(report()));
        assert_eq!(ui.successes(), ["jdk: /opt/jdk (17.0.2)"]);
        assert!(ui.details().iter().any(|(k, _)| k == "executable"));
    }

    #[test]
    fn quiet_mode_hides_success_line() {
        let mut ui = MockUI::with_mode(OutputMode::Quiet);
        show_result(&mut ui, "jdk", &Ok(report()));
        assert!(ui.successes().is_empty());
    }

    #[test]
    fn failure_is_shown_as_error() {
        let mut ui = MockUI::new();
        show_result(&mut ui, "maven", &Err(not_found()));
        assert!(ui.has_error("maven: Executable 'mvn' not found"));
    }

    #[test]
    fn json_contains_success_and_failure() {
        let results = vec![
            ("jdk".to_string(), Ok(report())),
            ("maven".to_string(), Err(not_found())),
        ];
        let json: serde_json::Value = serde_json::from_str(&to_json(&results).unwrap()).unwrap();

        assert_eq!(json[0]["tool"], "jdk");
        assert_eq!(json[0]["success"], true);
        assert_eq!(json[0]["home_directory"], "/opt/jdk");
        assert_eq!(json[0]["version"]["parsed_version"], "17.0.2");
        assert!(json[0].get("error").is_none());

        assert_eq!(json[1]["tool"], "maven");
        assert_eq!(json[1]["success"], false);
        assert_eq!(json[1]["error"]["kind"], "not_found");
        assert!(json[1].get("home_directory").is_none());
    }

    #[test]
    fn json_out_of_range_carries_version_and_bounds() {
        let err = ToolprobeError::VersionOutOfRange {
            tool: "fake".to_string(),
            home: PathBuf::from("/opt/fake-3"),
            version: Some("3.2.1".to_string()),
            min: None,
            max: Some("3.1.0".to_string()),
            comparison: RangeCheck::AboveMax,
        };
        let results = vec![("fake".to_string(), Err(err))];
        let json: serde_json::Value = serde_json::from_str(&to_json(&results).unwrap()).unwrap();

        let error = &json[0]["error"];
        assert_eq!(error["kind"], "version_out_of_range");
        assert_eq!(error["version"], "3.2.1");
        assert_eq!(error["max"], "3.1.0");
        assert!(error.get("min").is_none());
    }

    #[test]
    fn json_not_found_has_no_version_fields() {
        let results = vec![("maven".to_string(), Err(not_found()))];
        let json: serde_json::Value = serde_json::from_str(&to_json(&results).unwrap()).unwrap();
        assert!(json[0]["error"].get("version").is_none());
    }
}
