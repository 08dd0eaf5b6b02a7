//! Test-version command implementation.
//!
//! The `toolprobe test-version` command runs a version pattern and range
//! against sample output so a configuration can be tried without the tool
//! being installed.

use regex::Regex;

use crate::cli::args::TestVersionArgs;
use crate::error::Result;
use crate::ui::UserInterface;
use crate::version::{check_version_in_range, extract_version, RangeCheck};

use super::dispatcher::{Command, CommandResult};

/// The test-version command implementation.
pub struct TestVersionCommand {
    args: TestVersionArgs,
}

impl TestVersionCommand {
    /// Create a new test-version command.
    pub fn new(args: TestVersionArgs) -> Self {
        Self { args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &TestVersionArgs {
        &self.args
    }

    fn bounds(&self) -> (Option<&str>, Option<&str>) {
        fn present(value: &Option<String>) -> Option<&str> {
            value.as_deref().map(str::trim).filter(|v| !v.is_empty())
        }
        (present(&self.args.min), present(&self.args.max))
    }
}

impl Command for TestVersionCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let pattern = match Regex::new(&self.args.pattern) {
            Ok(p) => p,
            Err(e) => {
                ui.error(&format!("Invalid pattern: {}", e));
                return Ok(CommandResult::failure(1));
            }
        };

        let Some(version) = extract_version(&pattern, &self.args.sample) else {
            ui.error("Pattern did not match the sample");
            return Ok(CommandResult::failure(1));
        };

        let (min, max) = self.bounds();
        if min.is_none() && max.is_none() {
            ui.warning(&format!(
                "Matched version {}; no bounds given, so there is no version validation",
                version
            ));
            return Ok(CommandResult::success());
        }

        let range = format!("[{}, {}]", min.unwrap_or("*"), max.unwrap_or("*"));
        match check_version_in_range(min, max, Some(&version)) {
            RangeCheck::BelowMin => {
                ui.error(&format!("Version {} is below {}", version, range));
                Ok(CommandResult::failure(1))
            }
            RangeCheck::AboveMax => {
                ui.error(&format!("Version {} is above {}", version, range));
                Ok(CommandResult::failure(1))
            }
            RangeCheck::InRange | RangeCheck::NotEvaluated => {
                ui.success(&format!("Version {} is within {}", version, range));
                Ok(CommandResult::success())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;

    fn run(pattern: &str, min: Option<&str>, max: Option<&str>, sample: &str) -> (i32, MockUI) {
        let cmd = TestVersionCommand::new(TestVersionArgs {
            pattern: pattern.to_string(),
            min: min.map(String::from),
            max: max.map(String::from),
            sample: sample.to_string(),
        });
        let mut ui = MockUI::new();
        let result = cmd.execute(&mut ui).unwrap();
        (result.exit_code, ui)
    }

    #[test]
    fn in_range() {
        let (code, ui) = run(r"version (\S+)", Some("3.0"), Some("3.5"), "Tool, version 3.2.1");
        assert_eq!(code, 0);
        assert!(ui.has_success("Version 3.2.1 is within [3.0, 3.5]"));
    }

    #[test]
    fn above_max() {
        let (code, ui) = run(r"v(\S+)", None, Some("20"), "v22.1.0");
        assert_eq!(code, 1);
        assert!(ui.has_error("above [*, 20]"));
    }

    #[test]
    fn below_min() {
        let (code, ui) = run(r#""([^"]+)""#, Some("11"), None, "openjdk version \"1.8.0_292\"");
        assert_eq!(code, 1);
        assert!(ui.has_error("Version 1.8.0_292 is below"));
    }

    #[test]
    fn no_bounds_warns_that_nothing_is_validated() {
        let (code, ui) = run(r"(\d+\.\d+)", None, None, "gradle 8.4");
        assert_eq!(code, 0);
        assert!(ui.has_warning("Matched version 8.4"));
        assert!(ui.has_warning("no version validation"));
        assert!(ui.successes().is_empty());
    }

    #[test]
    fn blank_bounds_count_as_absent() {
        let (code, ui) = run(r"(\d+)", Some("  "), Some(""), "tool 7");
        assert_eq!(code, 0);
        assert!(ui.has_warning("no version validation"));
    }

    #[test]
    fn no_match_fails() {
        let (code, ui) = run(r"version (\d+)", Some("1"), None, "nothing here");
        assert_eq!(code, 1);
        assert!(ui.has_error("did not match"));
    }

    #[test]
    fn invalid_pattern_fails() {
        let (code, ui) = run(r"(unclosed", None, None, "x");
        assert_eq!(code, 1);
        assert!(ui.has_error("Invalid pattern"));
    }
}
