//! Version token extraction from command output.

use regex::Regex;

/// Extract a version token from `text` using `pattern`.
///
/// Returns the first capturing group of the first match, or the whole match
/// when the pattern has no group. Returns `None` if nothing matched or the
/// token is empty; callers decide whether that is fatal.
pub fn extract_version(pattern: &Regex, text: &str) -> Option<String> {
    let captures = pattern.captures(text)?;
    let token = if pattern.captures_len() > 1 {
        captures.get(1)?
    } else {
        captures.get(0)?
    };
    let token = token.as_str();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

/// Split a newline-delimited command string into program and arguments.
///
/// Blank lines are dropped and a trailing `\r` is trimmed from each line.
pub fn split_command_lines(command: &str) -> Vec<String> {
    command
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn re(pattern: &str) -> Regex {
        Regex::new(pattern).unwrap()
    }

    #[test]
    fn extracts_first_group() {
        let pattern = re(r"v(\d+\.\d+\.\d+)");
        assert_eq!(
            extract_version(&pattern, "tool v1.4.2 build"),
            Some("1.4.2".to_string())
        );
    }

    #[test]
    fn returns_none_when_no_match() {
        let pattern = re(r"v(\d+\.\d+\.\d+)");
        assert_eq!(extract_version(&pattern, "no version here"), None);
    }

    #[test]
    fn uses_whole_match_without_group() {
        let pattern = re(r"\d+\.\d+");
        assert_eq!(
            extract_version(&pattern, "release 12.4 (lts)"),
            Some("12.4".to_string())
        );
    }

    #[test]
    fn only_first_match_counts() {
        let pattern = re(r"(\d+\.\d+)");
        assert_eq!(
            extract_version(&pattern, "3.1 then 4.2"),
            Some("3.1".to_string())
        );
    }

    #[test]
    fn searches_across_lines() {
        let pattern = re(r"version (\d+\.\d+\.\d+)");
        let output = "Copyright notice\nTool, version 3.2.1\n";
        assert_eq!(extract_version(&pattern, output), Some("3.2.1".to_string()));
    }

    #[test]
    fn non_participating_group_is_absent() {
        let pattern = re(r"tool(?: v(\d+))?");
        assert_eq!(extract_version(&pattern, "tool"), None);
    }

    #[test]
    fn empty_group_is_absent() {
        let pattern = re(r"version ([\d.]*)");
        assert_eq!(extract_version(&pattern, "version unknown"), None);
    }

    #[test]
    fn splits_command_lines() {
        assert_eq!(
            split_command_lines("java\n-version\n"),
            vec!["java".to_string(), "-version".to_string()]
        );
        assert_eq!(
            split_command_lines("mvn\r\n\r\n--version"),
            vec!["mvn".to_string(), "--version".to_string()]
        );
        assert!(split_command_lines("").is_empty());
    }
}
