//! Target machine abstraction.
//!
//! The locator and prober never touch `std::fs` or `std::process` directly.
//! They go through [`Machine`], which may be the local host, a remote host
//! reached over ssh, or an in-memory fake in tests.

use std::ffi::OsString;
use std::io;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Executable naming convention of a target machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutableConvention {
    /// Exact, case-sensitive file names.
    #[default]
    Posix,
    /// Names may carry an executable suffix and compare case-insensitively.
    Windows,
}

/// Suffixes tried when a bare name is looked up on a Windows target.
pub const WINDOWS_EXECUTABLE_SUFFIXES: &[&str] = &[".exe", ".cmd", ".bat", ".com"];

impl ExecutableConvention {
    /// Convention of the machine this process runs on.
    pub fn host() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else {
            Self::Posix
        }
    }

    /// All file names that count as `name` under this convention.
    pub fn candidate_names(&self, name: &str) -> Vec<String> {
        let mut names = vec![name.to_string()];
        if *self == Self::Windows && Path::new(name).extension().is_none() {
            names.extend(
                WINDOWS_EXECUTABLE_SUFFIXES
                    .iter()
                    .map(|suffix| format!("{}{}", name, suffix)),
            );
        }
        names
    }

    /// Whether a directory entry name equals a candidate name.
    pub fn names_match(&self, entry: &str, candidate: &str) -> bool {
        match self {
            Self::Posix => entry == candidate,
            Self::Windows => entry.eq_ignore_ascii_case(candidate),
        }
    }
}

/// Kind of a directory entry, without following symlinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EntryKind {
    File,
    Dir,
    Symlink,
    Other,
}

/// One entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// File name, without the directory.
    pub name: OsString,
    pub kind: EntryKind,
}

impl DirEntry {
    pub fn new(name: impl Into<OsString>, kind: EntryKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Captured result of running a command on a machine.
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    /// Exit code (None if killed by signal or unknown).
    pub status: Option<i32>,

    /// Standard output bytes, fully drained.
    pub stdout: Vec<u8>,

    /// Standard error bytes.
    pub stderr: Vec<u8>,
}

impl CommandOutput {
    /// Whether the command exited with status 0.
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }

    /// Standard output decoded as text.
    pub fn stdout_text(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    /// Standard error decoded as text.
    pub fn stderr_text(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }
}

/// Filesystem and process operations on a target machine.
///
/// All calls block until the machine answers. Implementations impose no
/// timeout of their own unless their transport does.
pub trait Machine: Send + Sync {
    /// Human-readable name of the machine for logs and diagnostics.
    fn describe(&self) -> String;

    /// Executable naming convention on this machine.
    fn convention(&self) -> ExecutableConvention;

    /// Turn `path` into an absolute path on this machine.
    fn absolutize(&self, path: &Path) -> io::Result<PathBuf>;

    /// List the entries of `dir` in no particular order.
    fn read_dir(&self, dir: &Path) -> io::Result<Vec<DirEntry>>;

    /// Whether `path` is a directory (following symlinks).
    fn is_dir(&self, path: &Path) -> io::Result<bool>;

    /// Whether `path` is a regular file (following symlinks).
    fn is_file(&self, path: &Path) -> io::Result<bool>;

    /// Run `argv[0]` with the remaining arguments in `cwd`.
    ///
    /// A non-zero exit is not an error; only failing to launch the program
    /// or losing the channel is.
    fn run(&self, cwd: &Path, argv: &[String]) -> io::Result<CommandOutput>;
}

/// Lexically normalise a path: drop `.` and fold `..` into its parent.
///
/// No filesystem access happens, so `..` after a symlink folds lexically.
/// Leading `..` components of a relative path are kept.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let can_pop = matches!(
                    out.components().next_back(),
                    Some(Component::Normal(_))
                );
                if can_pop {
                    out.pop();
                } else if !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Render an argv for logs and error messages.
pub fn display_command(argv: &[String]) -> String {
    argv.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn posix_candidates_are_exact() {
        let names = ExecutableConvention::Posix.candidate_names("gradle");
        assert_eq!(names, vec!["gradle".to_string()]);
    }

    #[test]
    fn windows_candidates_add_suffixes() {
        let names = ExecutableConvention::Windows.candidate_names("gradle");
        assert_eq!(
            names,
            vec!["gradle", "gradle.exe", "gradle.cmd", "gradle.bat", "gradle.com"]
        );
    }

    #[test]
    fn windows_candidates_keep_explicit_extension() {
        let names = ExecutableConvention::Windows.candidate_names("gradle.bat");
        assert_eq!(names, vec!["gradle.bat".to_string()]);
    }

    #[test]
    fn posix_names_are_case_sensitive() {
        assert!(ExecutableConvention::Posix.names_match("java", "java"));
        assert!(!ExecutableConvention::Posix.names_match("Java", "java"));
    }

    #[test]
    fn windows_names_ignore_ascii_case() {
        assert!(ExecutableConvention::Windows.names_match("JAVA.EXE", "java.exe"));
    }

    #[test]
    fn normalize_folds_parent_dirs() {
        assert_eq!(
            normalize_lexically(Path::new("/opt/x/bin/..")),
            PathBuf::from("/opt/x")
        );
        assert_eq!(
            normalize_lexically(Path::new("/opt/./x/bin/../lib")),
            PathBuf::from("/opt/x/lib")
        );
    }

    #[test]
    fn normalize_stops_at_root() {
        assert_eq!(normalize_lexically(Path::new("/..")), PathBuf::from("/"));
    }

    #[test]
    fn normalize_keeps_leading_parent_of_relative_path() {
        assert_eq!(
            normalize_lexically(Path::new("../a/./b/..")),
            PathBuf::from("../a")
        );
    }

    #[test]
    fn command_output_helpers() {
        let output = CommandOutput {
            status: Some(0),
            stdout: b"v1.0\n".to_vec(),
            stderr: Vec::new(),
        };
        assert!(output.success());
        assert_eq!(output.stdout_text(), "v1.0\n");
        assert!(!CommandOutput::default().success());
    }

    #[test]
    fn display_command_joins_arguments() {
        let argv = vec!["java".to_string(), "-version".to_string()];
        assert_eq!(display_command(&argv), "java -version");
    }
}
