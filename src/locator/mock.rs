//! In-memory machine for tests.
//!
//! `MockMachine` implements [`Machine`] over a fake directory tree and a
//! table of scripted command outputs, and records every command it runs.
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//! use toolprobe::locator::{find_executable, MockMachine};
//!
//! let mut machine = MockMachine::new();
//! machine.add_file("/opt/x/bin/tool");
//! machine.set_output(&["tool", "--version"], "tool 1.0\n");
//!
//! let exe = find_executable(&machine, "tool", Path::new("/opt")).unwrap();
//! assert_eq!(exe, Path::new("/opt/x/bin/tool"));
//! ```

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::machine::{
    normalize_lexically, CommandOutput, DirEntry, EntryKind, ExecutableConvention, Machine,
};

/// Scripted response for a command line.
#[derive(Debug, Clone)]
enum Scripted {
    Output(CommandOutput),
    LaunchFailure(String),
}

/// Fake machine backed by in-memory state.
#[derive(Debug)]
pub struct MockMachine {
    convention: ExecutableConvention,
    cwd: PathBuf,
    files: BTreeSet<PathBuf>,
    dirs: BTreeSet<PathBuf>,
    symlinks: BTreeMap<PathBuf, PathBuf>,
    unreadable: BTreeSet<PathBuf>,
    scripts: HashMap<Vec<String>, Scripted>,
    runs: Mutex<Vec<(PathBuf, Vec<String>)>>,
    disconnected: Option<String>,
}

impl Default for MockMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl MockMachine {
    /// Create an empty POSIX machine whose working directory is `/`.
    pub fn new() -> Self {
        let mut dirs = BTreeSet::new();
        dirs.insert(PathBuf::from("/"));
        Self {
            convention: ExecutableConvention::Posix,
            cwd: PathBuf::from("/"),
            files: BTreeSet::new(),
            dirs,
            symlinks: BTreeMap::new(),
            unreadable: BTreeSet::new(),
            scripts: HashMap::new(),
            runs: Mutex::new(Vec::new()),
            disconnected: None,
        }
    }

    /// Set the executable naming convention.
    pub fn with_convention(mut self, convention: ExecutableConvention) -> Self {
        self.convention = convention;
        self
    }

    /// Set the directory relative paths resolve against.
    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = cwd.into();
        self
    }

    /// Add a regular file, creating its parent directories.
    pub fn add_file(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        self.add_parents(&path);
        self.files.insert(path);
    }

    /// Add a directory and its parents.
    pub fn add_dir(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        self.add_parents(&path);
        self.dirs.insert(path);
    }

    /// Add a symlink at `path` pointing to `target`.
    pub fn add_symlink(&mut self, path: impl Into<PathBuf>, target: impl Into<PathBuf>) {
        let path = path.into();
        self.add_parents(&path);
        self.symlinks.insert(path, target.into());
    }

    /// Make listing `path` fail with a permission error.
    pub fn deny_listing(&mut self, path: impl Into<PathBuf>) {
        self.unreadable.insert(path.into());
    }

    /// Script the stdout of a command line (exit status 0).
    pub fn set_output(&mut self, argv: &[&str], stdout: &str) {
        self.set_output_with_status(argv, stdout, Some(0));
    }

    /// Script the stdout and exit status of a command line.
    pub fn set_output_with_status(&mut self, argv: &[&str], stdout: &str, status: Option<i32>) {
        let output = CommandOutput {
            status,
            stdout: stdout.as_bytes().to_vec(),
            stderr: Vec::new(),
        };
        self.scripts.insert(owned(argv), Scripted::Output(output));
    }

    /// Make a command line fail to launch.
    pub fn fail_launch(&mut self, argv: &[&str], message: &str) {
        self.scripts
            .insert(owned(argv), Scripted::LaunchFailure(message.to_string()));
    }

    /// Make every later operation fail as a broken channel would.
    pub fn disconnect(&mut self, message: &str) {
        self.disconnected = Some(message.to_string());
    }

    /// Commands run so far, with their working directories.
    pub fn runs(&self) -> Vec<(PathBuf, Vec<String>)> {
        self.runs
            .lock()
            .map(|runs| runs.clone())
            .unwrap_or_default()
    }

    fn add_parents(&mut self, path: &Path) {
        let mut parent = path.parent();
        while let Some(dir) = parent {
            if dir.as_os_str().is_empty() {
                break;
            }
            self.dirs.insert(dir.to_path_buf());
            parent = dir.parent();
        }
    }

    fn channel(&self) -> io::Result<()> {
        match &self.disconnected {
            Some(message) => Err(io::Error::other(message.clone())),
            None => Ok(()),
        }
    }

    fn resolve_link<'a>(&'a self, path: &'a Path) -> &'a Path {
        self.symlinks.get(path).map(PathBuf::as_path).unwrap_or(path)
    }
}

impl Machine for MockMachine {
    fn describe(&self) -> String {
        "mock".to_string()
    }

    fn convention(&self) -> ExecutableConvention {
        self.convention
    }

    fn absolutize(&self, path: &Path) -> io::Result<PathBuf> {
        self.channel()?;
        Ok(normalize_lexically(&self.cwd.join(path)))
    }

    fn read_dir(&self, dir: &Path) -> io::Result<Vec<DirEntry>> {
        self.channel()?;
        if self.unreadable.contains(dir) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("permission denied: {}", dir.display()),
            ));
        }
        if !self.dirs.contains(dir) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such directory: {}", dir.display()),
            ));
        }

        let children = |set: &BTreeSet<PathBuf>, kind: EntryKind| -> Vec<DirEntry> {
            set.iter()
                .filter(|p| p.parent() == Some(dir))
                .filter_map(|p| p.file_name().map(|n| DirEntry::new(n, kind)))
                .collect()
        };

        let mut entries = children(&self.files, EntryKind::File);
        entries.extend(children(&self.dirs, EntryKind::Dir));
        entries.extend(
            self.symlinks
                .keys()
                .filter(|p| p.parent() == Some(dir))
                .filter_map(|p| p.file_name().map(|n| DirEntry::new(n, EntryKind::Symlink))),
        );
        // Reverse order; callers sort.
        entries.reverse();
        Ok(entries)
    }

    fn is_dir(&self, path: &Path) -> io::Result<bool> {
        self.channel()?;
        Ok(self.dirs.contains(self.resolve_link(path)))
    }

    fn is_file(&self, path: &Path) -> io::Result<bool> {
        self.channel()?;
        Ok(self.files.contains(self.resolve_link(path)))
    }

    fn run(&self, cwd: &Path, argv: &[String]) -> io::Result<CommandOutput> {
        self.channel()?;
        if let Ok(mut runs) = self.runs.lock() {
            runs.push((cwd.to_path_buf(), argv.to_vec()));
        }

        match self.scripts.get(argv) {
            Some(Scripted::Output(output)) => Ok(output.clone()),
            Some(Scripted::LaunchFailure(message)) => Err(io::Error::other(message.clone())),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such command: {}", argv.join(" ")),
            )),
        }
    }
}

fn owned(argv: &[&str]) -> Vec<String> {
    argv.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_file_creates_parents() {
        let mut machine = MockMachine::new();
        machine.add_file("/opt/x/bin/tool");

        assert!(machine.is_dir(Path::new("/opt")).unwrap());
        assert!(machine.is_dir(Path::new("/opt/x/bin")).unwrap());
        assert!(machine.is_file(Path::new("/opt/x/bin/tool")).unwrap());
        assert!(!machine.is_file(Path::new("/opt/x/bin")).unwrap());
    }

    #[test]
    fn read_dir_lists_direct_children_only() {
        let mut machine = MockMachine::new();
        machine.add_file("/opt/a");
        machine.add_file("/opt/sub/b");
        machine.add_symlink("/opt/link", "/opt/a");

        let mut names: Vec<_> = machine
            .read_dir(Path::new("/opt"))
            .unwrap()
            .into_iter()
            .map(|e| (e.name.to_string_lossy().into_owned(), e.kind))
            .collect();
        names.sort();

        assert_eq!(
            names,
            vec![
                ("a".to_string(), EntryKind::File),
                ("link".to_string(), EntryKind::Symlink),
                ("sub".to_string(), EntryKind::Dir),
            ]
        );
    }

    #[test]
    fn symlinks_follow_their_target() {
        let mut machine = MockMachine::new();
        machine.add_file("/opt/real");
        machine.add_symlink("/opt/link", "/opt/real");
        assert!(machine.is_file(Path::new("/opt/link")).unwrap());
    }

    #[test]
    fn read_dir_errors() {
        let mut machine = MockMachine::new();
        machine.add_dir("/secret");
        machine.deny_listing("/secret");

        let denied = machine.read_dir(Path::new("/secret")).unwrap_err();
        assert_eq!(denied.kind(), io::ErrorKind::PermissionDenied);
        let missing = machine.read_dir(Path::new("/nope")).unwrap_err();
        assert_eq!(missing.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn run_returns_scripted_output_and_records() {
        let mut machine = MockMachine::new();
        machine.set_output(&["tool", "-v"], "1.0\n");

        let argv = owned(&["tool", "-v"]);
        let output = machine.run(Path::new("/opt"), &argv).unwrap();

        assert_eq!(output.stdout_text(), "1.0\n");
        assert_eq!(machine.runs(), vec![(PathBuf::from("/opt"), argv)]);
    }

    #[test]
    fn run_fails_for_unscripted_or_failing_commands() {
        let mut machine = MockMachine::new();
        machine.fail_launch(&["broken"], "channel closed");

        let err = machine.run(Path::new("/"), &owned(&["broken"])).unwrap_err();
        assert!(err.to_string().contains("channel closed"));
        assert!(machine.run(Path::new("/"), &owned(&["unknown"])).is_err());
    }

    #[test]
    fn absolutize_uses_cwd() {
        let machine = MockMachine::new().with_cwd("/home/ci");
        assert_eq!(
            machine.absolutize(Path::new("tools/..")).unwrap(),
            PathBuf::from("/home/ci")
        );
        assert_eq!(
            machine.absolutize(Path::new("/opt")).unwrap(),
            PathBuf::from("/opt")
        );
    }
}
