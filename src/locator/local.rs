//! The machine this process runs on.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use super::machine::{
    normalize_lexically, CommandOutput, DirEntry, EntryKind, ExecutableConvention, Machine,
};

/// Local filesystem and process execution.
#[derive(Debug, Clone, Default)]
pub struct LocalMachine {
    base_dir: Option<PathBuf>,
    convention: Option<ExecutableConvention>,
}

impl LocalMachine {
    /// Create a local machine that resolves relative paths against the
    /// current working directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a local machine that resolves relative paths against `base_dir`.
    pub fn with_base_dir(base_dir: &Path) -> Self {
        Self {
            base_dir: Some(base_dir.to_path_buf()),
            convention: None,
        }
    }

    /// Override the naming convention of the host OS.
    pub fn with_convention(mut self, convention: ExecutableConvention) -> Self {
        self.convention = Some(convention);
        self
    }
}

impl Machine for LocalMachine {
    fn describe(&self) -> String {
        "local".to_string()
    }

    fn convention(&self) -> ExecutableConvention {
        self.convention.unwrap_or_else(ExecutableConvention::host)
    }

    fn absolutize(&self, path: &Path) -> io::Result<PathBuf> {
        let absolute = match &self.base_dir {
            Some(base) if path.is_relative() => std::path::absolute(base.join(path))?,
            _ => std::path::absolute(path)?,
        };
        Ok(normalize_lexically(&absolute))
    }

    fn read_dir(&self, dir: &Path) -> io::Result<Vec<DirEntry>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let file_type = entry.file_type()?;
            let kind = if file_type.is_symlink() {
                EntryKind::Symlink
            } else if file_type.is_dir() {
                EntryKind::Dir
            } else if file_type.is_file() {
                EntryKind::File
            } else {
                EntryKind::Other
            };
            entries.push(DirEntry::new(entry.file_name(), kind));
        }
        Ok(entries)
    }

    fn is_dir(&self, path: &Path) -> io::Result<bool> {
        Ok(path.is_dir())
    }

    fn is_file(&self, path: &Path) -> io::Result<bool> {
        Ok(path.is_file())
    }

    fn run(&self, cwd: &Path, argv: &[String]) -> io::Result<CommandOutput> {
        let Some((program, args)) = argv.split_first() else {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "empty command line",
            ));
        };

        let output = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()?;

        Ok(CommandOutput {
            status: output.status.code(),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}
