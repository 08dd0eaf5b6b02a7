//! A machine reached through the system `ssh` client.
//!
//! Every operation is a single remote shell command of the form
//! `cd <cwd> && <argv...>`, so the remote side only needs a POSIX shell
//! with `ls`, `test` and `pwd`.

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use super::machine::{
    normalize_lexically, CommandOutput, DirEntry, EntryKind, ExecutableConvention, Machine,
};

/// Default ssh client program.
pub const DEFAULT_SSH_PROGRAM: &str = "ssh";

/// Remote host accessed over ssh.
#[derive(Debug, Clone)]
pub struct SshMachine {
    host: String,
    program: String,
    options: Vec<String>,
    convention: ExecutableConvention,
}

impl SshMachine {
    /// Create a machine for `host` (anything `ssh` accepts, e.g. `user@host`).
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            program: DEFAULT_SSH_PROGRAM.to_string(),
            options: Vec::new(),
            convention: ExecutableConvention::Posix,
        }
    }

    /// Use a different ssh client binary.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Extra arguments placed before the host (e.g. `-o BatchMode=yes`).
    pub fn with_options(mut self, options: Vec<String>) -> Self {
        self.options = options;
        self
    }

    /// Executable naming convention of the remote host.
    pub fn with_convention(mut self, convention: ExecutableConvention) -> Self {
        self.convention = convention;
        self
    }

    /// Remote host name.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Full local argv used to run `argv` in `cwd` on the remote host.
    pub fn ssh_argv(&self, cwd: &Path, argv: &[String]) -> Vec<String> {
        let mut full = Vec::with_capacity(self.options.len() + 4);
        full.push(self.program.clone());
        full.extend(self.options.iter().cloned());
        full.push(self.host.clone());
        full.push("--".to_string());
        full.push(remote_command_line(cwd, argv));
        full
    }

    fn exec(&self, cwd: &Path, argv: &[String]) -> io::Result<CommandOutput> {
        let full = self.ssh_argv(cwd, argv);
        tracing::debug!("ssh {}: {}", self.host, full[full.len() - 1]);

        let output = Command::new(&full[0])
            .args(&full[1..])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()?;

        // ssh reserves exit status 255 for its own failures
        if output.status.code() == Some(255) {
            return Err(io::Error::other(format!(
                "ssh to {} failed: {}",
                self.host,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(CommandOutput {
            status: output.status.code(),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }

    fn test_path(&self, flag: &str, path: &Path) -> io::Result<bool> {
        let argv = vec![
            "test".to_string(),
            flag.to_string(),
            path.to_string_lossy().into_owned(),
        ];
        Ok(self.exec(Path::new("/"), &argv)?.success())
    }
}

impl Machine for SshMachine {
    fn describe(&self) -> String {
        format!("ssh://{}", self.host)
    }

    fn convention(&self) -> ExecutableConvention {
        self.convention
    }

    fn absolutize(&self, path: &Path) -> io::Result<PathBuf> {
        if path.has_root() {
            return Ok(normalize_lexically(path));
        }
        // Relative paths resolve against the remote login directory.
        let output = self.exec(path, &["pwd".to_string()])?;
        if !output.success() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} does not exist on {}", path.display(), self.host),
            ));
        }
        Ok(PathBuf::from(output.stdout_text().trim_end()))
    }

    fn read_dir(&self, dir: &Path) -> io::Result<Vec<DirEntry>> {
        let argv = vec!["ls".to_string(), "-1Ap".to_string()];
        let output = self.exec(dir, &argv)?;
        if !output.success() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!(
                    "cannot list {} on {}: {}",
                    dir.display(),
                    self.host,
                    output.stderr_text().trim()
                ),
            ));
        }
        Ok(parse_ls_listing(&output.stdout_text()))
    }

    fn is_dir(&self, path: &Path) -> io::Result<bool> {
        self.test_path("-d", path)
    }

    fn is_file(&self, path: &Path) -> io::Result<bool> {
        self.test_path("-f", path)
    }

    fn run(&self, cwd: &Path, argv: &[String]) -> io::Result<CommandOutput> {
        if argv.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "empty command line",
            ));
        }
        self.exec(cwd, argv)
    }
}

/// Parse `ls -1Ap` output: one name per line, directories end in `/`.
///
/// Symlinks carry no marker and come back as files; the locator confirms
/// every candidate with `test -f` before accepting it.
pub fn parse_ls_listing(listing: &str) -> Vec<DirEntry> {
    listing
        .lines()
        .filter(|line| !line.is_empty())
        .map(|line| match line.strip_suffix('/') {
            Some(dir) => DirEntry::new(dir, EntryKind::Dir),
            None => DirEntry::new(line, EntryKind::File),
        })
        .collect()
}

/// Build the remote shell command line `cd <cwd> && <argv...>`.
pub fn remote_command_line(cwd: &Path, argv: &[String]) -> String {
    let mut line = format!("cd {} &&", shell_quote(&cwd.to_string_lossy()));
    for arg in argv {
        line.push(' ');
        line.push_str(&shell_quote(arg));
    }
    line
}

/// Quote a word for a POSIX shell.
pub fn shell_quote(word: &str) -> String {
    let safe = !word.is_empty()
        && word
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b"-_./=:,+@%".contains(&b));
    if safe {
        word.to_string()
    } else {
        format!("'{}'", word.replace('\'', r"'\''"))
    }
}
