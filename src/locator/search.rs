//! Executable search and home directory resolution.
//!
//! The search is breadth-first from the root. Each directory's entries are
//! sorted by name; matching files in a directory are considered before any of
//! its subdirectories are queued. A shallower match therefore always wins
//! over a deeper one, and ties at the same depth go to the lexicographically
//! first path. Symlinked directories are not descended into.

use std::collections::VecDeque;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{Result, ToolprobeError};

use super::machine::{normalize_lexically, DirEntry, EntryKind, Machine};

/// Where a tool was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedLocation {
    /// Absolute path of the executable; a regular file.
    pub executable_path: PathBuf,

    /// The tool's home directory, derived from `executable_path`.
    pub home_directory: PathBuf,
}

/// Find `executable` under `search_root` on `machine`.
///
/// A bare name is searched for breadth-first. A name containing a path
/// separator is resolved directly against the root (an absolute path
/// replaces it) without traversal.
pub fn find_executable(
    machine: &dyn Machine,
    executable: &str,
    search_root: &Path,
) -> Result<PathBuf> {
    let not_found = |root: &Path| ToolprobeError::NotFound {
        executable: executable.to_string(),
        search_root: root.to_path_buf(),
    };

    // Only a missing root is NotFound; channel failures propagate.
    let root = match machine.absolutize(search_root) {
        Ok(root) => root,
        Err(e) if is_missing_path(&e) => {
            tracing::debug!("Search root {} not resolved: {}", search_root.display(), e);
            return Err(not_found(search_root));
        }
        Err(e) => return Err(e.into()),
    };

    if !machine.is_dir(&root)? {
        tracing::debug!("Search root {} is not a directory", root.display());
        return Err(not_found(&root));
    }

    let found = if is_path_like(executable) {
        find_at_path(machine, executable, &root)?
    } else {
        search_tree(machine, executable, &root)?
    };

    match found {
        Some(path) => {
            tracing::debug!("Found {} at {}", executable, path.display());
            Ok(path)
        }
        None => Err(not_found(&root)),
    }
}

/// Derive the home directory of a tool from its executable.
///
/// With no offset (or `.`) the home is the executable's directory; otherwise
/// the offset is joined onto that directory and folded lexically. The result
/// is not checked for existence.
pub fn resolve_home(executable_path: &Path, relative_home: Option<&Path>) -> Result<PathBuf> {
    let parent = executable_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .ok_or_else(|| ToolprobeError::StructuralError {
            path: executable_path.to_path_buf(),
            message: "executable has no parent directory".to_string(),
        })?;

    let home = match relative_home {
        Some(offset) if !is_current_dir(offset) => normalize_lexically(&parent.join(offset)),
        _ => parent.to_path_buf(),
    };
    Ok(home)
}

/// Find the executable and derive its home directory.
pub fn locate(
    machine: &dyn Machine,
    executable: &str,
    search_root: &Path,
    relative_home: Option<&Path>,
) -> Result<ResolvedLocation> {
    let executable_path = find_executable(machine, executable, search_root)?;
    let home_directory = resolve_home(&executable_path, relative_home)?;
    Ok(ResolvedLocation {
        executable_path,
        home_directory,
    })
}

fn is_path_like(executable: &str) -> bool {
    executable.contains('/') || (cfg!(windows) && executable.contains('\\'))
}

fn is_missing_path(error: &io::Error) -> bool {
    matches!(
        error.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::InvalidInput
    )
}

fn is_current_dir(offset: &Path) -> bool {
    offset.as_os_str().is_empty() || offset == Path::new(".")
}

fn find_at_path(machine: &dyn Machine, executable: &str, root: &Path) -> Result<Option<PathBuf>> {
    let target = normalize_lexically(&root.join(executable));
    let (Some(dir), Some(name)) = (target.parent(), target.file_name()) else {
        return Ok(None);
    };
    let name = name.to_string_lossy();

    for candidate in machine.convention().candidate_names(&name) {
        let path = dir.join(&candidate);
        if machine.is_file(&path)? {
            return Ok(Some(path));
        }
    }
    Ok(None)
}

fn search_tree(machine: &dyn Machine, executable: &str, root: &Path) -> Result<Option<PathBuf>> {
    let convention = machine.convention();
    let candidates = convention.candidate_names(executable);
    let mut queue = VecDeque::from([root.to_path_buf()]);

    while let Some(dir) = queue.pop_front() {
        let mut entries = match machine.read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if dir == root => return Err(e.into()),
            Err(e) => {
                tracing::debug!("Skipping {}: {}", dir.display(), e);
                continue;
            }
        };
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        for entry in &entries {
            if !matches!(entry.kind, EntryKind::File | EntryKind::Symlink) {
                continue;
            }
            let name = entry.name.to_string_lossy();
            if candidates.iter().any(|c| convention.names_match(&name, c)) {
                let path = dir.join(&entry.name);
                if machine.is_file(&path)? {
                    return Ok(Some(path));
                }
            }
        }

        queue.extend(subdirectories(&dir, &entries));
    }

    Ok(None)
}

fn subdirectories<'a>(
    dir: &'a Path,
    entries: &'a [DirEntry],
) -> impl Iterator<Item = PathBuf> + 'a {
    entries
        .iter()
        .filter(|e| e.kind == EntryKind::Dir)
        .map(move |e| dir.join(&e.name))
}
