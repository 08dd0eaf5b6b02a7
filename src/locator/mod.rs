//! Executable location on a target machine.
//!
//! A [`Machine`] is the place a tool is expected to be installed. The
//! [`search`] module walks a machine's directory tree to find an executable
//! and derives the tool's home directory from where it was found.

pub mod local;
pub mod machine;
pub mod mock;
pub mod remote;
pub mod search;

pub use local::LocalMachine;
pub use machine::{
    display_command, normalize_lexically, CommandOutput, DirEntry, EntryKind,
    ExecutableConvention, Machine,
};
pub use mock::MockMachine;
pub use remote::SshMachine;
pub use search::{find_executable, locate, resolve_home, ResolvedLocation};
