//! Error types for namespace operations.
//!
//! Every variant is recoverable: the shell reports it and reads the next line.
//! Operations validate before they mutate, so an `Err` always means the tree
//! is exactly as it was before the call.

use crate::namespace::EntryKind;
use thiserror::Error;

/// Result type alias using the namespace [`FsError`].
pub type Result<T> = std::result::Result<T, FsError>;

#[derive(Error, Debug)]
pub enum FsError {
    /// No child with this name (or with this name and the requested kind).
    #[error("{kind} does not exist: {name}")]
    NotFound { name: String, kind: EntryKind },

    /// A child with this name already exists.
    #[error("name already exists: {0}")]
    DuplicateName(String),

    /// The entry exists but is a file where a directory was required.
    #[error("not a directory: {0}")]
    NotADirectory(String),

    /// The entry exists but has the wrong kind for this operation.
    #[error("{name} is a {found}, expected a {expected}")]
    WrongKind {
        name: String,
        expected: EntryKind,
        found: EntryKind,
    },

    /// Tried to ascend from the root.
    #[error("already at the root directory")]
    AtRoot,

    /// `mv`/`cp` source is missing.
    #[error("source does not exist: {0}")]
    SourceNotFound(String),

    /// `mv` destination is missing or is not a directory.
    #[error("destination does not exist: {0}")]
    DestinationNotFound(String),

    /// `mv`/`cp` given the same entry as source and destination.
    #[error("{0}: source and destination are the same entry")]
    SameEntry(String),

    /// Names are single non-empty path components.
    #[error("invalid name: {0:?}")]
    InvalidName(String),

    /// Host storage failed while copying content.
    #[error("cannot copy {source_name} to {destination}: {error}")]
    IoFailure {
        source_name: String,
        destination: String,
        #[source]
        error: std::io::Error,
    },
}

impl FsError {
    pub(crate) fn not_found(name: impl Into<String>, kind: EntryKind) -> Self {
        Self::NotFound {
            name: name.into(),
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_entry() {
        let err = FsError::not_found("notes", EntryKind::Directory);
        assert_eq!(err.to_string(), "Directory does not exist: notes");

        let err = FsError::WrongKind {
            name: "folder".into(),
            expected: EntryKind::File,
            found: EntryKind::Directory,
        };
        assert_eq!(err.to_string(), "folder is a Directory, expected a File");
    }

    #[test]
    fn test_io_failure_keeps_source_error() {
        use std::error::Error as _;
        let err = FsError::IoFailure {
            source_name: "a.txt".into(),
            destination: "b.txt".into(),
            error: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("cannot copy a.txt to b.txt"));
    }
}
