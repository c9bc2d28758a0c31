//! A virtual shell over an in-memory namespace.
//!
//! The namespace is a single tree of named files and directories held in
//! memory. Shell-style verbs (`cd`, `cd.`, `pwd`, `ls`, `mkdir`, `rm`,
//! `rmdir`, `mv`, `cp`) navigate and change it. Only `cp` touches real
//! storage: file content lives in a [`storage::ContentStore`], keyed by the
//! entry name.
//!
//! The main entry point is [`Interpreter`], which runs command lines against an
//! [`Environment`] using a set of pluggable factories. The tree itself is
//! [`Namespace`] and can be used directly without the shell layer.

mod builtin;
pub mod command;
pub mod config;
pub mod env;
pub mod error;
mod interpreter;
pub mod namespace;
pub mod session;
pub mod storage;

pub use config::Config;
pub use env::Environment;
pub use error::FsError;
/// Just a convenient re-export of the interactive command runner.
///
/// See [`Interpreter`] for the high-level API and examples.
pub use interpreter::{Interpreter, PROMPT};
pub use namespace::{Entry, EntryId, EntryKind, Namespace, OnMissingDestination};
pub use session::Session;
