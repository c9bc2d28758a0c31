use std::env as stdenv;
use std::path::PathBuf;

/// User name used when neither `--user` nor `$USER` is set.
pub const DEFAULT_USER: &str = "guest";

/// Settings the shell is started with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Name reported by `whoami`.
    pub user: String,
    /// Host directory holding the bytes behind file entries.
    pub storage_dir: PathBuf,
    /// Text file streamed by `help`.
    pub help_file: PathBuf,
    /// Start from the seeded tree instead of an empty root.
    pub seed: bool,
    /// Where the REPL loads and saves its line history.
    pub history: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user: stdenv::var("USER").unwrap_or_else(|_| DEFAULT_USER.to_string()),
            storage_dir: PathBuf::from("."),
            help_file: PathBuf::from("help.txt"),
            seed: true,
            history: None,
        }
    }
}
