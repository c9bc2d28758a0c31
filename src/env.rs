use crate::config::Config;
use crate::namespace::{Namespace, SEED_ROOT};
use crate::session::Session;
use crate::storage::{ContentStore, HostStore};
use std::path::PathBuf;

/// Everything a command may read or change.
///
/// - `namespace`: the tree of entries.
/// - `session`: the user and their current directory.
/// - `store`: the bytes behind file entries, used by `cp`.
/// - `should_exit`: set by `exit`; the REPL checks it after every line.
///
/// Fields are public so commands can borrow them independently.
pub struct Environment {
    pub namespace: Namespace,
    pub session: Session,
    pub store: Box<dyn ContentStore>,
    pub help_file: PathBuf,
    pub should_exit: bool,
}

impl Environment {
    /// Build the environment described by `config`, backed by host files.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let namespace = if config.seed {
            Namespace::seeded()?
        } else {
            Namespace::new(SEED_ROOT)
        };
        let mut env = Self::with_store(
            namespace,
            config.user.clone(),
            Box::new(HostStore::new(&config.storage_dir)),
        );
        env.help_file = config.help_file.clone();
        Ok(env)
    }

    /// Environment over an existing namespace, positioned at its root.
    pub fn with_store(
        namespace: Namespace,
        user: impl Into<String>,
        store: Box<dyn ContentStore>,
    ) -> Self {
        let session = Session::new(user, namespace.root());
        Self {
            namespace,
            session,
            store,
            help_file: PathBuf::from("help.txt"),
            should_exit: false,
        }
    }
}
