use super::{EntryKind, Namespace};
use crate::error::Result;

/// Name of the root directory of a seeded namespace.
pub const SEED_ROOT: &str = "Home";

impl Namespace {
    /// Build the start-up tree:
    ///
    /// ```text
    /// Home
    /// ├── dummy_data_1.txt
    /// ├── dummy_data_2.txt
    /// ├── dummy_data_3.txt
    /// ├── Random.java
    /// └── folder
    ///     └── Misc
    /// ```
    pub fn seeded() -> Result<Self> {
        let mut ns = Namespace::new(SEED_ROOT);
        let home = ns.root();
        for file in [
            "dummy_data_1.txt",
            "dummy_data_2.txt",
            "dummy_data_3.txt",
            "Random.java",
        ] {
            ns.mkdir(home, file, EntryKind::File)?;
        }
        let folder = ns.mkdir(home, "folder", EntryKind::Directory)?;
        ns.mkdir(folder, "Misc", EntryKind::Directory)?;
        Ok(ns)
    }
}
