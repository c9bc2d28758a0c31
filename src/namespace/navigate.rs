use super::{EntryId, EntryKind, Namespace, SEPARATOR};
use crate::error::{FsError, Result};

impl Namespace {
    /// Render the path from the root down to `entry`, e.g. `Home/folder/Misc`.
    pub fn pwd(&self, entry: EntryId) -> String {
        let mut names = Vec::new();
        let mut cursor = self.get(entry);
        while let Some(current) = cursor {
            names.push(current.name());
            cursor = current.parent().and_then(|p| self.get(p));
        }
        names.reverse();
        names.join(SEPARATOR)
    }

    /// Resolve the child directory `name` of `current`.
    pub fn cd(&self, current: EntryId, name: &str) -> Result<EntryId> {
        let target = self
            .lookup(current, name)
            .ok_or_else(|| FsError::not_found(name, EntryKind::Directory))?;
        if !self[target].is_dir() {
            return Err(FsError::NotADirectory(name.to_string()));
        }
        tracing::debug!(from = %self[current].name(), to = name, "cd");
        Ok(target)
    }

    /// Resolve the parent of `current`.
    pub fn cd_back(&self, current: EntryId) -> Result<EntryId> {
        self.get(current)
            .and_then(|entry| entry.parent())
            .ok_or(FsError::AtRoot)
    }
}
