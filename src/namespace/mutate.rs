use super::{EntryId, EntryKind, Namespace, SEPARATOR};
use crate::error::{FsError, Result};
use crate::storage::ContentStore;

/// What `mv` does when the destination directory does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OnMissingDestination {
    #[default]
    Fail,
    /// Create the destination directory next to the source, then move.
    CreateDirectory,
}

fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() || name == "." || name == ".." || name.contains(SEPARATOR) {
        return Err(FsError::InvalidName(name.to_string()));
    }
    Ok(())
}

impl Namespace {
    /// Create a new, empty entry called `name` at the end of `current`'s children.
    pub fn mkdir(&mut self, current: EntryId, name: &str, kind: EntryKind) -> Result<EntryId> {
        let Some(dir) = self.get(current) else {
            return Err(FsError::not_found(format!("{current:?}"), EntryKind::Directory));
        };
        if !dir.is_dir() {
            return Err(FsError::NotADirectory(dir.name().to_string()));
        }
        validate_name(name)?;
        if self.lookup(current, name).is_some() {
            return Err(FsError::DuplicateName(name.to_string()));
        }

        let id = self.attach_new(current, name.to_string(), kind);
        tracing::debug!(name, %kind, parent = %self[current].name(), "created entry");
        Ok(id)
    }

    /// Remove the child `name` of the given kind, together with everything below it.
    pub fn rm(&mut self, current: EntryId, name: &str, kind: EntryKind) -> Result<()> {
        let target = self
            .get(current)
            .and_then(|dir| {
                dir.children()
                    .iter()
                    .copied()
                    .find(|&c| self[c].name() == name && self[c].kind() == kind)
            })
            .ok_or_else(|| FsError::not_found(name, kind))?;

        self.unlink(current, target);
        let released = self.release(target);
        tracing::debug!(name, %kind, released, "removed entry");
        Ok(())
    }

    /// [`Namespace::rm`] for directories.
    pub fn rmdir(&mut self, current: EntryId, name: &str) -> Result<()> {
        self.rm(current, name, EntryKind::Directory)
    }

    /// Move the child `source` of `current` into its sibling directory `destination`.
    ///
    /// The entry is re-parented, never copied. Nothing changes unless every
    /// check passes.
    pub fn mv(
        &mut self,
        current: EntryId,
        source: &str,
        destination: &str,
        on_missing: OnMissingDestination,
    ) -> Result<()> {
        let src = self
            .lookup(current, source)
            .ok_or_else(|| FsError::SourceNotFound(source.to_string()))?;

        let dst = match self.lookup(current, destination) {
            Some(id) if self[id].is_dir() => Some(id),
            None if on_missing == OnMissingDestination::CreateDirectory => {
                validate_name(destination)?;
                None
            }
            _ => return Err(FsError::DestinationNotFound(destination.to_string())),
        };
        if dst == Some(src) {
            return Err(FsError::SameEntry(source.to_string()));
        }
        if dst.is_some_and(|d| self.lookup(d, source).is_some()) {
            return Err(FsError::DuplicateName(source.to_string()));
        }

        let dst = match dst {
            Some(id) => id,
            None => self.attach_new(current, destination.to_string(), EntryKind::Directory),
        };
        self.unlink(current, src);
        self.link(dst, src);
        tracing::debug!(source, destination, "moved entry");
        Ok(())
    }

    /// Copy the file `source` into the file `destination`, creating it if needed.
    ///
    /// Bytes are copied by `store`. If the copy fails, a destination entry
    /// created by this call is removed again before the error is returned.
    pub fn cp(
        &mut self,
        current: EntryId,
        source: &str,
        destination: &str,
        store: &mut dyn ContentStore,
    ) -> Result<EntryId> {
        let src = self
            .lookup(current, source)
            .filter(|&id| !self[id].is_dir())
            .ok_or_else(|| FsError::SourceNotFound(source.to_string()))?;

        let existing = self.lookup(current, destination);
        if existing == Some(src) {
            return Err(FsError::SameEntry(source.to_string()));
        }
        if let Some(id) = existing {
            if self[id].is_dir() {
                return Err(FsError::WrongKind {
                    name: destination.to_string(),
                    expected: EntryKind::File,
                    found: EntryKind::Directory,
                });
            }
        }

        let (dst, created) = match existing {
            Some(id) => (id, false),
            None => (self.mkdir(current, destination, EntryKind::File)?, true),
        };

        match store.copy(source, destination) {
            Ok(bytes) => {
                if let Some(entry) = self.entry_mut(dst) {
                    entry.size = bytes;
                }
                tracing::debug!(source, destination, bytes, "copied file");
                Ok(dst)
            }
            Err(error) => {
                if created {
                    self.unlink(current, dst);
                    self.release(dst);
                }
                Err(FsError::IoFailure {
                    source_name: source.to_string(),
                    destination: destination.to_string(),
                    error,
                })
            }
        }
    }
}
