//! The in-memory namespace: an owned tree of named files and directories.
//!
//! Entries live in an arena owned by [`Namespace`]. A directory owns its
//! children through an ordered list of [`EntryId`]s, and every entry keeps a
//! non-owning `parent` id pointing back up. Ids carry a generation, so an id
//! kept around after its entry was removed never aliases a newer entry that
//! reused the slot.
//!
//! Navigation lives in [`navigate`], creation/removal/relocation in [`mutate`],
//! and the start-up tree in [`seed`].

mod mutate;
mod navigate;
mod seed;

pub use mutate::OnMissingDestination;
pub use seed::SEED_ROOT;

use std::collections::HashSet;
use std::fmt;
use std::ops::Index;

/// Separator used when rendering paths.
pub const SEPARATOR: &str = "/";

/// Kind of a namespace entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    File,
    Directory,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::File => f.write_str("File"),
            EntryKind::Directory => f.write_str("Directory"),
        }
    }
}

/// Handle to an entry inside a [`Namespace`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryId {
    index: u32,
    generation: u32,
}

/// One node of the tree.
#[derive(Debug, Clone)]
pub struct Entry {
    name: String,
    kind: EntryKind,
    children: Vec<EntryId>,
    parent: Option<EntryId>,
    size: u64,
}

impl Entry {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    /// Children in insertion order. Always empty for files.
    pub fn children(&self) -> &[EntryId] {
        &self.children
    }

    /// `None` only for the root.
    pub fn parent(&self) -> Option<EntryId> {
        self.parent
    }

    /// Advisory size: child count for directories, last copied byte count for files.
    pub fn size(&self) -> u64 {
        self.size
    }
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    entry: Option<Entry>,
}

/// The whole tree, rooted at a single directory.
#[derive(Debug)]
pub struct Namespace {
    slots: Vec<Slot>,
    free: Vec<u32>,
    root: EntryId,
}

impl Namespace {
    /// Create a namespace holding only an empty root directory.
    pub fn new(root_name: impl Into<String>) -> Self {
        let mut ns = Self {
            slots: Vec::new(),
            free: Vec::new(),
            root: EntryId {
                index: 0,
                generation: 0,
            },
        };
        ns.root = ns.alloc(Entry {
            name: root_name.into(),
            kind: EntryKind::Directory,
            children: Vec::new(),
            parent: None,
            size: 0,
        });
        ns
    }

    pub fn root(&self) -> EntryId {
        self.root
    }

    /// Look an entry up by id; `None` once the entry has been removed.
    pub fn get(&self, id: EntryId) -> Option<&Entry> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.entry.as_ref())
    }

    pub fn contains(&self, id: EntryId) -> bool {
        self.get(id).is_some()
    }

    /// Number of live entries, root included.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.entry.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Find the first child of `directory` called `name`.
    ///
    /// Returns `None` for files, empty directories, and missing names.
    pub fn lookup(&self, directory: EntryId, name: &str) -> Option<EntryId> {
        self.get(directory)?
            .children
            .iter()
            .copied()
            .find(|&child| self[child].name == name)
    }

    /// Names of the immediate children of `directory`, in creation order.
    pub fn ls(&self, directory: EntryId) -> Vec<&str> {
        self.get(directory)
            .map(|dir| dir.children.iter().map(|&c| self[c].name()).collect())
            .unwrap_or_default()
    }

    /// Verify the structural invariants of the tree.
    ///
    /// Checks that the root is a parentless directory, that every child points
    /// back at its parent, that sibling names are unique, that no entry is
    /// reachable twice, and that every live entry is reachable from the root.
    pub fn check_invariants(&self) -> Result<(), String> {
        let root = self
            .get(self.root)
            .ok_or_else(|| "root entry is missing".to_string())?;
        if root.parent.is_some() || !root.is_dir() {
            return Err("root must be a directory without a parent".into());
        }

        let mut seen = HashSet::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            if !seen.insert(id) {
                return Err(format!("entry {id:?} is reachable twice"));
            }
            let entry = self
                .get(id)
                .ok_or_else(|| format!("dangling child id {id:?}"))?;
            if !entry.is_dir() && !entry.children.is_empty() {
                return Err(format!("file {} owns children", entry.name));
            }
            let mut names = HashSet::new();
            for &child in &entry.children {
                let child_entry = self
                    .get(child)
                    .ok_or_else(|| format!("{} has a dangling child", entry.name))?;
                if child_entry.parent != Some(id) {
                    return Err(format!(
                        "{} does not point back at {}",
                        child_entry.name, entry.name
                    ));
                }
                if !names.insert(child_entry.name.as_str()) {
                    return Err(format!(
                        "duplicate name {} in {}",
                        child_entry.name, entry.name
                    ));
                }
                stack.push(child);
            }
        }

        let live = self.len();
        if seen.len() != live {
            return Err(format!(
                "{} live entries but only {} reachable from the root",
                live,
                seen.len()
            ));
        }
        Ok(())
    }

    fn alloc(&mut self, entry: Entry) -> EntryId {
        match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.entry = Some(entry);
                EntryId {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot {
                    generation: 0,
                    entry: Some(entry),
                });
                EntryId {
                    index,
                    generation: 0,
                }
            }
        }
    }

    fn entry_mut(&mut self, id: EntryId) -> Option<&mut Entry> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.entry.as_mut())
    }

    /// Append a freshly allocated entry to `parent`'s children.
    fn attach_new(&mut self, parent: EntryId, name: String, kind: EntryKind) -> EntryId {
        let id = self.alloc(Entry {
            name,
            kind,
            children: Vec::new(),
            parent: Some(parent),
            size: 0,
        });
        self.link(parent, id);
        id
    }

    /// Push `child` onto `parent`'s children and point it back at `parent`.
    fn link(&mut self, parent: EntryId, child: EntryId) {
        if let Some(dir) = self.entry_mut(parent) {
            dir.children.push(child);
            dir.size = dir.children.len() as u64;
        }
        if let Some(entry) = self.entry_mut(child) {
            entry.parent = Some(parent);
        }
    }

    /// Remove `child` from `parent`'s children. The child keeps its slot.
    fn unlink(&mut self, parent: EntryId, child: EntryId) {
        if let Some(dir) = self.entry_mut(parent) {
            dir.children.retain(|&c| c != child);
            dir.size = dir.children.len() as u64;
        }
        if let Some(entry) = self.entry_mut(child) {
            entry.parent = None;
        }
    }

    /// Free `id` and every entry below it. Returns how many entries were released.
    ///
    /// The caller must already have unlinked `id` from its parent.
    fn release(&mut self, id: EntryId) -> usize {
        let mut released = 0;
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(slot) = self
                .slots
                .get_mut(current.index as usize)
                .filter(|slot| slot.generation == current.generation)
            else {
                continue;
            };
            if let Some(entry) = slot.entry.take() {
                stack.extend(entry.children);
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(current.index);
                released += 1;
            }
        }
        released
    }
}

impl Index<EntryId> for Namespace {
    type Output = Entry;

    /// # Panics
    ///
    /// Panics if the entry has been removed. Use [`Namespace::get`] for ids
    /// that may be stale.
    fn index(&self, id: EntryId) -> &Entry {
        match self.get(id) {
            Some(entry) => entry,
            None => panic!("entry {id:?} is no longer part of the namespace"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_namespace_has_only_root() {
        let ns = Namespace::new("Home");
        let root = &ns[ns.root()];

        assert_eq!(root.name(), "Home");
        assert!(root.is_dir());
        assert_eq!(root.parent(), None);
        assert_eq!(ns.len(), 1);
        assert!(ns.check_invariants().is_ok());
    }

    #[test]
    fn test_lookup_on_empty_directory_is_none() {
        let ns = Namespace::new("Home");
        assert_eq!(ns.lookup(ns.root(), "anything"), None);
    }

    #[test]
    fn test_lookup_finds_child_by_name() {
        let mut ns = Namespace::new("Home");
        let root = ns.root();
        let a = ns.mkdir(root, "a", EntryKind::Directory).unwrap();
        let b = ns.mkdir(root, "b.txt", EntryKind::File).unwrap();

        assert_eq!(ns.lookup(root, "a"), Some(a));
        assert_eq!(ns.lookup(root, "b.txt"), Some(b));
        assert_eq!(ns.lookup(root, "c"), None);
        // files have no children to search
        assert_eq!(ns.lookup(b, "a"), None);
    }

    #[test]
    fn test_ls_preserves_creation_order() {
        let mut ns = Namespace::new("Home");
        let root = ns.root();
        for name in ["zeta", "alpha", "mid"] {
            ns.mkdir(root, name, EntryKind::Directory).unwrap();
        }
        assert_eq!(ns.ls(root), vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_ls_on_fresh_directory_is_empty() {
        let mut ns = Namespace::new("Home");
        let dir = ns.mkdir(ns.root(), "empty", EntryKind::Directory).unwrap();
        assert!(ns.ls(dir).is_empty());
    }

    #[test]
    fn test_removed_id_is_stale_after_slot_reuse() {
        let mut ns = Namespace::new("Home");
        let root = ns.root();
        let old = ns.mkdir(root, "old", EntryKind::Directory).unwrap();
        ns.rmdir(root, "old").unwrap();
        let new = ns.mkdir(root, "new", EntryKind::Directory).unwrap();

        assert_eq!(old.index, new.index);
        assert!(ns.get(old).is_none());
        assert_eq!(ns[new].name(), "new");
    }

    #[test]
    fn test_directory_size_tracks_child_count() {
        let mut ns = Namespace::new("Home");
        let root = ns.root();
        ns.mkdir(root, "a", EntryKind::File).unwrap();
        ns.mkdir(root, "b", EntryKind::File).unwrap();
        assert_eq!(ns[root].size(), 2);
        ns.rm(root, "a", EntryKind::File).unwrap();
        assert_eq!(ns[root].size(), 1);
    }

    #[test]
    #[should_panic(expected = "no longer part of the namespace")]
    fn test_index_panics_on_removed_entry() {
        let mut ns = Namespace::new("Home");
        let root = ns.root();
        let gone = ns.mkdir(root, "gone", EntryKind::File).unwrap();
        ns.rm(root, "gone", EntryKind::File).unwrap();
        let _ = &ns[gone];
    }
}
