//! Staged files and the per-region file list store.
//!
//! A "staged" file has been selected or dropped by the user but not
//! yet uploaded. Each upload region owns exactly one [`FileListStore`];
//! the store holds metadata only -- the actual browser file handles
//! stay in `trailblazer-io`, keyed by filename.

/// Metadata for one staged file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    /// Filename as reported by the browser. Unique key within a store.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// Declared MIME type; empty when the browser could not infer one
    /// (common for FITS files).
    pub mime: String,
}

impl StagedFile {
    /// Create a staged file record.
    #[must_use]
    pub const fn new(name: String, size: u64, mime: String) -> Self {
        Self { name, size, mime }
    }
}

/// Ordered collection of staged files, unique by filename.
///
/// Insertion order is preserved for display; re-adding a name replaces
/// the previous entry (last write wins). One store is owned by one
/// upload region -- there is no process-wide shared list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileListStore {
    entries: Vec<StagedFile>,
}

impl FileListStore {
    /// Create an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Stage a file, replacing any existing entry with the same name.
    ///
    /// The replaced entry is removed before the new one is appended, so
    /// a name appears at most once and the newest version of a
    /// re-added file sorts last.
    pub fn add(&mut self, file: StagedFile) {
        self.entries.retain(|f| f.name != file.name);
        self.entries.push(file);
    }

    /// Remove the entry with the given name.
    ///
    /// Returns `true` when an entry was removed, `false` when no entry
    /// matched. An absent name is not an error.
    pub fn remove_by_name(&mut self, name: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|f| f.name != name);
        self.entries.len() != before
    }

    /// Remove all entries unconditionally.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Current entries in display/submission order.
    #[must_use]
    pub fn list(&self) -> &[StagedFile] {
        &self.entries
    }

    /// Returns `true` when nothing is staged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of staged files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fits(name: &str) -> StagedFile {
        StagedFile::new(name.to_owned(), 1024, String::new())
    }

    #[test]
    fn add_preserves_insertion_order() {
        let mut store = FileListStore::new();
        store.add(fits("a.fits"));
        store.add(fits("b.fits"));
        store.add(fits("c.fits"));
        let names: Vec<&str> = store.list().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["a.fits", "b.fits", "c.fits"]);
    }

    #[test]
    fn add_duplicate_name_replaces_entry() {
        let mut store = FileListStore::new();
        store.add(StagedFile::new("a.fits".into(), 10, String::new()));
        store.add(fits("b.fits"));
        store.add(StagedFile::new("a.fits".into(), 20, String::new()));

        assert_eq!(store.len(), 2);
        let entry = store.list().iter().find(|f| f.name == "a.fits");
        assert!(matches!(entry, Some(f) if f.size == 20));
    }

    #[test]
    fn remove_by_name_absent_returns_false_and_leaves_store() {
        let mut store = FileListStore::new();
        store.add(fits("a.fits"));
        assert!(!store.remove_by_name("missing.fits"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn remove_by_name_present_returns_true_and_shrinks_by_one() {
        let mut store = FileListStore::new();
        store.add(fits("a.fits"));
        store.add(fits("b.fits"));
        assert!(store.remove_by_name("a.fits"));
        assert_eq!(store.len(), 1);
        assert!(store.list().iter().all(|f| f.name != "a.fits"));
    }

    #[test]
    fn clear_always_empties() {
        let mut store = FileListStore::new();
        assert!(store.is_empty());
        store.clear();
        assert!(store.is_empty());

        store.add(fits("a.fits"));
        store.add(fits("b.fits"));
        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
    }
}
