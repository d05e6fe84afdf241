//! Durable storage for region records.
//!
//! One record per named region: the key is the canonical coordinate
//! string (`"x z"`) and the payload is the region's display name. There
//! is no reverse record keyed by name; names are recovered from payloads
//! at load time.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::StorageError;

/// Backing store for region records.
///
/// Implementations should treat each record independently: a failure
/// reading one record must not prevent listing or reading the others.
pub trait RegionStore {
    /// Keys of every record currently stored.
    fn list_keys(&self) -> Result<Vec<String>, StorageError>;

    /// Payload of the record at `key`.
    fn read(&self, key: &str) -> Result<String, StorageError>;

    /// Create or replace the record at `key`.
    fn write(&mut self, key: &str, payload: &str) -> Result<(), StorageError>;

    /// Remove the record at `key`. Removing a missing record succeeds.
    fn delete(&mut self, key: &str) -> Result<(), StorageError>;
}

fn check_key(key: &str) -> Result<(), StorageError> {
    let bad = key.is_empty()
        || key == "."
        || key == ".."
        || key.contains(['/', '\\', '\0']);
    if bad {
        return Err(StorageError::InvalidKey {
            key: key.to_string(),
        });
    }
    Ok(())
}

/// Directory-backed store: one file per record, named by its key, whose
/// first line is the payload.
#[derive(Debug)]
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    /// Open (creating if needed) the record directory at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// The record directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path(&self, key: &str) -> Result<PathBuf, StorageError> {
        check_key(key)?;
        Ok(self.root.join(key))
    }
}

/// Key of one directory entry, or `None` if the entry is not a record.
/// Unreadable entries are logged and skipped.
fn record_key(root: &Path, entry: io::Result<fs::DirEntry>) -> Option<String> {
    let entry = match entry {
        Ok(entry) => entry,
        Err(e) => {
            tracing::warn!("skipping unreadable entry in {}: {e}", root.display());
            return None;
        }
    };
    match entry.file_type() {
        Ok(kind) if kind.is_file() => {}
        Ok(_) => return None,
        Err(e) => {
            tracing::warn!("skipping {}: {e}", entry.path().display());
            return None;
        }
    }
    // Non-UTF-8 file names cannot be region keys.
    entry.file_name().into_string().ok()
}

impl RegionStore for DirStore {
    fn list_keys(&self) -> Result<Vec<String>, StorageError> {
        let mut keys: Vec<String> = fs::read_dir(&self.root)?
            .filter_map(|entry| record_key(&self.root, entry))
            .collect();
        keys.sort();
        Ok(keys)
    }

    fn read(&self, key: &str) -> Result<String, StorageError> {
        let text = fs::read_to_string(self.path(key)?)?;
        let first = text.lines().next().unwrap_or("").trim();
        if first.is_empty() {
            return Err(StorageError::InvalidPayload {
                key: key.to_string(),
                reason: "record is empty".into(),
            });
        }
        Ok(first.to_string())
    }

    fn write(&mut self, key: &str, payload: &str) -> Result<(), StorageError> {
        fs::write(self.path(key)?, payload)?;
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path(key)?) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory store, for tests and ephemeral worlds.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    records: BTreeMap<String, String>,
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with `(key, payload)` records.
    pub fn with_records<K, V>(records: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            records: records
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Payload at `key`, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.records.get(key).map(String::as_str)
    }
}

impl RegionStore for MemoryStore {
    fn list_keys(&self) -> Result<Vec<String>, StorageError> {
        Ok(self.records.keys().cloned().collect())
    }

    fn read(&self, key: &str) -> Result<String, StorageError> {
        self.records.get(key).cloned().ok_or_else(|| {
            StorageError::Io(io::Error::new(io::ErrorKind::NotFound, key.to_string()))
        })
    }

    fn write(&mut self, key: &str, payload: &str) -> Result<(), StorageError> {
        check_key(key)?;
        self.records.insert(key.to_string(), payload.to_string());
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<(), StorageError> {
        self.records.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dir_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = DirStore::open(dir.path().join("regions")).unwrap();
        store.write("0 0", "redstone").unwrap();
        store.write("-1 2", "valley").unwrap();
        assert_eq!(store.list_keys().unwrap(), vec!["-1 2", "0 0"]);
        assert_eq!(store.read("0 0").unwrap(), "redstone");

        store.delete("0 0").unwrap();
        store.delete("0 0").unwrap();
        assert_eq!(store.list_keys().unwrap(), vec!["-1 2"]);
    }

    #[test]
    fn dir_store_reads_first_line_only() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("3 4"), "harbor\nsecond line\n").unwrap();
        let store = DirStore::open(dir.path()).unwrap();
        assert_eq!(store.read("3 4").unwrap(), "harbor");
    }

    #[test]
    fn dir_store_skips_directories() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("1 1")).unwrap();
        fs::write(dir.path().join("2 2"), "meadow").unwrap();
        let store = DirStore::open(dir.path()).unwrap();
        assert_eq!(store.list_keys().unwrap(), vec!["2 2"]);
    }

    #[test]
    fn unreadable_entry_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let failed = Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        assert_eq!(record_key(dir.path(), failed), None);
    }

    #[test]
    fn listing_continues_past_entries_that_are_not_records() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("0 0"), "first").unwrap();
        fs::create_dir(dir.path().join("0 1")).unwrap();
        #[cfg(unix)]
        std::os::unix::fs::symlink(dir.path().join("missing"), dir.path().join("1 0")).unwrap();
        fs::write(dir.path().join("1 1"), "last").unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), if cfg!(unix) { 4 } else { 3 });
        let store = DirStore::open(dir.path()).unwrap();
        assert_eq!(store.list_keys().unwrap(), vec!["0 0", "1 1"]);
    }

    #[test]
    fn dir_store_empty_record_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("0 0"), "").unwrap();
        let store = DirStore::open(dir.path()).unwrap();
        assert!(matches!(
            store.read("0 0"),
            Err(StorageError::InvalidPayload { .. })
        ));
    }

    #[test]
    fn path_like_keys_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = DirStore::open(dir.path()).unwrap();
        assert!(matches!(
            store.write("../escape", "x"),
            Err(StorageError::InvalidKey { .. })
        ));
        let mut mem = MemoryStore::new();
        assert!(matches!(
            mem.write("", "x"),
            Err(StorageError::InvalidKey { .. })
        ));
    }

    #[test]
    fn memory_store_basics() {
        let mut store = MemoryStore::with_records([("0 0", "a")]);
        store.write("0 1", "b").unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.get("0 1"), Some("b"));
        store.delete("0 0").unwrap();
        assert_eq!(store.list_keys().unwrap(), vec!["0 1"]);
        assert!(store.read("0 0").is_err());
    }
}
