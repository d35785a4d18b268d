//! Preference stores backing [`SecurePreferences`](crate::SecurePreferences).

use std::{
    collections::{BTreeMap, HashMap},
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
    sync::{PoisonError, RwLock},
};

use secpref::{PreferenceEditor, PreferenceStore};
use tempfile::NamedTempFile;

use crate::error::StoreError;

/// In-process store shared between threads.
///
/// Reads take `&self`, so one `MemoryStore` can be read concurrently by
/// many pipelines.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PreferenceStore for MemoryStore {
    fn get_string(&self, key: &str) -> Option<String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }
}

impl PreferenceEditor for MemoryStore {
    fn put_string(&mut self, key: &str, value: String) {
        self.entries
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) -> Option<String> {
        self.entries
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key)
    }

    fn keys(&self) -> Vec<String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }
}

/// Store persisted as one flat JSON object of string values.
///
/// Changes stay in memory until [`flush`](Self::flush). Flushing writes a
/// uniquely named temporary file next to the target and renames it over
/// the target; a failed flush removes the temporary file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
    dirty: bool,
}

impl JsonFileStore {
    /// Loads `path`, or starts empty when the file does not exist yet.
    ///
    /// # Errors
    ///
    /// [`StoreError::Io`] if the file exists but cannot be read,
    /// [`StoreError::Json`] if it is not a JSON object of strings.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read(&path) {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => BTreeMap::new(),
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "store file not found, starting empty");
                BTreeMap::new()
            }
            Err(e) => return Err(e.into()),
        };
        Ok(JsonFileStore {
            path,
            entries,
            dirty: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Writes pending changes to disk. Does nothing when clean.
    ///
    /// # Errors
    ///
    /// [`StoreError::Io`] when the file cannot be written.
    pub fn flush(&mut self) -> Result<(), StoreError> {
        if !self.dirty {
            return Ok(());
        }
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let json = serde_json::to_vec_pretty(&self.entries)?;
        // dropped, and so deleted, on any early return
        let mut file = NamedTempFile::new_in(dir)?;
        file.write_all(&json)?;
        file.write_all(b"\n")?;
        file.as_file().sync_all()?;
        file.persist(&self.path).map_err(|e| e.error)?;

        tracing::debug!(path = %self.path.display(), entries = self.entries.len(), "store flushed");
        self.dirty = false;
        Ok(())
    }
}

impl PreferenceStore for JsonFileStore {
    fn get_string(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }
}

impl PreferenceEditor for JsonFileStore {
    fn put_string(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
        self.dirty = true;
    }

    fn remove(&mut self, key: &str) -> Option<String> {
        let removed = self.entries.remove(key);
        if removed.is_some() {
            self.dirty = true;
        }
        removed
    }

    fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, sync::Arc, thread};

    use rstest::rstest;
    use secpref::{PreferenceEditor, PreferenceStore};
use tempfile::NamedTempFile;

    use super::{JsonFileStore, MemoryStore};
    use crate::error::StoreError;

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert!(store.is_empty());
        store.put_string("a", "1".to_string());
        store.put_string("b", "2".to_string());
        assert_eq!(2, store.len());
        assert_eq!(Some("1".to_string()), store.get_string("a"));
        assert_eq!(Some("2".to_string()), store.remove("b"));
        assert_eq!(vec!["a".to_string()], store.keys());
    }

    #[test]
    fn test_memory_store_concurrent_reads() {
        let mut store = MemoryStore::new();
        store.put_string("shared", "value".to_string());
        let store = Arc::new(store);
        let handles = (0..4)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || store.get_string("shared"))
            })
            .collect::<Vec<_>>();
        for handle in handles {
            assert_eq!(Some("value".to_string()), handle.join().unwrap());
        }
    }

    #[test]
    fn test_file_store_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");

        let mut store = JsonFileStore::open(&path).unwrap();
        assert!(store.keys().is_empty());
        store.put_string("token", "c2VjcmV0".to_string());
        store.put_string("gone", "x".to_string());
        assert_eq!(Some("x".to_string()), store.remove("gone"));
        assert!(store.is_dirty());
        store.flush().unwrap();
        assert!(!store.is_dirty());

        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(Some("c2VjcmV0".to_string()), reopened.get_string("token"));
        assert_eq!(None, reopened.get_string("gone"));
        assert_eq!(vec!["token".to_string()], reopened.keys());
        assert_eq!(path.as_path(), reopened.path());
        assert_eq!(1, fs::read_dir(dir.path()).unwrap().count());
    }

    #[test]
    fn test_file_store_clean_flush_does_not_create_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        let mut store = JsonFileStore::open(&path).unwrap();
        assert_eq!(None, store.remove("nothing"));
        store.flush().unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_file_store_failed_flush_cleans_up() {
        let dir = tempfile::tempdir().unwrap();
        // a non-empty directory at the target path makes the final rename fail
        let path = dir.path().join("prefs.json");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("occupied"), "x").unwrap();

        let mut store = JsonFileStore {
            path: path.clone(),
            entries: Default::default(),
            dirty: false,
        };
        store.put_string("token", "abc".to_string());

        assert!(matches!(store.flush(), Err(StoreError::Io(_))));
        assert!(store.is_dirty());
        let leftovers = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect::<Vec<_>>();
        assert_eq!(vec![path], leftovers);
    }

    #[rstest]
    #[case::empty("", true)]
    #[case::blank("  \n", true)]
    #[case::object("{\"k\":\"v\"}", true)]
    #[case::array("[1,2]", false)]
    #[case::non_string_value("{\"k\":1}", false)]
    #[case::garbage("not json", false)]
    fn test_file_store_open(#[case] content: &str, #[case] ok: bool) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, content).unwrap();
        match JsonFileStore::open(&path) {
            Ok(_) => assert!(ok),
            Err(StoreError::Json(_)) => assert!(!ok),
            Err(e) => panic!("unexpected error: {e}"),
        }
    }
}
