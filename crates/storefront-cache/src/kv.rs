//! Key-value stores with automatic JSON serialization.

use crate::CacheError;
use serde::{de::DeserializeOwned, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, RwLock};

/// Raw byte-level key-value storage.
///
/// Implementations must be safe to share across threads; callers that need
/// read-modify-write atomicity serialize through [`crate::CollectionStore`].
pub trait KeyValueStore: Send + Sync {
    /// Bytes stored under `key`, or `None` when absent.
    fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// Store bytes under `key`, replacing any previous value.
    fn set_raw(&self, key: &str, value: &[u8]) -> Result<(), CacheError>;

    /// Remove `key`. Returns whether it existed.
    fn delete(&self, key: &str) -> Result<bool, CacheError>;

    /// All keys, sorted.
    fn keys(&self) -> Result<Vec<String>, CacheError>;

    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.get_raw(key)?.is_some())
    }
}

/// In-process store, mainly for tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        Ok(self.entries.read()?.get(key).cloned())
    }

    fn set_raw(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        self.entries.write()?.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.entries.write()?.remove(key).is_some())
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        Ok(self.entries.read()?.keys().cloned().collect())
    }
}

type Document = serde_json::Map<String, serde_json::Value>;

/// Store persisted as a single JSON object on disk.
///
/// Every write rewrites the whole document through a temporary file in the
/// same directory followed by a rename, so readers never observe a partial
/// file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Open (or lazily create) the store at `path`.
    ///
    /// The parent directory is created if missing. The file itself is only
    /// written on the first `set_raw`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| CacheError::Open {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        }
        tracing::debug!(path = %path.display(), "opened file store");
        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> Result<Document, CacheError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Document::new()),
            Err(e) => return Err(e.into()),
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Document::new());
        }
        match serde_json::from_slice(&bytes)? {
            serde_json::Value::Object(map) => Ok(map),
            other => Err(CacheError::Corrupt(format!(
                "expected object at top level, found {}",
                json_kind(&other)
            ))),
        }
    }

    fn write_document(&self, document: &Document) -> Result<(), CacheError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut tmp, document)?;
        tmp.write_all(b"\n")?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| CacheError::Io(e.error))?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let document = self.read_document()?;
        document
            .get(key)
            .map(|value| serde_json::to_vec(value).map_err(CacheError::from))
            .transpose()
    }

    fn set_raw(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        let value: serde_json::Value = serde_json::from_slice(value)?;
        let _guard = self.write_lock.lock()?;
        let mut document = self.read_document()?;
        document.insert(key.to_string(), value);
        self.write_document(&document)
    }

    fn delete(&self, key: &str) -> Result<bool, CacheError> {
        let _guard = self.write_lock.lock()?;
        let mut document = self.read_document()?;
        if document.remove(key).is_none() {
            return Ok(false);
        }
        self.write_document(&document)?;
        Ok(true)
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        let mut keys: Vec<String> = self.read_document()?.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// Type-safe cache over any [`KeyValueStore`].
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`.
///
/// # Example
///
/// ```rust
/// use storefront_cache::{Cache, MemoryStore};
///
/// let cache = Cache::new(MemoryStore::new());
/// cache.set("greeting", &"hello").unwrap();
/// let value: Option<String> = cache.get("greeting").unwrap();
/// assert_eq!(value.as_deref(), Some("hello"));
/// ```
#[derive(Debug)]
pub struct Cache<S> {
    store: S,
}

impl<S: KeyValueStore> Cache<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.store.get_raw(key)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Get a value, falling back to `T::default()` when absent.
    pub fn get_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> Result<T, CacheError> {
        Ok(self.get(key)?.unwrap_or_default())
    }

    /// Set a value in the cache.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec(value)?;
        self.store.set_raw(key, &bytes)
    }

    /// Delete a value. Returns whether it existed.
    pub fn delete(&self, key: &str) -> Result<bool, CacheError> {
        self.store.delete(key)
    }

    pub fn exists(&self, key: &str) -> Result<bool, CacheError> {
        self.store.exists(key)
    }

    pub fn keys(&self) -> Result<Vec<String>, CacheError> {
        self.store.keys()
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

/// Helper to build cache keys with namespacing.
///
/// # Example
///
/// ```rust
/// use storefront_cache::cache_key;
///
/// let key = cache_key!("cart", "alice");
/// assert_eq!(key, "cart:alice");
/// ```
#[macro_export]
macro_rules! cache_key {
    ($prefix:expr, $($part:expr),+) => {{
        let mut key = String::from($prefix);
        $(
            key.push(':');
            key.push_str(&$part.to_string());
        )+
        key
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Prefs {
        theme: String,
        per_page: u32,
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let cache = Cache::new(MemoryStore::new());
        let prefs = Prefs {
            theme: "dark".into(),
            per_page: 12,
        };
        cache.set("prefs", &prefs).unwrap();
        assert_eq!(cache.get::<Prefs>("prefs").unwrap(), Some(prefs));
        assert!(cache.exists("prefs").unwrap());
        assert!(cache.delete("prefs").unwrap());
        assert!(!cache.delete("prefs").unwrap());
    }

    #[test]
    fn test_get_or_default_when_missing() {
        let cache = Cache::new(MemoryStore::new());
        assert_eq!(cache.get_or_default::<Prefs>("nope").unwrap(), Prefs::default());
    }

    #[test]
    fn test_type_mismatch_is_serialize_error() {
        let cache = Cache::new(MemoryStore::new());
        cache.set("prefs", &42).unwrap();
        assert!(matches!(
            cache.get::<Prefs>("prefs"),
            Err(CacheError::Serialize(_))
        ));
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("store.json");

        let cache = Cache::new(FileStore::open(&path).unwrap());
        cache.set("b", &vec![1, 2, 3]).unwrap();
        cache.set("a", &"x").unwrap();

        let reopened = Cache::new(FileStore::open(&path).unwrap());
        assert_eq!(reopened.get::<Vec<u32>>("b").unwrap(), Some(vec![1, 2, 3]));
        assert_eq!(reopened.keys().unwrap(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_file_store_missing_and_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.get_raw("cart").unwrap(), None);

        fs::write(&path, "  \n").unwrap();
        assert!(store.keys().unwrap().is_empty());
    }

    #[test]
    fn test_file_store_rejects_non_object_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "[1, 2]").unwrap();
        let store = FileStore::open(&path).unwrap();
        assert!(matches!(store.keys(), Err(CacheError::Corrupt(_))));
    }

    #[test]
    fn test_cache_key_macro() {
        assert_eq!(cache_key!("cart", "default"), "cart:default");
        assert_eq!(cache_key!("reviews", 7, "helpful"), "reviews:7:helpful");
    }
}
