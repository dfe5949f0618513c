use std::fs;
use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Recent-search list: capacity-bounded, most-recent-first
// ---------------------------------------------------------------------------

/// Default capacity for the recent-search list.
pub const DEFAULT_CAPACITY: usize = 5;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("reading/writing recent-search store: {0}")]
    Io(#[from] std::io::Error),
    #[error("decoding recent-search store: {0}")]
    Json(#[from] serde_json::Error),
}

/// Storage backend for the recent-search keys, injected so it can be swapped
/// for whatever persistence the host environment provides.
pub trait RecentStore {
    /// Load the persisted keys, most recent first.
    fn load(&self) -> Result<Vec<String>, StoreError>;
    /// Persist the full list, most recent first.
    fn save(&mut self, keys: &[String]) -> Result<(), StoreError>;
}

/// The last N selected institution keys, most recent first.
///
/// Inserting an already-present key moves it to the front without growing
/// the list; inserting past capacity evicts the oldest entry.
pub struct RecentSearches<S: RecentStore> {
    keys: Vec<String>,
    capacity: usize,
    store: S,
}

impl<S: RecentStore> RecentSearches<S> {
    /// Load the list from the given store, truncating anything beyond
    /// `capacity`. A failed load starts empty rather than failing the
    /// session.
    pub fn open(store: S, capacity: usize) -> Self {
        let mut keys = match store.load() {
            Ok(keys) => keys,
            Err(err) => {
                log::warn!("recent-search store unreadable, starting empty: {err}");
                Vec::new()
            }
        };
        keys.truncate(capacity);
        RecentSearches {
            keys,
            capacity,
            store,
        }
    }

    /// Record a selection: move-to-front semantics, then evict beyond
    /// capacity, then persist.
    pub fn insert(&mut self, key: &str) -> Result<(), StoreError> {
        self.keys.retain(|k| k != key);
        self.keys.insert(0, key.to_string());
        self.keys.truncate(self.capacity);
        self.store.save(&self.keys)
    }

    /// Drop one key (the "clear this chip" action).
    pub fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let before = self.keys.len();
        self.keys.retain(|k| k != key);
        if self.keys.len() == before {
            return Ok(());
        }
        self.store.save(&self.keys)
    }

    /// Keys, most recent first.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Stores
// ---------------------------------------------------------------------------

/// Volatile store for tests and embedders that persist elsewhere.
#[derive(Debug, Default)]
pub struct MemoryStore {
    keys: Vec<String>,
}

impl RecentStore for MemoryStore {
    fn load(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.keys.clone())
    }

    fn save(&mut self, keys: &[String]) -> Result<(), StoreError> {
        self.keys = keys.to_vec();
        Ok(())
    }
}

/// JSON-file store: a plain array of keys, most recent first. A missing file
/// is an empty list, not an error.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStore { path: path.into() }
    }
}

impl RecentStore for FileStore {
    fn load(&self) -> Result<Vec<String>, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };
        Ok(serde_json::from_str(&text)?)
    }

    fn save(&mut self, keys: &[String]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string(keys)?)?;
        Ok(())
    }
}
