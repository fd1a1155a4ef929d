use anyhow::Result;
use popcorn_config::PathManager;
use popcorn_models::WatchedEntry;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use crate::error::StoreError;

/// Key-value persistence the watched list is written through
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// One JSON file per key inside a directory
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store rooted in the data directory, created if missing
    pub fn from_paths(path_manager: &PathManager) -> Result<Self> {
        let dir = path_manager.data_dir().to_path_buf();
        std::fs::create_dir_all(&dir)?;
        Ok(Self::new(dir))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("Storage miss: {} (file does not exist)", path.display());
                Ok(None)
            }
            Err(source) => Err(StoreError::Io { key: key.to_string(), source }),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        let io_err = |source| StoreError::Io { key: key.to_string(), source };

        std::fs::create_dir_all(&self.dir).map_err(io_err)?;

        // Atomic write: write to temp file, then rename
        let temp_path = path.with_extension("json.tmp");
        std::fs::write(&temp_path, value).map_err(io_err)?;
        std::fs::rename(&temp_path, &path).map_err(io_err)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Io { key: key.to_string(), source }),
        }
    }
}

/// The user's watched list, persisted in full after every change.
///
/// Uniqueness of ids is not enforced here; callers check [`WatchedList::contains`]
/// before adding.
pub struct WatchedList {
    storage: Box<dyn KeyValueStore>,
    key: String,
    entries: Vec<WatchedEntry>,
}

impl WatchedList {
    /// Load the list once at startup. A missing key, an empty value, or a
    /// stored `null` all mean "no movies yet".
    pub fn load(storage: Box<dyn KeyValueStore>, key: impl Into<String>) -> Result<Self, StoreError> {
        let key = key.into();
        let entries = match storage.get(&key)? {
            None => Vec::new(),
            Some(raw) if raw.trim().is_empty() => Vec::new(),
            Some(raw) => serde_json::from_str::<Option<Vec<WatchedEntry>>>(&raw)
                .map_err(|source| StoreError::Corrupt { key: key.clone(), source })?
                .unwrap_or_default(),
        };

        info!("Loaded watched list '{}' ({} movies)", key, entries.len());
        Ok(Self { storage, key, entries })
    }

    pub fn all(&self) -> &[WatchedEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, imdb_id: &str) -> bool {
        self.entries.iter().any(|e| e.imdb_id == imdb_id)
    }

    pub fn get(&self, imdb_id: &str) -> Option<&WatchedEntry> {
        self.entries.iter().find(|e| e.imdb_id == imdb_id)
    }

    /// Append and persist. The in-memory list only changes once the write succeeds.
    pub fn add(&mut self, entry: WatchedEntry) -> Result<(), StoreError> {
        let mut next = self.entries.clone();
        debug!("Adding {} to watched list", entry.imdb_id);
        next.push(entry);
        self.replace(next)
    }

    /// Remove every entry with `imdb_id`, keeping the order of the rest.
    /// Returns `false` (and writes nothing) when the id is not present.
    pub fn remove(&mut self, imdb_id: &str) -> Result<bool, StoreError> {
        if !self.contains(imdb_id) {
            return Ok(false);
        }
        let next: Vec<WatchedEntry> = self
            .entries
            .iter()
            .filter(|e| e.imdb_id != imdb_id)
            .cloned()
            .collect();
        debug!("Removing {} from watched list", imdb_id);
        self.replace(next)?;
        Ok(true)
    }

    fn replace(&mut self, next: Vec<WatchedEntry>) -> Result<(), StoreError> {
        let json = serde_json::to_string(&next)?;
        self.storage.set(&self.key, &json)?;
        self.entries = next;
        debug!("Watched list '{}' saved ({} movies)", self.key, self.entries.len());
        Ok(())
    }
}
