use crate::config::STORAGE_KEY;
use crate::log_store::LogStore;
use std::{
    collections::HashMap,
    future::Future,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::{
        atomic::{AtomicBool, Ordering},
        Mutex,
    },
};
use tokio::fs;
use tracing::{error, warn};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// String-keyed persistence, the only thing the log needs from a backend.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, StoreError>> + Send;
    fn set(&self, key: &str, value: String) -> impl Future<Output = Result<(), StoreError>> + Send;
}

/// Keeps each key in its own `<key>.json` file under one directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)).await {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).await?;
        let path = self.path_for(key);
        let staging = self.dir.join(format!("{key}.json.tmp"));
        fs::write(&staging, value).await?;
        fs::rename(&staging, &path).await?;
        Ok(())
    }
}

/// In-process store. Writes can be made to fail to exercise the
/// durability-loss path.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: impl Into<String>) -> Self {
        let store = Self::default();
        if let Ok(mut values) = store.values.lock() {
            values.insert(key.to_string(), value.into());
        }
        store
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, StoreError> {
        self.values
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))
    }
}

impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.lock()?.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("quota exceeded".to_string()));
        }
        self.lock()?.insert(key.to_string(), value);
        Ok(())
    }
}

/// Reads the persisted log. Anything missing or unreadable yields an empty log.
pub async fn load_log<S: KeyValueStore>(store: &S) -> LogStore {
    let raw = match store.get(STORAGE_KEY).await {
        Ok(Some(raw)) => raw,
        Ok(None) => return LogStore::new(),
        Err(err) => {
            error!("failed to read stored log: {err}");
            return LogStore::new();
        }
    };

    match serde_json::from_str::<LogStore>(&raw) {
        Ok(log) if log.is_well_formed() => log,
        Ok(_) => {
            warn!("stored log contains invalid amounts, starting empty");
            LogStore::new()
        }
        Err(err) => {
            error!("failed to parse stored log: {err}");
            LogStore::new()
        }
    }
}

pub async fn persist_log<S: KeyValueStore>(store: &S, log: &LogStore) -> Result<(), StoreError> {
    let payload = serde_json::to_string(log)?;
    store.set(STORAGE_KEY, payload).await
}

/// Persists after a mutation. A failed write is logged and reported as `false`;
/// the in-memory log stays authoritative either way.
pub async fn write_through<S: KeyValueStore>(store: &S, log: &LogStore) -> bool {
    match persist_log(store, log).await {
        Ok(()) => true,
        Err(err) => {
            error!("failed to persist log ({} entries): {err}", log.len());
            false
        }
    }
}
