use crate::clock::{Clock, SystemClock};
use crate::date_key::DateKey;
use crate::log_store::LogStore;
use crate::session::Session;
use crate::storage::FileStore;
use chrono::Local;
use std::sync::Arc;
use tokio::sync::Mutex;

pub struct AppData {
    pub log: LogStore,
    pub session: Session,
}

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<FileStore>,
    pub clock: Arc<dyn Clock>,
    pub data: Arc<Mutex<AppData>>,
}

impl AppState {
    pub fn new(store: FileStore, log: LogStore) -> Self {
        Self::with_clock(store, log, Arc::new(SystemClock))
    }

    pub fn with_clock(store: FileStore, log: LogStore, clock: Arc<dyn Clock>) -> Self {
        let today = DateKey::of(&clock.now(), &Local);
        Self {
            store: Arc::new(store),
            clock,
            data: Arc::new(Mutex::new(AppData {
                log,
                session: Session::new(today),
            })),
        }
    }

    pub fn today(&self) -> DateKey {
        DateKey::of(&self.clock.now(), &Local)
    }
}
