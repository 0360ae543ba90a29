pub mod aggregate;
pub mod app;
pub mod calendar;
pub mod clock;
pub mod config;
pub mod date_key;
pub mod errors;
pub mod handlers;
pub mod history;
pub mod log_store;
pub mod models;
pub mod series;
pub mod session;
pub mod state;
pub mod stats;
pub mod storage;
pub mod streak;
pub mod ui;

pub use app::router;
pub use date_key::DateKey;
pub use log_store::LogStore;
pub use state::AppState;
pub use storage::{load_log, FileStore, KeyValueStore};
