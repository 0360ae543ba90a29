use std::{env, path::PathBuf};

/// Daily intake target in ml.
pub const DAILY_GOAL_ML: f64 = 3000.0;

/// Amounts offered as one-tap buttons.
pub const QUICK_ADD_PRESETS: [u32; 3] = [250, 350, 500];

/// Key under which the whole log is persisted.
pub const STORAGE_KEY: &str = "water-logs";

/// Number of most recent entries that may still be deleted.
pub const DELETABLE_RECENT: usize = 3;

/// Minimum horizontal drag distance for a swipe to count.
pub const SWIPE_THRESHOLD: f64 = 50.0;

const DEFAULT_PORT: u16 = 8080;

pub fn resolve_data_dir() -> PathBuf {
    match env::var("APP_DATA_DIR") {
        Ok(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
        _ => PathBuf::from("data"),
    }
}

pub fn resolve_port() -> u16 {
    env::var("PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT)
}
