use crate::config::DELETABLE_RECENT;
use crate::models::{LogEntry, LogView};
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The full drink log, newest entry first.
///
/// Serializes as a bare JSON array so the persisted form is exactly the list of
/// entries.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogStore {
    entries: Vec<LogEntry>,
}

impl LogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepends a new entry stamped with `now`. Returns `None` and leaves the
    /// store untouched unless `amount` is a positive finite number.
    pub fn add(&mut self, amount: f64, now: DateTime<Utc>) -> Option<LogEntry> {
        if !is_valid_amount(amount) {
            return None;
        }

        let timestamp = now.trunc_subsecs(3);
        let millis = timestamp.timestamp_millis();
        let id = match self.entries.iter().map(|entry| entry.id).max() {
            Some(last) if last >= millis => last.saturating_add(1),
            _ => millis,
        };

        let entry = LogEntry { id, amount, timestamp };
        self.entries.insert(0, entry.clone());
        Some(entry)
    }

    pub fn remove(&mut self, id: i64) -> Option<LogEntry> {
        let index = self.entries.iter().position(|entry| entry.id == id)?;
        Some(self.entries.remove(index))
    }

    pub fn all(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn get(&self, id: i64) -> Option<&LogEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Only the most recent few entries across the whole log may be deleted.
    pub fn is_deletable(&self, id: i64) -> bool {
        self.entries
            .iter()
            .take(DELETABLE_RECENT)
            .any(|entry| entry.id == id)
    }

    pub fn views(&self) -> Vec<LogView> {
        self.entries
            .iter()
            .enumerate()
            .map(|(rank, entry)| LogView {
                entry: entry.clone(),
                deletable: rank < DELETABLE_RECENT,
            })
            .collect()
    }

    /// True when every entry satisfies the entry invariants.
    pub fn is_well_formed(&self) -> bool {
        self.entries.iter().all(|entry| is_valid_amount(entry.amount))
    }
}

pub fn is_valid_amount(amount: f64) -> bool {
    amount.is_finite() && amount > 0.0
}

/// Parses user-supplied text such as a form field.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let value = raw.trim().parse::<f64>().ok()?;
    is_valid_amount(value).then_some(value)
}

/// Accepts a JSON number or a numeric string.
pub fn parse_amount_value(raw: Option<&Value>) -> Option<f64> {
    match raw? {
        Value::Number(number) => number.as_f64().filter(|value| is_valid_amount(*value)),
        Value::String(text) => parse_amount(text),
        _ => None,
    }
}
