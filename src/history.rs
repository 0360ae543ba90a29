use crate::date_key::DateKey;
use crate::log_store::LogStore;
use crate::models::{HistoryDay, LogView};
use chrono::TimeZone;
use std::collections::BTreeMap;

pub fn day_label(key: DateKey, today: DateKey) -> String {
    if key == today {
        "Today".to_string()
    } else if key == today.pred() {
        "Yesterday".to_string()
    } else {
        key.date().format("%A, %b %-d").to_string()
    }
}

/// The log grouped by local day, newest day first. Entries keep the store's
/// newest-first order and carry their global deletion eligibility.
pub fn group_by_day<Tz: TimeZone>(log: &LogStore, tz: &Tz, today: DateKey) -> Vec<HistoryDay> {
    let mut grouped: BTreeMap<DateKey, Vec<LogView>> = BTreeMap::new();
    for view in log.views() {
        grouped
            .entry(DateKey::of(&view.entry.timestamp, tz))
            .or_default()
            .push(view);
    }

    grouped
        .into_iter()
        .rev()
        .map(|(date, entries)| HistoryDay {
            date,
            label: day_label(date, today),
            is_today: date == today,
            total: entries.iter().fold(0.0, |sum, view| sum + view.entry.amount),
            entries,
        })
        .collect()
}
