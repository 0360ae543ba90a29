use crate::date_key::DateKey;
use crate::models::{DailyBucket, LogEntry};
use chrono::TimeZone;
use std::collections::BTreeMap;

pub type DailyTotals = BTreeMap<DateKey, DailyBucket>;

/// Groups entries by the local day they were logged on.
pub fn aggregate<Tz: TimeZone>(entries: &[LogEntry], tz: &Tz) -> DailyTotals {
    let mut days = DailyTotals::new();
    for entry in entries {
        let bucket = days.entry(DateKey::of(&entry.timestamp, tz)).or_default();
        bucket.total += entry.amount;
        bucket.entries.push(entry.clone());
    }

    for bucket in days.values_mut() {
        bucket.entries.sort_by_key(|entry| entry.timestamp);
    }

    days
}

pub fn total_for(days: &DailyTotals, key: DateKey) -> f64 {
    days.get(&key).map_or(0.0, |bucket| bucket.total)
}

pub fn is_logged(days: &DailyTotals, key: DateKey) -> bool {
    total_for(days, key) > 0.0
}

/// Largest single-day total, or 0 with no history.
pub fn personal_best(days: &DailyTotals) -> f64 {
    days.values().map(|bucket| bucket.total).fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, FixedOffset, Utc};

    fn entry(id: i64, amount: f64, raw: &str) -> LogEntry {
        LogEntry {
            id,
            amount,
            timestamp: raw.parse::<DateTime<Utc>>().unwrap(),
        }
    }

    fn key(s: &str) -> DateKey {
        s.parse().unwrap()
    }

    #[test]
    fn same_day_entries_share_a_bucket() {
        // Newest first, as the store keeps them.
        let entries = vec![
            entry(2, 300.0, "2025-01-01T20:00:00Z"),
            entry(1, 500.0, "2025-01-01T08:00:00Z"),
        ];
        let days = aggregate(&entries, &Utc);

        assert_eq!(days.len(), 1);
        let bucket = &days[&key("2025-01-01")];
        assert_eq!(bucket.total, 800.0);
        let ids: Vec<i64> = bucket.entries.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn each_entry_lands_in_exactly_one_local_day() {
        let entries = vec![
            entry(3, 200.0, "2025-01-02T01:00:00Z"),
            entry(2, 300.0, "2025-01-01T23:30:00Z"),
            entry(1, 500.0, "2025-01-01T08:00:00Z"),
        ];
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let days = aggregate(&entries, &tz);

        assert_eq!(total_for(&days, key("2025-01-01")), 500.0);
        assert_eq!(total_for(&days, key("2025-01-02")), 500.0);
        let count: usize = days.values().map(|bucket| bucket.entries.len()).sum();
        assert_eq!(count, entries.len());
    }

    #[test]
    fn aggregation_is_idempotent() {
        let entries = vec![
            entry(3, 120.5, "2025-02-03T09:00:00Z"),
            entry(2, 300.0, "2025-02-01T10:00:00Z"),
            entry(1, 250.0, "2025-02-01T07:00:00Z"),
        ];
        assert_eq!(aggregate(&entries, &Utc), aggregate(&entries, &Utc));
    }

    #[test]
    fn missing_days_default_to_zero() {
        let days = aggregate(&[], &Utc);
        assert_eq!(total_for(&days, key("2025-01-01")), 0.0);
        assert!(!is_logged(&days, key("2025-01-01")));
        assert_eq!(personal_best(&days), 0.0);
    }

    #[test]
    fn personal_best_picks_largest_day() {
        let entries = vec![
            entry(3, 1000.0, "2025-02-03T09:00:00Z"),
            entry(2, 1500.0, "2025-02-01T10:00:00Z"),
            entry(1, 250.0, "2025-02-01T07:00:00Z"),
        ];
        assert_eq!(personal_best(&aggregate(&entries, &Utc)), 1750.0);
    }
}
