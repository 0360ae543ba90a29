use crate::date_key::DateKey;
use crate::models::{LogEntry, SeriesPoint};
use chrono::TimeZone;

pub const WEEK_DAYS: usize = 7;
pub const MONTH_DAYS: usize = 30;

/// Daily totals for the `n` days ending with `today`, oldest first. Days without
/// entries are present with an amount of 0.
pub fn trailing_days<Tz: TimeZone>(
    entries: &[LogEntry],
    tz: &Tz,
    today: DateKey,
    n: usize,
) -> Vec<SeriesPoint> {
    (0..n as i64)
        .rev()
        .map(|offset| {
            let day = today.add_days(-offset);
            let amount = entries
                .iter()
                .filter(|entry| DateKey::of(&entry.timestamp, tz) == day)
                .fold(0.0, |sum, entry| sum + entry.amount);
            SeriesPoint {
                label: day.date().format("%b %-d").to_string(),
                amount,
                date: day,
            }
        })
        .collect()
}

/// Mean over every day in the window, empty days included, rounded to the
/// nearest whole ml.
pub fn average(series: &[SeriesPoint]) -> u64 {
    if series.is_empty() {
        return 0;
    }
    let sum = series.iter().fold(0.0, |sum, point| sum + point.amount);
    (sum / series.len() as f64).round() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{aggregate, total_for};
    use chrono::{DateTime, FixedOffset, Utc};

    fn key(s: &str) -> DateKey {
        s.parse().unwrap()
    }

    fn entry(id: i64, amount: f64, raw: &str) -> LogEntry {
        LogEntry {
            id,
            amount,
            timestamp: raw.parse::<DateTime<Utc>>().unwrap(),
        }
    }

    #[test]
    fn window_ends_today_oldest_first() {
        let series = trailing_days(&[], &Utc, key("2025-03-05"), WEEK_DAYS);
        assert_eq!(series.len(), 7);
        assert_eq!(series[0].date, key("2025-02-27"));
        assert_eq!(series[0].label, "Feb 27");
        assert_eq!(series[6].date, key("2025-03-05"));
        assert!(series.iter().all(|point| point.amount == 0.0));
        assert_eq!(trailing_days(&[], &Utc, key("2025-03-05"), MONTH_DAYS).len(), 30);
    }

    #[test]
    fn week_average_counts_empty_days() {
        let entries = vec![
            entry(2, 2000.0, "2025-03-05T12:00:00Z"),
            entry(1, 1000.0, "2025-02-27T12:00:00Z"),
        ];
        let series = trailing_days(&entries, &Utc, key("2025-03-05"), WEEK_DAYS);

        assert_eq!(series[0].amount, 1000.0);
        assert_eq!(series[6].amount, 2000.0);
        // 3000 / 7 = 428.57...
        assert_eq!(average(&series), 429);
    }

    #[test]
    fn entries_outside_window_are_ignored() {
        let entries = vec![
            entry(2, 700.0, "2025-03-06T12:00:00Z"),
            entry(1, 900.0, "2025-02-26T12:00:00Z"),
        ];
        let series = trailing_days(&entries, &Utc, key("2025-03-05"), WEEK_DAYS);
        assert_eq!(average(&series), 0);
    }

    #[test]
    fn series_agrees_with_daily_aggregation() {
        let tz = FixedOffset::west_opt(7 * 3600).unwrap();
        let entries = vec![
            entry(4, 250.0, "2025-03-05T06:30:00Z"),
            entry(3, 500.0, "2025-03-04T23:00:00Z"),
            entry(2, 350.0, "2025-03-04T05:00:00Z"),
            entry(1, 1000.0, "2025-03-01T18:00:00Z"),
        ];
        let today = key("2025-03-05");
        let days = aggregate(&entries, &tz);

        for point in trailing_days(&entries, &tz, today, WEEK_DAYS) {
            assert_eq!(point.amount, total_for(&days, point.date));
        }
    }

    #[test]
    fn average_of_empty_series_is_zero() {
        assert_eq!(average(&[]), 0);
    }
}
