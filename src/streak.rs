use crate::aggregate::{is_logged, DailyTotals};
use crate::date_key::DateKey;
use crate::models::StreakResult;

/// Current and longest runs of consecutive logged days.
///
/// The current streak stays alive through today as long as yesterday was
/// logged, so it only drops to zero once a whole day has been skipped.
pub fn compute_streaks(days: &DailyTotals, today: DateKey) -> StreakResult {
    let mut result = StreakResult::default();

    let anchor = if is_logged(days, today) {
        Some(today)
    } else if is_logged(days, today.pred()) {
        Some(today.pred())
    } else {
        None
    };

    if let Some(anchor) = anchor {
        let mut cursor = anchor;
        while is_logged(days, cursor) {
            result.current_days.insert(cursor);
            cursor = cursor.pred();
        }
        result.current = result.current_days.len() as u32;
    }

    let logged: Vec<DateKey> = days
        .iter()
        .filter(|(_, bucket)| bucket.total > 0.0)
        .map(|(key, _)| *key)
        .collect();
    let longest = longest_run(&logged);
    result.longest = longest.len() as u32;
    result.longest_days = longest.iter().copied().collect();

    result
}

/// `logged` must be sorted ascending and free of duplicates. Among runs of equal
/// length the earliest one wins.
fn longest_run(logged: &[DateKey]) -> &[DateKey] {
    let mut best = &logged[..0];
    let mut run_start = 0;

    for i in 1..=logged.len() {
        let breaks = i == logged.len() || logged[i].days_since(logged[i - 1]) != 1;
        if breaks {
            let run = &logged[run_start..i];
            if run.len() > best.len() {
                best = run;
            }
            run_start = i;
        }
    }

    best
}
