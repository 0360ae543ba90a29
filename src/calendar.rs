//! Month and week grids for the calendar heat-map, plus the navigation rules
//! that move between them.

use crate::aggregate::{total_for, DailyTotals};
use crate::config::SWIPE_THRESHOLD;
use crate::date_key::DateKey;
use crate::history::day_label;
use crate::models::{CalendarCell, DayDetail, StreakResult};
use chrono::{Datelike, Duration, Months, NaiveDate};

/// Cells in a month grid: six full weeks.
pub const MONTH_GRID_CELLS: usize = 42;
pub const WEEK_GRID_CELLS: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Next,
    Previous,
}

/// The month currently displayed, stored as its first day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthCursor {
    first: NaiveDate,
}

impl MonthCursor {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first| Self { first })
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first: date - Duration::days(i64::from(date.day0())),
        }
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    /// 1-based month number.
    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    /// Moves one whole month, rolling the year over at the ends. Stays put at
    /// the edge of the representable range.
    pub fn step(self, step: Step) -> Self {
        let moved = match step {
            Step::Next => self.first.checked_add_months(Months::new(1)),
            Step::Previous => self.first.checked_sub_months(Months::new(1)),
        };
        moved.map_or(self, |first| Self { first })
    }

    pub fn title(&self) -> String {
        self.first.format("%B %Y").to_string()
    }
}

pub fn step_week(anchor: DateKey, step: Step) -> DateKey {
    match step {
        Step::Next => anchor.add_days(7),
        Step::Previous => anchor.add_days(-7),
    }
}

/// Maps a finished drag to a navigation step. Short drags and mostly vertical
/// drags are ignored; dragging left moves forward.
pub fn swipe_step(dx: f64, dy: f64) -> Option<Step> {
    if !dx.is_finite() || !dy.is_finite() {
        return None;
    }
    if dx.abs() < SWIPE_THRESHOLD || dx.abs() < dy.abs() {
        return None;
    }
    Some(if dx < 0.0 { Step::Next } else { Step::Previous })
}

/// Everything a grid cell is annotated from.
pub struct GridContext<'a> {
    pub days: &'a DailyTotals,
    pub streak: &'a StreakResult,
    pub today: DateKey,
    pub goal: f64,
}

impl GridContext<'_> {
    fn cell(&self, key: DateKey, in_month: Option<bool>) -> CalendarCell {
        let total = total_for(self.days, key);
        CalendarCell {
            date_key: key,
            date: key.date(),
            in_month,
            total,
            is_today: key == self.today,
            is_streak: self.streak.current_days.contains(&key),
            is_logged: total > 0.0,
            is_goal: total >= self.goal,
        }
    }
}

pub fn month_grid(cursor: MonthCursor, ctx: &GridContext<'_>) -> Vec<CalendarCell> {
    let start = DateKey::from_date(cursor.first_day()).week_start();
    (0..MONTH_GRID_CELLS as i64)
        .map(|offset| {
            let key = start.add_days(offset);
            let in_month =
                key.date().month() == cursor.month() && key.date().year() == cursor.year();
            ctx.cell(key, Some(in_month))
        })
        .collect()
}

pub fn week_grid(anchor: DateKey, ctx: &GridContext<'_>) -> Vec<CalendarCell> {
    let start = anchor.week_start();
    (0..WEEK_GRID_CELLS as i64)
        .map(|offset| ctx.cell(start.add_days(offset), None))
        .collect()
}

/// "Mar 2 – Mar 8, 2025"
pub fn week_title(anchor: DateKey) -> String {
    let start = anchor.week_start();
    let end = start.add_days(6);
    format!(
        "{} – {}",
        start.date().format("%b %-d"),
        end.date().format("%b %-d, %Y")
    )
}

pub fn progress_percent(total: f64, goal: f64) -> f64 {
    if goal <= 0.0 {
        return 100.0;
    }
    (total / goal * 100.0).min(100.0)
}

pub fn day_detail(days: &DailyTotals, key: DateKey, today: DateKey, goal: f64) -> DayDetail {
    let (total, entries) = days
        .get(&key)
        .map_or((0.0, Vec::new()), |bucket| (bucket.total, bucket.entries.clone()));

    DayDetail {
        date: key,
        label: day_label(key, today),
        total,
        goal_met: total >= goal,
        progress_percent: progress_percent(total, goal),
        entries,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;
    use crate::models::LogEntry;
    use crate::streak::compute_streaks;
    use chrono::{DateTime, Utc};

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
    fn month_grid_always_has_six_weeks() {
        let days = DailyTotals::new();
        let streak = StreakResult::default();
        let ctx = GridContext {
            days: &days,
            streak: &streak,
            today: key("2025-03-05"),
            goal: 3000.0,
        };

        for (year, month) in [(2025, 2), (2026, 2), (2024, 2), (2025, 3), (2025, 8), (2025, 12)] {
            let cursor = MonthCursor::new(year, month).unwrap();
            let grid = month_grid(cursor, &ctx);
            assert_eq!(grid.len(), MONTH_GRID_CELLS);
            assert_eq!(grid[0].date.weekday(), chrono::Weekday::Sun);
            assert!(grid.iter().any(|cell| cell.date == cursor.first_day()));
        }
    }

    #[test]
    fn month_grid_starts_on_sunday_before_the_first() {
        let days = DailyTotals::new();
        let streak = StreakResult::default();
        let ctx = GridContext {
            days: &days,
            streak: &streak,
            today: key("2025-03-05"),
            goal: 3000.0,
        };
        // March 2025 starts on a Saturday.
        let grid = month_grid(MonthCursor::new(2025, 3).unwrap(), &ctx);

        assert_eq!(grid[0].date_key, key("2025-02-23"));
        assert_eq!(grid[0].in_month, Some(false));
        assert_eq!(grid[6].date_key, key("2025-03-01"));
        assert_eq!(grid[6].in_month, Some(true));
        assert_eq!(grid[41].date_key, key("2025-04-05"));
        assert_eq!(grid.iter().filter(|cell| cell.in_month == Some(true)).count(), 31);
        assert!(grid
            .iter()
            .filter(|cell| cell.is_today)
            .all(|cell| cell.date_key == key("2025-03-05")));
    }

    #[test]
    fn cells_carry_log_goal_and_streak_flags() {
        let entries = vec![
            entry(3, 3000.0, "2025-03-05T09:00:00Z"),
            entry(2, 400.0, "2025-03-04T09:00:00Z"),
            entry(1, 900.0, "2025-03-02T09:00:00Z"),
        ];
        let days = aggregate(&entries, &Utc);
        let today = key("2025-03-05");
        let streak = compute_streaks(&days, today);
        let ctx = GridContext {
            days: &days,
            streak: &streak,
            today,
            goal: 3000.0,
        };
        let grid = week_grid(today, &ctx);

        let find = |s: &str| grid.iter().find(|cell| cell.date_key == key(s)).unwrap();
        let today_cell = find("2025-03-05");
        assert!(today_cell.is_today && today_cell.is_logged);
        assert!(today_cell.is_goal && today_cell.is_streak);
        assert_eq!(today_cell.in_month, None);

        let partial = find("2025-03-04");
        assert!(partial.is_logged && partial.is_streak && !partial.is_goal);

        let outside_streak = find("2025-03-02");
        assert!(outside_streak.is_logged && !outside_streak.is_streak);

        let empty = find("2025-03-03");
        assert!(!empty.is_logged && !empty.is_goal && empty.total == 0.0);

        let dates: Vec<DateKey> = grid.iter().map(|cell| cell.date_key).collect();
        assert_eq!(dates.first(), Some(&key("2025-03-02")));
        assert_eq!(dates.last(), Some(&key("2025-03-08")));
    }

    #[test]
    fn week_grid_is_sunday_to_saturday() {
        let days = DailyTotals::new();
        let streak = StreakResult::default();
        let ctx = GridContext {
            days: &days,
            streak: &streak,
            today: key("2025-01-01"),
            goal: 3000.0,
        };
        let grid = week_grid(key("2025-01-01"), &ctx);

        assert_eq!(grid.len(), WEEK_GRID_CELLS);
        assert_eq!(grid[0].date_key, key("2024-12-29"));
        assert_eq!(grid[6].date_key, key("2025-01-04"));
    }

    #[test]
    fn month_steps_roll_over_years() {
        let december = MonthCursor::new(2024, 12).unwrap();
        let january = december.step(Step::Next);
        assert_eq!((january.year(), january.month()), (2025, 1));
        assert_eq!(january.step(Step::Previous), december);
        assert_eq!(
            MonthCursor::containing(key("2025-03-31").date()),
            MonthCursor::new(2025, 3).unwrap()
        );
    }

    #[test]
    fn week_steps_are_seven_days() {
        assert_eq!(step_week(key("2025-12-30"), Step::Next), key("2026-01-06"));
        assert_eq!(step_week(key("2025-03-05"), Step::Previous), key("2025-02-26"));
    }

    #[test]
    fn swipe_needs_dominant_horizontal_drag() {
        assert_eq!(swipe_step(-80.0, 10.0), Some(Step::Next));
        assert_eq!(swipe_step(80.0, -10.0), Some(Step::Previous));
        assert_eq!(swipe_step(50.0, 0.0), Some(Step::Previous));
        assert_eq!(swipe_step(49.9, 0.0), None);
        assert_eq!(swipe_step(-60.0, 90.0), None);
        assert_eq!(swipe_step(f64::NAN, 0.0), None);
    }

    #[test]
    fn titles_read_naturally() {
        assert_eq!(MonthCursor::new(2025, 3).unwrap().title(), "March 2025");
        assert_eq!(week_title(key("2025-03-05")), "Mar 2 – Mar 8, 2025");
    }

    #[test]
    fn progress_is_capped() {
        assert_eq!(progress_percent(1500.0, 3000.0), 50.0);
        assert_eq!(progress_percent(4500.0, 3000.0), 100.0);
    }
}
