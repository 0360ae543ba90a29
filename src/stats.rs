use crate::aggregate::{aggregate, personal_best, total_for};
use crate::calendar::{day_detail, month_grid, progress_percent, week_grid, week_title, GridContext};
use crate::config::{DAILY_GOAL_ML, QUICK_ADD_PRESETS};
use crate::date_key::DateKey;
use crate::log_store::LogStore;
use crate::models::{CalendarResponse, StatsResponse, TodayResponse};
use crate::series::{average, trailing_days, MONTH_DAYS, WEEK_DAYS};
use crate::session::{CalendarView, Session};
use crate::streak::compute_streaks;
use chrono::TimeZone;

pub fn build_today_at<Tz: TimeZone>(log: &LogStore, tz: &Tz, today: DateKey) -> TodayResponse {
    let days = aggregate(log.all(), tz);
    let (total, entries) = days
        .get(&today)
        .map_or((0.0, Vec::new()), |bucket| (bucket.total, bucket.entries.clone()));

    TodayResponse {
        date: today.to_string(),
        total,
        goal: DAILY_GOAL_ML,
        progress_percent: progress_percent(total, DAILY_GOAL_ML),
        remaining: (DAILY_GOAL_ML - total).max(0.0),
        goal_met: total >= DAILY_GOAL_ML,
        presets: QUICK_ADD_PRESETS.to_vec(),
        entries,
    }
}

pub fn build_stats_at<Tz: TimeZone>(log: &LogStore, tz: &Tz, today: DateKey) -> StatsResponse {
    let days = aggregate(log.all(), tz);
    let last_7_days = trailing_days(log.all(), tz, today, WEEK_DAYS);
    let last_30_days = trailing_days(log.all(), tz, today, MONTH_DAYS);

    StatsResponse {
        today_total: total_for(&days, today),
        personal_best: personal_best(&days),
        week_average: average(&last_7_days),
        month_average: average(&last_30_days),
        last_7_days,
        last_30_days,
        streak: compute_streaks(&days, today),
    }
}

pub fn build_calendar_at<Tz: TimeZone>(
    log: &LogStore,
    session: &Session,
    tz: &Tz,
    today: DateKey,
) -> CalendarResponse {
    let days = aggregate(log.all(), tz);
    let streak = compute_streaks(&days, today);
    let ctx = GridContext {
        days: &days,
        streak: &streak,
        today,
        goal: DAILY_GOAL_ML,
    };

    let (title, cells) = match session.view {
        CalendarView::Month => (session.month.title(), month_grid(session.month, &ctx)),
        CalendarView::Week => (
            week_title(session.week_anchor),
            week_grid(session.week_anchor, &ctx),
        ),
    };

    CalendarResponse {
        view: session.view,
        title,
        selected: session.selected,
        cells,
        day: session
            .day_open
            .then(|| day_detail(&days, session.selected, today, DAILY_GOAL_ML)),
    }
}
