use crate::date_key::DateKey;
use crate::session::CalendarView;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One logged drink. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: i64,
    pub amount: f64,
    #[serde(with = "iso_millis")]
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DailyBucket {
    pub total: f64,
    /// Sorted ascending by timestamp.
    pub entries: Vec<LogEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct StreakResult {
    pub current: u32,
    pub current_days: BTreeSet<DateKey>,
    pub longest: u32,
    pub longest_days: BTreeSet<DateKey>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarCell {
    pub date_key: DateKey,
    pub date: NaiveDate,
    /// Only set on month grids.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_month: Option<bool>,
    pub total: f64,
    pub is_today: bool,
    pub is_streak: bool,
    pub is_logged: bool,
    pub is_goal: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub label: String,
    pub amount: f64,
    pub date: DateKey,
}

#[derive(Debug, Clone, Serialize)]
pub struct LogView {
    #[serde(flatten)]
    pub entry: LogEntry,
    pub deletable: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoryDay {
    pub date: DateKey,
    pub label: String,
    pub is_today: bool,
    pub total: f64,
    pub entries: Vec<LogView>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TodayResponse {
    pub date: String,
    pub total: f64,
    pub goal: f64,
    pub progress_percent: f64,
    pub remaining: f64,
    pub goal_met: bool,
    pub presets: Vec<u32>,
    pub entries: Vec<LogEntry>,
}

#[derive(Debug, Serialize)]
pub struct AddResponse {
    pub entry: Option<LogEntry>,
    pub persisted: bool,
    pub today: TodayResponse,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub today_total: f64,
    pub personal_best: f64,
    pub week_average: u64,
    pub month_average: u64,
    pub last_7_days: Vec<SeriesPoint>,
    pub last_30_days: Vec<SeriesPoint>,
    pub streak: StreakResult,
}

#[derive(Debug, Serialize)]
pub struct DayDetail {
    pub date: DateKey,
    pub label: String,
    pub total: f64,
    pub goal_met: bool,
    pub progress_percent: f64,
    pub entries: Vec<LogEntry>,
}

#[derive(Debug, Serialize)]
pub struct CalendarResponse {
    pub view: CalendarView,
    pub title: String,
    pub selected: DateKey,
    pub cells: Vec<CalendarCell>,
    pub day: Option<DayDetail>,
}

#[derive(Debug, Serialize)]
pub struct DeleteState {
    pub pending: Option<LogEntry>,
    pub removed: Option<LogEntry>,
    pub persisted: bool,
}

#[derive(Debug, Deserialize)]
pub struct AddRequest {
    #[serde(default)]
    pub amount: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteRequest {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
pub struct AddForm {
    #[serde(default)]
    pub amount: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteForm {
    pub id: i64,
}

mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|parsed| parsed.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
