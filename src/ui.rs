use crate::models::{LogEntry, LogView, StreakResult, TodayResponse};
use chrono::Local;
use std::fmt::Write;

const RECENT_LIMIT: usize = 10;

pub fn render_index(
    summary: &TodayResponse,
    streak: &StreakResult,
    logs: &[LogView],
    pending: Option<&LogEntry>,
) -> String {
    INDEX_HTML
        .replace("{{DATE}}", &summary.date)
        .replace("{{TOTAL}}", &format_ml(summary.total))
        .replace("{{GOAL}}", &format_ml(summary.goal))
        .replace("{{REMAINING}}", &format_ml(summary.remaining))
        .replace("{{PROGRESS}}", &format!("{:.0}", summary.progress_percent))
        .replace("{{STREAK}}", &streak.current.to_string())
        .replace("{{LONGEST}}", &streak.longest.to_string())
        .replace("{{PRESETS}}", &render_presets(&summary.presets))
        .replace("{{LOGS}}", &render_logs(logs))
        .replace("{{CONFIRM}}", &pending.map(render_confirm).unwrap_or_default())
}

/// Whole amounts print without a fraction.
pub fn format_ml(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{amount:.0}")
    } else {
        format!("{amount:.1}")
    }
}

fn render_presets(presets: &[u32]) -> String {
    let mut html = String::new();
    for preset in presets {
        let _ = write!(
            html,
            r#"<form method="post" action="/log/add"><input type="hidden" name="amount" value="{preset}" /><button class="preset" type="submit">+{preset} ml</button></form>"#
        );
    }
    html
}

fn render_logs(logs: &[LogView]) -> String {
    if logs.is_empty() {
        return r#"<li class="empty">No water logged yet.</li>"#.to_string();
    }

    let mut html = String::new();
    for view in logs.iter().take(RECENT_LIMIT) {
        let time = view
            .entry
            .timestamp
            .with_timezone(&Local)
            .format("%b %-d, %-I:%M %p");
        let _ = write!(
            html,
            r#"<li><span class="amount">{} ml</span><span class="time">{time}</span>"#,
            format_ml(view.entry.amount)
        );
        if view.deletable {
            let _ = write!(
                html,
                r#"<form method="post" action="/log/delete/request"><input type="hidden" name="id" value="{}" /><button class="delete" type="submit">Delete</button></form>"#,
                view.entry.id
            );
        }
        html.push_str("</li>");
    }
    html
}

fn render_confirm(entry: &LogEntry) -> String {
    format!(
        r#"<div class="confirm" role="dialog" aria-modal="true">
      <p>Delete the {} ml entry?</p>
      <form method="post" action="/log/delete/confirm"><button class="danger" type="submit">Delete</button></form>
      <form id="cancel-form" method="post" action="/log/delete/cancel"><button type="submit">Cancel</button></form>
    </div>"#,
        format_ml(entry.amount)
    )
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Water Log</title>
  <style>
    :root {
      --bg: #eef7fb;
      --ink: #1f2d3a;
      --accent: #2b8fd6;
      --goal: #2f9e61;
      --card: #ffffff;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: linear-gradient(135deg, var(--bg), #e3f4f7);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 24px 16px;
    }

    .app {
      width: min(640px, 100%);
      background: var(--card);
      border-radius: 20px;
      box-shadow: 0 18px 40px rgba(31, 45, 58, 0.12);
      padding: 28px;
      display: grid;
      gap: 20px;
    }

    .progress {
      height: 14px;
      border-radius: 7px;
      background: #dbe9f2;
      overflow: hidden;
    }

    .progress span {
      display: block;
      height: 100%;
      background: var(--accent);
    }

    .stats, .presets, .custom {
      display: flex;
      flex-wrap: wrap;
      gap: 12px;
    }

    .stat {
      flex: 1;
      display: grid;
      gap: 4px;
    }

    .label {
      font-size: 0.8rem;
      text-transform: uppercase;
      opacity: 0.7;
    }

    .value {
      font-size: 1.6rem;
      font-weight: 600;
    }

    button {
      border: none;
      border-radius: 10px;
      padding: 10px 16px;
      cursor: pointer;
      background: #dbe9f2;
      color: var(--ink);
    }

    .preset, .custom button {
      background: var(--accent);
      color: #fff;
    }

    .danger, .delete {
      background: #e5534b;
      color: #fff;
    }

    ul {
      list-style: none;
      padding: 0;
      margin: 0;
      display: grid;
      gap: 8px;
    }

    li {
      display: flex;
      align-items: center;
      gap: 12px;
    }

    li .time {
      flex: 1;
      opacity: 0.7;
    }

    .confirm {
      border: 1px solid #e5534b;
      border-radius: 12px;
      padding: 12px 16px;
      display: flex;
      align-items: center;
      gap: 12px;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Water Log</h1>
      <p class="label">{{DATE}}</p>
    </header>

    <section class="stats">
      <div class="stat">
        <span class="label">Today</span>
        <span class="value">{{TOTAL}} / {{GOAL}} ml</span>
      </div>
      <div class="stat">
        <span class="label">Remaining</span>
        <span class="value">{{REMAINING}} ml</span>
      </div>
      <div class="stat">
        <span class="label">Streak</span>
        <span class="value">{{STREAK}} days</span>
      </div>
      <div class="stat">
        <span class="label">Best streak</span>
        <span class="value">{{LONGEST}} days</span>
      </div>
    </section>

    <div class="progress" aria-label="Progress toward daily goal"><span style="width: {{PROGRESS}}%"></span></div>

    <section class="presets">{{PRESETS}}</section>

    <form class="custom" method="post" action="/log/add">
      <input name="amount" type="number" min="1" step="any" placeholder="Amount in ml" />
      <button type="submit">Log</button>
    </form>

    {{CONFIRM}}

    <section>
      <h2>Recent</h2>
      <ul>{{LOGS}}</ul>
    </section>
  </main>

  <script>
    const cancelForm = document.getElementById('cancel-form');
    if (cancelForm) {
      window.addEventListener('keydown', (event) => {
        if (event.key === 'Escape') {
          cancelForm.submit();
        }
      });
    }
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn entry(id: i64, amount: f64) -> LogEntry {
        LogEntry {
            id,
            amount,
            timestamp: "2025-03-05T08:00:00Z".parse::<DateTime<Utc>>().unwrap(),
        }
    }

    fn summary(total: f64) -> TodayResponse {
        TodayResponse {
            date: "2025-03-05".to_string(),
            total,
            goal: 3000.0,
            progress_percent: total / 30.0,
            remaining: 3000.0 - total,
            goal_met: false,
            presets: vec![250, 350, 500],
            entries: Vec::new(),
        }
    }

    #[test]
    fn formats_amounts_compactly() {
        assert_eq!(format_ml(250.0), "250");
        assert_eq!(format_ml(12.5), "12.5");
    }

    #[test]
    fn renders_totals_presets_and_delete_controls() {
        let logs = vec![
            LogView { entry: entry(2, 500.0), deletable: true },
            LogView { entry: entry(1, 250.0), deletable: false },
        ];
        let html = render_index(&summary(750.0), &StreakResult::default(), &logs, None);

        assert!(html.contains("750 / 3000 ml"));
        assert!(html.contains(r#"value="350""#));
        assert_eq!(html.matches("/log/delete/request").count(), 1);
        assert!(!html.contains("{{"));
        assert!(!html.contains("/log/delete/confirm"));
    }

    #[test]
    fn renders_confirmation_for_pending_delete() {
        let pending = entry(2, 500.0);
        let html = render_index(&summary(500.0), &StreakResult::default(), &[], Some(&pending));

        assert!(html.contains("Delete the 500 ml entry?"));
        assert!(html.contains("/log/delete/confirm"));
        assert!(html.contains("No water logged yet."));
    }
}
