//! Per-user view state: which calendar page is showing, which day is selected,
//! and any deletion waiting for confirmation. Changed only through
//! [`SessionAction`] dispatch and the deletion methods.

use crate::calendar::{step_week, swipe_step, MonthCursor, Step};
use crate::date_key::DateKey;
use crate::log_store::LogStore;
use crate::models::LogEntry;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarView {
    #[default]
    Month,
    Week,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum SessionAction {
    SetView { view: CalendarView },
    Next,
    Previous,
    Swipe { dx: f64, dy: f64 },
    Today,
    Select { date: DateKey },
    CloseDay,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeleteError {
    #[error("no entry with id {0}")]
    NotFound(i64),
    #[error("entry {0} is too old to delete")]
    NotDeletable(i64),
    #[error("no deletion is pending")]
    NothingPending,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub view: CalendarView,
    pub month: MonthCursor,
    pub week_anchor: DateKey,
    pub selected: DateKey,
    pub day_open: bool,
    pub pending_delete: Option<i64>,
}

impl Session {
    pub fn new(today: DateKey) -> Self {
        Self {
            view: CalendarView::Month,
            month: MonthCursor::containing(today.date()),
            week_anchor: today,
            selected: today,
            day_open: false,
            pending_delete: None,
        }
    }

    pub fn apply(&mut self, action: SessionAction, today: DateKey) {
        match action {
            SessionAction::SetView { view } => self.view = view,
            SessionAction::Next => self.navigate(Step::Next),
            SessionAction::Previous => self.navigate(Step::Previous),
            SessionAction::Swipe { dx, dy } => {
                if let Some(step) = swipe_step(dx, dy) {
                    self.navigate(step);
                }
            }
            SessionAction::Today => {
                self.month = MonthCursor::containing(today.date());
                self.week_anchor = today;
                self.selected = today;
            }
            SessionAction::Select { date } => {
                self.selected = date;
                self.week_anchor = date;
                self.month = MonthCursor::containing(date.date());
                self.day_open = true;
            }
            SessionAction::CloseDay => self.day_open = false,
        }
    }

    fn navigate(&mut self, step: Step) {
        match self.view {
            CalendarView::Month => self.month = self.month.step(step),
            CalendarView::Week => self.week_anchor = step_week(self.week_anchor, step),
        }
    }

    /// First half of a deletion: remember the entry until it is confirmed or
    /// cancelled.
    pub fn request_delete<'a>(
        &mut self,
        log: &'a LogStore,
        id: i64,
    ) -> Result<&'a LogEntry, DeleteError> {
        let entry = log.get(id).ok_or(DeleteError::NotFound(id))?;
        if !log.is_deletable(id) {
            return Err(DeleteError::NotDeletable(id));
        }
        self.pending_delete = Some(id);
        Ok(entry)
    }

    pub fn cancel_delete(&mut self) -> Option<i64> {
        self.pending_delete.take()
    }

    /// Forgets the pending deletion once its entry has left the deletable
    /// window or the log altogether.
    pub fn drop_stale_pending(&mut self, log: &LogStore) -> Option<i64> {
        match self.pending_delete {
            Some(id) if !log.is_deletable(id) => self.pending_delete.take(),
            _ => None,
        }
    }

    /// Removes the pending entry. The eligibility rule is checked again because
    /// newer entries may have been added since the request.
    pub fn confirm_delete(&mut self, log: &mut LogStore) -> Result<Option<LogEntry>, DeleteError> {
        let id = self.pending_delete.take().ok_or(DeleteError::NothingPending)?;
        if log.get(id).is_none() {
            return Ok(None);
        }
        if !log.is_deletable(id) {
            return Err(DeleteError::NotDeletable(id));
        }
        Ok(log.remove(id))
    }
}
