use crate::aggregate::aggregate;
use crate::date_key::DateKey;
use crate::errors::AppError;
use crate::history::group_by_day;
use crate::log_store::{parse_amount, parse_amount_value};
use crate::models::{
    AddForm, AddRequest, AddResponse, CalendarResponse, DeleteForm, DeleteRequest, DeleteState,
    HistoryDay, LogEntry, LogView, StatsResponse, StreakResult, TodayResponse,
};
use crate::session::{DeleteError, SessionAction};
use crate::state::{AppData, AppState};
use crate::stats::{build_calendar_at, build_stats_at, build_today_at};
use crate::storage::write_through;
use crate::streak::compute_streaks;
use crate::ui::render_index;
use axum::{
    body::Bytes,
    extract::State,
    response::{Html, Redirect},
    Form, Json,
};
use chrono::Local;
use tracing::{info, warn};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let today = state.today();
    let data = state.data.lock().await;
    let summary = build_today_at(&data.log, &Local, today);
    let streak = compute_streaks(&aggregate(data.log.all(), &Local), today);
    let pending = pending_entry(&data);
    Html(render_index(&summary, &streak, &data.log.views(), pending.as_ref()))
}

pub async fn get_today(State(state): State<AppState>) -> Json<TodayResponse> {
    let today = state.today();
    let data = state.data.lock().await;
    Json(build_today_at(&data.log, &Local, today))
}

pub async fn get_logs(State(state): State<AppState>) -> Json<Vec<LogView>> {
    let data = state.data.lock().await;
    Json(data.log.views())
}

pub async fn get_history(State(state): State<AppState>) -> Json<Vec<HistoryDay>> {
    let today = state.today();
    let data = state.data.lock().await;
    Json(group_by_day(&data.log, &Local, today))
}

pub async fn get_stats(State(state): State<AppState>) -> Json<StatsResponse> {
    let today = state.today();
    let data = state.data.lock().await;
    Json(build_stats_at(&data.log, &Local, today))
}

pub async fn get_streak(State(state): State<AppState>) -> Json<StreakResult> {
    let today = state.today();
    let data = state.data.lock().await;
    Json(compute_streaks(&aggregate(data.log.all(), &Local), today))
}

pub async fn get_calendar(State(state): State<AppState>) -> Json<CalendarResponse> {
    let today = state.today();
    let data = state.data.lock().await;
    Json(build_calendar_at(&data.log, &data.session, &Local, today))
}

pub async fn calendar_action(
    State(state): State<AppState>,
    Json(action): Json<SessionAction>,
) -> Json<CalendarResponse> {
    let today = state.today();
    let mut data = state.data.lock().await;
    data.session.apply(action, today);
    Json(build_calendar_at(&data.log, &data.session, &Local, today))
}

/// Takes the raw body so that anything other than `{"amount": ...}` is an
/// ignored add rather than an extractor rejection.
pub async fn add_log(State(state): State<AppState>, body: Bytes) -> Json<AddResponse> {
    Json(apply_add(&state, amount_from_body(&body)).await)
}

fn amount_from_body(body: &[u8]) -> Option<f64> {
    serde_json::from_slice::<AddRequest>(body)
        .ok()
        .and_then(|payload| parse_amount_value(payload.amount.as_ref()))
}

pub async fn add_log_form(State(state): State<AppState>, Form(form): Form<AddForm>) -> Redirect {
    apply_add(&state, parse_amount(&form.amount)).await;
    Redirect::to("/")
}

async fn apply_add(state: &AppState, amount: Option<f64>) -> AddResponse {
    let now = state.clock.now();
    let today = DateKey::of(&now, &Local);
    let mut data = state.data.lock().await;
    let AppData { log, session } = &mut *data;

    let entry = amount.and_then(|amount| log.add(amount, now));
    let persisted = match &entry {
        Some(entry) => {
            info!(id = entry.id, amount = entry.amount, "logged water");
            if let Some(id) = session.drop_stale_pending(log) {
                info!(id, "pending deletion no longer deletable");
            }
            write_through(state.store.as_ref(), log).await
        }
        None => {
            warn!("ignored add with invalid amount");
            true
        }
    };

    AddResponse {
        entry,
        persisted,
        today: build_today_at(log, &Local, today),
    }
}

pub async fn get_pending_delete(State(state): State<AppState>) -> Json<DeleteState> {
    let data = state.data.lock().await;
    Json(DeleteState {
        pending: pending_entry(&data),
        removed: None,
        persisted: true,
    })
}

pub async fn request_delete(
    State(state): State<AppState>,
    Json(payload): Json<DeleteRequest>,
) -> Result<Json<DeleteState>, AppError> {
    Ok(Json(apply_request_delete(&state, payload.id).await?))
}

pub async fn confirm_delete(State(state): State<AppState>) -> Result<Json<DeleteState>, AppError> {
    Ok(Json(apply_confirm_delete(&state).await?))
}

pub async fn cancel_delete(State(state): State<AppState>) -> Json<DeleteState> {
    Json(apply_cancel_delete(&state).await)
}

pub async fn request_delete_form(
    State(state): State<AppState>,
    Form(form): Form<DeleteForm>,
) -> Result<Redirect, AppError> {
    apply_request_delete(&state, form.id).await?;
    Ok(Redirect::to("/"))
}

pub async fn confirm_delete_form(State(state): State<AppState>) -> Result<Redirect, AppError> {
    match apply_confirm_delete(&state).await {
        Err(DeleteError::NotDeletable(id)) => warn!(id, "pending deletion is no longer deletable"),
        result => {
            result?;
        }
    }
    Ok(Redirect::to("/"))
}

pub async fn cancel_delete_form(State(state): State<AppState>) -> Redirect {
    apply_cancel_delete(&state).await;
    Redirect::to("/")
}

async fn apply_request_delete(state: &AppState, id: i64) -> Result<DeleteState, AppError> {
    let mut data = state.data.lock().await;
    let AppData { log, session } = &mut *data;
    let pending = session.request_delete(log, id)?.clone();

    Ok(DeleteState {
        pending: Some(pending),
        removed: None,
        persisted: true,
    })
}

async fn apply_confirm_delete(state: &AppState) -> Result<DeleteState, DeleteError> {
    let mut data = state.data.lock().await;
    let AppData { log, session } = &mut *data;
    let removed = session.confirm_delete(log)?;

    let persisted = match &removed {
        Some(entry) => {
            info!(id = entry.id, amount = entry.amount, "deleted log entry");
            write_through(state.store.as_ref(), log).await
        }
        None => true,
    };

    Ok(DeleteState {
        pending: None,
        removed,
        persisted,
    })
}

async fn apply_cancel_delete(state: &AppState) -> DeleteState {
    let mut data = state.data.lock().await;
    data.session.cancel_delete();
    DeleteState {
        pending: None,
        removed: None,
        persisted: true,
    }
}

fn pending_entry(data: &AppData) -> Option<LogEntry> {
    data.session
        .pending_delete
        .filter(|&id| data.log.is_deletable(id))
        .and_then(|id| data.log.get(id))
        .cloned()
}
