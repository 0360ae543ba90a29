use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/log/add", post(handlers::add_log_form))
        .route("/log/delete/request", post(handlers::request_delete_form))
        .route("/log/delete/confirm", post(handlers::confirm_delete_form))
        .route("/log/delete/cancel", post(handlers::cancel_delete_form))
        .route("/api/today", get(handlers::get_today))
        .route("/api/logs", get(handlers::get_logs).post(handlers::add_log))
        .route("/api/history", get(handlers::get_history))
        .route("/api/stats", get(handlers::get_stats))
        .route("/api/streak", get(handlers::get_streak))
        .route("/api/calendar", get(handlers::get_calendar).post(handlers::calendar_action))
        .route("/api/delete", get(handlers::get_pending_delete))
        .route("/api/delete/request", post(handlers::request_delete))
        .route("/api/delete/confirm", post(handlers::confirm_delete))
        .route("/api/delete/cancel", post(handlers::cancel_delete))
        .with_state(state)
}
