use axum::{
    Router,
    routing::{delete, get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers::{
    AppState, close_session, get_calendar, list_rooms, open_session, refresh_session,
    select_date, submit_booking,
};

/// Creates the API router with all booking endpoints
///
/// Query endpoints:
/// - GET /rooms - List rooms
/// - GET /booking-sessions/:id/calendar - Calendar month for a session
///
/// Command endpoints:
/// - POST /booking-sessions - Open a booking session
/// - POST /booking-sessions/:id/select - Select a date
/// - POST /booking-sessions/:id/refresh - Refetch reserved periods
/// - POST /booking-sessions/:id/submit - Submit the booking
/// - DELETE /booking-sessions/:id - Close the session
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check endpoint
        .route("/health", get(health_check))
        .route("/rooms", get(list_rooms))
        .route("/booking-sessions", post(open_session))
        .route("/booking-sessions/:id", delete(close_session))
        .route("/booking-sessions/:id/calendar", get(get_calendar))
        .route("/booking-sessions/:id/select", post(select_date))
        .route("/booking-sessions/:id/refresh", post(refresh_session))
        .route("/booking-sessions/:id/submit", post(submit_booking))
        // Add tracing middleware
        .layer(TraceLayer::new_for_http())
        // Add application state
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
