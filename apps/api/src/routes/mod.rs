pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::reports::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Reports API
        .route(
            "/api/v1/reports",
            post(handlers::handle_create_report).get(handlers::handle_list_reports),
        )
        .route("/api/v1/reports/:id", get(handlers::handle_get_report))
        .with_state(state)
}
