pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::brief::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/", get(handlers::handle_form))
        .route("/generate", post(handlers::handle_generate))
        .route("/api/brief", get(handlers::handle_latest_brief))
        .route("/download", get(handlers::handle_download))
        .with_state(state)
}
