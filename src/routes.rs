use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;
use crate::state::AppState;

pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/llm", post(handlers::llm_endpoint))
        .route("/api/health", get(handlers::health_check))
}
