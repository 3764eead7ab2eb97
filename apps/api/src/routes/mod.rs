pub mod health;
pub mod upload;

use std::any::Any;

use axum::{
    extract::DefaultBodyLimit,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tower_http::catch_panic::CatchPanicLayer;

use crate::errors::{panic_message, AppError};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/upload",
            post(upload::handle_upload).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .with_state(state)
        .layer(CatchPanicLayer::custom(handle_panic))
}

/// Outermost boundary: a panic anywhere in a handler becomes a 500 `{"error": ...}`.
fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    AppError::Internal(panic_message(&*payload).to_string()).into_response()
}
