use axum::{
    middleware,
    routing::{get, post},
    Router,
};

pub mod config;
pub mod dialogflow;
pub mod errors;
pub mod http;
pub mod logging;

pub fn build_app() -> Router {
    Router::new()
        .route("/health", get(http::handlers::health))
        .route("/webhook", post(http::handlers::webhook))
        .layer(middleware::from_fn(logging::request_logging_middleware))
}
