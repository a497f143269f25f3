pub mod dtos;
pub mod handlers;

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{app_state::AppState, health};

/// Origins allowed for browser access during local development.
const ALLOWED_ORIGINS: [&str; 4] = [
    "http://localhost:3000",
    "http://127.0.0.1:3000",
    "http://localhost:5173",
    "http://127.0.0.1:5173",
];

pub fn router(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = ALLOWED_ORIGINS
        .iter()
        .map(|origin| origin.parse().expect("valid origin header"))
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/", get(health::home))
        .route("/health", get(health::health_check))
        .route("/analyze", post(handlers::analyze))
        .route("/news", get(handlers::news))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
