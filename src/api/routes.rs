use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::api::{handlers, state::AppState};

pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Quote endpoint
        .route("/v1/advance-quote", post(handlers::advance_quote))
        // Liveness probe
        .route("/health", get(handlers::health))
        // Add state and CORS
        .with_state(state)
        .layer(cors)
}
