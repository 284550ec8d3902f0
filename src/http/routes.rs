use super::handlers;
use super::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Recognition control
        .route("/session/toggle", post(handlers::toggle_session))
        .route("/session/language", post(handlers::change_language))
        // Session queries
        .route("/session/status", get(handlers::session_status))
        .route("/session/transcript", get(handlers::session_transcript))
        // Text-quality checks
        .route("/evaluate", post(handlers::evaluate))
        // Punctuation proxy
        .route("/punctuate", post(handlers::punctuate))
        // Request logging, plus CORS for the browser client
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
