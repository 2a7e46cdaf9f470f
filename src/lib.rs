pub mod auth;
pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod state;

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use state::AppState;

/// Assemble the application router over an explicit state handle.
pub fn app(state: AppState) -> Router {
    Router::new()
        // Public service endpoints
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        // Drinks resource
        .merge(drinks_routes())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn drinks_routes() -> Router<AppState> {
    use axum::routing::patch;
    use handlers::drinks;

    Router::new()
        .route("/drinks", get(drinks::list).post(drinks::create))
        .route("/drinks-detail", get(drinks::list_detail))
        .route("/drinks/:id", patch(drinks::update).delete(drinks::delete))
}
