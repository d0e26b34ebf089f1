//! Router construction

use crate::handlers;
use axum::{
    routing::{get, post},
    Router,
};
use signup_core::SubmissionStore;
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn SubmissionStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn SubmissionStore>) -> Self {
        Self { store }
    }
}

pub fn router(state: AppState, static_dir: Option<&Path>) -> Router {
    let mut app = Router::new()
        .route("/health", get(handlers::health))
        .nest("/api", api_routes());

    // SPA fallback - unknown paths serve index.html
    if let Some(dir) = static_dir {
        let index_path = dir.join("index.html");
        app = app.fallback_service(ServeDir::new(dir).fallback(ServeFile::new(index_path)));
    }

    app.layer(
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    )
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/contact", post(handlers::contact::create))
        .route("/contacts", get(handlers::contact::list))
        .route("/newsletter", post(handlers::newsletter::subscribe))
        .route("/newsletters", get(handlers::newsletter::list))
}
