//! HTTP surface for the study assistant. All feature traffic goes through
//! this one backend-owned boundary; clients never talk to the completion
//! service or the store directly.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, patch, post};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod auth;
pub mod error;
pub mod handlers;
pub mod state;
pub mod upload;

pub use state::AppState;

/// Upload body limit: lecture PDFs are rarely this big.
pub const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/api/profile",
            get(handlers::profile::get_one).put(handlers::profile::update),
        )
        .route(
            "/api/notes",
            post(handlers::notes::create).get(handlers::notes::list),
        )
        .route(
            "/api/notes/{id}",
            get(handlers::notes::get_one)
                .patch(handlers::notes::update)
                .delete(handlers::notes::delete),
        )
        .route(
            "/api/quizzes",
            post(handlers::quizzes::create).get(handlers::quizzes::list),
        )
        .route(
            "/api/quizzes/{id}",
            get(handlers::quizzes::get_one).delete(handlers::quizzes::delete),
        )
        .route("/api/quizzes/{id}/complete", post(handlers::quizzes::complete))
        .route(
            "/api/papers",
            post(handlers::papers::create).get(handlers::papers::list),
        )
        .route(
            "/api/papers/{id}",
            get(handlers::papers::get_one).delete(handlers::papers::delete),
        )
        .route(
            "/api/plans",
            post(handlers::plans::create).get(handlers::plans::list),
        )
        .route("/api/plans/{id}", axum::routing::delete(handlers::plans::delete))
        .route("/api/plans/{id}/tasks", get(handlers::plans::tasks))
        .route("/api/tasks/{id}", patch(handlers::plans::update_task))
        .route(
            "/api/chat",
            post(handlers::chat::send).get(handlers::chat::list),
        )
        .route(
            "/api/chat/{id}",
            get(handlers::chat::get_one).delete(handlers::chat::delete),
        )
        .layer(axum::extract::DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
