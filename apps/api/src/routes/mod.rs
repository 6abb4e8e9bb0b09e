pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::listing::handlers as listing;
use crate::project::handlers as projects;
use crate::proposal::handlers as proposals;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health::health_handler))
        // Generation and extraction
        .route("/api/generate-proposal", post(proposals::handle_generate))
        .route("/api/extract-project-data", post(listing::handle_extract))
        // Proposal history
        .route("/api/proposals", get(proposals::handle_list))
        .route("/api/proposals/stats", get(proposals::handle_stats))
        .route("/api/proposals/export", get(proposals::handle_export))
        .route("/api/proposals/import", post(proposals::handle_import))
        .route(
            "/api/proposals/:id",
            get(proposals::handle_get).delete(proposals::handle_delete),
        )
        // Portfolio projects
        .route(
            "/api/projects",
            get(projects::handle_list).post(projects::handle_create),
        )
        .route(
            "/api/projects/:id",
            get(projects::handle_get).delete(projects::handle_delete),
        )
        .with_state(state)
}
