pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::editing::handlers as editing;
use crate::enhance::handlers as enhance;
use crate::persistence::handlers as persistence;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Document + form/rendered-view edits
        .route(
            "/api/v1/resume",
            get(editing::handle_get_resume).patch(editing::handle_patch_resume),
        )
        .route(
            "/api/v1/resume/regions/commit",
            post(editing::handle_commit_region),
        )
        .route("/api/v1/resume/skills-text", get(editing::handle_skills_text))
        .route("/api/v1/resume/preview", get(editing::handle_preview))
        // Export / import
        .route("/api/v1/resume/export", get(persistence::handle_export))
        .route("/api/v1/resume/import", post(persistence::handle_import))
        // Enhancement
        .route(
            "/api/v1/resume/enhance/field",
            post(enhance::handle_enhance_field),
        )
        .route(
            "/api/v1/resume/enhance/summary",
            post(enhance::handle_generate_summary),
        )
        .route(
            "/api/v1/resume/enhance/skills",
            post(enhance::handle_suggest_skills),
        )
        .route(
            "/api/v1/resume/enhance/status",
            get(enhance::handle_enhance_status),
        )
        .route("/api/v1/theme/palette", get(editing::handle_palette))
        .with_state(state)
}
