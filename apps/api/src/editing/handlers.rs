use axum::{extract::State, response::Html, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

use crate::editing::direct_edit::{EditableRegion, RegionState};
use crate::editing::patch::{FieldPath, Patch};
use crate::editing::skills::join_skills_text;
use crate::editing::store::Revision;
use crate::errors::AppError;
use crate::models::resume::{is_palette_color, THEME_PALETTE};
use crate::preview::render_preview;
use crate::state::AppState;

/// GET /api/v1/resume
pub async fn handle_get_resume(State(state): State<AppState>) -> Json<Revision> {
    Json(state.store.current())
}

/// PATCH /api/v1/resume
/// Form surface: one structured edit per request.
pub async fn handle_patch_resume(
    State(state): State<AppState>,
    Json(patch): Json<Patch>,
) -> Json<Revision> {
    Json(state.store.apply(patch).await)
}

#[derive(Debug, Deserialize)]
pub struct RegionCommit {
    pub field: FieldPath,
    pub text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionCommitResponse {
    pub field_id: String,
    pub committed: bool,
    pub state: RegionState,
    /// Region text after the commit, re-derived from the model.
    pub text: String,
    #[serde(flatten)]
    pub revision: Revision,
}

/// POST /api/v1/resume/regions/commit
/// Rendered-view surface: the text a region held when it lost focus.
pub async fn handle_commit_region(
    State(state): State<AppState>,
    Json(req): Json<RegionCommit>,
) -> Result<Json<RegionCommitResponse>, AppError> {
    let field_id = req.field.to_string();
    let current = state.store.current();
    let mut region = EditableRegion::attach(&current.document, req.field)
        .ok_or_else(|| AppError::NotFound(format!("No editable text at '{field_id}'")))?;

    region.input(req.text);
    let (committed, revision) = match region.blur() {
        Some(patch) => {
            let revision = state.store.apply(patch).await;
            region.committed(&revision.document);
            info!("Committed direct edit of {}", region.path());
            (true, revision)
        }
        None => (false, current),
    };

    Ok(Json(RegionCommitResponse {
        field_id,
        committed,
        state: region.state(),
        text: region.text().to_string(),
        revision,
    }))
}

/// GET /api/v1/resume/skills-text
pub async fn handle_skills_text(State(state): State<AppState>) -> Json<Value> {
    let doc = state.store.document();
    Json(json!({ "text": join_skills_text(&doc.skills) }))
}

/// GET /api/v1/resume/preview
pub async fn handle_preview(State(state): State<AppState>) -> Html<String> {
    Html(render_preview(&state.store.document()))
}

/// GET /api/v1/theme/palette
/// The picker colours plus the document's current colour, which may be a
/// custom value outside the palette.
pub async fn handle_palette(State(state): State<AppState>) -> Json<Value> {
    let active = state.store.document().theme_color.clone();
    Json(json!({
        "colors": THEME_PALETTE,
        "active": active,
        "activeInPalette": is_palette_color(&active),
    }))
}
