use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::editing::fields::{find, read_text};
use crate::editing::patch::{FieldPath, Patch, PersonalField};
use crate::editing::store::Revision;
use crate::enhance::tracker::{EnhanceStatus, PendingGuard};
use crate::errors::AppError;
use crate::models::resume::ResumeDocument;
use crate::state::AppState;

const SUMMARY_FIELD_ID: &str = "personalInfo.summary";
const SKILLS_FIELD_ID: &str = "skills";

#[derive(Debug, Deserialize)]
pub struct EnhanceFieldRequest {
    pub field: FieldPath,
    /// Overrides the context derived from the document.
    pub context: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhanceResponse {
    pub field_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested: Option<Vec<String>>,
    #[serde(flatten)]
    pub revision: Revision,
}

fn begin(state: &AppState, field_id: &str) -> Result<PendingGuard, AppError> {
    state.tracker.try_begin(field_id).ok_or_else(|| {
        AppError::Conflict(format!("An enhancement for '{field_id}' is already running"))
    })
}

/// Context passed along with a field's text: the role title for experience
/// entries, a generic label for projects, the job title otherwise.
fn default_context(doc: &ResumeDocument, field: &FieldPath) -> String {
    match field {
        FieldPath::Experience { id, .. } => find(&doc.experience, id)
            .map(|e| e.title.clone())
            .unwrap_or_default(),
        FieldPath::Project { .. } => "Tech Project".to_string(),
        _ => doc.personal_info.job_title.clone(),
    }
}

/// POST /api/v1/resume/enhance/field
/// Only prose fields (summary and descriptions) can be enhanced; results for
/// an entry removed mid-call are dropped by id.
pub async fn handle_enhance_field(
    State(state): State<AppState>,
    Json(req): Json<EnhanceFieldRequest>,
) -> Result<Json<EnhanceResponse>, AppError> {
    let field_id = req.field.to_string();
    if !req.field.is_prose() {
        return Err(AppError::Validation(format!(
            "'{field_id}' is not a summary or description field"
        )));
    }
    let doc = state.store.document();
    let original = read_text(&doc, &req.field)
        .ok_or_else(|| AppError::NotFound(format!("No text field at '{field_id}'")))?
        .to_string();
    let context = req
        .context
        .unwrap_or_else(|| default_context(&doc, &req.field));

    let guard = begin(&state, &field_id)?;
    debug!("Enhancing {} with context '{context}'", guard.field_id());
    let enhanced = state.gateway.enhance_text(&original, &context).await;
    drop(guard);

    // The entity may have been removed while the call was out; apply then
    // resolves to a no-op.
    let revision = state.store.apply(Patch::set(req.field, enhanced)).await;
    info!("Enhanced {field_id}");
    Ok(Json(EnhanceResponse {
        field_id,
        suggested: None,
        revision,
    }))
}

/// POST /api/v1/resume/enhance/summary
pub async fn handle_generate_summary(
    State(state): State<AppState>,
) -> Result<Json<EnhanceResponse>, AppError> {
    let guard = begin(&state, SUMMARY_FIELD_ID)?;
    let doc = state.store.document();
    let summary = state.gateway.generate_summary(&doc).await;
    drop(guard);

    let revision = if summary.is_empty() {
        state.store.current()
    } else {
        let path = FieldPath::Personal {
            field: PersonalField::Summary,
        };
        state.store.apply(Patch::set(path, summary)).await
    };
    Ok(Json(EnhanceResponse {
        field_id: SUMMARY_FIELD_ID.to_string(),
        suggested: None,
        revision,
    }))
}

/// POST /api/v1/resume/enhance/skills
/// Suggests skills for the current job title and merges the new ones in.
pub async fn handle_suggest_skills(
    State(state): State<AppState>,
) -> Result<Json<EnhanceResponse>, AppError> {
    let guard = begin(&state, SKILLS_FIELD_ID)?;
    let job_title = state.store.document().personal_info.job_title.clone();
    let suggested = state.gateway.suggest_skills(&job_title).await;
    drop(guard);

    let revision = if suggested.is_empty() {
        state.store.current()
    } else {
        state
            .store
            .apply(Patch::MergeSkills {
                suggested: suggested.clone(),
            })
            .await
    };
    Ok(Json(EnhanceResponse {
        field_id: SKILLS_FIELD_ID.to_string(),
        suggested: Some(suggested),
        revision,
    }))
}

#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    pub field: Option<String>,
}

/// GET /api/v1/resume/enhance/status[?field=<id>]
/// The whole busy map, or a single entry when `field` is given.
pub async fn handle_enhance_status(
    State(state): State<AppState>,
    Query(query): Query<StatusQuery>,
) -> Json<HashMap<String, EnhanceStatus>> {
    match query.field {
        Some(field) => {
            let status = state.tracker.status(&field);
            Json(HashMap::from([(field, status)]))
        }
        None => Json(state.tracker.snapshot()),
    }
}
