//! JSON encoding shared by the snapshot mirror and export/import.

use std::collections::HashSet;

use serde_json::Value;
use thiserror::Error;

use crate::editing::patch::new_item_id;
use crate::models::resume::ResumeDocument;

/// The snapshot slot held something that is not a document.
#[derive(Debug, Error)]
#[error("stored snapshot is not a valid document: {0}")]
pub struct RestoreError(#[from] serde_json::Error);

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("file is not valid JSON: {0}")]
    MalformedEncoding(String),

    #[error("file does not look like a resume: {0}")]
    UnrecognizedShape(String),
}

/// Compact encoding written to the snapshot slot.
pub fn encode_snapshot(doc: &ResumeDocument) -> Result<String, serde_json::Error> {
    serde_json::to_string(doc)
}

pub fn decode_snapshot(text: &str) -> Result<ResumeDocument, RestoreError> {
    let mut doc: ResumeDocument = serde_json::from_str(text)?;
    normalize_ids(&mut doc);
    Ok(doc)
}

/// Indented encoding offered as the export download.
pub fn encode_export(doc: &ResumeDocument) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(doc)
}

/// Parses an uploaded file. Only a value with a `personalInfo` object and an
/// `experience` array is accepted.
pub fn decode_import(bytes: &[u8]) -> Result<ResumeDocument, ImportError> {
    let value: Value = serde_json::from_slice(bytes)
        .map_err(|e| ImportError::MalformedEncoding(e.to_string()))?;

    if !value.get("personalInfo").is_some_and(Value::is_object) {
        return Err(ImportError::UnrecognizedShape(
            "missing 'personalInfo' object".to_string(),
        ));
    }
    if !value.get("experience").is_some_and(Value::is_array) {
        return Err(ImportError::UnrecognizedShape(
            "'experience' must be a list".to_string(),
        ));
    }

    let mut doc: ResumeDocument = serde_json::from_value(value)
        .map_err(|e| ImportError::UnrecognizedShape(e.to_string()))?;
    normalize_ids(&mut doc);
    Ok(doc)
}

/// Replaces every id that is blank or repeats an earlier one in the sequence.
pub(crate) fn dedupe_ids<'a>(ids: impl Iterator<Item = &'a mut String>) {
    let mut seen = HashSet::new();
    for id in ids {
        if id.trim().is_empty() || !seen.insert(id.clone()) {
            *id = new_item_id();
            seen.insert(id.clone());
        }
    }
}

/// Gives a fresh id to any item whose id is blank or repeats an earlier id in
/// the same collection. Documents with unique ids pass through untouched.
pub fn normalize_ids(doc: &mut ResumeDocument) {
    dedupe_ids(doc.experience.iter_mut().map(|e| &mut e.id));
    dedupe_ids(doc.education.iter_mut().map(|e| &mut e.id));
    dedupe_ids(doc.projects.iter_mut().map(|p| &mut p.id));
    dedupe_ids(doc.certifications.iter_mut().map(|c| &mut c.id));
    dedupe_ids(doc.custom_sections.iter_mut().map(|s| &mut s.id));
    for section in &mut doc.custom_sections {
        dedupe_ids(section.items.iter_mut().map(|i| &mut i.id));
    }
}

/// Download name for an export: `resume-<name>.json`, where every run of
/// characters that are not letters or digits becomes one underscore. A blank
/// name leaves the name segment empty.
pub fn export_file_name(full_name: &str) -> String {
    let mut slug = String::with_capacity(full_name.len());
    let mut pending_sep = false;
    for ch in full_name.trim().chars() {
        if ch.is_alphanumeric() {
            if pending_sep && !slug.is_empty() {
                slug.push('_');
            }
            pending_sep = false;
            slug.push(ch);
        } else {
            pending_sep = true;
        }
    }

    format!("resume-{slug}.json")
}
