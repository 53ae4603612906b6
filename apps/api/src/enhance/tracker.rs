//! Per-field busy tracking for enhancement calls.
//!
//! Owned by the HTTP layer (held in `AppState`), not by the gateway. A field
//! can have at most one call in flight; the pending flag is released by a
//! guard, so it clears on success, on fallback and on early return alike.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnhanceStatus {
    Idle,
    Pending,
    Done,
}

#[derive(Clone, Default)]
pub struct EnhancementTracker {
    fields: Arc<Mutex<HashMap<String, EnhanceStatus>>>,
}

impl EnhancementTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `field_id` pending. Returns `None` if a call for it is already
    /// outstanding.
    pub fn try_begin(&self, field_id: &str) -> Option<PendingGuard> {
        let mut fields = self.fields.lock().unwrap_or_else(PoisonError::into_inner);
        if fields.get(field_id) == Some(&EnhanceStatus::Pending) {
            return None;
        }
        fields.insert(field_id.to_string(), EnhanceStatus::Pending);
        Some(PendingGuard {
            tracker: self.clone(),
            field_id: field_id.to_string(),
        })
    }

    pub fn status(&self, field_id: &str) -> EnhanceStatus {
        self.fields
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(field_id)
            .copied()
            .unwrap_or(EnhanceStatus::Idle)
    }

    pub fn snapshot(&self) -> HashMap<String, EnhanceStatus> {
        self.fields
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn finish(&self, field_id: &str) {
        self.fields
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(field_id.to_string(), EnhanceStatus::Done);
    }
}

/// Holds a field's pending flag; dropping it marks the field done.
pub struct PendingGuard {
    tracker: EnhancementTracker,
    field_id: String,
}

impl PendingGuard {
    pub fn field_id(&self) -> &str {
        &self.field_id
    }
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        self.tracker.finish(&self.field_id);
    }
}
