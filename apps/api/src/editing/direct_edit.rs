//! In-place editing of rendered text regions.
//!
//! A region tracks one leaf text field of the rendered view. Keystrokes only
//! change the region's own text; the model is touched once, on blur, through
//! the same `Set` patch the form uses.

use serde::Serialize;

use crate::editing::fields::read_text;
use crate::editing::patch::{FieldPath, Patch};
use crate::models::resume::ResumeDocument;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionState {
    /// Region text equals the last known model value.
    Clean,
    /// User is typing; the model has not been told.
    Dirty,
    /// Blur produced a patch that has not been applied yet.
    Committing,
}

#[derive(Debug, Clone)]
pub struct EditableRegion {
    path: FieldPath,
    known: String,
    text: String,
    state: RegionState,
}

impl EditableRegion {
    /// Binds a region to `path`. Returns `None` if the path does not resolve
    /// to a text field of `doc`.
    pub fn attach(doc: &ResumeDocument, path: FieldPath) -> Option<Self> {
        let known = read_text(doc, &path)?.to_string();
        Some(Self {
            path,
            text: known.clone(),
            known,
            state: RegionState::Clean,
        })
    }

    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn state(&self) -> RegionState {
        self.state
    }

    /// Replaces the region text as the user types.
    pub fn input(&mut self, text: impl Into<String>) {
        if self.state == RegionState::Committing {
            return;
        }
        self.text = text.into();
        self.state = RegionState::Dirty;
    }

    /// Commit point. Yields a patch only if the text differs from the last
    /// known model value.
    pub fn blur(&mut self) -> Option<Patch> {
        if self.state != RegionState::Dirty {
            return None;
        }
        if self.text == self.known {
            self.state = RegionState::Clean;
            return None;
        }
        self.state = RegionState::Committing;
        Some(Patch::set(self.path.clone(), self.text.clone()))
    }

    /// Called with the document produced by applying the blur patch.
    pub fn committed(&mut self, doc: &ResumeDocument) {
        self.state = RegionState::Clean;
        self.refresh(doc);
    }

    fn refresh(&mut self, doc: &ResumeDocument) {
        if let Some(value) = read_text(doc, &self.path) {
            self.known = value.to_string();
            self.text = self.known.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::apply::apply;
    use crate::editing::patch::{ExperienceField, PersonalField};
    use crate::models::bootstrap_document;

    fn name_path() -> FieldPath {
        FieldPath::Personal {
            field: PersonalField::FullName,
        }
    }

    #[test]
    fn test_typing_does_not_touch_model_until_blur() {
        let doc = bootstrap_document();
        let mut region = EditableRegion::attach(&doc, name_path()).unwrap();
        assert_eq!(region.state(), RegionState::Clean);

        region.input("Jordan A. Smith");
        assert_eq!(region.state(), RegionState::Dirty);
        assert_eq!(doc.personal_info.full_name, "Jordan Smith");

        let patch = region.blur().expect("changed text commits");
        assert_eq!(region.state(), RegionState::Committing);

        let next = apply(&doc, &patch);
        region.committed(&next);
        assert_eq!(region.state(), RegionState::Clean);
        assert_eq!(next.personal_info.full_name, "Jordan A. Smith");
        assert_eq!(region.text(), "Jordan A. Smith");
    }

    #[test]
    fn test_blur_with_unchanged_text_is_silent() {
        let doc = bootstrap_document();
        let mut region = EditableRegion::attach(&doc, name_path()).unwrap();
        region.input("Jordan Smit");
        region.input("Jordan Smith");
        assert!(region.blur().is_none());
        assert_eq!(region.state(), RegionState::Clean);
    }

    #[test]
    fn test_blur_on_clean_region_is_silent() {
        let doc = bootstrap_document();
        let mut region = EditableRegion::attach(&doc, name_path()).unwrap();
        assert!(region.blur().is_none());
    }

    #[test]
    fn test_attach_rejects_flag_and_missing_targets() {
        let doc = bootstrap_document();
        let flag = FieldPath::Experience {
            id: "1".into(),
            field: ExperienceField::Current,
        };
        assert!(EditableRegion::attach(&doc, flag).is_none());
        let missing = FieldPath::Experience {
            id: "404".into(),
            field: ExperienceField::Title,
        };
        assert!(EditableRegion::attach(&doc, missing).is_none());
    }
}
