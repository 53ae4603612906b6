//! Patch vocabulary. Every mutation of the document, from the form or from the
//! rendered view, is expressed as one of these values.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::resume::{
    Certification, CustomSection, CustomSectionItem, Education, Experience, Project,
    ResumeDocument,
};
use crate::persistence::codec::{dedupe_ids, normalize_ids};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PersonalField {
    FullName,
    Email,
    Phone,
    Location,
    Website,
    Linkedin,
    JobTitle,
    Summary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExperienceField {
    Title,
    Company,
    StartDate,
    EndDate,
    Current,
    Description,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EducationField {
    School,
    Degree,
    GraduationDate,
    Description,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProjectField {
    Name,
    Link,
    Description,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CertificationField {
    Name,
    Issuer,
    Date,
    Link,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionItemField {
    Title,
    Subtitle,
    Date,
    Description,
}

/// Address of one scalar field in the document.
///
/// The `Display` form doubles as the field id used for enhancement busy
/// tracking and as the `data-field` attribute of rendered regions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "section", rename_all = "camelCase")]
pub enum FieldPath {
    Personal {
        field: PersonalField,
    },
    ThemeColor,
    Experience {
        id: String,
        field: ExperienceField,
    },
    Education {
        id: String,
        field: EducationField,
    },
    Project {
        id: String,
        field: ProjectField,
    },
    Certification {
        id: String,
        field: CertificationField,
    },
    /// Skills carry no id; the rendered view edits chips by position.
    Skill {
        index: usize,
    },
    SectionTitle {
        id: String,
    },
    SectionItem {
        #[serde(rename = "sectionId")]
        section_id: String,
        #[serde(rename = "itemId")]
        item_id: String,
        field: SectionItemField,
    },
}

fn wire_name<T: Serialize>(value: &T) -> String {
    serde_json::to_value(value)
        .ok()
        .and_then(|v| v.as_str().map(str::to_owned))
        .unwrap_or_default()
}

impl FieldPath {
    /// Free-text fields that text enhancement may rewrite: the summary and
    /// the description of an id-addressed entry.
    pub fn is_prose(&self) -> bool {
        matches!(
            self,
            FieldPath::Personal {
                field: PersonalField::Summary
            } | FieldPath::Experience {
                field: ExperienceField::Description,
                ..
            } | FieldPath::Education {
                field: EducationField::Description,
                ..
            } | FieldPath::Project {
                field: ProjectField::Description,
                ..
            } | FieldPath::SectionItem {
                field: SectionItemField::Description,
                ..
            }
        )
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldPath::Personal { field } => write!(f, "personalInfo.{}", wire_name(field)),
            FieldPath::ThemeColor => f.write_str("themeColor"),
            FieldPath::Experience { id, field } => {
                write!(f, "experience.{id}.{}", wire_name(field))
            }
            FieldPath::Education { id, field } => write!(f, "education.{id}.{}", wire_name(field)),
            FieldPath::Project { id, field } => write!(f, "projects.{id}.{}", wire_name(field)),
            FieldPath::Certification { id, field } => {
                write!(f, "certifications.{id}.{}", wire_name(field))
            }
            FieldPath::Skill { index } => write!(f, "skills.{index}"),
            FieldPath::SectionTitle { id } => write!(f, "customSections.{id}.title"),
            FieldPath::SectionItem {
                section_id,
                item_id,
                field,
            } => write!(
                f,
                "customSections.{section_id}.items.{item_id}.{}",
                wire_name(field)
            ),
        }
    }
}

/// New value for a scalar field. Only `current` on an experience is a flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Flag(bool),
    Text(String),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Flag(_) => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            FieldValue::Flag(b) => Some(*b),
            FieldValue::Text(_) => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Flag(b)
    }
}

/// An entity to insert. Experience, education, projects, certifications and
/// custom sections go to the head of their list; section items go to the tail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "collection", rename_all = "camelCase")]
pub enum NewItem {
    Experience {
        #[serde(default)]
        entry: Experience,
    },
    Education {
        #[serde(default)]
        entry: Education,
    },
    Project {
        #[serde(default)]
        entry: Project,
    },
    Certification {
        #[serde(default)]
        entry: Certification,
    },
    CustomSection {
        #[serde(default)]
        entry: CustomSection,
    },
    SectionItem {
        #[serde(rename = "sectionId")]
        section_id: String,
        #[serde(default)]
        entry: CustomSectionItem,
    },
}

impl NewItem {
    /// Id of the entity being inserted.
    pub fn id(&self) -> &str {
        match self {
            NewItem::Experience { entry } => &entry.id,
            NewItem::Education { entry } => &entry.id,
            NewItem::Project { entry } => &entry.id,
            NewItem::Certification { entry } => &entry.id,
            NewItem::CustomSection { entry } => &entry.id,
            NewItem::SectionItem { entry, .. } => &entry.id,
        }
    }

    fn id_mut(&mut self) -> &mut String {
        match self {
            NewItem::Experience { entry } => &mut entry.id,
            NewItem::Education { entry } => &mut entry.id,
            NewItem::Project { entry } => &mut entry.id,
            NewItem::Certification { entry } => &mut entry.id,
            NewItem::CustomSection { entry } => &mut entry.id,
            NewItem::SectionItem { entry, .. } => &mut entry.id,
        }
    }
}

/// Identity of an entity to remove.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "collection", rename_all = "camelCase")]
pub enum ItemRef {
    Experience {
        id: String,
    },
    Education {
        id: String,
    },
    Project {
        id: String,
    },
    Certification {
        id: String,
    },
    CustomSection {
        id: String,
    },
    SectionItem {
        #[serde(rename = "sectionId")]
        section_id: String,
        #[serde(rename = "itemId")]
        item_id: String,
    },
}

/// One targeted change to the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Patch {
    /// Replace one scalar field.
    Set { field: FieldPath, value: FieldValue },
    Insert { target: NewItem },
    Remove { target: ItemRef },
    /// Replace the skills list from its comma-delimited text form.
    SetSkillsText { text: String },
    /// Append suggested skills that are not already present.
    MergeSkills { suggested: Vec<String> },
    /// Swap in a whole new document. Built only by import, after the shape
    /// check; never accepted from a request body.
    #[serde(skip_deserializing)]
    Replace { document: Box<ResumeDocument> },
}

impl Patch {
    pub fn set(field: FieldPath, value: impl Into<FieldValue>) -> Self {
        Patch::Set {
            field,
            value: value.into(),
        }
    }

    /// Fills in fresh ids where the incoming value has blank or repeated ones.
    /// Ids are minted here, before `apply`, so that applying a patch stays pure.
    pub fn with_fresh_ids(mut self) -> Self {
        match &mut self {
            Patch::Insert { target } => {
                if target.id().trim().is_empty() {
                    *target.id_mut() = new_item_id();
                }
                if let NewItem::CustomSection { entry } = target {
                    dedupe_ids(entry.items.iter_mut().map(|i| &mut i.id));
                }
            }
            Patch::Replace { document } => normalize_ids(document),
            _ => {}
        }
        self
    }

    pub fn op_name(&self) -> &'static str {
        match self {
            Patch::Set { .. } => "set",
            Patch::Insert { .. } => "insert",
            Patch::Remove { .. } => "remove",
            Patch::SetSkillsText { .. } => "set_skills_text",
            Patch::MergeSkills { .. } => "merge_skills",
            Patch::Replace { .. } => "replace",
        }
    }
}

pub fn new_item_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_path_display_keys() {
        let path = FieldPath::Experience {
            id: "abc".into(),
            field: ExperienceField::StartDate,
        };
        assert_eq!(path.to_string(), "experience.abc.startDate");
        let path = FieldPath::Personal {
            field: PersonalField::FullName,
        };
        assert_eq!(path.to_string(), "personalInfo.fullName");
        let path = FieldPath::SectionItem {
            section_id: "s".into(),
            item_id: "i".into(),
            field: SectionItemField::Subtitle,
        };
        assert_eq!(path.to_string(), "customSections.s.items.i.subtitle");
    }

    #[test]
    fn test_set_patch_wire_format() {
        let json = r#"{
            "op": "set",
            "field": {"section": "experience", "id": "1", "field": "current"},
            "value": true
        }"#;
        let patch: Patch = serde_json::from_str(json).unwrap();
        assert_eq!(
            patch,
            Patch::set(
                FieldPath::Experience {
                    id: "1".into(),
                    field: ExperienceField::Current
                },
                true
            )
        );
    }

    #[test]
    fn test_insert_without_entry_decodes_blank() {
        let json = r#"{"op": "insert", "target": {"collection": "project"}}"#;
        let patch: Patch = serde_json::from_str(json).unwrap();
        match patch {
            Patch::Insert {
                target: NewItem::Project { entry },
            } => assert_eq!(entry, Project::default()),
            other => panic!("unexpected patch: {other:?}"),
        }
    }

    #[test]
    fn test_with_fresh_ids_mints_missing_ids_only() {
        let patch = Patch::Insert {
            target: NewItem::Education {
                entry: Education::default(),
            },
        }
        .with_fresh_ids();
        let Patch::Insert { target } = &patch else {
            panic!("expected insert");
        };
        assert!(!target.id().is_empty());

        let keep = Patch::Insert {
            target: NewItem::Education {
                entry: Education {
                    id: "mine".into(),
                    ..Default::default()
                },
            },
        }
        .with_fresh_ids();
        let Patch::Insert { target } = &keep else {
            panic!("expected insert");
        };
        assert_eq!(target.id(), "mine");
    }

    #[test]
    fn test_only_descriptions_and_summary_are_prose() {
        assert!(FieldPath::Personal {
            field: PersonalField::Summary
        }
        .is_prose());
        assert!(FieldPath::Experience {
            id: "1".into(),
            field: ExperienceField::Description
        }
        .is_prose());
        assert!(!FieldPath::Experience {
            id: "1".into(),
            field: ExperienceField::Title
        }
        .is_prose());
        assert!(!FieldPath::Skill { index: 0 }.is_prose());
        assert!(!FieldPath::ThemeColor.is_prose());
    }

    #[test]
    fn test_replace_is_not_accepted_from_json() {
        let json = r#"{"op": "replace", "document": {"personalInfo": {}, "experience": []}}"#;
        assert!(serde_json::from_str::<Patch>(json).is_err());
    }

    #[test]
    fn test_inserted_section_gets_unique_item_ids() {
        let item = |id: &str| CustomSectionItem {
            id: id.into(),
            ..Default::default()
        };
        let patch = Patch::Insert {
            target: NewItem::CustomSection {
                entry: CustomSection {
                    id: "s9".into(),
                    title: "Awards".into(),
                    items: vec![item("x"), item("x"), item(""), item("y")],
                },
            },
        }
        .with_fresh_ids();
        let Patch::Insert {
            target: NewItem::CustomSection { entry },
        } = &patch
        else {
            panic!("expected custom section insert");
        };
        let ids: Vec<&str> = entry.items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids[0], "x");
        assert_eq!(ids[3], "y");
        assert!(ids.iter().all(|id| !id.trim().is_empty()));
        let unique: std::collections::HashSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), ids.len());
    }

    #[test]
    fn test_section_item_ref_wire_format() {
        let json = r#"{"op": "remove", "target": {"collection": "sectionItem", "sectionId": "s1", "itemId": "i1"}}"#;
        let patch: Patch = serde_json::from_str(json).unwrap();
        assert_eq!(
            patch,
            Patch::Remove {
                target: ItemRef::SectionItem {
                    section_id: "s1".into(),
                    item_id: "i1".into()
                }
            }
        );
    }
}
