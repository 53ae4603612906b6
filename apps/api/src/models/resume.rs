use serde::{Deserialize, Serialize};

/// Colours offered by the theme picker. Any other colour string is still
/// storable; the palette only drives the UI affordance.
pub const THEME_PALETTE: &[&str] = &[
    "#4f46e5", // Indigo
    "#0891b2", // Cyan
    "#059669", // Emerald
    "#db2777", // Pink
    "#dc2626", // Red
    "#2563eb", // Blue
    "#111827", // Gray-900
];

pub const DEFAULT_THEME_COLOR: &str = "#4f46e5";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersonalInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub website: String,
    pub linkedin: String,
    pub job_title: String,
    pub summary: String,
}

/// A single role. `end_date` is kept even while `current` is set so that
/// clearing the flag brings the old value back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Experience {
    pub id: String,
    pub title: String,
    pub company: String,
    pub start_date: String,
    pub end_date: String,
    pub current: bool,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Education {
    pub id: String,
    pub school: String,
    pub degree: String,
    pub graduation_date: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub link: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Certification {
    pub id: String,
    pub name: String,
    pub issuer: String,
    pub date: String,
    pub link: String,
}

/// Generic record shared by every user-defined section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CustomSectionItem {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub date: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CustomSection {
    pub id: String,
    pub title: String,
    pub items: Vec<CustomSectionItem>,
}

/// The aggregate root. Every edit produces a new value of this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResumeDocument {
    pub personal_info: PersonalInfo,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub skills: Vec<String>,
    pub projects: Vec<Project>,
    pub certifications: Vec<Certification>,
    pub custom_sections: Vec<CustomSection>,
    pub theme_color: String,
}

impl Default for ResumeDocument {
    fn default() -> Self {
        Self {
            personal_info: PersonalInfo::default(),
            experience: Vec::new(),
            education: Vec::new(),
            skills: Vec::new(),
            projects: Vec::new(),
            certifications: Vec::new(),
            custom_sections: Vec::new(),
            theme_color: DEFAULT_THEME_COLOR.to_string(),
        }
    }
}

pub fn is_palette_color(color: &str) -> bool {
    THEME_PALETTE.iter().any(|c| c.eq_ignore_ascii_case(color))
}
