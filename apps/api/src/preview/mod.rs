// Rendered view of the document.
// Every leaf text is emitted as a `contenteditable` region whose `data-field`
// is the `FieldPath` key a region commit addresses.

use crate::editing::patch::{
    CertificationField, EducationField, ExperienceField, FieldPath, PersonalField, ProjectField,
    SectionItemField,
};
use crate::models::resume::ResumeDocument;

pub const PREVIEW_ROOT_ID: &str = "resume-preview";

/// Escapes text for use in element content and double-quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

struct Html {
    buf: String,
}

impl Html {
    fn new() -> Self {
        Self { buf: String::new() }
    }

    fn open(&mut self, tag: &str, class: &str) {
        self.buf.push_str(&format!("<{tag} class=\"{class}\">"));
    }

    fn close(&mut self, tag: &str) {
        self.buf.push_str(&format!("</{tag}>"));
    }

    fn heading(&mut self, title: &str, color: &str) {
        self.buf.push_str(&format!(
            "<h2 class=\"section-title\" style=\"color: {}\">{}</h2>",
            escape_html(color),
            escape_html(title)
        ));
    }

    fn editable(&mut self, tag: &str, class: &str, path: FieldPath, value: &str) {
        self.buf.push_str(&format!(
            "<{tag} class=\"{class}\" contenteditable=\"true\" data-field=\"{}\">{}</{tag}>",
            escape_html(&path.to_string()),
            escape_html(value)
        ));
    }

    fn text(&mut self, tag: &str, class: &str, value: &str) {
        self.buf.push_str(&format!(
            "<{tag} class=\"{class}\">{}</{tag}>",
            escape_html(value)
        ));
    }
}

fn personal(field: PersonalField) -> FieldPath {
    FieldPath::Personal { field }
}

/// Renders the whole document. Section order follows the printed layout:
/// header, summary, education, skills, projects, experience, certifications,
/// then custom sections. Empty collections are left out.
pub fn render_preview(doc: &ResumeDocument) -> String {
    let info = &doc.personal_info;
    let color = doc.theme_color.as_str();
    let mut html = Html::new();

    html.buf.push_str(&format!(
        "<div id=\"{PREVIEW_ROOT_ID}\" style=\"--theme-color: {}\">",
        escape_html(color)
    ));

    html.open("header", "resume-header");
    html.editable("h1", "full-name", personal(PersonalField::FullName), &info.full_name);
    html.editable("p", "job-title", personal(PersonalField::JobTitle), &info.job_title);
    html.open("div", "contact");
    for (field, value) in [
        (PersonalField::Email, &info.email),
        (PersonalField::Phone, &info.phone),
        (PersonalField::Location, &info.location),
        (PersonalField::Website, &info.website),
        (PersonalField::Linkedin, &info.linkedin),
    ] {
        html.editable("span", "contact-item", personal(field), value);
    }
    html.close("div");
    html.close("header");

    html.open("section", "summary");
    html.heading("Professional Summary", color);
    html.editable("p", "summary-text", personal(PersonalField::Summary), &info.summary);
    html.close("section");

    if !doc.education.is_empty() {
        html.open("section", "education");
        html.heading("Education", color);
        for edu in &doc.education {
            let path = |field| FieldPath::Education {
                id: edu.id.clone(),
                field,
            };
            html.open("div", "entry");
            html.editable("h3", "entry-title", path(EducationField::School), &edu.school);
            html.editable("span", "entry-date", path(EducationField::GraduationDate), &edu.graduation_date);
            html.editable("div", "entry-subtitle", path(EducationField::Degree), &edu.degree);
            html.editable("p", "entry-description", path(EducationField::Description), &edu.description);
            html.close("div");
        }
        html.close("section");
    }

    if !doc.skills.is_empty() {
        html.open("section", "skills");
        html.heading("Skills", color);
        for (index, skill) in doc.skills.iter().enumerate() {
            html.editable("span", "skill", FieldPath::Skill { index }, skill);
        }
        html.close("section");
    }

    if !doc.projects.is_empty() {
        html.open("section", "projects");
        html.heading("Projects", color);
        for proj in &doc.projects {
            let path = |field| FieldPath::Project {
                id: proj.id.clone(),
                field,
            };
            html.open("div", "entry");
            html.editable("h3", "entry-title", path(ProjectField::Name), &proj.name);
            html.editable("span", "entry-link", path(ProjectField::Link), &proj.link);
            html.editable("p", "entry-description", path(ProjectField::Description), &proj.description);
            html.close("div");
        }
        html.close("section");
    }

    if !doc.experience.is_empty() {
        html.open("section", "experience");
        html.heading("Experience", color);
        for exp in &doc.experience {
            let path = |field| FieldPath::Experience {
                id: exp.id.clone(),
                field,
            };
            html.open("div", "entry");
            html.editable("h3", "entry-title", path(ExperienceField::Title), &exp.title);
            html.open("span", "entry-date");
            html.editable("span", "start-date", path(ExperienceField::StartDate), &exp.start_date);
            html.buf.push_str(" - ");
            // endDate is kept while `current` is set but not shown.
            if exp.current {
                html.text("span", "end-date", "Present");
            } else {
                html.editable("span", "end-date", path(ExperienceField::EndDate), &exp.end_date);
            }
            html.close("span");
            html.editable("div", "entry-subtitle", path(ExperienceField::Company), &exp.company);
            html.editable("p", "entry-description", path(ExperienceField::Description), &exp.description);
            html.close("div");
        }
        html.close("section");
    }

    if !doc.certifications.is_empty() {
        html.open("section", "certifications");
        html.heading("Certifications", color);
        for cert in &doc.certifications {
            let path = |field| FieldPath::Certification {
                id: cert.id.clone(),
                field,
            };
            html.open("div", "entry");
            html.editable("h3", "entry-title", path(CertificationField::Name), &cert.name);
            html.editable("span", "entry-date", path(CertificationField::Date), &cert.date);
            html.editable("div", "entry-subtitle", path(CertificationField::Issuer), &cert.issuer);
            html.close("div");
        }
        html.close("section");
    }

    for section in &doc.custom_sections {
        html.open("section", "custom-section");
        html.buf.push_str(&format!(
            "<h2 class=\"section-title\" style=\"color: {}\">",
            escape_html(color)
        ));
        html.editable(
            "span",
            "custom-section-title",
            FieldPath::SectionTitle {
                id: section.id.clone(),
            },
            &section.title,
        );
        html.close("h2");
        for item in &section.items {
            let path = |field| FieldPath::SectionItem {
                section_id: section.id.clone(),
                item_id: item.id.clone(),
                field,
            };
            html.open("div", "entry");
            html.editable("h3", "entry-title", path(SectionItemField::Title), &item.title);
            html.editable("span", "entry-date", path(SectionItemField::Date), &item.date);
            html.editable("div", "entry-subtitle", path(SectionItemField::Subtitle), &item.subtitle);
            html.editable("p", "entry-description", path(SectionItemField::Description), &item.description);
            html.close("div");
        }
        html.close("section");
    }

    html.close("div");
    html.buf
}
