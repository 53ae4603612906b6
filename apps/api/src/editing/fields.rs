//! Field accessors shared by `apply` (writes) and the direct-edit regions (reads).

use crate::editing::patch::{
    CertificationField, EducationField, ExperienceField, FieldPath, FieldValue, PersonalField,
    ProjectField, SectionItemField,
};
use crate::models::resume::{
    Certification, CustomSection, CustomSectionItem, Education, Experience, PersonalInfo,
    Project, ResumeDocument,
};

/// Anything stored in an id-addressed collection.
pub(crate) trait Identified {
    fn id(&self) -> &str;
}

macro_rules! identified {
    ($($ty:ty),* $(,)?) => {
        $(impl Identified for $ty {
            fn id(&self) -> &str {
                &self.id
            }
        })*
    };
}

identified!(
    Experience,
    Education,
    Project,
    Certification,
    CustomSection,
    CustomSectionItem
);

pub(crate) fn find<'a, T: Identified>(items: &'a [T], id: &str) -> Option<&'a T> {
    items.iter().find(|item| item.id() == id)
}

pub(crate) fn find_mut<'a, T: Identified>(items: &'a mut [T], id: &str) -> Option<&'a mut T> {
    items.iter_mut().find(|item| item.id() == id)
}

fn personal_text(info: &mut PersonalInfo, field: PersonalField) -> &mut String {
    match field {
        PersonalField::FullName => &mut info.full_name,
        PersonalField::Email => &mut info.email,
        PersonalField::Phone => &mut info.phone,
        PersonalField::Location => &mut info.location,
        PersonalField::Website => &mut info.website,
        PersonalField::Linkedin => &mut info.linkedin,
        PersonalField::JobTitle => &mut info.job_title,
        PersonalField::Summary => &mut info.summary,
    }
}

fn experience_text(e: &mut Experience, field: ExperienceField) -> Option<&mut String> {
    match field {
        ExperienceField::Title => Some(&mut e.title),
        ExperienceField::Company => Some(&mut e.company),
        ExperienceField::StartDate => Some(&mut e.start_date),
        ExperienceField::EndDate => Some(&mut e.end_date),
        ExperienceField::Description => Some(&mut e.description),
        ExperienceField::Current => None,
    }
}

fn education_text(e: &mut Education, field: EducationField) -> &mut String {
    match field {
        EducationField::School => &mut e.school,
        EducationField::Degree => &mut e.degree,
        EducationField::GraduationDate => &mut e.graduation_date,
        EducationField::Description => &mut e.description,
    }
}

fn project_text(p: &mut Project, field: ProjectField) -> &mut String {
    match field {
        ProjectField::Name => &mut p.name,
        ProjectField::Link => &mut p.link,
        ProjectField::Description => &mut p.description,
    }
}

fn certification_text(c: &mut Certification, field: CertificationField) -> &mut String {
    match field {
        CertificationField::Name => &mut c.name,
        CertificationField::Issuer => &mut c.issuer,
        CertificationField::Date => &mut c.date,
        CertificationField::Link => &mut c.link,
    }
}

fn section_item_text(i: &mut CustomSectionItem, field: SectionItemField) -> &mut String {
    match field {
        SectionItemField::Title => &mut i.title,
        SectionItemField::Subtitle => &mut i.subtitle,
        SectionItemField::Date => &mut i.date,
        SectionItemField::Description => &mut i.description,
    }
}

/// Resolves a path to its text slot inside a document the caller owns.
/// Returns `None` when the addressed entity is gone or the field is not text.
fn text_slot<'a>(doc: &'a mut ResumeDocument, path: &FieldPath) -> Option<&'a mut String> {
    match path {
        FieldPath::Personal { field } => Some(personal_text(&mut doc.personal_info, *field)),
        FieldPath::ThemeColor => Some(&mut doc.theme_color),
        FieldPath::Experience { id, field } => {
            find_mut(&mut doc.experience, id).and_then(|e| experience_text(e, *field))
        }
        FieldPath::Education { id, field } => {
            find_mut(&mut doc.education, id).map(|e| education_text(e, *field))
        }
        FieldPath::Project { id, field } => {
            find_mut(&mut doc.projects, id).map(|p| project_text(p, *field))
        }
        FieldPath::Certification { id, field } => {
            find_mut(&mut doc.certifications, id).map(|c| certification_text(c, *field))
        }
        FieldPath::Skill { index } => doc.skills.get_mut(*index),
        FieldPath::SectionTitle { id } => find_mut(&mut doc.custom_sections, id).map(|s| &mut s.title),
        FieldPath::SectionItem {
            section_id,
            item_id,
            field,
        } => find_mut(&mut doc.custom_sections, section_id)
            .and_then(|s| find_mut(&mut s.items, item_id))
            .map(|i| section_item_text(i, *field)),
    }
}

/// Writes `value` into `doc`. Returns `false` when nothing was written: the
/// target id no longer exists or the value kind does not fit the field.
pub(crate) fn write(doc: &mut ResumeDocument, path: &FieldPath, value: &FieldValue) -> bool {
    if let FieldPath::Experience {
        id,
        field: ExperienceField::Current,
    } = path
    {
        return match (find_mut(&mut doc.experience, id), value.as_flag()) {
            (Some(exp), Some(flag)) => {
                exp.current = flag;
                true
            }
            _ => false,
        };
    }

    match (text_slot(doc, path), value.as_text()) {
        (Some(slot), Some(text)) => {
            *slot = text.to_string();
            true
        }
        _ => false,
    }
}

/// Borrowing text read; `None` for flags and missing entities.
pub fn read_text<'a>(doc: &'a ResumeDocument, path: &FieldPath) -> Option<&'a str> {
    let text = match path {
        FieldPath::Personal { field } => {
            let info = &doc.personal_info;
            match field {
                PersonalField::FullName => &info.full_name,
                PersonalField::Email => &info.email,
                PersonalField::Phone => &info.phone,
                PersonalField::Location => &info.location,
                PersonalField::Website => &info.website,
                PersonalField::Linkedin => &info.linkedin,
                PersonalField::JobTitle => &info.job_title,
                PersonalField::Summary => &info.summary,
            }
        }
        FieldPath::ThemeColor => &doc.theme_color,
        FieldPath::Experience { id, field } => {
            let e = find(&doc.experience, id)?;
            match field {
                ExperienceField::Title => &e.title,
                ExperienceField::Company => &e.company,
                ExperienceField::StartDate => &e.start_date,
                ExperienceField::EndDate => &e.end_date,
                ExperienceField::Description => &e.description,
                ExperienceField::Current => return None,
            }
        }
        FieldPath::Education { id, field } => {
            let e = find(&doc.education, id)?;
            match field {
                EducationField::School => &e.school,
                EducationField::Degree => &e.degree,
                EducationField::GraduationDate => &e.graduation_date,
                EducationField::Description => &e.description,
            }
        }
        FieldPath::Project { id, field } => {
            let p = find(&doc.projects, id)?;
            match field {
                ProjectField::Name => &p.name,
                ProjectField::Link => &p.link,
                ProjectField::Description => &p.description,
            }
        }
        FieldPath::Certification { id, field } => {
            let c = find(&doc.certifications, id)?;
            match field {
                CertificationField::Name => &c.name,
                CertificationField::Issuer => &c.issuer,
                CertificationField::Date => &c.date,
                CertificationField::Link => &c.link,
            }
        }
        FieldPath::Skill { index } => doc.skills.get(*index)?,
        FieldPath::SectionTitle { id } => &find(&doc.custom_sections, id)?.title,
        FieldPath::SectionItem {
            section_id,
            item_id,
            field,
        } => {
            let item = find(&find(&doc.custom_sections, section_id)?.items, item_id)?;
            match field {
                SectionItemField::Title => &item.title,
                SectionItemField::Subtitle => &item.subtitle,
                SectionItemField::Date => &item.date,
                SectionItemField::Description => &item.description,
            }
        }
    };
    Some(text.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::bootstrap_document;

    #[test]
    fn test_read_text_follows_ids() {
        let doc = bootstrap_document();
        let path = FieldPath::Project {
            id: "2".into(),
            field: ProjectField::Name,
        };
        assert_eq!(read_text(&doc, &path), Some("Weather Forecaster"));
    }

    #[test]
    fn test_flag_has_no_text_reading() {
        let doc = bootstrap_document();
        let path = FieldPath::Experience {
            id: "1".into(),
            field: ExperienceField::Current,
        };
        assert_eq!(read_text(&doc, &path), None);
        assert!(!find(&doc.experience, "1").unwrap().current);
    }

    #[test]
    fn test_write_rejects_kind_mismatch() {
        let mut doc = bootstrap_document();
        let current = FieldPath::Experience {
            id: "1".into(),
            field: ExperienceField::Current,
        };
        assert!(!write(&mut doc, &current, &FieldValue::from("yes")));
        let title = FieldPath::Experience {
            id: "1".into(),
            field: ExperienceField::Title,
        };
        assert!(!write(&mut doc, &title, &FieldValue::Flag(true)));
        assert_eq!(doc, bootstrap_document());
    }

    #[test]
    fn test_missing_section_item_reads_none() {
        let doc = bootstrap_document();
        let path = FieldPath::SectionItem {
            section_id: "1".into(),
            item_id: "nope".into(),
            field: SectionItemField::Title,
        };
        assert_eq!(read_text(&doc, &path), None);
    }
}
