//! The single update path. Form edits, direct edits, enhancement results and
//! imports all end up here.

use tracing::debug;

use crate::editing::fields::{self, find_mut, Identified};
use crate::editing::patch::{ItemRef, NewItem, Patch};
use crate::editing::skills::{merge_skills, parse_skills_text};
use crate::models::resume::ResumeDocument;

/// Returns the document that results from applying `patch` to `doc`.
///
/// `doc` is never touched; callers holding the previous value keep seeing it
/// unchanged. Patches aimed at ids that no longer exist return an equal copy.
pub fn apply(doc: &ResumeDocument, patch: &Patch) -> ResumeDocument {
    let mut next = doc.clone();
    let changed = match patch {
        Patch::Set { field, value } => fields::write(&mut next, field, value),
        Patch::Insert { target } => insert(&mut next, target),
        Patch::Remove { target } => remove(&mut next, target),
        Patch::SetSkillsText { text } => {
            next.skills = parse_skills_text(text);
            true
        }
        Patch::MergeSkills { suggested } => {
            next.skills = merge_skills(&next.skills, suggested);
            true
        }
        Patch::Replace { document } => {
            next = document.as_ref().clone();
            true
        }
    };

    if !changed {
        debug!("patch '{}' did not match any target, ignoring", patch.op_name());
    }
    next
}

/// Prepends `item` unless its id is blank or already taken.
fn prepend<T: Identified + Clone>(items: &mut Vec<T>, item: &T) -> bool {
    if item.id().trim().is_empty() || items.iter().any(|i| i.id() == item.id()) {
        return false;
    }
    items.insert(0, item.clone());
    true
}

fn append<T: Identified + Clone>(items: &mut Vec<T>, item: &T) -> bool {
    if item.id().trim().is_empty() || items.iter().any(|i| i.id() == item.id()) {
        return false;
    }
    items.push(item.clone());
    true
}

fn remove_by_id<T: Identified>(items: &mut Vec<T>, id: &str) -> bool {
    let before = items.len();
    items.retain(|i| i.id() != id);
    items.len() != before
}

fn insert(doc: &mut ResumeDocument, target: &NewItem) -> bool {
    match target {
        NewItem::Experience { entry } => prepend(&mut doc.experience, entry),
        NewItem::Education { entry } => prepend(&mut doc.education, entry),
        NewItem::Project { entry } => prepend(&mut doc.projects, entry),
        NewItem::Certification { entry } => prepend(&mut doc.certifications, entry),
        NewItem::CustomSection { entry } => prepend(&mut doc.custom_sections, entry),
        NewItem::SectionItem { section_id, entry } => find_mut(&mut doc.custom_sections, section_id)
            .map(|section| append(&mut section.items, entry))
            .unwrap_or(false),
    }
}

fn remove(doc: &mut ResumeDocument, target: &ItemRef) -> bool {
    match target {
        ItemRef::Experience { id } => remove_by_id(&mut doc.experience, id),
        ItemRef::Education { id } => remove_by_id(&mut doc.education, id),
        ItemRef::Project { id } => remove_by_id(&mut doc.projects, id),
        ItemRef::Certification { id } => remove_by_id(&mut doc.certifications, id),
        ItemRef::CustomSection { id } => remove_by_id(&mut doc.custom_sections, id),
        ItemRef::SectionItem {
            section_id,
            item_id,
        } => find_mut(&mut doc.custom_sections, section_id)
            .map(|section| remove_by_id(&mut section.items, item_id))
            .unwrap_or(false),
    }
}
