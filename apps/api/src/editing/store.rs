//! The canonical document for the running process.
//!
//! Every surface (form, rendered view, enhancement results, import) calls
//! `DocumentStore::apply`. Writers are serialized; readers get an `Arc` to a
//! complete, immutable value and never observe a half-applied change.

use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::editing::apply::apply;
use crate::editing::patch::Patch;
use crate::models::resume::ResumeDocument;
use crate::persistence::codec::{decode_import, encode_snapshot, ImportError};
use crate::persistence::snapshot::SnapshotStore;

/// The current document together with its change counter.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Revision {
    pub revision: u64,
    pub updated_at: DateTime<Utc>,
    pub document: Arc<ResumeDocument>,
}

pub struct DocumentStore {
    current: RwLock<Revision>,
    writer: Mutex<()>,
    mirror: Arc<dyn SnapshotStore>,
}

impl DocumentStore {
    pub fn new(initial: ResumeDocument, mirror: Arc<dyn SnapshotStore>) -> Self {
        Self {
            current: RwLock::new(Revision {
                revision: 0,
                updated_at: Utc::now(),
                document: Arc::new(initial),
            }),
            writer: Mutex::new(()),
            mirror,
        }
    }

    pub fn current(&self) -> Revision {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn document(&self) -> Arc<ResumeDocument> {
        self.current().document
    }

    /// Applies one patch and, if the document changed, publishes the new value
    /// and mirrors it to the snapshot slot. A patch that changes nothing
    /// (e.g. aimed at a removed id) leaves the revision and snapshot alone.
    pub async fn apply(&self, patch: Patch) -> Revision {
        let _writer = self.writer.lock().await;
        let patch = patch.with_fresh_ids();

        let before = self.current();
        let next = apply(&before.document, &patch);
        if next == *before.document {
            debug!("patch '{}' left the document unchanged", patch.op_name());
            return before;
        }

        let revision = Revision {
            revision: before.revision + 1,
            updated_at: Utc::now(),
            document: Arc::new(next),
        };
        *self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner) = revision.clone();
        debug!(
            "applied '{}', now at revision {}",
            patch.op_name(),
            revision.revision
        );

        self.mirror(&revision.document).await;
        revision
    }

    /// Replaces the whole document with an uploaded file. On any decode or
    /// shape failure the current document is left exactly as it was.
    pub async fn import(&self, bytes: &[u8]) -> Result<Revision, ImportError> {
        let document = decode_import(bytes)?;
        info!(
            "Importing document for '{}' ({} experience entries)",
            document.personal_info.full_name,
            document.experience.len()
        );
        Ok(self
            .apply(Patch::Replace {
                document: Box::new(document),
            })
            .await)
    }

    async fn mirror(&self, doc: &ResumeDocument) {
        let encoded = match encode_snapshot(doc) {
            Ok(text) => text,
            Err(e) => {
                warn!("Could not encode snapshot: {e}");
                return;
            }
        };
        if let Err(e) = self.mirror.save(&encoded).await {
            warn!("Snapshot write to {} failed: {e}", self.mirror.describe());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::patch::{FieldPath, ItemRef, NewItem, PersonalField};
    use crate::models::bootstrap_document;
    use crate::models::resume::{CustomSection, CustomSectionItem, Experience};
    use crate::persistence::codec::{decode_snapshot, encode_export};
    use crate::persistence::snapshot::MemorySnapshotStore;

    fn store() -> (DocumentStore, Arc<MemorySnapshotStore>) {
        let mirror = Arc::new(MemorySnapshotStore::default());
        (
            DocumentStore::new(bootstrap_document(), mirror.clone()),
            mirror,
        )
    }

    fn job_title(value: &str) -> Patch {
        Patch::set(
            FieldPath::Personal {
                field: PersonalField::JobTitle,
            },
            value,
        )
    }

    #[tokio::test]
    async fn test_apply_publishes_and_mirrors() {
        let (store, mirror) = store();
        let before = store.document();

        let rev = store.apply(job_title("Staff Engineer")).await;

        assert_eq!(rev.revision, 1);
        assert_eq!(rev.document.personal_info.job_title, "Staff Engineer");
        assert_eq!(before.personal_info.job_title, "Junior Software Engineer");
        assert_eq!(store.document(), rev.document);

        let mirrored = decode_snapshot(&mirror.contents().unwrap()).unwrap();
        assert_eq!(mirrored, *rev.document);
    }

    #[tokio::test]
    async fn test_unchanged_document_is_not_mirrored() {
        let (store, mirror) = store();
        store.apply(job_title("Staff Engineer")).await;

        let same = store.apply(job_title("Staff Engineer")).await;
        let late = store
            .apply(Patch::Remove {
                target: ItemRef::Experience { id: "gone".into() },
            })
            .await;

        assert_eq!(same.revision, 1);
        assert_eq!(late.revision, 1);
        assert_eq!(mirror.write_count(), 1);
    }

    #[tokio::test]
    async fn test_insert_without_id_gets_one() {
        let (store, _) = store();
        let rev = store
            .apply(Patch::Insert {
                target: NewItem::Experience {
                    entry: Experience::default(),
                },
            })
            .await;
        assert_eq!(rev.document.experience.len(), 3);
        assert!(!rev.document.experience[0].id.is_empty());
    }

    #[tokio::test]
    async fn test_inserted_section_with_repeated_item_ids_is_made_unique() {
        let (store, _) = store();
        let item = CustomSectionItem {
            id: "x".into(),
            title: "Hackathon".into(),
            ..Default::default()
        };
        let rev = store
            .apply(Patch::Insert {
                target: NewItem::CustomSection {
                    entry: CustomSection {
                        id: "s9".into(),
                        title: "Awards".into(),
                        items: vec![item.clone(), item],
                    },
                },
            })
            .await;

        let items = &rev.document.custom_sections[0].items;
        assert_eq!(items.len(), 2);
        assert_ne!(items[0].id, items[1].id);

        let rev = store
            .apply(Patch::Remove {
                target: ItemRef::SectionItem {
                    section_id: "s9".into(),
                    item_id: "x".into(),
                },
            })
            .await;
        assert_eq!(rev.document.custom_sections[0].items.len(), 1);
    }

    #[tokio::test]
    async fn test_replace_with_repeated_ids_is_normalized() {
        let (store, _) = store();
        let role = |id: &str| Experience {
            id: id.into(),
            title: "Engineer".into(),
            ..Default::default()
        };
        let mut incoming = bootstrap_document();
        incoming.experience = vec![role("dup"), role("dup"), role("")];

        let rev = store
            .apply(Patch::Replace {
                document: Box::new(incoming),
            })
            .await;

        let ids: std::collections::HashSet<_> =
            rev.document.experience.iter().map(|e| e.id.clone()).collect();
        assert_eq!(ids.len(), 3);
        assert!(ids.iter().all(|id| !id.trim().is_empty()));
        assert!(ids.contains("dup"));
    }

    #[tokio::test]
    async fn test_import_replaces_document() {
        let (store, mirror) = store();
        let mut incoming = bootstrap_document();
        incoming.personal_info.full_name = "Imported".into();
        let bytes = encode_export(&incoming).unwrap();

        let rev = store.import(bytes.as_bytes()).await.unwrap();

        assert_eq!(*rev.document, incoming);
        assert_eq!(mirror.write_count(), 1);
    }

    #[tokio::test]
    async fn test_failed_import_leaves_document_untouched() {
        let (store, mirror) = store();
        let before = encode_snapshot(&store.document()).unwrap();

        let rejected: [&[u8]; 3] = [
            b"not json",
            br#"{"experience": []}"#,
            br#"{"personalInfo": {}, "experience": "none"}"#,
        ];
        for bad in rejected {
            assert!(store.import(bad).await.is_err());
        }

        assert_eq!(encode_snapshot(&store.document()).unwrap(), before);
        assert_eq!(store.current().revision, 0);
        assert_eq!(mirror.write_count(), 0);
    }
}
