// Persistence: snapshot mirror of the live document, plus JSON export/import.

pub mod codec;
pub mod handlers;
pub mod snapshot;

pub use codec::ImportError;
pub use snapshot::{restore_or_default, SnapshotStore};
