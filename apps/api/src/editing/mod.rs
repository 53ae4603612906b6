// Synchronized editing core.
// Both the form and the rendered view turn user input into a `Patch`; every
// patch goes through `apply`, and `DocumentStore` publishes the result.

pub mod apply;
pub mod direct_edit;
pub mod fields;
pub mod handlers;
pub mod patch;
pub mod skills;
pub mod store;

pub use apply::apply;
pub use patch::{FieldPath, FieldValue, Patch};
pub use store::DocumentStore;
