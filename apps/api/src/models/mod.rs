pub mod defaults;
pub mod resume;

pub use defaults::bootstrap_document;
