// Text enhancement: a stateless gateway to the text generator, plus the
// per-field busy tracking that the HTTP layer owns.

pub mod gateway;
pub mod handlers;
pub mod prompts;
pub mod tracker;

pub use gateway::{DisabledGenerator, EnhancementGateway, TextGenerator};
pub use tracker::EnhancementTracker;
