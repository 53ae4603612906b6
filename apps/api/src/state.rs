use std::sync::Arc;

use crate::config::Config;
use crate::editing::DocumentStore;
use crate::enhance::{EnhancementGateway, EnhancementTracker};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Single source of truth for the document; both views read from here.
    pub store: Arc<DocumentStore>,
    pub gateway: EnhancementGateway,
    /// Which fields have an enhancement call in flight.
    pub tracker: EnhancementTracker,
    pub config: Config,
}
