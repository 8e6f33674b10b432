use std::sync::Arc;

use crate::config::Config;
use crate::layout::PageGeometry;
use crate::refine::refiner::{RefineCoordinator, Refiner};
use crate::storage::ResumeStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Local resume + preferences store.
    pub store: ResumeStore,
    /// Pluggable model backend. Default: GeminiClient.
    pub refiner: Arc<dyn Refiner>,
    /// Cancels a pending refine when a newer one arrives.
    pub refine_jobs: Arc<RefineCoordinator>,
    /// Page geometry for the pagination pass, fixed at startup (A4).
    pub geometry: PageGeometry,
}
