use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::Config;
use crate::llm_client::TextGenerator;
use crate::models::Brief;
use crate::render::pdf::PdfConverter;
use crate::scraper::PlacesSource;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub llm: Arc<dyn TextGenerator>,
    pub places: Arc<dyn PlacesSource>,
    pub pdf: Arc<dyn PdfConverter>,
    pub config: Config,
    /// The most recently completed brief, if any. Overwritten by every
    /// generate call; last completed write wins under concurrent requests.
    pub latest_brief: Arc<RwLock<Option<Brief>>>,
}
