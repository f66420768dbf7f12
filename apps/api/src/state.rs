use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::recommend::scorer::CareerScorer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
    /// Pluggable recommendation scorer. Default: RuleBasedScorer.
    pub scorer: Arc<dyn CareerScorer>,
}
