use async_trait::async_trait;
use std::collections::HashMap;

use crate::ResearchError;

/// Source of raw search-interest time series (e.g. a trends API).
///
/// Returns chronological popularity samples on the 0-100 scale,
/// oldest first. An error means the upstream is unreachable; callers
/// fall back to synthesized demand.
#[async_trait]
pub trait DemandProvider: Send + Sync {
    async fn interest_over_time(&self, keyword: &str) -> Result<Vec<u32>, ResearchError>;
}

/// Source of per-catalog asset counts for a keyword.
///
/// The map is keyed by source id; a missing id means that catalog was
/// unreachable or unconfigured for this request.
#[async_trait]
pub trait SupplyProvider: Send + Sync {
    async fn result_counts(&self, keyword: &str) -> Result<HashMap<String, u64>, ResearchError>;
}
