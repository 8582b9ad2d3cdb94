//! Provider stand-ins for the network collaborators that live outside
//! this core. Real trend/catalog clients implement the same traits.

use async_trait::async_trait;
use std::collections::HashMap;

use research_core::{DemandProvider, ResearchError, SupplyProvider};

/// Demand provider for deployments with no live trends client wired
/// in. Always reports the upstream as unavailable, which routes every
/// analysis through the flagged synthetic-demand path.
#[derive(Debug, Default)]
pub struct OfflineDemandProvider;

#[async_trait]
impl DemandProvider for OfflineDemandProvider {
    async fn interest_over_time(&self, _keyword: &str) -> Result<Vec<u32>, ResearchError> {
        Err(ResearchError::UpstreamUnavailable(
            "no trends client configured".to_string(),
        ))
    }
}

/// Supply counterpart of [`OfflineDemandProvider`].
#[derive(Debug, Default)]
pub struct OfflineSupplyProvider;

#[async_trait]
impl SupplyProvider for OfflineSupplyProvider {
    async fn result_counts(&self, _keyword: &str) -> Result<HashMap<String, u64>, ResearchError> {
        Err(ResearchError::UpstreamUnavailable(
            "no catalog clients configured".to_string(),
        ))
    }
}

/// Fixed-series demand provider, mainly for tests and demos.
#[derive(Debug, Clone)]
pub struct StaticDemandProvider {
    series: Vec<u32>,
}

impl StaticDemandProvider {
    pub fn new(series: Vec<u32>) -> Self {
        Self { series }
    }
}

#[async_trait]
impl DemandProvider for StaticDemandProvider {
    async fn interest_over_time(&self, _keyword: &str) -> Result<Vec<u32>, ResearchError> {
        Ok(self.series.clone())
    }
}

/// Fixed-count supply provider, mainly for tests and demos.
#[derive(Debug, Clone)]
pub struct StaticSupplyProvider {
    counts: HashMap<String, u64>,
}

impl StaticSupplyProvider {
    pub fn new(counts: HashMap<String, u64>) -> Self {
        Self { counts }
    }
}

#[async_trait]
impl SupplyProvider for StaticSupplyProvider {
    async fn result_counts(&self, _keyword: &str) -> Result<HashMap<String, u64>, ResearchError> {
        Ok(self.counts.clone())
    }
}
