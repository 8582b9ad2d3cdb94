//! Ties the pure scoring engines together: one `analyze` call per
//! keyword, a discovery scan across niche categories, a time-boxed
//! result cache, and the scored-keyword history log.

use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Arc, Mutex, PoisonError};

use demand_analysis::{GrowthAnalyzer, TrendSignalEstimator};
use forecast_engine::ForecastGenerator;
use opportunity_scoring::{NicheScoreEngine, OpportunityScorer};
use research_core::{
    DemandProvider, DemandSnapshot, HistoryRecord, KeywordAnalysis, ResearchError, SupplyProvider,
    SupplySnapshot,
};
use supply_analysis::{sources::find_source, CompetitionIndexer, SupplyAggregator};

pub mod cache;
pub mod discovery;
pub mod providers;

pub use cache::{normalize_keyword, ResultCache, CACHE_EXPIRY_HOURS};
pub use discovery::NicheDiscovery;
pub use providers::{
    OfflineDemandProvider, OfflineSupplyProvider, StaticDemandProvider, StaticSupplyProvider,
};

pub struct ResearchOrchestrator {
    demand_provider: Arc<dyn DemandProvider>,
    supply_provider: Arc<dyn SupplyProvider>,
    estimator: TrendSignalEstimator,
    growth_analyzer: GrowthAnalyzer,
    aggregator: SupplyAggregator,
    competition_indexer: CompetitionIndexer,
    opportunity_scorer: OpportunityScorer,
    niche_engine: NicheScoreEngine,
    forecaster: ForecastGenerator,
    cache: ResultCache,
    /// Seedable so tests can pin the fallback values.
    rng: Mutex<StdRng>,
}

impl Default for ResearchOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

impl ResearchOrchestrator {
    /// Orchestrator with no live upstreams: every analysis takes the
    /// flagged estimated path.
    pub fn new() -> Self {
        Self::with_providers(
            Arc::new(OfflineDemandProvider),
            Arc::new(OfflineSupplyProvider),
        )
    }

    pub fn with_providers(
        demand_provider: Arc<dyn DemandProvider>,
        supply_provider: Arc<dyn SupplyProvider>,
    ) -> Self {
        Self {
            demand_provider,
            supply_provider,
            estimator: TrendSignalEstimator::new(),
            growth_analyzer: GrowthAnalyzer::new(),
            aggregator: SupplyAggregator::new(),
            competition_indexer: CompetitionIndexer::new(),
            opportunity_scorer: OpportunityScorer::new(),
            niche_engine: NicheScoreEngine::new(),
            forecaster: ForecastGenerator::new(),
            cache: ResultCache::new(),
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Pin the fallback randomness (tests).
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    /// Override the cache expiry window (tests).
    pub fn with_cache_expiry_hours(mut self, hours: i64) -> Self {
        self.cache = ResultCache::with_expiry_hours(hours);
        self
    }

    /// Full single-keyword analysis. Cache-first; on a miss runs the
    /// whole pipeline, stores the result, and appends to history.
    pub async fn analyze(&self, keyword: &str) -> Result<KeywordAnalysis, ResearchError> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(ResearchError::InvalidInput("keyword is required".to_string()));
        }

        if let Some(mut cached) = self.cache.get(keyword) {
            tracing::debug!("Cache hit for '{}'", keyword);
            cached.from_cache = true;
            return Ok(cached);
        }

        tracing::info!("Analyzing '{}'", keyword);

        let demand = self.observe_demand(keyword).await;
        let supply = self.observe_supply(keyword).await;

        let opportunity = self
            .opportunity_scorer
            .score(demand.current, supply.aggregate_total);
        let growth_metrics = self.growth_analyzer.analyze(&demand);
        let competition = self
            .competition_indexer
            .index(supply.aggregate_total, supply.sources_available);
        let forecast = self.forecaster.forecast(&demand.history);
        let free_saturation = self.free_saturation(&supply);

        let result = KeywordAnalysis {
            keyword: keyword.to_string(),
            demand_score: demand.current,
            supply_count: supply.aggregate_total,
            opportunity_score: opportunity.raw,
            status: opportunity.status,
            growth: growth_metrics.week_over_week,
            trend: demand.direction,
            data_quality: demand.quality,
            demand,
            supply,
            opportunity,
            growth_metrics,
            competition,
            forecast,
            free_saturation,
            analyzed_at: Utc::now(),
            from_cache: false,
        };

        self.cache.put(keyword, result.clone());
        self.cache.append_history(keyword, result.opportunity_score);

        Ok(result)
    }

    /// Demand observation with graceful degradation: provider errors
    /// and empty series both become a flagged synthetic snapshot.
    pub(crate) async fn observe_demand(&self, keyword: &str) -> DemandSnapshot {
        match self.demand_provider.interest_over_time(keyword).await {
            Ok(series) => {
                let mut rng = self.lock_rng();
                self.estimator.estimate(&series, &mut *rng)
            }
            Err(e) => {
                tracing::warn!("Demand provider failed for '{}': {}", keyword, e);
                let mut rng = self.lock_rng();
                self.estimator.synthetic(&mut *rng)
            }
        }
    }

    /// Supply observation with the same degradation policy.
    pub(crate) async fn observe_supply(&self, keyword: &str) -> SupplySnapshot {
        let counts = match self.supply_provider.result_counts(keyword).await {
            Ok(counts) => counts,
            Err(e) => {
                tracing::warn!("Supply provider failed for '{}': {}", keyword, e);
                Default::default()
            }
        };
        let mut rng = self.lock_rng();
        self.aggregator.aggregate(&counts, &mut *rng)
    }

    /// How saturated the free-catalog segment looks: every free source
    /// that answered adds 25 points, plus a small jitter, capped at 100.
    fn free_saturation(&self, supply: &SupplySnapshot) -> u32 {
        let free_count = supply
            .sources
            .keys()
            .filter(|id| find_source(id).is_some_and(|s| s.free))
            .count() as u32;
        let jitter: u32 = self.lock_rng().gen_range(10..=25);
        (free_count * 25 + jitter).min(100)
    }

    pub fn history(&self, limit: usize) -> Vec<HistoryRecord> {
        self.cache.history(limit)
    }

    /// All fresh cached analyses, newest first (export).
    pub fn cached_analyses(&self) -> Vec<KeywordAnalysis> {
        self.cache.fresh_entries()
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
        tracing::info!("Cache and history cleared");
    }

    pub(crate) fn niche_engine(&self) -> &NicheScoreEngine {
        &self.niche_engine
    }

    pub(crate) fn lock_rng(&self) -> std::sync::MutexGuard<'_, StdRng> {
        self.rng.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
