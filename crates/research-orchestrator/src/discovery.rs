//! Niche discovery: scans a bounded keyword set per category, scores
//! each with the composite engine, and ranks the results.

use chrono::{Datelike, Utc};
use rand::Rng;
use std::collections::HashMap;
use std::sync::Arc;

use opportunity_scoring::NicheScoreInput;
use research_core::{
    category_names, DataQuality, DemandSnapshot, DiscoveryReport, NicheCategory, NicheEntry,
    TrendDirection, NICHE_CATEGORIES,
};

use crate::ResearchOrchestrator;

/// Keywords scanned per category, keeping a full scan bounded.
const KEYWORDS_PER_CATEGORY: usize = 4;
/// Supply estimate range for the fast scan path.
const QUICK_SUPPLY_RANGE: std::ops::RangeInclusive<u64> = 1_000..=120_000;

pub struct NicheDiscovery {
    orchestrator: Arc<ResearchOrchestrator>,
}

impl NicheDiscovery {
    pub fn new(orchestrator: Arc<ResearchOrchestrator>) -> Self {
        Self { orchestrator }
    }

    /// Scan categories (optionally filtered), rank by composite score
    /// descending, truncate to `limit`.
    pub async fn discover(&self, category: Option<&str>, limit: usize) -> DiscoveryReport {
        self.discover_at_month(category, limit, Utc::now().month())
            .await
    }

    /// Same as [`discover`](Self::discover) with an explicit calendar
    /// month, so seasonality is testable.
    pub async fn discover_at_month(
        &self,
        category: Option<&str>,
        limit: usize,
        month: u32,
    ) -> DiscoveryReport {
        let categories: Vec<&'static NicheCategory> = match category {
            Some(name) => research_core::find_category(name).into_iter().collect(),
            None => NICHE_CATEGORIES.iter().collect(),
        };

        let mut results = Vec::new();

        for cat in &categories {
            for keyword in cat.keywords.iter().take(KEYWORDS_PER_CATEGORY) {
                results.push(self.score_keyword(keyword, cat, month).await);
            }
        }

        let total_analyzed = results.len();
        let average_score = if results.is_empty() {
            0.0
        } else {
            results
                .iter()
                .map(|r: &NicheEntry| r.breakdown.final_score)
                .sum::<f64>()
                / total_analyzed as f64
        };
        let s_tier_count = results
            .iter()
            .filter(|r| r.breakdown.tier == research_core::Tier::S)
            .count();
        let a_tier_count = results
            .iter()
            .filter(|r| r.breakdown.tier == research_core::Tier::A)
            .count();

        results.sort_by(|a, b| {
            b.breakdown
                .final_score
                .partial_cmp(&a.breakdown.final_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let top_category = dominant_category(&results[..results.len().min(5)]);

        results.truncate(limit);

        tracing::info!(
            "Discovery scanned {} keywords, top category: {}",
            total_analyzed,
            top_category
        );

        DiscoveryReport {
            niches: results,
            total_analyzed,
            average_score: (average_score * 10.0).round() / 10.0,
            top_category,
            s_tier_count,
            a_tier_count,
            categories: category_names(),
        }
    }

    async fn score_keyword(
        &self,
        keyword: &str,
        category: &'static NicheCategory,
        month: u32,
    ) -> NicheEntry {
        let orch = &self.orchestrator;

        // Real demand when a live provider answers; otherwise a quick
        // estimate keeps a full scan fast and network-free.
        let demand = match orch.demand_provider.interest_over_time(keyword).await {
            Ok(series) if !series.is_empty() => orch
                .estimator
                .snapshot(&series)
                .unwrap_or_else(|| self.quick_estimate()),
            _ => self.quick_estimate(),
        };

        let growth = match (demand.history.first(), demand.history.last()) {
            (Some(&first), Some(&last)) => {
                (last as f64 - first as f64) / (first as f64).max(1.0) * 100.0
            }
            _ => 0.0,
        };
        let growth = (growth * 10.0).round() / 10.0;

        // Supply stays an estimate on the scan path; a full per-catalog
        // fetch per keyword would dominate the scan time.
        let supply = orch.lock_rng().gen_range(QUICK_SUPPLY_RANGE);

        let breakdown = orch.niche_engine().score(&NicheScoreInput {
            demand: demand.current,
            supply,
            growth,
            history: &demand.history,
            category,
            month,
            data_source: demand.quality,
        });

        NicheEntry {
            keyword: keyword.to_string(),
            category: category.name.to_string(),
            demand: demand.current,
            supply,
            growth,
            breakdown,
        }
    }

    /// Synthetic demand snapshot for the fast scan path.
    fn quick_estimate(&self) -> DemandSnapshot {
        let mut rng = self.orchestrator.lock_rng();
        let base: u32 = rng.gen_range(40..=85);
        let history: Vec<u32> = (0..12)
            .map(|_| {
                let jitter: i64 = rng.gen_range(-10..=10);
                (base as i64 + jitter).clamp(0, 100) as u32
            })
            .collect();

        DemandSnapshot {
            current: base,
            average: demand_analysis::stats::mean(&history),
            max: history.iter().max().copied().unwrap_or(base),
            min: history.iter().min().copied().unwrap_or(base),
            momentum: 0.0,
            direction: TrendDirection::Stable,
            data_points: history.len(),
            history,
            quality: DataQuality::Estimated,
        }
    }
}

fn dominant_category(top: &[NicheEntry]) -> String {
    if top.is_empty() {
        return "N/A".to_string();
    }
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for entry in top {
        *counts.entry(entry.category.as_str()).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .max_by_key(|&(_, count)| count)
        .map(|(name, _)| name.to_string())
        .unwrap_or_else(|| "N/A".to_string())
}
