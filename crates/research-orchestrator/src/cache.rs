use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::sync::RwLock;

use research_core::{HistoryRecord, KeywordAnalysis};

/// Entries older than this are treated as absent.
pub const CACHE_EXPIRY_HOURS: i64 = 24;

struct CacheEntry {
    result: KeywordAnalysis,
    cached_at: DateTime<Utc>,
}

/// Normalize a keyword to its cache identity: trimmed, lowercased.
pub fn normalize_keyword(keyword: &str) -> String {
    keyword.trim().to_lowercase()
}

/// Time-boxed keyword -> analysis store plus an append-only log of
/// scored keywords. Writes are last-write-wins per key; concurrent
/// duplicate analyses of the same keyword are accepted by design.
pub struct ResultCache {
    entries: DashMap<String, CacheEntry>,
    history: RwLock<Vec<HistoryRecord>>,
    expiry_hours: i64,
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultCache {
    pub fn new() -> Self {
        Self::with_expiry_hours(CACHE_EXPIRY_HOURS)
    }

    pub fn with_expiry_hours(expiry_hours: i64) -> Self {
        Self {
            entries: DashMap::new(),
            history: RwLock::new(Vec::new()),
            expiry_hours,
        }
    }

    /// Fresh entry for the keyword, or `None` if absent or expired.
    pub fn get(&self, keyword: &str) -> Option<KeywordAnalysis> {
        let key = normalize_keyword(keyword);
        let entry = self.entries.get(&key)?;
        let age = Utc::now() - entry.cached_at;
        if age.num_hours() < self.expiry_hours {
            Some(entry.result.clone())
        } else {
            None
        }
    }

    /// Unconditionally overwrite any prior entry for the keyword.
    pub fn put(&self, keyword: &str, result: KeywordAnalysis) {
        self.entries.insert(
            normalize_keyword(keyword),
            CacheEntry {
                result,
                cached_at: Utc::now(),
            },
        );
    }

    /// Append to the scored-keyword log. Independent of the cache and
    /// never expires.
    pub fn append_history(&self, keyword: &str, score: u32) {
        if let Ok(mut history) = self.history.write() {
            history.push(HistoryRecord {
                keyword: keyword.to_string(),
                timestamp: Utc::now(),
                score,
            });
        } else {
            tracing::warn!("History log poisoned; dropping record for '{}'", keyword);
        }
    }

    /// Most recent records first, truncated to `limit`.
    pub fn history(&self, limit: usize) -> Vec<HistoryRecord> {
        match self.history.read() {
            Ok(history) => history.iter().rev().take(limit).cloned().collect(),
            Err(_) => Vec::new(),
        }
    }

    /// All fresh cached analyses, newest first (for export).
    pub fn fresh_entries(&self) -> Vec<KeywordAnalysis> {
        let mut entries: Vec<(DateTime<Utc>, KeywordAnalysis)> = self
            .entries
            .iter()
            .filter(|e| (Utc::now() - e.cached_at).num_hours() < self.expiry_hours)
            .map(|e| (e.cached_at, e.result.clone()))
            .collect();
        entries.sort_by(|a, b| b.0.cmp(&a.0));
        entries.into_iter().map(|(_, r)| r).collect()
    }

    /// Empty both the cache and the history log.
    pub fn clear(&self) {
        self.entries.clear();
        if let Ok(mut history) = self.history.write() {
            history.clear();
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use research_core::{
        CompetitionIndex, CompetitionLevel, DataQuality, DemandSnapshot, GrowthMetrics,
        MarketStatus, OpportunityScore, StabilityLevel, SupplySnapshot, TrendDirection,
        TrendStrength,
    };

    fn sample_analysis(keyword: &str) -> KeywordAnalysis {
        KeywordAnalysis {
            keyword: keyword.to_string(),
            demand_score: 60,
            demand: DemandSnapshot {
                current: 60,
                average: 55.0,
                max: 70,
                min: 40,
                momentum: 5.0,
                direction: TrendDirection::Stable,
                history: vec![50, 55, 60, 60],
                data_points: 4,
                quality: DataQuality::Measured,
            },
            supply_count: 12_000,
            supply: SupplySnapshot {
                sources: Default::default(),
                aggregate_total: 12_000,
                sources_available: 0,
                quality: DataQuality::Estimated,
            },
            opportunity_score: 50,
            opportunity: OpportunityScore {
                raw: 50,
                normalized: 0.5,
                status: MarketStatus::RedOcean,
                color: "red".to_string(),
                analysis: String::new(),
                recommendation: String::new(),
            },
            status: MarketStatus::RedOcean,
            growth: 5.0,
            growth_metrics: GrowthMetrics {
                week_over_week: 5.0,
                month_over_month: 5.0,
                volatility: 4.0,
                trend_strength: TrendStrength::Weak,
                stability: StabilityLevel::High,
            },
            trend: TrendDirection::Stable,
            competition: CompetitionIndex {
                level: CompetitionLevel::Moderate,
                score: 60,
                total_supply: 12_000,
                sources_checked: 0,
                advice: String::new(),
            },
            forecast: Vec::new(),
            free_saturation: 30,
            data_quality: DataQuality::Measured,
            analyzed_at: Utc::now(),
            from_cache: false,
        }
    }

    #[test]
    fn test_put_then_get_within_window() {
        let cache = ResultCache::new();
        cache.put("Minimalist", sample_analysis("Minimalist"));

        let hit = cache.get("Minimalist").unwrap();
        assert_eq!(hit.keyword, "Minimalist");
        assert_eq!(hit.demand_score, 60);
    }

    #[test]
    fn test_keyword_identity_is_case_insensitive() {
        let cache = ResultCache::new();
        cache.put("Minimalist", sample_analysis("Minimalist"));

        assert!(cache.get("minimalist").is_some());
        assert!(cache.get("  MINIMALIST  ").is_some());
        assert!(cache.get("maximalist").is_none());
    }

    #[test]
    fn test_expired_entry_is_absent() {
        let cache = ResultCache::with_expiry_hours(0);
        cache.put("drone", sample_analysis("drone"));
        assert!(cache.get("drone").is_none());
    }

    #[test]
    fn test_put_overwrites() {
        let cache = ResultCache::new();
        cache.put("yoga", sample_analysis("yoga"));

        let mut updated = sample_analysis("yoga");
        updated.demand_score = 99;
        cache.put("Yoga", updated);

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("yoga").unwrap().demand_score, 99);
    }

    #[test]
    fn test_history_is_append_only_and_newest_first() {
        let cache = ResultCache::new();
        cache.append_history("first", 100);
        cache.append_history("second", 200);
        cache.append_history("third", 300);

        let records = cache.history(2);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].keyword, "third");
        assert_eq!(records[1].keyword, "second");
    }

    #[test]
    fn test_clear_empties_cache_and_history() {
        let cache = ResultCache::new();
        cache.put("a", sample_analysis("a"));
        cache.append_history("a", 1);

        cache.clear();

        assert!(cache.is_empty());
        assert!(cache.get("a").is_none());
        assert!(cache.history(10).is_empty());
    }

    #[test]
    fn test_fresh_entries_skips_expired() {
        let cache = ResultCache::with_expiry_hours(0);
        cache.put("stale", sample_analysis("stale"));
        assert!(cache.fresh_entries().is_empty());
    }
}
