use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::categories::Seasonality;

/// Where a demand or supply observation came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataQuality {
    /// Built from a real upstream observation.
    Measured,
    /// Synthesized fallback, flagged so consumers can discount it.
    Estimated,
}

impl DataQuality {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataQuality::Measured => "measured",
            DataQuality::Estimated => "estimated",
        }
    }

    pub fn is_measured(&self) -> bool {
        matches!(self, DataQuality::Measured)
    }
}

/// Direction of the demand trend over the observed window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Rising,
    Stable,
    Falling,
}

impl TrendDirection {
    /// Classify momentum (percent change) into a direction.
    pub fn from_momentum(momentum: f64) -> Self {
        if momentum > 10.0 {
            TrendDirection::Rising
        } else if momentum < -10.0 {
            TrendDirection::Falling
        } else {
            TrendDirection::Stable
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TrendDirection::Rising => "rising",
            TrendDirection::Stable => "stable",
            TrendDirection::Falling => "falling",
        }
    }
}

/// Normalized search-interest snapshot for a keyword (0-100 scale).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemandSnapshot {
    /// Most recent popularity sample.
    pub current: u32,
    pub average: f64,
    pub max: u32,
    pub min: u32,
    /// Percent change of the recent window vs the oldest window.
    pub momentum: f64,
    pub direction: TrendDirection,
    /// Chronological popularity samples, oldest first. Never empty.
    pub history: Vec<u32>,
    pub data_points: usize,
    pub quality: DataQuality,
}

/// One catalog's contribution to the supply picture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplySourceCount {
    pub name: String,
    pub count: u64,
    pub weight: f64,
}

/// Blended asset-count snapshot across catalogs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplySnapshot {
    /// Per-source breakdown, keyed by source id. Empty when every
    /// catalog was unreachable.
    pub sources: BTreeMap<String, SupplySourceCount>,
    /// Weighted blend of the available counts, or a flagged estimate.
    pub aggregate_total: u64,
    pub sources_available: usize,
    pub quality: DataQuality,
}

/// Three-way market classification by demand/supply ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketStatus {
    #[serde(rename = "Blue Ocean")]
    BlueOcean,
    Neutral,
    #[serde(rename = "Red Ocean")]
    RedOcean,
}

impl MarketStatus {
    pub fn from_raw_score(raw: u32) -> Self {
        match raw {
            r if r >= 1000 => MarketStatus::BlueOcean,
            r if r >= 300 => MarketStatus::Neutral,
            _ => MarketStatus::RedOcean,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MarketStatus::BlueOcean => "Blue Ocean",
            MarketStatus::Neutral => "Neutral",
            MarketStatus::RedOcean => "Red Ocean",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            MarketStatus::BlueOcean => "cyan",
            MarketStatus::Neutral => "amber",
            MarketStatus::RedOcean => "red",
        }
    }

    pub fn recommendation(&self) -> &'static str {
        match self {
            MarketStatus::BlueOcean => "Highly recommended for production",
            MarketStatus::Neutral => "Consider with unique angle",
            MarketStatus::RedOcean => "Avoid unless highly specialized",
        }
    }
}

/// Demand/supply ratio score with status and advisory text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpportunityScore {
    pub raw: u32,
    /// Raw score compressed onto [0, 100].
    pub normalized: f64,
    pub status: MarketStatus,
    pub color: String,
    pub analysis: String,
    pub recommendation: String,
}

/// Qualitative strength of the week-over-week move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendStrength {
    Strong,
    Moderate,
    Weak,
    Unknown,
}

/// Inverse-volatility stability label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StabilityLevel {
    High,
    Medium,
    Low,
    Unknown,
}

impl StabilityLevel {
    pub fn from_volatility(volatility: f64) -> Self {
        if volatility < 10.0 {
            StabilityLevel::High
        } else if volatility < 20.0 {
            StabilityLevel::Medium
        } else {
            StabilityLevel::Low
        }
    }
}

/// Growth profile derived from a demand history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrowthMetrics {
    pub week_over_week: f64,
    pub month_over_month: f64,
    /// Population standard deviation of the history.
    pub volatility: f64,
    pub trend_strength: TrendStrength,
    pub stability: StabilityLevel,
}

/// Competition bucket for an aggregate supply total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompetitionLevel {
    #[serde(rename = "Very Low")]
    VeryLow,
    Low,
    Moderate,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
    Extreme,
}

impl CompetitionLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompetitionLevel::VeryLow => "Very Low",
            CompetitionLevel::Low => "Low",
            CompetitionLevel::Moderate => "Moderate",
            CompetitionLevel::High => "High",
            CompetitionLevel::VeryHigh => "Very High",
            CompetitionLevel::Extreme => "Extreme",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompetitionIndex {
    pub level: CompetitionLevel,
    pub score: u32,
    pub total_supply: u64,
    pub sources_checked: usize,
    pub advice: String,
}

/// One projected day in the demand forecast.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastPoint {
    /// Days ahead of the last observed sample, 1-based.
    pub day: u32,
    pub date: NaiveDate,
    pub predicted: f64,
    pub lower: f64,
    pub upper: f64,
    /// Shrinks as the horizon extends; never negative.
    pub confidence: f64,
}

/// Letter grade for a composite niche score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    S,
    A,
    B,
    C,
    D,
}

impl Tier {
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 80.0 => Tier::S,
            s if s >= 65.0 => Tier::A,
            s if s >= 50.0 => Tier::B,
            s if s >= 35.0 => Tier::C,
            _ => Tier::D,
        }
    }

    pub fn recommendation(&self) -> &'static str {
        match self {
            Tier::S => "Hot Opportunity - Act Now!",
            Tier::A => "Highly Recommended",
            Tier::B => "Worth Exploring",
            Tier::C => "Moderate Potential",
            Tier::D => "Low Priority",
        }
    }
}

/// The five sub-scores of the composite niche score, each in [0, 100].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoreComponents {
    pub opportunity: f64,
    pub growth: f64,
    pub competition: f64,
    pub seasonality: f64,
    pub stability: f64,
}

/// Fixed component weights. Must sum to exactly 1.0.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub opportunity: f64,
    pub growth: f64,
    pub competition: f64,
    pub seasonality: f64,
    pub stability: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            opportunity: 0.35,
            growth: 0.25,
            competition: 0.20,
            seasonality: 0.10,
            stability: 0.10,
        }
    }
}

impl ScoreWeights {
    pub fn sum(&self) -> f64 {
        self.opportunity + self.growth + self.competition + self.seasonality + self.stability
    }
}

/// Full multi-factor niche score with audit trail.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub final_score: f64,
    pub components: ScoreComponents,
    pub weights: ScoreWeights,
    pub confidence: f64,
    pub tier: Tier,
    pub recommendation: String,
    pub growth_factor_applied: f64,
    pub seasonality_type: Seasonality,
    pub data_source: DataQuality,
}

/// Complete single-keyword analysis, immutable once produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordAnalysis {
    pub keyword: String,
    pub demand_score: u32,
    pub demand: DemandSnapshot,
    pub supply_count: u64,
    pub supply: SupplySnapshot,
    pub opportunity_score: u32,
    pub opportunity: OpportunityScore,
    pub status: MarketStatus,
    /// Week-over-week growth, surfaced at the top level for summaries.
    pub growth: f64,
    pub growth_metrics: GrowthMetrics,
    pub trend: TrendDirection,
    pub competition: CompetitionIndex,
    pub forecast: Vec<ForecastPoint>,
    /// How saturated the free-catalog segment looks, 0-100.
    pub free_saturation: u32,
    pub data_quality: DataQuality,
    pub analyzed_at: DateTime<Utc>,
    pub from_cache: bool,
}

/// Append-only record of a scored keyword.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub keyword: String,
    pub timestamp: DateTime<Utc>,
    pub score: u32,
}

/// One discovered niche with its composite score.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NicheEntry {
    pub keyword: String,
    pub category: String,
    pub demand: u32,
    pub supply: u64,
    pub growth: f64,
    #[serde(flatten)]
    pub breakdown: ScoreBreakdown,
}

/// Discovery output: ranked niches plus summary statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryReport {
    pub niches: Vec<NicheEntry>,
    pub total_analyzed: usize,
    pub average_score: f64,
    /// Dominant category among the top five results.
    pub top_category: String,
    pub s_tier_count: usize,
    pub a_tier_count: usize,
    pub categories: Vec<String>,
}
