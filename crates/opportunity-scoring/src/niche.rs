use demand_analysis::stats::std_dev;
use research_core::{
    DataQuality, NicheCategory, ScoreBreakdown, ScoreComponents, ScoreWeights, Seasonality, Tier,
};

/// Everything the composite score needs for one keyword.
#[derive(Debug, Clone, Copy)]
pub struct NicheScoreInput<'a> {
    /// Current popularity, 0-100.
    pub demand: u32,
    /// Aggregate asset count across catalogs.
    pub supply: u64,
    /// Growth percent, typically week-over-week.
    pub growth: f64,
    /// Demand history for the stability component.
    pub history: &'a [u32],
    pub category: &'a NicheCategory,
    /// Calendar month, 1-12, for the seasonality component.
    pub month: u32,
    pub data_source: DataQuality,
}

/// The central aggregator: five weighted sub-scores combined into one
/// composite score, letter tier, and confidence estimate.
#[derive(Debug, Default)]
pub struct NicheScoreEngine {
    weights: ScoreWeights,
}

impl NicheScoreEngine {
    pub fn new() -> Self {
        Self {
            weights: ScoreWeights::default(),
        }
    }

    pub fn score(&self, input: &NicheScoreInput<'_>) -> ScoreBreakdown {
        let components = ScoreComponents {
            opportunity: self.opportunity_component(input.demand, input.supply),
            growth: self.growth_component(input.growth, input.category.growth_factor),
            competition: self.competition_component(input.supply),
            seasonality: self.seasonality_component(input.category.seasonality, input.month),
            stability: self.stability_component(input.history),
        };

        let final_score = components.opportunity * self.weights.opportunity
            + components.growth * self.weights.growth
            + components.competition * self.weights.competition
            + components.seasonality * self.weights.seasonality
            + components.stability * self.weights.stability;
        let final_score = round1(final_score);

        // Synthetic demand data never earns near-certain confidence
        let base = if input.data_source.is_measured() {
            85.0
        } else {
            55.0
        };
        let confidence = (base + input.demand as f64 / 10.0).min(95.0);

        let tier = Tier::from_score(final_score);

        ScoreBreakdown {
            final_score,
            components: ScoreComponents {
                opportunity: round1(components.opportunity),
                growth: round1(components.growth),
                competition: round1(components.competition),
                seasonality: round1(components.seasonality),
                stability: round1(components.stability),
            },
            weights: self.weights,
            confidence: round1(confidence),
            tier,
            recommendation: tier.recommendation().to_string(),
            growth_factor_applied: input.category.growth_factor,
            seasonality_type: input.category.seasonality,
            data_source: input.data_source,
        }
    }

    fn opportunity_component(&self, demand: u32, supply: u64) -> f64 {
        if supply == 0 {
            return 100.0;
        }
        (demand as f64 / supply as f64 * 1000.0).min(100.0)
    }

    /// Normalize growth from the [-30, +50] band onto [0, 100], then
    /// apply the category multiplier.
    fn growth_component(&self, growth: f64, growth_factor: f64) -> f64 {
        let normalized = (growth + 30.0) * (100.0 / 80.0);
        (normalized.clamp(0.0, 100.0) * growth_factor).min(100.0)
    }

    fn competition_component(&self, supply: u64) -> f64 {
        match supply {
            s if s <= 500 => 100.0,
            s if s <= 5_000 => 85.0,
            s if s <= 20_000 => 65.0,
            s if s <= 100_000 => 40.0,
            s => (100.0 - (s as f64).log10() * 15.0).max(5.0),
        }
    }

    /// Rewards analyzing seasonal keywords during their actual season.
    fn seasonality_component(&self, seasonality: Seasonality, month: u32) -> f64 {
        if seasonality.is_peak_month(month) {
            match seasonality {
                Seasonality::VeryHigh => 90.0,
                Seasonality::High => 70.0,
                _ => 50.0,
            }
        } else {
            match seasonality {
                Seasonality::VeryHigh => 40.0,
                Seasonality::High => 50.0,
                _ => 60.0,
            }
        }
    }

    fn stability_component(&self, history: &[u32]) -> f64 {
        if history.len() >= 4 {
            (100.0 - std_dev(history) * 3.0).max(0.0)
        } else {
            50.0
        }
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
