use research_core::{MarketStatus, OpportunityScore};

/// Supply below this is treated as maximal opportunity, which also
/// keeps the ratio from blowing up near zero.
const LOW_SUPPLY_FLOOR: u64 = 100;
const MAX_RAW_SCORE: u32 = 10_000;

/// Computes the demand/supply ratio score and three-way market status.
#[derive(Debug, Default)]
pub struct OpportunityScorer;

impl OpportunityScorer {
    pub fn new() -> Self {
        Self
    }

    pub fn score(&self, demand: u32, supply: u64) -> OpportunityScore {
        let (raw, analysis) = if supply < LOW_SUPPLY_FLOOR {
            (MAX_RAW_SCORE, "Very low supply - high opportunity")
        } else {
            let raw = (demand as f64 / supply as f64 * 10_000.0).round() as u32;
            let analysis = match raw {
                r if r >= 2_000 => "Excellent demand/supply ratio",
                r if r >= 1_000 => "Good opportunity - moderate competition",
                r if r >= 500 => "Average market - consider niche variations",
                r if r >= 300 => "Competitive market - need differentiation",
                _ => "Saturated market - high competition",
            };
            (raw, analysis)
        };

        let status = MarketStatus::from_raw_score(raw);

        OpportunityScore {
            raw,
            normalized: (raw as f64 / 100.0).min(100.0),
            status,
            color: status.color().to_string(),
            analysis: analysis.to_string(),
            recommendation: status.recommendation().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_supply_is_blue_ocean() {
        let scorer = OpportunityScorer::new();
        let score = scorer.score(50, 0);

        assert_eq!(score.raw, 10_000);
        assert_eq!(score.status, MarketStatus::BlueOcean);
        assert_eq!(score.normalized, 100.0);
    }

    #[test]
    fn test_near_zero_supply_treated_the_same() {
        let scorer = OpportunityScorer::new();
        assert_eq!(scorer.score(10, 99).raw, 10_000);
        // 100 is past the floor: 10/100*10000 = 1000
        assert_eq!(scorer.score(10, 100).raw, 1_000);
    }

    #[test]
    fn test_ratio_score() {
        let scorer = OpportunityScorer::new();
        // 80 / 20000 * 10000 = 40
        let score = scorer.score(80, 20_000);
        assert_eq!(score.raw, 40);
        assert_eq!(score.status, MarketStatus::RedOcean);
        assert!((score.normalized - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_status_bands() {
        let scorer = OpportunityScorer::new();
        // 60 / 600 * 10000 = 1000 -> Blue Ocean
        assert_eq!(scorer.score(60, 600).status, MarketStatus::BlueOcean);
        // 30 / 1000 * 10000 = 300 -> Neutral
        assert_eq!(scorer.score(30, 1_000).status, MarketStatus::Neutral);
        // 20 / 1000 * 10000 = 200 -> Red Ocean
        assert_eq!(scorer.score(20, 1_000).status, MarketStatus::RedOcean);
    }

    #[test]
    fn test_auxiliary_text_does_not_change_status() {
        let scorer = OpportunityScorer::new();
        // 2500 raw: "excellent" analysis band, same Blue Ocean status
        let score = scorer.score(50, 200);
        assert_eq!(score.raw, 2_500);
        assert_eq!(score.status, MarketStatus::BlueOcean);
        assert_eq!(score.analysis, "Excellent demand/supply ratio");
    }
}
