use research_core::{CompetitionIndex, CompetitionLevel};

/// Buckets an aggregate supply total into a competition level. The
/// buckets cover every total: exclusive upper bounds, no gaps.
#[derive(Debug, Default)]
pub struct CompetitionIndexer;

impl CompetitionIndexer {
    pub fn new() -> Self {
        Self
    }

    pub fn index(&self, total_supply: u64, sources_checked: usize) -> CompetitionIndex {
        let (level, score, advice) = match total_supply {
            t if t < 1_000 => (
                CompetitionLevel::VeryLow,
                95,
                "Excellent opportunity - first mover advantage",
            ),
            t if t < 5_000 => (
                CompetitionLevel::Low,
                80,
                "Good niche - limited competition",
            ),
            t if t < 20_000 => (
                CompetitionLevel::Moderate,
                60,
                "Standard market - quality matters",
            ),
            t if t < 100_000 => (
                CompetitionLevel::High,
                35,
                "Competitive - need unique perspective",
            ),
            t if t < 500_000 => (
                CompetitionLevel::VeryHigh,
                15,
                "Saturated - consider niche variations",
            ),
            _ => (
                CompetitionLevel::Extreme,
                5,
                "Oversaturated - avoid unless exceptional",
            ),
        };

        CompetitionIndex {
            level,
            score,
            total_supply,
            sources_checked,
            advice: advice.to_string(),
        }
    }
}
