use research_core::{DemandSnapshot, GrowthMetrics, StabilityLevel, TrendStrength};

use crate::stats::{mean, std_dev};

/// Placeholder volatility when the history is too short to measure.
const FALLBACK_VOLATILITY: f64 = 10.0;

/// Computes week-over-week / month-over-month growth and a volatility
/// profile from a demand snapshot's history.
#[derive(Debug, Default)]
pub struct GrowthAnalyzer;

impl GrowthAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, snapshot: &DemandSnapshot) -> GrowthMetrics {
        let history = &snapshot.history;

        if history.len() < 4 {
            // Too short to compare windows; lean on the estimator's
            // momentum instead.
            return GrowthMetrics {
                week_over_week: snapshot.momentum,
                month_over_month: snapshot.momentum,
                volatility: FALLBACK_VOLATILITY,
                trend_strength: TrendStrength::Unknown,
                stability: StabilityLevel::Unknown,
            };
        }

        let recent = mean(&history[history.len() - 4..]);
        let older = if history.len() >= 8 {
            mean(&history[..4])
        } else {
            history[0] as f64
        };
        let wow = (recent - older) / older.max(1.0) * 100.0;

        let mom = if history.len() >= 12 {
            let last_month = recent;
            let prev_month = mean(&history[history.len() - 8..history.len() - 4]);
            (last_month - prev_month) / prev_month.max(1.0) * 100.0
        } else {
            wow
        };

        let volatility = std_dev(history);

        let trend_strength = if wow.abs() > 20.0 {
            TrendStrength::Strong
        } else if wow.abs() > 10.0 {
            TrendStrength::Moderate
        } else {
            TrendStrength::Weak
        };

        GrowthMetrics {
            week_over_week: round1(wow),
            month_over_month: round1(mom),
            volatility: round1(volatility),
            trend_strength,
            stability: StabilityLevel::from_volatility(volatility),
        }
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use research_core::{DataQuality, TrendDirection};

    fn snapshot_with_history(history: Vec<u32>, momentum: f64) -> DemandSnapshot {
        let current = history.last().copied().unwrap_or(50);
        DemandSnapshot {
            current,
            average: mean(&history),
            max: history.iter().max().copied().unwrap_or(current),
            min: history.iter().min().copied().unwrap_or(current),
            momentum,
            direction: TrendDirection::from_momentum(momentum),
            data_points: history.len(),
            history,
            quality: DataQuality::Measured,
        }
    }

    #[test]
    fn test_wow_growth_step_series() {
        let analyzer = GrowthAnalyzer::new();
        let snap = snapshot_with_history(vec![50, 50, 50, 50, 70, 70, 70, 70], 0.0);
        let metrics = analyzer.analyze(&snap);

        // (70 - 50) / 50 * 100 = 40
        assert!((metrics.week_over_week - 40.0).abs() < 1e-9);
        assert_eq!(metrics.trend_strength, TrendStrength::Strong);
    }

    #[test]
    fn test_short_history_uses_first_sample_baseline() {
        let analyzer = GrowthAnalyzer::new();
        // 4..8 samples: baseline is the first sample, not a window mean
        let snap = snapshot_with_history(vec![50, 60, 60, 60, 60], 0.0);
        let metrics = analyzer.analyze(&snap);

        // (60 - 50) / 50 * 100 = 20
        assert!((metrics.week_over_week - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_mom_compares_adjacent_windows() {
        let analyzer = GrowthAnalyzer::new();
        let snap = snapshot_with_history(
            vec![50, 50, 50, 50, 40, 40, 40, 40, 60, 60, 60, 60],
            0.0,
        );
        let metrics = analyzer.analyze(&snap);

        // mom: (60 - 40) / 40 * 100 = 50
        assert!((metrics.month_over_month - 50.0).abs() < 1e-9);
        // wow: (60 - 50) / 50 * 100 = 20
        assert!((metrics.week_over_week - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_mom_falls_back_to_wow_when_short() {
        let analyzer = GrowthAnalyzer::new();
        let snap = snapshot_with_history(vec![50, 50, 50, 50, 55, 55, 55, 55], 0.0);
        let metrics = analyzer.analyze(&snap);
        assert_eq!(metrics.week_over_week, metrics.month_over_month);
    }

    #[test]
    fn test_flat_history_is_stable() {
        let analyzer = GrowthAnalyzer::new();
        let snap = snapshot_with_history(vec![60; 12], 0.0);
        let metrics = analyzer.analyze(&snap);

        assert_eq!(metrics.volatility, 0.0);
        assert_eq!(metrics.stability, StabilityLevel::High);
        assert_eq!(metrics.trend_strength, TrendStrength::Weak);
    }

    #[test]
    fn test_too_few_samples_falls_back_to_momentum() {
        let analyzer = GrowthAnalyzer::new();
        let snap = snapshot_with_history(vec![50, 60, 70], 12.5);
        let metrics = analyzer.analyze(&snap);

        assert_eq!(metrics.week_over_week, 12.5);
        assert_eq!(metrics.month_over_month, 12.5);
        assert_eq!(metrics.volatility, FALLBACK_VOLATILITY);
        assert_eq!(metrics.trend_strength, TrendStrength::Unknown);
        assert_eq!(metrics.stability, StabilityLevel::Unknown);
    }

    #[test]
    fn test_volatile_history_is_low_stability() {
        let analyzer = GrowthAnalyzer::new();
        let snap = snapshot_with_history(vec![10, 90, 10, 90, 10, 90, 10, 90], 0.0);
        let metrics = analyzer.analyze(&snap);

        assert!(metrics.volatility >= 20.0);
        assert_eq!(metrics.stability, StabilityLevel::Low);
    }
}
