//! Heuristic demand projector: linear trend plus a fixed weekly-ish
//! oscillation with a widening confidence band. Deterministic for a
//! given history and horizon; not a statistical model.

use chrono::{Duration, NaiveDate, Utc};

use research_core::ForecastPoint;

const DEFAULT_HORIZON_DAYS: usize = 7;
/// History shorter than this is padded so the regression has a base.
const MIN_HISTORY_LEN: usize = 7;
const DEFAULT_SAMPLE: u32 = 50;
/// Amplitude and period of the seasonal term.
const SEASONAL_AMPLITUDE: f64 = 3.0;
const SEASONAL_PERIOD: f64 = 3.5;

pub struct ForecastGenerator {
    horizon: usize,
}

impl Default for ForecastGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl ForecastGenerator {
    pub fn new() -> Self {
        Self {
            horizon: DEFAULT_HORIZON_DAYS,
        }
    }

    pub fn with_horizon(horizon: usize) -> Self {
        Self { horizon }
    }

    /// Project the history forward, dating points from today.
    pub fn forecast(&self, history: &[u32]) -> Vec<ForecastPoint> {
        self.forecast_from(history, Utc::now().date_naive())
    }

    /// Project the history forward from an explicit base date.
    pub fn forecast_from(&self, history: &[u32], base_date: NaiveDate) -> Vec<ForecastPoint> {
        let history = pad_history(history);
        let n = history.len();

        let slope = regression_slope(&history);
        let std_error = residual_std_error(&history, slope);
        let last_value = *history.last().unwrap_or(&DEFAULT_SAMPLE) as f64;

        (1..=self.horizon)
            .map(|day| {
                let offset = day as f64;
                let seasonal =
                    SEASONAL_AMPLITUDE * (offset * std::f64::consts::PI / SEASONAL_PERIOD).sin();
                let predicted = (last_value + slope * offset + seasonal).clamp(0.0, 100.0);

                // Band widens with horizon distance, floor 5 / ceiling 25
                let width = (std_error * 1.96 * (1.0 + offset / n as f64).sqrt() + 2.0 * offset)
                    .clamp(5.0, 25.0);

                ForecastPoint {
                    day: day as u32,
                    date: base_date + Duration::days(day as i64),
                    predicted: round1(predicted),
                    lower: round1((predicted - width).max(0.0)),
                    upper: round1((predicted + width).min(100.0)),
                    confidence: (95.0 - 3.0 * offset).max(0.0),
                }
            })
            .collect()
    }
}

/// Pad short histories to the regression minimum with the last-known
/// sample, or a neutral default when there is nothing at all.
fn pad_history(history: &[u32]) -> Vec<u32> {
    if history.len() >= MIN_HISTORY_LEN {
        return history.to_vec();
    }
    let fill = history.last().copied().unwrap_or(DEFAULT_SAMPLE);
    let mut padded = history.to_vec();
    padded.resize(MIN_HISTORY_LEN, fill);
    padded
}

/// Ordinary least-squares slope of the series against sample index.
fn regression_slope(history: &[u32]) -> f64 {
    let n = history.len();
    let x_mean = (n as f64 - 1.0) / 2.0;
    let y_mean = history.iter().map(|&v| v as f64).sum::<f64>() / n as f64;

    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for (i, &y) in history.iter().enumerate() {
        let dx = i as f64 - x_mean;
        numerator += dx * (y as f64 - y_mean);
        denominator += dx * dx;
    }

    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Residual standard error of the in-sample fit, with n-2 degrees of
/// freedom guarded for tiny samples.
fn residual_std_error(history: &[u32], slope: f64) -> f64 {
    let n = history.len();
    let x_mean = (n as f64 - 1.0) / 2.0;
    let y_mean = history.iter().map(|&v| v as f64).sum::<f64>() / n as f64;

    let sse: f64 = history
        .iter()
        .enumerate()
        .map(|(i, &y)| {
            let fitted = y_mean + slope * (i as f64 - x_mean);
            (y as f64 - fitted).powi(2)
        })
        .sum();

    (sse / (n as f64 - 2.0).max(1.0)).sqrt()
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
    }

    #[test]
    fn test_output_length_matches_horizon() {
        let history = [50, 52, 54, 53, 55, 56, 58];
        for horizon in [1, 7, 14, 30] {
            let forecast = ForecastGenerator::with_horizon(horizon)
                .forecast_from(&history, base_date());
            assert_eq!(forecast.len(), horizon);
        }
    }

    #[test]
    fn test_bounds_ordered_and_in_range() {
        let history = [20, 35, 90, 10, 60, 45, 70, 30, 80, 55];
        let forecast = ForecastGenerator::with_horizon(14).forecast_from(&history, base_date());

        for point in &forecast {
            assert!(point.lower <= point.predicted, "day {}", point.day);
            assert!(point.predicted <= point.upper, "day {}", point.day);
            for value in [point.lower, point.predicted, point.upper] {
                assert!((0.0..=100.0).contains(&value), "day {}", point.day);
            }
        }
    }

    #[test]
    fn test_confidence_non_increasing_and_non_negative() {
        let history = [50; 10];
        let forecast = ForecastGenerator::with_horizon(40).forecast_from(&history, base_date());

        for pair in forecast.windows(2) {
            assert!(pair[1].confidence <= pair[0].confidence);
        }
        for point in &forecast {
            assert!(point.confidence >= 0.0);
        }
        assert_eq!(forecast[0].confidence, 92.0);
    }

    #[test]
    fn test_deterministic_for_same_input() {
        let history = [40, 45, 43, 50, 48, 52, 51, 55];
        let generator = ForecastGenerator::new();
        let a = generator.forecast_from(&history, base_date());
        let b = generator.forecast_from(&history, base_date());

        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.predicted, y.predicted);
            assert_eq!(x.lower, y.lower);
            assert_eq!(x.upper, y.upper);
        }
    }

    #[test]
    fn test_rising_history_projects_upward() {
        // Strong clean uptrend: slope 5/sample dominates the seasonal term
        let history = [30, 35, 40, 45, 50, 55, 60];
        let forecast = ForecastGenerator::new().forecast_from(&history, base_date());

        assert!(forecast[0].predicted > 60.0);
        assert!(forecast.last().unwrap().predicted > forecast[0].predicted);
    }

    #[test]
    fn test_empty_history_uses_default_base() {
        let forecast = ForecastGenerator::new().forecast_from(&[], base_date());

        assert_eq!(forecast.len(), 7);
        for point in &forecast {
            // Flat 50 base, only the seasonal term moves it
            assert!((point.predicted - 50.0).abs() <= SEASONAL_AMPLITUDE);
            // No residual error, so the band floor applies
            assert!(point.upper - point.predicted <= 25.0);
        }
    }

    #[test]
    fn test_single_sample_padded_with_last_known() {
        let forecast = ForecastGenerator::new().forecast_from(&[80], base_date());
        assert_eq!(forecast.len(), 7);
        assert!((forecast[0].predicted - 80.0).abs() <= SEASONAL_AMPLITUDE);
    }

    #[test]
    fn test_band_floor_and_ceiling() {
        // Noiseless history: width is 2*day clamped to [5, 25]
        let history = [50; 10];
        let forecast = ForecastGenerator::with_horizon(15).forecast_from(&history, base_date());

        let first = &forecast[0];
        assert!((first.upper - first.predicted - 5.0).abs() < 0.11);
        let last = forecast.last().unwrap();
        assert!(last.upper - last.predicted <= 25.0);
    }

    #[test]
    fn test_dates_advance_daily() {
        let forecast = ForecastGenerator::new().forecast_from(&[50; 7], base_date());
        assert_eq!(forecast[0].date, base_date() + Duration::days(1));
        assert_eq!(forecast[6].date, base_date() + Duration::days(7));
    }
}
