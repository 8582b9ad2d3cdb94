pub mod aggregator;
pub mod competition;
pub mod sources;

pub use aggregator::SupplyAggregator;
pub use competition::CompetitionIndexer;
pub use sources::{SupplySourceConfig, SUPPLY_SOURCES};
