pub mod estimator;
pub mod growth;
pub mod stats;

pub use estimator::TrendSignalEstimator;
pub use growth::GrowthAnalyzer;
