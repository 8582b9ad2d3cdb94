pub mod niche;
pub mod opportunity;

pub use niche::{NicheScoreEngine, NicheScoreInput};
pub use opportunity::OpportunityScorer;
