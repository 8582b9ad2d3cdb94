pub mod categories;
pub mod error;
pub mod traits;
pub mod types;

pub use categories::*;
pub use error::*;
pub use traits::*;
pub use types::*;
