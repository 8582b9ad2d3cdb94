use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResearchError {
    /// A demand or supply provider failed. Callers degrade to flagged
    /// synthetic data instead of propagating this to the client.
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Cache/history access failed; treated as a cache miss.
    #[error("Storage failure: {0}")]
    StorageFailure(String),

    #[error("Insufficient data: {0}")]
    InsufficientData(String),
}
