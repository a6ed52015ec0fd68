use thiserror::Error;

/// Core error type shared across Starscan crates.
#[derive(Debug, Error)]
pub enum Error {
    /// Database error from the metadata provider or scan executor.
    #[error("database error: {0}")]
    Db(String),
    /// The warehouse metadata violates internal invariants.
    #[error("invalid metadata: {0}")]
    InvalidMetadata(String),
    /// A requested capability is not supported.
    #[error("unsupported: {0}")]
    Unsupported(String),
    /// Catch-all error for unexpected failures.
    #[error("other error: {0}")]
    Other(String),
}

/// Convenience alias for results returned by Starscan crates.
pub type Result<T> = std::result::Result<T, Error>;
