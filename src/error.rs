//! Error types for chunk-life.

use thiserror::Error;

/// Errors surfaced by engine construction, I/O and the command line.
#[derive(Debug, Error)]
pub enum LifeError {
    /// Chunk seed size must be a positive integer.
    #[error("invalid chunk size {0}: must be positive")]
    InvalidChunkSize(i64),

    /// The evolve thread pool could not be built.
    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// A coordinate line could not be parsed.
    #[error("line {line}: cannot parse {input:?}: {reason}")]
    Parse {
        line: usize,
        input: String,
        reason: String,
    },

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Bad command line.
    #[error("{0}")]
    Usage(String),
}

/// Result type for chunk-life operations.
pub type LifeResult<T> = Result<T, LifeError>;
