//! Crate-wide error type. Programming-error conditions (hash
//! inconsistency, malformed task input) fail fast with a diagnostic;
//! nothing in this crate retries, since every task is deterministic
//! given the Zobrist tables and the current monotonicity (see
//! ERROR HANDLING DESIGN in the spec).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("bin configuration hash inconsistency: incremental {incremental:#x} != recomputed {recomputed:#x}")]
    HashMismatch { incremental: u64, recomputed: u64 },

    #[error("loads not sorted non-increasingly at position {position}")]
    LoadsNotSorted { position: usize },

    #[error("invalid game parameters: {0}")]
    InvalidParams(String),

    #[error("cache construction failed: {0}")]
    CacheConstruction(String),

    #[error("malformed task at line {line}: {message}")]
    MalformedTask { line: usize, message: String },

    #[error("messaging channel closed unexpectedly")]
    ChannelClosed,

    #[error("system time error: {0}")]
    Time(#[from] std::time::SystemTimeError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
