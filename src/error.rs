//! Error types shared by the k-mer analysis routines.

use thiserror::Error;

/// Errors raised while validating or analysing DNA input.
#[derive(Debug, Error)]
pub enum KmerError {
    /// A character outside {A,C,G,T}
    #[error("invalid nucleotide '{symbol}' at position {position}")]
    InvalidSymbol { symbol: char, position: usize },

    /// Hamming distance requested for strings of different length
    #[error("length mismatch: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    /// Enumeration over 4^k strings would exceed the configured bound
    #[error("search space too large for k = {k} (limit k = {limit})")]
    ExcessiveSearchSpace { k: usize, limit: usize },

    /// A d-neighborhood with more strings than the enumeration bound
    #[error("neighborhood of {size} strings for k = {k}, d = {d} exceeds limit {limit}")]
    NeighborhoodTooLarge { k: usize, d: usize, size: u128, limit: u128 },

    /// Out-of-range numeric arguments
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, KmerError>;
