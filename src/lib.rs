//! oriscan: k-mer frequency, approximate matching and GC-skew analysis.

pub mod error;
pub mod io;
pub mod kmer;
pub mod report;

pub use error::{KmerError, Result};
