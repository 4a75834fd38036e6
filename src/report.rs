//! Serializable result records printed by the command-line tool.
//!
//! `Display` renders the space-separated answer line; `--json` prints the
//! whole record with serde_json instead.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use crate::kmer::{FrequencyMethod, Kmer, NeighborStrategy};

fn write_joined<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct FrequentReport {
    pub k: usize,
    pub mismatches: usize,
    pub reverse_complement: bool,
    /// Only meaningful for exact search
    pub method: Option<FrequencyMethod>,
    pub kmers: Vec<Kmer>,
}

impl FrequentReport {
    pub fn new(
        k: usize,
        mismatches: usize,
        reverse_complement: bool,
        kmers: BTreeSet<Kmer>,
    ) -> Self {
        Self {
            k,
            mismatches,
            reverse_complement,
            method: None,
            kmers: kmers.into_iter().collect(),
        }
    }

    pub fn with_method(mut self, method: FrequencyMethod) -> Self {
        self.method = Some(method);
        self
    }
}

impl fmt::Display for FrequentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_joined(f, &self.kmers)
    }
}

#[derive(Debug, Serialize)]
pub struct PositionsReport {
    pub pattern: String,
    pub mismatches: usize,
    pub count: usize,
    pub positions: Vec<usize>,
}

impl PositionsReport {
    pub fn new(pattern: &str, mismatches: usize, positions: Vec<usize>) -> Self {
        Self {
            pattern: pattern.to_string(),
            mismatches,
            count: positions.len(),
            positions,
        }
    }
}

impl fmt::Display for PositionsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_joined(f, &self.positions)
    }
}

#[derive(Debug, Serialize)]
pub struct NeighborReport {
    pub kmer: Kmer,
    pub mismatches: usize,
    pub strategy: NeighborStrategy,
    pub count: usize,
    pub neighbors: Vec<Kmer>,
}

impl NeighborReport {
    pub fn new(
        kmer: &str,
        mismatches: usize,
        strategy: NeighborStrategy,
        neighbors: BTreeSet<Kmer>,
    ) -> Self {
        Self {
            kmer: kmer.to_string(),
            mismatches,
            strategy,
            count: neighbors.len(),
            neighbors: neighbors.into_iter().collect(),
        }
    }
}

impl fmt::Display for NeighborReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_joined(f, &self.neighbors)
    }
}

#[derive(Debug, Serialize)]
pub struct ClumpReport {
    pub k: usize,
    pub window: usize,
    pub min_count: usize,
    pub kmers: Vec<Kmer>,
}

impl fmt::Display for ClumpReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_joined(f, &self.kmers)
    }
}

#[derive(Debug, Serialize)]
pub struct SkewReport {
    pub genome_length: usize,
    pub min_skew: Option<i64>,
    pub positions: Vec<usize>,
}

impl fmt::Display for SkewReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_joined(f, &self.positions)
    }
}
