//! Neighbor generation: every k-mer within Hamming distance d of a reference.
//!
//! Two strategies produce identical sets:
//! - `Exhaustive` decodes all 4^k indices and keeps those within distance.
//!   Simple, but only usable for small k.
//! - `Iterative` grows the set one Hamming shell at a time from single-base
//!   substitutions, so its cost follows the size of the neighborhood rather
//!   than the size of the whole k-mer space.

use std::collections::BTreeSet;

use clap::ValueEnum;
use serde::Serialize;

use crate::error::{KmerError, Result};
use crate::kmer::distance::within_distance;
use crate::kmer::kmer::{
    decode_kmer, kmer_space, validate_dna, Kmer, MAX_ENUMERATION_K, MAX_SEARCH_SPACE, NUCLEOTIDES,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NeighborStrategy {
    /// Enumerate all 4^k strings and filter by distance
    Exhaustive,
    /// Extend the neighborhood one substitution shell at a time
    #[default]
    Iterative,
}

impl NeighborStrategy {
    pub fn neighbors(self, kmer: &str, max_mismatches: usize) -> Result<BTreeSet<Kmer>> {
        match self {
            NeighborStrategy::Exhaustive => neighbors(kmer, max_mismatches),
            NeighborStrategy::Iterative => neighbors_iterative(kmer, max_mismatches),
        }
    }
}

/// Number of strings within distance `d` of a k-mer: sum over i <= d of C(k, i) * 3^i.
///
/// Saturates at `u128::MAX` instead of overflowing.
pub fn neighborhood_size(k: usize, d: usize) -> u128 {
    let mut total: u128 = 1;
    let mut binom: u128 = 1;
    let mut pow3: u128 = 1;
    for i in 1..=d.min(k) {
        // C(k, i) = C(k, i - 1) * (k - i + 1) / i, exact at every step
        binom = match binom.checked_mul((k - i + 1) as u128) {
            Some(v) => v / i as u128,
            None => return u128::MAX,
        };
        pow3 = match pow3.checked_mul(3) {
            Some(v) => v,
            None => return u128::MAX,
        };
        let term = match binom.checked_mul(pow3) {
            Some(v) => v,
            None => return u128::MAX,
        };
        total = match total.checked_add(term) {
            Some(v) => v,
            None => return u128::MAX,
        };
    }
    total
}

/// All k-mers within `max_mismatches` of `kmer`, found by scanning the full 4^k space.
pub fn neighbors(kmer: &str, max_mismatches: usize) -> Result<BTreeSet<Kmer>> {
    validate_dna(kmer)?;
    let k = kmer.len();
    if k > MAX_ENUMERATION_K {
        return Err(KmerError::ExcessiveSearchSpace { k, limit: MAX_ENUMERATION_K });
    }

    let reference = kmer.as_bytes();
    let mut result = BTreeSet::new();
    for index in 0..kmer_space(k)? {
        let candidate = decode_kmer(index, k)?;
        if within_distance(candidate.as_bytes(), reference, max_mismatches) {
            result.insert(candidate);
        }
    }
    Ok(result)
}

/// `kmer` itself plus all 3k strings differing from it at exactly one position.
pub fn immediate_neighbors(kmer: &str) -> Result<BTreeSet<Kmer>> {
    validate_dna(kmer)?;
    Ok(substitutions(kmer.as_bytes()))
}

fn substitutions(kmer: &[u8]) -> BTreeSet<Kmer> {
    let mut result = BTreeSet::new();
    let mut buf = kmer.to_vec();
    for i in 0..buf.len() {
        let original = buf[i];
        for &nuc in NUCLEOTIDES.iter().filter(|&&n| n != original) {
            buf[i] = nuc;
            result.insert(ascii_to_kmer(&buf));
        }
        buf[i] = original;
    }
    result.insert(ascii_to_kmer(kmer));
    result
}

#[inline]
fn ascii_to_kmer(bytes: &[u8]) -> Kmer {
    bytes.iter().map(|&b| b as char).collect()
}

/// All k-mers within `max_mismatches` of `kmer`, built shell by shell.
///
/// Shell i holds the strings at distance exactly i; each new shell is the set
/// of single substitutions of the previous shell that are not already known.
pub fn neighbors_iterative(kmer: &str, max_mismatches: usize) -> Result<BTreeSet<Kmer>> {
    validate_dna(kmer)?;
    let k = kmer.len();
    let size = neighborhood_size(k, max_mismatches);
    if size > MAX_SEARCH_SPACE {
        return Err(KmerError::NeighborhoodTooLarge {
            k,
            d: max_mismatches,
            size,
            limit: MAX_SEARCH_SPACE,
        });
    }

    let mut result: BTreeSet<Kmer> = BTreeSet::new();
    result.insert(kmer.to_string());
    let mut shell: Vec<Kmer> = vec![kmer.to_string()];

    for _ in 0..max_mismatches.min(k) {
        let mut next = Vec::new();
        for member in &shell {
            for candidate in substitutions(member.as_bytes()) {
                if !result.contains(&candidate) {
                    result.insert(candidate.clone());
                    next.push(candidate);
                }
            }
        }
        if next.is_empty() {
            break;
        }
        shell = next;
    }

    Ok(result)
}
