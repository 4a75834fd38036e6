//! Hamming distance and approximate pattern matching.

use crate::error::{KmerError, Result};
use crate::kmer::kmer::validate_dna;

/// Count mismatching positions between two equal-length byte slices.
#[inline]
pub(crate) fn mismatches(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).filter(|(x, y)| x != y).count()
}

/// Like [`mismatches`] but stops counting once `limit` is exceeded.
#[inline]
pub(crate) fn within_distance(a: &[u8], b: &[u8], limit: usize) -> bool {
    let mut dist = 0;
    for (x, y) in a.iter().zip(b) {
        if x != y {
            dist += 1;
            if dist > limit {
                return false;
            }
        }
    }
    true
}

/// Hamming distance between two DNA strings of equal length.
pub fn hamming_distance(a: &str, b: &str) -> Result<usize> {
    if a.len() != b.len() {
        return Err(KmerError::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    validate_dna(a)?;
    validate_dna(b)?;
    Ok(mismatches(a.as_bytes(), b.as_bytes()))
}

/// Offsets of every window of `text` within `max_mismatches` of `pattern`.
///
/// All `n - m + 1` windows are scanned, including the one ending on the last
/// character of `text`.
pub fn approximate_pattern_positions(
    text: &str,
    pattern: &str,
    max_mismatches: usize,
) -> Result<Vec<usize>> {
    validate_dna(text)?;
    validate_dna(pattern)?;
    Ok(positions_unchecked(text.as_bytes(), pattern.as_bytes(), max_mismatches).collect())
}

/// Number of windows of `text` within `max_mismatches` of `pattern`.
pub fn approximate_pattern_count(
    text: &str,
    pattern: &str,
    max_mismatches: usize,
) -> Result<usize> {
    validate_dna(text)?;
    validate_dna(pattern)?;
    Ok(count_unchecked(text.as_bytes(), pattern.as_bytes(), max_mismatches))
}

fn positions_unchecked<'a>(
    text: &'a [u8],
    pattern: &'a [u8],
    max_mismatches: usize,
) -> impl Iterator<Item = usize> + 'a {
    // windows(0) panics, and an empty pattern has no meaningful occurrences
    let windows = if pattern.is_empty() || pattern.len() > text.len() {
        None
    } else {
        Some(text.windows(pattern.len()))
    };
    windows
        .into_iter()
        .flatten()
        .enumerate()
        .filter(move |(_, window)| within_distance(window, pattern, max_mismatches))
        .map(|(i, _)| i)
}

/// Approximate count over input already validated by the caller
pub(crate) fn count_unchecked(text: &[u8], pattern: &[u8], max_mismatches: usize) -> usize {
    positions_unchecked(text, pattern, max_mismatches).count()
}
