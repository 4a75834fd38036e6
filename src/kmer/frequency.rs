//! Most-frequent k-mer search.
//!
//! Exact search comes in two flavours with the same contract: a brute-force
//! pairwise count and a sort-based count over encoded windows. The
//! mismatch-tolerant searches score every k-mer in the d-neighborhood of an
//! observed window, so the winners need not appear verbatim in the genome.

use std::collections::BTreeSet;

use ahash::AHashMap;
use clap::ValueEnum;
use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::error::{KmerError, Result};
use crate::kmer::complement::reverse_complement;
use crate::kmer::distance::count_unchecked;
use crate::kmer::kmer::{
    decode_kmer, encode_unchecked, kmer_space, validate_dna, Kmer, KmerIndex, MAX_ENCODE_K,
    MAX_ENUMERATION_K,
};
use crate::kmer::neighbors::neighbors_iterative;

/// Algorithm used for exact most-frequent k-mer search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FrequencyMethod {
    /// Pairwise rescans, O(n^2 k)
    Brute,
    /// Sort encoded windows and count runs
    #[default]
    Sort,
}

impl FrequencyMethod {
    pub fn most_frequent(self, text: &str, k: usize) -> Result<BTreeSet<Kmer>> {
        match self {
            FrequencyMethod::Brute => most_frequent_kmers(text, k),
            FrequencyMethod::Sort => most_frequent_kmers_by_sorting(text, k),
        }
    }
}

fn check_k(k: usize) -> Result<()> {
    if k == 0 {
        return Err(KmerError::InvalidInput("k-mer size must be at least 1".into()));
    }
    Ok(())
}

#[inline]
fn to_kmer(window: &[u8]) -> Kmer {
    window.iter().map(|&b| b as char).collect()
}

/// Most frequent k-mers by brute force: each of the `n - k + 1` windows is
/// counted with a full rescan of the text.
pub fn most_frequent_kmers(text: &str, k: usize) -> Result<BTreeSet<Kmer>> {
    check_k(k)?;
    validate_dna(text)?;
    let bytes = text.as_bytes();
    if k > bytes.len() {
        return Ok(BTreeSet::new());
    }

    let windows: Vec<&[u8]> = bytes.windows(k).collect();
    let counts: Vec<usize> = windows
        .iter()
        .map(|pattern| windows.iter().filter(|w| *w == pattern).count())
        .collect();
    debug!("Brute-force scan over {} windows (k = {})", windows.len(), k);

    let max_count = counts.iter().copied().max().unwrap_or(0);
    Ok(windows
        .iter()
        .zip(&counts)
        .filter(|&(_, &c)| c == max_count)
        .map(|(w, _)| to_kmer(w))
        .collect())
}

/// Heads of the longest runs of equal values in a sorted slice
fn longest_runs<T: PartialEq + Copy>(sorted: &[T]) -> Vec<T> {
    let mut best = Vec::new();
    let mut max_run = 0;
    let mut run_start = 0;
    for i in 1..=sorted.len() {
        if i < sorted.len() && sorted[i] == sorted[run_start] {
            continue;
        }
        let run = i - run_start;
        if run > max_run {
            max_run = run;
            best.clear();
        }
        if run == max_run {
            best.push(sorted[run_start]);
        }
        run_start = i;
    }
    best
}

/// Most frequent k-mers via sorted window indices.
///
/// Every window is encoded, the indices are sorted, and the longest runs of
/// equal indices are decoded back to k-mers. Windows too long for a
/// `KmerIndex` are sorted as byte slices instead; over {A,C,G,T} slice order
/// and index order coincide.
pub fn most_frequent_kmers_by_sorting(text: &str, k: usize) -> Result<BTreeSet<Kmer>> {
    check_k(k)?;
    validate_dna(text)?;
    let bytes = text.as_bytes();
    if k > bytes.len() {
        return Ok(BTreeSet::new());
    }

    if k > MAX_ENCODE_K {
        let mut windows: Vec<&[u8]> = bytes.windows(k).collect();
        windows.sort_unstable();
        debug!("Sorted {} windows as slices (k = {})", windows.len(), k);
        return Ok(longest_runs(&windows).into_iter().map(to_kmer).collect());
    }

    let mut indices: Vec<KmerIndex> = bytes.windows(k).map(encode_unchecked).collect();
    indices.sort_unstable();
    debug!("Sorted {} window indices (k = {})", indices.len(), k);

    longest_runs(&indices)
        .into_iter()
        .map(|idx| decode_kmer(idx, k))
        .collect()
}

/// Number of occurrences of every k-mer, indexed by its lexicographic rank.
pub fn frequency_array(text: &str, k: usize) -> Result<Vec<usize>> {
    check_k(k)?;
    if k > MAX_ENUMERATION_K {
        return Err(KmerError::ExcessiveSearchSpace { k, limit: MAX_ENUMERATION_K });
    }
    validate_dna(text)?;

    let mut freq = vec![0usize; kmer_space(k)? as usize];
    let bytes = text.as_bytes();
    if k <= bytes.len() {
        for window in bytes.windows(k) {
            freq[encode_unchecked(window) as usize] += 1;
        }
    }
    Ok(freq)
}

/// Distinct k-mers of `seq`, assumed valid
fn observed_kmers<'a>(seq: &'a [u8], k: usize, into: &mut BTreeSet<&'a [u8]>) {
    if k <= seq.len() {
        into.extend(seq.windows(k));
    }
}

/// Union of the d-neighborhoods of every observed k-mer
fn candidate_universe(observed: &BTreeSet<&[u8]>, d: usize) -> Result<Vec<Kmer>> {
    let mut candidates: BTreeSet<Kmer> = BTreeSet::new();
    for kmer in observed {
        // Windows of validated input are ASCII
        candidates.extend(neighbors_iterative(&to_kmer(kmer), d)?);
    }
    Ok(candidates.into_iter().collect())
}

/// Keeps the candidates with the highest score. Scoring runs in parallel;
/// the max/filter reduction does not depend on evaluation order.
fn best_scoring<F>(candidates: Vec<Kmer>, score: F) -> BTreeSet<Kmer>
where
    F: Fn(&[u8]) -> usize + Sync,
{
    let scores: Vec<usize> = candidates
        .par_iter()
        .map(|c| score(c.as_bytes()))
        .collect();
    let max_score = scores.iter().copied().max().unwrap_or(0);
    candidates
        .into_iter()
        .zip(scores)
        .filter(|&(_, s)| s == max_score)
        .map(|(c, _)| c)
        .collect()
}

/// Most frequent k-mers allowing up to `d` mismatches per occurrence.
pub fn most_frequent_kmers_with_mismatches(
    genome: &str,
    k: usize,
    d: usize,
) -> Result<BTreeSet<Kmer>> {
    check_k(k)?;
    validate_dna(genome)?;
    let bytes = genome.as_bytes();
    if k > bytes.len() {
        return Ok(BTreeSet::new());
    }

    let mut observed = BTreeSet::new();
    observed_kmers(bytes, k, &mut observed);
    let candidates = candidate_universe(&observed, d)?;
    debug!(
        "{} observed {}-mers expand to {} candidates at d = {}",
        observed.len(),
        k,
        candidates.len(),
        d
    );

    Ok(best_scoring(candidates, |c| count_unchecked(bytes, c, d)))
}

/// Like [`most_frequent_kmers_with_mismatches`], but each candidate is scored
/// against both the genome and its reverse complement.
pub fn most_frequent_kmers_with_mismatches_and_rc(
    genome: &str,
    k: usize,
    d: usize,
) -> Result<BTreeSet<Kmer>> {
    check_k(k)?;
    let rc = reverse_complement(genome)?;
    let fwd = genome.as_bytes();
    let rev = rc.as_bytes();
    if k > fwd.len() {
        return Ok(BTreeSet::new());
    }

    let mut observed = BTreeSet::new();
    observed_kmers(fwd, k, &mut observed);
    observed_kmers(rev, k, &mut observed);
    let candidates = candidate_universe(&observed, d)?;
    debug!(
        "{} observed {}-mers (both strands) expand to {} candidates at d = {}",
        observed.len(),
        k,
        candidates.len(),
        d
    );

    Ok(best_scoring(candidates, |c| {
        count_unchecked(fwd, c, d) + count_unchecked(rev, c, d)
    }))
}

/// K-mers forming an (L, t)-clump: at least `min_count` occurrences fully
/// inside some window of length `window`.
pub fn find_clumps(
    genome: &str,
    k: usize,
    window: usize,
    min_count: usize,
) -> Result<BTreeSet<Kmer>> {
    check_k(k)?;
    if window < k {
        return Err(KmerError::InvalidInput(format!(
            "window length {} is shorter than k = {}",
            window, k
        )));
    }
    if min_count == 0 {
        return Err(KmerError::InvalidInput("minimum count must be at least 1".into()));
    }
    validate_dna(genome)?;
    let bytes = genome.as_bytes();
    if bytes.len() < window {
        return Ok(BTreeSet::new());
    }

    // Keyed on the k-mer slices themselves, so any k up to the window length works
    let mut counts: AHashMap<&[u8], usize> = AHashMap::new();
    let mut clumps: BTreeSet<&[u8]> = BTreeSet::new();

    for kmer in bytes[..window].windows(k) {
        let count = counts.entry(kmer).or_insert(0);
        *count += 1;
        if *count >= min_count {
            clumps.insert(kmer);
        }
    }

    // Slide one base at a time: drop the k-mer leaving on the left,
    // add the one entering on the right
    for start in 1..=bytes.len() - window {
        let leaving = &bytes[start - 1..start - 1 + k];
        if let Some(count) = counts.get_mut(leaving) {
            *count -= 1;
        }

        let end = start + window;
        let entering = &bytes[end - k..end];
        let count = counts.entry(entering).or_insert(0);
        *count += 1;
        if *count >= min_count {
            clumps.insert(entering);
        }
    }
    debug!("Found {} clump-forming {}-mers", clumps.len(), k);

    Ok(clumps.into_iter().map(to_kmer).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &str = "ACGTTGCATGTCGCATGATGCATGAGAGCT";

    fn set(items: &[&str]) -> BTreeSet<Kmer> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_most_frequent_example() {
        assert_eq!(most_frequent_kmers(TEXT, 4).unwrap(), set(&["CATG", "GCAT"]));
        assert_eq!(most_frequent_kmers_by_sorting(TEXT, 4).unwrap(), set(&["CATG", "GCAT"]));
    }

    #[test]
    fn test_methods_agree() {
        let texts = [
            TEXT,
            "A",
            "AAAA",
            "ACGTACGT",
            "CGGAGGACTCTAGGTAACGCTTATCAGGTCCATAGGACATTCA",
            "TTTTTTTTTTGGGGGGGGGG",
        ];
        for text in texts {
            for k in 1..=text.len() {
                assert_eq!(
                    most_frequent_kmers(text, k).unwrap(),
                    most_frequent_kmers_by_sorting(text, k).unwrap(),
                    "text {} k {}",
                    text,
                    k
                );
            }
        }
    }

    #[test]
    fn test_method_dispatch() {
        assert_eq!(
            FrequencyMethod::Brute.most_frequent(TEXT, 3).unwrap(),
            FrequencyMethod::default().most_frequent(TEXT, 3).unwrap()
        );
    }

    #[test]
    fn test_last_window_counted() {
        // "GT" occurs twice, the second time in the final window
        assert_eq!(most_frequent_kmers("GTAGT", 2).unwrap(), set(&["GT"]));
        assert_eq!(most_frequent_kmers_by_sorting("GTAGT", 2).unwrap(), set(&["GT"]));
        // k == n leaves exactly one window
        assert_eq!(most_frequent_kmers("ACGT", 4).unwrap(), set(&["ACGT"]));
    }

    #[test]
    fn test_k_larger_than_text() {
        assert!(most_frequent_kmers("ACG", 4).unwrap().is_empty());
        assert!(most_frequent_kmers_by_sorting("ACG", 4).unwrap().is_empty());
        assert!(most_frequent_kmers_with_mismatches("ACG", 4, 1).unwrap().is_empty());
    }

    #[test]
    fn test_k_zero_rejected() {
        assert!(matches!(most_frequent_kmers(TEXT, 0), Err(KmerError::InvalidInput(_))));
        assert!(most_frequent_kmers_by_sorting(TEXT, 0).is_err());
        assert!(most_frequent_kmers_with_mismatches(TEXT, 0, 1).is_err());
        assert!(frequency_array(TEXT, 0).is_err());
    }

    #[test]
    fn test_invalid_symbols_rejected() {
        assert!(matches!(
            most_frequent_kmers("ACGNACG", 2),
            Err(KmerError::InvalidSymbol { symbol: 'N', position: 3 })
        ));
        assert!(most_frequent_kmers_with_mismatches_and_rc("ACGNACG", 2, 1).is_err());
    }

    #[test]
    fn test_with_mismatches_example() {
        assert_eq!(
            most_frequent_kmers_with_mismatches(TEXT, 4, 1).unwrap(),
            set(&["ATGC", "ATGT", "GATG"])
        );
    }

    #[test]
    fn test_with_mismatches_zero_is_exact() {
        assert_eq!(
            most_frequent_kmers_with_mismatches(TEXT, 4, 0).unwrap(),
            most_frequent_kmers(TEXT, 4).unwrap()
        );
    }

    #[test]
    fn test_with_mismatches_and_rc_example() {
        assert_eq!(
            most_frequent_kmers_with_mismatches_and_rc(TEXT, 4, 1).unwrap(),
            set(&["ACAT", "ATGT"])
        );
    }

    #[test]
    fn test_rc_result_closed_under_reverse_complement() {
        let result = most_frequent_kmers_with_mismatches_and_rc("AAAAAAAAAACCC", 3, 0).unwrap();
        assert_eq!(result, set(&["AAA", "TTT"]));
    }

    #[test]
    fn test_frequency_array() {
        let freq = frequency_array("ACGCGGCTCTGAAA", 2).unwrap();
        assert_eq!(freq, vec![2, 1, 0, 0, 0, 0, 2, 2, 1, 2, 1, 0, 0, 1, 1, 0]);
        assert_eq!(frequency_array("AC", 3).unwrap(), vec![0; 64]);
        assert!(frequency_array("ACGT", 13).is_err());
    }

    #[test]
    fn test_find_clumps() {
        let genome = "CGGACTCGACAGATGTGAAGAACGACAATGTGAAGACTCGACACGACAGAGTGAAGAGAAGAGGAAACATTGTAA";
        assert_eq!(find_clumps(genome, 5, 50, 4).unwrap(), set(&["CGACA", "GAAGA"]));
    }

    #[test]
    fn test_sorting_beyond_index_width() {
        // 33-mers no longer fit in a KmerIndex and take the slice path
        let text = format!("{}C{}", "A".repeat(40), "A".repeat(5));
        for k in [32, 33, 40, text.len()] {
            assert_eq!(
                most_frequent_kmers_by_sorting(&text, k).unwrap(),
                most_frequent_kmers(&text, k).unwrap(),
                "k {}",
                k
            );
        }
        let homopolymer = "A".repeat(40);
        assert_eq!(
            most_frequent_kmers_by_sorting(&homopolymer, 33).unwrap(),
            set(&["A".repeat(33).as_str()])
        );
    }

    #[test]
    fn test_find_clumps_long_kmers() {
        let genome = "A".repeat(40);
        assert_eq!(find_clumps(&genome, 33, 40, 1).unwrap(), set(&["A".repeat(33).as_str()]));
        assert_eq!(find_clumps(&genome, 33, 40, 8).unwrap(), set(&["A".repeat(33).as_str()]));
        assert!(find_clumps(&genome, 33, 40, 9).unwrap().is_empty());
    }

    #[test]
    fn test_find_clumps_boundaries() {
        // Three copies of AAC, but the window only fits two at a time
        assert!(find_clumps("AACGAACGAAC", 3, 7, 3).unwrap().is_empty());
        assert_eq!(find_clumps("AACGAACGAAC", 3, 11, 3).unwrap(), set(&["AAC"]));
        // Occurrence in the final window
        assert_eq!(find_clumps("GGGGTTTT", 2, 4, 3).unwrap(), set(&["GG", "TT"]));
        assert!(find_clumps("ACG", 2, 4, 1).unwrap().is_empty());
        assert!(find_clumps("ACGT", 3, 2, 1).is_err());
        assert!(find_clumps("ACGT", 2, 3, 0).is_err());
    }
}
