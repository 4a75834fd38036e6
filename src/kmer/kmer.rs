//! Pattern <-> number codec over the {A,C,G,T} alphabet.
//!
//! A k-mer is read as a base-4 numeral (A=0, C=1, G=2, T=3, most significant
//! symbol first), so the index of a k-mer is its rank in the lexicographic
//! ordering of all 4^k strings of that length.

use crate::error::{KmerError, Result};

pub type Kmer = String;

/// Rank of a k-mer in lexicographic order over {A,C,G,T}^k
pub type KmerIndex = u64;

/// Largest k whose index still fits in a `KmerIndex` (2 bits per base)
pub const MAX_ENCODE_K: usize = 32;

/// Largest k for which we are willing to walk all 4^k strings
pub const MAX_ENUMERATION_K: usize = 12;

/// Upper bound on the number of strings any enumeration may produce (4^12)
pub const MAX_SEARCH_SPACE: u128 = 1 << (2 * MAX_ENUMERATION_K);

pub const NUCLEOTIDES: [u8; 4] = [b'A', b'C', b'G', b'T'];

/// Maps a nucleotide to its base-4 digit
#[inline]
pub fn symbol_to_digit(b: u8) -> Option<u64> {
    match b {
        b'A' => Some(0),
        b'C' => Some(1),
        b'G' => Some(2),
        b'T' => Some(3),
        _ => None,
    }
}

/// Maps a base-4 digit back to its nucleotide; only the low two bits are used
#[inline]
pub fn digit_to_symbol(digit: u64) -> u8 {
    NUCLEOTIDES[(digit & 3) as usize]
}

/// Checks that every character of `seq` is one of A, C, G, T.
pub fn validate_dna(seq: &str) -> Result<()> {
    match seq.bytes().position(|b| symbol_to_digit(b).is_none()) {
        Some(position) => Err(invalid_symbol(seq, position)),
        None => Ok(()),
    }
}

pub(crate) fn invalid_symbol(seq: &str, position: usize) -> KmerError {
    // Byte offsets from a failed ASCII check may land inside a multi-byte char
    let symbol = seq
        .get(position..)
        .and_then(|rest| rest.chars().next())
        .unwrap_or(char::REPLACEMENT_CHARACTER);
    KmerError::InvalidSymbol { symbol, position }
}

/// Number of distinct k-mers of length `k`, i.e. 4^k
pub fn kmer_space(k: usize) -> Result<u64> {
    if k > MAX_ENCODE_K - 1 {
        // 4^32 does not fit in a u64
        return Err(KmerError::ExcessiveSearchSpace { k, limit: MAX_ENCODE_K - 1 });
    }
    Ok(1u64 << (2 * k))
}

/// Encodes a DNA k-mer to its lexicographic index (2 bits per nucleotide, max 32-mer)
pub fn encode_kmer(seq: &str) -> Result<KmerIndex> {
    if seq.len() > MAX_ENCODE_K {
        return Err(KmerError::ExcessiveSearchSpace { k: seq.len(), limit: MAX_ENCODE_K });
    }
    let mut val: u64 = 0;
    for (i, b) in seq.bytes().enumerate() {
        let digit = symbol_to_digit(b).ok_or_else(|| invalid_symbol(seq, i))?;
        val = (val << 2) | digit;
    }
    Ok(val)
}

/// Encodes a window already known to be valid DNA
#[inline]
pub(crate) fn encode_unchecked(window: &[u8]) -> KmerIndex {
    window
        .iter()
        .fold(0u64, |acc, &b| (acc << 2) | symbol_to_digit(b).unwrap_or(0))
}

/// Decodes an index back to the k-mer of length `k` with that rank.
///
/// Digits come out least significant first, so they are written from the
/// right-hand end of the buffer.
pub fn decode_kmer(index: KmerIndex, k: usize) -> Result<Kmer> {
    if k > MAX_ENCODE_K {
        return Err(KmerError::ExcessiveSearchSpace { k, limit: MAX_ENCODE_K });
    }
    if k < MAX_ENCODE_K && index >> (2 * k) != 0 {
        return Err(KmerError::InvalidInput(format!(
            "index {} out of range for k = {}",
            index, k
        )));
    }

    let mut bytes = vec![b'A'; k];
    let mut rest = index;
    for slot in bytes.iter_mut().rev() {
        *slot = digit_to_symbol(rest);
        rest >>= 2;
    }
    // Only ACGT bytes were written
    Ok(bytes.into_iter().map(char::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_known_values() {
        assert_eq!(encode_kmer("A").unwrap(), 0);
        assert_eq!(encode_kmer("T").unwrap(), 3);
        assert_eq!(encode_kmer("AGT").unwrap(), 11);
        assert_eq!(encode_kmer("ATGCAA").unwrap(), 912);
        assert_eq!(encode_kmer("").unwrap(), 0);
    }

    #[test]
    fn test_decode_known_values() {
        assert_eq!(decode_kmer(45, 4).unwrap(), "AGTC");
        assert_eq!(decode_kmer(5437, 7).unwrap(), "CCCATTC");
        assert_eq!(decode_kmer(5437, 8).unwrap(), "ACCCATTC");
        assert_eq!(decode_kmer(0, 0).unwrap(), "");
    }

    #[test]
    fn test_round_trip_small_k() {
        for k in 1..=6 {
            for i in 0..kmer_space(k).unwrap() {
                let kmer = decode_kmer(i, k).unwrap();
                assert_eq!(kmer.len(), k);
                assert_eq!(encode_kmer(&kmer).unwrap(), i);
            }
        }
    }

    #[test]
    fn test_full_width_kmer() {
        let kmer = "T".repeat(32);
        let idx = encode_kmer(&kmer).unwrap();
        assert_eq!(idx, u64::MAX);
        assert_eq!(decode_kmer(idx, 32).unwrap(), kmer);
    }

    #[test]
    fn test_invalid_symbol_reports_position() {
        match encode_kmer("ACNT") {
            Err(KmerError::InvalidSymbol { symbol, position }) => {
                assert_eq!(symbol, 'N');
                assert_eq!(position, 2);
            }
            other => panic!("unexpected result: {:?}", other),
        }
        // Lowercase is not part of the alphabet
        assert!(encode_kmer("acgt").is_err());
    }

    #[test]
    fn test_decode_out_of_range() {
        assert!(matches!(decode_kmer(16, 2), Err(KmerError::InvalidInput(_))));
        assert!(decode_kmer(15, 2).is_ok());
        assert!(decode_kmer(0, 33).is_err());
    }

    #[test]
    fn test_too_long_to_encode() {
        let kmer = "A".repeat(33);
        assert!(matches!(
            encode_kmer(&kmer),
            Err(KmerError::ExcessiveSearchSpace { k: 33, .. })
        ));
    }

    #[test]
    fn test_validate_dna() {
        assert!(validate_dna("ACGTACGT").is_ok());
        assert!(validate_dna("").is_ok());
        assert!(validate_dna("ACGU").is_err());
    }
}
