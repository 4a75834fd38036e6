use crate::error::Result;
use crate::kmer::kmer::invalid_symbol;

/// How to treat characters outside {A,C,G,T} when complementing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ComplementPolicy {
    /// Reject the input with `InvalidSymbol`
    #[default]
    Strict,
    /// Skip unmapped characters; the output may be shorter than the input
    DropUnknown,
}

#[inline]
fn complement_base(b: u8) -> Option<u8> {
    match b {
        b'A' => Some(b'T'),
        b'T' => Some(b'A'),
        b'C' => Some(b'G'),
        b'G' => Some(b'C'),
        _ => None,
    }
}

fn complement_bytes<I>(seq: &str, bytes: I, policy: ComplementPolicy) -> Result<String>
where
    I: Iterator<Item = (usize, u8)>,
{
    let mut result = String::with_capacity(seq.len());
    for (i, b) in bytes {
        match (complement_base(b), policy) {
            (Some(c), _) => result.push(c as char),
            (None, ComplementPolicy::DropUnknown) => {}
            (None, ComplementPolicy::Strict) => return Err(invalid_symbol(seq, i)),
        }
    }
    Ok(result)
}

/// Symbol-wise complement (A<->T, C<->G), order preserved.
pub fn complement(dna: &str) -> Result<String> {
    complement_with(dna, ComplementPolicy::Strict)
}

pub fn complement_with(dna: &str, policy: ComplementPolicy) -> Result<String> {
    complement_bytes(dna, dna.bytes().enumerate(), policy)
}

/// Returns the reverse complement of a DNA sequence
pub fn reverse_complement(dna: &str) -> Result<String> {
    reverse_complement_with(dna, ComplementPolicy::Strict)
}

pub fn reverse_complement_with(dna: &str, policy: ComplementPolicy) -> Result<String> {
    // Walk the bytes backwards so no intermediate reversed copy is needed
    complement_bytes(dna, dna.bytes().enumerate().rev(), policy)
}
