//! GC skew: running count of G minus C along a sequence.
//!
//! The position where the skew reaches its minimum is a classic estimate of a
//! bacterial replication origin.

/// Skew value recorded after each character ('G' +1, 'C' -1, anything else 0).
pub fn skew_profile(genome: &str) -> Vec<i64> {
    genome
        .bytes()
        .scan(0i64, |skew, b| {
            match b {
                b'G' => *skew += 1,
                b'C' => *skew -= 1,
                _ => {}
            }
            Some(*skew)
        })
        .collect()
}

/// 1-based positions at which the skew equals its global minimum.
pub fn gc_skew_minima(genome: &str) -> Vec<usize> {
    let profile = skew_profile(genome);
    let Some(&min) = profile.iter().min() else {
        return Vec::new();
    };
    profile
        .iter()
        .enumerate()
        .filter(|&(_, &v)| v == min)
        .map(|(i, _)| i + 1)
        .collect()
}
