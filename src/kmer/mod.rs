//! K-mer processing module - codec, distances, neighborhoods and frequency search

pub mod kmer;
pub mod distance;
pub mod neighbors;
pub mod frequency;
pub mod complement;
pub mod skew;

pub use complement::{
    complement, complement_with, reverse_complement, reverse_complement_with, ComplementPolicy,
};
pub use distance::{approximate_pattern_count, approximate_pattern_positions, hamming_distance};
pub use frequency::{
    find_clumps, frequency_array, most_frequent_kmers, most_frequent_kmers_by_sorting,
    most_frequent_kmers_with_mismatches, most_frequent_kmers_with_mismatches_and_rc,
    FrequencyMethod,
};
pub use kmer::{decode_kmer, encode_kmer, validate_dna, Kmer, KmerIndex};
pub use neighbors::{
    immediate_neighbors, neighborhood_size, neighbors, neighbors_iterative, NeighborStrategy,
};
pub use skew::{gc_skew_minima, skew_profile};
