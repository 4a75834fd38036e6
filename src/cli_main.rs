use clap::{Args, Parser, Subcommand};
use oriscan::kmer::{FrequencyMethod, NeighborStrategy};

#[derive(Parser, Debug)]
#[command(
    name = "oriscan",
    version,
    about = "K-mer frequency and GC-skew analysis for DNA sequences",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Number of threads to use
    #[arg(long, global = true, default_value_t = num_cpus::get())]
    pub threads: usize,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Where to read the genome from
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct SequenceInput {
    /// FASTA or plain-text sequence file, optionally gzipped
    #[arg(short, long)]
    pub input: Option<String>,

    /// Sequence given directly on the command line
    #[arg(short, long)]
    pub sequence: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert a k-mer to its lexicographic index
    Encode {
        kmer: String,
    },

    /// Convert an index back to a k-mer of length k
    Decode {
        index: u64,

        /// K-mer length
        #[arg(short)]
        k: usize,
    },

    /// Hamming distance between two equal-length sequences
    Hamming {
        a: String,
        b: String,
    },

    /// Positions where a pattern occurs with at most d mismatches
    Approx {
        #[command(flatten)]
        input: SequenceInput,

        /// Pattern to search for
        #[arg(short, long)]
        pattern: String,

        /// Maximum number of mismatches
        #[arg(short = 'd', long, default_value_t = 0)]
        mismatches: usize,
    },

    /// All k-mers within d mismatches of a k-mer
    Neighbors {
        kmer: String,

        /// Maximum number of mismatches
        #[arg(short = 'd', long, default_value_t = 1)]
        mismatches: usize,

        /// Enumeration strategy
        #[arg(long, value_enum, default_value_t = NeighborStrategy::Iterative)]
        strategy: NeighborStrategy,
    },

    /// Most frequent k-mers, optionally with mismatches and reverse complements
    Frequent {
        #[command(flatten)]
        input: SequenceInput,

        /// K-mer length
        #[arg(short)]
        k: usize,

        /// Maximum number of mismatches per occurrence
        #[arg(short = 'd', long, default_value_t = 0)]
        mismatches: usize,

        /// Also count approximate occurrences on the reverse strand
        #[arg(long)]
        reverse_complement: bool,

        /// Algorithm for exact search (ignored with mismatches or reverse complements)
        #[arg(long, value_enum, default_value_t = FrequencyMethod::Sort)]
        method: FrequencyMethod,
    },

    /// K-mers forming (L, t)-clumps
    Clumps {
        #[command(flatten)]
        input: SequenceInput,

        /// K-mer length
        #[arg(short)]
        k: usize,

        /// Window length L
        #[arg(short = 'L', long)]
        window: usize,

        /// Minimum occurrences t inside a window
        #[arg(short = 't', long)]
        min_count: usize,
    },

    /// Positions where the G-C skew is minimal
    Skew {
        #[command(flatten)]
        input: SequenceInput,
    },

    /// Reverse complement of a sequence
    Revcomp {
        #[command(flatten)]
        input: SequenceInput,

        /// Drop non-ACGT characters instead of failing
        #[arg(long)]
        drop_unknown: bool,
    },
}
