mod cli_main;

use std::fmt::Display;
use std::time::Instant;

use clap::Parser;
use rayon::ThreadPoolBuilder;
use serde::Serialize;
use serde_json::json;
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

use cli_main::{Cli, Commands, SequenceInput};
use oriscan::io::sequence::read_genome_file;
use oriscan::kmer::{
    approximate_pattern_positions, decode_kmer, encode_kmer, find_clumps, gc_skew_minima,
    hamming_distance, most_frequent_kmers_with_mismatches,
    most_frequent_kmers_with_mismatches_and_rc, reverse_complement_with, skew_profile,
    ComplementPolicy,
};
use oriscan::report::{ClumpReport, FrequentReport, NeighborReport, PositionsReport, SkewReport};
use oriscan::{KmerError, Result};

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Setting tracing default failed");

    if let Err(e) = ThreadPoolBuilder::new().num_threads(cli.threads).build_global() {
        warn!("Could not configure thread pool: {}", e);
    }

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn load_genome(input: &SequenceInput) -> Result<String> {
    match (&input.sequence, &input.input) {
        (Some(seq), _) => Ok(seq.trim().to_ascii_uppercase()),
        (None, Some(path)) => {
            info!("Reading sequence from {}", path);
            let genome = read_genome_file(path)?;
            info!("Loaded {} bases", genome.len());
            Ok(genome)
        }
        (None, None) => Err(KmerError::InvalidInput(
            "either --input or --sequence is required".into(),
        )),
    }
}

fn emit<T: Serialize + Display>(report: &T, as_json: bool) -> Result<()> {
    if as_json {
        let out = serde_json::to_string_pretty(report).map_err(std::io::Error::from)?;
        println!("{}", out);
    } else {
        println!("{}", report);
    }
    Ok(())
}

fn emit_value(value: serde_json::Value, plain: impl Display, as_json: bool) -> Result<()> {
    if as_json {
        let out = serde_json::to_string_pretty(&value).map_err(std::io::Error::from)?;
        println!("{}", out);
    } else {
        println!("{}", plain);
    }
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let as_json = cli.json;

    match cli.command {
        Commands::Encode { kmer } => {
            let index = encode_kmer(&kmer)?;
            emit_value(json!({ "kmer": kmer, "index": index }), index, as_json)
        }

        Commands::Decode { index, k } => {
            let kmer = decode_kmer(index, k)?;
            emit_value(json!({ "index": index, "k": k, "kmer": &kmer }), &kmer, as_json)
        }

        Commands::Hamming { a, b } => {
            let distance = hamming_distance(&a, &b)?;
            emit_value(json!({ "a": a, "b": b, "distance": distance }), distance, as_json)
        }

        Commands::Approx { input, pattern, mismatches } => {
            let genome = load_genome(&input)?;
            let positions = approximate_pattern_positions(&genome, &pattern, mismatches)?;
            info!("Found {} approximate occurrences of {}", positions.len(), pattern);
            emit(&PositionsReport::new(&pattern, mismatches, positions), as_json)
        }

        Commands::Neighbors { kmer, mismatches, strategy } => {
            let neighbors = strategy.neighbors(&kmer, mismatches)?;
            info!("{} neighbors within distance {} of {}", neighbors.len(), mismatches, kmer);
            emit(&NeighborReport::new(&kmer, mismatches, strategy, neighbors), as_json)
        }

        Commands::Frequent { input, k, mismatches, reverse_complement, method } => {
            let genome = load_genome(&input)?;
            let start = Instant::now();

            let report = if reverse_complement {
                info!("Searching {}-mers with up to {} mismatches on both strands", k, mismatches);
                let kmers = most_frequent_kmers_with_mismatches_and_rc(&genome, k, mismatches)?;
                FrequentReport::new(k, mismatches, true, kmers)
            } else if mismatches > 0 {
                info!("Searching {}-mers with up to {} mismatches", k, mismatches);
                let kmers = most_frequent_kmers_with_mismatches(&genome, k, mismatches)?;
                FrequentReport::new(k, mismatches, false, kmers)
            } else {
                info!("Searching exact {}-mers using {:?} method", k, method);
                let kmers = method.most_frequent(&genome, k)?;
                FrequentReport::new(k, 0, false, kmers).with_method(method)
            };

            info!("Search completed in {:.2}s", start.elapsed().as_secs_f32());
            emit(&report, as_json)
        }

        Commands::Clumps { input, k, window, min_count } => {
            let genome = load_genome(&input)?;
            let kmers = find_clumps(&genome, k, window, min_count)?;
            info!("{} k-mers form ({}, {})-clumps", kmers.len(), window, min_count);
            let report = ClumpReport {
                k,
                window,
                min_count,
                kmers: kmers.into_iter().collect(),
            };
            emit(&report, as_json)
        }

        Commands::Skew { input } => {
            let genome = load_genome(&input)?;
            let report = SkewReport {
                genome_length: genome.len(),
                min_skew: skew_profile(&genome).into_iter().min(),
                positions: gc_skew_minima(&genome),
            };
            emit(&report, as_json)
        }

        Commands::Revcomp { input, drop_unknown } => {
            let genome = load_genome(&input)?;
            let policy = if drop_unknown {
                ComplementPolicy::DropUnknown
            } else {
                ComplementPolicy::Strict
            };
            let rc = reverse_complement_with(&genome, policy)?;
            emit_value(json!({ "length": rc.len(), "sequence": &rc }), &rc, as_json)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_genome_requires_a_source() {
        let input = SequenceInput { input: None, sequence: None };
        assert!(matches!(load_genome(&input), Err(KmerError::InvalidInput(_))));
    }

    #[test]
    fn test_load_genome_from_argument() {
        let input = SequenceInput { input: None, sequence: Some(" acgt\n".into()) };
        assert_eq!(load_genome(&input).unwrap(), "ACGT");
    }

    #[test]
    fn test_cli_rejects_missing_or_duplicate_source() {
        assert!(Cli::try_parse_from(["oriscan", "skew"]).is_err());
        assert!(Cli::try_parse_from(["oriscan", "skew", "-s", "ACGT", "-i", "g.fa"]).is_err());
        assert!(Cli::try_parse_from(["oriscan", "skew", "-s", "ACGT"]).is_ok());
    }
}
