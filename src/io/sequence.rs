// src/io/sequence.rs
use std::fs::File;
use std::io::{BufRead, BufReader, Result};
use flate2::read::MultiGzDecoder;

/// Open a sequence file for reading, handles gzipped files automatically
pub fn open_sequence(path: &str) -> Result<Box<dyn BufRead>> {
    let file = File::open(path)?;
    if path.ends_with(".gz") {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Read a genome from FASTA or raw text.
///
/// Header lines (`>`) are skipped and all remaining lines are joined, so a
/// multi-record FASTA is read as one concatenated sequence.
pub fn read_genome<R: BufRead>(reader: R) -> Result<String> {
    let mut genome = String::new();
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('>') {
            continue;
        }
        genome.push_str(&line.to_ascii_uppercase());
    }
    Ok(genome)
}

pub fn read_genome_file(path: &str) -> Result<String> {
    read_genome(open_sequence(path)?)
}
