//! End-to-end detangling of an interleaved FASTQ file
//!
//! A run moves through fixed stages and stops at the first fatal error:
//!
//! ```text
//! Validating → Parsing → Analyzing → Writing → Done
//! ```
//!
//! - **Validating**: the input must exist, be a regular file, and be non-empty.
//! - **Parsing**: the file is loaded and split into R1/R2 collections; a
//!   parse that finds no reads at all is rejected.
//! - **Analyzing**: missing and paired partitions are computed.
//! - **Writing**: the four partitions are written in a fixed order. If any
//!   write fails, files this run opened for writing are removed; a file that
//!   could not be opened is left as it was.
//!
//! # Example
//!
//! ```no_run
//! use fastq_detangler::detangle;
//!
//! # fn main() -> fastq_detangler::Result<()> {
//! let summary = detangle("interleaved.fastq", "results/sample")?;
//! println!("{} complete pairs", summary.pairs);
//! # Ok(())
//! # }
//! ```

use crate::error::{DetangleError, InvalidInputReason, Result};
use crate::io::{
    parse_path, write_error, write_fastq_to, FastqWriter, OutputBatch, OutputPaths, ParseReport,
};
use crate::operations::PairAnalysis;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Stage of a detangling run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Checking the input path
    Validating,
    /// Loading and classifying records
    Parsing,
    /// Computing missing and paired partitions
    Analyzing,
    /// Writing the four output files
    Writing,
    /// All outputs written
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Validating => "validating",
            Self::Parsing => "parsing",
            Self::Analyzing => "analyzing",
            Self::Writing => "writing",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}

/// What a successful run produced
#[derive(Debug, Clone)]
pub struct DetangleSummary {
    /// Input file
    pub input: PathBuf,
    /// Input size in bytes
    pub input_bytes: u64,
    /// Files written
    pub outputs: OutputPaths,
    /// Distinct R1 base names
    pub first_reads: usize,
    /// Distinct R2 base names
    pub second_reads: usize,
    /// R1 reads written without a mate
    pub missing_first: usize,
    /// R2 reads written without a mate
    pub missing_second: usize,
    /// Complete pairs written
    pub pairs: usize,
    /// Parse diagnostics
    pub report: ParseReport,
    /// Wall-clock time for the whole run
    pub elapsed: Duration,
}

/// Detangle `input` into four FASTQ files named from `output_prefix`
///
/// # Errors
///
/// - `NotFound` if `input` does not exist
/// - `InvalidInput` if `input` is not a regular file, is empty, or holds no
///   classifiable reads
/// - `Io` if `input` cannot be read
/// - `Write` if an output cannot be written; no outputs from this run remain
pub fn detangle<P, Q>(input: P, output_prefix: Q) -> Result<DetangleSummary>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let start = Instant::now();
    let input = input.as_ref();
    let output_prefix = output_prefix.as_ref();

    log::info!("Starting FASTQ detangling process");
    log::info!("Input file: {}", input.display());
    log::info!("Output prefix: {}", output_prefix.display());

    enter(Stage::Validating);
    let input_bytes = validate_input(input).map_err(fail)?;
    log::info!("Input file size: {} bytes", input_bytes);

    enter(Stage::Parsing);
    let parse_start = Instant::now();
    let parsed = parse_path(input).map_err(fail)?;
    if parsed.is_empty() {
        return Err(fail(DetangleError::InvalidInput {
            path: input.to_path_buf(),
            reason: InvalidInputReason::NoValidReads,
        }));
    }
    log::info!("Parsing completed in {:.2?}", parse_start.elapsed());
    log::info!("Total R1 reads found: {}", parsed.first.len());
    log::info!("Total R2 reads found: {}", parsed.second.len());

    enter(Stage::Analyzing);
    let analysis_start = Instant::now();
    let analysis = PairAnalysis::new(&parsed.first, &parsed.second);
    log::info!("Analysis completed in {:.2?}", analysis_start.elapsed());
    log::info!("R1 reads with missing pairs: {}", analysis.missing_first.len());
    log::info!("R2 reads with missing pairs: {}", analysis.missing_second.len());
    log::info!("Paired R1 reads: {}", analysis.paired_first.len());
    log::info!("Paired R2 reads: {}", analysis.paired_second.len());

    enter(Stage::Writing);
    let write_start = Instant::now();
    let outputs = OutputPaths::from_prefix(output_prefix);
    write_outputs(&analysis, &outputs).map_err(fail)?;
    log::info!("File writing completed in {:.2?}", write_start.elapsed());

    enter(Stage::Done);
    let elapsed = start.elapsed();
    let total_reads = parsed.total_reads();
    log::info!("Total processing time: {:.2?}", elapsed);
    if elapsed.as_secs_f64() > 0.0 {
        log::info!(
            "Processing speed: {:.0} reads/second",
            total_reads as f64 / elapsed.as_secs_f64()
        );
    }
    log::info!("FASTQ detangling completed successfully");

    Ok(DetangleSummary {
        input: input.to_path_buf(),
        input_bytes,
        first_reads: parsed.first.len(),
        second_reads: parsed.second.len(),
        missing_first: analysis.missing_first.len(),
        missing_second: analysis.missing_second.len(),
        pairs: analysis.pair_count(),
        outputs,
        report: parsed.report,
        elapsed,
    })
}

/// Check that `path` is an existing, non-empty regular file
///
/// Returns the file size in bytes.
pub fn validate_input(path: &Path) -> Result<u64> {
    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(DetangleError::NotFound {
                path: path.to_path_buf(),
            })
        }
        Err(e) => return Err(e.into()),
    };

    let invalid = |reason| DetangleError::InvalidInput {
        path: path.to_path_buf(),
        reason,
    };

    if !metadata.is_file() {
        return Err(invalid(InvalidInputReason::NotAFile));
    }
    if metadata.len() == 0 {
        return Err(invalid(InvalidInputReason::Empty));
    }

    Ok(metadata.len())
}

/// Write all four partitions, removing this run's files on the first failure
fn write_outputs(analysis: &PairAnalysis<'_>, outputs: &OutputPaths) -> Result<()> {
    let partitions = [
        &analysis.missing_first,
        &analysis.missing_second,
        &analysis.paired_first,
        &analysis.paired_second,
    ];

    let mut batch = OutputBatch::new();
    for (partition, path) in partitions.into_iter().zip(outputs.in_write_order()) {
        let writer = FastqWriter::create(path).map_err(|source| write_error(path, source))?;
        batch.track(path);
        let count = write_fastq_to(writer, partition, path)?;
        log::info!("Written: {} ({} reads)", path.display(), count);
    }
    batch.commit();

    Ok(())
}

fn enter(stage: Stage) {
    log::debug!("Stage: {}", stage);
}

fn fail(err: DetangleError) -> DetangleError {
    log::error!("{}", err);
    err
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_validate_missing() {
        let dir = TempDir::new().unwrap();
        let err = validate_input(&dir.path().join("nope.fastq")).unwrap_err();
        assert!(matches!(err, DetangleError::NotFound { .. }));
    }

    #[test]
    fn test_validate_directory() {
        let dir = TempDir::new().unwrap();
        let err = validate_input(dir.path()).unwrap_err();
        assert_eq!(err.invalid_input_reason(), Some(InvalidInputReason::NotAFile));
    }

    #[test]
    fn test_validate_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.fastq");
        fs::write(&path, "").unwrap();

        let err = validate_input(&path).unwrap_err();
        assert_eq!(err.invalid_input_reason(), Some(InvalidInputReason::Empty));
    }

    #[test]
    fn test_validate_ok() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("reads.fastq");
        fs::write(&path, "@a/1\nA\n+\nI\n").unwrap();

        assert_eq!(validate_input(&path).unwrap(), 12);
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(Stage::Validating.to_string(), "validating");
        assert_eq!(Stage::Done.to_string(), "done");
    }
}
