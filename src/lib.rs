//! fastq-detangler: split interleaved FASTQ into paired and orphaned reads
//!
//! # Overview
//!
//! Paired-end runs are sometimes delivered as a single interleaved (or
//! shuffled) FASTQ file in which R1 and R2 records, headed `@name/1` and
//! `@name/2`, appear in any order and some mates are missing. This crate
//! separates such a file into four files:
//!
//! - R1 reads whose R2 is missing
//! - R2 reads whose R1 is missing
//! - R1 reads that have an R2
//! - R2 reads that have an R1
//!
//! Each output is sorted by read base name, so paired files line up record
//! for record and repeated runs produce identical bytes.
//!
//! ## Quick Start
//!
//! ```no_run
//! use fastq_detangler::detangle;
//!
//! # fn main() -> fastq_detangler::Result<()> {
//! let summary = detangle("interleaved.fastq", "sample")?;
//! // sample_R1_paired.fastq and sample_R2_paired.fastq now hold
//! // summary.pairs records each
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`detangle`](mod@detangle): The end-to-end pipeline and input validation
//! - [`io`]: Parsing, sorted writing, and output file naming
//! - [`operations`]: Header classification and pair analysis
//! - [`types`]: Records, mate types, and collections

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod detangle;
pub mod error;
pub mod io;
pub mod operations;
pub mod types;

// Re-export commonly used types
pub use detangle::{detangle, DetangleSummary, Stage};
pub use error::{DetangleError, InvalidInputReason, Result};
pub use io::{FastqWriter, OutputPaths, ParseIssue, ParseReport, ParsedReads};
pub use types::{FastqRecord, MateType, Partition, ReadCollection};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
