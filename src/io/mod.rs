//! I/O module: interleaved FASTQ parsing, sorted writing, output naming
//!
//! Input is loaded whole and parsed in one pass; outputs are written one
//! file at a time by a single owner.

mod fastq;
pub mod outputs;

pub use fastq::{
    parse_lines, parse_path, parse_str, write_error, write_fastq_file, write_fastq_to, FastqWriter,
    ParseIssue, ParseReport, ParsedReads, LINES_PER_RECORD,
};
pub use outputs::{OutputBatch, OutputPaths};
