//! Interleaved FASTQ parsing and sorted FASTQ writing
//!
//! # Parsing
//!
//! The whole input is loaded into memory and scanned line by line with a
//! cursor. A line starting with `@` opens a candidate record:
//!
//! - unclassified header → [`ParseIssue::InvalidHeader`], advance 1 line
//! - fewer than 4 lines left → [`ParseIssue::IncompleteRecord`], advance 1 line
//! - third line not starting with `+` → [`ParseIssue::MalformedRecord`], advance 1 line
//! - otherwise the record is stored under its base name and the cursor moves 4 lines
//!
//! Lines that do not start with `@` are skipped. None of these anomalies
//! fail the parse; only failing to read the input does.
//!
//! # Writing
//!
//! [`FastqWriter`] emits records sorted by base name, so output is identical
//! for the same collection no matter how it was built.
//!
//! # Example
//!
//! ```
//! use fastq_detangler::io::{parse_str, FastqWriter};
//!
//! # fn main() -> std::io::Result<()> {
//! let parsed = parse_str("@b/1\nAC\n+\nII\n@a/1\nGT\n+\nII\n@a/2\nTT\n+\nII\n");
//! assert_eq!(parsed.first.len(), 2);
//! assert_eq!(parsed.second.len(), 1);
//!
//! let mut writer = FastqWriter::new(Vec::new());
//! writer.write_collection(&parsed.first)?;
//! let bytes = writer.finish()?;
//! assert_eq!(bytes, b"@a/1\nGT\n+\nII\n@b/1\nAC\n+\nII\n");
//! # Ok(())
//! # }
//! ```

use crate::error::{DetangleError, Result};
use crate::operations::header::{split_header, HEADER_MARKER, SEPARATOR_MARKER};
use crate::types::{FastqRecord, MateType, Partition, ReadCollection};
use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Lines per FASTQ record
pub const LINES_PER_RECORD: usize = 4;

/// A recoverable anomaly found while parsing
///
/// Line numbers are 1-based and refer to the header line of the candidate
/// record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseIssue {
    /// Line starts with '@' but is not an R1 or R2 header
    InvalidHeader {
        /// Line number
        line: usize,
        /// Header text without its terminator
        header: String,
    },
    /// Classified header with fewer than four lines left in the input
    IncompleteRecord {
        /// Line number
        line: usize,
        /// Lines remaining from the header to end of input
        available: usize,
    },
    /// Classified header whose third line is not a '+' separator
    MalformedRecord {
        /// Line number
        line: usize,
    },
    /// Base name already seen for this mate type; the new record replaced it
    DuplicateBaseName {
        /// Line number of the replacing record
        line: usize,
        /// Mate type of both records
        mate: MateType,
        /// Shared base name
        base_name: String,
    },
}

impl fmt::Display for ParseIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidHeader { line, header } => {
                write!(f, "Invalid read header at line {}: {}", line, header)
            }
            Self::IncompleteRecord { line, available } => write!(
                f,
                "Incomplete record at line {}: expected {} lines, got {}",
                line, LINES_PER_RECORD, available
            ),
            Self::MalformedRecord { line } => write!(
                f,
                "Malformed record at line {}: incomplete or invalid FASTQ format",
                line
            ),
            Self::DuplicateBaseName {
                line,
                mate,
                base_name,
            } => write!(
                f,
                "Duplicate {} read '{}' at line {}: replacing earlier record",
                mate, base_name, line
            ),
        }
    }
}

/// Diagnostics collected during a parse
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseReport {
    /// Total input lines
    pub lines_scanned: usize,
    /// Records stored (duplicates included)
    pub records_accepted: usize,
    /// Lines skipped because they did not start with '@'
    pub stray_lines: usize,
    /// Anomalies in input order
    pub issues: Vec<ParseIssue>,
}

impl ParseReport {
    fn count(&self, pred: impl Fn(&ParseIssue) -> bool) -> usize {
        self.issues.iter().filter(|issue| pred(issue)).count()
    }

    /// Number of unclassifiable headers
    pub fn invalid_headers(&self) -> usize {
        self.count(|i| matches!(i, ParseIssue::InvalidHeader { .. }))
    }

    /// Number of records cut short by end of input
    pub fn incomplete_records(&self) -> usize {
        self.count(|i| matches!(i, ParseIssue::IncompleteRecord { .. }))
    }

    /// Number of records with a bad separator line
    pub fn malformed_records(&self) -> usize {
        self.count(|i| matches!(i, ParseIssue::MalformedRecord { .. }))
    }

    /// Number of records that replaced an earlier one
    pub fn duplicates(&self) -> usize {
        self.count(|i| matches!(i, ParseIssue::DuplicateBaseName { .. }))
    }

    /// Whether the input parsed without any anomaly
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    fn push(&mut self, issue: ParseIssue) {
        log::warn!("{}", issue);
        self.issues.push(issue);
    }
}

/// R1 and R2 collections parsed from one interleaved input
#[derive(Debug, Clone, Default)]
pub struct ParsedReads {
    /// First-of-pair records by base name
    pub first: ReadCollection,
    /// Second-of-pair records by base name
    pub second: ReadCollection,
    /// Parse diagnostics
    pub report: ParseReport,
}

impl ParsedReads {
    /// True when neither collection holds a record
    pub fn is_empty(&self) -> bool {
        self.first.is_empty() && self.second.is_empty()
    }

    /// Records across both collections
    pub fn total_reads(&self) -> usize {
        self.first.len() + self.second.len()
    }
}

/// Parse a sequence of raw lines (terminators included or not)
pub fn parse_lines(lines: &[&str]) -> ParsedReads {
    let mut parsed = ParsedReads::default();
    parsed.report.lines_scanned = lines.len();
    log::debug!("Processing {} lines from input", lines.len());

    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];
        if !line.starts_with(HEADER_MARKER) {
            parsed.report.stray_lines += 1;
            i += 1;
            continue;
        }

        let header = line.trim_end();
        let Some((name, mate)) = split_header(header) else {
            parsed.report.push(ParseIssue::InvalidHeader {
                line: i + 1,
                header: header.to_string(),
            });
            i += 1;
            continue;
        };

        let Some(record) = lines
            .get(i..i + LINES_PER_RECORD)
            .and_then(FastqRecord::from_lines)
        else {
            parsed.report.push(ParseIssue::IncompleteRecord {
                line: i + 1,
                available: lines.len() - i,
            });
            i += 1;
            continue;
        };

        if !record.separator.starts_with(SEPARATOR_MARKER) {
            // Re-scan from the next line rather than skipping the block
            parsed.report.push(ParseIssue::MalformedRecord { line: i + 1 });
            i += 1;
            continue;
        }

        let collection = match mate {
            MateType::First => &mut parsed.first,
            MateType::Second => &mut parsed.second,
        };
        if collection.insert(name.to_string(), record).is_some() {
            parsed.report.push(ParseIssue::DuplicateBaseName {
                line: i + 1,
                mate,
                base_name: name.to_string(),
            });
        }

        parsed.report.records_accepted += 1;
        i += LINES_PER_RECORD;
    }

    log::debug!(
        "Parsing summary: {} valid reads, {} invalid headers, {} incomplete records, {} malformed records",
        parsed.report.records_accepted,
        parsed.report.invalid_headers(),
        parsed.report.incomplete_records(),
        parsed.report.malformed_records()
    );

    parsed
}

/// Parse in-memory FASTQ text
///
/// Lines keep their `\n` (or `\r\n`) terminators so records can be written
/// back verbatim.
pub fn parse_str(text: &str) -> ParsedReads {
    let lines: Vec<&str> = text.split_inclusive('\n').collect();
    parse_lines(&lines)
}

/// Load a whole FASTQ file and parse it
///
/// # Errors
///
/// Returns `DetangleError::Io` if the file cannot be read or is not UTF-8.
pub fn parse_path<P: AsRef<Path>>(path: P) -> Result<ParsedReads> {
    let text = fs::read_to_string(path.as_ref())?;
    Ok(parse_str(&text))
}

/// FASTQ writer that emits records in base-name order
pub struct FastqWriter<W: Write> {
    writer: W,
    records_written: usize,
}

impl FastqWriter<BufWriter<File>> {
    /// Create (or truncate) a file and wrap it in a buffered writer
    pub fn create<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> FastqWriter<W> {
    /// Wrap an existing writer
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            records_written: 0,
        }
    }

    /// Write one record's four lines as they were read
    ///
    /// A line without a terminator gets `\n` appended so the next record
    /// starts on its own line.
    pub fn write_record(&mut self, record: &FastqRecord) -> io::Result<()> {
        for line in record.lines() {
            self.writer.write_all(line.as_bytes())?;
            if !line.ends_with('\n') {
                self.writer.write_all(b"\n")?;
            }
        }
        self.records_written += 1;
        Ok(())
    }

    /// Write records sorted by base name, returning how many were written
    pub fn write_sorted<'a, I>(&mut self, records: I) -> io::Result<usize>
    where
        I: IntoIterator<Item = (&'a str, &'a FastqRecord)>,
    {
        let mut entries: Vec<_> = records.into_iter().collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));

        for (_, record) in &entries {
            self.write_record(record)?;
        }
        Ok(entries.len())
    }

    /// Write a partition in base-name order
    pub fn write_partition(&mut self, partition: &Partition<'_>) -> io::Result<usize> {
        self.write_sorted(partition.iter().map(|(name, record)| (*name, *record)))
    }

    /// Write a full collection in base-name order
    pub fn write_collection(&mut self, collection: &ReadCollection) -> io::Result<usize> {
        self.write_sorted(collection.iter().map(|(name, record)| (name.as_str(), record)))
    }

    /// Records written so far
    pub fn records_written(&self) -> usize {
        self.records_written
    }

    /// Flush and return the inner writer
    pub fn finish(mut self) -> io::Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

/// Write a partition to `path`, sorted by base name
///
/// # Errors
///
/// Returns `DetangleError::Write` naming `path` if the file cannot be
/// created, written, or flushed.
pub fn write_fastq_file<P: AsRef<Path>>(partition: &Partition<'_>, path: P) -> Result<usize> {
    let path = path.as_ref();
    let writer = FastqWriter::create(path).map_err(|source| write_error(path, source))?;
    write_fastq_to(writer, partition, path)
}

/// Write a partition through an already opened writer and flush it
///
/// `path` names the destination in errors and log messages.
pub fn write_fastq_to<W: Write>(
    mut writer: FastqWriter<W>,
    partition: &Partition<'_>,
    path: &Path,
) -> Result<usize> {
    let write = || -> io::Result<usize> {
        let count = writer.write_partition(partition)?;
        writer.finish()?;
        Ok(count)
    };

    let count = write().map_err(|source| write_error(path, source))?;

    if count == 0 {
        log::warn!("Output file is empty: {}", path.display());
    }
    Ok(count)
}

/// Attach the destination path to a write-side I/O error
pub fn write_error(path: &Path, source: io::Error) -> DetangleError {
    DetangleError::Write {
        path: path.to_path_buf(),
        source,
    }
}
