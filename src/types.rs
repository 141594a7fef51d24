//! Common types used throughout fastq-detangler

use std::collections::HashMap;
use std::fmt;

/// Which end of a read pair a record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MateType {
    /// First-of-pair, header suffix `/1`
    First,
    /// Second-of-pair, header suffix `/2`
    Second,
}

impl MateType {
    /// The mate number used in header suffixes (`1` or `2`)
    pub fn number(self) -> u8 {
        match self {
            Self::First => 1,
            Self::Second => 2,
        }
    }

    /// The partner's mate type
    pub fn mate(self) -> Self {
        match self {
            Self::First => Self::Second,
            Self::Second => Self::First,
        }
    }
}

impl fmt::Display for MateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{}", self.number())
    }
}

/// A four-line FASTQ record, kept exactly as read
///
/// Each field holds one raw input line including its line terminator, so
/// writing the fields back out reproduces the input bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastqRecord {
    /// Header line (starts with '@')
    pub header: String,
    /// Sequence line
    pub sequence: String,
    /// Separator line (starts with '+')
    pub separator: String,
    /// Quality line
    pub quality: String,
}

impl FastqRecord {
    /// Create a new FASTQ record from its four raw lines
    pub fn new(header: String, sequence: String, separator: String, quality: String) -> Self {
        Self {
            header,
            sequence,
            separator,
            quality,
        }
    }

    /// Build a record from a slice of exactly four lines
    ///
    /// Returns `None` if `lines` does not hold four entries.
    pub fn from_lines(lines: &[&str]) -> Option<Self> {
        match lines {
            [header, sequence, separator, quality] => Some(Self::new(
                header.to_string(),
                sequence.to_string(),
                separator.to_string(),
                quality.to_string(),
            )),
            _ => None,
        }
    }

    /// The four raw lines in file order
    pub fn lines(&self) -> [&str; 4] {
        [
            self.header.as_str(),
            self.sequence.as_str(),
            self.separator.as_str(),
            self.quality.as_str(),
        ]
    }
}

/// Records of one mate type, keyed by base name
///
/// A base name appears at most once; inserting a duplicate replaces the
/// earlier record.
pub type ReadCollection = HashMap<String, FastqRecord>;

/// A subset of a [`ReadCollection`], borrowing keys and records from it
pub type Partition<'a> = HashMap<&'a str, &'a FastqRecord>;
