//! Read classification and pairing operations
//!
//! # Organization
//!
//! - `header`: R1/R2 classification and base-name extraction from header lines
//! - `pairing`: Missing/paired partitioning of R1 and R2 collections

pub mod header;
pub mod pairing;

pub use header::{base_name, classify, split_header, HEADER_MARKER, SEPARATOR_MARKER};
pub use pairing::{missing, paired, PairAnalysis};
