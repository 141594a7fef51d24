//! Output destinations for a detangling run
//!
//! A run writes four files named from one caller-supplied prefix:
//!
//! | Partition                  | File                                   |
//! |----------------------------|----------------------------------------|
//! | R1 with missing R2         | `<prefix>_R1_ordered_with_missing_R2.fastq` |
//! | R2 with missing R1         | `<prefix>_R2_ordered_with_missing_R1.fastq` |
//! | R1 with R2 partner         | `<prefix>_R1_paired.fastq`             |
//! | R2 with R1 partner         | `<prefix>_R2_paired.fastq`             |
//!
//! [`OutputBatch`] tracks the files a run has touched and removes them
//! unless the run commits, so a failed run leaves no partial set behind.
//!
//! # Example
//!
//! ```
//! use fastq_detangler::io::OutputPaths;
//! use std::path::Path;
//!
//! let outputs = OutputPaths::from_prefix("out/sample");
//! assert_eq!(outputs.paired_first, Path::new("out/sample_R1_paired.fastq"));
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Suffix for R1 reads whose R2 is missing
pub const MISSING_FIRST_SUFFIX: &str = "_R1_ordered_with_missing_R2.fastq";
/// Suffix for R2 reads whose R1 is missing
pub const MISSING_SECOND_SUFFIX: &str = "_R2_ordered_with_missing_R1.fastq";
/// Suffix for paired R1 reads
pub const PAIRED_FIRST_SUFFIX: &str = "_R1_paired.fastq";
/// Suffix for paired R2 reads
pub const PAIRED_SECOND_SUFFIX: &str = "_R2_paired.fastq";

/// The four output files of one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    /// R1 reads with no R2 partner
    pub missing_first: PathBuf,
    /// R2 reads with no R1 partner
    pub missing_second: PathBuf,
    /// R1 reads with an R2 partner
    pub paired_first: PathBuf,
    /// R2 reads with an R1 partner
    pub paired_second: PathBuf,
}

impl OutputPaths {
    /// Derive all four paths from a prefix
    ///
    /// Suffixes are appended to the prefix as-is (no separator is added), so
    /// `out/sample` yields `out/sample_R1_paired.fastq`.
    pub fn from_prefix<P: AsRef<Path>>(prefix: P) -> Self {
        let prefix = prefix.as_ref();
        Self {
            missing_first: with_suffix(prefix, MISSING_FIRST_SUFFIX),
            missing_second: with_suffix(prefix, MISSING_SECOND_SUFFIX),
            paired_first: with_suffix(prefix, PAIRED_FIRST_SUFFIX),
            paired_second: with_suffix(prefix, PAIRED_SECOND_SUFFIX),
        }
    }

    /// Paths in the order they are written
    pub fn in_write_order(&self) -> [&Path; 4] {
        [
            self.missing_first.as_path(),
            self.missing_second.as_path(),
            self.paired_first.as_path(),
            self.paired_second.as_path(),
        ]
    }
}

fn with_suffix(prefix: &Path, suffix: &str) -> PathBuf {
    let mut name = prefix.as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}

/// Files written by one run, removed on drop unless committed
#[derive(Debug, Default)]
pub struct OutputBatch {
    written: Vec<PathBuf>,
    committed: bool,
}

impl OutputBatch {
    /// Start an empty batch
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a file once it has been opened for writing
    ///
    /// Track only files this run created or truncated; a path that could
    /// not be opened still holds whatever was there before.
    pub fn track<P: AsRef<Path>>(&mut self, path: P) {
        self.written.push(path.as_ref().to_path_buf());
    }

    /// Files tracked so far
    pub fn paths(&self) -> &[PathBuf] {
        &self.written
    }

    /// Keep every tracked file
    pub fn commit(mut self) -> Vec<PathBuf> {
        self.committed = true;
        std::mem::take(&mut self.written)
    }

    /// Remove every tracked file, ignoring failures
    pub fn rollback(&mut self) {
        for path in self.written.drain(..) {
            match fs::remove_file(&path) {
                Ok(()) => log::debug!("Removed partial output: {}", path.display()),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => log::debug!("Could not remove {}: {}", path.display(), e),
            }
        }
    }
}

impl Drop for OutputBatch {
    fn drop(&mut self) {
        if !self.committed {
            self.rollback();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_from_prefix() {
        let outputs = OutputPaths::from_prefix("run1");
        assert_eq!(
            outputs.in_write_order(),
            [
                Path::new("run1_R1_ordered_with_missing_R2.fastq"),
                Path::new("run1_R2_ordered_with_missing_R1.fastq"),
                Path::new("run1_R1_paired.fastq"),
                Path::new("run1_R2_paired.fastq"),
            ]
        );
    }

    #[test]
    fn test_prefix_with_directory() {
        let outputs = OutputPaths::from_prefix(Path::new("/tmp/results/sample"));
        assert_eq!(
            outputs.missing_second,
            PathBuf::from("/tmp/results/sample_R2_ordered_with_missing_R1.fastq")
        );
    }

    #[test]
    fn test_batch_removes_on_drop() {
        let dir = TempDir::new().unwrap();
        let kept = dir.path().join("a.fastq");
        let missing = dir.path().join("never_created.fastq");
        fs::write(&kept, "@a/1\nA\n+\nI\n").unwrap();

        {
            let mut batch = OutputBatch::new();
            batch.track(&kept);
            batch.track(&missing);
            assert_eq!(batch.paths().len(), 2);
        }

        assert!(!kept.exists());
    }

    #[test]
    fn test_batch_commit_keeps_files() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("b.fastq");
        fs::write(&path, "").unwrap();

        let mut batch = OutputBatch::new();
        batch.track(&path);
        let kept = batch.commit();

        assert_eq!(kept, vec![path.clone()]);
        assert!(path.exists());
    }
}
