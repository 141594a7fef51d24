//! Pair analysis
//!
//! Splits the R1 and R2 collections by base name into reads whose mate is
//! missing and reads whose mate is present. Partitions borrow from the input
//! collections; nothing is copied or mutated.
//!
//! For every base name in R1, exactly one of `missing_first` and
//! `paired_first` contains it (and symmetrically for R2).

use crate::types::{Partition, ReadCollection};

/// Reads whose base name is absent from the other collection
///
/// Returns `(missing_first, missing_second)`.
pub fn missing<'a>(
    first: &'a ReadCollection,
    second: &'a ReadCollection,
) -> (Partition<'a>, Partition<'a>) {
    let missing_first = difference(first, second);
    let missing_second = difference(second, first);

    log::debug!(
        "Missing pairs identified: {} R1, {} R2",
        missing_first.len(),
        missing_second.len()
    );

    (missing_first, missing_second)
}

/// Reads whose base name is present in both collections
///
/// Returns `(paired_first, paired_second)`, both keyed by the same base
/// names. Each side keeps its own record for a name.
pub fn paired<'a>(
    first: &'a ReadCollection,
    second: &'a ReadCollection,
) -> (Partition<'a>, Partition<'a>) {
    let mut paired_first = Partition::new();
    let mut paired_second = Partition::new();

    for (name, r1) in first {
        if let Some(r2) = second.get(name) {
            paired_first.insert(name.as_str(), r1);
            paired_second.insert(name.as_str(), r2);
        }
    }

    log::debug!("Paired reads identified: {} pairs", paired_first.len());

    (paired_first, paired_second)
}

fn difference<'a>(from: &'a ReadCollection, other: &ReadCollection) -> Partition<'a> {
    from.iter()
        .filter(|(name, _)| !other.contains_key(name.as_str()))
        .map(|(name, record)| (name.as_str(), record))
        .collect()
}

/// All four partitions of one run
#[derive(Debug, Clone)]
pub struct PairAnalysis<'a> {
    /// R1 reads with no R2 partner
    pub missing_first: Partition<'a>,
    /// R2 reads with no R1 partner
    pub missing_second: Partition<'a>,
    /// R1 reads with an R2 partner
    pub paired_first: Partition<'a>,
    /// R2 reads with an R1 partner
    pub paired_second: Partition<'a>,
}

impl<'a> PairAnalysis<'a> {
    /// Compute missing and paired partitions for two collections
    pub fn new(first: &'a ReadCollection, second: &'a ReadCollection) -> Self {
        let (missing_first, missing_second) = missing(first, second);
        let (paired_first, paired_second) = paired(first, second);
        Self {
            missing_first,
            missing_second,
            paired_first,
            paired_second,
        }
    }

    /// Number of complete pairs
    pub fn pair_count(&self) -> usize {
        self.paired_first.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FastqRecord;

    fn record(name: &str, mate: u8, seq: &str) -> FastqRecord {
        FastqRecord::new(
            format!("@{}/{}\n", name, mate),
            format!("{}\n", seq),
            "+\n".to_string(),
            format!("{}\n", "I".repeat(seq.len())),
        )
    }

    fn collection(names: &[&str], mate: u8) -> ReadCollection {
        names
            .iter()
            .map(|name| (name.to_string(), record(name, mate, "ACGT")))
            .collect()
    }

    #[test]
    fn test_missing_disjoint() {
        let first = collection(&["a"], 1);
        let second = collection(&["b"], 2);

        let (missing_first, missing_second) = missing(&first, &second);
        assert!(missing_first.contains_key("a"));
        assert!(missing_second.contains_key("b"));
        assert_eq!(missing_first.len(), 1);
        assert_eq!(missing_second.len(), 1);

        let (paired_first, paired_second) = paired(&first, &second);
        assert!(paired_first.is_empty());
        assert!(paired_second.is_empty());
    }

    #[test]
    fn test_paired_keeps_each_sides_record() {
        let mut first = ReadCollection::new();
        first.insert("a".to_string(), record("a", 1, "AAAA"));
        let mut second = ReadCollection::new();
        second.insert("a".to_string(), record("a", 2, "CCCC"));

        let (paired_first, paired_second) = paired(&first, &second);
        assert_eq!(paired_first["a"].sequence, "AAAA\n");
        assert_eq!(paired_second["a"].sequence, "CCCC\n");

        let (missing_first, missing_second) = missing(&first, &second);
        assert!(missing_first.is_empty());
        assert!(missing_second.is_empty());
    }

    #[test]
    fn test_analysis_mixed() {
        let first = collection(&["r1", "r2", "r4"], 1);
        let second = collection(&["r1", "r3", "r4"], 2);

        let analysis = PairAnalysis::new(&first, &second);
        assert_eq!(analysis.pair_count(), 2);
        assert!(analysis.missing_first.contains_key("r2"));
        assert!(analysis.missing_second.contains_key("r3"));
        assert!(analysis.paired_first.contains_key("r1"));
        assert!(analysis.paired_second.contains_key("r4"));
    }

    #[test]
    fn test_empty_collections() {
        let first = ReadCollection::new();
        let second = collection(&["x"], 2);

        let analysis = PairAnalysis::new(&first, &second);
        assert!(analysis.missing_first.is_empty());
        assert_eq!(analysis.missing_second.len(), 1);
        assert_eq!(analysis.pair_count(), 0);
    }

    #[cfg(test)]
    mod properties {
        use super::*;
        use proptest::collection::btree_set;
        use proptest::prelude::*;

        proptest! {
            /// Property: every base name lands in exactly one partition per mate type
            #[test]
            fn prop_partitions_are_complete_and_disjoint(
                r1_names in btree_set("[a-f]{1,3}", 0..30),
                r2_names in btree_set("[a-f]{1,3}", 0..30),
            ) {
                let r1: Vec<&str> = r1_names.iter().map(String::as_str).collect();
                let r2: Vec<&str> = r2_names.iter().map(String::as_str).collect();
                let first = collection(&r1, 1);
                let second = collection(&r2, 2);

                let analysis = PairAnalysis::new(&first, &second);

                for name in first.keys() {
                    let in_missing = analysis.missing_first.contains_key(name.as_str());
                    let in_paired = analysis.paired_first.contains_key(name.as_str());
                    prop_assert!(in_missing != in_paired);
                }
                for name in second.keys() {
                    let in_missing = analysis.missing_second.contains_key(name.as_str());
                    let in_paired = analysis.paired_second.contains_key(name.as_str());
                    prop_assert!(in_missing != in_paired);
                }

                prop_assert_eq!(
                    analysis.missing_first.len() + analysis.paired_first.len(),
                    first.len()
                );
                prop_assert_eq!(
                    analysis.missing_second.len() + analysis.paired_second.len(),
                    second.len()
                );
                prop_assert_eq!(analysis.paired_first.len(), analysis.paired_second.len());
            }
        }
    }
}
