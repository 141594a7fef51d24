//! Header classification
//!
//! A header belongs to a mate when it has the exact shape `@<identifier>/1`
//! or `@<identifier>/2`, with a non-empty identifier and nothing after the
//! mate digit. The identifier is the base name shared by both mates.
//!
//! # Examples
//!
//! ```
//! use fastq_detangler::operations::{base_name, classify};
//! use fastq_detangler::MateType;
//!
//! assert_eq!(classify("@read7/1"), Some(MateType::First));
//! assert_eq!(classify("@read7/2"), Some(MateType::Second));
//! assert_eq!(classify("@read7/3"), None);
//!
//! assert_eq!(base_name("@read7/1"), "read7");
//! assert_eq!(base_name("@read7/2"), "read7");
//! ```

use crate::types::MateType;

/// First character of every header line
pub const HEADER_MARKER: char = '@';

/// First character of every separator line
pub const SEPARATOR_MARKER: char = '+';

/// Split a header into its identifier and mate type
///
/// Returns `None` for any header that is not `@<identifier>/1` or
/// `@<identifier>/2`.
pub fn split_header(header: &str) -> Option<(&str, MateType)> {
    let body = header.strip_prefix(HEADER_MARKER)?;

    let (identifier, mate) = if let Some(identifier) = body.strip_suffix("/1") {
        (identifier, MateType::First)
    } else if let Some(identifier) = body.strip_suffix("/2") {
        (identifier, MateType::Second)
    } else {
        return None;
    };

    // Identifier must be non-empty and confined to a single line
    if identifier.is_empty() || identifier.contains('\n') {
        return None;
    }

    Some((identifier, mate))
}

/// Classify a header as R1, R2, or neither (`None`)
///
/// The match is anchored at both ends: trailing characters after the mate
/// digit, including line terminators, make the header unclassified. Callers
/// holding raw lines should trim the terminator first.
pub fn classify(header: &str) -> Option<MateType> {
    split_header(header).map(|(_, mate)| mate)
}

/// Extract the base name shared by both mates of a pair
///
/// For classified headers this is the identifier between the marker and the
/// `/1` or `/2` suffix. Any other header falls back to the header with its
/// leading marker removed (or unchanged when there is no marker).
pub fn base_name(header: &str) -> &str {
    match split_header(header) {
        Some((identifier, _)) => identifier,
        None => header.strip_prefix(HEADER_MARKER).unwrap_or(header),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_r1() {
        assert_eq!(classify("@read1/1"), Some(MateType::First));
        assert_eq!(classify("@sample_123/1"), Some(MateType::First));
    }

    #[test]
    fn test_classify_r2() {
        assert_eq!(classify("@read1/2"), Some(MateType::Second));
        assert_eq!(classify("@sample_123/2"), Some(MateType::Second));
    }

    #[test]
    fn test_classify_invalid() {
        assert_eq!(classify("@read1"), None);
        assert_eq!(classify("@read1/3"), None);
        assert_eq!(classify("read1/1"), None);
        assert_eq!(classify("@read1/1 extra"), None);
        assert_eq!(classify("@read1/1\n"), None);
        assert_eq!(classify("@/1"), None);
        assert_eq!(classify(""), None);
        assert_eq!(classify("@"), None);
    }

    #[test]
    fn test_identifier_may_contain_slash() {
        assert_eq!(classify("@a/1/2"), Some(MateType::Second));
        assert_eq!(base_name("@a/1/2"), "a/1");
    }

    #[test]
    fn test_identifier_may_contain_carriage_return() {
        assert_eq!(classify("@a\rb/1"), Some(MateType::First));
        assert_eq!(base_name("@a\rb/1"), "a\rb");
        assert_eq!(classify("@a\nb/1"), None);
    }

    #[test]
    fn test_base_name() {
        assert_eq!(base_name("@read1/1"), "read1");
        assert_eq!(base_name("@sample_123/2"), "sample_123");
        assert_eq!(base_name("@complex-name_456/1"), "complex-name_456");
    }

    #[test]
    fn test_base_name_fallback() {
        assert_eq!(base_name("@read1/3"), "read1/3");
        assert_eq!(base_name("@read1"), "read1");
        assert_eq!(base_name("read1/1"), "read1/1");
    }

    #[cfg(test)]
    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: both mates of a pair share the same base name
            #[test]
            fn prop_mates_share_base_name(id in "[A-Za-z0-9_:./-]{1,40}") {
                let r1 = format!("@{}/1", id);
                let r2 = format!("@{}/2", id);

                prop_assert_eq!(classify(&r1), Some(MateType::First));
                prop_assert_eq!(classify(&r2), Some(MateType::Second));
                prop_assert_eq!(base_name(&r1), id.as_str());
                prop_assert_eq!(base_name(&r2), id.as_str());
            }

            /// Property: classification depends only on the header text
            #[test]
            fn prop_classify_is_pure(header in "[ -~]{0,60}") {
                prop_assert_eq!(classify(&header), classify(&header));
            }

            /// Property: headers without the marker are never classified
            #[test]
            fn prop_missing_marker_unclassified(header in "[^@][A-Za-z0-9/]{0,30}") {
                prop_assert_eq!(classify(&header), None);
            }
        }
    }
}
