//! Bidirectional identifier <-> checksum code mapping.

use std::collections::{BTreeSet, HashMap};

use tracing::warn;

use crate::checksum::checksum_str;
use crate::error::{PileError, PileResult};
use crate::version::SENTINEL_CODE;

/// Maps every catalog identifier to its CRC-32 code and back.
///
/// Built once from the full catalog. Codes are only meaningful against the
/// catalog they were built from: a blob written with one catalog can only
/// resolve the identifiers that still exist in the next one.
#[derive(Clone, Debug, Default)]
pub struct IdentifierCodec {
    to_code: HashMap<String, u32>,
    from_code: HashMap<u32, String>,
    distinct: usize,
}

impl IdentifierCodec {
    /// Builds the mapping, deduplicating the input first.
    ///
    /// Two distinct identifiers with the same code leave the maps smaller
    /// than the identifier set; that is logged and construction continues.
    pub fn new<I, S>(identifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let unique: BTreeSet<String> = identifiers.into_iter().map(Into::into).collect();
        let mut to_code = HashMap::with_capacity(unique.len());
        let mut from_code = HashMap::with_capacity(unique.len());
        for identifier in &unique {
            let code = checksum_str(identifier);
            if code == SENTINEL_CODE {
                warn!(
                    identifier = %identifier,
                    "identifier hashes to the sentinel code and won't round-trip"
                );
            }
            to_code.insert(identifier.clone(), code);
            from_code.insert(code, identifier.clone());
        }

        let codec = Self {
            to_code,
            from_code,
            distinct: unique.len(),
        };
        if codec.has_collisions() {
            warn!(
                identifiers = codec.distinct,
                codes = codec.from_code.len(),
                "identifier count doesn't match code map sizes, possible checksum collision"
            );
        }
        codec
    }

    /// Returns the code for a catalog identifier.
    pub fn to_code(&self, identifier: &str) -> PileResult<u32> {
        self.to_code
            .get(identifier)
            .copied()
            .ok_or_else(|| PileError::UnknownIdentifier(identifier.to_string()))
    }

    /// Resolves a code back to its identifier. The sentinel code never resolves.
    pub fn from_code(&self, code: u32) -> Option<&str> {
        if code == SENTINEL_CODE {
            return None;
        }
        self.from_code.get(&code).map(String::as_str)
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.to_code.contains_key(identifier)
    }

    /// Number of distinct identifiers the codec was built from.
    pub fn len(&self) -> usize {
        self.distinct
    }

    pub fn is_empty(&self) -> bool {
        self.distinct == 0
    }

    pub fn has_collisions(&self) -> bool {
        self.distinct != self.to_code.len() || self.distinct != self.from_code.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_both_directions() {
        let codec = IdentifierCodec::new(["melvorD:CoolRock", "melvorF:Pyro"]);
        let code = codec.to_code("melvorD:CoolRock").expect("known identifier");
        assert_eq!(code, checksum_str("melvorD:CoolRock"));
        assert_eq!(codec.from_code(code), Some("melvorD:CoolRock"));
        assert_eq!(codec.len(), 2);
        assert!(!codec.has_collisions());
    }

    #[test]
    fn duplicates_are_not_collisions() {
        let codec = IdentifierCodec::new(["a:One", "a:Two", "a:One"]);
        assert_eq!(codec.len(), 2);
        assert!(!codec.has_collisions());
    }

    #[test]
    fn sentinel_and_unknown_codes_resolve_to_none() {
        let codec = IdentifierCodec::new(["a:One"]);
        assert_eq!(codec.from_code(SENTINEL_CODE), None);
        assert_eq!(codec.from_code(0xDEAD_BEEF), None);
    }

    #[test]
    fn unknown_identifier_is_an_error() {
        let codec = IdentifierCodec::new(["a:One"]);
        let err = codec.to_code("a:Missing").expect_err("not in catalog");
        assert!(matches!(err, PileError::UnknownIdentifier(id) if id == "a:Missing"));
    }

    #[test]
    fn colliding_identifiers_are_detected() {
        // "plumless" and "buckeroo" share CRC-32 0x4DDB0C25.
        assert_eq!(checksum_str("plumless"), checksum_str("buckeroo"));
        let codec = IdentifierCodec::new(["plumless", "buckeroo", "other"]);
        assert_eq!(codec.len(), 3);
        assert!(codec.has_collisions());
        assert!(codec.contains("plumless"));
        assert!(codec.contains("buckeroo"));
    }
}
