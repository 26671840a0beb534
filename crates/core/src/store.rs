//! In-memory identifier -> count mapping, the unit of persistence.

use std::collections::btree_map;
use std::collections::BTreeMap;

/// Counts per collectible identifier.
///
/// Ordered so that encoding the same contents always yields the same blob.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct CollectionStore {
    counts: BTreeMap<String, u32>,
}

impl CollectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the count for `identifier`, zero when absent.
    pub fn get(&self, identifier: &str) -> u32 {
        self.counts.get(identifier).copied().unwrap_or(0)
    }

    pub fn set(&mut self, identifier: impl Into<String>, count: u32) {
        self.counts.insert(identifier.into(), count);
    }

    /// Adds one to the count and returns the new value, saturating at `u32::MAX`.
    pub fn increment(&mut self, identifier: &str) -> u32 {
        let count = self.counts.entry(identifier.to_string()).or_insert(0);
        *count = count.saturating_add(1);
        *count
    }

    /// Copies every entry of `other` over this store.
    pub fn merge(&mut self, other: CollectionStore) {
        self.counts.extend(other.counts);
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.counts.contains_key(identifier)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.counts
            .iter()
            .map(|(identifier, count)| (identifier.as_str(), *count))
    }
}

impl<S: Into<String>> FromIterator<(S, u32)> for CollectionStore {
    fn from_iter<I: IntoIterator<Item = (S, u32)>>(iter: I) -> Self {
        Self {
            counts: iter
                .into_iter()
                .map(|(identifier, count)| (identifier.into(), count))
                .collect(),
        }
    }
}

impl IntoIterator for CollectionStore {
    type Item = (String, u32);
    type IntoIter = btree_map::IntoIter<String, u32>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_identifier_counts_zero() {
        let store = CollectionStore::new();
        assert_eq!(store.get("a:One"), 0);
        assert!(!store.contains("a:One"));
    }

    #[test]
    fn increment_starts_from_zero_and_saturates() {
        let mut store = CollectionStore::new();
        assert_eq!(store.increment("a:One"), 1);
        assert_eq!(store.increment("a:One"), 2);

        store.set("a:Two", u32::MAX);
        assert_eq!(store.increment("a:Two"), u32::MAX);
    }

    #[test]
    fn merge_overwrites_existing_entries() {
        let mut store: CollectionStore = [("a:One", 3), ("a:Two", 1)].into_iter().collect();
        let incoming: CollectionStore = [("a:Two", 9), ("a:Three", 4)].into_iter().collect();
        store.merge(incoming);

        assert_eq!(store.len(), 3);
        assert_eq!(store.get("a:One"), 3);
        assert_eq!(store.get("a:Two"), 9);
        assert_eq!(store.get("a:Three"), 4);
    }

    #[test]
    fn iterates_in_identifier_order() {
        let store: CollectionStore = [("b", 2), ("a", 1), ("c", 3)].into_iter().collect();
        let ids: Vec<&str> = store.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }
}
