//! Append-only, version-tagged storage cells.
//!
//! A [FatNode] keeps one entry per version that ever wrote to it instead of
//! being overwritten in place. Readers pick the entry their snapshot
//! considers active, so two snapshots can share a node while seeing
//! different contents.

use crate::version::VersionId;

/// A storage cell holding one payload per writing version.
///
/// Entries are kept sorted by version. Writes almost always arrive in
/// allocation order, which makes recording an amortised push.
#[derive(Debug, Clone)]
pub struct FatNode<T> {
    entries: Vec<(VersionId, T)>,
}

impl<T> Default for FatNode<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FatNode<T> {
    pub fn new() -> Self {
        FatNode {
            entries: Vec::new(),
        }
    }

    /// Creates a node with a single entry.
    pub fn with_entry(version: VersionId, payload: T) -> Self {
        FatNode {
            entries: vec![(version, payload)],
        }
    }

    fn position(&self, version: VersionId) -> Result<usize, usize> {
        // Fast path for the newest entry, which is what in-flight writes hit.
        match self.entries.last() {
            Some((last, _)) if *last == version => Ok(self.entries.len() - 1),
            Some((last, _)) if *last < version => Err(self.entries.len()),
            _ => self.entries.binary_search_by_key(&version, |(v, _)| *v),
        }
    }

    /// Returns the payload written under `version`, if any.
    pub fn get(&self, version: VersionId) -> Option<&T> {
        self.position(version).ok().map(|i| &self.entries[i].1)
    }

    /// Returns true if `version` wrote to this node.
    pub fn contains(&self, version: VersionId) -> bool {
        self.position(version).is_ok()
    }

    /// Records `payload` under `version`.
    ///
    /// A node never forgets an entry. Writing a version twice replaces the
    /// earlier payload; callers only do that for the id of the operation that
    /// is still in flight, which no published snapshot reads yet.
    pub fn record(&mut self, version: VersionId, payload: T) {
        match self.position(version) {
            Ok(i) => self.entries[i].1 = payload,
            Err(i) => self.entries.insert(i, (version, payload)),
        }
    }

    /// Number of versions that wrote to this node.
    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    /// Iterates over `(version, payload)` in version order.
    pub fn history(&self) -> impl Iterator<Item = (VersionId, &T)> + '_ {
        self.entries.iter().map(|(v, p)| (*v, p))
    }
}

impl<T: Clone> FatNode<T> {
    /// Copies the payload active under `from` to `to`.
    ///
    /// Used to re-tag a position without changing what it holds.
    pub fn retag(&mut self, from: VersionId, to: VersionId) -> Option<()> {
        if from == to {
            return self.contains(from).then_some(());
        }
        let payload = self.get(from)?.clone();
        self.record(to, payload);
        Some(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::BTreeMap;

    fn v(n: u64) -> VersionId {
        VersionId(n)
    }

    #[test]
    fn empty_node_has_no_entries() {
        let node = FatNode::<u8>::new();
        assert_eq!(node.depth(), 0);
        assert!(node.get(v(0)).is_none());
    }

    #[test]
    fn entries_are_kept_per_version() {
        let mut node = FatNode::with_entry(v(1), "a");
        node.record(v(3), "c");
        node.record(v(2), "b");
        assert_eq!(node.get(v(1)), Some(&"a"));
        assert_eq!(node.get(v(2)), Some(&"b"));
        assert_eq!(node.get(v(3)), Some(&"c"));
        assert_eq!(node.get(v(4)), None);
        let order: Vec<_> = node.history().map(|(v, _)| v.get()).collect();
        assert_eq!(order, vec![1, 2, 3]);
    }

    #[test]
    fn rewriting_the_same_version_replaces() {
        let mut node = FatNode::new();
        node.record(v(5), 1);
        node.record(v(5), 2);
        assert_eq!(node.depth(), 1);
        assert_eq!(node.get(v(5)), Some(&2));
    }

    #[test]
    fn retag_copies_payload() {
        let mut node = FatNode::with_entry(v(1), String::from("x"));
        assert_eq!(node.retag(v(1), v(4)), Some(()));
        assert_eq!(node.get(v(4)).map(String::as_str), Some("x"));
        assert_eq!(node.retag(v(2), v(5)), None);
        assert_eq!(node.retag(v(4), v(4)), Some(()));
        assert_eq!(node.depth(), 2);
    }

    proptest! {
        #[test]
        fn behaves_like_an_ordered_map(writes in prop::collection::vec((0u64..64, any::<u32>()), 0..256)) {
            let mut node = FatNode::new();
            let mut model = BTreeMap::new();
            for (version, payload) in writes {
                node.record(v(version), payload);
                model.insert(version, payload);
            }
            prop_assert_eq!(node.depth(), model.len());
            for version in 0..64 {
                prop_assert_eq!(node.get(v(version)), model.get(&version));
            }
            let history: Vec<_> = node.history().map(|(v, p)| (v.get(), *p)).collect();
            let expected: Vec<_> = model.into_iter().collect();
            prop_assert_eq!(history, expected);
        }
    }
}
