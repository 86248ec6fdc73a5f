use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::OnceLock;

use rand::thread_rng;
use rand::RngCore;
use siphasher::sip::SipHasher13;

use crate::fatnode::FatNode;
use crate::version::VersionId;

static SIP_KEY: OnceLock<[u8; 16]> = OnceLock::new();

/// The per-process key for chain hashing, drawn on first use.
fn sip_key() -> &'static [u8; 16] {
    SIP_KEY.get_or_init(|| {
        let mut key = [0; 16];
        thread_rng().fill_bytes(&mut key);
        key
    })
}

/// Hash value selecting the chain a key lives in.
pub(crate) fn chain_hash<K: Hash + ?Sized>(key: &K) -> u64 {
    let mut hasher = SipHasher13::new_with_key(sip_key());
    key.hash(&mut hasher);
    hasher.finish()
}

/// Backbone of [PersistentMap](super::PersistentMap).
///
/// Every hash value that was ever inserted owns a chain of fat nodes, one
/// per distinct key position the chain ever needed. Chains are addressed by
/// the full 64-bit hash, so they never have to be rehashed.
#[derive(Debug)]
pub(crate) struct Buckets<K, V> {
    chains: HashMap<u64, Vec<FatNode<(K, V)>>>,
}

impl<K, V> Default for Buckets<K, V> {
    fn default() -> Self {
        Buckets {
            chains: HashMap::new(),
        }
    }
}

impl<K, V> Buckets<K, V> {
    pub(crate) fn entry(&self, hash: u64, position: usize, tag: VersionId) -> &(K, V) {
        self.chains
            .get(&hash)
            .and_then(|chain| chain.get(position))
            .and_then(|node| node.get(tag))
            .unwrap_or_else(|| {
                panic!("chain {hash:#x} has no entry at position {position} for {tag}")
            })
    }

    /// Records `entry` at `position` of the chain for `hash`, growing the
    /// chain if no branch has needed that position yet.
    pub(crate) fn write(&mut self, hash: u64, position: usize, version: VersionId, entry: (K, V)) {
        let chain = self.chains.entry(hash).or_default();
        if chain.len() <= position {
            log::trace!("growing chain {hash:#x} to {} nodes", position + 1);
            chain.resize_with(position + 1, FatNode::new);
        }
        chain[position].record(version, entry);
    }

    /// Number of chains ever created.
    pub(crate) fn chain_count(&self) -> usize {
        self.chains.len()
    }

    /// Physical length of the chain for `hash`.
    #[cfg(test)]
    pub(crate) fn chain_len(&self, hash: u64) -> usize {
        self.chains.get(&hash).map_or(0, Vec::len)
    }
}

impl<K: Eq, V> Buckets<K, V> {
    /// Position of `key` among the entries `tags` makes active in its chain.
    pub(crate) fn find(&self, hash: u64, tags: &[VersionId], key: &K) -> Option<usize> {
        tags.iter()
            .enumerate()
            .position(|(position, &tag)| self.entry(hash, position, tag).0 == *key)
    }
}

impl<K: Clone, V: Clone> Buckets<K, V> {
    /// Closes the gap left by removing `position` from the active entries
    /// `tags`: every later entry moves up one node under `version`.
    pub(crate) fn shift_up(&mut self, hash: u64, tags: &[VersionId], position: usize, version: VersionId) {
        for target in position..tags.len() - 1 {
            let entry = self.entry(hash, target + 1, tags[target + 1]).clone();
            self.write(hash, target, version, entry);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(n: u64) -> VersionId {
        VersionId(n)
    }

    #[test]
    fn hash_is_stable_within_process() {
        assert_eq!(chain_hash(&42u32), chain_hash(&42u32));
        assert_eq!(chain_hash("key"), chain_hash(&String::from("key")));
    }

    #[test]
    fn chains_grow_on_demand() {
        let mut buckets = Buckets::default();
        buckets.write(7, 0, v(1), ("a", 1));
        buckets.write(7, 2, v(2), ("c", 3));
        assert_eq!(buckets.chain_len(7), 3);
        assert_eq!(buckets.chain_len(8), 0);
        assert_eq!(buckets.chain_count(), 1);
        assert_eq!(buckets.entry(7, 2, v(2)), &("c", 3));
    }

    #[test]
    fn find_compares_keys_not_hashes() {
        let mut buckets = Buckets::default();
        buckets.write(1, 0, v(1), ("a", 1));
        buckets.write(1, 1, v(2), ("b", 2));
        let tags = [v(1), v(2)];
        assert_eq!(buckets.find(1, &tags, &"b"), Some(1));
        assert_eq!(buckets.find(1, &tags, &"z"), None);
    }

    #[test]
    fn shift_up_keeps_old_entries() {
        let mut buckets = Buckets::default();
        for (position, key) in ["a", "b", "c"].into_iter().enumerate() {
            buckets.write(1, position, v(1), (key, position));
        }
        let tags = [v(1); 3];
        buckets.shift_up(1, &tags, 0, v(2));
        assert_eq!(buckets.entry(1, 0, v(2)).0, "b");
        assert_eq!(buckets.entry(1, 1, v(2)).0, "c");
        assert_eq!(buckets.entry(1, 0, v(1)).0, "a");
    }
}
