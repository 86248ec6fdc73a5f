//! A fully persistent hash map.
//!
//! Keys are grouped into chains by their hash value. A [PersistentMap]
//! snapshot maps every hash it contains to the tags of the active entries
//! in that hash's chain; lookups scan those entries by key equality, so
//! colliding keys share a chain without ambiguity.

mod buckets;

use std::collections::{btree_map, BTreeMap};
use std::fmt;
use std::hash::Hash;
use std::iter::FusedIterator;
use std::sync::Arc;

use itertools::Itertools;

use crate::root::Root;
use crate::version::VersionId;

use buckets::{chain_hash, Buckets};

type Table = BTreeMap<u64, Vec<VersionId>>;

/// An immutable snapshot of a hash map.
pub struct PersistentMap<K, V> {
    root: Root<Buckets<K, V>>,
    table: Arc<Table>,
    len: usize,
    version: VersionId,
}

impl<K, V> Clone for PersistentMap<K, V> {
    fn clone(&self) -> Self {
        PersistentMap {
            root: self.root.clone(),
            table: Arc::clone(&self.table),
            len: self.len,
            version: self.version,
        }
    }
}

impl<K, V> Default for PersistentMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> PersistentMap<K, V> {
    /// Creates an empty map at version 0 of a new version tree.
    pub fn new() -> Self {
        PersistentMap {
            root: Root::new(),
            table: Arc::new(Table::new()),
            len: 0,
            version: VersionId::ROOT,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The id of the mutation that produced this snapshot.
    pub fn version(&self) -> VersionId {
        self.version
    }

    /// The newest id taken anywhere in this snapshot's version tree.
    pub fn latest_version(&self) -> VersionId {
        self.root.counter().current()
    }

    pub fn same_tree(&self, other: &Self) -> bool {
        self.root.same_tree(&other.root)
    }

    /// Number of hash chains the shared backbone holds.
    pub fn backbone_chains(&self) -> usize {
        self.root.read().chain_count()
    }
}

impl<K, V> PersistentMap<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    pub fn singleton(key: K, value: V) -> Self {
        Self::new().plus(key, value)
    }

    pub fn get(&self, key: &K) -> Option<V> {
        let hash = chain_hash(key);
        let tags = self.table.get(&hash)?;
        let buckets = self.root.read();
        let position = buckets.find(hash, tags, key)?;
        Some(buckets.entry(hash, position, tags[position]).1.clone())
    }

    pub fn contains_key(&self, key: &K) -> bool {
        let hash = chain_hash(key);
        self.table
            .get(&hash)
            .is_some_and(|tags| self.root.read().find(hash, tags, key).is_some())
    }

    /// Iterates over all entries in chain order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            map: self,
            chains: self.table.iter(),
            current: None,
            remaining: self.len,
        }
    }

    /// All entries, materialised from every chain.
    pub fn entries(&self) -> Vec<(K, V)> {
        self.iter().collect()
    }

    pub fn keys(&self) -> Vec<K> {
        self.iter().map(|(k, _)| k).collect()
    }

    pub fn values(&self) -> Vec<V> {
        self.iter().map(|(_, v)| v).collect()
    }

    /// Maps `key` to `value`, replacing an existing mapping.
    pub fn plus(&self, key: K, value: V) -> Self {
        self.plus_all([(key, value)])
    }

    /// Applies all pairs under one version; a later pair wins over an
    /// earlier one with the same key.
    ///
    /// `pairs` is drained before the backbone is locked, so it may read
    /// snapshots of the same tree.
    pub fn plus_all<I: IntoIterator<Item = (K, V)>>(&self, pairs: I) -> Self {
        let pairs: Vec<(u64, K, V)> = pairs
            .into_iter()
            .map(|(key, value)| (chain_hash(&key), key, value))
            .collect();
        let mut table = (*self.table).clone();
        let mut len = self.len;
        let (version, ()) = self.root.edit(|buckets, version| {
            for (hash, key, value) in pairs {
                let tags = table.entry(hash).or_default();
                match buckets.find(hash, tags, &key) {
                    Some(position) => {
                        buckets.write(hash, position, version, (key, value));
                        tags[position] = version;
                    }
                    None => {
                        // Appending may reuse a node another branch created.
                        buckets.write(hash, tags.len(), version, (key, value));
                        tags.push(version);
                        len += 1;
                    }
                }
            }
        });
        self.derive(table, len, version)
    }

    /// Removes `key`. An absent key still yields a new snapshot and version.
    pub fn minus(&self, key: &K) -> Self {
        self.minus_all([key.clone()])
    }

    /// Removes every key in `keys` under one version. Like
    /// [plus_all](Self::plus_all), `keys` is drained before locking.
    pub fn minus_all<I: IntoIterator<Item = K>>(&self, keys: I) -> Self {
        let keys: Vec<(u64, K)> = keys.into_iter().map(|key| (chain_hash(&key), key)).collect();
        let mut table = (*self.table).clone();
        let mut len = self.len;
        let (version, ()) = self.root.edit(|buckets, version| {
            for (hash, key) in keys {
                let Some(tags) = table.get_mut(&hash) else {
                    continue;
                };
                let Some(position) = buckets.find(hash, tags, &key) else {
                    continue;
                };
                buckets.shift_up(hash, tags, position, version);
                let remaining = tags.len() - 1;
                tags.truncate(position);
                tags.resize(remaining, version);
                if tags.is_empty() {
                    table.remove(&hash);
                }
                len -= 1;
            }
        });
        if len == self.len {
            log::debug!("map removal at {version} found no keys");
        }
        self.derive(table, len, version)
    }

    fn derive(&self, table: Table, len: usize, version: VersionId) -> Self {
        PersistentMap {
            root: self.root.clone(),
            table: Arc::new(table),
            len,
            version,
        }
    }
}

impl<K, V> PersistentMap<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone + PartialEq,
{
    pub fn contains_value(&self, value: &V) -> bool {
        self.iter().any(|(_, v)| &v == value)
    }
}

impl<K, V> FromIterator<(K, V)> for PersistentMap<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::new().plus_all(iter)
    }
}

impl<K, V> PartialEq for PersistentMap<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().all(|(k, v)| other.get(&k).as_ref() == Some(&v))
    }
}

impl<K, V> Eq for PersistentMap<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone + Eq,
{
}

impl<K, V> fmt::Debug for PersistentMap<K, V>
where
    K: Hash + Eq + Clone + fmt::Debug,
    V: Clone + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> fmt::Display for PersistentMap<K, V>
where
    K: Hash + Eq + Clone + fmt::Display,
    V: Clone + fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self
            .iter()
            .format_with(", ", |(k, v), f| f(&format_args!("{k}={v}")));
        write!(f, "{{{entries}}}")
    }
}

impl<'a, K, V> IntoIterator for &'a PersistentMap<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    type Item = (K, V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the entries of a [PersistentMap] snapshot.
pub struct Iter<'a, K, V> {
    map: &'a PersistentMap<K, V>,
    chains: btree_map::Iter<'a, u64, Vec<VersionId>>,
    current: Option<(u64, &'a [VersionId], usize)>,
    remaining: usize,
}

impl<K: Clone, V: Clone> Iterator for Iter<'_, K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.current {
                Some((hash, tags, position)) if position < tags.len() => {
                    self.current = Some((hash, tags, position + 1));
                    self.remaining -= 1;
                    let buckets = self.map.root.read();
                    return Some(buckets.entry(hash, position, tags[position]).clone());
                }
                _ => {
                    let (&hash, tags) = self.chains.next()?;
                    self.current = Some((hash, tags.as_slice(), 0));
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K: Clone, V: Clone> ExactSizeIterator for Iter<'_, K, V> {}

impl<K: Clone, V: Clone> FusedIterator for Iter<'_, K, V> {}
