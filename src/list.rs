//! A fully persistent linked sequence.
//!
//! [PersistentList] keeps its elements in a shared [Chain] of fat nodes
//! whose `next`/`prev` links are versioned. A snapshot carries its own head
//! and tail handles plus a table with one tag per position, and reads a
//! node's value and links under the tag of the position it occupies.
//!
//! Unlike [PersistentArray](crate::PersistentArray), an edit writes only a
//! constant number of entries around the edited position. Finding that
//! position still walks the chain from the nearer end.
//!
//! Whenever an edit links a node to a new predecessor, that node is moved to
//! the edit's tag. Links are keyed by the tag of their later node, so a link
//! created by one edit can never collide with a link of another branch.

mod chain;

use std::fmt;
use std::iter::FusedIterator;
use std::sync::Arc;

use itertools::Itertools;

use crate::error::OutOfRange;
use crate::root::Root;
use crate::sequence::{removal_mask, PersistentSequence};
use crate::version::VersionId;

use chain::{Chain, NodeId};

/// An immutable snapshot of a linked sequence.
pub struct PersistentList<T> {
    root: Root<Chain<T>>,
    /// Head and tail, `None` when empty.
    ends: Option<(NodeId, NodeId)>,
    table: Arc<[VersionId]>,
    version: VersionId,
}

impl<T> Clone for PersistentList<T> {
    fn clone(&self) -> Self {
        PersistentList {
            root: self.root.clone(),
            ends: self.ends,
            table: Arc::clone(&self.table),
            version: self.version,
        }
    }
}

impl<T> Default for PersistentList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PersistentList<T> {
    /// Creates an empty list at version 0 of a new version tree.
    pub fn new() -> Self {
        PersistentList {
            root: Root::new(),
            ends: None,
            table: Arc::from([]),
            version: VersionId::ROOT,
        }
    }

    fn derive(&self, ends: Option<(NodeId, NodeId)>, table: Vec<VersionId>, version: VersionId) -> Self {
        debug_assert_eq!(ends.is_none(), table.is_empty());
        PersistentList {
            root: self.root.clone(),
            ends,
            table: table.into(),
            version,
        }
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// The id of the mutation that produced this snapshot.
    pub fn version(&self) -> VersionId {
        self.version
    }

    /// The newest id taken anywhere in this snapshot's version tree.
    pub fn latest_version(&self) -> VersionId {
        self.root.counter().current()
    }

    /// True if both snapshots descend from the same empty root.
    pub fn same_tree(&self, other: &Self) -> bool {
        self.root.same_tree(&other.root)
    }

    /// Number of nodes ever allocated in the shared chain.
    pub fn backbone_nodes(&self) -> usize {
        self.root.read().len()
    }

    fn ends(&self) -> (NodeId, NodeId) {
        self.ends.expect("non-empty list has a head and a tail")
    }

    /// Finds the node at `index`, walking from whichever end is nearer.
    fn node_at(&self, chain: &Chain<T>, index: usize) -> NodeId {
        let (head, tail) = self.ends();
        let last = self.len() - 1;
        if index <= last / 2 {
            chain.forward(head, 0, index, &self.table)
        } else {
            chain.backward(tail, last, last - index, &self.table)
        }
    }

    /// Entries written to the node at `index` by all branches together.
    pub fn node_history(&self, index: usize) -> Result<usize, OutOfRange> {
        OutOfRange::check_access(index, self.len())?;
        let chain = self.root.read();
        Ok(chain.depth(self.node_at(&chain, index)))
    }
}

impl<T: Clone> PersistentList<T> {
    pub fn singleton(value: T) -> Self {
        Self::new().plus(value)
    }

    /// Returns the element at `index` after walking to it.
    pub fn get(&self, index: usize) -> Result<T, OutOfRange> {
        OutOfRange::check_access(index, self.len())?;
        let chain = self.root.read();
        let node = self.node_at(&chain, index);
        Ok(chain.value(node, self.table[index]).clone())
    }

    pub fn first(&self) -> Option<T> {
        let (head, _) = self.ends?;
        Some(self.root.read().value(head, self.table[0]).clone())
    }

    pub fn last(&self) -> Option<T> {
        let (_, tail) = self.ends?;
        Some(self.root.read().value(tail, self.table[self.len() - 1]).clone())
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            front: 0,
            back: self.len(),
            front_node: self.ends.map(|(head, _)| head),
            back_node: self.ends.map(|(_, tail)| tail),
        }
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.iter().collect()
    }

    pub fn plus(&self, value: T) -> Self {
        self.splice_in(self.len(), vec![value])
    }

    pub fn plus_all<I: IntoIterator<Item = T>>(&self, values: I) -> Self {
        self.splice_in(self.len(), values.into_iter().collect())
    }

    pub fn insert(&self, index: usize, value: T) -> Result<Self, OutOfRange> {
        OutOfRange::check_insert(index, self.len())?;
        Ok(self.splice_in(index, vec![value]))
    }

    pub fn insert_all<I: IntoIterator<Item = T>>(
        &self,
        index: usize,
        values: I,
    ) -> Result<Self, OutOfRange> {
        OutOfRange::check_insert(index, self.len())?;
        Ok(self.splice_in(index, values.into_iter().collect()))
    }

    /// Links a fresh run of nodes in before position `index`.
    fn splice_in(&self, index: usize, values: Vec<T>) -> Self {
        if values.is_empty() {
            return self.unchanged();
        }
        let len = self.len();
        let count = values.len();
        let (version, (first, last)) = self.root.edit(|chain, version| {
            let mut values = values.into_iter();
            let first = chain.alloc(version, values.next().expect("batch is not empty"));
            let mut last = first;
            for value in values {
                let node = chain.alloc(version, value);
                chain.link(last, node, version);
                last = node;
            }

            match self.ends {
                // Empty list: the run is the whole list.
                None => {}
                // New head: the old head gains a predecessor.
                Some((head, _)) if index == 0 => {
                    chain.retag(head, self.table[0], version);
                    chain.link(last, head, version);
                }
                // New tail: the old tail gains a successor.
                Some((_, tail)) if index == len => {
                    chain.link(tail, first, version);
                }
                // Interior: both neighbours change, the successor is re-tagged.
                Some(_) => {
                    let pred = self.node_at(chain, index - 1);
                    let succ = chain.next(pred, self.table[index]);
                    chain.link(pred, first, version);
                    chain.retag(succ, self.table[index], version);
                    chain.link(last, succ, version);
                }
            }
            (first, last)
        });

        let ends = match self.ends {
            None => (first, last),
            Some((head, tail)) => (
                if index == 0 { first } else { head },
                if index == len { last } else { tail },
            ),
        };
        let mut table = Vec::with_capacity(len + count);
        table.extend_from_slice(&self.table[..index]);
        table.resize(index + count, version);
        if index < len {
            table.push(version);
            table.extend_from_slice(&self.table[index + 1..]);
        }
        self.derive(Some(ends), table, version)
    }

    /// Removes the element at `index`.
    ///
    /// The neighbours are found under a read lock; an interior removal then
    /// locks the chain only to re-tag the successor and bridge the gap.
    pub fn remove(&self, index: usize) -> Result<Self, OutOfRange> {
        OutOfRange::check_access(index, self.len())?;
        let len = self.len();
        let (head, tail) = self.ends();
        if len == 1 {
            let version = self.root.skip();
            return Ok(self.derive(None, Vec::new(), version));
        }
        if index == 0 || index == len - 1 {
            let ends = {
                let chain = self.root.read();
                if index == 0 {
                    (chain.next(head, self.table[1]), tail)
                } else {
                    (head, chain.prev(tail, self.table[len - 1]))
                }
            };
            let version = self.root.skip();
            let mut table = self.table.to_vec();
            table.remove(index);
            return Ok(self.derive(Some(ends), table, version));
        }

        let (pred, succ) = {
            let chain = self.root.read();
            let pred = self.node_at(&chain, index - 1);
            let succ = chain.forward(pred, index - 1, 2, &self.table);
            (pred, succ)
        };
        let (version, ()) = self.root.edit(|chain, version| {
            chain.retag(succ, self.table[index + 1], version);
            chain.link(pred, succ, version);
        });
        let mut table = Vec::with_capacity(len - 1);
        table.extend_from_slice(&self.table[..index]);
        table.push(version);
        table.extend_from_slice(&self.table[index + 2..]);
        Ok(self.derive(Some((head, tail)), table, version))
    }

    /// Removes every position flagged in `removed` under one version.
    ///
    /// Each maximal run of removed positions is bridged by a single link
    /// from the survivor before it to the survivor after it. Runs touching
    /// an end only move the snapshot's head or tail and write nothing.
    fn drop_positions(&self, removed: &[bool]) -> Self {
        if !removed.contains(&true) {
            return self.unchanged();
        }
        if removed.iter().all(|&r| r) {
            let version = self.root.skip();
            return self.derive(None, Vec::new(), version);
        }

        let len = self.len();
        let (version, (ends, table)) = self.root.edit(|chain, version| {
            let (head, _) = self.ends();
            let mut table = Vec::with_capacity(len);
            let mut ends: Option<(NodeId, NodeId)> = None;
            let mut gap = false;
            let mut node = head;
            for position in 0..len {
                if position > 0 {
                    node = chain.next(node, self.table[position]);
                }
                if removed[position] {
                    gap = true;
                    continue;
                }
                let mut tag = self.table[position];
                match ends {
                    None => ends = Some((node, node)),
                    Some((first, last)) => {
                        if gap {
                            chain.retag(node, tag, version);
                            chain.link(last, node, version);
                            tag = version;
                        }
                        ends = Some((first, node));
                    }
                }
                gap = false;
                table.push(tag);
            }
            (ends, table)
        });
        self.derive(ends, table, version)
    }

    /// Replaces the element at `index`.
    ///
    /// The node keeps its place in the chain; it receives a new value entry
    /// and, unless it is the head, a fresh link from its predecessor.
    pub fn set(&self, index: usize, value: T) -> Result<Self, OutOfRange> {
        OutOfRange::check_access(index, self.len())?;
        let (version, ()) = self.root.edit(|chain, version| {
            let node = self.node_at(chain, index);
            chain.write_value(node, version, value);
            if index > 0 {
                let pred = chain.prev(node, self.table[index]);
                chain.link(pred, node, version);
            }
        });
        let mut table = self.table.to_vec();
        table[index] = version;
        Ok(self.derive(self.ends, table, version))
    }

    /// The positions `from..to` as a list of their own.
    ///
    /// Nothing is written: the result simply starts and ends at other nodes.
    /// It still takes a version id.
    pub fn slice(&self, from: usize, to: usize) -> Result<Self, OutOfRange> {
        OutOfRange::check_range(from, to, self.len())?;
        let version = self.root.skip();
        if from == to {
            return Ok(self.derive(None, Vec::new(), version));
        }
        let ends = {
            let chain = self.root.read();
            let head = self.node_at(&chain, from);
            let tail = chain.forward(head, from, to - 1 - from, &self.table);
            (head, tail)
        };
        Ok(self.derive(Some(ends), self.table[from..to].to_vec(), version))
    }

    fn unchanged(&self) -> Self {
        let version = self.root.skip();
        log::debug!("list edit at {version} changed nothing");
        PersistentList {
            root: self.root.clone(),
            ends: self.ends,
            table: Arc::clone(&self.table),
            version,
        }
    }
}

impl<T: Clone + PartialEq> PersistentList<T> {
    /// Position of the first element equal to `value`, by linear scan.
    pub fn index_of(&self, value: &T) -> Option<usize> {
        self.iter().position(|v| &v == value)
    }

    pub fn contains(&self, value: &T) -> bool {
        self.index_of(value).is_some()
    }

    pub fn contains_all<'a, I>(&self, values: I) -> bool
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        let elements = self.to_vec();
        values.into_iter().all(|v| elements.contains(v))
    }

    pub fn minus(&self, value: &T) -> Self {
        match self.index_of(value) {
            Some(index) => self
                .remove(index)
                .expect("index_of returns an existing position"),
            None => self.unchanged(),
        }
    }

    pub fn minus_all<I: IntoIterator<Item = T>>(&self, values: I) -> Self {
        let removed = removal_mask(&self.to_vec(), values);
        self.drop_positions(&removed)
    }
}

impl<T: Clone + PartialEq> PersistentSequence<T> for PersistentList<T> {
    fn len(&self) -> usize {
        PersistentList::len(self)
    }

    fn version(&self) -> VersionId {
        PersistentList::version(self)
    }

    fn get(&self, index: usize) -> Result<T, OutOfRange> {
        PersistentList::get(self, index)
    }

    fn iter(&self) -> impl Iterator<Item = T> + '_ {
        PersistentList::iter(self)
    }

    fn contains(&self, value: &T) -> bool {
        PersistentList::contains(self, value)
    }

    fn plus(&self, value: T) -> Self {
        PersistentList::plus(self, value)
    }

    fn plus_all<I: IntoIterator<Item = T>>(&self, values: I) -> Self {
        PersistentList::plus_all(self, values)
    }

    fn insert(&self, index: usize, value: T) -> Result<Self, OutOfRange> {
        PersistentList::insert(self, index, value)
    }

    fn insert_all<I: IntoIterator<Item = T>>(
        &self,
        index: usize,
        values: I,
    ) -> Result<Self, OutOfRange> {
        PersistentList::insert_all(self, index, values)
    }

    fn remove(&self, index: usize) -> Result<Self, OutOfRange> {
        PersistentList::remove(self, index)
    }

    fn minus(&self, value: &T) -> Self {
        PersistentList::minus(self, value)
    }

    fn minus_all<I: IntoIterator<Item = T>>(&self, values: I) -> Self {
        PersistentList::minus_all(self, values)
    }

    fn set(&self, index: usize, value: T) -> Result<Self, OutOfRange> {
        PersistentList::set(self, index, value)
    }

    fn slice(&self, from: usize, to: usize) -> Result<Self, OutOfRange> {
        PersistentList::slice(self, from, to)
    }
}

impl<T: Clone> FromIterator<T> for PersistentList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new().plus_all(iter)
    }
}

impl<T: Clone + PartialEq> PartialEq for PersistentList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Clone + Eq> Eq for PersistentList<T> {}

impl<T: Clone + fmt::Debug> fmt::Debug for PersistentList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: Clone + fmt::Display> fmt::Display for PersistentList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.iter().format(", "))
    }
}

impl<'a, T: Clone> IntoIterator for &'a PersistentList<T> {
    type Item = T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over a [PersistentList] snapshot, following its links from
/// either end.
pub struct Iter<'a, T> {
    list: &'a PersistentList<T>,
    front: usize,
    back: usize,
    front_node: Option<NodeId>,
    back_node: Option<NodeId>,
}

impl<T: Clone> Iterator for Iter<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        let node = self.front_node?;
        let table = &self.list.table;
        let chain = self.list.root.read();
        let value = chain.value(node, table[self.front]).clone();
        self.front += 1;
        if self.front < self.back {
            self.front_node = Some(chain.next(node, table[self.front]));
        }
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<T: Clone> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        let node = self.back_node?;
        let table = &self.list.table;
        let chain = self.list.root.read();
        self.back -= 1;
        let value = chain.value(node, table[self.back]).clone();
        if self.back > self.front {
            self.back_node = Some(chain.prev(node, table[self.back]));
        }
        Some(value)
    }
}

impl<T: Clone> ExactSizeIterator for Iter<'_, T> {}

impl<T: Clone> FusedIterator for Iter<'_, T> {}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn five() -> PersistentList<i32> {
        PersistentList::from_iter([1, 2, 3, 4, 5])
    }

    #[test]
    fn set_covers_head_interior_and_tail() {
        let list = five();
        let interior = list.set(2, 7).unwrap();
        let head = list.set(0, 7).unwrap();
        let tail = list.set(4, 7).unwrap();
        assert_eq!(interior.to_vec(), vec![1, 2, 7, 4, 5]);
        assert_eq!(head.to_vec(), vec![7, 2, 3, 4, 5]);
        assert_eq!(tail.to_vec(), vec![1, 2, 3, 4, 7]);
        assert_eq!(list.to_vec(), vec![1, 2, 3, 4, 5]);
        assert_eq!(
            (interior.version().get(), head.version().get(), tail.version().get()),
            (2, 3, 4)
        );
        // Walking backward must agree with walking forward.
        let reversed: Vec<_> = interior.iter().rev().collect();
        assert_eq!(reversed, vec![5, 4, 7, 2, 1]);
    }

    #[test]
    fn interior_edits_write_constant_entries() {
        let list = PersistentList::from_iter(0..100);
        let nodes = list.backbone_nodes();
        let before: Vec<usize> = (47..54).map(|i| list.node_history(i).unwrap()).collect();
        let grown = list.insert(50, -1).unwrap();
        let after: Vec<usize> = (47..54).map(|i| list.node_history(i).unwrap()).collect();
        assert_eq!(grown.backbone_nodes(), nodes + 1);
        // Only the predecessor (49) and successor (50) of the new node
        // gained entries.
        let gained: Vec<usize> = after.iter().zip(&before).map(|(a, b)| a - b).collect();
        assert_eq!(gained, vec![0, 0, 1, 2, 0, 0, 0]);
        assert_eq!(grown.node_history(50).unwrap(), 3);
    }

    #[test]
    fn remove_at_ends_writes_nothing() {
        let list = five();
        let before: Vec<usize> = (0..5).map(|i| list.node_history(i).unwrap()).collect();
        let no_head = list.remove(0).unwrap();
        let no_tail = list.remove(4).unwrap();
        let after: Vec<usize> = (0..5).map(|i| list.node_history(i).unwrap()).collect();
        assert_eq!(no_head.to_vec(), vec![2, 3, 4, 5]);
        assert_eq!(no_tail.to_vec(), vec![1, 2, 3, 4]);
        assert_eq!(no_head.iter().rev().collect::<Vec<_>>(), vec![5, 4, 3, 2]);
        assert_eq!(no_tail.iter().rev().collect::<Vec<_>>(), vec![4, 3, 2, 1]);
        assert_eq!(after, before);
        assert_eq!(no_tail.version().get(), 3);
    }

    #[test]
    fn remove_interior_touches_only_the_successor_and_predecessor() {
        let list = PersistentList::from_iter(0..10);
        let before: Vec<usize> = (0..10).map(|i| list.node_history(i).unwrap()).collect();
        let removed = list.remove(6).unwrap();
        let after: Vec<usize> = (0..10).map(|i| list.node_history(i).unwrap()).collect();
        let gained: Vec<usize> = after.iter().zip(&before).map(|(a, b)| a - b).collect();
        // Predecessor gains a link, successor a value and a link.
        assert_eq!(gained, vec![0, 0, 0, 0, 0, 1, 0, 2, 0, 0]);
        assert_eq!(removed.to_vec(), vec![0, 1, 2, 3, 4, 5, 7, 8, 9]);
        assert_eq!(removed.get(6), Ok(7));
        assert_eq!(removed.version().get(), 2);
    }

    #[test]
    fn remove_interior_relinks_neighbours() {
        let list = five();
        let removed = list.remove(2).unwrap();
        assert_eq!(removed.to_vec(), vec![1, 2, 4, 5]);
        assert_eq!(removed.iter().rev().collect::<Vec<_>>(), vec![5, 4, 2, 1]);
        let again = removed.remove(2).unwrap();
        assert_eq!(again.to_vec(), vec![1, 2, 5]);
        assert_eq!(removed.to_vec(), vec![1, 2, 4, 5]);
        assert_eq!(list.to_vec(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn remove_only_element() {
        let single = PersistentList::singleton(42);
        let empty = single.remove(0).unwrap();
        assert!(empty.is_empty());
        assert_eq!(empty.version().get(), 2);
        assert_eq!(empty.plus(1).to_vec(), vec![1]);
        assert_eq!(single.to_vec(), vec![42]);
    }

    #[test]
    fn minus_all_bridges_runs() {
        let list = PersistentList::from_iter([1, 2, 3, 4, 5, 6]);
        let removed = list.minus_all([1, 3, 4, 6]);
        assert_eq!(removed.to_vec(), vec![2, 5]);
        assert_eq!(removed.first(), Some(2));
        assert_eq!(removed.last(), Some(5));
        assert_eq!(removed.version().get(), 2);
        assert!(list.minus_all([1, 2, 3, 4, 5, 6]).is_empty());
    }

    #[test]
    fn slice_moves_ends_only() {
        let list = five();
        let nodes = list.backbone_nodes();
        let middle = list.slice(1, 4).unwrap();
        assert_eq!(middle.to_vec(), vec![2, 3, 4]);
        assert_eq!(middle.backbone_nodes(), nodes);
        assert_eq!(middle.version().get(), 2);
        let extended = middle.plus(9).insert(0, 0).unwrap();
        assert_eq!(extended.to_vec(), vec![0, 2, 3, 4, 9]);
        assert_eq!(list.to_vec(), vec![1, 2, 3, 4, 5]);
        assert_eq!(middle.to_vec(), vec![2, 3, 4]);
    }

    #[test]
    fn empty_batches_take_a_version() {
        let list = five();
        let same = list.plus_all(Vec::new());
        assert_eq!(same, list);
        assert_eq!(same.version().get(), 2);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Insert(usize, u8),
        Remove(usize),
        Set(usize, u8),
        Slice(usize, usize),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (any::<usize>(), any::<u8>()).prop_map(|(i, v)| Op::Insert(i, v)),
            any::<usize>().prop_map(Op::Remove),
            (any::<usize>(), any::<u8>()).prop_map(|(i, v)| Op::Set(i, v)),
            (any::<usize>(), any::<usize>()).prop_map(|(a, b)| Op::Slice(a, b)),
        ]
    }

    proptest! {
        #[test]
        fn random_branching_matches_model(ops in prop::collection::vec((any::<usize>(), op()), 1..64)) {
            let mut snapshots = vec![(PersistentList::new(), Vec::<u8>::new())];
            for (pick, op) in ops {
                let (base, model) = snapshots[pick % snapshots.len()].clone();
                let mut model = model;
                let next = match op {
                    Op::Insert(i, v) => {
                        let i = i % (model.len() + 1);
                        model.insert(i, v);
                        base.insert(i, v).unwrap()
                    }
                    Op::Remove(i) if !model.is_empty() => {
                        let i = i % model.len();
                        model.remove(i);
                        base.remove(i).unwrap()
                    }
                    Op::Set(i, v) if !model.is_empty() => {
                        let i = i % model.len();
                        model[i] = v;
                        base.set(i, v).unwrap()
                    }
                    Op::Slice(a, b) => {
                        let a = a % (model.len() + 1);
                        let b = a + b % (model.len() - a + 1);
                        model = model[a..b].to_vec();
                        base.slice(a, b).unwrap()
                    }
                    _ => base.plus(0).remove(model.len()).unwrap(),
                };
                snapshots.push((next, model));
            }
            for (list, model) in &snapshots {
                prop_assert_eq!(&list.to_vec(), model);
                let backwards: Vec<u8> = list.iter().rev().collect();
                let expected: Vec<u8> = model.iter().rev().copied().collect();
                prop_assert_eq!(backwards, expected);
                for (i, v) in model.iter().enumerate() {
                    prop_assert_eq!(list.get(i).unwrap(), *v);
                }
            }
        }
    }
}
