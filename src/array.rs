//! A fully persistent indexable sequence.
//!
//! [PersistentArray] stores position `i` in physical slot `i` of a shared
//! [Slots] backbone. A snapshot is the backbone handle plus a table naming,
//! for every position, the version whose entry in that slot is active.
//!
//! Reads are O(1). An edit at position `i` writes a new entry into every
//! slot from `i` to the end, tagged with the edit's single version id, and
//! leaves all existing entries alone.

mod slots;

use std::fmt;
use std::iter::FusedIterator;
use std::sync::Arc;

use itertools::Itertools;

use crate::error::OutOfRange;
use crate::root::Root;
use crate::sequence::{removal_mask, PersistentSequence};
use crate::version::VersionId;

use slots::Slots;

/// An immutable snapshot of an indexable sequence.
///
/// Cloning a snapshot is O(1) in the size of the backbone; the clone is the
/// same snapshot, not a branch.
pub struct PersistentArray<T> {
    root: Root<Slots<T>>,
    table: Arc<[VersionId]>,
    version: VersionId,
}

impl<T> Clone for PersistentArray<T> {
    fn clone(&self) -> Self {
        PersistentArray {
            root: self.root.clone(),
            table: Arc::clone(&self.table),
            version: self.version,
        }
    }
}

impl<T> Default for PersistentArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PersistentArray<T> {
    /// Creates an empty array at version 0 of a new version tree.
    pub fn new() -> Self {
        PersistentArray {
            root: Root::new(),
            table: Arc::from([]),
            version: VersionId::ROOT,
        }
    }

    fn derive(&self, table: Vec<VersionId>, version: VersionId) -> Self {
        PersistentArray {
            root: self.root.clone(),
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

    /// Number of physical slots the shared backbone holds.
    pub fn backbone_slots(&self) -> usize {
        self.root.read().capacity()
    }

    /// Number of entries all branches together have written to `slot`.
    pub fn slot_history(&self, slot: usize) -> usize {
        self.root.read().depth(slot)
    }
}

impl<T: Clone> PersistentArray<T> {
    pub fn singleton(value: T) -> Self {
        Self::new().plus(value)
    }

    pub fn get(&self, index: usize) -> Result<T, OutOfRange> {
        OutOfRange::check_access(index, self.len())?;
        Ok(self.root.read().value(index, self.table[index]).clone())
    }

    pub fn first(&self) -> Option<T> {
        self.get(0).ok()
    }

    pub fn last(&self) -> Option<T> {
        self.len().checked_sub(1).and_then(|i| self.get(i).ok())
    }

    /// Iterates over the elements of this snapshot.
    ///
    /// Every call starts a fresh pass; edits made through other snapshots
    /// in the meantime are never observed.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            array: self,
            front: 0,
            back: self.len(),
        }
    }

    pub fn to_vec(&self) -> Vec<T> {
        let slots = self.root.read();
        self.table
            .iter()
            .enumerate()
            .map(|(slot, &version)| slots.value(slot, version).clone())
            .collect()
    }

    pub fn plus(&self, value: T) -> Self {
        self.plus_all([value])
    }

    pub fn plus_all<I: IntoIterator<Item = T>>(&self, values: I) -> Self {
        self.splice_in(self.len(), values.into_iter().collect())
    }

    /// Inserts before `index`, shifting later elements one slot right.
    pub fn insert(&self, index: usize, value: T) -> Result<Self, OutOfRange> {
        self.insert_all(index, [value])
    }

    /// Inserts `values` so they occupy `index..index + n` in order.
    pub fn insert_all<I: IntoIterator<Item = T>>(
        &self,
        index: usize,
        values: I,
    ) -> Result<Self, OutOfRange> {
        OutOfRange::check_insert(index, self.len())?;
        Ok(self.splice_in(index, values.into_iter().collect()))
    }

    fn splice_in(&self, index: usize, values: Vec<T>) -> Self {
        let len = self.len();
        let count = values.len();
        let (version, ()) = self.root.edit(|slots, version| {
            slots.reserve(len + count);
            // Back to front, so every source entry is read before its slot
            // receives an entry for `version`.
            for slot in (index..len).rev() {
                slots.copy(slot, self.table[slot], slot + count, version);
            }
            for (offset, value) in values.into_iter().enumerate() {
                slots.write(index + offset, version, value);
            }
        });
        let mut table = Vec::with_capacity(len + count);
        table.extend_from_slice(&self.table[..index]);
        table.resize(len + count, version);
        self.derive(table, version)
    }

    /// Removes the element at `index`, shifting later elements one slot left.
    pub fn remove(&self, index: usize) -> Result<Self, OutOfRange> {
        OutOfRange::check_access(index, self.len())?;
        let mut keep = vec![true; self.len()];
        keep[index] = false;
        Ok(self.compact(&keep))
    }

    /// Replaces the element at `index`. Only that slot gets a new entry.
    pub fn set(&self, index: usize, value: T) -> Result<Self, OutOfRange> {
        OutOfRange::check_access(index, self.len())?;
        let (version, ()) = self
            .root
            .edit(|slots, version| slots.write(index, version, value));
        let mut table = self.table.to_vec();
        table[index] = version;
        Ok(self.derive(table, version))
    }

    /// Copies `from..to` down to slots `0..to - from` under a new version.
    ///
    /// No slots are allocated; the selected elements get new entries in the
    /// slots they now occupy.
    pub fn slice(&self, from: usize, to: usize) -> Result<Self, OutOfRange> {
        OutOfRange::check_range(from, to, self.len())?;
        let (version, ()) = self.root.edit(|slots, version| {
            for slot in from..to {
                slots.copy(slot, self.table[slot], slot - from, version);
            }
        });
        Ok(self.derive(vec![version; to - from], version))
    }

    /// Drops every position whose `keep` flag is false.
    ///
    /// Slots before the first dropped position keep their entries; the rest
    /// are rewritten under one new version.
    fn compact(&self, keep: &[bool]) -> Self {
        let Some(first) = keep.iter().position(|k| !k) else {
            return self.unchanged();
        };
        let survivors: Vec<usize> = (first..self.len()).filter(|&i| keep[i]).collect();
        let (version, ()) = self.root.edit(|slots, version| {
            for (offset, &src) in survivors.iter().enumerate() {
                slots.copy(src, self.table[src], first + offset, version);
            }
        });
        let mut table = Vec::with_capacity(first + survivors.len());
        table.extend_from_slice(&self.table[..first]);
        table.resize(first + survivors.len(), version);
        self.derive(table, version)
    }

    /// Same contents under a freshly taken id.
    fn unchanged(&self) -> Self {
        let version = self.root.skip();
        log::debug!("array edit at {version} removed nothing");
        PersistentArray {
            root: self.root.clone(),
            table: Arc::clone(&self.table),
            version,
        }
    }
}

impl<T: Clone + PartialEq> PersistentArray<T> {
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

    /// Removes the first element equal to `value`.
    ///
    /// If there is none the result holds the same elements, but it is still
    /// a new snapshot with a new version.
    pub fn minus(&self, value: &T) -> Self {
        match self.index_of(value) {
            Some(index) => {
                let mut keep = vec![true; self.len()];
                keep[index] = false;
                self.compact(&keep)
            }
            None => self.unchanged(),
        }
    }

    pub fn minus_all<I: IntoIterator<Item = T>>(&self, values: I) -> Self {
        let removed = removal_mask(&self.to_vec(), values);
        let keep: Vec<bool> = removed.into_iter().map(|r| !r).collect();
        self.compact(&keep)
    }
}

impl<T: Clone + PartialEq> PersistentSequence<T> for PersistentArray<T> {
    fn len(&self) -> usize {
        PersistentArray::len(self)
    }

    fn version(&self) -> VersionId {
        PersistentArray::version(self)
    }

    fn get(&self, index: usize) -> Result<T, OutOfRange> {
        PersistentArray::get(self, index)
    }

    fn iter(&self) -> impl Iterator<Item = T> + '_ {
        PersistentArray::iter(self)
    }

    fn contains(&self, value: &T) -> bool {
        PersistentArray::contains(self, value)
    }

    fn plus(&self, value: T) -> Self {
        PersistentArray::plus(self, value)
    }

    fn plus_all<I: IntoIterator<Item = T>>(&self, values: I) -> Self {
        PersistentArray::plus_all(self, values)
    }

    fn insert(&self, index: usize, value: T) -> Result<Self, OutOfRange> {
        PersistentArray::insert(self, index, value)
    }

    fn insert_all<I: IntoIterator<Item = T>>(
        &self,
        index: usize,
        values: I,
    ) -> Result<Self, OutOfRange> {
        PersistentArray::insert_all(self, index, values)
    }

    fn remove(&self, index: usize) -> Result<Self, OutOfRange> {
        PersistentArray::remove(self, index)
    }

    fn minus(&self, value: &T) -> Self {
        PersistentArray::minus(self, value)
    }

    fn minus_all<I: IntoIterator<Item = T>>(&self, values: I) -> Self {
        PersistentArray::minus_all(self, values)
    }

    fn set(&self, index: usize, value: T) -> Result<Self, OutOfRange> {
        PersistentArray::set(self, index, value)
    }

    fn slice(&self, from: usize, to: usize) -> Result<Self, OutOfRange> {
        PersistentArray::slice(self, from, to)
    }
}

impl<T: Clone> FromIterator<T> for PersistentArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new().plus_all(iter)
    }
}

impl<T: Clone + PartialEq> PartialEq for PersistentArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Clone + Eq> Eq for PersistentArray<T> {}

impl<T: Clone + fmt::Debug> fmt::Debug for PersistentArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: Clone + fmt::Display> fmt::Display for PersistentArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.iter().format(", "))
    }
}

impl<'a, T: Clone> IntoIterator for &'a PersistentArray<T> {
    type Item = T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the elements of a [PersistentArray] snapshot.
pub struct Iter<'a, T> {
    array: &'a PersistentArray<T>,
    front: usize,
    back: usize,
}

impl<T: Clone> Iter<'_, T> {
    fn read(&self, index: usize) -> T {
        self.array
            .root
            .read()
            .value(index, self.array.table[index])
            .clone()
    }
}

impl<T: Clone> Iterator for Iter<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        let value = self.read(self.front);
        self.front += 1;
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
        self.back -= 1;
        Some(self.read(self.back))
    }
}

impl<T: Clone> ExactSizeIterator for Iter<'_, T> {}

impl<T: Clone> FusedIterator for Iter<'_, T> {}
