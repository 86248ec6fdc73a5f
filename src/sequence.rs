use crate::error::OutOfRange;
use crate::version::VersionId;

/// The contract shared by [PersistentArray](crate::PersistentArray) and
/// [PersistentList](crate::PersistentList).
///
/// Every mutating method takes `&self` and returns a new snapshot; the
/// receiver keeps reading exactly what it read before. Each successful call
/// takes one version id, including calls that end up changing nothing.
/// A call that fails with [OutOfRange] takes none.
///
/// Both types implement the same methods inherently; the trait lets code be
/// written once against either backbone.
pub trait PersistentSequence<T>: Clone + Default + FromIterator<T>
where
    T: Clone + PartialEq,
{
    /// An empty snapshot at the root of a new version tree.
    fn empty() -> Self {
        Self::default()
    }

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The id of the mutation that produced this snapshot.
    fn version(&self) -> VersionId;

    fn get(&self, index: usize) -> Result<T, OutOfRange>;

    /// Iterates over the elements this snapshot holds.
    fn iter(&self) -> impl Iterator<Item = T> + '_;

    fn contains(&self, value: &T) -> bool {
        self.iter().any(|v| &v == value)
    }

    fn contains_all<'a, I>(&self, values: I) -> bool
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        values.into_iter().all(|v| self.contains(v))
    }

    /// Appends one element.
    fn plus(&self, value: T) -> Self;

    /// Appends all `values` in order under a single version.
    fn plus_all<I: IntoIterator<Item = T>>(&self, values: I) -> Self;

    /// Inserts before `index`; `index == len()` appends.
    fn insert(&self, index: usize, value: T) -> Result<Self, OutOfRange>;

    /// Inserts all `values` so that the first lands at `index`.
    fn insert_all<I: IntoIterator<Item = T>>(
        &self,
        index: usize,
        values: I,
    ) -> Result<Self, OutOfRange>;

    fn remove(&self, index: usize) -> Result<Self, OutOfRange>;

    /// Removes the first element equal to `value`, if any.
    fn minus(&self, value: &T) -> Self;

    /// Removes one occurrence per element of `values`, in order.
    fn minus_all<I: IntoIterator<Item = T>>(&self, values: I) -> Self;

    /// Replaces the element at `index`.
    fn set(&self, index: usize, value: T) -> Result<Self, OutOfRange>;

    /// The half-open range `from..to` as a snapshot of its own.
    fn slice(&self, from: usize, to: usize) -> Result<Self, OutOfRange>;
}

/// Decides which positions a batch removal drops.
///
/// Each requested value removes the first not yet removed position holding
/// an equal element; values without such a position are ignored.
pub(crate) fn removal_mask<T, I>(elements: &[T], values: I) -> Vec<bool>
where
    T: PartialEq,
    I: IntoIterator<Item = T>,
{
    let mut removed = vec![false; elements.len()];
    for value in values {
        if let Some(i) = elements
            .iter()
            .enumerate()
            .position(|(i, e)| !removed[i] && *e == value)
        {
            removed[i] = true;
        }
    }
    removed
}
