//! Proptest support: random edit scripts for [PersistentSequence]s.
//!
//! An [Edit] carries raw positions that are folded into range against the
//! length of whatever it is applied to, so any generated script is valid
//! for any sequence. Applying the same script to a snapshot and to a `Vec`
//! must give equal contents.

use std::fmt::Debug;

use proptest::prelude::*;

use crate::sequence::PersistentSequence;

/// One mutation of a sequence with unresolved positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit<T> {
    Plus(T),
    PlusAll(Vec<T>),
    Insert(usize, T),
    InsertAll(usize, Vec<T>),
    Remove(usize),
    Minus(T),
    MinusAll(Vec<T>),
    Set(usize, T),
    Slice(usize, usize),
}

/// An edit with positions resolved against a length.
enum Resolved<'a, T> {
    Append(&'a [T]),
    Insert(usize, &'a [T]),
    Remove(usize),
    Minus(&'a [T]),
    Set(usize, &'a T),
    Slice(usize, usize),
    Nothing,
}

impl<T> Edit<T> {
    fn resolve(&self, len: usize) -> Resolved<'_, T> {
        match self {
            Edit::Plus(value) => Resolved::Append(std::slice::from_ref(value)),
            Edit::PlusAll(values) => Resolved::Append(values),
            Edit::Insert(at, value) => Resolved::Insert(at % (len + 1), std::slice::from_ref(value)),
            Edit::InsertAll(at, values) => Resolved::Insert(at % (len + 1), values),
            Edit::Minus(value) => Resolved::Minus(std::slice::from_ref(value)),
            Edit::MinusAll(values) => Resolved::Minus(values),
            Edit::Remove(_) | Edit::Set(..) if len == 0 => Resolved::Nothing,
            Edit::Remove(at) => Resolved::Remove(at % len),
            Edit::Set(at, value) => Resolved::Set(at % len, value),
            Edit::Slice(from, span) => {
                let from = from % (len + 1);
                Resolved::Slice(from, from + span % (len - from + 1))
            }
        }
    }
}

impl<T: Clone + PartialEq> Edit<T> {
    /// Applies the edit to a snapshot. `Remove` and `Set` on an empty
    /// sequence return a plain clone and take no version.
    pub fn apply<S: PersistentSequence<T>>(&self, sequence: &S) -> S {
        let resolved = match self.resolve(sequence.len()) {
            Resolved::Append(values) => Ok(sequence.plus_all(values.iter().cloned())),
            Resolved::Insert(at, values) => sequence.insert_all(at, values.iter().cloned()),
            Resolved::Remove(at) => sequence.remove(at),
            Resolved::Minus(values) => Ok(sequence.minus_all(values.iter().cloned())),
            Resolved::Set(at, value) => sequence.set(at, value.clone()),
            Resolved::Slice(from, to) => sequence.slice(from, to),
            Resolved::Nothing => Ok(sequence.clone()),
        };
        resolved.expect("resolved positions are in range")
    }

    /// Applies the edit to a plain vector with the same semantics.
    pub fn apply_to_vec(&self, model: &mut Vec<T>) {
        match self.resolve(model.len()) {
            Resolved::Append(values) => model.extend_from_slice(values),
            Resolved::Insert(at, values) => {
                model.splice(at..at, values.iter().cloned());
            }
            Resolved::Remove(at) => {
                model.remove(at);
            }
            Resolved::Minus(values) => {
                for value in values {
                    if let Some(at) = model.iter().position(|e| e == value) {
                        model.remove(at);
                    }
                }
            }
            Resolved::Set(at, value) => model[at] = value.clone(),
            Resolved::Slice(from, to) => {
                model.truncate(to);
                model.drain(..from);
            }
            Resolved::Nothing => {}
        }
    }
}

/// Generates single edits whose payloads come from `element`.
pub fn edit<T, S>(element: S) -> BoxedStrategy<Edit<T>>
where
    T: Debug + Clone + 'static,
    S: Strategy<Value = T> + Clone + 'static,
{
    let batch = prop::collection::vec(element.clone(), 0..4);
    prop_oneof![
        3 => element.clone().prop_map(Edit::Plus),
        1 => batch.clone().prop_map(Edit::PlusAll),
        3 => (any::<usize>(), element.clone()).prop_map(|(at, v)| Edit::Insert(at, v)),
        1 => (any::<usize>(), batch.clone()).prop_map(|(at, vs)| Edit::InsertAll(at, vs)),
        2 => any::<usize>().prop_map(Edit::Remove),
        1 => element.clone().prop_map(Edit::Minus),
        1 => batch.prop_map(Edit::MinusAll),
        2 => (any::<usize>(), element).prop_map(|(at, v)| Edit::Set(at, v)),
        1 => (any::<usize>(), any::<usize>()).prop_map(|(from, span)| Edit::Slice(from, span)),
    ]
    .boxed()
}

/// Generates scripts of up to `max_len` edits.
pub fn script<T, S>(element: S, max_len: usize) -> BoxedStrategy<Vec<Edit<T>>>
where
    T: Debug + Clone + 'static,
    S: Strategy<Value = T> + Clone + 'static,
{
    prop::collection::vec(edit(element), 0..=max_len).boxed()
}

/// Applies `script` to `start` one edit at a time, returning every
/// intermediate snapshot with the start first.
pub fn replay<T, S>(start: &S, script: &[Edit<T>]) -> Vec<S>
where
    T: Clone + PartialEq,
    S: PersistentSequence<T>,
{
    let mut history = vec![start.clone()];
    for edit in script {
        let next = edit.apply(history.last().unwrap_or(start));
        history.push(next);
    }
    history
}
