//! The shared half of a version tree.
//!
//! Every snapshot descended from one empty root holds a [Root]: a handle to
//! the backbone all of them read and write, and to the counter all of them
//! take version ids from. Snapshots add only their own small table of
//! active versions on top.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::version::{VersionCounter, VersionId};

pub(crate) struct Root<B> {
    backbone: Arc<RwLock<B>>,
    counter: VersionCounter,
}

impl<B> Clone for Root<B> {
    fn clone(&self) -> Self {
        Root {
            backbone: Arc::clone(&self.backbone),
            counter: self.counter.clone(),
        }
    }
}

impl<B: Default> Root<B> {
    /// Starts a new tree with an empty backbone and a counter at zero.
    pub(crate) fn new() -> Self {
        Root {
            backbone: Arc::new(RwLock::new(B::default())),
            counter: VersionCounter::new(),
        }
    }
}

impl<B> Root<B> {
    /// Shared access for readers.
    ///
    /// A poisoned lock is recovered: a panic during an edit can only have
    /// left entries tagged with that edit's id, and no snapshot refers to it.
    pub(crate) fn read(&self) -> RwLockReadGuard<'_, B> {
        self.backbone.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, B> {
        self.backbone.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs one logical mutation.
    ///
    /// The id is taken while the backbone is locked for writing, so edits
    /// land in the backbone in id order and concurrent edits of sibling
    /// branches never observe each other half done.
    pub(crate) fn edit<R>(&self, f: impl FnOnce(&mut B, VersionId) -> R) -> (VersionId, R) {
        let mut backbone = self.write();
        let version = self.counter.next();
        let result = f(&mut backbone, version);
        (version, result)
    }

    /// Takes an id without touching the backbone.
    pub(crate) fn skip(&self) -> VersionId {
        self.counter.next()
    }

    pub(crate) fn counter(&self) -> &VersionCounter {
        &self.counter
    }

    pub(crate) fn same_tree(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.backbone, &other.backbone)
    }
}

impl<B> fmt::Debug for Root<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Root")
            .field("latest", &self.counter.current())
            .finish_non_exhaustive()
    }
}
