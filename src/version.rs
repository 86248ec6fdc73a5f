//! Version ids and the counter that hands them out.
//!
//! Every snapshot derived from one empty root shares a single
//! [VersionCounter]. Each logical mutation takes exactly one id from it,
//! no matter how many fat node entries that mutation writes.

use std::fmt;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering::Relaxed;
use std::sync::Arc;

/// Identifies one logical mutation inside a version tree.
///
/// Ids are totally ordered and strictly increasing in allocation order.
/// [VersionId::ROOT] belongs to the empty snapshot every tree starts from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct VersionId(pub(crate) u64);

impl VersionId {
    /// The id of an empty root snapshot.
    pub const ROOT: VersionId = VersionId(0);

    /// Returns the raw counter value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl From<VersionId> for u64 {
    fn from(id: VersionId) -> Self {
        id.0
    }
}

impl fmt::Display for VersionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// A monotonically increasing id source shared by all branches of a tree.
///
/// Cloning the counter shares it. There is no way to return an id: an
/// operation that turns out to be a no-op still keeps the id it took.
#[derive(Clone, Debug, Default)]
pub struct VersionCounter {
    last: Arc<AtomicU64>,
}

impl VersionCounter {
    /// Creates a counter whose first allocation is `1`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates the next id.
    ///
    /// The returned id is the one the caller must both stamp its writes with
    /// and report as its snapshot version. Re-reading the counter afterwards
    /// may observe ids taken by sibling branches in the meantime.
    pub fn next(&self) -> VersionId {
        let id = VersionId(self.last.fetch_add(1, Relaxed) + 1);
        log::trace!("allocated version {id}");
        id
    }

    /// The most recently allocated id, or [VersionId::ROOT] if none was taken.
    pub fn current(&self) -> VersionId {
        VersionId(self.last.load(Relaxed))
    }

    /// True if both handles refer to the same counter.
    pub fn same_tree(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.last, &other.last)
    }
}
