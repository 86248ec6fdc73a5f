use crate::fatnode::FatNode;
use crate::version::VersionId;

/// Backbone of [PersistentArray](super::PersistentArray): one fat node per
/// physical slot.
///
/// Logical position `i` of every array snapshot lives in slot `i`. Slots are
/// shared by all branches and are never dropped, so the slot count is the
/// largest length any snapshot of the tree ever had.
#[derive(Debug)]
pub(crate) struct Slots<T> {
    nodes: Vec<FatNode<T>>,
}

impl<T> Default for Slots<T> {
    fn default() -> Self {
        Slots { nodes: Vec::new() }
    }
}

impl<T> Slots<T> {
    pub(crate) fn capacity(&self) -> usize {
        self.nodes.len()
    }

    /// Makes sure slots `0..len` exist, reusing any a sibling branch
    /// already allocated.
    pub(crate) fn reserve(&mut self, len: usize) {
        if self.nodes.len() < len {
            log::trace!("growing array backbone from {} to {} slots", self.nodes.len(), len);
            self.nodes.resize_with(len, FatNode::new);
        }
    }

    pub(crate) fn value(&self, slot: usize, version: VersionId) -> &T {
        self.nodes[slot]
            .get(version)
            .unwrap_or_else(|| panic!("slot {slot} has no entry for active version {version}"))
    }

    pub(crate) fn write(&mut self, slot: usize, version: VersionId, value: T) {
        self.nodes[slot].record(version, value);
    }

    /// Number of entries recorded in `slot` across all branches.
    pub(crate) fn depth(&self, slot: usize) -> usize {
        self.nodes.get(slot).map_or(0, FatNode::depth)
    }
}

impl<T: Clone> Slots<T> {
    /// Copies the element active at `src` under `src_version` into `dst`
    /// under `version`.
    pub(crate) fn copy(&mut self, src: usize, src_version: VersionId, dst: usize, version: VersionId) {
        let value = self.value(src, src_version).clone();
        self.write(dst, version, value);
    }
}
