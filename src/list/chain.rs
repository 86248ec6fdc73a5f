use crate::fatnode::FatNode;
use crate::version::VersionId;

/// Handle of a node in a [Chain] arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

/// One element of the chain with its versioned links.
///
/// `value`, `next` and `prev` are all keyed by the tag of the position the
/// node occupies. A link between two neighbours is stored on both of them
/// under the tag of the later one.
#[derive(Debug)]
struct ChainNode<T> {
    value: FatNode<T>,
    next: FatNode<NodeId>,
    prev: FatNode<NodeId>,
}

/// Backbone of [PersistentList](super::PersistentList): an arena of doubly
/// linked fat nodes.
///
/// The arena owns every node ever created; snapshots only hold handles.
/// There is no head or tail here, since every snapshot has its own.
#[derive(Debug)]
pub(crate) struct Chain<T> {
    nodes: Vec<ChainNode<T>>,
}

impl<T> Default for Chain<T> {
    fn default() -> Self {
        Chain { nodes: Vec::new() }
    }
}

impl<T> Chain<T> {
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Creates a node holding `value` under `version`.
    pub(crate) fn alloc(&mut self, version: VersionId, value: T) -> NodeId {
        let id = NodeId(self.nodes.len());
        log::trace!("allocating list node {} at {version}", id.0);
        self.nodes.push(ChainNode {
            value: FatNode::with_entry(version, value),
            next: FatNode::new(),
            prev: FatNode::new(),
        });
        id
    }

    pub(crate) fn value(&self, node: NodeId, tag: VersionId) -> &T {
        self.nodes[node.0]
            .value
            .get(tag)
            .unwrap_or_else(|| panic!("list node {} has no value for {tag}", node.0))
    }

    pub(crate) fn write_value(&mut self, node: NodeId, version: VersionId, value: T) {
        self.nodes[node.0].value.record(version, value);
    }

    /// The node following `node`, given the tag of the position it follows
    /// into.
    pub(crate) fn next(&self, node: NodeId, next_tag: VersionId) -> NodeId {
        *self.nodes[node.0]
            .next
            .get(next_tag)
            .unwrap_or_else(|| panic!("list node {} has no successor for {next_tag}", node.0))
    }

    /// The node preceding `node`, given the tag of `node`'s own position.
    pub(crate) fn prev(&self, node: NodeId, tag: VersionId) -> NodeId {
        *self.nodes[node.0]
            .prev
            .get(tag)
            .unwrap_or_else(|| panic!("list node {} has no predecessor for {tag}", node.0))
    }

    /// Records `first -> second` on both nodes under `second`'s tag.
    pub(crate) fn link(&mut self, first: NodeId, second: NodeId, tag: VersionId) {
        self.nodes[first.0].next.record(tag, second);
        self.nodes[second.0].prev.record(tag, first);
    }

    /// Walks `steps` positions forward from `node`, which sits at position
    /// `from` of a snapshot with the given tag table.
    pub(crate) fn forward(&self, mut node: NodeId, from: usize, steps: usize, table: &[VersionId]) -> NodeId {
        for position in from + 1..=from + steps {
            node = self.next(node, table[position]);
        }
        node
    }

    /// Walks `steps` positions backward from `node` at position `from`.
    pub(crate) fn backward(&self, mut node: NodeId, from: usize, steps: usize, table: &[VersionId]) -> NodeId {
        for position in (from - steps + 1..=from).rev() {
            node = self.prev(node, table[position]);
        }
        node
    }

    /// Total number of entries written to `node` across all branches.
    pub(crate) fn depth(&self, node: NodeId) -> usize {
        let node = &self.nodes[node.0];
        node.value.depth() + node.next.depth() + node.prev.depth()
    }
}

impl<T: Clone> Chain<T> {
    /// Moves `node` from tag `from` to tag `to`, keeping its value.
    ///
    /// Done whenever a link into `node` is created, so that the new link's
    /// key is fresh on both ends.
    pub(crate) fn retag(&mut self, node: NodeId, from: VersionId, to: VersionId) {
        self.nodes[node.0]
            .value
            .retag(from, to)
            .unwrap_or_else(|| panic!("list node {} has no value for {from}", node.0));
    }
}
