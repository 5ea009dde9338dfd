use crate::common::Coordinate;

/// Index of a node inside its [`NodeArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(super) usize);

/// A search tree node. Immutable once built.
///
/// Costs are plain step counts. The predecessor is a handle into the arena that
/// owns the node, and always points at a node inserted earlier, so the chain
/// ends at a root.
#[derive(Debug, Clone, Copy)]
pub struct Node {
    position: Coordinate,
    predecessor: Option<NodeId>,
    previous_cost: usize,
    estimated_cost: usize,
}

impl Node {
    pub fn new(
        position: Coordinate,
        predecessor: Option<NodeId>,
        previous_cost: usize,
        estimated_cost: usize,
    ) -> Self {
        Node {
            position,
            predecessor,
            previous_cost,
            estimated_cost,
        }
    }

    pub fn position(&self) -> Coordinate {
        self.position
    }

    pub fn predecessor(&self) -> Option<NodeId> {
        self.predecessor
    }

    pub fn previous_cost(&self) -> usize {
        self.previous_cost
    }

    pub fn estimated_cost(&self) -> usize {
        self.estimated_cost
    }

    pub fn total_cost(&self) -> usize {
        self.previous_cost + self.estimated_cost
    }
}

// Nodes are the same node when they sit on the same cell, whatever their costs.
impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position
    }
}

impl Eq for Node {}

/// Append-only storage for every node the engine creates.
#[derive(Debug, Default, Clone)]
pub struct NodeArena {
    nodes: Vec<Node>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `node` and return its handle.
    ///
    /// A predecessor must already live in this arena.
    pub fn insert(&mut self, node: Node) -> NodeId {
        debug_assert!(node
            .predecessor
            .is_none_or(|NodeId(index)| index < self.nodes.len()));
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Walk the predecessor chain of `id`, nearest first, not including `id` itself.
    pub fn predecessors(&self, id: NodeId) -> impl Iterator<Item = &Node> + '_ {
        std::iter::successors(self.get(id).predecessor, move |&current| {
            self.get(current).predecessor
        })
        .map(move |current| self.get(current))
    }
}
