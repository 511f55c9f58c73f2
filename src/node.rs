//! Search nodes and the arena that owns them.
//!
//! Every node created during one search lives in a single [`Arena`] and is
//! addressed by a [`NodeId`]. A node refers to its parent by id, so walking
//! the ancestor chain never needs shared ownership and the whole tree is
//! released when the arena is dropped.

use std::fmt;

use crate::search::SearchState;

/// Stable index of a node inside its [`Arena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One state plus the bookkeeping a search attaches to it.
///
/// `depth` is the path length from the start node and `cost` is whatever
/// ordering key the running algorithm assigns. Both start at zero and the
/// node starts without a parent; the engine fills them in.
#[derive(Debug, Clone)]
pub struct Node<S> {
    state: S,
    parent: Option<NodeId>,
    depth: usize,
    cost: usize,
}

impl<S> Node<S> {
    pub fn new(state: S) -> Self {
        Self {
            state,
            parent: None,
            depth: 0,
            cost: 0,
        }
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn set_parent(&mut self, parent: Option<NodeId>) {
        self.parent = parent;
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn set_depth(&mut self, depth: usize) {
        self.depth = depth;
    }

    pub fn cost(&self) -> usize {
        self.cost
    }

    pub fn set_cost(&mut self, cost: usize) {
        self.cost = cost;
    }
}

impl<S: SearchState> Node<S> {
    /// Wraps every successor state in a fresh, unparented node.
    pub fn expand(&self) -> impl Iterator<Item = Node<S>> + '_ {
        self.state.expand().map(Node::new)
    }
}

impl<S: Clone> From<&S> for Node<S> {
    fn from(state: &S) -> Self {
        Node::new(state.clone())
    }
}

impl<S> From<S> for Node<S> {
    fn from(state: S) -> Self {
        Node::new(state)
    }
}

impl<S: PartialEq> PartialEq for Node<S> {
    fn eq(&self, other: &Self) -> bool {
        self.state == other.state
    }
}

impl<S: Eq> Eq for Node<S> {}

/// Owns every node of one search.
#[derive(Debug)]
pub struct Arena<S> {
    nodes: Vec<Node<S>>,
}

impl<S> Arena<S> {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub fn insert(&mut self, node: Node<S>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    pub fn get(&self, id: NodeId) -> &Node<S> {
        &self.nodes[id.0]
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut Node<S> {
        &mut self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// `id` followed by its parent, grandparent and so on up to the root.
    pub fn lineage(&self, id: NodeId) -> Lineage<'_, S> {
        Lineage {
            arena: self,
            next: Some(id),
        }
    }

    /// States from the root down to `id`.
    pub fn path(&self, id: NodeId) -> Vec<S>
    where
        S: Clone,
    {
        let mut path: Vec<S> = self.lineage(id).map(|node| node.state.clone()).collect();
        path.reverse();
        path
    }
}

impl<S> Default for Arena<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over a node and its ancestors. See [`Arena::lineage`].
pub struct Lineage<'a, S> {
    arena: &'a Arena<S>,
    next: Option<NodeId>,
}

impl<'a, S> Iterator for Lineage<'a, S> {
    type Item = &'a Node<S>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.arena.get(self.next?);
        self.next = node.parent;
        Some(node)
    }
}
