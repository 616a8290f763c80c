//! Arena-allocated MCTS tree.
//!
//! Using a Vec<Node> with indices provides better cache locality
//! and simpler ownership compared to Rc<RefCell<Node>>.

use crate::node::{Node, NodeId};
use uttt_core::{GameState, Move};

/// Arena-allocated MCTS tree rooted at a single position.
#[derive(Debug)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    /// Create a tree holding only a root for `state`.
    pub fn new(state: GameState) -> Self {
        Self {
            nodes: vec![Node::root(state)],
        }
    }

    /// Get a reference to a node by ID.
    ///
    /// # Panics
    /// Panics if the NodeId is invalid.
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Get a mutable reference to a node by ID.
    ///
    /// # Panics
    /// Panics if the NodeId is invalid.
    pub fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// Add a child under `parent`, returning its ID.
    pub fn add_child(&mut self, parent: NodeId, mv: Move, state: GameState) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(state, Some(mv), Some(parent)));
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Discard every node and start over from `state`.
    pub fn reset(&mut self, state: GameState) {
        self.nodes.clear();
        self.nodes.push(Node::root(state));
    }

    /// Get the number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty (never true; the root always exists).
    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn root(&self) -> &Node {
        self.get(NodeId::ROOT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_creation() {
        let tree = Tree::new(GameState::new());
        assert_eq!(tree.len(), 1);
        assert!(!tree.is_empty());
        assert!(tree.root().is_leaf());
    }

    #[test]
    fn test_add_child_links_both_ways() {
        let mut tree = Tree::new(GameState::new());
        let id = tree.add_child(NodeId::ROOT, Move::new(4, 4), GameState::new());

        assert_eq!(id.0, 1);
        assert_eq!(tree.get(id).mv, Some(Move::new(4, 4)));
        assert_eq!(tree.get(id).parent, Some(NodeId::ROOT));
        assert_eq!(tree.root().children, vec![id]);
    }

    #[test]
    fn test_tree_reset() {
        let mut tree = Tree::new(GameState::new());
        tree.add_child(NodeId::ROOT, Move::new(0, 0), GameState::new());
        tree.get_mut(NodeId::ROOT).stats.visit_count = 10;

        tree.reset(GameState::new());
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.root().stats.visit_count, 0);
        assert!(tree.root().is_leaf());
    }
}
