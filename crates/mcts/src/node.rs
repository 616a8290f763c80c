//! MCTS node types for tree storage.
//!
//! Uses arena allocation with indices: children and the parent link are
//! `NodeId`s into the owning [`Tree`](crate::tree::Tree).

use uttt_core::{GameState, Move, Player, Reward};

/// Index into the node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The root node is always at index 0.
    pub const ROOT: NodeId = NodeId(0);
}

/// Visit statistics for a single node.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeStats {
    /// Number of playouts that passed through this node.
    pub visit_count: u32,

    /// Sum of rewards, from the perspective of the player who moved into
    /// this node.
    pub reward_sum: f64,
}

impl NodeStats {
    /// Mean reward, or 0.0 if the node has never been visited.
    pub fn mean_reward(&self) -> f64 {
        if self.visit_count == 0 {
            0.0
        } else {
            self.reward_sum / self.visit_count as f64
        }
    }

    pub fn record(&mut self, reward: Reward) {
        self.visit_count += 1;
        self.reward_sum += reward.get();
    }
}

/// A node in the search tree.
///
/// The state is fixed at construction; only the statistics and the child
/// list change, and the child list is filled exactly once.
#[derive(Clone, Debug)]
pub struct Node {
    /// Position reached by playing `mv` from the parent.
    pub state: GameState,

    /// Move that led to this node (None for root).
    pub mv: Option<Move>,

    /// Parent node (None for root).
    pub parent: Option<NodeId>,

    /// Children in legal-move order.
    pub children: Vec<NodeId>,

    pub stats: NodeStats,

    /// Whether children have been generated.
    pub expanded: bool,
}

impl Node {
    pub fn new(state: GameState, mv: Option<Move>, parent: Option<NodeId>) -> Self {
        Self {
            state,
            mv,
            parent,
            children: Vec::new(),
            stats: NodeStats::default(),
            expanded: false,
        }
    }

    /// Create the root node.
    pub fn root(state: GameState) -> Self {
        Self::new(state, None, None)
    }

    /// The player whose move produced this node's state.
    pub fn mover(&self) -> Player {
        self.state.current_player().opponent()
    }

    /// True if this node has no children yet.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}
