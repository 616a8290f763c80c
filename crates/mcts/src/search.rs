//! Time-boxed Monte Carlo Tree Search.
//!
//! Each iteration selects a leaf by UCT, expands it once, scores it with a
//! [`Playout`], and adds the result to every node on the path back to the
//! root. The tree is rebuilt from scratch for every decision.

use crate::{
    config::MctsConfig,
    node::{NodeId, NodeStats},
    opening::opening_move,
    playout::{Playout, TacticalPlayout},
    tree::Tree,
};
use rand::Rng;
use std::time::Duration;
use tracing::{debug, trace};
use uttt_core::{
    winning_moves, Bot, GameState, Move, Outcome, Result, Reward, Simulator, UtttError,
};

/// How the returned move was chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    /// The player to move could win a sub-board outright; search skipped.
    ImmediateWin,
    /// Early-game preference table; search skipped.
    OpeningBook,
    /// Most-visited root child.
    Search,
    /// The budget ran out before any root child was visited; uniformly random legal move.
    Fallback,
}

/// Statistics for one root child.
#[derive(Clone, Debug, PartialEq)]
pub struct ChildStats {
    pub mv: Move,
    pub visits: u32,
    /// Mean reward for the player to move at the root.
    pub mean_reward: f64,
}

/// Result of an MCTS search.
#[derive(Clone, Debug)]
pub struct SearchResult {
    /// Move to play.
    pub best_move: Move,

    pub decision: Decision,

    /// Root children in legal-move order. Empty when search was skipped.
    pub children: Vec<ChildStats>,

    /// Completed select/expand/playout/backpropagate cycles.
    pub iterations: usize,

    /// Visits recorded at the root (equals `iterations`).
    pub root_visits: u32,

    /// Number of nodes built.
    pub tree_size: usize,

    pub elapsed: Duration,
}

impl SearchResult {
    fn shortcut(best_move: Move, decision: Decision, elapsed: Duration) -> Self {
        Self {
            best_move,
            decision,
            children: Vec::new(),
            iterations: 0,
            root_visits: 0,
            tree_size: 0,
            elapsed,
        }
    }

    /// Visit count of the root child reached by `mv`.
    pub fn visits(&self, mv: Move) -> Option<u32> {
        self.children.iter().find(|c| c.mv == mv).map(|c| c.visits)
    }
}

/// UCT score of a child. Unvisited children score +infinity.
fn uct_score(stats: &NodeStats, ln_parent_visits: f64, exploration: f64) -> f64 {
    if stats.visit_count == 0 {
        return f64::INFINITY;
    }
    let n = f64::from(stats.visit_count);
    stats.mean_reward() + exploration * (ln_parent_visits / n).sqrt()
}

/// Monte Carlo Tree Search with UCT selection.
///
/// Generic over:
/// - `P`: how leaves are played out
/// - `R`: the random number generator used for playouts and tie-breaks
pub struct Mcts<P: Playout, R: Rng> {
    config: MctsConfig,
    playout: P,
    rng: R,
    tree: Tree,
    /// Scratch buffer for equally scored children during selection.
    ties: Vec<NodeId>,
}

impl<R: Rng> Mcts<TacticalPlayout, R> {
    /// MCTS with tactics-truncated playouts.
    pub fn tactical(config: MctsConfig, rng: R) -> Self {
        Self::new(config, TacticalPlayout, rng)
    }
}

impl<P: Playout, R: Rng> Mcts<P, R> {
    /// Create a new MCTS instance.
    pub fn new(config: MctsConfig, playout: P, rng: R) -> Self {
        Self {
            config,
            playout,
            rng,
            tree: Tree::new(GameState::new()),
            ties: Vec::new(),
        }
    }

    /// Choose a move for the player to move in `state`.
    ///
    /// # Errors
    /// Returns `UtttError::NoLegalMoves` if there is nothing to play.
    pub fn search(&mut self, state: &GameState) -> Result<SearchResult> {
        let budget = self.config.start_budget();

        let legal_moves = state.legal_moves();
        if legal_moves.is_empty() {
            return Err(UtttError::NoLegalMoves);
        }

        if let Some(&mv) = winning_moves(state, state.current_player()).first() {
            debug!(%mv, "immediate sub-board win, skipping search");
            return Ok(SearchResult::shortcut(
                mv,
                Decision::ImmediateWin,
                budget.elapsed(),
            ));
        }

        if self.config.opening_book {
            if let Some(mv) = opening_move(state) {
                debug!(%mv, move_number = state.move_number(), "opening book move");
                return Ok(SearchResult::shortcut(
                    mv,
                    Decision::OpeningBook,
                    budget.elapsed(),
                ));
            }
        }

        self.tree.reset(state.clone());
        let mut iterations = 0;
        while !budget.exhausted(iterations) {
            self.iterate();
            iterations += 1;
        }

        let root = self.tree.root();
        let children: Vec<ChildStats> = root
            .children
            .iter()
            .filter_map(|&id| {
                let child = self.tree.get(id);
                child.mv.map(|mv| ChildStats {
                    mv,
                    visits: child.stats.visit_count,
                    mean_reward: child.stats.mean_reward(),
                })
            })
            .collect();

        for child in &children {
            trace!(
                mv = %child.mv,
                visits = child.visits,
                mean_reward = child.mean_reward,
                "root child stats"
            );
        }

        let most_visited = children
            .iter()
            .filter(|c| c.visits > 0)
            .max_by_key(|c| c.visits);

        let (best_move, decision) = match most_visited {
            Some(child) => (child.mv, Decision::Search),
            None => {
                let mv = legal_moves[self.rng.gen_range(0..legal_moves.len())];
                debug!(%mv, iterations, "search budget exhausted before any child was visited");
                (mv, Decision::Fallback)
            }
        };

        let result = SearchResult {
            best_move,
            decision,
            root_visits: root.stats.visit_count,
            children,
            iterations,
            tree_size: self.tree.len(),
            elapsed: budget.elapsed(),
        };

        debug!(
            best = %result.best_move,
            decision = ?result.decision,
            iterations = result.iterations,
            tree_size = result.tree_size,
            elapsed_ms = result.elapsed.as_millis() as u64,
            "MCTS search complete"
        );

        Ok(result)
    }

    /// Run one select -> expand -> playout -> backpropagate cycle.
    fn iterate(&mut self) {
        let leaf = self.select();

        let node = self.tree.get(leaf);
        if !node.expanded && !node.state.is_terminal() {
            self.expand(leaf);
        }

        let outcome = self
            .playout
            .playout(&self.tree.get(leaf).state, &mut self.rng);
        self.backpropagate(leaf, outcome);
    }

    /// Descend from the root by UCT until reaching a node without children.
    ///
    /// Ties are broken uniformly at random.
    fn select(&mut self) -> NodeId {
        let mut current = NodeId::ROOT;

        loop {
            let node = self.tree.get(current);
            if node.is_leaf() {
                return current;
            }

            let ln_parent_visits = f64::from(node.stats.visit_count.max(1)).ln();
            let mut best_score = f64::NEG_INFINITY;
            self.ties.clear();

            for &child_id in &node.children {
                let score = uct_score(
                    &self.tree.get(child_id).stats,
                    ln_parent_visits,
                    self.config.exploration,
                );
                if score > best_score {
                    best_score = score;
                    self.ties.clear();
                    self.ties.push(child_id);
                } else if score == best_score {
                    self.ties.push(child_id);
                }
            }

            current = self.ties[self.rng.gen_range(0..self.ties.len())];
        }
    }

    /// Add one child per legal move.
    fn expand(&mut self, node_id: NodeId) {
        let moves = self.tree.get(node_id).state.legal_moves();

        for mv in moves {
            let mut sim = Simulator::new(&self.tree.get(node_id).state);
            sim.apply_move(mv)
                .expect("BUG: rule engine rejected one of its own legal moves");
            self.tree.add_child(node_id, mv, sim.into_state());
        }

        self.tree.get_mut(node_id).expanded = true;
    }

    /// Credit `outcome` to every node from `leaf` up to the root.
    ///
    /// Each node is scored for the player whose move produced it, so a
    /// parent always prefers the child that is best for the side choosing.
    /// Ancestors therefore do not all receive the same reward.
    fn backpropagate(&mut self, leaf: NodeId, outcome: Outcome) {
        let mut current = Some(leaf);

        while let Some(id) = current {
            let node = self.tree.get_mut(id);
            let reward = Reward::for_player(outcome, node.mover());
            node.stats.record(reward);
            current = node.parent;
        }
    }
}

impl<P: Playout, R: Rng> Bot for Mcts<P, R> {
    fn name(&self) -> &str {
        "mcts"
    }

    fn choose_move(&mut self, state: &GameState) -> Result<Move> {
        self.search(state).map(|result| result.best_move)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playout::UniformPlayout;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;
    use uttt_core::{Board, Cell, MacroBoard, Player};

    fn mcts(config: MctsConfig, seed: u64) -> Mcts<TacticalPlayout, ChaCha8Rng> {
        Mcts::tactical(config, ChaCha8Rng::seed_from_u64(seed))
    }

    /// A mid-game position with no immediate sub-board wins for either side.
    fn quiet_state() -> GameState {
        let mut sim = Simulator::new(&GameState::new());
        for (x, y) in [(4, 4), (3, 3), (0, 0), (1, 1), (4, 3), (3, 0)] {
            sim.apply_move(Move::new(x, y)).unwrap();
        }
        sim.into_state()
    }

    #[test]
    fn test_uct_score() {
        let unvisited = NodeStats::default();
        assert_eq!(uct_score(&unvisited, 2.0, 1.41), f64::INFINITY);

        let stats = NodeStats {
            visit_count: 4,
            reward_sum: 2.0,
        };
        let expected = 0.5 + 1.41 * (8.0f64.ln() / 4.0).sqrt();
        assert!((uct_score(&stats, 8.0f64.ln(), 1.41) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_search_returns_legal_move() {
        let state = quiet_state();
        let result = mcts(MctsConfig::for_testing(), 42).search(&state).unwrap();

        assert_eq!(result.decision, Decision::Search);
        assert!(state.legal_moves().contains(&result.best_move));
        assert_eq!(result.iterations, 200);
        assert_eq!(result.root_visits, 200);
    }

    #[test]
    fn test_child_visits_sum_to_iterations_minus_root_expansion() {
        let state = quiet_state();
        let result = mcts(MctsConfig::for_testing(), 3).search(&state).unwrap();

        let child_visits: u32 = result.children.iter().map(|c| c.visits).sum();
        assert_eq!(child_visits, result.root_visits - 1);
        assert_eq!(result.children.len(), state.legal_moves().len());
    }

    #[test]
    fn test_best_move_is_most_visited() {
        let state = quiet_state();
        let result = mcts(MctsConfig::for_testing(), 11).search(&state).unwrap();

        let max_visits = result.children.iter().map(|c| c.visits).max().unwrap();
        assert_eq!(result.visits(result.best_move), Some(max_visits));
    }

    #[test]
    fn test_unvisited_children_tried_first() {
        let state = quiet_state();
        let num_children = state.legal_moves().len();
        assert!(num_children > 3);

        let config = MctsConfig {
            opening_book: false,
            ..MctsConfig::with_iterations(1 + 3)
        };
        let result = mcts(config, 5).search(&state).unwrap();

        let visited: Vec<u32> = result
            .children
            .iter()
            .map(|c| c.visits)
            .filter(|&v| v > 0)
            .collect();
        assert_eq!(visited, vec![1, 1, 1]);
    }

    #[test]
    fn test_tied_children_picked_at_random() {
        let state = quiet_state();
        let moves = state.legal_moves();
        let config = MctsConfig {
            opening_book: false,
            ..MctsConfig::with_iterations(2)
        };

        // The first iteration expands the root; the second visits one of
        // its children, all of which score +infinity.
        let picked: HashSet<Move> = (0..16)
            .map(|seed| {
                let result = mcts(config.clone(), seed).search(&state).unwrap();
                let visited: Vec<&ChildStats> =
                    result.children.iter().filter(|c| c.visits > 0).collect();
                assert_eq!(visited.len(), 1);
                visited[0].mv
            })
            .collect();

        assert!(picked.len() > 1);
        assert!(picked.iter().any(|&mv| mv != moves[0]));
    }

    #[test]
    fn test_search_deterministic() {
        let state = quiet_state();
        let run = || {
            let result = mcts(MctsConfig::for_testing(), 12345).search(&state).unwrap();
            (result.best_move, result.children)
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_immediate_win_bypasses_search() {
        let mut board = Board::new();
        board.set(6, 6, Cell::Owned(Player::Zero));
        board.set(7, 7, Cell::Owned(Player::Zero));
        board.set(0, 4, Cell::Owned(Player::One));
        board.set(1, 4, Cell::Owned(Player::One));
        let mut macro_board = MacroBoard::new();
        macro_board.set(2, 2, Cell::Available);
        let state = GameState::from_parts(board, macro_board, 4, 2).unwrap();

        let config = MctsConfig::with_time_budget(60_000);
        let result = mcts(config, 1).search(&state).unwrap();

        assert_eq!(result.decision, Decision::ImmediateWin);
        assert_eq!(result.best_move, Move::new(8, 8));
        assert_eq!(result.iterations, 0);
        assert!(result.elapsed < Duration::from_secs(60));
    }

    #[test]
    fn test_opening_book() {
        let config = MctsConfig {
            opening_book: true,
            ..MctsConfig::for_testing()
        };
        let result = mcts(config, 1).search(&GameState::new()).unwrap();
        assert_eq!(result.decision, Decision::OpeningBook);
        assert_eq!(result.best_move, Move::new(4, 4));
    }

    #[test]
    fn test_zero_budget_falls_back_to_random_legal_move() {
        let state = quiet_state();
        let config = MctsConfig {
            opening_book: false,
            ..MctsConfig::with_time_budget(0)
        };
        let result = mcts(config, 9).search(&state).unwrap();

        assert_eq!(result.decision, Decision::Fallback);
        assert_eq!(result.iterations, 0);
        assert!(state.legal_moves().contains(&result.best_move));
    }

    #[test]
    fn test_no_legal_moves() {
        let state =
            GameState::from_parts(Board::new(), MacroBoard::filled(Cell::Tie), 50, 25).unwrap();
        let mut search = mcts(MctsConfig::for_testing(), 1);
        assert_eq!(search.choose_move(&state), Err(UtttError::NoLegalMoves));
    }

    #[test]
    fn test_search_does_not_mutate_input() {
        let state = quiet_state();
        let before = state.clone();
        let mut search = Mcts::new(
            MctsConfig::for_testing(),
            UniformPlayout,
            ChaCha8Rng::seed_from_u64(4),
        );
        search.search(&state).unwrap();
        assert_eq!(state, before);
    }
}
