pub mod node;
pub mod edge;
pub mod score;

use petgraph::graph::EdgeReference;
use petgraph::prelude::*;
use rand::Rng;
use tracing::trace;

use crate::ai::game_tree::edge::SearchEdge;
use crate::ai::game_tree::node::SearchNode;
use crate::ai::game_tree::score::Score;
use crate::ai::random_rollout::random_rollout;
use crate::{Move, NimState};

/// Monte Carlo search tree rooted at a single position.
///
/// Nodes live in a `petgraph` arena. A node owns its children through outgoing
/// edges and reaches its parent through its single incoming edge, which is only
/// followed during backpropagation.
pub struct SearchTree {
    root_node_idx: NodeIndex,
    graph: Graph<SearchNode, SearchEdge, Directed>,
    constant_of_exploration: f64,
}

impl SearchTree {
    pub fn new(state: NimState) -> Self {
        Self::with_exploration(state, std::f64::consts::SQRT_2)
    }

    pub fn with_exploration(state: NimState, constant_of_exploration: f64) -> Self {
        let mut graph: Graph<SearchNode, SearchEdge, Directed> = Graph::new();
        let root_node_idx = graph.add_node(SearchNode::new(state));
        Self {
            root_node_idx,
            graph,
            constant_of_exploration,
        }
    }

    pub fn graph(&self) -> &Graph<SearchNode, SearchEdge, Directed> {
        &self.graph
    }

    pub fn root(&self) -> &SearchNode {
        &self.graph[self.root_node_idx]
    }

    pub fn search_n<R: Rng>(&mut self, rng: &mut R, iterations: u32) {
        for _ in 0..iterations {
            self.search(rng);
        }
    }

    pub fn search<R: Rng>(&mut self, rng: &mut R) {
        let mut current_node_idx = self.root_node_idx;

        // children are only picked by ucb once every sibling has been visited
        while self.graph[current_node_idx].is_fully_expanded() && !self.is_leaf_node(current_node_idx) {
            current_node_idx = self.select(current_node_idx);
        }

        if let Some(new_node_idx) = self.expand(current_node_idx) {
            current_node_idx = new_node_idx;
        }

        let reward = random_rollout(&self.graph[current_node_idx].state, rng);

        trace!(
            node = current_node_idx.index(),
            reward,
            tree_size = self.graph.node_count(),
            "mcts iteration complete"
        );

        self.back_propagate(current_node_idx, reward as f64);
    }

    fn select(&self, node_idx: NodeIndex) -> NodeIndex {
        let parent_visits = self.graph[node_idx].num_visits;

        let selected = self.node_children(node_idx).into_iter().fold(
            (node_idx, f64::NEG_INFINITY),
            |acc, child_idx| {
                let ucb = self.ucb_value(child_idx, parent_visits);
                if ucb > acc.1 {
                    (child_idx, ucb)
                } else {
                    acc
                }
            },
        );

        selected.0
    }

    fn expand(&mut self, node_idx: NodeIndex) -> Option<NodeIndex> {
        let successor = self.graph[node_idx].untried.pop()?;

        let new_node_idx = self.graph.add_node(SearchNode::new(successor.state));
        self.graph.add_edge(node_idx, new_node_idx, SearchEdge::new(successor.mv));

        Some(new_node_idx)
    }

    /// Walks from `node_idx` up to the root. The reward flips sign at every
    /// level so each node holds it from the view of the player who moved into it.
    fn back_propagate(&mut self, node_idx: NodeIndex, reward: f64) {
        let mut current = Some(node_idx);
        let mut reward = reward;

        while let Some(visited_node_idx) = current {
            let node = &mut self.graph[visited_node_idx];
            node.num_visits += 1;
            node.reward += reward;

            reward = -reward;
            current = self.parent_node_idx(visited_node_idx);
        }
    }

    /// upper confidence bound 1 for trees
    fn ucb_value(&self, node_idx: NodeIndex, parent_visits: u32) -> f64 {
        let node = &self.graph[node_idx];

        if node.num_visits == 0 {
            return f64::INFINITY;
        }

        let exploitation_component = node.reward / node.num_visits as f64;
        let exploration_component = self.constant_of_exploration
            * ((parent_visits as f64).ln() / node.num_visits as f64).sqrt();

        exploitation_component + exploration_component
    }

    /// Children in the order they were expanded.
    fn node_children(&self, node_idx: NodeIndex) -> Vec<NodeIndex> {
        let mut children: Vec<NodeIndex> = self
            .graph
            .edges_directed(node_idx, Outgoing)
            .map(|edge| edge.target())
            .collect();
        // petgraph walks outgoing edges newest first
        children.reverse();
        children
    }

    fn parent_node_idx(&self, node_idx: NodeIndex) -> Option<NodeIndex> {
        let edge_to_parent = self.edge_to_parent(node_idx)?;
        Some(edge_to_parent.source())
    }

    fn edge_to_parent(&self, node_idx: NodeIndex) -> Option<EdgeReference<SearchEdge>> {
        self.graph.edges_directed(node_idx, Incoming).next()
    }

    fn is_leaf_node(&self, node_idx: NodeIndex) -> bool {
        self.graph.edges_directed(node_idx, Outgoing).next().is_none()
    }

    pub fn root_scores(&self) -> Vec<Score> {
        self.node_children(self.root_node_idx)
            .into_iter()
            .filter_map(|child_node_idx| {
                let child_node = &self.graph[child_node_idx];
                let edge_to_parent = self.edge_to_parent(child_node_idx)?;
                Some(Score {
                    mv: edge_to_parent.weight().mv,
                    num_visits: child_node.num_visits,
                    reward: child_node.reward,
                })
            })
            .collect()
    }

    /// The most visited root move, the earliest expanded one on ties.
    pub fn best_move(&self) -> Option<Move> {
        self.root_scores()
            .into_iter()
            .fold(None, |best: Option<Score>, score| match best {
                Some(best) if best.num_visits >= score.num_visits => Some(best),
                _ => Some(score),
            })
            .map(|score| score.mv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn searched(piles: &[u32], iterations: u32, seed: u64) -> SearchTree {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let mut tree = SearchTree::new(NimState::new(piles.to_vec()));
        tree.search_n(&mut rng, iterations);
        tree
    }

    #[test]
    fn every_iteration_visits_the_root_once() {
        let tree = searched(&[1, 3, 5], 300, 7);
        assert_eq!(tree.root().num_visits, 300);
        let child_visits: u32 = tree.root_scores().iter().map(|score| score.num_visits).sum();
        assert_eq!(child_visits, 300);
    }

    #[test]
    fn expands_every_root_move_before_revisiting_one() {
        // [1, 3, 5] has 9 moves: the first 9 iterations create 9 children
        let tree = searched(&[1, 3, 5], 9, 3);
        let scores = tree.root_scores();
        assert_eq!(scores.len(), 9);
        assert!(scores.iter().all(|score| score.num_visits == 1));
        assert!(tree.root().is_fully_expanded());
    }

    #[test]
    fn expansion_pops_the_last_untried_move_first() {
        let tree = searched(&[2, 1], 1, 0);
        let scores = tree.root_scores();
        assert_eq!(scores.len(), 1);
        assert_eq!(scores[0].mv, Move::new(1, 1));
    }

    #[test]
    fn visit_counts_are_consistent_through_the_tree() {
        let tree = searched(&[2, 3, 1], 500, 11);
        for node_idx in tree.graph().node_indices() {
            let children = tree.node_children(node_idx);
            if children.is_empty() {
                continue;
            }
            let child_visits: u32 = children.iter().map(|&c| tree.graph()[c].num_visits).sum();
            let node = &tree.graph()[node_idx];
            // the visit that expanded a node is not shared with any child
            assert!(node.num_visits >= child_visits);
            assert!(node.num_visits <= child_visits + 1);
        }
    }

    #[test]
    fn terminal_root_has_no_move() {
        let tree = searched(&[0, 0], 50, 1);
        assert_eq!(tree.root().num_visits, 50);
        assert!(tree.root_scores().is_empty());
        assert_eq!(tree.best_move(), None);
    }

    #[test]
    fn zero_iterations_leave_an_empty_tree() {
        let tree = searched(&[1, 2], 0, 1);
        assert_eq!(tree.graph().node_count(), 1);
        assert_eq!(tree.best_move(), None);
    }

    #[test]
    fn forced_win_accumulates_full_reward() {
        // from [1] the only move takes the last match
        let tree = searched(&[1], 20, 5);
        let scores = tree.root_scores();
        assert_eq!(scores.len(), 1);
        assert_eq!(scores[0].num_visits, 20);
        assert!((scores[0].reward - 20.0).abs() < 1e-9);
        assert!((tree.root().mean_reward() + 1.0).abs() < 1e-9);
    }
}
