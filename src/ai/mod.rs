pub mod alpha_beta;
pub mod decision;
pub mod game_tree;
pub mod mcts;
pub mod minimax;
pub mod random_rollout;
