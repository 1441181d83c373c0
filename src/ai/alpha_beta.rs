use tracing::debug;

use crate::{Evaluation, NimState, Value};

/// Minimax with alpha-beta pruning.
///
/// Start a search with `alpha = VALUE_MIN` and `beta = VALUE_MAX`. Pruning only
/// skips siblings that cannot change the outcome, so the value and move match
/// [`minimax`](crate::minimax) for the same position and side.
pub fn alpha_beta(state: &NimState, alpha: Value, beta: Value, is_maximizing: bool) -> Evaluation {
    let mut nodes = 0u64;
    let evaluation = search(state, alpha, beta, is_maximizing, &mut nodes);

    debug!(
        state = %state,
        is_maximizing,
        value = evaluation.value,
        nodes,
        "alpha-beta search complete"
    );

    evaluation
}

fn search(
    state: &NimState,
    mut alpha: Value,
    mut beta: Value,
    is_maximizing: bool,
    nodes: &mut u64,
) -> Evaluation {
    *nodes += 1;

    if state.is_terminal() {
        return Evaluation::terminal(state.utility(is_maximizing));
    }

    let mut best_move = None;

    if is_maximizing {
        let mut value = Value::MIN;
        for successor in state.legal_moves() {
            let child = search(&successor.state, alpha, beta, false, nodes).value;
            if child > value {
                value = child;
                best_move = Some(successor.mv);
            }
            alpha = alpha.max(value);
            if alpha >= beta {
                break;
            }
        }
        Evaluation { value, best_move }
    } else {
        let mut value = Value::MAX;
        for successor in state.legal_moves() {
            let child = search(&successor.state, alpha, beta, true, nodes).value;
            if child < value {
                value = child;
                best_move = Some(successor.mv);
            }
            beta = beta.min(value);
            if beta <= alpha {
                break;
            }
        }
        Evaluation { value, best_move }
    }
}
