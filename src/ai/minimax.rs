use std::collections::HashMap;

use tracing::debug;

use crate::{Evaluation, NimState, Value, VALUE_MAX, VALUE_MIN};

type SolvedPositions = HashMap<(NimState, bool), Evaluation>;

/// Exhaustive minimax over the whole game tree.
///
/// `value` is reported from the maximizing side's point of view. Among equally
/// good moves the first one in `legal_moves` order wins. Positions reached by
/// different move orders are solved once per call; the table is dropped on
/// return, so the result only ever depends on the arguments.
pub fn minimax(state: &NimState, is_maximizing: bool) -> Evaluation {
    let mut solved = SolvedPositions::new();
    let mut nodes = 0u64;
    let evaluation = solve(state, is_maximizing, &mut solved, &mut nodes);

    debug!(
        state = %state,
        is_maximizing,
        value = evaluation.value,
        nodes,
        positions = solved.len(),
        "minimax search complete"
    );

    evaluation
}

fn solve(
    state: &NimState,
    is_maximizing: bool,
    solved: &mut SolvedPositions,
    nodes: &mut u64,
) -> Evaluation {
    *nodes += 1;

    if state.is_terminal() {
        return Evaluation::terminal(state.utility(is_maximizing));
    }

    if let Some(evaluation) = solved.get(&(state.clone(), is_maximizing)) {
        return *evaluation;
    }

    let mut best = Evaluation {
        value: if is_maximizing { VALUE_MIN } else { VALUE_MAX },
        best_move: None,
    };

    for successor in state.legal_moves() {
        let value = solve(&successor.state, !is_maximizing, solved, nodes).value;
        if is_better(value, best.value, is_maximizing) {
            best = Evaluation {
                value,
                best_move: Some(successor.mv),
            };
        }
    }

    solved.insert((state.clone(), is_maximizing), best);
    best
}

fn is_better(candidate: Value, incumbent: Value, is_maximizing: bool) -> bool {
    if is_maximizing {
        candidate > incumbent
    } else {
        candidate < incumbent
    }
}
