use crate::Move;

/// Link from a node to one of its children, labelled with the move played.
#[derive(Debug, Clone, Copy)]
pub struct SearchEdge {
    pub mv: Move,
}

impl SearchEdge {
    pub fn new(mv: Move) -> Self {
        Self { mv }
    }
}
