//! Enumeration of every reachable board

use std::collections::{HashSet, VecDeque};

use super::Board;

/// Hashes of all boards reachable from the empty board by legal play.
#[derive(Debug, Clone, Default)]
pub struct StateSpace {
    pub states: HashSet<usize>,
    pub terminal_states: HashSet<usize>,
}

/// Breadth-first walk of the game tree.
///
/// Terminal boards are recorded but not expanded.
pub fn all_states() -> StateSpace {
    let mut space = StateSpace::default();
    let mut queue = VecDeque::from([Board::new()]);

    while let Some(board) = queue.pop_front() {
        if !space.states.insert(board.hash()) {
            continue;
        }
        if board.is_over().0 {
            space.terminal_states.insert(board.hash());
            continue;
        }
        for action in board.possible_actions() {
            let mut next = board;
            if next.take_turn(action).is_ok() {
                queue.push_back(next);
            }
        }
    }

    space
}
