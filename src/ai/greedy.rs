use log::debug;

use crate::board::Board;
use crate::game::MoveSelector;
use crate::types::{Position, Side};

/// One-ply greedy player: takes the move that flips the most pieces.
///
/// Candidates are scanned in row-major order and only a strictly larger
/// flip count replaces the current best, so the earliest move wins ties.
#[derive(Debug, Default, Clone, Copy)]
pub struct GreedySelector;

impl MoveSelector for GreedySelector {
    fn select_move(&self, board: &Board, side: Side) -> Option<Position> {
        let mut best: Option<(Position, usize)> = None;

        for mv in board.legal_moves(side) {
            let flips = flip_count(board, mv, side);
            if best.is_none_or(|(_, max)| flips > max) {
                best = Some((mv, flips));
            }
        }

        if let Some((mv, flips)) = best {
            debug!(
                "greedy {} picks ({}, {}) flipping {flips}",
                side.name(),
                mv.row,
                mv.col
            );
        }
        best.map(|(mv, _)| mv)
    }
}

/// Number of pieces `side` would flip by playing `mv`, or 0 if the move is illegal.
/// The live board is never touched.
pub fn flip_count(board: &Board, mv: Position, side: Side) -> usize {
    let mut scratch = *board;
    scratch
        .apply_move(mv.row as usize, mv.col as usize, side)
        .map_or(0, |flipped| flipped.len())
}
