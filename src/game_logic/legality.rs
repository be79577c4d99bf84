//! Narrowing pseudo-legal moves to those that keep the mover's king safe.
//!
//! Each candidate is played on a scratch copy of the board; the caller's
//! board is never mutated.

use crate::game_state::{Board, Color, Coord, Piece};

use super::check::is_in_check;
use super::movegen::pseudo_legal_moves;

/// Destinations of `piece` that do not leave its own king attacked.
pub fn legal_moves(piece: &Piece, board: &Board) -> Vec<Coord> {
    let candidates = pseudo_legal_moves(piece, board);
    let legal: Vec<Coord> = candidates
        .iter()
        .copied()
        .filter(|&to| !leaves_king_attacked(piece, to, board))
        .collect();

    log::trace!(
        "{} {:?} on {}: {} pseudo-legal, {} legal",
        piece.color(),
        piece.kind(),
        piece.position(),
        candidates.len(),
        legal.len()
    );
    legal
}

/// Does any piece of `color` have at least one legal move?
pub fn has_legal_move(color: Color, board: &Board) -> bool {
    board
        .pieces_of(color)
        .any(|piece| !legal_moves(piece, board).is_empty())
}

/// The position after a plain relocation of `piece` to `to`.
///
/// Only `piece` moves: an en passant victim stays on the board and a
/// castling rook stays in its corner.
pub fn simulate(piece: &Piece, to: Coord, board: &Board) -> Board {
    let mut scratch = *board;
    scratch.relocate(piece.position(), to);
    scratch
}

fn leaves_king_attacked(piece: &Piece, to: Coord, board: &Board) -> bool {
    is_in_check(piece.color(), &simulate(piece, to, board))
}
