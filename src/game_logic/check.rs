use crate::game_state::{Board, Color, Coord};

use super::movegen::pseudo_legal_moves;

/// Is `color`'s king attacked by any opposing piece?
///
/// A board without that king is reported as not in check. Engine-driven play
/// never removes a king, so this only shows up for hand-built positions.
pub fn is_in_check(color: Color, board: &Board) -> bool {
    let Some(king) = board.king(color) else {
        log::warn!("no {color} king on the board; treating as not in check");
        return false;
    };

    board
        .pieces_of(color.other())
        .any(|attacker| pseudo_legal_moves(attacker, board).contains(&king))
}

/// Squares of the opposing pieces currently attacking `color`'s king.
pub fn checkers(color: Color, board: &Board) -> Vec<Coord> {
    let Some(king) = board.king(color) else {
        return Vec::new();
    };

    board
        .pieces_of(color.other())
        .filter(|attacker| pseudo_legal_moves(attacker, board).contains(&king))
        .map(|attacker| attacker.position())
        .collect()
}
