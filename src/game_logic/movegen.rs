//! Pseudo-legal destination generation.
//!
//! Everything here is a pure function of one piece and a board snapshot. No
//! function checks whether the mover's own king ends up attacked; that is the
//! job of [`super::legality`].

use crate::game_state::{Board, Color, Coord, Piece, PieceType};

const ORTHOGONAL: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const DIAGONAL: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
const ALL_DIRECTIONS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];
const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// (rook column offset, king step direction) for kingside and queenside.
pub(super) const CASTLING_SIDES: [(i8, i8); 2] = [(3, 1), (-4, -1)];

/// Destinations `piece` could reach on `board`, ignoring self-check.
pub fn pseudo_legal_moves(piece: &Piece, board: &Board) -> Vec<Coord> {
    let mut moves = Vec::new();
    match piece.kind() {
        PieceType::Pawn => pawn_moves(piece, board, &mut moves),
        PieceType::Knight => step_moves(piece, board, &KNIGHT_JUMPS, &mut moves),
        PieceType::Bishop => slide_moves(piece, board, &DIAGONAL, &mut moves),
        PieceType::Rook => slide_moves(piece, board, &ORTHOGONAL, &mut moves),
        PieceType::Queen => slide_moves(piece, board, &ALL_DIRECTIONS, &mut moves),
        PieceType::King => {
            step_moves(piece, board, &ALL_DIRECTIONS, &mut moves);
            castling_moves(piece, board, &mut moves);
        }
    }
    moves
}

/// Empty, or held by the other side.
fn can_land(board: &Board, at: Coord, color: Color) -> bool {
    board.get(at).is_none_or(|p| p.color() != color)
}

fn slide_moves(piece: &Piece, board: &Board, directions: &[(i8, i8)], moves: &mut Vec<Coord>) {
    for &(d_row, d_col) in directions {
        let mut cursor = piece.position();
        while let Some(next) = cursor.offset(d_row, d_col) {
            match board.get(next) {
                None => moves.push(next),
                Some(other) => {
                    if other.color() != piece.color() {
                        moves.push(next);
                    }
                    break;
                }
            }
            cursor = next;
        }
    }
}

fn step_moves(piece: &Piece, board: &Board, offsets: &[(i8, i8)], moves: &mut Vec<Coord>) {
    moves.extend(
        offsets
            .iter()
            .filter_map(|&(d_row, d_col)| piece.position().offset(d_row, d_col))
            .filter(|&to| can_land(board, to, piece.color())),
    );
}

fn pawn_moves(piece: &Piece, board: &Board, moves: &mut Vec<Coord>) {
    let from = piece.position();
    let color = piece.color();
    let forward = color.forward();

    if let Some(one) = from.offset(forward, 0)
        && board.is_empty(one)
    {
        moves.push(one);

        if from.row() == color.pawn_start_row()
            && let Some(two) = one.offset(forward, 0)
            && board.is_empty(two)
        {
            moves.push(two);
        }
    }

    for d_col in [-1, 1] {
        let Some(target) = from.offset(forward, d_col) else {
            continue;
        };

        if board.get(target).is_some_and(|p| p.color() != color) {
            moves.push(target);
        }

        // The captured pawn sits beside us, not on the destination.
        if from.row() == color.en_passant_row()
            && let Some(beside) = from.offset(0, d_col)
            && board.get(beside).is_some_and(|p| {
                p.is(PieceType::Pawn, color.other()) && p.en_passant_vulnerable()
            })
        {
            moves.push(target);
        }
    }
}

/// Two-column king steps towards an unmoved rook with a clear path.
///
/// The rook's colour is not checked: any unmoved rook at the corner offset
/// qualifies.
///
/// Attacks on the king's start or transit squares are not considered here or
/// anywhere else; only the destination is vetted by the legality filter.
fn castling_moves(king: &Piece, board: &Board, moves: &mut Vec<Coord>) {
    if king.has_moved() {
        return;
    }
    let from = king.position();

    for (rook_offset, step) in CASTLING_SIDES {
        let Some(rook_at) = from.offset(0, rook_offset) else {
            continue;
        };
        let rook_ready = board
            .get(rook_at)
            .is_some_and(|p| p.kind() == PieceType::Rook && !p.has_moved());
        if !rook_ready {
            continue;
        }

        let path_clear = (1..rook_offset.abs())
            .filter_map(|i| from.offset(0, i * step))
            .all(|at| board.is_empty(at));
        if path_clear && let Some(to) = from.offset(0, 2 * step) {
            moves.push(to);
        }
    }
}
