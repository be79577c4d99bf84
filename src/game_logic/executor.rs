use crate::game_state::{BOARD_SIZE, Board, Coord, PieceType};

use super::movegen::CASTLING_SIDES;

/// What a completed relocation left for the game state machine to handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Executed {
    /// A pawn landed on the far rank and needs a promotion choice.
    pub promotion_required: bool,
    /// Kind of the piece removed from the board, if any.
    pub captured: Option<PieceType>,
}

/// Realise an already-validated move on `board`, including en passant
/// removal, the castling rook hop, and en passant bookkeeping.
///
/// The destination is not re-checked for legality.
///
/// # Panics
/// If `from` is empty or the piece there records a different position.
pub fn execute(board: &mut Board, from: Coord, to: Coord) -> Executed {
    let piece = *board.get(from).expect("executing a move from an empty square");
    assert_eq!(
        piece.position(),
        from,
        "piece recorded position disagrees with the board"
    );

    let mut captured = board.get(to).map(|p| p.kind());
    let d_col = to.col() as i8 - from.col() as i8;
    let d_row = to.row() as i8 - from.row() as i8;

    if piece.kind() == PieceType::Pawn
        && d_col != 0
        && board.is_empty(to)
        && let Some(victim) = Coord::new(from.row(), to.col())
    {
        captured = board.take(victim).map(|p| p.kind());
        log::debug!("en passant: removed pawn on {victim}");
    }

    if piece.kind() == PieceType::King && d_col.abs() == 2 {
        castle_rook(board, from, d_col.signum());
    }

    // Clear before set: the window lasts exactly one ply.
    for pawn in board
        .pieces_mut()
        .filter(|p| p.kind() == PieceType::Pawn)
    {
        pawn.set_en_passant_vulnerable(false);
    }

    board.relocate(from, to);
    let moved = board
        .get_mut(to)
        .expect("relocated piece must be on its destination");
    moved.mark_moved();
    if piece.kind() == PieceType::Pawn && d_row.abs() == 2 {
        moved.set_en_passant_vulnerable(true);
    }

    let promotion_required =
        piece.kind() == PieceType::Pawn && (to.row() == 0 || to.row() == BOARD_SIZE - 1);

    Executed {
        promotion_required,
        captured,
    }
}

/// Hop the castling rook on `direction`'s side over the king.
fn castle_rook(board: &mut Board, king_from: Coord, direction: i8) {
    let Some((rook_offset, _)) = CASTLING_SIDES
        .into_iter()
        .find(|&(_, step)| step == direction)
    else {
        return;
    };
    let (Some(rook_from), Some(rook_to)) = (
        king_from.offset(0, rook_offset),
        king_from.offset(0, direction),
    ) else {
        return;
    };

    if board.get(rook_from).is_none() {
        log::warn!("castling from {king_from} found no rook on {rook_from}");
        return;
    }
    board.relocate(rook_from, rook_to);
    if let Some(rook) = board.get_mut(rook_to) {
        rook.mark_moved();
    }
    log::debug!("castling: rook {rook_from} -> {rook_to}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::Color;

    fn sq(name: &str) -> Coord {
        name.parse().expect("test square is invalid")
    }

    fn assert_piece(board: &Board, square: &str, kind: PieceType, color: Color) {
        let piece = board.get(sq(square));
        assert!(
            piece.is_some_and(|p| p.is(kind, color)),
            "Expected {color} {kind:?} at {square}, found {piece:?}"
        );
    }

    fn assert_empty(board: &Board, square: &str) {
        assert!(
            board.is_empty(sq(square)),
            "Expected empty at {square}, found {:?}",
            board.get(sq(square))
        );
    }

    #[test]
    fn test_simple_move_marks_moved() {
        let mut board = Board::standard();

        let executed = execute(&mut board, sq("g1"), sq("f3"));

        assert_empty(&board, "g1");
        assert_piece(&board, "f3", PieceType::Knight, Color::White);
        let knight = board.get(sq("f3")).unwrap();
        assert!(knight.has_moved());
        assert_eq!(knight.position(), sq("f3"));
        assert!(!executed.promotion_required);
        assert_eq!(executed.captured, None);
    }

    #[test]
    fn test_double_step_flags_only_mover() {
        let mut board = Board::standard();

        execute(&mut board, sq("e2"), sq("e4"));
        assert!(board.get(sq("e4")).unwrap().en_passant_vulnerable());

        execute(&mut board, sq("d7"), sq("d5"));
        assert!(!board.get(sq("e4")).unwrap().en_passant_vulnerable());
        assert!(board.get(sq("d5")).unwrap().en_passant_vulnerable());

        execute(&mut board, sq("g1"), sq("f3"));
        let flagged = board
            .pieces()
            .filter(|p| p.en_passant_vulnerable())
            .count();
        assert_eq!(flagged, 0);
    }

    #[test]
    fn test_en_passant_removes_passed_pawn() {
        let mut board = Board::standard();
        execute(&mut board, sq("e2"), sq("e4"));
        execute(&mut board, sq("a7"), sq("a6"));
        execute(&mut board, sq("e4"), sq("e5"));
        execute(&mut board, sq("d7"), sq("d5"));

        let executed = execute(&mut board, sq("e5"), sq("d6"));

        assert_piece(&board, "d6", PieceType::Pawn, Color::White);
        assert_empty(&board, "d5");
        assert_empty(&board, "e5");
        assert_eq!(executed.captured, Some(PieceType::Pawn));
    }

    #[test]
    fn test_normal_capture_reports_victim() {
        let mut board = Board::empty()
            .with_piece(PieceType::Bishop, Color::White, sq("c1"))
            .with_piece(PieceType::Knight, Color::Black, sq("g5"));

        let executed = execute(&mut board, sq("c1"), sq("g5"));

        assert_piece(&board, "g5", PieceType::Bishop, Color::White);
        assert_eq!(executed.captured, Some(PieceType::Knight));
        assert_eq!(board.pieces().count(), 1);
    }

    #[test]
    fn test_castle_king_side() {
        let mut board = Board::empty()
            .with_piece(PieceType::King, Color::White, sq("e1"))
            .with_piece(PieceType::Rook, Color::White, sq("h1"));

        execute(&mut board, sq("e1"), sq("g1"));

        assert_piece(&board, "g1", PieceType::King, Color::White);
        assert_piece(&board, "f1", PieceType::Rook, Color::White);
        assert_empty(&board, "e1");
        assert_empty(&board, "h1");
        assert!(board.get(sq("f1")).unwrap().has_moved());
        assert!(board.get(sq("g1")).unwrap().has_moved());
        assert!(board.is_consistent());
    }

    #[test]
    fn test_castle_queen_side() {
        let mut board = Board::empty()
            .with_piece(PieceType::King, Color::Black, sq("e8"))
            .with_piece(PieceType::Rook, Color::Black, sq("a8"));

        execute(&mut board, sq("e8"), sq("c8"));

        assert_piece(&board, "c8", PieceType::King, Color::Black);
        assert_piece(&board, "d8", PieceType::Rook, Color::Black);
        assert_empty(&board, "a8");
        assert_empty(&board, "e8");
        assert!(board.is_consistent());
    }

    #[test]
    fn test_pawn_reaching_last_rank_requires_promotion() {
        let mut board = Board::empty().with_piece(PieceType::Pawn, Color::White, sq("b7"));
        assert!(execute(&mut board, sq("b7"), sq("b8")).promotion_required);

        let mut board = Board::empty().with_piece(PieceType::Pawn, Color::Black, sq("g2"));
        assert!(execute(&mut board, sq("g2"), sq("g1")).promotion_required);
    }

    #[test]
    #[should_panic(expected = "empty square")]
    fn test_execute_from_empty_square_panics() {
        execute(&mut Board::empty(), sq("a1"), sq("a2"));
    }
}
