//! Differential tests against `shakmaty`.
//!
//! Both engines play the same deterministic game and must agree on every
//! legal move at every ply. Castling and en passant are left out of the
//! comparison: this engine vets only the castling king's destination and
//! simulates en passant without lifting the captured pawn.

use std::collections::BTreeSet;

use chess_referee::{Board, Color, Coord, GameState, PieceType};
use shakmaty::{Chess, Position, Role, Square};
use test_case::test_case;

type MoveSet = BTreeSet<(Coord, Coord)>;

fn ours(game: &GameState) -> MoveSet {
    let board = game.board();
    let mut moves = MoveSet::new();
    for piece in board.pieces_of(game.current_turn()) {
        let from = piece.position();
        for to in game.legal_moves(from) {
            if !is_castle(piece.kind(), from, to) && !is_en_passant(board, piece.kind(), from, to) {
                moves.insert((from, to));
            }
        }
    }
    moves
}

fn is_castle(kind: PieceType, from: Coord, to: Coord) -> bool {
    kind == PieceType::King && from.col().abs_diff(to.col()) == 2
}

fn is_en_passant(board: &Board, kind: PieceType, from: Coord, to: Coord) -> bool {
    kind == PieceType::Pawn && from.col() != to.col() && board.is_empty(to)
}

fn reference(pos: &Chess) -> MoveSet {
    pos.legal_moves()
        .into_iter()
        .filter(|mv| !mv.is_castle() && !mv.is_en_passant())
        .filter_map(|mv| Some((Coord::from(mv.from()?), Coord::from(mv.to()))))
        .collect()
}

fn role_of(kind: PieceType) -> Role {
    match kind {
        PieceType::Pawn => Role::Pawn,
        PieceType::Knight => Role::Knight,
        PieceType::Bishop => Role::Bishop,
        PieceType::Rook => Role::Rook,
        PieceType::Queen => Role::Queen,
        PieceType::King => Role::King,
    }
}

fn color_of(color: Color) -> shakmaty::Color {
    match color {
        Color::White => shakmaty::Color::White,
        Color::Black => shakmaty::Color::Black,
    }
}

fn assert_same_placement(game: &GameState, pos: &Chess, ply: usize) {
    for at in Coord::all() {
        let expected = pos
            .board()
            .piece_at(Square::from(at))
            .map(|piece| (piece.role, piece.color));
        let actual = game
            .snapshot()
            .piece_at(at)
            .map(|(kind, color)| (role_of(kind), color_of(color)));
        assert_eq!(actual, expected, "placement differs at {at} after ply {ply}");
    }
}

fn play_both(game: &mut GameState, pos: &mut Chess, from: Coord, to: Coord) {
    let outcome = game.apply_move(from, to).expect("move is legal in both engines");
    if outcome.promotion_required {
        game.promote(PieceType::Queen).expect("queen is a valid choice");
    }

    let mv = pos
        .legal_moves()
        .into_iter()
        .find(|mv| {
            mv.from() == Some(Square::from(from))
                && mv.to() == Square::from(to)
                && !mv.is_castle()
                && mv.promotion().is_none_or(|role| role == Role::Queen)
        })
        .expect("reference engine has the move");
    pos.play_unchecked(mv);
}

#[test_case(3, 1; "stride 3")]
#[test_case(7, 2; "stride 7")]
#[test_case(11, 5; "stride 11")]
#[test_case(13, 0; "stride 13")]
#[test_case(17, 9; "stride 17")]
fn legal_moves_match_reference(stride: usize, offset: usize) {
    let mut game = GameState::new();
    let mut pos = Chess::default();

    for ply in 0..80 {
        assert_eq!(color_of(game.current_turn()), pos.turn(), "turn differs at ply {ply}");
        assert_eq!(game.in_check(), pos.is_check(), "check differs at ply {ply}");
        assert_same_placement(&game, &pos, ply);

        let expected = reference(&pos);
        let actual = ours(&game);
        assert_eq!(actual, expected, "legal moves differ at ply {ply}");

        if game.game_over() {
            break;
        }
        let candidates: Vec<_> = actual.into_iter().collect();
        if candidates.is_empty() {
            break;
        }
        let (from, to) = candidates[(ply * stride + offset) % candidates.len()];
        play_both(&mut game, &mut pos, from, to);
    }
}

#[test]
fn checkmate_agrees_with_reference() {
    let mut game = GameState::new();
    let mut pos = Chess::default();

    let moves = [
        ("e2", "e4"),
        ("e7", "e5"),
        ("f1", "c4"),
        ("b8", "c6"),
        ("d1", "f3"),
        ("a7", "a6"),
        ("f3", "f7"),
    ];
    for (from, to) in moves {
        let from: Coord = from.parse().expect("test square is invalid");
        let to: Coord = to.parse().expect("test square is invalid");
        play_both(&mut game, &mut pos, from, to);
    }

    assert!(pos.is_checkmate());
    assert_eq!(game.winner(), Some(Color::White));
}
