pub mod check;
pub mod executor;
pub mod legality;
pub mod movegen;

use crate::game_state::{BOARD_SIZE, Board, Color, Coord, Piece, PieceType};
use thiserror::Error;

/// Why a move request was rejected. The game state is unchanged in every case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("no piece on {0}")]
    NoPiece(Coord),

    #[error("the piece on {0} does not belong to the side to move")]
    NotYourTurn(Coord),

    #[error("a promotion choice is pending")]
    PromotionPending,

    #[error("the game is over")]
    GameOver,

    #[error("{from} -> {to} is not a legal move")]
    IllegalDestination { from: Coord, to: Coord },
}

/// Why a promotion request was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PromotionError {
    #[error("no promotion is pending")]
    NotPending,

    #[error("cannot promote to {0:?}")]
    InvalidChoice(PieceType),
}

/// Whether the game continues, and how it ended if not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameStatus {
    #[default]
    InProgress,
    Checkmate {
        winner: Color,
    },
    Stalemate,
}

impl GameStatus {
    #[inline]
    pub fn is_over(self) -> bool {
        self != GameStatus::InProgress
    }

    /// Winning side; `None` while in progress or after a stalemate.
    #[inline]
    pub fn winner(self) -> Option<Color> {
        match self {
            GameStatus::Checkmate { winner } => Some(winner),
            _ => None,
        }
    }
}

/// Result of an accepted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    /// The moved pawn awaits [`GameState::promote`]; the turn has not passed.
    pub promotion_required: bool,
    pub captured: Option<PieceType>,
    pub status: GameStatus,
}

/// Read-only view of a game for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    pub grid: [[Option<(PieceType, Color)>; BOARD_SIZE]; BOARD_SIZE],
    pub current_turn: Color,
    pub promotion_pending: Option<Coord>,
    pub status: GameStatus,
}

impl Snapshot {
    #[inline]
    pub fn piece_at(&self, at: Coord) -> Option<(PieceType, Color)> {
        self.grid[at.row()][at.col()]
    }

    #[inline]
    pub fn game_over(&self) -> bool {
        self.status.is_over()
    }

    #[inline]
    pub fn winner(&self) -> Option<Color> {
        self.status.winner()
    }
}

/// One match: the board plus turn order, pending promotion and result.
///
/// Owned by the caller; every mutation goes through `&mut self`, so plies are
/// serialized by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    current_turn: Color,
    promotion_pending: Option<Coord>,
    status: GameStatus,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

/// Standard initial position, White to move.
#[inline]
pub fn new_game() -> GameState {
    GameState::new()
}

impl GameState {
    #[inline]
    pub fn new() -> Self {
        Self::from_board(Board::standard(), Color::White)
    }

    /// Starts from a custom position. The status starts as in progress; call
    /// [`GameState::evaluate_game_over`] to classify the position.
    pub fn from_board(board: Board, current_turn: Color) -> Self {
        Self {
            board,
            current_turn,
            promotion_pending: None,
            status: GameStatus::InProgress,
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn current_turn(&self) -> Color {
        self.current_turn
    }

    #[inline]
    pub fn promotion_pending(&self) -> Option<Coord> {
        self.promotion_pending
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[inline]
    pub fn game_over(&self) -> bool {
        self.status.is_over()
    }

    #[inline]
    pub fn winner(&self) -> Option<Color> {
        self.status.winner()
    }

    #[inline]
    pub fn piece_at(&self, at: Coord) -> Option<&Piece> {
        self.board.get(at)
    }

    /// Is the side to move currently in check?
    #[inline]
    pub fn in_check(&self) -> bool {
        check::is_in_check(self.current_turn, &self.board)
    }

    /// Legal destinations for the piece on `at`.
    ///
    /// Empty when the square is empty, holds the opponent's piece, a promotion
    /// is pending, or the game is over.
    pub fn legal_moves(&self, at: Coord) -> Vec<Coord> {
        match self.movable_piece(at) {
            Ok(piece) => legality::legal_moves(piece, &self.board),
            Err(_) => Vec::new(),
        }
    }

    /// Plays `from -> to` if it is one of `legal_moves(from)`.
    pub fn apply_move(&mut self, from: Coord, to: Coord) -> Result<MoveOutcome, MoveError> {
        let piece = self.movable_piece(from).inspect_err(|e| {
            log::debug!("rejected {from} -> {to}: {e}");
        })?;

        if !legality::legal_moves(piece, &self.board).contains(&to) {
            log::debug!("rejected {from} -> {to}: not legal");
            return Err(MoveError::IllegalDestination { from, to });
        }

        let executed = executor::execute(&mut self.board, from, to);
        log::debug!("{} played {from} -> {to}", self.current_turn);

        if executed.promotion_required {
            self.promotion_pending = Some(to);
            log::debug!("pawn on {to} awaits promotion");
        } else {
            self.finish_ply();
        }

        Ok(MoveOutcome {
            promotion_required: executed.promotion_required,
            captured: executed.captured,
            status: self.status,
        })
    }

    /// Replaces the pending pawn with `kind` and passes the turn.
    pub fn promote(&mut self, kind: PieceType) -> Result<GameStatus, PromotionError> {
        let Some(at) = self.promotion_pending else {
            return Err(PromotionError::NotPending);
        };
        if !kind.is_promotion_choice() {
            return Err(PromotionError::InvalidChoice(kind));
        }

        let pawn = self
            .board
            .get(at)
            .copied()
            .expect("pending promotion must point at a pawn");
        let mut promoted = Piece::new(kind, pawn.color(), at);
        promoted.mark_moved();
        self.board.put(promoted);
        self.promotion_pending = None;
        log::debug!("{} pawn on {at} promoted to {kind:?}", pawn.color());

        self.finish_ply();
        Ok(self.status)
    }

    /// Ends the game if the side to move has no legal move: checkmate when in
    /// check, stalemate otherwise.
    pub fn evaluate_game_over(&mut self) {
        debug_assert!(
            self.promotion_pending.is_none(),
            "game over is not evaluated while a promotion is pending"
        );
        if legality::has_legal_move(self.current_turn, &self.board) {
            return;
        }

        self.status = if self.in_check() {
            GameStatus::Checkmate {
                winner: self.current_turn.other(),
            }
        } else {
            GameStatus::Stalemate
        };
        log::info!("game over: {:?}", self.status);
    }

    pub fn snapshot(&self) -> Snapshot {
        let mut grid = [[None; BOARD_SIZE]; BOARD_SIZE];
        for piece in self.board.pieces() {
            let at = piece.position();
            grid[at.row()][at.col()] = Some((piece.kind(), piece.color()));
        }
        Snapshot {
            grid,
            current_turn: self.current_turn,
            promotion_pending: self.promotion_pending,
            status: self.status,
        }
    }

    /// The piece on `at`, if the side to move may move it right now.
    fn movable_piece(&self, at: Coord) -> Result<&Piece, MoveError> {
        if self.status.is_over() {
            return Err(MoveError::GameOver);
        }
        if self.promotion_pending.is_some() {
            return Err(MoveError::PromotionPending);
        }
        let piece = self.board.get(at).ok_or(MoveError::NoPiece(at))?;
        if piece.color() != self.current_turn {
            return Err(MoveError::NotYourTurn(at));
        }
        Ok(piece)
    }

    fn finish_ply(&mut self) {
        self.current_turn = self.current_turn.other();
        self.evaluate_game_over();
    }
}

#[cfg(test)]
mod test_helpers {
    use super::*;

    pub fn sq(name: &str) -> Coord {
        name.parse().expect("test square is invalid")
    }

    pub fn assert_piece(game: &GameState, square: &str, kind: PieceType, color: Color) {
        let found = game.piece_at(sq(square));
        assert!(
            found.is_some_and(|p| p.is(kind, color)),
            "Expected {color} {kind:?} at {square}, found {found:?}"
        );
    }

    pub fn assert_empty(game: &GameState, square: &str) {
        assert_eq!(
            game.piece_at(sq(square)),
            None,
            "Expected empty at {square}, found {:?}",
            game.piece_at(sq(square))
        );
    }

    /// Plays whitespace-separated `e2e4` style moves, panicking on rejection.
    pub fn play(game: &mut GameState, moves: &str) {
        for mv in moves.split_whitespace() {
            let (from, to) = mv.split_at(2);
            game.apply_move(sq(from), sq(to))
                .unwrap_or_else(|e| panic!("move {mv} rejected: {e}"));
        }
    }
}
