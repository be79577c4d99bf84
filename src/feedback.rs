use crate::game_logic::{GameState, check};
use crate::game_state::{Coord, PieceType};
use crate::selection::Selection;

/// Type of visual feedback for an individual square
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SquareFeedback {
    /// The selected piece can move here
    Destination,
    /// Moving here captures an opponent piece
    Capture,
    /// The selected piece
    Origin,
    /// King of the side to move, currently in check
    Check,
    /// Opponent piece giving check
    Checker,
}

/// Contains the set of squares and their associated feedback types for the current board state.
///
/// `BoardFeedback` is computed by `compute_feedback()` and consumed by a [`crate::BoardDisplay`]
/// to highlight the selection, its destinations, and any check on the side to move. It is the
/// primary interface between the game logic and the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BoardFeedback {
    squares: Vec<(Coord, SquareFeedback)>,
}

impl BoardFeedback {
    /// Create empty feedback (no highlights)
    #[inline]
    pub const fn new() -> Self {
        Self {
            squares: Vec::new(),
        }
    }

    /// Get all square feedback entries
    #[inline]
    pub fn squares(&self) -> &[(Coord, SquareFeedback)] {
        &self.squares
    }

    /// Get feedback for a specific square, if any
    #[inline]
    pub fn get(&self, square: Coord) -> Option<SquareFeedback> {
        self.squares
            .iter()
            .find(|(sq, _)| *sq == square)
            .map(|(_, feedback)| *feedback)
    }

    /// Set feedback for a square, replacing any earlier entry for it.
    pub fn set(&mut self, square: Coord, feedback: SquareFeedback) {
        match self.squares.iter_mut().find(|(sq, _)| *sq == square) {
            Some(entry) => entry.1 = feedback,
            None => self.squares.push((square, feedback)),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.squares.is_empty()
    }
}

impl From<Vec<(Coord, SquareFeedback)>> for BoardFeedback {
    fn from(squares: Vec<(Coord, SquareFeedback)>) -> Self {
        Self { squares }
    }
}

/// Compute visual feedback for the current game and selection.
///
/// - Side to move in check: king square and checking pieces
/// - Piece selected: origin plus each destination, captures told apart
///
/// Selection entries are written last, so a selected king in check shows as
/// the origin.
pub fn compute_feedback(game: &GameState, selection: &Selection) -> BoardFeedback {
    let mut feedback = BoardFeedback::new();
    let board = game.board();
    let turn = game.current_turn();

    let checkers = check::checkers(turn, board);
    if !checkers.is_empty()
        && let Some(king) = board.king(turn)
    {
        feedback.set(king, SquareFeedback::Check);
        for checker in checkers {
            feedback.set(checker, SquareFeedback::Checker);
        }
    }

    if let Some(from) = selection.selected() {
        feedback.set(from, SquareFeedback::Origin);
        for &to in selection.destinations() {
            feedback.set(to, classify_destination(game, from, to));
        }
    }

    feedback
}

/// Classify a destination as either a capture or a plain move
fn classify_destination(game: &GameState, from: Coord, to: Coord) -> SquareFeedback {
    let is_pawn = game
        .piece_at(from)
        .is_some_and(|p| p.kind() == PieceType::Pawn);
    let en_passant = is_pawn && from.col() != to.col() && game.piece_at(to).is_none();

    if game.piece_at(to).is_some() || en_passant {
        SquareFeedback::Capture
    } else {
        SquareFeedback::Destination
    }
}
