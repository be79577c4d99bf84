//! Rules engine for standard chess.
//!
//! [`GameState`] owns one match: it answers which squares a piece may move
//! to, applies moves with all their side effects (captures, en passant,
//! castling, promotion) and detects checkmate and stalemate. Everything a
//! front-end needs comes out as plain values: legal destinations,
//! [`Snapshot`]s and [`feedback::BoardFeedback`].

pub mod feedback;
pub mod game_logic;
pub mod game_state;
pub mod selection;
pub mod terminal;

pub use game_logic::{
    GameState, GameStatus, MoveError, MoveOutcome, PromotionError, Snapshot, new_game,
};
pub use game_state::{BOARD_SIZE, Board, Color, Coord, Piece, PieceType};

/// Trait for displaying the game to the player.
///
/// Abstracts over concrete renderers (the ANSI terminal here, anything
/// graphical elsewhere), providing a uniform interface for the output side
/// of the game loop.
pub trait BoardDisplay {
    /// Error type for display update failures.
    type Error: std::fmt::Debug + std::fmt::Display;

    /// Show the given position and feedback state on the display.
    ///
    /// Implementations map [`feedback::SquareFeedback`] variants
    /// to renderer-specific output (terminal colors, highlights, etc.).
    fn show(
        &mut self,
        snapshot: &Snapshot,
        feedback: &feedback::BoardFeedback,
    ) -> Result<(), Self::Error>;
}
