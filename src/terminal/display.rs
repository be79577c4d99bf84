use std::io::{self, Write};

use crate::BoardDisplay;
use crate::feedback::{BoardFeedback, SquareFeedback};
use crate::game_logic::{GameStatus, Snapshot};
use crate::game_state::{BOARD_SIZE, Color, Coord, PieceType};

/// Terminal-based board display.
///
/// Renders a [`Snapshot`] as an 8×8 grid with pieces, ANSI colour-coded
/// [`BoardFeedback`] backgrounds, and a status line underneath.
#[derive(Debug, Default)]
pub struct TerminalDisplay {
    ascii: bool,
}

impl TerminalDisplay {
    /// Create a new terminal display using Unicode chess glyphs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use piece letters (`P`, `n`, ...) instead of glyphs.
    pub fn ascii() -> Self {
        Self { ascii: true }
    }
}

/// Error type for terminal display operations.
#[derive(Debug, thiserror::Error)]
pub enum DisplayError {
    #[error("failed to write to terminal: {0}")]
    Io(#[from] io::Error),
}

impl BoardDisplay for TerminalDisplay {
    type Error = DisplayError;

    fn show(&mut self, snapshot: &Snapshot, feedback: &BoardFeedback) -> Result<(), Self::Error> {
        render_board(&mut io::stdout(), snapshot, feedback, self.ascii)
    }
}

/// Render the board to any writer. Extracted for testability.
pub(crate) fn render_board(
    w: &mut impl Write,
    snapshot: &Snapshot,
    feedback: &BoardFeedback,
    ascii: bool,
) -> Result<(), DisplayError> {
    for row in 0..BOARD_SIZE {
        write!(w, " {} ", BOARD_SIZE - row)?;
        for col in 0..BOARD_SIZE {
            let at = Coord::new(row, col).expect("row and col are below BOARD_SIZE");
            let symbol = piece_symbol(snapshot.piece_at(at), ascii);
            match background(feedback.get(at)) {
                Some(code) => write!(w, "\x1b[{code}m {symbol} \x1b[0m")?,
                None => write!(w, " {symbol} ")?,
            }
        }
        writeln!(w)?;
    }
    writeln!(w, "    a  b  c  d  e  f  g  h")?;
    writeln!(w, "{}", status_line(snapshot))?;
    w.flush()?;
    Ok(())
}

/// Map a feedback variant to an ANSI background code.
fn background(feedback: Option<SquareFeedback>) -> Option<u8> {
    match feedback? {
        SquareFeedback::Destination => Some(44),
        SquareFeedback::Capture => Some(41),
        SquareFeedback::Origin => Some(42),
        SquareFeedback::Check => Some(45),
        SquareFeedback::Checker => Some(43),
    }
}

fn piece_symbol(piece: Option<(PieceType, Color)>, ascii: bool) -> char {
    let Some((kind, color)) = piece else {
        return '·';
    };
    if ascii {
        return match color {
            Color::White => kind.char().to_ascii_uppercase(),
            Color::Black => kind.char(),
        };
    }
    match (kind, color) {
        (PieceType::Pawn, Color::White) => '♙',
        (PieceType::Knight, Color::White) => '♘',
        (PieceType::Bishop, Color::White) => '♗',
        (PieceType::Rook, Color::White) => '♖',
        (PieceType::Queen, Color::White) => '♕',
        (PieceType::King, Color::White) => '♔',
        (PieceType::Pawn, Color::Black) => '♟',
        (PieceType::Knight, Color::Black) => '♞',
        (PieceType::Bishop, Color::Black) => '♝',
        (PieceType::Rook, Color::Black) => '♜',
        (PieceType::Queen, Color::Black) => '♛',
        (PieceType::King, Color::Black) => '♚',
    }
}

fn status_line(snapshot: &Snapshot) -> String {
    match (snapshot.status, snapshot.promotion_pending) {
        (GameStatus::Checkmate { winner }, _) => format!("Checkmate, {winner} wins"),
        (GameStatus::Stalemate, _) => "Stalemate, draw".to_string(),
        (GameStatus::InProgress, Some(at)) => {
            format!("{} to promote on {at} (=q, =r, =b, =n)", snapshot.current_turn)
        }
        (GameStatus::InProgress, None) => format!("{} to move", snapshot.current_turn),
    }
}
