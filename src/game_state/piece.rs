use std::fmt;

use super::Coord;

/// Side of a piece, and the side to move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    #[inline]
    pub const fn other(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row delta of a pawn step. White moves towards row 0.
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// Row from which pawns may advance two squares.
    #[inline]
    pub const fn pawn_start_row(self) -> usize {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    /// Row a pawn must stand on to capture en passant.
    #[inline]
    pub const fn en_passant_row(self) -> usize {
        match self {
            Color::White => 3,
            Color::Black => 4,
        }
    }

    #[inline]
    pub const fn home_row(self) -> usize {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }
}

impl std::ops::Not for Color {
    type Output = Self;

    fn not(self) -> Self {
        self.other()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceType {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceType {
    /// Types a pawn may promote to, in menu order.
    pub const PROMOTION_CHOICES: [PieceType; 4] = [
        PieceType::Queen,
        PieceType::Rook,
        PieceType::Bishop,
        PieceType::Knight,
    ];

    #[inline]
    pub fn is_promotion_choice(self) -> bool {
        Self::PROMOTION_CHOICES.contains(&self)
    }

    /// Lowercase letter (`p`, `n`, `b`, `r`, `q`, `k`).
    pub const fn char(self) -> char {
        match self {
            PieceType::Pawn => 'p',
            PieceType::Knight => 'n',
            PieceType::Bishop => 'b',
            PieceType::Rook => 'r',
            PieceType::Queen => 'q',
            PieceType::King => 'k',
        }
    }

    /// Inverse of [`PieceType::char`], case-insensitive.
    pub fn from_char(ch: char) -> Option<Self> {
        match ch.to_ascii_lowercase() {
            'p' => Some(PieceType::Pawn),
            'n' => Some(PieceType::Knight),
            'b' => Some(PieceType::Bishop),
            'r' => Some(PieceType::Rook),
            'q' => Some(PieceType::Queen),
            'k' => Some(PieceType::King),
            _ => None,
        }
    }
}

/// One chess piece and its rule-relevant history.
///
/// The recorded position always equals the cell holding the piece. Only the
/// board and the move executor update it, so it has no public setter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    kind: PieceType,
    color: Color,
    position: Coord,
    has_moved: bool,
    en_passant_vulnerable: bool,
}

impl Piece {
    pub const fn new(kind: PieceType, color: Color, position: Coord) -> Self {
        Self {
            kind,
            color,
            position,
            has_moved: false,
            en_passant_vulnerable: false,
        }
    }

    #[inline]
    pub const fn kind(&self) -> PieceType {
        self.kind
    }

    #[inline]
    pub const fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub const fn position(&self) -> Coord {
        self.position
    }

    /// True once this piece has been relocated at least once.
    #[inline]
    pub const fn has_moved(&self) -> bool {
        self.has_moved
    }

    /// True only for a pawn that advanced two squares on the previous ply.
    #[inline]
    pub const fn en_passant_vulnerable(&self) -> bool {
        self.en_passant_vulnerable
    }

    #[inline]
    pub fn is(&self, kind: PieceType, color: Color) -> bool {
        self.kind == kind && self.color == color
    }

    pub(crate) fn set_position(&mut self, position: Coord) {
        self.position = position;
    }

    pub(crate) fn mark_moved(&mut self) {
        self.has_moved = true;
    }

    pub(crate) fn set_en_passant_vulnerable(&mut self, vulnerable: bool) {
        self.en_passant_vulnerable = vulnerable;
    }
}
