use super::{BOARD_SIZE, Color, Coord, Piece, PieceType};

const BACK_RANK: [PieceType; BOARD_SIZE] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

/// 8×8 grid of optional pieces.
///
/// Pure storage: it knows nothing about move rules. `Board` is `Copy`, which
/// lets legality checks simulate on a scratch copy instead of the live board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [[Option<Piece>; BOARD_SIZE]; BOARD_SIZE],
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl Board {
    pub const fn empty() -> Self {
        Self {
            cells: [[None; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Standard initial position.
    pub fn standard() -> Self {
        let mut board = Self::empty();
        for color in Color::ALL {
            let home = color.home_row();
            let pawns = color.pawn_start_row();
            for (col, kind) in BACK_RANK.into_iter().enumerate() {
                board.put(Piece::new(kind, color, Coord::at(home, col)));
                board.put(Piece::new(PieceType::Pawn, color, Coord::at(pawns, col)));
            }
        }
        board
    }

    /// Builder for custom positions: places a fresh (unmoved) piece at `at`.
    pub fn with_piece(mut self, kind: PieceType, color: Color, at: Coord) -> Self {
        self.put(Piece::new(kind, color, at));
        self
    }

    /// Places `piece` on the cell matching its recorded position, returning
    /// whatever occupied it.
    pub fn put(&mut self, piece: Piece) -> Option<Piece> {
        let at = piece.position();
        self.cells[at.row()][at.col()].replace(piece)
    }

    #[inline]
    pub fn get(&self, at: Coord) -> Option<&Piece> {
        self.cells[at.row()][at.col()].as_ref()
    }

    #[inline]
    pub fn is_empty(&self, at: Coord) -> bool {
        self.get(at).is_none()
    }

    pub(crate) fn get_mut(&mut self, at: Coord) -> Option<&mut Piece> {
        self.cells[at.row()][at.col()].as_mut()
    }

    pub(crate) fn take(&mut self, at: Coord) -> Option<Piece> {
        self.cells[at.row()][at.col()].take()
    }

    /// Moves the piece at `from` to `to` and updates its recorded position.
    /// Returns the previous occupant of `to`.
    ///
    /// # Panics
    /// If `from` is empty; callers only relocate pieces they just looked up.
    pub(crate) fn relocate(&mut self, from: Coord, to: Coord) -> Option<Piece> {
        let mut piece = self
            .take(from)
            .expect("relocate called on an empty square");
        piece.set_position(to);
        self.cells[to.row()][to.col()].replace(piece)
    }

    /// All pieces, row by row from Black's home rank.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.cells.iter().flatten().flatten()
    }

    pub(crate) fn pieces_mut(&mut self) -> impl Iterator<Item = &mut Piece> {
        self.cells.iter_mut().flatten().flatten()
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = &Piece> {
        self.pieces().filter(move |p| p.color() == color)
    }

    /// Location of `color`'s king, if it is on the board.
    pub fn king(&self, color: Color) -> Option<Coord> {
        self.pieces()
            .find(|p| p.is(PieceType::King, color))
            .map(Piece::position)
    }

    /// True when every piece's recorded position matches its cell.
    pub fn is_consistent(&self) -> bool {
        Coord::all().all(|at| self.get(at).is_none_or(|p| p.position() == at))
    }
}
