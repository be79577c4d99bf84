use crate::game_logic::{GameState, MoveOutcome};
use crate::game_state::Coord;

/// What a single square choice did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// A piece of the side to move is now selected.
    Selected(Coord),
    /// The selected square was chosen again and released.
    Deselected,
    /// The selected piece moved to the chosen destination.
    Moved(MoveOutcome),
    /// Nothing changed (empty square, opponent piece, game over, promotion pending).
    Ignored,
}

/// Select-then-move interaction on top of a [`GameState`].
///
/// Holds the selected square and its legal destinations so a front-end can
/// highlight them; the destinations are recomputed on every selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    selected: Option<Coord>,
    destinations: Vec<Coord>,
}

impl Selection {
    #[inline]
    pub const fn new() -> Self {
        Self {
            selected: None,
            destinations: Vec::new(),
        }
    }

    #[inline]
    pub fn selected(&self) -> Option<Coord> {
        self.selected
    }

    /// Legal destinations of the selected piece.
    #[inline]
    pub fn destinations(&self) -> &[Coord] {
        &self.destinations
    }

    pub fn clear(&mut self) {
        self.selected = None;
        self.destinations.clear();
    }

    /// Handle the player choosing square `at`.
    pub fn click(&mut self, game: &mut GameState, at: Coord) -> ClickOutcome {
        if game.game_over() || game.promotion_pending().is_some() {
            return ClickOutcome::Ignored;
        }

        if let Some(from) = self.selected {
            if self.destinations.contains(&at) {
                self.clear();
                return match game.apply_move(from, at) {
                    Ok(outcome) => ClickOutcome::Moved(outcome),
                    Err(e) => {
                        log::warn!("selected move {from} -> {at} was rejected: {e}");
                        ClickOutcome::Ignored
                    }
                };
            }
            if at == from {
                self.clear();
                return ClickOutcome::Deselected;
            }
        }

        if game
            .piece_at(at)
            .is_some_and(|p| p.color() == game.current_turn())
        {
            self.selected = Some(at);
            self.destinations = game.legal_moves(at);
            log::trace!("selected {at}: {} destinations", self.destinations.len());
            return ClickOutcome::Selected(at);
        }

        ClickOutcome::Ignored
    }
}
