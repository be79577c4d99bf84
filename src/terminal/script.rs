use std::collections::VecDeque;

use thiserror::Error;

use crate::game_logic::GameState;
use crate::game_state::{Coord, PieceType};
use crate::selection::{ClickOutcome, Selection};

/// Error when parsing a click script.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid square notation: '{0}'")]
    InvalidSquare(String),

    #[error("invalid promotion choice: '{0}'")]
    InvalidPromotion(String),
}

/// One player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptStep {
    /// Choose a square (select, deselect or move).
    Click(Coord),
    /// Answer a pending promotion.
    Promote(PieceType),
}

/// A queue of scripted player inputs.
///
/// Format:
/// - Squares are 2 characters (e.g., "e2", "a1") and each is one click
/// - Squares may be written back to back: `"e2e4"` is two clicks
/// - `=` followed by a piece letter answers a promotion (e.g., "=q", "=N")
/// - Whitespace and periods separate tokens
///
/// Examples:
/// - `"e2e4 e7e5"` - White pawn e2 to e4, Black pawn e7 to e5
/// - `"e2. e4."` - Same first move, one token per click
/// - `"b7b8 =q"` - Push to the last rank, then promote to a queen
#[derive(Debug, Clone, Default)]
pub struct ScriptedPlayer {
    pending: VecDeque<ScriptStep>,
}

impl ScriptedPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and queue additional script. Nothing is queued on error.
    pub fn push_script(&mut self, script: &str) -> Result<(), ParseError> {
        let steps = parse_script(script)?;
        self.pending.extend(steps);
        Ok(())
    }

    /// Next pending input, if any.
    pub fn next_step(&mut self) -> Option<ScriptStep> {
        self.pending.pop_front()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Feed every pending input into `game`, calling `on_step` after each.
    pub fn drain<F>(&mut self, game: &mut GameState, selection: &mut Selection, mut on_step: F)
    where
        F: FnMut(&GameState, ScriptStep, StepResult),
    {
        while let Some(step) = self.next_step() {
            let result = apply_step(game, selection, step);
            on_step(game, step, result);
        }
    }
}

/// What one scripted step did to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    Click(ClickOutcome),
    Promoted,
    PromotionRejected,
}

/// Apply a single input to `game`.
pub fn apply_step(game: &mut GameState, selection: &mut Selection, step: ScriptStep) -> StepResult {
    match step {
        ScriptStep::Click(at) => StepResult::Click(selection.click(game, at)),
        ScriptStep::Promote(kind) => match game.promote(kind) {
            Ok(_) => StepResult::Promoted,
            Err(e) => {
                log::debug!("promotion to {kind:?} rejected: {e}");
                StepResult::PromotionRejected
            }
        },
    }
}

/// Parse a script string into steps.
fn parse_script(script: &str) -> Result<Vec<ScriptStep>, ParseError> {
    let mut steps = Vec::new();
    let mut current_token = String::new();
    let mut chars = script.chars();

    while let Some(ch) = chars.next() {
        match ch {
            '.' => flush_token(&mut current_token, &mut steps)?,
            c if c.is_whitespace() => flush_token(&mut current_token, &mut steps)?,
            '=' => {
                flush_token(&mut current_token, &mut steps)?;
                let choice = chars.next();
                let kind = choice
                    .and_then(PieceType::from_char)
                    .filter(|k| k.is_promotion_choice())
                    .ok_or_else(|| {
                        ParseError::InvalidPromotion(choice.map(String::from).unwrap_or_default())
                    })?;
                steps.push(ScriptStep::Promote(kind));
            }
            _ => {
                current_token.push(ch);

                // Squares are exactly 2 characters (e.g., "e2", "a1")
                if current_token.len() == 2 {
                    flush_token(&mut current_token, &mut steps)?;
                }
            }
        }
    }

    // Flush any remaining token
    flush_token(&mut current_token, &mut steps)?;
    Ok(steps)
}

/// Add current token as a click and clear it.
fn flush_token(token: &mut String, steps: &mut Vec<ScriptStep>) -> Result<(), ParseError> {
    if !token.is_empty() {
        let square: Coord = token
            .parse()
            .map_err(|_| ParseError::InvalidSquare(token.clone()))?;
        steps.push(ScriptStep::Click(square));
        token.clear();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn sq(name: &str) -> Coord {
        name.parse().expect("test square is invalid")
    }

    #[test_case("e2e4"; "joined")]
    #[test_case("e2 e4"; "spaced")]
    #[test_case("e2. e4."; "periods")]
    fn test_parse_clicks(script: &str) {
        assert_eq!(
            parse_script(script),
            Ok(vec![ScriptStep::Click(sq("e2")), ScriptStep::Click(sq("e4"))])
        );
    }

    #[test]
    fn test_parse_promotion() {
        assert_eq!(
            parse_script("b7b8 =N"),
            Ok(vec![
                ScriptStep::Click(sq("b7")),
                ScriptStep::Click(sq("b8")),
                ScriptStep::Promote(PieceType::Knight),
            ])
        );
    }

    #[test]
    fn test_parse_error_invalid_square() {
        let mut player = ScriptedPlayer::new();
        let result = player.push_script("e2.  zz.");
        assert_eq!(result, Err(ParseError::InvalidSquare("zz".to_string())));
    }

    #[test_case("=k"; "king")]
    #[test_case("=x"; "unknown letter")]
    #[test_case("="; "missing letter")]
    fn test_parse_error_invalid_promotion(script: &str) {
        assert!(matches!(
            parse_script(script),
            Err(ParseError::InvalidPromotion(_))
        ));
    }

    #[test]
    fn test_parse_error_does_not_modify_state() {
        let mut player = ScriptedPlayer::new();

        player.push_script("e2.").unwrap();

        // Invalid script should fail without modifying pending steps
        let result = player.push_script("xx.");
        assert!(result.is_err());

        assert_eq!(player.next_step(), Some(ScriptStep::Click(sq("e2"))));
        assert!(player.is_empty());
    }

    #[test]
    fn test_drain_plays_moves() {
        let mut game = GameState::new();
        let mut selection = Selection::new();
        let mut player = ScriptedPlayer::new();
        player.push_script("e2e4 e7e5 g1f3").unwrap();

        let mut moves = 0;
        player.drain(&mut game, &mut selection, |_, _, result| {
            if matches!(result, StepResult::Click(ClickOutcome::Moved(_))) {
                moves += 1;
            }
        });

        assert_eq!(moves, 3);
        assert!(player.is_empty());
    }
}
