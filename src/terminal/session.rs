use std::io::{self, Write};

use crate::BoardDisplay;
use crate::feedback::compute_feedback;
use crate::game_logic::GameState;
use crate::selection::{ClickOutcome, Selection};

use super::script::{ScriptStep, ScriptedPlayer, StepResult, apply_step};

/// Clears the screen and moves cursor to top-left.
#[inline]
fn clear_screen() {
    print!("\x1B[2J\x1B[H");
}

/// A game, its selection state and a display, driven by text input.
pub struct Session<D> {
    game: GameState,
    selection: Selection,
    display: D,
}

impl<D: BoardDisplay> Session<D> {
    pub fn new(display: D) -> Self {
        Self {
            game: GameState::new(),
            selection: Selection::new(),
            display,
        }
    }

    #[inline]
    pub fn game(&self) -> &GameState {
        &self.game
    }

    /// Play a whole click script, returning a log line per step.
    pub fn play_script(&mut self, script: &str) -> Result<Vec<String>, super::ParseError> {
        let mut player = ScriptedPlayer::new();
        player.push_script(script)?;

        let mut lines = Vec::new();
        player.drain(&mut self.game, &mut self.selection, |_, step, result| {
            lines.push(describe(step, result));
        });
        Ok(lines)
    }

    /// Redraw the board with the current selection highlighted.
    pub fn render(&mut self) -> Result<(), D::Error> {
        let feedback = compute_feedback(&self.game, &self.selection);
        self.display.show(&self.game.snapshot(), &feedback)
    }

    fn reset(&mut self) {
        self.game = GameState::new();
        self.selection.clear();
    }
}

/// One-line description of what a step did.
fn describe(step: ScriptStep, result: StepResult) -> String {
    match (step, result) {
        (ScriptStep::Click(at), StepResult::Click(ClickOutcome::Selected(_))) => {
            format!("{at}: selected")
        }
        (ScriptStep::Click(at), StepResult::Click(ClickOutcome::Deselected)) => {
            format!("{at}: deselected")
        }
        (ScriptStep::Click(at), StepResult::Click(ClickOutcome::Moved(outcome))) => {
            match (outcome.promotion_required, outcome.captured) {
                (true, _) => format!("{at}: moved, choose a promotion"),
                (false, Some(kind)) => format!("{at}: moved, captured {kind:?}"),
                (false, None) => format!("{at}: moved"),
            }
        }
        (ScriptStep::Click(at), _) => format!("{at}: ignored"),
        (ScriptStep::Promote(kind), StepResult::Promoted) => format!("promoted to {kind:?}"),
        (ScriptStep::Promote(kind), _) => format!("promotion to {kind:?} rejected"),
    }
}

/// Runs an interactive terminal game.
///
/// Each input line is a click script (see [`ScriptedPlayer`]), or one of the
/// commands `r` (reset), `p` (refresh) and `q` (quit).
pub fn run_interactive_terminal<D: BoardDisplay>(display: D) {
    let mut session = Session::new(display);

    clear_screen();
    draw_interface(&mut session, &[]);

    loop {
        print!("> ");
        if let Err(e) = io::stdout().flush() {
            eprintln!("Failed to flush stdout: {}", e);
            break;
        }

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                eprintln!("Failed to read input: {}", e);
                break;
            }
        }

        let messages = match input.trim() {
            "" => continue,
            "q" => break,
            "r" => {
                session.reset();
                vec!["Reset to initial position".to_string()]
            }
            "p" => Vec::new(),
            script => match session.play_script(script) {
                Ok(lines) => lines,
                Err(e) => vec![format!("Invalid input: {e}")],
            },
        };

        clear_screen();
        draw_interface(&mut session, &messages);
    }
}

/// Draws help text, the board, and messages from the last input.
fn draw_interface<D: BoardDisplay>(session: &mut Session<D>, messages: &[String]) {
    println!("♟️  Chess Referee");
    println!();
    println!("Input: squares to click (e2 e4), =q/=r/=b/=n to promote | r (reset) | p (refresh) | q (quit)");
    println!();

    if let Err(e) = session.render() {
        log::error!("failed to render board: {e}");
    }

    for message in messages {
        println!("{message}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::BoardFeedback;
    use crate::game_logic::{GameStatus, Snapshot};
    use crate::game_state::Color;

    /// Display that records what it was asked to show.
    #[derive(Default)]
    struct RecordingDisplay {
        shown: Vec<(Snapshot, BoardFeedback)>,
    }

    impl BoardDisplay for RecordingDisplay {
        type Error = std::convert::Infallible;

        fn show(&mut self, snapshot: &Snapshot, feedback: &BoardFeedback) -> Result<(), Self::Error> {
            self.shown.push((*snapshot, feedback.clone()));
            Ok(())
        }
    }

    #[test]
    fn test_play_script_describes_steps() {
        let mut session = Session::new(RecordingDisplay::default());

        let lines = session.play_script("e2 e4 e5").expect("valid script");

        assert_eq!(lines, ["e2: selected", "e4: moved", "e5: ignored"]);
        assert_eq!(session.game().current_turn(), Color::Black);
    }

    #[test]
    fn test_play_script_reports_mate() {
        let mut session = Session::new(RecordingDisplay::default());

        session
            .play_script("f2f3 e7e5 g2g4 d8h4")
            .expect("valid script");

        assert_eq!(
            session.game().status(),
            GameStatus::Checkmate {
                winner: Color::Black
            }
        );
    }

    #[test]
    fn test_render_passes_selection_feedback() {
        let mut session = Session::new(RecordingDisplay::default());
        session.play_script("g1").expect("valid script");

        session.render().expect("infallible");

        let (snapshot, feedback) = session.display.shown.last().expect("one frame");
        assert_eq!(snapshot.current_turn, Color::White);
        assert_eq!(feedback.squares().len(), 3);
    }

    #[test]
    fn test_reset() {
        let mut session = Session::new(RecordingDisplay::default());
        session.play_script("e2e4").expect("valid script");

        session.reset();

        assert_eq!(session.game(), &GameState::new());
        assert_eq!(session.selection.selected(), None);
    }
}
