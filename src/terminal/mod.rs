mod display;
mod script;
mod session;

pub use display::{DisplayError, TerminalDisplay};
pub use script::{ParseError, ScriptStep, ScriptedPlayer, StepResult, apply_step};
pub use session::{Session, run_interactive_terminal};
