//! State machine for one quiz attempt over a section's questions.

mod run;

pub use run::{QuizAdvance, QuizPhase, QuizRun, ShuffledOption};
