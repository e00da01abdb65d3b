use std::fmt;

use serde::{Deserialize, Serialize};

/// How a session presents questions and feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Immediate feedback after each answer.
    Practice,
    /// Fixed-size sample, feedback withheld until the end.
    Exam,
    /// No answering; correct answers shown alongside each question.
    Study,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Practice, Mode::Exam, Mode::Study];

    pub fn name(self) -> &'static str {
        match self {
            Mode::Practice => "Practice",
            Mode::Exam => "Exam",
            Mode::Study => "Study",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Shuffle switches, read once when a session starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub shuffle_questions: bool,
    pub shuffle_options: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            shuffle_questions: true,
            shuffle_options: true,
        }
    }
}
