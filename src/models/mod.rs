mod mode;
mod question;

#[cfg(test)]
pub(crate) use question::fixtures;

pub use mode::{Mode, Settings};
pub use question::{Answer, AnswerOption, Module, Question, QuestionId, QuestionKind};

/// Screen the application is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Menu,
    Quiz,
    Study,
    Result,
}
