use std::fmt;

use serde::{Deserialize, Serialize};

/// A named partition of the question bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
pub enum Module {
    K,
    T1,
}

impl Module {
    pub const ALL: [Module; 2] = [Module::K, Module::T1];

    pub fn name(self) -> &'static str {
        match self {
            Module::K => "K",
            Module::T1 => "T1",
        }
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Identifies a question across the whole bank.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QuestionId {
    pub module: Module,
    pub number: String,
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.module, self.number)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOption {
    pub letter: char,
    pub text: String,
    pub is_correct: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionKind {
    TrueFalse {
        correct: bool,
    },
    MultipleChoice {
        options: Vec<AnswerOption>,
        correct_answers: Vec<char>,
    },
}

/// A value a user can record for a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Answer {
    Bool(bool),
    Letter(char),
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Bool(true) => f.write_str("True"),
            Answer::Bool(false) => f.write_str("False"),
            Answer::Letter(letter) => write!(f, "{}", letter),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub id: QuestionId,
    pub kind: QuestionKind,
    pub text: String,
    pub category: Option<String>,
}

impl Question {
    /// Number of selectable choices shown for this question.
    pub fn choice_count(&self) -> usize {
        match &self.kind {
            QuestionKind::TrueFalse { .. } => 2,
            QuestionKind::MultipleChoice { options, .. } => options.len(),
        }
    }

    /// Whether `answer` has the shape this question accepts.
    pub fn accepts(&self, answer: &Answer) -> bool {
        match (&self.kind, answer) {
            (QuestionKind::TrueFalse { .. }, Answer::Bool(_)) => true,
            (QuestionKind::MultipleChoice { options, .. }, Answer::Letter(letter)) => {
                options.iter().any(|option| option.letter == *letter)
            }
            _ => false,
        }
    }

    /// Human readable form of the expected answer(s), e.g. `True` or `B, D`.
    pub fn expected_answer_text(&self) -> String {
        match &self.kind {
            QuestionKind::TrueFalse { correct: true } => "True".to_string(),
            QuestionKind::TrueFalse { correct: false } => "False".to_string(),
            QuestionKind::MultipleChoice {
                correct_answers, ..
            } => correct_answers
                .iter()
                .map(char::to_string)
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}
