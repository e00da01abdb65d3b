//! Per-question correctness and aggregate results.

use std::rc::Rc;

use crate::models::{Answer, Question, QuestionKind};
use crate::quiz::AnswerSheet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Results {
    pub correct: usize,
    pub incorrect: usize,
    pub unanswered: usize,
    pub total: usize,
    pub percentage: u32,
    pub pass_threshold: usize,
    pub passed: bool,
}

/// Outcome of a single working-set position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Incorrect,
    Unanswered,
}

pub fn is_correct(question: &Question, answer: Option<&Answer>) -> bool {
    match (&question.kind, answer) {
        (QuestionKind::TrueFalse { correct }, Some(Answer::Bool(value))) => value == correct,
        (
            QuestionKind::MultipleChoice {
                correct_answers, ..
            },
            Some(Answer::Letter(letter)),
        ) => correct_answers.contains(letter),
        _ => false,
    }
}

pub fn outcome(question: &Question, answer: Option<&Answer>) -> Outcome {
    match answer {
        None => Outcome::Unanswered,
        Some(_) if is_correct(question, answer) => Outcome::Correct,
        Some(_) => Outcome::Incorrect,
    }
}

pub fn aggregate(working_set: &[Rc<Question>], answers: &AnswerSheet, pass_threshold: usize) -> Results {
    let mut correct = 0;
    let mut incorrect = 0;
    let mut unanswered = 0;

    for (question, answer) in working_set.iter().zip(answers.iter()) {
        match outcome(question, answer) {
            Outcome::Correct => correct += 1,
            Outcome::Incorrect => incorrect += 1,
            Outcome::Unanswered => unanswered += 1,
        }
    }

    let total = working_set.len();

    Results {
        correct,
        incorrect,
        unanswered,
        total,
        percentage: percentage(correct, total),
        pass_threshold,
        passed: correct >= pass_threshold,
    }
}

/// `correct / total` as a whole percent, ties rounded up. Empty sets score 0.
pub fn percentage(correct: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((correct * 200 + total) / (total * 2)) as u32
}
