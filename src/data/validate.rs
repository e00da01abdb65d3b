//! Data-quality checks for a loaded question bank.

use std::collections::HashSet;
use std::fmt;

use crate::data::QuestionBank;
use crate::models::{Module, Question, QuestionKind};

const MIN_QUESTION_TEXT_LENGTH: usize = 5;
const MIN_OPTIONS: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub module: Module,
    pub id: Option<String>,
    pub message: String,
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.id {
            Some(id) => write!(f, "{}-{}: {}", self.module, id, self.message),
            None => write!(f, "{}: {}", self.module, self.message),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub counts: Vec<(Module, usize)>,
    pub issues: Vec<Issue>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn issues_for(&self, module: Module) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.module == module)
            .count()
    }
}

pub fn validate_bank(bank: &QuestionBank) -> ValidationReport {
    let mut report = ValidationReport::default();

    for module in Module::ALL {
        let pool = bank.pool(module);
        report.counts.push((module, pool.len()));

        let mut seen = HashSet::new();
        for question in pool {
            if !seen.insert(question.id.number.as_str()) {
                report.issues.push(issue(question, "duplicate question id"));
            }
            check_question(question, &mut report.issues);
        }
    }

    for rejected in bank.rejected() {
        report.issues.push(Issue {
            module: rejected.module,
            id: rejected.id.clone(),
            message: format!(
                "record #{} skipped: {}",
                rejected.position + 1,
                rejected.reason
            ),
        });
    }

    report
}

fn check_question(question: &Question, issues: &mut Vec<Issue>) {
    if question.text.trim().chars().count() < MIN_QUESTION_TEXT_LENGTH {
        issues.push(issue(
            question,
            format!("very short text: '{}'", question.text),
        ));
    }

    let QuestionKind::MultipleChoice {
        options,
        correct_answers,
    } = &question.kind
    else {
        return;
    };

    if options.len() < MIN_OPTIONS {
        issues.push(issue(
            question,
            format!("has only {} option(s)", options.len()),
        ));
    }

    let mut letters = HashSet::new();
    for option in options {
        if !letters.insert(option.letter) {
            issues.push(issue(
                question,
                format!("duplicate option letter {}", option.letter),
            ));
        }
    }

    if !options.iter().any(|option| option.is_correct) {
        issues.push(issue(question, "no option is marked correct"));
    }

    for letter in correct_answers {
        if !letters.contains(letter) {
            issues.push(issue(
                question,
                format!("correct answer {} is not an option", letter),
            ));
        }
    }
}

fn issue(question: &Question, message: impl Into<String>) -> Issue {
    Issue {
        module: question.id.module,
        id: Some(question.id.number.clone()),
        message: message.into(),
    }
}
