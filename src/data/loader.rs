use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use crate::models::{AnswerOption, Module, Question, QuestionId, QuestionKind};

pub const DEFAULT_QUESTIONS_PATH: &str = "all_questions.json";

const TRUE_FALSE_TYPE: &str = "true_false";

/// Errors that prevent a question bank from loading at all.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{} must contain at least one question", path.display())]
    Empty { path: PathBuf },
}

/// A record that was dropped while loading, with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRecord {
    pub module: Module,
    pub position: usize,
    pub id: Option<String>,
    pub reason: String,
}

/// All questions, partitioned by module. Shared read-only across sessions.
#[derive(Debug, Clone, Default)]
pub struct QuestionBank {
    k_module: Vec<Rc<Question>>,
    t1_module: Vec<Rc<Question>>,
    rejected: Vec<RejectedRecord>,
}

impl QuestionBank {
    pub fn new(k_module: Vec<Question>, t1_module: Vec<Question>) -> Self {
        Self {
            k_module: k_module.into_iter().map(Rc::new).collect(),
            t1_module: t1_module.into_iter().map(Rc::new).collect(),
            rejected: Vec::new(),
        }
    }

    pub fn pool(&self, module: Module) -> &[Rc<Question>] {
        match module {
            Module::K => &self.k_module,
            Module::T1 => &self.t1_module,
        }
    }

    pub fn rejected(&self) -> &[RejectedRecord] {
        &self.rejected
    }

    pub fn total(&self) -> usize {
        self.k_module.len() + self.t1_module.len()
    }
}

/// Records stay untyped here so one bad record cannot fail the whole file.
#[derive(Deserialize)]
struct RawBank {
    #[serde(default)]
    k_module: Vec<Value>,
    #[serde(default)]
    t1_module: Vec<Value>,
}

#[derive(Deserialize)]
struct RawQuestion {
    #[serde(default)]
    id: Option<String>,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    correct_answer: Option<bool>,
    #[serde(default)]
    options: Vec<RawOption>,
    #[serde(default)]
    correct_answers: Vec<char>,
    #[serde(default)]
    category: Option<String>,
}

#[derive(Deserialize)]
struct RawOption {
    #[serde(default)]
    letter: Option<char>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    is_correct: bool,
}

impl RawQuestion {
    fn into_question(self, module: Module) -> Result<Question, String> {
        let number = self.id.ok_or("missing id")?;
        let text = self.text.ok_or("missing text")?;

        let kind = if self.kind.as_deref() == Some(TRUE_FALSE_TYPE) {
            let correct = self
                .correct_answer
                .ok_or("true/false question without correct_answer")?;
            QuestionKind::TrueFalse { correct }
        } else {
            if self.options.is_empty() {
                return Err("multiple choice question without options".to_string());
            }

            let options = self
                .options
                .into_iter()
                .enumerate()
                .map(|(index, option)| {
                    let letter = option
                        .letter
                        .ok_or_else(|| format!("option #{} without a letter", index + 1))?;
                    let text = option
                        .text
                        .ok_or_else(|| format!("option {} without text", letter))?;
                    Ok(AnswerOption {
                        letter,
                        text,
                        is_correct: option.is_correct,
                    })
                })
                .collect::<Result<Vec<_>, String>>()?;

            // Older exports only carry the per-option flags.
            let correct_answers = if self.correct_answers.is_empty() {
                options
                    .iter()
                    .filter(|option| option.is_correct)
                    .map(|option| option.letter)
                    .collect()
            } else {
                self.correct_answers
            };

            if correct_answers.is_empty() {
                return Err("multiple choice question without a correct option".to_string());
            }

            QuestionKind::MultipleChoice {
                options,
                correct_answers,
            }
        };

        Ok(Question {
            id: QuestionId { module, number },
            kind,
            text,
            category: self.category,
        })
    }
}

pub fn load_bank_from_json<P: AsRef<Path>>(path: P) -> Result<QuestionBank, LoadError> {
    let path = path.as_ref();

    let json_content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let bank = parse_bank(&json_content).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    if bank.total() == 0 {
        return Err(LoadError::Empty {
            path: path.to_path_buf(),
        });
    }

    info!(
        path = %path.display(),
        k = bank.k_module.len(),
        t1 = bank.t1_module.len(),
        rejected = bank.rejected.len(),
        "question bank loaded"
    );

    Ok(bank)
}

/// Parse a bank from JSON text. Malformed records are skipped, not fatal.
pub fn parse_bank(json: &str) -> Result<QuestionBank, serde_json::Error> {
    let raw: RawBank = serde_json::from_str(json)?;
    let mut bank = QuestionBank::default();

    for (module, records) in [(Module::K, raw.k_module), (Module::T1, raw.t1_module)] {
        for (position, record) in records.into_iter().enumerate() {
            let id = record.get("id").and_then(Value::as_str).map(str::to_string);
            let question = serde_json::from_value::<RawQuestion>(record)
                .map_err(|err| err.to_string())
                .and_then(|raw| raw.into_question(module));
            match question {
                Ok(question) => match module {
                    Module::K => bank.k_module.push(Rc::new(question)),
                    Module::T1 => bank.t1_module.push(Rc::new(question)),
                },
                Err(reason) => {
                    warn!(%module, position, id = ?id, %reason, "skipping question record");
                    bank.rejected.push(RejectedRecord {
                        module,
                        position,
                        id,
                        reason,
                    });
                }
            }
        }
    }

    Ok(bank)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const SAMPLE: &str = r#"{
        "k_module": [
            {"module": "K", "id": "20001", "type": "true_false",
             "text": "DL is the prefix used for Germany.", "correct_answer": true,
             "finnish_answer": "oikein", "category": "COUNTRY PREFIXES"},
            {"module": "K", "id": "20002", "type": "true_false",
             "text": "Missing its ground truth."}
        ],
        "t1_module": [
            {"module": "T1", "id": "01001", "type": "multiple_choice",
             "text": "Which are units of power?",
             "options": [
                {"letter": "A", "text": "W", "is_correct": true},
                {"letter": "B", "text": "V", "is_correct": false},
                {"letter": "C", "text": "dBm", "is_correct": true}
             ],
             "correct_answers": ["A", "C"]},
            {"module": "T1", "id": "01002", "type": "multiple_choice",
             "text": "Flags only.",
             "options": [
                {"letter": "A", "text": "yes", "is_correct": false},
                {"letter": "B", "text": "no", "is_correct": true}
             ]}
        ]
    }"#;

    #[test]
    fn test_parse_bank_splits_modules() {
        let bank = parse_bank(SAMPLE).unwrap();
        assert_eq!(bank.pool(Module::K).len(), 1);
        assert_eq!(bank.pool(Module::T1).len(), 2);

        let first = &bank.pool(Module::K)[0];
        assert_eq!(first.id.to_string(), "K-20001");
        assert_eq!(first.kind, QuestionKind::TrueFalse { correct: true });
        assert_eq!(first.category.as_deref(), Some("COUNTRY PREFIXES"));
    }

    #[test]
    fn test_missing_fields_are_rejected_not_fatal() {
        let bank = parse_bank(SAMPLE).unwrap();
        assert_eq!(bank.rejected().len(), 1);
        let rejected = &bank.rejected()[0];
        assert_eq!(rejected.module, Module::K);
        assert_eq!(rejected.id.as_deref(), Some("20002"));
        assert_eq!(rejected.position, 1);
    }

    #[test]
    fn test_correct_answers_fall_back_to_option_flags() {
        let bank = parse_bank(SAMPLE).unwrap();
        let QuestionKind::MultipleChoice {
            correct_answers, ..
        } = &bank.pool(Module::T1)[1].kind
        else {
            panic!("expected multiple choice");
        };
        assert_eq!(correct_answers, &vec!['B']);
    }

    #[test]
    fn test_malformed_option_skips_only_its_record() {
        let bank = parse_bank(
            r#"{
            "k_module": [
                {"id": "20001", "type": "true_false", "text": "DL is Germany.",
                 "correct_answer": true}
            ],
            "t1_module": [
                {"id": "01001", "type": "multiple_choice", "text": "Broken option",
                 "options": [{"letter": "A", "is_correct": true}, {"letter": "B", "text": "x"}]},
                {"id": "01002", "type": "multiple_choice", "text": "Wrong shape",
                 "options": "A"},
                {"id": "01003", "type": "multiple_choice", "text": "Fine",
                 "options": [{"letter": "A", "text": "a", "is_correct": true},
                             {"letter": "B", "text": "b"}]}
            ]
        }"#,
        )
        .unwrap();

        assert_eq!(bank.pool(Module::K).len(), 1);
        assert_eq!(bank.pool(Module::T1).len(), 1);
        assert_eq!(bank.pool(Module::T1)[0].id.number, "01003");

        let rejected = bank.rejected();
        assert_eq!(rejected.len(), 2);
        assert_eq!(rejected[0].id.as_deref(), Some("01001"));
        assert_eq!(rejected[0].reason, "option A without text");
        assert_eq!(rejected[1].id.as_deref(), Some("01002"));
        assert_eq!(rejected[1].position, 1);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_bank_from_json("definitely/not/here.json").unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn test_load_empty_bank() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"k_module": [], "t1_module": []}}"#).unwrap();

        let err = load_bank_from_json(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::Empty { .. }));
    }

    #[test]
    fn test_load_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = load_bank_from_json(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
        assert!(err.to_string().starts_with("failed to parse"));
    }
}
