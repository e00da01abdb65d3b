mod loader;
mod validate;

pub use loader::{
    DEFAULT_QUESTIONS_PATH, LoadError, QuestionBank, RejectedRecord, load_bank_from_json,
    parse_bank,
};
pub use validate::{Issue, ValidationReport, validate_bank};
