//! Quiz core: everything between the loaded bank and the screen.

mod answers;
pub mod scorer;
pub mod sequencer;
mod session;
pub mod view;

pub use answers::AnswerSheet;
pub use scorer::{Outcome, Results};
pub use session::{Phase, Session, SessionError};
pub use view::{Controls, Feedback, OptionView, QuestionView, StudyView};
