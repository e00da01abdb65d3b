//! Session state machine: sequencing, answer recording and scoring.

use std::collections::HashMap;
use std::rc::Rc;

use rand::rngs::StdRng;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::QuizConfig;
use crate::models::{Answer, Mode, Module, Question, QuestionId, Settings};
use crate::quiz::scorer::{self, Results};
use crate::quiz::sequencer;
use crate::quiz::AnswerSheet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    InProgress,
    Finished,
    Study,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("question bank is not loaded")]
    BankNotLoaded,

    #[error("module {0} has no questions")]
    EmptyPool(Module),

    #[error("cannot {action} while the session is {phase:?}")]
    InvalidPhase { action: &'static str, phase: Phase },

    #[error("answer {answer} does not fit question {question}")]
    AnswerKindMismatch { question: QuestionId, answer: Answer },
}

pub struct Session {
    module: Module,
    mode: Mode,
    settings: Settings,
    exam_size: usize,
    pass_threshold: usize,
    pool: Vec<Rc<Question>>,
    working_set: Vec<Rc<Question>>,
    position: usize,
    answers: AnswerSheet,
    option_orders: HashMap<usize, Vec<usize>>,
    phase: Phase,
    reviewing: bool,
    results: Option<Results>,
    rng: StdRng,
}

impl Session {
    /// Start a session over `pool`. Study mode enters the study phase.
    pub fn start(
        module: Module,
        mode: Mode,
        pool: &[Rc<Question>],
        settings: Settings,
        config: &QuizConfig,
        rng: StdRng,
    ) -> Result<Self, SessionError> {
        if pool.is_empty() {
            return Err(SessionError::EmptyPool(module));
        }

        let mut session = Self {
            module,
            mode,
            settings,
            exam_size: config.exam.sample_size.get(),
            pass_threshold: config.pass_threshold.for_module(module),
            pool: pool.to_vec(),
            working_set: Vec::new(),
            position: 0,
            answers: AnswerSheet::default(),
            option_orders: HashMap::new(),
            phase: if mode == Mode::Study {
                Phase::Study
            } else {
                Phase::InProgress
            },
            reviewing: false,
            results: None,
            rng,
        };
        session.build_working_set();
        if session.working_set.is_empty() {
            return Err(SessionError::EmptyPool(module));
        }

        info!(
            %module,
            %mode,
            questions = session.working_set.len(),
            shuffle_questions = settings.shuffle_questions,
            shuffle_options = settings.shuffle_options,
            "session started"
        );

        Ok(session)
    }

    fn build_working_set(&mut self) {
        self.working_set = sequencer::working_set(
            &self.pool,
            self.mode,
            self.settings,
            self.exam_size,
            &mut self.rng,
        );
        self.answers = AnswerSheet::new(self.working_set.len());
        self.option_orders.clear();
        self.position = 0;
        self.results = None;
        self.show_current();
    }

    /// Fixes the option order of the current position on first display.
    fn show_current(&mut self) {
        let Some(question) = self.working_set.get(self.position) else {
            return;
        };
        if !self.option_orders.contains_key(&self.position) {
            let order =
                sequencer::option_order(question, self.settings.shuffle_options, &mut self.rng);
            self.option_orders.insert(self.position, order);
        }
    }

    pub fn module(&self) -> Module {
        self.module
    }

    /// The mode the session was started with.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The mode whose display rules apply right now; review behaves as practice.
    pub fn effective_mode(&self) -> Mode {
        if self.reviewing {
            Mode::Practice
        } else {
            self.mode
        }
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_reviewing(&self) -> bool {
        self.reviewing
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.working_set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.working_set.is_empty()
    }

    pub fn is_first(&self) -> bool {
        self.position == 0
    }

    pub fn is_last(&self) -> bool {
        self.position + 1 >= self.working_set.len()
    }

    pub fn working_set(&self) -> &[Rc<Question>] {
        &self.working_set
    }

    pub fn current_question(&self) -> &Question {
        &self.working_set[self.position]
    }

    pub fn answers(&self) -> &AnswerSheet {
        &self.answers
    }

    pub fn current_answer(&self) -> Option<&Answer> {
        self.answers.answer_at(self.position)
    }

    pub fn pass_threshold(&self) -> usize {
        self.pass_threshold
    }

    pub fn results(&self) -> Option<&Results> {
        self.results.as_ref()
    }

    /// Option display order fixed for the question at `position`, if it has
    /// been displayed. Keyed by position so repeated ids never share an order.
    pub fn option_order(&self, position: usize) -> Option<&[usize]> {
        self.option_orders.get(&position).map(Vec::as_slice)
    }

    /// Whether correctness for the current question may be shown.
    pub fn feedback_due(&self) -> bool {
        self.phase == Phase::InProgress
            && self.effective_mode() == Mode::Practice
            && self.current_answer().is_some()
    }

    pub fn next(&mut self) -> bool {
        if self.phase == Phase::Finished || self.is_last() {
            return false;
        }
        self.position += 1;
        self.show_current();
        true
    }

    pub fn previous(&mut self) -> bool {
        if self.phase == Phase::Finished || self.is_first() {
            return false;
        }
        self.position -= 1;
        self.show_current();
        true
    }

    /// Exam-only forward move; a no-op in other modes.
    pub fn skip(&mut self) -> bool {
        if self.effective_mode() != Mode::Exam {
            return false;
        }
        self.next()
    }

    /// Records `answer` at the current position without advancing.
    pub fn select_answer(&mut self, answer: Answer) -> Result<(), SessionError> {
        self.expect_phase(Phase::InProgress, "answer")?;

        let question = self.current_question();
        if !question.accepts(&answer) {
            return Err(SessionError::AnswerKindMismatch {
                question: question.id.clone(),
                answer,
            });
        }

        debug!(position = self.position, %answer, "answer recorded");
        self.answers.record(self.position, answer);
        Ok(())
    }

    /// Exams may be submitted at any time; practice only from the last question.
    pub fn can_finish(&self) -> bool {
        self.phase == Phase::InProgress
            && (self.effective_mode() == Mode::Exam || self.is_last())
    }

    pub fn finish(&mut self) -> Result<Results, SessionError> {
        self.expect_phase(Phase::InProgress, "finish")?;

        let results = scorer::aggregate(&self.working_set, &self.answers, self.pass_threshold);
        self.phase = Phase::Finished;
        self.results = Some(results);

        info!(
            module = %self.module,
            mode = %self.mode,
            correct = results.correct,
            incorrect = results.incorrect,
            unanswered = results.unanswered,
            percentage = results.percentage,
            passed = results.passed,
            "session finished"
        );

        Ok(results)
    }

    /// Back to the first question with answers kept and feedback enabled.
    pub fn review(&mut self) -> Result<(), SessionError> {
        self.expect_phase(Phase::Finished, "review")?;

        self.phase = Phase::InProgress;
        self.reviewing = true;
        self.position = 0;
        self.show_current();
        info!(module = %self.module, "reviewing answers");
        Ok(())
    }

    /// New working set, fresh shuffle, all answers discarded.
    pub fn restart(&mut self) -> Result<(), SessionError> {
        self.expect_phase(Phase::Finished, "restart")?;

        self.phase = Phase::InProgress;
        self.reviewing = false;
        self.build_working_set();
        info!(module = %self.module, mode = %self.mode, "session restarted");
        Ok(())
    }

    fn expect_phase(&self, expected: Phase, action: &'static str) -> Result<(), SessionError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(SessionError::InvalidPhase {
                action,
                phase: self.phase,
            })
        }
    }
}
