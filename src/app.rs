use std::path::{Path, PathBuf};

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{error, info, warn};

use crate::config::QuizConfig;
use crate::data::{QuestionBank, load_bank_from_json};
use crate::models::{AppState, Mode, Module, Settings};
use crate::quiz::{self, Phase, Session, SessionError};

/// Whether the question bank is available to start sessions from.
pub enum BankStatus {
    Loaded(QuestionBank),
    Failed(String),
}

/// Owns the menu selections and at most one live session.
pub struct App {
    bank: BankStatus,
    bank_path: Option<PathBuf>,
    config: QuizConfig,
    selected_module: Option<Module>,
    selected_mode: Option<Mode>,
    settings: Settings,
    session: Option<Session>,
    option_cursor: usize,
    confirm_quit: bool,
    result_scroll: usize,
    notice: Option<String>,
}

impl App {
    pub fn new(bank: QuestionBank, config: QuizConfig) -> Self {
        Self::with_status(BankStatus::Loaded(bank), None, config)
    }

    /// Load the bank from `path`. A failed load is kept as a blocking error.
    pub fn from_path<P: AsRef<Path>>(path: P, config: QuizConfig) -> Self {
        let path = path.as_ref().to_path_buf();
        let status = load_status(&path);
        Self::with_status(status, Some(path), config)
    }

    fn with_status(bank: BankStatus, bank_path: Option<PathBuf>, config: QuizConfig) -> Self {
        Self {
            bank,
            bank_path,
            settings: config.settings,
            config,
            selected_module: None,
            selected_mode: None,
            session: None,
            option_cursor: 0,
            confirm_quit: false,
            result_scroll: 0,
            notice: None,
        }
    }

    pub fn state(&self) -> AppState {
        match self.session.as_ref().map(Session::phase) {
            None => AppState::Menu,
            Some(Phase::InProgress) => AppState::Quiz,
            Some(Phase::Study) => AppState::Study,
            Some(Phase::Finished) => AppState::Result,
        }
    }

    pub fn bank(&self) -> Option<&QuestionBank> {
        match &self.bank {
            BankStatus::Loaded(bank) => Some(bank),
            BankStatus::Failed(_) => None,
        }
    }

    pub fn load_error(&self) -> Option<&str> {
        match &self.bank {
            BankStatus::Loaded(_) => None,
            BankStatus::Failed(message) => Some(message),
        }
    }

    /// Retry a failed load. Returns true once the bank is available.
    pub fn reload(&mut self) -> bool {
        if let (BankStatus::Failed(_), Some(path)) = (&self.bank, &self.bank_path) {
            self.bank = load_status(path);
        }
        self.bank().is_some()
    }

    pub fn config(&self) -> &QuizConfig {
        &self.config
    }

    pub fn selected_module(&self) -> Option<Module> {
        self.selected_module
    }

    pub fn selected_mode(&self) -> Option<Mode> {
        self.selected_mode
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn select_module(&mut self, module: Module) {
        self.selected_module = Some(module);
        self.notice = None;
    }

    pub fn select_mode(&mut self, mode: Mode) {
        self.selected_mode = Some(mode);
        self.notice = None;
    }

    pub fn toggle_shuffle_questions(&mut self) {
        self.settings.shuffle_questions = !self.settings.shuffle_questions;
    }

    pub fn toggle_shuffle_options(&mut self) {
        self.settings.shuffle_options = !self.settings.shuffle_options;
    }

    pub fn can_start(&self) -> bool {
        self.bank().is_some() && self.selected_module.is_some() && self.selected_mode.is_some()
    }

    /// Start a session from the menu selections. Missing selections are a no-op.
    pub fn start_session(&mut self) -> Result<(), SessionError> {
        let result = self.try_start_session();
        if let Err(err) = &result {
            warn!(%err, "session not started");
            self.notice = Some(err.to_string());
        }
        result
    }

    fn try_start_session(&mut self) -> Result<(), SessionError> {
        let bank = self.bank().ok_or(SessionError::BankNotLoaded)?;
        let (Some(module), Some(mode)) = (self.selected_module, self.selected_mode) else {
            return Ok(());
        };

        let session = Session::start(
            module,
            mode,
            bank.pool(module),
            self.settings,
            &self.config,
            StdRng::from_entropy(),
        )?;

        self.session = Some(session);
        self.option_cursor = 0;
        self.notice = None;
        Ok(())
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn option_cursor(&self) -> usize {
        self.option_cursor
    }

    pub fn select_next_option(&mut self) {
        let count = self.choice_count();
        if count > 0 {
            self.option_cursor = (self.option_cursor + 1) % count;
        }
    }

    pub fn select_previous_option(&mut self) {
        let count = self.choice_count();
        if count > 0 {
            self.option_cursor = (self.option_cursor + count - 1) % count;
        }
    }

    fn choice_count(&self) -> usize {
        match &self.session {
            Some(session) if session.phase() == Phase::InProgress => {
                session.current_question().choice_count()
            }
            _ => 0,
        }
    }

    /// Record the option under the cursor for the current question.
    pub fn submit_answer(&mut self) -> Result<(), SessionError> {
        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };
        let view = quiz::view::question_view(session);
        let Some(option) = view.options.get(self.option_cursor) else {
            return Ok(());
        };
        session.select_answer(option.answer)
    }

    pub fn next_question(&mut self) {
        if let Some(session) = self.session.as_mut() {
            if session.next() {
                self.sync_cursor();
            }
        }
    }

    pub fn previous_question(&mut self) {
        if let Some(session) = self.session.as_mut() {
            if session.previous() {
                self.sync_cursor();
            }
        }
    }

    pub fn skip_question(&mut self) {
        if let Some(session) = self.session.as_mut() {
            if session.skip() {
                self.sync_cursor();
            }
        }
    }

    /// Put the cursor on the recorded answer, or the first option.
    fn sync_cursor(&mut self) {
        self.option_cursor = self
            .session
            .as_ref()
            .filter(|session| session.phase() == Phase::InProgress)
            .and_then(|session| {
                let view = quiz::view::question_view(session);
                view.options.iter().position(|option| option.selected)
            })
            .unwrap_or(0);
    }

    pub fn finish(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if !session.can_finish() {
            return;
        }
        if let Err(err) = session.finish() {
            error!(%err, "failed to finish session");
            return;
        }
        self.result_scroll = 0;
    }

    pub fn review(&mut self) {
        if let Some(session) = self.session.as_mut() {
            if session.review().is_ok() {
                self.sync_cursor();
            }
        }
    }

    pub fn restart(&mut self) {
        if let Some(session) = self.session.as_mut() {
            if session.restart().is_ok() {
                self.option_cursor = 0;
            }
        }
    }

    /// Leave the session. Asks for confirmation while answers are in play;
    /// returns true when the menu is shown immediately.
    pub fn request_menu(&mut self) -> bool {
        if self.state() == AppState::Quiz {
            self.confirm_quit = true;
            false
        } else {
            self.return_to_menu();
            true
        }
    }

    pub fn is_confirming_quit(&self) -> bool {
        self.confirm_quit
    }

    pub fn confirm_quit(&mut self) {
        if self.confirm_quit {
            self.return_to_menu();
        }
    }

    pub fn cancel_quit(&mut self) {
        self.confirm_quit = false;
    }

    /// Discard all session state and menu selections.
    pub fn return_to_menu(&mut self) {
        if let Some(session) = self.session.take() {
            info!(module = %session.module(), mode = %session.mode(), "returned to menu");
        }
        self.selected_module = None;
        self.selected_mode = None;
        self.option_cursor = 0;
        self.confirm_quit = false;
        self.result_scroll = 0;
    }

    pub fn result_scroll(&self) -> usize {
        self.result_scroll
    }

    pub fn scroll_results_down(&mut self) {
        let max_scroll = self
            .session
            .as_ref()
            .map_or(0, |session| session.len().saturating_sub(1));
        self.result_scroll = (self.result_scroll + 1).min(max_scroll);
    }

    pub fn scroll_results_up(&mut self) {
        self.result_scroll = self.result_scroll.saturating_sub(1);
    }
}

fn load_status(path: &Path) -> BankStatus {
    match load_bank_from_json(path) {
        Ok(bank) => BankStatus::Loaded(bank),
        Err(err) => {
            error!(%err, "question bank unavailable");
            BankStatus::Failed(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::{multiple_choice, true_false};
    use crate::models::Answer;

    fn app() -> App {
        let bank = QuestionBank::new(
            vec![true_false("1", true), true_false("2", false), true_false("3", true)],
            vec![multiple_choice("01001", "ABCD", "B")],
        );
        let mut config = QuizConfig::default();
        config.settings = Settings {
            shuffle_questions: false,
            shuffle_options: false,
        };
        App::new(bank, config)
    }

    #[test]
    fn test_start_requires_both_selections() {
        let mut app = app();
        assert!(!app.can_start());
        app.start_session().unwrap();
        assert_eq!(app.state(), AppState::Menu);

        app.select_module(Module::K);
        app.select_mode(Mode::Practice);
        assert!(app.can_start());
        app.start_session().unwrap();
        assert_eq!(app.state(), AppState::Quiz);
    }

    #[test]
    fn test_failed_bank_blocks_sessions() {
        let mut app = App::from_path("missing/all_questions.json", QuizConfig::default());
        assert!(app.load_error().is_some());
        app.select_module(Module::K);
        app.select_mode(Mode::Exam);
        assert!(!app.can_start());
        assert_eq!(app.start_session(), Err(SessionError::BankNotLoaded));
        assert_eq!(app.state(), AppState::Menu);
        assert!(app.notice().is_some());
        assert!(!app.reload());
    }

    #[test]
    fn test_cursor_answers_and_follows_recorded_answer() {
        let mut app = app();
        app.select_module(Module::K);
        app.select_mode(Mode::Practice);
        app.start_session().unwrap();

        app.select_next_option();
        app.submit_answer().unwrap();
        let session = app.session().unwrap();
        assert_eq!(session.current_answer(), Some(&Answer::Bool(false)));

        app.next_question();
        assert_eq!(app.option_cursor(), 0);
        app.previous_question();
        assert_eq!(app.option_cursor(), 1);
    }

    #[test]
    fn test_quit_mid_session_needs_confirmation() {
        let mut app = app();
        app.select_module(Module::K);
        app.select_mode(Mode::Exam);
        app.start_session().unwrap();

        assert!(!app.request_menu());
        assert!(app.is_confirming_quit());
        app.cancel_quit();
        assert_eq!(app.state(), AppState::Quiz);

        app.request_menu();
        app.confirm_quit();
        assert_eq!(app.state(), AppState::Menu);
        assert!(app.session().is_none());
        assert_eq!(app.selected_module(), None);
        assert_eq!(app.selected_mode(), None);
    }

    #[test]
    fn test_study_and_results_leave_without_confirmation() {
        let mut app = app();
        app.select_module(Module::T1);
        app.select_mode(Mode::Study);
        app.start_session().unwrap();
        assert_eq!(app.state(), AppState::Study);
        assert!(app.request_menu());
        assert_eq!(app.state(), AppState::Menu);

        app.select_module(Module::K);
        app.select_mode(Mode::Exam);
        app.start_session().unwrap();
        app.finish();
        assert_eq!(app.state(), AppState::Result);
        assert!(app.request_menu());
    }

    #[test]
    fn test_result_flow() {
        let mut app = app();
        app.select_module(Module::K);
        app.select_mode(Mode::Practice);
        app.start_session().unwrap();

        app.finish();
        assert_eq!(app.state(), AppState::Quiz, "practice finishes on the last question");

        app.next_question();
        app.next_question();
        app.finish();
        assert_eq!(app.state(), AppState::Result);

        app.scroll_results_down();
        app.scroll_results_down();
        app.scroll_results_down();
        assert_eq!(app.result_scroll(), 2);

        app.review();
        assert_eq!(app.state(), AppState::Quiz);
        app.next_question();
        app.next_question();
        app.finish();
        app.restart();
        assert_eq!(app.state(), AppState::Quiz);
        assert_eq!(app.session().unwrap().answers().answered(), 0);
    }

    #[test]
    fn test_settings_toggle() {
        let mut app = app();
        app.toggle_shuffle_questions();
        app.toggle_shuffle_options();
        assert!(app.settings().shuffle_questions);
        assert!(app.settings().shuffle_options);
    }
}
