//! # ham-quiz
//!
//! A terminal quiz for the radio amateur exam modules `K` (true/false) and
//! `T1` (multiple choice), with practice, exam and study modes.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ham_quiz::{Quiz, QuizConfig, QuizError};
//!
//! fn main() -> Result<(), QuizError> {
//!     // A missing or broken bank is shown as an error on the menu
//!     let quiz = Quiz::open("all_questions.json", QuizConfig::default());
//!
//!     // Run the quiz in the terminal
//!     quiz.run()?;
//!
//!     Ok(())
//! }
//! ```

mod app;
pub mod config;
pub mod data;
mod models;
pub mod quiz;
pub mod terminal;
mod ui;

use std::io;
use std::path::Path;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use thiserror::Error;
use tracing::warn;

pub use app::App;
pub use config::{ConfigError, QuizConfig};
pub use data::{
    LoadError, QuestionBank, ValidationReport, load_bank_from_json, parse_bank, validate_bank,
};
pub use models::{Answer, AnswerOption, AppState, Mode, Module, Question, QuestionId, QuestionKind, Settings};
pub use quiz::{Results, Session, SessionError};

/// Error type for quiz operations.
#[derive(Debug, Error)]
pub enum QuizError {
    #[error("failed to load questions: {0}")]
    Load(#[from] LoadError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// A quiz instance that can be run in the terminal.
pub struct Quiz {
    app: App,
}

impl Quiz {
    pub fn new(bank: QuestionBank, config: QuizConfig) -> Self {
        Self {
            app: App::new(bank, config),
        }
    }

    /// Load a quiz from a JSON question bank, failing if it is unavailable.
    pub fn from_json<P: AsRef<Path>>(path: P, config: QuizConfig) -> Result<Self, QuizError> {
        let bank = load_bank_from_json(path)?;
        Ok(Self::new(bank, config))
    }

    /// Open a quiz whose bank may fail to load; the menu then shows the
    /// error and offers a retry instead of starting sessions.
    pub fn open<P: AsRef<Path>>(path: P, config: QuizConfig) -> Self {
        Self {
            app: App::from_path(path, config),
        }
    }

    /// Preselect menu items, e.g. from command line flags.
    pub fn preselect(mut self, module: Option<Module>, mode: Option<Mode>) -> Self {
        if let Some(module) = module {
            self.app.select_module(module);
        }
        if let Some(mode) = mode {
            self.app.select_mode(mode);
        }
        self
    }

    /// Run the quiz in the terminal.
    ///
    /// This will take over the terminal, display the quiz UI, and return
    /// when the user quits.
    pub fn run(mut self) -> Result<(), QuizError> {
        let mut guard = terminal::TerminalGuard::enter()?;
        run_event_loop(guard.terminal(), &mut self.app)
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}

fn run_event_loop(terminal: &mut terminal::QuizTerminal, app: &mut App) -> Result<(), QuizError> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            if handle_input(app, key.code) {
                break;
            }
        }
    }

    Ok(())
}

/// Returns true if the app should exit.
fn handle_input(app: &mut App, key: KeyCode) -> bool {
    if app.is_confirming_quit() {
        match key {
            KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_quit(),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel_quit(),
            _ => {}
        }
        return false;
    }

    match app.state() {
        AppState::Menu => handle_menu_input(app, key),
        AppState::Quiz => handle_quiz_input(app, key),
        AppState::Study => handle_study_input(app, key),
        AppState::Result => handle_result_input(app, key),
    }
}

fn handle_menu_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Char('1') => app.select_module(Module::K),
        KeyCode::Char('2') => app.select_module(Module::T1),
        KeyCode::Char('p') | KeyCode::Char('P') => app.select_mode(Mode::Practice),
        KeyCode::Char('e') | KeyCode::Char('E') => app.select_mode(Mode::Exam),
        KeyCode::Char('s') | KeyCode::Char('S') => app.select_mode(Mode::Study),
        KeyCode::Char('x') | KeyCode::Char('X') => app.toggle_shuffle_questions(),
        KeyCode::Char('o') | KeyCode::Char('O') => app.toggle_shuffle_options(),
        KeyCode::Char('r') | KeyCode::Char('R') => {
            app.reload();
        }
        KeyCode::Enter => {
            // Failures are surfaced on the menu as a notice.
            let _ = app.start_session();
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return true,
        _ => {}
    }
    false
}

fn handle_quiz_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Up | KeyCode::Char('k') => app.select_previous_option(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next_option(),
        KeyCode::Enter | KeyCode::Char(' ') => {
            if let Err(err) = app.submit_answer() {
                warn!(%err, "answer rejected");
            }
        }
        KeyCode::Left | KeyCode::Char('h') => app.previous_question(),
        KeyCode::Right | KeyCode::Char('l') => {
            let exam = app
                .session()
                .is_some_and(|session| session.effective_mode() == Mode::Exam);
            if exam {
                app.skip_question();
            } else {
                app.next_question();
            }
        }
        KeyCode::Char('s') | KeyCode::Char('S') => app.skip_question(),
        KeyCode::Char('f') | KeyCode::Char('F') => app.finish(),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
            app.request_menu();
        }
        _ => {}
    }
    false
}

fn handle_study_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Up | KeyCode::Char('k') => {
            app.previous_question()
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Down | KeyCode::Char('j') => {
            app.next_question()
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
            app.request_menu();
        }
        _ => {}
    }
    false
}

fn handle_result_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Down | KeyCode::Char('j') => app.scroll_results_down(),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_results_up(),
        KeyCode::Char('v') | KeyCode::Char('V') => app.review(),
        KeyCode::Char('r') | KeyCode::Char('R') => app.restart(),
        KeyCode::Char('m') | KeyCode::Char('M') | KeyCode::Esc => {
            app.request_menu();
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => return true,
        _ => {}
    }
    false
}
