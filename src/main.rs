use std::fs::File;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Mutex;

use clap::{Parser, Subcommand};
use ham_quiz::data::DEFAULT_QUESTIONS_PATH;
use ham_quiz::{Mode, Module, Quiz, QuizConfig, QuizError, load_bank_from_json, validate_bank};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about = "Radio amateur exam quiz", long_about = None)]
struct Args {
    /// JSON file to load the questions from
    #[arg(short, long, default_value = DEFAULT_QUESTIONS_PATH)]
    questions: PathBuf,

    /// TOML file with thresholds, exam size and default settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write logs to this file while the quiz is running
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the terminal quiz (default)
    Run {
        /// Preselect a module
        #[arg(long, value_enum)]
        module: Option<Module>,

        /// Preselect a mode
        #[arg(long, value_enum)]
        mode: Option<Mode>,
    },

    /// Check the question bank for data-quality issues
    Validate,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), QuizError> {
    let config = match &args.config {
        Some(path) => QuizConfig::load(path)?,
        None => QuizConfig::default(),
    };

    match args.command.unwrap_or(Command::Run {
        module: None,
        mode: None,
    }) {
        Command::Validate => {
            init_tracing(None)?;
            validate(&args.questions)
        }
        Command::Run { module, mode } => {
            if let Some(path) = &args.log_file {
                init_tracing(Some(path.as_path()))?;
            }
            Quiz::open(&args.questions, config)
                .preselect(module, mode)
                .run()
        }
    }
}

/// Logs go to `log_file` when given, stderr otherwise. The quiz screens own
/// the terminal, so `run` only installs a subscriber for a log file.
fn init_tracing(log_file: Option<&Path>) -> Result<(), QuizError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match log_file {
        Some(path) => {
            let file = File::create(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }

    Ok(())
}

fn validate(path: &Path) -> Result<(), QuizError> {
    let bank = load_bank_from_json(path)?;
    let report = validate_bank(&bank);

    for (module, count) in &report.counts {
        println!(
            "{} module: {} questions, {} issues",
            module,
            count,
            report.issues_for(*module)
        );
    }

    if report.is_clean() {
        println!("All questions valid");
        return Ok(());
    }

    println!();
    println!("Found {} issues:", report.issues.len());
    for issue in &report.issues {
        println!("  - {}", issue);
    }
    process::exit(1);
}
