use clap::{Parser, Subcommand};
use log::LevelFilter;
use std::env;
use std::io;
use std::path::PathBuf;
use std::process;

mod commands;
mod game;
mod output;
mod score;
mod storage;

use crate::commands::{bank, play, score as score_commands, Environment};
use crate::game::settings::Settings;
use crate::game::Game;
use crate::output::terminal::TerminalOutput;
use crate::output::{GameOutput, Message};

#[derive(Debug, Parser)]
#[command(name = "quiz-trainer", version, about = "Multiple-choice quiz trainer")]
struct Args {
    /// Directory holding questions.json and/or questions.txt
    #[arg(long, default_value = ".")]
    questions_dir: PathBuf,

    /// Where the lifetime score is stored (defaults to the user data directory)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Use the bundled sample question bank when no structured bank is found
    #[arg(long)]
    builtin: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Play rounds interactively (default)
    Play,
    /// List the sections of the question bank
    Sections,
    /// Show the lifetime score
    Score,
    /// Delete the lifetime score
    ResetScore,
    /// Convert questions.txt into questions.json
    Export {
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Check a structured question bank
    Validate { path: Option<PathBuf> },
}

fn init_logging() {
    let mut builder = pretty_env_logger::formatted_builder();
    builder.filter_level(LevelFilter::Warn);
    if let Ok(filters) = env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.init();
}

fn run(args: Args) -> anyhow::Result<()> {
    let environment = Environment {
        questions_dir: args.questions_dir,
        data_dir: args.data_dir,
        builtin: args.builtin,
        settings: Settings::default(),
    };
    let default_structured_path = environment
        .questions_dir
        .join(environment.settings.structured_file_name);

    match args.command.unwrap_or(Command::Play) {
        Command::Play => {
            let definition = environment.load_definition()?;
            let score_store = environment.open_score_store()?;
            let mut game = Game::new(definition, score_store, &environment.settings);
            let stdin = io::stdin();
            let mut output = TerminalOutput::new(io::stdout());
            play::run(&mut game, &environment.settings, stdin.lock(), &mut output)?;
        }
        Command::Sections => {
            let definition = environment.load_definition()?;
            let score_store = environment.open_score_store()?;
            let game = Game::new(definition, score_store, &environment.settings);
            TerminalOutput::new(io::stdout()).say(&Message::SectionList(
                game.section_summaries(),
                game.total_questions(),
            ));
        }
        Command::Score => score_commands::show(&environment)?,
        Command::ResetScore => score_commands::reset(&environment)?,
        Command::Export { output } => {
            let destination = output.unwrap_or(default_structured_path);
            let definition = bank::export(&environment, &destination)?;
            println!(
                "Wrote {} sections and {} questions to {}",
                definition.get_sections().len(),
                definition.num_questions(),
                destination.display()
            );
        }
        Command::Validate { path } => {
            let path = path.unwrap_or(default_structured_path);
            let report = bank::validate(&path)?;
            println!(
                "{} is valid: {} sections, {} questions ({} dropped)",
                path.display(),
                report.num_sections,
                report.num_questions,
                report.num_dropped_questions
            );
        }
    }
    Ok(())
}

fn main() {
    init_logging();
    if let Err(e) = run(Args::parse()) {
        eprintln!("{:#}", e);
        process::exit(1);
    }
}
