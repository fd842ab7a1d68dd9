use anyhow::{anyhow, Context, Result};
use std::io::BufRead;

use crate::game::definition::Letter;
use crate::game::round::RoundSize;
use crate::game::settings::Settings;
use crate::game::{Game, PhaseKind};
use crate::output::{GameOutput, Message};
use crate::storage::Storage;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Command {
    Again,
    Answer(Letter),
    Continue,
    Exit,
    Help,
    Next,
    Quit,
    Reset,
    Score,
    Sections,
    Select(Vec<usize>),
    SelectAll,
    Start(Option<RoundSize>),
}

pub fn parse_command(line: &str) -> Result<Command> {
    let mut words = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|w| !w.is_empty());
    let verb = match words.next() {
        Some(verb) => verb.to_lowercase(),
        None => return Ok(Command::Next),
    };
    let arguments: Vec<&str> = words.collect();

    let command = match verb.as_ref() {
        "again" => Command::Again,
        "continue" => Command::Continue,
        "exit" => Command::Exit,
        "help" | "?" => Command::Help,
        "next" => Command::Next,
        "quit" | "q" => Command::Quit,
        "reset" => Command::Reset,
        "score" => Command::Score,
        "sections" | "ls" => Command::Sections,
        "select" => match arguments.as_slice() {
            [] => return Err(anyhow!("Which sections? Try `select 1 2` or `select all`")),
            ["all"] => Command::SelectAll,
            numbers => Command::Select(
                numbers
                    .iter()
                    .map(|n| {
                        n.parse()
                            .with_context(|| format!("`{}` is not a section number", n))
                    })
                    .collect::<Result<Vec<usize>>>()?,
            ),
        },
        "start" => match arguments.as_slice() {
            [] => Command::Start(None),
            [size] => Command::Start(Some(size.parse()?)),
            _ => return Err(anyhow!("Usage: start [count|all]")),
        },
        letter if arguments.is_empty() && letter.len() == 1 => Command::Answer(letter.parse()?),
        other => return Err(anyhow!("Unknown command `{}`, type `help`", other)),
    };
    Ok(command)
}

fn show_section_select<S: Storage, O: GameOutput>(game: &Game<S>, output: &mut O) {
    output.say(&Message::SectionList(
        game.section_summaries(),
        game.total_questions(),
    ));
    output.say(&Message::LifetimeScore(game.get_score()));
}

fn show_selection<S: Storage, O: GameOutput>(game: &Game<S>, output: &mut O) {
    let names = game.get_selected_sections().iter().cloned().collect();
    output.say(&Message::Selection(names, game.available_questions()));
}

fn show_current_phase<S: Storage, O: GameOutput>(game: &Game<S>, output: &mut O) {
    match game.get_phase() {
        PhaseKind::SectionSelect => show_section_select(game, output),
        PhaseKind::Question => {
            if let (Some((position, total)), Some(question)) =
                (game.get_round_position(), game.current_question())
            {
                output.say(&Message::QuestionBegins(position, total, question.clone()));
            }
        }
        PhaseKind::Feedback => {
            if let Some(outcome) = game.get_last_outcome() {
                output.say(&Message::AnswerFeedback(outcome.clone()));
            }
        }
        PhaseKind::RoundComplete => {
            if let Some(tally) = game.get_round_tally() {
                output.say(&Message::RoundResults(
                    tally,
                    game.get_score(),
                    game.get_last_round_size(),
                ));
            }
        }
    }
}

fn execute<S: Storage, O: GameOutput>(
    game: &mut Game<S>,
    settings: &Settings,
    command: Command,
    output: &mut O,
) -> Result<()> {
    match command {
        Command::Again => game.repeat_round()?,
        Command::Answer(letter) => {
            game.answer(letter)?;
        }
        Command::Continue => game.continue_studying()?,
        Command::Exit => game.exit_round()?,
        Command::Help => {
            output.say(&Message::Help);
            return Ok(());
        }
        Command::Next => game.advance()?,
        Command::Quit => return Ok(()),
        Command::Reset => {
            game.reset_score();
            output.say(&Message::ScoreReset);
            return Ok(());
        }
        Command::Score => {
            output.say(&Message::LifetimeScore(game.get_score()));
            return Ok(());
        }
        Command::Sections => {
            show_section_select(game, output);
            return Ok(());
        }
        Command::Select(numbers) => {
            let summaries = game.section_summaries();
            let names = numbers
                .iter()
                .map(|number| {
                    number
                        .checked_sub(1)
                        .and_then(|index| summaries.get(index))
                        .map(|summary| summary.name.clone())
                        .ok_or_else(|| anyhow!("There is no section {}", number))
                })
                .collect::<Result<Vec<String>>>()?;
            game.select_sections(names)?;
            show_selection(game, output);
            return Ok(());
        }
        Command::SelectAll => {
            game.select_all_sections()?;
            show_selection(game, output);
            return Ok(());
        }
        Command::Start(size) => {
            game.start_round(size.unwrap_or(RoundSize::Limited(settings.round_size)))?
        }
    }
    show_current_phase(game, output);
    Ok(())
}

/// Runs an interactive session, one command per input line, until `quit` or
/// the end of the input.
pub fn run<S, R, O>(game: &mut Game<S>, settings: &Settings, input: R, output: &mut O) -> Result<()>
where
    S: Storage,
    R: BufRead,
    O: GameOutput,
{
    output.say(&Message::Help);
    show_section_select(game, output);

    for line in input.lines() {
        let line = line.context("could not read input")?;
        if line.trim().is_empty() && game.get_phase() != PhaseKind::Feedback {
            continue;
        }
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(e) => {
                output.say(&Message::Invalid(format!("{:#}", e)));
                continue;
            }
        };
        if command == Command::Quit {
            break;
        }
        if let Err(e) = execute(game, settings, command, output) {
            output.say(&Message::Invalid(format!("{:#}", e)));
        }
    }
    Ok(())
}
