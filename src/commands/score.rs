use anyhow::Result;
use std::io;

use crate::commands::Environment;
use crate::output::terminal::TerminalOutput;
use crate::output::{GameOutput, Message};

pub fn show(environment: &Environment) -> Result<()> {
    let score_store = environment.open_score_store()?;
    TerminalOutput::new(io::stdout()).say(&Message::LifetimeScore(score_store.load()));
    Ok(())
}

pub fn reset(environment: &Environment) -> Result<()> {
    let score_store = environment.open_score_store()?;
    score_store.reset();
    TerminalOutput::new(io::stdout()).say(&Message::ScoreReset);
    Ok(())
}
