use anyhow::{anyhow, Context, Error, Result};
use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

use crate::game::definition::{Letter, Question};
use crate::score::ScoreRecord;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RoundSize {
    Limited(NonZeroUsize),
    Unlimited,
}

impl RoundSize {
    pub fn max_questions(self) -> usize {
        match self {
            RoundSize::Limited(size) => size.get(),
            RoundSize::Unlimited => usize::MAX,
        }
    }
}

impl fmt::Display for RoundSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundSize::Limited(size) => write!(f, "{}", size),
            RoundSize::Unlimited => write!(f, "all"),
        }
    }
}

impl FromStr for RoundSize {
    type Err = Error;

    fn from_str(s: &str) -> Result<RoundSize> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(RoundSize::Unlimited);
        }
        let size: usize = s
            .parse()
            .with_context(|| format!("`{}` is not a round size", s))?;
        NonZeroUsize::new(size)
            .map(RoundSize::Limited)
            .ok_or_else(|| anyhow!("A round needs at least one question"))
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Tally {
    pub correct: u32,
    pub attempted: u32,
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.correct, self.attempted)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AnswerOutcome {
    pub question: Question,
    pub selected: Letter,
    pub is_correct: bool,
    pub is_last_question: bool,
    pub lifetime_score: ScoreRecord,
}

/// A fixed list of questions answered one at a time.
#[derive(Debug)]
pub struct Round {
    questions: Vec<Question>,
    index: usize,
    tally: Tally,
    selected_answer: Option<Letter>,
}

impl Round {
    pub fn new(questions: Vec<Question>) -> Self {
        Round {
            questions,
            index: 0,
            tally: Tally::default(),
            selected_answer: None,
        }
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.index)
    }

    pub fn get_tally(&self) -> Tally {
        self.tally
    }

    /// 1-based position of the current question and the round length.
    pub fn get_position(&self) -> (usize, usize) {
        (self.index + 1, self.questions.len())
    }

    pub fn is_last_question(&self) -> bool {
        self.index + 1 >= self.questions.len()
    }

    pub fn answer(&mut self, answer: Letter) -> Result<bool> {
        if self.selected_answer.is_some() {
            return Err(anyhow!("This question was already answered"));
        }
        let is_correct = self
            .current_question()
            .context("There is no active question")?
            .is_answer_correct(answer);
        self.selected_answer = Some(answer);
        self.tally.attempted += 1;
        if is_correct {
            self.tally.correct += 1;
        }
        Ok(is_correct)
    }

    /// Moves to the next question, returns false when the round is over.
    pub fn next_question(&mut self) -> bool {
        if self.is_last_question() {
            return false;
        }
        self.index += 1;
        self.selected_answer = None;
        true
    }
}
