use crate::game::definition::Question;
use crate::game::round::{AnswerOutcome, RoundSize, Tally};
use crate::game::SectionSummary;
use crate::score::ScoreRecord;

#[cfg(test)]
pub mod mock;
pub mod terminal;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Message {
    AnswerFeedback(AnswerOutcome),
    Help,
    Invalid(String),
    LifetimeScore(ScoreRecord),
    QuestionBegins(usize, usize, Question),
    RoundResults(Tally, ScoreRecord, RoundSize),
    ScoreReset,
    SectionList(Vec<SectionSummary>, usize),
    Selection(Vec<String>, usize),
}

pub trait GameOutput {
    fn say(&mut self, message: &Message);
}
