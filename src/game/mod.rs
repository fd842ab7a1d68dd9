use anyhow::{anyhow, Result};
use log::{info, warn};
use std::collections::HashSet;
use std::mem;

pub mod definition;
pub mod round;
pub mod sampler;
pub mod settings;

use self::definition::{Letter, QuizDefinition, Question, Section};
use self::round::{AnswerOutcome, Round, RoundSize, Tally};
use self::settings::Settings;
use crate::score::{ScoreRecord, ScoreStore};
use crate::storage::Storage;


#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PhaseKind {
    SectionSelect,
    Question,
    Feedback,
    RoundComplete,
}

#[derive(Debug)]
enum Phase {
    SectionSelect,
    Question(Round),
    Feedback(Round, AnswerOutcome),
    RoundComplete(Round),
}

impl Phase {
    fn get_kind(&self) -> PhaseKind {
        match self {
            Phase::SectionSelect => PhaseKind::SectionSelect,
            Phase::Question(_) => PhaseKind::Question,
            Phase::Feedback(_, _) => PhaseKind::Feedback,
            Phase::RoundComplete(_) => PhaseKind::RoundComplete,
        }
    }

    fn get_round(&self) -> Option<&Round> {
        match self {
            Phase::SectionSelect => None,
            Phase::Question(round) | Phase::Feedback(round, _) | Phase::RoundComplete(round) => {
                Some(round)
            }
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SectionSummary {
    pub name: String,
    pub num_questions: usize,
}

pub struct Game<S> {
    definition: QuizDefinition,
    score_store: ScoreStore<S>,
    selected_sections: HashSet<String>,
    last_round_size: RoundSize,
    current_phase: Phase,
}

impl<S: Storage> Game<S> {
    pub fn new(definition: QuizDefinition, score_store: ScoreStore<S>, settings: &Settings) -> Self {
        Game {
            definition,
            score_store,
            selected_sections: HashSet::new(),
            last_round_size: RoundSize::Limited(settings.round_size),
            current_phase: Phase::SectionSelect,
        }
    }

    fn set_current_phase(&mut self, phase: Phase) {
        info!("Entering game phase: {:?}", phase.get_kind());
        self.current_phase = phase;
    }

    fn take_current_phase(&mut self) -> Phase {
        mem::replace(&mut self.current_phase, Phase::SectionSelect)
    }

    pub fn get_phase(&self) -> PhaseKind {
        self.current_phase.get_kind()
    }

    pub fn get_sections(&self) -> &Vec<Section> {
        self.definition.get_sections()
    }

    /// Sections sorted by name, for display in a section picker.
    pub fn section_summaries(&self) -> Vec<SectionSummary> {
        let mut summaries: Vec<SectionSummary> = self
            .get_sections()
            .iter()
            .map(|section| SectionSummary {
                name: section.name.clone(),
                num_questions: section.questions.len(),
            })
            .collect();
        summaries.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(&b.name))
        });
        summaries
    }

    pub fn total_questions(&self) -> usize {
        self.definition.num_questions()
    }

    pub fn select_sections<I, T>(&mut self, names: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        if self.get_phase() != PhaseKind::SectionSelect {
            return Err(anyhow!("Sections can only be chosen between rounds"));
        }
        let mut selected_sections = HashSet::new();
        for name in names {
            let name = name.as_ref().trim();
            if self.get_sections().iter().any(|s| s.name == name) {
                selected_sections.insert(name.to_owned());
            } else {
                warn!("Ignoring unknown section `{}`", name);
            }
        }
        self.selected_sections = selected_sections;
        Ok(())
    }

    pub fn select_all_sections(&mut self) -> Result<()> {
        let names: Vec<String> = self.get_sections().iter().map(|s| s.name.clone()).collect();
        self.select_sections(names)
    }

    pub fn get_selected_sections(&self) -> &HashSet<String> {
        &self.selected_sections
    }

    pub fn available_questions(&self) -> usize {
        sampler::count(&self.selected_sections, self.get_sections())
    }

    pub fn start_round(&mut self, size: RoundSize) -> Result<()> {
        if self.get_phase() != PhaseKind::SectionSelect {
            return Err(anyhow!("A round is already in progress"));
        }
        self.begin_round(size)
    }

    fn begin_round(&mut self, size: RoundSize) -> Result<()> {
        if self.selected_sections.is_empty() {
            return Err(anyhow!("Select at least one section first"));
        }
        let questions = sampler::select(
            &self.selected_sections,
            self.get_sections(),
            size.max_questions(),
            &mut rand::thread_rng(),
        );
        if questions.is_empty() {
            return Err(anyhow!("The selected sections have no questions"));
        }
        info!("Starting a round of {} questions", questions.len());
        self.last_round_size = size;
        self.set_current_phase(Phase::Question(Round::new(questions)));
        Ok(())
    }

    /// The question being asked, or the one whose feedback is shown.
    pub fn current_question(&self) -> Option<&Question> {
        match &self.current_phase {
            Phase::Question(round) | Phase::Feedback(round, _) => round.current_question(),
            _ => None,
        }
    }

    pub fn answer(&mut self, answer: Letter) -> Result<AnswerOutcome> {
        let round = match &mut self.current_phase {
            Phase::Question(round) => round,
            Phase::Feedback(_, _) => return Err(anyhow!("This question was already answered")),
            _ => return Err(anyhow!("There is no active question")),
        };

        let is_correct = round.answer(answer)?;
        let question = round
            .current_question()
            .cloned()
            .ok_or_else(|| anyhow!("There is no active question"))?;
        let is_last_question = round.is_last_question();
        let lifetime_score = self.score_store.record_answer(is_correct);
        let outcome = AnswerOutcome {
            question,
            selected: answer,
            is_correct,
            is_last_question,
            lifetime_score,
        };

        if let Phase::Question(round) = self.take_current_phase() {
            self.set_current_phase(Phase::Feedback(round, outcome.clone()));
        }
        Ok(outcome)
    }

    pub fn get_last_outcome(&self) -> Option<&AnswerOutcome> {
        match &self.current_phase {
            Phase::Feedback(_, outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn advance(&mut self) -> Result<()> {
        let mut round = match self.take_current_phase() {
            Phase::Feedback(round, _) => round,
            phase => {
                self.current_phase = phase;
                return Err(anyhow!("Answer the current question first"));
            }
        };
        if round.next_question() {
            self.set_current_phase(Phase::Question(round));
        } else {
            self.set_current_phase(Phase::RoundComplete(round));
        }
        Ok(())
    }

    /// Abandons the round. Answers already given stay in the lifetime score.
    pub fn exit_round(&mut self) -> Result<()> {
        match self.get_phase() {
            PhaseKind::Question | PhaseKind::Feedback => {
                self.set_current_phase(Phase::SectionSelect);
                Ok(())
            }
            _ => Err(anyhow!("There is no round to exit")),
        }
    }

    pub fn continue_studying(&mut self) -> Result<()> {
        if self.get_phase() != PhaseKind::RoundComplete {
            return Err(anyhow!("The round is not over yet"));
        }
        self.selected_sections.clear();
        self.set_current_phase(Phase::SectionSelect);
        Ok(())
    }

    /// Starts a new round on the same sections with the previous round size.
    pub fn repeat_round(&mut self) -> Result<()> {
        if self.get_phase() != PhaseKind::RoundComplete {
            return Err(anyhow!("The round is not over yet"));
        }
        self.begin_round(self.last_round_size)
    }

    pub fn get_last_round_size(&self) -> RoundSize {
        self.last_round_size
    }

    pub fn get_round_tally(&self) -> Option<Tally> {
        self.current_phase.get_round().map(Round::get_tally)
    }

    pub fn get_round_position(&self) -> Option<(usize, usize)> {
        self.current_phase.get_round().map(Round::get_position)
    }

    pub fn get_score(&self) -> ScoreRecord {
        self.score_store.load()
    }

    pub fn reset_score(&self) -> ScoreRecord {
        self.score_store.reset()
    }
}
