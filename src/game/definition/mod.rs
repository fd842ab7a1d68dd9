use anyhow::{anyhow, Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use std::fs;
use std::path::Path;

pub mod parser;
pub mod question;
mod source;

pub use question::{Letter, Question, RawQuestion};
pub use source::Sources;


#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Section {
    pub name: String,
    pub questions: Vec<Question>,
}

/// Section as it appears in a structured question bank, before validation.
#[derive(Clone, Debug, Deserialize)]
pub struct RawSection {
    pub name: String,
    #[serde(default)]
    pub questions: Vec<RawQuestion>,
}

/// Converts an already structured question bank, dropping entries that do not
/// hold four options and a valid answer letter.
pub fn parse_structured(raw_sections: Vec<RawSection>) -> Vec<Section> {
    let mut sections: Vec<Section> = Vec::new();
    for raw_section in raw_sections {
        let name = raw_section.name.trim().to_owned();
        let questions: Vec<Question> = raw_section
            .questions
            .into_iter()
            .filter_map(|raw_question| {
                let text = raw_question.text.clone();
                match Question::try_from(raw_question) {
                    Ok(question) => Some(Question {
                        section: name.clone(),
                        ..question
                    }),
                    Err(e) => {
                        warn!("Skipping question `{}` in `{}`: {:#}", text, name, e);
                        None
                    }
                }
            })
            .collect();

        if questions.is_empty() {
            warn!("Dropping section `{}`: no valid questions", name);
            continue;
        }
        match sections.iter_mut().find(|s| s.name == name) {
            Some(existing) => existing.questions.extend(questions),
            None => sections.push(Section { name, questions }),
        }
    }
    sections
}

#[derive(Clone, Debug, Default)]
pub struct QuizDefinition {
    sections: Vec<Section>,
}

impl QuizDefinition {
    pub fn new(sections: Vec<Section>) -> QuizDefinition {
        QuizDefinition { sections }
    }

    pub fn from_text(text: &str) -> QuizDefinition {
        QuizDefinition::new(parser::parse_text(text))
    }

    pub fn from_json(json: &str) -> Result<QuizDefinition> {
        let raw_sections: Vec<RawSection> =
            serde_json::from_str(json).context("invalid structured question bank")?;
        Ok(QuizDefinition::new(parse_structured(raw_sections)))
    }

    pub fn open_text(path: &Path) -> Result<QuizDefinition> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("could not read {}", path.display()))?;
        Ok(QuizDefinition::from_text(&text))
    }

    pub fn open_structured(path: &Path) -> Result<QuizDefinition> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("could not read {}", path.display()))?;
        QuizDefinition::from_json(&json).with_context(|| format!("in {}", path.display()))
    }

    /// Tries every source in priority order, the first one that loads wins.
    pub fn load(sources: &Sources) -> Result<QuizDefinition> {
        match QuizDefinition::open_structured(&sources.structured_path) {
            Ok(definition) => {
                info!(
                    "Loaded {} sections from {}",
                    definition.sections.len(),
                    sources.structured_path.display()
                );
                return Ok(definition);
            }
            Err(e) => warn!("Falling back to text question bank: {:#}", e),
        }

        if let Some(text_loader) = &sources.text_loader {
            match text_loader() {
                Ok(text) => return Ok(QuizDefinition::from_text(&text)),
                Err(e) => warn!("Injected question loader failed: {:#}", e),
            }
        }

        QuizDefinition::open_text(&sources.text_path).map_err(|e| {
            anyhow!(
                "no question bank could be loaded (tried {} and {}): {:#}",
                sources.structured_path.display(),
                sources.text_path.display(),
                e
            )
        })
    }

    pub fn get_sections(&self) -> &Vec<Section> {
        &self.sections
    }

    pub fn num_questions(&self) -> usize {
        self.sections.iter().map(|s| s.questions.len()).sum()
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.sections).context("could not serialize question bank")
    }
}
