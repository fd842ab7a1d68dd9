use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::game::definition::{QuizDefinition, Sources};
use crate::game::settings::Settings;
use crate::score::ScoreStore;
use crate::storage::FileStorage;

pub mod bank;
pub mod play;
pub mod score;

const BUILTIN_QUESTIONS: &str = include_str!("../../assets/questions.txt");

const LOAD_REMEDIATION: &str = "Cannot load questions. Put questions.json or questions.txt in \
     the questions directory (see --questions-dir), or run with --builtin to use the bundled \
     sample bank";

/// Everything commands need to find the question bank and the score.
#[derive(Debug)]
pub struct Environment {
    pub questions_dir: PathBuf,
    pub data_dir: Option<PathBuf>,
    pub builtin: bool,
    pub settings: Settings,
}

impl Environment {
    pub fn get_sources(&self) -> Sources {
        let sources = Sources::in_directory(&self.questions_dir, &self.settings);
        if self.builtin {
            sources.with_text_loader(|| Ok(BUILTIN_QUESTIONS.to_owned()))
        } else {
            sources
        }
    }

    pub fn load_definition(&self) -> Result<QuizDefinition> {
        QuizDefinition::load(&self.get_sources()).context(LOAD_REMEDIATION)
    }

    pub fn open_score_store(&self) -> Result<ScoreStore<FileStorage>> {
        let storage = match &self.data_dir {
            Some(directory) => FileStorage::new(directory.clone()),
            None => FileStorage::in_data_dir()?,
        };
        Ok(ScoreStore::new(storage, self.settings.score_key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn builtin_bank_is_complete() {
        let definition = QuizDefinition::from_text(BUILTIN_QUESTIONS);
        let counts: Vec<(&str, usize)> = definition
            .get_sections()
            .iter()
            .map(|s| (s.name.as_str(), s.questions.len()))
            .collect();
        assert_eq!(counts, [("Routing", 3), ("Switching", 2), ("Security", 2)]);
    }

    #[test]
    fn missing_bank_explains_how_to_fix_it() {
        let directory = TempDir::new().unwrap();
        let environment = Environment {
            questions_dir: directory.path().to_path_buf(),
            data_dir: None,
            builtin: false,
            settings: Settings::default(),
        };
        let error = environment.load_definition().unwrap_err();
        assert!(format!("{:#}", error).contains("--builtin"));
    }

    #[test]
    fn builtin_flag_supplies_questions() {
        let directory = TempDir::new().unwrap();
        let environment = Environment {
            questions_dir: directory.path().to_path_buf(),
            data_dir: Some(directory.path().join("data")),
            builtin: true,
            settings: Settings::default(),
        };
        assert_eq!(environment.load_definition().unwrap().num_questions(), 7);
    }
}
