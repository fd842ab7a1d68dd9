use anyhow::{anyhow, Context, Result};
use log::info;
use std::fs;
use std::path::Path;

use crate::commands::{Environment, BUILTIN_QUESTIONS};
use crate::game::definition::{parse_structured, QuizDefinition, RawSection};

#[derive(Debug, Eq, PartialEq)]
pub struct ValidationReport {
    pub num_sections: usize,
    pub num_questions: usize,
    pub num_dropped_questions: usize,
}

/// Parses the text question bank and writes it in structured form.
pub fn export(environment: &Environment, destination: &Path) -> Result<QuizDefinition> {
    let definition = if environment.builtin {
        QuizDefinition::from_text(BUILTIN_QUESTIONS)
    } else {
        let source = environment
            .questions_dir
            .join(environment.settings.text_file_name);
        QuizDefinition::open_text(&source)?
    };
    if definition.get_sections().is_empty() {
        return Err(anyhow!("The question bank has no valid questions"));
    }

    fs::write(destination, definition.to_json()?)
        .with_context(|| format!("could not write {}", destination.display()))?;
    info!(
        "Exported {} questions to {}",
        definition.num_questions(),
        destination.display()
    );
    Ok(definition)
}

pub fn validate(path: &Path) -> Result<ValidationReport> {
    let json =
        fs::read_to_string(path).with_context(|| format!("could not read {}", path.display()))?;
    let raw_sections: Vec<RawSection> = serde_json::from_str(&json)
        .with_context(|| format!("{} is not a valid question bank", path.display()))?;
    let num_raw_questions: usize = raw_sections.iter().map(|s| s.questions.len()).sum();

    let definition = QuizDefinition::new(parse_structured(raw_sections));
    if definition.get_sections().is_empty() {
        return Err(anyhow!("{} has no valid questions", path.display()));
    }
    Ok(ValidationReport {
        num_sections: definition.get_sections().len(),
        num_questions: definition.num_questions(),
        num_dropped_questions: num_raw_questions - definition.num_questions(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    use crate::game::settings::Settings;

    fn environment(directory: &TempDir, builtin: bool) -> Environment {
        Environment {
            questions_dir: directory.path().to_path_buf(),
            data_dir: None,
            builtin,
            settings: Settings::default(),
        }
    }

    #[test]
    fn exports_builtin_bank() {
        let directory = TempDir::new().unwrap();
        let destination = directory.path().join("questions.json");
        export(&environment(&directory, true), &destination).unwrap();

        let report = validate(&destination).unwrap();
        assert_eq!(
            report,
            ValidationReport {
                num_sections: 3,
                num_questions: 7,
                num_dropped_questions: 0,
            }
        );
    }

    #[test]
    fn refuses_to_export_empty_bank() {
        let directory = TempDir::new().unwrap();
        fs::write(directory.path().join("questions.txt"), "Section: Empty\n;").unwrap();
        let destination = directory.path().join("questions.json");
        assert!(export(&environment(&directory, false), &destination).is_err());
        assert!(!destination.exists());
    }

    #[test]
    fn counts_dropped_questions() {
        let directory = TempDir::new().unwrap();
        let path = directory.path().join("questions.json");
        fs::write(
            &path,
            r#"[{"name": "Routing", "questions": [
                {"text": "ok", "options": ["1", "2", "3", "4"], "correctAnswer": "D"},
                {"text": "short", "options": ["1", "2"], "correctAnswer": "A"}
            ]}]"#,
        )
        .unwrap();
        let report = validate(&path).unwrap();
        assert_eq!(report.num_questions, 1);
        assert_eq!(report.num_dropped_questions, 1);
    }

    #[test]
    fn rejects_invalid_json() {
        let directory = TempDir::new().unwrap();
        let path = directory.path().join("questions.json");
        fs::write(&path, "[{\"name\": ").unwrap();
        assert!(validate(&path).is_err());
        assert!(validate(&directory.path().join("missing.json")).is_err());
    }
}
