use anyhow::Result;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::game::settings::Settings;

pub type TextLoader = Box<dyn Fn() -> Result<String>>;

/// Where a question bank may come from, in priority order: structured
/// document, injected text loader, then the raw text file.
pub struct Sources {
    pub structured_path: PathBuf,
    pub text_loader: Option<TextLoader>,
    pub text_path: PathBuf,
}

impl Sources {
    pub fn in_directory(directory: &Path, settings: &Settings) -> Self {
        Sources {
            structured_path: directory.join(settings.structured_file_name),
            text_loader: None,
            text_path: directory.join(settings.text_file_name),
        }
    }

    pub fn with_text_loader<F>(mut self, text_loader: F) -> Self
    where
        F: Fn() -> Result<String> + 'static,
    {
        self.text_loader = Some(Box::new(text_loader));
        self
    }
}

impl fmt::Debug for Sources {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sources")
            .field("structured_path", &self.structured_path)
            .field("text_loader", &self.text_loader.is_some())
            .field("text_path", &self.text_path)
            .finish()
    }
}
