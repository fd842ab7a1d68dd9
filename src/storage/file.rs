use anyhow::{Context, Result};
use directories_next::BaseDirs;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::storage::{Storage, StorageError};

const APP_DIRECTORY: &str = "quiz-trainer";

pub fn get_data_dir() -> Result<PathBuf> {
    let mut dir = BaseDirs::new()
        .context("could not locate system directories")?
        .data_dir()
        .to_path_buf();
    dir.push(APP_DIRECTORY);
    Ok(dir)
}

/// Stores every key as its own file inside a directory.
#[derive(Clone, Debug)]
pub struct FileStorage {
    directory: PathBuf,
}

impl FileStorage {
    pub fn new(directory: PathBuf) -> Self {
        FileStorage { directory }
    }

    pub fn in_data_dir() -> Result<Self> {
        Ok(FileStorage::new(get_data_dir()?))
    }

    fn key_to_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        let is_valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !is_valid {
            return Err(StorageError::Unavailable(format!("invalid key `{}`", key)));
        }
        Ok(self.directory.join(format!("{}.json", key)))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.key_to_path(key)?) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.key_to_path(key)?;
        fs::create_dir_all(&self.directory)?;
        fs::write(path, value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.key_to_path(key)?) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_key_reads_as_none() {
        let directory = TempDir::new().unwrap();
        let storage = FileStorage::new(directory.path().to_path_buf());
        assert_eq!(storage.get("score").unwrap(), None);
    }

    #[test]
    fn stores_and_removes_values() {
        let directory = TempDir::new().unwrap();
        let storage = FileStorage::new(directory.path().join("nested"));
        storage.set("score", "{}").unwrap();
        assert_eq!(storage.get("score").unwrap().as_deref(), Some("{}"));
        assert!(directory.path().join("nested").join("score.json").exists());

        storage.remove("score").unwrap();
        assert_eq!(storage.get("score").unwrap(), None);
        storage.remove("score").unwrap();
    }

    #[test]
    fn rejects_keys_that_escape_directory() {
        let directory = TempDir::new().unwrap();
        let storage = FileStorage::new(directory.path().to_path_buf());
        assert!(storage.set("../score", "{}").is_err());
        assert!(storage.get("").is_err());
    }
}
