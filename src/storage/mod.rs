use std::io;
use thiserror::Error;

mod file;
#[cfg(test)]
pub mod mock;

pub use file::FileStorage;

/// Errors surfaced by key-value storage backends.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("storage I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Durable key-value store scoped to the current user.
pub trait Storage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
