use log::{error, warn};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::storage::Storage;


/// Cumulative accuracy across rounds and sessions.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRecord {
    pub total_correct: u32,
    pub total_attempted: u32,
    pub percentage: u32,
}

impl ScoreRecord {
    pub fn new(correct: u32, attempted: u32) -> Self {
        ScoreRecord {
            total_correct: correct,
            total_attempted: attempted,
            percentage: compute_percentage(correct, attempted),
        }
    }

    fn is_consistent(&self) -> bool {
        self.total_correct <= self.total_attempted
    }
}

impl fmt::Display for ScoreRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} ({}%)",
            self.total_correct, self.total_attempted, self.percentage
        )
    }
}

/// Rounded half away from zero, so 1/3 gives 33 and 1/2 gives 50.
pub fn compute_percentage(correct: u32, attempted: u32) -> u32 {
    if attempted == 0 {
        return 0;
    }
    let correct = u64::from(correct);
    let attempted = u64::from(attempted);
    ((200 * correct + attempted) / (2 * attempted)) as u32
}

/// Lifetime score persisted under a single key.
///
/// Storage failures never reach the caller: reads fall back to an empty record
/// and writes still return the computed record.
#[derive(Debug)]
pub struct ScoreStore<S> {
    storage: S,
    key: String,
}

impl<S: Storage> ScoreStore<S> {
    pub fn new(storage: S, key: &str) -> Self {
        ScoreStore {
            storage,
            key: key.to_owned(),
        }
    }

    pub fn load(&self) -> ScoreRecord {
        let stored = match self.storage.get(&self.key) {
            Ok(Some(stored)) => stored,
            Ok(None) => return ScoreRecord::default(),
            Err(e) => {
                error!("Error loading score: {}", e);
                return ScoreRecord::default();
            }
        };

        match serde_json::from_str::<ScoreRecord>(&stored) {
            Ok(record) if record.is_consistent() => {
                ScoreRecord::new(record.total_correct, record.total_attempted)
            }
            Ok(record) => {
                warn!("Ignoring inconsistent stored score: {:?}", record);
                ScoreRecord::default()
            }
            Err(e) => {
                warn!("Ignoring unreadable stored score: {}", e);
                ScoreRecord::default()
            }
        }
    }

    pub fn save(&self, correct: u32, attempted: u32) -> ScoreRecord {
        if correct > attempted {
            warn!(
                "Clamping score of {} correct out of {} attempted",
                correct, attempted
            );
        }
        let record = ScoreRecord::new(correct.min(attempted), attempted);
        match serde_json::to_string(&record) {
            Ok(json) => {
                if let Err(e) = self.storage.set(&self.key, &json) {
                    error!("Error saving score: {}", e);
                }
            }
            Err(e) => error!("Error serializing score: {}", e),
        }
        record
    }

    /// Adds one answered question to the lifetime score.
    pub fn record_answer(&self, is_correct: bool) -> ScoreRecord {
        let current = self.load();
        let correct = current.total_correct.saturating_add(is_correct as u32);
        let attempted = current.total_attempted.saturating_add(1);
        self.save(correct, attempted)
    }

    pub fn reset(&self) -> ScoreRecord {
        if let Err(e) = self.storage.remove(&self.key) {
            error!("Error resetting score: {}", e);
        }
        ScoreRecord::default()
    }
}
