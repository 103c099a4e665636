use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Scenario;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub scenario: Scenario,
    pub excuse: String,
    pub created_at: DateTime<Local>,
}

impl HistoryEntry {
    pub fn new(scenario: Scenario, excuse: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            scenario,
            excuse,
            created_at: Local::now(),
        }
    }
}

/// History row as handed to the UI, with the current average rating attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryView {
    #[serde(flatten)]
    pub entry: HistoryEntry,
    pub average_rating: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub history_count: usize,
    pub favorites_count: usize,
    pub rated_excuses: usize,
    pub total_ratings: usize,
}
