use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};

use crate::domain::error::{AppError, Result};

/// Reminder details the agent pulls out of a spoken phrase.
///
/// Every field is optional: the agent's output is only loosely constrained,
/// so missing or null fields are accepted and unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReminderFields {
    #[serde(default)]
    pub task: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
}

impl ReminderFields {
    pub fn parse(json_str: &str) -> Result<Self> {
        serde_json::from_str(json_str)
            .map_err(|err| AppError::ParseError(format!("Invalid reminder JSON: {}", err)))
    }

    /// Payload for the `reminder` action; falls back to the spoken task.
    pub fn to_event_data(&self, spoken_task: &str) -> JsonValue {
        let task = self
            .task
            .as_deref()
            .filter(|task| !task.trim().is_empty())
            .unwrap_or(spoken_task);
        json!({
            "task": task,
            "date": self.date,
            "time": self.time,
        })
    }
}
