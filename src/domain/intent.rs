use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value as JsonValue;

use crate::domain::envelope::{Request, RequestEnvelope};
use crate::domain::error::{AppError, Result};

pub const TODO_ITEM_SLOT: &str = "todoItem";
pub const TASK_SLOT: &str = "task";

/// Every intent the skill's interaction model declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Testing,
    Help,
    Cancel,
    Stop,
    Fallback,
    AddTodo,
    RemoveTodo,
    CompleteTodo,
    Reminder,
    Youtube,
    PhotoTryOut,
    VideoTryOut,
    Unknown(String),
}

impl Intent {
    pub fn from_name(name: &str) -> Self {
        match name {
            "TestingIntent" => Intent::Testing,
            "AMAZON.HelpIntent" => Intent::Help,
            "AMAZON.CancelIntent" => Intent::Cancel,
            "AMAZON.StopIntent" => Intent::Stop,
            "AMAZON.FallbackIntent" => Intent::Fallback,
            "AddTodoIntent" => Intent::AddTodo,
            "RemoveTodoIntent" => Intent::RemoveTodo,
            "CompleteTodoIntent" => Intent::CompleteTodo,
            "ReminderIntent" => Intent::Reminder,
            "YoutubeIntent" => Intent::Youtube,
            "PhotoTryOutIntent" => Intent::PhotoTryOut,
            "VideoTryOutIntent" => Intent::VideoTryOut,
            other => Intent::Unknown(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Intent::Testing => "TestingIntent",
            Intent::Help => "AMAZON.HelpIntent",
            Intent::Cancel => "AMAZON.CancelIntent",
            Intent::Stop => "AMAZON.StopIntent",
            Intent::Fallback => "AMAZON.FallbackIntent",
            Intent::AddTodo => "AddTodoIntent",
            Intent::RemoveTodo => "RemoveTodoIntent",
            Intent::CompleteTodo => "CompleteTodoIntent",
            Intent::Reminder => "ReminderIntent",
            Intent::Youtube => "YoutubeIntent",
            Intent::PhotoTryOut => "PhotoTryOutIntent",
            Intent::VideoTryOut => "VideoTryOutIntent",
            Intent::Unknown(name) => name,
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Slot name to spoken value. A slot can be declared but left unfilled.
pub type Slots = BTreeMap<String, Option<String>>;

#[derive(Debug, Clone, PartialEq)]
pub struct IntentRequest {
    pub intent: Intent,
    pub slots: Slots,
}

impl IntentRequest {
    pub fn new(intent: Intent) -> Self {
        Self {
            intent,
            slots: Slots::new(),
        }
    }

    pub fn with_slot(mut self, name: &str, value: &str) -> Self {
        self.slots.insert(name.to_string(), Some(value.to_string()));
        self
    }

    pub fn require_slot(&self, name: &str) -> Result<&str> {
        self.slots
            .get(name)
            .and_then(|value| value.as_deref())
            .ok_or_else(|| AppError::MissingSlot(format!("{} on {}", name, self.intent)))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SkillRequest {
    Launch,
    Intent(IntentRequest),
    SessionEnded {
        reason: Option<String>,
        error: Option<JsonValue>,
    },
    ExceptionEncountered {
        error: Option<JsonValue>,
    },
    Unsupported,
}

impl SkillRequest {
    pub fn kind(&self) -> &'static str {
        match self {
            SkillRequest::Launch => "LaunchRequest",
            SkillRequest::Intent(_) => "IntentRequest",
            SkillRequest::SessionEnded { .. } => "SessionEndedRequest",
            SkillRequest::ExceptionEncountered { .. } => "System.ExceptionEncountered",
            SkillRequest::Unsupported => "Unsupported",
        }
    }
}

impl From<RequestEnvelope> for SkillRequest {
    fn from(envelope: RequestEnvelope) -> Self {
        match envelope.request {
            Request::LaunchRequest(_) => SkillRequest::Launch,
            Request::IntentRequest(body) => {
                let slots = body
                    .intent
                    .slots
                    .into_iter()
                    .map(|(name, slot)| (name, slot.value))
                    .collect();
                SkillRequest::Intent(IntentRequest {
                    intent: Intent::from_name(&body.intent.name),
                    slots,
                })
            }
            Request::SessionEndedRequest(body) => SkillRequest::SessionEnded {
                reason: body.reason,
                error: body.error,
            },
            Request::ExceptionEncountered(body) => {
                SkillRequest::ExceptionEncountered { error: body.error }
            }
            Request::Unsupported => SkillRequest::Unsupported,
        }
    }
}
