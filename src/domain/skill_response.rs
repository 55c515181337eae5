use serde_json::Map;

use crate::domain::envelope::{Card, OutputSpeech, Reprompt, ResponseBody, ResponseEnvelope};

pub const ENVELOPE_VERSION: &str = "1.0";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleCard {
    pub title: String,
    pub content: String,
}

/// What the skill says back. Built fluently, one call per element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillResponse {
    pub speech: Option<String>,
    pub card: Option<SimpleCard>,
    pub reprompt: Option<String>,
    pub should_end_session: Option<bool>,
}

impl SkillResponse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn speak(mut self, text: impl Into<String>) -> Self {
        self.speech = Some(text.into());
        self
    }

    pub fn card(mut self, title: impl Into<String>, content: impl Into<String>) -> Self {
        self.card = Some(SimpleCard {
            title: title.into(),
            content: content.into(),
        });
        self
    }

    /// Sets a re-prompt; asking always keeps the session open.
    pub fn ask(mut self, text: impl Into<String>) -> Self {
        self.reprompt = Some(text.into());
        self.should_end_session = Some(false);
        self
    }

    pub fn should_end_session(mut self, end: bool) -> Self {
        self.should_end_session = Some(end);
        self
    }

    pub fn into_envelope(self) -> ResponseEnvelope {
        ResponseEnvelope {
            version: ENVELOPE_VERSION.to_string(),
            session_attributes: Map::new(),
            response: ResponseBody {
                output_speech: self.speech.map(|text| OutputSpeech::PlainText { text }),
                card: self.card.map(|card| Card::Simple {
                    title: card.title,
                    content: card.content,
                }),
                reprompt: self.reprompt.map(|text| Reprompt {
                    output_speech: OutputSpeech::PlainText { text },
                }),
                should_end_session: self.should_end_session,
            },
        }
    }
}
