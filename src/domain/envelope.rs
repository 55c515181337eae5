//! Wire shapes of the voice platform's request and response envelopes.
//!
//! Only the fields needed to route a request and speak a reply are modelled;
//! everything else in the envelope is ignored on the way in.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::collections::BTreeMap;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestEnvelope {
    #[serde(default)]
    pub session: Option<Session>,
    pub request: Request,
}

impl RequestEnvelope {
    pub fn session_id(&self) -> Option<&str> {
        self.session
            .as_ref()
            .and_then(|session| session.session_id.as_deref())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub session_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum Request {
    LaunchRequest(RequestMeta),
    IntentRequest(IntentRequestBody),
    SessionEndedRequest(SessionEndedBody),
    #[serde(rename = "System.ExceptionEncountered")]
    ExceptionEncountered(ExceptionEncounteredBody),
    #[serde(other)]
    Unsupported,
}

impl Request {
    pub fn type_name(&self) -> &'static str {
        match self {
            Request::LaunchRequest(_) => "LaunchRequest",
            Request::IntentRequest(_) => "IntentRequest",
            Request::SessionEndedRequest(_) => "SessionEndedRequest",
            Request::ExceptionEncountered(_) => "System.ExceptionEncountered",
            Request::Unsupported => "Unsupported",
        }
    }

    pub fn request_id(&self) -> Option<&str> {
        match self {
            Request::LaunchRequest(meta) => meta.request_id.as_deref(),
            Request::IntentRequest(body) => body.request_id.as_deref(),
            Request::SessionEndedRequest(body) => body.request_id.as_deref(),
            Request::ExceptionEncountered(body) => body.request_id.as_deref(),
            Request::Unsupported => None,
        }
    }

    pub fn locale(&self) -> Option<&str> {
        match self {
            Request::LaunchRequest(meta) => meta.locale.as_deref(),
            Request::IntentRequest(body) => body.locale.as_deref(),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestMeta {
    pub request_id: Option<String>,
    pub locale: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentRequestBody {
    pub request_id: Option<String>,
    pub locale: Option<String>,
    pub intent: IntentPayload,
}

#[derive(Debug, Deserialize)]
pub struct IntentPayload {
    pub name: String,
    #[serde(default)]
    pub slots: BTreeMap<String, SlotPayload>,
}

#[derive(Debug, Deserialize)]
pub struct SlotPayload {
    pub value: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionEndedBody {
    pub request_id: Option<String>,
    pub reason: Option<String>,
    pub error: Option<JsonValue>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExceptionEncounteredBody {
    pub request_id: Option<String>,
    pub error: Option<JsonValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub version: String,
    #[serde(default)]
    pub session_attributes: Map<String, JsonValue>,
    pub response: ResponseBody,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_speech: Option<OutputSpeech>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card: Option<Card>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reprompt: Option<Reprompt>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub should_end_session: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OutputSpeech {
    PlainText { text: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Card {
    Simple { title: String, content: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reprompt {
    pub output_speech: OutputSpeech,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_intent_request_with_slots() {
        let raw = r#"{
            "version": "1.0",
            "session": {"sessionId": "amzn1.echo-api.session.1", "new": true},
            "request": {
                "type": "IntentRequest",
                "requestId": "req-1",
                "locale": "en-US",
                "intent": {
                    "name": "AddTodoIntent",
                    "confirmationStatus": "NONE",
                    "slots": {"todoItem": {"name": "todoItem", "value": "milk"}}
                }
            }
        }"#;

        let envelope: RequestEnvelope = serde_json::from_str(raw).unwrap();
        assert_eq!(envelope.session_id(), Some("amzn1.echo-api.session.1"));
        assert_eq!(envelope.request.request_id(), Some("req-1"));
        assert_eq!(envelope.request.locale(), Some("en-US"));
        let Request::IntentRequest(body) = envelope.request else {
            panic!("expected intent request");
        };
        assert_eq!(body.intent.name, "AddTodoIntent");
        assert_eq!(
            body.intent.slots["todoItem"].value.as_deref(),
            Some("milk")
        );
    }

    #[test]
    fn unknown_request_type_is_unsupported() {
        let raw = r#"{"request": {"type": "AudioPlayer.PlaybackStarted"}}"#;
        let envelope: RequestEnvelope = serde_json::from_str(raw).unwrap();
        assert!(matches!(envelope.request, Request::Unsupported));
        assert_eq!(envelope.session_id(), None);
        assert_eq!(envelope.request.request_id(), None);
    }

    #[test]
    fn exception_encountered_is_recognised() {
        let raw = r#"{"request": {"type": "System.ExceptionEncountered", "error": {"type": "INVALID_RESPONSE"}}}"#;
        let envelope: RequestEnvelope = serde_json::from_str(raw).unwrap();
        assert_eq!(envelope.request.type_name(), "System.ExceptionEncountered");
    }

    #[test]
    fn response_omits_absent_fields() {
        let envelope = ResponseEnvelope {
            version: "1.0".to_string(),
            session_attributes: Map::new(),
            response: ResponseBody {
                output_speech: Some(OutputSpeech::PlainText {
                    text: "Goodbye!".to_string(),
                }),
                ..ResponseBody::default()
            },
        };

        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["response"]["outputSpeech"]["type"], "PlainText");
        assert_eq!(value["response"]["outputSpeech"]["text"], "Goodbye!");
        assert!(value["response"].get("card").is_none());
        assert!(value["response"].get("shouldEndSession").is_none());
        assert_eq!(value["sessionAttributes"], serde_json::json!({}));
    }
}
