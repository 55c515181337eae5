pub mod bedrock;
pub mod http;

use crate::domain::agent_config::AgentConfig;
use crate::domain::error::{AppError, Result};
use async_trait::async_trait;
use base64::Engine as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value as JsonValue;

pub use bedrock::BedrockAgentClient;
pub use http::HttpAgentClient;

/// One record of an agent's streamed completion.
///
/// A record may carry a chunk of output bytes, an error marker, or neither
/// (trace and metadata records are skipped by the assembler).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StreamRecord {
    #[serde(default)]
    pub chunk: Option<StreamChunk>,
    /// Present whenever the record has an `error` key, even `null`.
    #[serde(default, deserialize_with = "deserialize_present")]
    pub error: Option<JsonValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StreamChunk {
    #[serde(default, deserialize_with = "deserialize_base64")]
    pub bytes: Option<Vec<u8>>,
}

impl StreamRecord {
    pub fn bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            chunk: Some(StreamChunk {
                bytes: Some(bytes.into()),
            }),
            error: None,
        }
    }

    pub fn error(value: impl Into<JsonValue>) -> Self {
        Self {
            chunk: None,
            error: Some(value.into()),
        }
    }
}

fn deserialize_present<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<JsonValue>, D::Error>
where
    D: Deserializer<'de>,
{
    JsonValue::deserialize(deserializer).map(Some)
}

fn deserialize_base64<'de, D>(deserializer: D) -> std::result::Result<Option<Vec<u8>>, D::Error>
where
    D: Deserializer<'de>,
{
    let encoded: Option<String> = Option::deserialize(deserializer)?;
    encoded
        .map(|value| {
            base64::engine::general_purpose::STANDARD
                .decode(value.as_bytes())
                .map_err(serde::de::Error::custom)
        })
        .transpose()
}

/// Splits a newline-delimited completion body into records, keeping order.
pub fn parse_stream_records(body: &str) -> Result<Vec<StreamRecord>> {
    body.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            serde_json::from_str::<StreamRecord>(line).map_err(|e| {
                AppError::ParseError(format!(
                    "Invalid stream record on line {}: {}",
                    index + 1,
                    e
                ))
            })
        })
        .collect()
}

#[async_trait]
pub trait AgentClient {
    /// Sends `input_text` to the configured agent alias and returns the
    /// completion stream records in arrival order.
    async fn invoke(
        &self,
        config: &AgentConfig,
        session_id: &str,
        input_text: &str,
    ) -> Result<Vec<StreamRecord>>;
}
