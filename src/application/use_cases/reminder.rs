use crate::domain::agent_config::AgentConfig;
use crate::domain::error::Result;
use crate::domain::reminder::ReminderFields;
use crate::infrastructure::agent_clients::AgentClient;
use crate::infrastructure::response::{assemble_agent_text, extract_json_object, preview_text};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

const RAW_LOG_PREVIEW_CHARS: usize = 250;

#[derive(Debug, Clone, PartialEq)]
pub struct ReminderExtraction {
    /// The `{...}` span cut out of the agent's output.
    pub json: String,
    /// `None` when the span is not a valid reminder object.
    pub fields: Option<ReminderFields>,
}

pub fn build_reminder_prompt(query: &str, timezone: &str) -> String {
    format!(
        r#"
Extract reminder details from the text.
Return ONLY valid JSON (no markdown, no extra text).
Timezone: {timezone}.

Text: {query}

JSON schema:
{{
  "task": string,
  "date": string|null,          // e.g. "2026-02-02"
  "time": string|null,          // e.g. "15:00"
  "confidence": number          // 0..1
}}
"#
    )
}

pub struct ReminderUseCase {
    agent_client: Arc<dyn AgentClient + Send + Sync>,
    config: AgentConfig,
}

impl ReminderUseCase {
    pub fn new(agent_client: Arc<dyn AgentClient + Send + Sync>, config: AgentConfig) -> Self {
        Self {
            agent_client,
            config,
        }
    }

    /// Asks the agent to structure `query`. Each call opens a fresh agent
    /// session.
    pub async fn execute(&self, query: &str) -> Result<ReminderExtraction> {
        let session_id = Uuid::new_v4().to_string();
        let prompt = build_reminder_prompt(query, &self.config.timezone);

        let records = self
            .agent_client
            .invoke(&self.config, &session_id, &prompt)
            .await?;

        let text = assemble_agent_text(records)?;
        info!(
            session_id = %session_id,
            len = text.len(),
            head = %preview_text(&text, RAW_LOG_PREVIEW_CHARS),
            "agent raw output"
        );

        let json = extract_json_object(&text)?;
        info!(json = %json, "extracted reminder json");

        let fields = match ReminderFields::parse(&json) {
            Ok(fields) => Some(fields),
            Err(err) => {
                warn!(error = %err, "reminder json did not parse, skipping fields");
                None
            }
        };

        Ok(ReminderExtraction { json, fields })
    }
}
