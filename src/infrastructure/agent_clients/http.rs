use super::{parse_stream_records, AgentClient, StreamRecord};
use crate::domain::agent_config::AgentConfig;
use crate::domain::error::{AppError, Result};
use crate::infrastructure::http_client::build_or_default;
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use url::Url;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InvokeAgentBody<'a> {
    input_text: &'a str,
    enable_trace: bool,
}

/// Invokes an agent alias over HTTP and reads its newline-delimited
/// completion records.
pub struct HttpAgentClient {
    client: reqwest::Client,
}

impl HttpAgentClient {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: build_or_default(
                reqwest::Client::builder().timeout(timeout),
                "agent",
            ),
        }
    }

    fn invoke_url(config: &AgentConfig, session_id: &str) -> Result<Url> {
        let endpoint = config
            .endpoint
            .as_deref()
            .ok_or_else(|| AppError::AgentError("No agent endpoint configured".to_string()))?;
        let base_url = endpoint.trim_end_matches('/');
        let raw = format!(
            "{}/agents/{}/agentAliases/{}/sessions/{}/text",
            base_url, config.agent_id, config.agent_alias_id, session_id
        );
        Url::parse(&raw)
            .map_err(|e| AppError::AgentError(format!("Invalid agent endpoint {}: {}", raw, e)))
    }
}

#[async_trait]
impl AgentClient for HttpAgentClient {
    async fn invoke(
        &self,
        config: &AgentConfig,
        session_id: &str,
        input_text: &str,
    ) -> Result<Vec<StreamRecord>> {
        let url = Self::invoke_url(config, session_id)?;
        let body = InvokeAgentBody {
            input_text,
            enable_trace: false,
        };

        let mut request = self.client.post(url).json(&body);
        if let Some(api_key) = &config.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::AgentError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(AppError::AgentError(format!(
                "API error ({}): {}",
                status, text
            )));
        }

        let text = response
            .text()
            .await
            .map_err(|e| AppError::AgentError(format!("Failed to read completion: {}", e)))?;

        parse_stream_records(&text)
    }
}
