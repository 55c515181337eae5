use super::{AgentClient, StreamChunk, StreamRecord};
use crate::domain::agent_config::AgentConfig;
use crate::domain::error::{AppError, Result};
use async_trait::async_trait;
use aws_config::timeout::TimeoutConfig;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_bedrockagentruntime::error::DisplayErrorContext;
use aws_sdk_bedrockagentruntime::primitives::Blob;
use aws_sdk_bedrockagentruntime::types::ResponseStream;
use aws_sdk_bedrockagentruntime::Client;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::debug;

/// Invokes a Bedrock agent alias with SigV4-signed requests.
///
/// The SDK client is built on first use so that credential and region
/// resolution happen inside the runtime, not during bootstrap.
pub struct BedrockAgentClient {
    region: String,
    endpoint: Option<String>,
    timeout: Duration,
    client: OnceCell<Client>,
}

impl BedrockAgentClient {
    pub fn new(config: &AgentConfig) -> Self {
        Self {
            region: config.region.clone(),
            endpoint: config.endpoint.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
            client: OnceCell::new(),
        }
    }

    async fn client(&self) -> &Client {
        self.client
            .get_or_init(|| async {
                let mut loader = aws_config::defaults(BehaviorVersion::latest())
                    .region(Region::new(self.region.clone()))
                    .timeout_config(
                        TimeoutConfig::builder()
                            .operation_timeout(self.timeout)
                            .build(),
                    );
                if let Some(endpoint) = &self.endpoint {
                    loader = loader.endpoint_url(endpoint);
                }
                Client::new(&loader.load().await)
            })
            .await
    }
}

/// Maps one completion event onto a stream record. Trace, return-control and
/// file events carry no text.
fn record_from_event(event: ResponseStream) -> StreamRecord {
    match event {
        ResponseStream::Chunk(part) => StreamRecord {
            chunk: Some(StreamChunk {
                bytes: part.bytes.map(Blob::into_inner),
            }),
            error: None,
        },
        _ => StreamRecord::default(),
    }
}

#[async_trait]
impl AgentClient for BedrockAgentClient {
    async fn invoke(
        &self,
        config: &AgentConfig,
        session_id: &str,
        input_text: &str,
    ) -> Result<Vec<StreamRecord>> {
        let mut output = self
            .client()
            .await
            .invoke_agent()
            .agent_id(&config.agent_id)
            .agent_alias_id(&config.agent_alias_id)
            .session_id(session_id)
            .input_text(input_text)
            .enable_trace(false)
            .send()
            .await
            .map_err(|e| {
                AppError::AgentError(format!("Request failed: {}", DisplayErrorContext(&e)))
            })?;

        // Errors raised mid-stream become an error record so the assembler
        // fails on them in order.
        let mut records = Vec::new();
        loop {
            match output.completion.recv().await {
                Ok(Some(event)) => records.push(record_from_event(event)),
                Ok(None) => break,
                Err(e) => {
                    records.push(StreamRecord::error(DisplayErrorContext(&e).to_string()));
                    break;
                }
            }
        }
        debug!(session_id, records = records.len(), "agent completion received");
        Ok(records)
    }
}
