use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

pub const DEFAULT_TIMEZONE: &str = "America/Vancouver";

/// How the agent runtime is reached.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AgentTransport {
    /// SigV4-signed calls through the AWS SDK, credentials from the default
    /// provider chain.
    #[default]
    Bedrock,
    /// Unsigned HTTP gateway that answers with newline-delimited records.
    Http,
}

#[derive(Debug, Serialize, Deserialize, Clone, Validate)]
#[validate(schema(function = "validate_transport"))]
pub struct AgentConfig {
    pub transport: AgentTransport,
    #[validate(length(min = 1))]
    pub region: String,
    /// Gateway base URL for `http`; endpoint override for `bedrock`.
    #[validate(url)]
    pub endpoint: Option<String>,
    #[validate(length(min = 1))]
    pub agent_id: String,
    #[validate(length(min = 1))]
    pub agent_alias_id: String,
    /// Bearer token for the `http` transport.
    pub api_key: Option<String>,
    #[validate(length(min = 1))]
    pub timezone: String,
    #[validate(range(min = 1))]
    pub timeout_secs: u64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            transport: AgentTransport::Bedrock,
            region: "us-east-1".to_string(),
            endpoint: None,
            agent_id: "DWFOFSX0S9".to_string(),
            agent_alias_id: "RNNI7PYCRK".to_string(),
            api_key: None,
            timezone: DEFAULT_TIMEZONE.to_string(),
            timeout_secs: 120,
        }
    }
}

fn validate_transport(config: &AgentConfig) -> Result<(), ValidationError> {
    if config.transport == AgentTransport::Http && config.endpoint.is_none() {
        return Err(ValidationError::new("http_transport_requires_endpoint"));
    }
    Ok(())
}

#[derive(Debug, Serialize, Deserialize, Clone, Validate)]
pub struct TodoApiConfig {
    /// Forwarding is off unless explicitly enabled.
    pub enabled: bool,
    #[validate(url)]
    pub url: String,
    pub shared_secret: Option<String>,
    #[validate(range(min = 1))]
    pub timeout_secs: u64,
}

impl Default for TodoApiConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            url: "https://your-vercel-app.vercel.app/api/alexa".to_string(),
            shared_secret: None,
            timeout_secs: 10,
        }
    }
}
