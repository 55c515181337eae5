use crate::domain::agent_config::TodoApiConfig;
use crate::domain::error::{AppError, Result};
use crate::infrastructure::http_client::build_or_default;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::fmt;
use std::time::Duration;

pub const SECRET_HEADER: &str = "x-mirror-secret";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TodoAction {
    Add,
    Remove,
    Complete,
    Reminder,
    Youtube,
    PhotoTryout,
}

impl TodoAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            TodoAction::Add => "add",
            TodoAction::Remove => "remove",
            TodoAction::Complete => "complete",
            TodoAction::Reminder => "reminder",
            TodoAction::Youtube => "youtube",
            TodoAction::PhotoTryout => "photo_tryout",
        }
    }
}

impl fmt::Display for TodoAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize)]
struct ActionBody<'a> {
    action: &'static str,
    data: &'a JsonValue,
}

#[async_trait]
pub trait TodoApi {
    async fn post_action(&self, action: TodoAction, data: JsonValue) -> Result<()>;
}

pub struct HttpTodoApiClient {
    client: reqwest::Client,
    config: TodoApiConfig,
}

impl HttpTodoApiClient {
    pub fn new(config: TodoApiConfig) -> Self {
        Self {
            client: build_or_default(
                reqwest::Client::builder().timeout(Duration::from_secs(config.timeout_secs)),
                "todo_api",
            ),
            config,
        }
    }
}

#[async_trait]
impl TodoApi for HttpTodoApiClient {
    async fn post_action(&self, action: TodoAction, data: JsonValue) -> Result<()> {
        let body = ActionBody {
            action: action.as_str(),
            data: &data,
        };

        let mut request = self.client.post(&self.config.url).json(&body);
        if let Some(secret) = &self.config.shared_secret {
            request = request.header(SECRET_HEADER, secret);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::TodoApiError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(AppError::TodoApiError(format!(
                "API error ({}) for {}: {}",
                status, action, text
            )));
        }

        Ok(())
    }
}
