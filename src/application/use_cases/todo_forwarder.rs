use crate::infrastructure::todo_api::{TodoAction, TodoApi};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Hands intent side effects to the to-do service without holding up the
/// spoken reply.
#[derive(Clone)]
pub struct TodoForwarder {
    api: Option<Arc<dyn TodoApi + Send + Sync>>,
}

impl TodoForwarder {
    pub fn new(api: Arc<dyn TodoApi + Send + Sync>) -> Self {
        Self { api: Some(api) }
    }

    pub fn disabled() -> Self {
        Self { api: None }
    }

    /// Spawns the POST and returns immediately. Failures are only logged.
    pub fn forward(&self, action: TodoAction, data: JsonValue) -> Option<JoinHandle<()>> {
        let Some(api) = self.api.clone() else {
            debug!(action = %action, "todo forwarding disabled");
            return None;
        };

        Some(tokio::spawn(async move {
            match api.post_action(action, data).await {
                Ok(()) => info!(action = %action, "todo action forwarded"),
                Err(err) => warn!(action = %action, error = %err, "todo action failed"),
            }
        }))
    }
}
