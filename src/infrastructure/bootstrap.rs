use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::application::{ReminderUseCase, SkillDispatcher, TodoForwarder};
use crate::domain::agent_config::{AgentConfig, AgentTransport};
use crate::infrastructure::agent_clients::{AgentClient, BedrockAgentClient, HttpAgentClient};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::todo_api::HttpTodoApiClient;
use crate::interfaces::http::{add_log, LogEntry};
use crate::interfaces::state::AppState;

/// Builds the process-wide clients once and wires them into the state shared
/// by every request.
pub fn setup(config: &AppConfig) -> Arc<AppState> {
    let logs: Arc<Mutex<Vec<LogEntry>>> = Arc::new(Mutex::new(Vec::new()));

    let agent_client = build_agent_client(&config.agent);
    add_log(
        &logs,
        "INFO",
        "Agent",
        &format!(
            "Using agent {} alias {} via {:?} ({}, timezone {})",
            config.agent.agent_id,
            config.agent.agent_alias_id,
            config.agent.transport,
            config
                .agent
                .endpoint
                .as_deref()
                .unwrap_or(config.agent.region.as_str()),
            config.agent.timezone
        ),
    );

    let todo = build_todo_forwarder(config, &logs);
    let reminder = ReminderUseCase::new(agent_client, config.agent.clone());

    Arc::new(AppState::new(SkillDispatcher::new(reminder, todo), logs))
}

fn build_agent_client(config: &AgentConfig) -> Arc<dyn AgentClient + Send + Sync> {
    match config.transport {
        AgentTransport::Bedrock => Arc::new(BedrockAgentClient::new(config)),
        AgentTransport::Http => Arc::new(HttpAgentClient::new(Duration::from_secs(
            config.timeout_secs,
        ))),
    }
}

fn build_todo_forwarder(config: &AppConfig, logs: &Arc<Mutex<Vec<LogEntry>>>) -> TodoForwarder {
    if !config.todo_api.enabled {
        add_log(logs, "INFO", "TodoApi", "Todo forwarding disabled");
        return TodoForwarder::disabled();
    }

    if config.todo_api.shared_secret.is_none() {
        add_log(
            logs,
            "WARN",
            "TodoApi",
            "Todo forwarding enabled without a shared secret",
        );
    }
    add_log(
        logs,
        "INFO",
        "TodoApi",
        &format!("Forwarding todo actions to {}", config.todo_api.url),
    );
    TodoForwarder::new(Arc::new(HttpTodoApiClient::new(config.todo_api.clone())))
}
