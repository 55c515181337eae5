pub mod agent_config;
pub mod envelope;
pub mod error;
pub mod intent;
pub mod reminder;
pub mod skill_response;
