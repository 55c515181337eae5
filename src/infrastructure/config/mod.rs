use crate::domain::agent_config::{AgentConfig, TodoApiConfig};
use crate::domain::error::Result;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use validator::Validate;

pub const ENV_PREFIX: &str = "ECHOGLASS_";
pub const CONFIG_PATH_VAR: &str = "ECHOGLASS_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "echoglass.toml";

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ServerConfig {
    #[validate(length(min = 1))]
    pub host: String,
    #[validate(range(min = 1))]
    pub port: u16,
    /// One worker keeps request handling strictly sequential.
    #[validate(range(min = 1))]
    pub workers: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3001,
            workers: 1,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct AppConfig {
    #[validate(nested)]
    pub server: ServerConfig,
    #[validate(nested)]
    pub agent: AgentConfig,
    #[validate(nested)]
    pub todo_api: TodoApiConfig,
}

pub struct ConfigService {
    figment: Figment,
}

impl ConfigService {
    /// Defaults, then the TOML file, then `ECHOGLASS_*` variables
    /// (`__` separates sections, e.g. `ECHOGLASS_AGENT__AGENT_ID`).
    pub fn new(config_path: &Path) -> Self {
        Self {
            figment: Figment::from(Serialized::defaults(AppConfig::default()))
                .merge(Toml::file(config_path))
                .merge(Env::prefixed(ENV_PREFIX).split("__")),
        }
    }

    /// Reads `.env` when present and resolves the config file path from
    /// `ECHOGLASS_CONFIG`.
    pub fn from_environment() -> Self {
        let _ = dotenvy::dotenv();
        let config_path = std::env::var(CONFIG_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));
        Self::new(&config_path)
    }

    pub fn load(&self) -> Result<AppConfig> {
        let config: AppConfig = self.figment.extract()?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::agent_config::AgentTransport;
    use crate::domain::error::AppError;
    use figment::Jail;

    #[test]
    fn defaults_load_without_file() {
        Jail::expect_with(|_jail| {
            let config = ConfigService::new(Path::new("missing.toml"))
                .load()
                .expect("defaults should load");
            assert_eq!(config.server.port, 3001);
            assert_eq!(config.server.workers, 1);
            assert_eq!(config.agent.timezone, "America/Vancouver");
            assert!(!config.todo_api.enabled);
            Ok(())
        });
    }

    #[test]
    fn file_then_env_override() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "echoglass.toml",
                r#"
                [server]
                port = 8080

                [agent]
                agent_id = "FROMFILE"
                timezone = "Europe/Paris"
                "#,
            )?;
            jail.set_env("ECHOGLASS_AGENT__AGENT_ID", "FROMENV");
            jail.set_env("ECHOGLASS_TODO_API__ENABLED", "true");

            let config = ConfigService::new(Path::new("echoglass.toml"))
                .load()
                .expect("config should load");
            assert_eq!(config.server.port, 8080);
            assert_eq!(config.agent.agent_id, "FROMENV");
            assert_eq!(config.agent.timezone, "Europe/Paris");
            assert!(config.todo_api.enabled);
            Ok(())
        });
    }

    #[test]
    fn invalid_values_fail_validation() {
        Jail::expect_with(|jail| {
            jail.set_env("ECHOGLASS_SERVER__WORKERS", "0");
            let err = ConfigService::new(Path::new("missing.toml"))
                .load()
                .unwrap_err();
            assert!(matches!(err, AppError::ValidationError(_)));
            Ok(())
        });
    }

    #[test]
    fn http_transport_is_selected_from_env() {
        Jail::expect_with(|jail| {
            jail.set_env("ECHOGLASS_AGENT__TRANSPORT", "http");
            let err = ConfigService::new(Path::new("missing.toml"))
                .load()
                .unwrap_err();
            assert!(matches!(err, AppError::ValidationError(_)));

            jail.set_env("ECHOGLASS_AGENT__ENDPOINT", "http://127.0.0.1:8787");
            let config = ConfigService::new(Path::new("missing.toml"))
                .load()
                .expect("gateway config should load");
            assert_eq!(config.agent.transport, AgentTransport::Http);
            assert_eq!(
                config.agent.endpoint.as_deref(),
                Some("http://127.0.0.1:8787")
            );
            Ok(())
        });
    }
}
