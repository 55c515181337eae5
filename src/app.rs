use tracing_subscriber::EnvFilter;

use crate::domain::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::ConfigService;
use crate::interfaces::http::{add_log, start_server};

pub async fn run() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let config = ConfigService::from_environment().load()?;
    let state = bootstrap::setup(&config);

    let server = start_server(state.clone(), &config.server)?;
    add_log(
        &state.logs,
        "INFO",
        "System",
        &format!(
            "Skill endpoint listening on {}:{} ({} worker(s))",
            config.server.host, config.server.port, config.server.workers
        ),
    );

    server.await?;
    Ok(())
}
