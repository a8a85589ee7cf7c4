use anyhow::Context;
use veriform_core::{Environment, LoggingConfig};

/// 配置文件路径，可通过 VERIFORM_CONFIG 覆盖
const DEFAULT_CONFIG_PATH: &str = "application.toml";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path =
        std::env::var("VERIFORM_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

    let env = Environment::load(&config_path)
        .with_context(|| format!("Failed to load configuration from {}", config_path))?;

    LoggingConfig::from_environment(&env)
        .init()
        .context("Failed to initialize logging")?;

    tracing::info!(config = %config_path, "Starting Veriform");

    veriform_web::run(&env).await.context("Server terminated with an error")?;
    Ok(())
}
