use tokio::net::TcpListener;

use code_fixer_agent::config::{self, ConfigError};
use code_fixer_agent::health::SonarQubeProbe;
use code_fixer_agent::http::HttpServer;
use code_fixer_agent::lifecycle::{run_startup_checks, signals, Shutdown, StartupError};
use code_fixer_agent::observability::{self, logging};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_logging();
    let logger = observability::logger();

    let config = match config::load_config(std::env::args_os()) {
        Ok(config) => config,
        Err(ConfigError::Args(e)) => e.exit(),
        Err(e) => {
            logger.error(&e.to_string(), Some("main"), None);
            return Err(e.into());
        }
    };

    let address = config.bind_address();
    logger.info(&format!("Starting server on {}", address), Some("main"), None);

    let probe = SonarQubeProbe::new(config.sonarqube_url.clone(), logger);
    run_startup_checks(&probe, &logger).await?;

    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind {
            address: address.clone(),
            source,
        })?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        signals::shutdown_signal().await;
        shutdown.trigger();
    });

    HttpServer::new(config, logger)
        .run(listener, server_shutdown)
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
