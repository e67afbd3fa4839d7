//! Configuration schema definitions.
//!
//! Every field can be given as a CLI flag or through the environment
//! variable named next to it. Flags win over the environment.

use clap::Parser;

/// Default base URL of the SonarQube server.
pub const DEFAULT_SONARQUBE_URL: &str = "http://localhost:9000";

/// Default interface the HTTP server binds to.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default port the HTTP server listens on.
pub const DEFAULT_PORT: u16 = 8000;

/// Root configuration for the agent.
#[derive(Debug, Clone, Parser, PartialEq, Eq)]
#[command(name = "code-fixer-agent", version)]
#[command(about = "AI-powered code fixing agent integrated with SonarQube", long_about = None)]
pub struct AppConfig {
    /// Base URL of the SonarQube server (e.g., "http://localhost:9000").
    #[arg(long, env = "SONARQUBE_URL", default_value = DEFAULT_SONARQUBE_URL)]
    pub sonarqube_url: String,

    /// Host or IP address to bind the HTTP server to.
    #[arg(long, env = "HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Port to bind the HTTP server to.
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,
}

impl AppConfig {
    /// Address the listener binds to, in `host:port` form.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            sonarqube_url: DEFAULT_SONARQUBE_URL.to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}
