use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use serde_json::Value;

use code_fixer_agent::config::schema::{DEFAULT_HOST, DEFAULT_PORT, DEFAULT_SONARQUBE_URL};
use code_fixer_agent::health::SonarQubeProbe;
use code_fixer_agent::observability;

#[derive(Parser)]
#[command(name = "agent-cli")]
#[command(about = "Operator CLI for the Code Fixer Agent", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Query a running agent's health endpoint
    Health {
        #[arg(short, long, default_value_t = format!("http://{}:{}", DEFAULT_HOST, DEFAULT_PORT))]
        url: String,
    },
    /// Run the startup SonarQube probe once without starting the server
    Probe {
        #[arg(long, env = "SONARQUBE_URL", default_value = DEFAULT_SONARQUBE_URL)]
        sonarqube_url: String,

        /// Probe timeout in seconds.
        #[arg(long, default_value_t = 10)]
        timeout_secs: u64,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Health { url } => {
            let res = reqwest::Client::new()
                .get(format!("{}/api/health", url.trim_end_matches('/')))
                .send()
                .await?;
            print_response(res).await
        }
        Commands::Probe {
            sonarqube_url,
            timeout_secs,
        } => {
            observability::init_logging();
            let probe = SonarQubeProbe::new(sonarqube_url, observability::logger())
                .with_timeout(Duration::from_secs(timeout_secs));
            let outcome = probe.check().await;
            println!("{:?}", outcome);
            Ok(if outcome.is_connected() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}

async fn print_response(res: reqwest::Response) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: agent returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(ExitCode::FAILURE);
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(ExitCode::SUCCESS)
}
