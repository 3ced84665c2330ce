use clap::{Parser, Subcommand};
use std::process::ExitCode;

use crate::infra::config::Config;
use crate::tools::today;

#[derive(Parser)]
#[command(name = "calendar-mcp-admin")]
#[command(about = "Calendar MCP Gateway - Admin CLI")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Health check the service
    Health {
        /// Service URL to check
        #[arg(short, long, default_value = "http://localhost:8080")]
        url: String,
    },
    /// Validate configuration
    Config {
        /// Validate config without starting service
        #[arg(long)]
        validate: bool,
    },
    /// Show service status and exposed tools
    Status {
        /// Service URL to check
        #[arg(short, long, default_value = "http://localhost:8080")]
        url: String,
    },
    /// Fetch the next 24 hours of events using the local configuration
    Today,
}

pub async fn run() -> ExitCode {
    let cli = Cli::parse();

    run_commands(cli.command).await
}

pub async fn run_commands(command: Commands) -> ExitCode {
    match command {
        Commands::Health { url } => match health_check(&url).await {
            Ok(_) => {
                println!("✅ Service is healthy");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("❌ Health check failed: {}", e);
                ExitCode::FAILURE
            }
        },
        Commands::Config { validate } => match validate_config(validate) {
            Ok(_) => {
                println!("✅ Configuration is valid");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("❌ Configuration validation failed: {}", e);
                ExitCode::FAILURE
            }
        },
        Commands::Status { url } => match show_status(&url).await {
            Ok(_) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("❌ Status check failed: {}", e);
                ExitCode::FAILURE
            }
        },
        Commands::Today => match today_events().await {
            Ok(text) => {
                println!("📅 {}", text);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("❌ Calendar request failed: {}", e);
                ExitCode::FAILURE
            }
        },
    }
}

async fn health_check(url: &str) -> Result<(), Box<dyn std::error::Error>> {
    let client = reqwest::Client::new();
    let response = client
        .get(format!("{}/health", url))
        .timeout(std::time::Duration::from_millis(500))
        .send()
        .await?;

    if response.status().is_success() {
        Ok(())
    } else {
        Err(format!("HTTP {}", response.status()).into())
    }
}

const KEY_VAR: &str = "GOOGLE_SERVICE_ACCOUNT_KEY";
const KEY_FILE_VAR: &str = "GOOGLE_SERVICE_ACCOUNT_KEY_FILE";

/// With `strict`, credentials and the impersonated user must also be present.
fn validate_config(strict: bool) -> Result<Config, Box<dyn std::error::Error>> {
    let config = Config::from_env_and_toml()?;
    config.validate()?;

    if strict {
        if !config.google.has_key() {
            return Err(format!("no service account key (set {KEY_VAR} or {KEY_FILE_VAR})").into());
        }
        if config.google.user_email.is_none() {
            return Err("GOOGLE_CALENDAR_USER_EMAIL is not set".into());
        }
    }

    Ok(config)
}

async fn show_status(url: &str) -> Result<(), Box<dyn std::error::Error>> {
    let client = reqwest::Client::new();

    let health_response = client
        .get(format!("{}/health", url))
        .timeout(std::time::Duration::from_secs(5))
        .send()
        .await?;

    println!(
        "🏥 Health Status: {}",
        if health_response.status().is_success() {
            "✅ Healthy"
        } else {
            "❌ Unhealthy"
        }
    );

    let tools_response = client
        .get(format!("{}/mcp/tools", url))
        .timeout(std::time::Duration::from_millis(500))
        .send()
        .await;

    match tools_response {
        Ok(resp) if resp.status().is_success() => {
            let body: serde_json::Value = resp.json().await.unwrap_or_default();
            let names: Vec<&str> = body["tools"]
                .as_array()
                .map(|tools| tools.iter().filter_map(|t| t["name"].as_str()).collect())
                .unwrap_or_default();
            println!("🔧 Tools: ✅ {} available ({})", names.len(), names.join(", "));
        }
        Ok(resp) => {
            println!("🔧 Tools: ❌ HTTP {}", resp.status());
        }
        Err(_) => {
            println!("🔧 Tools: ❌ Unavailable");
        }
    }

    println!("\n📋 Configuration:");
    match Config::from_env_and_toml() {
        Ok(cfg) => {
            println!("  Mode: {}", cfg.mode);
            println!("  Port: {}", cfg.port);
            println!("  Calendar API: {}", cfg.google.base_url());
            println!(
                "  Credentials: {}",
                if cfg.google.has_key() { "present" } else { "missing" }
            );
            println!(
                "  Calendar User: {}",
                cfg.google.user_email.as_deref().unwrap_or("Not configured")
            );
        }
        Err(e) => println!("  ❌ {}", e),
    }

    Ok(())
}

async fn today_events() -> Result<String, Box<dyn std::error::Error>> {
    let config = validate_config(true)?;
    let dispatcher = crate::infra::boot::build_dispatcher(&config);
    let result = dispatcher
        .call_tool(today::NAME, &serde_json::Value::Null)
        .await?;
    Ok(result.as_text())
}
