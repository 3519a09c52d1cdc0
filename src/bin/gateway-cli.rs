use clap::{Parser, Subcommand};
use serde_json::Value;

use locale_gateway::config::RedirectConfig;
use locale_gateway::redirect::RedirectEngine;

#[derive(Parser)]
#[command(name = "gateway-cli")]
#[command(about = "Management CLI for the locale gateway", long_about = None)]
struct Cli {
    /// Base URL of a running gateway.
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate the legacy redirect table for a URL, offline
    CheckUrl {
        /// Path (optionally with ?query) as a client would request it
        path: String,
    },
    /// Query related posts for a content id from a running gateway
    Related {
        id: u64,
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Check gateway health
    Status,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::CheckUrl { path } => {
            let engine = RedirectEngine::from_config(&RedirectConfig::default());
            let (path, query) = match path.split_once('?') {
                Some((path, query)) => (path, query),
                None => (path.as_str(), ""),
            };
            let decision = match engine.evaluate(path, query) {
                Some(action) => serde_json::json!({
                    "redirect": true,
                    "target": action.target,
                    "status": action.status,
                    "rule": action.rule,
                }),
                None => serde_json::json!({ "redirect": false }),
            };
            println!("{}", serde_json::to_string_pretty(&decision)?);
        }
        Commands::Related { id, limit } => {
            let client = reqwest::Client::new();
            let mut request = client.get(format!("{}/api/related/{}", cli.url, id));
            if let Some(limit) = limit {
                request = request.query(&[("limit", limit)]);
            }
            print_response(request.send().await?).await?;
        }
        Commands::Status => {
            let client = reqwest::Client::new();
            let res = client.get(format!("{}/health", cli.url)).send().await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: gateway returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
