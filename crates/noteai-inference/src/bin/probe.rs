//! noteai-probe: check the enrichment provider from the command line.
//!
//! Usage:
//!   noteai-probe list-models
//!   noteai-probe ping --model gemini-2.0-flash
//!   noteai-probe enrich "Meeting notes: ship the beta on Friday"

use std::process::ExitCode;

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use noteai_inference::{EnrichmentClient, EnrichmentConfig, GeminiBackend, GenerationProvider};

#[derive(Parser)]
#[command(name = "noteai-probe")]
#[command(author, version, about = "Diagnostics for the NoteAI enrichment provider")]
#[command(propagate_version = true)]
struct Cli {
    /// Override the provider base URL
    #[arg(long, env = "GEMINI_BASE_URL")]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List models visible to the API key
    ListModels {
        /// Include models that cannot generate content
        #[arg(short, long)]
        all: bool,
    },

    /// Send one prompt to one model
    Ping {
        /// Model to call (default: first candidate)
        #[arg(short, long)]
        model: Option<String>,

        /// Prompt text
        #[arg(short, long, default_value = "Reply with the single word: pong")]
        prompt: String,
    },

    /// Run the full enrichment chain on some text
    Enrich {
        /// Note content to enrich
        text: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("noteai_inference=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = EnrichmentConfig::from_env();
    if let Some(base_url) = cli.base_url {
        config = config.with_base_url(base_url);
    }
    if !config.is_configured() {
        return Err(anyhow!(
            "no API key: set GEMINI_API_KEY (or GOOGLE_GEMINI_API_KEY)"
        ));
    }

    match cli.command {
        Commands::ListModels { all } => cmd_list_models(&config, all).await,
        Commands::Ping { model, prompt } => cmd_ping(&config, model, &prompt).await,
        Commands::Enrich { text } => cmd_enrich(&config, &text).await,
    }
}

async fn cmd_list_models(config: &EnrichmentConfig, all: bool) -> anyhow::Result<()> {
    let backend = GeminiBackend::new(config)?;
    let models = backend.list_models().await.context("listing models")?;

    let mut shown = 0;
    for model in models.iter().filter(|m| all || m.supports_generate_content()) {
        let candidate = if config.candidate_models.iter().any(|c| c == model.id()) {
            "*"
        } else {
            " "
        };
        println!(
            "{} {:<40} {}",
            candidate,
            model.id(),
            model.display_name.as_deref().unwrap_or("")
        );
        shown += 1;
    }
    println!("\n{} model(s); * = in candidate chain", shown);
    Ok(())
}

async fn cmd_ping(config: &EnrichmentConfig, model: Option<String>, prompt: &str) -> anyhow::Result<()> {
    let model = model
        .or_else(|| config.candidate_models.first().cloned())
        .ok_or_else(|| anyhow!("no model given and the candidate chain is empty"))?;
    let backend = GeminiBackend::new(config)?;

    let text = backend
        .generate(&model, prompt)
        .await
        .with_context(|| format!("calling {}", model))?;
    println!("{}: {}", model, text.trim());
    Ok(())
}

async fn cmd_enrich(config: &EnrichmentConfig, text: &str) -> anyhow::Result<()> {
    let client = EnrichmentClient::gemini(config)?;
    let enrichment = client.run(text).await?;

    let output = serde_json::json!({
        "summary": enrichment.result.summary,
        "tags": enrichment.result.tags,
        "model": enrichment.model,
        "degraded": enrichment.degraded,
        "quota_limited": enrichment.quota_limited,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
