//! # Saarthi
//!
//! Bhagavad Gita guidance engine: keyword retrieval over a fixed verse
//! corpus, plus LLM counsel grounded in the retrieved verses.
//!
//! Usage:
//!   saarthi serve                        # Start the HTTP gateway
//!   saarthi ask "I dread my exam"        # One-shot guidance to stdout
//!   saarthi match "I dread my exam"      # Retrieval only, no LLM call
//!   saarthi init                         # Write the default config file

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use saarthi_agent::{GuidanceEngine, GuidanceRequest};
use saarthi_core::SaarthiConfig;

#[derive(Parser)]
#[command(
    name = "saarthi",
    version,
    about = "Saarthi — Gita guidance engine (retrieve, augment, generate)"
)]
struct Cli {
    /// Path to a config file (default: ~/.saarthi/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP gateway
    Serve {
        /// Bind host (overrides config)
        #[arg(long)]
        host: Option<String>,
        /// Bind port (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// One-shot guidance for a problem statement
    Ask {
        /// The problem statement (remaining words are joined)
        problem: Vec<String>,
        /// Language for the counsel
        #[arg(short, long)]
        language: Option<String>,
    },
    /// Show which verses a problem statement retrieves, without an LLM call
    Match {
        /// The problem statement (remaining words are joined)
        problem: Vec<String>,
    },
    /// Write the default config to ~/.saarthi/config.toml
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let mut config = match &cli.config {
        Some(path) => SaarthiConfig::load_from(path)?,
        None => SaarthiConfig::load()?,
    };

    match cli.command {
        Command::Serve { host, port } => {
            if let Some(host) = host {
                config.gateway.host = host;
            }
            if let Some(port) = port {
                config.gateway.port = port;
            }
            let engine = Arc::new(GuidanceEngine::new(&config)?);
            tracing::info!(
                provider = engine.provider_name(),
                corpus_verses = engine.corpus().len(),
                "starting saarthi"
            );
            saarthi_gateway::run_server(&config.gateway, engine).await?;
        }

        Command::Ask { problem, language } => {
            let problem = problem.join(" ");
            if problem.trim().is_empty() {
                anyhow::bail!("problem must not be empty");
            }
            let engine = GuidanceEngine::new(&config)?;
            let request = GuidanceRequest {
                problem,
                language: language.unwrap_or_default(),
            };
            let response = engine.seek_guidance(&request).await?;

            for verse in &response.verses {
                println!("BG {} — {}", verse.citation(), verse.translation);
            }
            println!();
            println!("{}", response.guidance);
        }

        Command::Match { problem } => {
            let engine = GuidanceEngine::new(&config)?;
            for verse in engine.find_verses(&problem.join(" "))? {
                println!("BG {}", verse.citation());
                println!("  {}", verse.original_text);
                println!("  {}", verse.transliteration);
                println!("  {}", verse.translation);
            }
        }

        Command::Init => {
            config.save()?;
            println!("wrote {}", SaarthiConfig::default_path().display());
        }
    }

    Ok(())
}
