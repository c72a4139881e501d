//! CLI administration tool for tinyurl.
//!
//! Talks to the configured store directly, using the same configuration,
//! gateway and service as the HTTP server.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL
//! cargo run --bin admin -- shorten https://example.com/page
//!
//! # Look up the target of a code
//! cargo run --bin admin -- resolve bf705e8
//!
//! # Print the code a URL would get, without touching the store
//! cargo run --bin admin -- code https://example.com/page
//!
//! # Check store connectivity
//! cargo run --bin admin -- store check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server: `REDIS_URL`, `STORE_BACKEND`, `CODE_LENGTH`, ...

use tinyurl::application::services::MappingService;
use tinyurl::config::{self, Config, StoreBackend};
use tinyurl::domain::entities::Code;
use tinyurl::server::build_service;
use tinyurl::utils::path::extract_code;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;

/// CLI tool for managing tinyurl.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create (or look up) the short code for a URL
    Shorten {
        /// Absolute URL to shorten
        url: String,
    },

    /// Print the target URL of a short code
    Resolve {
        /// Short code, with or without a leading slash
        code: String,
    },

    /// Print the first candidate code for a URL (offline)
    Code {
        /// URL to hash
        url: String,
    },

    /// Store operations
    Store {
        #[command(subcommand)]
        action: StoreAction,
    },
}

#[derive(Subcommand)]
enum StoreAction {
    /// Check store connectivity
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let config = config::load_from_env().context("Failed to load configuration")?;

    if config.store_backend == StoreBackend::Memory {
        println!(
            "{}",
            "Warning: STORE_BACKEND=memory, nothing will outlive this command".yellow()
        );
    }

    match cli.command {
        Commands::Code { url } => print_code(&config, &url),
        Commands::Shorten { url } => {
            let service = build_service(&config).await?;
            shorten(&service, &config, &url).await
        }
        Commands::Resolve { code } => {
            let service = build_service(&config).await?;
            resolve(&service, &code).await
        }
        Commands::Store {
            action: StoreAction::Check,
        } => store_check(&config).await,
    }
}

fn print_code(config: &Config, url: &str) -> Result<()> {
    let generator = config.code_generator()?;
    let code = generator.generate(url);

    println!("{}", "Candidate code".bright_blue().bold());
    println!();
    println!("  URL:    {}", url.cyan());
    println!(
        "  Digest: {} ({} chars)",
        generator.digest().to_string().bright_black(),
        generator.length()
    );
    println!("  Code:   {}", code.as_str().bright_yellow().bold());
    println!();

    Ok(())
}

async fn shorten(service: &MappingService, config: &Config, url: &str) -> Result<()> {
    println!("{}", "Shorten URL".bright_blue().bold());
    println!();

    let mapping = service
        .create(url)
        .await
        .with_context(|| format!("Failed to shorten {url}"))?;

    println!("  URL:  {}", mapping.target.cyan());
    println!("  Code: {}", mapping.code.as_str().bright_yellow().bold());
    if let Some(base) = &config.base_url {
        println!(
            "  Link: {}",
            format!("{}/{}", base.trim_end_matches('/'), mapping.code).green()
        );
    }
    println!();

    Ok(())
}

async fn resolve(service: &MappingService, raw: &str) -> Result<()> {
    let path = if raw.starts_with('/') {
        raw.to_string()
    } else {
        format!("/{raw}")
    };
    let code: Code =
        extract_code(&path).with_context(|| format!("'{raw}' is not a valid short code"))?;

    match service.resolve(&code).await {
        Ok(target) => {
            println!("  {} {} {}", code.as_str().bright_yellow(), "→".bright_black(), target.cyan());
            Ok(())
        }
        Err(e) if e.status().as_u16() == 404 => {
            println!("{}", format!("  No mapping for {code}").yellow());
            Ok(())
        }
        Err(e) => Err(e).context("Lookup failed"),
    }
}

async fn store_check(config: &Config) -> Result<()> {
    println!("{}", "Checking store connection...".bright_blue());

    let service = build_service(config).await?;
    service
        .check_store()
        .await
        .context("Store did not answer PING")?;

    println!("{}", "Store connection OK".green().bold());

    match config.store_backend {
        StoreBackend::Redis => println!("  Backend: redis"),
        StoreBackend::Memory => println!("  Backend: memory"),
    }
    println!("  Key prefix: {}", config.key_prefix.cyan());

    Ok(())
}
