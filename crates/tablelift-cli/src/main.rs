//! Tablelift command-line interface.
//!
//! ```bash
//! tablelift serve -H 0.0.0.0 -p 5000
//! tablelift extract invoice.png --format markdown
//! tablelift reconstruct saved-response.json
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tablelift::blocks::AnalyzeDocumentResponse;
use tablelift::render::tables_to_markdown;
use tablelift::{TableSet, TableliftConfig, TextractClient, assemble_tables, extract_tables};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tablelift", version, about = "Extract tables from scanned documents")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP upload server
    Serve {
        /// Address to bind to
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Configuration file (TOML, YAML or JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Send a local document to the recognition service and print its tables
    Extract {
        /// Image or PDF to analyze
        path: PathBuf,

        #[arg(short, long)]
        config: Option<PathBuf>,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },

    /// Rebuild tables from a saved recognition response, offline
    Reconstruct {
        /// JSON file holding an AnalyzeDocument response
        path: PathBuf,

        #[arg(short, long)]
        config: Option<PathBuf>,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Json,
    Markdown,
}

fn load_config(path: Option<&Path>) -> Result<TableliftConfig> {
    match path {
        Some(path) => TableliftConfig::load(Some(path))
            .with_context(|| format!("Failed to load configuration from {}", path.display())),
        None => TableliftConfig::load(None).context("Failed to load discovered configuration"),
    }
}

fn print_tables(tables: &TableSet, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(tables)?),
        OutputFormat::Markdown => print!("{}", tables_to_markdown(tables)),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { host, port, config } => {
            let mut config = load_config(config.as_deref())?;
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }

            let recognizer = Arc::new(TextractClient::new(&config.textract)?);
            tablelift::api::serve(config, recognizer)
                .await
                .context("API server exited with an error")?;
        }
        Commands::Extract { path, config, format } => {
            let config = load_config(config.as_deref())?;
            let document = tokio::fs::read(&path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?;

            let recognizer = TextractClient::new(&config.textract)?;
            let tables = extract_tables(&recognizer, &document, &config.reconstruction).await?;
            print_tables(&tables, format)?;
        }
        Commands::Reconstruct { path, config, format } => {
            let config = load_config(config.as_deref())?;
            let json = tokio::fs::read_to_string(&path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?;

            let response = AnalyzeDocumentResponse::from_json(&json)
                .with_context(|| format!("{} is not a recognition response", path.display()))?;
            tracing::debug!("Loaded {} blocks from {}", response.blocks.len(), path.display());

            let tables = assemble_tables(&response.blocks, &config.reconstruction)?;
            print_tables(&tables, format)?;
        }
    }

    Ok(())
}
