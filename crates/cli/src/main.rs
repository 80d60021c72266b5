//! Moneta CLI — the main entry point.
//!
//! Commands:
//! - `chat`   — Interactive chat or single-message mode
//! - `search` — Run the retriever alone and inspect chunk scores
//! - `doctor` — Diagnose configuration and knowledge-base health

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "moneta",
    about = "Moneta — educational personal-finance chat assistant",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Chat with the financial advisor
    Chat {
        /// Send a single message instead of entering interactive mode
        #[arg(short, long)]
        message: Option<String>,

        /// Print the knowledge-base chunks used for each answer
        #[arg(long)]
        show_sources: bool,

        /// Print the simulation block for each answer
        #[arg(long)]
        show_calc: bool,
    },

    /// Query the knowledge base and print scored chunks
    Search {
        /// The search query
        query: String,

        /// Maximum number of chunks to keep
        #[arg(short = 'k', long, default_value_t = 3)]
        top_k: usize,
    },

    /// Diagnose configuration and knowledge-base health
    Doctor,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Chat {
            message,
            show_sources,
            show_calc,
        } => commands::chat::run(message, show_sources, show_calc).await?,
        Commands::Search { query, top_k } => commands::search::run(&query, top_k)?,
        Commands::Doctor => commands::doctor::run()?,
    }

    Ok(())
}
