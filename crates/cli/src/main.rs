//! Concierge CLI — the main entry point.
//!
//! Commands:
//! - `ask`   — Run one agent loop invocation and print the reply
//! - `serve` — Start the HTTP gateway

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "concierge",
    about = "Concierge — a tool-using personal assistant",
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
    /// Ask the assistant a single question
    Ask {
        /// The prompt to send
        prompt: String,

        /// Extra context as a JSON object
        #[arg(short, long)]
        context: Option<String>,
    },

    /// Start the HTTP gateway server
    Serve {
        /// Override the configured port
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Ask { prompt, context } => commands::ask::run(&prompt, context.as_deref()).await?,
        Commands::Serve { port } => commands::serve::run(port).await?,
    }

    Ok(())
}
