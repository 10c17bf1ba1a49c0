// SPDX-FileCopyrightText: 2026 Sentryphish Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sentryphish - phishing detection for monitored message surfaces.
//!
//! This is the binary entry point for the Sentryphish pipeline.

use clap::{Parser, Subcommand};

mod analyze;
mod history;
mod pipeline;
mod stats;
mod watch;

/// Sentryphish - phishing detection for monitored message surfaces.
#[derive(Parser, Debug)]
#[command(name = "sentryphish", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Classify a piece of text and print the verdict.
    Analyze {
        /// The message content to analyze.
        text: String,
    },
    /// Run the message monitor until Ctrl-C.
    Watch,
    /// Print recent analysis history.
    History {
        /// Maximum number of entries to print.
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Print aggregate statistics over the analysis history.
    Stats,
    /// Manage Sentryphish configuration.
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Load and validate the configuration, reporting all errors.
    Check,
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("sentryphish={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match sentryphish_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            sentryphish_config::render_errors(&errors);
            std::process::exit(1);
        }
    };
    init_tracing(&config.agent.log_level);

    let outcome = match cli.command {
        Commands::Analyze { text } => analyze::run(&config, &text).await,
        Commands::Watch => watch::run(&config).await,
        Commands::History { limit } => history::run(&config, limit).await,
        Commands::Stats => stats::run(&config).await,
        Commands::Config {
            command: ConfigCommands::Check,
        } => {
            println!("configuration is valid (agent.name={})", config.agent.name);
            Ok(())
        }
    };

    if let Err(err) = outcome {
        tracing::error!(error = %err, "command failed");
        std::process::exit(1);
    }
}
