use clap::Parser;
use colored::*;
use dotenvy::dotenv;
use log::LevelFilter;
use std::error::Error;

// Modules used by the CLI
mod app;
mod cli;
mod images;
mod logging;
mod output;
mod session;

use crate::cli::Args;
use crate::logging::{log_error, log_info};
use crate::output::print_usage_instructions;
use mealroast_core::{AnalysisClient, GatewayConfig};
use mealroast_journal::JournalStore;

/// Main function - dispatches to one-shot analysis, the interactive session,
/// or the history browser
#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load environment variables first so they can feed the configuration
    dotenv().ok();

    // Load gateway configuration (defaults, config file, environment)
    let config = GatewayConfig::load();

    // Get log level from config or use default
    let log_level = config
        .log_level
        .as_deref()
        .map(|level| match level.to_lowercase().as_str() {
            "trace" => LevelFilter::Trace,
            "debug" => LevelFilter::Debug,
            "info" => LevelFilter::Info,
            "warn" => LevelFilter::Warn,
            "error" => LevelFilter::Error,
            _ => LevelFilter::Info,
        })
        .unwrap_or(LevelFilter::Info);

    // Initialize logger with configured log level
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(log_level.to_string()),
    )
    .init();

    // Parse command-line arguments
    let args = Args::parse();

    // The journal loads once at startup; absent or corrupt files start empty
    let mut journal = match JournalStore::open_default() {
        Ok(journal) => journal,
        Err(e) => {
            log_error(&format!("Failed to locate the journal: {}", e));
            eprintln!("{}", format!("Error opening the journal: {}", e).red());
            return Err(e.into());
        }
    };
    log_info(&format!("Journal loaded with {} entries", journal.len()));

    // History browsing needs no API client
    if args.history || args.day.is_some() {
        if let Err(e) = app::run_history(&journal, args.day) {
            log_error(&format!("Error browsing history: {}", e));
            eprintln!("{}", format!("History browsing failed: {}", e).red());
        }
        return Ok(());
    }

    if args.interactive || !args.images.is_empty() {
        // Initialize the analysis client; a missing API key fails fast here
        let client = match AnalysisClient::new(config) {
            Ok(client) => client,
            Err(e) => {
                log_error(&format!("Failed to initialize the analysis client: {}", e));
                eprintln!("{}", format!("Error initializing the analysis client: {}", e).red());
                return Err(e.into());
            }
        };

        if args.interactive {
            if let Err(e) = app::run_interactive(&client, &mut journal).await {
                log_error(&format!("Error in interactive session: {}", e));
                eprintln!("{}", format!("Interactive session failed: {}", e).red());
            }
        } else if let Err(e) = app::run_one_shot(&args, &client, &mut journal).await {
            log_error(&format!("Error processing photos: {}", e));
            // Error is already printed in run_one_shot
        }
    } else {
        // No photos and no mode selected, show usage
        print_usage_instructions();
    }

    Ok(())
}
