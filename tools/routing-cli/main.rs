use campaign_routing::prelude::*;
use clap::{Parser, Subcommand};
use std::fs;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Checks and normalizes campaign routing documents
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse and validate a routing document, then print a summary
    Check {
        /// Path to the routing JSON document
        path: String,
    },
    /// Print the canonical form of a routing document
    Normalize {
        /// Path to the routing JSON document
        path: String,
        /// Print on a single line
        #[arg(short, long)]
        compact: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Check { path } => run_check(&path),
        Command::Normalize { path, compact } => run_normalize(&path, compact),
    }
}

fn load(path: &str) -> CampaignRouting {
    let json = fs::read_to_string(path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to read '{}': {}", path, e)));
    parse(&json).unwrap_or_else(|e| exit_with_error(&format!("Invalid routing document: {}", e)))
}

fn run_check(path: &str) {
    let start = Instant::now();
    let routing = load(path);
    let duration = start.elapsed();

    let endpoints: usize = routing.states().map(|s| s.endpoints().count()).sum();

    println!("Campaign '{}' is valid.", routing.campaign_id());
    println!("\n--- Routing Summary ---");
    println!("Channels:        {}", routing.channels().len());
    println!("Routing Blocks:  {}", routing.routing_blocks().len());
    println!("Conversations:   {}", routing.conversations().len());
    println!("Endpoints:       {}", endpoints);
    println!("Routing Entries: {}", routing.routing_entries().len());
    println!("-----------------------");
    println!("Parsed in {:?}", duration);
}

fn run_normalize(path: &str, compact: bool) {
    let routing = load(path);
    if compact {
        println!("{}", serialize(&routing));
    } else {
        let pretty = serde_json::to_string_pretty(&to_value(&routing))
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to write document: {}", e)));
        println!("{}", pretty);
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
