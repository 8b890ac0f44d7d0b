//! vb_cli
//!
//! Balanced teams and roster statistics from a CSV/JSON roster file,
//! plus CSV ↔ JSON roster conversion.

#[cfg(feature = "cli")]
use anyhow::{Context, Result};
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use serde::Serialize;
#[cfg(feature = "cli")]
use std::path::PathBuf;
#[cfg(feature = "cli")]
use vb_core::api::{generate_teams, ApiResponse};
#[cfg(feature = "cli")]
use vb_core::{roster_statistics, AllocatorConfig, TeamAllocator};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "vb_cli")]
#[command(about = "Generate balanced volleyball teams from a confirmed roster", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Pretty-print JSON output
    #[arg(long, global = true, default_value = "false")]
    pretty: bool,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Split the confirmed roster into two teams
    Teams {
        /// Roster file (.csv or .json)
        #[arg(long)]
        roster: PathBuf,

        /// Event id inside a JSON roster document
        #[arg(long)]
        event: Option<String>,

        /// Allocator config JSON (falls back to VB_ALLOCATOR_CONFIG_PATH)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Head counts and mean level of the confirmed roster
    Stats {
        /// Roster file (.csv or .json)
        #[arg(long)]
        roster: PathBuf,

        /// Event id inside a JSON roster document
        #[arg(long)]
        event: Option<String>,
    },

    /// Convert a CSV roster into a JSON roster document
    Import {
        /// Input CSV file path
        #[arg(long)]
        csv: PathBuf,

        /// Event id to file the roster under
        #[arg(long, default_value = "default")]
        event: String,

        /// Output JSON file path
        #[arg(long)]
        out: PathBuf,
    },

    /// Write one event of a roster file as CSV
    Export {
        /// Roster file (.json document or .csv)
        #[arg(long)]
        roster: PathBuf,

        /// Event id inside a JSON roster document
        #[arg(long)]
        event: Option<String>,

        /// Output CSV file path
        #[arg(long)]
        out: PathBuf,
    },
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Teams { roster, event, config } => {
            let config = match config {
                Some(path) => AllocatorConfig::load(&path)
                    .with_context(|| format!("Failed to load config: {}", path.display()))?,
                None => AllocatorConfig::from_env()?,
            };
            let players = vb_cli::load_confirmed_players(&roster, event.as_deref())?;
            let response = generate_teams(&TeamAllocator::new(config), &players);
            print_json(&response, cli.pretty)?;
            if !response.success {
                std::process::exit(2);
            }
        }

        Commands::Stats { roster, event } => {
            let players = vb_cli::load_confirmed_players(&roster, event.as_deref())?;
            print_json(&ApiResponse::success(roster_statistics(&players)), cli.pretty)?;
        }

        Commands::Import { csv, event, out } => {
            let stats = vb_cli::export_roster_json(&csv, &event, &out)?;
            eprintln!(
                "Imported {} of {} rows ({} failed) into {}",
                stats.imported,
                stats.total_rows,
                stats.failed,
                out.display()
            );
        }

        Commands::Export { roster, event, out } => {
            let event = vb_cli::load_event_roster(&roster, event.as_deref())?;
            let rows = vb_cli::export_roster_csv(&event, &out)?;
            eprintln!("Exported {} rows of {} into {}", rows, event.event_id, out.display());
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty { serde_json::to_string_pretty(value)? } else { serde_json::to_string(value)? };
    println!("{}", json);
    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("vb_cli is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
