//! Phonics Control - CLI for inspecting and editing Phonics Quest progress
//!
//! Drives the shared core against a file-backed save so parents and
//! developers can look at content and progress outside the game.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use phonics_common::PhonicsConfig;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "phonicsctl")]
#[command(about = "Phonics Quest - curriculum and progress tool", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file (defaults to $PHONICS_CONFIG or ~/.config/phonics/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all stages with unlock status and stars
    Stages,

    /// Show a stage's words and phonemes
    Stage { id: u32 },

    /// Show the collection spawn sequence for a stage
    Collection { id: u32 },

    /// Show the battle word pool for a stage
    Battle { id: u32 },

    /// Show progress for one stage, or an overview
    Progress { id: Option<u32> },

    /// Record a blend attempt
    Blend {
        id: u32,
        word: String,

        /// Record the attempt as incorrect
        #[arg(long)]
        wrong: bool,
    },

    /// Record a finished collection phase
    Collect { id: u32, items: u32 },

    /// Record a stage completion with its score
    Complete { id: u32, score: u64 },

    /// Unlock a stage
    Unlock { id: u32 },

    /// Show the currency balance, optionally adding to it
    Currency {
        #[arg(long)]
        add: Option<u64>,
    },

    /// Show the adaptive difficulty tier for a stage
    Difficulty { id: u32 },

    /// Erase all progress
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },

    /// Print the raw save as JSON
    Export,
}

fn init_tracing(default_level: &str) {
    let filter = std::env::var("PHONICS_LOG")
        .ok()
        .and_then(|v| EnvFilter::try_new(v).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = PhonicsConfig::load(cli.config.as_deref())?;
    init_tracing(&config.logging.level);

    let mut ctx = commands::Context::open(&config)?;

    match cli.command {
        Commands::Stages => commands::stages(&ctx),
        Commands::Stage { id } => commands::stage(&ctx, id),
        Commands::Collection { id } => commands::collection(&ctx, id),
        Commands::Battle { id } => commands::battle(&ctx, id),
        Commands::Progress { id } => commands::progress(&ctx, id),
        Commands::Blend { id, word, wrong } => commands::blend(&mut ctx, id, &word, !wrong),
        Commands::Collect { id, items } => commands::collect(&mut ctx, id, items),
        Commands::Complete { id, score } => commands::complete(&mut ctx, id, score),
        Commands::Unlock { id } => commands::unlock(&mut ctx, id),
        Commands::Currency { add } => commands::currency(&mut ctx, add),
        Commands::Difficulty { id } => commands::difficulty(&ctx, id),
        Commands::Reset { yes } => commands::reset(&mut ctx, yes),
        Commands::Export => commands::export(&ctx),
    }
}
