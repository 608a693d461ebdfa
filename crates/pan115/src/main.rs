//! pan115 - command-line access to 115 cloud storage
//!
//! Main entry point for the pan115 CLI.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

use commands::{config, download, files, offline, recycle, search, share, tools};

// ─────────────────────────────────────────────────────────────────────────────
// CLI Structure
// ─────────────────────────────────────────────────────────────────────────────

/// pan115 - browse and manage 115 cloud storage from the terminal
#[derive(Parser)]
#[command(name = "pan115")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output as JSON (for scripting)
    #[arg(long, global = true)]
    pub json: bool,

    /// Config context to use (default: current-context)
    #[arg(long, global = true)]
    pub context: Option<String>,

    /// Session cookie, "UID=...; CID=...; SEID=..." (overrides the context)
    #[arg(long, global = true, env = "PAN115_COOKIE", hide_env_values = true)]
    pub cookie: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List a directory
    Ls(files::LsArgs),

    /// Show details of a file or directory
    Stat(files::StatArgs),

    /// Create a directory
    Mkdir(files::MkdirArgs),

    /// Move files to the recycle bin
    Rm(files::RmArgs),

    /// Move files into a directory
    Mv(files::TransferArgs),

    /// Copy files into a directory
    Cp(files::TransferArgs),

    /// Rename a file or directory
    Rename(files::RenameArgs),

    /// Show download info for a file, or download it
    Download(download::DownloadArgs),

    /// Search files and directories
    Search(search::SearchArgs),

    /// Browse a share
    Share(share::ShareArgs),

    /// Recycle bin operations
    Recycle(recycle::RecycleArgs),

    /// Offline download tasks
    Offline(offline::OfflineArgs),

    /// List available tools
    Tools,

    /// Call a tool by name with JSON arguments
    Call(tools::CallArgs),

    /// Configuration management
    Config(config::ConfigArgs),
}

// ─────────────────────────────────────────────────────────────────────────────
// Main
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Console (human-readable, stderr) + rotating JSON file
    let filter = if cli.verbose {
        "pan115=debug,pan115_client=debug,pan115_config=debug,warn"
    } else {
        "pan115=info,pan115_client=info,pan115_config=info,warn"
    };

    let file_appender = tracing_appender::rolling::daily(pan115_config::log_dir(), "pan115.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    use tracing_subscriber::prelude::*;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr)
                .with_filter(tracing_subscriber::EnvFilter::new(filter)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(non_blocking)
                .with_filter(tracing_subscriber::EnvFilter::new(
                    "pan115=trace,pan115_client=trace,pan115_config=trace,info",
                )),
        )
        .init();

    let ctx = commands::Context {
        context_name: cli.context,
        cookie: cli.cookie,
        json_output: cli.json,
        verbose: cli.verbose,
    };

    match cli.command {
        Commands::Ls(args) => files::ls(args, &ctx).await,
        Commands::Stat(args) => files::stat(args, &ctx).await,
        Commands::Mkdir(args) => files::mkdir(args, &ctx).await,
        Commands::Rm(args) => files::rm(args, &ctx).await,
        Commands::Mv(args) => files::mv(args, &ctx).await,
        Commands::Cp(args) => files::cp(args, &ctx).await,
        Commands::Rename(args) => files::rename(args, &ctx).await,
        Commands::Download(args) => download::run(args, &ctx).await,
        Commands::Search(args) => search::run(args, &ctx).await,
        Commands::Share(args) => share::run(args, &ctx).await,
        Commands::Recycle(args) => recycle::run(args, &ctx).await,
        Commands::Offline(args) => offline::run(args, &ctx).await,
        Commands::Tools => tools::list(&ctx),
        Commands::Call(args) => tools::call(args, &ctx).await,
        Commands::Config(args) => config::run(args, &ctx),
    }
}
