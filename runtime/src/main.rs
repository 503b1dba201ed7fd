// Copyright 2026 Announce Feed Contributors
// SPDX-License-Identifier: Apache-2.0

use announce_feed::cli::{self, output};
use announce_feed::FeedConfig;
use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(
    name = "announce-feed",
    about = "Announcement feeds with structured-API fetch and browser fallback",
    version
)]
struct Cli {
    /// Output results as JSON (machine-readable)
    #[arg(long, global = true)]
    json: bool,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Enable verbose/debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the feed for one announcement category
    Fetch {
        /// Category key (see `announce-feed categories`)
        category: String,
        /// Print at most this many items
        #[arg(long)]
        limit: Option<usize>,
        /// Structured endpoint timeout in milliseconds
        #[arg(long)]
        api_timeout: Option<u64>,
        /// Wait bound for the embedded app-data marker in milliseconds
        #[arg(long)]
        marker_timeout: Option<u64>,
        /// Chromium binary to use for the fallback path
        #[arg(long)]
        chromium: Option<PathBuf>,
    },
    /// List the configured category keys and catalog ids
    Categories,
    /// Check environment and diagnose issues
    Doctor,
    /// Generate shell completion scripts
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        shell: Shell,
    },
}

fn init_tracing(verbose: bool, json: bool) {
    let default = if verbose {
        "announce_feed=debug"
    } else {
        "announce_feed=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.json {
        std::env::set_var(output::ENV_JSON, "1");
    }
    if cli.quiet {
        std::env::set_var(output::ENV_QUIET, "1");
    }
    init_tracing(cli.verbose, cli.log_json);

    let mut config = FeedConfig::from_env();

    let result = match cli.command {
        Commands::Fetch {
            category,
            limit,
            api_timeout,
            marker_timeout,
            chromium,
        } => {
            if let Some(ms) = api_timeout {
                config.api_timeout = Duration::from_millis(ms);
            }
            if let Some(ms) = marker_timeout {
                config.marker_timeout = Duration::from_millis(ms);
            }
            if chromium.is_some() {
                config.chromium_path = chromium;
            }
            cli::fetch_cmd::run(&category, config, limit).await
        }
        Commands::Categories => cli::categories_cmd::run(),
        Commands::Doctor => cli::doctor::run(&config).await,
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "announce-feed", &mut std::io::stdout());
            Ok(())
        }
    };

    // Consistent exit codes: 0=success, 1=error
    if let Err(e) = &result {
        if output::is_json() {
            output::print_json(&serde_json::json!({
                "error": true,
                "message": format!("{e:#}"),
            }));
        } else if !output::is_quiet() {
            eprintln!("  Error: {e:#}");
        }
        std::process::exit(1);
    }

    result
}
