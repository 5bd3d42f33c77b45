//! clearsight — see why your AI assistant did what it did.
//!
//! Quick start:
//!   clearsight init                 # write .clearsight.yaml
//!   clearsight record ...           # log a decision
//!   clearsight show --session <id>  # list a session's decisions
//!   clearsight page --session <id>  # browse them in the terminal
//!
//! For more info: clearsight --help

// Library items are also used by integration tests; not every one is
// reachable from the binary.
#![allow(dead_code, unused_imports)]

mod cli;
mod config;
mod decision;
mod page;
mod store;

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

/// clearsight — see why your AI assistant did what it did.
#[derive(Parser)]
#[command(
    name = "clearsight",
    version,
    about = "Record and review your AI assistant's decisions",
    long_about = "clearsight keeps an append-only log of the decisions an AI\n\
                  assistant makes: what it chose, why, how confident it was,\n\
                  and what it based the choice on.\n\n\
                  Quick start:\n  \
                  clearsight init                  # write .clearsight.yaml\n  \
                  clearsight show --session <id>   # list a session's decisions\n  \
                  clearsight page --session <id>   # browse them in the terminal"
)]
struct Cli {
    /// Config file (default: .clearsight.yaml, searched upward)
    #[arg(long, global = true, env = "CLEARSIGHT_CONFIG")]
    config: Option<PathBuf>,

    /// Assistant ID (overrides the config)
    #[arg(long, global = true)]
    assistant: Option<String>,

    /// Session ID (overrides the config)
    #[arg(long, global = true, env = "CLEARSIGHT_SESSION")]
    session: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a starter config file
    Init {
        /// Where to write the config
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Record one decision
    Record {
        /// Message the decision relates to
        #[arg(short, long)]
        message: String,

        /// Decision category (e.g. tool_choice, refusal)
        #[arg(short = 't', long = "type")]
        decision_type: String,

        /// Why the assistant decided this way
        #[arg(short, long)]
        reasoning: String,

        /// Confidence score
        #[arg(short, long, allow_negative_numbers = true)]
        confidence: f64,

        /// Input factors as JSON (default: {})
        #[arg(short, long)]
        factors: Option<String>,

        /// Never fail: trace store errors instead of reporting them
        #[arg(long)]
        best_effort: bool,
    },

    /// List the decisions of a session, newest first
    Show {
        /// Only decisions for this message
        #[arg(short, long)]
        message: Option<String>,

        /// Max entries to show
        #[arg(short, long)]
        limit: Option<usize>,

        /// Print raw rows as JSON
        #[arg(long)]
        json: bool,

        /// Show only the summary
        #[arg(long)]
        summary: bool,
    },

    /// Open the transparency page in the terminal
    Page {
        /// Only decisions for this message
        #[arg(short, long)]
        message: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    // Set up tracing (only show at RUST_LOG=debug level to keep output clean)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("clearsight=warn".parse().unwrap()),
        )
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let global = cli::GlobalOptions {
        config: cli.config,
        assistant: cli.assistant,
        session: cli.session,
    };

    let result = match cli.command {
        Commands::Init { output } => {
            cli::init::run_init(global.assistant.as_deref(), output.as_deref())
        }

        Commands::Record {
            message,
            decision_type,
            reasoning,
            confidence,
            factors,
            best_effort,
        } => {
            let options = cli::record::RecordOptions {
                message_id: message,
                decision_type,
                reasoning,
                confidence_score: confidence,
                factors,
                best_effort,
            };
            cli::record::run_record(&global, options).await
        }

        Commands::Show {
            message,
            limit,
            json,
            summary,
        } => cli::show::run_show(&global, message.as_deref(), limit, json, summary).await,

        Commands::Page { message } => cli::page::run_page(&global, message).await,
    };

    if let Err(e) = result {
        eprintln!();
        eprintln!("  {} {}", "✗".red().bold(), e);
        for cause in e.chain().skip(1) {
            eprintln!("  {} {}", "caused by:".dimmed(), cause);
        }
        eprintln!();
        std::process::exit(1);
    }
}
