//! CLI entry point for the `kug` command-line tool.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use ku_graph::cli::commands;
use ku_graph::config;
use ku_graph::KuGraphError;

#[derive(Parser)]
#[command(
    name = "kug",
    about = "Knowledge-unit link graph: weighted links between knowledge units, in memory"
)]
struct Cli {
    /// Output format: "text" or "json" (defaults to the config value)
    #[arg(long)]
    format: Option<String>,

    /// Enable debug logging
    #[arg(long)]
    verbose: bool,

    /// Path to a kug.toml config file
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Walk through adding, updating and rejecting links on a fresh graph
    Demo,
    /// Run a link script against a fresh graph
    Run {
        /// Script file; reads stdin when omitted or "-"
        script: Option<PathBuf>,
        /// Exit with status 3 if any link was rejected
        #[arg(long)]
        strict: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let config = match config::load_or_default(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(2);
        }
    };

    // --verbose wins over RUST_LOG, which wins over the config level
    if cli.verbose {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or(config.log_level.as_str()),
        )
        .init();
    }

    let json = cli.format.as_deref().unwrap_or(&config.default_format) == "json";
    let mut stdout = std::io::stdout().lock();

    let (result, strict) = match cli.command {
        Commands::Demo => (commands::cmd_demo(&config, json, &mut stdout), false),
        Commands::Run { script, strict } => (
            commands::cmd_run(script.as_deref(), &config, json, &mut stdout),
            strict || config.strict,
        ),
    };

    match result {
        Ok(summary) => {
            if strict && summary.rejected > 0 {
                process::exit(3);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            let code = match &e {
                KuGraphError::Io(_) => 1,
                KuGraphError::Parse { .. } | KuGraphError::Config(_) => 2,
                KuGraphError::InvalidWeight(_) | KuGraphError::SelfLink(_) => 3,
                KuGraphError::Json(_) => 5,
            };
            process::exit(code);
        }
    }
}
