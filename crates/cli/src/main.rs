//! todoplan CLI - dependency analysis and parallel execution planning for task lists.

mod batch;
mod config;
mod render;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use todoplan_progress::Planner;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::Overrides;
use crate::render::Format;

#[derive(Parser)]
#[command(name = "todoplan")]
#[command(about = "Plan parallel execution of task lists", long_about = None)]
struct Cli {
    /// Configuration file (defaults to ./todoplan.toml, then ~/.config/todoplan/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze one or more JSON task lists
    Analyze {
        /// Task list files, `-` for stdin
        #[arg(required = true)]
        files: Vec<String>,
        /// Output format
        #[arg(long, value_enum, default_value = "json")]
        format: Format,
        /// Minimum net benefit for parallel execution
        #[arg(long)]
        threshold: Option<f64>,
        /// Maximum concurrent agents
        #[arg(long)]
        max_agents: Option<usize>,
        /// Write the report here instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Print the effective configuration as TOML
    Config {
        /// Minimum net benefit for parallel execution
        #[arg(long)]
        threshold: Option<f64>,
        /// Maximum concurrent agents
        #[arg(long)]
        max_agents: Option<usize>,
    },
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Analyze { files, format, threshold, max_agents, output } => {
            let overrides = Overrides { benefit_threshold: threshold, max_agents };
            let planner_config = config::resolve(cli.config.as_deref(), &overrides)?;
            let planner = Arc::new(Planner::new(planner_config)?);

            info!("Analyzing {} task list(s)", files.len());
            let outcomes = batch::analyze_all(planner, files).await;

            let mut failed = 0;
            let mut reports = Vec::new();
            for outcome in &outcomes {
                match &outcome.result {
                    Ok(report) => reports.push((outcome.source.as_str(), report)),
                    Err(e) => {
                        failed += 1;
                        error!("{}: {:#}", outcome.source, e);
                    }
                }
            }

            if !reports.is_empty() {
                let rendered = render::render(&reports, format)?;
                match output {
                    Some(path) => {
                        tokio::fs::write(&path, format!("{}\n", rendered))
                            .await
                            .with_context(|| format!("Failed to write {}", path.display()))?;
                        info!("Report written to {}", path.display());
                    }
                    None => println!("{}", rendered),
                }
            }

            if failed > 0 {
                bail!("{} of {} task list(s) failed", failed, outcomes.len());
            }
        }
        Commands::Config { threshold, max_agents } => {
            let overrides = Overrides { benefit_threshold: threshold, max_agents };
            let planner_config = config::resolve(cli.config.as_deref(), &overrides)?;
            print!("{}", config::to_toml_string(&planner_config)?);
        }
    }

    Ok(())
}
