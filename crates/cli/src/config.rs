//! Configuration discovery and loading.
//!
//! Resolution order, later entries win:
//! 1. Built-in defaults
//! 2. A TOML file: `--config <path>`, else `./todoplan.toml`, else
//!    `~/.config/todoplan/config.toml`
//! 3. Command-line overrides

use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use todoplan_core::PlannerConfig;
use tracing::{debug, info};

/// File name looked up in the current directory.
pub const LOCAL_CONFIG_FILE: &str = "todoplan.toml";

/// Values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// `--threshold`
    pub benefit_threshold: Option<f64>,
    /// `--max-agents`
    pub max_agents: Option<usize>,
}

impl Overrides {
    fn apply(&self, mut config: PlannerConfig) -> PlannerConfig {
        if let Some(threshold) = self.benefit_threshold {
            config.benefit_threshold = threshold;
        }
        if let Some(max_agents) = self.max_agents {
            config.max_agents = max_agents;
        }
        config
    }
}

/// Parse a configuration from TOML text.
pub fn from_toml_str(content: &str) -> Result<PlannerConfig> {
    toml::from_str(content).context("Failed to parse planner configuration")
}

/// Render a configuration as TOML.
pub fn to_toml_string(config: &PlannerConfig) -> Result<String> {
    toml::to_string_pretty(config).context("Failed to serialize planner configuration")
}

/// Load a configuration file.
pub fn load_file(path: &Path) -> Result<PlannerConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    from_toml_str(&content).with_context(|| format!("Invalid config file {}", path.display()))
}

/// Candidate config files in priority order.
fn candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(current_dir) = env::current_dir() {
        candidates.push(current_dir.join(LOCAL_CONFIG_FILE));
    }

    if let Some(home) = home_dir() {
        candidates.push(home.join(".config").join("todoplan").join("config.toml"));
    }

    candidates
}

fn home_dir() -> Option<PathBuf> {
    env::var("HOME")
        .ok()
        .or_else(|| env::var("USERPROFILE").ok())
        .map(PathBuf::from)
}

/// First existing config file in the discovery hierarchy.
pub fn discover() -> Option<PathBuf> {
    candidates().into_iter().find(|candidate| {
        debug!("Checking for config file: {:?}", candidate);
        candidate.is_file()
    })
}

/// Resolve the effective configuration and validate it.
pub fn resolve(explicit: Option<&Path>, overrides: &Overrides) -> Result<PlannerConfig> {
    let base = match explicit.map(Path::to_path_buf).or_else(discover) {
        Some(path) => {
            info!("Loading configuration from: {:?}", path);
            load_file(&path)?
        }
        None => {
            debug!("No configuration file found, using defaults");
            PlannerConfig::default()
        }
    };

    let config = overrides.apply(base);
    config.validate()?;
    Ok(config)
}
