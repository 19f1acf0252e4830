//! Concurrent analysis of several task lists.
//!
//! Each input is an independent, stateless computation. Inputs are read on
//! the runtime and analysed on the blocking pool against one shared planner.

use anyhow::{Context, Result};
use std::sync::Arc;
use todoplan_core::Task;
use todoplan_progress::{AnalysisReport, Planner};
use tokio::io::AsyncReadExt;
use tracing::debug;

/// Input name meaning standard input.
pub const STDIN: &str = "-";

/// Result of analysing one input.
#[derive(Debug)]
pub struct Outcome {
    /// Input as given on the command line
    pub source: String,
    /// The report, or why there is none
    pub result: Result<AnalysisReport>,
}

/// Parse a JSON task list.
pub fn parse_tasks(content: &str) -> Result<Vec<Task>> {
    serde_json::from_str(content).context("Expected a JSON array of tasks")
}

async fn read_source(source: &str) -> Result<String> {
    if source == STDIN {
        let mut content = String::new();
        tokio::io::stdin()
            .read_to_string(&mut content)
            .await
            .context("Failed to read tasks from stdin")?;
        Ok(content)
    } else {
        tokio::fs::read_to_string(source)
            .await
            .with_context(|| format!("Failed to read {}", source))
    }
}

async fn analyze_source(planner: Arc<Planner>, source: String) -> Result<AnalysisReport> {
    let content = read_source(&source).await?;
    let tasks = parse_tasks(&content).with_context(|| format!("Invalid task list in {}", source))?;
    debug!("Read {} tasks from {}", tasks.len(), source);

    let report = tokio::task::spawn_blocking(move || planner.analyze(tasks))
        .await
        .context("Analysis task panicked")??;
    Ok(report)
}

/// Analyse every source concurrently. Outcomes keep the input order.
pub async fn analyze_all(planner: Arc<Planner>, sources: Vec<String>) -> Vec<Outcome> {
    let handles: Vec<_> = sources
        .into_iter()
        .map(|source| {
            let planner = Arc::clone(&planner);
            let name = source.clone();
            (name, tokio::spawn(analyze_source(planner, source)))
        })
        .collect();

    let mut outcomes = Vec::with_capacity(handles.len());
    for (source, handle) in handles {
        let result = match handle.await {
            Ok(result) => result,
            Err(e) => Err(anyhow::Error::new(e).context("Analysis task failed")),
        };
        outcomes.push(Outcome { source, result });
    }
    outcomes
}
