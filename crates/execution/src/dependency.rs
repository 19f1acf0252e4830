//! Dependency inference over a task list.

use crate::heuristic::{default_heuristics, keyword_matcher, DependencyHeuristic, TaskText};
use regex::Regex;
use todoplan_core::{DependencyConfig, DependencyGraph, Result, TaskArena};
use tracing::debug;

/// Infers pairwise dependency edges with a set of heuristics.
pub struct DependencyAnalyzer {
    config: DependencyConfig,
    heuristics: Vec<Box<dyn DependencyHeuristic>>,
    keywords: Option<Regex>,
}

impl DependencyAnalyzer {
    /// Create an analyzer with the built-in heuristics.
    pub fn new(config: DependencyConfig) -> Result<Self> {
        Self::with_heuristics(config, default_heuristics()?)
    }

    /// Create an analyzer with a custom heuristic set.
    pub fn with_heuristics(
        config: DependencyConfig,
        heuristics: Vec<Box<dyn DependencyHeuristic>>,
    ) -> Result<Self> {
        let keywords = keyword_matcher(&config.ordering_keywords)?;
        Ok(Self {
            config,
            heuristics,
            keywords,
        })
    }

    /// Number of installed heuristics.
    pub fn heuristic_count(&self) -> usize {
        self.heuristics.len()
    }

    /// Build the dependency graph.
    ///
    /// Every ordered pair `(task, other)` is offered to every heuristic, in
    /// input order, so the result is deterministic for a given arena.
    pub fn analyze(&self, arena: &TaskArena) -> DependencyGraph {
        let texts: Vec<TaskText<'_>> = arena
            .iter()
            .map(|t| TaskText::new(t, self.keywords.as_ref()))
            .collect();

        let mut graph = DependencyGraph::new();
        for text in &texts {
            graph.add_task(text.task.id.clone());
        }

        for task in &texts {
            for other in &texts {
                if task.task.id == other.task.id {
                    continue;
                }
                for heuristic in &self.heuristics {
                    if let Some(edge) = heuristic.infer(task, other, &self.config) {
                        graph.add_edge(edge);
                    }
                }
            }
        }

        debug!(
            "Inferred {} dependency edges across {} tasks",
            graph.edge_count(),
            arena.len()
        );

        graph
    }
}

impl std::fmt::Debug for DependencyAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DependencyAnalyzer")
            .field("config", &self.config)
            .field("heuristics", &self.heuristics.iter().map(|h| h.kind()).collect::<Vec<_>>())
            .finish()
    }
}
