//! The analysis pipeline.
//!
//! ```text
//! tasks -> dependency graph -> groups + levels -> cost -> recommendations
//! ```
//! Every stage is a pure function of the task arena and earlier results.

use serde::{Deserialize, Serialize};
use todoplan_core::{DependencyGraph, PlannerConfig, Result, Task, TaskArena, TaskId};
use todoplan_execution::{DependencyAnalyzer, ExecutionLevel, GroupPlanner, LevelScheduler, ParallelGroup};
use tracing::info;
use crate::advisor::{Recommendation, RecommendationEngine};
use crate::estimator::{CostEstimate, CostEstimator};
use crate::resources::ResourceEstimate;

/// Result of one analysis. Owned by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    /// Analysed tasks in input order
    pub tasks: Vec<Task>,
    /// Inferred dependencies keyed by dependent task
    pub dependency_graph: DependencyGraph,
    /// Tasks with no edge at or above the parallelizable cutoff
    pub parallelizable: Vec<TaskId>,
    /// Tasks with at least one strong edge
    pub sequential_chain: Vec<TaskId>,
    /// Concurrent groups
    pub parallel_groups: Vec<ParallelGroup>,
    /// Ordered execution waves
    pub execution_levels: Vec<ExecutionLevel>,
    /// Whether scheduling had to break a cycle
    pub had_cycle: bool,
    /// Sequential vs. parallel cost
    pub cost_estimate: CostEstimate,
    /// Advisory resource needs
    pub resources: ResourceEstimate,
    /// Ranked recommendations
    pub recommendations: Vec<Recommendation>,
}

impl AnalysisReport {
    /// Tasks that ended up in no group.
    pub fn ungrouped(&self) -> Vec<&TaskId> {
        self.tasks
            .iter()
            .map(|t| &t.id)
            .filter(|id| !self.parallel_groups.iter().any(|g| g.tasks.contains(id)))
            .collect()
    }
}

/// Task dependency analyzer and parallel-execution planner.
///
/// Holds only read-only configuration, so one instance can serve concurrent
/// callers.
#[derive(Debug)]
pub struct Planner {
    config: PlannerConfig,
    analyzer: DependencyAnalyzer,
}

impl Planner {
    /// Create a planner with the built-in heuristics.
    pub fn new(config: PlannerConfig) -> Result<Self> {
        config.validate()?;
        let analyzer = DependencyAnalyzer::new(config.dependency.clone())?;
        Ok(Self { config, analyzer })
    }

    /// Create a planner with a custom dependency analyzer.
    pub fn with_analyzer(config: PlannerConfig, analyzer: DependencyAnalyzer) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, analyzer })
    }

    /// The configuration in use.
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Validate and analyse a task list.
    pub fn analyze(&self, tasks: Vec<Task>) -> Result<AnalysisReport> {
        let arena = TaskArena::new(tasks)?;
        Ok(self.analyze_arena(&arena))
    }

    /// Analyse an already validated arena.
    pub fn analyze_arena(&self, arena: &TaskArena) -> AnalysisReport {
        let config = &self.config;

        let graph = self.analyzer.analyze(arena);
        let groups = GroupPlanner::new(config).plan(arena, &graph);
        let schedule = LevelScheduler::new(config).schedule(arena, &graph);
        let cost = CostEstimator::new(config).estimate(arena, &graph, &groups);
        let resources = ResourceEstimate::from_groups(&groups, config);
        let recommendations = RecommendationEngine::new(config).recommend(&cost, &groups, &resources);

        info!(
            "Analysed {} tasks: {} groups, {} levels, net benefit {:.3}",
            arena.len(),
            groups.len(),
            schedule.levels.len(),
            cost.net_benefit
        );

        AnalysisReport {
            tasks: arena.tasks().to_vec(),
            parallelizable: graph.parallelizable(config.dependency.parallelizable_cutoff),
            sequential_chain: graph.sequential_chain(config.dependency.strong_threshold),
            dependency_graph: graph,
            parallel_groups: groups,
            execution_levels: schedule.levels,
            had_cycle: schedule.had_cycle,
            cost_estimate: cost,
            resources,
            recommendations,
        }
    }
}
