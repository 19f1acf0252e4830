//! Sequential vs. parallel cost estimation.

use serde::{Deserialize, Serialize};
use todoplan_core::{CostConfig, DependencyGraph, PlannerConfig, Task, TaskArena};
use todoplan_execution::ParallelGroup;
use tracing::debug;

/// Rough complexity class of a task, from its wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskComplexity {
    /// implement / create / build
    Build,
    /// fix / debug / resolve
    Fix,
    /// analyze / research
    Analysis,
    /// test / verify
    Verification,
    /// document / write
    Documentation,
    /// anything else
    Routine,
}

impl TaskComplexity {
    const KEYWORDS: &'static [(TaskComplexity, &'static [&'static str])] = &[
        (TaskComplexity::Build, &["implement", "create", "build"]),
        (TaskComplexity::Fix, &["fix", "debug", "resolve"]),
        (TaskComplexity::Analysis, &["analyze", "research"]),
        (TaskComplexity::Verification, &["test", "verify"]),
        (TaskComplexity::Documentation, &["document", "write"]),
    ];

    /// Classify content. The first matching category wins.
    pub fn classify(content: &str) -> Self {
        let lowered = content.to_lowercase();
        Self::KEYWORDS
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| lowered.contains(k)))
            .map(|(complexity, _)| *complexity)
            .unwrap_or(TaskComplexity::Routine)
    }

    /// Time multiplier for this class.
    pub fn multiplier(self, config: &CostConfig) -> f64 {
        match self {
            TaskComplexity::Build => config.build_multiplier,
            TaskComplexity::Fix => config.fix_multiplier,
            TaskComplexity::Analysis => config.analysis_multiplier,
            TaskComplexity::Verification => config.verification_multiplier,
            TaskComplexity::Documentation => config.documentation_multiplier,
            TaskComplexity::Routine => 1.0,
        }
    }
}

/// Cost/benefit of running the plan in parallel. Full precision; times in minutes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostEstimate {
    /// Time to run every task one after another
    pub sequential_time: f64,
    /// Time of the slowest parallel group
    pub parallel_time: f64,
    /// Fraction of sequential time saved
    pub time_savings: f64,
    /// Coordination overhead fraction
    pub coordination_overhead: f64,
    /// Context-switch overhead fraction
    pub context_overhead: f64,
    /// Savings net of overheads
    pub net_benefit: f64,
    /// Threshold the benefit was compared against
    pub threshold: f64,
    /// Whether parallel execution is worth it
    pub passes_threshold: bool,
    /// Number of tasks estimated
    pub task_count: usize,
    /// Number of inferred dependency edges
    pub dependency_count: usize,
}

/// Estimates execution cost.
pub struct CostEstimator<'a> {
    config: &'a PlannerConfig,
}

impl<'a> CostEstimator<'a> {
    /// Create an estimator.
    pub fn new(config: &'a PlannerConfig) -> Self {
        Self { config }
    }

    /// Estimated minutes for one task.
    pub fn task_minutes(&self, task: &Task) -> f64 {
        let cost = &self.config.cost;
        cost.base_task_minutes
            * task.priority.multiplier(cost.high_priority_multiplier)
            * TaskComplexity::classify(&task.content).multiplier(cost)
    }

    /// Sequential minutes for a group's members.
    pub fn group_minutes(&self, arena: &TaskArena, group: &ParallelGroup) -> f64 {
        group
            .tasks
            .iter()
            .filter_map(|id| arena.by_id(id))
            .map(|t| self.task_minutes(t))
            .sum()
    }

    /// Estimate the cost of the plan.
    pub fn estimate(&self, arena: &TaskArena, graph: &DependencyGraph, groups: &[ParallelGroup]) -> CostEstimate {
        let cost = &self.config.cost;
        let sequential_time: f64 = arena.iter().map(|t| self.task_minutes(t)).sum();

        let parallel_time = groups
            .iter()
            .map(|g| self.group_minutes(arena, g) / g.estimated_speedup.max(1) as f64)
            .fold(None, |acc: Option<f64>, t| Some(acc.map_or(t, |a| a.max(t))))
            .unwrap_or(sequential_time);

        let time_savings = if sequential_time > 0.0 {
            (sequential_time - parallel_time) / sequential_time
        } else {
            0.0
        };

        let task_count = arena.len();
        let coordination_overhead = (cost.coordination_per_task * task_count as f64).min(cost.coordination_cap);
        let context_overhead = (cost.context_per_task * task_count as f64).min(cost.context_cap);
        let net_benefit = time_savings - (coordination_overhead + context_overhead);
        let passes_threshold = net_benefit >= self.config.benefit_threshold;

        debug!(
            "Cost estimate: sequential {:.2}m, parallel {:.2}m, net benefit {:.3}",
            sequential_time, parallel_time, net_benefit
        );

        CostEstimate {
            sequential_time,
            parallel_time,
            time_savings,
            coordination_overhead,
            context_overhead,
            net_benefit,
            threshold: self.config.benefit_threshold,
            passes_threshold,
            task_count,
            dependency_count: graph.edge_count(),
        }
    }
}
