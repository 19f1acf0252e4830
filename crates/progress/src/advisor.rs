//! Execution recommendations.
//!
//! A fixed decision table over the cost estimate and the planned groups:
//! - below threshold: run sequentially, nothing else
//! - no groups: nothing to parallelize, nothing else
//! - otherwise: one recommendation per group, plus a resource note for wide plans

use serde::{Deserialize, Serialize};
use todoplan_core::{PlannerConfig, TaskId};
use todoplan_execution::ParallelGroup;
use crate::estimator::CostEstimate;
use crate::resources::ResourceEstimate;

/// What a recommendation proposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecommendationKind {
    /// Parallelism is not worth its overhead
    SequentialExecution,
    /// Worth it in principle, but no group could be formed
    NoParallelization,
    /// Run a group concurrently
    ParallelGroup,
    /// Provision for many concurrent agents
    ResourceOptimization,
}

impl RecommendationKind {
    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationKind::SequentialExecution => "SEQUENTIAL_EXECUTION",
            RecommendationKind::NoParallelization => "NO_PARALLELIZATION",
            RecommendationKind::ParallelGroup => "PARALLEL_GROUP",
            RecommendationKind::ResourceOptimization => "RESOURCE_OPTIMIZATION",
        }
    }
}

/// Urgency of a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecommendationPriority {
    /// Act on this first
    High,
    /// Worth doing
    Medium,
    /// Nice to have
    Low,
}

impl RecommendationPriority {
    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationPriority::High => "HIGH",
            RecommendationPriority::Medium => "MEDIUM",
            RecommendationPriority::Low => "LOW",
        }
    }
}

/// One actionable recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    /// What to do
    pub kind: RecommendationKind,
    /// How urgent
    pub priority: RecommendationPriority,
    /// One-line summary
    pub title: String,
    /// Explanation
    pub description: String,
    /// Tasks concerned
    pub tasks: Vec<TaskId>,
    /// Index into the report's groups, for group recommendations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<usize>,
}

/// Turns estimates into recommendations.
pub struct RecommendationEngine<'a> {
    config: &'a PlannerConfig,
}

impl<'a> RecommendationEngine<'a> {
    /// Create an engine.
    pub fn new(config: &'a PlannerConfig) -> Self {
        Self { config }
    }

    /// Produce recommendations, highest-impact first.
    pub fn recommend(
        &self,
        cost: &CostEstimate,
        groups: &[ParallelGroup],
        resources: &ResourceEstimate,
    ) -> Vec<Recommendation> {
        if !cost.passes_threshold {
            return vec![Recommendation {
                kind: RecommendationKind::SequentialExecution,
                priority: RecommendationPriority::High,
                title: "Execute tasks sequentially".to_string(),
                description: format!(
                    "Net parallel benefit {:.1}% is below the {:.1}% threshold; coordination overhead outweighs the savings.",
                    cost.net_benefit * 100.0,
                    cost.threshold * 100.0
                ),
                tasks: Vec::new(),
                group: None,
            }];
        }

        if groups.is_empty() {
            return vec![Recommendation {
                kind: RecommendationKind::NoParallelization,
                priority: RecommendationPriority::Medium,
                title: "No parallelizable groups found".to_string(),
                description: "No group of at least two tasks could be formed; run tasks in level order.".to_string(),
                tasks: Vec::new(),
                group: None,
            }];
        }

        let mut recommendations: Vec<Recommendation> = groups
            .iter()
            .enumerate()
            .map(|(i, group)| Recommendation {
                kind: RecommendationKind::ParallelGroup,
                priority: if group.parallel_potential > self.config.grouping.high_priority_potential {
                    RecommendationPriority::High
                } else {
                    RecommendationPriority::Medium
                },
                title: format!("Run {} group of {} tasks in parallel", group.label(), group.len()),
                description: format!(
                    "Up to {}x speedup with {:.0}% parallel potential.",
                    group.estimated_speedup,
                    group.parallel_potential * 100.0
                ),
                tasks: group.tasks.clone(),
                group: Some(i),
            })
            .collect();

        if resources.max_concurrent_agents > self.config.resources.optimization_agent_threshold {
            recommendations.push(Recommendation {
                kind: RecommendationKind::ResourceOptimization,
                priority: RecommendationPriority::Medium,
                title: format!("Provision for {} concurrent agents", resources.max_concurrent_agents),
                description: format!(
                    "Expect about {:.0} MB memory, {:.1} CPU cores, {:.0} Mbps bandwidth and {} context tokens.",
                    resources.memory_mb, resources.cpu_cores, resources.bandwidth_mbps, resources.context_tokens
                ),
                tasks: Vec::new(),
                group: None,
            });
        }

        recommendations
    }
}
