//! Advisory resource estimate for a parallel plan.

use serde::{Deserialize, Serialize};
use todoplan_core::PlannerConfig;
use todoplan_execution::ParallelGroup;

/// Resources needed to run the grouped tasks concurrently. Not enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceEstimate {
    /// Agents that would run at once
    pub max_concurrent_agents: usize,
    /// Memory in MB
    pub memory_mb: f64,
    /// CPU cores
    pub cpu_cores: f64,
    /// Network bandwidth in Mbps
    pub bandwidth_mbps: f64,
    /// Context window tokens
    pub context_tokens: u64,
}

impl ResourceEstimate {
    /// Estimate from the planned groups: one agent per grouped task, capped at `max_agents`.
    pub fn from_groups(groups: &[ParallelGroup], config: &PlannerConfig) -> Self {
        let grouped: usize = groups.iter().map(ParallelGroup::len).sum();
        Self::for_agents(grouped.min(config.max_agents), config)
    }

    /// Estimate for a fixed agent count.
    pub fn for_agents(agents: usize, config: &PlannerConfig) -> Self {
        let per = &config.resources;
        Self {
            max_concurrent_agents: agents,
            memory_mb: agents as f64 * per.memory_mb_per_agent,
            cpu_cores: agents as f64 * per.cpu_cores_per_agent,
            bandwidth_mbps: agents as f64 * per.bandwidth_mbps_per_agent,
            context_tokens: (agents as u64).saturating_mul(per.context_tokens_per_agent),
        }
    }
}
