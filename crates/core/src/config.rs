//! Planner configuration.
//!
//! Every threshold and multiplier used by the analysis lives here and is
//! passed explicitly into each stage.

use serde::{Deserialize, Serialize};
use crate::error::{Error, Result};

/// Configuration for one planner instance. Read-only during analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Minimum net benefit required to recommend parallel execution
    pub benefit_threshold: f64,

    /// Upper bound on concurrent agents
    pub max_agents: usize,

    /// Dependency inference
    pub dependency: DependencyConfig,

    /// Parallel grouping
    pub grouping: GroupingConfig,

    /// Level scheduling
    pub scheduling: SchedulingConfig,

    /// Cost estimation
    pub cost: CostConfig,

    /// Resource estimation
    pub resources: ResourceConfig,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            benefit_threshold: 0.3,
            max_agents: 10,
            dependency: DependencyConfig::default(),
            grouping: GroupingConfig::default(),
            scheduling: SchedulingConfig::default(),
            cost: CostConfig::default(),
            resources: ResourceConfig::default(),
        }
    }
}

impl PlannerConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the benefit threshold.
    pub fn with_benefit_threshold(mut self, threshold: f64) -> Self {
        self.benefit_threshold = threshold;
        self
    }

    /// Set the maximum agent count.
    pub fn with_max_agents(mut self, max_agents: usize) -> Self {
        self.max_agents = max_agents;
        self
    }

    /// Check that all values are in range.
    pub fn validate(&self) -> Result<()> {
        if !self.benefit_threshold.is_finite() {
            return Err(Error::InvalidConfig("benefit_threshold must be finite".into()));
        }
        if self.max_agents == 0 {
            return Err(Error::InvalidConfig("max_agents must be at least 1".into()));
        }

        let unit = [
            ("dependency.strong_threshold", self.dependency.strong_threshold),
            ("dependency.parallelizable_cutoff", self.dependency.parallelizable_cutoff),
            ("dependency.priority_strength", self.dependency.priority_strength),
            ("grouping.low_dependency_cutoff", self.grouping.low_dependency_cutoff),
            ("grouping.independent_potential", self.grouping.independent_potential),
            ("grouping.domain_potential", self.grouping.domain_potential),
            ("grouping.low_dependency_potential", self.grouping.low_dependency_potential),
            ("grouping.high_priority_potential", self.grouping.high_priority_potential),
            ("scheduling.level_parallel_potential", self.scheduling.level_parallel_potential),
        ];
        for (name, value) in unit {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::InvalidConfig(format!("{} must be within [0, 1], got {}", name, value)));
            }
        }

        let positive = [
            ("cost.base_task_minutes", self.cost.base_task_minutes),
            ("cost.high_priority_multiplier", self.cost.high_priority_multiplier),
            ("cost.build_multiplier", self.cost.build_multiplier),
            ("cost.fix_multiplier", self.cost.fix_multiplier),
            ("cost.analysis_multiplier", self.cost.analysis_multiplier),
            ("cost.verification_multiplier", self.cost.verification_multiplier),
            ("cost.documentation_multiplier", self.cost.documentation_multiplier),
        ];
        for (name, value) in positive {
            // NaN fails this comparison too.
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::InvalidConfig(format!("{} must be positive and finite, got {}", name, value)));
            }
        }

        let non_negative = [
            ("dependency.overlap_weight", self.dependency.overlap_weight),
            ("dependency.keyword_weight", self.dependency.keyword_weight),
            ("cost.coordination_per_task", self.cost.coordination_per_task),
            ("cost.coordination_cap", self.cost.coordination_cap),
            ("cost.context_per_task", self.cost.context_per_task),
            ("cost.context_cap", self.cost.context_cap),
            ("resources.memory_mb_per_agent", self.resources.memory_mb_per_agent),
            ("resources.cpu_cores_per_agent", self.resources.cpu_cores_per_agent),
            ("resources.bandwidth_mbps_per_agent", self.resources.bandwidth_mbps_per_agent),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(Error::InvalidConfig(format!("{} must be non-negative and finite, got {}", name, value)));
            }
        }

        if self.grouping.min_group_size < 2 {
            return Err(Error::InvalidConfig(format!(
                "grouping.min_group_size must be at least 2, got {}",
                self.grouping.min_group_size
            )));
        }
        if self.grouping.domain_speedup_cap == 0 || self.grouping.low_dependency_speedup_cap == 0 {
            return Err(Error::InvalidConfig("grouping speedup caps must be at least 1".into()));
        }

        Ok(())
    }
}

/// Dependency inference constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DependencyConfig {
    /// Distinct shared tokens required before a pattern match becomes an edge
    pub min_shared_tokens: usize,
    /// Strength contributed by content overlap
    pub overlap_weight: f64,
    /// Strength contributed per ordering keyword occurrence
    pub keyword_weight: f64,
    /// Ordering keywords counted across both texts
    pub ordering_keywords: Vec<String>,
    /// Strength of priority-mismatch edges
    pub priority_strength: f64,
    /// Edges at or above this strength are strong (must-finish-first)
    pub strong_threshold: f64,
    /// Tasks with no edge at or above this are parallelizable
    pub parallelizable_cutoff: f64,
}

impl Default for DependencyConfig {
    fn default() -> Self {
        Self {
            min_shared_tokens: 2,
            overlap_weight: 0.3,
            keyword_weight: 0.2,
            ordering_keywords: ["before", "after", "then", "first", "require"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            priority_strength: 0.7,
            strong_threshold: 0.7,
            parallelizable_cutoff: 0.3,
        }
    }
}

/// Parallel grouping constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupingConfig {
    /// Smallest group worth forming
    pub min_group_size: usize,
    /// Speedup cap for domain groups
    pub domain_speedup_cap: usize,
    /// Speedup cap for low-dependency groups
    pub low_dependency_speedup_cap: usize,
    /// Tasks whose edges are all below this join the low-dependency group
    pub low_dependency_cutoff: f64,
    /// Parallel potential of the independent group
    pub independent_potential: f64,
    /// Parallel potential of domain groups
    pub domain_potential: f64,
    /// Parallel potential of the low-dependency group
    pub low_dependency_potential: f64,
    /// Groups above this potential get high-priority recommendations
    pub high_priority_potential: f64,
}

impl Default for GroupingConfig {
    fn default() -> Self {
        Self {
            min_group_size: 2,
            domain_speedup_cap: 3,
            low_dependency_speedup_cap: 2,
            low_dependency_cutoff: 0.5,
            independent_potential: 0.9,
            domain_potential: 0.7,
            low_dependency_potential: 0.5,
            high_priority_potential: 0.7,
        }
    }
}

/// Level scheduling constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulingConfig {
    /// Parallel potential reported for multi-task levels
    pub level_parallel_potential: f64,
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            level_parallel_potential: 0.8,
        }
    }
}

/// Cost estimation constants. Times are in minutes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostConfig {
    /// Base time of one task
    pub base_task_minutes: f64,
    /// Multiplier applied to high-priority tasks
    pub high_priority_multiplier: f64,
    /// Coordination overhead per task
    pub coordination_per_task: f64,
    /// Cap on coordination overhead
    pub coordination_cap: f64,
    /// Context-switch overhead per task
    pub context_per_task: f64,
    /// Cap on context-switch overhead
    pub context_cap: f64,
    /// Multiplier for implement/create/build work
    pub build_multiplier: f64,
    /// Multiplier for fix/debug/resolve work
    pub fix_multiplier: f64,
    /// Multiplier for analyze/research work
    pub analysis_multiplier: f64,
    /// Multiplier for test/verify work
    pub verification_multiplier: f64,
    /// Multiplier for document/write work
    pub documentation_multiplier: f64,
}

impl Default for CostConfig {
    fn default() -> Self {
        Self {
            base_task_minutes: 5.0,
            high_priority_multiplier: 1.5,
            coordination_per_task: 0.05,
            coordination_cap: 0.3,
            context_per_task: 0.03,
            context_cap: 0.2,
            build_multiplier: 1.5,
            fix_multiplier: 1.2,
            analysis_multiplier: 1.3,
            verification_multiplier: 1.1,
            documentation_multiplier: 1.0,
        }
    }
}

/// Per-agent resource figures. Advisory only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceConfig {
    /// Memory per agent (MB)
    pub memory_mb_per_agent: f64,
    /// CPU cores per agent
    pub cpu_cores_per_agent: f64,
    /// Network bandwidth per agent (Mbps)
    pub bandwidth_mbps_per_agent: f64,
    /// Context window tokens per agent
    pub context_tokens_per_agent: u64,
    /// Agent count above which a resource recommendation is emitted
    pub optimization_agent_threshold: usize,
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            memory_mb_per_agent: 512.0,
            cpu_cores_per_agent: 0.5,
            bandwidth_mbps_per_agent: 10.0,
            context_tokens_per_agent: 8000,
            optimization_agent_threshold: 5,
        }
    }
}
