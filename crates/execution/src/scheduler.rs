//! Level scheduling - topological layering with cycle breaking.

use serde::{Deserialize, Serialize};
use todoplan_core::{DependencyGraph, PlannerConfig, TaskArena, TaskId};
use tracing::{debug, warn};

/// One wave of tasks that may start together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionLevel {
    /// Zero-based position in the schedule
    pub index: usize,
    /// Tasks in input order
    pub tasks: Vec<TaskId>,
    /// 0 for single-task levels
    pub parallel_potential: f64,
    /// Estimated duration in minutes
    pub estimated_duration: f64,
    /// Set when the level was forced to break a cycle
    pub forced: bool,
}

/// Ordered execution levels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    /// Levels in execution order
    pub levels: Vec<ExecutionLevel>,
    /// Whether a cycle (or unsatisfiable dependency) had to be broken
    pub had_cycle: bool,
}

impl Schedule {
    /// Level containing a task.
    pub fn level_of(&self, id: &TaskId) -> Option<usize> {
        self.levels
            .iter()
            .find(|level| level.tasks.contains(id))
            .map(|level| level.index)
    }

    /// Total tasks across all levels.
    pub fn task_count(&self) -> usize {
        self.levels.iter().map(|l| l.tasks.len()).sum()
    }
}

/// Converts a dependency graph into execution levels.
pub struct LevelScheduler<'a> {
    config: &'a PlannerConfig,
}

impl<'a> LevelScheduler<'a> {
    /// Create a scheduler.
    pub fn new(config: &'a PlannerConfig) -> Self {
        Self { config }
    }

    /// Layer tasks so each one follows everything it strongly depends on.
    ///
    /// A pass that finds nothing eligible forces the first unscheduled task
    /// (input order) into its own level, so this finishes in at most
    /// `arena.len()` levels.
    pub fn schedule(&self, arena: &TaskArena, graph: &DependencyGraph) -> Schedule {
        let strong = self.config.dependency.strong_threshold;
        let mut scheduled = vec![false; arena.len()];
        let mut remaining = arena.len();
        let mut levels = Vec::new();
        let mut had_cycle = false;

        while remaining > 0 {
            let eligible: Vec<usize> = (0..arena.len())
                .filter(|&i| !scheduled[i])
                .filter(|&i| self.is_ready(i, arena, graph, &scheduled, strong))
                .collect();

            let (members, forced) = if eligible.is_empty() {
                let Some(first) = scheduled.iter().position(|done| !done) else { break };
                if let Some(task) = arena.get(first) {
                    warn!("Dependency cycle detected; forcing task {} into its own level", task.id);
                }
                had_cycle = true;
                (vec![first], true)
            } else {
                (eligible, false)
            };

            for &i in &members {
                scheduled[i] = true;
            }
            remaining -= members.len();
            levels.push(self.level(levels.len(), arena, &members, forced));
        }

        debug!("Scheduled {} tasks into {} levels", arena.len(), levels.len());

        Schedule { levels, had_cycle }
    }

    fn is_ready(
        &self,
        index: usize,
        arena: &TaskArena,
        graph: &DependencyGraph,
        scheduled: &[bool],
        strong: f64,
    ) -> bool {
        let Some(task) = arena.get(index) else { return false };
        graph
            .prerequisites(&task.id, strong)
            .into_iter()
            .all(|dep| arena.index_of(dep).map_or(true, |j| scheduled[j]))
    }

    fn level(&self, index: usize, arena: &TaskArena, members: &[usize], forced: bool) -> ExecutionLevel {
        let cost = &self.config.cost;
        let durations: Vec<f64> = members
            .iter()
            .filter_map(|&i| arena.get(i))
            .map(|t| cost.base_task_minutes * t.priority.multiplier(cost.high_priority_multiplier))
            .collect();

        let total: f64 = durations.iter().sum();
        let estimated_duration = if durations.len() > 1 {
            total / durations.len() as f64
        } else {
            total
        };

        ExecutionLevel {
            index,
            tasks: arena.ids_of(members),
            parallel_potential: if members.len() > 1 {
                self.config.scheduling.level_parallel_potential
            } else {
                0.0
            },
            estimated_duration,
            forced,
        }
    }
}
