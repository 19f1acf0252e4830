//! Execution planning layer - dependency inference, grouping and scheduling.

#![warn(missing_docs)]

pub mod heuristic;
pub mod dependency;
pub mod grouping;
pub mod scheduler;

pub use heuristic::{DependencyHeuristic, PatternHeuristic, PriorityHeuristic, TaskText, default_heuristics};
pub use dependency::DependencyAnalyzer;
pub use grouping::{GroupPlanner, ParallelGroup, GroupKind, Domain};
pub use scheduler::{LevelScheduler, ExecutionLevel, Schedule};
