//! Todoplan core data models.
//!
//! This crate defines the task, dependency and configuration types shared by
//! the analysis and planning layers. Nothing here performs I/O.

#![warn(missing_docs)]

mod id;
mod task;
mod dependency;
mod config;
mod error;

pub use id::TaskId;
pub use task::{Task, Priority, TaskStatus, TaskArena};
pub use dependency::{DependencyKind, DependencyEdge, DependencyGraph};
pub use config::{
    PlannerConfig, DependencyConfig, GroupingConfig, SchedulingConfig, CostConfig, ResourceConfig,
};
pub use error::{Error, ValidationError, Result};
