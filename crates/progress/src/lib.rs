//! Planning layer
//!
//! Cost estimation, resource estimates, recommendations, and the `Planner`
//! pipeline that ties every stage together.

#![warn(missing_docs)]

pub mod estimator;
pub mod resources;
pub mod advisor;
pub mod planner;

pub use estimator::{CostEstimator, CostEstimate, TaskComplexity};
pub use resources::ResourceEstimate;
pub use advisor::{
    RecommendationEngine, Recommendation, RecommendationKind, RecommendationPriority,
};
pub use planner::{Planner, AnalysisReport};
