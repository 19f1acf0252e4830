//! Inferred dependency edges and the graph they form.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use crate::id::TaskId;

/// Why one task is believed to depend on another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyKind {
    /// Implementation follows some other work
    Implementation,
    /// Testing/verification follows some other work
    Verification,
    /// Documentation follows some other work
    Documentation,
    /// Analysis must happen before some other work
    Analysis,
    /// Generic ordering language ("fix ... before")
    Sequential,
    /// A high-priority task softly blocks a lower-priority one
    Priority,
}

impl DependencyKind {
    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            DependencyKind::Implementation => "implementation",
            DependencyKind::Verification => "verification",
            DependencyKind::Documentation => "documentation",
            DependencyKind::Analysis => "analysis",
            DependencyKind::Sequential => "sequential",
            DependencyKind::Priority => "priority",
        }
    }
}

/// `to` depends on `from`: `from` must complete first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DependencyEdge {
    /// Prerequisite task
    pub from: TaskId,
    /// Dependent task
    pub to: TaskId,
    /// Edge kind
    pub kind: DependencyKind,
    /// Confidence in [0, 1]
    pub strength: f64,
}

impl DependencyEdge {
    /// Create an edge, clamping strength into [0, 1].
    pub fn new(from: TaskId, to: TaskId, kind: DependencyKind, strength: f64) -> Self {
        Self {
            from,
            to,
            kind,
            strength: strength.clamp(0.0, 1.0),
        }
    }
}

/// Dependency graph keyed by the dependent task.
///
/// The edges stored under a task are its *outgoing* edges: each one points at
/// a prerequisite (`edge.from`). Every analysed task has an entry, possibly
/// empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DependencyGraph {
    edges: BTreeMap<TaskId, Vec<DependencyEdge>>,
}

impl DependencyGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a task with no edges yet.
    pub fn add_task(&mut self, id: TaskId) {
        self.edges.entry(id).or_default();
    }

    /// Add an edge under its dependent task. Self-edges are ignored.
    pub fn add_edge(&mut self, edge: DependencyEdge) -> bool {
        if edge.from == edge.to {
            return false;
        }
        self.edges.entry(edge.to.clone()).or_default().push(edge);
        true
    }

    /// Outgoing edges of a task. Empty for unknown tasks.
    pub fn dependencies_of(&self, id: &TaskId) -> &[DependencyEdge] {
        self.edges.get(id).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Effective strength between a pair: the max over all parallel edges.
    pub fn effective_strength(&self, from: &TaskId, to: &TaskId) -> Option<f64> {
        self.dependencies_of(to)
            .iter()
            .filter(|e| &e.from == from)
            .map(|e| e.strength)
            .fold(None, |acc, s| Some(acc.map_or(s, |a: f64| a.max(s))))
    }

    /// Strongest outgoing edge of a task, 0.0 when it has none.
    pub fn max_strength(&self, id: &TaskId) -> f64 {
        self.dependencies_of(id)
            .iter()
            .map(|e| e.strength)
            .fold(0.0, f64::max)
    }

    /// Prerequisites a task depends on with at least `min_strength`.
    pub fn prerequisites(&self, id: &TaskId, min_strength: f64) -> BTreeSet<&TaskId> {
        self.dependencies_of(id)
            .iter()
            .filter(|e| e.strength >= min_strength)
            .map(|e| &e.from)
            .collect()
    }

    /// Tasks with no outgoing edge of strength >= `cutoff`.
    pub fn parallelizable(&self, cutoff: f64) -> Vec<TaskId> {
        self.edges
            .iter()
            .filter(|(_, edges)| edges.iter().all(|e| e.strength < cutoff))
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// Tasks with at least one outgoing edge of strength >= `strong`.
    pub fn sequential_chain(&self, strong: f64) -> Vec<TaskId> {
        self.edges
            .iter()
            .filter(|(_, edges)| edges.iter().any(|e| e.strength >= strong))
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// All edges, grouped by dependent task in id order.
    pub fn edges(&self) -> impl Iterator<Item = &DependencyEdge> {
        self.edges.values().flatten()
    }

    /// Total number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.values().map(Vec::len).sum()
    }

    /// Number of tasks in the graph.
    pub fn task_count(&self) -> usize {
        self.edges.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(from: &str, to: &str, kind: DependencyKind, strength: f64) -> DependencyEdge {
        DependencyEdge::new(from.into(), to.into(), kind, strength)
    }

    #[test]
    fn test_self_edges_rejected() {
        let mut graph = DependencyGraph::new();
        assert!(!graph.add_edge(edge("a", "a", DependencyKind::Sequential, 0.5)));
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_strength_clamped() {
        assert_eq!(edge("a", "b", DependencyKind::Analysis, 1.7).strength, 1.0);
        assert_eq!(edge("a", "b", DependencyKind::Analysis, -0.2).strength, 0.0);
    }

    #[test]
    fn test_effective_strength_is_max() {
        let mut graph = DependencyGraph::new();
        graph.add_edge(edge("a", "b", DependencyKind::Implementation, 0.5));
        graph.add_edge(edge("a", "b", DependencyKind::Priority, 0.7));
        graph.add_edge(edge("c", "b", DependencyKind::Sequential, 0.9));

        assert_eq!(graph.effective_strength(&"a".into(), &"b".into()), Some(0.7));
        assert_eq!(graph.effective_strength(&"b".into(), &"a".into()), None);
        assert_eq!(graph.max_strength(&"b".into()), 0.9);
        assert_eq!(graph.prerequisites(&"b".into(), 0.7).len(), 2);
    }

    #[test]
    fn test_derived_sets() {
        let mut graph = DependencyGraph::new();
        for id in ["a", "b", "c"] {
            graph.add_task(id.into());
        }
        graph.add_edge(edge("a", "b", DependencyKind::Priority, 0.7));
        graph.add_edge(edge("a", "c", DependencyKind::Implementation, 0.2));

        assert_eq!(graph.parallelizable(0.3), vec![TaskId::from("a"), TaskId::from("c")]);
        assert_eq!(graph.sequential_chain(0.7), vec![TaskId::from("b")]);
        assert_eq!(graph.task_count(), 3);
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        let json = serde_json::to_string(&DependencyKind::Verification).unwrap();
        assert_eq!(json, "\"verification\"");
        assert_eq!(DependencyKind::Priority.as_str(), "priority");
    }
}
