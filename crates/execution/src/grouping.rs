//! Parallel group planning.
//!
//! Groups are formed greedily in a fixed precedence order:
//! ```text
//! independent -> domain -> low-dependency
//! ```
//! Each pass receives the tasks the previous passes left over and returns the
//! groups it formed plus its own leftovers. A task lands in at most one group.

use serde::{Deserialize, Serialize};
use todoplan_core::{DependencyGraph, PlannerConfig, TaskArena, TaskId};
use tracing::debug;

/// How a group was formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKind {
    /// Tasks with no dependencies at all
    Independent,
    /// Tasks sharing a work domain
    Domain,
    /// Tasks with only weak dependencies
    LowDependency,
}

impl GroupKind {
    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupKind::Independent => "independent",
            GroupKind::Domain => "domain",
            GroupKind::LowDependency => "low_dependency",
        }
    }
}

/// Work domain inferred from task content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    /// Tests and verification
    Testing,
    /// Building new things
    Implementation,
    /// Fixing things
    Debugging,
    /// Writing docs
    Documentation,
    /// Research and review
    Analysis,
    /// Anything else
    General,
}

impl Domain {
    /// Domains in classification order, with their keywords.
    const KEYWORDS: &'static [(Domain, &'static [&'static str])] = &[
        (Domain::Testing, &["test", "verify", "validate"]),
        (Domain::Implementation, &["implement", "create", "build", "develop"]),
        (Domain::Debugging, &["fix", "debug", "resolve", "bug"]),
        (Domain::Documentation, &["document", "docs", "readme", "write"]),
        (Domain::Analysis, &["analyze", "analyse", "research", "investigate", "review"]),
    ];

    /// Classify content. The first domain with a matching keyword wins.
    pub fn classify(content: &str) -> Domain {
        let lowered = content.to_lowercase();
        Self::KEYWORDS
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| lowered.contains(k)))
            .map(|(domain, _)| *domain)
            .unwrap_or(Domain::General)
    }

    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Testing => "testing",
            Domain::Implementation => "implementation",
            Domain::Debugging => "debugging",
            Domain::Documentation => "documentation",
            Domain::Analysis => "analysis",
            Domain::General => "general",
        }
    }
}

/// Tasks judged safe to run concurrently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParallelGroup {
    /// How the group was formed
    pub kind: GroupKind,
    /// Domain, for domain groups
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<Domain>,
    /// Member tasks in input order
    pub tasks: Vec<TaskId>,
    /// Fixed per kind
    pub parallel_potential: f64,
    /// Bounded by the agent limit and, for some kinds, a tighter cap
    pub estimated_speedup: usize,
}

impl ParallelGroup {
    /// Number of member tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the group has no members.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Short human-readable label.
    pub fn label(&self) -> String {
        match self.domain {
            Some(domain) => format!("{} ({})", self.kind.as_str(), domain.as_str()),
            None => self.kind.as_str().to_string(),
        }
    }
}

/// Partitions tasks into parallel groups.
pub struct GroupPlanner<'a> {
    config: &'a PlannerConfig,
}

/// Output of one grouping pass.
struct Pass {
    groups: Vec<ParallelGroup>,
    leftover: Vec<usize>,
}

impl<'a> GroupPlanner<'a> {
    /// Create a planner.
    pub fn new(config: &'a PlannerConfig) -> Self {
        Self { config }
    }

    /// Plan groups. Tasks matching no rule stay ungrouped.
    pub fn plan(&self, arena: &TaskArena, graph: &DependencyGraph) -> Vec<ParallelGroup> {
        let all: Vec<usize> = (0..arena.len()).collect();

        let independent = self.independent_pass(&all, arena, graph);
        let domain = self.domain_pass(&independent.leftover, arena);
        let low = self.low_dependency_pass(&domain.leftover, arena, graph);

        debug!(
            "Formed {} independent, {} domain, {} low-dependency groups; {} tasks ungrouped",
            independent.groups.len(),
            domain.groups.len(),
            low.groups.len(),
            low.leftover.len()
        );

        let mut groups = independent.groups;
        groups.extend(domain.groups);
        groups.extend(low.groups);
        groups
    }

    fn independent_pass(&self, candidates: &[usize], arena: &TaskArena, graph: &DependencyGraph) -> Pass {
        let (members, leftover) = partition(candidates, |i| {
            arena
                .get(i)
                .map_or(false, |t| graph.dependencies_of(&t.id).is_empty())
        });

        if members.len() < self.config.grouping.min_group_size {
            return Pass { groups: Vec::new(), leftover: candidates.to_vec() };
        }

        let group = self.group(
            GroupKind::Independent,
            None,
            arena,
            &members,
            self.config.grouping.independent_potential,
            self.config.max_agents,
        );
        Pass { groups: vec![group], leftover }
    }

    fn domain_pass(&self, candidates: &[usize], arena: &TaskArena) -> Pass {
        // Buckets in first-seen order.
        let mut buckets: Vec<(Domain, Vec<usize>)> = Vec::new();
        for &i in candidates {
            let Some(task) = arena.get(i) else { continue };
            let domain = Domain::classify(&task.content);
            match buckets.iter_mut().find(|(d, _)| *d == domain) {
                Some((_, members)) => members.push(i),
                None => buckets.push((domain, vec![i])),
            }
        }

        let mut groups = Vec::new();
        let mut grouped = Vec::new();
        for (domain, members) in buckets {
            if members.len() < self.config.grouping.min_group_size {
                continue;
            }
            groups.push(self.group(
                GroupKind::Domain,
                Some(domain),
                arena,
                &members,
                self.config.grouping.domain_potential,
                self.config.grouping.domain_speedup_cap,
            ));
            grouped.extend(members);
        }

        let leftover = candidates.iter().copied().filter(|i| !grouped.contains(i)).collect();
        Pass { groups, leftover }
    }

    fn low_dependency_pass(&self, candidates: &[usize], arena: &TaskArena, graph: &DependencyGraph) -> Pass {
        let cutoff = self.config.grouping.low_dependency_cutoff;
        let (members, leftover) = partition(candidates, |i| {
            arena.get(i).map_or(false, |t| {
                graph.dependencies_of(&t.id).iter().all(|e| e.strength < cutoff)
            })
        });

        if members.len() < self.config.grouping.min_group_size {
            return Pass { groups: Vec::new(), leftover: candidates.to_vec() };
        }

        let group = self.group(
            GroupKind::LowDependency,
            None,
            arena,
            &members,
            self.config.grouping.low_dependency_potential,
            self.config.grouping.low_dependency_speedup_cap,
        );
        Pass { groups: vec![group], leftover }
    }

    fn group(
        &self,
        kind: GroupKind,
        domain: Option<Domain>,
        arena: &TaskArena,
        members: &[usize],
        parallel_potential: f64,
        cap: usize,
    ) -> ParallelGroup {
        ParallelGroup {
            kind,
            domain,
            tasks: arena.ids_of(members),
            parallel_potential,
            estimated_speedup: members.len().min(cap).min(self.config.max_agents),
        }
    }
}

fn partition(candidates: &[usize], pred: impl Fn(usize) -> bool) -> (Vec<usize>, Vec<usize>) {
    candidates.iter().copied().partition(|&i| pred(i))
}

#[cfg(test)]
mod tests {
    use super::*;
    use todoplan_core::{DependencyEdge, DependencyKind, Task};

    fn arena(tasks: Vec<Task>) -> TaskArena {
        TaskArena::new(tasks).unwrap()
    }

    fn graph_for(arena: &TaskArena, edges: &[(&str, &str, f64)]) -> DependencyGraph {
        let mut graph = DependencyGraph::new();
        for task in arena.iter() {
            graph.add_task(task.id.clone());
        }
        for (from, to, strength) in edges {
            graph.add_edge(DependencyEdge::new(
                (*from).into(),
                (*to).into(),
                DependencyKind::Sequential,
                *strength,
            ));
        }
        graph
    }

    #[test]
    fn test_domain_classification() {
        assert_eq!(Domain::classify("Write unit tests"), Domain::Testing);
        assert_eq!(Domain::classify("implement cache"), Domain::Implementation);
        assert_eq!(Domain::classify("fix crash on start"), Domain::Debugging);
        assert_eq!(Domain::classify("update README"), Domain::Documentation);
        assert_eq!(Domain::classify("research vendors"), Domain::Analysis);
        assert_eq!(Domain::classify("water plants"), Domain::General);
    }

    #[test]
    fn test_independent_group() {
        let arena = arena(vec![Task::new("a", "paint fence"), Task::new("b", "order chairs")]);
        let graph = graph_for(&arena, &[]);
        let config = PlannerConfig::default();
        let groups = GroupPlanner::new(&config).plan(&arena, &graph);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].kind, GroupKind::Independent);
        assert_eq!(groups[0].estimated_speedup, 2);
        assert_eq!(groups[0].parallel_potential, 0.9);
    }

    #[test]
    fn test_independent_speedup_capped_by_max_agents() {
        let tasks = (0..6).map(|i| Task::new(format!("t{}", i), format!("chore {}", i))).collect();
        let arena = arena(tasks);
        let graph = graph_for(&arena, &[]);
        let config = PlannerConfig::default().with_max_agents(4);
        let groups = GroupPlanner::new(&config).plan(&arena, &graph);
        assert_eq!(groups[0].len(), 6);
        assert_eq!(groups[0].estimated_speedup, 4);
    }

    #[test]
    fn test_single_independent_task_falls_through() {
        let arena = arena(vec![
            Task::new("a", "test login"),
            Task::new("b", "test signup"),
            Task::new("c", "paint fence"),
        ]);
        let graph = graph_for(&arena, &[("c", "a", 0.9), ("c", "b", 0.9)]);
        let config = PlannerConfig::default();
        let groups = GroupPlanner::new(&config).plan(&arena, &graph);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].kind, GroupKind::Domain);
        assert_eq!(groups[0].domain, Some(Domain::Testing));
        assert_eq!(groups[0].tasks, vec![TaskId::from("a"), TaskId::from("b")]);
    }

    #[test]
    fn test_precedence_and_exclusivity() {
        let arena = arena(vec![
            Task::new("free1", "paint fence"),
            Task::new("free2", "order chairs"),
            Task::new("t1", "test api"),
            Task::new("t2", "verify api"),
            Task::new("x", "fix crash"),
            Task::new("y", "water plants"),
            Task::new("z", "investigate outage"),
        ]);
        let graph = graph_for(
            &arena,
            &[
                ("free1", "t1", 0.9),
                ("free1", "t2", 0.9),
                ("free1", "x", 0.4),
                ("free2", "y", 0.2),
                ("free2", "z", 0.9),
            ],
        );
        let config = PlannerConfig::default();
        let groups = GroupPlanner::new(&config).plan(&arena, &graph);

        let kinds: Vec<_> = groups.iter().map(|g| g.kind).collect();
        assert_eq!(kinds, vec![GroupKind::Independent, GroupKind::Domain, GroupKind::LowDependency]);
        assert_eq!(groups[1].estimated_speedup, 2);
        assert_eq!(groups[2].tasks, vec![TaskId::from("x"), TaskId::from("y")]);
        assert_eq!(groups[2].parallel_potential, 0.5);

        let mut seen = std::collections::HashSet::new();
        for group in &groups {
            for id in &group.tasks {
                assert!(seen.insert(id.clone()), "{} grouped twice", id);
            }
        }
        assert!(!seen.contains(&TaskId::from("z")));
    }

    #[test]
    fn test_domain_speedup_cap() {
        let tasks = (0..5).map(|i| Task::new(format!("t{}", i), format!("test module {}", i))).collect();
        let arena = arena(tasks);
        let graph = graph_for(
            &arena,
            &[("t1", "t0", 0.9), ("t0", "t1", 0.9), ("t0", "t2", 0.9), ("t0", "t3", 0.9), ("t0", "t4", 0.9)],
        );

        let config = PlannerConfig::default();
        let groups = GroupPlanner::new(&config).plan(&arena, &graph);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].len(), 5);
        assert_eq!(groups[0].estimated_speedup, 3);
        assert_eq!(groups[0].label(), "domain (testing)");
    }
}
