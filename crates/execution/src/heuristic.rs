//! Pluggable dependency inference strategies.
//!
//! A heuristic looks at an ordered pair `(task, other)` and may claim that
//! `task` depends on `other`. The analyzer runs every installed heuristic over
//! every ordered pair; heuristics never see the graph being built.

use regex::Regex;
use std::collections::HashSet;
use todoplan_core::{DependencyConfig, DependencyEdge, DependencyKind, Error, Result, Task};

/// Pre-computed text features of one task.
#[derive(Debug, Clone)]
pub struct TaskText<'a> {
    /// The task
    pub task: &'a Task,
    /// Lower-cased content
    pub lowered: String,
    /// Distinct lower-cased whitespace tokens
    pub tokens: HashSet<String>,
    /// Ordering keyword occurrences in the content
    pub keyword_hits: usize,
}

impl<'a> TaskText<'a> {
    /// Extract features, counting ordering keywords with `keywords`.
    pub fn new(task: &'a Task, keywords: Option<&Regex>) -> Self {
        let lowered = task.normalized_content();
        let tokens = lowered.split_whitespace().map(str::to_string).collect();
        let keyword_hits = keywords.map_or(0, |k| k.find_iter(&lowered).count());
        Self {
            task,
            lowered,
            tokens,
            keyword_hits,
        }
    }

    /// Number of distinct tokens shared with another task.
    pub fn shared_tokens(&self, other: &TaskText<'_>) -> usize {
        self.tokens.intersection(&other.tokens).count()
    }
}

/// Build the matcher that counts ordering keywords at word starts.
///
/// Returns `None` for an empty keyword list.
pub fn keyword_matcher(keywords: &[String]) -> Result<Option<Regex>> {
    if keywords.is_empty() {
        return Ok(None);
    }
    let alternation = keywords
        .iter()
        .map(|k| regex::escape(&k.to_lowercase()))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"\b(?:{})", alternation))
        .map(Some)
        .map_err(|e| Error::Pattern(e.to_string()))
}

/// A dependency inference strategy.
pub trait DependencyHeuristic: Send + Sync {
    /// Kind of edge this heuristic produces.
    fn kind(&self) -> DependencyKind;

    /// Return an edge if `task` appears to depend on `other`.
    fn infer(
        &self,
        task: &TaskText<'_>,
        other: &TaskText<'_>,
        config: &DependencyConfig,
    ) -> Option<DependencyEdge>;
}

/// Ordering language in the dependent task's text plus content overlap.
///
/// `strength = min(overlap_weight + keyword_weight * keywords, 1.0)` where
/// `keywords` counts ordering keywords in both texts.
#[derive(Debug, Clone)]
pub struct PatternHeuristic {
    kind: DependencyKind,
    pattern: Regex,
}

impl PatternHeuristic {
    /// Create a heuristic from a regular expression over lower-cased content.
    pub fn new(kind: DependencyKind, pattern: &str) -> Result<Self> {
        let pattern = Regex::new(pattern).map_err(|e| Error::Pattern(e.to_string()))?;
        Ok(Self { kind, pattern })
    }
}

impl DependencyHeuristic for PatternHeuristic {
    fn kind(&self) -> DependencyKind {
        self.kind
    }

    fn infer(
        &self,
        task: &TaskText<'_>,
        other: &TaskText<'_>,
        config: &DependencyConfig,
    ) -> Option<DependencyEdge> {
        if !self.pattern.is_match(&task.lowered) {
            return None;
        }

        let shared = task.shared_tokens(other);
        if shared < config.min_shared_tokens {
            tracing::trace!(
                "{} pattern matched {} but only {} shared tokens with {}",
                self.kind.as_str(),
                task.task.id,
                shared,
                other.task.id
            );
            return None;
        }

        let keywords = (task.keyword_hits + other.keyword_hits) as f64;
        let strength = (config.overlap_weight + config.keyword_weight * keywords).min(1.0);

        Some(DependencyEdge::new(
            other.task.id.clone(),
            task.task.id.clone(),
            self.kind,
            strength,
        ))
    }
}

/// High-priority tasks softly block tasks that are not high priority.
#[derive(Debug, Clone, Default)]
pub struct PriorityHeuristic;

impl DependencyHeuristic for PriorityHeuristic {
    fn kind(&self) -> DependencyKind {
        DependencyKind::Priority
    }

    fn infer(
        &self,
        task: &TaskText<'_>,
        other: &TaskText<'_>,
        config: &DependencyConfig,
    ) -> Option<DependencyEdge> {
        if other.task.priority.is_high() && !task.task.priority.is_high() {
            Some(DependencyEdge::new(
                other.task.id.clone(),
                task.task.id.clone(),
                DependencyKind::Priority,
                config.priority_strength,
            ))
        } else {
            None
        }
    }
}

/// Built-in ordering patterns, one per pattern kind.
pub const DEFAULT_PATTERNS: &[(DependencyKind, &str)] = &[
    (DependencyKind::Implementation, r"\b(?:implement|build|create)\w*\b.*\bafter\b"),
    (DependencyKind::Verification, r"\b(?:test|verify|validate)\w*\b.*\bafter\b"),
    (DependencyKind::Documentation, r"\b(?:document|docs?)\w*\b.*\bafter\b"),
    (DependencyKind::Analysis, r"\b(?:analy[sz]e|research|investigate)\w*\b.*\bbefore\b"),
    (DependencyKind::Sequential, r"\b(?:fix|resolve|debug)\w*\b.*\bbefore\b|\bfirst\b.*\bthen\b"),
];

/// The default heuristic set: every built-in pattern followed by the priority rule.
pub fn default_heuristics() -> Result<Vec<Box<dyn DependencyHeuristic>>> {
    let mut heuristics: Vec<Box<dyn DependencyHeuristic>> = Vec::with_capacity(DEFAULT_PATTERNS.len() + 1);
    for (kind, pattern) in DEFAULT_PATTERNS {
        heuristics.push(Box::new(PatternHeuristic::new(*kind, pattern)?));
    }
    heuristics.push(Box::new(PriorityHeuristic));
    Ok(heuristics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use todoplan_core::Priority;

    fn text<'a>(task: &'a Task) -> TaskText<'a> {
        let keywords = keyword_matcher(&DependencyConfig::default().ordering_keywords).unwrap();
        TaskText::new(task, keywords.as_ref())
    }

    #[test]
    fn test_keyword_hits_count_occurrences() {
        let task = Task::new("a", "First design, then build after review; requires sign-off");
        assert_eq!(text(&task).keyword_hits, 4);
    }

    #[test]
    fn test_empty_keyword_list_counts_nothing() {
        assert!(keyword_matcher(&[]).unwrap().is_none());
        let task = Task::new("a", "before after then");
        assert_eq!(TaskText::new(&task, None).keyword_hits, 0);
    }

    #[test]
    fn test_pattern_requires_overlap() {
        let heuristic = PatternHeuristic::new(DependencyKind::Sequential, DEFAULT_PATTERNS[4].1).unwrap();
        let fix = Task::new("1", "fix bug before release");
        let changelog = Task::new("2", "update changelog");

        let edge = heuristic.infer(&text(&fix), &text(&changelog), &DependencyConfig::default());
        assert!(edge.is_none());
    }

    #[test]
    fn test_pattern_edge_direction_and_strength() {
        let heuristic = PatternHeuristic::new(DependencyKind::Implementation, DEFAULT_PATTERNS[0].1).unwrap();
        let implement = Task::new("1", "implement login after design");
        let design = Task::new("2", "design login schema");

        let edge = heuristic
            .infer(&text(&implement), &text(&design), &DependencyConfig::default())
            .unwrap();
        assert_eq!(edge.from.as_str(), "2");
        assert_eq!(edge.to.as_str(), "1");
        assert_eq!(edge.kind, DependencyKind::Implementation);
        assert!((edge.strength - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_pattern_strength_capped() {
        let heuristic = PatternHeuristic::new(DependencyKind::Verification, DEFAULT_PATTERNS[1].1).unwrap();
        let a = Task::new("a", "test api after first deploy then after review before release");
        let b = Task::new("b", "deploy api first then require approval before after");

        let edge = heuristic.infer(&text(&a), &text(&b), &DependencyConfig::default()).unwrap();
        assert_eq!(edge.strength, 1.0);
    }

    #[test]
    fn test_priority_rule() {
        let high = Task::new("h", "ship release").with_priority(Priority::High);
        let low = Task::new("l", "tidy readme").with_priority(Priority::Low);
        let other_high = Task::new("h2", "hotfix").with_priority(Priority::High);
        let config = DependencyConfig::default();

        let edge = PriorityHeuristic.infer(&text(&low), &text(&high), &config).unwrap();
        assert_eq!(edge.from.as_str(), "h");
        assert_eq!(edge.to.as_str(), "l");
        assert_eq!(edge.strength, 0.7);

        assert!(PriorityHeuristic.infer(&text(&high), &text(&low), &config).is_none());
        assert!(PriorityHeuristic.infer(&text(&high), &text(&other_high), &config).is_none());
    }

    #[test]
    fn test_default_heuristics_cover_every_kind() {
        let kinds: Vec<_> = default_heuristics().unwrap().iter().map(|h| h.kind()).collect();
        assert_eq!(kinds.len(), 6);
        assert_eq!(kinds[0], DependencyKind::Implementation);
        assert_eq!(kinds[5], DependencyKind::Priority);
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        assert!(matches!(
            PatternHeuristic::new(DependencyKind::Analysis, "(unclosed"),
            Err(Error::Pattern(_))
        ));
    }
}
