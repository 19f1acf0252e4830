//! Report presentation.
//!
//! Pure formatting over an `AnalysisReport`; rounding happens only here.

use anyhow::{Context, Result};
use serde::Serialize;
use todoplan_progress::AnalysisReport;

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    /// Pretty-printed JSON
    Json,
    /// Human-readable summary
    Text,
}

#[derive(Serialize)]
struct Entry<'a> {
    source: &'a str,
    report: &'a AnalysisReport,
}

/// Render reports. A single report is printed bare; several are labelled by source.
pub fn render(reports: &[(&str, &AnalysisReport)], format: Format) -> Result<String> {
    match format {
        Format::Json => match reports {
            [(_, report)] => serde_json::to_string_pretty(report).context("Failed to serialize report"),
            _ => {
                let entries: Vec<_> = reports
                    .iter()
                    .map(|&(source, report)| Entry { source, report })
                    .collect();
                serde_json::to_string_pretty(&entries).context("Failed to serialize reports")
            }
        },
        Format::Text => {
            let single = reports.len() == 1;
            Ok(reports
                .iter()
                .map(|(source, report)| {
                    if single {
                        render_text(report)
                    } else {
                        format!("== {} ==\n{}", source, render_text(report))
                    }
                })
                .collect::<Vec<_>>()
                .join("\n"))
        }
    }
}

fn percent(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

/// Human-readable summary of one report.
pub fn render_text(report: &AnalysisReport) -> String {
    let cost = &report.cost_estimate;
    let mut out = String::new();

    out.push_str(&format!(
        "Tasks: {}  Dependencies: {}  Levels: {}  Groups: {}\n",
        report.tasks.len(),
        report.dependency_graph.edge_count(),
        report.execution_levels.len(),
        report.parallel_groups.len(),
    ));
    out.push_str(&format!(
        "Sequential: {:.2} min  Parallel: {:.2} min  Savings: {}\n",
        cost.sequential_time,
        cost.parallel_time,
        percent(cost.time_savings),
    ));
    out.push_str(&format!(
        "Net benefit: {} (threshold {}) -> {}\n",
        percent(cost.net_benefit),
        percent(cost.threshold),
        if cost.passes_threshold { "parallel" } else { "sequential" },
    ));

    out.push_str("\nExecution levels:\n");
    for level in &report.execution_levels {
        let ids: Vec<_> = level.tasks.iter().map(|t| t.as_str()).collect();
        out.push_str(&format!(
            "  {}. [{}] {:.2} min{}\n",
            level.index + 1,
            ids.join(", "),
            level.estimated_duration,
            if level.forced { " (forced: cycle)" } else { "" },
        ));
    }

    if !report.parallel_groups.is_empty() {
        out.push_str("\nParallel groups:\n");
        for group in &report.parallel_groups {
            let ids: Vec<_> = group.tasks.iter().map(|t| t.as_str()).collect();
            out.push_str(&format!(
                "  - {}: {} (speedup {}x)\n",
                group.label(),
                ids.join(", "),
                group.estimated_speedup,
            ));
        }
    }

    let ungrouped = report.ungrouped();
    if !ungrouped.is_empty() {
        let ids: Vec<_> = ungrouped.iter().map(|t| t.as_str()).collect();
        out.push_str(&format!("\nUngrouped: {}\n", ids.join(", ")));
    }

    out.push_str("\nRecommendations:\n");
    for rec in &report.recommendations {
        out.push_str(&format!("  [{}] {}: {}\n", rec.priority.as_str(), rec.kind.as_str(), rec.title));
        out.push_str(&format!("      {}\n", rec.description));
    }

    if report.had_cycle {
        out.push_str("\nWarning: dependency cycle detected; ordering around it is arbitrary.\n");
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use todoplan_core::{PlannerConfig, Priority, Task};
    use todoplan_progress::Planner;

    fn report(tasks: Vec<Task>) -> AnalysisReport {
        Planner::new(PlannerConfig::default()).unwrap().analyze(tasks).unwrap()
    }

    #[test]
    fn test_text_summary() {
        let report = report(vec![Task::new("a", "paint the fence"), Task::new("b", "order new chairs")]);
        let text = render_text(&report);

        assert!(text.contains("Tasks: 2  Dependencies: 0  Levels: 1  Groups: 1"));
        assert!(text.contains("Sequential: 10.00 min  Parallel: 5.00 min  Savings: 50.00%"));
        assert!(text.contains("Net benefit: 34.00% (threshold 30.00%) -> parallel"));
        assert!(text.contains("  1. [a, b] 5.00 min"));
        assert!(text.contains("  - independent: a, b (speedup 2x)"));
        assert!(text.contains("[HIGH] PARALLEL_GROUP"));
        assert!(!text.contains("Warning"));
        assert!(!text.contains("Ungrouped"));
    }

    #[test]
    fn test_text_lists_ungrouped_tasks() {
        let report = report(vec![Task::new("solo", "tidy desk")]);
        assert!(render_text(&report).contains("Ungrouped: solo"));
    }

    #[test]
    fn test_text_marks_cycles() {
        let report = report(vec![
            Task::new("a", "fix parser bug before lexer fix").with_priority(Priority::High),
            Task::new("b", "fix lexer bug before parser fix").with_priority(Priority::High),
        ]);
        let text = render_text(&report);
        assert!(text.contains("(forced: cycle)"));
        assert!(text.contains("Warning: dependency cycle detected"));
        assert!(text.contains("  2. [b]"));
    }

    #[test]
    fn test_json_single_and_many() {
        let one = report(vec![Task::new("a", "tidy desk")]);
        let two = report(vec![Task::new("x", "paint fence"), Task::new("y", "order chairs")]);

        let single: serde_json::Value =
            serde_json::from_str(&render(&[("one.json", &one)], Format::Json).unwrap()).unwrap();
        assert!(single.get("costEstimate").is_some());

        let many: serde_json::Value =
            serde_json::from_str(&render(&[("one.json", &one), ("two.json", &two)], Format::Json).unwrap())
                .unwrap();
        assert_eq!(many.as_array().unwrap().len(), 2);
        assert_eq!(many[1]["source"], "two.json");
        assert!(many[1]["report"]["parallelGroups"].is_array());
    }

    #[test]
    fn test_text_many_is_labelled() {
        let one = report(vec![Task::new("a", "tidy desk")]);
        let text = render(&[("one.json", &one), ("again.json", &one)], Format::Text).unwrap();
        assert!(text.contains("== one.json =="));
        assert!(text.contains("== again.json =="));
    }
}
