//! JSON artifact writing and console summary rendering.

use crate::models::{percentage, ComprehensiveStats};
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

/// Write a JSON artifact with human-readable indentation.
pub fn write_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let content = serde_json::to_string_pretty(value).context("Failed to serialize artifact")?;
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Load a previously persisted comprehensive report.
pub fn load_report(path: &Path) -> Result<ComprehensiveStats> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read prior report: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Malformed prior report: {}", path.display()))
}

/// Number of labels shown in the console summary.
const SUMMARY_LABEL_LIMIT: usize = 10;

/// Render the summary tables printed after an aggregation run.
pub fn render_summary(report: &ComprehensiveStats) -> String {
    let mut lines = Vec::new();
    let total = report.overview.total_conversations;

    lines.push("🎯 Overall Statistics:".to_string());
    lines.push(format!("   Total Conversations: {}", total));
    lines.push(format!(
        "   Total Files Processed: {}",
        report.overview.total_files_processed
    ));

    lines.push(String::new());
    lines.push("👥 Assignee Breakdown:".to_string());
    for (assignee, count) in &report.assignee_breakdown {
        lines.push(format!(
            "   {}: {} conversations ({:.1}%)",
            assignee,
            count,
            percentage(*count, total)
        ));
    }

    lines.push(String::new());
    lines.push("🏷️  Label Analysis:".to_string());
    if report.label_analysis.is_empty() {
        lines.push("   No label data found".to_string());
    } else {
        let mut labels: Vec<_> = report.label_analysis.iter().collect();
        // Stable sort keeps first-encounter order between equal counts.
        labels.sort_by(|a, b| b.1.cmp(a.1));
        for (label, count) in labels.into_iter().take(SUMMARY_LABEL_LIMIT) {
            lines.push(format!(
                "   {}: {} ({:.1}%)",
                label,
                count,
                percentage(*count, total)
            ));
        }
    }

    lines.push(String::new());
    lines.push("📊 Effectiveness Analysis:".to_string());
    let metrics = [
        ("Reengagement", report.effectiveness_stats.reengagement),
        ("Sale", report.effectiveness_stats.sale),
        ("Bot Can Do", report.effectiveness_stats.bot_can_do),
    ];
    for (name, tally) in metrics {
        if tally.total() > 0 {
            lines.push(format!("   {}:", name));
            lines.push(format!(
                "     YES: {} ({:.1}%)",
                tally.yes,
                percentage(tally.yes, tally.total())
            ));
            lines.push(format!(
                "     NO: {} ({:.1}%)",
                tally.no,
                percentage(tally.no, tally.total())
            ));
        }
    }

    lines.push(String::new());
    lines.push("📈 Performance Metrics:".to_string());
    lines.push(format!(
        "   Reengagement Rate: {:.1}%",
        report.performance_metrics.reengagement_rate
    ));
    lines.push(format!(
        "   Sales Rate: {:.1}%",
        report.performance_metrics.sales_rate
    ));
    lines.push(format!(
        "   Bot Success Rate: {:.1}%",
        report.performance_metrics.bot_success_rate
    ));

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::RunTotals;
    use crate::models::{EffectivenessStats, YesNoCount};

    fn sample_report() -> ComprehensiveStats {
        let mut totals = RunTotals {
            total_conversations: 100,
            effectiveness: EffectivenessStats {
                reengagement: YesNoCount { yes: 25, no: 50 },
                sale: YesNoCount { yes: 10, no: 65 },
                bot_can_do: YesNoCount::default(),
            },
            ..Default::default()
        };
        totals.assignee_breakdown.insert("Sawwaf".to_string(), 100);
        totals.label_counts.insert("greeting".to_string(), 60);
        totals.label_counts.insert("complaint".to_string(), 40);
        totals.into_report(1, "2025-08-01".to_string())
    }

    #[test]
    fn test_write_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("comprehensive_statistics.json");

        let report = sample_report();
        write_json(&report, &path).unwrap();
        let loaded = load_report(&path).unwrap();

        assert_eq!(loaded.overview.total_conversations, 100);
        assert_eq!(loaded.label_analysis.get("greeting"), Some(&60));
        assert_eq!(
            loaded.effectiveness_stats.reengagement,
            YesNoCount { yes: 25, no: 50 }
        );
    }

    #[test]
    fn test_artifact_key_order_is_preserved() {
        let report = sample_report();
        let json = serde_json::to_string_pretty(&report).unwrap();
        let greeting = json.find("\"greeting\"").unwrap();
        let complaint = json.find("\"complaint\"").unwrap();
        assert!(greeting < complaint);
    }

    #[test]
    fn test_load_missing_report_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_report(&dir.path().join("absent.json")).is_err());
    }

    #[test]
    fn test_load_malformed_report_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(load_report(&path).is_err());
    }

    #[test]
    fn test_render_summary_sections() {
        let summary = render_summary(&sample_report());

        assert!(summary.contains("Total Conversations: 100"));
        assert!(summary.contains("Sawwaf: 100 conversations (100.0%)"));
        assert!(summary.contains("greeting: 60 (60.0%)"));
        assert!(summary.contains("Reengagement Rate: 25.0%"));
        // Untracked metric has no yes/no block.
        assert!(!summary.contains("Bot Can Do:\n"));
    }

    #[test]
    fn test_render_summary_empty_run() {
        let report = RunTotals::default().into_report(0, "2025-08-01".to_string());
        let summary = render_summary(&report);

        assert!(summary.contains("Total Conversations: 0"));
        assert!(summary.contains("No label data found"));
        assert!(summary.contains("Reengagement Rate: 0.0%"));
    }
}
