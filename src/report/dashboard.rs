//! Dashboard dataset derivation.
//!
//! Transforms the comprehensive report into the presentation shape the
//! visualization dashboard consumes: sorted label shares, a top-10
//! color-coded pattern list, and the static confidence buckets.

use crate::models::{
    percentage, round1, ComprehensiveStats, ConfidenceBucket, DashboardData,
    DashboardEffectiveness, DashboardOverview, LabelSlice, PatternSlice,
};

/// Cyclic palette assigned to the top patterns by rank.
pub const PATTERN_PALETTE: [&str; 10] = [
    "#FF6B6B", "#4ECDC4", "#45B7D1", "#96CEB4", "#FFEAA7", "#DDA0DD", "#FFB6C1", "#98FB98",
    "#F0E68C", "#D8BFD8",
];

/// Number of top labels surfaced as patterns.
pub const PATTERN_LIMIT: usize = 10;

/// Placeholder shown while no per-conversation confidence is tracked.
const AVERAGE_CONFIDENCE_PLACEHOLDER: f64 = 40.4;

const DASHBOARD_ASSIGNEE: &str = "All Team Members";

/// Derive the dashboard dataset from a comprehensive report.
pub fn derive_dashboard(report: &ComprehensiveStats) -> DashboardData {
    let total = report.overview.total_conversations;

    let mut labels: Vec<LabelSlice> = report
        .label_analysis
        .iter()
        .map(|(name, &value)| LabelSlice {
            name: name.clone(),
            value,
            percentage: round1(percentage(value, total)),
        })
        .collect();
    // Stable sort keeps first-encounter order between equal counts.
    labels.sort_by(|a, b| b.value.cmp(&a.value));

    let patterns = labels
        .iter()
        .take(PATTERN_LIMIT)
        .enumerate()
        .map(|(rank, label)| PatternSlice {
            name: label.name.clone(),
            value: label.value,
            color: PATTERN_PALETTE[rank % PATTERN_PALETTE.len()].to_string(),
        })
        .collect();

    DashboardData {
        overview: DashboardOverview {
            total_conversations: total,
            average_confidence: AVERAGE_CONFIDENCE_PLACEHOLDER,
            processed_date: report.overview.processed_date.clone(),
            assignee: DASHBOARD_ASSIGNEE.to_string(),
        },
        effectiveness: DashboardEffectiveness {
            reengagement: report.effectiveness_stats.reengagement,
            sale: report.effectiveness_stats.sale,
            bot_can_do: report.effectiveness_stats.bot_can_do,
        },
        labels,
        patterns,
        confidence_distribution: confidence_placeholder(),
    }
}

/// Static confidence histogram buckets.
fn confidence_placeholder() -> Vec<ConfidenceBucket> {
    let buckets = [
        ("0-20%", 25, "#FF6B6B"),
        ("20-40%", 45, "#FFA726"),
        ("40-60%", 36, "#66BB6A"),
        ("60-80%", 15, "#42A5F5"),
        ("80-100%", 9, "#AB47BC"),
    ];
    buckets
        .into_iter()
        .map(|(range, count, color)| ConfidenceBucket {
            range: range.to_string(),
            count,
            color: color.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::RunTotals;

    fn report_with_labels(labels: &[(&str, u64)]) -> ComprehensiveStats {
        let mut totals = RunTotals::default();
        for (name, count) in labels {
            totals.label_counts.insert(name.to_string(), *count);
            totals.total_conversations += count;
        }
        totals.into_report(1, "2025-08-01".to_string())
    }

    #[test]
    fn test_labels_sorted_by_count() {
        let dashboard = derive_dashboard(&report_with_labels(&[("a", 1), ("b", 5), ("c", 3)]));
        let names: Vec<_> = dashboard.labels.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_ties_keep_encounter_order() {
        let dashboard =
            derive_dashboard(&report_with_labels(&[("b", 2), ("a", 2), ("c", 5)]));
        let names: Vec<_> = dashboard.labels.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["c", "b", "a"]);
    }

    #[test]
    fn test_percentages_rounded() {
        let dashboard = derive_dashboard(&report_with_labels(&[("a", 1), ("b", 2)]));
        // 1 of 3 -> 33.3, 2 of 3 -> 66.7
        assert_eq!(dashboard.labels[0].percentage, 66.7);
        assert_eq!(dashboard.labels[1].percentage, 33.3);
    }

    #[test]
    fn test_zero_total_percentages() {
        let mut report = report_with_labels(&[]);
        report.label_analysis.insert("orphan".to_string(), 0);
        let dashboard = derive_dashboard(&report);
        assert_eq!(dashboard.labels[0].percentage, 0.0);
    }

    #[test]
    fn test_patterns_capped_at_ten() {
        let labels: Vec<(String, u64)> = (0..12).map(|i| (format!("l{}", i), 12 - i)).collect();
        let borrowed: Vec<(&str, u64)> =
            labels.iter().map(|(n, c)| (n.as_str(), *c)).collect();
        let dashboard = derive_dashboard(&report_with_labels(&borrowed));

        assert_eq!(dashboard.labels.len(), 12);
        assert_eq!(dashboard.patterns.len(), PATTERN_LIMIT);
    }

    #[test]
    fn test_pattern_colors_follow_rank() {
        let dashboard = derive_dashboard(&report_with_labels(&[("a", 3), ("b", 2), ("c", 1)]));
        assert_eq!(dashboard.patterns[0].color, PATTERN_PALETTE[0]);
        assert_eq!(dashboard.patterns[1].color, PATTERN_PALETTE[1]);
        assert_eq!(dashboard.patterns[2].color, PATTERN_PALETTE[2]);
    }

    #[test]
    fn test_overview_and_placeholders() {
        let dashboard = derive_dashboard(&report_with_labels(&[("a", 4)]));

        assert_eq!(dashboard.overview.total_conversations, 4);
        assert_eq!(dashboard.overview.average_confidence, 40.4);
        assert_eq!(dashboard.overview.assignee, "All Team Members");
        assert_eq!(dashboard.confidence_distribution.len(), 5);
        assert_eq!(dashboard.confidence_distribution[0].range, "0-20%");
        assert_eq!(dashboard.confidence_distribution[4].count, 9);
    }

    #[test]
    fn test_dashboard_serializes_camel_case() {
        let dashboard = derive_dashboard(&report_with_labels(&[("a", 4)]));
        let json = serde_json::to_string(&dashboard).unwrap();

        assert!(json.contains("\"totalConversations\""));
        assert!(json.contains("\"averageConfidence\""));
        assert!(json.contains("\"botCanDo\""));
        assert!(json.contains("\"confidenceDistribution\""));
    }
}
