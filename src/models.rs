//! Data models for the labeling statistics pipeline.
//!
//! This module contains the structures persisted as JSON artifacts:
//! the comprehensive statistics report, the extracted document record,
//! and the dashboard dataset derived from the report.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Yes/no tally for a single boolean-outcome column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct YesNoCount {
    pub yes: u64,
    pub no: u64,
}

impl YesNoCount {
    /// Add another tally into this one.
    pub fn add(&mut self, other: YesNoCount) {
        self.yes += other.yes;
        self.no += other.no;
    }

    /// Total number of counted values.
    pub fn total(&self) -> u64 {
        self.yes + self.no
    }
}

/// Accumulated tallies for the three tracked outcome columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectivenessStats {
    pub reengagement: YesNoCount,
    pub sale: YesNoCount,
    pub bot_can_do: YesNoCount,
}

impl EffectivenessStats {
    /// Add another set of tallies into this one.
    pub fn add(&mut self, other: &EffectivenessStats) {
        self.reengagement.add(other.reengagement);
        self.sale.add(other.sale);
        self.bot_can_do.add(other.bot_can_do);
    }
}

/// Headline numbers of the comprehensive report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Overview {
    pub total_conversations: u64,
    pub total_files_processed: u64,
    /// Local date of the aggregation run, `YYYY-MM-DD`.
    pub processed_date: String,
}

/// Success rates derived from the effectiveness tallies, as percentages
/// of total conversations. Stored unrounded; rounding is display-only.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub reengagement_rate: f64,
    pub sales_rate: f64,
    pub bot_success_rate: f64,
}

impl PerformanceMetrics {
    /// Compute the rates against the given conversation total.
    pub fn derive(effectiveness: &EffectivenessStats, total_conversations: u64) -> Self {
        Self {
            reengagement_rate: percentage(effectiveness.reengagement.yes, total_conversations),
            sales_rate: percentage(effectiveness.sale.yes, total_conversations),
            bot_success_rate: percentage(effectiveness.bot_can_do.yes, total_conversations),
        }
    }
}

/// The canonical aggregated report, persisted as JSON and consumed by
/// the merge job and the dashboard derivation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComprehensiveStats {
    pub overview: Overview,
    /// Conversation counts per assignee, in first-encounter order.
    pub assignee_breakdown: IndexMap<String, u64>,
    /// Cumulative counts per label, in first-encounter order.
    pub label_analysis: IndexMap<String, u64>,
    pub effectiveness_stats: EffectivenessStats,
    pub performance_metrics: PerformanceMetrics,
    /// Document record embedded by the merge job.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub razan_word_data: Option<DocumentData>,
}

/// Record extracted from the free-text report document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentData {
    pub overview: DocumentOverview,
    /// Summed bracketed counts per case heading.
    pub case_statistics: IndexMap<String, u64>,
    /// Full concatenated paragraph text, kept for audit.
    pub raw_content: String,
}

/// Totals extracted from the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentOverview {
    pub total_conversations: u64,
    /// Conversation count per date heading line.
    pub dates: IndexMap<String, u64>,
    pub total_cases: u64,
}

/// Presentation-shaped dataset consumed by the visualization dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub overview: DashboardOverview,
    pub effectiveness: DashboardEffectiveness,
    pub labels: Vec<LabelSlice>,
    pub patterns: Vec<PatternSlice>,
    pub confidence_distribution: Vec<ConfidenceBucket>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardOverview {
    pub total_conversations: u64,
    pub average_confidence: f64,
    pub processed_date: String,
    pub assignee: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardEffectiveness {
    pub reengagement: YesNoCount,
    pub sale: YesNoCount,
    pub bot_can_do: YesNoCount,
}

/// One label with its share of all conversations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelSlice {
    pub name: String,
    pub value: u64,
    /// Percentage of total conversations, rounded to one decimal.
    pub percentage: f64,
}

/// One top-ranked label with its assigned palette color.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternSlice {
    pub name: String,
    pub value: u64,
    pub color: String,
}

/// One confidence histogram bucket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfidenceBucket {
    pub range: String,
    pub count: u64,
    pub color: String,
}

/// Percentage of `count` against `total`. A zero total yields 0.
pub fn percentage(count: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

/// Round a display value to one decimal place.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage() {
        assert_eq!(percentage(1, 4), 25.0);
        assert_eq!(percentage(0, 4), 0.0);
    }

    #[test]
    fn test_percentage_zero_total() {
        assert_eq!(percentage(0, 0), 0.0);
        assert_eq!(percentage(5, 0), 0.0);
    }

    #[test]
    fn test_round1() {
        assert_eq!(round1(33.333), 33.3);
        assert_eq!(round1(66.666), 66.7);
        assert_eq!(round1(0.0), 0.0);
    }

    #[test]
    fn test_yes_no_add() {
        let mut tally = YesNoCount { yes: 2, no: 1 };
        tally.add(YesNoCount { yes: 3, no: 4 });
        assert_eq!(tally, YesNoCount { yes: 5, no: 5 });
        assert_eq!(tally.total(), 10);
    }

    #[test]
    fn test_effectiveness_add() {
        let mut stats = EffectivenessStats::default();
        stats.add(&EffectivenessStats {
            reengagement: YesNoCount { yes: 1, no: 2 },
            sale: YesNoCount { yes: 3, no: 4 },
            bot_can_do: YesNoCount { yes: 5, no: 6 },
        });
        stats.add(&EffectivenessStats {
            reengagement: YesNoCount { yes: 1, no: 0 },
            sale: YesNoCount::default(),
            bot_can_do: YesNoCount { yes: 0, no: 1 },
        });
        assert_eq!(stats.reengagement, YesNoCount { yes: 2, no: 2 });
        assert_eq!(stats.sale, YesNoCount { yes: 3, no: 4 });
        assert_eq!(stats.bot_can_do, YesNoCount { yes: 5, no: 7 });
    }

    #[test]
    fn test_derive_metrics() {
        let effectiveness = EffectivenessStats {
            reengagement: YesNoCount { yes: 25, no: 75 },
            sale: YesNoCount { yes: 10, no: 90 },
            bot_can_do: YesNoCount { yes: 50, no: 50 },
        };
        let metrics = PerformanceMetrics::derive(&effectiveness, 100);
        assert_eq!(metrics.reengagement_rate, 25.0);
        assert_eq!(metrics.sales_rate, 10.0);
        assert_eq!(metrics.bot_success_rate, 50.0);
    }

    #[test]
    fn test_derive_metrics_zero_total() {
        let effectiveness = EffectivenessStats {
            reengagement: YesNoCount { yes: 3, no: 0 },
            ..Default::default()
        };
        let metrics = PerformanceMetrics::derive(&effectiveness, 0);
        assert_eq!(metrics.reengagement_rate, 0.0);
        assert_eq!(metrics.sales_rate, 0.0);
        assert_eq!(metrics.bot_success_rate, 0.0);
    }
}
