//! Sheet summarization and run-wide accumulation.
//!
//! Each sheet reduces to a [`SheetSummary`]; summaries fold into
//! [`RunTotals`], which finalizes into the comprehensive report. The
//! accumulators are plain values threaded through the run, so every
//! step stays testable without touching the filesystem.

use crate::config::SourceDescriptor;
use crate::models::{
    ComprehensiveStats, EffectivenessStats, Overview, PerformanceMetrics, YesNoCount,
};
use crate::sheets::{SheetTable, SourceError, Workbook};
use indexmap::IndexMap;
use tracing::debug;

/// Column holding the categorical tag of each conversation row.
pub const LABEL_COLUMN: &str = "Label";

/// The three boolean-outcome columns tracked per conversation.
/// Matching is by exact header string.
pub const REENGAGEMENT_COLUMN: &str = "EFFECTIVE (just reengagement) (Yes/NO)";
pub const SALE_COLUMN: &str = "EFFECTIVE (a sale happened) Yes/No";
pub const BOT_CAN_DO_COLUMN: &str = "BOT CAN DO IT (YES/NO)";

/// Per-sheet reduction: row count, label frequencies, outcome tallies.
#[derive(Debug, Clone, Default)]
pub struct SheetSummary {
    pub rows: u64,
    pub label_counts: IndexMap<String, u64>,
    pub effectiveness: EffectivenessStats,
}

/// Summarize one materialized sheet.
///
/// Only the literal values `"YES"` and `"NO"` are tallied for the
/// outcome columns; anything else, including other casings, falls into
/// neither bucket.
pub fn summarize_sheet(table: &SheetTable) -> SheetSummary {
    let mut summary = SheetSummary {
        rows: table.row_count(),
        ..Default::default()
    };

    if let Some(values) = table.column(LABEL_COLUMN) {
        for value in values.into_iter().flatten() {
            *summary.label_counts.entry(value.to_string()).or_insert(0) += 1;
        }
    }

    summary.effectiveness.reengagement = count_yes_no(table, REENGAGEMENT_COLUMN);
    summary.effectiveness.sale = count_yes_no(table, SALE_COLUMN);
    summary.effectiveness.bot_can_do = count_yes_no(table, BOT_CAN_DO_COLUMN);

    summary
}

/// Tally exact `"YES"`/`"NO"` values of one column, if the column exists.
fn count_yes_no(table: &SheetTable, column: &str) -> YesNoCount {
    let mut tally = YesNoCount::default();
    if let Some(values) = table.column(column) {
        for value in values.into_iter().flatten() {
            match value {
                "YES" => tally.yes += 1,
                "NO" => tally.no += 1,
                _ => {}
            }
        }
    }
    tally
}

/// Result of processing one sheet of a source file.
#[derive(Debug)]
pub enum SheetOutcome {
    /// Sheet was present and summarized.
    Loaded { name: String, summary: SheetSummary },
    /// Sheet was absent from the workbook and skipped.
    Missing { name: String },
}

/// Result of processing one source descriptor.
///
/// A file-level failure may leave earlier sheets loaded; their
/// contributions stand.
#[derive(Debug)]
pub struct SourceOutcome {
    pub assignee: String,
    pub sheets: Vec<SheetOutcome>,
    pub failure: Option<SourceError>,
}

/// Process every named sheet of one source descriptor.
///
/// A missing or unreadable file fails the whole descriptor; a missing
/// sheet skips only that sheet; a sheet load error abandons the
/// remaining sheets of this file.
pub fn process_source(descriptor: &SourceDescriptor) -> SourceOutcome {
    let mut outcome = SourceOutcome {
        assignee: descriptor.assignee.clone(),
        sheets: Vec::new(),
        failure: None,
    };

    let mut workbook = match Workbook::open(&descriptor.file) {
        Ok(workbook) => workbook,
        Err(e) => {
            outcome.failure = Some(e);
            return outcome;
        }
    };

    for sheet in &descriptor.sheets {
        if !workbook.has_sheet(sheet) {
            debug!(
                "sheet '{}' not in {:?}",
                sheet,
                workbook.sheet_names()
            );
            outcome.sheets.push(SheetOutcome::Missing {
                name: sheet.clone(),
            });
            continue;
        }
        match workbook.load_sheet(sheet) {
            Ok(table) => {
                let summary = summarize_sheet(&table);
                debug!("sheet '{}': {} rows", sheet, summary.rows);
                outcome.sheets.push(SheetOutcome::Loaded {
                    name: sheet.clone(),
                    summary,
                });
            }
            Err(e) => {
                outcome.failure = Some(e);
                break;
            }
        }
    }

    outcome
}

/// Running totals accumulated across all processed sheets.
#[derive(Debug, Clone, Default)]
pub struct RunTotals {
    pub total_conversations: u64,
    pub assignee_breakdown: IndexMap<String, u64>,
    pub label_counts: IndexMap<String, u64>,
    pub effectiveness: EffectivenessStats,
}

impl RunTotals {
    /// Fold one sheet summary into the totals under the given assignee.
    pub fn absorb(&mut self, assignee: &str, summary: &SheetSummary) {
        self.total_conversations += summary.rows;
        *self
            .assignee_breakdown
            .entry(assignee.to_string())
            .or_insert(0) += summary.rows;
        for (label, count) in &summary.label_counts {
            *self.label_counts.entry(label.clone()).or_insert(0) += count;
        }
        self.effectiveness.add(&summary.effectiveness);
    }

    /// Fold every loaded sheet of a source outcome into the totals.
    pub fn absorb_source(&mut self, outcome: &SourceOutcome) {
        for sheet in &outcome.sheets {
            if let SheetOutcome::Loaded { summary, .. } = sheet {
                self.absorb(&outcome.assignee, summary);
            }
        }
    }

    /// Finalize the totals into the comprehensive report.
    ///
    /// `files_processed` counts the configured descriptors, including
    /// any that failed to open.
    pub fn into_report(self, files_processed: u64, processed_date: String) -> ComprehensiveStats {
        let performance_metrics =
            PerformanceMetrics::derive(&self.effectiveness, self.total_conversations);
        ComprehensiveStats {
            overview: Overview {
                total_conversations: self.total_conversations,
                total_files_processed: files_processed,
                processed_date,
            },
            assignee_breakdown: self.assignee_breakdown,
            label_analysis: self.label_counts,
            effectiveness_stats: self.effectiveness,
            performance_metrics,
            razan_word_data: None,
        }
    }
}
