//! Merging an extracted document record into a prior report.

use crate::models::{ComprehensiveStats, DocumentData};

/// Assignee label the document's conversations are booked under.
pub const DOCUMENT_ASSIGNEE: &str = "Razan Word Document";

/// Prefix distinguishing document case keys in the label analysis.
pub const CASE_LABEL_PREFIX: &str = "Razan - ";

/// Fold a document record into a previously produced report.
///
/// Additive on repeat: merging the same document twice books its
/// counts twice. The document counts as one additional processed file
/// regardless of how many dates or cases it contained.
pub fn merge_document(report: &mut ComprehensiveStats, document: &DocumentData) {
    let conversations = document.overview.total_conversations;

    report.overview.total_conversations += conversations;
    report.overview.total_files_processed += 1;

    *report
        .assignee_breakdown
        .entry(DOCUMENT_ASSIGNEE.to_string())
        .or_insert(0) += conversations;

    for (case, count) in &document.case_statistics {
        let key = format!("{}{}", CASE_LABEL_PREFIX, case);
        *report.label_analysis.entry(key).or_insert(0) += count;
    }

    report.razan_word_data = Some(document.clone());
}
