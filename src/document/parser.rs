//! Line classification and extraction for the free-text report document.
//!
//! A single forward pass over the paragraph lines with two independent
//! contexts: the current date heading and the current case heading.
//! Marker lines never count as case data, and a new case heading
//! implicitly closes the previous one. The date context survives case
//! changes.

use crate::models::{DocumentData, DocumentOverview};
use indexmap::IndexMap;
use regex::Regex;

/// Substring marking a date heading line.
const DATE_MARKER: &str = "Conversation of";
/// Substring marking a per-date total line.
const TOTAL_MARKER: &str = "Total number of conversations:";
/// Prefix opening a case section.
const CASE_PREFIX: &str = "For Case";

/// How a single document line is interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
enum LineKind {
    /// Sets the current date context; the full line is the key.
    DateHeading,
    /// Records a conversation count against the current date.
    ConversationTotal(u64),
    /// A total line whose count could not be extracted; dropped.
    MalformedTotal,
    /// Opens a new case context; the full line is the key.
    CaseHeading,
    /// Any other non-empty line.
    Body,
}

/// Stateful extractor for report documents.
pub struct DocumentParser {
    total_re: Regex,
    bracket_re: Regex,
}

impl Default for DocumentParser {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentParser {
    pub fn new() -> Self {
        Self {
            total_re: Regex::new(r"Total number of conversations: (\d+)")
                .expect("total count regex"),
            bracket_re: Regex::new(r"\((\d+)\)").expect("bracketed count regex"),
        }
    }

    /// Run the full pass over the document lines.
    pub fn parse(&self, lines: &[String]) -> DocumentData {
        let mut dates: IndexMap<String, u64> = IndexMap::new();
        let mut case_statistics: IndexMap<String, u64> = IndexMap::new();
        let mut current_date: Option<String> = None;
        let mut current_case: Option<String> = None;

        for raw in lines {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }

            match self.classify(line) {
                LineKind::DateHeading => {
                    current_date = Some(line.to_string());
                }
                LineKind::ConversationTotal(count) => {
                    // A total with no preceding date heading cannot be
                    // attributed and is dropped.
                    if let Some(date) = &current_date {
                        dates.insert(date.clone(), count);
                    }
                }
                LineKind::MalformedTotal => {}
                LineKind::CaseHeading => {
                    current_case = Some(line.to_string());
                }
                LineKind::Body => {
                    if let Some(case) = &current_case {
                        if let Some(count) = self.bracketed_count(line) {
                            *case_statistics.entry(case.clone()).or_insert(0) += count;
                        }
                    }
                }
            }
        }

        let total_conversations = dates.values().sum();
        let total_cases = case_statistics.values().sum();

        DocumentData {
            overview: DocumentOverview {
                total_conversations,
                dates,
                total_cases,
            },
            case_statistics,
            raw_content: lines.join("\n"),
        }
    }

    fn classify(&self, line: &str) -> LineKind {
        if line.contains(DATE_MARKER) {
            LineKind::DateHeading
        } else if line.contains(TOTAL_MARKER) {
            match self.total_count(line) {
                Some(count) => LineKind::ConversationTotal(count),
                None => LineKind::MalformedTotal,
            }
        } else if line.starts_with(CASE_PREFIX) {
            LineKind::CaseHeading
        } else {
            LineKind::Body
        }
    }

    fn total_count(&self, line: &str) -> Option<u64> {
        self.total_re.captures(line)?.get(1)?.as_str().parse().ok()
    }

    /// First bracketed integer embedded in the line, if any.
    fn bracketed_count(&self, line: &str) -> Option<u64> {
        self.bracket_re.captures(line)?.get(1)?.as_str().parse().ok()
    }
}
