//! Session-scoped log of conversion attempts.
//!
//! The log is append-only and bounded: the newest entry sits at the front
//! and the oldest falls off once the cap of 10 is reached. It lives only
//! for the client's lifetime — nothing is persisted.

use crate::kind::ConversionKind;
use crate::state::Outcome;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Maximum number of entries kept in a [`HistoryLog`].
pub const HISTORY_CAP: usize = 10;

/// Placeholder output name recorded for failed attempts.
pub const NO_OUTPUT: &str = "-";

/// One conversion attempt, successful or not. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// When the attempt settled.
    pub timestamp: DateTime<Utc>,
    pub kind: ConversionKind,
    /// Name of the uploaded file, or `"-"` when none was supplied.
    pub input_name: String,
    /// Resolved output filename, or `"-"` on failure.
    pub output_name: String,
    pub outcome: Outcome,
}

impl HistoryEntry {
    /// Entry for a successful attempt with its resolved filename.
    pub fn success(kind: ConversionKind, input_name: &str, output_name: &str) -> Self {
        Self {
            timestamp: Utc::now(),
            kind,
            input_name: input_name.to_string(),
            output_name: output_name.to_string(),
            outcome: Outcome::Success,
        }
    }

    /// Entry for a failed attempt; the output name is always `"-"`.
    pub fn failure(kind: ConversionKind, input_name: &str) -> Self {
        Self {
            timestamp: Utc::now(),
            kind,
            input_name: input_name.to_string(),
            output_name: NO_OUTPUT.to_string(),
            outcome: Outcome::Failure,
        }
    }
}

/// Ordered attempt log, newest first, capped at [`HISTORY_CAP`].
#[derive(Debug, Default)]
pub struct HistoryLog {
    entries: VecDeque<HistoryEntry>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry at the front, evicting the oldest past the cap.
    pub fn record(&mut self, entry: HistoryEntry) {
        self.entries.push_front(entry);
        self.entries.truncate(HISTORY_CAP);
    }

    /// Snapshot of the log, newest first.
    pub fn entries(&self) -> Vec<HistoryEntry> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(n: usize) -> HistoryEntry {
        HistoryEntry::success(ConversionKind::PdfToDocx, &format!("in-{n}.pdf"), "out.docx")
    }

    #[test]
    fn newest_entry_is_first() {
        let mut log = HistoryLog::new();
        log.record(entry(1));
        log.record(entry(2));
        let entries = log.entries();
        assert_eq!(entries[0].input_name, "in-2.pdf");
        assert_eq!(entries[1].input_name, "in-1.pdf");
    }

    #[test]
    fn cap_evicts_oldest() {
        let mut log = HistoryLog::new();
        for n in 0..HISTORY_CAP {
            log.record(entry(n));
        }
        assert_eq!(log.len(), HISTORY_CAP);

        log.record(entry(99));
        assert_eq!(log.len(), HISTORY_CAP);
        let entries = log.entries();
        assert_eq!(entries[0].input_name, "in-99.pdf");
        // entry(0) fell off the back
        assert!(entries.iter().all(|e| e.input_name != "in-0.pdf"));
    }

    #[test]
    fn failure_entry_has_dash_output() {
        let e = HistoryEntry::failure(ConversionKind::DocxToPdf, "broken.docx");
        assert_eq!(e.output_name, NO_OUTPUT);
        assert_eq!(e.outcome, Outcome::Failure);
    }

    #[test]
    fn entries_serialise_to_json() {
        let e = HistoryEntry::success(ConversionKind::XlsxToPdf, "q3.xlsx", "q3.pdf");
        let json = serde_json::to_string(&e).unwrap();
        assert!(json.contains("\"xlsx-to-pdf\""), "got: {json}");
        assert!(json.contains("\"success\""), "got: {json}");
    }
}
