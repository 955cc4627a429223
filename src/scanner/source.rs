// src/scanner/source.rs

// --- Imports ---
use std::path::Path;

use crate::utils::error::ScanError;

/// Strips the artifacts scanner wedges smuggle into a decoded payload: a
/// UTF-8 BOM, zero-width spaces, CR line endings and outer whitespace.
/// Interior newlines survive; multi-line payloads depend on them.
pub fn clean_scan(raw: &str) -> String {
    let without_marks = raw.replace(['\u{FEFF}', '\u{200B}'], "");
    let unified = without_marks.replace("\r\n", "\n").replace('\r', "\n");
    unified.trim().to_string()
}

/// Reads one decoded payload from a file. The whole file is a single
/// payload; an empty (or whitespace-only) file is a scan error.
pub fn read_payload_file(path: &Path) -> Result<String, ScanError> {
    let raw = std::fs::read_to_string(path)?;
    let cleaned = clean_scan(&raw);
    if cleaned.is_empty() {
        return Err(ScanError::EmptySource(path.display().to_string()));
    }
    Ok(cleaned)
}

/// Suppresses immediate re-scans, like a badge held in front of the reader.
/// Only the last accepted payload is remembered; scanning A, B, A again
/// processes all three.
#[derive(Debug, Default)]
pub struct DuplicateFilter {
    last: Option<String>,
}

impl DuplicateFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// False when `payload` matches the most recently remembered scan.
    pub fn admit(&self, payload: &str) -> bool {
        self.last.as_deref() != Some(payload)
    }

    /// Records an accepted payload. Rejected payloads are deliberately not
    /// remembered, so a corrected badge can be re-scanned right away.
    pub fn remember(&mut self, payload: &str) {
        self.last = Some(payload.to_string());
    }
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn clean_scan_strips_wedge_artifacts() {
        assert_eq!(clean_scan("\u{FEFF}Nombre: Ana\r\n"), "Nombre: Ana");
        assert_eq!(clean_scan("  Nombre:\u{200B} Ana  "), "Nombre: Ana");
    }

    #[test]
    fn clean_scan_preserves_interior_newlines() {
        assert_eq!(
            clean_scan("Nombre: Ana\r\nArea: QA\r\n"),
            "Nombre: Ana\nArea: QA"
        );
    }

    #[test]
    fn clean_scan_of_noise_is_empty() {
        assert_eq!(clean_scan(" \r\n\u{FEFF} "), "");
    }

    #[test]
    fn duplicate_filter_only_blocks_consecutive_repeats() {
        let mut filter = DuplicateFilter::new();
        assert!(filter.admit("a"));
        filter.remember("a");
        assert!(!filter.admit("a"));
        assert!(filter.admit("b"));
        filter.remember("b");
        // "a" is no longer the most recent scan, so it goes through again.
        assert!(filter.admit("a"));
    }

    #[test]
    fn unremembered_payloads_are_always_admitted() {
        let filter = DuplicateFilter::new();
        assert!(filter.admit("a"));
        assert!(filter.admit(""));
    }

    #[test]
    fn read_payload_file_cleans_content() {
        let mut file = tempfile::NamedTempFile::new().expect("create temp payload");
        write!(file, "\u{FEFF}Nombre: Ana\r\nArea: QA\r\n").expect("write payload");
        let payload = read_payload_file(file.path()).expect("read payload");
        assert_eq!(payload, "Nombre: Ana\nArea: QA");
    }

    #[test]
    fn read_payload_file_rejects_empty_sources() {
        let mut file = tempfile::NamedTempFile::new().expect("create temp payload");
        write!(file, " \r\n ").expect("write payload");
        let err = read_payload_file(file.path()).unwrap_err();
        assert!(matches!(err, ScanError::EmptySource(_)));
    }

    #[test]
    fn read_payload_file_reports_missing_files() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let err = read_payload_file(&dir.path().join("missing.txt")).unwrap_err();
        assert!(matches!(err, ScanError::Io(_)));
    }
}
