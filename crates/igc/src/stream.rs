//! Line classification over a whole IGC text.
//!
//! Splits text on `\r\n`, `\r` or `\n` and decodes every line in order. The
//! iterator form is lazy, so callers can decode large files without holding
//! every record at once.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, trace};

use crate::record::Record;

static LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r\n|\r|\n").expect("Invalid regex pattern"));

/// Split text into lines.
///
/// A single trailing line break does not start another line, and empty text
/// has no lines.
pub fn lines(text: &str) -> impl Iterator<Item = &str> {
    let body = text
        .strip_suffix("\r\n")
        .or_else(|| text.strip_suffix('\n'))
        .or_else(|| text.strip_suffix('\r'))
        .unwrap_or(text);

    (!text.is_empty())
        .then(|| LINE_BREAK.split(body))
        .into_iter()
        .flatten()
}

/// Decode a single line.
#[must_use]
pub fn parse_line(line: &str) -> Record {
    Record::parse(line)
}

/// Decode every line, one record per line, unknown lines included.
pub fn records(text: &str) -> impl Iterator<Item = Record> + '_ {
    lines(text).enumerate().map(|(index, line)| {
        let record = parse_line(line);
        if let Record::Unknown { tag: Some(tag) } = record {
            trace!(line = index + 1, %tag, "No grammar matched line");
        }
        record
    })
}

/// Decode every line into a vector.
#[must_use]
pub fn parse_records(text: &str) -> Vec<Record> {
    let records: Vec<Record> = records(text).collect();
    debug!(
        lines = records.len(),
        unknown = records.iter().filter(|r| r.is_unknown()).count(),
        "Classified IGC lines"
    );
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_mixed_breaks() {
        let text = "AXCT001\r\nHFDTE140516\rB1056335049317N00610998EA0018500193\nLXCT";
        let lines: Vec<_> = lines(text).collect();
        assert_eq!(
            lines,
            vec![
                "AXCT001",
                "HFDTE140516",
                "B1056335049317N00610998EA0018500193",
                "LXCT"
            ]
        );
    }

    #[test]
    fn test_lines_trailing_break() {
        assert_eq!(lines("A\r\nB\r\n").count(), 2);
        assert_eq!(lines("A\nB\n").count(), 2);
        assert_eq!(lines("A\n\nB").count(), 3);
    }

    #[test]
    fn test_lines_empty_text() {
        assert_eq!(lines("").count(), 0);
        assert_eq!(lines("\n").collect::<Vec<_>>(), vec![""]);
    }

    #[test]
    fn test_parse_records_keeps_line_order() {
        let text = "AXCT001\nHFDTE140516\nGXYZ\nB1056335049317N00610998EA0018500193\n";
        let tags: Vec<_> = parse_records(text).iter().map(Record::tag).collect();
        assert_eq!(tags, vec![Some('A'), Some('H'), Some('G'), Some('B')]);
    }

    #[test]
    fn test_parse_records_marks_malformed_lines() {
        let records = parse_records("B1056\nHF\nI02\n");
        assert!(records.iter().all(Record::is_unknown));
        assert_eq!(records.len(), 3);
    }

    #[test]
    fn test_parse_line_matches_record_parse() {
        let line = "HFGTYGLIDERTYPE:ASG32 MI";
        assert_eq!(parse_line(line), Record::parse(line));
    }
}
