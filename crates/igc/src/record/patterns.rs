//! Precompiled line grammars.
//!
//! Every IGC record type is matched by one anchored regex. The patterns are
//! compiled lazily on first use and are never mutated afterwards, so they can
//! be shared freely between threads decoding different files.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::{Captures, Regex};

/// A compiled record grammar.
#[derive(Debug)]
pub struct RecordPattern {
    /// Name of the pattern for identification.
    pub name: &'static str,

    /// Description of what this pattern matches.
    pub description: &'static str,

    /// The compiled regex.
    regex: Regex,
}

impl RecordPattern {
    /// Create a new record pattern.
    ///
    /// # Panics
    ///
    /// Panics if the regex pattern is invalid.
    #[must_use]
    pub fn new(name: &'static str, description: &'static str, pattern: &str) -> Self {
        Self {
            name,
            description,
            regex: Regex::new(pattern).expect("Invalid regex pattern"),
        }
    }

    /// Check if the line matches this pattern.
    #[must_use]
    pub fn matches(&self, line: &str) -> bool {
        self.regex.is_match(line)
    }

    /// Match the line and return its capture groups.
    #[must_use]
    pub fn captures<'a>(&self, line: &'a str) -> Option<Captures<'a>> {
        self.regex.captures(line)
    }
}

/// A record: manufacturer, logger id, optional `:`-separated data.
pub static DEVICE_ID: LazyLock<RecordPattern> = LazyLock::new(|| {
    RecordPattern::new(
        "device_id",
        "Manufacturer code, logger id and optional additional data",
        r"^A([A-Za-z0-9]{3})([^:]*)(?::(.*))?$",
    )
});

/// B record: fixed-width time, position, validity and altitudes.
pub static FIX: LazyLock<RecordPattern> = LazyLock::new(|| {
    RecordPattern::new(
        "fix",
        "Time of day, latitude, longitude, validity, GPS and pressure altitude",
        r"^B(\d{2})(\d{2})(\d{2})(\d{2})(\d{5})([NS])(\d{3})(\d{5})([EW])([AV])(-\d{4}|\d{5})(-\d{4}|\d{5})",
    )
});

/// H record: source, subject, optional description, value.
pub static HEADER: LazyLock<RecordPattern> = LazyLock::new(|| {
    RecordPattern::new(
        "header",
        "Source letter, subject code, optional description and value",
        r"^H([FOP])([A-Za-z0-9]{3})(?:([^:]*):)?(.*)$",
    )
});

/// Leading `DDMMYY` of a date header value.
pub static HEADER_DATE: LazyLock<RecordPattern> = LazyLock::new(|| {
    RecordPattern::new("header_date", "Day, month and two-digit year", r"^(\d{2})(\d{2})(\d{2})")
});

/// I and J records: table tag, entry count, entry block.
pub static EXTENSION: LazyLock<RecordPattern> = LazyLock::new(|| {
    RecordPattern::new(
        "extension",
        "Extension table tag, two-digit entry count and entries",
        r"^([IJ])(\d{2})(.*)$",
    )
});

/// One seven-character extension table entry.
pub static EXTENSION_ENTRY: LazyLock<RecordPattern> = LazyLock::new(|| {
    RecordPattern::new(
        "extension_entry",
        "Start column, end column and three-character code",
        r"^(\d{2})(\d{2})([A-Za-z0-9]{3})$",
    )
});

/// Get all record patterns.
#[must_use]
pub fn record_patterns() -> [&'static RecordPattern; 6] {
    [
        &*DEVICE_ID,
        &*FIX,
        &*HEADER,
        &*HEADER_DATE,
        &*EXTENSION,
        &*EXTENSION_ENTRY,
    ]
}

/// Text of capture group `index`, if it participated in the match.
pub(crate) fn field<'a>(captures: &Captures<'a>, index: usize) -> Option<&'a str> {
    captures.get(index).map(|m| m.as_str())
}

/// Parse capture group `index` into a number.
pub(crate) fn number<T: FromStr>(captures: &Captures<'_>, index: usize) -> Option<T> {
    field(captures, index)?.parse().ok()
}
