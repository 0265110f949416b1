//! I and J record (extension table) decoding.
//!
//! An extension table lists where optional trailing fields live inside the
//! lines it describes: `I` tables describe B (fix) lines, `J` tables describe
//! K (data) lines. Both share the same layout, a two-digit entry count
//! followed by that many `SSEECCC` entries (start column, end column, code).

use std::ops::Range;

use serde::{Deserialize, Serialize};

use super::patterns::{self, field, number};

/// Width of one `SSEECCC` entry.
const ENTRY_WIDTH: usize = 7;

/// The kind of line an extension table describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtensionTable {
    /// `I`: extensions of B (fix) lines.
    Fix,
    /// `J`: extensions of K (data) lines.
    Data,
}

impl ExtensionTable {
    /// Decode the record tag of an extension table.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "I" => Some(Self::Fix),
            "J" => Some(Self::Data),
            _ => None,
        }
    }

    /// The record tag as written in the log.
    #[must_use]
    pub fn tag(self) -> char {
        match self {
            Self::Fix => 'I',
            Self::Data => 'J',
        }
    }

    /// First column (1-based) available to extensions of the described line.
    ///
    /// B lines carry 35 fixed columns, K lines carry 7.
    #[must_use]
    pub fn first_column(self) -> usize {
        match self {
            Self::Fix => 36,
            Self::Data => 8,
        }
    }
}

impl std::fmt::Display for ExtensionTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fix => write!(f, "fix"),
            Self::Data => write!(f, "data"),
        }
    }
}

/// Location of one optional field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionDescriptor {
    /// First column, 1-based.
    pub start: usize,

    /// Last column, 1-based and inclusive.
    pub end: usize,

    /// Three-character field code, e.g. `FXA` or `SIU`.
    pub code: String,
}

impl ExtensionDescriptor {
    /// Byte range of the field within a described line.
    #[must_use]
    pub fn columns(&self) -> Range<usize> {
        self.start - 1..self.end
    }

    /// Width of the field in characters.
    #[must_use]
    pub fn width(&self) -> usize {
        self.end - self.start + 1
    }
}

/// A decoded I or J line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extension {
    /// Which kind of line the table describes.
    pub table: ExtensionTable,

    /// Entries in the order they were listed.
    pub descriptors: Vec<ExtensionDescriptor>,
}

impl Extension {
    /// Decode an I or J record.
    ///
    /// Returns `None` when fewer entries follow than the count announces,
    /// when an entry is malformed, or when an entry's columns are reversed
    /// or overlap the fixed part of the described line. Text after the last
    /// announced entry is ignored.
    #[must_use]
    pub fn parse(line: &str) -> Option<Self> {
        let caps = patterns::EXTENSION.captures(line)?;

        let table = ExtensionTable::from_tag(field(&caps, 1)?)?;
        let count: usize = number(&caps, 2)?;
        let entries = field(&caps, 3)?;

        let descriptors = (0..count)
            .map(|i| entries.get(i * ENTRY_WIDTH..(i + 1) * ENTRY_WIDTH))
            .map(|entry| parse_entry(entry?, table))
            .collect::<Option<Vec<_>>>()?;

        Some(Self { table, descriptors })
    }

    /// Look up the descriptor for a field code.
    #[must_use]
    pub fn find(&self, code: &str) -> Option<&ExtensionDescriptor> {
        self.descriptors.iter().find(|d| d.code == code)
    }
}

fn parse_entry(entry: &str, table: ExtensionTable) -> Option<ExtensionDescriptor> {
    let caps = patterns::EXTENSION_ENTRY.captures(entry)?;
    let start: usize = number(&caps, 1)?;
    let end: usize = number(&caps, 2)?;

    if start < table.first_column() || start > end {
        return None;
    }

    Some(ExtensionDescriptor {
        start,
        end,
        code: field(&caps, 3)?.to_string(),
    })
}
