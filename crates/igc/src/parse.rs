//! Whole-file decoding into headers and timestamped fixes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::record::{DeviceId, ExtensionDescriptor, ExtensionTable, Fix, Header, Record};
use crate::stream::records;
use crate::timeline::resolve_timestamps;

/// Typed contents of one IGC file.
///
/// Headers and fixes keep their original line order. Lines no grammar
/// matched are dropped; use [`crate::parse_records`] to keep them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParseResult {
    /// The first A record, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<DeviceId>,

    /// All H records.
    pub headers: Vec<Header>,

    /// All B records, with timestamps resolved where a date was known.
    pub fixes: Vec<Fix>,

    /// Column layout of optional B-line fields, from the last I record.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fix_extensions: Vec<ExtensionDescriptor>,

    /// Column layout of optional K-line fields, from the last J record.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub data_extensions: Vec<ExtensionDescriptor>,
}

impl ParseResult {
    /// Date of the first `DTE` header that carried a valid date.
    #[must_use]
    pub fn date(&self) -> Option<NaiveDate> {
        self.headers.iter().find_map(|h| h.date)
    }

    /// First header with the given subject code.
    #[must_use]
    pub fn header(&self, subject: &str) -> Option<&Header> {
        self.headers.iter().find(|h| h.subject == subject)
    }

    /// Check if nothing was decoded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.device.is_none() && self.headers.is_empty() && self.fixes.is_empty()
    }

    fn push(&mut self, record: Record) {
        match record {
            Record::DeviceId(device) => {
                self.device.get_or_insert(device);
            }
            Record::Fix(fix) => self.fixes.push(fix),
            Record::Header(header) => self.headers.push(header),
            Record::Extension(extension) => match extension.table {
                ExtensionTable::Fix => self.fix_extensions = extension.descriptors,
                ExtensionTable::Data => self.data_extensions = extension.descriptors,
            },
            Record::Unknown { .. } => {}
        }
    }
}

impl FromIterator<Record> for ParseResult {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        let mut result = Self::default();
        for record in iter {
            result.push(record);
        }
        result
    }
}

/// Decode an IGC text into headers and fixes.
///
/// Never fails: malformed lines are skipped and fixes before the first date
/// header have no timestamp.
///
/// # Examples
///
/// ```
/// let text = "HFDTE140516\nB1056335049317N00610998EA0018500193\n";
/// let result = igc::parse(text);
///
/// assert_eq!(result.headers.len(), 1);
/// assert_eq!(result.fixes.len(), 1);
/// assert!(result.fixes[0].timestamp.is_some());
/// ```
#[must_use]
pub fn parse(text: &str) -> ParseResult {
    let result: ParseResult = resolve_timestamps(records(text)).collect();
    debug!(
        headers = result.headers.len(),
        fixes = result.fixes.len(),
        date = ?result.date(),
        "Parsed IGC text"
    );
    result
}
