//! Typed IGC records and their line grammars.
//!
//! Each record type has a pure decoder mapping one raw line to `Some(record)`
//! or `None` when the line does not follow its grammar:
//!
//! - **A** ([`DeviceId`]): the recorder's manufacturer and logger id.
//! - **B** ([`Fix`]): one position sample.
//! - **H** ([`Header`]): file metadata such as the flight date.
//! - **I** / **J** ([`Extension`]): column tables for optional trailing fields.
//!
//! Anything else, including a known tag whose grammar fails, becomes
//! [`Record::Unknown`] carrying only its leading character.
//!
//! # Example
//!
//! ```
//! use igc::record::{Fix, Header};
//!
//! let fix = Fix::parse("B1056335049317N00610998EA0018500193").unwrap();
//! assert_eq!(fix.gps_altitude, 185);
//!
//! let header = Header::parse("HFDTE140516").unwrap();
//! assert_eq!(header.subject, "DTE");
//! ```

mod device;
mod extension;
mod fix;
mod header;
pub mod patterns;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

pub use device::DeviceId;
pub use extension::{Extension, ExtensionDescriptor, ExtensionTable};
pub use fix::{Fix, Validity};
pub use header::{parse_date, resolve_year, Header, HeaderSource, DATE_SUBJECT};

/// One decoded line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Record {
    /// An A line.
    DeviceId(DeviceId),
    /// A B line.
    Fix(Fix),
    /// An H line.
    Header(Header),
    /// An I or J line.
    Extension(Extension),
    /// A line no grammar matched.
    Unknown {
        /// Leading character of the line, `None` for an empty line.
        tag: Option<char>,
    },
}

impl Record {
    /// Decode one line, falling back to [`Record::Unknown`].
    #[must_use]
    pub fn parse(line: &str) -> Self {
        let tag = line.chars().next();
        let record = match tag {
            Some('A') => DeviceId::parse(line).map(Self::DeviceId),
            Some('B') => Fix::parse(line).map(Self::Fix),
            Some('H') => Header::parse(line).map(Self::Header),
            Some('I' | 'J') => Extension::parse(line).map(Self::Extension),
            _ => None,
        };
        record.unwrap_or(Self::Unknown { tag })
    }

    /// Leading character of the line this record came from.
    #[must_use]
    pub fn tag(&self) -> Option<char> {
        match self {
            Self::DeviceId(_) => Some('A'),
            Self::Fix(_) => Some('B'),
            Self::Header(_) => Some('H'),
            Self::Extension(extension) => Some(extension.table.tag()),
            Self::Unknown { tag } => *tag,
        }
    }

    /// Time of day, for records that carry one.
    #[must_use]
    pub fn time(&self) -> Option<NaiveTime> {
        match self {
            Self::Fix(fix) => Some(fix.time),
            _ => None,
        }
    }

    /// Check if no grammar matched the line.
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown { .. })
    }

    /// The fix, if this is a B record.
    #[must_use]
    pub fn as_fix(&self) -> Option<&Fix> {
        match self {
            Self::Fix(fix) => Some(fix),
            _ => None,
        }
    }

    /// The header, if this is an H record.
    #[must_use]
    pub fn as_header(&self) -> Option<&Header> {
        match self {
            Self::Header(header) => Some(header),
            _ => None,
        }
    }
}
