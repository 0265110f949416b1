//! H record (file header) decoding.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::patterns::{self, field, number};

/// Subject code of the flight date header.
pub const DATE_SUBJECT: &str = "DTE";

/// Two-digit years resolving past this year belong to the previous century.
const LATEST_RESOLVED_YEAR: i32 = 2090;

/// Who supplied a header value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderSource {
    /// `F`: written by the flight recorder.
    FlightRecorder,
    /// `O`: entered by another party, e.g. an official observer.
    Other,
    /// `P`: entered by the pilot.
    Pilot,
}

impl HeaderSource {
    /// Decode the source letter of an H record.
    #[must_use]
    pub fn from_letter(letter: &str) -> Option<Self> {
        match letter {
            "F" => Some(Self::FlightRecorder),
            "O" => Some(Self::Other),
            "P" => Some(Self::Pilot),
            _ => None,
        }
    }

    /// The source letter as written in the log.
    #[must_use]
    pub fn as_char(self) -> char {
        match self {
            Self::FlightRecorder => 'F',
            Self::Other => 'O',
            Self::Pilot => 'P',
        }
    }
}

impl std::fmt::Display for HeaderSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FlightRecorder => write!(f, "flight_recorder"),
            Self::Other => write!(f, "other"),
            Self::Pilot => write!(f, "pilot"),
        }
    }
}

/// A file-level metadata line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Who supplied the value.
    pub source: HeaderSource,

    /// Three-character subject code, e.g. `DTE` or `GTY`.
    pub subject: String,

    /// Long-form name preceding the `:`, if present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// The value text.
    pub value: String,

    /// Calendar date decoded from a `DTE` header.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl Header {
    /// Decode an H record.
    ///
    /// The description and value are trimmed and an empty description is
    /// treated as absent. For `DTE` headers the value is additionally decoded
    /// into [`Header::date`]; an impossible date leaves it `None` without
    /// rejecting the header.
    #[must_use]
    pub fn parse(line: &str) -> Option<Self> {
        let caps = patterns::HEADER.captures(line)?;

        let subject = field(&caps, 2)?.to_string();
        let description = field(&caps, 3)
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(String::from);
        let value = field(&caps, 4)?.trim().to_string();
        let date = if subject == DATE_SUBJECT {
            parse_date(&value)
        } else {
            None
        };

        Some(Self {
            source: HeaderSource::from_letter(field(&caps, 1)?)?,
            subject,
            description,
            value,
            date,
        })
    }

    /// Check if this is the flight date header.
    #[must_use]
    pub fn is_date(&self) -> bool {
        self.subject == DATE_SUBJECT
    }
}

/// Decode the leading `DDMMYY` of a date header value.
#[must_use]
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let caps = patterns::HEADER_DATE.captures(value)?;
    let day = number(&caps, 1)?;
    let month = number(&caps, 2)?;
    let year = resolve_year(number(&caps, 3)?);
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Expand a two-digit year.
///
/// The year is taken as `2000 + yy`, then moved back a century when that
/// lands after 2090. Only `91..=99` are affected (giving 1991 to 1999); every
/// other value stays in 2000 to 2090.
#[must_use]
pub fn resolve_year(two_digit_year: i32) -> i32 {
    let year = 2000 + two_digit_year;
    if year > LATEST_RESOLVED_YEAR {
        year - 100
    } else {
        year
    }
}
