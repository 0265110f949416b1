//! `igc` - A decoder for IGC flight recorder logs
//!
//! This library turns the line-oriented IGC text written by GPS flight
//! recorders into typed headers and position fixes, and reconstructs an
//! absolute UTC timestamp for every fix, including across UTC midnight.
//!
//! Decoding never fails. Lines that do not match their grammar become
//! [`Record::Unknown`] and are left out of [`ParseResult`]; fixes recorded
//! before any date header simply have no timestamp.
//!
//! ```
//! let text = "HFDTE140516\r\nB1056335049317N00610998EA0018500193\r\n";
//! let result = igc::parse(text);
//!
//! assert_eq!(result.date().map(|d| d.to_string()), Some("2016-05-14".to_string()));
//! assert_eq!(result.fixes[0].gps_altitude, 185);
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod parse;
pub mod record;
pub mod stream;
pub mod timeline;

pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use parse::{parse, ParseResult};
pub use record::{
    DeviceId, Extension, ExtensionDescriptor, ExtensionTable, Fix, Header, HeaderSource, Record,
    Validity,
};
pub use stream::{parse_line, parse_records, records};
pub use timeline::{resolve_timestamps, TimelineState};
