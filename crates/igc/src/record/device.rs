//! A record (flight recorder identification) decoding.

use serde::{Deserialize, Serialize};

use super::patterns::{self, field};

/// Some loggers write `A<mfr><id>FLIGHT:<n>` instead of opaque data.
const FLIGHT_SUFFIX: &str = "FLIGHT";

/// Length of a logger id in the `FLIGHT` layout.
const FLIGHT_LOGGER_ID_LEN: usize = 3;

/// The recorder that wrote the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceId {
    /// Three-character manufacturer code.
    pub manufacturer: String,

    /// Logger serial or id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logger_id: Option<String>,

    /// Opaque vendor text after the `:`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,

    /// Flight number of the day, from the `FLIGHT` layout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flight_number: Option<u32>,
}

impl DeviceId {
    /// Decode an A record.
    #[must_use]
    pub fn parse(line: &str) -> Option<Self> {
        let caps = patterns::DEVICE_ID.captures(line)?;

        let manufacturer = field(&caps, 1)?.to_string();
        let id = field(&caps, 2).unwrap_or_default().trim();
        let data = field(&caps, 3).map(str::trim);

        if let Some(prefix) = id.strip_suffix(FLIGHT_SUFFIX) {
            let logger_id: String = prefix.chars().take(FLIGHT_LOGGER_ID_LEN).collect();
            return Some(Self {
                manufacturer,
                logger_id: non_empty(&logger_id),
                data: None,
                flight_number: data.and_then(|d| d.parse().ok()),
            });
        }

        Some(Self {
            manufacturer,
            logger_id: non_empty(id),
            data: data.and_then(non_empty),
            flight_number: None,
        })
    }
}

fn non_empty(text: &str) -> Option<String> {
    (!text.is_empty()).then(|| text.to_string())
}
