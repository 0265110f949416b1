//! B record (position fix) decoding.

use chrono::{DateTime, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use super::patterns::{self, field, number};

/// Minutes are stored as thousandths, so one degree is 60 000 units.
const MILLI_MINUTES_PER_DEGREE: f64 = 60_000.0;

/// Whether the recorder had a 3D satellite fix for this sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Validity {
    /// `A`: a 3D fix.
    Valid,
    /// `V`: a 2D fix or no GPS data.
    Estimated,
}

impl Validity {
    /// Decode the validity flag of a B record.
    #[must_use]
    pub fn from_flag(flag: &str) -> Option<Self> {
        match flag {
            "A" => Some(Self::Valid),
            "V" => Some(Self::Estimated),
            _ => None,
        }
    }

    /// The flag letter as written in the log.
    #[must_use]
    pub fn as_char(self) -> char {
        match self {
            Self::Valid => 'A',
            Self::Estimated => 'V',
        }
    }
}

impl std::fmt::Display for Validity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Valid => write!(f, "valid"),
            Self::Estimated => write!(f, "estimated"),
        }
    }
}

/// One recorded GPS position sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fix {
    /// UTC time of day of the sample.
    pub time: NaiveTime,

    /// Latitude in decimal degrees, negative south of the equator.
    pub latitude: f64,

    /// Longitude in decimal degrees, negative west of Greenwich.
    pub longitude: f64,

    /// GPS altitude in meters.
    pub gps_altitude: i32,

    /// Pressure (barometric) altitude in meters.
    pub pressure_altitude: i32,

    /// Fix validity flag.
    pub validity: Validity,

    /// Absolute UTC timestamp, once a calendar date is known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl Fix {
    /// Decode a B record.
    ///
    /// Returns `None` when the line does not follow the fixed-width layout,
    /// when the time of day is impossible, or when the coordinates fall
    /// outside their valid ranges. Trailing extension columns are ignored.
    #[must_use]
    pub fn parse(line: &str) -> Option<Self> {
        let caps = patterns::FIX.captures(line)?;

        let time = NaiveTime::from_hms_opt(
            number(&caps, 1)?,
            number(&caps, 2)?,
            number(&caps, 3)?,
        )?;

        let latitude = coordinate(
            number(&caps, 4)?,
            number(&caps, 5)?,
            field(&caps, 6)? == "S",
        );
        let longitude = coordinate(
            number(&caps, 7)?,
            number(&caps, 8)?,
            field(&caps, 9)? == "W",
        );
        if latitude.abs() > 90.0 || longitude.abs() > 180.0 {
            return None;
        }

        Some(Self {
            time,
            latitude,
            longitude,
            validity: Validity::from_flag(field(&caps, 10)?)?,
            gps_altitude: number(&caps, 11)?,
            pressure_altitude: number(&caps, 12)?,
            timestamp: None,
        })
    }

    /// Hour component of the time of day.
    #[must_use]
    pub fn hour(&self) -> u32 {
        self.time.hour()
    }

    /// Minute component of the time of day.
    #[must_use]
    pub fn minute(&self) -> u32 {
        self.time.minute()
    }

    /// Second component of the time of day.
    #[must_use]
    pub fn second(&self) -> u32 {
        self.time.second()
    }

    /// Check if the recorder reported a 3D fix.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validity == Validity::Valid
    }

    /// Return this fix with its absolute timestamp replaced.
    #[must_use]
    pub fn with_timestamp(self, timestamp: Option<DateTime<Utc>>) -> Self {
        Self { timestamp, ..self }
    }
}

fn coordinate(degrees: u32, milli_minutes: u32, negative: bool) -> f64 {
    let value = f64::from(degrees) + f64::from(milli_minutes) / MILLI_MINUTES_PER_DEGREE;
    if negative {
        -value
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const FIX_LINE: &str = "B1056335049317N00610998EA001850019300611109104011";

    #[test]
    fn test_parse_fix() {
        let fix = Fix::parse(FIX_LINE).unwrap();

        assert_eq!(fix.hour(), 10);
        assert_eq!(fix.minute(), 56);
        assert_eq!(fix.second(), 33);
        assert!((fix.latitude - (50.0 + 49.317 / 60.0)).abs() < 0.000_01);
        assert!((fix.longitude - (6.0 + 10.998 / 60.0)).abs() < 0.000_01);
        assert_eq!(fix.gps_altitude, 185);
        assert_eq!(fix.pressure_altitude, 193);
        assert!(fix.is_valid());
        assert!(fix.timestamp.is_none());
    }

    #[test]
    fn test_parse_southern_western_hemisphere() {
        let fix = Fix::parse("B0102033330000S07030000WV-001500020").unwrap();

        assert!((fix.latitude + 33.5).abs() < 0.000_01);
        assert!((fix.longitude + 70.5).abs() < 0.000_01);
        assert_eq!(fix.gps_altitude, -15);
        assert_eq!(fix.pressure_altitude, 20);
        assert_eq!(fix.validity, Validity::Estimated);
        assert!(!fix.is_valid());
    }

    #[test]
    fn test_parse_minimum_width() {
        assert!(Fix::parse("B1056335049317N00610998EA0018500193").is_some());
        assert!(Fix::parse("B1056335049317N00610998EA001850019").is_none());
    }

    #[test]
    fn test_parse_rejects_malformed_numbers() {
        assert!(Fix::parse("B10563350493X7N00610998EA0018500193").is_none());
        assert!(Fix::parse("B1056335049317N00610998EA00185001-3").is_none());
        assert!(Fix::parse("B1056335049317X00610998EA0018500193").is_none());
        assert!(Fix::parse("B1056335049317N00610998EX0018500193").is_none());
    }

    #[test]
    fn test_parse_rejects_impossible_time() {
        assert!(Fix::parse("B2456335049317N00610998EA0018500193").is_none());
        assert!(Fix::parse("B1060335049317N00610998EA0018500193").is_none());
        assert!(Fix::parse("B1056605049317N00610998EA0018500193").is_none());
    }

    #[test]
    fn test_parse_rejects_out_of_range_coordinates() {
        assert!(Fix::parse("B1056339100000N00610998EA0018500193").is_none());
        assert!(Fix::parse("B1056335049317N18100000EA0018500193").is_none());
        assert!(Fix::parse("B1056339000000N18000000EA0018500193").is_some());
    }

    #[test]
    fn test_parse_rejects_other_records() {
        assert!(Fix::parse("HFDTE140516").is_none());
        assert!(Fix::parse("").is_none());
    }

    #[test]
    fn test_with_timestamp() {
        let timestamp = Utc.with_ymd_and_hms(2016, 5, 14, 10, 56, 33).unwrap();
        let fix = Fix::parse(FIX_LINE).unwrap().with_timestamp(Some(timestamp));
        assert_eq!(fix.timestamp, Some(timestamp));
    }

    #[test]
    fn test_validity_flags() {
        assert_eq!(Validity::from_flag("A"), Some(Validity::Valid));
        assert_eq!(Validity::from_flag("V"), Some(Validity::Estimated));
        assert_eq!(Validity::from_flag("X"), None);
        assert_eq!(Validity::Valid.as_char(), 'A');
        assert_eq!(Validity::Estimated.to_string(), "estimated");
    }

    #[test]
    fn test_fix_serialization() {
        let fix = Fix::parse(FIX_LINE).unwrap();
        let json = serde_json::to_string(&fix).unwrap();

        assert!(json.contains("\"time\":\"10:56:33\""));
        assert!(json.contains("\"validity\":\"valid\""));
        assert!(!json.contains("timestamp"));
    }
}
