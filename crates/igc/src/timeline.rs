//! Absolute timestamps for fixes.
//!
//! B records only carry a time of day; the calendar date comes from a `DTE`
//! header. [`TimelineState`] combines the two as the stream is walked in
//! order, shifting the date when consecutive fixes cross UTC midnight.
//!
//! Midnight crossings are detected on the hour edge only: a fix in hour 0
//! following a fix in hour 23 advances the date by one day, and a fix in hour
//! 23 following a fix in hour 0 moves it back by one day. Gaps that skip
//! those hours entirely (e.g. 22:10 followed by 01:30) are not treated as a
//! crossing.
//!
//! The state is a plain value threaded through each step, so every pass owns
//! its own state and separate files can be processed concurrently.

use chrono::{DateTime, NaiveDate, NaiveTime, Timelike, Utc};
use tracing::trace;

use crate::record::Record;

/// Running date context of one pass over a record stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimelineState {
    current_date: Option<NaiveDate>,
    last_time: Option<NaiveTime>,
}

impl TimelineState {
    /// State before any header or fix has been seen.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The date the next fix would be resolved against.
    #[must_use]
    pub fn current_date(&self) -> Option<NaiveDate> {
        self.current_date
    }

    /// Time of day of the last resolved fix.
    #[must_use]
    pub fn last_time(&self) -> Option<NaiveTime> {
        self.last_time
    }

    /// Replace the date context.
    ///
    /// The previous fix time is forgotten so that no crossing is detected
    /// against fixes recorded under the old date.
    #[must_use]
    pub fn with_date(self, date: NaiveDate) -> Self {
        Self {
            current_date: Some(date),
            last_time: None,
        }
    }

    /// Advance over one record.
    ///
    /// Date headers replace the date context; fixes are resolved with
    /// [`TimelineState::resolve`]. Every other record leaves the state as is.
    #[must_use]
    pub fn step(self, record: &Record) -> (Self, Option<DateTime<Utc>>) {
        match record {
            Record::Header(header) => match header.date {
                Some(date) => (self.with_date(date), None),
                None => (self, None),
            },
            Record::Fix(fix) => self.resolve(fix.time),
            _ => (self, None),
        }
    }

    /// Resolve a fix time of day into an absolute UTC timestamp.
    ///
    /// Without a date context the timestamp is `None` and the state is
    /// unchanged.
    #[must_use]
    pub fn resolve(self, time: NaiveTime) -> (Self, Option<DateTime<Utc>>) {
        let Some(date) = self.current_date else {
            return (self, None);
        };

        let date = match self.last_time {
            Some(last) => shift_across_midnight(date, last, time),
            None => date,
        };

        let next = Self {
            current_date: Some(date),
            last_time: Some(time),
        };
        (next, Some(date.and_time(time).and_utc()))
    }
}

fn shift_across_midnight(date: NaiveDate, previous: NaiveTime, current: NaiveTime) -> NaiveDate {
    let shifted = match (previous.hour(), current.hour()) {
        (23, 0) => date.succ_opt(),
        (0, 23) => date.pred_opt(),
        _ => return date,
    };
    let shifted = shifted.unwrap_or(date);
    trace!(from = %date, to = %shifted, "Fix crossed UTC midnight");
    shifted
}

/// Fill in [`Fix::timestamp`](crate::record::Fix::timestamp) for every fix.
///
/// Records are passed through in order; a fresh [`TimelineState`] is used for
/// each call.
pub fn resolve_timestamps<I>(records: I) -> impl Iterator<Item = Record>
where
    I: IntoIterator<Item = Record>,
{
    records
        .into_iter()
        .scan(TimelineState::new(), |state, record| {
            let (next, timestamp) = state.step(&record);
            *state = next;
            Some(match record {
                Record::Fix(fix) => Record::Fix(fix.with_timestamp(timestamp)),
                other => other,
            })
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn time(hour: u32, minute: u32, second: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, second).unwrap()
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn fix_line(hour: u32, minute: u32, second: u32) -> String {
        format!("B{hour:02}{minute:02}{second:02}5049317N00610998EA0018500193")
    }

    fn timestamps(lines: &[String]) -> Vec<Option<DateTime<Utc>>> {
        resolve_timestamps(lines.iter().map(|l| Record::parse(l)))
            .filter_map(|r| r.as_fix().map(|f| f.timestamp))
            .collect()
    }

    #[test]
    fn test_no_date_leaves_timestamp_unset() {
        let (state, timestamp) = TimelineState::new().resolve(time(10, 0, 0));
        assert!(timestamp.is_none());
        assert_eq!(state, TimelineState::new());
    }

    #[test]
    fn test_resolve_with_date() {
        let state = TimelineState::new().with_date(date(2016, 5, 14));
        let (state, timestamp) = state.resolve(time(10, 56, 33));

        assert_eq!(
            timestamp,
            Some(Utc.with_ymd_and_hms(2016, 5, 14, 10, 56, 33).unwrap())
        );
        assert_eq!(state.last_time(), Some(time(10, 56, 33)));
        assert_eq!(state.current_date(), Some(date(2016, 5, 14)));
    }

    #[test]
    fn test_forward_midnight_crossing() {
        let state = TimelineState::new().with_date(date(2016, 5, 13));
        let (state, _) = state.resolve(time(23, 59, 58));
        let (state, timestamp) = state.resolve(time(0, 0, 2));

        assert_eq!(state.current_date(), Some(date(2016, 5, 14)));
        assert_eq!(
            timestamp,
            Some(Utc.with_ymd_and_hms(2016, 5, 14, 0, 0, 2).unwrap())
        );
    }

    #[test]
    fn test_backward_midnight_crossing() {
        let state = TimelineState::new().with_date(date(2016, 5, 14));
        let (state, _) = state.resolve(time(0, 0, 5));
        let (state, timestamp) = state.resolve(time(23, 59, 59));

        assert_eq!(state.current_date(), Some(date(2016, 5, 13)));
        assert_eq!(
            timestamp,
            Some(Utc.with_ymd_and_hms(2016, 5, 13, 23, 59, 59).unwrap())
        );
    }

    #[test]
    fn test_gap_skipping_edge_hours_keeps_date() {
        let state = TimelineState::new().with_date(date(2016, 5, 13));
        let (state, _) = state.resolve(time(22, 10, 0));
        let (state, _) = state.resolve(time(1, 30, 0));
        assert_eq!(state.current_date(), Some(date(2016, 5, 13)));
    }

    #[test]
    fn test_year_end_crossing() {
        let state = TimelineState::new().with_date(date(2016, 12, 31));
        let (state, _) = state.resolve(time(23, 59, 59));
        let (_, timestamp) = state.resolve(time(0, 0, 0));
        assert_eq!(
            timestamp,
            Some(Utc.with_ymd_and_hms(2017, 1, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_date_header_replaces_state() {
        let lines = vec![
            "HFDTE130516".to_string(),
            fix_line(23, 59, 59),
            "HFDTE200616".to_string(),
            fix_line(0, 0, 1),
        ];
        let stamps = timestamps(&lines);

        assert_eq!(
            stamps,
            vec![
                Some(Utc.with_ymd_and_hms(2016, 5, 13, 23, 59, 59).unwrap()),
                Some(Utc.with_ymd_and_hms(2016, 6, 20, 0, 0, 1).unwrap()),
            ]
        );
    }

    #[test]
    fn test_fixes_before_date_header() {
        let lines = vec![
            fix_line(9, 0, 0),
            "HFDTE140516".to_string(),
            fix_line(9, 0, 1),
        ];
        let stamps = timestamps(&lines);

        assert_eq!(stamps[0], None);
        assert_eq!(
            stamps[1],
            Some(Utc.with_ymd_and_hms(2016, 5, 14, 9, 0, 1).unwrap())
        );
    }

    #[test]
    fn test_non_fix_records_pass_through() {
        let records = vec![
            Record::parse("AXCT001"),
            Record::parse("HFGTYGLIDERTYPE:ASG32 MI"),
            Record::Unknown { tag: Some('L') },
        ];
        let resolved: Vec<_> = resolve_timestamps(records.clone()).collect();
        assert_eq!(resolved, records);
    }

    #[test]
    fn test_header_without_date_keeps_state() {
        let state = TimelineState::new().with_date(date(2016, 5, 14));
        let (next, timestamp) = state.step(&Record::parse("HFGTYGLIDERTYPE:ASG32 MI"));
        assert_eq!(next, state);
        assert!(timestamp.is_none());
    }
}
