use crate::flight::FlightDate;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, Timelike, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

lazy_static! {
    static ref TIME_SPEC_RE: Regex = Regex::new(r"(\d{2}):(\d{2})\s*GMT([+-]\d+)").unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeError {
    #[error("malformed time {0:?}, expected HH:MM GMT+N")]
    MalformedTime(String),
    #[error("invalid date {0:?}, expected DD.MM.YYYY")]
    InvalidDate(String),
}

/// Whole-hour shift from UTC. No daylight saving, no half-hour zones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GmtOffset(FixedOffset);

impl GmtOffset {
    pub fn new(hours: i32) -> Option<GmtOffset> {
        hours
            .checked_mul(3600)
            .and_then(FixedOffset::east_opt)
            .map(GmtOffset)
    }

    pub fn hours(self) -> i32 {
        self.0.local_minus_utc() / 3600
    }
}

impl fmt::Display for GmtOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GMT{:+}", self.hours())
    }
}

/// A local clock time annotated with its GMT offset, e.g. `14:30 GMT+2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawTimeSpec {
    pub clock: NaiveTime,
    pub offset: GmtOffset,
}

impl RawTimeSpec {
    pub fn hour(&self) -> u32 {
        self.clock.hour()
    }

    /// Pins the clock time to `date` at the annotated offset.
    pub fn localize(&self, date: NaiveDate) -> DateTime<FixedOffset> {
        let offset = self.offset.0;
        let local = date.and_time(self.clock);
        DateTime::from_naive_utc_and_offset(local - offset, offset)
    }

    pub fn to_utc(&self, date: NaiveDate) -> DateTime<Utc> {
        self.localize(date).with_timezone(&Utc)
    }
}

impl FromStr for RawTimeSpec {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || TimeError::MalformedTime(s.to_string());
        let caps = TIME_SPEC_RE.captures(s).ok_or_else(malformed)?;

        let hour: u32 = caps[1].parse().map_err(|_| malformed())?;
        let minute: u32 = caps[2].parse().map_err(|_| malformed())?;
        let offset: i32 = caps[3].parse().map_err(|_| malformed())?;

        Ok(RawTimeSpec {
            clock: NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(malformed)?,
            offset: GmtOffset::new(offset).ok_or_else(malformed)?,
        })
    }
}

impl fmt::Display for RawTimeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.clock.format("%H:%M"), self.offset)
    }
}

/// Arrival is taken to land on the day after departure when its clock hour
/// is strictly lower than the departure clock hour. Minutes are ignored, so
/// equal hours always count as the same day.
///
/// This is a heuristic and it is wrong for some real flights:
/// - a westbound hop that lands at an earlier local hour on the same day
///   (depart 09:30 GMT+1, arrive 08:45 GMT+0) is pushed a full day late;
/// - an overnight flight arriving at the same hour it left (depart 10:40,
///   arrive 10:05 next day) stays on the departure day;
/// - anything that lands at a later local hour one or more days after it
///   left (eastbound long-haul over 24h of local clock) stays on the
///   departure day.
///
/// Callers see the second and third cases as an arrival that is not after
/// the departure.
pub fn crosses_midnight(departure: &RawTimeSpec, arrival: &RawTimeSpec) -> bool {
    arrival.hour() < departure.hour()
}

/// Resolves the departure and arrival annotations of a flight leaving on
/// `date` into UTC instants, applying [`crosses_midnight`] to pick the
/// arrival's calendar day.
pub fn resolve(
    date: &FlightDate,
    departure: &str,
    arrival: &str,
) -> Result<(DateTime<Utc>, DateTime<Utc>), TimeError> {
    let departure: RawTimeSpec = departure.parse()?;
    let arrival: RawTimeSpec = arrival.parse()?;

    let departure_date = date.naive();
    let arrival_date = if crosses_midnight(&departure, &arrival) {
        departure_date
            .succ_opt()
            .ok_or_else(|| TimeError::InvalidDate(date.to_string()))?
    } else {
        departure_date
    };

    Ok((departure.to_utc(departure_date), arrival.to_utc(arrival_date)))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use chrono::Duration;
    use proptest::prelude::*;

    fn arb_spec() -> impl Strategy<Value = (u32, u32, i32)> {
        (0..24u32, 0..60u32, -12..=14i32)
    }

    fn render((h, m, n): (u32, u32, i32)) -> String {
        format!("{:02}:{:02} GMT{:+}", h, m, n)
    }

    proptest! {
        #[test]
        fn test_utc_is_local_minus_offset(
            spec in arb_spec(),
            day in 1..=28u32,
            month in 1..=12u32,
            year in 1990..2100i32,
        ) {
            let flight_date = FlightDate::new(day, month, year).unwrap();
            let raw = render(spec);
            let (dep, arr) = resolve(&flight_date, &raw, &raw).unwrap();

            let local = flight_date.naive().and_hms_opt(spec.0, spec.1, 0).unwrap();
            prop_assert_eq!(local - Duration::hours(spec.2 as i64), dep.naive_utc());
            prop_assert_eq!(dep, arr);
        }

        #[test]
        fn test_rollover_iff_arrival_hour_lower(dep in arb_spec(), arr in arb_spec()) {
            let flight_date = FlightDate::new(1, 5, 2024).unwrap();
            let (_, arrival_utc) = resolve(&flight_date, &render(dep), &render(arr)).unwrap();

            let arrival_local = arrival_utc.naive_utc() + Duration::hours(arr.2 as i64);
            let expected_day = if arr.0 < dep.0 { 2 } else { 1 };
            prop_assert_eq!(
                NaiveDate::from_ymd_opt(2024, 5, expected_day).unwrap(),
                arrival_local.date()
            );
            prop_assert_eq!((arr.0, arr.1), (arrival_local.hour(), arrival_local.minute()));
        }
    }
}
