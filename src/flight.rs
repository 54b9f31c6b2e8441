use crate::route::Route;
use crate::time::TimeError;
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use tabled::Tabled;

lazy_static! {
    static ref FLIGHT_DATE_RE: Regex = Regex::new(r"^\d{2}\.\d{2}\.\d{4}$").unwrap();
}

/// Nominal departure date as written in the itinerary, `DD.MM.YYYY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FlightDate(NaiveDate);

impl FlightDate {
    const FORMAT: &'static str = "%d.%m.%Y";

    pub fn new(day: u32, month: u32, year: i32) -> Option<FlightDate> {
        NaiveDate::from_ymd_opt(year, month, day).map(FlightDate)
    }

    pub fn naive(&self) -> NaiveDate {
        self.0
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }
}

impl FromStr for FlightDate {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TimeError::InvalidDate(s.to_string());
        if !FLIGHT_DATE_RE.is_match(s) {
            return Err(invalid());
        }
        NaiveDate::parse_from_str(s, Self::FORMAT)
            .map(FlightDate)
            .map_err(|_| invalid())
    }
}

impl fmt::Display for FlightDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(Self::FORMAT))
    }
}

impl Serialize for FlightDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One flight, with both ends pinned to UTC. Arrival is always strictly
/// after departure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlightEvent {
    name: String,
    date: FlightDate,
    #[serde(flatten)]
    route: Route,
    departure_utc: DateTime<Utc>,
    arrival_utc: DateTime<Utc>,
    description: String,
}

impl FlightEvent {
    /// Returns `None` when `arrival_utc` is not after `departure_utc`.
    pub fn new(
        name: impl Into<String>,
        date: FlightDate,
        route: Route,
        departure_utc: DateTime<Utc>,
        arrival_utc: DateTime<Utc>,
        description: impl Into<String>,
    ) -> Option<FlightEvent> {
        (arrival_utc > departure_utc).then(|| FlightEvent {
            name: name.into(),
            date,
            route,
            departure_utc,
            arrival_utc,
            description: description.into(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn date(&self) -> FlightDate {
        self.date
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn departure_city(&self) -> &str {
        &self.route.departure_city
    }

    pub fn arrival_city(&self) -> &str {
        &self.route.arrival_city
    }

    pub fn departure_utc(&self) -> DateTime<Utc> {
        self.departure_utc
    }

    pub fn arrival_utc(&self) -> DateTime<Utc> {
        self.arrival_utc
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn summary(&self) -> String {
        format!("Flight {}", self.name)
    }
}

impl Tabled for FlightEvent {
    const LENGTH: usize = 5;

    fn fields(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::Borrowed(self.name.as_str()),
            Cow::Owned(self.date.to_string()),
            Cow::Owned(self.route.to_string()),
            Cow::Owned(self.departure_utc.format("%Y-%m-%d %H:%MZ").to_string()),
            Cow::Owned(self.arrival_utc.format("%Y-%m-%d %H:%MZ").to_string()),
        ]
    }

    fn headers() -> Vec<Cow<'static, str>> {
        ["flight", "date", "route", "departure (UTC)", "arrival (UTC)"]
            .into_iter()
            .map(Cow::Borrowed)
            .collect()
    }
}
