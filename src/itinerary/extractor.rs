use crate::flight::{FlightDate, FlightEvent};
use crate::route::Route;
use crate::time::{self, TimeError};
use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

lazy_static! {
    static ref HEADER_RE: Regex = Regex::new(r"^(.*)\s+on\s+(\d{2}\.\d{2}\.\d{4})").unwrap();
    static ref ROUTE_RE: Regex = Regex::new(r"^(.*)\s+to\s+(.*)$").unwrap();
    static ref DEPARTURE_RE: Regex = Regex::new(r"↗\s*(\d{2}:\d{2}\s*GMT[+-]\d+)").unwrap();
    static ref ARRIVAL_RE: Regex = Regex::new(r"↘\s*(\d{2}:\d{2}\s*GMT[+-]\d+)").unwrap();
}

const ROUTE_SEPARATOR: &str = " to ";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ItineraryError {
    #[error("first line must read \"<flight> on DD.MM.YYYY\"")]
    MissingFlightHeader,
    #[error("no \"<departure> to <arrival>\" route line after the header")]
    MissingRoute,
    #[error("departure (↗) or arrival (↘) time not found")]
    MissingTimes,
    #[error(transparent)]
    Time(#[from] TimeError),
    #[error("arrival {arrival} is not after departure {departure}")]
    InvertedTimes {
        departure: DateTime<Utc>,
        arrival: DateTime<Utc>,
    },
}

/// A marker-prefixed time found somewhere in the text.
struct Annotation<'a> {
    marked: &'a str,
    time: &'a str,
}

impl<'a> Annotation<'a> {
    fn find(re: &Regex, text: &'a str) -> Option<Annotation<'a>> {
        let caps = re.captures(text)?;
        Some(Annotation {
            marked: caps.get(0)?.as_str().trim(),
            time: caps.get(1)?.as_str().trim(),
        })
    }

    fn is_line(&self, line: &str) -> bool {
        line == self.marked || line == self.time
    }
}

fn parse_header(line: &str) -> Result<(&str, FlightDate), ItineraryError> {
    let caps = HEADER_RE
        .captures(line)
        .ok_or(ItineraryError::MissingFlightHeader)?;
    let name = caps.get(1).map_or("", |m| m.as_str().trim());
    let date: FlightDate = caps
        .get(2)
        .ok_or(ItineraryError::MissingFlightHeader)?
        .as_str()
        .parse()?;
    Ok((name, date))
}

fn parse_route(line: &str) -> Option<Route> {
    let caps = ROUTE_RE.captures(line)?;
    Some(Route::new(caps.get(1)?.as_str().trim(), caps.get(2)?.as_str().trim()))
}

/// Pulls one flight out of itinerary text.
///
/// The first non-empty line is the `<name> on DD.MM.YYYY` header and the
/// first later line containing `" to "` is the route. The `↗` departure and
/// `↘` arrival times are searched for over the whole text, not per line.
/// Every remaining line becomes the description, in order.
pub fn extract(text: &str) -> Result<FlightEvent, ItineraryError> {
    let lines = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<&str>>();

    let header = *lines.first().ok_or(ItineraryError::MissingFlightHeader)?;
    let (name, date) = parse_header(header)?;

    let route_line = lines
        .iter()
        .skip(1)
        .copied()
        .find(|line| line.contains(ROUTE_SEPARATOR))
        .ok_or(ItineraryError::MissingRoute)?;
    let route = parse_route(route_line).ok_or(ItineraryError::MissingRoute)?;

    let (departure, arrival) = match (
        Annotation::find(&DEPARTURE_RE, text),
        Annotation::find(&ARRIVAL_RE, text),
    ) {
        (Some(departure), Some(arrival)) => (departure, arrival),
        _ => return Err(ItineraryError::MissingTimes),
    };

    let description = lines
        .iter()
        .copied()
        .filter(|line| {
            *line != header && *line != route_line && !departure.is_line(line) && !arrival.is_line(line)
        })
        .collect::<Vec<&str>>()
        .join("\n");

    let (departure_utc, arrival_utc) = time::resolve(&date, departure.time, arrival.time)?;

    FlightEvent::new(name, date, route, departure_utc, arrival_utc, description).ok_or(
        ItineraryError::InvertedTimes {
            departure: departure_utc,
            arrival: arrival_utc,
        },
    )
}
