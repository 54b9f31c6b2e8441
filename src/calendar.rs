use crate::flight::{FlightDate, FlightEvent};
use icalendar::{Calendar, Component, Event, EventLike};
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum CalendarError {
    #[error("could not write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub fn to_event(flight: &FlightEvent) -> Event {
    let location = flight.route().to_string();
    Event::new()
        .summary(&flight.summary())
        .description(flight.description())
        .starts(flight.departure_utc())
        .ends(flight.arrival_utc())
        .add_property("LOCATION", &location)
        .done()
}

pub fn to_calendar(flight: &FlightEvent) -> Calendar {
    Calendar::new().push(to_event(flight)).done()
}

/// `flight_DD_MM_YYYY.ics`
pub fn file_name(date: &FlightDate) -> String {
    format!(
        "flight_{:02}_{:02}_{:04}.ics",
        date.day(),
        date.month(),
        date.year()
    )
}

/// Writes the flight as a single-event calendar into `dir`, replacing any
/// file of the same name.
pub fn write(flight: &FlightEvent, dir: &Path) -> Result<PathBuf, CalendarError> {
    let path = dir.join(file_name(&flight.date()));
    let content = to_calendar(flight).to_string();

    let io_error = |source: io::Error| CalendarError::Io {
        path: path.clone(),
        source,
    };
    let mut file = File::create(&path).map_err(io_error)?;
    file.write_all(content.as_bytes()).map_err(io_error)?;
    file.flush().map_err(io_error)?;

    info!(path = %path.display(), flight = flight.name(), "calendar file written");
    Ok(path)
}
