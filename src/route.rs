use serde::Serialize;
use std::fmt;
use std::fmt::Formatter;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Route {
    pub departure_city: String,
    pub arrival_city: String,
}

impl Route {
    pub fn new(departure_city: impl Into<String>, arrival_city: impl Into<String>) -> Route {
        Route {
            departure_city: departure_city.into(),
            arrival_city: arrival_city.into(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.departure_city, self.arrival_city)
    }
}
