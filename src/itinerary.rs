pub mod extractor;

pub use extractor::{ItineraryError, extract};
