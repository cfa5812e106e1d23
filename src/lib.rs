// Via XML search snapshot comparison

pub mod config;
pub mod format;
pub mod itinerary;
pub mod matcher;
pub mod parser;
pub mod render;
pub mod xml_response;

#[cfg(test)]
mod fixtures;

// Re-export key types for convenience
pub use config::{DiffConfig, ReturnPolicy};
pub use itinerary::{Flight, Itinerary};
pub use matcher::{match_itineraries, ItineraryChange};
pub use parser::{ParseError, ViaXmlParser};
pub use render::{DiffRenderer, DiffSummary};
