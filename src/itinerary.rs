use chrono::NaiveDateTime;

// A single leg as it appears in the search response
#[derive(Debug, Clone, PartialEq)]
pub struct Flight {
    pub source: String,
    pub destination: String,
    pub number: String,
    pub departure_time: NaiveDateTime,
    pub arrival_time: NaiveDateTime,
}

/// One priced travel option.
///
/// `onward_flights` is never empty; an empty `return_flights` means a
/// one-way itinerary. Source, destination and the overall departure and
/// arrival times are taken from the first and last onward flight.
#[derive(Debug, Clone, PartialEq)]
pub struct Itinerary {
    pub source: String,
    pub destination: String,
    pub onward_flights: Vec<Flight>,
    pub return_flights: Vec<Flight>,
    pub cost: f64,
    pub currency: String,
    pub departure_time: NaiveDateTime,
    pub arrival_time: NaiveDateTime,
}

impl Itinerary {
    pub fn onward_numbers(&self) -> impl ExactSizeIterator<Item = &str> {
        self.onward_flights.iter().map(|f| f.number.as_str())
    }

    pub fn return_numbers(&self) -> impl ExactSizeIterator<Item = &str> {
        self.return_flights.iter().map(|f| f.number.as_str())
    }

    pub fn is_one_way(&self) -> bool {
        self.return_flights.is_empty()
    }

    /// True when the onward leg has a single flight, rendered inline.
    pub fn is_direct(&self) -> bool {
        self.onward_flights.len() == 1
    }
}
