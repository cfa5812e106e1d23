// Builders for itineraries used across the unit tests
use crate::itinerary::{Flight, Itinerary};
use crate::parser::parse_timestamp;

const ONWARD_ROUTE: [&str; 5] = ["DXB", "DEL", "BKK", "HKT", "SIN"];
const RETURN_ROUTE: [&str; 5] = ["BKK", "DEL", "DXB", "MCT", "CAI"];

pub fn flight_between(
    number: &str,
    source: &str,
    destination: &str,
    departure: &str,
    arrival: &str,
) -> Flight {
    Flight {
        source: source.to_string(),
        destination: destination.to_string(),
        number: number.to_string(),
        departure_time: parse_timestamp(departure).unwrap(),
        arrival_time: parse_timestamp(arrival).unwrap(),
    }
}

pub fn flight(number: &str, departure: &str, arrival: &str) -> Flight {
    flight_between(number, "DXB", "DEL", departure, arrival)
}

fn leg(route: &[&str], day: u32, index: usize, number: &str) -> Flight {
    let hour = 8 + 3 * index;
    flight_between(
        number,
        route[index],
        route[index + 1],
        &format!("2024-03-{day:02}T{hour:02}00"),
        &format!("2024-03-{day:02}T{:02}00", hour + 2),
    )
}

/// Itinerary with onward flights on 10.03 and return flights on 17.03,
/// departing 08:00, 11:00, 14:00, ... and flying two hours each.
pub fn itinerary(onward: &[&str], returns: &[&str], cost: f64) -> Itinerary {
    let onward_flights: Vec<Flight> = onward
        .iter()
        .enumerate()
        .map(|(index, number)| leg(&ONWARD_ROUTE, 10, index, number))
        .collect();
    let return_flights = returns
        .iter()
        .enumerate()
        .map(|(index, number)| leg(&RETURN_ROUTE, 17, index, number))
        .collect();
    from_flights(onward_flights, return_flights, cost)
}

pub fn from_flights(onward_flights: Vec<Flight>, return_flights: Vec<Flight>, cost: f64) -> Itinerary {
    let first = onward_flights.first().unwrap().clone();
    let last = onward_flights.last().unwrap().clone();
    Itinerary {
        source: first.source,
        destination: last.destination,
        departure_time: first.departure_time,
        arrival_time: last.arrival_time,
        onward_flights,
        return_flights,
        cost,
        currency: "SGD".to_string(),
    }
}
