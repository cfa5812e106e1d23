// Via XML parsing: search response document -> itinerary records
use std::num::ParseFloatError;
use std::path::Path;

use chrono::NaiveDateTime;
use quick_xml::de::from_str;
use thiserror::Error;
use tracing::debug;

use crate::itinerary::{Flight, Itinerary};
use crate::xml_response::{XmlFlight, XmlPricedItinerary, XmlSearchResponse};

// Error types for XML processing
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("XML parse error: {0}")]
    XmlParseError(String),

    #[error("Missing required field: {0}")]
    MissingRequiredField(String),

    #[error("Invalid timestamp {value:?}: {source}")]
    InvalidTimestamp {
        value: String,
        source: chrono::ParseError,
    },

    #[error("Invalid amount {value:?}: {source}")]
    InvalidAmount {
        value: String,
        source: ParseFloatError,
    },

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Timestamps come without seconds or a separator between hours and minutes,
/// e.g. `2024-03-10T1430`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H%M";

pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime, ParseError> {
    NaiveDateTime::parse_from_str(value.trim(), TIMESTAMP_FORMAT).map_err(|source| {
        ParseError::InvalidTimestamp {
            value: value.to_string(),
            source,
        }
    })
}

impl TryFrom<XmlFlight> for Flight {
    type Error = ParseError;

    fn try_from(item: XmlFlight) -> Result<Self, Self::Error> {
        Ok(Flight {
            departure_time: parse_timestamp(&item.departure_time_stamp)?,
            arrival_time: parse_timestamp(&item.arrival_time_stamp)?,
            source: item.source,
            destination: item.destination,
            number: item.flight_number,
        })
    }
}

impl TryFrom<XmlPricedItinerary> for Itinerary {
    type Error = ParseError;

    fn try_from(item: XmlPricedItinerary) -> Result<Self, Self::Error> {
        let charge = item.pricing.single_adult_total().ok_or_else(|| {
            ParseError::MissingRequiredField(
                "Pricing/ServiceCharges[@ChargeType=TotalAmount][@type=SingleAdult]".to_string(),
            )
        })?;
        let amount = charge
            .amount
            .as_deref()
            .filter(|amount| !amount.trim().is_empty())
            .ok_or_else(|| {
            ParseError::MissingRequiredField(
                "Pricing/ServiceCharges[@ChargeType=TotalAmount][@type=SingleAdult] amount"
                    .to_string(),
            )
        })?;
        let cost = amount
            .trim()
            .parse::<f64>()
            .map_err(|source| ParseError::InvalidAmount {
                value: amount.to_string(),
                source,
            })?;

        let onward_flights = item
            .onward_priced_itinerary
            .flights
            .flights
            .into_iter()
            .map(Flight::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let return_flights = item
            .return_priced_itinerary
            .map(|sequence| sequence.flights.flights)
            .unwrap_or_default()
            .into_iter()
            .map(Flight::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let (first, last) = match (onward_flights.first(), onward_flights.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => {
                return Err(ParseError::MissingRequiredField(
                    "OnwardPricedItinerary/Flights/Flight".to_string(),
                ))
            }
        };

        Ok(Itinerary {
            source: first.source.clone(),
            destination: last.destination.clone(),
            departure_time: first.departure_time,
            arrival_time: last.arrival_time,
            onward_flights,
            return_flights,
            cost,
            currency: item.pricing.currency,
        })
    }
}

// Stateless for now, kept as a type so callers share one entry point
// for documents and files.
#[derive(Debug, Default)]
pub struct ViaXmlParser;

impl ViaXmlParser {
    pub fn new() -> Self {
        Self
    }

    // Parse a whole search response, keeping document order
    pub fn parse(&self, xml: &str) -> Result<Vec<Itinerary>, ParseError> {
        let response: XmlSearchResponse =
            from_str(xml).map_err(|e| ParseError::XmlParseError(e.to_string()))?;

        let itineraries = response
            .priced_itineraries
            .itineraries
            .into_iter()
            .map(Itinerary::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        debug!(count = itineraries.len(), "parsed itineraries");
        Ok(itineraries)
    }

    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<Vec<Itinerary>, ParseError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        debug!(path = %path.display(), bytes = content.len(), "read search response");
        self.parse(&content)
    }
}

// Sample snapshots (the actual files are stored in the samples directory)
pub const SAMPLE_BEFORE_PATH: &str = "samples/via_search_before.xml";
pub const SAMPLE_AFTER_PATH: &str = "samples/via_search_after.xml";

// A small sample for inline testing
pub const SMALL_SAMPLE_XML: &str = r#"
<AirFareSearchResponse RequestTime="28-09-2015 20:23:49" ResponseTime="28-09-2015 20:23:56">
  <RequestId>123ABCD</RequestId>
  <PricedItineraries>
    <Flights>
      <OnwardPricedItinerary>
        <Flights>
          <Flight>
            <Carrier id="AI">AirIndia</Carrier>
            <FlightNumber>996</FlightNumber>
            <Source>DXB</Source>
            <Destination>DEL</Destination>
            <DepartureTimeStamp>2018-10-22T0005</DepartureTimeStamp>
            <ArrivalTimeStamp>2018-10-22T0445</ArrivalTimeStamp>
            <Class>G</Class>
            <NumberOfStops>0</NumberOfStops>
            <TicketType>E</TicketType>
          </Flight>
          <Flight>
            <Carrier id="AI">AirIndia</Carrier>
            <FlightNumber>332</FlightNumber>
            <Source>DEL</Source>
            <Destination>BKK</Destination>
            <DepartureTimeStamp>2018-10-22T1350</DepartureTimeStamp>
            <ArrivalTimeStamp>2018-10-22T1935</ArrivalTimeStamp>
            <Class>G</Class>
            <NumberOfStops>0</NumberOfStops>
            <TicketType>E</TicketType>
          </Flight>
        </Flights>
      </OnwardPricedItinerary>
      <ReturnPricedItinerary>
        <Flights>
          <Flight>
            <Carrier id="AI">AirIndia</Carrier>
            <FlightNumber>333</FlightNumber>
            <Source>BKK</Source>
            <Destination>DXB</Destination>
            <DepartureTimeStamp>2018-10-30T1445</DepartureTimeStamp>
            <ArrivalTimeStamp>2018-10-30T1900</ArrivalTimeStamp>
            <Class>G</Class>
            <NumberOfStops>0</NumberOfStops>
            <TicketType>E</TicketType>
          </Flight>
        </Flights>
      </ReturnPricedItinerary>
      <Pricing currency="SGD">
        <ServiceCharges type="SingleAdult" ChargeType="BaseFare">197.00</ServiceCharges>
        <ServiceCharges type="SingleAdult" ChargeType="AirlineTaxes">349.80</ServiceCharges>
        <ServiceCharges type="SingleAdult" ChargeType="TotalAmount">546.80</ServiceCharges>
      </Pricing>
    </Flights>
    <Flights>
      <OnwardPricedItinerary>
        <Flights>
          <Flight>
            <Carrier id="EK">Emirates</Carrier>
            <FlightNumber>384</FlightNumber>
            <Source>DXB</Source>
            <Destination>BKK</Destination>
            <DepartureTimeStamp>2018-10-22T0310</DepartureTimeStamp>
            <ArrivalTimeStamp>2018-10-22T1240</ArrivalTimeStamp>
            <Class>U</Class>
            <NumberOfStops>0</NumberOfStops>
            <TicketType>E</TicketType>
          </Flight>
        </Flights>
      </OnwardPricedItinerary>
      <Pricing currency="SGD">
        <ServiceCharges type="SingleAdult" ChargeType="BaseFare">400.00</ServiceCharges>
        <ServiceCharges type="SingleAdult" ChargeType="TotalAmount">612.00</ServiceCharges>
        <ServiceCharges type="SingleChild" ChargeType="TotalAmount">500.00</ServiceCharges>
      </Pricing>
    </Flights>
  </PricedItineraries>
</AirFareSearchResponse>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use test_case::test_case;

    fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn test_parse_small_sample() {
        let parser = ViaXmlParser::new();
        let result = parser.parse(SMALL_SAMPLE_XML);
        assert!(result.is_ok(), "Failed to parse sample: {:?}", result.err());

        let itineraries = result.unwrap();
        assert_eq!(itineraries.len(), 2);

        let first = &itineraries[0];
        assert_eq!(first.source, "DXB");
        assert_eq!(first.destination, "BKK");
        assert_eq!(first.onward_numbers().collect::<Vec<_>>(), vec!["996", "332"]);
        assert_eq!(first.return_numbers().collect::<Vec<_>>(), vec!["333"]);
        assert_eq!(first.departure_time, at(2018, 10, 22, 0, 5));
        assert_eq!(first.arrival_time, at(2018, 10, 22, 19, 35));
        assert_eq!(first.cost, 546.8);
        assert_eq!(first.currency, "SGD");

        let second = &itineraries[1];
        assert!(second.is_one_way());
        assert!(second.is_direct());
        assert_eq!(second.cost, 612.0);
    }

    #[test]
    fn test_parse_flight_fields() {
        let itineraries = ViaXmlParser::new().parse(SMALL_SAMPLE_XML).unwrap();
        let flight = &itineraries[0].onward_flights[1];

        assert_eq!(
            flight,
            &Flight {
                source: "DEL".to_string(),
                destination: "BKK".to_string(),
                number: "332".to_string(),
                departure_time: at(2018, 10, 22, 13, 50),
                arrival_time: at(2018, 10, 22, 19, 35),
            }
        );
    }

    #[test]
    fn test_parse_empty_document() {
        let xml = "<AirFareSearchResponse><PricedItineraries/></AirFareSearchResponse>";
        let itineraries = ViaXmlParser::new().parse(xml).unwrap();
        assert!(itineraries.is_empty());
    }

    #[test_case("2024-03-10T1430", at(2024, 3, 10, 14, 30); "afternoon")]
    #[test_case("2024-12-31T0000", at(2024, 12, 31, 0, 0); "midnight")]
    #[test_case(" 2024-03-10T0905\n", at(2024, 3, 10, 9, 5); "surrounding whitespace")]
    fn test_parse_timestamp(value: &str, expected: NaiveDateTime) {
        assert_eq!(parse_timestamp(value).unwrap(), expected);
    }

    #[test_case("2024-03-10T14:30"; "colon separator")]
    #[test_case("2024-03-10"; "date only")]
    #[test_case("10.03.2024 1430"; "wrong order")]
    fn test_parse_timestamp_rejects(value: &str) {
        assert!(matches!(
            parse_timestamp(value),
            Err(ParseError::InvalidTimestamp { .. })
        ));
    }

    #[test]
    fn test_invalid_timestamp_aborts_document() {
        let xml = SMALL_SAMPLE_XML.replace("2018-10-22T1350", "2018-10-22 13:50");
        let result = ViaXmlParser::new().parse(&xml);
        assert!(matches!(result, Err(ParseError::InvalidTimestamp { .. })));
    }

    #[test]
    fn test_missing_total_amount() {
        let xml = SMALL_SAMPLE_XML.replace(
            r#"ChargeType="TotalAmount">546.80"#,
            r#"ChargeType="Surcharge">546.80"#,
        );
        let result = ViaXmlParser::new().parse(&xml);
        assert!(matches!(result, Err(ParseError::MissingRequiredField(_))));
    }

    #[test]
    fn test_child_total_is_not_used() {
        // Only the child fare carries TotalAmount, the adult one is missing
        let xml = SMALL_SAMPLE_XML.replace(
            r#"<ServiceCharges type="SingleAdult" ChargeType="TotalAmount">612.00</ServiceCharges>"#,
            "",
        );
        let result = ViaXmlParser::new().parse(&xml);
        assert!(matches!(result, Err(ParseError::MissingRequiredField(_))));
    }

    #[test]
    fn test_unrelated_charge_without_attributes_is_skipped() {
        let xml = SMALL_SAMPLE_XML
            .replace(
                r#"<ServiceCharges type="SingleAdult" ChargeType="BaseFare">400.00</ServiceCharges>"#,
                r#"<ServiceCharges type="SingleAdult">400.00</ServiceCharges>"#,
            )
            .replace(
                r#"<ServiceCharges type="SingleChild" ChargeType="TotalAmount">500.00</ServiceCharges>"#,
                r#"<ServiceCharges ChargeType="TotalAmount"/>"#,
            );
        let result = ViaXmlParser::new().parse(&xml);
        assert!(result.is_ok(), "Failed to parse: {:?}", result.err());
        assert_eq!(result.unwrap()[1].cost, 612.0);
    }

    #[test]
    fn test_interleaved_charges_are_collected() {
        let xml = SMALL_SAMPLE_XML.replace(
            r#"<ServiceCharges type="SingleAdult" ChargeType="TotalAmount">612.00</ServiceCharges>"#,
            r#"<Discount>none</Discount>
        <ServiceCharges type="SingleAdult" ChargeType="TotalAmount">612.00</ServiceCharges>"#,
        );
        let itineraries = ViaXmlParser::new().parse(&xml).unwrap();
        assert_eq!(itineraries[1].cost, 612.0);
    }

    #[test]
    fn test_total_amount_without_value() {
        let xml = SMALL_SAMPLE_XML.replace(
            r#"<ServiceCharges type="SingleAdult" ChargeType="TotalAmount">612.00</ServiceCharges>"#,
            r#"<ServiceCharges type="SingleAdult" ChargeType="TotalAmount"/>"#,
        );
        let result = ViaXmlParser::new().parse(&xml);
        assert!(matches!(result, Err(ParseError::MissingRequiredField(_))));
    }

    #[test]
    fn test_invalid_amount() {
        let xml = SMALL_SAMPLE_XML.replace(">612.00<", ">n/a<");
        let result = ViaXmlParser::new().parse(&xml);
        assert!(matches!(result, Err(ParseError::InvalidAmount { .. })));
    }

    #[test]
    fn test_missing_flight_number() {
        let xml = SMALL_SAMPLE_XML.replace("<FlightNumber>384</FlightNumber>", "");
        let result = ViaXmlParser::new().parse(&xml);
        assert!(matches!(result, Err(ParseError::XmlParseError(_))));
    }

    #[test]
    fn test_missing_pricing() {
        let xml = r#"
        <AirFareSearchResponse>
          <PricedItineraries>
            <Flights>
              <OnwardPricedItinerary>
                <Flights>
                  <Flight>
                    <FlightNumber>1</FlightNumber>
                    <Source>AAA</Source>
                    <Destination>BBB</Destination>
                    <DepartureTimeStamp>2024-01-01T1000</DepartureTimeStamp>
                    <ArrivalTimeStamp>2024-01-01T1200</ArrivalTimeStamp>
                  </Flight>
                </Flights>
              </OnwardPricedItinerary>
            </Flights>
          </PricedItineraries>
        </AirFareSearchResponse>
        "#;
        let result = ViaXmlParser::new().parse(xml);
        assert!(matches!(result, Err(ParseError::XmlParseError(_))));
    }

    #[test]
    fn test_empty_onward_flights() {
        let xml = r#"
        <AirFareSearchResponse>
          <PricedItineraries>
            <Flights>
              <OnwardPricedItinerary>
                <Flights/>
              </OnwardPricedItinerary>
              <Pricing currency="USD">
                <ServiceCharges type="SingleAdult" ChargeType="TotalAmount">10.00</ServiceCharges>
              </Pricing>
            </Flights>
          </PricedItineraries>
        </AirFareSearchResponse>
        "#;
        let result = ViaXmlParser::new().parse(xml);
        assert!(matches!(result, Err(ParseError::MissingRequiredField(_))));
    }

    #[test]
    fn test_parse_file_not_found() {
        let result = ViaXmlParser::new().parse_file("samples/does_not_exist.xml");
        assert!(matches!(result, Err(ParseError::IoError(_))));
    }

    #[test]
    fn test_load_sample_files() {
        let parser = ViaXmlParser::new();

        let before = parser.parse_file(SAMPLE_BEFORE_PATH);
        assert!(before.is_ok(), "Failed to parse sample: {:?}", before.err());
        assert_eq!(before.unwrap().len(), 4);

        let after = parser.parse_file(SAMPLE_AFTER_PATH);
        assert!(after.is_ok(), "Failed to parse sample: {:?}", after.err());
        assert_eq!(after.unwrap().len(), 4);
    }
}
