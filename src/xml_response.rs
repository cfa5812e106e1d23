use serde::Deserialize;

// Structures for Via XML deserialization.
// Only the subset of the search response consumed by the diff is mapped,
// everything else in the document is skipped by the deserializer.
#[derive(Debug, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
#[serde(rename = "AirFareSearchResponse")]
pub struct XmlSearchResponse {
    pub priced_itineraries: XmlPricedItineraries,
}

#[derive(Debug, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct XmlPricedItineraries {
    #[serde(rename = "Flights")]
    pub itineraries: Vec<XmlPricedItinerary>,
}

// No `default` here: a priced itinerary without onward flights or pricing
// is rejected by the deserializer.
#[derive(Debug, PartialEq, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct XmlPricedItinerary {
    pub onward_priced_itinerary: XmlFlightSequence,
    #[serde(default)]
    pub return_priced_itinerary: Option<XmlFlightSequence>,
    pub pricing: XmlPricing,
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone)]
#[serde(default, rename_all = "PascalCase")]
pub struct XmlFlightSequence {
    pub flights: XmlFlights,
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone)]
#[serde(default, rename_all = "PascalCase")]
pub struct XmlFlights {
    #[serde(rename = "Flight")]
    pub flights: Vec<XmlFlight>,
}

#[derive(Debug, PartialEq, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct XmlFlight {
    pub flight_number: String,
    pub source: String,
    pub destination: String,
    pub departure_time_stamp: String,
    pub arrival_time_stamp: String,
}

#[derive(Debug, PartialEq, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct XmlPricing {
    #[serde(rename = "@currency")]
    pub currency: String,
    #[serde(rename = "ServiceCharges", default)]
    pub service_charges: Vec<XmlServiceCharge>,
}

// Charges other than the single adult total may lack any of these
#[derive(Debug, PartialEq, Default, Deserialize, Clone)]
#[serde(default)]
pub struct XmlServiceCharge {
    #[serde(rename = "@type")]
    pub passenger_type: Option<String>,
    #[serde(rename = "@ChargeType")]
    pub charge_type: Option<String>,
    #[serde(rename = "$text")]
    pub amount: Option<String>,
}

impl XmlPricing {
    pub const TOTAL_AMOUNT: &'static str = "TotalAmount";
    pub const SINGLE_ADULT: &'static str = "SingleAdult";

    // The per-person total is the only charge the diff cares about
    pub fn single_adult_total(&self) -> Option<&XmlServiceCharge> {
        self.service_charges.iter().find(|charge| {
            charge.charge_type.as_deref() == Some(Self::TOTAL_AMOUNT)
                && charge.passenger_type.as_deref() == Some(Self::SINGLE_ADULT)
        })
    }
}
