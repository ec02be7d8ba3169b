use serde::{Deserialize, Serialize};

// Data structures for the upstream token endpoint
#[derive(Debug, Deserialize, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

// Data structures for the upstream flight-offer search response
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct OfferSearchResponse {
    #[serde(default)]
    pub data: Vec<FlightOffer>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FlightOffer {
    pub price: OfferPrice,
    #[serde(default)]
    pub itineraries: Vec<Itinerary>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OfferPrice {
    pub total: String,
    #[serde(default)]
    pub currency: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Itinerary {
    #[serde(default)]
    pub segments: Vec<Segment>,
}

// Segments missing any of these fields still decode; the fetcher falls back per field
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Segment {
    pub departure: SegmentEndpoint,
    pub arrival: SegmentEndpoint,
    pub carrier_code: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SegmentEndpoint {
    pub iata_code: String,
    pub at: String,
}

impl FlightOffer {
    // First segment of the first itinerary, if the upstream sent one
    pub fn first_segment(&self) -> Option<&Segment> {
        self.itineraries.first()?.segments.first()
    }

    // Connections in the first itinerary; a missing itinerary or segment list counts as direct
    pub fn stop_count(&self) -> u32 {
        let segments = self
            .itineraries
            .first()
            .map(|itinerary| itinerary.segments.len())
            .filter(|count| *count > 0)
            .unwrap_or(1);
        u32::try_from(segments.saturating_sub(1)).unwrap_or(u32::MAX)
    }
}
