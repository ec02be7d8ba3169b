use serde::{Deserialize, Serialize};

// Airline marker for a leg without a usable upstream offer.
pub const UNAVAILABLE_AIRLINE: &str = "unavailable";

// A named candidate trip, priced leg by leg.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RouteOption {
    pub name: String,
    pub legs: Vec<LegRequest>,
}

// One flight of a route. Codes and date are forwarded to the upstream verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LegRequest {
    pub from: String,
    pub to: String,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LegResult {
    pub from: String,
    pub to: String,
    pub price: f64,
    pub airline: String,
    pub departure: String,
    pub arrival: String,
    pub stops: u32,
}

impl LegResult {
    // Zero-priced placeholder for a leg the upstream could not price.
    pub fn unavailable(leg: &LegRequest) -> Self {
        Self {
            from: leg.from.clone(),
            to: leg.to.clone(),
            price: 0.0,
            airline: UNAVAILABLE_AIRLINE.to_string(),
            departure: leg.date.clone(),
            arrival: String::new(),
            stops: 0,
        }
    }

    pub fn is_unavailable(&self) -> bool {
        self.airline == UNAVAILABLE_AIRLINE
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteResult {
    pub route: String,
    pub total_price: f64,
    pub currency: String,
    pub legs: Vec<LegResult>,
}

impl RouteResult {
    // Builds the summary for `route`, totalling leg prices in leg order.
    // Unavailable legs contribute zero, so a partially priced route reports an
    // understated total instead of failing.
    pub fn summarize(route: &RouteOption, legs: Vec<LegResult>, currency: &str) -> Self {
        let total_price = legs.iter().fold(0.0, |sum, leg| sum + leg.price);
        Self {
            route: route.name.clone(),
            total_price,
            currency: currency.to_string(),
            legs,
        }
    }
}

// Inbound request/response envelopes for POST /api/flights
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FlightSearchRequest {
    pub routes: Vec<RouteOption>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FlightSearchResponse {
    pub results: Vec<RouteResult>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leg(from: &str, to: &str, date: &str) -> LegRequest {
        LegRequest {
            from: from.to_string(),
            to: to.to_string(),
            date: date.to_string(),
        }
    }

    fn priced(leg: &LegRequest, price: f64) -> LegResult {
        LegResult {
            price,
            airline: "LA".to_string(),
            ..LegResult::unavailable(leg)
        }
    }

    #[test]
    fn test_unavailable_placeholder() {
        let request = leg("GRU", "VVI", "2026-02-15");
        let result = LegResult::unavailable(&request);

        assert_eq!(result.from, "GRU");
        assert_eq!(result.to, "VVI");
        assert_eq!(result.price, 0.0);
        assert_eq!(result.airline, "unavailable");
        assert_eq!(result.departure, "2026-02-15");
        assert_eq!(result.arrival, "");
        assert_eq!(result.stops, 0);
        assert!(result.is_unavailable());
    }

    #[test]
    fn test_summarize_empty_route() {
        let route = RouteOption {
            name: "Empty".to_string(),
            legs: vec![],
        };
        let summary = RouteResult::summarize(&route, vec![], "BRL");
        assert_eq!(summary.route, "Empty");
        assert_eq!(summary.total_price, 0.0);
        assert!(summary.legs.is_empty());
    }

    #[test]
    fn test_summarize_counts_unavailable_as_zero() {
        let legs = vec![
            leg("GRU", "VVI", "2026-02-15"),
            leg("VVI", "LPB", "2026-02-20"),
            leg("LPB", "CUZ", "2026-02-25"),
            leg("CUZ", "GRU", "2026-03-05"),
        ];
        let route = RouteOption {
            name: "Bolivia".to_string(),
            legs: legs.clone(),
        };
        let results = vec![
            priced(&legs[0], 450.10),
            LegResult::unavailable(&legs[1]),
            priced(&legs[2], 312.35),
            priced(&legs[3], 1020.99),
        ];
        let expected: f64 = results.iter().map(|l| l.price).sum();

        let summary = RouteResult::summarize(&route, results, "BRL");
        assert_eq!(summary.total_price, expected);
        assert_eq!(summary.legs.len(), 4);
        assert!(summary.legs[1].is_unavailable());
    }

    #[test]
    fn test_route_result_serializes_camel_case() {
        let route = RouteOption {
            name: "A".to_string(),
            legs: vec![leg("GRU", "VVI", "2026-02-15")],
        };
        let summary = RouteResult::summarize(&route, vec![priced(&route.legs[0], 450.0)], "BRL");
        let value = serde_json::to_value(&summary).unwrap();

        assert_eq!(value["route"], "A");
        assert_eq!(value["totalPrice"].as_f64(), Some(450.0));
        assert_eq!(value["currency"], "BRL");
        assert_eq!(value["legs"][0]["from"], "GRU");
        assert!(value.get("total_price").is_none());
    }

    #[test]
    fn test_parse_search_request() {
        let json = r#"{"routes":[{"name":"A","legs":[{"from":"GRU","to":"VVI","date":"2026-02-15"}]}]}"#;
        let request: FlightSearchRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.routes.len(), 1);
        assert_eq!(request.routes[0].legs[0], leg("GRU", "VVI", "2026-02-15"));
    }
}
