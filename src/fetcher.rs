// Offer fetcher: turns one leg request into one priced leg result

use tracing::{debug, error};

use crate::models::{LegRequest, LegResult, UNAVAILABLE_AIRLINE};
use crate::offer_client::{ApiError, FlightOfferApi};
use crate::supplier::FlightOffer;

// What the upstream had for a leg.
#[derive(Debug, Clone)]
pub enum LegOutcome {
    Offer(FlightOffer),
    Unavailable,
}

impl LegOutcome {
    // Converts the outcome into the leg's result. Only an offer with an
    // unparseable price fails.
    pub fn into_result(self, leg: &LegRequest) -> Result<LegResult, ApiError> {
        match self {
            LegOutcome::Offer(offer) => leg_from_offer(leg, &offer),
            LegOutcome::Unavailable => Ok(LegResult::unavailable(leg)),
        }
    }
}

// Searches the upstream for `leg` and classifies the answer.
// Rejected searches and transport failures are logged and reported as
// LegOutcome::Unavailable; anything else propagates.
pub async fn search_leg<A>(api: &A, token: &str, leg: &LegRequest) -> Result<LegOutcome, ApiError>
where
    A: FlightOfferApi + ?Sized,
{
    match api.search_offers(token, leg).await {
        Ok(Some(offer)) => Ok(LegOutcome::Offer(offer)),
        Ok(None) => {
            debug!(from = %leg.from, to = %leg.to, date = %leg.date, "no offers for leg");
            Ok(LegOutcome::Unavailable)
        }
        Err(err) if err.degrades_leg() => {
            error!("Flight search failed: {}-{}: {}", leg.from, leg.to, err);
            Ok(LegOutcome::Unavailable)
        }
        Err(err) => Err(err),
    }
}

// Fetches and prices a single leg.
pub async fn fetch_leg<A>(api: &A, token: &str, leg: &LegRequest) -> Result<LegResult, ApiError>
where
    A: FlightOfferApi + ?Sized,
{
    search_leg(api, token, leg).await?.into_result(leg)
}

fn leg_from_offer(leg: &LegRequest, offer: &FlightOffer) -> Result<LegResult, ApiError> {
    let price = parse_price(&offer.price.total)?;
    let segment = offer.first_segment();

    Ok(LegResult {
        from: leg.from.clone(),
        to: leg.to.clone(),
        price,
        airline: segment
            .map(|s| s.carrier_code.clone())
            .filter(|code| !code.is_empty())
            .unwrap_or_else(|| UNAVAILABLE_AIRLINE.to_string()),
        departure: segment
            .map(|s| s.departure.at.clone())
            .filter(|at| !at.is_empty())
            .unwrap_or_else(|| leg.date.clone()),
        arrival: segment.map(|s| s.arrival.at.clone()).unwrap_or_default(),
        stops: offer.stop_count(),
    })
}

// Parses the upstream's textual decimal total.
pub fn parse_price(total: &str) -> Result<f64, ApiError> {
    total
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|price| price.is_finite())
        .ok_or_else(|| ApiError::InvalidPrice {
            value: total.to_string(),
        })
}
