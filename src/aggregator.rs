// Route aggregator: prices every leg of every candidate route in one fan-out

use std::sync::Arc;

use futures::future::join_all;
use tracing::{info, warn};

use crate::fetcher::fetch_leg;
use crate::models::{RouteOption, RouteResult};
use crate::offer_client::{ApiError, FlightOfferApi};

pub struct RouteAggregator {
    api: Arc<dyn FlightOfferApi>,
}

impl RouteAggregator {
    pub fn new(api: Arc<dyn FlightOfferApi>) -> Self {
        Self { api }
    }

    // Prices `routes` with a freshly acquired token.
    // One token is requested per call and shared by every leg search; it is
    // never cached or refreshed.
    pub async fn aggregate(&self, routes: &[RouteOption]) -> Result<Vec<RouteResult>, ApiError> {
        let token = self.api.access_token().await?;
        self.aggregate_with_token(&token, routes).await
    }

    // Prices `routes` using an already acquired token.
    // All legs of all routes are searched concurrently and every search runs
    // to completion before any result is produced. If any leg failed in a
    // way that does not degrade, the first such error in input order is
    // returned and no partial results are.
    pub async fn aggregate_with_token(
        &self,
        token: &str,
        routes: &[RouteOption],
    ) -> Result<Vec<RouteResult>, ApiError> {
        let leg_count: usize = routes.iter().map(|route| route.legs.len()).sum();
        info!(routes = routes.len(), legs = leg_count, "pricing candidate routes");

        let api = self.api.as_ref();
        let currency = api.currency();

        let settled = join_all(routes.iter().map(|route| async move {
            let legs = join_all(route.legs.iter().map(move |leg| fetch_leg(api, token, leg))).await;
            (route, legs)
        }))
        .await;

        let mut results = Vec::with_capacity(settled.len());
        for (route, legs) in settled {
            let legs = legs.into_iter().collect::<Result<Vec<_>, _>>().map_err(|err| {
                warn!(route = %route.name, error = %err, "route pricing failed");
                err
            })?;
            results.push(RouteResult::summarize(route, legs, currency));
        }

        let unavailable = results
            .iter()
            .flat_map(|result| &result.legs)
            .filter(|leg| leg.is_unavailable())
            .count();
        info!(routes = results.len(), unavailable_legs = unavailable, "route pricing complete");

        Ok(results)
    }
}
