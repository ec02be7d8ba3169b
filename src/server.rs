// Inbound HTTP surface: POST /api/flights

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

use crate::aggregator::RouteAggregator;
use crate::models::{ErrorResponse, FlightSearchRequest, FlightSearchResponse};
use crate::offer_client::{ApiError, FlightOfferApi};

pub const SEARCH_FAILED_MESSAGE: &str = "Failed to search flights";

#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<RouteAggregator>,
}

impl AppState {
    pub fn new(api: Arc<dyn FlightOfferApi>) -> Self {
        Self {
            aggregator: Arc::new(RouteAggregator::new(api)),
        }
    }
}

// Every failure reaches the client as the same generic body
#[derive(Debug)]
pub enum AppError {
    MalformedRequest(JsonRejection),
    Upstream(ApiError),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::MalformedRequest(rejection)
    }
}

impl From<ApiError> for AppError {
    fn from(err: ApiError) -> Self {
        AppError::Upstream(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::MalformedRequest(rejection) => {
                error!("Flights API error: malformed request: {}", rejection.body_text())
            }
            AppError::Upstream(err) => error!("Flights API error: {}", err),
        }

        let body = Json(ErrorResponse {
            error: SEARCH_FAILED_MESSAGE.to_string(),
        });
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/api/flights", post(search_flights))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn search_flights(
    State(state): State<AppState>,
    payload: Result<Json<FlightSearchRequest>, JsonRejection>,
) -> Result<Json<FlightSearchResponse>, AppError> {
    let Json(request) = payload?;
    info!(routes = request.routes.len(), "flight search requested");

    let results = state.aggregator.aggregate(&request.routes).await?;
    Ok(Json(FlightSearchResponse { results }))
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}
