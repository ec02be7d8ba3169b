// Upstream flight-offer API client
// Token acquisition and single-offer searches against an Amadeus-compatible REST API

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use crate::models::LegRequest;
use crate::supplier::{FlightOffer, OfferSearchResponse, TokenResponse};

pub const DEFAULT_BASE_URL: &str = "https://test.api.amadeus.com";
pub const DEFAULT_CURRENCY: &str = "BRL";

const TOKEN_PATH: &str = "/v1/security/oauth2/token";
const OFFER_SEARCH_PATH: &str = "/v2/shopping/flight-offers";

// Error types for the upstream client and everything built on it
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Missing upstream credential: {0}")]
    MissingCredentials(&'static str),

    #[error("Token request rejected: {status_code} - {message}")]
    TokenRejected { status_code: u16, message: String },

    #[error("API error: {status_code} - {message}")]
    ApiResponseError { status_code: u16, message: String },

    #[error("Decode error: {0}")]
    DecodeError(String),

    #[error("Invalid offer price: {value:?}")]
    InvalidPrice { value: String },
}

impl ApiError {
    // Whether a failed leg search is absorbed into an unavailable leg
    // instead of aborting the whole comparison.
    pub fn degrades_leg(&self) -> bool {
        matches!(
            self,
            ApiError::NetworkError(_) | ApiError::ApiResponseError { .. }
        )
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::NetworkError(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: String,
    pub api_secret: String,
}

// Client configuration, injected explicitly by the caller
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub credentials: Option<Credentials>,
    pub currency: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            credentials: None,
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

// Upstream API seam; the aggregator only ever talks to this trait
#[async_trait]
pub trait FlightOfferApi: Send + Sync + 'static {
    // Acquire a bearer token with the client-credentials grant
    async fn access_token(&self) -> Result<String, ApiError>;

    // Best offer for one leg; Ok(None) when the upstream has nothing
    async fn search_offers(
        &self,
        token: &str,
        leg: &LegRequest,
    ) -> Result<Option<FlightOffer>, ApiError>;

    // Currency every search is priced in
    fn currency(&self) -> &str;
}

pub struct AmadeusClient {
    config: ClientConfig,
    http: reqwest::Client,
}

impl AmadeusClient {
    // No timeout is configured; requests wait as long as the transport allows
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }
}

#[async_trait]
impl FlightOfferApi for AmadeusClient {
    async fn access_token(&self) -> Result<String, ApiError> {
        let credentials = self
            .config
            .credentials
            .as_ref()
            .ok_or(ApiError::MissingCredentials("api key and secret"))?;

        let response = self
            .http
            .post(self.url(TOKEN_PATH))
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", credentials.api_key.as_str()),
                ("client_secret", credentials.api_secret.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ApiError::TokenRejected {
                status_code: status.as_u16(),
                message: body,
            });
        }

        let token: TokenResponse =
            serde_json::from_str(&body).map_err(|e| ApiError::DecodeError(e.to_string()))?;
        debug!(token_type = %token.token_type, "acquired upstream access token");
        Ok(token.access_token)
    }

    async fn search_offers(
        &self,
        token: &str,
        leg: &LegRequest,
    ) -> Result<Option<FlightOffer>, ApiError> {
        let response = self
            .http
            .get(self.url(OFFER_SEARCH_PATH))
            .query(&[
                ("originLocationCode", leg.from.as_str()),
                ("destinationLocationCode", leg.to.as_str()),
                ("departureDate", leg.date.as_str()),
                ("adults", "1"),
                ("currencyCode", self.config.currency.as_str()),
                ("max", "1"),
            ])
            .bearer_auth(token)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ApiError::ApiResponseError {
                status_code: status.as_u16(),
                message: body,
            });
        }

        let offers: OfferSearchResponse =
            serde_json::from_str(&body).map_err(|e| ApiError::DecodeError(e.to_string()))?;
        Ok(offers.data.into_iter().next())
    }

    fn currency(&self) -> &str {
        &self.config.currency
    }
}
