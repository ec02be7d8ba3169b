// Trip pricing: per-leg flight offers aggregated into comparable route totals

pub mod aggregator;
pub mod fetcher;
pub mod models;
pub mod offer_client;
pub mod presentation;
pub mod server;
pub mod supplier;

// Re-export key types for convenience
pub use aggregator::RouteAggregator;
pub use fetcher::{fetch_leg, LegOutcome};
pub use models::{
    FlightSearchRequest, FlightSearchResponse, LegRequest, LegResult, RouteOption, RouteResult,
};
pub use offer_client::{AmadeusClient, ApiError, ClientConfig, Credentials, FlightOfferApi};
pub use presentation::{cheapest, default_routes, render_comparison, ComparisonReport};
pub use server::{app, AppState};
