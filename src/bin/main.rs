use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use trip_pricer::{
    app, default_routes, AmadeusClient, AppState, ClientConfig, ComparisonReport, Credentials,
    FlightSearchRequest, FlightSearchResponse, RouteAggregator,
};

#[derive(Debug, Parser)]
#[command(name = "trip-pricer", about = "Compare multi-leg flight routes by total price")]
struct Args {
    /// Upstream flight-offer API base URL
    #[arg(long, env = "AMADEUS_BASE_URL", default_value = trip_pricer::offer_client::DEFAULT_BASE_URL, global = true)]
    base_url: String,

    #[arg(long, env = "AMADEUS_API_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,

    #[arg(long, env = "AMADEUS_API_SECRET", hide_env_values = true, global = true)]
    api_secret: Option<String>,

    /// Currency every offer is priced in
    #[arg(long, env = "TRIP_PRICER_CURRENCY", default_value = trip_pricer::offer_client::DEFAULT_CURRENCY, global = true)]
    currency: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve POST /api/flights
    Serve {
        #[arg(long, env = "TRIP_PRICER_ADDR", default_value = "0.0.0.0:3000")]
        addr: SocketAddr,
    },
    /// Price the default candidate routes and print the comparison
    Compare {
        /// Running trip-pricer server to ask; prices in-process when omitted
        #[arg(long)]
        server: Option<String>,
    },
}

impl Args {
    fn client_config(&self) -> ClientConfig {
        // Missing credentials only fail once a token is requested
        let credentials = match (&self.api_key, &self.api_secret) {
            (Some(api_key), Some(api_secret)) => Some(Credentials {
                api_key: api_key.clone(),
                api_secret: api_secret.clone(),
            }),
            _ => None,
        };
        ClientConfig {
            base_url: self.base_url.clone(),
            credentials,
            currency: self.currency.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trip_pricer=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let client = Arc::new(AmadeusClient::new(args.client_config()));

    match args.command {
        Command::Serve { addr } => {
            let listener = tokio::net::TcpListener::bind(addr)
                .await
                .with_context(|| format!("failed to listen on {addr}"))?;
            info!("Listening on {}", listener.local_addr()?);
            axum::serve(listener, app(AppState::new(client))).await?;
        }
        Command::Compare { server } => {
            let routes = default_routes();
            let results = match server {
                Some(base) => {
                    let url = format!("{}/api/flights", base.trim_end_matches('/'));
                    let response = reqwest::Client::new()
                        .post(&url)
                        .json(&FlightSearchRequest { routes })
                        .send()
                        .await
                        .with_context(|| format!("failed to reach {url}"))?;
                    if !response.status().is_success() {
                        bail!("flight search failed with status {}", response.status());
                    }
                    response.json::<FlightSearchResponse>().await?.results
                }
                None => RouteAggregator::new(client).aggregate(&routes).await?,
            };
            print!("{}", ComparisonReport(&results));
        }
    }

    Ok(())
}
