//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

mod config;
mod report;

use axum::{
    Router, http,
    http::{Method, header},
};
use config::ApiConfig;
use emissions::emissions_router;
use integrity::HttpEdgeFunctionClient;
use report::report_router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "api=info,emissions=info,integrity=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ApiConfig::from_env()?;

    match &config.emissions.grid_state {
        Some(state) => tracing::info!(state = %state, "Electricity priced at state grid factor"),
        None => tracing::info!("Electricity priced at national average grid factor"),
    }

    // CORS configuration
    let allowed_origins: Vec<http::HeaderValue> = config
        .frontend_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]));

    // Build router
    let mut api = emissions_router(config.emissions.clone());
    match config.edge.clone() {
        Some(edge) => {
            let gateway = HttpEdgeFunctionClient::new(edge)?;
            tracing::info!(
                base_url = %gateway.config().base_url,
                "Signed report forwarding enabled"
            );
            api = api.merge(report_router(gateway, config.emissions.clone()));
        }
        None => {
            tracing::warn!("EDGE_FUNCTIONS_URL not set, report forwarding disabled");
        }
    }

    let app = Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    tracing::info!("Listening on {}", config.listen_addr);

    let listener = TcpListener::bind(config.listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
