//! Server Configuration
//!
//! Read once at startup from the process environment (after `.env`).

use anyhow::Context;
use emissions::EmissionsConfig;
use integrity::EdgeClientConfig;
use std::env;
use std::net::SocketAddr;
use std::time::Duration;

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:31113";
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:40922,http://127.0.0.1:40922";

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub listen_addr: SocketAddr,
    /// CORS allow-list
    pub frontend_origins: Vec<String>,
    pub emissions: EmissionsConfig,
    /// Signed report forwarding is disabled when unset
    pub edge: Option<EdgeClientConfig>,
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup
    ///
    /// - `API_LISTEN_ADDR`
    /// - `FRONTEND_ORIGINS` (comma separated)
    /// - `GRID_STATE` (state name or GST code; replaces the electricity factor)
    /// - `DEFAULT_BASELINE_KG`
    /// - `TREE_ABSORPTION_KG` (kg CO2e per tree per year, default 21)
    /// - `EDGE_FUNCTIONS_URL`, `EDGE_FUNCTIONS_KEY`, `EDGE_FUNCTIONS_TIMEOUT_SECS`
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let listen_addr = lookup("API_LISTEN_ADDR")
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string())
            .parse::<SocketAddr>()
            .context("API_LISTEN_ADDR must be host:port")?;

        let frontend_origins = lookup("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        let mut emissions = match lookup("GRID_STATE").filter(|s| !s.trim().is_empty()) {
            Some(state) => EmissionsConfig::for_state(&state)
                .with_context(|| format!("GRID_STATE '{state}' is not a known state"))?,
            None => EmissionsConfig::default(),
        };
        if let Some(raw) = lookup("DEFAULT_BASELINE_KG") {
            let baseline = raw
                .trim()
                .parse::<f64>()
                .context("DEFAULT_BASELINE_KG must be a number")?;
            emissions = emissions.with_default_baseline(baseline);
        }
        if let Some(raw) = lookup("TREE_ABSORPTION_KG").filter(|s| !s.trim().is_empty()) {
            let kg_per_tree = raw
                .trim()
                .parse::<f64>()
                .context("TREE_ABSORPTION_KG must be a number")?;
            emissions = emissions
                .with_tree_absorption(kg_per_tree)
                .context("TREE_ABSORPTION_KG must be a positive number")?;
        }

        let edge = match lookup("EDGE_FUNCTIONS_URL").filter(|s| !s.trim().is_empty()) {
            Some(base_url) => {
                let api_key = lookup("EDGE_FUNCTIONS_KEY")
                    .context("EDGE_FUNCTIONS_KEY must be set when EDGE_FUNCTIONS_URL is")?;
                let mut edge = EdgeClientConfig::new(base_url, api_key);
                if let Some(secs) = lookup("EDGE_FUNCTIONS_TIMEOUT_SECS") {
                    let secs = secs
                        .trim()
                        .parse::<u64>()
                        .context("EDGE_FUNCTIONS_TIMEOUT_SECS must be whole seconds")?;
                    edge = edge.with_timeout(Duration::from_secs(secs));
                }
                Some(edge)
            }
            None => None,
        };

        Ok(Self {
            listen_addr,
            frontend_origins,
            emissions,
            edge,
        })
    }
}
