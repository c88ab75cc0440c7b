//! HTTP client setup and Seaplane endpoints

use crate::error::{Result, SeaplaneError};
use flightflow_core::EndpointConfig;
use reqwest::Url;
use std::time::Duration;

pub const IDENTITY_API_BASE: &str = "https://flightdeck.cplane.cloud";
pub const COMPUTE_API_BASE: &str = "https://compute.cplane.cloud";

/// Per-request timeout when none is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Base URLs of the Seaplane APIs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub identity: String,
    pub compute: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            identity: IDENTITY_API_BASE.to_string(),
            compute: COMPUTE_API_BASE.to_string(),
        }
    }
}

impl Endpoints {
    /// Apply overrides from the config file
    pub fn from_config(config: &EndpointConfig) -> Self {
        let defaults = Self::default();
        Self {
            identity: config.identity.clone().unwrap_or(defaults.identity),
            compute: config.compute.clone().unwrap_or(defaults.compute),
        }
    }

    /// `POST` target of the token exchange
    pub fn token_url(&self) -> Result<Url> {
        join_segments(&self.identity, &["identity", "token"])
    }

    /// URL of a single formation
    pub fn formation_url(&self, name: &str) -> Result<Url> {
        join_segments(&self.compute, &["v1", "formations", name])
    }
}

fn join_segments(base: &str, segments: &[&str]) -> Result<Url> {
    let mut url = Url::parse(base)
        .map_err(|e| SeaplaneError::InvalidRequest(format!("invalid base URL {}: {}", base, e)))?;

    url.path_segments_mut()
        .map_err(|_| SeaplaneError::InvalidRequest(format!("{} can not be a base URL", base)))?
        .pop_if_empty()
        .extend(segments);

    Ok(url)
}

/// Build the HTTP client shared by every call of one run
pub fn build_client(timeout: Option<Duration>) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .timeout(timeout.unwrap_or(DEFAULT_TIMEOUT))
        .user_agent(concat!("flightflow/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}
