//! NetBox REST client
//!
//! Thin wrapper over the handful of endpoints the scorer and the interactive
//! runner use. Uses ureq (sync HTTP); the service calls it from tokio's
//! blocking pool.

use super::{CircuitLookup, InventoryCatalog, InventoryError, InventoryResult};
use crate::models::{Circuit, Device, Interface};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

/// Per-call timeout when none is configured
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Scheme used in the `Authorization` header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthScheme {
    /// NetBox's native `Authorization: Token <key>`
    #[default]
    Token,
    Bearer,
}

impl AuthScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthScheme::Token => "Token",
            AuthScheme::Bearer => "Bearer",
        }
    }
}

impl FromStr for AuthScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "token" => Ok(AuthScheme::Token),
            "bearer" => Ok(AuthScheme::Bearer),
            other => Err(format!(
                "Unknown auth scheme '{}'. Valid schemes: Token, Bearer",
                other
            )),
        }
    }
}

impl std::fmt::Display for AuthScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Connection settings for one NetBox instance
#[derive(Debug, Clone, PartialEq)]
pub struct InventorySettings {
    pub base_url: String,
    pub token: String,
    pub auth_scheme: AuthScheme,
    pub timeout: Duration,
}

impl InventorySettings {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: token.into(),
            auth_scheme: AuthScheme::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), endpoint)
    }
}

/// List envelope returned by NetBox collection endpoints.
/// Only the first page is read.
#[derive(Deserialize)]
struct Page<T> {
    results: Vec<T>,
}

/// Stateless-per-call NetBox client, safe to share across requests
pub struct NetboxClient {
    settings: InventorySettings,
    agent: ureq::Agent,
}

fn make_agent(timeout: Duration) -> ureq::Agent {
    ureq::config::Config::builder()
        .http_status_as_error(false) // status codes are mapped to InventoryError::Status
        .timeout_global(Some(timeout))
        .build()
        .new_agent()
}

impl NetboxClient {
    pub fn new(settings: InventorySettings) -> Self {
        let agent = make_agent(settings.timeout);
        Self { settings, agent }
    }

    /// GET an endpoint and decode the JSON body
    fn fetch<T: DeserializeOwned>(&self, endpoint: &str) -> InventoryResult<T> {
        let url = self.settings.url(endpoint);
        debug!("GET {}", url);

        let response = self
            .agent
            .get(&url)
            .header(
                "Authorization",
                &format!("{} {}", self.settings.auth_scheme, self.settings.token),
            )
            .header("Accept", "application/json")
            .call()
            .map_err(|e| InventoryError::Transport {
                endpoint: endpoint.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status().as_u16();
        if status != 200 {
            let body = response.into_body().read_to_string().unwrap_or_default();
            return Err(InventoryError::Status {
                endpoint: endpoint.to_string(),
                status,
                body: body.trim().to_string(),
            });
        }

        let body = response
            .into_body()
            .read_to_string()
            .map_err(|e| InventoryError::Transport {
                endpoint: endpoint.to_string(),
                message: e.to_string(),
            })?;

        serde_json::from_str(&body).map_err(|e| InventoryError::Decode {
            endpoint: endpoint.to_string(),
            message: e.to_string(),
        })
    }

    fn fetch_page<T: DeserializeOwned>(&self, endpoint: &str) -> InventoryResult<Vec<T>> {
        let page: Page<T> = self.fetch(endpoint)?;
        debug!("{} returned {} records", endpoint, page.results.len());
        Ok(page.results)
    }
}

impl CircuitLookup for NetboxClient {
    fn fetch_circuit(&self, id: i64) -> InventoryResult<Circuit> {
        self.fetch(&format!("/api/circuits/circuits/{}/", id))
    }
}

impl InventoryCatalog for NetboxClient {
    fn list_devices(&self) -> InventoryResult<Vec<Device>> {
        self.fetch_page("/api/dcim/devices/")
    }

    fn list_circuits(&self) -> InventoryResult<Vec<Circuit>> {
        self.fetch_page("/api/circuits/circuits/")
    }

    fn list_interfaces(&self) -> InventoryResult<Vec<Interface>> {
        self.fetch_page("/api/dcim/interfaces/")
    }
}
