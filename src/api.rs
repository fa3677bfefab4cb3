//! Synchronous client for the **Python package index JSON API**.
//!
//! This module wraps the `{index}/{name}/json` endpoint and returns its body as a
//! typed `models::PackagePayload`. One request per call: no retries, no caching.
//!
//! ### Notes
//! - The index answers unknown names with HTTP 404; that is surfaced as
//!   `PackageError::NotFound` so callers can tell it apart from transport errors.
//! - Each request gives up after 30 seconds (10 to connect) and follows at most five redirects.
//!
//! Typical usage:
//! ```no_run
//! # use pypi_rs::Client;
//! let client = Client::default();
//! let payload = client.fetch("requests")?;
//! println!("{} releases", payload.releases.len());
//! # Ok::<(), pypi_rs::PackageError>(())
//! ```

use crate::error::{PackageError, Result};
use crate::models::PackagePayload;
use reqwest::StatusCode;
use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;
use std::time::Duration;

/// Index queried when an identifier does not carry its own base URL.
pub const DEFAULT_INDEX_URL: &str = "https://pypi.org/pypi";

/// A reusable HTTP handle bound to one package index.
///
/// Create it once and pass it to every fetch; the underlying connection pool is
/// shared across calls.
#[derive(Debug, Clone)]
pub struct Client {
    pub base_url: String,
    http: HttpClient,
}

impl Default for Client {
    fn default() -> Self {
        Self::new(DEFAULT_INDEX_URL)
    }
}

impl Client {
    /// Client for the index rooted at `base_url` (e.g. `https://test.pypi.org/pypi`).
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .redirect(Policy::limited(5))
            .user_agent(concat!("pypi_rs/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("reqwest client build");
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        }
    }

    /// JSON endpoint URL for `name` on `index`.
    pub fn json_url(index: &str, name: &str) -> String {
        format!("{}/{}/json", index.trim_end_matches('/'), name)
    }

    /// Fetch the payload for `name` from this client's index.
    pub fn fetch(&self, name: &str) -> Result<PackagePayload> {
        self.fetch_from(&self.base_url, name)
    }

    /// Fetch the payload for `name` from an explicit `index`, reusing this
    /// client's connection pool.
    ///
    /// ### Errors
    /// - `NotFound` when the index answers 404
    /// - `Status` for any other non-success status
    /// - `Http` for network or JSON decoding failures
    pub fn fetch_from(&self, index: &str, name: &str) -> Result<PackagePayload> {
        let url = Self::json_url(index, name);
        log::debug!("GET {url}");
        let resp = self.http.get(&url).send()?;
        match resp.status() {
            StatusCode::NOT_FOUND => Err(PackageError::NotFound(name.to_string())),
            s if s.is_success() => {
                let payload: PackagePayload = resp.json()?;
                log::debug!("{name}: {} releases listed", payload.releases.len());
                Ok(payload)
            }
            status => Err(PackageError::Status { url, status }),
        }
    }
}
