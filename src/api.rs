//! Synchronous client for the **World Bank Indicators API (v2)**.
//!
//! This module only talks to the `country/{code}/indicator/{id}` endpoint and asks for
//! the single most recent observation (`per_page=1`) of population and GDP.
//!
//! ### Notes
//! - Every failure (network, HTTP status, unexpected payload) is logged and collapsed
//!   into "no data" for that country; nothing is retried.
//! - A country where neither indicator has a value also yields "no data".
//! - Network timeouts use a sane default (30s) and can be adjusted with [`Client::with_timeout`].
//!
//! Typical usage:
//! ```no_run
//! # use wbi_rank::Client;
//! let client = Client::default();
//! if let Some(data) = client.fetch_country("NZL") {
//!     println!("{:?} {:?}", data.population, data.gdp);
//! }
//! ```

use crate::models::{CountryData, Indicator, Observation};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};
use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://api.worldbank.org/v2";

/// Why a single indicator request produced nothing usable.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("request failed with HTTP {0}")]
    Status(reqwest::StatusCode),
    #[error("world bank api error: {0}")]
    Api(String),
    #[error("unexpected response: {0}")]
    Parse(String),
}

/// Anything that can produce the latest figures for a country code.
///
/// `None` means no usable data, whatever the reason.
pub trait CountryFetcher {
    fn fetch_country(&self, code: &str) -> Option<CountryData>;
}

#[derive(Debug, Clone)]
pub struct Client {
    pub base_url: String,
    http: HttpClient,
}

impl Default for Client {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL).expect("reqwest client build")
    }
}

// Allow -, _, . unescaped in codes
const SAFE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

fn enc(part: &str) -> String {
    percent_encoding::utf8_percent_encode(part.trim(), SAFE).to_string()
}

fn build_http(timeout: Duration) -> reqwest::Result<HttpClient> {
    HttpClient::builder()
        .timeout(timeout) // total request timeout
        .connect_timeout(Duration::from_secs(10))
        .redirect(Policy::limited(5))
        .user_agent(concat!("wbi_rank/", env!("CARGO_PKG_VERSION")))
        .build()
}

impl Client {
    /// Client against a custom API root such as `http://127.0.0.1:8080/v2`.
    pub fn new(base_url: impl Into<String>) -> reqwest::Result<Self> {
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: build_http(Duration::from_secs(30))?,
        })
    }

    /// Replace the total request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> reqwest::Result<Self> {
        self.http = build_http(timeout)?;
        Ok(self)
    }

    pub fn indicator_url(&self, code: &str, indicator: Indicator) -> String {
        format!(
            "{}/country/{}/indicator/{}?format=json&per_page=1",
            self.base_url,
            enc(code),
            indicator.id()
        )
    }

    /// Latest value of one indicator for one country.
    ///
    /// `Ok(None)` means the request succeeded but there is no value (no observations,
    /// or the newest observation is still empty).
    pub fn fetch_latest(&self, code: &str, indicator: Indicator) -> Result<Option<f64>, FetchError> {
        let url = self.indicator_url(code, indicator);
        log::debug!("GET {} ({})", url, indicator);
        let resp = self.http.get(&url).send()?;
        if !resp.status().is_success() {
            return Err(FetchError::Status(resp.status()));
        }
        let body = resp.text()?;
        let v: Value = serde_json::from_str(&body)
            .map_err(|e| FetchError::Parse(format!("decode json: {}", e)))?;
        parse_latest_value(&v)
    }

    /// Population and GDP for `code`, or `None` when nothing usable came back.
    ///
    /// The two requests are issued one after the other; the first failure aborts the
    /// country. Both values absent is reported as `None` as well.
    pub fn fetch_country(&self, code: &str) -> Option<CountryData> {
        let result = self
            .fetch_latest(code, Indicator::Population)
            .and_then(|pop| {
                let population = pop.map(population_count).transpose()?;
                let gdp = self.fetch_latest(code, Indicator::Gdp)?;
                Ok(CountryData { population, gdp })
            });
        match result {
            Ok(data) if data.is_empty() => {
                log::info!("{}: no population or GDP values available", code);
                None
            }
            Ok(data) => Some(data),
            Err(e) => {
                log::warn!("{}: error fetching data: {}", code, e);
                None
            }
        }
    }
}

impl CountryFetcher for Client {
    fn fetch_country(&self, code: &str) -> Option<CountryData> {
        Client::fetch_country(self, code)
    }
}

fn population_count(v: f64) -> Result<u64, FetchError> {
    if v < 0.0 {
        return Err(FetchError::Parse(format!("negative population {}", v)));
    }
    Ok(v.round() as u64)
}

/// Extract the first observation's value from an indicator response.
///
/// The API returns `[Meta, [Observation, ...]]`, or `[{"message": ...}]` on error.
/// A `null` or empty observation list, a `null` first observation, and a `null` value
/// all mean "no value" rather than an error.
pub fn parse_latest_value(v: &Value) -> Result<Option<f64>, FetchError> {
    let arr = v
        .as_array()
        .ok_or_else(|| FetchError::Parse("not a top-level array".into()))?;
    let head = arr
        .first()
        .ok_or_else(|| FetchError::Parse("empty array".into()))?;
    if let Some(msg) = head.get("message") {
        return Err(FetchError::Api(msg.to_string()));
    }
    let observations = arr
        .get(1)
        .ok_or_else(|| FetchError::Parse("missing observation list".into()))?;
    let list = match observations {
        Value::Null => return Ok(None),
        Value::Array(list) => list,
        other => {
            return Err(FetchError::Parse(format!(
                "observation list is not an array: {}",
                other
            )));
        }
    };
    let first = match list.first() {
        None | Some(Value::Null) => return Ok(None),
        Some(first) => first,
    };
    let obs: Observation = serde_json::from_value(first.clone())
        .map_err(|e| FetchError::Parse(format!("observation: {}", e)))?;
    match obs.value {
        Some(x) if !x.is_finite() || x < 0.0 => {
            Err(FetchError::Parse(format!("value out of range: {}", x)))
        }
        Some(x) => {
            log::debug!(
                "{} {}: {} ({})",
                obs.countryiso3code.as_deref().unwrap_or("?"),
                obs.indicator.as_ref().map(|i| i.id.as_str()).unwrap_or("?"),
                x,
                obs.date.as_deref().unwrap_or("?")
            );
            Ok(Some(x))
        }
        None => Ok(None),
    }
}
