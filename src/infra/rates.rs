#![allow(dead_code)]

//! Thin asynchronous client for the open.er-api.com exchange-rate API.
//!
//! - Fetches the KRW rate for a sourcing currency.
//! - Maintains a simple 60-minute in-memory cache with stale fallbacks,
//!   backed by a last-known-rates disk cache for cross-session recovery.

use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, SystemTime},
};

use reqwest::{Client, Url};
use serde::Deserialize;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::infra::cache::{load_rate_cache, save_rate_cache, RateCache};

const DEFAULT_BASE_URL: &str = "https://open.er-api.com/v6/";
const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);
const USER_AGENT: &str = "global-seller-calc/1.0.0";

/// The quote currency every rate is expressed in.
pub const LOCAL_CURRENCY: &str = "KRW";

#[derive(Debug, Error)]
pub enum RateClientError {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("http request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("api error: {0}")]
    Api(String),
    #[error("no KRW rate for base {0}")]
    MissingRate(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CacheStatus {
    Fresh,
    Cached,
    Stale,
}

#[derive(Clone, Debug)]
pub struct CachedPayload<T> {
    pub data: T,
    pub fetched_at: SystemTime,
    pub status: CacheStatus,
}

impl<T> CachedPayload<T> {
    fn new(data: T, fetched_at: SystemTime, status: CacheStatus) -> Self {
        Self {
            data,
            fetched_at,
            status,
        }
    }
}

#[derive(Default)]
struct MemoryCache {
    rates: HashMap<String, Cached<f64>>,
}

/// Envelope shape of open.er-api.com responses.
#[derive(Debug, Deserialize)]
struct RatesDto {
    result: String,
    #[serde(default)]
    base_code: Option<String>,
    #[serde(default)]
    rates: HashMap<String, f64>,
    #[serde(default, rename = "error-type")]
    error_type: Option<String>,
}

#[derive(Clone)]
pub struct RateClient {
    http: Client,
    base_url: Url,
    cache: Arc<Mutex<MemoryCache>>,
    ttl: Duration,
}

impl RateClient {
    pub fn new() -> Result<Self, RateClientError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base: &str) -> Result<Self, RateClientError> {
        let base_url = Url::parse(base)?;
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            http,
            base_url,
            cache: Arc::new(Mutex::new(MemoryCache::default())),
            ttl: DEFAULT_TTL,
        })
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// KRW rate for one unit of `base_currency` (e.g. "CNY").
    ///
    /// Fallback order on failure: fresh memory cache -> live fetch -> stale
    /// memory cache -> disk cache of last known rates -> error.
    pub async fn get_rate(&self, base_currency: &str) -> Result<CachedPayload<f64>, RateClientError> {
        if let Some(payload) = self.cached_rate(base_currency).await {
            return Ok(payload);
        }

        let url = self.base_url.join(&format!("latest/{base_currency}"))?;
        println!("[rates] Requesting {url}");

        match self.fetch_rate(url).await {
            Ok(rate) => {
                self.persist_rate(base_currency, rate);
                Ok(self.store_rate(base_currency, rate, CacheStatus::Fresh).await)
            }
            Err(error) => {
                println!("[rates] Fetch failed for {base_currency}: {error}");
                if let Some(stale) = self.cached_rate_stale(base_currency).await {
                    return Ok(stale);
                }
                if let Some(disk) = disk_fallback(base_currency) {
                    return Ok(self.store_rate(base_currency, disk, CacheStatus::Stale).await);
                }
                Err(error)
            }
        }
    }

    pub async fn clear_cache(&self) {
        self.cache.lock().await.rates.clear();
    }

    async fn fetch_rate(&self, url: Url) -> Result<f64, RateClientError> {
        let response = self.http.get(url).send().await?.error_for_status()?;
        let dto: RatesDto = response.json().await?;

        if !dto.result.eq_ignore_ascii_case("success") {
            return Err(RateClientError::Api(
                dto.error_type.unwrap_or(dto.result),
            ));
        }

        let base = dto.base_code.unwrap_or_else(|| "unknown".to_string());
        dto.rates
            .get(LOCAL_CURRENCY)
            .copied()
            .filter(|rate| rate.is_finite() && *rate > 0.0)
            .ok_or(RateClientError::MissingRate(base))
    }

    async fn cached_rate(&self, base_currency: &str) -> Option<CachedPayload<f64>> {
        let cache = self.cache.lock().await;
        let result = cache
            .rates
            .get(base_currency)
            .and_then(|entry| entry.if_fresh(self.ttl));
        if result.is_some() {
            println!("[rates] Serving cached rate for {base_currency}");
        }
        result
    }

    async fn cached_rate_stale(&self, base_currency: &str) -> Option<CachedPayload<f64>> {
        let cache = self.cache.lock().await;
        cache.rates.get(base_currency).map(Cached::stale)
    }

    async fn store_rate(
        &self,
        base_currency: &str,
        rate: f64,
        status: CacheStatus,
    ) -> CachedPayload<f64> {
        let fetched_at = SystemTime::now();
        let payload = CachedPayload::new(rate, fetched_at, status);
        let mut cache = self.cache.lock().await;
        cache
            .rates
            .insert(base_currency.to_string(), Cached::new(rate, fetched_at));
        payload
    }

    fn persist_rate(&self, base_currency: &str, rate: f64) {
        let mut disk = load_rate_cache().unwrap_or_default();
        disk.record(base_currency, rate);
        if let Err(e) = save_rate_cache(&disk) {
            println!("[rates] Warning: failed to save rate cache: {e}");
        }
    }
}

fn disk_fallback(base_currency: &str) -> Option<f64> {
    let disk = load_rate_cache()?;
    if disk.is_expired() {
        println!(
            "[rates] Disk cache too old to use (age: {})",
            disk.age_string()
        );
        return None;
    }
    let rate = disk.rate_for(base_currency)?;
    println!(
        "[rates] Using last known rate for {base_currency} from disk (age: {})",
        disk.age_string()
    );
    Some(rate)
}

struct Cached<T> {
    value: T,
    fetched_at: SystemTime,
}

impl<T: Clone> Cached<T> {
    fn new(value: T, fetched_at: SystemTime) -> Self {
        Self { value, fetched_at }
    }

    fn if_fresh(&self, ttl: Duration) -> Option<CachedPayload<T>> {
        if self
            .fetched_at
            .elapsed()
            .map(|elapsed| elapsed <= ttl)
            .unwrap_or(false)
        {
            Some(CachedPayload::new(
                self.value.clone(),
                self.fetched_at,
                CacheStatus::Cached,
            ))
        } else {
            None
        }
    }

    fn stale(&self) -> CachedPayload<T> {
        CachedPayload::new(self.value.clone(), self.fetched_at, CacheStatus::Stale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_parses_success_payload() {
        let json = r#"{
            "result": "success",
            "base_code": "CNY",
            "rates": { "KRW": 191.42, "USD": 0.138 }
        }"#;
        let dto: RatesDto = serde_json::from_str(json).unwrap();
        assert_eq!(dto.result, "success");
        assert_eq!(dto.base_code.as_deref(), Some("CNY"));
        assert_eq!(dto.rates.get("KRW").copied(), Some(191.42));
    }

    #[test]
    fn envelope_parses_error_payload() {
        let json = r#"{ "result": "error", "error-type": "unsupported-code" }"#;
        let dto: RatesDto = serde_json::from_str(json).unwrap();
        assert_eq!(dto.result, "error");
        assert_eq!(dto.error_type.as_deref(), Some("unsupported-code"));
        assert!(dto.rates.is_empty());
    }

    #[test]
    fn fresh_entries_expire_after_ttl() {
        let old = Cached::new(191.0, SystemTime::now() - Duration::from_secs(120));
        assert!(old.if_fresh(Duration::from_secs(60)).is_none());
        assert_eq!(old.stale().status, CacheStatus::Stale);

        let recent = Cached::new(191.0, SystemTime::now());
        let payload = recent.if_fresh(Duration::from_secs(60)).unwrap();
        assert_eq!(payload.status, CacheStatus::Cached);
        assert_eq!(payload.data, 191.0);
    }
}
