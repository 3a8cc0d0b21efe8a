//! Persistent on-disk cache of the last known exchange rates, so a failed
//! fetch on a later launch can still show something better than the default.

use std::{
    collections::HashMap,
    fs,
    path::PathBuf,
    sync::OnceLock,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use serde::{Deserialize, Serialize};

const CACHE_FILENAME: &str = "rate_cache.json";

/// Rates older than this are not worth falling back to.
pub const RATE_CACHE_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Last successfully fetched KRW rate per base currency code.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RateCache {
    /// Unix timestamp (seconds) of the most recent update.
    pub cached_at: u64,
    pub rates: HashMap<String, f64>,
}

impl RateCache {
    pub fn rate_for(&self, currency: &str) -> Option<f64> {
        self.rates.get(currency).copied()
    }

    /// Record a fresh rate and bump the timestamp.
    pub fn record(&mut self, currency: &str, rate: f64) {
        self.cached_at = unix_now();
        self.rates.insert(currency.to_string(), rate);
    }

    pub fn is_expired(&self) -> bool {
        self.age() > RATE_CACHE_TTL
    }

    pub fn age(&self) -> Duration {
        Duration::from_secs(unix_now().saturating_sub(self.cached_at))
    }

    /// Human-readable age string.
    pub fn age_string(&self) -> String {
        let secs = self.age().as_secs();
        if secs < 60 {
            format!("{secs}s")
        } else if secs < 3600 {
            format!("{}m", secs / 60)
        } else if secs < 86400 {
            format!("{}h", secs / 3600)
        } else {
            format!("{}d", secs / 86400)
        }
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Cache file location in the app data directory.
fn cache_path() -> PathBuf {
    static PATH: OnceLock<PathBuf> = OnceLock::new();
    PATH.get_or_init(|| {
        let base = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("global-seller-calc");

        let _ = fs::create_dir_all(&base);

        base.join(CACHE_FILENAME)
    })
    .clone()
}

/// Load the rate cache from disk, if present and parseable.
pub fn load_rate_cache() -> Option<RateCache> {
    let path = cache_path();

    if !path.exists() {
        println!("[rate-cache] No cache found at {}", path.display());
        return None;
    }

    match fs::read_to_string(&path) {
        Ok(content) => match serde_json::from_str(&content) {
            Ok(cache) => Some(cache),
            Err(e) => {
                println!("[rate-cache] Failed to parse cache: {e}");
                None
            }
        },
        Err(e) => {
            println!("[rate-cache] Failed to read cache: {e}");
            None
        }
    }
}

/// Save the rate cache to disk.
pub fn save_rate_cache(cache: &RateCache) -> Result<(), std::io::Error> {
    let path = cache_path();
    let content = serde_json::to_string_pretty(cache)?;
    fs::write(&path, content)?;
    println!(
        "[rate-cache] Saved {} rates to {}",
        cache.rates.len(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_and_reads_back_rates() {
        let mut cache = RateCache::default();
        cache.record("CNY", 191.3);
        cache.record("USD", 1390.0);
        assert_eq!(cache.rate_for("CNY"), Some(191.3));
        assert_eq!(cache.rate_for("EUR"), None);
        assert!(!cache.is_expired());
    }

    #[test]
    fn stale_timestamp_expires() {
        let cache = RateCache {
            cached_at: 0,
            rates: HashMap::new(),
        };
        assert!(cache.is_expired());
        assert!(cache.age_string().ends_with('d'));
    }

    #[test]
    fn serde_round_trip() {
        let mut cache = RateCache::default();
        cache.record("JPY", 9.1);
        let json = serde_json::to_string(&cache).unwrap();
        let restored: RateCache = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.rate_for("JPY"), Some(9.1));
    }
}
