#![allow(dead_code)]

use std::{
    collections::HashMap,
    time::{Duration, SystemTime},
};

use serde::{Deserialize, Serialize};

use super::comparison::{default_products, ComparisonProduct};
use super::entities::{CalculationInput, HistoryEntry, SourceCountry};

#[derive(Clone, Debug)]
pub struct AppState {
    /// Latest calculator form snapshot; the engine runs on a copy of this.
    pub inputs: CalculationInput,
    /// Whether the current exchange rate came from the live API (cleared as
    /// soon as the user edits the rate by hand).
    pub rate_live: bool,
    /// Saved calculations, most recent first.
    pub history: Vec<HistoryEntry>,
    pub comparison_products: Vec<ComparisonProduct>,
    pub cache: CacheTimestamps,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            inputs: CalculationInput::default(),
            rate_live: false,
            history: Vec::new(),
            comparison_products: default_products(),
            cache: CacheTimestamps::default(),
        }
    }
}

impl AppState {
    pub fn is_stale(&self, resource: &CacheResource, ttl: Duration) -> bool {
        self.cache.is_stale(resource, ttl)
    }

    /// Prepend so listing order is most recent first.
    pub fn push_history(&mut self, entry: HistoryEntry) {
        self.history.insert(0, entry);
    }

    pub fn remove_history(&mut self, id: &str) {
        self.history.retain(|entry| entry.id != id);
    }

    pub fn apply_persisted(&mut self, persisted: PersistedState) {
        self.inputs = persisted.inputs;
        self.history = persisted.history;
        if !persisted.comparison_products.is_empty() {
            self.comparison_products = persisted.comparison_products;
        }
    }

    pub fn to_persisted(&self) -> PersistedState {
        PersistedState {
            inputs: self.inputs.clone(),
            history: self.history.clone(),
            comparison_products: self.comparison_products.clone(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct CacheTimestamps {
    entries: HashMap<CacheResource, SystemTime>,
}

impl CacheTimestamps {
    pub fn record_fetch(&mut self, resource: CacheResource, fetched_at: SystemTime) {
        self.entries.insert(resource, fetched_at);
    }

    pub fn fetched_at(&self, resource: &CacheResource) -> Option<SystemTime> {
        self.entries.get(resource).copied()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CacheResource, &SystemTime)> {
        self.entries.iter()
    }

    pub fn is_stale(&self, resource: &CacheResource, ttl: Duration) -> bool {
        self.fetched_at(resource)
            .map(|time| time.elapsed().map(|elapsed| elapsed > ttl).unwrap_or(true))
            .unwrap_or(true)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum CacheResource {
    ExchangeRate(SourceCountry),
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedState {
    pub inputs: CalculationInput,
    pub history: Vec<HistoryEntry>,
    pub comparison_products: Vec<ComparisonProduct>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::engine::compute_margin;

    #[test]
    fn history_is_most_recent_first() {
        let mut state = AppState::default();
        let result = compute_margin(&state.inputs);
        let first = HistoryEntry::capture(&state.inputs, &result);
        let second = HistoryEntry::capture(&state.inputs, &result);
        state.push_history(first.clone());
        state.push_history(second.clone());

        assert_eq!(state.history[0].id, second.id);
        assert_eq!(state.history[1].id, first.id);

        state.remove_history(&second.id);
        assert_eq!(state.history.len(), 1);
        assert_eq!(state.history[0].id, first.id);
    }

    #[test]
    fn persisted_round_trip_keeps_inputs_and_history() {
        let mut state = AppState::default();
        state.inputs.sourcing_price = 123.0;
        let result = compute_margin(&state.inputs);
        state.push_history(HistoryEntry::capture(&state.inputs, &result));

        let json = serde_json::to_string(&state.to_persisted()).unwrap();
        let restored: PersistedState = serde_json::from_str(&json).unwrap();

        let mut fresh = AppState::default();
        fresh.apply_persisted(restored);
        assert_eq!(fresh.inputs.sourcing_price, 123.0);
        assert_eq!(fresh.history.len(), 1);
    }

    #[test]
    fn unknown_resource_counts_as_stale() {
        let state = AppState::default();
        assert!(state.is_stale(
            &CacheResource::ExchangeRate(SourceCountry::China),
            Duration::from_secs(60)
        ));
    }
}
