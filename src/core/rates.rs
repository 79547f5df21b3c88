//! Rate table and the all-or-nothing refresh

use super::currency::CurrencyKey;
use super::generation::Generation;
use super::indicator::IndicatorProvider;
use anyhow::{Context, Result};
use futures::future::try_join_all;
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

/// Latest known rate per key. A `None` rate means the indicator returned no observations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RateTable {
    rates: BTreeMap<CurrencyKey, Option<f64>>,
}

impl RateTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: CurrencyKey, rate: Option<f64>) {
        self.rates.insert(key, rate);
    }

    /// Rate for `key`, `None` if it was never fetched or is unavailable.
    pub fn get(&self, key: CurrencyKey) -> Option<f64> {
        self.rates.get(&key).copied().flatten()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Every fixed key with its rate, in key order.
    pub fn entries(&self) -> Vec<(CurrencyKey, Option<f64>)> {
        CurrencyKey::ALL
            .into_iter()
            .map(|key| (key, self.get(key)))
            .collect()
    }
}

/// Fetches every indicator concurrently and builds a fresh table.
///
/// Rates are only extracted once all requests succeed, so any failure leaves
/// the caller with no table at all.
pub async fn fetch_rate_table(provider: &dyn IndicatorProvider) -> Result<RateTable> {
    let fetches = CurrencyKey::ALL.into_iter().map(|key| async move {
        provider
            .fetch_series(key)
            .await
            .with_context(|| format!("Failed to fetch rate for {key}"))
            .map(|series| (key, series))
    });
    let responses = try_join_all(fetches).await?;

    let mut table = RateTable::new();
    for (key, series) in responses {
        table.insert(key, series.latest_value());
    }
    Ok(table)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Updated,
    /// A newer refresh started while this one was in flight; its result was dropped.
    Superseded,
}

/// Owner of the session's rate table. Only [`RateBook::refresh`] replaces it.
#[derive(Debug, Default)]
pub struct RateBook {
    table: RwLock<RateTable>,
    generation: Generation,
}

impl RateBook {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) fn with_table(table: RateTable) -> Self {
        Self {
            table: RwLock::new(table),
            generation: Generation::new(),
        }
    }

    #[instrument(name = "RefreshRates", skip_all)]
    pub async fn refresh(&self, provider: &dyn IndicatorProvider) -> Result<RefreshOutcome> {
        let ticket = self.generation.begin();
        let fresh = fetch_rate_table(provider).await?;

        let mut table = self.table.write().await;
        if !self.generation.is_current(ticket) {
            debug!(ticket, "Discarding rates from a superseded refresh");
            return Ok(RefreshOutcome::Superseded);
        }
        *table = fresh;
        info!(rates = ?table.entries(), "Rates refreshed");
        Ok(RefreshOutcome::Updated)
    }

    pub async fn snapshot(&self) -> RateTable {
        self.table.read().await.clone()
    }
}
