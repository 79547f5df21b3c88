//! The session: one owned application state shared by every operation.
//!
//! A session starts with an empty rate table. Only [`Session::refresh_rates`]
//! replaces it; conversions read a snapshot.

use crate::core::chart::{ChartOutcome, ChartRenderer, ChartSurface};
use crate::core::convert::{self, Conversion, ConversionError};
use crate::core::history::{Confirm, HistoryStore};
use crate::core::{CurrencyKey, Direction, IndicatorProvider, RateBook, RateTable, RefreshOutcome};
use anyhow::Result;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Shown to the user when the rates cannot be refreshed.
pub const REFRESH_ALERT: &str =
    "No se pudieron obtener las tasas desde mindicador.cl. Revisa la conexión o los endpoints.";

pub struct Session {
    provider: Arc<dyn IndicatorProvider>,
    rates: RateBook,
    history: HistoryStore,
    chart: Option<ChartRenderer>,
}

impl Session {
    pub fn new(provider: Arc<dyn IndicatorProvider>, history: HistoryStore) -> Self {
        Self {
            provider,
            rates: RateBook::new(),
            history,
            chart: None,
        }
    }

    /// Draws a trend chart on `surface` after every successful conversion.
    pub fn with_chart(mut self, surface: Box<dyn ChartSurface>) -> Self {
        self.chart = Some(ChartRenderer::new(Arc::clone(&self.provider), surface));
        self
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub async fn rates(&self) -> RateTable {
        self.rates.snapshot().await
    }

    /// Refreshes every rate at once. On failure the previous table is kept.
    pub async fn refresh_rates(&self) -> Result<RefreshOutcome> {
        self.rates
            .refresh(self.provider.as_ref())
            .await
            .inspect_err(|e| error!(error = ?e, "Error obtaining rates"))
    }

    /// Converts `amount` and, on success only, records it and refreshes the chart.
    pub async fn convert(
        &self,
        amount: f64,
        key: CurrencyKey,
        direction: Direction,
    ) -> Result<Conversion, ConversionError> {
        let rates = self.rates.snapshot().await;
        let conversion = convert::convert(amount, key, direction, &rates)?;
        info!(line = %conversion.history_line, "Converted");

        self.history.append(&conversion.history_line).await;
        self.render_chart(key).await;
        Ok(conversion)
    }

    /// Redraws the chart for `key`. Failures are only logged.
    pub async fn render_chart(&self, key: CurrencyKey) -> Option<ChartOutcome> {
        let chart = self.chart.as_ref()?;
        chart
            .render(key)
            .await
            .inspect_err(|e| warn!(error = ?e, "Error loading chart"))
            .ok()
    }

    pub async fn clear_history(&self, confirm: &dyn Confirm) -> bool {
        self.history.clear(confirm).await
    }

    /// Takes down the chart, if one is drawn.
    pub async fn close(&self) {
        if let Some(chart) = &self.chart {
            chart.dispose().await;
        }
    }
}
