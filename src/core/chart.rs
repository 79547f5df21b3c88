//! Trend chart data and the renderer that keeps a single chart alive

use super::currency::CurrencyKey;
use super::generation::Generation;
use super::indicator::{IndicatorProvider, IndicatorSeries};
use anyhow::{Result, anyhow};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, instrument};

/// Number of most recent observations plotted.
pub const CHART_POINTS: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub title: String,
    /// Dates in chronological order (`YYYY-MM-DD`).
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl ChartData {
    /// Takes the newest [`CHART_POINTS`] observations and orders them oldest first.
    pub fn from_series(key: CurrencyKey, series: &IndicatorSeries) -> Result<Self> {
        let points = series
            .points
            .as_ref()
            .ok_or_else(|| anyhow!("Response for {key} has no series"))?;

        let recent: Vec<_> = points.iter().take(CHART_POINTS).rev().collect();
        Ok(Self {
            title: format!("Historial últimos 10 días ({})", key.unit()),
            labels: recent
                .iter()
                .map(|p| p.date.chars().take(10).collect())
                .collect(),
            values: recent.iter().map(|p| p.value).collect(),
        })
    }
}

/// A chart that has been drawn and can be taken down again.
pub trait DrawnChart: Send {
    fn destroy(self: Box<Self>);
}

/// Where charts get drawn.
pub trait ChartSurface: Send + Sync {
    fn draw(&self, chart: &ChartData) -> Result<Box<dyn DrawnChart>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartOutcome {
    Drawn,
    Superseded,
}

pub struct ChartRenderer {
    provider: Arc<dyn IndicatorProvider>,
    surface: Box<dyn ChartSurface>,
    current: Mutex<Option<Box<dyn DrawnChart>>>,
    generation: Generation,
}

impl ChartRenderer {
    pub fn new(provider: Arc<dyn IndicatorProvider>, surface: Box<dyn ChartSurface>) -> Self {
        Self {
            provider,
            surface,
            current: Mutex::new(None),
            generation: Generation::new(),
        }
    }

    /// Fetches the series for `key` and replaces the chart on the surface.
    ///
    /// On error the previous chart stays as it was.
    #[instrument(name = "RenderChart", skip(self), fields(key = %key))]
    pub async fn render(&self, key: CurrencyKey) -> Result<ChartOutcome> {
        let ticket = self.generation.begin();
        let series = self.provider.fetch_series(key).await?;
        let data = ChartData::from_series(key, &series)?;

        let mut current = self.current.lock().await;
        if !self.generation.is_current(ticket) {
            debug!(ticket, "Discarding chart from a superseded render");
            return Ok(ChartOutcome::Superseded);
        }
        if let Some(previous) = current.take() {
            previous.destroy();
        }
        *current = Some(self.surface.draw(&data)?);
        debug!(points = data.values.len(), "Chart drawn");
        Ok(ChartOutcome::Drawn)
    }

    pub async fn dispose(&self) {
        if let Some(previous) = self.current.lock().await.take() {
            previous.destroy();
        }
    }
}
