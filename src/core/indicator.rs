//! Indicator time series and the provider abstraction

use super::currency::CurrencyKey;
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One observation of an indicator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    #[serde(rename = "fecha")]
    pub date: String,
    #[serde(rename = "valor")]
    pub value: f64,
}

/// Observations for one indicator, newest first as returned by the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSeries {
    #[serde(rename = "serie", default)]
    pub points: Option<Vec<SeriesPoint>>,
}

impl IndicatorSeries {
    pub fn new(points: Vec<SeriesPoint>) -> Self {
        Self {
            points: Some(points),
        }
    }

    /// Value of the most recent observation; `None` when the series is absent or empty.
    pub fn latest_value(&self) -> Option<f64> {
        self.points
            .as_ref()
            .and_then(|p| p.first())
            .map(|p| p.value)
    }

    pub fn points(&self) -> &[SeriesPoint] {
        self.points.as_deref().unwrap_or_default()
    }
}

#[async_trait]
pub trait IndicatorProvider: Send + Sync {
    async fn fetch_series(&self, key: CurrencyKey) -> Result<IndicatorSeries>;
}
