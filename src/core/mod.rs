//! Core business logic, independent of the terminal

pub mod cache;
pub mod chart;
pub mod config;
pub mod convert;
pub mod currency;
pub mod format;
pub mod generation;
pub mod history;
pub mod indicator;
pub mod log;
pub mod rates;

// Re-export main types for cleaner imports
pub use currency::{CurrencyKey, Direction, LOCAL_CURRENCY};
pub use indicator::{IndicatorProvider, IndicatorSeries, SeriesPoint};
pub use rates::{RateBook, RateTable, RefreshOutcome};
