pub mod chart;
pub mod convert;
pub mod history;
pub mod interactive;
pub mod rates;
pub mod setup;
pub mod ui;
