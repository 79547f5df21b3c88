pub mod app;
pub mod cli;
pub mod core;
pub mod providers;
pub mod store;

use crate::app::Session;
use crate::cli::chart::TerminalCanvas;
use crate::cli::history::TerminalHistoryView;
use crate::core::config::AppConfig;
use crate::core::history::HistoryStore;
use crate::core::{CurrencyKey, Direction, IndicatorProvider};
use crate::providers::MindicadorProvider;
use crate::store::KeyValueStore;
use anyhow::Result;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    Rates,
    Convert {
        amount: String,
        currency: CurrencyKey,
        direction: Direction,
        chart: bool,
    },
    History,
    ClearHistory {
        assume_yes: bool,
    },
    Chart {
        currency: CurrencyKey,
    },
    Interactive,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let provider: Arc<dyn IndicatorProvider> = Arc::new(MindicadorProvider::new(
        &config.providers.mindicador.base_url,
    )?);

    let store = KeyValueStore::open(&config.data_path()?);
    let mut history = HistoryStore::new(store.collection_or_memory("history"));
    if matches!(
        command,
        AppCommand::History | AppCommand::ClearHistory { .. } | AppCommand::Interactive
    ) {
        history = history.with_view(Box::new(TerminalHistoryView));
    }

    let canvas = TerminalCanvas::new();
    let mut session = Session::new(provider, history);
    let draws_chart = match &command {
        AppCommand::Convert { chart, .. } => *chart,
        AppCommand::Chart { .. } | AppCommand::Interactive => true,
        _ => false,
    };
    if draws_chart {
        session = session.with_chart(Box::new(canvas.clone()));
    }

    let result = match command {
        AppCommand::Rates => cli::rates::run(&session).await,
        AppCommand::Convert {
            amount,
            currency,
            direction,
            ..
        } => cli::convert::run(&session, &canvas, &amount, currency, direction).await,
        AppCommand::History => cli::history::run(&session).await,
        AppCommand::ClearHistory { assume_yes } => cli::history::clear(&session, assume_yes).await,
        AppCommand::Chart { currency } => cli::chart::run(&session, &canvas, currency).await,
        AppCommand::Interactive => cli::interactive::run(&session, &canvas).await,
    };
    session.close().await;
    result
}
