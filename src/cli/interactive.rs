use super::chart::TerminalCanvas;
use super::{convert, history, rates, ui};
use crate::app::Session;
use crate::core::{CurrencyKey, Direction};
use anyhow::Result;
use inquire::{InquireError, Select, Text};
use std::fmt::Display;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Convert,
    ShowRates,
    ReloadRates,
    ClearHistory,
    Quit,
}

impl Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Action::Convert => "Convertir",
            Action::ShowRates => "Ver tasas",
            Action::ReloadRates => "Recargar tasas",
            Action::ClearHistory => "Limpiar historial",
            Action::Quit => "Salir",
        };
        write!(f, "{label}")
    }
}

/// Maps prompt cancellation (Esc / Ctrl-C) to `None` so the loop can end cleanly.
fn answered<T>(result: Result<T, InquireError>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Runs the converter as a session: rates are fetched once on start, then the
/// user converts repeatedly while history and chart follow along.
pub async fn run(session: &Session, canvas: &TerminalCanvas) -> Result<()> {
    rates::refresh(session).await;
    session.history().load_and_render().await;

    loop {
        ui::print_separator();
        let actions = vec![
            Action::Convert,
            Action::ShowRates,
            Action::ReloadRates,
            Action::ClearHistory,
            Action::Quit,
        ];
        let Some(action) = answered(Select::new("¿Qué desea hacer?", actions).prompt())? else {
            break;
        };
        debug!(?action, "Selected action");

        match action {
            Action::Convert => {
                let Some(amount) = answered(Text::new("Monto:").prompt())? else {
                    continue;
                };
                let Some(key) = answered(
                    Select::new("Moneda:", CurrencyKey::ALL.to_vec()).prompt(),
                )?
                else {
                    continue;
                };
                let directions = vec![Direction::LocalToForeign, Direction::ForeignToLocal];
                let Some(direction) = answered(Select::new("Conversión:", directions).prompt())?
                else {
                    continue;
                };
                convert::convert_and_display(session, canvas, &amount, key, direction).await;
            }
            Action::ShowRates => {
                println!("{}", rates::display_as_table(&session.rates().await));
            }
            Action::ReloadRates => {
                rates::refresh(session).await;
            }
            Action::ClearHistory => {
                history::clear(session, false).await?;
            }
            Action::Quit => break,
        }
    }

    session.close().await;
    Ok(())
}
