//! Amount validation and conversion arithmetic

use super::currency::{CurrencyKey, Direction, LOCAL_CURRENCY};
use super::format::{format_amount, format_fixed};
use super::rates::RateTable;
use thiserror::Error;

/// Failures the user can fix on their own. `Display` is the message shown to them.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConversionError {
    #[error("Ingrese un monto válido.")]
    InvalidAmount,
    #[error("Tasa no disponible. Intenta recargar la página.")]
    RateUnavailable(CurrencyKey),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub key: CurrencyKey,
    pub direction: Direction,
    pub amount: f64,
    pub rate: f64,
    pub value: f64,
    /// Result as displayed, e.g. `0,11 DOLAR`.
    pub display: String,
    /// Description recorded in the history, e.g. `CLP 100 → 0,11 DOLAR`.
    pub history_line: String,
}

/// Parses user input; anything that is not a number becomes NaN and fails validation later.
pub fn parse_amount(input: &str) -> f64 {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

pub fn convert(
    amount: f64,
    key: CurrencyKey,
    direction: Direction,
    rates: &RateTable,
) -> Result<Conversion, ConversionError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(ConversionError::InvalidAmount);
    }
    let rate = rates
        .get(key)
        .ok_or(ConversionError::RateUnavailable(key))?;

    let unit = key.unit();
    let (value, display, history_line) = match direction {
        Direction::LocalToForeign => {
            let value = amount / rate;
            let shown = format!("{} {unit}", format_fixed(value, 2));
            let line = format!("{LOCAL_CURRENCY} {} → {shown}", format_amount(amount));
            (value, shown, line)
        }
        Direction::ForeignToLocal => {
            let value = amount * rate;
            let shown = format!("{} {LOCAL_CURRENCY}", format_fixed(value, 0));
            let line = format!("{} {unit} → {shown}", format_amount(amount));
            (value, shown, line)
        }
    };

    Ok(Conversion {
        key,
        direction,
        amount,
        rate,
        value,
        display,
        history_line,
    })
}
