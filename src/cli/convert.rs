use super::chart::TerminalCanvas;
use super::{rates, ui};
use crate::app::Session;
use crate::core::convert::{Conversion, ConversionError, parse_amount};
use crate::core::{CurrencyKey, Direction};

/// Prints the outcome of a conversion the way the result box shows it.
pub fn display_result(result: &Result<Conversion, ConversionError>) -> String {
    match result {
        Ok(conversion) => ui::style_text(&conversion.display, ui::StyleType::Result),
        Err(e) => ui::style_text(&e.to_string(), ui::StyleType::Error),
    }
}

/// Converts one amount and presents the result, then the chart if one was drawn.
pub async fn convert_and_display(
    session: &Session,
    canvas: &TerminalCanvas,
    amount_input: &str,
    key: CurrencyKey,
    direction: Direction,
) -> bool {
    let result = session
        .convert(parse_amount(amount_input), key, direction)
        .await;
    println!("{}", display_result(&result));

    if result.is_ok()
        && let Some(frame) = canvas.frame()
    {
        println!("\n{frame}");
    }
    result.is_ok()
}

pub async fn run(
    session: &Session,
    canvas: &TerminalCanvas,
    amount_input: &str,
    key: CurrencyKey,
    direction: Direction,
) -> anyhow::Result<()> {
    rates::refresh(session).await;
    convert_and_display(session, canvas, amount_input, key, direction).await;
    Ok(())
}
