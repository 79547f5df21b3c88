use super::ui;
use crate::app::{REFRESH_ALERT, Session};
use crate::core::format::format_number;
use crate::core::{LOCAL_CURRENCY, RateTable};
use comfy_table::Cell;

/// Refreshes the session's rates behind a spinner. A failure is reported to
/// the user and otherwise ignored; the previous table stays in place.
pub async fn refresh(session: &Session) -> bool {
    let pb = ui::new_spinner("Obteniendo tasas desde mindicador.cl");
    let result = session.refresh_rates().await;
    pb.finish_and_clear();

    match result {
        Ok(_) => true,
        Err(_) => {
            eprintln!("{}", ui::style_text(REFRESH_ALERT, ui::StyleType::Error));
            false
        }
    }
}

pub fn display_as_table(rates: &RateTable) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Moneda"),
        ui::header_cell(&format!("Tasa ({LOCAL_CURRENCY})")),
    ]);

    for (key, rate) in rates.entries() {
        table.add_row(vec![
            Cell::new(key.unit()),
            ui::format_optional_cell(rate, |r| format_number(r, 0, 2)),
        ]);
    }
    table.to_string()
}

pub async fn run(session: &Session) -> anyhow::Result<()> {
    refresh(session).await;
    println!("{}", display_as_table(&session.rates().await));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CurrencyKey;

    #[test]
    fn test_rates_table_shows_every_key() {
        let mut rates = RateTable::new();
        rates.insert(CurrencyKey::Dolar, Some(943.27));
        rates.insert(CurrencyKey::Uf, Some(38_123.5));
        rates.insert(CurrencyKey::Utm, None);

        let output = display_as_table(&rates);
        for unit in ["DOLAR", "EURO", "UTM", "UF", "BITCOIN"] {
            assert!(output.contains(unit), "missing {unit}");
        }
        assert!(output.contains("943,27"));
        assert!(output.contains("38.123,5"));
        assert!(output.contains("N/A"));
    }
}
