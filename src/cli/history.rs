use super::ui;
use crate::app::Session;
use crate::core::history::HistoryView;

/// Prints the whole history list every time it changes.
pub struct TerminalHistoryView;

impl HistoryView for TerminalHistoryView {
    fn render(&self, entries: &[String]) {
        println!("{}", display_list(entries));
    }
}

pub fn display_list(entries: &[String]) -> String {
    let mut output = format!("{}\n", ui::style_text("Historial", ui::StyleType::Title));
    if entries.is_empty() {
        output.push_str(&ui::style_text(
            "Sin conversiones registradas.",
            ui::StyleType::Subtle,
        ));
        return output;
    }
    let lines: Vec<String> = entries.iter().map(|entry| format!("• {entry}")).collect();
    output.push_str(&lines.join("\n"));
    output
}

pub async fn run(session: &Session) -> anyhow::Result<()> {
    session.history().load_and_render().await;
    Ok(())
}

/// Asks before clearing unless `assume_yes` is set.
pub async fn clear(session: &Session, assume_yes: bool) -> anyhow::Result<()> {
    let confirm = |prompt: &str| {
        assume_yes
            || inquire::Confirm::new(prompt)
                .with_default(false)
                .prompt()
                .unwrap_or(false)
    };
    if !session.clear_history(&confirm).await {
        println!("{}", ui::style_text("Historial conservado.", ui::StyleType::Subtle));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_list() {
        let entries = vec![
            "03-01-2025, 09:05:07 - 50 DOLAR → 45.000 CLP".to_string(),
            "03-01-2025, 09:04:00 - CLP 100 → 0,11 DOLAR".to_string(),
        ];
        let output = display_list(&entries);
        let first = output.find("50 DOLAR").unwrap();
        let second = output.find("CLP 100").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_display_empty_list() {
        assert!(display_list(&[]).contains("Sin conversiones registradas."));
    }
}
