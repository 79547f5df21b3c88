use super::ui;
use crate::app::Session;
use crate::core::CurrencyKey;
use crate::core::chart::{ChartData, ChartSurface, DrawnChart};
use crate::core::format::format_number;
use anyhow::{Result, anyhow};
use comfy_table::{Cell, CellAlignment, Color};
use std::sync::{Arc, Mutex};

const BAR_WIDTH: usize = 30;

/// Terminal stand-in for a chart canvas: holds the frame of the live chart.
///
/// Drawing replaces the frame; destroying the chart empties it. Callers print
/// the frame with [`TerminalCanvas::frame`] when presenting output.
#[derive(Clone, Default)]
pub struct TerminalCanvas {
    slot: Arc<Mutex<Option<String>>>,
}

impl TerminalCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frame(&self) -> Option<String> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }
}

struct CanvasChart {
    slot: Arc<Mutex<Option<String>>>,
}

impl DrawnChart for CanvasChart {
    fn destroy(self: Box<Self>) {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = None;
        }
    }
}

impl ChartSurface for TerminalCanvas {
    fn draw(&self, chart: &ChartData) -> Result<Box<dyn DrawnChart>> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| anyhow!("Chart canvas lock poisoned"))?;
        if slot.is_some() {
            return Err(anyhow!("Chart canvas already holds a live chart"));
        }
        *slot = Some(render_frame(chart));
        Ok(Box::new(CanvasChart {
            slot: Arc::clone(&self.slot),
        }))
    }
}

/// Renders the chart as a table with one horizontal bar per point, oldest first.
pub fn render_frame(chart: &ChartData) -> String {
    let min = chart.values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = chart.values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Fecha"),
        ui::header_cell("Valor"),
        ui::header_cell(""),
    ]);
    for (label, value) in chart.labels.iter().zip(&chart.values) {
        table.add_row(vec![
            Cell::new(label),
            Cell::new(format_number(*value, 0, 2)).set_alignment(CellAlignment::Right),
            Cell::new("█".repeat(bar_len(*value, min, max))).fg(Color::Red),
        ]);
    }

    format!(
        "{}\n{}",
        ui::style_text(&chart.title, ui::StyleType::Title),
        table
    )
}

fn bar_len(value: f64, min: f64, max: f64) -> usize {
    let span = max - min;
    if span <= 0.0 || !span.is_finite() {
        return BAR_WIDTH / 2;
    }
    1 + (((value - min) / span) * (BAR_WIDTH - 1) as f64).round() as usize
}

pub async fn run(session: &Session, canvas: &TerminalCanvas, key: CurrencyKey) -> Result<()> {
    let pb = ui::new_spinner(&format!("Cargando gráfico de {}", key.unit()));
    let outcome = session.render_chart(key).await;
    pb.finish_and_clear();

    match (outcome, canvas.frame()) {
        (Some(_), Some(frame)) => println!("{frame}"),
        _ => eprintln!(
            "{}",
            ui::style_text("No se pudo cargar el gráfico.", ui::StyleType::Subtle)
        ),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chart() -> ChartData {
        ChartData {
            title: "Historial últimos 10 días (DOLAR)".to_string(),
            labels: vec!["2025-01-01".into(), "2025-01-02".into(), "2025-01-03".into()],
            values: vec![900.0, 950.0, 1000.0],
        }
    }

    #[test]
    fn test_bars_scale_between_min_and_max() {
        assert_eq!(bar_len(900.0, 900.0, 1000.0), 1);
        assert_eq!(bar_len(1000.0, 900.0, 1000.0), BAR_WIDTH);
        assert_eq!(bar_len(5.0, 5.0, 5.0), BAR_WIDTH / 2);
    }

    #[test]
    fn test_frame_lists_points() {
        let frame = render_frame(&chart());
        assert!(frame.contains("Historial últimos 10 días (DOLAR)"));
        assert!(frame.contains("2025-01-02"));
        assert!(frame.contains("1.000"));
    }

    #[test]
    fn test_canvas_holds_one_chart() {
        let canvas = TerminalCanvas::new();
        assert!(canvas.frame().is_none());

        let drawn = canvas.draw(&chart()).unwrap();
        assert!(canvas.frame().is_some());
        // A second chart cannot be drawn over a live one
        assert!(canvas.draw(&chart()).is_err());

        drawn.destroy();
        assert!(canvas.frame().is_none());
        assert!(canvas.draw(&chart()).is_ok());
    }
}
