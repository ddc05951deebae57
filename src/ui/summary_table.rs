use ratatui::{
    layout::Constraint,
    style::{Color, Modifier, Style},
    widgets::{Cell, Row, Table},
};

use crate::summary::{SessionSummary, StabilityTier, Tendency};

/// Number of rows produced by [`summary_rows`].
pub const ROWS: u16 = 6;

fn percent_color(value: f64) -> Color {
    if value >= 95.0 {
        Color::Green
    } else if value >= 85.0 {
        Color::Yellow
    } else {
        Color::Red
    }
}

fn percent_cell(value: Option<f64>) -> Cell<'static> {
    match value {
        Some(v) => Cell::from(format!("{v:.1}%")).style(Style::default().fg(percent_color(v))),
        None => Cell::from("—"),
    }
}

/// Pure presenter for the summary table rows
pub fn summary_rows(summary: &SessionSummary) -> Vec<Row<'static>> {
    let label = |text: &'static str| Cell::from(text).style(Style::default().add_modifier(Modifier::BOLD));

    let tendency = match summary.tendency {
        Some(t @ Tendency::Balanced) => Cell::from(t.to_string()).style(Style::default().fg(Color::Green)),
        Some(t) => Cell::from(t.to_string()).style(Style::default().fg(Color::Yellow)),
        None => Cell::from("—"),
    };

    let stability = match summary.stability {
        Some(s) => {
            let color = match s.tier {
                StabilityTier::VeryStable => Color::Green,
                StabilityTier::ModeratelyStable => Color::Yellow,
                StabilityTier::Inconsistent => Color::Red,
            };
            Cell::from(format!("{} ({:.0}ms avg change)", s.tier, s.mean_step_ms))
                .style(Style::default().fg(color))
        }
        None => Cell::from("—"),
    };

    vec![
        Row::new(vec![label("Taps"), Cell::from(summary.tap_count.to_string())]),
        Row::new(vec![label("Accuracy"), percent_cell(summary.accuracy)]),
        Row::new(vec![label("Consistency"), percent_cell(summary.consistency)]),
        Row::new(vec![label("Tendency"), tendency]),
        Row::new(vec![label("Stability"), stability]),
        Row::new(vec![
            label("Best run"),
            Cell::from(format!("{} perfect in a row", summary.best_run)),
        ]),
    ]
}

pub fn summary_table(summary: &SessionSummary) -> Table<'static> {
    Table::new(
        summary_rows(summary),
        [Constraint::Length(14), Constraint::Min(10)],
    )
}
