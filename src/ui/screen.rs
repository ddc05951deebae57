use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Chart, Dataset, GraphType, Paragraph, Widget},
};

use super::{
    bold, charting, dim_bold, dot_spans, italic, status_style, summary_table, HORIZONTAL_MARGIN,
    VERTICAL_MARGIN,
};
use crate::{App, AppState};

/// A UI screen boundary: each app state renders through one of these.
pub trait Screen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer);
}

/// Settings and instructions before a session starts
pub struct ReadyScreen;

impl Screen for ReadyScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(1), // title
                Constraint::Length(1),
                Constraint::Length(1), // settings
                Constraint::Length(1),
                Constraint::Length(1), // instructions
                Constraint::Min(0),
                Constraint::Length(1), // legend
            ])
            .split(area);

        Paragraph::new(Span::styled("tapwise", bold().fg(Color::Magenta)))
            .alignment(Alignment::Center)
            .render(chunks[1], buf);

        let settings = format!(
            "{} bpm   {}s   click {}",
            app.config.bpm,
            app.config.duration_secs,
            if app.config.click { "on" } else { "off" }
        );
        Paragraph::new(Span::styled(settings, bold()))
            .alignment(Alignment::Center)
            .render(chunks[3], buf);

        Paragraph::new(Span::styled(
            "tap along with the beat for the whole session",
            dim_bold(),
        ))
        .alignment(Alignment::Center)
        .render(chunks[5], buf);

        Paragraph::new(Span::styled(
            "(enter) start / (←→) tempo / (↑↓) duration / (esc)ape",
            italic(),
        ))
        .render(chunks[7], buf);
    }
}

/// Live feedback while the metronome runs
pub struct TappingScreen;

impl Screen for TappingScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let session = &app.session;
        let target_ms = session.target_interval_ms();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .constraints([
                Constraint::Length(1), // header
                Constraint::Min(0),
                Constraint::Length(1), // pulse
                Constraint::Length(1),
                Constraint::Length(1), // status
                Constraint::Length(1), // numbers
                Constraint::Length(1),
                Constraint::Length(1), // dots
                Constraint::Min(0),
                Constraint::Length(1), // legend
            ])
            .split(area);

        let header = format!(
            "{:.0} bpm   {:.0}ms   {:.1}s",
            session.config().bpm(),
            target_ms,
            app.seconds_remaining().unwrap_or(0.0)
        );
        Paragraph::new(Span::styled(header, dim_bold()))
            .alignment(Alignment::Center)
            .render(chunks[0], buf);

        let elapsed = app.elapsed_ms().unwrap_or(0.0);
        let pulse = if app.metronome.is_flashing(elapsed) {
            Span::styled("●", bold().fg(Color::LightYellow))
        } else {
            Span::styled("○", dim_bold())
        };
        Paragraph::new(Line::from(vec![
            pulse,
            Span::styled(
                format!("  beat {}", app.metronome.beat_index(elapsed) + 1),
                dim_bold(),
            ),
        ]))
        .alignment(Alignment::Center)
        .render(chunks[2], buf);

        let status = session.status();
        Paragraph::new(Span::styled(status.text, status_style(status.class)))
            .alignment(Alignment::Center)
            .render(chunks[4], buf);

        let numbers = match (session.last_interval(), session.last_error()) {
            (Some(interval), Some(error)) => format!(
                "last {:.0}ms ({:+.0})   {:.1}% tap   {:.1}% overall",
                interval,
                error,
                session.last_accuracy().unwrap_or(0.0),
                session.running_accuracy().unwrap_or(0.0)
            ),
            _ => format!("{} taps", session.taps().tap_count()),
        };
        Paragraph::new(Span::styled(numbers, bold()))
            .alignment(Alignment::Center)
            .render(chunks[5], buf);

        let dots = dot_spans(session.taps().intervals(), target_ms, chunks[7].width);
        Paragraph::new(Line::from(dots))
            .alignment(Alignment::Center)
            .render(chunks[7], buf);

        Paragraph::new(Span::styled(
            "(space) tap / (esc) finish / (ctrl+c) quit",
            italic(),
        ))
        .render(chunks[9], buf);
    }
}

/// Deviation chart and session summary
pub struct ResultsScreen;

impl Screen for ResultsScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Min(1),    // chart
                Constraint::Length(1), // padding
                Constraint::Length(summary_table::ROWS),
                Constraint::Length(1), // verdict
                Constraint::Length(1), // padding
                Constraint::Length(1), // legend
            ])
            .split(area);

        let legend = Paragraph::new(Span::styled(
            "(r)etry / (n)ew / (esc)ape",
            italic(),
        ));
        legend.render(chunks[5], buf);

        let summary = match app.summary.as_ref() {
            Some(summary) if !summary.is_empty() => summary,
            _ => {
                Paragraph::new(Span::styled(
                    "Not enough taps to score this session",
                    dim_bold(),
                ))
                .alignment(Alignment::Center)
                .render(chunks[0], buf);
                return;
            }
        };

        let points = app.session.timing_points();
        let (last_tap, bound) = charting::compute_chart_params(&points, summary.target_ms);
        let deviations: Vec<(f64, f64)> = points.iter().map(|p| (*p).into()).collect();
        let on_beat = [(2.0, 0.0), (last_tap, 0.0)];

        let datasets = vec![
            Dataset::default()
                .marker(Marker::Braille)
                .style(Style::default().fg(Color::DarkGray))
                .graph_type(GraphType::Line)
                .data(&on_beat),
            Dataset::default()
                .marker(Marker::Braille)
                .style(Style::default().fg(Color::Magenta))
                .graph_type(GraphType::Line)
                .data(&deviations),
        ];

        Chart::new(datasets)
            .x_axis(
                Axis::default()
                    .title("tap")
                    .bounds([2.0, last_tap])
                    .labels(vec![
                        Span::styled("2", bold()),
                        Span::styled(charting::format_label(last_tap), bold()),
                    ]),
            )
            .y_axis(
                Axis::default()
                    .title("ms off")
                    .bounds([-bound, bound])
                    .labels(vec![
                        Span::styled(charting::format_signed_ms(-bound), bold()),
                        Span::styled("0", bold()),
                        Span::styled(charting::format_signed_ms(bound), bold()),
                    ]),
            )
            .render(chunks[0], buf);

        summary_table::summary_table(summary).render(chunks[2], buf);

        if let Some(verdict) = summary.verdict {
            Paragraph::new(Span::styled(
                verdict.to_string(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::ITALIC | Modifier::BOLD),
            ))
            .alignment(Alignment::Center)
            .render(chunks[3], buf);
        }
    }
}

pub fn current_screen(state: AppState) -> Box<dyn Screen> {
    match state {
        AppState::Ready => Box::new(ReadyScreen),
        AppState::Tapping => Box::new(TappingScreen),
        AppState::Results => Box::new(ResultsScreen),
    }
}
