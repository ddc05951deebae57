pub mod charting;
pub mod screen;
pub mod summary_table;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::Widget,
};

use crate::{
    classifier::{StatusClass, TimingBucket},
    App,
};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        screen::current_screen(self.state).render(self, area, buf);
    }
}

pub(crate) fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

pub(crate) fn dim_bold() -> Style {
    bold().add_modifier(Modifier::DIM)
}

pub(crate) fn italic() -> Style {
    Style::default().add_modifier(Modifier::ITALIC)
}

pub fn status_style(class: StatusClass) -> Style {
    let color = match class {
        StatusClass::Neutral => Color::Gray,
        StatusClass::Perfect => Color::Green,
        StatusClass::Bias => Color::Red,
        StatusClass::Trend => Color::Magenta,
        StatusClass::Slight => Color::Yellow,
    };
    bold().fg(color)
}

/// Dot drawn for one interval; better timing gets a bigger, greener dot.
pub fn dot_span(bucket: TimingBucket) -> Span<'static> {
    match bucket {
        TimingBucket::Perfect => Span::styled("●", bold().fg(Color::Green)),
        TimingBucket::Good => Span::styled("•", bold().fg(Color::Yellow)),
        TimingBucket::Off => Span::styled("·", bold().fg(Color::Red)),
    }
}

/// One dot per interval, newest last, keeping only what fits in `width`
/// (dots are separated by a space).
pub fn dot_spans(intervals: &[f64], target_ms: f64, width: u16) -> Vec<Span<'static>> {
    let fits = (width as usize).div_ceil(2);
    let skip = intervals.len().saturating_sub(fits);
    let mut spans = Vec::with_capacity(fits * 2);
    for (i, interval) in intervals.iter().skip(skip).enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        spans.push(dot_span(TimingBucket::of(*interval, target_ms)));
    }
    spans
}
