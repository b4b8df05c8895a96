/// UI components and formatting helpers for the dashboard
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::models::{SortCriteria, SortField};

/// Render a loading indicator
pub fn render_loading_indicator(f: &mut Frame, area: Rect, message: &str) {
    let loading = Paragraph::new(message)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Loading"))
        .style(Style::default().fg(Color::Yellow));

    f.render_widget(loading, area);
}

/// Render a single filter input box
pub fn render_filter_input(
    f: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    placeholder: &str,
    focused: bool,
    editing: bool,
) {
    let border_style = if editing {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let content = if value.is_empty() && !editing {
        Span::styled(placeholder.to_string(), Style::default().fg(Color::DarkGray))
    } else if editing {
        Span::styled(format!("{}_", value), Style::default().fg(Color::White))
    } else {
        Span::styled(value.to_string(), Style::default().fg(Color::White))
    };

    let input = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(label.to_string()),
    );

    f.render_widget(input, area);
}

/// Column header text, with an arrow on the active sort column
pub fn sort_header_label(field: SortField, sort: SortCriteria) -> String {
    if sort.field == field {
        format!("{} {}", field.label(), sort.direction.indicator())
    } else {
        field.label().to_string()
    }
}

/// Create a styled span for an amount, red when negative
pub fn styled_amount_span(value: f64) -> Span<'static> {
    let formatted = format_amount(value);
    if value < 0.0 {
        Span::styled(formatted, Style::default().fg(Color::Red))
    } else {
        Span::styled(formatted, Style::default().fg(Color::Green))
    }
}

/// Format an amount in full with thousands separators; fractional amounts
/// keep two decimals
pub fn format_amount(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let abs = value.abs();
    let text = if abs.fract() == 0.0 { format!("{:.0}", abs) } else { format!("{:.2}", abs) };
    let (whole, fraction) = match text.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    match fraction {
        Some(fraction) => format!("{}{}.{}", sign, grouped, fraction),
        None => format!("{}{}", sign, grouped),
    }
}

/// Earnings per share keep two decimals
pub fn format_eps(value: f64) -> String {
    format!("{:.2}", value)
}
