use chrono::Local;
use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::tui::theme;

pub fn render(frame: &mut Frame, area: Rect, hijri_str: &str, region: &str, eid_str: Option<&str>) {
    let gregorian_str = Local::now().format("%A, %b %d, %Y").to_string();

    let title_line = Line::from(vec![
        Span::styled("  مُصَلَّى  ", theme::gold().add_modifier(Modifier::BOLD)),
        Span::styled("musalla", theme::gold()),
        Span::styled("  ·  ", theme::dim()),
        Span::styled(region, theme::green()),
    ]);

    let mut date_spans = vec![
        Span::styled(hijri_str, theme::gold()),
        Span::styled("  ·  ", theme::dim()),
        Span::styled(gregorian_str, theme::dim()),
    ];
    if let Some(eid) = eid_str {
        date_spans.push(Span::styled("  ·  ", theme::dim()));
        date_spans.push(Span::styled(eid, theme::green()));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::gold().add_modifier(Modifier::BOLD))
        .style(theme::base());

    let paragraph = Paragraph::new(vec![title_line, Line::from(date_spans)])
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}
