use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::tui::form::{AddForm, FIELD_LABELS};
use crate::tui::theme;
use crate::utils::format::format_coords;

pub fn render(frame: &mut Frame, area: Rect, form: &AddForm) {
    frame.render_widget(Clear, area);

    let mut lines = vec![
        Line::from(vec![
            Span::styled("  At ", theme::dim()),
            Span::styled(format_coords(form.coords), theme::blue()),
        ]),
        Line::from(""),
    ];

    for (idx, label) in FIELD_LABELS.iter().enumerate() {
        let focused = idx == form.focus;
        let label_style = if focused { theme::gold() } else { theme::dim() };
        let mut spans = vec![
            Span::styled(format!("  {:<12} ", label), label_style),
            Span::styled(form.fields[idx].as_str(), theme::bold()),
        ];
        if focused {
            spans.push(Span::styled("█", theme::gold()));
        }
        lines.push(Line::from(spans));
        if let Some(message) = form.error_for(idx) {
            lines.push(Line::from(Span::styled(
                format!("  {:<12} ✗ {}", "", message),
                theme::red(),
            )));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  [Enter] on the last field saves",
        theme::dim(),
    )));

    let border = if form.error.is_some() {
        theme::red()
    } else {
        theme::gold()
    };
    let block = Block::default()
        .title(Span::styled(" Add Mosque ", theme::gold().add_modifier(Modifier::BOLD)))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border)
        .style(theme::surface());

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
