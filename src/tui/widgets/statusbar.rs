use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::app::InputMode;
use crate::tui::theme;

pub fn render(frame: &mut Frame, area: Rect, mode: &InputMode, adding: bool, fallback: bool) {
    let hints: &[(&str, &str)] = match mode {
        InputMode::Search => &[("[type]", " search  "), ("[Enter/Esc]", " done")],
        InputMode::EditTime => &[("[Enter]", " save  "), ("[Esc]", " cancel")],
        InputMode::AddForm => &[
            ("[Tab ↑↓]", " field  "),
            ("[Enter]", " next/save  "),
            ("[Esc]", " back to map"),
        ],
        InputMode::Normal if adding => &[
            ("[←↑↓→]", " move pin  "),
            ("[+/-]", " zoom  "),
            ("[Enter]", " details  "),
            ("[Esc]", " cancel"),
        ],
        InputMode::Normal if fallback => &[
            ("[D]", " use default location  "),
            ("[l]", " retry  "),
            ("[?]", " help  "),
            ("[Esc]", " quit"),
        ],
        InputMode::Normal => &[
            ("[Tab]", " eid/jummah  "),
            ("[/]", " search  "),
            ("[t/T]", " time  "),
            ("[l]", " locate  "),
            ("[a]", " add  "),
            ("[e]", " edit  "),
            ("[?]", " help  "),
            ("[Esc]", " quit"),
        ],
    };

    let mut spans = Vec::new();
    for (key, label) in hints {
        spans.push(Span::styled(*key, theme::gold()));
        spans.push(Span::styled(*label, theme::dim()));
    }

    let paragraph = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}
