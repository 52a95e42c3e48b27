use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Tabs},
    Frame,
};

use crate::geolocation::GeoState;
use crate::models::PrayerType;
use crate::tui::theme;

pub struct FilterView<'a> {
    pub prayer: PrayerType,
    pub search: &'a str,
    pub searching: bool,
    pub chips: &'a [String],
    pub time_filter: &'a str,
    pub geo: GeoState,
}

/// Prayer tabs, location status, search box and time chips, top to bottom.
pub fn render(frame: &mut Frame, area: Rect, view: &FilterView) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(area);

    let titles: Vec<Line> = PrayerType::all()
        .iter()
        .map(|p| Line::from(p.tab_label()))
        .collect();
    let selected = PrayerType::all()
        .iter()
        .position(|p| *p == view.prayer)
        .unwrap_or(0);
    let tabs = Tabs::new(titles)
        .select(selected)
        .style(theme::dim())
        .highlight_style(theme::gold().add_modifier(Modifier::BOLD))
        .divider(Span::styled("│", theme::dim()));
    frame.render_widget(tabs, rows[0]);

    frame.render_widget(Paragraph::new(location_line(view.geo)), rows[1]);

    let search_text = if view.search.is_empty() && !view.searching {
        Span::styled("Search by name or address", theme::dim())
    } else {
        Span::styled(view.search, theme::bold())
    };
    let mut search_spans = vec![Span::raw(" "), search_text];
    if view.searching {
        search_spans.push(Span::styled("█", theme::gold()));
    }
    let search = Paragraph::new(Line::from(search_spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border(view.searching))
            .title(Span::styled(" / ", theme::gold())),
    );
    frame.render_widget(search, rows[2]);

    frame.render_widget(Paragraph::new(chip_line(view.chips, view.time_filter)), rows[3]);
}

fn location_line(geo: GeoState) -> Line<'static> {
    match geo {
        GeoState::Idle => Line::from(vec![
            Span::styled(" [l] ", theme::gold()),
            Span::styled("Use my location", theme::dim()),
        ]),
        GeoState::Locating => Line::from(Span::styled(" Locating…", theme::blue())),
        GeoState::Resolved(_) => Line::from(vec![
            Span::styled(" ● ", theme::blue()),
            Span::styled("Using your location", theme::dim()),
        ]),
        GeoState::ManualFallbackOffered(_) => Line::from(vec![
            Span::styled(" Location unavailable. ", theme::red()),
            Span::styled("[D] ", theme::gold()),
            Span::styled("use default location", theme::dim()),
        ]),
        GeoState::DefaultLocationAccepted(_) => Line::from(vec![
            Span::styled(" ○ ", theme::blue()),
            Span::styled("Using the default location", theme::dim()),
        ]),
    }
}

fn chip_line<'a>(chips: &'a [String], active: &str) -> Line<'a> {
    let mut spans = vec![Span::raw(" ")];
    let all = if active.is_empty() {
        theme::cursor()
    } else {
        theme::dim()
    };
    spans.push(Span::styled(" All times ", all));
    for chip in chips {
        spans.push(Span::raw(" "));
        let style = if chip == active {
            theme::cursor()
        } else {
            theme::dim()
        };
        spans.push(Span::styled(format!(" {} ", chip), style));
    }
    Line::from(spans)
}
