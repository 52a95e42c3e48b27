use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::models::{Location, UserPosition};
use crate::routing::RouteState;
use crate::tui::theme;
use crate::utils::format::{format_minutes, truncate};

pub fn render(
    frame: &mut Frame,
    area: Rect,
    route: RouteState,
    user: Option<UserPosition>,
    selected: Option<&Location>,
) {
    let width = (area.width as usize).saturating_sub(4);
    let destination = selected
        .map(|l| truncate(&l.name, width))
        .unwrap_or_else(|| "No location selected".to_string());

    let detail = match (route, user) {
        (RouteState::Displayed(info), _) => Line::from(vec![
            Span::styled(format!("{} km", info.distance_label()), theme::gold()),
            Span::styled("  ·  ", theme::dim()),
            Span::styled(format_minutes(info.minutes), theme::gold()),
        ]),
        (RouteState::Requesting, _) => Line::from(Span::styled("Finding a route…", theme::blue())),
        (RouteState::NoRoute, None) => Line::from(Span::styled(
            "Press l to locate yourself for directions",
            theme::dim(),
        )),
        (RouteState::NoRoute, Some(_)) => {
            Line::from(Span::styled("No route available", theme::dim()))
        }
    };

    let from = user.map(|u| u.marker_label()).unwrap_or("Route");
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border(false))
        .title(Span::styled(format!(" {} ", from), theme::blue()));

    let paragraph = Paragraph::new(vec![
        Line::from(Span::styled(destination, theme::bold())),
        detail,
    ])
    .block(block);
    frame.render_widget(paragraph, area);
}
