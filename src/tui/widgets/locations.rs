use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState},
    Frame,
};

use crate::models::{Location, PrayerType};
use crate::tui::theme;
use crate::utils::format::truncate;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    locations: &[Location],
    prayer: PrayerType,
    cursor: usize,
    focused: bool,
) {
    // Room left for the name after borders, marker and time column
    let name_width = (area.width as usize).saturating_sub(16);

    let items: Vec<ListItem> = locations
        .iter()
        .map(|location| {
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(format!("{:<8} ", location.time_for(prayer)), theme::gold()),
                    Span::styled(truncate(&location.name, name_width), theme::bold()),
                ]),
                Line::from(Span::styled(
                    format!("         {}", truncate(&location.address, name_width)),
                    theme::dim(),
                )),
            ])
        })
        .collect();

    let title = format!(" {} locations ", locations.len());
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(theme::border(focused))
                .title(Span::styled(title, theme::gold())),
        )
        .highlight_style(theme::cursor())
        .highlight_symbol("▸ ");

    let mut state = ListState::default();
    if !locations.is_empty() {
        state.select(Some(cursor));
    }
    frame.render_stateful_widget(list, area, &mut state);
}
