use anyhow::Result;
use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};
use rusqlite::Connection;
use std::time::Duration;

use crate::config::AppConfig;
use crate::db::repository::LocationRepo;
use crate::db::Store;
use crate::models::{Coordinates, Location, Notice, NoticeKind};
use crate::state::ViewState;
use crate::tui::events::{Event, EventHandler};
use crate::tui::form::AddForm;
use crate::tui::theme;
use crate::tui::widgets::{filters, form, header, locations, map, route, statusbar};
use crate::utils::hijri::{eid_countdown, today_hijri_string};

const TICK_RATE: Duration = Duration::from_millis(250);
/// Ticks a toast stays on screen.
const TOAST_TICKS: u16 = 16;
const DEFAULT_SPAN: f64 = 0.3;
const MIN_SPAN: f64 = 0.01;
const MAX_SPAN: f64 = 3.0;

#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    Normal,
    Search,
    EditTime,
    AddForm,
}

pub struct App {
    pub state: ViewState,
    pub config: AppConfig,
    pub should_quit: bool,
    pub input_mode: InputMode,
    pub input_buffer: String,
    pub input_error: Option<String>, // shown in the edit popup on bad input
    pub show_help: bool,
    pub form: Option<AddForm>,
    pub map_span: f64,

    // Cached state (refreshed on tick/action)
    pub hijri_str: String,
    pub eid_str: Option<String>,
    pub visible: Vec<Location>,
    pub chips: Vec<String>,
    pub cursor: usize,
    pub toast: Option<Notice>,
    toast_ticks: u16,
}

impl App {
    pub fn new(config: AppConfig, state: ViewState) -> Self {
        let offset = config.map.hijri_offset;
        let mut app = App {
            state,
            config,
            should_quit: false,
            input_mode: InputMode::Normal,
            input_buffer: String::new(),
            input_error: None,
            show_help: false,
            form: None,
            map_span: DEFAULT_SPAN,
            hijri_str: today_hijri_string(offset),
            eid_str: eid_countdown(Local::now().date_naive(), offset),
            visible: Vec::new(),
            chips: Vec::new(),
            cursor: 0,
            toast: None,
            toast_ticks: 0,
        };
        app.refresh();
        app
    }

    /// Recomputes the cached list and chips and keeps the cursor on the
    /// selected location when it is visible.
    fn refresh(&mut self) {
        self.visible = self.state.filtered();
        self.chips = self.state.time_chips();
        if let Some(id) = self.state.selected().map(|l| l.id) {
            if let Some(idx) = self.visible.iter().position(|l| l.id == id) {
                self.cursor = idx;
            }
        }
        self.cursor = self.cursor.min(self.visible.len().saturating_sub(1));

        if self.toast.is_none() {
            if let Some(notice) = self.state.pop_notice() {
                self.toast = Some(notice);
                self.toast_ticks = TOAST_TICKS;
            }
        }
    }

    pub fn tick(&mut self) {
        self.state.poll();
        if self.toast.is_some() {
            self.toast_ticks = self.toast_ticks.saturating_sub(1);
            if self.toast_ticks == 0 {
                self.toast = None;
            }
        }
        self.refresh();
    }

    pub fn handle_key(&mut self, key: KeyEvent, conn: &Connection) {
        // Some terminals also send release/repeat events
        if key.kind != KeyEventKind::Press {
            return;
        }
        if self.show_help {
            self.show_help = false;
            return;
        }
        match self.input_mode {
            InputMode::Normal if self.state.is_adding() => self.handle_pick_key(key),
            InputMode::Normal => self.handle_normal_key(key),
            InputMode::Search => self.handle_search_key(key),
            InputMode::EditTime => self.handle_edit_key(key, conn),
            InputMode::AddForm => self.handle_form_key(key, conn),
        }
        self.refresh();
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.should_quit = true;
            }
            KeyCode::Char('?') => {
                self.show_help = true;
            }
            KeyCode::Tab => {
                let next = self.state.prayer().toggled();
                self.state.set_prayer_type(next);
            }
            KeyCode::Char('/') => {
                self.input_mode = InputMode::Search;
            }
            KeyCode::Char('t') => self.state.cycle_time_filter(true),
            KeyCode::Char('T') => self.state.cycle_time_filter(false),
            KeyCode::Up => self.move_cursor(-1),
            KeyCode::Down => self.move_cursor(1),
            KeyCode::Enter => {
                if let Some(id) = self.visible.get(self.cursor).map(|l| l.id) {
                    self.state.select(id);
                }
            }
            KeyCode::Char('l') => {
                self.state.request_location();
            }
            KeyCode::Char('D') => {
                self.state.accept_default_location();
            }
            KeyCode::Char('a') => {
                self.state.begin_add();
            }
            KeyCode::Char('e') => {
                if let Some(location) = self.state.selected() {
                    self.input_buffer = location.time_for(self.state.prayer()).to_string();
                    self.input_error = None;
                    self.input_mode = InputMode::EditTime;
                }
            }
            KeyCode::Char('+') | KeyCode::Char('=') => self.zoom(0.5),
            KeyCode::Char('-') => self.zoom(2.0),
            _ => {}
        }
    }

    fn move_cursor(&mut self, delta: isize) {
        if self.visible.is_empty() {
            return;
        }
        let last = self.visible.len() - 1;
        self.cursor = self.cursor.saturating_add_signed(delta).min(last);
        let id = self.visible[self.cursor].id;
        self.state.select(id);
    }

    fn zoom(&mut self, factor: f64) {
        self.map_span = (self.map_span * factor).clamp(MIN_SPAN, MAX_SPAN);
    }

    /// Arrow keys move the pin in add mode, a fixed share of the visible map
    /// per press.
    fn handle_pick_key(&mut self, key: KeyEvent) {
        let step = self.map_span / 40.0;
        let (d_lat, d_lng) = match key.code {
            KeyCode::Up => (step, 0.0),
            KeyCode::Down => (-step, 0.0),
            KeyCode::Left => (0.0, -step),
            KeyCode::Right => (0.0, step),
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.zoom(0.5);
                return;
            }
            KeyCode::Char('-') => {
                self.zoom(2.0);
                return;
            }
            KeyCode::Enter => {
                if let Some(pin) = self.state.picked() {
                    self.form = Some(AddForm::new(pin));
                    self.input_mode = InputMode::AddForm;
                }
                return;
            }
            KeyCode::Esc => {
                self.state.cancel_add();
                return;
            }
            _ => return,
        };
        if let Some(pin) = self.state.picked() {
            let moved = Coordinates::new(
                (pin.lat + d_lat).clamp(-90.0, 90.0),
                (pin.lng + d_lng).clamp(-180.0, 180.0),
            );
            self.state.pick_on_map(moved);
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        let mut term = self.state.search_term().to_string();
        match key.code {
            KeyCode::Esc | KeyCode::Enter => {
                self.input_mode = InputMode::Normal;
                return;
            }
            KeyCode::Backspace => {
                term.pop();
            }
            KeyCode::Char(c) => term.push(c),
            _ => return,
        }
        self.state.set_search(&term);
    }

    fn handle_edit_key(&mut self, key: KeyEvent, conn: &Connection) {
        match key.code {
            KeyCode::Esc => {
                self.close_input();
            }
            KeyCode::Enter => {
                let Some(id) = self.state.selected().map(|l| l.id) else {
                    self.close_input();
                    return;
                };
                match self.state.edit_time(conn, id, &self.input_buffer) {
                    Ok(_) => self.close_input(),
                    Err(e) => self.input_error = Some(e.to_string()),
                }
            }
            KeyCode::Backspace => {
                self.input_buffer.pop();
                self.input_error = None;
            }
            KeyCode::Char(c) if c.is_ascii_alphanumeric() || c == ':' || c == ' ' => {
                self.input_buffer.push(c);
                self.input_error = None;
            }
            _ => {}
        }
    }

    fn close_input(&mut self) {
        self.input_mode = InputMode::Normal;
        self.input_buffer.clear();
        self.input_error = None;
    }

    fn handle_form_key(&mut self, key: KeyEvent, conn: &Connection) {
        let Some(form) = self.form.as_mut() else {
            self.input_mode = InputMode::Normal;
            return;
        };
        match key.code {
            KeyCode::Esc => {
                // Back to the map with the pin where it was
                self.form = None;
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.prev_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter if !form.is_last_field() => form.next_field(),
            KeyCode::Enter => {
                let input = form.to_new_location();
                match self.state.add_location(conn, input) {
                    Ok(_) => {
                        self.form = None;
                        self.input_mode = InputMode::Normal;
                    }
                    Err(e) => {
                        if let Some(form) = self.form.as_mut() {
                            form.reject(e);
                        }
                    }
                }
            }
            KeyCode::Char(c) => form.push(c),
            _ => {}
        }
    }

    pub fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Block::default().style(theme::base()), area);

        let outer_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // header
                Constraint::Min(0),    // body
                Constraint::Length(1), // status bar
            ])
            .split(area);

        header::render(
            frame,
            outer_chunks[0],
            &self.hijri_str,
            &self.config.map.region_name,
            self.eid_str.as_deref(),
        );
        statusbar::render(
            frame,
            outer_chunks[2],
            &self.input_mode,
            self.state.is_adding(),
            self.state.fallback_offered(),
        );

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(42), Constraint::Percentage(58)])
            .split(outer_chunks[1]);

        let left_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(6), // tabs, location, search, chips
                Constraint::Min(0),    // list
                Constraint::Length(4), // route summary
            ])
            .split(columns[0]);

        let filter_view = filters::FilterView {
            prayer: self.state.prayer(),
            search: self.state.search_term(),
            searching: self.input_mode == InputMode::Search,
            chips: &self.chips,
            time_filter: self.state.time_filter(),
            geo: self.state.geo_state(),
        };
        filters::render(frame, left_chunks[0], &filter_view);

        locations::render(
            frame,
            left_chunks[1],
            &self.visible,
            self.state.prayer(),
            self.cursor,
            self.input_mode == InputMode::Normal && !self.state.is_adding(),
        );

        route::render(
            frame,
            left_chunks[2],
            self.state.route_state(),
            self.state.user_position(),
            self.state.selected(),
        );

        let map_view = map::MapView {
            center: self.state.picked().unwrap_or(self.state.map_center()),
            span: self.map_span,
            locations: &self.visible,
            selected: self.state.selected(),
            user: self.state.user_position(),
            crosshair: self.state.picked(),
            show_route: self.state.route_info().is_some(),
        };
        map::render(frame, columns[1], &map_view);

        if let Some(notice) = &self.toast {
            self.draw_toast(frame, notice);
        }
        if self.input_mode == InputMode::EditTime {
            self.draw_edit_input(frame);
        }
        if let Some(add_form) = &self.form {
            form::render(frame, centered(area, 60, 14), add_form);
        }
        if self.show_help {
            self.draw_help_overlay(frame);
        }
    }

    fn draw_toast(&self, frame: &mut Frame, notice: &Notice) {
        let area = frame.area();
        let width = area.width.min(56);
        let popup_area = Rect {
            x: area.width.saturating_sub(width + 1),
            y: 1,
            width,
            height: 4.min(area.height),
        };
        frame.render_widget(Clear, popup_area);

        let style = match notice.kind {
            NoticeKind::Info => theme::green(),
            NoticeKind::Error => theme::red(),
        };
        let block = Block::default()
            .title(Span::styled(format!(" {} ", notice.title), style.add_modifier(Modifier::BOLD)))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(style)
            .style(theme::surface());
        let paragraph = Paragraph::new(Line::from(Span::styled(
            format!(" {}", notice.description),
            theme::dim(),
        )))
        .wrap(ratatui::widgets::Wrap { trim: true })
        .block(block);
        frame.render_widget(paragraph, popup_area);
    }

    fn draw_help_overlay(&self, frame: &mut Frame) {
        let popup_area = centered(frame.area(), 52, 18);
        frame.render_widget(Clear, popup_area);

        let bindings = [
            ("[Tab]", "Switch Eid / Jummah"),
            ("[/]", "Search by name or address"),
            ("[t] [T]", "Next / previous time filter"),
            ("[↑ ↓]", "Move through the list"),
            ("[Enter]", "Centre map on selection"),
            ("[l]", "Use my location"),
            ("[D]", "Use the default location"),
            ("[a]", "Add a mosque (pick on map)"),
            ("[e]", "Edit the selected time"),
            ("[+ -]", "Zoom map"),
            ("[?]", "Toggle help"),
            ("[Esc]", "Quit"),
        ];

        let mut help_text = vec![
            Line::from(Span::styled(
                "  Keybindings",
                theme::gold().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        for (key, label) in bindings {
            help_text.push(Line::from(vec![
                Span::styled(format!("  {:<12} ", key), theme::gold()),
                Span::styled(label, theme::dim()),
            ]));
        }

        let block = Block::default()
            .title(Span::styled(" Help ", theme::gold()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::gold())
            .style(theme::surface());

        frame.render_widget(Paragraph::new(help_text).block(block), popup_area);
    }

    fn draw_edit_input(&self, frame: &mut Frame) {
        let height = if self.input_error.is_some() { 7 } else { 5 };
        let popup_area = centered(frame.area(), 50, height);
        frame.render_widget(Clear, popup_area);

        let mut text = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled(
                    format!("  {} time: ", self.state.prayer().display_name()),
                    theme::dim(),
                ),
                Span::styled(
                    self.input_buffer.as_str(),
                    theme::gold().add_modifier(Modifier::BOLD),
                ),
                Span::styled("█", theme::gold()), // block cursor
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "  e.g. 08:30am, then [Enter]  ·  [Esc] cancel",
                theme::dim(),
            )),
        ];

        if let Some(err) = &self.input_error {
            text.push(Line::from(""));
            text.push(Line::from(Span::styled(format!("  ✗ {}", err), theme::red())));
        }

        let border_style = if self.input_error.is_some() {
            theme::red()
        } else {
            theme::gold()
        };
        let name = self
            .state
            .selected()
            .map(|l| l.name.as_str())
            .unwrap_or("Edit time");
        let block = Block::default()
            .title(Span::styled(format!(" {} ", name), theme::gold()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .style(theme::surface());

        frame.render_widget(Paragraph::new(text).block(block), popup_area);
    }
}

/// A `width` x `height` box in the middle of `area`, shrunk to fit.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Run the TUI event loop.
pub fn run(store: Store, config: AppConfig) -> Result<()> {
    let Store { conn, persistent } = store;
    let mut state = ViewState::from_config(&config, LocationRepo::load_or_seed(&conn));
    if !persistent {
        state.disable_persistence();
    }
    let mut app = App::new(config, state);

    let mut terminal = ratatui::init();
    let events = EventHandler::new(TICK_RATE);

    let result = (|| -> Result<()> {
        loop {
            terminal.draw(|frame| app.draw(frame))?;

            match events.next()? {
                Event::Key(key) => {
                    app.handle_key(key, &conn);
                    if app.should_quit {
                        break;
                    }
                }
                Event::Resize => {}
                Event::Tick => app.tick(),
            }
        }
        Ok(())
    })();

    ratatui::restore();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;
    use crate::geolocation::provider::UnsupportedProvider;
    use crate::models::{seed_locations, PrayerType, DEFAULT_CENTER};
    use crossterm::event::KeyModifiers;
    use std::sync::Arc;

    fn app() -> (App, Connection) {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        let state = ViewState::new(seed_locations(), DEFAULT_CENTER, Arc::new(UnsupportedProvider), None);
        (App::new(AppConfig::default(), state), conn)
    }

    fn press(app: &mut App, conn: &Connection, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE), conn);
    }

    fn type_text(app: &mut App, conn: &Connection, text: &str) {
        for c in text.chars() {
            press(app, conn, KeyCode::Char(c));
        }
    }

    #[test]
    fn arrows_move_cursor_and_selection_together() {
        let (mut app, conn) = app();
        press(&mut app, &conn, KeyCode::Down);
        press(&mut app, &conn, KeyCode::Down);
        assert_eq!(app.cursor, 2);
        assert_eq!(app.state.selected().map(|l| l.id), Some(app.visible[2].id));
        press(&mut app, &conn, KeyCode::Up);
        assert_eq!(app.cursor, 1);
    }

    #[test]
    fn search_mode_filters_live() {
        let (mut app, conn) = app();
        press(&mut app, &conn, KeyCode::Char('/'));
        type_text(&mut app, &conn, "fomwan");
        assert_eq!(app.visible.len(), 1);
        press(&mut app, &conn, KeyCode::Enter);
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.state.search_term(), "fomwan");
    }

    #[test]
    fn tab_switches_prayer_and_chips() {
        let (mut app, conn) = app();
        assert_eq!(app.chips.len(), 5);
        press(&mut app, &conn, KeyCode::Tab);
        assert_eq!(app.state.prayer(), PrayerType::Jummah);
        assert_eq!(app.chips, vec!["01:30pm".to_string()]);
    }

    #[test]
    fn edit_popup_rejects_bad_time_then_saves() {
        let (mut app, conn) = app();
        press(&mut app, &conn, KeyCode::Char('e'));
        assert_eq!(app.input_mode, InputMode::EditTime);
        assert_eq!(app.input_buffer, app.state.selected().unwrap().eid_time);

        app.input_buffer = "25:00am".to_string();
        press(&mut app, &conn, KeyCode::Enter);
        assert!(app.input_error.is_some());

        app.input_buffer.clear();
        type_text(&mut app, &conn, "07:15am");
        press(&mut app, &conn, KeyCode::Enter);
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.state.selected().unwrap().eid_time, "07:15am");
    }

    #[test]
    fn add_flow_moves_pin_and_saves_form() {
        let (mut app, conn) = app();
        press(&mut app, &conn, KeyCode::Char('a'));
        assert!(app.state.is_adding());
        let start = app.state.picked().unwrap();
        press(&mut app, &conn, KeyCode::Up);
        assert!(app.state.picked().unwrap().lat > start.lat);

        press(&mut app, &conn, KeyCode::Enter);
        assert_eq!(app.input_mode, InputMode::AddForm);
        type_text(&mut app, &conn, "Jabi Lake Ground");
        press(&mut app, &conn, KeyCode::Tab);
        type_text(&mut app, &conn, "Jabi Lake, Abuja");
        press(&mut app, &conn, KeyCode::BackTab);
        press(&mut app, &conn, KeyCode::BackTab);
        press(&mut app, &conn, KeyCode::Enter);

        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(!app.state.is_adding());
        assert_eq!(app.state.selected().unwrap().name, "Jabi Lake Ground");
        assert_eq!(app.visible.len(), 54);
    }

    #[test]
    fn esc_in_pick_mode_cancels_instead_of_quitting() {
        let (mut app, conn) = app();
        press(&mut app, &conn, KeyCode::Char('a'));
        press(&mut app, &conn, KeyCode::Esc);
        assert!(!app.state.is_adding());
        assert!(!app.should_quit);
        press(&mut app, &conn, KeyCode::Esc);
        assert!(app.should_quit);
    }

    #[test]
    fn default_location_shows_a_toast() {
        let (mut app, conn) = app();
        press(&mut app, &conn, KeyCode::Char('D'));
        assert_eq!(app.toast.as_ref().map(|t| t.title.as_str()), Some("Default location set"));
        assert!(app.state.user_position().unwrap().is_default);
    }
}
