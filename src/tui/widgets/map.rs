use ratatui::{
    layout::Rect,
    style::Modifier,
    symbols::Marker,
    text::Span,
    widgets::{
        canvas::{Canvas, Line as CanvasLine, Points},
        Block, BorderType, Borders,
    },
    Frame,
};

use crate::models::{Coordinates, Location, UserPosition};
use crate::tui::theme;
use crate::utils::format::format_coords;

pub struct MapView<'a> {
    pub center: Coordinates,
    /// Degrees of latitude from top edge to bottom edge.
    pub span: f64,
    pub locations: &'a [Location],
    pub selected: Option<&'a Location>,
    pub user: Option<UserPosition>,
    /// Pin being placed in add mode.
    pub crosshair: Option<Coordinates>,
    pub show_route: bool,
}

impl MapView<'_> {
    /// Longitude and latitude ranges visible in `area`. Terminal cells are
    /// about twice as tall as wide, so longitude is widened to match.
    pub fn bounds(&self, area: Rect) -> ([f64; 2], [f64; 2]) {
        let lat_half = self.span / 2.0;
        let aspect = area.width.max(1) as f64 / (area.height.max(1) as f64 * 2.0);
        let lng_half = lat_half * aspect;
        (
            [self.center.lng - lng_half, self.center.lng + lng_half],
            [self.center.lat - lat_half, self.center.lat + lat_half],
        )
    }
}

pub fn render(frame: &mut Frame, area: Rect, view: &MapView) {
    let (x_bounds, y_bounds) = view.bounds(area);

    let title = match view.crosshair {
        Some(pin) => format!(" Pick a spot · {} ", format_coords(pin)),
        None => " Map ".to_string(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border(view.crosshair.is_some()))
        .title(Span::styled(title, theme::gold()));

    let points: Vec<(f64, f64)> = view.locations.iter().map(|l| (l.lng, l.lat)).collect();

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .background_color(theme::BG)
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .paint(|ctx| {
            ctx.draw(&Points {
                coords: &points,
                color: theme::GREEN,
            });

            if let (true, Some(user), Some(dest)) = (view.show_route, view.user, view.selected) {
                ctx.draw(&CanvasLine {
                    x1: user.lng,
                    y1: user.lat,
                    x2: dest.lng,
                    y2: dest.lat,
                    color: theme::BLUE,
                });
            }

            if let Some(pin) = view.crosshair {
                ctx.draw(&CanvasLine {
                    x1: x_bounds[0],
                    y1: pin.lat,
                    x2: x_bounds[1],
                    y2: pin.lat,
                    color: theme::BORDER,
                });
                ctx.draw(&CanvasLine {
                    x1: pin.lng,
                    y1: y_bounds[0],
                    x2: pin.lng,
                    y2: y_bounds[1],
                    color: theme::BORDER,
                });
            }

            ctx.layer();

            if let Some(dest) = view.selected {
                ctx.print(
                    dest.lng,
                    dest.lat,
                    Span::styled("◆", theme::gold().add_modifier(Modifier::BOLD)),
                );
            }
            if let Some(user) = view.user {
                let marker = if user.is_default { "○" } else { "●" };
                ctx.print(user.lng, user.lat, Span::styled(marker, theme::blue()));
            }
            if let Some(pin) = view.crosshair {
                ctx.print(pin.lng, pin.lat, Span::styled("+", theme::red()));
            }
        });

    frame.render_widget(canvas, area);
}
