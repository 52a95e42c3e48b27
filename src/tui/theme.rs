use ratatui::style::{Color, Modifier, Style};

pub const BG: Color = Color::Rgb(14, 20, 17);
pub const SURFACE: Color = Color::Rgb(22, 32, 27);
pub const BORDER: Color = Color::Rgb(44, 66, 54);
pub const BORDER_FOCUS: Color = Color::Rgb(196, 160, 68);
pub const TEXT: Color = Color::Rgb(222, 230, 218);
pub const TEXT_DIM: Color = Color::Rgb(118, 138, 124);
pub const GOLD: Color = Color::Rgb(196, 160, 68);
pub const GREEN: Color = Color::Rgb(92, 168, 112);
pub const BLUE: Color = Color::Rgb(86, 148, 206);
pub const RED: Color = Color::Rgb(190, 86, 66);

pub fn base() -> Style {
    Style::default().fg(TEXT).bg(BG)
}

pub fn dim() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub fn gold() -> Style {
    Style::default().fg(GOLD)
}

pub fn green() -> Style {
    Style::default().fg(GREEN)
}

pub fn blue() -> Style {
    Style::default().fg(BLUE)
}

pub fn red() -> Style {
    Style::default().fg(RED)
}

pub fn bold() -> Style {
    Style::default().fg(TEXT).add_modifier(Modifier::BOLD)
}

pub fn surface() -> Style {
    Style::default().fg(TEXT).bg(SURFACE)
}

pub fn border(focused: bool) -> Style {
    if focused {
        Style::default().fg(BORDER_FOCUS)
    } else {
        Style::default().fg(BORDER)
    }
}

/// Highlight for the row under the cursor.
pub fn cursor() -> Style {
    Style::default()
        .fg(BG)
        .bg(GOLD)
        .add_modifier(Modifier::BOLD)
}
