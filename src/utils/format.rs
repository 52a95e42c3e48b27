use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::models::Coordinates;

/// Format a whole number of minutes as "Xh Ym" or "Ym"
pub fn format_minutes(minutes: i64) -> String {
    if minutes <= 0 {
        return "under a minute".to_string();
    }
    let hours = minutes / 60;
    let rest = minutes % 60;
    if hours > 0 {
        format!("{}h {}m", hours, rest)
    } else {
        format!("{}m", rest)
    }
}

/// Format coordinates to four places, enough for a street corner
pub fn format_coords(coords: Coordinates) -> String {
    format!("{:.4}, {:.4}", coords.lat, coords.lng)
}

/// Cut `text` to fit `width` terminal columns, ending with an ellipsis when cut
pub fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}
