//! Color utility functions for drawing on a terminal.

use ratatui::style::Color;

/// Darken `color` toward black by `alpha` (0.0-1.0).
///
/// Terminal cells have no alpha channel, so opacity is approximated by
/// brightness. Non-RGB colors are returned unchanged.
pub fn fade(color: Color, alpha: f64) -> Color {
    let alpha = alpha.clamp(0.0, 1.0);
    match color {
        Color::Rgb(r, g, b) => Color::Rgb(scale(r, alpha), scale(g, alpha), scale(b, alpha)),
        other => other,
    }
}

/// Like [`fade`], but never darker than `floor`.
///
/// Useful when the faintest strokes would otherwise vanish against a dark
/// background.
pub fn fade_with_floor(color: Color, alpha: f64, floor: f64) -> Color {
    let floor = floor.clamp(0.0, 1.0);
    fade(color, floor + (1.0 - floor) * alpha.clamp(0.0, 1.0))
}

fn scale(channel: u8, alpha: f64) -> u8 {
    (channel as f64 * alpha).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fade_endpoints() {
        let violet = Color::Rgb(139, 92, 246);
        assert_eq!(fade(violet, 1.0), violet);
        assert_eq!(fade(violet, 0.0), Color::Rgb(0, 0, 0));
        assert_eq!(fade(violet, 2.0), violet);
        assert_eq!(fade(Color::Cyan, 0.1), Color::Cyan);
    }

    #[test]
    fn test_fade_half() {
        assert_eq!(fade(Color::Rgb(200, 100, 50), 0.5), Color::Rgb(100, 50, 25));
    }

    #[test]
    fn test_fade_with_floor() {
        let white = Color::Rgb(250, 250, 250);
        assert_eq!(fade_with_floor(white, 0.0, 0.2), Color::Rgb(50, 50, 50));
        assert_eq!(fade_with_floor(white, 1.0, 0.2), white);
    }
}
