//! User-selectable display settings.

use std::time::Duration;

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Color palette for particles and links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTheme {
    #[default]
    Violet,
    Cyan,
    Emerald,
    Amber,
    Rose,
    Mono,
}

impl ColorTheme {
    /// All themes in cycling order.
    pub const ALL: [ColorTheme; 6] = [
        ColorTheme::Violet,
        ColorTheme::Cyan,
        ColorTheme::Emerald,
        ColorTheme::Amber,
        ColorTheme::Rose,
        ColorTheme::Mono,
    ];

    /// Get the next theme in the cycle.
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|&t| t == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Fill color for particle dots at full opacity.
    pub fn particle_color(self) -> Color {
        match self {
            ColorTheme::Violet => Color::Rgb(167, 139, 250),
            ColorTheme::Cyan => Color::Rgb(103, 232, 249),
            ColorTheme::Emerald => Color::Rgb(110, 231, 183),
            ColorTheme::Amber => Color::Rgb(252, 211, 77),
            ColorTheme::Rose => Color::Rgb(253, 164, 175),
            ColorTheme::Mono => Color::Rgb(229, 231, 235),
        }
    }

    /// Stroke color for links at full opacity.
    pub fn line_color(self) -> Color {
        match self {
            ColorTheme::Violet => Color::Rgb(139, 92, 246),
            ColorTheme::Cyan => Color::Rgb(6, 182, 212),
            ColorTheme::Emerald => Color::Rgb(16, 185, 129),
            ColorTheme::Amber => Color::Rgb(245, 158, 11),
            ColorTheme::Rose => Color::Rgb(244, 63, 94),
            ColorTheme::Mono => Color::Rgb(156, 163, 175),
        }
    }

    /// Display name for the help line.
    pub fn name(self) -> &'static str {
        match self {
            ColorTheme::Violet => "violet",
            ColorTheme::Cyan => "cyan",
            ColorTheme::Emerald => "emerald",
            ColorTheme::Amber => "amber",
            ColorTheme::Rose => "rose",
            ColorTheme::Mono => "mono",
        }
    }
}

/// Refresh rate of the animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationSpeed {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl AnimationSpeed {
    /// Get the next speed in the cycle.
    pub fn next(self) -> Self {
        match self {
            AnimationSpeed::Slow => AnimationSpeed::Normal,
            AnimationSpeed::Normal => AnimationSpeed::Fast,
            AnimationSpeed::Fast => AnimationSpeed::Slow,
        }
    }

    /// Time between two frames.
    pub fn frame_interval(self) -> Duration {
        match self {
            AnimationSpeed::Slow => Duration::from_millis(50),
            AnimationSpeed::Normal => Duration::from_millis(33),
            AnimationSpeed::Fast => Duration::from_millis(16),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AnimationSpeed::Slow => "slow",
            AnimationSpeed::Normal => "normal",
            AnimationSpeed::Fast => "fast",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Wrapper {
        theme: ColorTheme,
        speed: AnimationSpeed,
    }

    #[test]
    fn test_theme_cycle_wraps() {
        let mut theme = ColorTheme::default();
        for _ in 0..ColorTheme::ALL.len() {
            theme = theme.next();
        }
        assert_eq!(theme, ColorTheme::Violet);
        assert_eq!(ColorTheme::Mono.next(), ColorTheme::Violet);
    }

    #[test]
    fn test_speed_cycle() {
        assert_eq!(AnimationSpeed::Slow.next(), AnimationSpeed::Normal);
        assert_eq!(AnimationSpeed::Fast.next(), AnimationSpeed::Slow);
        assert!(AnimationSpeed::Fast.frame_interval() < AnimationSpeed::Slow.frame_interval());
    }

    #[test]
    fn test_serde_lowercase_names() {
        let parsed: Wrapper = toml::from_str("theme = \"emerald\"\nspeed = \"fast\"").unwrap();
        assert_eq!(parsed.theme, ColorTheme::Emerald);
        assert_eq!(parsed.speed, AnimationSpeed::Fast);
    }
}
