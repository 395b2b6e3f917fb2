//! Colors and dimensions of the candy bar.
//!
//! A [`Theme`] carries the four theming inputs of the widget: the primary and
//! secondary bar colors and the bar's width and height in terminal cells. The
//! filled bar is shaded top to bottom from the primary to the secondary color.
//!
//! A handful of named palettes are available through [`Theme::palette`], which
//! is how the `class` attribute of an element selects its colors.

use lipgloss_extras::lipgloss::blending::blend_1d;
use lipgloss_extras::lipgloss::Color;
use once_cell::sync::Lazy;

/// Default bar width in cells, including the rounded caps.
pub const DEFAULT_WIDTH: usize = 40;

/// Default bar height in rows.
pub const DEFAULT_HEIGHT: usize = 1;

/// Widest bar drawn, in cells. Wider themes are clamped.
pub const MAX_WIDTH: usize = 480;

/// Tallest bar drawn, in rows. Taller themes are clamped.
pub const MAX_HEIGHT: usize = 32;

/// Color of the empty track.
pub const TRACK_COLOR: &str = "#dddddd";

// Share of white mixed into a stripe cell, in steps of 1/STRIPE_STEPS.
const STRIPE_STEPS: usize = 6;

/// Named palettes as `(name, primary, secondary)`.
pub static PALETTES: Lazy<Vec<(&'static str, &'static str, &'static str)>> = Lazy::new(|| {
    vec![
        ("orange", "#ff9a00", "#ff5e00"),
        ("blue", "#3d9bff", "#1e4fd8"),
        ("green", "#7bd74d", "#2f9e2f"),
        ("red", "#ff5a5a", "#c21a1a"),
        ("purple", "#b57bff", "#6d2fd8"),
    ]
});

/// Visual customization of the bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Top color of the bar.
    pub color: String,
    /// Bottom color of the bar.
    pub secondary_color: String,
    /// Total width in cells, caps included.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            color: "#ff9a00".to_string(),
            secondary_color: "#ff5e00".to_string(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

impl Theme {
    /// Returns the default theme recolored with a named palette.
    pub fn palette(name: &str) -> Option<Self> {
        PALETTES
            .iter()
            .find(|(palette, _, _)| palette.eq_ignore_ascii_case(name))
            .map(|(_, color, secondary)| Self {
                color: color.to_string(),
                secondary_color: secondary.to_string(),
                ..Self::default()
            })
    }

    /// Sets both bar colors.
    pub fn with_colors(mut self, color: impl Into<String>, secondary: impl Into<String>) -> Self {
        self.color = color.into();
        self.secondary_color = secondary.into();
        self
    }

    /// Width actually drawn, at most [`MAX_WIDTH`].
    pub fn drawn_width(&self) -> usize {
        self.width.min(MAX_WIDTH)
    }

    /// Rows actually drawn, between 1 and [`MAX_HEIGHT`].
    pub fn drawn_height(&self) -> usize {
        self.height.clamp(1, MAX_HEIGHT)
    }

    /// Bar color for each drawn row, blended from the primary to the
    /// secondary color. Blank colors fall back to the default palette.
    pub fn row_colors(&self) -> Vec<Color> {
        let defaults = Self::default();
        let rows = self.drawn_height();
        let start = Color::from(non_blank(&self.color, &defaults.color));
        if rows == 1 {
            return vec![start];
        }
        let end = Color::from(non_blank(&self.secondary_color, &defaults.secondary_color));
        let colors = blend_1d(rows, vec![start.clone(), end]);
        if colors.len() == rows {
            colors
        } else {
            vec![start; rows]
        }
    }

    /// The lighter shade drawn on stripe cells for a given bar color.
    pub fn stripe_color(&self, base: &Color) -> Color {
        let white = Color::from("#ffffff");
        let shades = blend_1d(STRIPE_STEPS, vec![base.clone(), white]);
        shades.get(1).cloned().unwrap_or_else(|| base.clone())
    }

    /// Color of the empty track.
    pub fn track_color(&self) -> Color {
        Color::from(TRACK_COLOR)
    }
}

fn non_blank<'a>(color: &'a str, fallback: &'a str) -> &'a str {
    if color.trim().is_empty() {
        fallback
    } else {
        color
    }
}
