//! Rendering of the candy bar.
//!
//! Rendering is a pure function of the progress value, the [`Theme`] and the
//! stripe phase. Nothing here reads or mutates animation state, so a bar can be
//! drawn at any value with [`render`] or inspected with [`layout`].
//!
//! Each row of the bar looks like this, with the caps and empty cells in the
//! track color and the filled cells shaded per row with lit stripe cells:
//!
//! ```text
//! ▐██████████████████░░░░░░░░▌
//! ```

use crate::stripes;
use crate::theme::Theme;
use lipgloss_extras::lipgloss::Style;

const LEFT_CAP: char = '▐';
const RIGHT_CAP: char = '▌';
const CELL: char = '█';

/// Geometry of one bar row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarLayout {
    /// Cells between the two caps.
    pub inner_width: usize,
    /// Cells covered by the bar.
    pub filled: usize,
    /// Cells of bare track.
    pub empty: usize,
    /// Number of rows.
    pub rows: usize,
}

/// Computes the bar geometry for a progress value.
///
/// Progress is clamped to 0-100 here; NaN draws an empty bar. Width and
/// height are limited to [`MAX_WIDTH`](crate::theme::MAX_WIDTH) and
/// [`MAX_HEIGHT`](crate::theme::MAX_HEIGHT).
pub fn layout(progress: f64, theme: &Theme) -> BarLayout {
    let inner_width = theme.drawn_width().saturating_sub(2);
    let percent = if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 100.0)
    };
    let filled = ((inner_width as f64) * percent / 100.0).round() as usize;
    let filled = filled.min(inner_width);

    BarLayout {
        inner_width,
        filled,
        empty: inner_width - filled,
        rows: theme.drawn_height(),
    }
}

/// Draws the bar as a styled string, one line per row.
pub fn render(progress: f64, theme: &Theme, phase: usize) -> String {
    let layout = layout(progress, theme);
    let track = Style::new().foreground(theme.track_color());
    let left_cap = track.render(&LEFT_CAP.to_string());
    let right_cap = track.render(&RIGHT_CAP.to_string());
    let empty = track.render(&CELL.to_string()).repeat(layout.empty);

    let colors = theme.row_colors();
    let mut lines = Vec::with_capacity(layout.rows);
    for (row, base) in colors.iter().cycle().take(layout.rows).enumerate() {
        let plain = Style::new().foreground(base.clone()).render(&CELL.to_string());
        let lit = Style::new()
            .foreground(theme.stripe_color(base))
            .render(&CELL.to_string());

        let mut line = String::new();
        line.push_str(&left_cap);
        for col in 0..layout.filled {
            if stripes::is_lit(row, col, phase) {
                line.push_str(&lit);
            } else {
                line.push_str(&plain);
            }
        }
        line.push_str(&empty);
        line.push_str(&right_cap);
        lines.push(line);
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(s: &str) -> String {
        strip_ansi_escapes::strip_str(s)
    }

    #[test]
    fn test_layout_percent_of_inner_width() {
        let theme = Theme {
            width: 102,
            ..Theme::default()
        };
        assert_eq!(layout(0.0, &theme).filled, 0);
        assert_eq!(layout(37.0, &theme).filled, 37);
        assert_eq!(layout(100.0, &theme).filled, 100);
        assert_eq!(layout(37.0, &theme).empty, 63);
    }

    #[test]
    fn test_layout_clamps_out_of_range() {
        let theme = Theme::default();
        let full = layout(250.0, &theme);
        assert_eq!(full.filled, full.inner_width);
        assert_eq!(full.empty, 0);

        assert_eq!(layout(-10.0, &theme).filled, 0);
        assert_eq!(layout(f64::NAN, &theme).filled, 0);
    }

    #[test]
    fn test_layout_degenerate_width() {
        let theme = Theme {
            width: 1,
            ..Theme::default()
        };
        let layout = layout(50.0, &theme);
        assert_eq!(layout.inner_width, 0);
        assert_eq!(layout.filled, 0);
    }

    #[test]
    fn test_render_width_and_caps() {
        let theme = Theme {
            width: 12,
            ..Theme::default()
        };
        let view = plain(&render(50.0, &theme, 0));
        assert_eq!(view.chars().count(), 12);
        assert!(view.starts_with(LEFT_CAP));
        assert!(view.ends_with(RIGHT_CAP));
    }

    #[test]
    fn test_render_one_line_per_row() {
        let theme = Theme {
            width: 10,
            height: 3,
            ..Theme::default()
        };
        let view = plain(&render(30.0, &theme, 1));
        let lines: Vec<&str> = view.lines().collect();
        assert_eq!(lines.len(), 3);
        for line in lines {
            assert_eq!(line.chars().count(), 10);
        }
    }

    #[test]
    fn test_stripe_phase_changes_styling_not_geometry() {
        let theme = Theme {
            width: 20,
            ..Theme::default()
        };
        let a = render(60.0, &theme, 0);
        let b = render(60.0, &theme, 1);
        assert_eq!(plain(&a), plain(&b));
    }

    #[test]
    fn test_blank_colors_render_every_row() {
        let attrs = crate::attributes::parse(
            r#"style="--candy-progress-color: ; --candy-progress-secondary-color: ; --candy-progress-height: 3""#,
        )
        .unwrap();
        let theme = attrs.theme().unwrap();
        let view = plain(&render(50.0, &theme, 0));
        assert_eq!(view.lines().count(), 3);
    }

    #[test]
    fn test_oversized_theme_is_clamped() {
        let attrs = crate::attributes::parse(
            r#"style="--candy-progress-width: 10000000000; --candy-progress-height: 10000000""#,
        )
        .unwrap();
        let theme = attrs.theme().unwrap();

        let bar = layout(50.0, &theme);
        assert_eq!(bar.inner_width, crate::theme::MAX_WIDTH - 2);
        assert_eq!(bar.rows, crate::theme::MAX_HEIGHT);

        let view = plain(&render(50.0, &theme, 0));
        assert_eq!(view.lines().count(), crate::theme::MAX_HEIGHT);
        for line in view.lines() {
            assert_eq!(line.chars().count(), crate::theme::MAX_WIDTH);
        }
    }

    #[test]
    fn test_render_is_pure() {
        let theme = Theme::default();
        assert_eq!(render(42.0, &theme, 2), render(42.0, &theme, 2));
    }
}
