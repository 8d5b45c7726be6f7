//! Per-script style presets.
//!
//! Each manuscript script set its own global plotting defaults; here they are
//! plain values handed to `Figure::with_style`.

use crate::api::FigureStyle;
use crate::render::{LineStrokeStyle, Palette};

/// Whitegrid look shared by the biomimetic strategy figure.
#[must_use]
pub fn whitegrid_viridis() -> FigureStyle {
    FigureStyle::default()
        .with_font_sizes(10.0, 11.0, 12.0, 10.0)
        .with_legend_font_size(9.0)
        .with_figure_title_size(14.0)
        .with_line_width(2.0)
        .with_grid(0.4, LineStrokeStyle::Solid)
        .with_palette(Palette::Viridis)
}

/// Larger titles and dotted grid of the detectability figure.
#[must_use]
pub fn dotted_grid_viridis() -> FigureStyle {
    FigureStyle::default()
        .with_font_sizes(10.0, 11.0, 13.0, 10.0)
        .with_legend_font_size(8.0)
        .with_figure_title_size(16.0)
        .with_line_width(2.0)
        .with_grid(0.7, LineStrokeStyle::Dotted)
        .with_palette(Palette::Viridis)
}

#[must_use]
pub fn whitegrid_husl() -> FigureStyle {
    whitegrid_viridis()
        .with_grid(0.5, LineStrokeStyle::Solid)
        .with_palette(Palette::Husl)
}

#[must_use]
pub fn dotted_grid_muted() -> FigureStyle {
    whitegrid_viridis()
        .with_grid(0.6, LineStrokeStyle::Dotted)
        .with_palette(Palette::Muted)
}

/// Gridless style of the schlieren principle figures.
#[must_use]
pub fn plain_muted() -> FigureStyle {
    FigureStyle::default()
        .with_font_sizes(10.0, 11.0, 12.0, 9.0)
        .with_legend_font_size(9.0)
        .with_figure_title_size(14.0)
        .with_line_width(1.5)
        .with_palette(Palette::Muted)
}

#[must_use]
pub fn plain_pastel() -> FigureStyle {
    plain_muted().with_palette(Palette::Pastel)
}

/// Library defaults with a larger figure title.
#[must_use]
pub fn library_defaults() -> FigureStyle {
    FigureStyle::default().with_figure_title_size(16.0)
}

/// Publication style of the method diagrams and the overview.
#[must_use]
pub fn publication() -> FigureStyle {
    FigureStyle::default()
        .with_font_sizes(10.0, 11.0, 12.0, 9.0)
        .with_legend_font_size(9.0)
        .with_figure_title_size(14.0)
        .with_line_width(1.5)
        .with_axes_line_width(1.2)
        .with_palette(Palette::Tab10)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_differ_where_the_scripts_did() {
        assert!(whitegrid_viridis().grid.visible);
        assert!(!plain_muted().grid.visible);
        assert_eq!(dotted_grid_viridis().grid.style, LineStrokeStyle::Dotted);
        assert_eq!(plain_pastel().palette, Palette::Pastel);
        assert!((publication().axes_line_width_pt - 1.2).abs() < 1e-12);
    }
}
