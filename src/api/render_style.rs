use serde::{Deserialize, Serialize};

use crate::render::colors::GRID_GRAY;
use crate::render::{Color, LineStrokeStyle, Palette};

/// Grid line defaults applied to every axes that does not override them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridStyle {
    pub visible: bool,
    pub color: Color,
    pub alpha: f64,
    pub style: LineStrokeStyle,
    pub width_pt: f64,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            visible: false,
            color: GRID_GRAY,
            alpha: 1.0,
            style: LineStrokeStyle::Solid,
            width_pt: 0.8,
        }
    }
}

/// Figure-wide typography and stroke defaults.
///
/// Sizes are in points; the engine converts them with the render resolution
/// (`px = pt * dpi / 72`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FigureStyle {
    /// Size of free text placed with `Axes::text`.
    pub font_size_pt: f64,
    pub label_size_pt: f64,
    pub title_size_pt: f64,
    pub tick_label_size_pt: f64,
    pub legend_font_size_pt: f64,
    pub figure_title_size_pt: f64,
    pub line_width_pt: f64,
    pub axes_line_width_pt: f64,
    pub tick_length_pt: f64,
    pub marker_size_pt: f64,
    pub grid: GridStyle,
    pub palette: Palette,
    pub background: Color,
    pub axes_face: Color,
}

impl Default for FigureStyle {
    fn default() -> Self {
        Self {
            font_size_pt: 10.0,
            label_size_pt: 10.0,
            title_size_pt: 12.0,
            tick_label_size_pt: 10.0,
            legend_font_size_pt: 10.0,
            figure_title_size_pt: 12.0,
            line_width_pt: 1.5,
            axes_line_width_pt: 0.8,
            tick_length_pt: 3.5,
            marker_size_pt: 6.0,
            grid: GridStyle::default(),
            palette: Palette::default(),
            background: Color::WHITE,
            axes_face: Color::WHITE,
        }
    }
}

impl FigureStyle {
    #[must_use]
    pub fn with_font_sizes(mut self, base: f64, label: f64, title: f64, tick: f64) -> Self {
        self.font_size_pt = base;
        self.label_size_pt = label;
        self.title_size_pt = title;
        self.tick_label_size_pt = tick;
        self
    }

    #[must_use]
    pub fn with_legend_font_size(mut self, size_pt: f64) -> Self {
        self.legend_font_size_pt = size_pt;
        self
    }

    #[must_use]
    pub fn with_figure_title_size(mut self, size_pt: f64) -> Self {
        self.figure_title_size_pt = size_pt;
        self
    }

    #[must_use]
    pub fn with_line_width(mut self, width_pt: f64) -> Self {
        self.line_width_pt = width_pt;
        self
    }

    #[must_use]
    pub fn with_axes_line_width(mut self, width_pt: f64) -> Self {
        self.axes_line_width_pt = width_pt;
        self
    }

    /// Turns default grid lines on with the given alpha and dash style.
    #[must_use]
    pub fn with_grid(mut self, alpha: f64, style: LineStrokeStyle) -> Self {
        self.grid.visible = true;
        self.grid.alpha = alpha;
        self.grid.style = style;
        self
    }

    #[must_use]
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }
}
