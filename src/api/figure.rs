use crate::core::Viewport;
use crate::error::{FigureError, FigureResult};

use super::axes::Axes;
use super::layout::{GridSlot, GridSpec};
use super::render_style::FigureStyle;
use super::validation::validate_figure_style;

/// Vertical anchor of the figure title as a fraction of the figure height.
pub const DEFAULT_TITLE_Y: f64 = 0.98;

/// Title centered above all panels.
#[derive(Debug, Clone, PartialEq)]
pub struct FigureTitle {
    pub text: String,
    /// `None` uses `FigureStyle::figure_title_size_pt`.
    pub size_pt: Option<f64>,
    pub bold: bool,
    /// Top edge of the text as a fraction of the figure height.
    pub y: f64,
}

/// A page of panels laid out on one grid.
///
/// Sizes are in inches; the pixel size follows from the render resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    width_in: f64,
    height_in: f64,
    style: FigureStyle,
    grid: GridSpec,
    title: Option<FigureTitle>,
    axes: Vec<Axes>,
}

impl Figure {
    #[must_use]
    pub fn new(width_in: f64, height_in: f64) -> Self {
        Self {
            width_in,
            height_in,
            style: FigureStyle::default(),
            grid: GridSpec::default(),
            title: None,
            axes: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_style(mut self, style: FigureStyle) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn with_grid(mut self, grid: GridSpec) -> Self {
        self.grid = grid;
        self
    }

    /// Bold title at the default height.
    #[must_use]
    pub fn with_title(mut self, text: impl Into<String>, size_pt: Option<f64>) -> Self {
        self.title = Some(FigureTitle {
            text: text.into(),
            size_pt,
            bold: true,
            y: DEFAULT_TITLE_Y,
        });
        self
    }

    #[must_use]
    pub fn with_title_y(mut self, y: f64) -> Self {
        if let Some(title) = &mut self.title {
            title.y = y;
        }
        self
    }

    #[must_use]
    pub fn with_regular_title(mut self) -> Self {
        if let Some(title) = &mut self.title {
            title.bold = false;
        }
        self
    }

    /// Adds a panel; it takes its color cycle from the figure style.
    pub fn add_subplot(&mut self, slot: GridSlot) -> &mut Axes {
        let axes = Axes::new(slot, self.style.palette.cycle());
        self.axes.push(axes);
        let last = self.axes.len() - 1;
        &mut self.axes[last]
    }

    #[must_use]
    pub fn width_in(&self) -> f64 {
        self.width_in
    }

    #[must_use]
    pub fn height_in(&self) -> f64 {
        self.height_in
    }

    #[must_use]
    pub fn style(&self) -> &FigureStyle {
        &self.style
    }

    #[must_use]
    pub fn grid(&self) -> &GridSpec {
        &self.grid
    }

    #[must_use]
    pub fn title(&self) -> Option<&FigureTitle> {
        self.title.as_ref()
    }

    #[must_use]
    pub fn axes(&self) -> &[Axes] {
        &self.axes
    }

    #[must_use]
    pub fn viewport(&self, dpi: f64) -> Viewport {
        Viewport::from_inches(self.width_in, self.height_in, dpi)
    }

    pub fn validate(&self) -> FigureResult<()> {
        if !(self.width_in.is_finite() && self.width_in > 0.0)
            || !(self.height_in.is_finite() && self.height_in > 0.0)
        {
            return Err(FigureError::InvalidConfig(format!(
                "figure size must be positive, got {} x {} in",
                self.width_in, self.height_in
            )));
        }
        validate_figure_style(&self.style)?;
        self.grid.validate()?;
        if let Some(title) = &self.title {
            if title.text.trim().is_empty() {
                return Err(FigureError::InvalidData("figure title must not be empty".to_owned()));
            }
            if !(0.0..=1.0).contains(&title.y) {
                return Err(FigureError::InvalidConfig(format!(
                    "figure title y must be within [0, 1], got {}",
                    title.y
                )));
            }
        }
        for axes in &self.axes {
            axes.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::artist::LineSpec;

    #[test]
    fn viewport_scales_with_dpi() {
        let figure = Figure::new(14.0, 8.0);
        let viewport = figure.viewport(100.0);
        assert_eq!((viewport.width, viewport.height), (1400, 800));
    }

    #[test]
    fn subplots_share_the_style_palette() {
        let mut figure = Figure::new(4.0, 3.0).with_grid(GridSpec::new(1, 2));
        figure
            .add_subplot(GridSlot::cell(0, 0))
            .plot(&[0.0, 1.0], &[1.0, 2.0], LineSpec::new());
        figure.add_subplot(GridSlot::cell(0, 1)).set_title("right");
        assert_eq!(figure.axes().len(), 2);
        assert!(figure.validate().is_ok());
    }

    #[test]
    fn rejects_bad_sizes_and_title_positions() {
        assert!(Figure::new(0.0, 3.0).validate().is_err());
        let figure = Figure::new(4.0, 3.0)
            .with_title("Overview", None)
            .with_title_y(1.5);
        assert!(figure.validate().is_err());
    }
}
