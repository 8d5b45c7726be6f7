use crate::error::{FigureError, FigureResult};

use super::render_style::{FigureStyle, GridStyle};

pub(super) fn validate_figure_style(style: &FigureStyle) -> FigureResult<()> {
    for (name, value) in [
        ("font_size_pt", style.font_size_pt),
        ("label_size_pt", style.label_size_pt),
        ("title_size_pt", style.title_size_pt),
        ("tick_label_size_pt", style.tick_label_size_pt),
        ("legend_font_size_pt", style.legend_font_size_pt),
        ("figure_title_size_pt", style.figure_title_size_pt),
        ("line_width_pt", style.line_width_pt),
        ("axes_line_width_pt", style.axes_line_width_pt),
        ("marker_size_pt", style.marker_size_pt),
    ] {
        if !value.is_finite() || value <= 0.0 {
            return Err(FigureError::InvalidConfig(format!(
                "style {name} must be finite and > 0, got {value}"
            )));
        }
    }
    if !style.tick_length_pt.is_finite() || style.tick_length_pt < 0.0 {
        return Err(FigureError::InvalidConfig(
            "style tick_length_pt must be finite and >= 0".to_owned(),
        ));
    }
    style.background.validate()?;
    style.axes_face.validate()?;
    validate_grid_style(style.grid)
}

fn validate_grid_style(grid: GridStyle) -> FigureResult<()> {
    if !(0.0..=1.0).contains(&grid.alpha) {
        return Err(FigureError::InvalidConfig(format!(
            "grid alpha must be within [0, 1], got {}",
            grid.alpha
        )));
    }
    if !grid.width_pt.is_finite() || grid.width_pt <= 0.0 {
        return Err(FigureError::InvalidConfig(
            "grid width_pt must be finite and > 0".to_owned(),
        ));
    }
    grid.color.validate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::LineStrokeStyle;

    #[test]
    fn default_style_is_valid() {
        assert!(validate_figure_style(&FigureStyle::default()).is_ok());
    }

    #[test]
    fn rejects_non_positive_sizes_and_grid_alpha() {
        let mut style = FigureStyle::default();
        style.label_size_pt = 0.0;
        assert!(validate_figure_style(&style).is_err());

        let style = FigureStyle::default().with_grid(1.5, LineStrokeStyle::Dotted);
        assert!(validate_figure_style(&style).is_err());
    }
}
