use crate::core::PixelRect;
use crate::error::{FigureError, FigureResult};

/// Rows/columns of panels sharing a figure, with matplotlib-style spacing:
/// `hspace`/`wspace` are fractions of the average cell height/width.
#[derive(Debug, Clone, PartialEq)]
pub struct GridSpec {
    pub rows: usize,
    pub cols: usize,
    pub hspace: f64,
    pub wspace: f64,
    pub height_ratios: Option<Vec<f64>>,
    pub width_ratios: Option<Vec<f64>>,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

impl GridSpec {
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            hspace: 0.2,
            wspace: 0.2,
            height_ratios: None,
            width_ratios: None,
        }
    }

    #[must_use]
    pub fn with_spacing(mut self, hspace: f64, wspace: f64) -> Self {
        self.hspace = hspace;
        self.wspace = wspace;
        self
    }

    #[must_use]
    pub fn with_height_ratios(mut self, ratios: Vec<f64>) -> Self {
        self.height_ratios = Some(ratios);
        self
    }

    #[must_use]
    pub fn with_width_ratios(mut self, ratios: Vec<f64>) -> Self {
        self.width_ratios = Some(ratios);
        self
    }

    pub fn validate(&self) -> FigureResult<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(FigureError::InvalidConfig(
                "grid needs at least one row and one column".to_owned(),
            ));
        }
        let spacing_ok = |space: f64| space.is_finite() && space >= 0.0;
        if !spacing_ok(self.hspace) || !spacing_ok(self.wspace) {
            return Err(FigureError::InvalidConfig(
                "grid spacing must be finite and >= 0".to_owned(),
            ));
        }
        for (name, ratios, expected) in [
            ("height", &self.height_ratios, self.rows),
            ("width", &self.width_ratios, self.cols),
        ] {
            if let Some(ratios) = ratios {
                if ratios.len() != expected {
                    return Err(FigureError::InvalidConfig(format!(
                        "{name} ratios need {expected} entries, got {}",
                        ratios.len()
                    )));
                }
                if ratios.iter().any(|ratio| !ratio.is_finite() || *ratio <= 0.0) {
                    return Err(FigureError::InvalidConfig(format!(
                        "{name} ratios must be finite and > 0"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Pixel rectangle covered by `slot` when the grid fills `area`.
    pub fn cell_rect(&self, slot: GridSlot, area: PixelRect) -> FigureResult<PixelRect> {
        self.validate()?;
        slot.validate(self)?;

        let rows = track_bounds(
            area.height,
            self.rows,
            self.hspace,
            self.height_ratios.as_deref(),
        );
        let cols = track_bounds(
            area.width,
            self.cols,
            self.wspace,
            self.width_ratios.as_deref(),
        );
        let top = rows[slot.row].0;
        let bottom = rows[slot.row + slot.row_span - 1].1;
        let left = cols[slot.col].0;
        let right = cols[slot.col + slot.col_span - 1].1;

        Ok(PixelRect::new(
            area.x + left,
            area.y + top,
            right - left,
            bottom - top,
        ))
    }
}

/// `(start, end)` offsets of each track along one dimension.
fn track_bounds(total: f64, count: usize, space: f64, ratios: Option<&[f64]>) -> Vec<(f64, f64)> {
    let n = count as f64;
    let cell = total / (n + space * (n - 1.0));
    let separation = space * cell;
    let sizes: Vec<f64> = match ratios {
        Some(ratios) => {
            let sum: f64 = ratios.iter().sum();
            ratios.iter().map(|ratio| ratio * cell * n / sum).collect()
        }
        None => vec![cell; count],
    };

    let mut cursor = 0.0;
    sizes
        .into_iter()
        .map(|size| {
            let bounds = (cursor, cursor + size);
            cursor += size + separation;
            bounds
        })
        .collect()
}

/// Cell range occupied by one panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSlot {
    pub row: usize,
    pub col: usize,
    pub row_span: usize,
    pub col_span: usize,
}

impl GridSlot {
    #[must_use]
    pub const fn cell(row: usize, col: usize) -> Self {
        Self::span(row, col, 1, 1)
    }

    #[must_use]
    pub const fn span(row: usize, col: usize, row_span: usize, col_span: usize) -> Self {
        Self {
            row,
            col,
            row_span,
            col_span,
        }
    }

    fn validate(self, grid: &GridSpec) -> FigureResult<()> {
        if self.row_span == 0
            || self.col_span == 0
            || self.row + self.row_span > grid.rows
            || self.col + self.col_span > grid.cols
        {
            return Err(FigureError::InvalidConfig(format!(
                "slot rows {}..{} cols {}..{} outside a {}x{} grid",
                self.row,
                self.row + self.row_span,
                self.col,
                self.col + self.col_span,
                grid.rows,
                grid.cols
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AREA: PixelRect = PixelRect::new(0.0, 0.0, 1000.0, 800.0);

    #[test]
    fn spacing_is_a_fraction_of_the_mean_cell() {
        let grid = GridSpec::new(2, 2).with_spacing(0.25, 0.0);
        let top = grid.cell_rect(GridSlot::cell(0, 0), AREA).unwrap();
        let bottom = grid.cell_rect(GridSlot::cell(1, 1), AREA).unwrap();
        // 800 = 2h + 0.25h
        let h = 800.0 / 2.25;
        assert!((top.height - h).abs() < 1e-9);
        assert!((bottom.y - (h + 0.25 * h)).abs() < 1e-9);
        assert!((bottom.x - 500.0).abs() < 1e-9);
    }

    #[test]
    fn spans_cover_the_gap() {
        let grid = GridSpec::new(3, 2).with_spacing(0.45, 0.3);
        let wide = grid.cell_rect(GridSlot::span(2, 0, 1, 2), AREA).unwrap();
        assert!((wide.width - 1000.0).abs() < 1e-9);
        assert!((wide.bottom() - 800.0).abs() < 1e-9);
    }

    #[test]
    fn ratios_are_normalised() {
        let grid = GridSpec::new(2, 1)
            .with_spacing(0.0, 0.0)
            .with_height_ratios(vec![3.0, 1.0]);
        let first = grid.cell_rect(GridSlot::cell(0, 0), AREA).unwrap();
        assert!((first.height - 600.0).abs() < 1e-9);
    }

    #[test]
    fn out_of_range_slot_is_rejected() {
        let grid = GridSpec::new(2, 2);
        assert!(grid.cell_rect(GridSlot::span(1, 1, 2, 1), AREA).is_err());
        assert!(GridSpec::new(0, 1).validate().is_err());
    }
}
