use crate::core::{AxisScale, PixelRect, PixelSpan, ScaleKind};
use crate::error::FigureResult;

use super::artist::Coords;

/// Resolved limits of one axis, `lo < hi` in data order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct AxisLimits {
    pub lo: f64,
    pub hi: f64,
    pub scale: ScaleKind,
    pub inverted: bool,
}

impl AxisLimits {
    pub fn span(self) -> f64 {
        match self.scale {
            ScaleKind::Linear => self.hi - self.lo,
            ScaleKind::Log10 => self.hi.log10() - self.lo.log10(),
        }
    }

    fn axis_scale(self) -> FigureResult<AxisScale> {
        if self.inverted {
            AxisScale::new(self.scale, self.hi, self.lo)
        } else {
            AxisScale::new(self.scale, self.lo, self.hi)
        }
    }
}

/// Data, axes-fraction and pixel coordinates of one plot box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct PanelTransform {
    pub plot: PixelRect,
    x: AxisScale,
    y: AxisScale,
}

impl PanelTransform {
    pub fn new(plot: PixelRect, x: AxisLimits, y: AxisLimits) -> FigureResult<Self> {
        Ok(Self {
            plot,
            x: x.axis_scale()?,
            y: y.axis_scale()?,
        })
    }

    fn x_span(&self) -> PixelSpan {
        PixelSpan::new(self.plot.x, self.plot.right())
    }

    fn y_span(&self) -> PixelSpan {
        PixelSpan::new(self.plot.bottom(), self.plot.y)
    }

    /// `None` when the value cannot be placed (non-finite, or <= 0 on log).
    pub fn x_to_px(&self, x: f64) -> Option<f64> {
        if !self.x.accepts(x) {
            return None;
        }
        self.x.domain_to_pixel(x, self.x_span()).ok()
    }

    pub fn y_to_px(&self, y: f64) -> Option<f64> {
        if !self.y.accepts(y) {
            return None;
        }
        self.y.domain_to_pixel(y, self.y_span()).ok()
    }

    pub fn data_to_px(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        Some((self.x_to_px(x)?, self.y_to_px(y)?))
    }

    /// `(0, 0)` is the lower-left plot corner.
    pub fn axes_to_px(&self, fx: f64, fy: f64) -> (f64, f64) {
        (
            self.plot.x + fx * self.plot.width,
            self.plot.bottom() - fy * self.plot.height,
        )
    }

    pub fn to_px(&self, coords: Coords, x: f64, y: f64) -> Option<(f64, f64)> {
        match coords {
            Coords::Data => self.data_to_px(x, y),
            Coords::Axes if x.is_finite() && y.is_finite() => Some(self.axes_to_px(x, y)),
            Coords::Axes => None,
        }
    }

    /// Pixels per data unit along x and y; only meaningful on linear axes.
    pub fn linear_density(&self, coords: Coords) -> (f64, f64) {
        match coords {
            Coords::Axes => (self.plot.width, self.plot.height),
            Coords::Data => {
                let (x0, x1) = self.x.domain();
                let (y0, y1) = self.y.domain();
                let per = |length: f64, a: f64, b: f64, kind: ScaleKind| match kind {
                    ScaleKind::Linear => length / (b - a).abs(),
                    ScaleKind::Log10 => length / (b.log10() - a.log10()).abs(),
                };
                (
                    per(self.plot.width, x0, x1, self.x.kind()),
                    per(self.plot.height, y0, y1, self.y.kind()),
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits(lo: f64, hi: f64) -> AxisLimits {
        AxisLimits {
            lo,
            hi,
            scale: ScaleKind::Linear,
            inverted: false,
        }
    }

    #[test]
    fn y_grows_upwards_unless_inverted() {
        let plot = PixelRect::new(10.0, 20.0, 100.0, 200.0);
        let upright = PanelTransform::new(plot, limits(0.0, 1.0), limits(0.0, 1.0)).unwrap();
        assert_eq!(upright.data_to_px(0.0, 0.0), Some((10.0, 220.0)));
        assert_eq!(upright.data_to_px(1.0, 1.0), Some((110.0, 20.0)));

        let mut depth = limits(0.0, 100.0);
        depth.inverted = true;
        let inverted = PanelTransform::new(plot, limits(0.0, 1.0), depth).unwrap();
        assert_eq!(inverted.y_to_px(0.0), Some(20.0));
        assert_eq!(inverted.axes_to_px(0.0, 0.0), (10.0, 220.0));
    }

    #[test]
    fn log_axis_rejects_non_positive_values() {
        let plot = PixelRect::new(0.0, 0.0, 300.0, 100.0);
        let x = AxisLimits {
            lo: 1.0,
            hi: 1000.0,
            scale: ScaleKind::Log10,
            inverted: false,
        };
        let transform = PanelTransform::new(plot, x, limits(0.0, 1.0)).unwrap();
        assert_eq!(transform.x_to_px(0.0), None);
        let ten = transform.x_to_px(10.0).unwrap();
        assert!((ten - 100.0).abs() < 1e-9);
        assert!((transform.linear_density(Coords::Data).0 - 100.0).abs() < 1e-9);
    }
}
