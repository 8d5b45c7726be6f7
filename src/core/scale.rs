use serde::{Deserialize, Serialize};

use crate::error::{FigureError, FigureResult};

/// Pixel interval an axis maps onto.
///
/// `start` receives the domain start and `end` the domain end, so a y axis
/// usually has `start > end` (pixel rows grow downwards).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelSpan {
    pub start: f64,
    pub end: f64,
}

impl PixelSpan {
    #[must_use]
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn length(self) -> f64 {
        (self.end - self.start).abs()
    }

    fn validate(self) -> FigureResult<()> {
        if !self.start.is_finite() || !self.end.is_finite() || self.start == self.end {
            return Err(FigureError::InvalidData(
                "pixel span must be finite and non-empty".to_owned(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
}

impl LinearScale {
    pub fn new(domain_start: f64, domain_end: f64) -> FigureResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(FigureError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    pub fn domain_to_pixel(self, value: f64, span: PixelSpan) -> FigureResult<f64> {
        span.validate()?;
        if !value.is_finite() {
            return Err(FigureError::InvalidData("value must be finite".to_owned()));
        }

        let normalized = (value - self.domain_start) / (self.domain_end - self.domain_start);
        Ok(span.start + normalized * (span.end - span.start))
    }

    pub fn pixel_to_domain(self, pixel: f64, span: PixelSpan) -> FigureResult<f64> {
        span.validate()?;
        if !pixel.is_finite() {
            return Err(FigureError::InvalidData("pixel must be finite".to_owned()));
        }

        let normalized = (pixel - span.start) / (span.end - span.start);
        Ok(self.domain_start + normalized * (self.domain_end - self.domain_start))
    }
}

/// Base-10 logarithmic scale. Both domain ends must be strictly positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogScale {
    linear: LinearScale,
}

impl LogScale {
    pub fn new(domain_start: f64, domain_end: f64) -> FigureResult<Self> {
        if !(domain_start > 0.0 && domain_end > 0.0) {
            return Err(FigureError::InvalidData(
                "log scale requires a domain > 0".to_owned(),
            ));
        }
        Ok(Self {
            linear: LinearScale::new(domain_start.log10(), domain_end.log10())?,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        let (start, end) = self.linear.domain();
        (10_f64.powf(start), 10_f64.powf(end))
    }

    pub fn domain_to_pixel(self, value: f64, span: PixelSpan) -> FigureResult<f64> {
        if !(value > 0.0) {
            return Err(FigureError::InvalidData(
                "log scale value must be > 0".to_owned(),
            ));
        }
        self.linear.domain_to_pixel(value.log10(), span)
    }

    pub fn pixel_to_domain(self, pixel: f64, span: PixelSpan) -> FigureResult<f64> {
        Ok(10_f64.powf(self.linear.pixel_to_domain(pixel, span)?))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ScaleKind {
    #[default]
    Linear,
    Log10,
}

/// Axis scale resolved at projection time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AxisScale {
    Linear(LinearScale),
    Log(LogScale),
}

impl AxisScale {
    pub fn new(kind: ScaleKind, domain_start: f64, domain_end: f64) -> FigureResult<Self> {
        match kind {
            ScaleKind::Linear => Ok(Self::Linear(LinearScale::new(domain_start, domain_end)?)),
            ScaleKind::Log10 => Ok(Self::Log(LogScale::new(domain_start, domain_end)?)),
        }
    }

    #[must_use]
    pub fn kind(self) -> ScaleKind {
        match self {
            Self::Linear(_) => ScaleKind::Linear,
            Self::Log(_) => ScaleKind::Log10,
        }
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        match self {
            Self::Linear(scale) => scale.domain(),
            Self::Log(scale) => scale.domain(),
        }
    }

    pub fn domain_to_pixel(self, value: f64, span: PixelSpan) -> FigureResult<f64> {
        match self {
            Self::Linear(scale) => scale.domain_to_pixel(value, span),
            Self::Log(scale) => scale.domain_to_pixel(value, span),
        }
    }

    pub fn pixel_to_domain(self, pixel: f64, span: PixelSpan) -> FigureResult<f64> {
        match self {
            Self::Linear(scale) => scale.pixel_to_domain(pixel, span),
            Self::Log(scale) => scale.pixel_to_domain(pixel, span),
        }
    }

    /// Whether `value` can be placed on this scale at all.
    #[must_use]
    pub fn accepts(self, value: f64) -> bool {
        match self {
            Self::Linear(_) => value.is_finite(),
            Self::Log(_) => value.is_finite() && value > 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AxisScale, LinearScale, LogScale, PixelSpan, ScaleKind};

    #[test]
    fn inverted_pixel_span_maps_domain_start_to_bottom() {
        let scale = LinearScale::new(-200.0, 0.0).expect("scale");
        let span = PixelSpan::new(500.0, 100.0);
        assert_eq!(scale.domain_to_pixel(-200.0, span).expect("bottom"), 500.0);
        assert_eq!(scale.domain_to_pixel(0.0, span).expect("top"), 100.0);
    }

    #[test]
    fn log_scale_places_decades_evenly() {
        let scale = LogScale::new(1e-3, 10.0).expect("scale");
        let span = PixelSpan::new(0.0, 400.0);
        let a = scale.domain_to_pixel(1e-2, span).expect("1e-2");
        let b = scale.domain_to_pixel(1e-1, span).expect("1e-1");
        let c = scale.domain_to_pixel(1.0, span).expect("1");
        assert!(((b - a) - (c - b)).abs() < 1e-9);
        assert!((a - 100.0).abs() < 1e-9);
    }

    #[test]
    fn log_scale_rejects_non_positive_values() {
        let scale = AxisScale::new(ScaleKind::Log10, 1.0, 100.0).expect("scale");
        assert!(!scale.accepts(0.0));
        assert!(
            scale
                .domain_to_pixel(-1.0, PixelSpan::new(0.0, 10.0))
                .is_err()
        );
        assert!(LogScale::new(0.0, 10.0).is_err());
    }
}
