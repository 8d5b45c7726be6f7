use serde::{Deserialize, Serialize};

use crate::core::PixelRect;
use crate::error::{FigureError, FigureResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Opaque color from a `0xRRGGBB` literal.
    #[must_use]
    pub const fn from_hex(rgb: u32) -> Self {
        Self::rgb(
            ((rgb >> 16) & 0xff) as f64 / 255.0,
            ((rgb >> 8) & 0xff) as f64 / 255.0,
            (rgb & 0xff) as f64 / 255.0,
        )
    }

    #[must_use]
    pub const fn with_alpha(self, alpha: f64) -> Self {
        Self::rgba(self.red, self.green, self.blue, alpha)
    }

    /// Scales the existing alpha, as an artist-level `alpha` does.
    #[must_use]
    pub fn fade(self, alpha: f64) -> Self {
        self.with_alpha(self.alpha * alpha)
    }

    #[must_use]
    pub fn is_visible(self) -> bool {
        self.alpha > 0.0
    }

    /// Linear interpolation in RGBA space, `t` clamped to `[0, 1]`.
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let t = if t.is_finite() {
            t.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self::rgba(
            self.red + (other.red - self.red) * t,
            self.green + (other.green - self.green) * t,
            self.blue + (other.blue - self.blue) * t,
            self.alpha + (other.alpha - self.alpha) * t,
        )
    }

    pub fn validate(self) -> FigureResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(FigureError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LineStrokeStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
    DashDot,
}

impl LineStrokeStyle {
    /// Dash lengths in pixels for a stroke of the given width.
    #[must_use]
    pub fn dash_pattern(self, stroke_width: f64) -> Vec<f64> {
        let w = stroke_width.max(1.0);
        match self {
            Self::Solid => Vec::new(),
            Self::Dashed => vec![3.7 * w, 1.6 * w],
            Self::Dotted => vec![w, 1.65 * w],
            Self::DashDot => vec![6.4 * w, 1.6 * w, w, 1.6 * w],
        }
    }
}

/// Stroke parameters shared by every outlined primitive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
    pub style: LineStrokeStyle,
}

impl Stroke {
    #[must_use]
    pub const fn new(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            style: LineStrokeStyle::Solid,
        }
    }

    #[must_use]
    pub const fn with_style(mut self, style: LineStrokeStyle) -> Self {
        self.style = style;
        self
    }

    /// A stroke that draws nothing.
    #[must_use]
    pub fn is_visible(self) -> bool {
        self.width > 0.0 && self.color.is_visible()
    }

    fn validate(self) -> FigureResult<()> {
        if !self.width.is_finite() || self.width < 0.0 {
            return Err(FigureError::InvalidData(
                "stroke width must be finite and >= 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

fn validate_points(kind: &str, points: &[(f64, f64)], min_len: usize) -> FigureResult<()> {
    if points.len() < min_len {
        return Err(FigureError::InvalidData(format!(
            "{kind} needs at least {min_len} points"
        )));
    }
    if points.iter().any(|(x, y)| !x.is_finite() || !y.is_finite()) {
        return Err(FigureError::InvalidData(format!(
            "{kind} coordinates must be finite"
        )));
    }
    Ok(())
}

/// Draw command for one line segment in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinePrimitive {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke_width: f64,
    pub color: Color,
    pub style: LineStrokeStyle,
}

impl LinePrimitive {
    #[must_use]
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64, stroke_width: f64, color: Color) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            stroke_width,
            color,
            style: LineStrokeStyle::Solid,
        }
    }

    #[must_use]
    pub const fn with_style(mut self, style: LineStrokeStyle) -> Self {
        self.style = style;
        self
    }

    pub fn validate(self) -> FigureResult<()> {
        if !self.x1.is_finite()
            || !self.y1.is_finite()
            || !self.x2.is_finite()
            || !self.y2.is_finite()
        {
            return Err(FigureError::InvalidData(
                "line coordinates must be finite".to_owned(),
            ));
        }
        if !self.stroke_width.is_finite() || self.stroke_width <= 0.0 {
            return Err(FigureError::InvalidData(
                "line stroke width must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// Connected open path in pixel space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolylinePrimitive {
    pub points: Vec<(f64, f64)>,
    pub stroke: Stroke,
}

impl PolylinePrimitive {
    #[must_use]
    pub fn new(points: Vec<(f64, f64)>, stroke: Stroke) -> Self {
        Self { points, stroke }
    }

    pub fn validate(&self) -> FigureResult<()> {
        validate_points("polyline", &self.points, 2)?;
        if self.stroke.width <= 0.0 {
            return Err(FigureError::InvalidData(
                "polyline stroke width must be > 0".to_owned(),
            ));
        }
        self.stroke.validate()
    }
}

/// Filled and/or outlined rectangle in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectPrimitive {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill_color: Color,
    pub border: Stroke,
    pub corner_radius: f64,
}

impl RectPrimitive {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64, fill_color: Color) -> Self {
        Self {
            x,
            y,
            width,
            height,
            fill_color,
            border: Stroke::new(Color::TRANSPARENT, 0.0),
            corner_radius: 0.0,
        }
    }

    #[must_use]
    pub fn from_rect(rect: PixelRect, fill_color: Color) -> Self {
        Self::new(rect.x, rect.y, rect.width, rect.height, fill_color)
    }

    #[must_use]
    pub const fn with_border(mut self, border: Stroke) -> Self {
        self.border = border;
        self
    }

    #[must_use]
    pub const fn with_corner_radius(mut self, corner_radius: f64) -> Self {
        self.corner_radius = corner_radius;
        self
    }

    pub fn validate(self) -> FigureResult<()> {
        if !self.x.is_finite()
            || !self.y.is_finite()
            || !self.width.is_finite()
            || !self.height.is_finite()
        {
            return Err(FigureError::InvalidData(
                "rect geometry must be finite".to_owned(),
            ));
        }
        if self.width < 0.0 || self.height < 0.0 {
            return Err(FigureError::InvalidData(
                "rect size must be >= 0".to_owned(),
            ));
        }
        if !self.corner_radius.is_finite() || self.corner_radius < 0.0 {
            return Err(FigureError::InvalidData(
                "rect corner radius must be finite and >= 0".to_owned(),
            ));
        }
        self.fill_color.validate()?;
        self.border.validate()
    }
}

/// Closed polygon; used for patches, arrows and filled areas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonPrimitive {
    pub points: Vec<(f64, f64)>,
    pub fill_color: Color,
    pub border: Stroke,
}

impl PolygonPrimitive {
    #[must_use]
    pub fn new(points: Vec<(f64, f64)>, fill_color: Color) -> Self {
        Self {
            points,
            fill_color,
            border: Stroke::new(Color::TRANSPARENT, 0.0),
        }
    }

    #[must_use]
    pub fn with_border(mut self, border: Stroke) -> Self {
        self.border = border;
        self
    }

    pub fn validate(&self) -> FigureResult<()> {
        validate_points("polygon", &self.points, 3)?;
        self.fill_color.validate()?;
        self.border.validate()
    }
}

/// Ellipse centred at `(cx, cy)` with radii in pixels, rotated by `rotation_rad`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EllipsePrimitive {
    pub cx: f64,
    pub cy: f64,
    pub rx: f64,
    pub ry: f64,
    pub rotation_rad: f64,
    pub fill_color: Color,
    pub border: Stroke,
}

impl EllipsePrimitive {
    #[must_use]
    pub const fn new(cx: f64, cy: f64, rx: f64, ry: f64, fill_color: Color) -> Self {
        Self {
            cx,
            cy,
            rx,
            ry,
            rotation_rad: 0.0,
            fill_color,
            border: Stroke::new(Color::TRANSPARENT, 0.0),
        }
    }

    #[must_use]
    pub const fn with_border(mut self, border: Stroke) -> Self {
        self.border = border;
        self
    }

    pub fn validate(self) -> FigureResult<()> {
        if ![self.cx, self.cy, self.rx, self.ry, self.rotation_rad]
            .iter()
            .all(|v| v.is_finite())
        {
            return Err(FigureError::InvalidData(
                "ellipse geometry must be finite".to_owned(),
            ));
        }
        if self.rx <= 0.0 || self.ry <= 0.0 {
            return Err(FigureError::InvalidData(
                "ellipse radii must be > 0".to_owned(),
            ));
        }
        self.fill_color.validate()?;
        self.border.validate()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MarkerShape {
    #[default]
    Circle,
    Square,
    Triangle,
    Diamond,
    Star,
}

impl MarkerShape {
    /// Outline vertices around the origin for a marker of unit diameter.
    #[must_use]
    pub fn unit_outline(self) -> Vec<(f64, f64)> {
        use std::f64::consts::{FRAC_PI_2, PI};
        match self {
            Self::Circle => (0..24)
                .map(|i| {
                    let a = f64::from(i) * PI / 12.0;
                    (0.5 * a.cos(), 0.5 * a.sin())
                })
                .collect(),
            Self::Square => vec![(-0.5, -0.5), (0.5, -0.5), (0.5, 0.5), (-0.5, 0.5)],
            Self::Triangle => vec![(0.0, -0.5), (0.5, 0.5), (-0.5, 0.5)],
            Self::Diamond => vec![(0.0, -0.5), (0.5, 0.0), (0.0, 0.5), (-0.5, 0.0)],
            Self::Star => (0..10)
                .map(|i| {
                    let radius = if i % 2 == 0 { 0.5 } else { 0.5 * 0.381_966 };
                    let a = -FRAC_PI_2 + f64::from(i) * PI / 5.0;
                    (radius * a.cos(), radius * a.sin())
                })
                .collect(),
        }
    }
}

/// One scatter/line marker; `size` is the nominal diameter in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerPrimitive {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub shape: MarkerShape,
    pub fill_color: Color,
    pub edge: Stroke,
}

impl MarkerPrimitive {
    #[must_use]
    pub const fn new(x: f64, y: f64, size: f64, shape: MarkerShape, fill_color: Color) -> Self {
        Self {
            x,
            y,
            size,
            shape,
            fill_color,
            edge: Stroke::new(Color::TRANSPARENT, 0.0),
        }
    }

    #[must_use]
    pub const fn with_edge(mut self, edge: Stroke) -> Self {
        self.edge = edge;
        self
    }

    pub fn validate(self) -> FigureResult<()> {
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(FigureError::InvalidData(
                "marker coordinates must be finite".to_owned(),
            ));
        }
        if !self.size.is_finite() || self.size <= 0.0 {
            return Err(FigureError::InvalidData(
                "marker size must be finite and > 0".to_owned(),
            ));
        }
        self.fill_color.validate()?;
        self.edge.validate()
    }
}

/// Horizontal text alignment relative to `TextPrimitive::x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextHAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Vertical text alignment relative to `TextPrimitive::y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextVAlign {
    Top,
    Center,
    #[default]
    Baseline,
    Bottom,
}

/// Background box drawn behind a text block.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextBox {
    pub fill_color: Color,
    pub border: Stroke,
    pub padding_px: f64,
    pub rounded: bool,
}

/// Draw command for one (possibly multi-line) label in pixel space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextPrimitive {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size_px: f64,
    pub color: Color,
    pub h_align: TextHAlign,
    pub v_align: TextVAlign,
    pub bold: bool,
    pub italic: bool,
    /// Counter-clockwise rotation around the anchor, in degrees.
    pub rotation_deg: f64,
    pub background: Option<TextBox>,
}

impl TextPrimitive {
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        x: f64,
        y: f64,
        font_size_px: f64,
        color: Color,
        h_align: TextHAlign,
    ) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font_size_px,
            color,
            h_align,
            v_align: TextVAlign::Baseline,
            bold: false,
            italic: false,
            rotation_deg: 0.0,
            background: None,
        }
    }

    #[must_use]
    pub fn with_v_align(mut self, v_align: TextVAlign) -> Self {
        self.v_align = v_align;
        self
    }

    #[must_use]
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    #[must_use]
    pub fn with_rotation(mut self, rotation_deg: f64) -> Self {
        self.rotation_deg = rotation_deg;
        self
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.text.lines().count().max(1)
    }

    pub fn validate(&self) -> FigureResult<()> {
        if self.text.trim().is_empty() {
            return Err(FigureError::InvalidData(
                "text primitive must not be empty".to_owned(),
            ));
        }
        if !self.x.is_finite() || !self.y.is_finite() || !self.rotation_deg.is_finite() {
            return Err(FigureError::InvalidData(
                "text coordinates must be finite".to_owned(),
            ));
        }
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(FigureError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        if let Some(background) = self.background {
            background.fill_color.validate()?;
            background.border.validate()?;
        }
        self.color.validate()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ImageInterpolation {
    #[default]
    Nearest,
    Bilinear,
}

/// Raster of colors stretched over a pixel rectangle. Row 0 is the top row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImagePrimitive {
    pub target: PixelRect,
    pub columns: usize,
    pub rows: usize,
    pub pixels: Vec<Color>,
    pub interpolation: ImageInterpolation,
}

impl ImagePrimitive {
    #[must_use]
    pub fn new(target: PixelRect, columns: usize, rows: usize, pixels: Vec<Color>) -> Self {
        Self {
            target,
            columns,
            rows,
            pixels,
            interpolation: ImageInterpolation::Nearest,
        }
    }

    #[must_use]
    pub fn with_interpolation(mut self, interpolation: ImageInterpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    pub fn validate(&self) -> FigureResult<()> {
        if self.columns == 0 || self.rows == 0 {
            return Err(FigureError::InvalidData(
                "image must have at least one pixel".to_owned(),
            ));
        }
        if self.pixels.len() != self.columns * self.rows {
            return Err(FigureError::InvalidData(format!(
                "image expects {} pixels, got {}",
                self.columns * self.rows,
                self.pixels.len()
            )));
        }
        if !self.target.is_valid() {
            return Err(FigureError::InvalidData(
                "image target rect must be finite with size > 0".to_owned(),
            ));
        }
        for pixel in &self.pixels {
            pixel.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Color, MarkerShape, TextHAlign, TextPrimitive};

    #[test]
    fn hex_colors_are_normalized() {
        let crimson = Color::from_hex(0xdc143c);
        assert!((crimson.red - 220.0 / 255.0).abs() < 1e-12);
        assert!((crimson.blue - 60.0 / 255.0).abs() < 1e-12);
        assert_eq!(crimson.alpha, 1.0);
        assert!(crimson.fade(0.5).validate().is_ok());
        assert!(Color::rgba(1.2, 0.0, 0.0, 1.0).validate().is_err());
    }

    #[test]
    fn star_outline_alternates_radii() {
        let star = MarkerShape::Star.unit_outline();
        assert_eq!(star.len(), 10);
        let outer = (star[0].0.powi(2) + star[0].1.powi(2)).sqrt();
        let inner = (star[1].0.powi(2) + star[1].1.powi(2)).sqrt();
        assert!((outer - 0.5).abs() < 1e-12);
        assert!(inner < outer);
    }

    #[test]
    fn whitespace_text_is_rejected() {
        let text = TextPrimitive::new("  ", 1.0, 1.0, 10.0, Color::BLACK, TextHAlign::Left);
        assert!(text.validate().is_err());
        let lines = TextPrimitive::new("a\nb", 1.0, 1.0, 10.0, Color::BLACK, TextHAlign::Left);
        assert_eq!(lines.line_count(), 2);
    }
}
