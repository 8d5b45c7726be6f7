use crate::core::ScalarField;
use crate::render::{
    Color, Colormap, ColormapKind, ImageInterpolation, LineStrokeStyle, MarkerShape, TextHAlign,
    TextVAlign,
};

/// Coordinate system an artist's geometry is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Coords {
    /// Data units of the owning axes.
    #[default]
    Data,
    /// `(0, 0)` is the lower-left and `(1, 1)` the upper-right plot corner.
    Axes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Vertical,
    Horizontal,
}

/// Face or edge paint of a patch-like artist.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Paint {
    /// Next color of the axes' patch cycle, picked when the artist is added.
    #[default]
    Auto,
    None,
    Color(Color),
}

impl Paint {
    #[must_use]
    pub fn color(self) -> Option<Color> {
        match self {
            Self::Color(color) => Some(color),
            Self::Auto | Self::None => None,
        }
    }
}

/// Marker drawn at every vertex of a line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerSpec {
    pub shape: MarkerShape,
    /// Diameter; `None` uses the figure style.
    pub size_pt: Option<f64>,
    /// `None` uses the line color.
    pub fill: Option<Color>,
    pub edge: Option<Color>,
    pub edge_width_pt: f64,
}

impl MarkerSpec {
    #[must_use]
    pub const fn new(shape: MarkerShape) -> Self {
        Self {
            shape,
            size_pt: None,
            fill: None,
            edge: None,
            edge_width_pt: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LineSpec {
    /// `None` takes the next color of the axes' line cycle.
    pub color: Option<Color>,
    pub width_pt: Option<f64>,
    pub style: LineStrokeStyle,
    pub alpha: Option<f64>,
    pub marker: Option<MarkerSpec>,
    /// Markers only, no connecting line.
    pub hide_line: bool,
    pub label: Option<String>,
    pub coords: Coords,
}

impl LineSpec {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn solid(color: Color) -> Self {
        Self::new().color(color)
    }

    #[must_use]
    pub fn dashed(color: Color) -> Self {
        Self::new().color(color).style(LineStrokeStyle::Dashed)
    }

    #[must_use]
    pub fn dotted(color: Color) -> Self {
        Self::new().color(color).style(LineStrokeStyle::Dotted)
    }

    #[must_use]
    pub fn dash_dot(color: Color) -> Self {
        Self::new().color(color).style(LineStrokeStyle::DashDot)
    }

    /// Unconnected markers, e.g. a single highlighted point.
    #[must_use]
    pub fn markers(color: Color, shape: MarkerShape) -> Self {
        let mut spec = Self::solid(color).marker(shape);
        spec.hide_line = true;
        spec
    }

    #[must_use]
    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    #[must_use]
    pub fn width(mut self, width_pt: f64) -> Self {
        self.width_pt = Some(width_pt);
        self
    }

    #[must_use]
    pub fn style(mut self, style: LineStrokeStyle) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = Some(alpha);
        self
    }

    #[must_use]
    pub fn marker(mut self, shape: MarkerShape) -> Self {
        self.marker = Some(MarkerSpec::new(shape));
        self
    }

    #[must_use]
    pub fn marker_size(mut self, size_pt: f64) -> Self {
        let circle = MarkerSpec::new(MarkerShape::Circle);
        let marker = self.marker.get_or_insert(circle);
        marker.size_pt = Some(size_pt);
        self
    }

    #[must_use]
    pub fn marker_edge(mut self, color: Color, width_pt: f64) -> Self {
        let circle = MarkerSpec::new(MarkerShape::Circle);
        let marker = self.marker.get_or_insert(circle);
        marker.edge = Some(color);
        marker.edge_width_pt = width_pt;
        self
    }

    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn in_axes(mut self) -> Self {
        self.coords = Coords::Axes;
        self
    }
}

/// Face/edge styling shared by patches, fills, spans, bars and arrows.
#[derive(Debug, Clone, PartialEq)]
pub struct PatchStyle {
    pub fill: Paint,
    pub edge: Paint,
    pub line_width_pt: f64,
    pub line_style: LineStrokeStyle,
    /// Overrides the alpha of both face and edge.
    pub alpha: Option<f64>,
    pub label: Option<String>,
    pub coords: Coords,
}

impl Default for PatchStyle {
    fn default() -> Self {
        Self {
            fill: Paint::Auto,
            edge: Paint::None,
            line_width_pt: 1.0,
            line_style: LineStrokeStyle::Solid,
            alpha: None,
            label: None,
            coords: Coords::Data,
        }
    }
}

impl PatchStyle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn filled(color: Color) -> Self {
        Self::new().fill(color)
    }

    /// Face and edge in the same color.
    #[must_use]
    pub fn colored(color: Color) -> Self {
        Self::new().fill(color).edge(color)
    }

    /// Edge only.
    #[must_use]
    pub fn outline(color: Color) -> Self {
        Self::new().no_fill().edge(color)
    }

    #[must_use]
    pub fn fill(mut self, color: Color) -> Self {
        self.fill = Paint::Color(color);
        self
    }

    #[must_use]
    pub fn no_fill(mut self) -> Self {
        self.fill = Paint::None;
        self
    }

    #[must_use]
    pub fn edge(mut self, color: Color) -> Self {
        self.edge = Paint::Color(color);
        self
    }

    #[must_use]
    pub fn line_width(mut self, width_pt: f64) -> Self {
        self.line_width_pt = width_pt;
        self
    }

    #[must_use]
    pub fn line_style(mut self, style: LineStrokeStyle) -> Self {
        self.line_style = style;
        self
    }

    #[must_use]
    pub fn dashed(self) -> Self {
        self.line_style(LineStrokeStyle::Dashed)
    }

    #[must_use]
    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = Some(alpha);
        self
    }

    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn in_axes(mut self) -> Self {
        self.coords = Coords::Axes;
        self
    }

    /// Face color after alpha, `None` when unfilled.
    pub(super) fn face_color(&self) -> Option<Color> {
        self.fill.color().map(|color| self.apply_alpha(color))
    }

    pub(super) fn edge_color(&self) -> Option<Color> {
        self.edge.color().map(|color| self.apply_alpha(color))
    }

    fn apply_alpha(&self, color: Color) -> Color {
        match self.alpha {
            Some(alpha) => color.with_alpha(alpha),
            None => color,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSpec {
    /// One color for all points, one per point, or empty for the cycle.
    pub colors: Vec<Color>,
    /// Marker areas in pt²; one for all points or one per point.
    pub sizes_pt2: Vec<f64>,
    pub shape: MarkerShape,
    pub alpha: Option<f64>,
    /// `None` outlines each marker in its own face color.
    pub edge: Option<Color>,
    pub edge_width_pt: Option<f64>,
    pub label: Option<String>,
    pub coords: Coords,
}

impl Default for ScatterSpec {
    fn default() -> Self {
        Self {
            colors: Vec::new(),
            sizes_pt2: vec![36.0],
            shape: MarkerShape::Circle,
            alpha: None,
            edge: None,
            edge_width_pt: None,
            label: None,
            coords: Coords::Data,
        }
    }
}

impl ScatterSpec {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn color(mut self, color: Color) -> Self {
        self.colors = vec![color];
        self
    }

    #[must_use]
    pub fn colors(mut self, colors: Vec<Color>) -> Self {
        self.colors = colors;
        self
    }

    #[must_use]
    pub fn size(mut self, area_pt2: f64) -> Self {
        self.sizes_pt2 = vec![area_pt2];
        self
    }

    #[must_use]
    pub fn sizes(mut self, areas_pt2: Vec<f64>) -> Self {
        self.sizes_pt2 = areas_pt2;
        self
    }

    #[must_use]
    pub fn marker(mut self, shape: MarkerShape) -> Self {
        self.shape = shape;
        self
    }

    #[must_use]
    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = Some(alpha);
        self
    }

    #[must_use]
    pub fn edge(mut self, color: Color) -> Self {
        self.edge = Some(color);
        self
    }

    #[must_use]
    pub fn edge_width(mut self, width_pt: f64) -> Self {
        self.edge_width_pt = Some(width_pt);
        self
    }

    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn in_axes(mut self) -> Self {
        self.coords = Coords::Axes;
        self
    }
}

/// Geometry of a shape patch, in the coordinates of its style.
#[derive(Debug, Clone, PartialEq)]
pub enum PatchShape {
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    /// Rectangle grown by `pad` on every side with corners of radius `pad`.
    RoundBox {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        pad: f64,
    },
    Ellipse {
        cx: f64,
        cy: f64,
        width: f64,
        height: f64,
        angle_deg: f64,
    },
    Circle {
        cx: f64,
        cy: f64,
        radius: f64,
    },
    Polygon(Vec<(f64, f64)>),
}

impl PatchShape {
    #[must_use]
    pub fn rect(origin: (f64, f64), width: f64, height: f64) -> Self {
        Self::Rect {
            x: origin.0,
            y: origin.1,
            width,
            height,
        }
    }

    #[must_use]
    pub fn round_box(origin: (f64, f64), width: f64, height: f64, pad: f64) -> Self {
        Self::RoundBox {
            x: origin.0,
            y: origin.1,
            width,
            height,
            pad,
        }
    }

    #[must_use]
    pub fn ellipse(center: (f64, f64), width: f64, height: f64) -> Self {
        Self::Ellipse {
            cx: center.0,
            cy: center.1,
            width,
            height,
            angle_deg: 0.0,
        }
    }

    #[must_use]
    pub fn rotated_ellipse(center: (f64, f64), width: f64, height: f64, angle_deg: f64) -> Self {
        Self::Ellipse {
            cx: center.0,
            cy: center.1,
            width,
            height,
            angle_deg,
        }
    }

    #[must_use]
    pub fn circle(center: (f64, f64), radius: f64) -> Self {
        Self::Circle {
            cx: center.0,
            cy: center.1,
            radius,
        }
    }

    #[must_use]
    pub fn polygon(points: Vec<(f64, f64)>) -> Self {
        Self::Polygon(points)
    }

    /// Points whose bounding box covers the shape.
    pub(super) fn hull_points(&self) -> Vec<(f64, f64)> {
        match self {
            Self::Rect {
                x,
                y,
                width,
                height,
            } => vec![(*x, *y), (x + width, y + height)],
            Self::RoundBox {
                x,
                y,
                width,
                height,
                pad,
            } => vec![(x - pad, y - pad), (x + width + pad, y + height + pad)],
            Self::Ellipse {
                cx,
                cy,
                width,
                height,
                angle_deg,
            } => {
                let (a, b) = (width * 0.5, height * 0.5);
                let (sin, cos) = angle_deg.to_radians().sin_cos();
                let half_x = ((a * cos).powi(2) + (b * sin).powi(2)).sqrt();
                let half_y = ((a * sin).powi(2) + (b * cos).powi(2)).sqrt();
                vec![(cx - half_x, cy - half_y), (cx + half_x, cy + half_y)]
            }
            Self::Circle { cx, cy, radius } => {
                vec![(cx - radius, cy - radius), (cx + radius, cy + radius)]
            }
            Self::Polygon(points) => points.clone(),
        }
    }
}

/// Arrow head and shaft proportions in the arrow's own coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrowSpec {
    pub width: f64,
    /// Defaults to three shaft widths.
    pub head_width: Option<f64>,
    /// Defaults to 1.5 head widths.
    pub head_length: Option<f64>,
    /// When false the head is added beyond `(x + dx, y + dy)`.
    pub length_includes_head: bool,
    pub style: PatchStyle,
}

impl Default for ArrowSpec {
    fn default() -> Self {
        Self {
            width: 0.001,
            head_width: None,
            head_length: None,
            length_includes_head: false,
            style: PatchStyle::default(),
        }
    }
}

impl ArrowSpec {
    #[must_use]
    pub fn head(head_width: f64, head_length: f64) -> Self {
        Self {
            head_width: Some(head_width),
            head_length: Some(head_length),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    #[must_use]
    pub fn including_head(mut self) -> Self {
        self.length_includes_head = true;
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: PatchStyle) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn colored(self, color: Color) -> Self {
        let style = self.style.clone().fill(color).edge(color);
        self.with_style(style)
    }

    pub(super) fn head_width(&self) -> f64 {
        self.head_width.unwrap_or(3.0 * self.width)
    }

    pub(super) fn head_length(&self) -> f64 {
        self.head_length.unwrap_or(1.5 * self.head_width())
    }

    /// Outline of an arrow from `(x, y)` along `(dx, dy)`; empty for a
    /// zero-length arrow.
    pub(super) fn outline(&self, x: f64, y: f64, dx: f64, dy: f64) -> Vec<(f64, f64)> {
        let distance = dx.hypot(dy);
        if distance == 0.0 || !distance.is_finite() {
            return Vec::new();
        }
        let head_width = self.head_width();
        let head_length = self.head_length();
        let length = if self.length_includes_head {
            distance
        } else {
            distance + head_length
        };
        let half_width = self.width * 0.5;
        let half_head = head_width * 0.5;

        // Tip at the origin, shaft along -x.
        let local = [
            (0.0, 0.0),
            (-head_length, -half_head),
            (-head_length, -half_width),
            (-length, -half_width),
            (-length, half_width),
            (-head_length, half_width),
            (-head_length, half_head),
        ];
        let (cos, sin) = (dx / distance, dy / distance);
        let shift = if self.length_includes_head {
            0.0
        } else {
            head_length
        };
        let (tip_x, tip_y) = (x + dx + cos * shift, y + dy + sin * shift);
        local
            .iter()
            .map(|(px, py)| (tip_x + px * cos - py * sin, tip_y + px * sin + py * cos))
            .collect()
    }
}

/// Box drawn behind a text label; `pad` is a multiple of the font size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextBoxSpec {
    pub fill: Color,
    pub edge: Option<Color>,
    pub alpha: Option<f64>,
    pub pad: f64,
    pub rounded: bool,
}

impl TextBoxSpec {
    #[must_use]
    pub fn round(fill: Color) -> Self {
        Self {
            fill,
            edge: Some(Color::BLACK),
            alpha: None,
            pad: 0.3,
            rounded: true,
        }
    }

    #[must_use]
    pub fn square(fill: Color) -> Self {
        Self {
            rounded: false,
            ..Self::round(fill)
        }
    }

    #[must_use]
    pub fn pad(mut self, pad: f64) -> Self {
        self.pad = pad;
        self
    }

    #[must_use]
    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = Some(alpha);
        self
    }

    #[must_use]
    pub fn edge(mut self, edge: Option<Color>) -> Self {
        self.edge = edge;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextSpec {
    /// `None` uses the figure's base font size.
    pub size_pt: Option<f64>,
    pub color: Color,
    pub h_align: TextHAlign,
    pub v_align: TextVAlign,
    pub bold: bool,
    pub italic: bool,
    pub rotation_deg: f64,
    pub bbox: Option<TextBoxSpec>,
    pub coords: Coords,
}

impl Default for TextSpec {
    fn default() -> Self {
        Self {
            size_pt: None,
            color: Color::BLACK,
            h_align: TextHAlign::Left,
            v_align: TextVAlign::Baseline,
            bold: false,
            italic: false,
            rotation_deg: 0.0,
            bbox: None,
            coords: Coords::Data,
        }
    }
}

impl TextSpec {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Horizontally centred on the anchor, baseline at the anchor.
    #[must_use]
    pub fn centered() -> Self {
        Self::new().align(TextHAlign::Center)
    }

    /// Centred on the anchor in both directions.
    #[must_use]
    pub fn middle() -> Self {
        Self::centered().v_align(TextVAlign::Center)
    }

    #[must_use]
    pub fn size(mut self, size_pt: f64) -> Self {
        self.size_pt = Some(size_pt);
        self
    }

    #[must_use]
    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    #[must_use]
    pub fn align(mut self, h_align: TextHAlign) -> Self {
        self.h_align = h_align;
        self
    }

    #[must_use]
    pub fn v_align(mut self, v_align: TextVAlign) -> Self {
        self.v_align = v_align;
        self
    }

    #[must_use]
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    #[must_use]
    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    #[must_use]
    pub fn rotation(mut self, rotation_deg: f64) -> Self {
        self.rotation_deg = rotation_deg;
        self
    }

    #[must_use]
    pub fn boxed(mut self, bbox: TextBoxSpec) -> Self {
        self.bbox = Some(bbox);
        self
    }

    #[must_use]
    pub fn in_axes(mut self) -> Self {
        self.coords = Coords::Axes;
        self
    }
}

/// Which end of the array is drawn at the bottom of the extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageOrigin {
    /// Field row 0 at the bottom.
    #[default]
    Lower,
    Upper,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageSpec {
    pub colormap: Colormap,
    pub alpha: Option<f64>,
    pub vmin: Option<f64>,
    pub vmax: Option<f64>,
    pub interpolation: ImageInterpolation,
    pub origin: ImageOrigin,
    /// Filled-contour rendering: values are binned between "nice" levels.
    pub levels: Option<usize>,
}

impl ImageSpec {
    #[must_use]
    pub fn new(colormap: Colormap) -> Self {
        Self {
            colormap,
            alpha: None,
            vmin: None,
            vmax: None,
            interpolation: ImageInterpolation::Nearest,
            origin: ImageOrigin::Lower,
            levels: None,
        }
    }

    #[must_use]
    pub fn of(kind: ColormapKind) -> Self {
        Self::new(Colormap::new(kind))
    }

    #[must_use]
    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = Some(alpha);
        self
    }

    #[must_use]
    pub fn range(mut self, vmin: f64, vmax: f64) -> Self {
        self.vmin = Some(vmin);
        self.vmax = Some(vmax);
        self
    }

    #[must_use]
    pub fn interpolation(mut self, interpolation: ImageInterpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    #[must_use]
    pub fn origin(mut self, origin: ImageOrigin) -> Self {
        self.origin = origin;
        self
    }

    #[must_use]
    pub fn levels(mut self, levels: usize) -> Self {
        self.levels = Some(levels);
        self
    }
}

/// `(x_min, x_max, y_min, y_max)` in data units.
pub type Extent = [f64; 4];

#[derive(Debug, Clone, PartialEq)]
pub struct LineArtist {
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
    pub spec: LineSpec,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterArtist {
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
    pub spec: ScatterSpec,
}

/// Area between two curves sharing the independent coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct FillArtist {
    /// `Vertical` fills between y curves over x; `Horizontal` between x
    /// curves over y.
    pub orientation: Orientation,
    pub independent: Vec<f64>,
    pub first: Vec<f64>,
    pub second: Vec<f64>,
    pub mask: Option<Vec<bool>>,
    /// Extend masked runs to the interpolated crossing of the two curves.
    pub interpolate: bool,
    pub style: PatchStyle,
}

/// Band across the whole plot: `Horizontal` spans y values.
#[derive(Debug, Clone, PartialEq)]
pub struct SpanArtist {
    pub orientation: Orientation,
    pub from: f64,
    pub to: f64,
    pub style: PatchStyle,
}

/// Horizontal (`y = value`) or vertical (`x = value`) reference line over an
/// axes-fraction range.
#[derive(Debug, Clone, PartialEq)]
pub struct RefLineArtist {
    pub orientation: Orientation,
    pub value: f64,
    pub extent: (f64, f64),
    pub spec: LineSpec,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarArtist {
    /// `Vertical` bars grow along y.
    pub orientation: Orientation,
    pub positions: Vec<f64>,
    pub lengths: Vec<f64>,
    pub thickness: f64,
    /// Per-bar faces; empty uses `style.fill` for every bar.
    pub colors: Vec<Color>,
    pub style: PatchStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PatchArtist {
    pub shape: PatchShape,
    pub style: PatchStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrowArtist {
    pub x: f64,
    pub y: f64,
    pub dx: f64,
    pub dy: f64,
    pub spec: ArrowSpec,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextArtist {
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub spec: TextSpec,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageArtist {
    pub field: ScalarField,
    pub extent: Extent,
    pub spec: ImageSpec,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ErrorBarArtist {
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
    pub xerr: Option<Vec<f64>>,
    pub yerr: Option<Vec<f64>>,
    pub capsize_pt: f64,
    pub line: LineSpec,
}

/// Symmetric error amounts for `Axes::errorbar`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ErrorBars {
    pub xerr: Option<Vec<f64>>,
    pub yerr: Option<Vec<f64>>,
    pub capsize_pt: f64,
}

impl ErrorBars {
    /// The same x error on every point.
    #[must_use]
    pub fn x(amount: f64) -> Self {
        Self {
            xerr: Some(vec![amount]),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn y(amount: f64) -> Self {
        Self {
            yerr: Some(vec![amount]),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn capsize(mut self, capsize_pt: f64) -> Self {
        self.capsize_pt = capsize_pt;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Artist {
    Line(LineArtist),
    Scatter(ScatterArtist),
    Fill(FillArtist),
    Span(SpanArtist),
    RefLine(RefLineArtist),
    Bars(BarArtist),
    Patch(PatchArtist),
    Arrow(ArrowArtist),
    Text(TextArtist),
    Image(ImageArtist),
    ErrorBar(ErrorBarArtist),
}

impl Artist {
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        let label = match self {
            Self::Line(line) => &line.spec.label,
            Self::Scatter(scatter) => &scatter.spec.label,
            Self::Fill(fill) => &fill.style.label,
            Self::Span(span) => &span.style.label,
            Self::RefLine(line) => &line.spec.label,
            Self::Bars(bars) => &bars.style.label,
            Self::Patch(patch) => &patch.style.label,
            Self::Arrow(arrow) => &arrow.spec.style.label,
            Self::ErrorBar(errorbar) => &errorbar.line.label,
            Self::Text(_) | Self::Image(_) => return None,
        };
        label.as_deref().filter(|label| !label.is_empty())
    }

    #[must_use]
    pub fn coords(&self) -> Coords {
        match self {
            Self::Line(line) => line.spec.coords,
            Self::Scatter(scatter) => scatter.spec.coords,
            Self::Fill(fill) => fill.style.coords,
            Self::Patch(patch) => patch.style.coords,
            Self::Arrow(arrow) => arrow.spec.style.coords,
            Self::Text(text) => text.spec.coords,
            Self::Span(_)
            | Self::RefLine(_)
            | Self::Bars(_)
            | Self::Image(_)
            | Self::ErrorBar(_) => Coords::Data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrow_with_head_included_ends_at_target() {
        let arrow = ArrowSpec::head(0.1, 0.2).including_head();
        let outline = arrow.outline(0.0, 0.0, 1.0, 0.0);
        assert_eq!(outline.len(), 7);
        let (tip_x, tip_y) = outline[0];
        assert!((tip_x - 1.0).abs() < 1e-12);
        assert!(tip_y.abs() < 1e-12);
        let tail = outline[3];
        assert!(tail.0.abs() < 1e-12);
    }

    #[test]
    fn arrow_head_extends_past_target_by_default() {
        let arrow = ArrowSpec::head(0.1, 0.2);
        let outline = arrow.outline(0.0, 0.0, 0.0, 2.0);
        let (tip_x, tip_y) = outline[0];
        assert!(tip_x.abs() < 1e-12);
        assert!((tip_y - 2.2).abs() < 1e-12);
        // Shaft starts at the origin.
        assert!(outline[3].1.abs() < 1e-12);
        assert!(ArrowSpec::default().outline(1.0, 1.0, 0.0, 0.0).is_empty());
    }

    #[test]
    fn patch_alpha_applies_to_face_and_edge() {
        let style = PatchStyle::colored(Color::BLACK).alpha(0.25);
        assert_eq!(style.face_color().map(|c| c.alpha), Some(0.25));
        assert_eq!(style.edge_color().map(|c| c.alpha), Some(0.25));
        assert_eq!(PatchStyle::outline(Color::BLACK).face_color(), None);
    }

    #[test]
    fn rotated_ellipse_hull_grows() {
        let flat = PatchShape::ellipse((0.0, 0.0), 2.0, 1.0).hull_points();
        let turned = PatchShape::rotated_ellipse((0.0, 0.0), 2.0, 1.0, 90.0).hull_points();
        assert!((flat[1].0 - 1.0).abs() < 1e-12);
        assert!((turned[1].1 - 1.0).abs() < 1e-12);
        assert!((turned[1].0 - 0.5).abs() < 1e-12);
    }

    #[test]
    fn empty_labels_are_not_legend_entries() {
        let line = Artist::Line(LineArtist {
            xs: vec![0.0, 1.0],
            ys: vec![0.0, 1.0],
            spec: LineSpec::new().label(""),
        });
        assert_eq!(line.label(), None);
    }
}
