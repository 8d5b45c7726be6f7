use crate::core::{ScalarField, ScaleKind};
use crate::error::{FigureError, FigureResult};
use crate::render::{Color, LineStrokeStyle, TextHAlign};

use super::artist::{
    ArrowArtist, ArrowSpec, Artist, BarArtist, ErrorBarArtist, ErrorBars, Extent, FillArtist,
    ImageArtist, ImageSpec, LineArtist, LineSpec, Orientation, Paint, PatchArtist, PatchShape,
    PatchStyle, RefLineArtist, ScatterArtist, ScatterSpec, SpanArtist, TextArtist, TextSpec,
};
use super::axis_ticks::TickFormat;
use super::layout::GridSlot;
use super::legend::LegendSpec;

/// Tick placement of one axis.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum TickSpec {
    #[default]
    Auto,
    /// No ticks and no tick labels.
    Hidden,
    /// Ticks at fixed values, labels from the axis format.
    Fixed(Vec<f64>),
    /// Ticks at fixed values with explicit labels (categorical axes).
    Labeled(Vec<(f64, String)>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisSpec {
    pub label: Option<String>,
    pub label_color: Color,
    /// `None` ends are resolved from the data.
    pub limits: (Option<f64>, Option<f64>),
    pub scale: ScaleKind,
    pub inverted: bool,
    pub ticks: TickSpec,
    pub tick_format: TickFormat,
    pub tick_label_color: Color,
    pub tick_label_rotation_deg: f64,
    /// Alignment of rotated tick labels; `None` centres them on the tick.
    pub tick_label_align: Option<TextHAlign>,
}

impl Default for AxisSpec {
    fn default() -> Self {
        Self {
            label: None,
            label_color: Color::BLACK,
            limits: (None, None),
            scale: ScaleKind::Linear,
            inverted: false,
            ticks: TickSpec::Auto,
            tick_format: TickFormat::Auto,
            tick_label_color: Color::BLACK,
            tick_label_rotation_deg: 0.0,
            tick_label_align: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Aspect {
    #[default]
    Auto,
    /// One data unit spans the same pixels on both axes; limits grow to fit.
    EqualDatalim,
    /// One data unit spans the same pixels on both axes; the plot box shrinks.
    EqualBox,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridAxis {
    #[default]
    Both,
    X,
    Y,
}

/// Per-axes grid override; unset fields fall back to the figure style.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GridLines {
    pub visible: bool,
    pub axis: GridAxis,
    pub style: Option<LineStrokeStyle>,
    pub alpha: Option<f64>,
    /// Also draw lines at minor (log) ticks.
    pub minor: bool,
}

impl GridLines {
    #[must_use]
    pub fn on() -> Self {
        Self {
            visible: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn off() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn axis(mut self, axis: GridAxis) -> Self {
        self.axis = axis;
        self
    }

    #[must_use]
    pub fn style(mut self, style: LineStrokeStyle) -> Self {
        self.style = Some(style);
        self
    }

    #[must_use]
    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = Some(alpha);
        self
    }

    #[must_use]
    pub fn with_minor(mut self) -> Self {
        self.minor = true;
        self
    }
}

/// Color scale drawn to the right of the plot for the last image artist.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorbarSpec {
    pub label: Option<String>,
    pub label_size_pt: Option<f64>,
    /// Degrees; 90 reads bottom-to-top, 270 top-to-bottom.
    pub label_rotation_deg: f64,
    /// Bar length as a fraction of the plot height.
    pub shrink: f64,
    /// Length to thickness ratio.
    pub aspect: f64,
}

impl Default for ColorbarSpec {
    fn default() -> Self {
        Self {
            label: None,
            label_size_pt: None,
            label_rotation_deg: 90.0,
            shrink: 1.0,
            aspect: 20.0,
        }
    }
}

impl ColorbarSpec {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn label_size(mut self, size_pt: f64) -> Self {
        self.label_size_pt = Some(size_pt);
        self
    }

    #[must_use]
    pub fn label_rotation(mut self, rotation_deg: f64) -> Self {
        self.label_rotation_deg = rotation_deg;
        self
    }

    #[must_use]
    pub fn shrink(mut self, shrink: f64) -> Self {
        self.shrink = shrink;
        self
    }

    #[must_use]
    pub fn aspect(mut self, aspect: f64) -> Self {
        self.aspect = aspect;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TitleSpec {
    pub text: String,
    pub size_pt: Option<f64>,
    pub bold: bool,
}

/// Round-robin color source (`axes.prop_cycle`).
#[derive(Debug, Clone, PartialEq)]
struct ColorCycle {
    colors: Vec<Color>,
    next: usize,
}

impl ColorCycle {
    fn new(colors: Vec<Color>) -> Self {
        Self { colors, next: 0 }
    }

    fn first(&self) -> Color {
        self.colors.first().copied().unwrap_or(Color::BLACK)
    }

    fn next_color(&mut self) -> Color {
        if self.colors.is_empty() {
            return Color::BLACK;
        }
        let color = self.colors[self.next % self.colors.len()];
        self.next += 1;
        color
    }
}

/// One panel: its axes, decorations and artists in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct Axes {
    pub(super) slot: GridSlot,
    pub(super) title: Option<TitleSpec>,
    pub(super) x: AxisSpec,
    pub(super) y: AxisSpec,
    pub(super) aspect: Aspect,
    pub(super) axis_visible: bool,
    pub(super) face: Option<Color>,
    pub(super) grid: Option<GridLines>,
    pub(super) artists: Vec<Artist>,
    pub(super) twin: Option<Box<Axes>>,
    pub(super) legend: Option<LegendSpec>,
    pub(super) colorbar: Option<ColorbarSpec>,
    line_cycle: ColorCycle,
    patch_cycle: ColorCycle,
}

impl Axes {
    pub(super) fn new(slot: GridSlot, cycle: Vec<Color>) -> Self {
        Self {
            slot,
            title: None,
            x: AxisSpec::default(),
            y: AxisSpec::default(),
            aspect: Aspect::Auto,
            axis_visible: true,
            face: None,
            grid: None,
            artists: Vec::new(),
            twin: None,
            legend: None,
            colorbar: None,
            line_cycle: ColorCycle::new(cycle.clone()),
            patch_cycle: ColorCycle::new(cycle),
        }
    }

    #[must_use]
    pub fn slot(&self) -> GridSlot {
        self.slot
    }

    #[must_use]
    pub fn artists(&self) -> &[Artist] {
        &self.artists
    }

    #[must_use]
    pub fn twin(&self) -> Option<&Axes> {
        self.twin.as_deref()
    }

    #[must_use]
    pub fn legend_spec(&self) -> Option<&LegendSpec> {
        self.legend.as_ref()
    }

    #[must_use]
    pub fn colorbar_spec(&self) -> Option<&ColorbarSpec> {
        self.colorbar.as_ref()
    }

    #[must_use]
    pub fn aspect(&self) -> Aspect {
        self.aspect
    }

    #[must_use]
    pub fn x_axis(&self) -> &AxisSpec {
        &self.x
    }

    #[must_use]
    pub fn y_axis(&self) -> &AxisSpec {
        &self.y
    }

    pub fn x_axis_mut(&mut self) -> &mut AxisSpec {
        &mut self.x
    }

    pub fn y_axis_mut(&mut self) -> &mut AxisSpec {
        &mut self.y
    }

    pub fn set_title(&mut self, text: impl Into<String>) -> &mut Self {
        self.title = Some(TitleSpec {
            text: text.into(),
            size_pt: None,
            bold: false,
        });
        self
    }

    pub fn set_title_styled(
        &mut self,
        text: impl Into<String>,
        size_pt: Option<f64>,
        bold: bool,
    ) -> &mut Self {
        self.title = Some(TitleSpec {
            text: text.into(),
            size_pt,
            bold,
        });
        self
    }

    pub fn set_xlabel(&mut self, label: impl Into<String>) -> &mut Self {
        self.x.label = Some(label.into());
        self
    }

    pub fn set_ylabel(&mut self, label: impl Into<String>) -> &mut Self {
        self.y.label = Some(label.into());
        self
    }

    /// Axis label and tick labels in `color`.
    pub fn set_xlabel_colored(&mut self, label: impl Into<String>, color: Color) -> &mut Self {
        self.x.label = Some(label.into());
        self.x.label_color = color;
        self.x.tick_label_color = color;
        self
    }

    pub fn set_ylabel_colored(&mut self, label: impl Into<String>, color: Color) -> &mut Self {
        self.y.label = Some(label.into());
        self.y.label_color = color;
        self.y.tick_label_color = color;
        self
    }

    pub fn set_xlim(&mut self, min: f64, max: f64) -> &mut Self {
        self.x.limits = (Some(min), Some(max));
        self
    }

    pub fn set_ylim(&mut self, min: f64, max: f64) -> &mut Self {
        self.y.limits = (Some(min), Some(max));
        self
    }

    /// Fixes only the given ends; the others follow the data.
    pub fn set_x_bounds(&mut self, min: Option<f64>, max: Option<f64>) -> &mut Self {
        self.x.limits = (min, max);
        self
    }

    pub fn set_y_bounds(&mut self, min: Option<f64>, max: Option<f64>) -> &mut Self {
        self.y.limits = (min, max);
        self
    }

    pub fn set_xscale(&mut self, scale: ScaleKind) -> &mut Self {
        self.x.scale = scale;
        self
    }

    pub fn set_yscale(&mut self, scale: ScaleKind) -> &mut Self {
        self.y.scale = scale;
        self
    }

    pub fn invert_xaxis(&mut self) -> &mut Self {
        self.x.inverted = !self.x.inverted;
        self
    }

    pub fn invert_yaxis(&mut self) -> &mut Self {
        self.y.inverted = !self.y.inverted;
        self
    }

    pub fn hide_xticks(&mut self) -> &mut Self {
        self.x.ticks = TickSpec::Hidden;
        self
    }

    pub fn hide_yticks(&mut self) -> &mut Self {
        self.y.ticks = TickSpec::Hidden;
        self
    }

    pub fn set_xticks(&mut self, ticks: &[f64]) -> &mut Self {
        self.x.ticks = TickSpec::Fixed(ticks.to_vec());
        self
    }

    pub fn set_yticks(&mut self, ticks: &[f64]) -> &mut Self {
        self.y.ticks = TickSpec::Fixed(ticks.to_vec());
        self
    }

    /// Categorical x tick labels, optionally rotated and aligned.
    pub fn set_xticklabels(
        &mut self,
        ticks: &[f64],
        labels: &[&str],
        rotation_deg: f64,
        align: Option<TextHAlign>,
    ) -> &mut Self {
        self.x.ticks = labeled_ticks(ticks, labels);
        self.x.tick_label_rotation_deg = rotation_deg;
        self.x.tick_label_align = align;
        self
    }

    pub fn set_yticklabels(&mut self, ticks: &[f64], labels: &[&str]) -> &mut Self {
        self.y.ticks = labeled_ticks(ticks, labels);
        self
    }

    pub fn set_x_tick_format(&mut self, format: TickFormat) -> &mut Self {
        self.x.tick_format = format;
        self
    }

    pub fn set_y_tick_format(&mut self, format: TickFormat) -> &mut Self {
        self.y.tick_format = format;
        self
    }

    /// Hides the frame, ticks, tick labels, axis labels and face; keeps the
    /// title and the artists.
    pub fn axis_off(&mut self) -> &mut Self {
        self.axis_visible = false;
        self
    }

    pub fn set_aspect(&mut self, aspect: Aspect) -> &mut Self {
        self.aspect = aspect;
        self
    }

    pub fn set_facecolor(&mut self, color: Color) -> &mut Self {
        self.face = Some(color);
        self
    }

    pub fn grid(&mut self, visible: bool) -> &mut Self {
        self.grid = Some(if visible {
            GridLines::on()
        } else {
            GridLines::off()
        });
        self
    }

    pub fn grid_with(&mut self, grid: GridLines) -> &mut Self {
        self.grid = Some(grid);
        self
    }

    /// Second x axis on top of the plot sharing this axes' y axis.
    pub fn twin_x(&mut self) -> &mut Axes {
        let cycle = self.line_cycle.colors.clone();
        self.twin.get_or_insert_with(|| {
            let mut twin = Axes::new(self.slot, cycle);
            twin.grid = Some(GridLines::off());
            Box::new(twin)
        })
    }

    pub fn legend(&mut self, spec: LegendSpec) -> &mut Self {
        self.legend = Some(spec);
        self
    }

    pub fn colorbar(&mut self, spec: ColorbarSpec) -> &mut Self {
        self.colorbar = Some(spec);
        self
    }

    pub fn plot(&mut self, xs: &[f64], ys: &[f64], mut spec: LineSpec) -> &mut Self {
        if spec.color.is_none() {
            spec.color = Some(self.line_cycle.next_color());
        }
        self.artists.push(Artist::Line(LineArtist {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
            spec,
        }));
        self
    }

    pub fn scatter(&mut self, xs: &[f64], ys: &[f64], mut spec: ScatterSpec) -> &mut Self {
        if spec.colors.is_empty() {
            spec.colors = vec![self.patch_cycle.next_color()];
        }
        self.artists.push(Artist::Scatter(ScatterArtist {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
            spec,
        }));
        self
    }

    /// Area between `y1` and `y2` over `xs`.
    pub fn fill_between(
        &mut self,
        xs: &[f64],
        y1: &[f64],
        y2: &[f64],
        style: PatchStyle,
    ) -> &mut Self {
        self.push_fill(Orientation::Vertical, xs, y1, y2, None, style)
    }

    /// Area between `x1` and `x2` over `ys`, restricted to `mask` when given;
    /// masked runs end where the curves cross.
    pub fn fill_betweenx(
        &mut self,
        ys: &[f64],
        x1: &[f64],
        x2: &[f64],
        mask: Option<Vec<bool>>,
        style: PatchStyle,
    ) -> &mut Self {
        self.push_fill(Orientation::Horizontal, ys, x1, x2, mask, style)
    }

    fn push_fill(
        &mut self,
        orientation: Orientation,
        independent: &[f64],
        first: &[f64],
        second: &[f64],
        mask: Option<Vec<bool>>,
        mut style: PatchStyle,
    ) -> &mut Self {
        let interpolate = mask.is_some();
        self.resolve_cycled(&mut style);
        self.artists.push(Artist::Fill(FillArtist {
            orientation,
            independent: independent.to_vec(),
            first: broadcast(first, independent.len()),
            second: broadcast(second, independent.len()),
            mask,
            interpolate,
            style,
        }));
        self
    }

    /// Closed polygon through the given vertices.
    pub fn fill(&mut self, xs: &[f64], ys: &[f64], mut style: PatchStyle) -> &mut Self {
        self.resolve_cycled(&mut style);
        let points = xs.iter().copied().zip(ys.iter().copied()).collect();
        self.artists.push(Artist::Patch(PatchArtist {
            shape: PatchShape::Polygon(points),
            style,
        }));
        self
    }

    pub fn axhspan(&mut self, y_from: f64, y_to: f64, style: PatchStyle) -> &mut Self {
        self.push_span(Orientation::Horizontal, y_from, y_to, style)
    }

    pub fn axvspan(&mut self, x_from: f64, x_to: f64, style: PatchStyle) -> &mut Self {
        self.push_span(Orientation::Vertical, x_from, x_to, style)
    }

    fn push_span(
        &mut self,
        orientation: Orientation,
        from: f64,
        to: f64,
        mut style: PatchStyle,
    ) -> &mut Self {
        self.resolve_default(&mut style);
        self.artists.push(Artist::Span(SpanArtist {
            orientation,
            from,
            to,
            style,
        }));
        self
    }

    /// Horizontal line at `y` across the whole plot width.
    pub fn axhline(&mut self, y: f64, spec: LineSpec) -> &mut Self {
        self.axhline_between(y, 0.0, 1.0, spec)
    }

    /// Horizontal line at `y` from `x_from` to `x_to` (plot-width fractions).
    pub fn axhline_between(&mut self, y: f64, x_from: f64, x_to: f64, spec: LineSpec) -> &mut Self {
        self.push_ref_line(Orientation::Horizontal, y, (x_from, x_to), spec)
    }

    pub fn axvline(&mut self, x: f64, spec: LineSpec) -> &mut Self {
        self.push_ref_line(Orientation::Vertical, x, (0.0, 1.0), spec)
    }

    fn push_ref_line(
        &mut self,
        orientation: Orientation,
        value: f64,
        extent: (f64, f64),
        mut spec: LineSpec,
    ) -> &mut Self {
        if spec.color.is_none() {
            spec.color = Some(self.line_cycle.next_color());
        }
        self.artists.push(Artist::RefLine(RefLineArtist {
            orientation,
            value,
            extent,
            spec,
        }));
        self
    }

    /// Vertical bars of `width` centred on `xs`.
    pub fn bar(&mut self, xs: &[f64], heights: &[f64], width: f64, style: PatchStyle) -> &mut Self {
        self.push_bars(Orientation::Vertical, xs, heights, width, Vec::new(), style)
    }

    /// Horizontal bars of `height` centred on `ys`, one face color per bar.
    pub fn barh(
        &mut self,
        ys: &[f64],
        widths: &[f64],
        height: f64,
        colors: Vec<Color>,
        style: PatchStyle,
    ) -> &mut Self {
        self.push_bars(Orientation::Horizontal, ys, widths, height, colors, style)
    }

    fn push_bars(
        &mut self,
        orientation: Orientation,
        positions: &[f64],
        lengths: &[f64],
        thickness: f64,
        colors: Vec<Color>,
        mut style: PatchStyle,
    ) -> &mut Self {
        if colors.is_empty() {
            self.resolve_cycled(&mut style);
        } else if style.fill == Paint::Auto {
            style.fill = Paint::Color(colors[0]);
        }
        self.artists.push(Artist::Bars(BarArtist {
            orientation,
            positions: positions.to_vec(),
            lengths: lengths.to_vec(),
            thickness,
            colors,
            style,
        }));
        self
    }

    pub fn add_patch(&mut self, shape: PatchShape, mut style: PatchStyle) -> &mut Self {
        self.resolve_default(&mut style);
        let patch = PatchArtist { shape, style };
        self.artists.push(Artist::Patch(patch));
        self
    }

    pub fn arrow(&mut self, x: f64, y: f64, dx: f64, dy: f64, mut spec: ArrowSpec) -> &mut Self {
        self.resolve_default(&mut spec.style);
        let arrow = ArrowArtist { x, y, dx, dy, spec };
        self.artists.push(Artist::Arrow(arrow));
        self
    }

    pub fn text(&mut self, x: f64, y: f64, text: impl Into<String>, spec: TextSpec) -> &mut Self {
        self.artists.push(Artist::Text(TextArtist {
            x,
            y,
            text: text.into(),
            spec,
        }));
        self
    }

    /// Raster image over `extent`; like `imshow`, this makes the axes keep
    /// square data units unless the aspect is changed afterwards.
    pub fn imshow(&mut self, field: ScalarField, extent: Extent, spec: ImageSpec) -> &mut Self {
        self.aspect = Aspect::EqualBox;
        self.artists.push(Artist::Image(ImageArtist {
            field,
            extent,
            spec,
        }));
        self
    }

    /// Filled contours of `field` with about `levels` bands, drawn over the
    /// field's own extent.
    pub fn contourf(&mut self, field: ScalarField, levels: usize, spec: ImageSpec) -> &mut Self {
        let (x0, x1, y0, y1) = field.extent();
        let extent = [x0, x1, y0, y1];
        self.artists.push(Artist::Image(ImageArtist {
            field,
            extent,
            spec: spec.levels(levels),
        }));
        self
    }

    pub fn errorbar(
        &mut self,
        xs: &[f64],
        ys: &[f64],
        bars: ErrorBars,
        mut line: LineSpec,
    ) -> &mut Self {
        if line.color.is_none() {
            line.color = Some(self.line_cycle.next_color());
        }
        let count = xs.len();
        self.artists.push(Artist::ErrorBar(ErrorBarArtist {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
            xerr: bars.xerr.map(|err| broadcast(&err, count)),
            yerr: bars.yerr.map(|err| broadcast(&err, count)),
            capsize_pt: bars.capsize_pt,
            line,
        }));
        self
    }

    /// Patches added one by one default to the first cycle color.
    fn resolve_default(&self, style: &mut PatchStyle) {
        if style.fill == Paint::Auto {
            style.fill = Paint::Color(self.patch_cycle.first());
        }
        if style.edge == Paint::Auto {
            style.edge = Paint::None;
        }
    }

    /// Fills and bars advance the patch cycle.
    fn resolve_cycled(&mut self, style: &mut PatchStyle) {
        if style.fill == Paint::Auto {
            style.fill = Paint::Color(self.patch_cycle.next_color());
        }
        if style.edge == Paint::Auto {
            style.edge = Paint::None;
        }
    }

    pub(super) fn validate(&self) -> FigureResult<()> {
        for artist in &self.artists {
            validate_artist(artist)?;
        }
        if let Some(colorbar) = &self.colorbar {
            if !(colorbar.shrink > 0.0 && colorbar.shrink <= 1.0) || !(colorbar.aspect > 0.0) {
                return Err(FigureError::InvalidConfig(
                    "colorbar shrink must be in (0, 1] and aspect > 0".to_owned(),
                ));
            }
        }
        for (axis, name) in [(&self.x, "x"), (&self.y, "y")] {
            if let (Some(min), Some(max)) = axis.limits {
                if !min.is_finite() || !max.is_finite() || min == max {
                    return Err(FigureError::InvalidData(format!(
                        "{name} limits must be finite and distinct"
                    )));
                }
            }
        }
        match &self.twin {
            Some(twin) => twin.validate(),
            None => Ok(()),
        }
    }
}

fn labeled_ticks(ticks: &[f64], labels: &[&str]) -> TickSpec {
    TickSpec::Labeled(
        ticks
            .iter()
            .zip(labels)
            .map(|(tick, label)| (*tick, (*label).to_owned()))
            .collect(),
    )
}

/// A single value repeated to `len`; longer inputs are kept as they are.
fn broadcast(values: &[f64], len: usize) -> Vec<f64> {
    match values {
        [single] if len > 1 => vec![*single; len],
        _ => values.to_vec(),
    }
}

fn same_len(kind: &str, expected: usize, actual: usize) -> FigureResult<()> {
    if expected != actual {
        return Err(FigureError::InvalidData(format!(
            "{kind}: expected {expected} values, got {actual}"
        )));
    }
    Ok(())
}

fn validate_artist(artist: &Artist) -> FigureResult<()> {
    match artist {
        Artist::Line(line) => same_len("line", line.xs.len(), line.ys.len()),
        Artist::Scatter(scatter) => {
            same_len("scatter", scatter.xs.len(), scatter.ys.len())?;
            let count = scatter.xs.len();
            if scatter.spec.colors.len() > 1 {
                same_len("scatter colors", count, scatter.spec.colors.len())?;
            }
            if scatter.spec.sizes_pt2.len() > 1 {
                same_len("scatter sizes", count, scatter.spec.sizes_pt2.len())?;
            }
            Ok(())
        }
        Artist::Fill(fill) => {
            let count = fill.independent.len();
            same_len("fill lower curve", count, fill.first.len())?;
            same_len("fill upper curve", count, fill.second.len())?;
            if let Some(mask) = &fill.mask {
                same_len("fill mask", count, mask.len())?;
            }
            Ok(())
        }
        Artist::Bars(bars) => {
            same_len("bars", bars.positions.len(), bars.lengths.len())?;
            if bars.colors.len() > 1 {
                same_len("bar colors", bars.positions.len(), bars.colors.len())?;
            }
            if !(bars.thickness > 0.0) {
                return Err(FigureError::InvalidData("bar thickness must be > 0".to_owned()));
            }
            Ok(())
        }
        Artist::Patch(patch) => match &patch.shape {
            PatchShape::Polygon(points) if points.len() < 3 => Err(FigureError::InvalidData(
                "polygon patch needs at least 3 vertices".to_owned(),
            )),
            _ => Ok(()),
        },
        Artist::ErrorBar(errorbar) => {
            let count = errorbar.xs.len();
            same_len("errorbar", count, errorbar.ys.len())?;
            for err in [&errorbar.xerr, &errorbar.yerr].into_iter().flatten() {
                same_len("errorbar error", count, err.len())?;
            }
            Ok(())
        }
        Artist::Image(image) => {
            let [x0, x1, y0, y1] = image.extent;
            if x0 == x1 || y0 == y1 || !image.extent.iter().all(|v| v.is_finite()) {
                return Err(FigureError::InvalidData(
                    "image extent must be finite and non-empty".to_owned(),
                ));
            }
            Ok(())
        }
        Artist::Text(text) => {
            if text.text.trim().is_empty() {
                return Err(FigureError::InvalidData("text must not be empty".to_owned()));
            }
            Ok(())
        }
        Artist::Span(_) | Artist::RefLine(_) | Artist::Arrow(_) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::colors::RED;

    fn axes() -> Axes {
        Axes::new(
            GridSlot::cell(0, 0),
            vec![Color::from_hex(0x111111), Color::from_hex(0x222222)],
        )
    }

    #[test]
    fn lines_and_fills_use_separate_cycles() {
        let mut ax = axes();
        ax.plot(&[0.0, 1.0], &[0.0, 1.0], LineSpec::new())
            .plot(&[0.0, 1.0], &[1.0, 0.0], LineSpec::new())
            .fill_between(&[0.0, 1.0], &[0.0], &[1.0], PatchStyle::new());
        let colors: Vec<Color> = ax
            .artists()
            .iter()
            .map(|artist| match artist {
                Artist::Line(line) => line.spec.color.unwrap(),
                Artist::Fill(fill) => fill.style.fill.color().unwrap(),
                other => panic!("unexpected artist {other:?}"),
            })
            .collect();
        assert_eq!(
            colors,
            vec![
                Color::from_hex(0x111111),
                Color::from_hex(0x222222),
                Color::from_hex(0x111111),
            ]
        );
    }

    #[test]
    fn scalar_fill_bounds_are_broadcast() {
        let mut ax = axes();
        ax.fill_between(&[0.0, 1.0, 2.0], &[0.0], &[1.0], PatchStyle::filled(RED));
        match &ax.artists()[0] {
            Artist::Fill(fill) => assert_eq!(fill.first, vec![0.0; 3]),
            other => panic!("unexpected artist {other:?}"),
        }
        assert!(ax.validate().is_ok());
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let mut ax = axes();
        ax.plot(&[0.0, 1.0], &[0.0], LineSpec::new());
        assert!(matches!(ax.validate(), Err(FigureError::InvalidData(_))));
    }

    #[test]
    fn imshow_switches_to_equal_box_and_twin_has_no_grid() {
        let mut ax = axes();
        let field = ScalarField::sample(vec![0.0, 1.0], vec![0.0, 1.0], |x, y| x + y).unwrap();
        ax.imshow(
            field,
            [0.0, 1.0, 0.0, 1.0],
            ImageSpec::of(crate::render::ColormapKind::Gray),
        );
        assert_eq!(ax.aspect, Aspect::EqualBox);
        let twin = ax.twin_x();
        assert_eq!(twin.grid, Some(GridLines::off()));
    }
}
