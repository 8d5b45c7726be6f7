use ordered_float::OrderedFloat;
use tracing::trace;

use crate::core::{PixelRect, ScaleKind};
use crate::error::FigureResult;

use super::artist::{Artist, Coords, Orientation};
use super::axes::{Aspect, Axes, AxisSpec, TickSpec};
use super::axis_ticks::{axis_tick_target_count, format_ticks, ticks_for_scale};
use super::layout_helpers::{estimate_text_height_px, fit_aspect, rotated_text_extent_px};
use super::panel_transform::{AxisLimits, PanelTransform};
use super::render_style::FigureStyle;

/// Fraction of the data range added on both sides of autoscaled limits.
const AUTOSCALE_MARGIN: f64 = 0.05;
/// Gap between tick marks and tick labels, in points.
const TICK_PAD_PT: f64 = 3.5;
/// Gap between tick labels and the axis label, in points.
const LABEL_PAD_PT: f64 = 4.0;
/// Gap between the plot (or its top decorations) and the title, in points.
pub(super) const TITLE_PAD_PT: f64 = 6.0;
/// Colorbar gap as a fraction of the cell width.
const COLORBAR_PAD_FRACTION: f64 = 0.05;

/// Style values converted to pixels at the render resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Metrics {
    pub px_per_pt: f64,
    pub style: FigureStyle,
}

impl Metrics {
    pub fn new(dpi: f64, style: FigureStyle) -> Self {
        Self {
            px_per_pt: dpi / 72.0,
            style,
        }
    }

    pub fn pt(&self, points: f64) -> f64 {
        points * self.px_per_pt
    }

    pub fn tick_font(&self) -> f64 {
        self.pt(self.style.tick_label_size_pt)
    }

    pub fn label_font(&self) -> f64 {
        self.pt(self.style.label_size_pt)
    }

    pub fn tick_length(&self) -> f64 {
        self.pt(self.style.tick_length_pt)
    }

    pub fn tick_pad(&self) -> f64 {
        self.pt(TICK_PAD_PT)
    }

    pub fn label_pad(&self) -> f64 {
        self.pt(LABEL_PAD_PT)
    }

    /// Stroke width in pixels, falling back to the style's line width.
    pub fn line_px(&self, width_pt: Option<f64>) -> f64 {
        self.pt(width_pt.unwrap_or(self.style.line_width_pt))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct AxisExtent {
    min: Option<OrderedFloat<f64>>,
    max: Option<OrderedFloat<f64>>,
    sticky: [Option<f64>; 2],
}

impl AxisExtent {
    fn include(&mut self, value: f64, scale: ScaleKind) {
        let usable = value.is_finite() && (scale == ScaleKind::Linear || value > 0.0);
        if !usable {
            return;
        }
        let value = OrderedFloat(value);
        self.min = Some(self.min.map_or(value, |min| min.min(value)));
        self.max = Some(self.max.map_or(value, |max| max.max(value)));
    }

    fn stick(&mut self, lower: f64, upper: f64) {
        let low = self.sticky[0].map_or(lower, |current| current.min(lower));
        let high = self.sticky[1].map_or(upper, |current| current.max(upper));
        self.sticky = [Some(low), Some(high)];
    }

    fn range(&self) -> Option<(f64, f64)> {
        Some((self.min?.0, self.max?.0))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct DataExtent {
    x: AxisExtent,
    y: AxisExtent,
}

impl DataExtent {
    fn point(&mut self, x: f64, y: f64, scales: (ScaleKind, ScaleKind)) {
        self.x.include(x, scales.0);
        self.y.include(y, scales.1);
    }

    fn add(&mut self, artist: &Artist, scales: (ScaleKind, ScaleKind)) {
        if artist.coords() == Coords::Axes {
            return;
        }
        match artist {
            Artist::Line(line) => {
                for (x, y) in line.xs.iter().zip(&line.ys) {
                    self.point(*x, *y, scales);
                }
            }
            Artist::Scatter(scatter) => {
                for (x, y) in scatter.xs.iter().zip(&scatter.ys) {
                    self.point(*x, *y, scales);
                }
            }
            Artist::Fill(fill) => {
                let (along, across) = match fill.orientation {
                    Orientation::Vertical => (&mut self.x, &mut self.y),
                    Orientation::Horizontal => (&mut self.y, &mut self.x),
                };
                let (along_scale, across_scale) = match fill.orientation {
                    Orientation::Vertical => scales,
                    Orientation::Horizontal => (scales.1, scales.0),
                };
                for value in &fill.independent {
                    along.include(*value, along_scale);
                }
                for value in fill.first.iter().chain(&fill.second) {
                    across.include(*value, across_scale);
                }
            }
            Artist::Span(span) => match span.orientation {
                Orientation::Horizontal => {
                    self.y.include(span.from, scales.1);
                    self.y.include(span.to, scales.1);
                }
                Orientation::Vertical => {
                    self.x.include(span.from, scales.0);
                    self.x.include(span.to, scales.0);
                }
            },
            Artist::RefLine(line) => match line.orientation {
                Orientation::Horizontal => self.y.include(line.value, scales.1),
                Orientation::Vertical => self.x.include(line.value, scales.0),
            },
            Artist::Bars(bars) => {
                let half = bars.thickness * 0.5;
                let (along, across, along_scale, across_scale) = match bars.orientation {
                    Orientation::Vertical => (&mut self.x, &mut self.y, scales.0, scales.1),
                    Orientation::Horizontal => (&mut self.y, &mut self.x, scales.1, scales.0),
                };
                for (position, length) in bars.positions.iter().zip(&bars.lengths) {
                    along.include(position - half, along_scale);
                    along.include(position + half, along_scale);
                    across.include(0.0, across_scale);
                    across.include(*length, across_scale);
                }
                across.stick(0.0, 0.0);
            }
            Artist::Patch(patch) => {
                for (x, y) in patch.shape.hull_points() {
                    self.point(x, y, scales);
                }
            }
            Artist::Arrow(arrow) => {
                for (x, y) in arrow.spec.outline(arrow.x, arrow.y, arrow.dx, arrow.dy) {
                    self.point(x, y, scales);
                }
            }
            Artist::Image(image) => {
                let [x0, x1, y0, y1] = image.extent;
                self.point(x0, y0, scales);
                self.point(x1, y1, scales);
                self.x.stick(x0.min(x1), x0.max(x1));
                self.y.stick(y0.min(y1), y0.max(y1));
            }
            Artist::ErrorBar(errorbar) => {
                for (index, (x, y)) in errorbar.xs.iter().zip(&errorbar.ys).enumerate() {
                    let dx = error_at(errorbar.xerr.as_ref(), index);
                    let dy = error_at(errorbar.yerr.as_ref(), index);
                    self.point(x - dx, y - dy, scales);
                    self.point(x + dx, y + dy, scales);
                }
            }
            Artist::Text(_) => {}
        }
    }
}

fn error_at(errors: Option<&Vec<f64>>, index: usize) -> f64 {
    errors.and_then(|e| e.get(index)).copied().unwrap_or(0.0)
}

fn extent_of(artists: &[Artist], scales: (ScaleKind, ScaleKind)) -> DataExtent {
    let mut extent = DataExtent::default();
    for artist in artists {
        extent.add(artist, scales);
    }
    extent
}

/// Widens a degenerate interval the way a nonsingular locator does.
fn nonsingular(lo: f64, hi: f64) -> (f64, f64) {
    if lo != hi {
        return (lo, hi);
    }
    if lo == 0.0 {
        (-0.05, 0.05)
    } else {
        (lo - 0.05 * lo.abs(), hi + 0.05 * hi.abs())
    }
}

fn autoscale(extent: &AxisExtent, scale: ScaleKind) -> (f64, f64) {
    let Some((data_lo, data_hi)) = extent.range() else {
        return match scale {
            ScaleKind::Linear => (0.0, 1.0),
            ScaleKind::Log10 => (1.0, 10.0),
        };
    };
    match scale {
        ScaleKind::Linear => {
            let (data_lo, data_hi) = nonsingular(data_lo, data_hi);
            let margin = (data_hi - data_lo) * AUTOSCALE_MARGIN;
            let mut lo = data_lo - margin;
            let mut hi = data_hi + margin;
            if let [Some(sticky_lo), Some(sticky_hi)] = extent.sticky {
                if sticky_lo <= data_lo && lo < sticky_lo {
                    lo = sticky_lo;
                }
                if sticky_hi >= data_hi && hi > sticky_hi {
                    hi = sticky_hi;
                }
            }
            (lo, hi)
        }
        ScaleKind::Log10 => {
            let (log_lo, log_hi) = if data_lo == data_hi {
                (data_lo.log10() - 1.0, data_hi.log10() + 1.0)
            } else {
                (data_lo.log10(), data_hi.log10())
            };
            let margin = (log_hi - log_lo) * AUTOSCALE_MARGIN;
            (10_f64.powf(log_lo - margin), 10_f64.powf(log_hi + margin))
        }
    }
}

fn resolve_limits(spec: &AxisSpec, extent: &AxisExtent) -> AxisLimits {
    let (auto_lo, auto_hi) = autoscale(extent, spec.scale);
    let (first, second) = match spec.limits {
        (Some(min), Some(max)) => (min, max),
        (Some(min), None) => (min, auto_hi.max(min)),
        (None, Some(max)) => (auto_lo.min(max), max),
        (None, None) => (auto_lo, auto_hi),
    };
    // set_ylim(100, 0) flips the axis.
    let reversed = first > second;
    let (lo, hi) = if reversed {
        (second, first)
    } else {
        (first, second)
    };
    let (lo, hi) = match spec.scale {
        ScaleKind::Linear => nonsingular(lo, hi),
        ScaleKind::Log10 if lo > 0.0 && lo < hi => (lo, hi),
        ScaleKind::Log10 => (1.0, 10.0),
    };
    AxisLimits {
        lo,
        hi,
        scale: spec.scale,
        inverted: spec.inverted != reversed,
    }
}

/// Grows one axis so a data unit spans the same pixels on both.
fn expand_to_equal(x: AxisLimits, y: AxisLimits, plot: PixelRect) -> (AxisLimits, AxisLimits) {
    if x.scale != ScaleKind::Linear || y.scale != ScaleKind::Linear || !plot.is_valid() {
        return (x, y);
    }
    let x_per_px = x.span() / plot.width;
    let y_per_px = y.span() / plot.height;
    let grow = |limits: AxisLimits, span: f64| {
        let center = (limits.lo + limits.hi) * 0.5;
        AxisLimits {
            lo: center - span * 0.5,
            hi: center + span * 0.5,
            ..limits
        }
    };
    if x_per_px < y_per_px {
        (grow(x, y_per_px * plot.width), y)
    } else {
        (x, grow(y, x_per_px * plot.height))
    }
}

/// Major ticks with labels, minor ticks, and the shared offset label.
#[derive(Debug, Clone, PartialEq, Default)]
pub(super) struct ResolvedTicks {
    pub major: Vec<(f64, String)>,
    pub minor: Vec<f64>,
    pub offset_text: Option<String>,
}

impl ResolvedTicks {
    fn max_label_extent(&self, font_px: f64, rotation_deg: f64) -> (f64, f64) {
        self.major
            .iter()
            .map(|(_, label)| rotated_text_extent_px(label, font_px, rotation_deg))
            .fold((0.0, 0.0), |(w, h), (lw, lh)| {
                (f64::max(w, lw), f64::max(h, lh))
            })
    }
}

fn within(limits: AxisLimits, value: f64) -> bool {
    let tolerance = (limits.hi - limits.lo).abs() * 1e-9;
    value >= limits.lo - tolerance && value <= limits.hi + tolerance
}

fn resolve_ticks(spec: &AxisSpec, limits: AxisLimits, budget: usize) -> ResolvedTicks {
    let values: Vec<f64> = match &spec.ticks {
        TickSpec::Hidden => return ResolvedTicks::default(),
        TickSpec::Labeled(ticks) => {
            return ResolvedTicks {
                major: ticks
                    .iter()
                    .filter(|(value, _)| within(limits, *value))
                    .cloned()
                    .collect(),
                ..ResolvedTicks::default()
            };
        }
        TickSpec::Fixed(values) => values
            .iter()
            .copied()
            .filter(|v| within(limits, *v))
            .collect(),
        TickSpec::Auto => ticks_for_scale(limits.scale, limits.lo, limits.hi, budget)
            .into_iter()
            .filter(|v| within(limits, *v))
            .collect(),
    };
    let labels = format_ticks(&values, spec.tick_format, limits.scale);
    let minor = match limits.scale {
        ScaleKind::Linear => Vec::new(),
        ScaleKind::Log10 => log_minor_ticks(limits),
    };
    ResolvedTicks {
        major: values.into_iter().zip(labels.labels).collect(),
        minor,
        offset_text: labels.offset_text,
    }
}

/// `k * 10^e` for `k` in 2..=9 inside the limits.
fn log_minor_ticks(limits: AxisLimits) -> Vec<f64> {
    let first = limits.lo.log10().floor() as i32;
    let last = limits.hi.log10().ceil() as i32;
    (first..=last)
        .flat_map(|exp| (2..=9).map(move |k| f64::from(k) * 10_f64.powi(exp)))
        .filter(|value| within(limits, *value))
        .collect()
}

/// Budget: one tick per three label heights on x and two on y.
fn tick_budget(length_px: f64, font_px: f64, horizontal: bool) -> usize {
    let per_tick = font_px * if horizontal { 3.0 } else { 2.0 };
    axis_tick_target_count(length_px, per_tick)
}

#[derive(Debug, Clone, PartialEq)]
pub(super) struct TwinProjection {
    pub transform: PanelTransform,
    pub x_ticks: ResolvedTicks,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct ColorbarGeometry {
    pub bar: PixelRect,
}

/// Geometry of one axes after limits, margins and aspect are resolved.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct PanelProjection {
    pub cell: PixelRect,
    pub transform: PanelTransform,
    pub x_ticks: ResolvedTicks,
    pub y_ticks: ResolvedTicks,
    pub twin: Option<TwinProjection>,
    pub colorbar: Option<ColorbarGeometry>,
}

struct Margins {
    left: f64,
    top: f64,
    right: f64,
    bottom: f64,
}

fn axis_label_height(label: Option<&String>, font_px: f64, pad_px: f64) -> f64 {
    label.map_or(0.0, |label| {
        pad_px + estimate_text_height_px(label, font_px)
    })
}

fn title_height(axes: &Axes, metrics: &Metrics) -> f64 {
    axes.title.as_ref().map_or(0.0, |title| {
        let size = metrics.pt(title.size_pt.unwrap_or(metrics.style.title_size_pt));
        estimate_text_height_px(&title.text, size) + metrics.pt(TITLE_PAD_PT)
    })
}

fn decoration_margins(
    axes: &Axes,
    x_ticks: &ResolvedTicks,
    y_ticks: &ResolvedTicks,
    twin_ticks: Option<&ResolvedTicks>,
    metrics: &Metrics,
) -> Margins {
    let title = title_height(axes, metrics);
    if !axes.axis_visible {
        return Margins {
            left: 0.0,
            top: title,
            right: 0.0,
            bottom: 0.0,
        };
    }
    let tick_font = metrics.tick_font();
    let label_font = metrics.label_font();
    let tick_block = |ticks: &ResolvedTicks, rotation: f64, horizontal: bool| {
        if ticks.major.is_empty() {
            return 0.0;
        }
        let (width, height) = ticks.max_label_extent(tick_font, rotation);
        metrics.tick_length() + metrics.tick_pad() + if horizontal { height } else { width }
    };

    let left = tick_block(y_ticks, 0.0, false)
        + axis_label_height(axes.y.label.as_ref(), label_font, metrics.label_pad());
    let bottom = tick_block(x_ticks, axes.x.tick_label_rotation_deg, true)
        + axis_label_height(axes.x.label.as_ref(), label_font, metrics.label_pad());
    let mut top = title;
    if y_ticks.offset_text.is_some() {
        top += estimate_text_height_px("1e", tick_font);
    }
    if let (Some(twin), Some(ticks)) = (axes.twin.as_deref(), twin_ticks) {
        top += tick_block(ticks, twin.x.tick_label_rotation_deg, true)
            + axis_label_height(twin.x.label.as_ref(), label_font, metrics.label_pad());
    }
    Margins {
        left,
        top,
        right: 0.0,
        bottom,
    }
}

/// Width the colorbar block needs to the right of a plot of `plot_height`.
fn colorbar_block_width(axes: &Axes, cell: PixelRect, plot_height: f64, metrics: &Metrics) -> f64 {
    let Some(spec) = &axes.colorbar else {
        return 0.0;
    };
    let bar_width = plot_height * spec.shrink / spec.aspect;
    let label_font = metrics.pt(spec.label_size_pt.unwrap_or(metrics.style.label_size_pt));
    let label = axis_label_height(spec.label.as_ref(), label_font, metrics.label_pad());
    // Widest colorbar labels are short numbers.
    let (number_width, _) = rotated_text_extent_px("0.000", metrics.tick_font(), 0.0);
    let ticks = metrics.tick_length() + metrics.tick_pad() + number_width;
    COLORBAR_PAD_FRACTION * cell.width + bar_width + ticks + label
}

fn primary_extent(axes: &Axes) -> (DataExtent, Option<DataExtent>) {
    let primary = extent_of(&axes.artists, (axes.x.scale, axes.y.scale));
    let twin = axes
        .twin
        .as_deref()
        .map(|twin| extent_of(&twin.artists, (twin.x.scale, axes.y.scale)));
    (primary, twin)
}

/// Resolves limits, ticks and the plot rectangle of `axes` inside `cell`.
pub(super) fn project_panel(
    axes: &Axes,
    cell: PixelRect,
    metrics: &Metrics,
) -> FigureResult<PanelProjection> {
    let (primary, twin_extent) = primary_extent(axes);
    let mut y_extent = primary.y;
    if let Some(twin) = &twin_extent {
        for value in [twin.y.min, twin.y.max].into_iter().flatten() {
            y_extent.include(value.0, axes.y.scale);
        }
    }
    let mut x_limits = resolve_limits(&axes.x, &primary.x);
    let mut y_limits = resolve_limits(&axes.y, &y_extent);
    let twin_limits = axes
        .twin
        .as_deref()
        .zip(twin_extent.as_ref())
        .map(|(twin, extent)| resolve_limits(&twin.x, &extent.x));

    let tick_font = metrics.tick_font();
    let x_budget = tick_budget(cell.width, tick_font, true);
    let y_budget = tick_budget(cell.height, tick_font, false);
    let draft_x = resolve_ticks(&axes.x, x_limits, x_budget);
    let draft_y = resolve_ticks(&axes.y, y_limits, y_budget);
    let draft_twin = axes
        .twin
        .as_deref()
        .zip(twin_limits)
        .map(|(twin, limits)| resolve_ticks(&twin.x, limits, x_budget));
    let margins = decoration_margins(axes, &draft_x, &draft_y, draft_twin.as_ref(), metrics);

    let plot_height = (cell.height - margins.top - margins.bottom).max(1.0);
    let right = margins.right + colorbar_block_width(axes, cell, plot_height, metrics);
    let mut plot = cell.inset(margins.left, margins.top, right, margins.bottom);
    if !plot.is_valid() {
        plot = PixelRect::new(cell.x, cell.y, cell.width.max(1.0), cell.height.max(1.0));
    }

    match axes.aspect {
        Aspect::Auto => {}
        Aspect::EqualBox => {
            if x_limits.scale == ScaleKind::Linear && y_limits.scale == ScaleKind::Linear {
                plot = fit_aspect(plot, y_limits.span() / x_limits.span());
            }
        }
        Aspect::EqualDatalim => {
            (x_limits, y_limits) = expand_to_equal(x_limits, y_limits, plot);
        }
    }

    let x_budget = tick_budget(plot.width, tick_font, true);
    let y_budget = tick_budget(plot.height, tick_font, false);
    let x_ticks = resolve_ticks(&axes.x, x_limits, x_budget);
    let y_ticks = resolve_ticks(&axes.y, y_limits, y_budget);
    let transform = PanelTransform::new(plot, x_limits, y_limits)?;
    let twin = match (axes.twin.as_deref(), twin_limits) {
        (Some(twin), Some(limits)) => Some(TwinProjection {
            transform: PanelTransform::new(plot, limits, y_limits)?,
            x_ticks: resolve_ticks(&twin.x, limits, x_budget),
        }),
        _ => None,
    };
    let colorbar = axes.colorbar.as_ref().map(|spec| {
        let length = plot.height * spec.shrink;
        let width = length / spec.aspect;
        ColorbarGeometry {
            bar: PixelRect::new(
                plot.right() + COLORBAR_PAD_FRACTION * cell.width,
                plot.y + (plot.height - length) * 0.5,
                width,
                length,
            ),
        }
    });

    trace!(
        x_lo = x_limits.lo,
        x_hi = x_limits.hi,
        y_lo = y_limits.lo,
        y_hi = y_limits.hi,
        plot_width = plot.width,
        plot_height = plot.height,
        "panel projected"
    );

    Ok(PanelProjection {
        cell,
        transform,
        x_ticks,
        y_ticks,
        twin,
        colorbar,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::artist::{ImageSpec, LineSpec, PatchStyle};
    use crate::api::layout::GridSlot;
    use crate::core::ScalarField;
    use crate::render::{Color, ColormapKind};

    fn axes() -> Axes {
        Axes::new(GridSlot::cell(0, 0), vec![Color::BLACK])
    }

    fn limits_of(axes: &Axes) -> (AxisLimits, AxisLimits) {
        let (extent, _) = primary_extent(axes);
        (
            resolve_limits(&axes.x, &extent.x),
            resolve_limits(&axes.y, &extent.y),
        )
    }

    #[test]
    fn autoscale_adds_five_percent() {
        let mut ax = axes();
        ax.plot(&[0.0, 10.0], &[-1.0, 1.0], LineSpec::new());
        let (x, y) = limits_of(&ax);
        assert!((x.lo + 0.5).abs() < 1e-12 && (x.hi - 10.5).abs() < 1e-12);
        assert!((y.lo + 1.1).abs() < 1e-12 && (y.hi - 1.1).abs() < 1e-12);
    }

    #[test]
    fn bars_stick_to_zero_and_images_to_extent() {
        let mut ax = axes();
        ax.bar(&[0.0, 1.0], &[3.0, 5.0], 0.5, PatchStyle::new());
        let (_, y) = limits_of(&ax);
        assert_eq!(y.lo, 0.0);
        assert!(y.hi > 5.0);

        let mut img = axes();
        let field = ScalarField::sample(vec![0.0, 1.0], vec![0.0, 1.0], |x, _| x).unwrap();
        let extent = [-2.0, 2.0, 0.0, 4.0];
        img.imshow(field, extent, ImageSpec::of(ColormapKind::Gray));
        let (x, y) = limits_of(&img);
        assert_eq!((x.lo, x.hi), (-2.0, 2.0));
        assert_eq!((y.lo, y.hi), (0.0, 4.0));
    }

    #[test]
    fn reversed_limits_invert_the_axis() {
        let mut ax = axes();
        ax.set_ylim(100.0, 0.0);
        let (_, y) = limits_of(&ax);
        assert!(y.inverted);
        assert_eq!((y.lo, y.hi), (0.0, 100.0));
    }

    #[test]
    fn empty_and_degenerate_ranges() {
        let ax = axes();
        let (x, _) = limits_of(&ax);
        assert_eq!((x.lo, x.hi), (0.0, 1.0));
        assert_eq!(nonsingular(0.0, 0.0), (-0.05, 0.05));
        assert_eq!(nonsingular(2.0, 2.0), (1.9, 2.1));
    }

    #[test]
    fn equal_datalim_grows_the_short_axis() {
        let x = AxisLimits {
            lo: 0.0,
            hi: 1.0,
            scale: ScaleKind::Linear,
            inverted: false,
        };
        let y = AxisLimits {
            lo: 0.0,
            hi: 1.0,
            ..x
        };
        let (x2, y2) = expand_to_equal(x, y, PixelRect::new(0.0, 0.0, 200.0, 100.0));
        assert!((x2.span() - 2.0).abs() < 1e-12);
        assert_eq!(y2, y);
        assert!((x2.lo + 0.5).abs() < 1e-12);
    }

    #[test]
    fn log_axes_get_minor_ticks() {
        let limits = AxisLimits {
            lo: 1.0,
            hi: 100.0,
            scale: ScaleKind::Log10,
            inverted: false,
        };
        let spec = AxisSpec {
            scale: ScaleKind::Log10,
            ..AxisSpec::default()
        };
        let ticks = resolve_ticks(&spec, limits, 9);
        assert_eq!(ticks.major.len(), 3);
        assert_eq!(ticks.minor.len(), 16);
    }

    #[test]
    fn projection_keeps_the_plot_inside_its_cell() {
        let mut ax = axes();
        ax.plot(&[0.0, 1.0], &[0.0, 1.0], LineSpec::new())
            .set_title("Panel")
            .set_xlabel("x")
            .set_ylabel("y");
        let cell = PixelRect::new(0.0, 0.0, 600.0, 400.0);
        let metrics = Metrics::new(100.0, FigureStyle::default());
        let projection = project_panel(&ax, cell, &metrics).unwrap();
        let plot = projection.transform.plot;
        assert!(plot.x > cell.x && plot.y > cell.y);
        assert!(plot.right() <= cell.right() && plot.bottom() < cell.bottom());
        assert!(!projection.x_ticks.major.is_empty());
    }
}
