use crate::core::{PanelId, PixelRect, ScaleKind};
use crate::render::{
    CanvasLayerKind, Color, DrawCommand, ImagePrimitive, LayeredRenderFrame, LinePrimitive,
    RectPrimitive, Stroke, TextHAlign, TextPrimitive, TextVAlign,
};

use super::artist::Artist;
use super::artist_render::ColorScale;
use super::axes::{Axes, AxisSpec, ColorbarSpec, GridAxis};
use super::axis_ticks::{MAX_TICK_BINS, TickFormat, format_ticks, nice_linear_ticks};
use super::layout_helpers::{
    estimate_text_height_px, estimate_text_width_px, rotated_text_extent_px,
};
use super::panel_projection::{Metrics, PanelProjection, ResolvedTicks, TITLE_PAD_PT};
use super::panel_transform::PanelTransform;

const MINOR_TICK_LENGTH_PT: f64 = 2.0;
const MINOR_TICK_WIDTH_PT: f64 = 0.6;
/// Rows of a continuous colorbar ramp.
const COLORBAR_RAMP_ROWS: usize = 256;

#[derive(Debug, Clone, Copy)]
pub(super) struct AxisRenderContext<'a> {
    pub axes: &'a Axes,
    pub projection: &'a PanelProjection,
    pub metrics: &'a Metrics,
}

/// Routes decoration primitives into one panel's layers.
pub(super) struct AxisPrimitiveSink<'a> {
    layered: &'a mut LayeredRenderFrame,
    panel_id: PanelId,
}

impl<'a> AxisPrimitiveSink<'a> {
    pub(super) fn new(layered: &'a mut LayeredRenderFrame, panel_id: PanelId) -> Self {
        Self { layered, panel_id }
    }

    pub(super) fn push(&mut self, layer: CanvasLayerKind, command: DrawCommand) {
        self.layered.push(self.panel_id, layer, command);
    }

    fn push_line(&mut self, layer: CanvasLayerKind, line: LinePrimitive) {
        self.push(layer, DrawCommand::Line(line));
    }

    fn push_text(&mut self, layer: CanvasLayerKind, text: TextPrimitive) {
        if !text.text.trim().is_empty() {
            self.push(layer, DrawCommand::Text(text));
        }
    }
}

fn label_block(label: Option<&String>, metrics: &Metrics) -> f64 {
    label.map_or(0.0, |label| {
        metrics.label_pad() + estimate_text_height_px(label, metrics.label_font())
    })
}

fn tick_label_depth(
    ticks: &ResolvedTicks,
    spec: &AxisSpec,
    metrics: &Metrics,
    horizontal: bool,
) -> f64 {
    if ticks.major.is_empty() {
        return 0.0;
    }
    let font = metrics.tick_font();
    let extent = ticks
        .major
        .iter()
        .map(|(_, label)| {
            let (width, height) = rotated_text_extent_px(label, font, spec.tick_label_rotation_deg);
            if horizontal { height } else { width }
        })
        .fold(0.0, f64::max);
    metrics.tick_length() + metrics.tick_pad() + extent
}

fn rotated_alignment(spec: &AxisSpec, default: TextHAlign) -> TextHAlign {
    spec.tick_label_align.unwrap_or(default)
}

pub(super) fn append_axis_primitives(sink: &mut AxisPrimitiveSink<'_>, ctx: AxisRenderContext<'_>) {
    let AxisRenderContext {
        axes,
        projection,
        metrics,
    } = ctx;
    let plot = projection.transform.plot;

    if !axes.axis_visible {
        append_title(sink, axes, metrics, plot, plot.y);
        return;
    }

    sink.push(
        CanvasLayerKind::Background,
        DrawCommand::Rect(RectPrimitive::from_rect(
            plot,
            axes.face.unwrap_or(metrics.style.axes_face),
        )),
    );
    append_grid(sink, axes, projection, metrics);

    let spine_width = metrics.pt(metrics.style.axes_line_width_pt);
    for (x1, y1, x2, y2) in [
        (plot.x, plot.y, plot.right(), plot.y),
        (plot.x, plot.bottom(), plot.right(), plot.bottom()),
        (plot.x, plot.y, plot.x, plot.bottom()),
        (plot.right(), plot.y, plot.right(), plot.bottom()),
    ] {
        sink.push_line(
            CanvasLayerKind::Axis,
            LinePrimitive::new(x1, y1, x2, y2, spine_width, Color::BLACK),
        );
    }

    append_x_axis(
        sink,
        &axes.x,
        &projection.x_ticks,
        &projection.transform,
        metrics,
        false,
    );
    append_y_axis(
        sink,
        &axes.y,
        &projection.y_ticks,
        &projection.transform,
        metrics,
    );

    let mut title_bottom = plot.y;
    if projection.y_ticks.offset_text.is_some() {
        title_bottom -= estimate_text_height_px("1e", metrics.tick_font());
    }
    if let (Some(twin), Some(twin_projection)) = (axes.twin.as_deref(), projection.twin.as_ref()) {
        append_x_axis(
            sink,
            &twin.x,
            &twin_projection.x_ticks,
            &twin_projection.transform,
            metrics,
            true,
        );
        title_bottom -= tick_label_depth(&twin_projection.x_ticks, &twin.x, metrics, true)
            + label_block(twin.x.label.as_ref(), metrics);
    }
    append_title(sink, axes, metrics, plot, title_bottom);

    if let (Some(spec), Some(geometry)) = (axes.colorbar.as_ref(), projection.colorbar) {
        if let Some(scale) = last_color_scale(axes) {
            append_colorbar(sink, &scale, geometry.bar, spec, metrics);
        }
    }
}

fn append_title(
    sink: &mut AxisPrimitiveSink<'_>,
    axes: &Axes,
    metrics: &Metrics,
    plot: PixelRect,
    bottom: f64,
) {
    let Some(title) = &axes.title else {
        return;
    };
    let size = metrics.pt(title.size_pt.unwrap_or(metrics.style.title_size_pt));
    let mut text = TextPrimitive::new(
        title.text.clone(),
        plot.center().0,
        bottom - metrics.pt(TITLE_PAD_PT),
        size,
        Color::BLACK,
        TextHAlign::Center,
    )
    .with_v_align(TextVAlign::Bottom);
    text.bold = title.bold;
    sink.push_text(CanvasLayerKind::Axis, text);
}

struct GridResolved {
    axis: GridAxis,
    stroke: Stroke,
    minor: bool,
}

fn resolve_grid(axes: &Axes, metrics: &Metrics) -> Option<GridResolved> {
    let defaults = metrics.style.grid;
    let visible = axes.grid.map_or(defaults.visible, |grid| grid.visible);
    if !visible {
        return None;
    }
    let override_ = axes.grid.unwrap_or_default();
    let alpha = override_.alpha.unwrap_or(defaults.alpha);
    let style = override_.style.unwrap_or(defaults.style);
    Some(GridResolved {
        axis: override_.axis,
        stroke: Stroke::new(
            defaults.color.with_alpha(alpha),
            metrics.pt(defaults.width_pt),
        )
        .with_style(style),
        minor: override_.minor,
    })
}

fn append_grid(
    sink: &mut AxisPrimitiveSink<'_>,
    axes: &Axes,
    projection: &PanelProjection,
    metrics: &Metrics,
) {
    let Some(grid) = resolve_grid(axes, metrics) else {
        return;
    };
    let transform = &projection.transform;
    let plot = transform.plot;
    let line = |x1, y1, x2, y2| {
        LinePrimitive::new(x1, y1, x2, y2, grid.stroke.width, grid.stroke.color)
            .with_style(grid.stroke.style)
    };
    let minor_values = |ticks: &ResolvedTicks| {
        if grid.minor {
            ticks.minor.clone()
        } else {
            Vec::new()
        }
    };

    if matches!(grid.axis, GridAxis::Both | GridAxis::X) {
        let values = projection
            .x_ticks
            .major
            .iter()
            .map(|(v, _)| *v)
            .chain(minor_values(&projection.x_ticks));
        for px in values.filter_map(|v| transform.x_to_px(v)) {
            sink.push_line(CanvasLayerKind::Grid, line(px, plot.y, px, plot.bottom()));
        }
    }
    if matches!(grid.axis, GridAxis::Both | GridAxis::Y) {
        let values = projection
            .y_ticks
            .major
            .iter()
            .map(|(v, _)| *v)
            .chain(minor_values(&projection.y_ticks));
        for py in values.filter_map(|v| transform.y_to_px(v)) {
            sink.push_line(CanvasLayerKind::Grid, line(plot.x, py, plot.right(), py));
        }
    }
}

/// Bottom x axis, or the top axis of a twin when `top` is set.
fn append_x_axis(
    sink: &mut AxisPrimitiveSink<'_>,
    spec: &AxisSpec,
    ticks: &ResolvedTicks,
    transform: &PanelTransform,
    metrics: &Metrics,
    top: bool,
) {
    let plot = transform.plot;
    let (edge, direction) = if top {
        (plot.y, -1.0)
    } else {
        (plot.bottom(), 1.0)
    };
    let tick_length = metrics.tick_length();
    let width = metrics.pt(metrics.style.axes_line_width_pt);
    let label_y = edge + direction * (tick_length + metrics.tick_pad());
    let v_align = if top {
        TextVAlign::Bottom
    } else {
        TextVAlign::Top
    };
    let rotation = spec.tick_label_rotation_deg;

    for (value, label) in &ticks.major {
        let Some(px) = transform.x_to_px(*value) else {
            continue;
        };
        sink.push_line(
            CanvasLayerKind::Axis,
            LinePrimitive::new(
                px,
                edge,
                px,
                edge + direction * tick_length,
                width,
                Color::BLACK,
            ),
        );
        let align = if rotation == 0.0 {
            TextHAlign::Center
        } else {
            rotated_alignment(spec, TextHAlign::Center)
        };
        sink.push_text(
            CanvasLayerKind::Axis,
            TextPrimitive::new(
                label.clone(),
                px,
                label_y,
                metrics.tick_font(),
                spec.tick_label_color,
                align,
            )
            .with_v_align(v_align)
            .with_rotation(rotation),
        );
    }
    append_minor_ticks(
        sink,
        ticks.minor.iter().filter_map(|v| transform.x_to_px(*v)),
        metrics,
        |px, length| (px, edge, px, edge + direction * length),
    );

    let depth = tick_label_depth(ticks, spec, metrics, true);
    if let Some(offset) = &ticks.offset_text {
        sink.push_text(
            CanvasLayerKind::Axis,
            TextPrimitive::new(
                offset.clone(),
                plot.right(),
                edge + direction * depth,
                metrics.tick_font(),
                Color::BLACK,
                TextHAlign::Right,
            )
            .with_v_align(v_align),
        );
    }
    if let Some(label) = &spec.label {
        let y = edge + direction * (depth + metrics.label_pad());
        sink.push_text(
            CanvasLayerKind::Axis,
            TextPrimitive::new(
                label.clone(),
                plot.center().0,
                y,
                metrics.label_font(),
                spec.label_color,
                TextHAlign::Center,
            )
            .with_v_align(v_align),
        );
    }
}

fn append_y_axis(
    sink: &mut AxisPrimitiveSink<'_>,
    spec: &AxisSpec,
    ticks: &ResolvedTicks,
    transform: &PanelTransform,
    metrics: &Metrics,
) {
    let plot = transform.plot;
    let tick_length = metrics.tick_length();
    let width = metrics.pt(metrics.style.axes_line_width_pt);
    let label_x = plot.x - tick_length - metrics.tick_pad();

    for (value, label) in &ticks.major {
        let Some(py) = transform.y_to_px(*value) else {
            continue;
        };
        sink.push_line(
            CanvasLayerKind::Axis,
            LinePrimitive::new(plot.x - tick_length, py, plot.x, py, width, Color::BLACK),
        );
        sink.push_text(
            CanvasLayerKind::Axis,
            TextPrimitive::new(
                label.clone(),
                label_x,
                py,
                metrics.tick_font(),
                spec.tick_label_color,
                TextHAlign::Right,
            )
            .with_v_align(TextVAlign::Center),
        );
    }
    append_minor_ticks(
        sink,
        ticks.minor.iter().filter_map(|v| transform.y_to_px(*v)),
        metrics,
        |py, length| (plot.x - length, py, plot.x, py),
    );

    if let Some(offset) = &ticks.offset_text {
        sink.push_text(
            CanvasLayerKind::Axis,
            TextPrimitive::new(
                offset.clone(),
                plot.x,
                plot.y,
                metrics.tick_font(),
                Color::BLACK,
                TextHAlign::Left,
            )
            .with_v_align(TextVAlign::Bottom),
        );
    }
    if let Some(label) = &spec.label {
        let x = plot.x - tick_label_depth(ticks, spec, metrics, false) - metrics.label_pad();
        sink.push_text(
            CanvasLayerKind::Axis,
            TextPrimitive::new(
                label.clone(),
                x,
                plot.center().1,
                metrics.label_font(),
                spec.label_color,
                TextHAlign::Center,
            )
            .with_v_align(TextVAlign::Bottom)
            .with_rotation(90.0),
        );
    }
}

fn append_minor_ticks(
    sink: &mut AxisPrimitiveSink<'_>,
    positions: impl Iterator<Item = f64>,
    metrics: &Metrics,
    segment: impl Fn(f64, f64) -> (f64, f64, f64, f64),
) {
    let length = metrics.pt(MINOR_TICK_LENGTH_PT);
    let width = metrics.pt(MINOR_TICK_WIDTH_PT);
    for position in positions {
        let (x1, y1, x2, y2) = segment(position, length);
        sink.push_line(
            CanvasLayerKind::Axis,
            LinePrimitive::new(x1, y1, x2, y2, width, Color::BLACK),
        );
    }
}

/// Color scale of the most recently added image, twin artists last.
fn last_color_scale(axes: &Axes) -> Option<ColorScale> {
    let twin_artists = axes
        .twin
        .as_deref()
        .map(|twin| twin.artists.as_slice())
        .unwrap_or_default();
    axes.artists
        .iter()
        .chain(twin_artists)
        .filter_map(|artist| match artist {
            Artist::Image(image) => Some(ColorScale::for_image(image)),
            _ => None,
        })
        .last()
}

fn colorbar_ramp(scale: &ColorScale) -> Vec<Color> {
    match &scale.boundaries {
        Some(edges) if edges.len() >= 2 => edges
            .windows(2)
            .rev()
            .map(|pair| scale.color((pair[0] + pair[1]) * 0.5))
            .collect(),
        _ => (0..COLORBAR_RAMP_ROWS)
            .map(|row| {
                let t = 1.0 - (row as f64 + 0.5) / COLORBAR_RAMP_ROWS as f64;
                scale.color(scale.vmin + t * (scale.vmax - scale.vmin))
            })
            .collect(),
    }
}

fn append_colorbar(
    sink: &mut AxisPrimitiveSink<'_>,
    scale: &ColorScale,
    bar: PixelRect,
    spec: &ColorbarSpec,
    metrics: &Metrics,
) {
    if !bar.is_valid() {
        return;
    }
    let ramp = colorbar_ramp(scale);
    sink.push(
        CanvasLayerKind::Axis,
        DrawCommand::Image(ImagePrimitive::new(bar, 1, ramp.len(), ramp)),
    );
    let width = metrics.pt(metrics.style.axes_line_width_pt);
    sink.push(
        CanvasLayerKind::Axis,
        DrawCommand::Rect(
            RectPrimitive::from_rect(bar, Color::TRANSPARENT)
                .with_border(Stroke::new(Color::BLACK, width)),
        ),
    );

    let span = scale.vmax - scale.vmin;
    if !(span.is_finite() && span > 0.0) {
        return;
    }
    let budget =
        MAX_TICK_BINS.min((bar.height / (metrics.tick_font() * 2.0)).floor().max(1.0) as usize);
    let values: Vec<f64> = nice_linear_ticks(scale.vmin, scale.vmax, budget)
        .into_iter()
        .filter(|v| *v >= scale.vmin - span * 1e-9 && *v <= scale.vmax + span * 1e-9)
        .collect();
    let labels = format_ticks(&values, TickFormat::Auto, ScaleKind::Linear);
    let tick_length = metrics.tick_length();
    let label_x = bar.right() + tick_length + metrics.tick_pad();
    let mut widest: f64 = 0.0;
    for (value, label) in values.iter().zip(&labels.labels) {
        let py = bar.bottom() - (value - scale.vmin) / span * bar.height;
        sink.push_line(
            CanvasLayerKind::Axis,
            LinePrimitive::new(
                bar.right(),
                py,
                bar.right() + tick_length,
                py,
                width,
                Color::BLACK,
            ),
        );
        widest = widest.max(estimate_text_width_px(label, metrics.tick_font()));
        sink.push_text(
            CanvasLayerKind::Axis,
            TextPrimitive::new(
                label.clone(),
                label_x,
                py,
                metrics.tick_font(),
                Color::BLACK,
                TextHAlign::Left,
            )
            .with_v_align(TextVAlign::Center),
        );
    }
    if let Some(offset) = &labels.offset_text {
        sink.push_text(
            CanvasLayerKind::Axis,
            TextPrimitive::new(
                offset.clone(),
                bar.x,
                bar.y,
                metrics.tick_font(),
                Color::BLACK,
                TextHAlign::Left,
            )
            .with_v_align(TextVAlign::Bottom),
        );
    }
    if let Some(label) = &spec.label {
        let size = metrics.pt(spec.label_size_pt.unwrap_or(metrics.style.label_size_pt));
        let v_align = if spec.label_rotation_deg.rem_euclid(360.0) == 270.0 {
            TextVAlign::Bottom
        } else {
            TextVAlign::Top
        };
        sink.push_text(
            CanvasLayerKind::Axis,
            TextPrimitive::new(
                label.clone(),
                label_x + widest + metrics.label_pad(),
                bar.center().1,
                size,
                Color::BLACK,
                TextHAlign::Center,
            )
            .with_v_align(v_align)
            .with_rotation(spec.label_rotation_deg),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::artist::{ImageSpec, LineSpec};
    use crate::api::layout::GridSlot;
    use crate::api::panel_projection::project_panel;
    use crate::api::render_style::FigureStyle;
    use crate::core::{ScalarField, Viewport};
    use crate::render::{ColormapKind, PanelLayerStack};

    fn render(axes: &Axes) -> LayeredRenderFrame {
        let metrics = Metrics::new(72.0, FigureStyle::default());
        let cell = PixelRect::new(0.0, 0.0, 640.0, 480.0);
        let projection = project_panel(axes, cell, &metrics).unwrap();
        let panel = PanelId::new(0);
        let mut layered = LayeredRenderFrame::from_stacks(
            Viewport::new(640, 480),
            vec![PanelLayerStack::canonical_for_panel(panel)],
        )
        .with_panel_regions(&[(panel, projection.transform.plot)]);
        let mut sink = AxisPrimitiveSink::new(&mut layered, panel);
        append_axis_primitives(
            &mut sink,
            AxisRenderContext {
                axes,
                projection: &projection,
                metrics: &metrics,
            },
        );
        layered
    }

    fn layer_len(layered: &LayeredRenderFrame, kind: CanvasLayerKind) -> usize {
        layered.panels[0]
            .layers
            .iter()
            .find(|layer| layer.kind == kind)
            .map_or(0, |layer| layer.commands.len())
    }

    #[test]
    fn axis_off_keeps_only_the_title() {
        let mut axes = Axes::new(GridSlot::cell(0, 0), vec![Color::BLACK]);
        axes.plot(&[0.0, 1.0], &[0.0, 1.0], LineSpec::new())
            .set_title("Setup")
            .axis_off();
        let layered = render(&axes);
        let frame = layered.flatten();
        assert_eq!(frame.commands.len(), 1);
        assert_eq!(frame.texts().next().map(|t| t.text.as_str()), Some("Setup"));
    }

    #[test]
    fn grid_follows_major_ticks() {
        let mut axes = Axes::new(GridSlot::cell(0, 0), vec![Color::BLACK]);
        axes.plot(&[0.0, 1.0], &[0.0, 1.0], LineSpec::new())
            .grid(true);
        let layered = render(&axes);
        assert!(layer_len(&layered, CanvasLayerKind::Grid) >= 4);
        assert_eq!(layer_len(&layered, CanvasLayerKind::Background), 1);
    }

    #[test]
    fn colorbar_draws_a_ramp_and_label() {
        let mut axes = Axes::new(GridSlot::cell(0, 0), vec![Color::BLACK]);
        let field = ScalarField::sample(vec![0.0, 1.0, 2.0], vec![0.0, 1.0], |x, y| x + y).unwrap();
        axes.contourf(field, 5, ImageSpec::of(ColormapKind::Coolwarm))
            .colorbar(ColorbarSpec::new().label("Density"));
        let frame = render(&axes).flatten();
        assert!(frame.texts().any(|text| text.text == "Density"));
        assert_eq!(frame.count(crate::render::PrimitiveKind::Image), 1);
    }
}
