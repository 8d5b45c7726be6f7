use crate::core::{PixelRect, ScalarField};
use crate::render::{
    CanvasLayerKind, Color, Colormap, DrawCommand, EllipsePrimitive, ImageInterpolation,
    ImagePrimitive, LinePrimitive, MarkerPrimitive, PolygonPrimitive, PolylinePrimitive,
    RectPrimitive, Stroke, TextBox, TextPrimitive,
};

use super::artist::{
    Artist, BarArtist, ErrorBarArtist, FillArtist, ImageArtist, ImageOrigin, LineSpec,
    Orientation, PatchShape, PatchStyle, RefLineArtist, ScatterArtist, SpanArtist, TextArtist,
};
use super::axis_ticks::nice_linear_ticks;
use super::legend::{HandleMarker, LegendEntry, LegendHandle};
use super::panel_projection::Metrics;
use super::panel_transform::PanelTransform;

/// Vertices used to approximate rotated ellipses.
const ELLIPSE_SEGMENTS: usize = 72;
/// Filled contours are drawn on a lattice this many times finer.
const CONTOUR_UPSAMPLE: usize = 3;

/// Value-to-color mapping of an image artist, shared with its colorbar.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct ColorScale {
    pub colormap: Colormap,
    pub vmin: f64,
    pub vmax: f64,
    /// Ascending band edges of a filled contour.
    pub boundaries: Option<Vec<f64>>,
    pub alpha: Option<f64>,
}

impl ColorScale {
    pub fn for_image(image: &ImageArtist) -> Self {
        let (lo, hi) = image.field.min_max().unwrap_or((0.0, 1.0));
        let spec = image.spec;
        let (lo, hi) = (spec.vmin.unwrap_or(lo), spec.vmax.unwrap_or(hi));
        match spec.levels {
            Some(levels) => {
                let boundaries = contour_levels(lo, hi, levels);
                let vmin = boundaries.first().copied().unwrap_or(lo);
                let vmax = boundaries.last().copied().unwrap_or(hi);
                Self {
                    colormap: spec.colormap,
                    vmin,
                    vmax,
                    boundaries: Some(boundaries),
                    alpha: spec.alpha,
                }
            }
            None => Self {
                colormap: spec.colormap,
                vmin: lo,
                vmax: hi,
                boundaries: None,
                alpha: spec.alpha,
            },
        }
    }

    pub fn color(&self, value: f64) -> Color {
        let color = match &self.boundaries {
            Some(edges) if edges.len() >= 2 => {
                let band = edges
                    .windows(2)
                    .position(|pair| value < pair[1])
                    .unwrap_or(edges.len() - 2);
                let mid = (edges[band] + edges[band + 1]) * 0.5;
                self.colormap.sample_range(mid, self.vmin, self.vmax)
            }
            _ => self.colormap.sample_range(value, self.vmin, self.vmax),
        };
        match self.alpha {
            Some(alpha) => color.with_alpha(alpha),
            None => color,
        }
    }
}

/// Band edges on a "nice" step, widened to cover `[lo, hi]`.
pub(super) fn contour_levels(lo: f64, hi: f64, levels: usize) -> Vec<f64> {
    let ticks = nice_linear_ticks(lo, hi, levels.max(1) + 1);
    let step = match ticks.as_slice() {
        [first, second, ..] => second - first,
        _ => 1.0,
    };
    if !(step > 0.0) || lo >= hi {
        return vec![lo - 0.5, hi + 0.5];
    }
    let first = (lo / step).floor() * step;
    let last = (hi / step).ceil() * step;
    let count = ((last - first) / step).round().max(1.0) as usize;
    (0..=count).map(|index| first + index as f64 * step).collect()
}

/// Bilinear resampling on a lattice `factor` times finer.
fn upsample(field: &ScalarField, factor: usize) -> (usize, usize, Vec<f64>) {
    let (columns, rows) = (field.columns(), field.rows());
    let fine = |n: usize| if n > 1 { (n - 1) * factor + 1 } else { 1 };
    let (fine_columns, fine_rows) = (fine(columns), fine(rows));
    let mut values = Vec::with_capacity(fine_columns * fine_rows);
    for row in 0..fine_rows {
        let v = row as f64 / factor as f64;
        let r0 = (v.floor() as usize).min(rows - 1);
        let r1 = (r0 + 1).min(rows - 1);
        let fy = v - r0 as f64;
        for column in 0..fine_columns {
            let u = column as f64 / factor as f64;
            let c0 = (u.floor() as usize).min(columns - 1);
            let c1 = (c0 + 1).min(columns - 1);
            let fx = u - c0 as f64;
            let at = |c, r| field.at(c, r).unwrap_or(f64::NAN);
            let top = at(c0, r0) * (1.0 - fx) + at(c1, r0) * fx;
            let bottom = at(c0, r1) * (1.0 - fx) + at(c1, r1) * fx;
            values.push(top * (1.0 - fy) + bottom * fy);
        }
    }
    (fine_columns, fine_rows, values)
}

fn with_alpha(color: Color, alpha: Option<f64>) -> Color {
    alpha.map_or(color, |alpha| color.with_alpha(alpha))
}

fn line_color(spec: &LineSpec) -> Color {
    with_alpha(spec.color.unwrap_or(Color::BLACK), spec.alpha)
}

/// Splits projected vertices into runs of placeable points.
fn projected_runs(points: impl Iterator<Item = Option<(f64, f64)>>) -> Vec<Vec<(f64, f64)>> {
    let mut runs = vec![Vec::new()];
    for point in points {
        match point {
            Some(point) => {
                if let Some(run) = runs.last_mut() {
                    run.push(point);
                }
            }
            None => {
                if runs.last().is_some_and(|run| !run.is_empty()) {
                    runs.push(Vec::new());
                }
            }
        }
    }
    runs.retain(|run| !run.is_empty());
    runs
}

fn crossing(
    independent: &[f64],
    first: &[f64],
    second: &[f64],
    from: usize,
    to: usize,
) -> Option<(f64, f64)> {
    let d0 = first[from] - second[from];
    let d1 = first[to] - second[to];
    let denominator = d0 - d1;
    if denominator == 0.0 || !denominator.is_finite() {
        return None;
    }
    let t = (d0 / denominator).clamp(0.0, 1.0);
    Some((
        independent[from] + t * (independent[to] - independent[from]),
        first[from] + t * (first[to] - first[from]),
    ))
}

/// Outlines of the filled regions in `(independent, value)` coordinates.
fn fill_outlines(fill: &FillArtist) -> Vec<Vec<(f64, f64)>> {
    let count = fill.independent.len();
    let included = |index: usize| fill.mask.as_ref().is_none_or(|mask| mask[index]);
    let mut outlines = Vec::new();
    let mut index = 0;
    while index < count {
        if !included(index) {
            index += 1;
            continue;
        }
        let start = index;
        while index < count && included(index) {
            index += 1;
        }
        let end = index - 1;

        let mut outline = Vec::with_capacity(2 * (end - start + 1) + 2);
        if fill.interpolate && start > 0 {
            outline.extend(crossing(
                &fill.independent,
                &fill.first,
                &fill.second,
                start - 1,
                start,
            ));
        }
        outline.extend((start..=end).map(|i| (fill.independent[i], fill.first[i])));
        if fill.interpolate && end + 1 < count {
            outline.extend(crossing(&fill.independent, &fill.first, &fill.second, end, end + 1));
        }
        outline.extend((start..=end).rev().map(|i| (fill.independent[i], fill.second[i])));
        if outline.len() >= 3 {
            outlines.push(outline);
        }
    }
    outlines
}

/// Draw commands of a panel's artists, sorted by paint layer on insertion.
pub(super) struct ArtistPainter<'a> {
    transform: &'a PanelTransform,
    metrics: &'a Metrics,
    pub commands: Vec<(CanvasLayerKind, DrawCommand)>,
    /// Pixel positions of plotted data, consulted by `LegendLocation::Best`.
    pub occupied: Vec<(f64, f64)>,
}

impl<'a> ArtistPainter<'a> {
    pub fn new(transform: &'a PanelTransform, metrics: &'a Metrics) -> Self {
        Self {
            transform,
            metrics,
            commands: Vec::new(),
            occupied: Vec::new(),
        }
    }

    fn push(&mut self, layer: CanvasLayerKind, command: DrawCommand) {
        self.commands.push((layer, command));
    }

    fn stroke(&self, style: &PatchStyle) -> Option<Stroke> {
        style.edge_color().map(|color| {
            Stroke::new(color, self.metrics.pt(style.line_width_pt)).with_style(style.line_style)
        })
    }

    fn push_polygon(&mut self, points: Vec<(f64, f64)>, style: &PatchStyle) {
        if points.len() < 3 {
            return;
        }
        let face = style.face_color().unwrap_or(Color::TRANSPARENT);
        let mut polygon = PolygonPrimitive::new(points, face);
        if let Some(stroke) = self.stroke(style) {
            polygon = polygon.with_border(stroke);
        }
        self.push(CanvasLayerKind::Patch, DrawCommand::Polygon(polygon));
    }

    fn push_rect(
        &mut self,
        corners: ((f64, f64), (f64, f64)),
        fill: Color,
        style: &PatchStyle,
        radius: f64,
    ) {
        let ((x0, y0), (x1, y1)) = corners;
        let (width, height) = ((x1 - x0).abs(), (y1 - y0).abs());
        let mut rect = RectPrimitive::new(x0.min(x1), y0.min(y1), width, height, fill)
            .with_corner_radius(radius);
        if let Some(stroke) = self.stroke(style) {
            rect = rect.with_border(stroke);
        }
        self.push(CanvasLayerKind::Patch, DrawCommand::Rect(rect));
    }

    pub fn paint(&mut self, artist: &Artist) {
        match artist {
            Artist::Line(line) => self.paint_line(&line.xs, &line.ys, &line.spec),
            Artist::Scatter(scatter) => self.paint_scatter(scatter),
            Artist::Fill(fill) => self.paint_fill(fill),
            Artist::Span(span) => self.paint_span(span),
            Artist::RefLine(line) => self.paint_ref_line(line),
            Artist::Bars(bars) => self.paint_bars(bars),
            Artist::Patch(patch) => self.paint_patch(&patch.shape, &patch.style),
            Artist::Arrow(arrow) => {
                let coords = arrow.spec.style.coords;
                let points = arrow
                    .spec
                    .outline(arrow.x, arrow.y, arrow.dx, arrow.dy)
                    .into_iter()
                    .filter_map(|(x, y)| self.transform.to_px(coords, x, y))
                    .collect();
                self.push_polygon(points, &arrow.spec.style);
            }
            Artist::Text(text) => self.paint_text(text),
            Artist::Image(image) => self.paint_image(image),
            Artist::ErrorBar(errorbar) => self.paint_errorbar(errorbar),
        }
    }

    fn paint_line(&mut self, xs: &[f64], ys: &[f64], spec: &LineSpec) {
        let color = line_color(spec);
        let width = self.metrics.line_px(spec.width_pt);
        let points: Vec<Option<(f64, f64)>> = xs
            .iter()
            .zip(ys)
            .map(|(x, y)| self.transform.to_px(spec.coords, *x, *y))
            .collect();
        self.occupied.extend(points.iter().flatten());

        if !spec.hide_line && width > 0.0 {
            let stroke = Stroke::new(color, width).with_style(spec.style);
            for run in projected_runs(points.iter().copied()) {
                if run.len() >= 2 {
                    self.push(
                        CanvasLayerKind::Series,
                        DrawCommand::Polyline(PolylinePrimitive::new(run, stroke)),
                    );
                }
            }
        }
        if let Some(marker) = line_marker(spec, self.metrics) {
            for (x, y) in points.into_iter().flatten() {
                self.push(CanvasLayerKind::Marker, marker.at(x, y));
            }
        }
    }

    fn paint_scatter(&mut self, scatter: &ScatterArtist) {
        let spec = &scatter.spec;
        let edge_width = self.metrics.line_px(spec.edge_width_pt);
        for (index, (x, y)) in scatter.xs.iter().zip(&scatter.ys).enumerate() {
            let Some((px, py)) = self.transform.to_px(spec.coords, *x, *y) else {
                continue;
            };
            let face = spec
                .colors
                .get(index)
                .or(spec.colors.first())
                .copied()
                .unwrap_or(Color::BLACK);
            let area = spec
                .sizes_pt2
                .get(index)
                .or(spec.sizes_pt2.first())
                .copied()
                .unwrap_or(36.0);
            let diameter = self.metrics.pt(area.max(0.0).sqrt());
            if diameter <= 0.0 {
                continue;
            }
            let face = with_alpha(face, spec.alpha);
            let edge = with_alpha(spec.edge.unwrap_or(face), spec.alpha);
            self.occupied.push((px, py));
            self.push(
                CanvasLayerKind::Marker,
                DrawCommand::Marker(
                    MarkerPrimitive::new(px, py, diameter, spec.shape, face)
                        .with_edge(Stroke::new(edge, edge_width)),
                ),
            );
        }
    }

    fn paint_fill(&mut self, fill: &FillArtist) {
        let coords = fill.style.coords;
        for outline in fill_outlines(fill) {
            let points = outline
                .into_iter()
                .filter_map(|(along, across)| match fill.orientation {
                    Orientation::Vertical => self.transform.to_px(coords, along, across),
                    Orientation::Horizontal => self.transform.to_px(coords, across, along),
                })
                .collect();
            self.push_polygon(points, &fill.style);
        }
    }

    fn paint_span(&mut self, span: &SpanArtist) {
        let plot = self.transform.plot;
        let corners = match span.orientation {
            Orientation::Horizontal => self
                .transform
                .y_to_px(span.from)
                .zip(self.transform.y_to_px(span.to))
                .map(|(y0, y1)| ((plot.x, y0), (plot.right(), y1))),
            Orientation::Vertical => self
                .transform
                .x_to_px(span.from)
                .zip(self.transform.x_to_px(span.to))
                .map(|(x0, x1)| ((x0, plot.y), (x1, plot.bottom()))),
        };
        if let Some(corners) = corners {
            let fill = span.style.face_color().unwrap_or(Color::TRANSPARENT);
            self.push_rect(corners, fill, &span.style, 0.0);
        }
    }

    fn paint_ref_line(&mut self, line: &RefLineArtist) {
        let plot = self.transform.plot;
        let (from, to) = line.extent;
        let segment = match line.orientation {
            Orientation::Horizontal => self.transform.y_to_px(line.value).map(|y| {
                (plot.x + from * plot.width, y, plot.x + to * plot.width, y)
            }),
            Orientation::Vertical => self.transform.x_to_px(line.value).map(|x| {
                let bottom = plot.bottom();
                (x, bottom - from * plot.height, x, bottom - to * plot.height)
            }),
        };
        let width = self.metrics.line_px(line.spec.width_pt);
        if let Some((x1, y1, x2, y2)) = segment.filter(|_| width > 0.0) {
            self.push(
                CanvasLayerKind::Series,
                DrawCommand::Line(
                    LinePrimitive::new(x1, y1, x2, y2, width, line_color(&line.spec))
                        .with_style(line.spec.style),
                ),
            );
        }
    }

    fn paint_bars(&mut self, bars: &BarArtist) {
        let half = bars.thickness * 0.5;
        for (index, (position, length)) in bars.positions.iter().zip(&bars.lengths).enumerate() {
            let (a, b) = match bars.orientation {
                Orientation::Vertical => ((position - half, 0.0), (position + half, *length)),
                Orientation::Horizontal => ((0.0, position - half), (*length, position + half)),
            };
            let corners = self
                .transform
                .data_to_px(a.0, a.1)
                .zip(self.transform.data_to_px(b.0, b.1));
            let Some(corners) = corners else {
                continue;
            };
            let face = match bars.colors.get(index) {
                Some(color) => Some(with_alpha(*color, bars.style.alpha)),
                None => bars.style.face_color(),
            };
            let tip = match bars.orientation {
                Orientation::Vertical => ((corners.0.0 + corners.1.0) * 0.5, corners.1.1),
                Orientation::Horizontal => (corners.1.0, (corners.0.1 + corners.1.1) * 0.5),
            };
            self.occupied.push(tip);
            let fill = face.unwrap_or(Color::TRANSPARENT);
            self.push_rect(corners, fill, &bars.style, 0.0);
        }
    }

    fn paint_patch(&mut self, shape: &PatchShape, style: &PatchStyle) {
        let coords = style.coords;
        let transform = self.transform;
        let project = |x: f64, y: f64| transform.to_px(coords, x, y);
        match shape {
            PatchShape::Rect {
                x,
                y,
                width,
                height,
            } => {
                if let Some(corners) = project(*x, *y).zip(project(x + width, y + height)) {
                    let fill = style.face_color().unwrap_or(Color::TRANSPARENT);
                    self.push_rect(corners, fill, style, 0.0);
                }
            }
            PatchShape::RoundBox {
                x,
                y,
                width,
                height,
                pad,
            } => {
                let low = project(x - pad, y - pad);
                if let Some(corners) = low.zip(project(x + width + pad, y + height + pad)) {
                    let (sx, sy) = self.transform.linear_density(coords);
                    let radius = (pad * sx).abs().min((pad * sy).abs());
                    let fill = style.face_color().unwrap_or(Color::TRANSPARENT);
                    self.push_rect(corners, fill, style, radius);
                }
            }
            PatchShape::Circle { cx, cy, radius } => {
                self.paint_ellipse((*cx, *cy), radius * 2.0, radius * 2.0, 0.0, style);
            }
            PatchShape::Ellipse {
                cx,
                cy,
                width,
                height,
                angle_deg,
            } => {
                self.paint_ellipse((*cx, *cy), *width, *height, *angle_deg, style);
            }
            PatchShape::Polygon(points) => {
                let points = points.iter().filter_map(|(x, y)| project(*x, *y)).collect();
                self.push_polygon(points, style);
            }
        }
    }

    fn paint_ellipse(
        &mut self,
        center: (f64, f64),
        width: f64,
        height: f64,
        angle_deg: f64,
        style: &PatchStyle,
    ) {
        let coords = style.coords;
        let (a, b) = (width * 0.5, height * 0.5);
        if angle_deg == 0.0 {
            let projected = self
                .transform
                .to_px(coords, center.0, center.1)
                .zip(self.transform.to_px(coords, center.0 + a, center.1 + b));
            if let Some(((cx, cy), (ex, ey))) = projected {
                let (rx, ry) = ((ex - cx).abs(), (ey - cy).abs());
                if rx > 0.0 && ry > 0.0 {
                    let face = style.face_color().unwrap_or(Color::TRANSPARENT);
                    let mut ellipse = EllipsePrimitive::new(cx, cy, rx, ry, face);
                    if let Some(stroke) = self.stroke(style) {
                        ellipse = ellipse.with_border(stroke);
                    }
                    self.push(CanvasLayerKind::Patch, DrawCommand::Ellipse(ellipse));
                }
            }
            return;
        }
        // Rotation happens in data space, so non-square axes shear it.
        let (sin, cos) = angle_deg.to_radians().sin_cos();
        let points = (0..ELLIPSE_SEGMENTS)
            .filter_map(|index| {
                let t = index as f64 * std::f64::consts::TAU / ELLIPSE_SEGMENTS as f64;
                let (u, v) = (a * t.cos(), b * t.sin());
                let (x, y) = (center.0 + u * cos - v * sin, center.1 + u * sin + v * cos);
                self.transform.to_px(coords, x, y)
            })
            .collect();
        self.push_polygon(points, style);
    }

    fn paint_text(&mut self, text: &TextArtist) {
        let spec = &text.spec;
        let Some((x, y)) = self.transform.to_px(spec.coords, text.x, text.y) else {
            return;
        };
        let size = self
            .metrics
            .pt(spec.size_pt.unwrap_or(self.metrics.style.font_size_pt));
        let mut primitive =
            TextPrimitive::new(text.text.clone(), x, y, size, spec.color, spec.h_align)
                .with_v_align(spec.v_align)
                .with_rotation(spec.rotation_deg);
        primitive.bold = spec.bold;
        primitive.italic = spec.italic;
        primitive.background = spec.bbox.map(|bbox| TextBox {
            fill_color: with_alpha(bbox.fill, bbox.alpha),
            border: bbox.edge.map_or(Stroke::new(Color::TRANSPARENT, 0.0), |edge| {
                Stroke::new(with_alpha(edge, bbox.alpha), self.metrics.pt(1.0))
            }),
            padding_px: bbox.pad * size,
            rounded: bbox.rounded,
        });
        self.push(CanvasLayerKind::Annotation, DrawCommand::Text(primitive));
    }

    fn paint_image(&mut self, image: &ImageArtist) {
        let [x0, x1, y0, y1] = image.extent;
        let corners = self
            .transform
            .x_to_px(x0)
            .zip(self.transform.x_to_px(x1))
            .zip(self.transform.y_to_px(y0).zip(self.transform.y_to_px(y1)));
        let Some(((px0, px1), (py0, py1))) = corners else {
            return;
        };
        let (width, height) = ((px1 - px0).abs(), (py1 - py0).abs());
        let target = PixelRect::new(px0.min(px1), py0.min(py1), width, height);
        if !target.is_valid() {
            return;
        }

        let scale = ColorScale::for_image(image);
        let (columns, rows, values, interpolation) = if image.spec.levels.is_some() {
            let (columns, rows, values) = upsample(&image.field, CONTOUR_UPSAMPLE);
            (columns, rows, values, ImageInterpolation::Nearest)
        } else {
            let field = &image.field;
            (
                field.columns(),
                field.rows(),
                field.values().to_vec(),
                image.spec.interpolation,
            )
        };

        let row_zero_y = match image.spec.origin {
            ImageOrigin::Lower => py0,
            ImageOrigin::Upper => py1,
        };
        let other_y = match image.spec.origin {
            ImageOrigin::Lower => py1,
            ImageOrigin::Upper => py0,
        };
        let row_zero_on_top = row_zero_y < other_y;
        let flip_columns = px0 > px1;

        let mut pixels = Vec::with_capacity(columns * rows);
        for display_row in 0..rows {
            let row = if row_zero_on_top {
                display_row
            } else {
                rows - 1 - display_row
            };
            for display_column in 0..columns {
                let column = if flip_columns {
                    columns - 1 - display_column
                } else {
                    display_column
                };
                pixels.push(scale.color(values[row * columns + column]));
            }
        }
        self.push(
            CanvasLayerKind::Image,
            DrawCommand::Image(
                ImagePrimitive::new(target, columns, rows, pixels)
                    .with_interpolation(interpolation),
            ),
        );
    }

    fn paint_errorbar(&mut self, errorbar: &ErrorBarArtist) {
        let color = line_color(&errorbar.line);
        let width = self.metrics.line_px(errorbar.line.width_pt);
        let cap = self.metrics.pt(errorbar.capsize_pt);
        let mut segments = Vec::new();
        for (index, (x, y)) in errorbar.xs.iter().zip(&errorbar.ys).enumerate() {
            if let Some(dx) = errorbar.xerr.as_ref().and_then(|err| err.get(index)) {
                let ends = self
                    .transform
                    .data_to_px(x - dx, *y)
                    .zip(self.transform.data_to_px(x + dx, *y));
                if let Some(((x0, py), (x1, _))) = ends {
                    segments.push((x0, py, x1, py));
                    if cap > 0.0 {
                        segments.push((x0, py - cap, x0, py + cap));
                        segments.push((x1, py - cap, x1, py + cap));
                    }
                }
            }
            if let Some(dy) = errorbar.yerr.as_ref().and_then(|err| err.get(index)) {
                let ends = self
                    .transform
                    .data_to_px(*x, y - dy)
                    .zip(self.transform.data_to_px(*x, y + dy));
                if let Some(((px, y0), (_, y1))) = ends {
                    segments.push((px, y0, px, y1));
                    if cap > 0.0 {
                        segments.push((px - cap, y0, px + cap, y0));
                        segments.push((px - cap, y1, px + cap, y1));
                    }
                }
            }
        }
        if width > 0.0 {
            for (x1, y1, x2, y2) in segments {
                self.push(
                    CanvasLayerKind::Series,
                    DrawCommand::Line(LinePrimitive::new(x1, y1, x2, y2, width, color)),
                );
            }
        }
        self.paint_line(&errorbar.xs, &errorbar.ys, &errorbar.line);
    }
}

fn line_marker(spec: &LineSpec, metrics: &Metrics) -> Option<HandleMarker> {
    let marker = spec.marker?;
    let color = line_color(spec);
    Some(HandleMarker {
        shape: marker.shape,
        fill: with_alpha(marker.fill.unwrap_or(color), spec.alpha),
        edge: Stroke::new(
            with_alpha(marker.edge.unwrap_or(color), spec.alpha),
            metrics.pt(marker.edge_width_pt),
        ),
        size_px: metrics.pt(marker.size_pt.unwrap_or(metrics.style.marker_size_pt)),
    })
}

fn line_handle(spec: &LineSpec, metrics: &Metrics) -> LegendHandle {
    LegendHandle::Line {
        color: line_color(spec),
        width_px: metrics.line_px(spec.width_pt),
        style: spec.style,
        draw_line: !spec.hide_line,
        marker: line_marker(spec, metrics),
    }
}

fn patch_handle(style: &PatchStyle, face: Option<Color>, metrics: &Metrics) -> LegendHandle {
    LegendHandle::Patch {
        face,
        edge: style
            .edge_color()
            .map(|color| {
                Stroke::new(color, metrics.pt(style.line_width_pt)).with_style(style.line_style)
            }),
    }
}

/// Legend swatch for a labelled artist.
pub(super) fn legend_entry(artist: &Artist, metrics: &Metrics) -> Option<LegendEntry> {
    let label = artist.label()?.to_owned();
    let handle = match artist {
        Artist::Line(line) => line_handle(&line.spec, metrics),
        Artist::RefLine(line) => line_handle(&line.spec, metrics),
        Artist::ErrorBar(errorbar) => line_handle(&errorbar.line, metrics),
        Artist::Scatter(scatter) => {
            let spec = &scatter.spec;
            let first = spec.colors.first().copied().unwrap_or(Color::BLACK);
            let face = with_alpha(first, spec.alpha);
            let area = spec.sizes_pt2.first().copied().unwrap_or(36.0);
            LegendHandle::Marker(HandleMarker {
                shape: spec.shape,
                fill: face,
                edge: Stroke::new(
                    with_alpha(spec.edge.unwrap_or(face), spec.alpha),
                    metrics.line_px(spec.edge_width_pt),
                ),
                size_px: metrics.pt(area.max(1.0).sqrt()),
            })
        }
        Artist::Bars(bars) => {
            let face = bars
                .colors
                .first()
                .map(|color| with_alpha(*color, bars.style.alpha))
                .or(bars.style.face_color());
            patch_handle(&bars.style, face, metrics)
        }
        Artist::Fill(fill) => patch_handle(&fill.style, fill.style.face_color(), metrics),
        Artist::Span(span) => patch_handle(&span.style, span.style.face_color(), metrics),
        Artist::Patch(patch) => patch_handle(&patch.style, patch.style.face_color(), metrics),
        Artist::Arrow(arrow) => {
            patch_handle(&arrow.spec.style, arrow.spec.style.face_color(), metrics)
        }
        Artist::Text(_) | Artist::Image(_) => return None,
    };
    Some(LegendEntry { label, handle })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::artist::{ImageSpec, LineArtist, ScatterSpec};
    use crate::api::panel_transform::AxisLimits;
    use crate::api::render_style::FigureStyle;
    use crate::core::ScaleKind;
    use crate::render::ColormapKind;

    fn transform() -> PanelTransform {
        let limits = AxisLimits {
            lo: 0.0,
            hi: 10.0,
            scale: ScaleKind::Linear,
            inverted: false,
        };
        PanelTransform::new(PixelRect::new(0.0, 0.0, 100.0, 100.0), limits, limits).unwrap()
    }

    fn metrics() -> Metrics {
        Metrics::new(72.0, FigureStyle::default())
    }

    #[test]
    fn contour_levels_cover_the_range_on_a_nice_step() {
        let levels = contour_levels(0.3, 9.7, 10);
        assert_eq!(levels.first().copied(), Some(0.0));
        assert_eq!(levels.last().copied(), Some(10.0));
        assert!(levels.windows(2).all(|pair| pair[1] > pair[0]));
    }

    #[test]
    fn contour_bands_use_midpoint_colors() {
        let field = ScalarField::sample(vec![0.0, 1.0], vec![0.0, 1.0], |x, _| x * 10.0).unwrap();
        let image = ImageArtist {
            field,
            extent: [0.0, 1.0, 0.0, 1.0],
            spec: ImageSpec::of(ColormapKind::Gray).levels(2),
        };
        let scale = ColorScale::for_image(&image);
        let edges = scale.boundaries.clone().unwrap();
        assert_eq!(
            scale.color(edges[0]),
            scale.color((edges[0] + edges[1]) * 0.5)
        );
        assert_ne!(scale.color(edges[0]), scale.color(*edges.last().unwrap()));
    }

    #[test]
    fn masked_fill_extends_to_crossings() {
        let fill = FillArtist {
            orientation: Orientation::Vertical,
            independent: vec![0.0, 1.0, 2.0],
            first: vec![-1.0, 1.0, -1.0],
            second: vec![0.0, 0.0, 0.0],
            mask: Some(vec![false, true, false]),
            interpolate: true,
            style: PatchStyle::filled(Color::BLACK),
        };
        let outlines = fill_outlines(&fill);
        assert_eq!(outlines.len(), 1);
        assert_eq!(outlines[0].len(), 4);
        assert_eq!(outlines[0][0], (0.5, 0.0));
        assert_eq!(outlines[0][2], (1.5, 0.0));
    }

    #[test]
    fn lines_split_at_unplaceable_points() {
        let points = [Some((0.0, 0.0)), Some((1.0, 1.0)), None, Some((2.0, 2.0))];
        let runs = projected_runs(points.into_iter());
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[1], vec![(2.0, 2.0)]);
    }

    #[test]
    fn line_markers_paint_above_the_line() {
        let transform = transform();
        let metrics = metrics();
        let mut painter = ArtistPainter::new(&transform, &metrics);
        painter.paint(&Artist::Line(LineArtist {
            xs: vec![1.0, 2.0, 3.0],
            ys: vec![1.0, 2.0, 3.0],
            spec: LineSpec::solid(Color::BLACK).marker(crate::render::MarkerShape::Circle),
        }));
        let layers: Vec<_> = painter.commands.iter().map(|(layer, _)| *layer).collect();
        assert_eq!(layers[0], CanvasLayerKind::Series);
        let markers = layers
            .iter()
            .filter(|layer| **layer == CanvasLayerKind::Marker)
            .count();
        assert_eq!(markers, 3);
        assert_eq!(painter.occupied.len(), 3);
    }

    #[test]
    fn scatter_size_is_an_area() {
        let transform = transform();
        let metrics = metrics();
        let mut painter = ArtistPainter::new(&transform, &metrics);
        painter.paint(&Artist::Scatter(ScatterArtist {
            xs: vec![5.0],
            ys: vec![5.0],
            spec: ScatterSpec::new().color(Color::BLACK).size(100.0),
        }));
        match &painter.commands[0].1 {
            DrawCommand::Marker(marker) => assert!((marker.size - 10.0).abs() < 1e-9),
            other => panic!("unexpected command {other:?}"),
        }
    }
}
