use crate::core::PixelRect;
use crate::render::colors::FRAME_GRAY;
use crate::render::{
    Color, DrawCommand, LinePrimitive, LineStrokeStyle, MarkerPrimitive, MarkerShape,
    RectPrimitive, Stroke, TextHAlign, TextPrimitive, TextVAlign,
};

use super::layout_helpers::{estimate_text_height_px, estimate_text_width_px};

/// Anchor of the legend box inside the plot area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LegendLocation {
    /// Candidate position covering the fewest data points.
    #[default]
    Best,
    UpperRight,
    UpperLeft,
    LowerLeft,
    LowerRight,
    CenterRight,
    CenterLeft,
    LowerCenter,
    UpperCenter,
    Center,
}

const BEST_CANDIDATES: [LegendLocation; 7] = [
    LegendLocation::UpperRight,
    LegendLocation::UpperLeft,
    LegendLocation::LowerLeft,
    LegendLocation::LowerRight,
    LegendLocation::CenterRight,
    LegendLocation::LowerCenter,
    LegendLocation::UpperCenter,
];

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LegendSpec {
    pub location: LegendLocation,
    /// `None` uses the figure's legend font size.
    pub font_size_pt: Option<f64>,
    pub columns: usize,
    pub title: Option<String>,
    /// Append the labelled artists of the twin axes after this axes' own.
    pub include_twin: bool,
}

impl LegendSpec {
    #[must_use]
    pub fn new() -> Self {
        Self::at(LegendLocation::Best)
    }

    #[must_use]
    pub fn at(location: LegendLocation) -> Self {
        Self {
            location,
            font_size_pt: None,
            columns: 1,
            title: None,
            include_twin: false,
        }
    }

    #[must_use]
    pub fn font_size(mut self, size_pt: f64) -> Self {
        self.font_size_pt = Some(size_pt);
        self
    }

    #[must_use]
    pub fn columns(mut self, columns: usize) -> Self {
        self.columns = columns.max(1);
        self
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_twin(mut self) -> Self {
        self.include_twin = true;
        self
    }
}

/// Legend swatch in pixel units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) enum LegendHandle {
    Line {
        color: Color,
        width_px: f64,
        style: LineStrokeStyle,
        draw_line: bool,
        marker: Option<HandleMarker>,
    },
    Patch {
        face: Option<Color>,
        edge: Option<Stroke>,
    },
    Marker(HandleMarker),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct HandleMarker {
    pub shape: MarkerShape,
    pub fill: Color,
    pub edge: Stroke,
    pub size_px: f64,
}

impl HandleMarker {
    pub(super) fn at(self, x: f64, y: f64) -> DrawCommand {
        DrawCommand::Marker(
            MarkerPrimitive::new(x, y, self.size_px, self.shape, self.fill).with_edge(self.edge),
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(super) struct LegendEntry {
    pub label: String,
    pub handle: LegendHandle,
}

// Box metrics in font-size units.
const BORDER_PAD: f64 = 0.4;
const LABEL_SPACING: f64 = 0.5;
const HANDLE_LENGTH: f64 = 2.0;
const HANDLE_HEIGHT: f64 = 0.7;
const HANDLE_TEXT_PAD: f64 = 0.8;
const BORDER_AXES_PAD: f64 = 0.5;
const COLUMN_SPACING: f64 = 2.0;
const FRAME_ALPHA: f64 = 0.8;

pub(super) struct LegendLayoutInput<'a> {
    pub entries: &'a [LegendEntry],
    pub spec: &'a LegendSpec,
    pub font_px: f64,
    pub frame_width_px: f64,
    pub plot: PixelRect,
    /// Projected data vertices, used by `Best`.
    pub occupied: &'a [(f64, f64)],
}

struct LegendGeometry {
    columns: Vec<Vec<usize>>,
    column_widths: Vec<f64>,
    row_height: f64,
    title_height: f64,
    size: (f64, f64),
}

fn measure(input: &LegendLayoutInput<'_>) -> LegendGeometry {
    let font = input.font_px;
    let count = input.entries.len();
    let column_count = input.spec.columns.clamp(1, count.max(1));
    let per_column = count.div_ceil(column_count);
    let columns: Vec<Vec<usize>> = (0..column_count)
        .map(|column| (column * per_column..((column + 1) * per_column).min(count)).collect())
        .filter(|rows: &Vec<usize>| !rows.is_empty())
        .collect();

    let row_height = input
        .entries
        .iter()
        .map(|entry| estimate_text_height_px(&entry.label, font))
        .fold(font * HANDLE_HEIGHT, f64::max);
    let column_widths: Vec<f64> = columns
        .iter()
        .map(|rows| {
            let label_width = rows
                .iter()
                .map(|&index| estimate_text_width_px(&input.entries[index].label, font))
                .fold(0.0, f64::max);
            (HANDLE_LENGTH + HANDLE_TEXT_PAD) * font + label_width
        })
        .collect();
    let title_height = input
        .spec
        .title
        .as_deref()
        .map_or(0.0, |title| {
            estimate_text_height_px(title, font) + LABEL_SPACING * font
        });

    let rows = columns.iter().map(Vec::len).max().unwrap_or(0) as f64;
    let body_width = column_widths.iter().sum::<f64>()
        + (columns.len().saturating_sub(1)) as f64 * COLUMN_SPACING * font;
    let title_width = input
        .spec
        .title
        .as_deref()
        .map_or(0.0, |title| estimate_text_width_px(title, font));
    let width = body_width.max(title_width) + 2.0 * BORDER_PAD * font;
    let height = title_height
        + rows * row_height
        + (rows - 1.0).max(0.0) * LABEL_SPACING * font
        + 2.0 * BORDER_PAD * font;

    LegendGeometry {
        columns,
        column_widths,
        row_height,
        title_height,
        size: (width, height),
    }
}

fn place(location: LegendLocation, size: (f64, f64), plot: PixelRect, pad: f64) -> PixelRect {
    let (width, height) = size;
    let left = plot.x + pad;
    let right = plot.right() - pad - width;
    let center_x = plot.x + (plot.width - width) * 0.5;
    let top = plot.y + pad;
    let bottom = plot.bottom() - pad - height;
    let center_y = plot.y + (plot.height - height) * 0.5;
    let (x, y) = match location {
        LegendLocation::UpperRight | LegendLocation::Best => (right, top),
        LegendLocation::UpperLeft => (left, top),
        LegendLocation::LowerLeft => (left, bottom),
        LegendLocation::LowerRight => (right, bottom),
        LegendLocation::CenterRight => (right, center_y),
        LegendLocation::CenterLeft => (left, center_y),
        LegendLocation::LowerCenter => (center_x, bottom),
        LegendLocation::UpperCenter => (center_x, top),
        LegendLocation::Center => (center_x, center_y),
    };
    PixelRect::new(x, y, width, height)
}

/// Candidate with the fewest occupied points inside; earlier candidates win ties.
fn best_location(
    size: (f64, f64),
    plot: PixelRect,
    pad: f64,
    occupied: &[(f64, f64)],
) -> LegendLocation {
    BEST_CANDIDATES
        .iter()
        .enumerate()
        .min_by_key(|(index, location)| {
            let rect = place(**location, size, plot, pad);
            let covered = occupied
                .iter()
                .filter(|(x, y)| rect.contains(*x, *y))
                .count();
            (covered, *index)
        })
        .map_or(LegendLocation::UpperRight, |(_, location)| *location)
}

/// Frame, swatches and labels of a legend.
pub(super) fn build_legend_commands(input: &LegendLayoutInput<'_>) -> Vec<DrawCommand> {
    if input.entries.is_empty() || !input.plot.is_valid() {
        return Vec::new();
    }
    let font = input.font_px;
    let geometry = measure(input);
    let pad = BORDER_AXES_PAD * font;
    let location = match input.spec.location {
        LegendLocation::Best => best_location(geometry.size, input.plot, pad, input.occupied),
        other => other,
    };
    let frame = place(location, geometry.size, input.plot, pad);

    let mut commands = vec![DrawCommand::Rect(
        RectPrimitive::from_rect(frame, Color::WHITE.with_alpha(FRAME_ALPHA))
            .with_border(Stroke::new(FRAME_GRAY.with_alpha(FRAME_ALPHA), input.frame_width_px))
            .with_corner_radius(0.2 * font),
    )];

    let inner_x = frame.x + BORDER_PAD * font;
    let mut top = frame.y + BORDER_PAD * font;
    if let Some(title) = input.spec.title.as_deref() {
        commands.push(DrawCommand::Text(
            TextPrimitive::new(
                title,
                frame.x + frame.width * 0.5,
                top,
                font,
                Color::BLACK,
                TextHAlign::Center,
            )
            .with_v_align(TextVAlign::Top),
        ));
        top += geometry.title_height;
    }

    let mut column_x = inner_x;
    for (rows, column_width) in geometry.columns.iter().zip(&geometry.column_widths) {
        for (row, &index) in rows.iter().enumerate() {
            let entry = &input.entries[index];
            let row_top = top + row as f64 * (geometry.row_height + LABEL_SPACING * font);
            let center_y = row_top + geometry.row_height * 0.5;
            push_handle(&mut commands, entry.handle, column_x, center_y, font);
            commands.push(DrawCommand::Text(
                TextPrimitive::new(
                    entry.label.clone(),
                    column_x + (HANDLE_LENGTH + HANDLE_TEXT_PAD) * font,
                    center_y,
                    font,
                    Color::BLACK,
                    TextHAlign::Left,
                )
                .with_v_align(TextVAlign::Center),
            ));
        }
        column_x += column_width + COLUMN_SPACING * font;
    }
    commands
}

fn push_handle(
    commands: &mut Vec<DrawCommand>,
    handle: LegendHandle,
    x: f64,
    center_y: f64,
    font: f64,
) {
    let length = HANDLE_LENGTH * font;
    match handle {
        LegendHandle::Line {
            color,
            width_px,
            style,
            draw_line,
            marker,
        } => {
            if draw_line && width_px > 0.0 {
                commands.push(DrawCommand::Line(
                    LinePrimitive::new(x, center_y, x + length, center_y, width_px, color)
                        .with_style(style),
                ));
            }
            if let Some(marker) = marker {
                commands.push(marker.at(x + length * 0.5, center_y));
            }
        }
        LegendHandle::Patch { face, edge } => {
            let height = HANDLE_HEIGHT * font;
            let mut rect = RectPrimitive::new(
                x,
                center_y - height * 0.5,
                length,
                height,
                face.unwrap_or(Color::TRANSPARENT),
            );
            if let Some(edge) = edge {
                rect = rect.with_border(edge);
            }
            commands.push(DrawCommand::Rect(rect));
        }
        LegendHandle::Marker(marker) => commands.push(marker.at(x + length * 0.5, center_y)),
    }
}

#[cfg(test)]
fn legend_frame(input: &LegendLayoutInput<'_>) -> Option<PixelRect> {
    match build_legend_commands(input).first() {
        Some(DrawCommand::Rect(rect)) => {
            Some(PixelRect::new(rect.x, rect.y, rect.width, rect.height))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(label: &str) -> LegendEntry {
        LegendEntry {
            label: label.to_owned(),
            handle: LegendHandle::Line {
                color: Color::BLACK,
                width_px: 2.0,
                style: LineStrokeStyle::Solid,
                draw_line: true,
                marker: None,
            },
        }
    }

    const PLOT: PixelRect = PixelRect::new(100.0, 100.0, 800.0, 600.0);

    #[test]
    fn best_avoids_crowded_corner() {
        let entries = [entry("first"), entry("second")];
        let spec = LegendSpec::new();
        let occupied: Vec<(f64, f64)> = (0..50).map(|i| (880.0 - f64::from(i), 120.0)).collect();
        let input = LegendLayoutInput {
            entries: &entries,
            spec: &spec,
            font_px: 10.0,
            frame_width_px: 1.0,
            plot: PLOT,
            occupied: &occupied,
        };
        let frame = legend_frame(&input).unwrap();
        assert!(frame.x < 500.0, "legend should move to the left: {frame:?}");
        assert!(frame.y < 400.0);
    }

    #[test]
    fn columns_split_entries() {
        let entries = [entry("a"), entry("b"), entry("c"), entry("d")];
        let one = LegendSpec::at(LegendLocation::LowerRight);
        let two = one.clone().columns(2);
        let frame = |spec: &LegendSpec| {
            legend_frame(&LegendLayoutInput {
                entries: &entries,
                spec,
                font_px: 10.0,
                frame_width_px: 1.0,
                plot: PLOT,
                occupied: &[],
            })
            .unwrap()
        };
        let single = frame(&one);
        let double = frame(&two);
        assert!(double.width > single.width);
        assert!(double.height < single.height);
        assert!((single.right() - (PLOT.right() - 5.0)).abs() < 1e-9);
        assert!(single.x > PLOT.x);
    }

    #[test]
    fn empty_legend_draws_nothing() {
        let spec = LegendSpec::new().title("Layers");
        let input = LegendLayoutInput {
            entries: &[],
            spec: &spec,
            font_px: 10.0,
            frame_width_px: 1.0,
            plot: PLOT,
            occupied: &[],
        };
        assert!(build_legend_commands(&input).is_empty());
    }
}
