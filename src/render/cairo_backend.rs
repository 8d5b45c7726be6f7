use cairo::{Context, Filter, Format, ImageSurface, LineCap, LineJoin, SurfacePattern};
use pango::FontDescription;
use std::f64::consts::{FRAC_PI_2, PI};
use std::fs::File;
use std::path::Path;

use crate::core::Viewport;
use crate::error::{FigureError, FigureResult};
use crate::render::{
    Color, DrawCommand, EllipsePrimitive, ImageInterpolation, ImagePrimitive, MarkerPrimitive,
    MarkerShape, RectPrimitive, RenderFrame, RenderStats, Renderer, Stroke, TextHAlign,
    TextPrimitive, TextVAlign,
};

const FONT_FAMILY: &str = "DejaVu Sans";

/// Cairo + Pango + PangoCairo raster backend writing PNG files.
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    last_stats: RenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> FigureResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(FigureError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            last_stats: RenderStats::default(),
        })
    }

    pub fn for_viewport(viewport: Viewport) -> FigureResult<Self> {
        let to_i32 = |value: u32| {
            i32::try_from(value).map_err(|_| FigureError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            })
        };
        Self::new(to_i32(viewport.width)?, to_i32(viewport.height)?)
    }

    #[must_use]
    pub fn last_stats(&self) -> RenderStats {
        self.last_stats
    }

    /// Writes the last rendered surface as a PNG file.
    pub fn write_png(&self, path: impl AsRef<Path>) -> FigureResult<()> {
        let path = path.as_ref();
        self.surface.flush();
        let mut file = File::create(path).map_err(|err| FigureError::io(path, err))?;
        self.surface.write_to_png(&mut file).map_err(|err| {
            FigureError::Backend(format!("failed to write `{}`: {err}", path.display()))
        })
    }

    fn render_with_context(&mut self, context: &Context, frame: &RenderFrame) -> FigureResult<()> {
        frame.validate()?;

        apply_color(context, frame.background);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;
        context.set_line_join(LineJoin::Round);
        context.set_line_cap(LineCap::Butt);

        let mut stats = RenderStats::default();
        for command in &frame.commands {
            match command {
                DrawCommand::Line(line) => {
                    set_stroke(
                        context,
                        Stroke::new(line.color, line.stroke_width).with_style(line.style),
                    );
                    context.move_to(line.x1, line.y1);
                    context.line_to(line.x2, line.y2);
                    context
                        .stroke()
                        .map_err(|err| map_backend_error("failed to stroke line", err))?;
                }
                DrawCommand::Polyline(polyline) => {
                    append_path(context, &polyline.points, false);
                    set_stroke(context, polyline.stroke);
                    context
                        .stroke()
                        .map_err(|err| map_backend_error("failed to stroke polyline", err))?;
                }
                DrawCommand::Rect(rect) => draw_rect(context, *rect)?,
                DrawCommand::Polygon(polygon) => {
                    append_path(context, &polygon.points, true);
                    fill_and_stroke(context, polygon.fill_color, polygon.border, "polygon")?;
                }
                DrawCommand::Ellipse(ellipse) => draw_ellipse(context, *ellipse)?,
                DrawCommand::Marker(marker) => draw_marker(context, *marker)?,
                DrawCommand::Text(text) => draw_text(context, text)?,
                DrawCommand::Image(image) => draw_image(context, image)?,
                DrawCommand::PushClip(rect) => {
                    context
                        .save()
                        .map_err(|err| map_backend_error("failed to save clip state", err))?;
                    context.rectangle(rect.x, rect.y, rect.width, rect.height);
                    context.clip();
                }
                DrawCommand::PopClip => {
                    context
                        .restore()
                        .map_err(|err| map_backend_error("failed to restore clip state", err))?;
                }
            }
            stats.record(command.kind());
        }

        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> FigureResult<RenderStats> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.render_with_context(&context, frame)?;
        Ok(self.last_stats)
    }
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn set_stroke(context: &Context, stroke: Stroke) {
    apply_color(context, stroke.color);
    context.set_line_width(stroke.width);
    context.set_dash(&stroke.style.dash_pattern(stroke.width), 0.0);
}

fn append_path(context: &Context, points: &[(f64, f64)], close: bool) {
    context.new_path();
    for (index, &(x, y)) in points.iter().enumerate() {
        if index == 0 {
            context.move_to(x, y);
        } else {
            context.line_to(x, y);
        }
    }
    if close {
        context.close_path();
    }
}

/// Fills then strokes the current path, skipping invisible parts.
fn fill_and_stroke(context: &Context, fill: Color, border: Stroke, what: &str) -> FigureResult<()> {
    if fill.is_visible() {
        apply_color(context, fill);
        context
            .fill_preserve()
            .map_err(|err| map_backend_error(&format!("failed to fill {what}"), err))?;
    }
    if border.is_visible() {
        set_stroke(context, border);
        context
            .stroke_preserve()
            .map_err(|err| map_backend_error(&format!("failed to stroke {what}"), err))?;
    }
    context.new_path();
    Ok(())
}

fn draw_rect(context: &Context, rect: RectPrimitive) -> FigureResult<()> {
    append_rect_path(
        context,
        rect.x,
        rect.y,
        rect.width,
        rect.height,
        rect.corner_radius,
    );
    fill_and_stroke(context, rect.fill_color, rect.border, "rectangle")
}

fn append_rect_path(context: &Context, x: f64, y: f64, width: f64, height: f64, radius: f64) {
    context.new_path();
    if radius <= 0.0 {
        context.rectangle(x, y, width, height);
        return;
    }

    let radius = radius.min(width * 0.5).min(height * 0.5);
    let right = x + width;
    let bottom = y + height;

    context.new_sub_path();
    context.arc(right - radius, y + radius, radius, -FRAC_PI_2, 0.0);
    context.arc(right - radius, bottom - radius, radius, 0.0, FRAC_PI_2);
    context.arc(x + radius, bottom - radius, radius, FRAC_PI_2, PI);
    context.arc(x + radius, y + radius, radius, PI, PI + FRAC_PI_2);
    context.close_path();
}

fn draw_ellipse(context: &Context, ellipse: EllipsePrimitive) -> FigureResult<()> {
    context.new_path();
    context
        .save()
        .map_err(|err| map_backend_error("failed to save ellipse state", err))?;
    context.translate(ellipse.cx, ellipse.cy);
    context.rotate(ellipse.rotation_rad);
    context.scale(ellipse.rx, ellipse.ry);
    context.arc(0.0, 0.0, 1.0, 0.0, 2.0 * PI);
    context
        .restore()
        .map_err(|err| map_backend_error("failed to restore ellipse state", err))?;
    fill_and_stroke(context, ellipse.fill_color, ellipse.border, "ellipse")
}

fn draw_marker(context: &Context, marker: MarkerPrimitive) -> FigureResult<()> {
    context.new_path();
    if marker.shape == MarkerShape::Circle {
        context.arc(marker.x, marker.y, marker.size / 2.0, 0.0, 2.0 * PI);
    } else {
        let outline: Vec<(f64, f64)> = marker
            .shape
            .unit_outline()
            .into_iter()
            .map(|(dx, dy)| (marker.x + dx * marker.size, marker.y + dy * marker.size))
            .collect();
        append_path(context, &outline, true);
    }
    fill_and_stroke(context, marker.fill_color, marker.edge, "marker")
}

fn draw_text(context: &Context, text: &TextPrimitive) -> FigureResult<()> {
    let layout = pangocairo::functions::create_layout(context);
    let mut font_description = FontDescription::new();
    font_description.set_family(FONT_FAMILY);
    font_description.set_absolute_size(text.font_size_px * f64::from(pango::SCALE));
    if text.bold {
        font_description.set_weight(pango::Weight::Bold);
    }
    if text.italic {
        font_description.set_style(pango::Style::Italic);
    }
    layout.set_font_description(Some(&font_description));
    layout.set_alignment(match text.h_align {
        TextHAlign::Left => pango::Alignment::Left,
        TextHAlign::Center => pango::Alignment::Center,
        TextHAlign::Right => pango::Alignment::Right,
    });
    layout.set_text(&text.text);

    let (width, height) = layout.pixel_size();
    let width = f64::from(width);
    let height = f64::from(height);
    let dx = match text.h_align {
        TextHAlign::Left => 0.0,
        TextHAlign::Center => -width / 2.0,
        TextHAlign::Right => -width,
    };
    let dy = match text.v_align {
        TextVAlign::Top => 0.0,
        TextVAlign::Center => -height / 2.0,
        TextVAlign::Bottom => -height,
        TextVAlign::Baseline => -f64::from(layout.baseline()) / f64::from(pango::SCALE),
    };

    context
        .save()
        .map_err(|err| map_backend_error("failed to save text state", err))?;
    context.translate(text.x, text.y);
    if text.rotation_deg != 0.0 {
        context.rotate(-text.rotation_deg.to_radians());
    }

    if let Some(background) = text.background {
        let pad = background.padding_px;
        let radius = if background.rounded { pad } else { 0.0 };
        append_rect_path(
            context,
            dx - pad,
            dy - pad,
            width + 2.0 * pad,
            height + 2.0 * pad,
            radius,
        );
        fill_and_stroke(
            context,
            background.fill_color,
            background.border,
            "text box",
        )?;
    }

    apply_color(context, text.color);
    context.move_to(dx, dy);
    pangocairo::functions::show_layout(context, &layout);
    context
        .restore()
        .map_err(|err| map_backend_error("failed to restore text state", err))
}

fn draw_image(context: &Context, image: &ImagePrimitive) -> FigureResult<()> {
    let columns = i32::try_from(image.columns)
        .map_err(|_| FigureError::InvalidData("image too wide".to_owned()))?;
    let rows = i32::try_from(image.rows)
        .map_err(|_| FigureError::InvalidData("image too tall".to_owned()))?;
    let stride = Format::ARgb32
        .stride_for_width(image.columns as u32)
        .map_err(|err| map_backend_error("invalid image stride", err))?;
    let stride_bytes = usize::try_from(stride)
        .map_err(|_| FigureError::Backend("negative image stride".to_owned()))?;

    let mut data = vec![0_u8; stride_bytes * image.rows];
    for (row, chunk) in image.pixels.chunks(image.columns).enumerate() {
        for (column, color) in chunk.iter().enumerate() {
            let offset = row * stride_bytes + column * 4;
            data[offset..offset + 4].copy_from_slice(&premultiplied_argb(*color).to_ne_bytes());
        }
    }
    let source = ImageSurface::create_for_data(data, Format::ARgb32, columns, rows, stride)
        .map_err(|err| map_backend_error("failed to create image surface", err))?;

    let target = image.target;
    context
        .save()
        .map_err(|err| map_backend_error("failed to save image state", err))?;
    context.rectangle(target.x, target.y, target.width, target.height);
    context.clip();
    context.translate(target.x, target.y);
    context.scale(
        target.width / f64::from(columns),
        target.height / f64::from(rows),
    );
    let pattern = SurfacePattern::create(&source);
    pattern.set_filter(match image.interpolation {
        ImageInterpolation::Nearest => Filter::Nearest,
        ImageInterpolation::Bilinear => Filter::Bilinear,
    });
    pattern.set_extend(cairo::Extend::Pad);
    context
        .set_source(&pattern)
        .map_err(|err| map_backend_error("failed to set image source", err))?;
    context
        .paint()
        .map_err(|err| map_backend_error("failed to paint image", err))?;
    context
        .restore()
        .map_err(|err| map_backend_error("failed to restore image state", err))
}

fn premultiplied_argb(color: Color) -> u32 {
    let channel = |value: f64| (value.clamp(0.0, 1.0) * 255.0).round() as u32;
    let alpha = color.alpha.clamp(0.0, 1.0);
    (channel(alpha) << 24)
        | (channel(color.red * alpha) << 16)
        | (channel(color.green * alpha) << 8)
        | channel(color.blue * alpha)
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> FigureError {
    FigureError::Backend(format!("{prefix}: {err}"))
}

#[cfg(test)]
mod tests {
    use super::premultiplied_argb;
    use crate::render::Color;

    #[test]
    fn premultiplied_pixels_scale_color_by_alpha() {
        assert_eq!(premultiplied_argb(Color::WHITE), 0xFFFF_FFFF);
        let half_red = Color::rgba(1.0, 0.0, 0.0, 0.5);
        assert_eq!(premultiplied_argb(half_red), 0x8080_0000);
        assert_eq!(premultiplied_argb(Color::TRANSPARENT), 0);
    }
}
