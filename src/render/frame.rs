use serde::{Deserialize, Serialize};

use crate::core::{PixelRect, Viewport};
use crate::error::{FigureError, FigureResult};
use crate::render::{
    Color, EllipsePrimitive, ImagePrimitive, LinePrimitive, MarkerPrimitive, PolygonPrimitive,
    PolylinePrimitive, RectPrimitive, TextPrimitive,
};

/// One paint operation. Frames paint commands strictly in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    Line(LinePrimitive),
    Polyline(PolylinePrimitive),
    Rect(RectPrimitive),
    Polygon(PolygonPrimitive),
    Ellipse(EllipsePrimitive),
    Marker(MarkerPrimitive),
    Text(TextPrimitive),
    Image(ImagePrimitive),
    /// Restricts following commands to `rect` until the matching `PopClip`.
    PushClip(PixelRect),
    PopClip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimitiveKind {
    Line,
    Polyline,
    Rect,
    Polygon,
    Ellipse,
    Marker,
    Text,
    Image,
    Clip,
}

impl DrawCommand {
    #[must_use]
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            Self::Line(_) => PrimitiveKind::Line,
            Self::Polyline(_) => PrimitiveKind::Polyline,
            Self::Rect(_) => PrimitiveKind::Rect,
            Self::Polygon(_) => PrimitiveKind::Polygon,
            Self::Ellipse(_) => PrimitiveKind::Ellipse,
            Self::Marker(_) => PrimitiveKind::Marker,
            Self::Text(_) => PrimitiveKind::Text,
            Self::Image(_) => PrimitiveKind::Image,
            Self::PushClip(_) | Self::PopClip => PrimitiveKind::Clip,
        }
    }

    pub fn validate(&self) -> FigureResult<()> {
        match self {
            Self::Line(line) => line.validate(),
            Self::Polyline(polyline) => polyline.validate(),
            Self::Rect(rect) => rect.validate(),
            Self::Polygon(polygon) => polygon.validate(),
            Self::Ellipse(ellipse) => ellipse.validate(),
            Self::Marker(marker) => marker.validate(),
            Self::Text(text) => text.validate(),
            Self::Image(image) => image.validate(),
            Self::PushClip(rect) => {
                if rect.is_valid() {
                    Ok(())
                } else {
                    Err(FigureError::InvalidData(
                        "clip rect must be finite with size > 0".to_owned(),
                    ))
                }
            }
            Self::PopClip => Ok(()),
        }
    }
}

/// Number of drawn primitives per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RenderStats {
    pub lines: usize,
    pub polylines: usize,
    pub rects: usize,
    pub polygons: usize,
    pub ellipses: usize,
    pub markers: usize,
    pub texts: usize,
    pub images: usize,
}

impl RenderStats {
    #[must_use]
    pub fn from_commands<'a>(commands: impl IntoIterator<Item = &'a DrawCommand>) -> Self {
        let mut stats = Self::default();
        for command in commands {
            stats.record(command.kind());
        }
        stats
    }

    pub fn record(&mut self, kind: PrimitiveKind) {
        match kind {
            PrimitiveKind::Line => self.lines += 1,
            PrimitiveKind::Polyline => self.polylines += 1,
            PrimitiveKind::Rect => self.rects += 1,
            PrimitiveKind::Polygon => self.polygons += 1,
            PrimitiveKind::Ellipse => self.ellipses += 1,
            PrimitiveKind::Marker => self.markers += 1,
            PrimitiveKind::Text => self.texts += 1,
            PrimitiveKind::Image => self.images += 1,
            PrimitiveKind::Clip => {}
        }
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.lines
            + self.polylines
            + self.rects
            + self.polygons
            + self.ellipses
            + self.markers
            + self.texts
            + self.images
    }
}

/// Backend-agnostic scene for one figure draw pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub background: Color,
    pub commands: Vec<DrawCommand>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            background: Color::WHITE,
            commands: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    #[must_use]
    pub fn with_line(mut self, line: LinePrimitive) -> Self {
        self.commands.push(DrawCommand::Line(line));
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: TextPrimitive) -> Self {
        self.commands.push(DrawCommand::Text(text));
        self
    }

    #[must_use]
    pub fn with_rect(mut self, rect: RectPrimitive) -> Self {
        self.commands.push(DrawCommand::Rect(rect));
        self
    }

    #[must_use]
    pub fn with_command(mut self, command: DrawCommand) -> Self {
        self.commands.push(command);
        self
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn validate(&self) -> FigureResult<()> {
        if !self.viewport.is_valid() {
            return Err(FigureError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        self.background.validate()?;

        let mut clip_depth = 0_usize;
        for command in &self.commands {
            command.validate()?;
            match command {
                DrawCommand::PushClip(_) => clip_depth += 1,
                DrawCommand::PopClip => {
                    clip_depth = clip_depth.checked_sub(1).ok_or_else(|| {
                        FigureError::InvalidData("clip pop without matching push".to_owned())
                    })?;
                }
                _ => {}
            }
        }
        if clip_depth != 0 {
            return Err(FigureError::InvalidData(format!(
                "{clip_depth} clip region(s) left open"
            )));
        }

        Ok(())
    }

    /// True when the frame paints nothing but its background.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stats().total() == 0
    }

    #[must_use]
    pub fn stats(&self) -> RenderStats {
        RenderStats::from_commands(&self.commands)
    }

    #[must_use]
    pub fn count(&self, kind: PrimitiveKind) -> usize {
        self.commands
            .iter()
            .filter(|command| command.kind() == kind)
            .count()
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextPrimitive> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Text(text) => Some(text),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{DrawCommand, PrimitiveKind, RenderFrame};
    use crate::core::{PixelRect, Viewport};
    use crate::render::{Color, LinePrimitive};

    #[test]
    fn unbalanced_clip_is_rejected() {
        let frame = RenderFrame::new(Viewport::new(10, 10))
            .with_command(DrawCommand::PushClip(PixelRect::new(0.0, 0.0, 5.0, 5.0)));
        assert!(frame.validate().is_err());

        let frame = RenderFrame::new(Viewport::new(10, 10)).with_command(DrawCommand::PopClip);
        assert!(frame.validate().is_err());
    }

    #[test]
    fn clips_do_not_count_as_drawn_primitives() {
        let frame = RenderFrame::new(Viewport::new(10, 10))
            .with_command(DrawCommand::PushClip(PixelRect::new(0.0, 0.0, 5.0, 5.0)))
            .with_line(LinePrimitive::new(0.0, 0.0, 4.0, 4.0, 1.0, Color::BLACK))
            .with_command(DrawCommand::PopClip);
        frame.validate().expect("valid frame");
        assert_eq!(frame.stats().total(), 1);
        assert_eq!(frame.count(PrimitiveKind::Clip), 2);
        assert!(!frame.is_empty());
    }
}
