mod colormap;
pub mod colors;
mod frame;
mod layer_stack;
mod layered_frame;
mod null_renderer;
mod primitives;

pub use colormap::{Colormap, ColormapKind, DEFAULT_PALETTE_SIZE, Palette};
pub use frame::{DrawCommand, PrimitiveKind, RenderFrame, RenderStats};
pub use layer_stack::{CanvasLayerKind, PanelLayerStack};
pub use layered_frame::{LayerCommands, LayeredRenderFrame, PanelLayerFrame};
pub use null_renderer::NullRenderer;
pub use primitives::{
    Color, EllipsePrimitive, ImageInterpolation, ImagePrimitive, LinePrimitive, LineStrokeStyle,
    MarkerPrimitive, MarkerShape, PolygonPrimitive, PolylinePrimitive, RectPrimitive, Stroke,
    TextBox, TextHAlign, TextPrimitive, TextVAlign,
};

use crate::error::FigureResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `RenderFrame` so
/// drawing code stays isolated from figure construction.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> FigureResult<RenderStats>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::CairoRenderer;
