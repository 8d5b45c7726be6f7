use tracing::debug;

use crate::error::FigureResult;
use crate::render::{RenderStats, Renderer};

use super::engine_config::FigureEngineConfig;
use super::figure::Figure;

/// Projects figures into render frames and hands them to a backend.
///
/// The engine holds no figure state: every call takes the figure to draw, so
/// one engine can render a whole catalog in sequence.
pub struct FigureEngine<R: Renderer> {
    pub(super) renderer: R,
    pub(super) config: FigureEngineConfig,
}

impl<R: Renderer> FigureEngine<R> {
    pub fn new(renderer: R, config: FigureEngineConfig) -> FigureResult<Self> {
        config.validate()?;
        Ok(Self { renderer, config })
    }

    #[must_use]
    pub fn config(&self) -> FigureEngineConfig {
        self.config
    }

    pub fn render(&mut self, figure: &Figure) -> FigureResult<RenderStats> {
        let frame = self.build_render_frame(figure)?;
        frame.validate()?;
        let stats = self.renderer.render(&frame)?;
        debug!(
            width = frame.viewport.width,
            height = frame.viewport.height,
            primitives = stats.total(),
            "rendered figure"
        );
        Ok(stats)
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
