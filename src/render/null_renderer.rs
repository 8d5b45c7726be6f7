use crate::error::FigureResult;
use crate::render::{RenderFrame, RenderStats, Renderer};

/// No-op renderer used by tests and headless runs.
///
/// It still validates frame content so invalid geometry is caught without a
/// raster backend.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub last_stats: RenderStats,
    pub frames_rendered: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> FigureResult<RenderStats> {
        frame.validate()?;
        self.last_stats = frame.stats();
        self.frames_rendered += 1;
        Ok(self.last_stats)
    }
}
