use tracing::{debug, trace};

use crate::core::{PanelId, PixelRect};
use crate::error::{FigureError, FigureResult};
use crate::render::{
    CanvasLayerKind, Color, DrawCommand, LayeredRenderFrame, PanelLayerStack, RenderFrame,
    Renderer, TextHAlign, TextPrimitive, TextVAlign,
};

use super::FigureEngine;
use super::artist_render::{ArtistPainter, legend_entry};
use super::axes::Axes;
use super::axis_render_frame_builder::{
    AxisPrimitiveSink, AxisRenderContext, append_axis_primitives,
};
use super::figure::{Figure, FigureTitle};
use super::layout_helpers::estimate_text_height_px;
use super::legend::{LegendLayoutInput, LegendSpec, build_legend_commands};
use super::panel_projection::{Metrics, PanelProjection, TITLE_PAD_PT, project_panel};
use super::panel_transform::PanelTransform;

/// Painted artists of one axes plus the pixel positions they cover.
struct PaintedArtists {
    commands: Vec<(CanvasLayerKind, DrawCommand)>,
    occupied: Vec<(f64, f64)>,
}

fn paint_artists(axes: &Axes, transform: &PanelTransform, metrics: &Metrics) -> PaintedArtists {
    let mut painter = ArtistPainter::new(transform, metrics);
    for artist in axes.artists() {
        painter.paint(artist);
    }
    PaintedArtists {
        commands: painter.commands,
        occupied: painter.occupied,
    }
}

fn figure_title_command(
    title: &FigureTitle,
    width: f64,
    height: f64,
    metrics: &Metrics,
) -> (TextPrimitive, f64) {
    let size = metrics.pt(title.size_pt.unwrap_or(metrics.style.figure_title_size_pt));
    let y = (1.0 - title.y) * height;
    let mut text = TextPrimitive::new(
        title.text.clone(),
        width * 0.5,
        y,
        size,
        Color::BLACK,
        TextHAlign::Center,
    )
    .with_v_align(TextVAlign::Top);
    text.bold = title.bold;
    let bottom = y + estimate_text_height_px(&title.text, size) + metrics.pt(TITLE_PAD_PT);
    (text, bottom)
}

fn append_legend(
    layered: &mut LayeredRenderFrame,
    panel_id: PanelId,
    spec: &LegendSpec,
    axes: &[&Axes],
    plot: PixelRect,
    occupied: &[(f64, f64)],
    metrics: &Metrics,
) {
    let entries: Vec<_> = axes
        .iter()
        .flat_map(|axes| axes.artists())
        .filter_map(|artist| legend_entry(artist, metrics))
        .collect();
    if entries.is_empty() {
        return;
    }
    let legend_font_pt = metrics.style.legend_font_size_pt;
    let input = LegendLayoutInput {
        entries: &entries,
        spec,
        font_px: metrics.pt(spec.font_size_pt.unwrap_or(legend_font_pt)),
        frame_width_px: metrics.pt(metrics.style.axes_line_width_pt),
        plot,
        occupied,
    };
    let commands = build_legend_commands(&input);
    layered.extend(panel_id, CanvasLayerKind::Legend, commands);
}

fn append_panel(
    layered: &mut LayeredRenderFrame,
    panel_id: PanelId,
    axes: &Axes,
    projection: &PanelProjection,
    metrics: &Metrics,
) {
    let primary = paint_artists(axes, &projection.transform, metrics);
    let twin = match (axes.twin(), projection.twin.as_ref()) {
        (Some(twin), Some(twin_projection)) => {
            let painted = paint_artists(twin, &twin_projection.transform, metrics);
            Some((twin, painted))
        }
        _ => None,
    };

    for (layer, command) in primary.commands {
        layered.push(panel_id, layer, command);
    }
    if let Some((_, painted)) = &twin {
        for (layer, command) in painted.commands.iter().cloned() {
            layered.push(panel_id, layer, command);
        }
    }

    let mut sink = AxisPrimitiveSink::new(layered, panel_id);
    append_axis_primitives(
        &mut sink,
        AxisRenderContext {
            axes,
            projection,
            metrics,
        },
    );

    let plot = projection.transform.plot;
    if let Some(spec) = &axes.legend {
        let mut sources = vec![axes];
        let mut occupied = primary.occupied;
        if spec.include_twin {
            if let Some((twin_axes, painted)) = &twin {
                sources.push(*twin_axes);
                occupied.extend(painted.occupied.iter().copied());
            }
        }
        append_legend(layered, panel_id, spec, &sources, plot, &occupied, metrics);
    }
    if let Some((twin_axes, painted)) = &twin {
        if let Some(spec) = &twin_axes.legend {
            append_legend(
                layered,
                panel_id,
                spec,
                &[*twin_axes],
                plot,
                &painted.occupied,
                metrics,
            );
        }
    }
}

impl<R: Renderer> FigureEngine<R> {
    /// Projects every panel of `figure` into its own layer stack.
    pub fn build_layered_frame(&self, figure: &Figure) -> FigureResult<LayeredRenderFrame> {
        figure.validate()?;
        let viewport = figure.viewport(self.config.dpi);
        if !viewport.is_valid() {
            return Err(FigureError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        let metrics = Metrics::new(self.config.dpi, *figure.style());
        let (width, height) = (f64::from(viewport.width), f64::from(viewport.height));
        let pad = self.config.pad_in * self.config.dpi;

        let title = figure
            .title()
            .map(|title| figure_title_command(title, width, height, &metrics));
        let top = title.as_ref().map_or(pad, |(_, bottom)| bottom.max(pad));
        let area = PixelRect::new(pad, top, width - 2.0 * pad, height - top - pad);
        if !area.is_valid() {
            return Err(FigureError::InvalidConfig(format!(
                "figure of {width}x{height} px leaves no room for panels"
            )));
        }

        let mut projections = Vec::with_capacity(figure.axes().len());
        for axes in figure.axes() {
            let cell = figure.grid().cell_rect(axes.slot(), area)?;
            projections.push(project_panel(axes, cell, &metrics)?);
        }
        let panel_ids: Vec<PanelId> = (0..projections.len())
            .map(|index| PanelId::new(u32::try_from(index).unwrap_or(u32::MAX)))
            .collect();
        let regions: Vec<(PanelId, PixelRect)> = panel_ids
            .iter()
            .zip(&projections)
            .map(|(id, projection)| (*id, projection.transform.plot))
            .collect();
        let stacks = panel_ids
            .iter()
            .map(|id| PanelLayerStack::canonical_for_panel(*id))
            .collect();

        let mut layered = LayeredRenderFrame::from_stacks(viewport, stacks)
            .with_panel_regions(&regions);
        layered.background = metrics.style.background;
        let panels = panel_ids.iter().zip(figure.axes()).zip(&projections);
        for ((panel_id, axes), projection) in panels {
            append_panel(&mut layered, *panel_id, axes, projection, &metrics);
            trace!(panel = panel_id.raw(), "panel appended");
        }
        if let Some((text, _)) = title {
            layered.push_overlay(DrawCommand::Text(text));
        }

        debug!(
            panels = layered.panels.len(),
            width = viewport.width,
            height = viewport.height,
            "built layered figure frame"
        );
        Ok(layered)
    }

    pub fn build_render_frame(&self, figure: &Figure) -> FigureResult<RenderFrame> {
        Ok(self.build_layered_frame(figure)?.flatten())
    }
}

#[cfg(test)]
mod tests {
    use crate::api::figure::Figure;
    use crate::api::{FigureEngine, FigureEngineConfig, GridSlot, GridSpec, LegendSpec, LineSpec};
    use crate::render::{CanvasLayerKind, NullRenderer, PrimitiveKind};

    fn engine() -> FigureEngine<NullRenderer> {
        FigureEngine::new(NullRenderer::default(), FigureEngineConfig::new(72.0)).unwrap()
    }

    #[test]
    fn every_subplot_gets_a_panel_and_the_title_goes_last() {
        let mut figure = Figure::new(8.0, 4.0)
            .with_grid(GridSpec::new(1, 2))
            .with_title("Overview", Some(14.0));
        figure
            .add_subplot(GridSlot::cell(0, 0))
            .plot(
                &[0.0, 1.0, 2.0],
                &[0.0, 1.0, 4.0],
                LineSpec::new().label("square"),
            )
            .legend(LegendSpec::new());
        figure.add_subplot(GridSlot::cell(0, 1)).set_title("empty");

        let layered = engine().build_layered_frame(&figure).unwrap();
        assert_eq!(layered.panels.len(), 2);
        assert!(layered.panels[0].plot_rect.right() < layered.panels[1].plot_rect.x);
        let legend = layered.panels[0]
            .layers
            .iter()
            .find(|layer| layer.kind == CanvasLayerKind::Legend)
            .unwrap();
        assert!(!legend.commands.is_empty());

        let frame = layered.flatten();
        match frame.commands.last() {
            Some(crate::render::DrawCommand::Text(text)) => assert_eq!(text.text, "Overview"),
            other => panic!("expected the title last, got {other:?}"),
        }
    }

    #[test]
    fn render_validates_and_counts_primitives() {
        let mut figure = Figure::new(4.0, 3.0);
        figure
            .add_subplot(GridSlot::cell(0, 0))
            .plot(&[0.0, 1.0], &[1.0, 0.0], LineSpec::new());
        let mut engine = engine();
        let stats = engine.render(&figure).unwrap();
        assert!(stats.polylines >= 1);
        assert_eq!(engine.renderer().frames_rendered, 1);
        let frame = engine.build_render_frame(&figure).unwrap();
        assert_eq!(frame.count(PrimitiveKind::Polyline), stats.polylines);
        assert_eq!((frame.viewport.width, frame.viewport.height), (288, 216));
    }
}
