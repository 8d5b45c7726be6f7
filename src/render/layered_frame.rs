use crate::core::{PanelId, PixelRect, Viewport};

use super::{CanvasLayerKind, Color, DrawCommand, PanelLayerStack, RenderFrame};

#[derive(Debug, Clone, PartialEq)]
pub struct LayerCommands {
    pub kind: CanvasLayerKind,
    pub commands: Vec<DrawCommand>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PanelLayerFrame {
    pub panel_id: PanelId,
    pub plot_rect: PixelRect,
    pub layers: Vec<LayerCommands>,
}

impl PanelLayerFrame {
    fn append_to(&self, frame: &mut RenderFrame, include: impl Fn(CanvasLayerKind) -> bool) {
        let mut clip_open = false;
        for layer in &self.layers {
            if !include(layer.kind) || layer.commands.is_empty() {
                continue;
            }
            let wants_clip = layer.kind.is_clipped() && self.plot_rect.is_valid();
            if wants_clip && !clip_open {
                frame.push(DrawCommand::PushClip(self.plot_rect));
                clip_open = true;
            } else if !wants_clip && clip_open {
                frame.push(DrawCommand::PopClip);
                clip_open = false;
            }
            frame.commands.extend(layer.commands.iter().cloned());
        }
        if clip_open {
            frame.push(DrawCommand::PopClip);
        }
    }
}

/// Figure scene organised as per-panel layer stacks plus a figure overlay
/// (suptitle, colorbars) painted last.
#[derive(Debug, Clone, PartialEq)]
pub struct LayeredRenderFrame {
    pub viewport: Viewport,
    pub background: Color,
    pub panels: Vec<PanelLayerFrame>,
    pub overlay: Vec<DrawCommand>,
}

impl LayeredRenderFrame {
    #[must_use]
    pub fn from_stacks(viewport: Viewport, stacks: Vec<PanelLayerStack>) -> Self {
        let full = PixelRect::new(
            0.0,
            0.0,
            f64::from(viewport.width),
            f64::from(viewport.height),
        );
        let panels = stacks
            .into_iter()
            .map(|stack| PanelLayerFrame {
                panel_id: stack.panel_id,
                plot_rect: full,
                layers: stack
                    .layers
                    .into_iter()
                    .map(|kind| LayerCommands {
                        kind,
                        commands: Vec::new(),
                    })
                    .collect(),
            })
            .collect();
        Self {
            viewport,
            background: Color::WHITE,
            panels,
            overlay: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_panel_regions(mut self, regions: &[(PanelId, PixelRect)]) -> Self {
        for panel in &mut self.panels {
            if let Some((_, rect)) = regions.iter().find(|(id, _)| *id == panel.panel_id) {
                panel.plot_rect = *rect;
            }
        }
        self
    }

    pub fn push(&mut self, panel_id: PanelId, kind: CanvasLayerKind, command: DrawCommand) {
        if let Some(layer) = self.layer_mut(panel_id, kind) {
            layer.commands.push(command);
        }
    }

    pub fn extend(
        &mut self,
        panel_id: PanelId,
        kind: CanvasLayerKind,
        commands: impl IntoIterator<Item = DrawCommand>,
    ) {
        if let Some(layer) = self.layer_mut(panel_id, kind) {
            layer.commands.extend(commands);
        }
    }

    pub fn push_overlay(&mut self, command: DrawCommand) {
        self.overlay.push(command);
    }

    #[must_use]
    pub fn panel(&self, panel_id: PanelId) -> Option<&PanelLayerFrame> {
        self.panels.iter().find(|panel| panel.panel_id == panel_id)
    }

    #[must_use]
    pub fn flatten(&self) -> RenderFrame {
        let mut frame = RenderFrame::new(self.viewport).with_background(self.background);
        for panel in &self.panels {
            panel.append_to(&mut frame, |_| true);
        }
        frame.commands.extend(self.overlay.iter().cloned());
        frame
    }

    #[must_use]
    pub fn flatten_panel(&self, panel_id: PanelId) -> Option<RenderFrame> {
        let panel = self.panel(panel_id)?;
        let mut frame = RenderFrame::new(self.viewport).with_background(self.background);
        panel.append_to(&mut frame, |_| true);
        Some(frame)
    }

    #[must_use]
    pub fn flatten_panel_layers(
        &self,
        panel_id: PanelId,
        include_layers: &[CanvasLayerKind],
    ) -> Option<RenderFrame> {
        let panel = self.panel(panel_id)?;
        let mut frame = RenderFrame::new(self.viewport).with_background(self.background);
        panel.append_to(&mut frame, |kind| include_layers.contains(&kind));
        Some(frame)
    }

    fn layer_mut(
        &mut self,
        panel_id: PanelId,
        kind: CanvasLayerKind,
    ) -> Option<&mut LayerCommands> {
        let panel = self
            .panels
            .iter_mut()
            .find(|panel| panel.panel_id == panel_id)?;
        panel.layers.iter_mut().find(|layer| layer.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::LayeredRenderFrame;
    use crate::core::{PanelId, PixelRect, Viewport};
    use crate::render::{
        CanvasLayerKind, Color, DrawCommand, LinePrimitive, PanelLayerStack, TextHAlign,
        TextPrimitive,
    };

    fn line(y: f64) -> DrawCommand {
        DrawCommand::Line(LinePrimitive::new(0.0, y, 5.0, y, 1.0, Color::BLACK))
    }

    #[test]
    fn layered_render_frame_flattens_in_layer_order() {
        let panel = PanelId::new(0);
        let mut layered = LayeredRenderFrame::from_stacks(
            Viewport::new(100, 50),
            vec![PanelLayerStack::canonical_for_panel(panel)],
        )
        .with_panel_regions(&[(panel, PixelRect::new(10.0, 5.0, 80.0, 40.0))]);

        // Pushed out of paint order on purpose.
        layered.push(panel, CanvasLayerKind::Series, line(2.0));
        layered.push(panel, CanvasLayerKind::Grid, line(1.0));
        layered.push(
            panel,
            CanvasLayerKind::Annotation,
            DrawCommand::Text(TextPrimitive::new(
                "x",
                2.0,
                4.0,
                10.0,
                Color::BLACK,
                TextHAlign::Right,
            )),
        );

        let flattened = layered.flatten();
        flattened.validate().expect("balanced clips");
        let kinds: Vec<_> = flattened.commands.iter().collect();
        assert!(matches!(kinds[0], DrawCommand::PushClip(_)));
        assert_eq!(kinds[1], &line(1.0));
        assert_eq!(kinds[2], &line(2.0));
        assert!(matches!(kinds[3], DrawCommand::PopClip));
        assert!(matches!(kinds[4], DrawCommand::Text(_)));
    }

    #[test]
    fn overlay_paints_after_every_panel() {
        let a = PanelId::new(0);
        let b = PanelId::new(1);
        let mut layered = LayeredRenderFrame::from_stacks(
            Viewport::new(100, 50),
            vec![
                PanelLayerStack::canonical_for_panel(a),
                PanelLayerStack::canonical_for_panel(b),
            ],
        );
        layered.push_overlay(line(9.0));
        layered.push(b, CanvasLayerKind::Axis, line(3.0));
        layered.push(a, CanvasLayerKind::Axis, line(4.0));

        let flattened = layered.flatten();
        assert_eq!(flattened.commands, vec![line(4.0), line(3.0), line(9.0)]);

        let only_b = layered
            .flatten_panel_layers(b, &[CanvasLayerKind::Series])
            .expect("panel b");
        assert!(only_b.commands.is_empty());
    }
}
