use serde::{Deserialize, Serialize};

use crate::core::PanelId;

/// Paint layers of one panel, bottom to top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CanvasLayerKind {
    Background,
    Image,
    Grid,
    Patch,
    Series,
    Marker,
    Axis,
    Annotation,
    Legend,
}

impl CanvasLayerKind {
    /// Layers whose content is clipped to the panel's plot rectangle.
    #[must_use]
    pub fn is_clipped(self) -> bool {
        matches!(
            self,
            Self::Image | Self::Grid | Self::Patch | Self::Series | Self::Marker
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelLayerStack {
    pub panel_id: PanelId,
    pub layers: Vec<CanvasLayerKind>,
}

impl PanelLayerStack {
    #[must_use]
    pub fn canonical_for_panel(panel_id: PanelId) -> Self {
        Self {
            panel_id,
            layers: vec![
                CanvasLayerKind::Background,
                CanvasLayerKind::Image,
                CanvasLayerKind::Grid,
                CanvasLayerKind::Patch,
                CanvasLayerKind::Series,
                CanvasLayerKind::Marker,
                CanvasLayerKind::Axis,
                CanvasLayerKind::Annotation,
                CanvasLayerKind::Legend,
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CanvasLayerKind, PanelLayerStack};
    use crate::core::PanelId;

    #[test]
    fn panel_layer_stack_puts_data_under_annotations() {
        let stack = PanelLayerStack::canonical_for_panel(PanelId::new(3));
        let position = |kind| stack.layers.iter().position(|layer| *layer == kind);
        assert_eq!(position(CanvasLayerKind::Background), Some(0));
        assert!(position(CanvasLayerKind::Image) < position(CanvasLayerKind::Series));
        assert!(position(CanvasLayerKind::Series) < position(CanvasLayerKind::Annotation));
        let last = stack.layers.len() - 1;
        assert_eq!(position(CanvasLayerKind::Legend), Some(last));
        assert!(!CanvasLayerKind::Annotation.is_clipped());
        assert!(CanvasLayerKind::Patch.is_clipped());
    }
}
