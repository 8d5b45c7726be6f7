use serde::{Deserialize, Serialize};

use crate::core::{PixelRect, Viewport};
use crate::error::{FigureError, FigureResult};
use crate::render::{CanvasLayerKind, LayeredRenderFrame, RenderStats, Renderer};

use super::FigureEngine;
use super::figure::Figure;

pub const SCENE_SUMMARY_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerSummary {
    pub kind: CanvasLayerKind,
    pub commands: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelSummary {
    pub panel: u32,
    pub plot_rect: PixelRect,
    /// Non-empty layers in paint order.
    pub layers: Vec<LayerSummary>,
    pub stats: RenderStats,
}

/// Primitive counts of a projected figure, without pixel payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneSummary {
    pub viewport: Viewport,
    pub panels: Vec<PanelSummary>,
    pub overlay: RenderStats,
    pub totals: RenderStats,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneSummaryJsonContractV1 {
    pub schema_version: u32,
    pub summary: SceneSummary,
}

impl SceneSummary {
    #[must_use]
    pub fn from_layered(layered: &LayeredRenderFrame) -> Self {
        let panels: Vec<PanelSummary> = layered
            .panels
            .iter()
            .map(|panel| PanelSummary {
                panel: panel.panel_id.raw(),
                plot_rect: panel.plot_rect,
                layers: panel
                    .layers
                    .iter()
                    .filter(|layer| !layer.commands.is_empty())
                    .map(|layer| LayerSummary {
                        kind: layer.kind,
                        commands: layer.commands.len(),
                    })
                    .collect(),
                stats: RenderStats::from_commands(
                    panel.layers.iter().flat_map(|layer| &layer.commands),
                ),
            })
            .collect();
        let overlay = RenderStats::from_commands(&layered.overlay);
        let totals = RenderStats::from_commands(
            layered
                .panels
                .iter()
                .flat_map(|panel| panel.layers.iter().flat_map(|layer| &layer.commands))
                .chain(&layered.overlay),
        );
        Self {
            viewport: layered.viewport,
            panels,
            overlay,
            totals,
        }
    }

    pub fn to_json_contract_v1_pretty(&self) -> FigureResult<String> {
        let payload = SceneSummaryJsonContractV1 {
            schema_version: SCENE_SUMMARY_JSON_SCHEMA_V1,
            summary: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            FigureError::InvalidData(format!("failed to serialize scene summary contract v1: {e}"))
        })
    }

    /// Accepts either a bare summary or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> FigureResult<Self> {
        if let Ok(summary) = serde_json::from_str::<SceneSummary>(input) {
            return Ok(summary);
        }
        let payload: SceneSummaryJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            FigureError::InvalidData(format!("failed to parse scene summary json payload: {e}"))
        })?;
        if payload.schema_version != SCENE_SUMMARY_JSON_SCHEMA_V1 {
            return Err(FigureError::InvalidData(format!(
                "unsupported scene summary schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.summary)
    }
}

impl<R: Renderer> FigureEngine<R> {
    pub fn scene_summary(&self, figure: &Figure) -> FigureResult<SceneSummary> {
        Ok(SceneSummary::from_layered(&self.build_layered_frame(figure)?))
    }

    pub fn scene_summary_json_contract_v1_pretty(&self, figure: &Figure) -> FigureResult<String> {
        self.scene_summary(figure)?.to_json_contract_v1_pretty()
    }
}
