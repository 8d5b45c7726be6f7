use serde::{Deserialize, Serialize};

use crate::error::{FigureError, FigureResult};

/// Resolution used when nothing else is configured.
pub const DEFAULT_DPI: f64 = 300.0;

/// Projection settings shared by every figure an engine renders.
///
/// This type is serializable so render jobs can persist it next to their
/// output selection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FigureEngineConfig {
    #[serde(default = "default_dpi")]
    pub dpi: f64,
    /// Blank border around the panel grid, in inches.
    #[serde(default = "default_pad_in")]
    pub pad_in: f64,
}

impl Default for FigureEngineConfig {
    fn default() -> Self {
        Self {
            dpi: default_dpi(),
            pad_in: default_pad_in(),
        }
    }
}

impl FigureEngineConfig {
    #[must_use]
    pub fn new(dpi: f64) -> Self {
        Self {
            dpi,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_pad_in(mut self, pad_in: f64) -> Self {
        self.pad_in = pad_in;
        self
    }

    pub fn validate(self) -> FigureResult<()> {
        if !self.dpi.is_finite() || self.dpi <= 0.0 {
            return Err(FigureError::InvalidConfig(format!(
                "dpi must be finite and > 0, got {}",
                self.dpi
            )));
        }
        if !self.pad_in.is_finite() || self.pad_in < 0.0 {
            return Err(FigureError::InvalidConfig(format!(
                "pad must be finite and >= 0, got {}",
                self.pad_in
            )));
        }
        Ok(())
    }

    /// Serializes config to pretty JSON for debug/config files.
    pub fn to_json_pretty(self) -> FigureResult<String> {
        serde_json::to_string_pretty(&self)
            .map_err(|e| FigureError::InvalidData(format!("failed to serialize config: {e}")))
    }

    pub fn from_json_str(input: &str) -> FigureResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| FigureError::InvalidData(format!("failed to parse config: {e}")))
    }
}

fn default_dpi() -> f64 {
    DEFAULT_DPI
}

fn default_pad_in() -> f64 {
    0.08
}
