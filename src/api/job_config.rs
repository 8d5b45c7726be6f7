use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{FigureError, FigureResult};

use super::engine_config::FigureEngineConfig;

/// Seed used for every noise source unless a job overrides it.
pub const DEFAULT_SEED: u64 = 42;

/// What a render job writes per figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// Rasterized image; needs the `cairo-backend` feature.
    #[default]
    Png,
    /// `SceneSummary` JSON next to where the PNG would go.
    SceneJson,
}

impl OutputFormat {
    pub fn parse(value: &str) -> FigureResult<Self> {
        match value {
            "png" => Ok(Self::Png),
            "scene-json" => Ok(Self::SceneJson),
            other => Err(FigureError::InvalidConfig(format!(
                "unknown output format `{other}` (expected png or scene-json)"
            ))),
        }
    }

    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::SceneJson => "scene.json",
        }
    }
}

/// Selection and destination of one `render_figures` run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderJobConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default)]
    pub engine: FigureEngineConfig,
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Figure ids to render; empty renders the whole catalog.
    #[serde(default)]
    pub only: Vec<String>,
    #[serde(default)]
    pub format: OutputFormat,
}

impl Default for RenderJobConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            engine: FigureEngineConfig::default(),
            seed: default_seed(),
            only: Vec::new(),
            format: OutputFormat::default(),
        }
    }
}

impl RenderJobConfig {
    pub fn validate(&self) -> FigureResult<()> {
        self.engine.validate()?;
        if self.only.iter().any(|id| id.trim().is_empty()) {
            return Err(FigureError::InvalidConfig(
                "figure selection contains an empty id".to_owned(),
            ));
        }
        Ok(())
    }

    /// Output path of a figure whose PNG name is `file_name`.
    #[must_use]
    pub fn output_path(&self, file_name: &str) -> PathBuf {
        let stem = Path::new(file_name)
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or(file_name);
        self.output_dir
            .join(format!("{stem}.{}", self.format.extension()))
    }

    pub fn to_json_pretty(&self) -> FigureResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| FigureError::InvalidData(format!("failed to serialize job config: {e}")))
    }

    pub fn from_json_str(input: &str) -> FigureResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| FigureError::InvalidData(format!("failed to parse job config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: &Path) -> FigureResult<Self> {
        let input = std::fs::read_to_string(path).map_err(|e| FigureError::io(path, e))?;
        Self::from_json_str(&input)
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}
