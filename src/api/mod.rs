mod artist;
mod artist_render;
mod axes;
mod axis_render_frame_builder;
mod axis_ticks;
mod engine;
mod engine_config;
mod figure;
mod job_config;
mod json_contract;
mod layout;
mod layout_helpers;
mod legend;
mod panel_projection;
mod panel_transform;
mod render_frame_builder;
mod render_style;
mod validation;

pub use artist::{
    ArrowArtist, ArrowSpec, Artist, BarArtist, Coords, ErrorBarArtist, ErrorBars, Extent,
    FillArtist, ImageArtist, ImageOrigin, ImageSpec, LineArtist, LineSpec, MarkerSpec,
    Orientation, Paint, PatchArtist, PatchShape, PatchStyle, RefLineArtist, ScatterArtist,
    ScatterSpec, SpanArtist, TextArtist, TextBoxSpec, TextSpec,
};
pub use axes::{
    Aspect, Axes, AxisSpec, ColorbarSpec, GridAxis, GridLines, TickSpec, TitleSpec,
};
pub use axis_ticks::{
    TickFormat, TickLabels, TickValues, format_scientific, format_ticks, log_decade_ticks,
    nice_linear_ticks, ticks_for_scale,
};
pub use engine::FigureEngine;
pub use engine_config::{DEFAULT_DPI, FigureEngineConfig};
pub use figure::{DEFAULT_TITLE_Y, Figure, FigureTitle};
pub use job_config::{DEFAULT_SEED, OutputFormat, RenderJobConfig};
pub use json_contract::{
    LayerSummary, PanelSummary, SCENE_SUMMARY_JSON_SCHEMA_V1, SceneSummary,
    SceneSummaryJsonContractV1,
};
pub use layout::{GridSlot, GridSpec};
pub use legend::{LegendLocation, LegendSpec};
pub use render_style::{FigureStyle, GridStyle};
