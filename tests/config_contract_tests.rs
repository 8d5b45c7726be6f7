use std::path::PathBuf;

use schlieren_figures::FigureError;
use schlieren_figures::api::{
    DEFAULT_DPI, DEFAULT_SEED, FigureEngine, FigureEngineConfig, OutputFormat, PanelSummary,
    RenderJobConfig, SCENE_SUMMARY_JSON_SCHEMA_V1, SceneSummary,
};
use schlieren_figures::core::{PixelRect, Viewport};
use schlieren_figures::figures::{FigureContext, FigureId};
use schlieren_figures::render::{NullRenderer, RenderStats};

#[test]
fn engine_config_json_fills_defaults() {
    let config = FigureEngineConfig::from_json_str("{}").expect("empty object");
    assert_eq!(config, FigureEngineConfig::default());
    assert_eq!(config.dpi, DEFAULT_DPI);

    let config = FigureEngineConfig::from_json_str(r#"{"dpi": 150.0}"#).expect("dpi only");
    assert_eq!(config.dpi, 150.0);
    assert_eq!(config.pad_in, FigureEngineConfig::default().pad_in);

    let json = config.to_json_pretty().expect("serialize");
    let parsed = FigureEngineConfig::from_json_str(&json).expect("parse");
    assert_eq!(parsed, config);
}

#[test]
fn engine_rejects_invalid_config() {
    let err = FigureEngine::new(NullRenderer::default(), FigureEngineConfig::new(0.0))
        .err()
        .expect("zero dpi must fail");
    assert!(matches!(err, FigureError::InvalidConfig(_)));

    let config = FigureEngineConfig::new(100.0).with_pad_in(-1.0);
    assert!(config.validate().is_err());
}

#[test]
fn render_job_defaults_and_overrides() {
    let job = RenderJobConfig::from_json_str("{}").expect("defaults");
    assert_eq!(job, RenderJobConfig::default());
    assert_eq!(job.seed, DEFAULT_SEED);
    assert_eq!(job.format, OutputFormat::Png);
    assert!(job.only.is_empty());

    let job = RenderJobConfig::from_json_str(
        r#"{
            "output_dir": "out/figures",
            "engine": {"dpi": 96.0},
            "seed": 9,
            "only": ["bos-system"],
            "format": "scene-json"
        }"#,
    )
    .expect("overrides");
    assert_eq!(job.output_dir, PathBuf::from("out/figures"));
    assert_eq!(job.engine.dpi, 96.0);
    assert_eq!(job.seed, 9);
    assert_eq!(job.only, vec!["bos-system".to_owned()]);
    assert_eq!(
        job.output_path(FigureId::BosSystem.file_name()),
        PathBuf::from("out/figures/bos_system.scene.json")
    );
}

#[test]
fn render_job_rejects_bad_input() {
    assert!(RenderJobConfig::from_json_str(r#"{"engine": {"dpi": -5.0}}"#).is_err());
    assert!(RenderJobConfig::from_json_str(r#"{"only": [" "]}"#).is_err());
    assert!(RenderJobConfig::from_json_str(r#"{"format": "svg"}"#).is_err());
    assert!(OutputFormat::parse("svg").is_err());
    assert_eq!(
        OutputFormat::parse("scene-json").expect("format"),
        OutputFormat::SceneJson
    );
}

#[test]
fn scene_summary_contract_round_trips() {
    let engine = FigureEngine::new(NullRenderer::default(), FigureEngineConfig::new(60.0))
        .expect("engine");
    let figure = FigureId::SchlierenPrinciples
        .build(&FigureContext::default())
        .expect("figure");

    let summary = engine.scene_summary(&figure).expect("summary");
    assert_eq!(summary.panels.len(), figure.axes().len());
    assert_eq!(summary.viewport, figure.viewport(60.0));
    assert!(summary.panels.iter().all(|panel| !panel.layers.is_empty()));
    assert!(summary.overlay.texts >= 1);

    let json = engine
        .scene_summary_json_contract_v1_pretty(&figure)
        .expect("json");
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(value["schema_version"], SCENE_SUMMARY_JSON_SCHEMA_V1);
    let parsed = SceneSummary::from_json_compat_str(&json).expect("parse");
    assert_eq!(parsed, summary);

    let bare = serde_json::to_string(&summary).expect("bare");
    let parsed = SceneSummary::from_json_compat_str(&bare).expect("bare parse");
    assert_eq!(parsed, summary);
}

#[test]
fn scene_summary_preserves_fractional_plot_rects() {
    let summary = SceneSummary {
        viewport: Viewport::new(1600, 1200),
        panels: vec![PanelSummary {
            panel: 1,
            plot_rect: PixelRect::new(1029.5, 80.0, 361.043_478_260_869_56, 1e-7 / 3.0),
            layers: Vec::new(),
            stats: RenderStats::default(),
        }],
        overlay: RenderStats::default(),
        totals: RenderStats::default(),
    };

    let json = summary.to_json_contract_v1_pretty().expect("json");
    let parsed = SceneSummary::from_json_compat_str(&json).expect("parse");
    assert_eq!(
        parsed.panels[0].plot_rect.width.to_bits(),
        361.043_478_260_869_56_f64.to_bits()
    );
    assert_eq!(parsed, summary);
}

#[test]
fn scene_summary_rejects_unknown_schema() {
    let engine = FigureEngine::new(NullRenderer::default(), FigureEngineConfig::new(40.0))
        .expect("engine");
    let figure = FigureId::BosSystem
        .build(&FigureContext::default())
        .expect("figure");
    let json = engine
        .scene_summary_json_contract_v1_pretty(&figure)
        .expect("json")
        .replacen("\"schema_version\": 1", "\"schema_version\": 99", 1);
    assert!(SceneSummary::from_json_compat_str(&json).is_err());
}
