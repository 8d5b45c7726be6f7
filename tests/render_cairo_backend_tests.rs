#![cfg(feature = "cairo-backend")]

use schlieren_figures::FigureError;
use schlieren_figures::api::{FigureEngine, FigureEngineConfig};
use schlieren_figures::figures::{FigureContext, FigureId};
use schlieren_figures::render::CairoRenderer;

#[test]
fn cairo_renderer_rejects_invalid_surface_size() {
    let err = CairoRenderer::new(0, 480).expect_err("invalid width must fail");
    assert!(matches!(err, FigureError::InvalidData(_)));
}

#[test]
fn rendered_png_matches_figure_inches_times_dpi() {
    let dpi = 40.0;
    let figure = FigureId::ClassicalSchlieren
        .build(&FigureContext::default())
        .expect("figure");
    let viewport = figure.viewport(dpi);

    let renderer = CairoRenderer::for_viewport(viewport).expect("renderer");
    let mut engine = FigureEngine::new(renderer, FigureEngineConfig::new(dpi)).expect("engine");
    let stats = engine.render(&figure).expect("render");
    assert!(stats.total() > 0);

    let path = std::env::temp_dir().join(format!(
        "schlieren_figures_cairo_{}.png",
        std::process::id()
    ));
    engine.renderer().write_png(&path).expect("write png");

    let mut file = std::fs::File::open(&path).expect("open png");
    let surface = cairo::ImageSurface::create_from_png(&mut file).expect("decode png");
    let width = i32::try_from(viewport.width).expect("width");
    let height = i32::try_from(viewport.height).expect("height");
    assert_eq!(surface.width(), width);
    assert_eq!(surface.height(), height);
    assert_eq!(
        (viewport.width, viewport.height),
        (
            (figure.width_in() * dpi).round() as u32,
            (figure.height_in() * dpi).round() as u32,
        )
    );
    let _ = std::fs::remove_file(&path);
}

#[test]
fn every_catalog_figure_rasterizes() {
    let dpi = 20.0;
    let context = FigureContext::default();
    for id in FigureId::ALL {
        let figure = id.build(&context).expect("figure");
        let renderer = CairoRenderer::for_viewport(figure.viewport(dpi)).expect("renderer");
        let mut engine =
            FigureEngine::new(renderer, FigureEngineConfig::new(dpi)).expect("engine");
        engine
            .render(&figure)
            .unwrap_or_else(|err| panic!("{id}: {err}"));
        assert!(engine.renderer().last_stats().total() > 0, "{id}");
    }
}
