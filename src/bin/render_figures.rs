use std::fs;
use std::path::{Path, PathBuf};

use schlieren_figures::api::{Figure, FigureEngine, OutputFormat, RenderJobConfig};
use schlieren_figures::figures::{self, FigureContext, FigureId};
use schlieren_figures::render::NullRenderer;
use schlieren_figures::{FigureError, FigureResult, telemetry};
use tracing::info;

#[derive(Debug, Default)]
struct CliArgs {
    config_path: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    dpi: Option<f64>,
    seed: Option<u64>,
    format: Option<OutputFormat>,
    only: Vec<String>,
    list: bool,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let _ = telemetry::init_default_tracing();
    let args = parse_args()?;

    if args.list {
        for (id, entry) in figures::catalog() {
            println!("{id:<28} {}", entry.file_name);
        }
        return Ok(());
    }

    let job = resolve_job(&args)?;
    let ids = figures::select(&job.only).map_err(|err| err.to_string())?;
    let context = FigureContext::new(job.seed);
    fs::create_dir_all(&job.output_dir).map_err(|err| {
        format!(
            "failed to create output dir `{}`: {err}",
            job.output_dir.display()
        )
    })?;

    info!(
        figures = ids.len(),
        seed = job.seed,
        dpi = job.engine.dpi,
        output_dir = %job.output_dir.display(),
        "rendering figure catalog"
    );
    let built = build_all(&ids, &context).map_err(|err| err.to_string())?;
    for (id, figure) in &built {
        let path = job.output_path(id.file_name());
        write_figure(&job, figure, &path)
            .map_err(|err| format!("figure `{id}` failed: {err}"))?;
        println!("generated {id} -> {}", path.display());
    }

    println!("done: generated {} figure(s)", built.len());
    Ok(())
}

fn resolve_job(args: &CliArgs) -> Result<RenderJobConfig, String> {
    let mut job = match &args.config_path {
        Some(path) => RenderJobConfig::from_json_file(path).map_err(|err| err.to_string())?,
        None => RenderJobConfig::default(),
    };
    if let Some(output_dir) = &args.output_dir {
        job.output_dir = output_dir.clone();
    }
    if let Some(dpi) = args.dpi {
        job.engine.dpi = dpi;
    }
    if let Some(seed) = args.seed {
        job.seed = seed;
    }
    if let Some(format) = args.format {
        job.format = format;
    }
    if !args.only.is_empty() {
        job.only = args.only.clone();
    }
    job.validate().map_err(|err| err.to_string())?;
    Ok(job)
}

#[cfg(feature = "parallel-render")]
fn build_all(ids: &[FigureId], context: &FigureContext) -> FigureResult<Vec<(FigureId, Figure)>> {
    use rayon::prelude::*;

    ids.par_iter().map(|id| build_one(*id, context)).collect()
}

#[cfg(not(feature = "parallel-render"))]
fn build_all(ids: &[FigureId], context: &FigureContext) -> FigureResult<Vec<(FigureId, Figure)>> {
    ids.iter().map(|id| build_one(*id, context)).collect()
}

fn build_one(id: FigureId, context: &FigureContext) -> FigureResult<(FigureId, Figure)> {
    id.build(context).map(|figure| (id, figure))
}

fn write_figure(job: &RenderJobConfig, figure: &Figure, path: &Path) -> FigureResult<()> {
    match job.format {
        OutputFormat::SceneJson => {
            let engine = FigureEngine::new(NullRenderer::default(), job.engine)?;
            let json = engine.scene_summary_json_contract_v1_pretty(figure)?;
            fs::write(path, json).map_err(|source| FigureError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
        OutputFormat::Png => write_png(job, figure, path),
    }
}

#[cfg(feature = "cairo-backend")]
fn write_png(job: &RenderJobConfig, figure: &Figure, path: &Path) -> FigureResult<()> {
    use schlieren_figures::render::CairoRenderer;

    let renderer = CairoRenderer::for_viewport(figure.viewport(job.engine.dpi))?;
    let mut engine = FigureEngine::new(renderer, job.engine)?;
    engine.render(figure)?;
    engine.renderer().write_png(path)
}

#[cfg(not(feature = "cairo-backend"))]
fn write_png(_job: &RenderJobConfig, _figure: &Figure, _path: &Path) -> FigureResult<()> {
    Err(FigureError::InvalidConfig(
        "png output requires feature `cairo-backend` (or use --format scene-json)".to_owned(),
    ))
}

fn parse_args() -> Result<CliArgs, String> {
    let mut cli = CliArgs::default();

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --config".to_owned())?;
                cli.config_path = Some(PathBuf::from(value));
            }
            "--output-dir" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --output-dir".to_owned())?;
                cli.output_dir = Some(PathBuf::from(value));
            }
            "--dpi" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --dpi".to_owned())?;
                let dpi = value
                    .parse::<f64>()
                    .map_err(|err| format!("invalid --dpi `{value}`: {err}"))?;
                cli.dpi = Some(dpi);
            }
            "--seed" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --seed".to_owned())?;
                let seed = value
                    .parse::<u64>()
                    .map_err(|err| format!("invalid --seed `{value}`: {err}"))?;
                cli.seed = Some(seed);
            }
            "--format" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --format".to_owned())?;
                cli.format = Some(OutputFormat::parse(&value).map_err(|err| err.to_string())?);
            }
            "--only" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --only".to_owned())?;
                cli.only.push(value);
            }
            "--list" => cli.list = true,
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            _ => {
                return Err(format!("unknown argument `{arg}`\n\n{}", usage_message()));
            }
        }
    }

    Ok(cli)
}

fn print_usage() {
    println!("{}", usage_message());
}

fn usage_message() -> String {
    "Usage: cargo run --features cairo-backend --bin render_figures -- [options]\n\nOptions:\n  --output-dir <dir>     Directory for generated files (default: .)\n  --dpi <n>              Output resolution (default: 300)\n  --only <figure-id>     Render only this figure; repeatable\n  --seed <n>             Noise seed (default: 42)\n  --format <fmt>         png | scene-json (default: png)\n  --config <path>        Render job JSON; flags override it\n  --list                 Print figure ids and file names\n  -h, --help             Show this message"
        .to_owned()
}
