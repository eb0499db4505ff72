use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "splashmark", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Lay out and fit a scene for a viewport, writing an SVG snapshot.
    Snapshot(SnapshotArgs),
    /// Emit the splash choreography as a JSON op list.
    Choreo(ChoreoArgs),
}

#[derive(Parser, Debug)]
struct SnapshotArgs {
    /// Scene spec JSON; the stock mark is used when omitted.
    #[arg(long)]
    scene: Option<PathBuf>,

    /// Engine config JSON; defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Viewport as WIDTHxHEIGHT, e.g. 800x600.
    #[arg(long, default_value = "1280x720")]
    viewport: String,

    /// Output SVG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct ChoreoArgs {
    /// Brand red as a hex color.
    #[arg(long, default_value = splashmark::BRAND_RED_FALLBACK)]
    brand_red: String,

    /// Output JSON path (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Snapshot(args) => cmd_snapshot(args),
        Command::Choreo(args) => cmd_choreo(args),
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path, what: &str) -> anyhow::Result<T> {
    let f = File::open(path).with_context(|| format!("open {what} '{}'", path.display()))?;
    let r = BufReader::new(f);
    let v = serde_json::from_reader(r).with_context(|| format!("parse {what} JSON"))?;
    Ok(v)
}

fn parse_viewport(s: &str) -> anyhow::Result<splashmark::Viewport> {
    let (w, h) = s
        .split_once('x')
        .with_context(|| format!("viewport '{s}' must be WIDTHxHEIGHT"))?;
    let w: f64 = w.trim().parse().with_context(|| "parse viewport width")?;
    let h: f64 = h.trim().parse().with_context(|| "parse viewport height")?;
    Ok(splashmark::Viewport::new(w, h)?)
}

fn cmd_snapshot(args: SnapshotArgs) -> anyhow::Result<()> {
    let spec: splashmark::SceneSpec = match &args.scene {
        Some(path) => read_json(path, "scene spec")?,
        None => splashmark::SceneSpec::default(),
    };
    let config: splashmark::SplashConfig = match &args.config {
        Some(path) => read_json(path, "config")?,
        None => splashmark::SplashConfig::default(),
    };
    let viewport = parse_viewport(&args.viewport)?;

    let mut scene = splashmark::Scene::from_spec(&spec)?;

    // Prefer real font metrics; fall back to heuristic metrics on systems
    // without fonts.
    let svg_measurer = splashmark::SvgMeasurer::new();
    let fit = if svg_measurer.font_faces() > 0 {
        splashmark::relayout(&mut scene, &svg_measurer, viewport, &config)?
    } else {
        splashmark::relayout(
            &mut scene,
            splashmark::HeuristicMeasurer::default(),
            viewport,
            &config,
        )?
    };

    let doc = splashmark::scene_to_svg(&scene, config.canvas, &splashmark::SvgTheme::default());
    std::fs::write(&args.out, doc)
        .with_context(|| format!("write svg '{}'", args.out.display()))?;
    eprintln!(
        "wrote {} (scale {:.4}, translate {:.1},{:.1})",
        args.out.display(),
        fit.scale,
        fit.translate.x,
        fit.translate.y
    );
    Ok(())
}

fn cmd_choreo(args: ChoreoArgs) -> anyhow::Result<()> {
    let palette = splashmark::Palette {
        brand_red: splashmark::Rgba::from_hex(&args.brand_red)?,
        ..splashmark::Palette::default()
    };
    let mut engine = splashmark::RecordingEngine::new();
    splashmark::Choreography::build(&mut engine, &palette);

    let json = serde_json::to_string_pretty(engine.ops())?;
    match &args.out {
        Some(path) => std::fs::write(path, json)
            .with_context(|| format!("write choreography '{}'", path.display()))?,
        None => println!("{json}"),
    }
    Ok(())
}
