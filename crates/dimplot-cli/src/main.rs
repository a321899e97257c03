use dimplot::render::raster::{self, RasterError, RasterOptions};
use dimplot::render::{HeadlessError, PlotConfig};
use dimplot::{DatasetBundle, PlotDocument, Statistics};
use serde::Serialize;
use serde_json::Value;
use std::io::Read;
use std::str::FromStr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Plot(dimplot::Error),
    Render(dimplot_render::Error),
    Headless(HeadlessError),
    Raster(RasterError),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Plot(err) => write!(f, "{err}"),
            CliError::Render(err) => write!(f, "{err}"),
            CliError::Headless(err) => write!(f, "{err}"),
            CliError::Raster(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<dimplot::Error> for CliError {
    fn from(value: dimplot::Error) -> Self {
        Self::Plot(value)
    }
}

impl From<dimplot_render::Error> for CliError {
    fn from(value: dimplot_render::Error) -> Self {
        Self::Render(value)
    }
}

impl From<HeadlessError> for CliError {
    fn from(value: HeadlessError) -> Self {
        Self::Headless(value)
    }
}

impl From<RasterError> for CliError {
    fn from(value: RasterError) -> Self {
        Self::Raster(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Render,
    Layout,
    Stats,
}

#[derive(Debug, Clone, Copy, Default)]
enum RenderFormat {
    #[default]
    Svg,
    Png,
    Jpeg,
    Pdf,
}

impl FromStr for RenderFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "pdf" => Ok(Self::Pdf),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    config: Option<String>,
    pretty: bool,
    render_format: RenderFormat,
    render_scale: f32,
    background: Option<String>,
    width: Option<f64>,
    height: Option<f64>,
    seed: Option<u64>,
    dimension: usize,
    out: Option<String>,
}

#[derive(Serialize)]
struct CategoryStatsOut<'a> {
    name: &'a str,
    color: &'a str,
    #[serde(flatten)]
    stats: &'a Statistics,
}

#[derive(Serialize)]
struct StatsOut<'a> {
    title: &'a str,
    categories: Vec<CategoryStatsOut<'a>>,
}

fn usage() -> &'static str {
    "dimplot-cli\n\
\n\
USAGE:\n\
  dimplot-cli [render] [--format svg|png|jpg|pdf] [--scale <n>] [--background <css-color>] [--config <path>] [--width <w>] [--height <h>] [--seed <n>] [--dimension <i>] [--out <path>] [<path>|-]\n\
  dimplot-cli layout [--pretty] [--config <path>] [--width <w>] [--height <h>] [--seed <n>] [--dimension <i>] [<path>|-]\n\
  dimplot-cli stats [--pretty] [--dimension <i>] [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - Input is a plot document, or a dataset bundle (an object with `points`); --dimension picks the bundle column.\n\
  - --config reads a JSON plot config; --width/--height/--seed/--background override it.\n\
  - render prints SVG to stdout by default; use --out to write a file.\n\
  - PNG/JPG/PDF output defaults to writing next to the input file (or ./out.<ext> for stdin).\n\
  - Set RUST_LOG (e.g. RUST_LOG=dimplot=debug) for diagnostics on stderr.\n\
"
}

fn next_value<'a>(it: &mut impl Iterator<Item = &'a String>) -> Result<&'a String, CliError> {
    it.next().ok_or(CliError::Usage(usage()))
}

fn parse_value<T: FromStr>(raw: &str) -> Result<T, CliError> {
    raw.trim().parse::<T>().map_err(|_| CliError::Usage(usage()))
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args {
        command: Command::Render,
        render_format: RenderFormat::Svg,
        render_scale: 1.0,
        ..Default::default()
    };

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "render" => args.command = Command::Render,
            "layout" => args.command = Command::Layout,
            "stats" => args.command = Command::Stats,
            "--pretty" => args.pretty = true,
            "--format" => {
                args.render_format = parse_value(next_value(&mut it)?)?;
            }
            "--scale" => {
                args.render_scale = parse_value(next_value(&mut it)?)?;
                if !(args.render_scale.is_finite() && args.render_scale > 0.0) {
                    return Err(CliError::Usage(usage()));
                }
            }
            "--background" => {
                let bg = next_value(&mut it)?;
                if !bg.trim().is_empty() {
                    args.background = Some(bg.trim().to_string());
                }
            }
            "--config" => args.config = Some(next_value(&mut it)?.clone()),
            "--width" => args.width = Some(parse_value(next_value(&mut it)?)?),
            "--height" => args.height = Some(parse_value(next_value(&mut it)?)?),
            "--seed" => args.seed = Some(parse_value(next_value(&mut it)?)?),
            "--dimension" => args.dimension = parse_value(next_value(&mut it)?)?,
            "--out" => args.out = Some(next_value(&mut it)?.clone()),
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            other if other.starts_with('-') && other != "-" => {
                return Err(CliError::Usage(usage()));
            }
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

/// Plot document from either input shape: a document, or a bundle recognized by `points`.
fn load_document(text: &str, dimension: usize) -> Result<PlotDocument, CliError> {
    let value: Value = serde_json::from_str(text).map_err(dimplot::Error::from)?;
    if value.get("points").is_some() {
        let bundle = DatasetBundle::from_json_str(text)?;
        tracing::debug!(
            dimensions = bundle.dataset.num_dimensions(),
            clusters = bundle.clusters.len(),
            dimension,
            "read dataset bundle"
        );
        return Ok(bundle.document(dimension)?);
    }
    Ok(PlotDocument::from_json_value(&value)?)
}

fn load_config(args: &Args) -> Result<PlotConfig, CliError> {
    let mut config = match args.config.as_deref() {
        Some(path) => PlotConfig::from_json_str(&std::fs::read_to_string(path)?)?,
        None => PlotConfig::default(),
    };
    if let Some(w) = args.width {
        config.width = w;
    }
    if let Some(h) = args.height {
        config.height = h;
    }
    if let Some(seed) = args.seed {
        config.jitter_seed = Some(seed);
    }
    if let Some(bg) = args.background.as_ref() {
        config.background = Some(bg.clone());
    }
    config.validate()?;
    Ok(config)
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    println!();
    Ok(())
}

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None => {
            print!("{text}");
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

fn default_raster_out_path(input: Option<&str>, ext: &str) -> std::path::PathBuf {
    match input {
        Some(path) if path != "-" => std::path::PathBuf::from(path).with_extension(ext),
        _ => std::path::PathBuf::from(format!("out.{ext}")),
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let text = read_input(args.input.as_deref())?;
    let document = load_document(&text, args.dimension)?;

    match args.command {
        Command::Stats => {
            let groups = dimplot::group_document(&document)?;
            let out = StatsOut {
                title: &document.title,
                categories: groups
                    .iter()
                    .map(|g| CategoryStatsOut {
                        name: &g.name,
                        color: &g.color,
                        stats: &g.stats,
                    })
                    .collect(),
            };
            write_json(&out, args.pretty)
        }
        Command::Layout => {
            let config = load_config(&args)?;
            let layout = dimplot::render::layout_sync(&document, &config)?;
            write_json(&layout, args.pretty)
        }
        Command::Render => {
            let config = load_config(&args)?;
            let raster_options = RasterOptions {
                scale: args.render_scale,
                background: args.background.clone(),
                ..Default::default()
            };

            let (bytes, ext) = match args.render_format {
                RenderFormat::Svg => {
                    let svg = dimplot::render::render_svg_sync(&document, &config)?;
                    return write_text(&svg, args.out.as_deref());
                }
                RenderFormat::Png => (
                    raster::render_png_sync(&document, &config, &raster_options)?,
                    "png",
                ),
                RenderFormat::Jpeg => (
                    raster::render_jpeg_sync(&document, &config, &raster_options)?,
                    "jpg",
                ),
                RenderFormat::Pdf => (raster::render_pdf_sync(&document, &config)?, "pdf"),
            };
            let out = args
                .out
                .as_deref()
                .map(std::path::PathBuf::from)
                .unwrap_or_else(|| default_raster_out_path(args.input.as_deref(), ext));
            std::fs::write(&out, bytes)?;
            tracing::debug!(path = %out.display(), "wrote {ext}");
            Ok(())
        }
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();
}

fn main() {
    init_tracing();

    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
