use std::ops::RangeInclusive;
use std::path::PathBuf;

use anyhow::Context as _;
use clap::builder::RangedI64ValueParser;
use clap::{Args, Parser, Subcommand, ValueEnum};
use countdown::{
    ConfigBounds, CountdownSession, EncodeOpts, EncodeProgress, FfmpegSink, FfmpegSinkOpts,
    FontFace, FrameIndex, RenderConfig, Rgb8, Style,
};

#[derive(Parser, Debug)]
#[command(name = "countdown", version, about = "Render countdown timer videos")]
struct Cli {
    /// Log at debug level (overridden by `RUST_LOG`).
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Render the countdown as an MP4 (requires `ffmpeg` on PATH).
    Render(RenderArgs),
}

#[derive(Args, Debug)]
struct ConfigArgs {
    /// JSON configuration file; flags below override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Canvas width in pixels.
    #[arg(long, value_parser = bounded(|b| &b.dimension))]
    width: Option<u32>,
    /// Canvas height in pixels.
    #[arg(long, value_parser = bounded(|b| &b.dimension))]
    height: Option<u32>,
    /// Countdown length in seconds.
    #[arg(long, value_parser = bounded(|b| &b.duration_secs))]
    duration: Option<u32>,
    /// Frames per second.
    #[arg(long, value_parser = bounded(|b| &b.fps))]
    fps: Option<u32>,
    /// Font size in pixels.
    #[arg(long, value_parser = bounded(|b| &b.font_size))]
    font_size: Option<u32>,
    /// Font file (TTF/OTF). Falls back to built-in digits when unreadable.
    #[arg(long)]
    font: Option<PathBuf>,
    /// Readout color: any opaque CSS color (`tomato`, `#RRGGBB`, `rgb(255 99 71)`).
    #[arg(long)]
    text_color: Option<Rgb8>,
    /// Progress arc color.
    #[arg(long)]
    arc_color: Option<Rgb8>,
    /// Background color.
    #[arg(long)]
    background_color: Option<Rgb8>,
    /// Visual style.
    #[arg(long, value_enum)]
    style: Option<StyleArg>,
    /// Outer radius of the progress arc in pixels.
    #[arg(long, value_parser = bounded(|b| &b.arc_radius))]
    arc_radius: Option<u32>,
    /// Stroke width of the progress arc in pixels.
    #[arg(long, value_parser = bounded(|b| &b.arc_width))]
    arc_width: Option<u32>,

    /// Print the effective configuration as JSON and exit.
    #[arg(long)]
    print_config: bool,
}

/// Flag parser for a field limited by [`ConfigBounds::default`].
fn bounded(pick: fn(&ConfigBounds) -> &RangeInclusive<u32>) -> RangedI64ValueParser<u32> {
    let bounds = ConfigBounds::default();
    let range = pick(&bounds);
    RangedI64ValueParser::<u32>::new().range(i64::from(*range.start())..=i64::from(*range.end()))
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum StyleArg {
    Arc,
    PlainDigits,
}

impl From<StyleArg> for Style {
    fn from(s: StyleArg) -> Self {
        match s {
            StyleArg::Arc => Style::Arc,
            StyleArg::PlainDigits => Style::PlainDigits,
        }
    }
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Frame index (0-based).
    #[arg(long, conflicts_with = "fraction")]
    frame: Option<u64>,

    /// Position in the countdown, 0.0 to 1.0, as a preview slider would pick it.
    #[arg(long)]
    fraction: Option<f64>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Output MP4 path. Defaults to `countdown_{duration}s_{width}p.mp4` in the output directory.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Output directory used when `--out` is not given (default: `$COUNTDOWN_OUTPUT_DIR`, else
    /// `~/Downloads`).
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Fail instead of replacing an existing output file.
    #[arg(long)]
    no_overwrite: bool,

    /// Leave out the beep track.
    #[arg(long)]
    no_audio: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let default_level = if verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

fn load_config(args: &ConfigArgs) -> anyhow::Result<RenderConfig> {
    let mut cfg = match &args.config {
        Some(path) => RenderConfig::from_json_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => RenderConfig::default(),
    };

    if let Some(v) = args.width {
        cfg.width = v;
    }
    if let Some(v) = args.height {
        cfg.height = v;
    }
    if let Some(v) = args.duration {
        cfg.duration_secs = v;
    }
    if let Some(v) = args.fps {
        cfg.fps = v;
    }
    if let Some(v) = args.font_size {
        cfg.font_size = v;
    }
    if let Some(v) = &args.font {
        cfg.font_path = v.clone();
    }
    if let Some(v) = args.text_color {
        cfg.text_color = v;
    }
    if let Some(v) = args.arc_color {
        cfg.arc_color = v;
    }
    if let Some(v) = args.background_color {
        cfg.background_color = v;
    }
    if let Some(v) = args.style {
        cfg.style = v.into();
    }
    if let Some(v) = args.arc_radius {
        cfg.arc_radius = v;
    }
    if let Some(v) = args.arc_width {
        cfg.arc_width = v;
    }

    ConfigBounds::default().check(&cfg)?;
    Ok(cfg)
}

fn print_config(cfg: &RenderConfig) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(cfg).context("serialize config")?;
    println!("{json}");
    Ok(())
}

fn log_font(session: &mut CountdownSession) {
    match session.font_face() {
        FontFace::File { family } => tracing::info!(%family, "using font"),
        FontFace::Builtin => tracing::info!("using built-in digits"),
    }
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.config)?;
    if args.config.print_config {
        return print_config(&cfg);
    }

    let mut session = CountdownSession::new(cfg, EncodeOpts::default())?;
    log_font(&mut session);
    let frame = match (args.frame, args.fraction) {
        (_, Some(fraction)) => session.render_preview(fraction)?,
        (idx, None) => session.render_frame(FrameIndex(idx.unwrap_or(0)))?,
    };

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        &args.out,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgb8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.config)?;
    if args.config.print_config {
        return print_config(&cfg);
    }

    let out = match args.out {
        Some(out) => out,
        None => {
            let dir = args.out_dir.unwrap_or_else(countdown::default_output_dir);
            cfg.default_output_path(dir)
        }
    };

    let opts = EncodeOpts {
        enable_audio: !args.no_audio,
        overwrite: !args.no_overwrite,
        ..EncodeOpts::default()
    };
    let mut sink = FfmpegSink::new(FfmpegSinkOpts {
        overwrite: opts.overwrite,
        ..FfmpegSinkOpts::new(&out)
    });
    let mut session = CountdownSession::new(cfg, opts)?;
    log_font(&mut session);

    let mut last_step = 0u8;
    let mut report = |p: EncodeProgress| {
        let step = p.percent / 10;
        if step > last_step {
            last_step = step;
            tracing::info!(
                percent = p.percent,
                frame = p.frames_done,
                total = p.frames_total,
                "encoding"
            );
        }
    };

    let stats = session
        .render_range(&mut sink, &mut report)
        .with_context(|| format!("render '{}'", out.display()))?;

    tracing::info!(frames = stats.frames_rendered, "done");
    eprintln!("wrote {}", out.display());
    Ok(())
}
