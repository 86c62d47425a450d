use std::{
    fs::File,
    path::{Path, PathBuf},
    sync::Mutex,
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "liveslides", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Present a deck in the terminal.
    Present(PresentArgs),
    /// Run the headless prerender pass only.
    Prerender(PrerenderArgs),
    /// Load and validate a deck.
    Check(CheckArgs),
}

#[derive(Args, Debug)]
struct Overrides {
    /// Frames per second.
    #[arg(long)]
    fps: Option<u32>,

    /// Canvas width in pixels.
    #[arg(long)]
    width: Option<u32>,

    /// Canvas height in pixels.
    #[arg(long)]
    height: Option<u32>,

    /// Ask the terminal to go fullscreen.
    #[arg(long)]
    fullscreen: bool,

    /// Skip the prerender pass.
    #[arg(long)]
    no_cache: bool,
}

impl Overrides {
    fn to_config(&self) -> liveslides::ConfigOverrides {
        liveslides::ConfigOverrides {
            fps: self.fps,
            width: self.width,
            height: self.height,
            fullscreen: self.fullscreen,
            no_cache: self.no_cache,
        }
    }
}

#[derive(Parser, Debug)]
struct PresentArgs {
    /// Input slideshow JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Write logs to this file; the terminal itself is taken by the slides.
    #[arg(long)]
    log: Option<PathBuf>,

    #[command(flatten)]
    overrides: Overrides,
}

#[derive(Parser, Debug)]
struct PrerenderArgs {
    /// Input slideshow JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Write `<slide>_start.png` and `<slide>_end.png` here.
    #[arg(long)]
    thumbs: Option<PathBuf>,

    #[command(flatten)]
    overrides: Overrides,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Input slideshow JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Present(args) => cmd_present(args),
        Command::Prerender(args) => {
            init_stderr_logging();
            cmd_prerender(args)
        }
        Command::Check(args) => {
            init_stderr_logging();
            cmd_check(args)
        }
    }
}

fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn init_file_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path).with_context(|| format!("create log file '{}'", path.display()))?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .init();
    Ok(())
}

fn load_deck(path: &Path, overrides: Option<&Overrides>) -> anyhow::Result<liveslides::Slideshow> {
    let mut show = liveslides::Slideshow::from_path(path)
        .with_context(|| format!("load slideshow '{}'", path.display()))?;
    if let Some(o) = overrides {
        let config = show.config().clone().with_overrides(&o.to_config())?;
        show.set_config(config)?;
    }
    Ok(show)
}

fn cmd_present(args: PresentArgs) -> anyhow::Result<()> {
    if let Some(log) = &args.log {
        init_file_logging(log)?;
    }
    let show = load_deck(&args.in_path, Some(&args.overrides))?;

    let cache = liveslides::ShapeCache::new();
    let report = liveslides::prerender_slideshow(&show, &cache);
    if let Some((name, error)) = report.presented_failure() {
        anyhow::bail!("slide '{name}' failed to prerender: {error}");
    }
    if report.failures() > 0 {
        tracing::warn!(failures = report.failures(), "presenting despite prerender failures");
    }

    let mut host = liveslides::SlideshowHost::with_cache(
        liveslides::TerminalDisplay::new(),
        liveslides::SystemClock::new(),
        cache,
    );
    let session = host.run(&show);
    // Leave the alternate screen before printing anything.
    drop(host);
    let session = session.context("present slideshow")?;

    eprintln!(
        "{}: {:?} after {} idle phase(s), {} frame(s) at {:.1} fps",
        session.slide,
        session.exit,
        session.stats.idle_phases,
        session.frames_blitted,
        session.average_fps
    );
    Ok(())
}

fn cmd_prerender(args: PrerenderArgs) -> anyhow::Result<()> {
    let show = load_deck(&args.in_path, Some(&args.overrides))?;
    let cache = liveslides::ShapeCache::new();
    let report = liveslides::prerender_slideshow(&show, &cache);
    if report.skipped {
        eprintln!("caching disabled; nothing prerendered");
        return Ok(());
    }

    for outcome in &report.slides {
        match outcome {
            liveslides::PrerenderOutcome::Ready(slide) => {
                eprintln!(
                    "{}: {} group(s), {} idle phase(s), {} frame(s)",
                    slide.name,
                    slide.stats.groups_played,
                    slide.stats.idle_phases,
                    slide.frames_rendered
                );
                if let Some(dir) = &args.thumbs {
                    for path in slide.thumbnails.write_png(dir, &slide.name)? {
                        eprintln!("wrote {}", path.display());
                    }
                }
            }
            liveslides::PrerenderOutcome::Failed { name, error } => {
                eprintln!("{name}: FAILED: {error}");
            }
        }
    }
    let (hits, misses) = cache.stats();
    eprintln!("shape cache: {} outline(s), {hits} hit(s), {misses} miss(es)", cache.len());

    if report.failures() > 0 {
        anyhow::bail!("{} slide(s) failed to prerender", report.failures());
    }
    Ok(())
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let show = load_deck(&args.in_path, None)?;
    let config = show.config();
    println!(
        "{}: {} slide(s), {}x{} @ {} fps",
        show.name(),
        show.slides().len(),
        config.canvas.width,
        config.canvas.height,
        config.frame_rate.as_f64()
    );
    for slide in show.slides() {
        let subslides = slide
            .script
            .steps()
            .iter()
            .filter(|s| matches!(s, liveslides::ScriptStep::Subslide))
            .count();
        let kind = if slide.script.is_stepwise() {
            "stepwise"
        } else {
            "single-shot"
        };
        println!(
            "  {}: {} object(s), {} step(s), {} subslide(s), {kind}",
            slide.name,
            slide.objects.len(),
            slide.script.steps().len(),
            subslides
        );
    }
    Ok(())
}
