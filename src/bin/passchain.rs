use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "passchain", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Render a numbered PNG sequence into a directory.
    Render(RenderArgs),
    /// Print the debug-panel controls of the configured chain as JSON.
    Panel(ChainArgs),
}

#[derive(Parser, Debug)]
struct ChainArgs {
    /// Chain config JSON. Without it, the demo scene at 320x180 is used.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    /// Enable a pass by id (repeatable), e.g. `--enable tint --enable bloom`.
    #[arg(long = "enable")]
    enable: Vec<String>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    chain: ChainArgs,

    /// Frame index (0-based); the frame is numbered `frame` and the clock reads `frame / fps`.
    #[arg(long, default_value_t = 0)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    chain: ChainArgs,

    /// Number of frames to render.
    #[arg(long, default_value_t = 60)]
    frames: u64,

    /// Output directory.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
        Command::Panel(args) => cmd_panel(args),
    }
}

fn load_config(args: &ChainArgs) -> anyhow::Result<(passchain::ChainConfig, PathBuf)> {
    let (mut cfg, root) = match &args.in_path {
        Some(path) => {
            let cfg = passchain::ChainConfig::from_path(path)?;
            let root = path.parent().unwrap_or_else(|| Path::new(".")).to_path_buf();
            (cfg, root)
        }
        None => (
            passchain::ChainConfig::new(passchain::SurfaceSize::new(320, 180, 1.0)),
            PathBuf::from("."),
        ),
    };
    for id in &args.enable {
        cfg.passes.entry(id.clone()).or_default().enabled = Some(true);
    }
    cfg.validate()?;
    Ok((cfg, root))
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let (cfg, root) = load_config(&args.chain)?;
    let (mut viewer, loader) = cfg.build_viewer(
        &root,
        Box::new(passchain::InMemorySurface::new()),
        args.frame,
    )?;
    wait_for_assets(loader);
    let frame = viewer.tick()?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    passchain::write_png(&args.out, &frame)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let (cfg, root) = load_config(&args.chain)?;
    let surface = passchain::PngSequenceSurface::new(&args.out, "frame_")?;
    let (mut viewer, loader) = cfg.build_viewer(&root, Box::new(surface), 0)?;
    wait_for_assets(loader);
    viewer
        .run(args.frames)
        .with_context(|| format!("render into '{}'", args.out.display()))?;

    eprintln!("wrote {} frames to {}", args.frames, args.out.display());
    Ok(())
}

fn cmd_panel(args: ChainArgs) -> anyhow::Result<()> {
    let (cfg, root) = load_config(&args)?;
    let chain = cfg.build_chain(&root)?;
    let panel = passchain::ControlPanel::from_snapshot(&chain.snapshot());
    println!("{}", panel.to_json_pretty()?);
    Ok(())
}

/// Offline renders want the normal map in place before the first frame.
fn wait_for_assets(loader: Option<std::thread::JoinHandle<bool>>) {
    if let Some(handle) = loader
        && handle.join().is_err()
    {
        tracing::warn!("texture loader thread panicked");
    }
}
