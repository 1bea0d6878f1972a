use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tui_artgen::config::{PaletteKind, VisualMode};
use tui_artgen::engine::ArtEngine;
use tui_artgen::export;
use tui_artgen::params::ArtParams;
use tui_artgen::presets;

const DEFAULT_SEED: u64 = 0xC0DE_2026;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "render_frames",
    version,
    about = "Headless generative-art renderer (PNG frame sequence)"
)]
pub(crate) struct Cli {
    #[arg(long, value_enum, default_value_t = VisualMode::Waves)]
    pub(crate) mode: VisualMode,

    #[arg(long, value_enum, default_value_t = PaletteKind::Neon)]
    pub(crate) palette: PaletteKind,

    #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(u16).range(1..=100))]
    pub(crate) speed: u16,

    #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(u16).range(10..=100))]
    pub(crate) complexity: u16,

    #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(u16).range(10..=100))]
    pub(crate) size: u16,

    #[arg(long, value_name = "NAME")]
    pub(crate) preset: Option<String>,

    #[arg(long, default_value_t = 640)]
    pub(crate) width: usize,

    #[arg(long, default_value_t = 360)]
    pub(crate) height: usize,

    /// Total animation ticks to advance.
    #[arg(long, default_value_t = 120)]
    pub(crate) frames: usize,

    /// Write every Nth tick (1 = every frame).
    #[arg(long, default_value_t = 1)]
    pub(crate) every: usize,

    #[arg(long, value_name = "DIR", default_value = "frames")]
    pub(crate) out: PathBuf,

    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub(crate) seed: u64,
}

pub(crate) fn frame_filename(index: usize) -> String {
    format!("frame-{index:05}.png")
}

/// Stills written for a run of `total` ticks sampled every `every` ticks.
pub(crate) fn stills_for_run(total: usize, every: usize) -> usize {
    if total == 0 || every == 0 {
        return 0;
    }
    total.div_ceil(every)
}

pub(crate) fn validate_args(args: &Cli) -> Result<()> {
    if args.width == 0 {
        bail!("--width must be >= 1");
    }
    if args.height == 0 {
        bail!("--height must be >= 1");
    }
    if args.frames == 0 {
        bail!("--frames must be >= 1");
    }
    if args.every == 0 {
        bail!("--every must be >= 1");
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Cli::parse();
    run(args)
}

fn run(args: Cli) -> Result<()> {
    validate_args(&args)?;

    let mut params = ArtParams {
        mode: args.mode,
        palette: args.palette,
        speed: args.speed,
        complexity: args.complexity,
        size: args.size,
        playing: true,
    };
    if let Some(name) = args.preset.as_deref() {
        let preset = presets::by_name(name)
            .with_context(|| format!("unknown preset {name:?} (see tui-artgen --list-presets)"))?;
        params.apply(preset.update());
    }

    fs::create_dir_all(&args.out)
        .with_context(|| format!("create output directory {}", args.out.display()))?;

    let mut engine = ArtEngine::with_seed(params, args.width, args.height, args.seed);

    let start = Instant::now();
    let mut written = 0usize;
    for tick in 0..args.frames {
        engine.render_frame();
        if tick % args.every == 0 {
            let path = args.out.join(frame_filename(written));
            export::save_png(&path, args.width as u32, args.height as u32, engine.pixels())
                .with_context(|| format!("write still {}", path.display()))?;
            written += 1;
        }
    }

    println!(
        "wrote {} stills ({}x{}, {} ticks, mode {}) in {:.2}s -> {}",
        written,
        args.width,
        args.height,
        args.frames,
        engine.params().mode.label(),
        start.elapsed().as_secs_f32(),
        args.out.display()
    );
    Ok(())
}
