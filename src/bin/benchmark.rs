use std::time::{Duration, Instant};

use anyhow::Result;
use tui_artgen::config::VisualMode;
use tui_artgen::engine::ArtEngine;
use tui_artgen::palette::BACKGROUND;
use tui_artgen::params::ArtParams;
use tui_artgen::presets::PRESETS;

const BENCH_SEED: u64 = 0xBE7C_2026;

struct Args {
    frames: usize,
    w: usize,
    h: usize,
    seed: u64,
    ci_smoke: bool,
    quick: bool,
    max_ms: f64,
}

fn parse_args() -> Args {
    let mut args = Args {
        frames: 240,
        w: 240,
        h: 136,
        seed: BENCH_SEED,
        ci_smoke: false,
        quick: false,
        max_ms: 16.0,
    };

    let argv = std::env::args().skip(1).collect::<Vec<_>>();
    let mut i = 0usize;
    while i < argv.len() {
        let k = argv[i].as_str();
        let v = argv.get(i + 1).map(|s| s.as_str());
        match (k, v) {
            ("--frames", Some(x)) => {
                if let Ok(n) = x.parse::<usize>() {
                    args.frames = n.max(1);
                }
                i += 2;
            }
            ("--w", Some(x)) => {
                if let Ok(n) = x.parse::<usize>() {
                    args.w = n.max(1);
                }
                i += 2;
            }
            ("--h", Some(x)) => {
                if let Ok(n) = x.parse::<usize>() {
                    args.h = n.max(1);
                }
                i += 2;
            }
            ("--seed", Some(x)) => {
                if let Ok(n) = x.parse::<u64>() {
                    args.seed = n;
                }
                i += 2;
            }
            ("--ci-smoke", Some(x)) if !x.starts_with("--") => {
                args.ci_smoke = parse_bool(x).unwrap_or(true);
                i += 2;
            }
            ("--ci-smoke", _) => {
                args.ci_smoke = true;
                i += 1;
            }
            ("--quick", Some(x)) if !x.starts_with("--") => {
                args.quick = parse_bool(x).unwrap_or(true);
                i += 2;
            }
            ("--quick", _) => {
                args.quick = true;
                i += 1;
            }
            ("--max-ms", Some(x)) => {
                if let Ok(v) = x.parse::<f64>() {
                    args.max_ms = v.max(0.1);
                }
                i += 2;
            }
            _ => {
                i += 1;
            }
        }
    }

    if args.quick {
        args.frames = args.frames.min(60);
    }

    args
}

fn parse_bool(s: &str) -> Option<bool> {
    let v = s.trim().to_ascii_lowercase();
    match v.as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn painted(px: &[u8]) -> bool {
    px.chunks_exact(4)
        .any(|p| p[0] != BACKGROUND[0] || p[1] != BACKGROUND[1] || p[2] != BACKGROUND[2])
}

struct BenchResult {
    label: String,
    ms_per_frame: f64,
    lit: usize,
}

fn bench_engine(label: &str, params: ArtParams, args: &Args) -> BenchResult {
    let mut engine = ArtEngine::with_seed(params, args.w, args.h, args.seed);

    let start = Instant::now();
    let mut lit = 0usize;
    for _ in 0..args.frames {
        engine.render_frame();
        if painted(engine.pixels()) {
            lit += 1;
        }
    }
    let ms = start.elapsed().as_secs_f64() * 1000.0 / args.frames as f64;

    BenchResult {
        label: label.to_string(),
        ms_per_frame: ms,
        lit,
    }
}

fn main() -> Result<()> {
    let args = parse_args();

    println!(
        "mode benchmark: frames/mode={} size={}x{} seed={:#x} quick={}",
        args.frames, args.w, args.h, args.seed, args.quick
    );

    let mut total = Duration::ZERO;
    let mut total_frames = 0usize;
    let mut black = Vec::<String>::new();
    let mut slow = Vec::<(String, f64)>::new();

    for mode in VisualMode::all() {
        let params = ArtParams {
            mode,
            ..ArtParams::default()
        };
        let r = bench_engine(mode.label(), params, &args);
        println!(
            "  {:<10} {:>8.3} ms/frame  lit={:>3}/{}",
            r.label, r.ms_per_frame, r.lit, args.frames
        );
        total += Duration::from_secs_f64(r.ms_per_frame * args.frames as f64 / 1000.0);
        total_frames += args.frames;
        if r.lit == 0 {
            black.push(r.label.clone());
        }
        if args.ci_smoke && r.ms_per_frame > args.max_ms {
            slow.push((r.label, r.ms_per_frame));
        }
    }

    let avg_ms = total.as_secs_f64() * 1000.0 / total_frames.max(1) as f64;
    let fps = if avg_ms > 0.0 { 1000.0 / avg_ms } else { 0.0 };
    println!("mode summary: {:>8.3} ms/frame avg  {:>7.2} FPS", avg_ms, fps);

    println!(
        "preset benchmark: presets={} frames/preset={}",
        PRESETS.len(),
        args.frames
    );
    for (idx, preset) in PRESETS.iter().enumerate() {
        let mut params = ArtParams::default();
        params.apply(preset.update());
        let r = bench_engine(preset.name, params, &args);
        println!(
            "{:>2}. {:<10} {:>8.3} ms/frame  lit={:>3}/{}",
            idx + 1,
            r.label,
            r.ms_per_frame,
            r.lit,
            args.frames
        );
        if r.lit == 0 {
            black.push(format!("preset {}", r.label));
        }
        if args.ci_smoke && r.ms_per_frame > args.max_ms {
            slow.push((format!("preset {}", r.label), r.ms_per_frame));
        }
    }

    if args.ci_smoke {
        if !black.is_empty() || !slow.is_empty() {
            eprintln!("CI smoke: FAIL");
            if !black.is_empty() {
                eprintln!("  black output: {}", black.join(", "));
            }
            for (name, ms) in slow {
                eprintln!("  slow: {} ({:.3} ms/frame > {:.3})", name, ms, args.max_ms);
            }
            anyhow::bail!("ci smoke failed");
        }
        println!("CI smoke: PASS (max_ms={:.3})", args.max_ms);
    }

    Ok(())
}
