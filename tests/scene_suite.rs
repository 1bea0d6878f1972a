use tui_artgen::canvas::Canvas;
use tui_artgen::config::{PaletteKind, VisualMode};
use tui_artgen::engine::ArtEngine;
use tui_artgen::palette;
use tui_artgen::params::ArtParams;
use tui_artgen::scene::{
    branch_count, branch_segments, max_depth, particle_count, spiral_count, wave_count, FrameCtx,
    ParticleScene, Scene,
};

/// True when anything was drawn over the faded background fill.
fn painted(buf: &[u8]) -> bool {
    buf.chunks_exact(4)
        .any(|px| [px[0], px[1], px[2]] != palette::BACKGROUND)
}

fn particle_params() -> ArtParams {
    ArtParams {
        mode: VisualMode::Particles,
        ..ArtParams::default()
    }
}

// ── Element counts ───────────────────────────────────────────────────────────

#[test]
fn element_counts_scale_with_complexity() {
    assert_eq!(wave_count(10), 4);
    assert_eq!(wave_count(50), 8);
    assert_eq!(wave_count(100), 13);

    assert_eq!(branch_count(25), 5);
    assert_eq!(branch_count(80), 9);
    assert_eq!(branch_count(100), 10);

    assert_eq!(max_depth(10), 3);
    assert_eq!(max_depth(25), 4);
    assert_eq!(max_depth(80), 6);
    assert_eq!(max_depth(100), 7);

    assert_eq!(particle_count(10), 40);
    assert_eq!(particle_count(50), 120);
    assert_eq!(particle_count(100), 220);

    assert_eq!(spiral_count(10), 2);
    assert_eq!(spiral_count(40), 4);
    assert_eq!(spiral_count(100), 7);
}

// ── Fractal tree geometry ────────────────────────────────────────────────────

#[test]
fn branch_segments_respect_depth_and_length_floors() {
    let params = ArtParams::default();
    let segments = branch_segments(320.0, 200.0, 12.0, &params);
    assert!(!segments.is_empty(), "tree produced no segments");

    let cap = max_depth(params.complexity);
    for seg in &segments {
        assert!(seg.depth <= cap, "depth {} past cap {}", seg.depth, cap);
        let len = (seg.to.0 - seg.from.0).hypot(seg.to.1 - seg.from.1);
        assert!(len >= 4.99, "segment below the 5px floor: {len}");
        assert!(seg.width >= 1.0, "width below 1px: {}", seg.width);
        assert!(seg.opacity > 0.0, "invisible segment at depth {}", seg.depth);
    }

    let roots = segments.iter().filter(|s| s.depth == 0).count();
    assert_eq!(roots, branch_count(params.complexity), "wrong root count");
}

#[test]
fn branch_segments_are_deterministic_in_t() {
    let params = ArtParams::default();
    let a = branch_segments(320.0, 200.0, 7.0, &params);
    let b = branch_segments(320.0, 200.0, 7.0, &params);
    assert_eq!(a, b, "same frame produced different trees");
}

// ── Particle simulation ──────────────────────────────────────────────────────

#[test]
fn reseed_places_particles_inside_bounds() {
    let mut scene = ParticleScene::with_seed(11);
    let params = particle_params();
    scene.reseed(200, 120, &params);

    let particles = scene.particles();
    assert_eq!(particles.len(), particle_count(params.complexity));
    for p in particles {
        assert!(p.x >= 0.0 && p.x < 200.0, "x out of bounds: {}", p.x);
        assert!(p.y >= 0.0 && p.y < 120.0, "y out of bounds: {}", p.y);
        assert!(p.radius >= 2.0 && p.radius < 152.0, "radius: {}", p.radius);
        assert!(p.vx.abs() <= 1.0 && p.vy.abs() <= 1.0, "velocity too hot");
    }
}

#[test]
fn particles_stay_inside_bounds_at_full_speed() {
    let mut scene = ParticleScene::with_seed(7);
    let params = ArtParams {
        speed: 100,
        ..particle_params()
    };
    scene.reseed(160, 100, &params);

    let colors = palette::colors(params.palette);
    let mut canvas = Canvas::new(160, 100);
    for tick in 0..300 {
        let ctx = FrameCtx::new(tick, &params, colors);
        scene.render(&mut canvas, &ctx);
    }
    for p in scene.particles() {
        assert!((0.0..=160.0).contains(&p.x), "x escaped: {}", p.x);
        assert!((0.0..=100.0).contains(&p.y), "y escaped: {}", p.y);
    }
}

#[test]
fn discs_and_glows_follow_the_live_palette() {
    // Seeded under Monochrome, rendered with one-color palettes: every
    // painted pixel must take the palette handed to render, nothing from
    // seed time.
    let params = ArtParams {
        palette: PaletteKind::Monochrome,
        ..particle_params()
    };
    let mut red_scene = ParticleScene::with_seed(5);
    let mut blue_scene = ParticleScene::with_seed(5);
    red_scene.reseed(200, 120, &params);
    blue_scene.reseed(200, 120, &params);

    let red = [[200u8, 0, 0]];
    let blue = [[0u8, 0, 200]];
    let mut red_canvas = Canvas::new(200, 120);
    let mut blue_canvas = Canvas::new(200, 120);
    red_scene.render(&mut red_canvas, &FrameCtx::new(0, &params, &red));
    blue_scene.render(&mut blue_canvas, &FrameCtx::new(0, &params, &blue));

    let mut covered = 0usize;
    for (a, b) in red_canvas
        .pixels()
        .chunks_exact(4)
        .zip(blue_canvas.pixels().chunks_exact(4))
    {
        assert_eq!(a[1], 0, "green channel in a red-only render");
        assert_eq!(a[2], 0, "blue channel in a red-only render");
        assert_eq!(b[0], 0, "red channel in a blue-only render");
        assert_eq!(b[1], 0, "green channel in a blue-only render");
        assert_eq!(a[0], b[2], "identical fields should swap channels exactly");
        if a[0] > 0 {
            covered += 1;
        }
    }
    assert!(covered > 100, "discs and glows barely painted: {covered} px");
}

#[test]
fn connection_lines_follow_the_live_palette() {
    let params = ArtParams {
        complexity: 10,
        size: 10,
        ..particle_params()
    };

    let mut red_scene = ParticleScene::with_seed(42);
    let mut blue_scene = ParticleScene::with_seed(42);
    red_scene.reseed(200, 120, &params);
    blue_scene.reseed(200, 120, &params);

    let mut red_canvas = Canvas::new(200, 120);
    let mut blue_canvas = Canvas::new(200, 120);
    let red = [[255u8, 0, 0]];
    let blue = [[0u8, 0, 255]];
    red_scene.render(&mut red_canvas, &FrameCtx::new(0, &params, &red));
    blue_scene.render(&mut blue_canvas, &FrameCtx::new(0, &params, &blue));

    assert_ne!(
        red_canvas.pixels(),
        blue_canvas.pixels(),
        "identically seeded fields should recolor with the live palette"
    );
}

// ── Every scene paints ───────────────────────────────────────────────────────

#[test]
fn every_mode_renders_non_black_pixels() {
    for mode in VisualMode::all() {
        let params = ArtParams {
            mode,
            ..ArtParams::default()
        };
        let mut engine = ArtEngine::with_seed(params, 120, 80, 1);
        for _ in 0..3 {
            assert!(engine.render_frame());
        }
        assert!(painted(engine.pixels()), "{} drew nothing", mode.label());
    }
}

#[test]
fn stateless_scenes_render_deterministically() {
    for mode in [VisualMode::Waves, VisualMode::Fractals, VisualMode::Spirals] {
        let params = ArtParams {
            mode,
            ..ArtParams::default()
        };
        let mut a = ArtEngine::with_seed(params, 120, 80, 1);
        let mut b = ArtEngine::with_seed(params, 120, 80, 1);
        for _ in 0..4 {
            a.render_frame();
            b.render_frame();
        }
        assert_eq!(a.pixels(), b.pixels(), "{} diverged", mode.label());
    }
}

// ── Frame context ────────────────────────────────────────────────────────────

#[test]
fn frame_ctx_cycles_palette_colors() {
    let params = ArtParams::default();
    let colors = palette::colors(params.palette);
    let ctx = FrameCtx::new(3, &params, colors);
    assert_eq!(ctx.t, 3.0);
    assert_eq!(ctx.color(0), colors[0]);
    assert_eq!(ctx.color(6), colors[0]);
    assert_eq!(ctx.color(7), colors[1]);

    let empty = FrameCtx::new(0, &params, &[]);
    assert_eq!(empty.color(4), [255, 255, 255], "empty palette not white");
}
