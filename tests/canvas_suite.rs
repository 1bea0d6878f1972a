use tui_artgen::canvas::Canvas;
use tui_artgen::palette::{BACKGROUND, FADE_ALPHA};

/// RGBA of one pixel.
fn px(canvas: &Canvas, x: usize, y: usize) -> [u8; 4] {
    let i = (y * canvas.width() + x) * 4;
    let p = canvas.pixels();
    [p[i], p[i + 1], p[i + 2], p[i + 3]]
}

fn all_pixels_are(canvas: &Canvas, rgb: [u8; 3]) -> bool {
    canvas
        .pixels()
        .chunks_exact(4)
        .all(|p| p[0] == rgb[0] && p[1] == rgb[1] && p[2] == rgb[2] && p[3] == 255)
}

// ── Construction and clear ───────────────────────────────────────────────────

#[test]
fn new_canvas_is_black_and_opaque() {
    let canvas = Canvas::new(4, 3);
    assert_eq!(canvas.width(), 4);
    assert_eq!(canvas.height(), 3);
    assert_eq!(canvas.pixels().len(), 4 * 3 * 4);
    assert!(!canvas.is_empty());
    assert!(all_pixels_are(&canvas, [0, 0, 0]), "fresh canvas not black");
}

#[test]
fn clear_sets_every_pixel() {
    let mut canvas = Canvas::new(5, 4);
    canvas.clear([1, 2, 3]);
    assert!(all_pixels_are(&canvas, [1, 2, 3]), "clear missed pixels");
}

#[test]
fn zero_size_canvas_tolerates_every_op() {
    let mut canvas = Canvas::new(0, 0);
    assert!(canvas.is_empty());
    assert!(canvas.pixels().is_empty());

    canvas.clear([9, 9, 9]);
    canvas.fade(BACKGROUND, FADE_ALPHA);
    canvas.blend(0, 0, [255, 0, 0], 1.0);
    canvas.blend(-3, 7, [255, 0, 0], 1.0);
    canvas.stroke_line((0.0, 0.0), (10.0, 10.0), [255, 0, 0], 2.0, 1.0);
    canvas.fill_circle(1.0, 1.0, 4.0, [255, 0, 0], 1.0);
    canvas.glow(1.0, 1.0, 4.0, [255, 0, 0], 1.0);
    assert!(canvas.pixels().is_empty());
}

// ── Blending ─────────────────────────────────────────────────────────────────

#[test]
fn full_alpha_blend_replaces_pixel() {
    let mut canvas = Canvas::new(4, 3);
    canvas.blend(1, 1, [9, 8, 7], 1.0);
    assert_eq!(px(&canvas, 1, 1), [9, 8, 7, 255]);
}

#[test]
fn half_alpha_blend_averages_toward_color() {
    let mut canvas = Canvas::new(4, 3);
    canvas.blend(2, 0, [100, 100, 100], 0.5);
    assert_eq!(px(&canvas, 2, 0), [50, 50, 50, 255]);
}

#[test]
fn out_of_bounds_blend_is_ignored() {
    let mut canvas = Canvas::new(4, 3);
    canvas.blend(-1, 0, [255, 255, 255], 1.0);
    canvas.blend(4, 0, [255, 255, 255], 1.0);
    canvas.blend(0, 3, [255, 255, 255], 1.0);
    assert!(all_pixels_are(&canvas, [0, 0, 0]), "oob blend wrote pixels");
}

#[test]
fn zero_alpha_blend_is_ignored() {
    let mut canvas = Canvas::new(4, 3);
    canvas.blend(1, 1, [255, 255, 255], 0.0);
    assert_eq!(px(&canvas, 1, 1), [0, 0, 0, 255]);
}

// ── Fade ─────────────────────────────────────────────────────────────────────

#[test]
fn single_fade_steps_toward_background() {
    let mut canvas = Canvas::new(4, 3);
    canvas.clear([255, 255, 255]);
    canvas.fade(BACKGROUND, FADE_ALPHA);
    // One ~10% step from white toward (10, 10, 20).
    assert_eq!(px(&canvas, 0, 0), [230, 230, 231, 255]);
}

#[test]
fn repeated_fades_converge_exactly_to_background() {
    let mut canvas = Canvas::new(6, 4);
    canvas.clear([255, 255, 255]);
    for _ in 0..300 {
        canvas.fade(BACKGROUND, FADE_ALPHA);
    }
    assert!(
        all_pixels_are(&canvas, BACKGROUND),
        "trails never settle: {:?}",
        px(&canvas, 0, 0)
    );
}

#[test]
fn background_is_a_fade_fixed_point() {
    let mut canvas = Canvas::new(6, 4);
    canvas.clear(BACKGROUND);
    for _ in 0..5 {
        canvas.fade(BACKGROUND, FADE_ALPHA);
    }
    assert!(
        all_pixels_are(&canvas, BACKGROUND),
        "settled canvas drifted under fade"
    );
}

#[test]
fn zero_alpha_fade_is_a_noop() {
    let mut canvas = Canvas::new(4, 3);
    canvas.clear([77, 66, 55]);
    canvas.fade([0, 0, 0], 0.0);
    assert!(all_pixels_are(&canvas, [77, 66, 55]));
}

// ── Strokes ──────────────────────────────────────────────────────────────────

#[test]
fn thin_stroke_composites_each_pixel_once() {
    let mut canvas = Canvas::new(8, 5);
    // Out and straight back over the same pixels in one path.
    let points = [(1.0, 2.0), (6.0, 2.0), (1.0, 2.0)];
    canvas.stroke_polyline(&points, [200, 0, 0], 1.0, 0.5);
    assert_eq!(
        px(&canvas, 3, 2),
        [100, 0, 0, 255],
        "a path must not composite onto itself"
    );
    assert_eq!(px(&canvas, 0, 2), [0, 0, 0, 255], "stroke leaked past start");
}

#[test]
fn wide_stroke_covers_interior_exactly() {
    let mut canvas = Canvas::new(16, 10);
    canvas.stroke_line((2.0, 5.0), (12.0, 5.0), [0, 200, 50], 4.0, 1.0);
    assert_eq!(px(&canvas, 7, 5), [0, 200, 50, 255], "interior not full");
    assert_eq!(px(&canvas, 7, 9), [0, 0, 0, 255], "stroke bled past its width");
}

#[test]
fn degenerate_stroke_draws_a_single_pixel() {
    let mut canvas = Canvas::new(8, 8);
    canvas.stroke_line((3.0, 3.0), (3.0, 3.0), [10, 20, 30], 1.0, 1.0);
    assert_eq!(px(&canvas, 3, 3), [10, 20, 30, 255]);
    assert_eq!(px(&canvas, 4, 3), [0, 0, 0, 255]);
}

#[test]
fn short_polylines_are_noops() {
    let mut canvas = Canvas::new(8, 8);
    canvas.stroke_polyline(&[], [255, 255, 255], 1.0, 1.0);
    canvas.stroke_polyline(&[(2.0, 2.0)], [255, 255, 255], 1.0, 1.0);
    assert!(all_pixels_are(&canvas, [0, 0, 0]));
}

// ── Discs and glows ──────────────────────────────────────────────────────────

#[test]
fn fill_circle_paints_center_and_skips_outside() {
    let mut canvas = Canvas::new(16, 16);
    canvas.fill_circle(8.0, 8.0, 4.0, [0, 0, 250], 1.0);
    assert_eq!(px(&canvas, 8, 8), [0, 0, 250, 255], "center not solid");
    assert_eq!(px(&canvas, 8, 13), [0, 0, 0, 255], "paint outside radius");
}

#[test]
fn fill_circle_edge_coverage_is_partial() {
    let mut canvas = Canvas::new(16, 16);
    canvas.fill_circle(8.0, 8.0, 4.0, [0, 0, 250], 1.0);
    let edge = px(&canvas, 11, 10)[2];
    assert!(
        edge > 0 && edge < 250,
        "edge pixel should be anti-aliased, got {edge}"
    );
}

#[test]
fn glow_fades_with_distance() {
    let mut canvas = Canvas::new(16, 16);
    canvas.glow(8.0, 8.0, 6.0, [255, 255, 255], 1.0);
    let near = px(&canvas, 8, 8)[0];
    let mid = px(&canvas, 11, 8)[0];
    let far = px(&canvas, 13, 8)[0];
    assert!(
        near > mid && mid > far && far > 0,
        "glow not monotone: {near} {mid} {far}"
    );
    assert_eq!(px(&canvas, 8, 15), [0, 0, 0, 255], "glow past its radius");
}

// ── Resize ───────────────────────────────────────────────────────────────────

#[test]
fn resize_reallocates_and_hard_clears() {
    let mut canvas = Canvas::new(4, 4);
    canvas.fill_circle(2.0, 2.0, 2.0, [255, 0, 0], 1.0);
    canvas.resize(6, 3, BACKGROUND);
    assert_eq!(canvas.width(), 6);
    assert_eq!(canvas.height(), 3);
    assert_eq!(canvas.pixels().len(), 6 * 3 * 4);
    assert!(all_pixels_are(&canvas, BACKGROUND), "old contents survived");
}
