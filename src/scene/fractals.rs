use crate::canvas::Canvas;
use crate::config::VisualMode;
use crate::params::ArtParams;
use crate::scene::{FrameCtx, Scene};
use std::f32::consts::PI;

pub fn branch_count(complexity: u16) -> usize {
    (complexity / 15 + 4) as usize
}

pub fn max_depth(complexity: u16) -> u16 {
    complexity / 25 + 3
}

/// One stroked branch of the recursion, with everything the stroke needs.
/// Color follows `depth` through the palette.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BranchSegment {
    pub from: (f32, f32),
    pub to: (f32, f32),
    pub depth: u16,
    pub width: f32,
    pub opacity: f32,
}

/// Build the whole tree for one frame: `branch_count` roots spread around
/// the circle and rotated over time, each recursing until the depth ceiling
/// or a segment shorter than 5px.
pub fn branch_segments(width: f32, height: f32, t: f32, params: &ArtParams) -> Vec<BranchSegment> {
    let branches = branch_count(params.complexity);
    let depth_cap = max_depth(params.complexity);
    let speed = params.speed as f32;
    let size = params.size as f32;
    let angle_offset = 0.4 + (t * speed * 0.01).sin() * 0.2;
    let root_len = 80.0 * (size / 50.0);
    let cx = width / 2.0;
    let cy = height / 2.0;

    let mut segments = Vec::with_capacity(branches << (depth_cap + 1).min(12));
    for i in 0..branches {
        let angle = PI * 2.0 * i as f32 / branches as f32 + t * speed * 0.001;
        grow(
            &mut segments,
            cx,
            cy,
            angle,
            root_len,
            0,
            depth_cap,
            size,
            angle_offset,
        );
    }
    segments
}

fn grow(
    segments: &mut Vec<BranchSegment>,
    x: f32,
    y: f32,
    angle: f32,
    length: f32,
    depth: u16,
    depth_cap: u16,
    size: f32,
    angle_offset: f32,
) {
    if depth > depth_cap || length < 5.0 {
        return;
    }
    let ex = x + angle.cos() * length;
    let ey = y + angle.sin() * length;
    segments.push(BranchSegment {
        from: (x, y),
        to: (ex, ey),
        depth,
        width: ((depth_cap - depth) as f32 * (size / 30.0)).max(1.0),
        opacity: 0.8 - depth as f32 * 0.1,
    });
    let next_len = length * 0.7;
    grow(segments, ex, ey, angle - angle_offset, next_len, depth + 1, depth_cap, size, angle_offset);
    grow(segments, ex, ey, angle + angle_offset, next_len, depth + 1, depth_cap, size, angle_offset);
}

pub struct FractalScene;

impl Scene for FractalScene {
    fn mode(&self) -> VisualMode {
        VisualMode::Fractals
    }

    fn render(&mut self, canvas: &mut Canvas, ctx: &FrameCtx<'_>) {
        let w = canvas.width();
        let h = canvas.height();
        if w == 0 || h == 0 {
            return;
        }
        for seg in branch_segments(w as f32, h as f32, ctx.t, ctx.params) {
            canvas.stroke_line(
                seg.from,
                seg.to,
                ctx.color(seg.depth as usize),
                seg.width,
                seg.opacity,
            );
        }
    }
}
