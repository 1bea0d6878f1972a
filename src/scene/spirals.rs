use crate::canvas::Canvas;
use crate::config::VisualMode;
use crate::scene::{FrameCtx, Scene};
use std::f32::consts::PI;

pub fn spiral_count(complexity: u16) -> usize {
    (complexity / 20 + 2) as usize
}

/// Arithmetic spirals from the center, evenly phased and slowly rotating.
pub struct SpiralScene;

impl Scene for SpiralScene {
    fn mode(&self) -> VisualMode {
        VisualMode::Spirals
    }

    fn render(&mut self, canvas: &mut Canvas, ctx: &FrameCtx<'_>) {
        let w = canvas.width() as f32;
        let h = canvas.height() as f32;
        if canvas.is_empty() {
            return;
        }
        let cx = w / 2.0;
        let cy = h / 2.0;
        let t = ctx.t;
        let speed = ctx.params.speed as f32;
        let count = spiral_count(ctx.params.complexity);
        let line_width = ctx.params.size as f32 / 20.0 + 1.0;
        let max_radius = w.min(h) * 0.4;
        let turns = 3.0 + ctx.params.complexity as f32 / 30.0;

        let mut points = Vec::with_capacity(501);
        for s in 0..count {
            points.clear();
            let start = PI * 2.0 * s as f32 / count as f32 + t * speed * 0.005;
            for i in 0..=500 {
                let u = i as f32 / 500.0;
                let angle = start + u * PI * 2.0 * turns;
                let radius = u * max_radius;
                points.push((cx + angle.cos() * radius, cy + angle.sin() * radius));
            }
            canvas.stroke_polyline(&points, ctx.color(s), line_width, 0.7);
        }
    }
}
