use crate::canvas::Canvas;
use crate::config::VisualMode;
use crate::scene::{FrameCtx, Scene};

pub fn wave_count(complexity: u16) -> usize {
    (complexity / 10 + 3) as usize
}

/// Superimposed sine/cosine curves across the full width, one stroked
/// polyline per wave, sampled every 5 horizontal pixels.
pub struct WaveScene;

impl Scene for WaveScene {
    fn mode(&self) -> VisualMode {
        VisualMode::Waves
    }

    fn render(&mut self, canvas: &mut Canvas, ctx: &FrameCtx<'_>) {
        let w = canvas.width();
        let h = canvas.height();
        if w == 0 || h == 0 {
            return;
        }
        let t = ctx.t;
        let speed = ctx.params.speed as f32;
        let size = ctx.params.size as f32;
        let line_width = size / 5.0 + 1.0;
        let mid = h as f32 / 2.0;

        let mut points = Vec::with_capacity(w / 5 + 2);
        for wave in 0..wave_count(ctx.params.complexity) {
            let wf = wave as f32;
            points.clear();
            let mut x = 0usize;
            while x <= w {
                let xf = x as f32;
                let y = mid
                    + ((xf * 0.01 + t * speed * 0.02 + wf) * (1.0 + wf * 0.2)).sin()
                        * (50.0 + wf * 20.0)
                        * (size / 50.0)
                    + ((xf * 0.02 + t * speed * 0.01) * (1.0 + wf * 0.1)).cos()
                        * (30.0 + wf * 15.0)
                        * (size / 50.0);
                points.push((xf, y));
                x += 5;
            }
            canvas.stroke_polyline(&points, ctx.color(wave), line_width, 0.6);
        }
    }
}
