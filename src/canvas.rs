use crate::palette::Rgb;

/// Owned RGBA framebuffer plus the drawing primitives the scenes use:
/// translucent fills, stroked polylines with width and opacity, filled
/// discs and radial glows. Pixels persist across frames; the per-frame
/// fade fill is what produces motion trails.
pub struct Canvas {
    width: usize,
    height: usize,
    px: Vec<u8>,
    // Per-stroke visit marks so one stroked path never composites onto
    // itself where segments overlap (joints, tight curves).
    mark: Vec<u32>,
    stamp: u32,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        let mut c = Self {
            width,
            height,
            px: vec![0; width * height * 4],
            mark: vec![0; width * height],
            stamp: 0,
        };
        c.clear([0, 0, 0]);
        c
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.px
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Reallocate to the new dimensions and hard-clear to `fill`. Old
    /// contents are discarded.
    pub fn resize(&mut self, width: usize, height: usize, fill: Rgb) {
        self.width = width;
        self.height = height;
        self.px = vec![0; width * height * 4];
        self.mark = vec![0; width * height];
        self.stamp = 0;
        self.clear(fill);
    }

    pub fn clear(&mut self, color: Rgb) {
        for px in self.px.chunks_exact_mut(4) {
            px[0] = color[0];
            px[1] = color[1];
            px[2] = color[2];
            px[3] = 255;
        }
    }

    /// Blend `color` over the whole surface at `alpha`. With a dark color
    /// and low alpha this is the trail-fade clear.
    pub fn fade(&mut self, color: Rgb, alpha: f32) {
        let a = alpha.clamp(0.0, 1.0);
        if a <= 0.0 {
            return;
        }
        let inv = 1.0 - a;
        let tr = color[0] as f32 * a;
        let tg = color[1] as f32 * a;
        let tb = color[2] as f32 * a;
        for px in self.px.chunks_exact_mut(4) {
            px[0] = (px[0] as f32 * inv + tr) as u8;
            px[1] = (px[1] as f32 * inv + tg) as u8;
            px[2] = (px[2] as f32 * inv + tb) as u8;
            px[3] = 255;
        }
    }

    /// Source-over blend of a single pixel; out-of-bounds is a no-op.
    pub fn blend(&mut self, x: i32, y: i32, color: Rgb, alpha: f32) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let a = alpha.clamp(0.0, 1.0);
        if a <= 0.0 {
            return;
        }
        let i = (y as usize * self.width + x as usize) * 4;
        if a >= 1.0 {
            self.px[i] = color[0];
            self.px[i + 1] = color[1];
            self.px[i + 2] = color[2];
            self.px[i + 3] = 255;
            return;
        }
        let inv = 1.0 - a;
        self.px[i] = (self.px[i] as f32 * inv + color[0] as f32 * a) as u8;
        self.px[i + 1] = (self.px[i + 1] as f32 * inv + color[1] as f32 * a) as u8;
        self.px[i + 2] = (self.px[i + 2] as f32 * inv + color[2] as f32 * a) as u8;
        self.px[i + 3] = 255;
    }

    /// Stroke consecutive points as one path. Width below ~1.5 takes a fast
    /// pixel-walk; wider strokes get anti-aliased capsule coverage.
    pub fn stroke_polyline(&mut self, points: &[(f32, f32)], color: Rgb, width: f32, opacity: f32) {
        if points.len() < 2 || self.px.is_empty() {
            return;
        }
        self.next_stamp();
        let halfw = width.max(1.0) * 0.5;
        for pair in points.windows(2) {
            if halfw <= 0.75 {
                self.walk_thin(pair[0], pair[1], color, opacity);
            } else {
                self.fill_capsule(pair[0], pair[1], halfw, color, opacity);
            }
        }
    }

    pub fn stroke_line(&mut self, a: (f32, f32), b: (f32, f32), color: Rgb, width: f32, opacity: f32) {
        self.stroke_polyline(&[a, b], color, width, opacity);
    }

    pub fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgb, opacity: f32) {
        if self.px.is_empty() || radius <= 0.0 {
            return;
        }
        let (x0, x1, y0, y1) = match self.clip_box(cx - radius, cx + radius, cy - radius, cy + radius) {
            Some(b) => b,
            None => return,
        };
        for y in y0..=y1 {
            for x in x0..=x1 {
                let dx = x as f32 + 0.5 - cx;
                let dy = y as f32 + 0.5 - cy;
                let d = (dx * dx + dy * dy).sqrt();
                let cover = (radius + 0.5 - d).clamp(0.0, 1.0);
                if cover > 0.0 {
                    self.blend(x as i32, y as i32, color, opacity * cover);
                }
            }
        }
    }

    /// Radial gradient fading linearly from `alpha` at the center to fully
    /// transparent at `radius`.
    pub fn glow(&mut self, cx: f32, cy: f32, radius: f32, color: Rgb, alpha: f32) {
        if self.px.is_empty() || radius <= 0.0 || alpha <= 0.0 {
            return;
        }
        let (x0, x1, y0, y1) = match self.clip_box(cx - radius, cx + radius, cy - radius, cy + radius) {
            Some(b) => b,
            None => return,
        };
        for y in y0..=y1 {
            for x in x0..=x1 {
                let dx = x as f32 + 0.5 - cx;
                let dy = y as f32 + 0.5 - cy;
                let d = (dx * dx + dy * dy).sqrt();
                if d >= radius {
                    continue;
                }
                self.blend(x as i32, y as i32, color, alpha * (1.0 - d / radius));
            }
        }
    }

    fn next_stamp(&mut self) {
        if self.stamp == u32::MAX {
            self.mark.fill(0);
            self.stamp = 0;
        }
        self.stamp += 1;
    }

    fn try_mark(&mut self, x: usize, y: usize) -> bool {
        let i = y * self.width + x;
        if self.mark[i] == self.stamp {
            return false;
        }
        self.mark[i] = self.stamp;
        true
    }

    fn walk_thin(&mut self, a: (f32, f32), b: (f32, f32), color: Rgb, opacity: f32) {
        let dx = b.0 - a.0;
        let dy = b.1 - a.1;
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as usize;
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let x = (a.0 + dx * t).round() as i32;
            let y = (a.1 + dy * t).round() as i32;
            if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
                continue;
            }
            if self.try_mark(x as usize, y as usize) {
                self.blend(x, y, color, opacity);
            }
        }
    }

    fn fill_capsule(&mut self, a: (f32, f32), b: (f32, f32), halfw: f32, color: Rgb, opacity: f32) {
        let lo_x = a.0.min(b.0) - halfw - 1.0;
        let hi_x = a.0.max(b.0) + halfw + 1.0;
        let lo_y = a.1.min(b.1) - halfw - 1.0;
        let hi_y = a.1.max(b.1) + halfw + 1.0;
        let (x0, x1, y0, y1) = match self.clip_box(lo_x, hi_x, lo_y, hi_y) {
            Some(bx) => bx,
            None => return,
        };
        for y in y0..=y1 {
            for x in x0..=x1 {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;
                let cover = (halfw + 0.5 - segment_distance(px, py, a, b)).clamp(0.0, 1.0);
                if cover > 0.0 && self.try_mark(x, y) {
                    self.blend(x as i32, y as i32, color, opacity * cover);
                }
            }
        }
    }

    /// Clamp a float box to pixel bounds; None when fully outside.
    fn clip_box(&self, lo_x: f32, hi_x: f32, lo_y: f32, hi_y: f32) -> Option<(usize, usize, usize, usize)> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        if hi_x < 0.0 || hi_y < 0.0 || lo_x >= self.width as f32 || lo_y >= self.height as f32 {
            return None;
        }
        let x0 = lo_x.max(0.0).floor() as usize;
        let y0 = lo_y.max(0.0).floor() as usize;
        let x1 = (hi_x.ceil() as usize).min(self.width - 1);
        let y1 = (hi_y.ceil() as usize).min(self.height - 1);
        if x0 > x1 || y0 > y1 {
            return None;
        }
        Some((x0, x1, y0, y1))
    }
}

fn segment_distance(px: f32, py: f32, a: (f32, f32), b: (f32, f32)) -> f32 {
    let dx = b.0 - a.0;
    let dy = b.1 - a.1;
    let len2 = dx * dx + dy * dy;
    let t = if len2 <= f32::EPSILON {
        0.0
    } else {
        (((px - a.0) * dx + (py - a.1) * dy) / len2).clamp(0.0, 1.0)
    };
    let ex = a.0 + dx * t - px;
    let ey = a.1 + dy * t - py;
    (ex * ex + ey * ey).sqrt()
}
