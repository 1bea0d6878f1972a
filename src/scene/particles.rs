use crate::canvas::Canvas;
use crate::config::VisualMode;
use crate::params::ArtParams;
use crate::scene::{FrameCtx, Scene};

pub fn particle_count(complexity: u16) -> usize {
    (complexity * 2 + 20) as usize
}

#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub radius: f32,
}

/// The one scene with cross-frame state: a particle field integrated every
/// frame, with pairwise connection lines and a soft glow per particle.
pub struct ParticleScene {
    particles: Vec<Particle>,
    rng: fastrand::Rng,
}

impl ParticleScene {
    pub fn new() -> Self {
        Self {
            particles: Vec::new(),
            rng: fastrand::Rng::new(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            particles: Vec::new(),
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }
}

impl Default for ParticleScene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene for ParticleScene {
    fn mode(&self) -> VisualMode {
        VisualMode::Particles
    }

    fn live_particles(&self) -> Option<usize> {
        Some(self.particles.len())
    }

    fn reseed(&mut self, width: usize, height: usize, params: &ArtParams) {
        let count = particle_count(params.complexity);
        let size = params.size as f32;
        self.particles.clear();
        self.particles.reserve(count);
        for _ in 0..count {
            self.particles.push(Particle {
                x: self.rng.f32() * width as f32,
                y: self.rng.f32() * height as f32,
                vx: (self.rng.f32() - 0.5) * 2.0,
                vy: (self.rng.f32() - 0.5) * 2.0,
                radius: self.rng.f32() * size * 3.0 + 2.0,
            });
        }
    }

    fn render(&mut self, canvas: &mut Canvas, ctx: &FrameCtx<'_>) {
        if canvas.is_empty() {
            return;
        }
        let w = canvas.width() as f32;
        let h = canvas.height() as f32;
        let speed = ctx.params.speed as f32;

        for p in &mut self.particles {
            p.x += p.vx * speed * 0.1;
            p.y += p.vy * speed * 0.1;
            if p.x < 0.0 || p.x > w {
                p.vx = -p.vx;
            }
            if p.y < 0.0 || p.y > h {
                p.vy = -p.vy;
            }
            p.x = p.x.clamp(0.0, w);
            p.y = p.y.clamp(0.0, h);
        }

        // Pairwise connections, nearer pairs brighter. O(n^2), bounded by
        // the complexity-capped particle count.
        let connection_distance = 100.0 + ctx.params.size as f32;
        for i in 0..self.particles.len() {
            let (xi, yi) = (self.particles[i].x, self.particles[i].y);
            for j in (i + 1)..self.particles.len() {
                let dx = xi - self.particles[j].x;
                let dy = yi - self.particles[j].y;
                let dist = (dx * dx + dy * dy).sqrt();
                if dist < connection_distance {
                    let alpha = (1.0 - dist / connection_distance) * 0.5;
                    canvas.stroke_line(
                        (xi, yi),
                        (self.particles[j].x, self.particles[j].y),
                        ctx.color(i),
                        1.0,
                        alpha,
                    );
                }
            }
        }

        // Disc, glow and line colors all come from the live palette by
        // index; nothing is fixed at seed time.
        for (i, p) in self.particles.iter().enumerate() {
            let color = ctx.color(i);
            canvas.fill_circle(p.x, p.y, p.radius, color, 0.9);
            canvas.glow(p.x, p.y, p.radius * 3.0, color, 0.25);
        }
    }
}
