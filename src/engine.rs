use crate::canvas::Canvas;
use crate::palette::{self, BACKGROUND, FADE_ALPHA};
use crate::params::{ArtParams, ParamsUpdate};
use crate::scene::{make_scenes, make_scenes_seeded, FrameCtx, Scene};

/// Owns the canvas, the four scenes and the parameter bundle. One render
/// call per tick while playing; the frame counter only moves when a frame
/// is actually produced.
pub struct ArtEngine {
    canvas: Canvas,
    scenes: Vec<Box<dyn Scene>>,
    params: ArtParams,
    tick: u64,
}

impl ArtEngine {
    pub fn new(params: ArtParams, width: usize, height: usize) -> Self {
        Self::build(params, width, height, make_scenes())
    }

    /// Deterministic particle seeding for headless rendering and tests.
    pub fn with_seed(params: ArtParams, width: usize, height: usize, seed: u64) -> Self {
        Self::build(params, width, height, make_scenes_seeded(seed))
    }

    fn build(
        mut params: ArtParams,
        width: usize,
        height: usize,
        scenes: Vec<Box<dyn Scene>>,
    ) -> Self {
        params.clamp_ranges();
        let mut engine = Self {
            canvas: Canvas::new(width, height),
            scenes,
            params,
            tick: 0,
        };
        engine.canvas.clear(BACKGROUND);
        engine.reseed_scenes();
        engine
    }

    pub fn params(&self) -> ArtParams {
        self.params
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn playing(&self) -> bool {
        self.params.playing
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.canvas.width(), self.canvas.height())
    }

    pub fn pixels(&self) -> &[u8] {
        self.canvas.pixels()
    }

    /// Live particle count, 0 until the particle scene has been seeded.
    pub fn particle_count(&self) -> usize {
        self.scenes
            .iter()
            .find_map(|s| s.live_particles())
            .unwrap_or(0)
    }

    /// Merge a partial update. A change to complexity or size re-seeds the
    /// scenes; a palette or mode change alone does not.
    pub fn apply(&mut self, update: ParamsUpdate) {
        let before = self.params;
        self.params.apply(update);
        if self.params.complexity != before.complexity || self.params.size != before.size {
            self.reseed_scenes();
        }
    }

    pub fn toggle_playing(&mut self) -> bool {
        self.params.playing = !self.params.playing;
        self.params.playing
    }

    /// Back to the default bundle, frame counter zeroed, canvas
    /// hard-cleared. Re-seeds only if the defaults actually change
    /// complexity or size.
    pub fn reset(&mut self) {
        let before = self.params;
        self.params = ArtParams::default();
        self.tick = 0;
        self.canvas.clear(BACKGROUND);
        if self.params.complexity != before.complexity || self.params.size != before.size {
            self.reseed_scenes();
        }
    }

    /// Track the live surface size. Contents are discarded on change;
    /// particles keep their coordinates and clamp into the new bounds on
    /// the next integration step.
    pub fn resize(&mut self, width: usize, height: usize) {
        if (width, height) == (self.canvas.width(), self.canvas.height()) {
            return;
        }
        self.canvas.resize(width, height, BACKGROUND);
    }

    /// Render one frame if playing: fade the previous contents, dispatch
    /// the scene for the current mode, advance the counter. Returns false
    /// (and touches nothing) while paused or when the surface is unusable.
    pub fn render_frame(&mut self) -> bool {
        if !self.params.playing || self.canvas.is_empty() {
            return false;
        }
        self.canvas.fade(BACKGROUND, FADE_ALPHA);
        let ctx = FrameCtx::new(self.tick, &self.params, palette::colors(self.params.palette));
        let mode = self.params.mode;
        if let Some(scene) = self.scenes.iter_mut().find(|s| s.mode() == mode) {
            scene.render(&mut self.canvas, &ctx);
        }
        self.tick += 1;
        true
    }

    fn reseed_scenes(&mut self) {
        let (w, h) = (self.canvas.width(), self.canvas.height());
        for scene in &mut self.scenes {
            scene.reseed(w, h, &self.params);
        }
    }
}
