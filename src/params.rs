use crate::config::{Config, PaletteKind, VisualMode};

pub const SPEED_MIN: u16 = 1;
pub const SPEED_MAX: u16 = 100;
pub const COMPLEXITY_MIN: u16 = 10;
pub const COMPLEXITY_MAX: u16 = 100;
pub const SIZE_MIN: u16 = 10;
pub const SIZE_MAX: u16 = 100;

/// The full parameter bundle the engine re-reads every frame. All numeric
/// fields stay inside their documented ranges; mutation goes through
/// `apply` (or the clamp helpers) so out-of-range input degrades to the
/// nearest bound instead of a panic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArtParams {
    pub mode: VisualMode,
    pub palette: PaletteKind,
    pub speed: u16,
    pub complexity: u16,
    pub size: u16,
    pub playing: bool,
}

impl Default for ArtParams {
    fn default() -> Self {
        Self {
            mode: VisualMode::Waves,
            palette: PaletteKind::Neon,
            speed: 50,
            complexity: 50,
            size: 50,
            playing: true,
        }
    }
}

impl ArtParams {
    pub fn from_config(cfg: &Config) -> Self {
        let mut p = Self {
            mode: cfg.mode,
            palette: cfg.palette,
            speed: cfg.speed,
            complexity: cfg.complexity,
            size: cfg.size,
            playing: !cfg.paused,
        };
        p.clamp_ranges();
        p
    }

    /// Merge a partial update: only supplied fields change.
    pub fn apply(&mut self, update: ParamsUpdate) {
        if let Some(mode) = update.mode {
            self.mode = mode;
        }
        if let Some(palette) = update.palette {
            self.palette = palette;
        }
        if let Some(speed) = update.speed {
            self.speed = speed;
        }
        if let Some(complexity) = update.complexity {
            self.complexity = complexity;
        }
        if let Some(size) = update.size {
            self.size = size;
        }
        if let Some(playing) = update.playing {
            self.playing = playing;
        }
        self.clamp_ranges();
    }

    pub fn clamp_ranges(&mut self) {
        self.speed = self.speed.clamp(SPEED_MIN, SPEED_MAX);
        self.complexity = self.complexity.clamp(COMPLEXITY_MIN, COMPLEXITY_MAX);
        self.size = self.size.clamp(SIZE_MIN, SIZE_MAX);
    }
}

/// Partial-field update with merge semantics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParamsUpdate {
    pub mode: Option<VisualMode>,
    pub palette: Option<PaletteKind>,
    pub speed: Option<u16>,
    pub complexity: Option<u16>,
    pub size: Option<u16>,
    pub playing: Option<bool>,
}

pub fn clamp_speed(v: i32) -> u16 {
    v.clamp(SPEED_MIN as i32, SPEED_MAX as i32) as u16
}

pub fn clamp_complexity(v: i32) -> u16 {
    v.clamp(COMPLEXITY_MIN as i32, COMPLEXITY_MAX as i32) as u16
}

pub fn clamp_size(v: i32) -> u16 {
    v.clamp(SIZE_MIN as i32, SIZE_MAX as i32) as u16
}
