use crate::config::{PaletteKind, VisualMode};
use crate::params::ParamsUpdate;

/// A named starting point: mode, palette and the three sliders. Applying a
/// preset never touches the playing flag.
pub struct ScenePreset {
    pub name: &'static str,
    pub blurb: &'static str,
    pub mode: VisualMode,
    pub palette: PaletteKind,
    pub speed: u16,
    pub complexity: u16,
    pub size: u16,
}

impl ScenePreset {
    pub fn update(&self) -> ParamsUpdate {
        ParamsUpdate {
            mode: Some(self.mode),
            palette: Some(self.palette),
            speed: Some(self.speed),
            complexity: Some(self.complexity),
            size: Some(self.size),
            playing: None,
        }
    }
}

pub const PRESETS: [ScenePreset; 6] = [
    ScenePreset {
        name: "Zen",
        blurb: "slow, soft waves",
        mode: VisualMode::Waves,
        palette: PaletteKind::Ocean,
        speed: 20,
        complexity: 30,
        size: 70,
    },
    ScenePreset {
        name: "Chaos",
        blurb: "dense fast particle storm",
        mode: VisualMode::Particles,
        palette: PaletteKind::Neon,
        speed: 90,
        complexity: 100,
        size: 30,
    },
    ScenePreset {
        name: "Nature",
        blurb: "green spirals, unhurried",
        mode: VisualMode::Spirals,
        palette: PaletteKind::Forest,
        speed: 40,
        complexity: 50,
        size: 60,
    },
    ScenePreset {
        name: "Dream",
        blurb: "wide pastel waves",
        mode: VisualMode::Waves,
        palette: PaletteKind::Pastel,
        speed: 15,
        complexity: 40,
        size: 80,
    },
    ScenePreset {
        name: "Galaxy",
        blurb: "branching neon tree",
        mode: VisualMode::Fractals,
        palette: PaletteKind::Neon,
        speed: 50,
        complexity: 80,
        size: 50,
    },
    ScenePreset {
        name: "Dusk",
        blurb: "spirals in sunset colors",
        mode: VisualMode::Spirals,
        palette: PaletteKind::Sunset,
        speed: 30,
        complexity: 60,
        size: 65,
    },
];

pub fn by_name(name: &str) -> Option<&'static ScenePreset> {
    let want = name.trim();
    PRESETS.iter().find(|p| p.name.eq_ignore_ascii_case(want))
}

/// 0-based; the keyboard maps keys 1-6 here.
pub fn by_index(idx: usize) -> Option<&'static ScenePreset> {
    PRESETS.get(idx)
}

/// `--list-presets` output.
pub fn list_presets() {
    println!("presets (apply with --preset <name> or keys 1-6):");
    for (i, p) in PRESETS.iter().enumerate() {
        println!(
            "  {} {:<8} {:<9} {:<11} speed {:>3}  complexity {:>3}  size {:>3}  - {}",
            i + 1,
            p.name,
            p.mode.label(),
            crate::palette::palette(p.palette).label,
            p.speed,
            p.complexity,
            p.size,
            p.blurb,
        );
    }
}
