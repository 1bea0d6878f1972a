use clap::{Parser, ValueEnum};

#[derive(Parser, Debug, Clone)]
#[command(name = "tui-artgen", version, about = "Generative-art toy for the terminal: waves, fractals, particles, spirals")]
pub struct Config {
    #[arg(long, value_enum, default_value_t = VisualMode::Waves)]
    pub mode: VisualMode,

    #[arg(long, value_enum, default_value_t = PaletteKind::Neon)]
    pub palette: PaletteKind,

    #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(u16).range(1..=100))]
    pub speed: u16,

    #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(u16).range(10..=100))]
    pub complexity: u16,

    #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(u16).range(10..=100))]
    pub size: u16,

    #[arg(long, default_value_t = false)]
    pub paused: bool,

    #[arg(long, value_enum, default_value_t = RendererMode::HalfBlock)]
    pub renderer: RendererMode,

    #[arg(long, default_value_t = 60)]
    pub fps: u32,

    #[arg(long, default_value = ".")]
    pub export_dir: String,

    #[arg(long)]
    pub preset: Option<String>,

    #[arg(long, default_value_t = false)]
    pub list_presets: bool,

    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub sync_updates: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum VisualMode {
    #[value(alias = "wave")]
    Waves,
    #[value(alias = "fractal", alias = "tree")]
    Fractals,
    #[value(alias = "particle")]
    Particles,
    #[value(alias = "spiral")]
    Spirals,
}

impl VisualMode {
    pub fn all() -> [VisualMode; 4] {
        [Self::Waves, Self::Fractals, Self::Particles, Self::Spirals]
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Waves => "Waves",
            Self::Fractals => "Fractals",
            Self::Particles => "Particles",
            Self::Spirals => "Spirals",
        }
    }

    /// Lowercase name used in snapshot filenames.
    pub fn slug(self) -> &'static str {
        match self {
            Self::Waves => "waves",
            Self::Fractals => "fractals",
            Self::Particles => "particles",
            Self::Spirals => "spirals",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Waves => Self::Fractals,
            Self::Fractals => Self::Particles,
            Self::Particles => Self::Spirals,
            Self::Spirals => Self::Waves,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Waves => Self::Spirals,
            Self::Fractals => Self::Waves,
            Self::Particles => Self::Fractals,
            Self::Spirals => Self::Particles,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PaletteKind {
    Neon,
    Ocean,
    Sunset,
    Forest,
    Pastel,
    #[value(alias = "mono")]
    Monochrome,
}

impl PaletteKind {
    pub fn all() -> [PaletteKind; 6] {
        [
            Self::Neon,
            Self::Ocean,
            Self::Sunset,
            Self::Forest,
            Self::Pastel,
            Self::Monochrome,
        ]
    }

    pub fn next(self) -> Self {
        match self {
            Self::Neon => Self::Ocean,
            Self::Ocean => Self::Sunset,
            Self::Sunset => Self::Forest,
            Self::Forest => Self::Pastel,
            Self::Pastel => Self::Monochrome,
            Self::Monochrome => Self::Neon,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Neon => Self::Monochrome,
            Self::Ocean => Self::Neon,
            Self::Sunset => Self::Ocean,
            Self::Forest => Self::Sunset,
            Self::Pastel => Self::Forest,
            Self::Monochrome => Self::Pastel,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RendererMode {
    #[value(alias = "ansi", alias = "text")]
    Ascii,
    #[value(name = "half-block", alias = "halfblock", alias = "half_block", alias = "hb")]
    HalfBlock,
    Kitty,
}
