use crate::config::PaletteKind;

pub type Rgb = [u8; 3];

/// Hard-clear color and the tint used for the per-frame fade fill.
pub const BACKGROUND: Rgb = [10, 10, 20];

/// Alpha of the translucent background fill painted before each frame; this
/// is what turns motion into trails instead of discrete frames.
pub const FADE_ALPHA: f32 = 0.1;

pub struct Palette {
    pub kind: PaletteKind,
    pub label: &'static str,
    pub colors: &'static [Rgb],
}

pub const PALETTES: [Palette; 6] = [
    Palette {
        kind: PaletteKind::Neon,
        label: "Neon",
        colors: &[
            [0xff, 0x00, 0xff],
            [0x00, 0xff, 0xff],
            [0xff, 0x00, 0x80],
            [0x80, 0xff, 0x00],
            [0xff, 0xff, 0x00],
            [0xff, 0x80, 0x00],
        ],
    },
    Palette {
        kind: PaletteKind::Ocean,
        label: "Ocean",
        colors: &[
            [0x00, 0x77, 0xb6],
            [0x00, 0xb4, 0xd8],
            [0x90, 0xe0, 0xef],
            [0xca, 0xf0, 0xf8],
            [0x02, 0x3e, 0x8a],
            [0x00, 0x96, 0xc7],
        ],
    },
    Palette {
        kind: PaletteKind::Sunset,
        label: "Sunset",
        colors: &[
            [0xff, 0x6b, 0x35],
            [0xf7, 0xc5, 0x9f],
            [0xef, 0xa0, 0x0b],
            [0xd6, 0x51, 0x08],
            [0x59, 0x1f, 0x0a],
            [0x1e, 0x1e, 0x24],
        ],
    },
    Palette {
        kind: PaletteKind::Forest,
        label: "Forest",
        colors: &[
            [0x2d, 0x6a, 0x4f],
            [0x40, 0x91, 0x6c],
            [0x52, 0xb7, 0x88],
            [0x74, 0xc6, 0x9d],
            [0x95, 0xd5, 0xb2],
            [0xb7, 0xe4, 0xc7],
        ],
    },
    Palette {
        kind: PaletteKind::Pastel,
        label: "Pastel",
        colors: &[
            [0xff, 0xc8, 0xdd],
            [0xff, 0xaf, 0xcc],
            [0xbd, 0xe0, 0xfe],
            [0xa2, 0xd2, 0xff],
            [0xcd, 0xb4, 0xdb],
            [0xe2, 0xec, 0xe9],
        ],
    },
    Palette {
        kind: PaletteKind::Monochrome,
        label: "Mono",
        colors: &[
            [0xf8, 0xf9, 0xfa],
            [0xe9, 0xec, 0xef],
            [0xde, 0xe2, 0xe6],
            [0xce, 0xd4, 0xda],
            [0xad, 0xb5, 0xbd],
            [0x6c, 0x75, 0x7d],
        ],
    },
];

pub fn palette(kind: PaletteKind) -> &'static Palette {
    PALETTES
        .iter()
        .find(|p| p.kind == kind)
        .unwrap_or(&PALETTES[0])
}

pub fn colors(kind: PaletteKind) -> &'static [Rgb] {
    palette(kind).colors
}

/// Case-insensitive lookup by label or CLI name.
pub fn by_name(name: &str) -> Option<PaletteKind> {
    let want = name.trim();
    PALETTES
        .iter()
        .find(|p| {
            p.label.eq_ignore_ascii_case(want) || slug(p.kind).eq_ignore_ascii_case(want)
        })
        .map(|p| p.kind)
}

/// Unknown names fall back to the first palette.
pub fn by_name_or_default(name: &str) -> PaletteKind {
    by_name(name).unwrap_or(PALETTES[0].kind)
}

fn slug(kind: PaletteKind) -> &'static str {
    match kind {
        PaletteKind::Neon => "neon",
        PaletteKind::Ocean => "ocean",
        PaletteKind::Sunset => "sunset",
        PaletteKind::Forest => "forest",
        PaletteKind::Pastel => "pastel",
        PaletteKind::Monochrome => "monochrome",
    }
}
