use crate::render::{luma_u8, text_frame_begin, text_frame_end, write_fg_rgb, Frame, Renderer};
use std::io::Write;

// Dark -> bright, ASCII only so it survives any locale.
const RAMP: &[u8] = b" .,:;+=xoXO%#@";

/// One canvas pixel per cell, brightness picking the glyph and the pixel
/// color driving the foreground. The coarse fallback for terminals
/// without decent Unicode coverage.
pub struct AsciiRenderer {
    last_fg: Option<(u8, u8, u8)>,
}

impl AsciiRenderer {
    pub fn new() -> Self {
        Self { last_fg: None }
    }
}

impl Default for AsciiRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for AsciiRenderer {
    fn name(&self) -> &'static str {
        "ascii"
    }

    fn render(&mut self, frame: &Frame<'_>, out: &mut dyn Write) -> anyhow::Result<()> {
        let Some((cols, visual_rows, w, _h)) = text_frame_begin(frame, 1, 1, out)? else {
            return Ok(());
        };

        self.last_fg = None;

        for y in 0..visual_rows {
            for x in 0..cols {
                let i = (y * w + x) * 4;
                let r = frame.pixels_rgba[i];
                let g = frame.pixels_rgba[i + 1];
                let b = frame.pixels_rgba[i + 2];
                let ridx = luma_u8(r, g, b) as usize * (RAMP.len() - 1) / 255;
                if self.last_fg != Some((r, g, b)) {
                    write_fg_rgb(out, r, g, b)?;
                    self.last_fg = Some((r, g, b));
                }
                out.write_all(&[RAMP[ridx]])?;
            }
            out.write_all(b"\r\n")?;
        }

        text_frame_end(frame, out)
    }
}
