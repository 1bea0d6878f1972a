use crate::render::{draw_chrome, draw_hud, Frame, Renderer};
use anyhow::Context;
use base64::Engine;
use std::io::Write;

// 3072 raw bytes -> 4096 base64 bytes per escape chunk.
const RAW_CHUNK: usize = 3 * 1024;

/// Kitty graphics protocol, direct (inline base64) transport. The image is
/// placed behind the text layer (z=-1) so HUD and badges draw over it.
pub struct KittyRenderer {
    image_id: u32,
    b64_buf: Vec<u8>,
}

impl KittyRenderer {
    pub fn new() -> Self {
        Self {
            image_id: 1,
            b64_buf: Vec::new(),
        }
    }

    fn write_rgba_chunked(
        &mut self,
        out: &mut dyn Write,
        rgba: &[u8],
        w: usize,
        h: usize,
        cols: usize,
        rows: usize,
    ) -> anyhow::Result<()> {
        let total = rgba.len().div_ceil(RAW_CHUNK);
        for (idx, chunk) in rgba.chunks(RAW_CHUNK).enumerate() {
            let more = if idx + 1 < total { 1 } else { 0 };
            let b64_len = chunk.len().div_ceil(3) * 4;
            if self.b64_buf.len() < b64_len {
                self.b64_buf.resize(b64_len, 0);
            }
            let written = base64::engine::general_purpose::STANDARD
                .encode_slice(chunk, &mut self.b64_buf[..b64_len])
                .context("base64 encode pixels")?;
            if idx == 0 {
                write!(
                    out,
                    "\x1b_Ga=T,f=32,s={},v={},t=d,i={},p=1,c={},r={},C=1,q=2,z=-1,m={};",
                    w, h, self.image_id, cols, rows, more
                )?;
            } else {
                write!(out, "\x1b_Gm={};", more)?;
            }
            out.write_all(&self.b64_buf[..written])?;
            out.write_all(b"\x1b\\")?;
        }
        Ok(())
    }
}

impl Default for KittyRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for KittyRenderer {
    fn name(&self) -> &'static str {
        "kitty"
    }

    fn render(&mut self, frame: &Frame<'_>, out: &mut dyn Write) -> anyhow::Result<()> {
        let cols = frame.term_cols as usize;
        let visual_rows = frame.visual_rows as usize;
        let w = frame.pixel_width;
        let h = frame.pixel_height;
        if cols == 0 || visual_rows == 0 || w == 0 || h == 0 {
            return Ok(());
        }
        if frame.pixels_rgba.len() < w.saturating_mul(h).saturating_mul(4) {
            return Ok(());
        }

        if frame.sync_updates {
            out.write_all(b"\x1b[?2026h")?;
        }
        out.write_all(b"\x1b[H\x1b[0m")?;
        // Erase stale text glyphs in the visual area; the image itself sits
        // behind the text layer.
        for row in 1..=visual_rows {
            write!(out, "\x1b[{};1H\x1b[2K", row)?;
        }

        self.write_rgba_chunked(out, frame.pixels_rgba, w, h, cols, visual_rows)?;

        draw_hud(out, frame)?;
        draw_chrome(out, frame)?;

        if frame.sync_updates {
            out.write_all(b"\x1b[?2026l")?;
        }
        out.flush()?;
        Ok(())
    }
}
