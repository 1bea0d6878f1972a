mod ascii;
mod halfblock;
mod kitty;

pub use ascii::AsciiRenderer;
pub use halfblock::HalfBlockRenderer;
pub use kitty::KittyRenderer;

use crate::config::RendererMode;
use std::io::Write;

/// Everything a backend needs to paint one terminal frame: the canvas
/// pixels, the cell geometry they map onto, and the text chrome layered
/// on top (HUD rows, status badge, transient notice, help overlay).
pub struct Frame<'a> {
    pub term_cols: u16,
    pub term_rows: u16,
    /// Rows reserved for the canvas; the HUD starts on the next row.
    pub visual_rows: u16,
    pub pixel_width: usize,
    pub pixel_height: usize,
    pub pixels_rgba: &'a [u8],
    pub hud: &'a str,
    pub hud_rows: u16,
    pub status: Option<&'a str>,
    pub notice: Option<&'a str>,
    pub overlay: Option<&'a str>,
    pub sync_updates: bool,
}

pub trait Renderer {
    fn name(&self) -> &'static str;
    fn render(&mut self, frame: &Frame<'_>, out: &mut dyn Write) -> anyhow::Result<()>;
}

pub fn make_renderer(mode: RendererMode) -> Box<dyn Renderer> {
    match mode {
        RendererMode::Ascii => Box::new(AsciiRenderer::new()),
        RendererMode::HalfBlock => Box::new(HalfBlockRenderer::new()),
        RendererMode::Kitty => Box::new(KittyRenderer::new()),
    }
}

/// Canvas pixel dimensions for a given cell area. Half-block packs two
/// pixels per cell vertically; kitty gets 2x4 per cell so its pixels come
/// out square on a typical 1:2 font.
pub fn pixel_dims(mode: RendererMode, cols: u16, visual_rows: u16) -> (usize, usize) {
    let c = cols as usize;
    let r = visual_rows as usize;
    match mode {
        RendererMode::Ascii => (c, r),
        RendererMode::HalfBlock => (c, r * 2),
        RendererMode::Kitty => (c * 2, r * 4),
    }
}

pub(crate) fn luma_u8(r: u8, g: u8, b: u8) -> u8 {
    ((r as u32 * 54 + g as u32 * 183 + b as u32 * 19) >> 8) as u8
}

pub(crate) fn write_fg_rgb(out: &mut dyn Write, r: u8, g: u8, b: u8) -> anyhow::Result<()> {
    write!(out, "\x1b[38;2;{};{};{}m", r, g, b)?;
    Ok(())
}

pub(crate) fn write_bg_rgb(out: &mut dyn Write, r: u8, g: u8, b: u8) -> anyhow::Result<()> {
    write!(out, "\x1b[48;2;{};{};{}m", r, g, b)?;
    Ok(())
}

/// Shared preamble for the text-cell backends: geometry checks, optional
/// synchronized-update begin, home the cursor and disable autowrap so
/// full-width rows don't spill. Returns None when the frame should be
/// skipped (zero-sized or mismatched buffers; retried next tick).
pub(crate) fn text_frame_begin(
    frame: &Frame<'_>,
    px_per_col: usize,
    px_per_row: usize,
    out: &mut dyn Write,
) -> anyhow::Result<Option<(usize, usize, usize, usize)>> {
    let cols = frame.term_cols as usize;
    let visual_rows = frame.visual_rows as usize;
    let w = frame.pixel_width;
    let h = frame.pixel_height;
    if cols == 0 || visual_rows == 0 || w == 0 || h == 0 {
        return Ok(None);
    }
    if w != cols.saturating_mul(px_per_col) || h != visual_rows.saturating_mul(px_per_row) {
        return Ok(None);
    }
    if frame.pixels_rgba.len() < w.saturating_mul(h).saturating_mul(4) {
        return Ok(None);
    }
    if frame.sync_updates {
        out.write_all(b"\x1b[?2026h")?;
    }
    out.write_all(b"\x1b[H\x1b[0m\x1b[?7l")?;
    Ok(Some((cols, visual_rows, w, h)))
}

/// Shared tail: HUD rows, chrome, autowrap back on, synchronized-update
/// end, flush.
pub(crate) fn text_frame_end(frame: &Frame<'_>, out: &mut dyn Write) -> anyhow::Result<()> {
    draw_hud(out, frame)?;
    draw_chrome(out, frame)?;
    out.write_all(b"\x1b[?7h")?;
    if frame.sync_updates {
        out.write_all(b"\x1b[?2026l")?;
    }
    out.flush()?;
    Ok(())
}

pub(crate) fn draw_hud(out: &mut dyn Write, frame: &Frame<'_>) -> anyhow::Result<()> {
    let cols = frame.term_cols as usize;
    let mut hud_lines = frame.hud.lines();
    for i in 0..(frame.hud_rows as usize) {
        write!(
            out,
            "\x1b[{};1H\x1b[0m\x1b[2K",
            frame.visual_rows as usize + i + 1
        )?;
        if let Some(line) = hud_lines.next() {
            write!(out, "{}", truncate_to_cols(line, cols))?;
        }
    }
    Ok(())
}

pub(crate) fn draw_chrome(out: &mut dyn Write, frame: &Frame<'_>) -> anyhow::Result<()> {
    if let Some(status) = frame.status {
        draw_badge(out, frame.term_cols, status, true)?;
    }
    if let Some(notice) = frame.notice {
        draw_badge(out, frame.term_cols, notice, false)?;
    }
    if let Some(text) = frame.overlay {
        draw_overlay_popup(out, frame.term_cols, frame.term_rows, text)?;
    }
    Ok(())
}

/// One padded text chip on the top row, left- or right-aligned.
fn draw_badge(out: &mut dyn Write, term_cols: u16, text: &str, right: bool) -> anyhow::Result<()> {
    if text.is_empty() {
        return Ok(());
    }
    let cols = term_cols as usize;
    if cols < 6 {
        return Ok(());
    }
    let body = truncate_to_cols(text, cols - 4);
    let width = body.chars().count() + 2;
    let col = if right { cols - width + 1 } else { 2 };
    write!(
        out,
        "\x1b[1;{}H\x1b[0m\x1b[38;2;230;236;250m\x1b[48;2;16;18;30m {body} \x1b[0m",
        col
    )?;
    Ok(())
}

/// Centered bordered popup over a dimmed backdrop; used for the help text.
pub(crate) fn draw_overlay_popup(
    out: &mut dyn Write,
    term_cols: u16,
    term_rows: u16,
    text: &str,
) -> anyhow::Result<()> {
    if text.trim().is_empty() {
        return Ok(());
    }
    let cols = term_cols as usize;
    let rows = term_rows as usize;
    if cols < 10 || rows < 5 {
        return Ok(());
    }

    let inner_max = cols - 6;
    let lines = wrap_plain(text, inner_max);
    if lines.is_empty() {
        return Ok(());
    }
    let inner_w = lines
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(1)
        .clamp(1, inner_max);
    let body_h = lines.len().min(rows - 3);
    let box_w = inner_w + 4;
    let box_h = body_h + 2;
    let col0 = (cols - box_w) / 2 + 1;
    let row0 = (rows - box_h) / 2 + 1;

    // Dim the whole screen first so the popup reads over bright frames.
    out.write_all(b"\x1b[0m\x1b[38;2;212;220;236m\x1b[48;2;4;6;12m")?;
    for row in 1..=rows {
        write!(out, "\x1b[{};1H\x1b[2K", row)?;
    }

    out.write_all(b"\x1b[38;2;240;244;255m\x1b[48;2;12;16;28m")?;
    let edge = "-".repeat(box_w - 2);
    write!(out, "\x1b[{};{}H+{}+", row0, col0, edge)?;
    for (i, line) in lines.iter().take(body_h).enumerate() {
        let pad = " ".repeat(inner_w - line.chars().count());
        write!(out, "\x1b[{};{}H| {}{} |", row0 + 1 + i, col0, line, pad)?;
    }
    write!(out, "\x1b[{};{}H+{}+", row0 + box_h - 1, col0, edge)?;
    out.write_all(b"\x1b[0m")?;
    Ok(())
}

fn wrap_plain(text: &str, max_w: usize) -> Vec<String> {
    let max_w = max_w.max(1);
    let mut lines = Vec::new();
    for raw in text.lines() {
        if raw.is_empty() {
            lines.push(String::new());
            continue;
        }
        let mut cur = String::new();
        let mut len = 0usize;
        for ch in raw.chars() {
            cur.push(ch);
            len += 1;
            if len >= max_w {
                lines.push(std::mem::take(&mut cur));
                len = 0;
            }
        }
        if !cur.is_empty() {
            lines.push(cur);
        }
    }
    lines
}

pub(crate) fn truncate_to_cols(line: &str, cols: usize) -> &str {
    if line.chars().count() <= cols {
        return line;
    }
    match line.char_indices().nth(cols) {
        Some((i, _)) => &line[..i],
        None => line,
    }
}
