use crate::config::VisualMode;
use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Snapshot naming: `art-<mode>-<unix millis>.png`. Sorting the directory
/// lexically therefore also sorts by capture time.
pub fn snapshot_filename(mode: VisualMode, timestamp_ms: u64) -> String {
    format!("art-{}-{}.png", mode.slug(), timestamp_ms)
}

pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_else(|_| Duration::from_millis(0))
        .as_millis() as u64
}

/// Write an RGBA frame out as PNG. `pixels` must be exactly
/// `width * height * 4` bytes.
pub fn save_png(path: &Path, width: u32, height: u32, pixels: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if parent != Path::new("") {
            fs::create_dir_all(parent)
                .with_context(|| format!("create dir {}", parent.display()))?;
        }
    }
    let img = image::RgbaImage::from_raw(width, height, pixels.to_vec())
        .context("frame buffer does not match its dimensions")?;
    img.save(path)
        .with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

/// Capture the current canvas into `dir` under the snapshot naming scheme
/// and return the path written.
pub fn save_snapshot(
    dir: &Path,
    mode: VisualMode,
    width: u32,
    height: u32,
    pixels: &[u8],
) -> anyhow::Result<PathBuf> {
    let path = dir.join(snapshot_filename(mode, now_ms()));
    save_png(&path, width, height, pixels)?;
    Ok(path)
}
