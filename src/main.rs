use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cfg = tui_artgen::config::Config::parse();
    if cfg.list_presets {
        tui_artgen::presets::list_presets();
        return Ok(());
    }

    tui_artgen::app::run(cfg)
}
