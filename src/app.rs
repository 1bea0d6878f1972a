use crate::config::{Config, PaletteKind, VisualMode};
use crate::engine::ArtEngine;
use crate::export;
use crate::palette;
use crate::params::{self, ArtParams, ParamsUpdate};
use crate::presets;
use crate::render::{make_renderer, pixel_dims, Frame};
use crate::terminal::TerminalGuard;
use anyhow::Context;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use std::fmt::Write as _;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

const NOTICE_TTL: Duration = Duration::from_millis(2500);
// Input wait while paused; keeps the loop idle instead of spinning.
const IDLE_POLL: Duration = Duration::from_millis(150);

struct Notice {
    text: String,
    until: Instant,
}

struct UiState {
    show_hud: bool,
    show_help: bool,
    fullscreen: bool,
    notice: Option<Notice>,
    dirty: bool,
}

impl UiState {
    fn new() -> Self {
        Self {
            show_hud: true,
            show_help: false,
            fullscreen: false,
            notice: None,
            dirty: true,
        }
    }

    fn flash(&mut self, text: impl Into<String>) {
        self.notice = Some(Notice {
            text: text.into(),
            until: Instant::now() + NOTICE_TTL,
        });
        self.dirty = true;
    }

    fn expire_notice(&mut self, now: Instant) {
        if self.notice.as_ref().is_some_and(|n| now >= n.until) {
            self.notice = None;
            self.dirty = true;
        }
    }
}

pub fn run(cfg: Config) -> anyhow::Result<()> {
    // Resolve the preset before taking over the terminal so a bad name
    // prints as a normal error message.
    let mut params = ArtParams::from_config(&cfg);
    if let Some(name) = cfg.preset.as_deref() {
        let preset = presets::by_name(name)
            .with_context(|| format!("unknown preset {name:?} (see --list-presets)"))?;
        params.apply(preset.update());
    }

    let _term = TerminalGuard::new()?;
    let mut out = BufWriter::new(TerminalGuard::stdout());
    let mut renderer = make_renderer(cfg.renderer);

    let mut last_size = crossterm::terminal::size().context("get terminal size")?;
    if last_size.0 < 4 || last_size.1 < 2 {
        return Err(anyhow::anyhow!(
            "terminal too small (need at least 4x2, got {}x{})",
            last_size.0,
            last_size.1
        ));
    }

    let export_dir = PathBuf::from(&cfg.export_dir);
    let mut ui = UiState::new();
    let mut fps = FpsCounter::new();

    // Initial surface sized for a two-row HUD; the loop re-derives the
    // geometry before the first frame, so particles seed in real bounds.
    let visual_rows = last_size.1.saturating_sub(2).max(1);
    let (w, h) = pixel_dims(cfg.renderer, last_size.0, visual_rows);
    let mut engine = ArtEngine::new(params, w, h);

    loop {
        let now = Instant::now();

        // Drain input events (non-blocking).
        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                Event::Key(k) if k.kind != KeyEventKind::Release => {
                    if handle_key(k.code, k.modifiers, &mut engine, &mut ui, &export_dir) {
                        return Ok(());
                    }
                    ui.dirty = true;
                }
                Event::Resize(c, r) => {
                    last_size = (c, r);
                    ui.dirty = true;
                }
                _ => {}
            }
        }

        // Size check once per frame (resize events can be missed in some
        // terminals).
        let sz = crossterm::terminal::size()?;
        if sz != last_size {
            last_size = sz;
            ui.dirty = true;
        }

        ui.expire_notice(now);

        let (term_cols, term_rows) = last_size;
        let hud = if ui.show_hud && !ui.fullscreen {
            build_hud(term_cols as usize, &engine, renderer.name(), fps.fps())
        } else {
            String::new()
        };
        let hud_rows = hud_rows_for_text(term_rows, &hud);
        let visual_rows = term_rows.saturating_sub(hud_rows).max(1);
        let (w, h) = pixel_dims(cfg.renderer, term_cols, visual_rows);
        engine.resize(w, h);

        let advanced = engine.render_frame();

        if advanced || ui.dirty {
            let status = (!engine.playing() && !ui.fullscreen).then_some("Paused");
            let notice = ui.notice.as_ref().map(|n| n.text.as_str());
            let overlay = ui.show_help.then_some(help_popup_text());
            let frame = Frame {
                term_cols,
                term_rows,
                visual_rows,
                pixel_width: w,
                pixel_height: h,
                pixels_rgba: engine.pixels(),
                hud: &hud,
                hud_rows,
                status,
                notice,
                overlay,
                sync_updates: cfg.sync_updates,
            };
            renderer.render(&frame, &mut out)?;
            fps.tick();
            ui.dirty = false;
        }

        if engine.playing() {
            // Frame pacing.
            let target = Duration::from_secs_f32(1.0 / cfg.fps.max(1) as f32);
            let elapsed = now.elapsed();
            if elapsed < target {
                std::thread::sleep(target - elapsed);
            }
        } else {
            // Paused: block on input; pending events are drained next pass.
            event::poll(IDLE_POLL)?;
        }
    }
}

/// Returns true when the app should quit. Keys with Ctrl or Alt held are
/// ignored, except Ctrl-C.
fn handle_key(
    code: KeyCode,
    mods: KeyModifiers,
    engine: &mut ArtEngine,
    ui: &mut UiState,
    export_dir: &Path,
) -> bool {
    if mods.contains(KeyModifiers::CONTROL) {
        return matches!(code, KeyCode::Char('c') | KeyCode::Char('C'));
    }
    if mods.contains(KeyModifiers::ALT) {
        return false;
    }

    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        KeyCode::Esc => {
            if ui.show_help {
                ui.show_help = false;
                false
            } else if ui.fullscreen {
                ui.fullscreen = false;
                false
            } else {
                true
            }
        }
        KeyCode::Char(' ') => {
            let playing = engine.toggle_playing();
            ui.flash(if playing { "Playing" } else { "Paused" });
            false
        }
        KeyCode::Up => {
            nudge_speed(engine, ui, 5);
            false
        }
        KeyCode::Down => {
            nudge_speed(engine, ui, -5);
            false
        }
        KeyCode::Right => {
            nudge_complexity(engine, ui, 5);
            false
        }
        KeyCode::Left => {
            nudge_complexity(engine, ui, -5);
            false
        }
        KeyCode::Char('+') | KeyCode::Char('=') => {
            nudge_size(engine, ui, 5);
            false
        }
        KeyCode::Char('-') | KeyCode::Char('_') => {
            nudge_size(engine, ui, -5);
            false
        }
        KeyCode::Char('m') => {
            let next = engine.params().mode.next();
            set_mode(engine, ui, next);
            false
        }
        KeyCode::Char('M') => {
            let prev = engine.params().mode.prev();
            set_mode(engine, ui, prev);
            false
        }
        KeyCode::Char('c') => {
            let next = engine.params().palette.next();
            set_palette(engine, ui, next);
            false
        }
        KeyCode::Char('C') => {
            let prev = engine.params().palette.prev();
            set_palette(engine, ui, prev);
            false
        }
        KeyCode::Char(c @ '1'..='6') => {
            if let Some(preset) = presets::by_index(c as usize - '1' as usize) {
                engine.apply(preset.update());
                ui.flash(format!("Preset: {}", preset.name));
            }
            false
        }
        KeyCode::Char('d') | KeyCode::Char('D') => {
            let (w, h) = engine.dimensions();
            match export::save_snapshot(
                export_dir,
                engine.params().mode,
                w as u32,
                h as u32,
                engine.pixels(),
            ) {
                Ok(path) => ui.flash(format!("Saved {}", path.display())),
                Err(e) => ui.flash(format!("Export failed: {e:#}")),
            }
            false
        }
        KeyCode::Char('r') | KeyCode::Char('R') => {
            engine.reset();
            ui.flash("Reset");
            false
        }
        KeyCode::Char('f') | KeyCode::Char('F') => {
            ui.fullscreen = !ui.fullscreen;
            if ui.fullscreen {
                ui.flash("Fullscreen");
            }
            false
        }
        KeyCode::Char('i') | KeyCode::Char('I') => {
            ui.show_hud = !ui.show_hud;
            false
        }
        KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('?') => {
            ui.show_help = !ui.show_help;
            false
        }
        _ => false,
    }
}

fn nudge_speed(engine: &mut ArtEngine, ui: &mut UiState, delta: i32) {
    let next = params::clamp_speed(engine.params().speed as i32 + delta);
    engine.apply(ParamsUpdate {
        speed: Some(next),
        ..Default::default()
    });
    ui.flash(format!("Speed {}", engine.params().speed));
}

fn nudge_complexity(engine: &mut ArtEngine, ui: &mut UiState, delta: i32) {
    let next = params::clamp_complexity(engine.params().complexity as i32 + delta);
    engine.apply(ParamsUpdate {
        complexity: Some(next),
        ..Default::default()
    });
    ui.flash(format!("Complexity {}", engine.params().complexity));
}

fn nudge_size(engine: &mut ArtEngine, ui: &mut UiState, delta: i32) {
    let next = params::clamp_size(engine.params().size as i32 + delta);
    engine.apply(ParamsUpdate {
        size: Some(next),
        ..Default::default()
    });
    ui.flash(format!("Size {}", engine.params().size));
}

fn set_mode(engine: &mut ArtEngine, ui: &mut UiState, mode: VisualMode) {
    engine.apply(ParamsUpdate {
        mode: Some(mode),
        ..Default::default()
    });
    ui.flash(format!("Mode: {}", mode.label()));
}

fn set_palette(engine: &mut ArtEngine, ui: &mut UiState, kind: PaletteKind) {
    engine.apply(ParamsUpdate {
        palette: Some(kind),
        ..Default::default()
    });
    ui.flash(format!("Palette: {}", palette::palette(kind).label));
}

fn hud_rows_for_text(term_rows: u16, hud: &str) -> u16 {
    if hud.is_empty() {
        return 0;
    }
    let max_rows = term_rows.saturating_sub(1);
    (hud.lines().count() as u16).min(max_rows)
}

fn build_hud(cols: usize, engine: &ArtEngine, renderer_name: &str, fps: f32) -> String {
    let p = engine.params();
    let mut status = format!(
        "Mode: {} | Palette: {} | Speed: {:>3} | Complexity: {:>3} | Size: {:>3} | Frame: {} | FPS: {:>4.1}",
        p.mode.label(),
        palette::palette(p.palette).label,
        p.speed,
        p.complexity,
        p.size,
        engine.tick(),
        fps,
    );
    if p.mode == VisualMode::Particles {
        let _ = write!(&mut status, " | Particles: {}", engine.particle_count());
    }
    let _ = write!(&mut status, " | Renderer: {}", renderer_name);

    let keys = "Keys: space play/pause | ←/→ complexity | ↑/↓ speed | +/- size | m mode | c palette | 1-6 presets | d snapshot | r reset | f fullscreen | i HUD | ? help | q quit".to_string();

    wrap_hud_lines(cols, &[status, keys]).join("\n")
}

fn wrap_hud_lines(cols: usize, lines: &[String]) -> Vec<String> {
    let width = cols.max(1);
    let mut out = Vec::new();
    for line in lines {
        out.extend(hard_wrap_line(line, width));
    }
    out
}

fn hard_wrap_line(line: &str, width: usize) -> Vec<String> {
    if line.is_empty() {
        return vec![String::new()];
    }

    let mut out = Vec::new();
    let mut cur = String::new();
    let mut cur_len = 0usize;
    for ch in line.chars() {
        cur.push(ch);
        cur_len += 1;
        if cur_len >= width {
            out.push(cur);
            cur = String::new();
            cur_len = 0;
        }
    }
    if !cur.is_empty() {
        out.push(cur);
    }
    if out.is_empty() {
        out.push(String::new());
    }
    out
}

fn help_popup_text() -> &'static str {
    "tui-artgen hotkeys\n\
space  play / pause\n\
up/down  speed +5 / -5\n\
right/left  complexity +5 / -5\n\
+ / -  element size +5 / -5\n\
m / M  next / previous mode\n\
c / C  next / previous palette\n\
1-6  presets (Zen, Chaos, Nature, Dream, Galaxy, Dusk)\n\
d  save a PNG snapshot\n\
r  reset parameters\n\
f  fullscreen (chrome off)\n\
i  show/hide HUD\n\
? or h  toggle this help\n\
esc  close help / leave fullscreen / quit\n\
q or ctrl-c  quit"
}

pub struct FpsCounter {
    last: Instant,
    frames: u32,
    fps: f32,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
            frames: 0,
            fps: 0.0,
        }
    }

    pub fn tick(&mut self) {
        self.frames += 1;
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f32();
        if dt >= 0.5 {
            self.fps = (self.frames as f32) / dt;
            self.frames = 0;
            self.last = now;
        }
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn fixture() -> (ArtEngine, UiState) {
        let engine = ArtEngine::with_seed(ArtParams::default(), 64, 40, 7);
        (engine, UiState::new())
    }

    fn press(engine: &mut ArtEngine, ui: &mut UiState, code: KeyCode) -> bool {
        handle_key(code, KeyModifiers::NONE, engine, ui, Path::new("."))
    }

    fn notice_text(ui: &UiState) -> &str {
        ui.notice.as_ref().map(|n| n.text.as_str()).unwrap_or("")
    }

    #[test]
    fn quit_keys_end_the_session() {
        let (mut engine, mut ui) = fixture();
        assert!(press(&mut engine, &mut ui, KeyCode::Char('q')));
        assert!(press(&mut engine, &mut ui, KeyCode::Char('Q')));
        assert!(handle_key(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
            &mut engine,
            &mut ui,
            Path::new("."),
        ));

        assert!(!handle_key(
            KeyCode::Char('x'),
            KeyModifiers::CONTROL,
            &mut engine,
            &mut ui,
            Path::new("."),
        ));
        assert!(!handle_key(
            KeyCode::Char('q'),
            KeyModifiers::ALT,
            &mut engine,
            &mut ui,
            Path::new("."),
        ));
        assert!(!press(&mut engine, &mut ui, KeyCode::F(5)));
    }

    #[test]
    fn escape_unwinds_help_then_fullscreen_then_quits() {
        let (mut engine, mut ui) = fixture();
        ui.show_help = true;
        ui.fullscreen = true;

        assert!(!press(&mut engine, &mut ui, KeyCode::Esc));
        assert!(!ui.show_help, "first esc should close the help overlay");
        assert!(ui.fullscreen, "first esc should not touch fullscreen");

        assert!(!press(&mut engine, &mut ui, KeyCode::Esc));
        assert!(!ui.fullscreen, "second esc should leave fullscreen");

        assert!(press(&mut engine, &mut ui, KeyCode::Esc), "bare esc quits");
    }

    #[test]
    fn space_toggles_playback_and_reports_it() {
        let (mut engine, mut ui) = fixture();
        assert!(engine.playing());

        assert!(!press(&mut engine, &mut ui, KeyCode::Char(' ')));
        assert!(!engine.playing());
        assert_eq!(notice_text(&ui), "Paused");

        assert!(!press(&mut engine, &mut ui, KeyCode::Char(' ')));
        assert!(engine.playing());
        assert_eq!(notice_text(&ui), "Playing");
    }

    #[test]
    fn arrows_nudge_speed_and_complexity_with_clamping() {
        let (mut engine, mut ui) = fixture();

        press(&mut engine, &mut ui, KeyCode::Up);
        assert_eq!(engine.params().speed, 55);
        assert_eq!(notice_text(&ui), "Speed 55");
        for _ in 0..20 {
            press(&mut engine, &mut ui, KeyCode::Down);
        }
        assert_eq!(engine.params().speed, 1, "speed should stop at the floor");

        press(&mut engine, &mut ui, KeyCode::Right);
        assert_eq!(engine.params().complexity, 55);
        for _ in 0..20 {
            press(&mut engine, &mut ui, KeyCode::Left);
        }
        assert_eq!(engine.params().complexity, 10, "complexity floor is 10");
    }

    #[test]
    fn plus_and_minus_adjust_size_within_range() {
        let (mut engine, mut ui) = fixture();

        press(&mut engine, &mut ui, KeyCode::Char('+'));
        press(&mut engine, &mut ui, KeyCode::Char('='));
        assert_eq!(engine.params().size, 60);
        for _ in 0..20 {
            press(&mut engine, &mut ui, KeyCode::Char('+'));
        }
        assert_eq!(engine.params().size, 100, "size should stop at the cap");

        press(&mut engine, &mut ui, KeyCode::Char('_'));
        assert_eq!(engine.params().size, 95);
    }

    #[test]
    fn mode_and_palette_keys_cycle_both_ways() {
        let (mut engine, mut ui) = fixture();

        press(&mut engine, &mut ui, KeyCode::Char('m'));
        assert_eq!(engine.params().mode, VisualMode::Fractals);
        assert_eq!(notice_text(&ui), "Mode: Fractals");
        press(&mut engine, &mut ui, KeyCode::Char('M'));
        press(&mut engine, &mut ui, KeyCode::Char('M'));
        assert_eq!(engine.params().mode, VisualMode::Spirals, "prev wraps");

        press(&mut engine, &mut ui, KeyCode::Char('c'));
        assert_eq!(engine.params().palette, PaletteKind::Ocean);
        press(&mut engine, &mut ui, KeyCode::Char('C'));
        assert_eq!(engine.params().palette, PaletteKind::Neon);
    }

    #[test]
    fn number_keys_apply_presets_without_resuming() {
        let (mut engine, mut ui) = fixture();
        engine.toggle_playing();
        assert!(!engine.playing());

        press(&mut engine, &mut ui, KeyCode::Char('2'));
        let p = engine.params();
        assert_eq!(p.mode, VisualMode::Particles);
        assert_eq!((p.speed, p.complexity, p.size), (90, 100, 30));
        assert!(!engine.playing(), "presets must not resume playback");
        assert_eq!(notice_text(&ui), "Preset: Chaos");

        let before = engine.params();
        press(&mut engine, &mut ui, KeyCode::Char('7'));
        assert_eq!(engine.params(), before, "7 is not a preset slot");
    }

    #[test]
    fn snapshot_key_writes_a_png_and_reports_the_path() {
        let (mut engine, mut ui) = fixture();
        let dir = std::env::temp_dir().join(format!("artgen-keys-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();

        assert!(!handle_key(
            KeyCode::Char('d'),
            KeyModifiers::NONE,
            &mut engine,
            &mut ui,
            &dir,
        ));
        let text = notice_text(&ui).to_string();
        assert!(text.starts_with("Saved "), "unexpected notice: {text}");
        let path = PathBuf::from(&text["Saved ".len()..]);
        assert!(path.exists(), "snapshot missing at {}", path.display());

        fs::remove_file(&path).unwrap();
        fs::remove_dir(&dir).ok();
    }

    #[test]
    fn reset_key_restores_defaults() {
        let (mut engine, mut ui) = fixture();
        press(&mut engine, &mut ui, KeyCode::Up);
        press(&mut engine, &mut ui, KeyCode::Char('m'));

        press(&mut engine, &mut ui, KeyCode::Char('r'));
        assert_eq!(engine.params(), ArtParams::default());
        assert_eq!(notice_text(&ui), "Reset");
    }

    #[test]
    fn chrome_keys_toggle_fullscreen_hud_and_help() {
        let (mut engine, mut ui) = fixture();

        press(&mut engine, &mut ui, KeyCode::Char('f'));
        assert!(ui.fullscreen);
        assert_eq!(notice_text(&ui), "Fullscreen");
        press(&mut engine, &mut ui, KeyCode::Char('f'));
        assert!(!ui.fullscreen);

        press(&mut engine, &mut ui, KeyCode::Char('i'));
        assert!(!ui.show_hud);
        press(&mut engine, &mut ui, KeyCode::Char('I'));
        assert!(ui.show_hud);

        press(&mut engine, &mut ui, KeyCode::Char('?'));
        assert!(ui.show_help);
        press(&mut engine, &mut ui, KeyCode::Char('h'));
        assert!(!ui.show_help);
    }
}
