//! Generative-art toy for the terminal. A scene (waves, fractals,
//! particles, spirals) draws into an RGBA canvas with motion trails, and a
//! renderer maps that canvas onto terminal cells as half-blocks, ASCII, or
//! kitty graphics.

pub mod app;
pub mod canvas;
pub mod config;
pub mod engine;
pub mod export;
pub mod palette;
pub mod params;
pub mod presets;
pub mod render;
pub mod scene;
pub mod terminal;
