//! Konkrete Karten-Engine: Szene-Aufbau über wgpu-Renderer und Kachel-Fetcher.

mod scene_engine;

pub use scene_engine::SceneEngine;
