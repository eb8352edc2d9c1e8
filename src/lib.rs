//! DeadTree Map Viewer Library.
//! Core-Funktionalität als Library exportiert für Tests und Wiederverwendung.

pub mod app;
pub mod core;
pub mod data;
pub mod engine;
pub mod map;
pub mod render;
pub mod shared;
pub mod tiles;
pub mod ui;

pub use app::{AppCommand, AppController, AppIntent, AppState, UiState};
pub use core::{cluster_points, GeoBounds, GeoEntry, LatLng, MapViewport, PointIndex};
pub use engine::SceneEngine;
pub use map::{
    EngineError, EngineState, LayerId, LifecyclePhase, MapEngine, MapEngineAdapter, MapHit,
    MapView, MarkerLayer, MarkerLayerManager, SurfaceHandle, ViewportFitter,
};
pub use shared::{MapScene, ViewerOptions};
pub use tiles::{TileFetcher, TileId, TileSourceConfig};
