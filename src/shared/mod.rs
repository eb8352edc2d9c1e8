//! Geteilte Basistypen: Optionen und Render-Szene.

pub mod options;
pub mod scene;

pub use options::ViewerOptions;
pub use scene::{ClusterVis, MapScene, MarkerVis, TileQuad};
