//! Karten-Kern: Engine-Adapter, Marker-Synchronisation, Viewport-Fit
//! und die Lebenszyklus-Zustandsmaschine der Map-View-Komponente.

pub mod adapter;
pub mod component;
pub mod engine;
pub mod fitter;
pub mod layer;
pub mod markers;

pub use adapter::{EngineState, InitOutcome, MapEngineAdapter};
pub use component::{LifecyclePhase, MapView};
pub use engine::{EngineError, LayerId, MapEngine, MapHit, SurfaceHandle};
pub use fitter::ViewportFitter;
pub use layer::{ClusterConfig, MarkerData, MarkerLayer, PopupContent};
pub use markers::{MarkerLayerManager, RenderStats};
