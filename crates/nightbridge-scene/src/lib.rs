//! The nightbridge scene: a night skyline with a suspension bridge, traffic,
//! sky decorations, fireworks and text made of particles that scatter away
//! from the pointer.
//!
//! [`Scene`] owns all state and draws one frame at a time onto any
//! [`Surface`]. [`canvas::SceneCanvas`] puts a recorded frame on a ratatui
//! braille canvas.

pub mod canvas;
pub mod color;
pub mod entities;
pub mod geometry;
pub mod particles;
pub mod scene;
pub mod surface;

pub use canvas::{CanvasSurface, SceneCanvas};
pub use geometry::{BridgeGeometry, WaterBand};
pub use particles::{Particle, ParticleField, PointerState};
pub use scene::{FrameStats, Scene, SceneOptions};
pub use surface::{DrawCommand, DrawList, Layer, Rect, Surface};
