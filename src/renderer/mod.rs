//! WebGPU rendering module
//!
//! A single alpha-blended color pipeline; every frame is rebuilt as one
//! triangle list from the simulation state.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use vertex::Vertex;
