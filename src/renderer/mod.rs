//! WebGPU rendering module
//!
//! Painting records canvas-style shapes into a [`DrawList`], which is
//! tessellated into one triangle list per frame.

pub mod draw;
pub mod paint;
pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use draw::{DrawList, Shape};
pub use paint::{paint, paint_into};
pub use pipeline::RenderState;
pub use vertex::{Color, Vertex};
