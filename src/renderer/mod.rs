//! 2D canvas rendering module
//!
//! Frames are built as a display list of primitive shapes, then replayed onto
//! a [`Surface`] (the browser canvas on wasm).

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod draw;
pub mod frame;

pub use draw::{Color, DrawCmd, Surface, present};
pub use frame::render_frame;
