//! Platform abstraction layer
//!
//! Browser-facing pieces that do not belong to the simulation:
//! - Keyboard input collection

pub mod input;

pub use input::{Key, KeySet};
