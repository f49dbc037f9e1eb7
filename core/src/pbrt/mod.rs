//! Numeric types, constants and helpers shared by the scattering code.

mod axis;
mod clamp;
mod common;

// Re-export
pub use axis::*;
pub use clamp::*;
pub use common::*;
