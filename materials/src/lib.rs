//! Materials

#[macro_use]
extern crate log;

mod glass;
mod matte;
mod measured;
mod metal;
mod mirror;
mod mix;
mod plastic;
mod shiny_metal;
mod substrate;
mod translucent;

// Re-export
pub use glass::*;
pub use matte::*;
pub use measured::*;
pub use metal::*;
pub use mirror::*;
pub use mix::*;
pub use plastic::*;
pub use shiny_metal::*;
pub use substrate::*;
pub use translucent::*;
