//! Core

extern crate bitflags;
#[macro_use]
extern crate hexf;
#[macro_use]
extern crate log;

// Re-export.
#[macro_use]
pub mod geometry;
pub mod bssrdf;
pub mod error;
pub mod interaction;
pub mod kdtree;
pub mod material;
pub mod microfacet;
pub mod pbrt;
pub mod reflection;
pub mod rng;
pub mod sampling;
pub mod spectrum;
