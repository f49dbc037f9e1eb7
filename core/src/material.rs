//! Material

use crate::interaction::*;
use crate::reflection::*;
use bumpalo::Bump;
use std::fmt;

// Light transport mode enumeration.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum TransportMode {
    /// Indicates incident ray that intersected a point started at the camera.
    #[default]
    Radiance,

    /// Indicates incident ray that intersected a point started at the light
    /// source.
    Importance,
}

impl fmt::Display for TransportMode {
    /// Formats the value using the given formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportMode::Radiance => write!(f, "radiance"),
            TransportMode::Importance => write!(f, "importance"),
        }
    }
}

/// Material trait provides common behavior.
pub trait Material {
    /// Allocates the BSDF describing the light-scattering properties of the
    /// material at the intersection point on the surface. The material must
    /// outlive the arena since measured data is borrowed, not copied.
    ///
    /// * `arena` - The arena for memory allocations.
    /// * `si`    - The surface interaction at the intersection.
    /// * `mode`  - Transport mode.
    #[allow(clippy::mut_from_ref)]
    fn compute_bsdf<'arena>(
        &'arena self,
        arena: &'arena Bump,
        si: &SurfaceInteraction,
        mode: TransportMode,
    ) -> &'arena mut BSDF<'arena>;
}

/// Atomic reference counted `Material`.
pub type ArcMaterial = std::sync::Arc<dyn Material + Send + Sync>;
