//! Matte Material

use bumpalo::Bump;
use scatter::interaction::*;
use scatter::material::*;
use scatter::pbrt::*;
use scatter::reflection::*;
use scatter::spectrum::*;

/// Implements purely diffuse surfaces.
#[derive(Copy, Clone, Debug)]
pub struct MatteMaterial {
    /// Spectral diffuse reflection.
    kd: Spectrum,

    /// Roughness in degrees.
    sigma: Float,
}

impl MatteMaterial {
    /// Create a new `MatteMaterial`.
    ///
    /// * `kd`    - Spectral diffuse reflection.
    /// * `sigma` - Roughness in degrees. Zero gives a Lambertian surface.
    pub fn new(kd: Spectrum, sigma: Float) -> Self {
        Self { kd, sigma }
    }
}

impl Default for MatteMaterial {
    fn default() -> Self {
        Self::new(Spectrum::new(0.5), 0.0)
    }
}

impl Material for MatteMaterial {
    /// Allocates the BSDF describing the light-scattering properties of the
    /// material at the intersection point on the surface.
    ///
    /// * `arena` - The arena for memory allocations.
    /// * `si`    - The surface interaction at the intersection.
    /// * `mode`  - Transport mode (ignored).
    fn compute_bsdf<'arena>(
        &'arena self,
        arena: &'arena Bump,
        si: &SurfaceInteraction,
        _mode: TransportMode,
    ) -> &'arena mut BSDF<'arena> {
        let bsdf = BSDF::alloc(arena, &si.hit, &si.shading, None);

        let r = self.kd.clamp_default();
        let sig = clamp(self.sigma, 0.0, 90.0);
        if !r.is_black() {
            if sig == 0.0 {
                bsdf.add(LambertianReflection::alloc(arena, r));
            } else {
                bsdf.add(OrenNayar::alloc(arena, r, sig));
            }
        }

        bsdf
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
