//! Glass Material

use bumpalo::Bump;
use scatter::interaction::*;
use scatter::material::*;
use scatter::pbrt::*;
use scatter::reflection::*;
use scatter::spectrum::*;

/// Implements smooth glass with perfect specular reflection and
/// transmission.
#[derive(Copy, Clone, Debug)]
pub struct GlassMaterial {
    /// Reflectivity of the surface.
    kr: Spectrum,

    /// Transmissivity of the surface.
    kt: Spectrum,

    /// Index of refraction inside the object.
    index: Float,
}

impl GlassMaterial {
    /// Create a new `GlassMaterial`.
    ///
    /// * `kr`    - Reflectivity of the surface.
    /// * `kt`    - Transmissivity of the surface.
    /// * `index` - Index of refraction inside the object.
    pub fn new(kr: Spectrum, kt: Spectrum, index: Float) -> Self {
        Self { kr, kt, index }
    }
}

impl Default for GlassMaterial {
    fn default() -> Self {
        Self::new(Spectrum::ONE, Spectrum::ONE, 1.5)
    }
}

impl Material for GlassMaterial {
    /// Allocates the BSDF describing the light-scattering properties of the
    /// material at the intersection point on the surface.
    ///
    /// * `arena` - The arena for memory allocations.
    /// * `si`    - The surface interaction at the intersection.
    /// * `mode`  - Transport mode.
    fn compute_bsdf<'arena>(
        &'arena self,
        arena: &'arena Bump,
        si: &SurfaceInteraction,
        mode: TransportMode,
    ) -> &'arena mut BSDF<'arena> {
        let eta = self.index;
        let bsdf = BSDF::alloc(arena, &si.hit, &si.shading, Some(eta));

        let r = self.kr.clamp_default();
        if !r.is_black() {
            let fresnel = FresnelDielectric::alloc(arena, 1.0, eta);
            bsdf.add(SpecularReflection::alloc(arena, r, fresnel));
        }

        let t = self.kt.clamp_default();
        if !t.is_black() {
            bsdf.add(SpecularTransmission::alloc(arena, t, 1.0, eta, mode));
        }

        bsdf
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
