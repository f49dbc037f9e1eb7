//! Shiny Metal Material

use bumpalo::Bump;
use scatter::interaction::*;
use scatter::material::*;
use scatter::microfacet::*;
use scatter::pbrt::*;
use scatter::reflection::*;
use scatter::spectrum::*;

/// Implements a polished metal with a glossy lobe and a mirror lobe, each
/// using a conductor Fresnel fitted to a desired reflectance.
#[derive(Copy, Clone, Debug)]
pub struct ShinyMetalMaterial {
    /// Reflectance at normal incidence of the glossy lobe.
    ks: Spectrum,

    /// Reflectance at normal incidence of the mirror lobe.
    kr: Spectrum,

    /// Roughness. The Blinn exponent is its reciprocal.
    roughness: Float,
}

impl ShinyMetalMaterial {
    /// Create a new `ShinyMetalMaterial`.
    ///
    /// * `ks`        - Reflectance of the glossy lobe.
    /// * `kr`        - Reflectance of the mirror lobe.
    /// * `roughness` - Roughness.
    pub fn new(ks: Spectrum, kr: Spectrum, roughness: Float) -> Self {
        Self { ks, kr, roughness }
    }
}

impl Default for ShinyMetalMaterial {
    fn default() -> Self {
        Self::new(Spectrum::ONE, Spectrum::ONE, 0.1)
    }
}

impl Material for ShinyMetalMaterial {
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

        let spec = self.ks.clamp_default();
        let r = self.kr.clamp_default();

        let fr_glossy = FresnelConductor::alloc_approximate(arena, spec);
        let fr_mirror = FresnelConductor::alloc_approximate(arena, r);
        let distrib = MicrofacetDistribution::Blinn(BlinnDistribution::new(1.0 / self.roughness));
        bsdf.add(MicrofacetReflection::alloc(arena, Spectrum::ONE, fr_glossy, distrib));
        bsdf.add(SpecularReflection::alloc(arena, Spectrum::ONE, fr_mirror));

        bsdf
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
