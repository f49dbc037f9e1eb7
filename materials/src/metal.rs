//! Metal Material

use bumpalo::Bump;
use scatter::interaction::*;
use scatter::material::*;
use scatter::microfacet::*;
use scatter::pbrt::*;
use scatter::reflection::*;
use scatter::spectrum::*;

/// Index of refraction of copper.
pub const COPPER_ETA: [Float; 3] = [0.200438, 0.924033, 1.10221];

/// Absorption coefficient of copper.
pub const COPPER_K: [Float; 3] = [3.91295, 2.45285, 2.14219];

/// Implements rough conductors with a Blinn microfacet distribution.
#[derive(Copy, Clone, Debug)]
pub struct MetalMaterial {
    /// Index of refraction of the conductor.
    eta: Spectrum,

    /// Absorption coefficient of the conductor.
    k: Spectrum,

    /// Roughness. The Blinn exponent is its reciprocal.
    roughness: Float,
}

impl MetalMaterial {
    /// Create a new `MetalMaterial`.
    ///
    /// * `eta`       - Index of refraction of the conductor.
    /// * `k`         - Absorption coefficient of the conductor.
    /// * `roughness` - Roughness.
    pub fn new(eta: Spectrum, k: Spectrum, roughness: Float) -> Self {
        Self { eta, k, roughness }
    }
}

impl Default for MetalMaterial {
    fn default() -> Self {
        Self::new(
            Spectrum::from_rgb(&COPPER_ETA),
            Spectrum::from_rgb(&COPPER_K),
            0.01,
        )
    }
}

impl Material for MetalMaterial {
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

        let distrib = MicrofacetDistribution::Blinn(BlinnDistribution::new(1.0 / self.roughness));
        let fresnel = FresnelConductor::alloc(arena, self.eta, self.k);
        bsdf.add(MicrofacetReflection::alloc(arena, Spectrum::ONE, fresnel, distrib));

        bsdf
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::*;
    use scatter::geometry::*;

    #[test]
    fn copper_is_reddish() {
        let arena = Bump::new();
        let m = MetalMaterial::new(
            Spectrum::from_rgb(&COPPER_ETA),
            Spectrum::from_rgb(&COPPER_K),
            0.2,
        );
        let si = shading_point();
        let bsdf = m.compute_bsdf(&arena, &si, TransportMode::Radiance);
        assert_eq!(bsdf.num_components(BxDFType::BSDF_ALL_REFLECTION), 1);

        let wo = Vector3f::new(0.0, 0.0, 1.0);
        let f = bsdf.f(&wo, &wo, BxDFType::BSDF_ALL);
        assert!(f[0] > f[2]);
        assert!(!f.is_black());
    }
}
