//! Plastic Material

use bumpalo::Bump;
use scatter::interaction::*;
use scatter::material::*;
use scatter::microfacet::*;
use scatter::pbrt::*;
use scatter::reflection::*;
use scatter::spectrum::*;

/// Implements plastic as a mixture of a diffuse and glossy scattering
/// function.
#[derive(Copy, Clone, Debug)]
pub struct PlasticMaterial {
    /// Spectral diffuse reflection.
    kd: Spectrum,

    /// Spectral specular reflection.
    ks: Spectrum,

    /// Roughness. The Blinn exponent is its reciprocal.
    roughness: Float,
}

impl PlasticMaterial {
    /// Create a new `PlasticMaterial`.
    ///
    /// * `kd`        - Spectral diffuse reflection.
    /// * `ks`        - Spectral specular reflection.
    /// * `roughness` - Roughness.
    pub fn new(kd: Spectrum, ks: Spectrum, roughness: Float) -> Self {
        Self { kd, ks, roughness }
    }
}

impl Default for PlasticMaterial {
    fn default() -> Self {
        Self::new(Spectrum::new(0.25), Spectrum::new(0.25), 0.1)
    }
}

impl Material for PlasticMaterial {
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

        // Initialize diffuse component of plastic material.
        let kd = self.kd.clamp_default();
        if !kd.is_black() {
            bsdf.add(LambertianReflection::alloc(arena, kd));
        }

        // Initialize specular component of plastic material.
        let ks = self.ks.clamp_default();
        if !ks.is_black() {
            let fresnel = FresnelDielectric::alloc(arena, 1.5, 1.0);
            let distrib = MicrofacetDistribution::Blinn(BlinnDistribution::new(1.0 / self.roughness));
            bsdf.add(MicrofacetReflection::alloc(arena, ks, fresnel, distrib));
        }

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
    fn diffuse_and_glossy_lobes() {
        let arena = Bump::new();
        let m = PlasticMaterial::default();
        let si = shading_point();
        let bsdf = m.compute_bsdf(&arena, &si, TransportMode::Radiance);
        assert_eq!(bsdf.num_components(BxDFType::BSDF_ALL), 2);
        assert_eq!(
            bsdf.num_components(BxDFType::BSDF_REFLECTION | BxDFType::BSDF_GLOSSY),
            1
        );

        // The highlight is brighter than an off-specular direction.
        let wo = Vector3f::new(0.6, 0.0, 0.8);
        let mirror = Vector3f::new(-0.6, 0.0, 0.8);
        let off = Vector3f::new(0.0, 0.6, 0.8);
        assert!(bsdf.f(&wo, &mirror, BxDFType::BSDF_ALL)[0] > bsdf.f(&wo, &off, BxDFType::BSDF_ALL)[0]);
    }

    #[test]
    fn zero_roughness_clamps_exponent() {
        let arena = Bump::new();
        let m = PlasticMaterial::new(Spectrum::ZERO, Spectrum::new(0.5), 0.0);
        let si = shading_point();
        let bsdf = m.compute_bsdf(&arena, &si, TransportMode::Radiance);
        assert_eq!(bsdf.num_components(BxDFType::BSDF_ALL), 1);

        let wo = Vector3f::new(0.6, 0.0, 0.8);
        let wi = Vector3f::new(0.0, 0.6, 0.8);
        let f = bsdf.f(&wo, &wi, BxDFType::BSDF_ALL);
        assert!(!f.has_nans());
    }
}
