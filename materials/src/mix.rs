//! Mix Material

use bumpalo::Bump;
use scatter::interaction::*;
use scatter::material::*;
use scatter::pbrt::*;
use scatter::reflection::*;
use scatter::spectrum::*;
use std::sync::Arc;

/// Combines two materials with fixed weights.
pub struct MixMaterial {
    /// First material.
    m1: ArcMaterial,

    /// Second material.
    m2: ArcMaterial,

    /// Weight of `m1`; `m2` is weighted by its complement.
    scale: Spectrum,
}

impl MixMaterial {
    /// Create a new `MixMaterial`.
    ///
    /// * `m1`    - First material.
    /// * `m2`    - Second material.
    /// * `scale` - Weight of `m1`; `m2` is weighted by `1 - scale`.
    pub fn new(m1: ArcMaterial, m2: ArcMaterial, scale: Spectrum) -> Self {
        Self {
            m1: Arc::clone(&m1),
            m2: Arc::clone(&m2),
            scale,
        }
    }
}

impl Material for MixMaterial {
    /// Allocates the BSDF describing the light-scattering properties of the
    /// material at the intersection point on the surface. Panics if the two
    /// materials together have more than `MAX_BXDFS` BxDFs.
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
        // Compute weights and both source BxDFs for mix material.
        let s1 = self.scale.clamp_default();
        let s2 = (Spectrum::ONE - s1).clamp_default();
        let b1 = self.m1.compute_bsdf(arena, si, mode);
        let b2 = self.m2.compute_bsdf(arena, si, mode);

        // Initialize BSDF with weighted mixture of BxDFs.
        let bsdf = BSDF::alloc(arena, &si.hit, &si.shading, Some(b1.eta));
        for bxdf in b1.bxdfs() {
            bsdf.add(ScaledBxDF::alloc(arena, bxdf, s1));
        }
        for bxdf in b2.bxdfs() {
            bsdf.add(ScaledBxDF::alloc(arena, bxdf, s2));
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
    use crate::*;
    use float_cmp::*;
    use scatter::geometry::*;

    #[test]
    fn weights_sum_to_one() {
        let arena = Bump::new();
        let m1: ArcMaterial = Arc::new(MatteMaterial::new(Spectrum::new(0.8), 0.0));
        let m2: ArcMaterial = Arc::new(MatteMaterial::new(Spectrum::new(0.2), 0.0));
        let mix = MixMaterial::new(m1, m2, Spectrum::new(0.25));
        let si = shading_point();
        let bsdf = mix.compute_bsdf(&arena, &si, TransportMode::Radiance);
        assert_eq!(bsdf.num_components(BxDFType::BSDF_ALL), 2);

        let wo = Vector3f::new(0.0, 0.0, 1.0);
        let wi = Vector3f::new(0.6, 0.0, 0.8);
        let f = bsdf.f(&wo, &wi, BxDFType::BSDF_ALL);
        let expected = (0.25 * 0.8 + 0.75 * 0.2) * INV_PI;
        assert!(approx_eq!(f32, f[0], expected, epsilon = 1e-6));
    }

    #[test]
    fn scale_is_clamped() {
        let arena = Bump::new();
        let m1: ArcMaterial = Arc::new(MatteMaterial::new(Spectrum::new(0.8), 0.0));
        let m2: ArcMaterial = Arc::new(MatteMaterial::new(Spectrum::new(0.2), 0.0));
        let mix = MixMaterial::new(m1, m2, Spectrum::new(1.5));
        let si = shading_point();
        let bsdf = mix.compute_bsdf(&arena, &si, TransportMode::Radiance);

        let wo = Vector3f::new(0.0, 0.0, 1.0);
        let wi = Vector3f::new(0.6, 0.0, 0.8);
        let f = bsdf.f(&wo, &wi, BxDFType::BSDF_ALL);
        assert!(approx_eq!(f32, f[0], 0.8 * INV_PI, epsilon = 1e-6));
    }

    #[test]
    fn keeps_lobe_types() {
        let arena = Bump::new();
        let m1: ArcMaterial = Arc::new(GlassMaterial::default());
        let m2: ArcMaterial = Arc::new(PlasticMaterial::default());
        let mix = MixMaterial::new(m1, m2, Spectrum::new(0.5));
        let si = shading_point();
        let bsdf = mix.compute_bsdf(&arena, &si, TransportMode::Radiance);
        assert_eq!(bsdf.eta, 1.5);
        assert_eq!(bsdf.num_components(BxDFType::BSDF_ALL), 4);
        assert_eq!(
            bsdf.num_components(BxDFType::BSDF_REFLECTION | BxDFType::BSDF_SPECULAR),
            1
        );
    }

    #[test]
    #[should_panic(expected = "Cannot add BxDFs")]
    fn too_many_lobes_panics() {
        let arena = Bump::new();
        let translucent: ArcMaterial = Arc::new(TranslucentMaterial::default());
        let inner: ArcMaterial = Arc::new(MixMaterial::new(
            Arc::clone(&translucent),
            Arc::clone(&translucent),
            Spectrum::new(0.5),
        ));
        let mix = MixMaterial::new(inner, translucent, Spectrum::new(0.5));
        let si = shading_point();
        let _ = mix.compute_bsdf(&arena, &si, TransportMode::Radiance);
    }
}
