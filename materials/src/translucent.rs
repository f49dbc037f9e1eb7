//! Translucent Material

use bumpalo::Bump;
use scatter::interaction::*;
use scatter::material::*;
use scatter::microfacet::*;
use scatter::pbrt::*;
use scatter::reflection::*;
use scatter::spectrum::*;

/// Index of refraction used for the glossy interface.
const ETA: Float = 1.5;

/// Implements thin translucent surfaces that reflect and transmit light
/// diffusely and glossily.
#[derive(Copy, Clone, Debug)]
pub struct TranslucentMaterial {
    /// Coefficient of diffuse reflection and transmission.
    kd: Spectrum,

    /// Coefficient of glossy reflection and transmission.
    ks: Spectrum,

    /// Roughness. The Blinn exponent is its reciprocal.
    roughness: Float,

    /// Fraction of reflected light.
    reflect: Spectrum,

    /// Fraction of transmitted light.
    transmit: Spectrum,
}

impl TranslucentMaterial {
    /// Create a new `TranslucentMaterial`.
    ///
    /// * `kd`        - Coefficient of diffuse reflection and transmission.
    /// * `ks`        - Coefficient of glossy reflection and transmission.
    /// * `roughness` - Roughness.
    /// * `reflect`   - Fraction of reflected light.
    /// * `transmit`  - Fraction of transmitted light.
    pub fn new(
        kd: Spectrum,
        ks: Spectrum,
        roughness: Float,
        reflect: Spectrum,
        transmit: Spectrum,
    ) -> Self {
        Self {
            kd,
            ks,
            roughness,
            reflect,
            transmit,
        }
    }
}

impl Default for TranslucentMaterial {
    fn default() -> Self {
        Self::new(
            Spectrum::new(0.25),
            Spectrum::new(0.25),
            0.1,
            Spectrum::new(0.5),
            Spectrum::new(0.5),
        )
    }
}

impl Material for TranslucentMaterial {
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
        let bsdf = BSDF::alloc(arena, &si.hit, &si.shading, Some(ETA));

        let r = self.reflect.clamp_default();
        let t = self.transmit.clamp_default();
        if r.is_black() && t.is_black() {
            return bsdf;
        }

        let kd = self.kd.clamp_default();
        if !kd.is_black() {
            if !r.is_black() {
                bsdf.add(LambertianReflection::alloc(arena, r * kd));
            }
            if !t.is_black() {
                let brdf = LambertianReflection::alloc(arena, t * kd);
                bsdf.add(BRDFToBTDF::alloc(arena, brdf));
            }
        }

        let ks = self.ks.clamp_default();
        if !ks.is_black() {
            let fresnel = FresnelDielectric::alloc(arena, ETA, 1.0);
            let distrib = MicrofacetDistribution::Blinn(BlinnDistribution::new(1.0 / self.roughness));
            if !r.is_black() {
                bsdf.add(MicrofacetReflection::alloc(arena, r * ks, fresnel, distrib));
            }
            if !t.is_black() {
                let brdf = MicrofacetReflection::alloc(arena, t * ks, fresnel, distrib);
                bsdf.add(BRDFToBTDF::alloc(arena, brdf));
            }
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
    use float_cmp::*;
    use scatter::geometry::*;

    #[test]
    fn four_lobes() {
        let arena = Bump::new();
        let m = TranslucentMaterial::default();
        let si = shading_point();
        let bsdf = m.compute_bsdf(&arena, &si, TransportMode::Radiance);
        assert_eq!(bsdf.num_components(BxDFType::BSDF_ALL), 4);
        assert_eq!(bsdf.num_components(BxDFType::BSDF_ALL_TRANSMISSION), 2);
    }

    #[test]
    fn diffuse_transmission_through_surface() {
        let arena = Bump::new();
        let m = TranslucentMaterial::new(
            Spectrum::new(0.8),
            Spectrum::ZERO,
            0.1,
            Spectrum::new(0.5),
            Spectrum::new(0.25),
        );
        let si = shading_point();
        let bsdf = m.compute_bsdf(&arena, &si, TransportMode::Radiance);

        let wo = Vector3f::new(0.0, 0.6, 0.8);
        let above = Vector3f::new(0.6, 0.0, 0.8);
        let below = Vector3f::new(0.6, 0.0, -0.8);
        let fr = bsdf.f(&wo, &above, BxDFType::BSDF_ALL);
        let ft = bsdf.f(&wo, &below, BxDFType::BSDF_ALL);
        assert!(approx_eq!(f32, fr[0], 0.4 * INV_PI, epsilon = 1e-6));
        assert!(approx_eq!(f32, ft[0], 0.2 * INV_PI, epsilon = 1e-6));
    }
}
