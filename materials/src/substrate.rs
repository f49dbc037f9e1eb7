//! Substrate Material

use bumpalo::Bump;
use scatter::interaction::*;
use scatter::material::*;
use scatter::microfacet::*;
use scatter::pbrt::*;
use scatter::reflection::*;
use scatter::spectrum::*;

/// Implements a diffuse base under a glossy coating whose highlight can be
/// stretched along the tangent directions.
#[derive(Copy, Clone, Debug)]
pub struct SubstrateMaterial {
    /// Diffuse reflectance of the base.
    kd: Spectrum,

    /// Specular reflectance of the coating at normal incidence.
    ks: Spectrum,

    /// Roughness along the `u` direction.
    u_roughness: Float,

    /// Roughness along the `v` direction.
    v_roughness: Float,
}

impl SubstrateMaterial {
    /// Create a new `SubstrateMaterial`.
    ///
    /// * `kd`          - Diffuse reflectance of the base.
    /// * `ks`          - Specular reflectance of the coating.
    /// * `u_roughness` - Roughness along the `u` direction.
    /// * `v_roughness` - Roughness along the `v` direction.
    pub fn new(kd: Spectrum, ks: Spectrum, u_roughness: Float, v_roughness: Float) -> Self {
        Self {
            kd,
            ks,
            u_roughness,
            v_roughness,
        }
    }
}

impl Default for SubstrateMaterial {
    fn default() -> Self {
        Self::new(Spectrum::new(0.5), Spectrum::new(0.5), 0.1, 0.1)
    }
}

impl Material for SubstrateMaterial {
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

        let d = self.kd.clamp_default();
        let s = self.ks.clamp_default();
        let distrib = MicrofacetDistribution::Anisotropic(AnisotropicDistribution::new(
            1.0 / self.u_roughness,
            1.0 / self.v_roughness,
        ));
        bsdf.add(FresnelBlend::alloc(arena, d, s, distrib));

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
    use scatter::rng::*;

    #[test]
    fn anisotropic_highlight() {
        let arena = Bump::new();
        let m = SubstrateMaterial::new(Spectrum::new(0.2), Spectrum::new(0.5), 0.5, 0.01);
        let si = shading_point();
        let bsdf = m.compute_bsdf(&arena, &si, TransportMode::Radiance);
        assert_eq!(bsdf.num_components(BxDFType::BSDF_ALL), 1);

        // A highlight tilted along the smooth axis is dimmer than one tilted
        // along the rough axis.
        let wo = Vector3f::new(0.0, 0.0, 1.0);
        let along_u = Vector3f::new(0.2, 0.0, 1.0).normalize();
        let along_v = Vector3f::new(0.0, 0.2, 1.0).normalize();
        let fu = bsdf.f(&wo, &along_u, BxDFType::BSDF_ALL);
        let fv = bsdf.f(&wo, &along_v, BxDFType::BSDF_ALL);
        assert!(fu[0] > fv[0]);
    }

    #[test]
    fn reflectance_is_bounded() {
        let arena = Bump::new();
        let m = SubstrateMaterial::default();
        let si = shading_point();
        let bsdf = m.compute_bsdf(&arena, &si, TransportMode::Radiance);
        let mut rng = RNG::new(5);
        let wo = Vector3f::new(0.0, 0.6, 0.8);
        let rho = bsdf.rho_hd_rng(&wo, &mut rng, BxDFType::BSDF_ALL, 32);
        assert!(rho[0] > 0.0 && rho[0] < 1.05);
    }
}
