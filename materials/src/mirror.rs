//! Mirror Material

use bumpalo::Bump;
use scatter::interaction::*;
use scatter::material::*;
use scatter::pbrt::*;
use scatter::reflection::*;
use scatter::spectrum::*;

/// Implements a perfect mirror.
#[derive(Copy, Clone, Debug)]
pub struct MirrorMaterial {
    /// Spectral reflectivity of the mirror.
    kr: Spectrum,
}

impl MirrorMaterial {
    /// Create a new `MirrorMaterial`.
    ///
    /// * `kr` - Spectral reflectivity of the mirror.
    pub fn new(kr: Spectrum) -> Self {
        Self { kr }
    }
}

impl Default for MirrorMaterial {
    fn default() -> Self {
        Self::new(Spectrum::new(0.9))
    }
}

impl Material for MirrorMaterial {
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

        let r = self.kr.clamp_default();
        if !r.is_black() {
            bsdf.add(SpecularReflection::alloc(arena, r, fresnel_noop_alloc(arena)));
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
    fn reflects_about_normal() {
        let arena = Bump::new();
        let m = MirrorMaterial::default();
        let si = shading_point();
        let bsdf = m.compute_bsdf(&arena, &si, TransportMode::Radiance);

        let wo = Vector3f::new(0.6, 0.0, 0.8);
        let sample = bsdf.sample_f(&wo, &BSDFSample::new(0.5, 0.5, 0.5), BxDFType::BSDF_ALL);
        assert_eq!(sample.pdf, 1.0);
        assert!(approx_eq!(f32, sample.wi.x, -0.6, epsilon = 1e-6));
        assert!(approx_eq!(f32, sample.wi.z, 0.8, epsilon = 1e-6));
        assert!(approx_eq!(f32, sample.f[2] * 0.8, 0.9, epsilon = 1e-5));

        // Delta lobes never match an arbitrary direction pair.
        assert!(bsdf.f(&wo, &sample.wi, BxDFType::BSDF_ALL).is_black());
    }
}
