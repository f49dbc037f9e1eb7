//! BRDF to BTDF adapter

use super::*;
use bumpalo::Bump;

/// Adapter that turns a reflection model into a transmission model by
/// mirroring the incident direction into the other hemisphere.
#[derive(Copy, Clone, Debug)]
pub struct BRDFToBTDF<'arena> {
    /// BxDF type with reflection and transmission swapped.
    bxdf_type: BxDFType,

    /// The wrapped BxDF.
    brdf: &'arena BxDF<'arena>,
}

/// Mirrors a direction through the tangent plane.
#[inline]
fn other_hemisphere(w: &Vector3f) -> Vector3f {
    Vector3f::new(w.x, w.y, -w.z)
}

impl<'arena> BRDFToBTDF<'arena> {
    /// Create a new instance of `BRDFToBTDF`.
    ///
    /// * `brdf` - The BxDF to wrap.
    pub fn new(brdf: &'arena BxDF<'arena>) -> Self {
        Self {
            bxdf_type: brdf.get_type().flip_hemisphere(),
            brdf,
        }
    }

    /// Allocate a new instance of `BRDFToBTDF`.
    ///
    /// * `arena` - The arena for memory allocations.
    /// * `brdf`  - The BxDF to wrap.
    pub fn alloc(arena: &'arena Bump, brdf: &'arena BxDF<'arena>) -> &'arena BxDF<'arena> {
        let model = arena.alloc(Self::new(brdf));
        arena.alloc(BxDF::BRDFToBTDF(model))
    }

    /// Returns the BxDF type.
    pub fn get_type(&self) -> BxDFType {
        self.bxdf_type
    }

    /// Returns the value of the distribution function for the given pair of
    /// directions.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wi` - Incident direction.
    pub fn f(&self, wo: &Vector3f, wi: &Vector3f) -> Spectrum {
        self.brdf.f(wo, &other_hemisphere(wi))
    }

    /// Samples the wrapped BxDF and mirrors the sampled direction.
    ///
    /// * `wo` - Outgoing direction.
    /// * `u`  - The 2D uniform random values.
    pub fn sample_f(&self, wo: &Vector3f, u: &Point2f) -> BxDFSample {
        let mut sample = self.brdf.sample_f(wo, u);
        sample.wi = other_hemisphere(&sample.wi);
        sample.bxdf_type = self.bxdf_type;
        sample
    }

    /// Evaluates the PDF of the wrapped BxDF at the mirrored direction.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wi` - Incident direction.
    pub fn pdf(&self, wo: &Vector3f, wi: &Vector3f) -> Float {
        self.brdf.pdf(wo, &other_hemisphere(wi))
    }

    /// Computes the hemispherical-directional reflectance function ρ.
    ///
    /// * `wo`      - Outgoing direction.
    /// * `samples` - Samples used by Monte Carlo algorithm.
    pub fn rho_hd(&self, wo: &Vector3f, samples: &[Point2f]) -> Spectrum {
        self.brdf.rho_hd(&other_hemisphere(wo), samples)
    }

    /// Computes the hemispherical-hemispherical reflectance function ρ.
    ///
    /// * `samples1` - Samples used by Monte Carlo algorithm.
    /// * `samples2` - Samples used by Monte Carlo algorithm.
    pub fn rho_hh(&self, samples1: &[Point2f], samples2: &[Point2f]) -> Spectrum {
        self.brdf.rho_hh(samples1, samples2)
    }
}

impl<'arena> fmt::Display for BRDFToBTDF<'arena> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BRDFToBTDF {{ brdf: {} }}", self.brdf)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
