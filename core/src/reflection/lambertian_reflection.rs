//! Lambertian Reflection

use super::*;
use bumpalo::Bump;

/// BRDF for the Lambertian model for perfect diffuse surfaces that scatters
/// incident illumination equally in all directions.
#[derive(Copy, Clone, Debug)]
pub struct LambertianReflection {
    /// BxDF type.
    bxdf_type: BxDFType,

    /// Reflectance spectrum which gives the fraction of incident light that
    /// is scattered.
    r: Spectrum,
}

impl LambertianReflection {
    /// Create a new instance of `LambertianReflection`.
    ///
    /// * `r` - Reflectance spectrum which gives the fraction of incident light
    ///         that is scattered.
    pub fn new(r: Spectrum) -> Self {
        Self {
            bxdf_type: BxDFType::BSDF_REFLECTION | BxDFType::BSDF_DIFFUSE,
            r,
        }
    }

    /// Allocate a new instance of `LambertianReflection`.
    ///
    /// * `arena` - The arena for memory allocations.
    /// * `r`     - Reflectance spectrum which gives the fraction of incident
    ///             light that is scattered.
    pub fn alloc(arena: &Bump, r: Spectrum) -> &BxDF {
        let model = arena.alloc(Self::new(r));
        arena.alloc(BxDF::LambertianReflection(model))
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
    pub fn f(&self, _wo: &Vector3f, _wi: &Vector3f) -> Spectrum {
        self.r * INV_PI
    }

    /// Computes the hemispherical-directional reflectance function ρ.
    ///
    /// * `wo` - Outgoing direction.
    /// * `u`  - Samples used by Monte Carlo algorithm.
    pub fn rho_hd(&self, _wo: &Vector3f, _u: &[Point2f]) -> Spectrum {
        self.r
    }

    /// Computes the hemispherical-hemispherical reflectance function ρ.
    ///
    /// * `u1` - Samples used by Monte Carlo algorithm.
    /// * `u2` - Samples used by Monte Carlo algorithm.
    pub fn rho_hh(&self, u1: &[Point2f], u2: &[Point2f]) -> Spectrum {
        assert!(u1.len() == u2.len());
        self.r
    }
}

impl fmt::Display for LambertianReflection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LambertianReflection {{ r: {} }}", self.r)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::*;
    use float_cmp::*;

    #[test]
    fn constant_value() {
        let l = LambertianReflection::new(Spectrum::new(0.5));
        let f = l.f(&Vector3f::new(0.0, 0.0, 1.0), &Vector3f::new(0.6, 0.0, 0.8));
        assert!(approx_eq!(f32, f[0], 0.5 * INV_PI, ulps = 2));
    }

    #[test]
    fn monte_carlo_converges_to_closed_form() {
        let arena = Bump::new();
        let bxdf = LambertianReflection::alloc(&arena, Spectrum::new(0.5));
        let wo = Vector3f::new(0.0, 0.6, 0.8);
        let mut rng = RNG::new(1);

        let u = stratified_sample_2d(&mut rng, 4, 4, true);
        let estimate = bxdf.estimate_rho_hd(&wo, &u);
        assert!(approx_eq!(f32, estimate[0], 0.5, epsilon = 1e-4));

        for (sqrt_samples, tolerance) in [(8, 0.05), (64, 0.01)] {
            let u1 = stratified_sample_2d(&mut rng, sqrt_samples, sqrt_samples, true);
            let u2 = stratified_sample_2d(&mut rng, sqrt_samples, sqrt_samples, true);
            let estimate = bxdf.estimate_rho_hh(&u1, &u2);
            let error = abs(estimate[0] - 0.5);
            assert!(error < tolerance, "error {} with {}² samples", error, sqrt_samples);
        }
    }
}
