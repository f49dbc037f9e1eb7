//! Microfacet Distribution Models

use crate::geometry::*;
use crate::pbrt::*;

mod anisotropic;
mod blinn;

// Re-exports
pub use anisotropic::*;
pub use blinn::*;

/// Exponents above this value (or NaN) are clamped to it.
pub const MAX_MICROFACET_EXPONENT: Float = 10000.0;

/// Microfacet distribution models.
#[derive(Copy, Clone, Debug)]
pub enum MicrofacetDistribution {
    /// Isotropic Blinn distribution.
    Blinn(BlinnDistribution),

    /// Ashikhmin-Shirley anisotropic distribution.
    Anisotropic(AnisotropicDistribution),
}

impl MicrofacetDistribution {
    /// Return the differential area of microfacets oriented with the surface
    /// normal `wh`.
    ///
    /// * `wh` - A sample normal from the distrubition of normal vectors.
    pub fn d(&self, wh: &Vector3f) -> Float {
        match self {
            Self::Blinn(dist) => dist.d(wh),
            Self::Anisotropic(dist) => dist.d(wh),
        }
    }

    /// Returns a sample from the distribution of normal vectors. The returned
    /// half-vector lies in the same hemisphere as `wo`.
    ///
    /// * `wo` - Outgoing direction.
    /// * `u`  - The 2D uniform random values.
    pub fn sample_wh(&self, wo: &Vector3f, u: &Point2f) -> Vector3f {
        let wh = match self {
            Self::Blinn(dist) => dist.sample_wh(u),
            Self::Anisotropic(dist) => dist.sample_wh(u),
        };
        if wo.z * wh.z < 0.0 {
            -wh
        } else {
            wh
        }
    }

    /// Evaluates the PDF of sampling the half-vector `wh` given outgoing
    /// direction `wo`. This is a density with respect to `wh`; it is zero
    /// when `wh` faces away from `wo`.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wh` - A sample normal from the distrubition of normal vectors.
    pub fn pdf(&self, wo: &Vector3f, wh: &Vector3f) -> Float {
        if wo.dot(wh) <= 0.0 {
            return 0.0;
        }
        match self {
            Self::Blinn(dist) => dist.pdf(wh),
            Self::Anisotropic(dist) => dist.pdf(wh),
        }
    }
}

/// Clamps a microfacet exponent that is too large or not a number.
///
/// * `e` - The exponent.
pub(crate) fn clamp_exponent(e: Float) -> Float {
    if e.is_nan() || e > MAX_MICROFACET_EXPONENT {
        warn!(
            "Microfacet exponent {} clamped to {}",
            e, MAX_MICROFACET_EXPONENT
        );
        MAX_MICROFACET_EXPONENT
    } else {
        e
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::*;
    use crate::sampling::*;

    /// Estimates ∫ D(wh) cosθh dωh over the hemisphere which must be 1.
    fn normalization(dist: &MicrofacetDistribution) -> Float {
        let mut rng = RNG::new(1);
        let samples = stratified_sample_2d(&mut rng, 128, 128, true);
        let sum: Float = samples
            .iter()
            .map(|u| {
                let wh = uniform_sample_hemisphere(u);
                dist.d(&wh) * wh.z / uniform_hemisphere_pdf()
            })
            .sum();
        sum / samples.len() as Float
    }

    #[test]
    fn blinn_is_normalized() {
        for e in [1.0, 10.0, 20.0] {
            let dist = MicrofacetDistribution::Blinn(BlinnDistribution::new(e));
            let n = normalization(&dist);
            assert!((n - 1.0).abs() < 0.05, "exponent {} gives {}", e, n);
        }
    }

    #[test]
    fn anisotropic_is_normalized() {
        let dist = MicrofacetDistribution::Anisotropic(AnisotropicDistribution::new(4.0, 20.0));
        let n = normalization(&dist);
        assert!((n - 1.0).abs() < 0.05, "got {}", n);
    }

    #[test]
    fn clamps_exponents() {
        assert_eq!(clamp_exponent(Float::NAN), MAX_MICROFACET_EXPONENT);
        assert_eq!(clamp_exponent(1e6), MAX_MICROFACET_EXPONENT);
        assert_eq!(clamp_exponent(20.0), 20.0);
    }

    #[test]
    fn sampled_half_vector_follows_wo() {
        let dist = MicrofacetDistribution::Blinn(BlinnDistribution::new(10.0));
        let wo = Vector3f::new(0.0, 0.6, -0.8);
        let mut rng = RNG::new(9);
        for _ in 0..100 {
            let u = Point2f::new(rng.uniform_float(), rng.uniform_float());
            let wh = dist.sample_wh(&wo, &u);
            assert!(wh.z <= 0.0);
        }
    }
}
