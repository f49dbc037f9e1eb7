//! Blinn Distribution

use super::clamp_exponent;
use crate::geometry::*;
use crate::pbrt::*;
use crate::reflection::*;

/// Implements the Blinn microfacet distribution `D(ωh) ∝ cos(θh)^e`.
#[derive(Copy, Clone, Debug)]
pub struct BlinnDistribution {
    /// Exponent; larger values give smoother surfaces.
    exponent: Float,
}

impl BlinnDistribution {
    /// Create a new `BlinnDistribution`.
    ///
    /// * `exponent` - Exponent. Clamped to `MAX_MICROFACET_EXPONENT`.
    pub fn new(exponent: Float) -> Self {
        Self {
            exponent: clamp_exponent(exponent),
        }
    }

    /// Returns the exponent.
    pub fn exponent(&self) -> Float {
        self.exponent
    }

    /// Return the differential area of microfacets oriented with `wh`.
    ///
    /// * `wh` - Half-vector.
    pub fn d(&self, wh: &Vector3f) -> Float {
        let cos_theta_h = abs_cos_theta(wh);
        (self.exponent + 2.0) * INV_TWO_PI * cos_theta_h.powf(self.exponent)
    }

    /// Samples a half-vector in the upper hemisphere.
    ///
    /// * `u` - The 2D uniform random values.
    pub fn sample_wh(&self, u: &Point2f) -> Vector3f {
        let cos_theta = u[0].powf(1.0 / (self.exponent + 1.0));
        let sin_theta = max(0.0, 1.0 - cos_theta * cos_theta).sqrt();
        let phi = u[1] * TWO_PI;
        spherical_direction(sin_theta, cos_theta, phi)
    }

    /// Returns the half-vector density.
    ///
    /// * `wh` - Half-vector.
    pub fn pdf(&self, wh: &Vector3f) -> Float {
        let cos_theta_h = abs_cos_theta(wh);
        (self.exponent + 1.0) * cos_theta_h.powf(self.exponent) * INV_TWO_PI
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;

    #[test]
    fn peak_at_normal() {
        let dist = BlinnDistribution::new(10.0);
        let n = Vector3f::new(0.0, 0.0, 1.0);
        assert!(approx_eq!(f32, dist.d(&n), 12.0 * INV_TWO_PI, ulps = 4));
        assert!(approx_eq!(f32, dist.pdf(&n), 11.0 * INV_TWO_PI, ulps = 4));
    }

    #[test]
    fn clamps_huge_exponent() {
        assert_eq!(BlinnDistribution::new(1e9).exponent(), 10000.0);
    }
}
