//! Anisotropic Distribution

use super::clamp_exponent;
use crate::geometry::*;
use crate::pbrt::*;
use crate::reflection::*;

/// Implements the Ashikhmin-Shirley anisotropic microfacet distribution with
/// separate exponents along the tangent and bitangent.
#[derive(Copy, Clone, Debug)]
pub struct AnisotropicDistribution {
    /// Exponent for microfacets oriented along the x-axis.
    ex: Float,

    /// Exponent for microfacets oriented along the y-axis.
    ey: Float,
}

impl AnisotropicDistribution {
    /// Create a new `AnisotropicDistribution`.
    ///
    /// * `ex` - Exponent along the x-axis.
    /// * `ey` - Exponent along the y-axis.
    pub fn new(ex: Float, ey: Float) -> Self {
        Self {
            ex: clamp_exponent(ex),
            ey: clamp_exponent(ey),
        }
    }

    /// Returns the exponent weighted by the azimuth of `wh` or `None` at the
    /// pole where the azimuth is undefined.
    ///
    /// * `wh` - Half-vector.
    fn exponent(&self, wh: &Vector3f) -> Option<Float> {
        let cos_theta_h = abs_cos_theta(wh);
        let d = 1.0 - cos_theta_h * cos_theta_h;
        if d == 0.0 {
            None
        } else {
            Some((self.ex * wh.x * wh.x + self.ey * wh.y * wh.y) / d)
        }
    }

    /// Return the differential area of microfacets oriented with `wh`.
    ///
    /// * `wh` - Half-vector.
    pub fn d(&self, wh: &Vector3f) -> Float {
        match self.exponent(wh) {
            Some(e) => {
                ((self.ex + 2.0) * (self.ey + 2.0)).sqrt()
                    * INV_TWO_PI
                    * abs_cos_theta(wh).powf(e)
            }
            None => 0.0,
        }
    }

    /// Samples a half-vector in the upper hemisphere. `u[0]` picks the
    /// quadrant and is then remapped to sample the azimuth within it.
    ///
    /// * `u` - The 2D uniform random values.
    pub fn sample_wh(&self, u: &Point2f) -> Vector3f {
        let (u1, u2) = (u[0], u[1]);
        let (phi, cos_theta) = if u1 < 0.25 {
            self.sample_first_quadrant(4.0 * u1, u2)
        } else if u1 < 0.5 {
            let (phi, cos_theta) = self.sample_first_quadrant(4.0 * (0.5 - u1), u2);
            (PI - phi, cos_theta)
        } else if u1 < 0.75 {
            let (phi, cos_theta) = self.sample_first_quadrant(4.0 * (u1 - 0.5), u2);
            (phi + PI, cos_theta)
        } else {
            let (phi, cos_theta) = self.sample_first_quadrant(4.0 * (1.0 - u1), u2);
            (TWO_PI - phi, cos_theta)
        };

        let sin_theta = max(0.0, 1.0 - cos_theta * cos_theta).sqrt();
        spherical_direction(sin_theta, cos_theta, phi)
    }

    /// Samples `(φ, cos θ)` with φ in [0, π/2].
    ///
    /// * `u1` - Uniform value for φ.
    /// * `u2` - Uniform value for θ.
    fn sample_first_quadrant(&self, u1: Float, u2: Float) -> (Float, Float) {
        let phi = if self.ex == self.ey {
            PI * u1 * 0.5
        } else {
            atan(((self.ex + 1.0) / (self.ey + 1.0)).sqrt() * tan(PI * u1 * 0.5))
        };
        let cos_phi = cos(phi);
        let sin_phi = sin(phi);
        let cos_theta =
            u2.powf(1.0 / (self.ex * cos_phi * cos_phi + self.ey * sin_phi * sin_phi + 1.0));
        (phi, cos_theta)
    }

    /// Returns the half-vector density.
    ///
    /// * `wh` - Half-vector.
    pub fn pdf(&self, wh: &Vector3f) -> Float {
        match self.exponent(wh) {
            Some(e) => {
                ((self.ex + 1.0) * (self.ey + 1.0)).sqrt()
                    * INV_TWO_PI
                    * abs_cos_theta(wh).powf(e)
            }
            None => 0.0,
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::*;

    #[test]
    fn pole_is_degenerate() {
        let dist = AnisotropicDistribution::new(10.0, 100.0);
        let n = Vector3f::new(0.0, 0.0, 1.0);
        assert_eq!(dist.d(&n), 0.0);
        assert_eq!(dist.pdf(&n), 0.0);
    }

    #[test]
    fn samples_cover_all_quadrants() {
        let dist = AnisotropicDistribution::new(5.0, 50.0);
        let mut rng = RNG::new(4);
        let mut quadrants = [0; 4];
        for _ in 0..400 {
            let u = Point2f::new(rng.uniform_float(), rng.uniform_float());
            let wh = dist.sample_wh(&u);
            assert!(wh.z >= 0.0);
            let q = match (wh.x >= 0.0, wh.y >= 0.0) {
                (true, true) => 0,
                (false, true) => 1,
                (false, false) => 2,
                (true, false) => 3,
            };
            quadrants[q] += 1;
        }
        assert!(quadrants.iter().all(|&c| c > 50), "{:?}", quadrants);
    }

    #[test]
    fn equal_exponents_are_isotropic() {
        let dist = AnisotropicDistribution::new(20.0, 20.0);
        let a = spherical_direction(0.3_f32.sin(), 0.3_f32.cos(), 0.1);
        let b = spherical_direction(0.3_f32.sin(), 0.3_f32.cos(), 1.3);
        assert!((dist.d(&a) - dist.d(&b)).abs() < 1e-3);
    }
}
