//! Shading-frame trigonometry.
//!
//! Directions are expressed in the local shading coordinate system where the
//! shading normal is the z-axis.

use crate::geometry::*;
use crate::pbrt::*;

/// Returns cos(θ) for a normalized vector in the shading coordinate system.
///
/// * `w` - The direction vector.
#[inline]
pub fn cos_theta(w: &Vector3f) -> Float {
    w.z
}

/// Returns cos^2(θ) for a normalized vector in the shading coordinate system.
///
/// * `w` - The direction vector.
#[inline]
pub fn cos_2_theta(w: &Vector3f) -> Float {
    w.z * w.z
}

/// Returns |cos(θ)| for a normalized vector in the shading coordinate system.
///
/// * `w` - The direction vector.
#[inline]
pub fn abs_cos_theta(w: &Vector3f) -> Float {
    abs(w.z)
}

/// Returns sin^2(θ) for a normalized vector in the shading coordinate system.
///
/// * `w` - The direction vector.
#[inline]
pub fn sin_2_theta(w: &Vector3f) -> Float {
    max(0.0, 1.0 - cos_2_theta(w))
}

/// Returns sin(θ) for a normalized vector in the shading coordinate system.
///
/// * `w` - The direction vector.
#[inline]
pub fn sin_theta(w: &Vector3f) -> Float {
    sin_2_theta(w).sqrt()
}

/// Returns cos(φ) for a normalized vector in the shading coordinate system.
/// At the pole this is 1.
///
/// * `w` - The direction vector.
#[inline]
pub fn cos_phi(w: &Vector3f) -> Float {
    let sin_theta = sin_theta(w);
    if sin_theta == 0.0 {
        1.0
    } else {
        clamp(w.x / sin_theta, -1.0, 1.0)
    }
}

/// Returns sin(φ) for a normalized vector in the shading coordinate system.
/// At the pole this is 0.
///
/// * `w` - The direction vector.
#[inline]
pub fn sin_phi(w: &Vector3f) -> Float {
    let sin_theta = sin_theta(w);
    if sin_theta == 0.0 {
        0.0
    } else {
        clamp(w.y / sin_theta, -1.0, 1.0)
    }
}

/// Returns true if two vectors are in the same hemisphere.
///
/// * `w` - First vector.
/// * `wp` - Second vector.
#[inline]
pub fn same_hemisphere(w: &Vector3f, wp: &Vector3f) -> bool {
    w.z * wp.z > 0.0
}

/// Reflect a vector about the shading normal (z-axis).
///
/// * `wo` - Outgoing direction.
#[inline]
pub fn reflect_z(wo: &Vector3f) -> Vector3f {
    Vector3f::new(-wo.x, -wo.y, wo.z)
}

/// Reflect a vector about a given normal.
///
/// * `wo` - Outgoing direction.
/// * `n`  - The normal.
#[inline]
pub fn reflect(wo: &Vector3f, n: &Vector3f) -> Vector3f {
    -(*wo) + 2.0 * wo.dot(n) * *n
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;
    use proptest::prelude::*;

    #[test]
    fn pole_azimuth_is_defined() {
        let n = Vector3f::new(0.0, 0.0, 1.0);
        assert_eq!(cos_phi(&n), 1.0);
        assert_eq!(sin_phi(&n), 0.0);
        assert_eq!(sin_theta(&n), 0.0);
    }

    #[test]
    fn hemispheres() {
        let up = Vector3f::new(0.0, 0.6, 0.8);
        let down = Vector3f::new(0.0, 0.6, -0.8);
        assert!(same_hemisphere(&up, &up));
        assert!(!same_hemisphere(&up, &down));
        assert!(!same_hemisphere(&up, &Vector3f::new(1.0, 0.0, 0.0)));
    }

    proptest! {
        #[test]
        fn trig_identities(theta in 0.01..PI - 0.01, phi in 0.0..TWO_PI) {
            let w = spherical_direction(theta.sin(), theta.cos(), phi);
            prop_assert!(approx_eq!(f32, cos_theta(&w), theta.cos(), epsilon = 1e-5));
            prop_assert!(approx_eq!(f32, sin_theta(&w), theta.sin(), epsilon = 1e-3));
            prop_assert!(approx_eq!(f32, cos_phi(&w), phi.cos(), epsilon = 1e-3));
            prop_assert!(approx_eq!(f32, sin_phi(&w), phi.sin(), epsilon = 1e-3));
        }

        #[test]
        fn reflect_about_z_matches_general(theta in 0.01..PI - 0.01, phi in 0.0..TWO_PI) {
            let w = spherical_direction(theta.sin(), theta.cos(), phi);
            let a = reflect_z(&w);
            let b = reflect(&w, &Vector3f::new(0.0, 0.0, 1.0));
            prop_assert!(approx_eq!(f32, a.x, b.x, epsilon = 1e-6));
            prop_assert!(approx_eq!(f32, a.y, b.y, epsilon = 1e-6));
            prop_assert!(approx_eq!(f32, a.z, b.z, epsilon = 1e-6));
        }
    }
}
