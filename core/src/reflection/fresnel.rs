//! Fresnel Dielectrics and Conductors

use super::*;
use bumpalo::Bump;
use std::fmt;
use std::mem::swap;

/// Interface for computing Fresnel reflection coefficients.
#[derive(Copy, Clone, Debug)]
pub enum Fresnel {
    /// Reflects 100% of all incoming light.
    NoOp,

    /// Dielectric interface.
    Dielectric(FresnelDielectric),

    /// Conductor interface.
    Conductor(FresnelConductor),
}

impl Fresnel {
    /// Returns the amount of light reflected by the surface.
    ///
    /// * `cos_theta_i` - Cosine of the angle made by incident direction and
    ///                   surface normal.
    pub fn evaluate(&self, cos_theta_i: Float) -> Spectrum {
        match self {
            Self::NoOp => Spectrum::ONE,
            Self::Dielectric(f) => f.evaluate(cos_theta_i),
            Self::Conductor(f) => f.evaluate(cos_theta_i),
        }
    }
}

impl fmt::Display for Fresnel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoOp => write!(f, "FresnelNoOp"),
            Self::Dielectric(d) => write!(f, "FresnelDielectric {{ eta_i: {}, eta_t: {} }}", d.eta_i, d.eta_t),
            Self::Conductor(c) => write!(f, "FresnelConductor {{ eta: {}, k: {} }}", c.eta, c.k),
        }
    }
}

/// Allocates a `Fresnel::NoOp`.
///
/// * `arena` - The arena for memory allocations.
pub fn fresnel_noop_alloc(arena: &Bump) -> &Fresnel {
    arena.alloc(Fresnel::NoOp)
}

/// Implements `Fresnel` for dielectric materials.
#[derive(Copy, Clone, Debug, Default)]
pub struct FresnelDielectric {
    /// Index of refraction for exterior side of the surface.
    pub eta_i: Float,

    /// Index of refraction for interior side of the surface.
    pub eta_t: Float,
}

impl FresnelDielectric {
    /// Create a new `FresnelDielectric`.
    ///
    /// * `eta_i` - Index of refraction for exterior side of the surface.
    /// * `eta_t` - Index of refraction for interior side of the surface.
    pub fn new(eta_i: Float, eta_t: Float) -> Self {
        Self { eta_i, eta_t }
    }

    /// Allocate a new `Fresnel::Dielectric`.
    ///
    /// * `arena` - The arena for memory allocations.
    /// * `eta_i` - Index of refraction for exterior side of the surface.
    /// * `eta_t` - Index of refraction for interior side of the surface.
    pub fn alloc(arena: &Bump, eta_i: Float, eta_t: Float) -> &Fresnel {
        arena.alloc(Fresnel::Dielectric(Self::new(eta_i, eta_t)))
    }

    /// Returns the amount of light reflected by the surface. A negative
    /// cosine means the light arrives from the interior side.
    ///
    /// * `cos_theta_i` - Cosine of the angle made by incident direction and
    ///                   surface normal.
    pub fn evaluate(&self, cos_theta_i: Float) -> Spectrum {
        let cos_theta_i = clamp(cos_theta_i, -1.0, 1.0);

        // Potentially swap indices of refraction.
        let mut eta_i = self.eta_i;
        let mut eta_t = self.eta_t;
        if cos_theta_i <= 0.0 {
            swap(&mut eta_i, &mut eta_t);
        }

        // Compute transmitted cosine using Snell's law.
        let sin_theta_t = eta_i / eta_t * max(0.0, 1.0 - cos_theta_i * cos_theta_i).sqrt();

        // Handle total internal reflection.
        if sin_theta_t >= 1.0 {
            Spectrum::ONE
        } else {
            let cos_theta_t = max(0.0, 1.0 - sin_theta_t * sin_theta_t).sqrt();
            fr_dielectric(abs(cos_theta_i), cos_theta_t, eta_i, eta_t)
        }
    }
}

/// Implements `Fresnel` for conductors materials. The outside medium has an
/// index of refraction of 1.
#[derive(Copy, Clone, Debug, Default)]
pub struct FresnelConductor {
    /// Index of refraction of the conductor.
    pub eta: Spectrum,

    /// Absorption coefficient.
    pub k: Spectrum,
}

impl FresnelConductor {
    /// Create a new `FresnelConductor`.
    ///
    /// * `eta` - Index of refraction of the conductor.
    /// * `k`   - Absorption coefficient.
    pub fn new(eta: Spectrum, k: Spectrum) -> Self {
        Self { eta, k }
    }

    /// Create a `FresnelConductor` from a normal incidence reflectance `r`,
    /// using the index fitted with no absorption and the absorption fitted
    /// with index 1. The combined conductor reflects somewhat more than `r`.
    ///
    /// * `r` - Reflectance at normal incidence.
    pub fn approximate(r: Spectrum) -> Self {
        Self::new(fresnel_approx_eta(r), fresnel_approx_k(r))
    }

    /// Allocate a new `Fresnel::Conductor`.
    ///
    /// * `arena` - The arena for memory allocations.
    /// * `eta`   - Index of refraction of the conductor.
    /// * `k`     - Absorption coefficient.
    pub fn alloc(arena: &Bump, eta: Spectrum, k: Spectrum) -> &Fresnel {
        arena.alloc(Fresnel::Conductor(Self::new(eta, k)))
    }

    /// Allocate a new approximated `Fresnel::Conductor`.
    ///
    /// * `arena` - The arena for memory allocations.
    /// * `r`     - Reflectance at normal incidence.
    pub fn alloc_approximate(arena: &Bump, r: Spectrum) -> &Fresnel {
        arena.alloc(Fresnel::Conductor(Self::approximate(r)))
    }

    /// Returns the amount of light reflected by the surface.
    ///
    /// * `cos_theta_i` - Cosine of the angle made by incident direction and
    ///                   surface normal.
    pub fn evaluate(&self, cos_theta_i: Float) -> Spectrum {
        // Angle is measured on the same side as the normal.
        fr_conductor(abs(cos_theta_i), self.eta, self.k)
    }
}

/// Returns the unpolarized Fresnel reflectance of a dielectric interface
/// given both cosines.
///
/// * `cos_i` - Cosine of the incident angle; non-negative.
/// * `cos_t` - Cosine of the transmitted angle; non-negative.
/// * `eta_i` - Index of refraction for medium that incident ray is in.
/// * `eta_t` - Index of refraction for medium that incident ray is entering.
pub fn fr_dielectric(cos_i: Float, cos_t: Float, eta_i: Float, eta_t: Float) -> Spectrum {
    let r_parl = ((eta_t * cos_i) - (eta_i * cos_t)) / ((eta_t * cos_i) + (eta_i * cos_t));
    let r_perp = ((eta_i * cos_i) - (eta_t * cos_t)) / ((eta_i * cos_i) + (eta_t * cos_t));
    Spectrum::new((r_parl * r_parl + r_perp * r_perp) / 2.0)
}

/// Returns the Fresnel reflection at the boundary between a conductor and a
/// dielectric with index 1 for unpolarized light.
///
/// * `cos_theta_i` - Cosine of the incident angle.
/// * `eta`         - Index of refraction of the conductor.
/// * `k`           - The absorption coefficient.
pub fn fr_conductor(cos_theta_i: Float, eta: Spectrum, k: Spectrum) -> Spectrum {
    let cos_theta_i = clamp(cos_theta_i, -1.0, 1.0);

    let cos_theta_i_2 = cos_theta_i * cos_theta_i;
    let sin_theta_i_2 = 1.0 - cos_theta_i_2;
    let eta_2 = eta * eta;
    let k_2 = k * k;

    let t0 = eta_2 - k_2 - Spectrum::new(sin_theta_i_2);
    let a2_plus_b2 = (t0 * t0 + 4.0 * eta_2 * k_2).sqrt();
    let t1 = a2_plus_b2 + Spectrum::new(cos_theta_i_2);
    let a = (0.5 * (a2_plus_b2 + t0)).sqrt();
    let t2 = 2.0 * cos_theta_i * a;
    let rs = (t1 - t2) / (t1 + t2);

    let t3 = cos_theta_i_2 * a2_plus_b2 + Spectrum::new(sin_theta_i_2 * sin_theta_i_2);
    let t4 = t2 * sin_theta_i_2;
    let rp = rs * (t3 - t4) / (t3 + t4);

    0.5 * (rp + rs)
}

/// Returns the index of refraction of a conductor with no absorption whose
/// normal incidence reflectance is `fr`.
///
/// * `fr` - Reflectance at normal incidence.
pub fn fresnel_approx_eta(fr: Spectrum) -> Spectrum {
    let reflectance = fr.clamp(0.0, 0.999);
    (Spectrum::ONE + reflectance.sqrt()) / (Spectrum::ONE - reflectance.sqrt())
}

/// Returns the absorption coefficient of a conductor with index 1 whose
/// normal incidence reflectance is `fr`.
///
/// * `fr` - Reflectance at normal incidence.
pub fn fresnel_approx_k(fr: Spectrum) -> Spectrum {
    let reflectance = fr.clamp(0.0, 0.999);
    2.0 * (reflectance / (Spectrum::ONE - reflectance)).sqrt()
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
    fn dielectric_normal_incidence() {
        let f = FresnelDielectric::new(1.0, 1.5);
        let r = f.evaluate(1.0);
        for i in 0..SPECTRUM_SAMPLES {
            assert!(approx_eq!(f32, r[i], 0.04, epsilon = 1e-6));
        }
    }

    #[test]
    fn dielectric_total_internal_reflection() {
        // Leaving glass at a grazing angle.
        let f = FresnelDielectric::new(1.0, 1.5);
        assert_eq!(f.evaluate(-0.1), Spectrum::ONE);
    }

    #[test]
    fn dielectric_is_symmetric_at_normal_incidence() {
        let f = FresnelDielectric::new(1.0, 1.5);
        assert!(approx_eq!(f32, f.evaluate(1.0)[0], f.evaluate(-1.0)[0], epsilon = 1e-6));
    }

    #[test]
    fn noop_reflects_everything() {
        assert_eq!(Fresnel::NoOp.evaluate(0.3), Spectrum::ONE);
    }

    #[test]
    fn conductor_normal_incidence() {
        // ((η-1)² + k²) / ((η+1)² + k²)
        let eta = Spectrum::new(0.2);
        let k = Spectrum::new(3.0);
        let expected = (0.64 + 9.0) / (1.44 + 9.0);
        let r = fr_conductor(1.0, eta, k);
        assert!(approx_eq!(f32, r[0], expected, epsilon = 1e-5));
    }

    #[test]
    fn approximations_reproduce_reflectance() {
        let r = Spectrum::from_rgb(&[0.9, 0.5, 0.1]);

        // Dielectric-like conductor with only an index of refraction.
        let eta_only = fr_conductor(1.0, fresnel_approx_eta(r), Spectrum::ZERO);

        // Absorbing conductor with unit index of refraction.
        let k_only = fr_conductor(1.0, Spectrum::ONE, fresnel_approx_k(r));

        for i in 0..SPECTRUM_SAMPLES {
            assert!(approx_eq!(f32, eta_only[i], r[i], epsilon = 1e-3));
            assert!(approx_eq!(f32, k_only[i], r[i], epsilon = 1e-3));
        }
    }

    proptest! {
        #[test]
        fn dielectric_in_unit_interval(cos in -1.0..1.0f32, eta in 1.01..3.0f32) {
            let r = FresnelDielectric::new(1.0, eta).evaluate(cos);
            prop_assert!(r[0] >= 0.0 && r[0] <= 1.0 + 1e-6);
        }

        #[test]
        fn conductor_in_unit_interval(cos in 0.0..1.0f32, eta in 0.1..3.0f32, k in 0.5..5.0f32) {
            let r = fr_conductor(cos, Spectrum::new(eta), Spectrum::new(k));
            prop_assert!(r[0] >= -1e-5 && r[0] <= 1.0 + 1e-5);
        }
    }
}
