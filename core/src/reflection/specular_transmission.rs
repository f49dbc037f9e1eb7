//! Specular Transmission

use super::*;
use crate::material::*;
use bumpalo::Bump;

/// BTDF for physically plausible specular transmission using Fresnel interface.
#[derive(Copy, Clone, Debug)]
pub struct SpecularTransmission {
    /// BxDF type.
    bxdf_type: BxDFType,

    /// Fresnel interface for the dielectric boundary.
    fresnel: FresnelDielectric,

    /// Spectrum used to scale the transmitted colour.
    t: Spectrum,

    /// Index of refraction above the surface (same side as surface normal).
    eta_i: Float,

    /// Index of refraction below the surface (opposite side as surface normal).
    eta_t: Float,

    /// Indicates whether incident ray started from a light source or from camera.
    mode: TransportMode,
}

impl SpecularTransmission {
    /// Creates a new instance of `SpecularTransmission`.
    ///
    /// * `t`     - Spectrum used to scale the transmitted colour.
    /// * `eta_i` - Index of refraction above the surface (same side as surface normal).
    /// * `eta_t` - Index of refraction below the surface (opposite side as surface normal).
    /// * `mode`  - Indicates whether incident ray started from a light source or from camera.
    pub fn new(t: Spectrum, eta_i: Float, eta_t: Float, mode: TransportMode) -> Self {
        Self {
            bxdf_type: BxDFType::BSDF_TRANSMISSION | BxDFType::BSDF_SPECULAR,
            fresnel: FresnelDielectric::new(eta_i, eta_t),
            t,
            eta_i,
            eta_t,
            mode,
        }
    }

    /// Allocate a new instance of `SpecularTransmission`.
    ///
    /// * `arena` - The arena for memory allocations.
    /// * `t`     - Spectrum used to scale the transmitted colour.
    /// * `eta_i` - Index of refraction above the surface.
    /// * `eta_t` - Index of refraction below the surface.
    /// * `mode`  - Transport mode.
    pub fn alloc(arena: &Bump, t: Spectrum, eta_i: Float, eta_t: Float, mode: TransportMode) -> &BxDF {
        let model = arena.alloc(Self::new(t, eta_i, eta_t, mode));
        arena.alloc(BxDF::SpecularTransmission(model))
    }

    /// Returns the BxDF type.
    pub fn get_type(&self) -> BxDFType {
        self.bxdf_type
    }

    /// Returns the value of the distribution function for the given pair of directions.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wi` - Incident direction.
    pub fn f(&self, _wo: &Vector3f, _wi: &Vector3f) -> Spectrum {
        // No scattering is returned.
        Spectrum::ZERO
    }

    /// Returns the refracted direction and transmitted value. Total internal
    /// reflection produces no sample.
    ///
    /// * `wo` - Outgoing direction.
    /// * `u`  - The 2D uniform random values.
    pub fn sample_f(&self, wo: &Vector3f, _u: &Point2f) -> BxDFSample {
        // Figure out which η is incident and which is transmitted.
        let entering = cos_theta(wo) > 0.0;
        let (eta_i, eta_t) = if entering {
            (self.eta_i, self.eta_t)
        } else {
            (self.eta_t, self.eta_i)
        };

        // Compute transmitted ray direction.
        let eta = eta_i / eta_t;
        let sin_t_2 = eta * eta * sin_2_theta(wo);

        // Handle total internal reflection for transmission.
        if sin_t_2 >= 1.0 {
            return BxDFSample::from(self.bxdf_type);
        }

        let cos_t = (max(0.0, 1.0 - sin_t_2)).sqrt();
        let cos_t = if entering { -cos_t } else { cos_t };
        let wi = Vector3f::new(-eta * wo.x, -eta * wo.y, cos_t);

        let c = abs_cos_theta(&wi);
        if c == 0.0 {
            return BxDFSample::from(self.bxdf_type);
        }

        let f = self.fresnel.evaluate(cos_theta(wo));
        let mut ft = (Spectrum::ONE - f) * self.t;

        // Account for non-symmetry with transmission to different medium.
        if self.mode == TransportMode::Radiance {
            ft *= (eta_i * eta_i) / (eta_t * eta_t);
        }

        BxDFSample::new(ft / c, 1.0, wi, self.bxdf_type)
    }

    /// Delta distributions have no density for arbitrary direction pairs.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wi` - Incident direction.
    pub fn pdf(&self, _wo: &Vector3f, _wi: &Vector3f) -> Float {
        0.0
    }
}

impl fmt::Display for SpecularTransmission {
    /// Formats the value using the given formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SpecularTransmission {{ bxdf_type: {}, t: {}, eta_i: {}, eta_t: {}, mode: {:?} }}",
            self.bxdf_type, self.t, self.eta_i, self.eta_t, self.mode
        )
    }
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
    fn normal_incidence_passes_straight_through() {
        let bxdf = SpecularTransmission::new(Spectrum::ONE, 1.0, 1.5, TransportMode::Importance);
        let sample = bxdf.sample_f(&Vector3f::new(0.0, 0.0, 1.0), &Point2f::zero());
        assert_eq!(sample.pdf, 1.0);
        assert!(approx_eq!(f32, sample.wi.z, -1.0, ulps = 2));
        assert!(approx_eq!(f32, sample.f[0], 0.96, epsilon = 1e-5));
    }

    #[test]
    fn radiance_scales_by_eta_ratio() {
        let wo = Vector3f::new(0.0, 0.0, 1.0);
        let importance = SpecularTransmission::new(Spectrum::ONE, 1.0, 1.5, TransportMode::Importance)
            .sample_f(&wo, &Point2f::zero());
        let radiance = SpecularTransmission::new(Spectrum::ONE, 1.0, 1.5, TransportMode::Radiance)
            .sample_f(&wo, &Point2f::zero());
        assert!(approx_eq!(
            f32,
            radiance.f[0],
            importance.f[0] / (1.5 * 1.5),
            epsilon = 1e-5
        ));
    }

    #[test]
    fn total_internal_reflection_has_no_sample() {
        let bxdf = SpecularTransmission::new(Spectrum::ONE, 1.0, 1.5, TransportMode::Radiance);
        // Inside the glass at a grazing angle.
        let theta: Float = 80.0_f32.to_radians();
        let wo = Vector3f::new(theta.sin(), 0.0, -theta.cos());
        let sample = bxdf.sample_f(&wo, &Point2f::zero());
        assert_eq!(sample.pdf, 0.0);
        assert!(sample.f.is_black());
    }

    prop_hemisphere!(hemisphere);

    proptest! {
        #[test]
        fn refracted_direction_obeys_snell(wo in hemisphere()) {
            let bxdf = SpecularTransmission::new(Spectrum::ONE, 1.0, 1.5, TransportMode::Radiance);
            let sample = bxdf.sample_f(&wo, &Point2f::zero());
            prop_assert_eq!(sample.pdf, 1.0);
            prop_assert!(sample.wi.z < 0.0);
            prop_assert!(approx_eq!(f32, sin_theta(&wo), 1.5 * sin_theta(&sample.wi), epsilon = 1e-4));
            prop_assert!(approx_eq!(f32, sample.wi.length(), 1.0, epsilon = 1e-4));
            prop_assert!(bxdf.f(&wo, &sample.wi).is_black());
            prop_assert_eq!(bxdf.pdf(&wo, &sample.wi), 0.0);
        }

        #[test]
        fn delta_is_zero_everywhere(
            wo in hemisphere(),
            wi in hemisphere(),
            flip_o in any::<bool>(),
            flip_i in any::<bool>(),
        ) {
            let wo = if flip_o { -wo } else { wo };
            let wi = if flip_i { -wi } else { wi };
            for mode in [TransportMode::Radiance, TransportMode::Importance] {
                let bxdf = SpecularTransmission::new(Spectrum::ONE, 1.0, 1.5, mode);
                prop_assert!(bxdf.f(&wo, &wi).is_black());
                prop_assert_eq!(bxdf.pdf(&wo, &wi), 0.0);
            }
        }
    }
}
