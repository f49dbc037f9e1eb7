//! Oren-Nayar Microfacet Model

use super::*;
use bumpalo::Bump;

/// BRDF for the Oren-Nayar model for modeling rough surfaces using a microfacet
/// model.
#[derive(Copy, Clone, Debug)]
pub struct OrenNayar {
    /// BxDF type.
    bxdf_type: BxDFType,

    /// Reflectance spectrum which gives the fraction of incident light that
    /// is scattered.
    r: Spectrum,

    /// Precomputed parameter `A` where:
    ///               σ^2
    /// A = 1 - ---------------
    ///          2(σ^2 + 0.33)
    ///
    /// and σ is the Gaussian distribution parameter, the standard deviation of
    /// the microfacet orientation angle.
    a: Float,

    /// Precomputed parameter `B` where:
    ///      0.45 * σ^2
    /// B = ------------
    ///      σ^2 + 0.09
    b: Float,
}

impl OrenNayar {
    /// Create a new instance of `OrenNayar`.
    ///
    /// * `r`     - Reflectance spectrum which gives the fraction of incident
    ///             light that is scattered.
    /// * `sigma` - The Gaussian distribution parameter, the standard deviation
    ///             of the microfacet orientation angle (in degrees). Clamped to
    ///             [0, 90].
    pub fn new(r: Spectrum, sigma: Float) -> Self {
        let clamped = if sigma.is_nan() { 0.0 } else { clamp(sigma, 0.0, 90.0) };
        if clamped != sigma {
            warn!("Oren-Nayar sigma {} clamped to {}", sigma, clamped);
        }

        let sigma = clamped.to_radians();
        let sigma2 = sigma * sigma;
        Self {
            bxdf_type: BxDFType::BSDF_REFLECTION | BxDFType::BSDF_DIFFUSE,
            r,
            a: 1.0 - (sigma2 / (2.0 * (sigma2 + 0.33))),
            b: 0.45 * sigma2 / (sigma2 + 0.09),
        }
    }

    /// Allocate a new instance of `OrenNayar`.
    ///
    /// * `arena` - The arena for memory allocations.
    /// * `r`     - Reflectance spectrum which gives the fraction of incident
    ///             light that is scattered.
    /// * `sigma` - The standard deviation of the microfacet orientation angle
    ///             (in degrees).
    pub fn alloc(arena: &Bump, r: Spectrum, sigma: Float) -> &BxDF {
        let model = arena.alloc(Self::new(r, sigma));
        arena.alloc(BxDF::OrenNayar(model))
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
        if !same_hemisphere(wo, wi) {
            return Spectrum::ZERO;
        }
        let sin_theta_i = sin_theta(wi);
        let sin_theta_o = sin_theta(wo);

        // Compute cosine term of Oren-Nayar model. The azimuth is undefined at
        // the pole where the term vanishes anyway.
        let max_cos = if (sin_theta_i > 1e-4) && (sin_theta_o > 1e-4) {
            let sin_phi_i = sin_phi(wi);
            let cos_phi_i = cos_phi(wi);
            let sin_phi_o = sin_phi(wo);
            let cos_phi_o = cos_phi(wo);
            let d_cos = cos_phi_i * cos_phi_o + sin_phi_i * sin_phi_o;
            max(0.0, d_cos)
        } else {
            1.0
        };

        // Compute sine and tangent terms of Oren-Nayar model.
        let abs_cos_theta_wo = abs_cos_theta(wo);
        let abs_cos_theta_wi = abs_cos_theta(wi);
        if abs_cos_theta_wi == 0.0 && abs_cos_theta_wo == 0.0 {
            return Spectrum::ZERO;
        }
        let (sin_alpha, tan_beta) = if abs_cos_theta_wi > abs_cos_theta_wo {
            (sin_theta_o, sin_theta_i / abs_cos_theta_wi)
        } else {
            (sin_theta_i, sin_theta_o / abs_cos_theta_wo)
        };

        self.r * INV_PI * (self.a + self.b * max_cos * sin_alpha * tan_beta)
    }
}

impl fmt::Display for OrenNayar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OrenNayar {{ r: {}, a: {}, b: {} }}", self.r, self.a, self.b)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
