//! Ashikhmin-Shirley Microfacet Reflection Model using Fresnel Effects.

use super::*;
use crate::microfacet::*;
use bumpalo::Bump;

/// BRDF for modeling layered surfaces such as wood using Ashikhmin-Shirley
/// model: a diffuse base beneath a glossy coating.
#[derive(Copy, Clone, Debug)]
pub struct FresnelBlend {
    /// BxDF type.
    bxdf_type: BxDFType,

    /// Reflectance spectrum for diffuse scattering.
    rd: Spectrum,

    /// Reflectance spectrum for specular scattering.
    rs: Spectrum,

    /// The microfacet distribution model.
    distribution: MicrofacetDistribution,
}

impl FresnelBlend {
    /// Create a new instance of `FresnelBlend`.
    ///
    /// * `rd`           - Reflectance spectrum for diffuse scattering.
    ///                    Clamped to [0, 1].
    /// * `rs`           - Reflectance spectrum for specular scattering.
    ///                    Clamped to [0, 1].
    /// * `distribution` - Microfacet distribution.
    pub fn new(rd: Spectrum, rs: Spectrum, distribution: MicrofacetDistribution) -> Self {
        Self {
            bxdf_type: BxDFType::BSDF_REFLECTION | BxDFType::BSDF_GLOSSY,
            rd: clamp_reflectance("rd", rd),
            rs: clamp_reflectance("rs", rs),
            distribution,
        }
    }

    /// Allocate a new instance of `FresnelBlend`.
    ///
    /// * `arena`        - The arena for memory allocations.
    /// * `rd`           - Reflectance spectrum for diffuse scattering.
    /// * `rs`           - Reflectance spectrum for specular scattering.
    /// * `distribution` - Microfacet distribution.
    pub fn alloc(arena: &Bump, rd: Spectrum, rs: Spectrum, distribution: MicrofacetDistribution) -> &BxDF {
        let model = arena.alloc(Self::new(rd, rs, distribution));
        arena.alloc(BxDF::FresnelBlend(model))
    }

    /// Returns the BxDF type.
    pub fn get_type(&self) -> BxDFType {
        self.bxdf_type
    }

    /// Schlick's approximation of the Fresnel reflectance of the coating.
    ///
    /// * `cos_theta` - Cosine of the angle between incident direction and
    ///                 half-vector.
    pub fn schlick_fresnel(&self, cos_theta: Float) -> Spectrum {
        self.rs + pow5(1.0 - cos_theta) * (Spectrum::ONE - self.rs)
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
        let abs_cos_theta_i = abs_cos_theta(wi);
        let abs_cos_theta_o = abs_cos_theta(wo);

        let diffuse = (28.0 / (23.0 * PI))
            * self.rd
            * (Spectrum::ONE - self.rs)
            * (1.0 - pow5(1.0 - 0.5 * abs_cos_theta_i))
            * (1.0 - pow5(1.0 - 0.5 * abs_cos_theta_o));

        let wh = *wi + *wo;
        if wh.is_zero() {
            return diffuse;
        }
        let wh = wh.normalize();

        let denom = 4.0 * wi.abs_dot(&wh) * max(abs_cos_theta_i, abs_cos_theta_o);
        if denom == 0.0 {
            return diffuse;
        }
        let specular = self.distribution.d(&wh) / denom * self.schlick_fresnel(wi.dot(&wh));

        diffuse + specular
    }

    /// Samples either the diffuse base or the glossy coating with equal
    /// probability.
    ///
    /// * `wo` - Outgoing direction.
    /// * `u`  - The 2D uniform random values.
    pub fn sample_f(&self, wo: &Vector3f, u: &Point2f) -> BxDFSample {
        let wi = if u[0] < 0.5 {
            // Cosine-sample the hemisphere, flipping the direction if necessary.
            let u = Point2f::new(min(2.0 * u[0], ONE_MINUS_EPSILON), u[1]);
            let mut wi = cosine_sample_hemisphere(&u);
            if wo.z < 0.0 {
                wi.z *= -1.0;
            }
            wi
        } else {
            // Sample microfacet orientation `wh` and reflected direction `wi`.
            let u = Point2f::new(min(2.0 * (u[0] - 0.5), ONE_MINUS_EPSILON), u[1]);
            let wh = self.distribution.sample_wh(wo, &u);
            let wi = reflect(wo, &wh);
            if !same_hemisphere(wo, &wi) {
                return BxDFSample::from(self.bxdf_type);
            }
            wi
        };

        let pdf = self.pdf(wo, &wi);
        BxDFSample::new(self.f(wo, &wi), pdf, wi, self.bxdf_type)
    }

    /// Evaluates the PDF as the average of the cosine-weighted and half-vector
    /// densities.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wi` - Incident direction.
    pub fn pdf(&self, wo: &Vector3f, wi: &Vector3f) -> Float {
        if !same_hemisphere(wo, wi) {
            return 0.0;
        }

        let wh = *wo + *wi;
        let pdf_wh = if wh.is_zero() {
            0.0
        } else {
            let wh = wh.normalize();
            let wo_dot_wh = wo.dot(&wh);
            if wo_dot_wh <= 0.0 {
                0.0
            } else {
                self.distribution.pdf(wo, &wh) / (4.0 * wo_dot_wh)
            }
        };

        0.5 * (abs_cos_theta(wi) * INV_PI + pdf_wh)
    }
}

/// Clamps a reflectance to [0, 1] and reports when it changes.
///
/// * `name` - Parameter name.
/// * `r`    - Reflectance.
fn clamp_reflectance(name: &str, r: Spectrum) -> Spectrum {
    let clamped = r.clamp(0.0, 1.0);
    if clamped != r {
        warn!("FresnelBlend {} {} clamped to {}", name, r, clamped);
    }
    clamped
}

impl fmt::Display for FresnelBlend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FresnelBlend {{ rd: {}, rs: {}, distribution: {:?} }}",
            self.rd, self.rs, self.distribution
        )
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
