//! Reflection and surface scattering models

use crate::geometry::*;
use crate::pbrt::*;
use crate::sampling::*;
use crate::spectrum::*;
use std::fmt;

mod brdf_to_btdf;
mod bsdf;
mod bsdf_sample;
mod bxdf_sample;
mod bxdf_type;
mod common;
mod fresnel;
mod fresnel_blend;
mod irregular_isotropic;
mod lambertian_reflection;
mod microfacet_reflection;
mod oren_nayar;
mod regular_halfangle;
mod scaled_bxdf;
mod specular_reflection;
mod specular_transmission;

// Re-export
pub use brdf_to_btdf::*;
pub use bsdf::*;
pub use bsdf_sample::*;
pub use bxdf_sample::*;
pub use bxdf_type::*;
pub use common::*;
pub use fresnel::*;
pub use fresnel_blend::*;
pub use irregular_isotropic::*;
pub use lambertian_reflection::*;
pub use microfacet_reflection::*;
pub use oren_nayar::*;
pub use regular_halfangle::*;
pub use scaled_bxdf::*;
pub use specular_reflection::*;
pub use specular_transmission::*;

/// BxDF for BRDFs and BTDFs.
///
/// The models are enumerated directly and allocated in the same memory arena
/// as the `BSDF` that holds them, so dispatch is a `match` and adapters can
/// wrap other BxDFs by shared reference.
#[derive(Copy, Clone, Debug)]
pub enum BxDF<'arena> {
    BRDFToBTDF(&'arena BRDFToBTDF<'arena>),
    FresnelBlend(&'arena FresnelBlend),
    IrregIsotropicBRDF(&'arena IrregIsotropicBRDF<'arena>),
    LambertianReflection(&'arena LambertianReflection),
    MicrofacetReflection(&'arena MicrofacetReflection<'arena>),
    OrenNayar(&'arena OrenNayar),
    RegularHalfangleBRDF(&'arena RegularHalfangleBRDF<'arena>),
    ScaledBxDF(&'arena ScaledBxDF<'arena>),
    SpecularReflection(&'arena SpecularReflection<'arena>),
    SpecularTransmission(&'arena SpecularTransmission),
}

impl<'arena> BxDF<'arena> {
    /// Returns the BxDF type.
    pub fn get_type(&self) -> BxDFType {
        match self {
            BxDF::BRDFToBTDF(bxdf) => bxdf.get_type(),
            BxDF::FresnelBlend(bxdf) => bxdf.get_type(),
            BxDF::IrregIsotropicBRDF(bxdf) => bxdf.get_type(),
            BxDF::LambertianReflection(bxdf) => bxdf.get_type(),
            BxDF::MicrofacetReflection(bxdf) => bxdf.get_type(),
            BxDF::OrenNayar(bxdf) => bxdf.get_type(),
            BxDF::RegularHalfangleBRDF(bxdf) => bxdf.get_type(),
            BxDF::ScaledBxDF(bxdf) => bxdf.get_type(),
            BxDF::SpecularReflection(bxdf) => bxdf.get_type(),
            BxDF::SpecularTransmission(bxdf) => bxdf.get_type(),
        }
    }

    /// Returns true if the reflection models match.
    ///
    /// * `t` - The reflection model to compare.
    pub fn matches_flags(&self, t: BxDFType) -> bool {
        let bxdf_type = self.get_type();
        bxdf_type & t == bxdf_type
    }

    /// Returns the value of the distribution function for the given pair of
    /// directions.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wi` - Incident direction.
    pub fn f(&self, wo: &Vector3f, wi: &Vector3f) -> Spectrum {
        match self {
            BxDF::BRDFToBTDF(bxdf) => bxdf.f(wo, wi),
            BxDF::FresnelBlend(bxdf) => bxdf.f(wo, wi),
            BxDF::IrregIsotropicBRDF(bxdf) => bxdf.f(wo, wi),
            BxDF::LambertianReflection(bxdf) => bxdf.f(wo, wi),
            BxDF::MicrofacetReflection(bxdf) => bxdf.f(wo, wi),
            BxDF::OrenNayar(bxdf) => bxdf.f(wo, wi),
            BxDF::RegularHalfangleBRDF(bxdf) => bxdf.f(wo, wi),
            BxDF::ScaledBxDF(bxdf) => bxdf.f(wo, wi),
            BxDF::SpecularReflection(bxdf) => bxdf.f(wo, wi),
            BxDF::SpecularTransmission(bxdf) => bxdf.f(wo, wi),
        }
    }

    /// Samples an incident direction for the given outgoing direction and
    /// returns the value of the BxDF for the pair.
    ///
    /// * `wo` - Outgoing direction.
    /// * `u`  - The 2D uniform random values.
    pub fn sample_f(&self, wo: &Vector3f, u: &Point2f) -> BxDFSample {
        match self {
            BxDF::BRDFToBTDF(bxdf) => bxdf.sample_f(wo, u),
            BxDF::FresnelBlend(bxdf) => bxdf.sample_f(wo, u),
            BxDF::MicrofacetReflection(bxdf) => bxdf.sample_f(wo, u),
            BxDF::ScaledBxDF(bxdf) => bxdf.sample_f(wo, u),
            BxDF::SpecularReflection(bxdf) => bxdf.sample_f(wo, u),
            BxDF::SpecularTransmission(bxdf) => bxdf.sample_f(wo, u),
            _ => {
                // Cosine-sample the hemisphere, flipping the direction if necessary.
                let mut wi = cosine_sample_hemisphere(u);
                if wo.z < 0.0 {
                    wi.z *= -1.0;
                }
                let pdf = self.pdf(wo, &wi);
                BxDFSample::new(self.f(wo, &wi), pdf, wi, self.get_type())
            }
        }
    }

    /// Evaluates the PDF for the sampling method. Default is based on the
    /// cosine-weighted sampling in `BxDF::sample_f()` default implementation.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wi` - Incident direction.
    pub fn pdf(&self, wo: &Vector3f, wi: &Vector3f) -> Float {
        match self {
            BxDF::BRDFToBTDF(bxdf) => bxdf.pdf(wo, wi),
            BxDF::FresnelBlend(bxdf) => bxdf.pdf(wo, wi),
            BxDF::MicrofacetReflection(bxdf) => bxdf.pdf(wo, wi),
            BxDF::ScaledBxDF(bxdf) => bxdf.pdf(wo, wi),
            BxDF::SpecularReflection(bxdf) => bxdf.pdf(wo, wi),
            BxDF::SpecularTransmission(bxdf) => bxdf.pdf(wo, wi),
            _ => {
                if same_hemisphere(wo, wi) {
                    abs_cos_theta(wi) * INV_PI
                } else {
                    0.0
                }
            }
        }
    }

    /// Computes the hemispherical-directional reflectance function ρ.
    ///
    /// * `wo` - Outgoing direction.
    /// * `u`  - Samples used by Monte Carlo algorithm.
    pub fn rho_hd(&self, wo: &Vector3f, u: &[Point2f]) -> Spectrum {
        match self {
            BxDF::BRDFToBTDF(bxdf) => bxdf.rho_hd(wo, u),
            BxDF::LambertianReflection(bxdf) => bxdf.rho_hd(wo, u),
            BxDF::ScaledBxDF(bxdf) => bxdf.rho_hd(wo, u),
            _ => self.estimate_rho_hd(wo, u),
        }
    }

    /// Computes the hemispherical-hemispherical reflectance function ρ.
    ///
    /// * `u1` - Samples used by Monte Carlo algorithm.
    /// * `u2` - Samples used by Monte Carlo algorithm.
    pub fn rho_hh(&self, u1: &[Point2f], u2: &[Point2f]) -> Spectrum {
        match self {
            BxDF::BRDFToBTDF(bxdf) => bxdf.rho_hh(u1, u2),
            BxDF::LambertianReflection(bxdf) => bxdf.rho_hh(u1, u2),
            BxDF::ScaledBxDF(bxdf) => bxdf.rho_hh(u1, u2),
            _ => self.estimate_rho_hh(u1, u2),
        }
    }

    /// Monte Carlo estimate of the hemispherical-directional reflectance
    /// using the BxDF's own sampling method.
    ///
    /// * `wo` - Outgoing direction.
    /// * `u`  - Samples used by Monte Carlo algorithm.
    pub fn estimate_rho_hd(&self, wo: &Vector3f, u: &[Point2f]) -> Spectrum {
        if u.is_empty() {
            return Spectrum::ZERO;
        }

        let mut r = Spectrum::ZERO;
        for s in u {
            // Estimate one term of `rho_hd`.
            let sample = self.sample_f(wo, s);
            if sample.pdf > 0.0 {
                r += sample.f * abs_cos_theta(&sample.wi) / sample.pdf;
            }
        }
        r / u.len() as Float
    }

    /// Monte Carlo estimate of the hemispherical-hemispherical reflectance
    /// with outgoing directions sampled uniformly over the hemisphere.
    ///
    /// * `u1` - Samples for outgoing directions.
    /// * `u2` - Samples for incident directions.
    pub fn estimate_rho_hh(&self, u1: &[Point2f], u2: &[Point2f]) -> Spectrum {
        assert!(u1.len() == u2.len());
        if u1.is_empty() {
            return Spectrum::ZERO;
        }

        let mut r = Spectrum::ZERO;
        for (s1, s2) in u1.iter().zip(u2.iter()) {
            // Estimate one term of `rho_hh`.
            let wo = uniform_sample_hemisphere(s1);
            let pdfo = uniform_hemisphere_pdf();
            let sample = self.sample_f(&wo, s2);
            let pdfi = sample.pdf;
            if pdfi > 0.0 {
                r += sample.f * abs_cos_theta(&sample.wi) * abs_cos_theta(&wo) / (pdfo * pdfi);
            }
        }
        r / (PI * u1.len() as Float)
    }
}

impl<'arena> fmt::Display for BxDF<'arena> {
    /// Formats the value using the given formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BxDF::BRDFToBTDF(bxdf) => write!(f, "BxDF {{ {} }}", bxdf),
            BxDF::FresnelBlend(bxdf) => write!(f, "BxDF {{ {} }}", bxdf),
            BxDF::IrregIsotropicBRDF(bxdf) => write!(f, "BxDF {{ {} }}", bxdf),
            BxDF::LambertianReflection(bxdf) => write!(f, "BxDF {{ {} }}", bxdf),
            BxDF::MicrofacetReflection(bxdf) => write!(f, "BxDF {{ {} }}", bxdf),
            BxDF::OrenNayar(bxdf) => write!(f, "BxDF {{ {} }}", bxdf),
            BxDF::RegularHalfangleBRDF(bxdf) => write!(f, "BxDF {{ {} }}", bxdf),
            BxDF::ScaledBxDF(bxdf) => write!(f, "BxDF {{ {} }}", bxdf),
            BxDF::SpecularReflection(bxdf) => write!(f, "BxDF {{ {} }}", bxdf),
            BxDF::SpecularTransmission(bxdf) => write!(f, "BxDF {{ {} }}", bxdf),
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kdtree::*;
    use crate::material::TransportMode;
    use crate::microfacet::*;
    use crate::rng::*;
    use bumpalo::Bump;
    use float_cmp::*;

    /// Allocates one of each non-delta model.
    fn non_delta_models(arena: &Bump) -> Vec<&BxDF> {
        let r = Spectrum::from_rgb(&[0.8, 0.5, 0.2]);
        let blinn = MicrofacetDistribution::Blinn(BlinnDistribution::new(30.0));
        let lambert = LambertianReflection::alloc(arena, r);
        vec![
            lambert,
            OrenNayar::alloc(arena, r, 25.0),
            MicrofacetReflection::alloc(arena, r, FresnelDielectric::alloc(arena, 1.5, 1.0), blinn),
            FresnelBlend::alloc(
                arena,
                r,
                Spectrum::new(0.05),
                MicrofacetDistribution::Anisotropic(AnisotropicDistribution::new(10.0, 100.0)),
            ),
            ScaledBxDF::alloc(arena, lambert, Spectrum::new(0.5)),
            BRDFToBTDF::alloc(arena, lambert),
        ]
    }

    #[test]
    fn matches_flags_requires_every_bit() {
        let arena = Bump::new();
        let lambert = LambertianReflection::alloc(&arena, Spectrum::ONE);
        assert!(lambert.matches_flags(BxDFType::BSDF_ALL));
        assert!(lambert.matches_flags(BxDFType::BSDF_ALL_REFLECTION));
        assert!(!lambert.matches_flags(BxDFType::BSDF_ALL_TRANSMISSION));
        assert!(!lambert.matches_flags(BxDFType::BSDF_REFLECTION | BxDFType::BSDF_GLOSSY));
    }

    #[test]
    fn every_model_has_one_flag_per_axis() {
        let arena = Bump::new();
        let mut models = non_delta_models(&arena);
        models.push(SpecularReflection::alloc(&arena, Spectrum::ONE, fresnel_noop_alloc(&arena)));
        models.push(SpecularTransmission::alloc(
            &arena,
            Spectrum::ONE,
            1.0,
            1.5,
            TransportMode::Radiance,
        ));
        for m in models {
            let t = m.get_type();
            let direction = t & (BxDFType::BSDF_REFLECTION | BxDFType::BSDF_TRANSMISSION);
            let sharpness = t & BxDFType::BSDF_ALL_TYPES;
            assert_eq!(direction.bits().count_ones(), 1, "{}", m);
            assert_eq!(sharpness.bits().count_ones(), 1, "{}", m);
        }
    }

    #[test]
    fn sampled_density_matches_pdf() {
        let arena = Bump::new();
        let mut rng = RNG::new(42);
        let wo = Vector3f::new(0.2, -0.4, 0.894427);
        for m in non_delta_models(&arena) {
            for _ in 0..100 {
                let u = Point2f::new(rng.uniform_float(), rng.uniform_float());
                let sample = m.sample_f(&wo, &u);
                if sample.pdf > 0.0 {
                    let pdf = m.pdf(&wo, &sample.wi);
                    assert!(pdf.is_finite() && pdf >= 0.0);
                    assert!(
                        approx_eq!(f32, pdf, sample.pdf, epsilon = 1e-2 * sample.pdf),
                        "{}: {} vs {}",
                        m,
                        pdf,
                        sample.pdf
                    );
                }
            }
        }
    }

    #[test]
    fn reflection_models_are_zero_across_hemispheres() {
        let arena = Bump::new();
        let wo = Vector3f::new(0.0, 0.6, 0.8);
        let wi = Vector3f::new(0.6, 0.0, -0.8);
        let wr = Vector3f::new(wi.x, wi.y, -wi.z);
        for m in non_delta_models(&arena) {
            let across = if m.get_type().contains(BxDFType::BSDF_REFLECTION) { wi } else { wr };
            assert_eq!(m.pdf(&wo, &across), 0.0, "{}", m);
        }

        // Every model except the constant Lambertian has a hemisphere rule.
        let samples = KdTree::new(vec![IrregIsotropicBRDFSample::new(
            Point3f::new(0.5, 0.5, 0.5),
            Spectrum::new(0.7),
        )]);
        let table = RegularHalfangleTable::new(2, 2, 2, vec![0.3; 24]).unwrap();
        let r = Spectrum::new(0.5);
        let glossy = MicrofacetReflection::alloc(
            &arena,
            r,
            FresnelDielectric::alloc(&arena, 1.5, 1.0),
            MicrofacetDistribution::Blinn(BlinnDistribution::new(30.0)),
        );
        let models = [
            OrenNayar::alloc(&arena, r, 20.0),
            glossy,
            FresnelBlend::alloc(
                &arena,
                r,
                Spectrum::new(0.05),
                MicrofacetDistribution::Blinn(BlinnDistribution::new(5.0)),
            ),
            IrregIsotropicBRDF::alloc(&arena, &samples),
            RegularHalfangleBRDF::alloc(&arena, &table),
            ScaledBxDF::alloc(&arena, glossy, Spectrum::new(0.5)),
        ];
        for m in models {
            assert!(!m.f(&wo, &wr).is_black(), "{}", m);
            assert!(m.f(&wo, &wi).is_black(), "{}", m);
        }

        let transmission = BRDFToBTDF::alloc(&arena, glossy);
        assert!(!transmission.f(&wo, &wi).is_black());
        assert!(transmission.f(&wo, &wr).is_black());
    }

    #[test]
    fn estimators_agree_with_closed_form() {
        let arena = Bump::new();
        let lambert = LambertianReflection::alloc(&arena, Spectrum::new(0.5));
        let mut rng = RNG::new(8);
        let u1 = stratified_sample_2d(&mut rng, 16, 16, true);
        let u2 = stratified_sample_2d(&mut rng, 16, 16, true);
        let closed = lambert.rho_hh(&u1, &u2);
        let estimate = lambert.estimate_rho_hh(&u1, &u2);
        assert!(approx_eq!(f32, closed[0], estimate[0], epsilon = 0.02));
    }
}
