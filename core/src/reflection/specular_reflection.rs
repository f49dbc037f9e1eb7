//! Specular Reflection

use super::*;
use bumpalo::Bump;

/// BRDF for physically plausible specular reflection using Fresnel interface.
#[derive(Copy, Clone, Debug)]
pub struct SpecularReflection<'arena> {
    /// BxDF type.
    bxdf_type: BxDFType,

    /// Fresnel interface for dielectrics and conductors.
    fresnel: &'arena Fresnel,

    /// Spectrum used to scale the reflected colour.
    r: Spectrum,
}

impl<'arena> SpecularReflection<'arena> {
    /// Create a new instance of `SpecularReflection`.
    ///
    /// * `r`       - Spectrum used to scale the reflected colour.
    /// * `fresnel` - Fresnel interface for dielectrics and conductors.
    pub fn new(r: Spectrum, fresnel: &'arena Fresnel) -> Self {
        Self {
            bxdf_type: BxDFType::BSDF_REFLECTION | BxDFType::BSDF_SPECULAR,
            fresnel,
            r,
        }
    }

    /// Allocate a new instance of `SpecularReflection`.
    ///
    /// * `arena`   - The arena for memory allocations.
    /// * `r`       - Spectrum used to scale the reflected colour.
    /// * `fresnel` - Fresnel interface for dielectrics and conductors.
    pub fn alloc(arena: &'arena Bump, r: Spectrum, fresnel: &'arena Fresnel) -> &'arena BxDF<'arena> {
        let model = arena.alloc(Self::new(r, fresnel));
        arena.alloc(BxDF::SpecularReflection(model))
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
        // No scattering is returned.
        Spectrum::ZERO
    }

    /// Returns the mirror direction and the reflected value.
    ///
    /// * `wo` - Outgoing direction.
    /// * `u`  - The 2D uniform random values.
    pub fn sample_f(&self, wo: &Vector3f, _u: &Point2f) -> BxDFSample {
        // Compute perfect specular reflection direction.
        let wi = reflect_z(wo);
        let c = abs_cos_theta(&wi);
        if c == 0.0 {
            return BxDFSample::from(self.bxdf_type);
        }
        let s = self.fresnel.evaluate(cos_theta(wo)) * self.r / c;
        BxDFSample::new(s, 1.0, wi, self.bxdf_type)
    }

    /// Delta distributions have no density for arbitrary direction pairs.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wi` - Incident direction.
    pub fn pdf(&self, _wo: &Vector3f, _wi: &Vector3f) -> Float {
        0.0
    }
}

impl<'arena> fmt::Display for SpecularReflection<'arena> {
    /// Formats the value using the given formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SpecularReflection {{ bxdf_type: {}, fresnel: {}, r: {} }}",
            self.bxdf_type, self.fresnel, self.r,
        )
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn mirror_of_normal_is_normal() {
        let arena = Bump::new();
        let bxdf = SpecularReflection::alloc(&arena, Spectrum::ONE, fresnel_noop_alloc(&arena));
        let wo = Vector3f::new(0.0, 0.0, 1.0);
        let sample = bxdf.sample_f(&wo, &Point2f::new(0.3, 0.7));
        assert_eq!(sample.wi, Vector3f::new(0.0, 0.0, 1.0));
        assert_eq!(sample.pdf, 1.0);
        assert_eq!(sample.f, Spectrum::ONE);
        assert!(sample.bxdf_type.is_specular());
    }

    #[test]
    fn glancing_direction_has_no_sample() {
        let arena = Bump::new();
        let bxdf = SpecularReflection::new(Spectrum::ONE, fresnel_noop_alloc(&arena));
        let sample = bxdf.sample_f(&Vector3f::new(1.0, 0.0, 0.0), &Point2f::zero());
        assert_eq!(sample.pdf, 0.0);
    }

    prop_hemisphere!(hemisphere);

    proptest! {
        #[test]
        fn delta_is_zero_everywhere(wo in hemisphere(), wi in hemisphere()) {
            let fresnel = Fresnel::Dielectric(FresnelDielectric::new(1.0, 1.5));
            let bxdf = SpecularReflection::new(Spectrum::ONE, &fresnel);
            prop_assert!(bxdf.f(&wo, &wi).is_black());
            prop_assert_eq!(bxdf.pdf(&wo, &wi), 0.0);
            prop_assert!(bxdf.f(&wo, &reflect_z(&wo)).is_black());
        }
    }
}
