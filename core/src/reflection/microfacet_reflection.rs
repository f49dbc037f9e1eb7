//! Microfacet Reflection

use super::*;
use crate::microfacet::*;
use bumpalo::Bump;

/// BRDF for modeling glossy surfaces using the Torrance-Sparrow microfacet
/// model.
#[derive(Copy, Clone, Debug)]
pub struct MicrofacetReflection<'arena> {
    /// BxDF type.
    bxdf_type: BxDFType,

    /// Reflectance spectrum which gives the fraction of incident light that
    /// is scattered.
    r: Spectrum,

    /// Microfacet distribution.
    distribution: MicrofacetDistribution,

    /// Fresnel interface for dielectrics and conductors.
    fresnel: &'arena Fresnel,
}

impl<'arena> MicrofacetReflection<'arena> {
    /// Create a new instance of `MicrofacetReflection`.
    ///
    /// * `r`            - Reflectance spectrum which gives the fraction of
    ///                    incident light that is scattered.
    /// * `fresnel`      - Fresnel interface for dielectrics and conductors.
    /// * `distribution` - Microfacet distribution.
    pub fn new(r: Spectrum, fresnel: &'arena Fresnel, distribution: MicrofacetDistribution) -> Self {
        Self {
            bxdf_type: BxDFType::BSDF_REFLECTION | BxDFType::BSDF_GLOSSY,
            r,
            distribution,
            fresnel,
        }
    }

    /// Allocate a new instance of `MicrofacetReflection`.
    ///
    /// * `arena`        - The arena for memory allocations.
    /// * `r`            - Reflectance spectrum.
    /// * `fresnel`      - Fresnel interface for dielectrics and conductors.
    /// * `distribution` - Microfacet distribution.
    pub fn alloc(
        arena: &'arena Bump,
        r: Spectrum,
        fresnel: &'arena Fresnel,
        distribution: MicrofacetDistribution,
    ) -> &'arena BxDF<'arena> {
        let model = arena.alloc(Self::new(r, fresnel, distribution));
        arena.alloc(BxDF::MicrofacetReflection(model))
    }

    /// Returns the BxDF type.
    pub fn get_type(&self) -> BxDFType {
        self.bxdf_type
    }

    /// Returns the geometric attenuation term that accounts for masking and
    /// shadowing by neighbouring microfacets. The result lies in [0, 1].
    ///
    /// * `wo` - Outgoing direction.
    /// * `wi` - Incident direction.
    /// * `wh` - Half-vector.
    pub fn g(wo: &Vector3f, wi: &Vector3f, wh: &Vector3f) -> Float {
        let n_dot_wh = abs_cos_theta(wh);
        let n_dot_wo = abs_cos_theta(wo);
        let n_dot_wi = abs_cos_theta(wi);
        let wo_dot_wh = wo.abs_dot(wh);
        if wo_dot_wh == 0.0 {
            return 0.0;
        }
        min(
            1.0,
            min(
                2.0 * n_dot_wh * n_dot_wo / wo_dot_wh,
                2.0 * n_dot_wh * n_dot_wi / wo_dot_wh,
            ),
        )
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
        let cos_theta_o = abs_cos_theta(wo);
        let cos_theta_i = abs_cos_theta(wi);

        // Handle degenerate cases for microfacet reflection.
        if cos_theta_i == 0.0 || cos_theta_o == 0.0 {
            return Spectrum::ZERO;
        }

        let wh = *wi + *wo;
        if wh.is_zero() {
            return Spectrum::ZERO;
        }
        let wh = wh.normalize();

        let f = self.fresnel.evaluate(wi.dot(&wh));
        self.r * self.distribution.d(&wh) * Self::g(wo, wi, &wh) * f
            / (4.0 * cos_theta_i * cos_theta_o)
    }

    /// Samples a half-vector from the distribution and reflects `wo` about it.
    ///
    /// * `wo` - Outgoing direction.
    /// * `u`  - The 2D uniform random values.
    pub fn sample_f(&self, wo: &Vector3f, u: &Point2f) -> BxDFSample {
        // Sample microfacet orientation `wh` and reflected direction `wi`.
        if wo.z == 0.0 {
            return BxDFSample::from(self.bxdf_type);
        }
        let wh = self.distribution.sample_wh(wo, u);
        let wi = reflect(wo, &wh);
        if !same_hemisphere(wo, &wi) {
            return BxDFSample::from(self.bxdf_type);
        }

        // Compute PDF of `wi` for microfacet reflection.
        let pdf = self.pdf_wh(wo, &wh);
        if pdf == 0.0 {
            return BxDFSample::from(self.bxdf_type);
        }
        BxDFSample::new(self.f(wo, &wi), pdf, wi, self.bxdf_type)
    }

    /// Evaluates the PDF for the sampling method.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wi` - Incident direction.
    pub fn pdf(&self, wo: &Vector3f, wi: &Vector3f) -> Float {
        if !same_hemisphere(wo, wi) {
            return 0.0;
        }
        let wh = *wo + *wi;
        if wh.is_zero() {
            return 0.0;
        }
        self.pdf_wh(wo, &wh.normalize())
    }

    /// Converts the half-vector density to a density over incident directions.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wh` - Half-vector.
    fn pdf_wh(&self, wo: &Vector3f, wh: &Vector3f) -> Float {
        let wo_dot_wh = wo.dot(wh);
        if wo_dot_wh <= 0.0 {
            0.0
        } else {
            self.distribution.pdf(wo, wh) / (4.0 * wo_dot_wh)
        }
    }
}

impl<'arena> fmt::Display for MicrofacetReflection<'arena> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MicrofacetReflection {{ r: {}, distribution: {:?}, fresnel: {} }}",
            self.r, self.distribution, self.fresnel
        )
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::*;
    use float_cmp::*;
    use proptest::prelude::*;

    fn blinn(exponent: Float) -> MicrofacetDistribution {
        MicrofacetDistribution::Blinn(BlinnDistribution::new(exponent))
    }

    #[test]
    fn degenerate_directions_are_zero() {
        let fresnel = Fresnel::NoOp;
        let bxdf = MicrofacetReflection::new(Spectrum::ONE, &fresnel, blinn(10.0));
        let up = Vector3f::new(0.0, 0.0, 1.0);
        let grazing = Vector3f::new(1.0, 0.0, 0.0);
        assert!(bxdf.f(&up, &grazing).is_black());
        assert!(bxdf.f(&grazing, &-grazing).is_black());
    }

    #[test]
    fn sample_matches_pdf() {
        let arena = Bump::new();
        let fresnel = FresnelDielectric::alloc(&arena, 1.5, 1.0);
        let dists = [
            blinn(25.0),
            MicrofacetDistribution::Anisotropic(AnisotropicDistribution::new(10.0, 80.0)),
        ];
        let wo = Vector3f::new(0.3, 0.2, 0.932738);
        let mut rng = RNG::new(17);
        for dist in dists {
            let bxdf = MicrofacetReflection::alloc(&arena, Spectrum::ONE, fresnel, dist);
            for _ in 0..200 {
                let u = Point2f::new(rng.uniform_float(), rng.uniform_float());
                let sample = bxdf.sample_f(&wo, &u);
                if sample.pdf > 0.0 {
                    assert!(same_hemisphere(&wo, &sample.wi));
                    let pdf = bxdf.pdf(&wo, &sample.wi);
                    assert!(
                        approx_eq!(f32, pdf, sample.pdf, epsilon = 1e-2 * sample.pdf),
                        "{} vs {}",
                        pdf,
                        sample.pdf
                    );
                }
            }
        }
    }

    #[test]
    fn white_furnace_does_not_gain_energy() {
        let arena = Bump::new();
        let bxdf = MicrofacetReflection::alloc(&arena, Spectrum::ONE, fresnel_noop_alloc(&arena), blinn(20.0));
        let mut rng = RNG::new(3);
        let u = stratified_sample_2d(&mut rng, 32, 32, true);
        let wo = Vector3f::new(0.0, 0.5, 0.866025);
        let rho = bxdf.rho_hd(&wo, &u);
        assert!(rho[0] <= 1.05, "rho {}", rho[0]);
        assert!(rho[0] > 0.5, "rho {}", rho[0]);
    }

    prop_hemisphere!(hemisphere);

    proptest! {
        #[test]
        fn reciprocity(wo in hemisphere(), wi in hemisphere()) {
            let fresnel = Fresnel::Dielectric(FresnelDielectric::new(1.5, 1.0));
            let bxdf = MicrofacetReflection::new(Spectrum::ONE, &fresnel, blinn(15.0));
            let a = bxdf.f(&wo, &wi)[0];
            let b = bxdf.f(&wi, &wo)[0];
            prop_assert!(approx_eq!(f32, a, b, epsilon = 1e-4 * max(1.0, a)));
        }

        #[test]
        fn opposite_hemispheres_are_zero(wo in hemisphere(), wi in hemisphere()) {
            let bxdf = MicrofacetReflection::new(Spectrum::ONE, &Fresnel::NoOp, blinn(15.0));
            let below = Vector3f::new(wi.x, wi.y, -wi.z);
            prop_assert_eq!(bxdf.pdf(&wo, &below), 0.0);
            prop_assert!(bxdf.f(&wo, &below).is_black());
        }

        #[test]
        fn attenuation_in_unit_interval(wo in hemisphere(), wi in hemisphere()) {
            let wh = (wo + wi).normalize();
            let g = MicrofacetReflection::g(&wo, &wi, &wh);
            prop_assert!((0.0..=1.0).contains(&g));
        }
    }
}
