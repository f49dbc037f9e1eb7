//! Measured isotropic BRDF from irregularly spaced samples.

use super::*;
use crate::kdtree::*;
use bumpalo::Bump;

/// Initial squared search radius for sample lookups.
pub const IRREGULAR_INITIAL_SEARCH_RADIUS_SQ: Float = 0.001;

/// The search radius stops growing once its square exceeds this.
pub const IRREGULAR_MAX_SEARCH_RADIUS_SQ: Float = 1.5;

/// Number of samples that ends the search early.
pub const IRREGULAR_MIN_SAMPLES: usize = 3;

/// A measured BRDF value at a direction pair remapped with `brdf_remap()`.
#[derive(Copy, Clone, Debug, Default)]
pub struct IrregIsotropicBRDFSample {
    /// Remapped direction pair.
    pub p: Point3f,

    /// Measured value.
    pub v: Spectrum,
}

impl IrregIsotropicBRDFSample {
    /// Create a new sample.
    ///
    /// * `p` - Remapped direction pair.
    /// * `v` - Measured value.
    pub fn new(p: Point3f, v: Spectrum) -> Self {
        Self { p, v }
    }
}

impl KdTreeData for IrregIsotropicBRDFSample {
    fn p(&self) -> Point3f {
        self.p
    }
}

/// Maps a pair of directions to a point whose distance to other points is a
/// useful similarity measure for isotropic BRDFs. Only the difference in
/// azimuth matters and swapping the directions gives the same point.
///
/// * `wo` - Outgoing direction.
/// * `wi` - Incident direction.
pub fn brdf_remap(wo: &Vector3f, wi: &Vector3f) -> Point3f {
    let cos_i = cos_theta(wi);
    let sin_i = sin_theta(wi);
    let cos_o = cos_theta(wo);
    let sin_o = sin_theta(wo);
    let phi_i = spherical_phi(wi);
    let phi_o = spherical_phi(wo);

    let mut d_phi = phi_i - phi_o;
    if d_phi < 0.0 {
        d_phi += TWO_PI;
    }
    if d_phi > TWO_PI {
        d_phi -= TWO_PI;
    }
    if d_phi > PI {
        d_phi = TWO_PI - d_phi;
    }

    Point3f::new(sin_i * sin_o, d_phi * INV_PI, cos_i * cos_o)
}

/// BRDF that interpolates between nearby measured samples.
#[derive(Copy, Clone, Debug)]
pub struct IrregIsotropicBRDF<'arena> {
    /// BxDF type.
    bxdf_type: BxDFType,

    /// The measured samples.
    data: &'arena KdTree<IrregIsotropicBRDFSample>,
}

impl<'arena> IrregIsotropicBRDF<'arena> {
    /// Create a new instance of `IrregIsotropicBRDF`.
    ///
    /// * `data` - The measured samples.
    pub fn new(data: &'arena KdTree<IrregIsotropicBRDFSample>) -> Self {
        Self {
            bxdf_type: BxDFType::BSDF_REFLECTION | BxDFType::BSDF_GLOSSY,
            data,
        }
    }

    /// Allocate a new instance of `IrregIsotropicBRDF`.
    ///
    /// * `arena` - The arena for memory allocations.
    /// * `data`  - The measured samples.
    pub fn alloc(
        arena: &'arena Bump,
        data: &'arena KdTree<IrregIsotropicBRDFSample>,
    ) -> &'arena BxDF<'arena> {
        let model = arena.alloc(Self::new(data));
        arena.alloc(BxDF::IrregIsotropicBRDF(model))
    }

    /// Returns the BxDF type.
    pub fn get_type(&self) -> BxDFType {
        self.bxdf_type
    }

    /// Returns the weighted average of measured values near the remapped
    /// direction pair, widening the search until enough samples are found.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wi` - Incident direction.
    pub fn f(&self, wo: &Vector3f, wi: &Vector3f) -> Spectrum {
        if !same_hemisphere(wo, wi) {
            return Spectrum::ZERO;
        }
        let m = brdf_remap(wo, wi);
        let mut max_dist_sq = IRREGULAR_INITIAL_SEARCH_RADIUS_SQ;

        loop {
            let mut v = Spectrum::ZERO;
            let mut sum_weights = 0.0;
            let mut n_found = 0;

            self.data.lookup(&m, max_dist_sq, |_p, sample, d2, _max_d2| {
                let weight = (-100.0 * d2).exp();
                v += weight * sample.v;
                sum_weights += weight;
                n_found += 1;
            });

            if n_found >= IRREGULAR_MIN_SAMPLES || max_dist_sq > IRREGULAR_MAX_SEARCH_RADIUS_SQ {
                if n_found == 0 || sum_weights == 0.0 {
                    debug!("No measured samples found near {}", m);
                    return Spectrum::ZERO;
                }
                return v.clamp_default() / sum_weights;
            }

            max_dist_sq *= 2.0;
            debug!(
                "Found {} measured samples; widening search to {}",
                n_found, max_dist_sq
            );
        }
    }
}

impl<'arena> fmt::Display for IrregIsotropicBRDF<'arena> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IrregIsotropicBRDF {{ samples: {} }}", self.data.len())
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

    /// Samples a diffuse-looking BRDF over a grid of direction pairs.
    fn grid(value: Float) -> KdTree<IrregIsotropicBRDFSample> {
        let n = 8;
        let mut samples = vec![];
        for i in 0..n {
            for o in 0..n {
                for p in 0..n {
                    let theta_i = (i as Float + 0.5) / n as Float * PI_OVER_TWO;
                    let theta_o = (o as Float + 0.5) / n as Float * PI_OVER_TWO;
                    let phi = (p as Float + 0.5) / n as Float * TWO_PI;
                    let wi = spherical_direction(theta_i.sin(), theta_i.cos(), phi);
                    let wo = spherical_direction(theta_o.sin(), theta_o.cos(), 0.0);
                    samples.push(IrregIsotropicBRDFSample::new(
                        brdf_remap(&wo, &wi),
                        Spectrum::new(value),
                    ));
                }
            }
        }
        KdTree::new(samples)
    }

    #[test]
    fn constant_data_is_reproduced() {
        let data = grid(0.25);
        let brdf = IrregIsotropicBRDF::new(&data);
        let wo = Vector3f::new(0.0, 0.6, 0.8);
        let wi = Vector3f::new(0.48, 0.64, 0.6);
        let f = brdf.f(&wo, &wi);
        assert!(approx_eq!(f32, f[0], 0.25, epsilon = 1e-4));
    }

    #[test]
    fn empty_data_is_zero() {
        let data = KdTree::new(vec![]);
        let brdf = IrregIsotropicBRDF::new(&data);
        let up = Vector3f::new(0.0, 0.0, 1.0);
        assert!(brdf.f(&up, &up).is_black());
    }

    #[test]
    fn sparse_data_widens_search() {
        let data = KdTree::new(vec![IrregIsotropicBRDFSample::new(
            Point3f::new(0.5, 0.5, 0.5),
            Spectrum::new(0.7),
        )]);
        let brdf = IrregIsotropicBRDF::new(&data);
        let up = Vector3f::new(0.0, 0.0, 1.0);
        let f = brdf.f(&up, &up);
        assert!(approx_eq!(f32, f[0], 0.7, epsilon = 1e-5));
    }

    prop_hemisphere!(hemisphere);

    proptest! {
        #[test]
        fn remap_is_reciprocal(wo in hemisphere(), wi in hemisphere()) {
            let a = brdf_remap(&wo, &wi);
            let b = brdf_remap(&wi, &wo);
            prop_assert!(approx_eq!(f32, a.x, b.x, epsilon = 1e-5));
            prop_assert!(approx_eq!(f32, a.y, b.y, epsilon = 1e-4));
            prop_assert!(approx_eq!(f32, a.z, b.z, epsilon = 1e-5));
        }

        #[test]
        fn remap_is_isotropic(
            theta_o in 0.1..1.4f32,
            theta_i in 0.1..1.4f32,
            phi_o in 0.0..TWO_PI,
            d_phi in 0.0..TWO_PI,
            rotation in 0.0..TWO_PI,
        ) {
            let dir = |theta: Float, phi: Float| spherical_direction(theta.sin(), theta.cos(), phi);
            let a = brdf_remap(&dir(theta_o, phi_o), &dir(theta_i, phi_o + d_phi));
            let b = brdf_remap(
                &dir(theta_o, phi_o + rotation),
                &dir(theta_i, phi_o + d_phi + rotation),
            );
            prop_assert!(approx_eq!(f32, a.x, b.x, epsilon = 1e-4));
            prop_assert!(approx_eq!(f32, a.y, b.y, epsilon = 1e-3));
            prop_assert!(approx_eq!(f32, a.z, b.z, epsilon = 1e-4));
            prop_assert!((0.0..=1.0).contains(&a.y));
        }
    }
}
