//! BSDF

use super::*;
use crate::error::*;
use crate::interaction::*;
use crate::rng::*;
use bumpalo::Bump;

/// Maximum number of BxDFs that can be stored in `BSDF`.
pub const MAX_BXDFS: usize = 8;

/// Default number of stratified samples per axis used by `rho_hd_rng()` and
/// `rho_hh_rng()`.
pub const DEFAULT_RHO_SQRT_SAMPLES: usize = 6;

/// BSDF interface represents a collection of BRDFs and BTDFs.
pub struct BSDF<'arena> {
    /// The shading normal given by per-vertex normals and/or bump mapping.
    /// It is the first axis in the orthonormal coordinate system and also
    /// used to define hemispheres for integrating incident illumincation for
    /// surface reflection.
    pub ns: Normal3f,

    /// The geometric normal defined by surface geometry.
    pub ng: Normal3f,

    /// Second axis for the orthonormal coordinate system.
    pub ss: Vector3f,

    /// Third axis for the orthonormal coordinate system.
    pub ts: Vector3f,

    /// Relative index of refraction over the surface boundary.
    pub eta: Float,

    /// Number of `BxDF`s added so far.
    n_bxdfs: usize,

    /// The `BxDF`s in evaluation order.
    bxdfs: [Option<&'arena BxDF<'arena>>; MAX_BXDFS],
}

impl<'arena> BSDF<'arena> {
    /// Creates a new `BSDF` with no `BxDF`s.
    ///
    /// * `hit`     - The true geometry at the point on a surface.
    /// * `shading` - The shading geometry at the point on a surface.
    /// * `eta`     - Optional relative index of refraction over the surface
    ///               boundary. If not provided, defaults to 1.0; used for
    ///               opaque surfaces.
    pub fn new(hit: &Hit, shading: &Shading, eta: Option<Float>) -> Self {
        let eta = eta.unwrap_or(1.0);
        let ns = shading.n;
        let ss = shading.dpdu.normalize();

        Self {
            eta,
            ns,
            ng: hit.n,
            ss,
            ts: Vector3::from(ns).cross(&ss),
            n_bxdfs: 0,
            bxdfs: [None; MAX_BXDFS],
        }
    }

    /// Allocates a new `BSDF` with no `BxDF`s.
    ///
    /// * `arena`   - The arena for memory allocations.
    /// * `hit`     - The true geometry at the point on a surface.
    /// * `shading` - The shading geometry at the point on a surface.
    /// * `eta`     - Optional relative index of refraction over the surface
    ///               boundary.
    #[allow(clippy::mut_from_ref)]
    pub fn alloc(
        arena: &'arena Bump,
        hit: &Hit,
        shading: &Shading,
        eta: Option<Float>,
    ) -> &'arena mut BSDF<'arena> {
        arena.alloc(Self::new(hit, shading, eta))
    }

    /// Add a `BxDF`. Panics if `MAX_BXDFS` have already been added.
    ///
    /// * `bxdf` - The `BxDF`.
    pub fn add(&mut self, bxdf: &'arena BxDF<'arena>) {
        assert!(
            self.n_bxdfs < MAX_BXDFS,
            "Cannot add BxDFs. BSDF maximum limit {} reached.",
            MAX_BXDFS
        );
        self.bxdfs[self.n_bxdfs] = Some(bxdf);
        self.n_bxdfs += 1;
    }

    /// Add a `BxDF` or return an error if `MAX_BXDFS` have already been added.
    ///
    /// * `bxdf` - The `BxDF`.
    pub fn try_add(&mut self, bxdf: &'arena BxDF<'arena>) -> Result<()> {
        if self.n_bxdfs >= MAX_BXDFS {
            return Err(ScatterError::CapacityExceeded { max: MAX_BXDFS });
        }
        self.add(bxdf);
        Ok(())
    }

    /// Returns an iterator over the `BxDF`s in the order they were added.
    pub fn bxdfs(&self) -> impl Iterator<Item = &'arena BxDF<'arena>> + '_ {
        self.bxdfs[..self.n_bxdfs].iter().flatten().copied()
    }

    /// Returns an iterator over the `BxDF`s that match the given type.
    ///
    /// * `bxdf_type` - The `BxDFType` to match.
    fn matching(&self, bxdf_type: BxDFType) -> impl Iterator<Item = &'arena BxDF<'arena>> + '_ {
        self.bxdfs().filter(move |b| b.matches_flags(bxdf_type))
    }

    /// Returns the number of `BxDF`s that match the given type.
    ///
    /// * `bxdf_type` - The `BxDFType` to match (use `BSDF_ALL` for every one).
    pub fn num_components(&self, bxdf_type: BxDFType) -> usize {
        self.matching(bxdf_type).count()
    }

    /// Transforms a vector from world space to local space.
    ///
    /// * `v` - The vector to transform.
    pub fn world_to_local(&self, v: &Vector3f) -> Vector3f {
        Vector3f::new(v.dot(&self.ss), v.dot(&self.ts), v.dot(&self.ns))
    }

    /// Transforms a vector from local space to world space.
    ///
    /// * `v` - The vector to transform.
    pub fn local_to_world(&self, v: &Vector3f) -> Vector3f {
        Vector3f::new(
            self.ss.x * v.x + self.ts.x * v.y + self.ns.x * v.z,
            self.ss.y * v.x + self.ts.y * v.y + self.ns.y * v.z,
            self.ss.z * v.x + self.ts.z * v.y + self.ns.z * v.z,
        )
    }

    /// Sums the values of the matching `BxDF`s whose reflection or
    /// transmission flag agrees with the hemisphere relation of the pair.
    ///
    /// * `wo`        - Outgoing direction in local space.
    /// * `wi`        - Incident direction in local space.
    /// * `reflect`   - True if both directions lie on the same side of the
    ///                 geometric normal.
    /// * `bxdf_type` - The `BxDFType` to evaluate.
    fn f_local(&self, wo: &Vector3f, wi: &Vector3f, reflect: bool, bxdf_type: BxDFType) -> Spectrum {
        let side = if reflect {
            BxDFType::BSDF_REFLECTION
        } else {
            BxDFType::BSDF_TRANSMISSION
        };

        let mut f = Spectrum::ZERO;
        for bxdf in self.matching(bxdf_type) {
            if bxdf.get_type().contains(side) {
                f += bxdf.f(wo, wi);
            }
        }
        f
    }

    /// Returns the BSDF evaluated for a pair of directions.
    ///
    /// * `wo_w`      - Outgoing direction in world-space.
    /// * `wi_w`      - Incident direction in world-space.
    /// * `bxdf_type` - The `BxDFType` to evaluate.
    pub fn f(&self, wo_w: &Vector3f, wi_w: &Vector3f, bxdf_type: BxDFType) -> Spectrum {
        let wi = self.world_to_local(wi_w);
        let wo = self.world_to_local(wo_w);
        if wo.z == 0.0 {
            return Spectrum::ZERO;
        }

        // Use the geometric normal to avoid light leaks through the surface.
        let reflect = wi_w.dot(&self.ng) * wo_w.dot(&self.ng) > 0.0;
        self.f_local(&wo, &wi, reflect, bxdf_type)
    }

    /// Samples an incident direction from one of the matching `BxDF`s and
    /// returns the value of the BSDF for it.
    ///
    /// * `wo_w`      - Outgoing direction in world-space.
    /// * `u`         - The sample numbers.
    /// * `bxdf_type` - The `BxDFType` to sample.
    pub fn sample_f(&self, wo_w: &Vector3f, u: &BSDFSample, bxdf_type: BxDFType) -> BxDFSample {
        // Choose which `BxDF` to sample.
        let matching_comps = self.num_components(bxdf_type);
        if matching_comps == 0 {
            debug!("No BxDF matches {}", bxdf_type);
            return BxDFSample::from(BxDFType::empty());
        }
        let which = min(
            (u.u_component() * matching_comps as Float).floor() as usize,
            matching_comps - 1,
        );
        let bxdf = match self.matching(bxdf_type).nth(which) {
            Some(bxdf) => bxdf,
            None => return BxDFSample::from(BxDFType::empty()),
        };
        let sampled_type = bxdf.get_type();

        // Sample chosen `BxDF`.
        let wo = self.world_to_local(wo_w);
        if wo.z == 0.0 {
            return BxDFSample::from(sampled_type);
        }
        let sample = bxdf.sample_f(&wo, &u.u_dir());
        if sample.pdf == 0.0 {
            debug!("Sampled {} with zero density", sampled_type);
            return BxDFSample::from(sampled_type);
        }
        let wi_w = self.local_to_world(&sample.wi);

        // Compute overall PDF with all matching BxDFs.
        let is_specular = sampled_type.is_specular();
        let mut pdf = sample.pdf;
        if !is_specular && matching_comps > 1 {
            for (i, b) in self.matching(bxdf_type).enumerate() {
                if i != which {
                    pdf += b.pdf(&wo, &sample.wi);
                }
            }
        }
        if matching_comps > 1 {
            pdf /= matching_comps as Float;
        }

        // Compute value of BSDF for sampled direction.
        let f = if is_specular {
            sample.f
        } else {
            let reflect = wi_w.dot(&self.ng) * wo_w.dot(&self.ng) > 0.0;
            self.f_local(&wo, &sample.wi, reflect, bxdf_type)
        };

        BxDFSample::new(f, pdf, wi_w, sampled_type)
    }

    /// Evaluates the PDF of `sample_f()` as the average density of the
    /// matching `BxDF`s.
    ///
    /// * `wo_w`      - Outgoing direction in world-space.
    /// * `wi_w`      - Incident direction in world-space.
    /// * `bxdf_type` - The `BxDFType` to evaluate.
    pub fn pdf(&self, wo_w: &Vector3f, wi_w: &Vector3f, bxdf_type: BxDFType) -> Float {
        if self.n_bxdfs == 0 {
            return 0.0;
        }

        let wo = self.world_to_local(wo_w);
        let wi = self.world_to_local(wi_w);
        if wo.z == 0.0 {
            return 0.0;
        }

        let mut matching_comps = 0;
        let mut pdf = 0.0;
        for bxdf in self.matching(bxdf_type) {
            matching_comps += 1;
            pdf += bxdf.pdf(&wo, &wi);
        }
        if matching_comps > 0 {
            pdf / matching_comps as Float
        } else {
            0.0
        }
    }

    /// Computes the hemispherical-directional reflectance function ρ.
    ///
    /// * `wo_w`      - Outgoing direction in world-space.
    /// * `u`         - Samples used by Monte Carlo algorithm.
    /// * `bxdf_type` - The `BxDFType` to evaluate.
    pub fn rho_hd(&self, wo_w: &Vector3f, u: &[Point2f], bxdf_type: BxDFType) -> Spectrum {
        let wo = self.world_to_local(wo_w);

        let mut r = Spectrum::ZERO;
        for bxdf in self.matching(bxdf_type) {
            r += bxdf.rho_hd(&wo, u);
        }
        r
    }

    /// Computes the hemispherical-hemispherical reflectance function ρ.
    ///
    /// * `u1`        - Samples used by Monte Carlo algorithm.
    /// * `u2`        - Samples used by Monte Carlo algorithm.
    /// * `bxdf_type` - The `BxDFType` to evaluate.
    pub fn rho_hh(&self, u1: &[Point2f], u2: &[Point2f], bxdf_type: BxDFType) -> Spectrum {
        let mut r = Spectrum::ZERO;
        for bxdf in self.matching(bxdf_type) {
            r += bxdf.rho_hh(u1, u2);
        }
        r
    }

    /// Computes the hemispherical-directional reflectance function ρ using
    /// `sqrt_samples²` jittered stratified samples.
    ///
    /// * `wo_w`         - Outgoing direction in world-space.
    /// * `rng`          - Random number generator.
    /// * `bxdf_type`    - The `BxDFType` to evaluate.
    /// * `sqrt_samples` - Number of samples per axis.
    pub fn rho_hd_rng(
        &self,
        wo_w: &Vector3f,
        rng: &mut RNG,
        bxdf_type: BxDFType,
        sqrt_samples: usize,
    ) -> Spectrum {
        let u = stratified_sample_2d(rng, sqrt_samples, sqrt_samples, true);
        self.rho_hd(wo_w, &u, bxdf_type)
    }

    /// Computes the hemispherical-hemispherical reflectance function ρ using
    /// two sets of `sqrt_samples²` jittered stratified samples.
    ///
    /// * `rng`          - Random number generator.
    /// * `bxdf_type`    - The `BxDFType` to evaluate.
    /// * `sqrt_samples` - Number of samples per axis.
    pub fn rho_hh_rng(&self, rng: &mut RNG, bxdf_type: BxDFType, sqrt_samples: usize) -> Spectrum {
        let u1 = stratified_sample_2d(rng, sqrt_samples, sqrt_samples, true);
        let u2 = stratified_sample_2d(rng, sqrt_samples, sqrt_samples, true);
        self.rho_hh(&u1, &u2, bxdf_type)
    }
}

impl<'arena> fmt::Display for BSDF<'arena> {
    /// Formats the value using the given formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BSDF {{ eta: {}, nBxDFs: {}", self.eta, self.n_bxdfs)?;
        for bxdf in self.bxdfs() {
            write!(f, ", {}", bxdf)?;
        }
        write!(f, " }}")
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
