//! Measured Material

use bumpalo::Bump;
use scatter::interaction::*;
use scatter::kdtree::*;
use scatter::material::*;
use scatter::reflection::*;
use std::sync::Arc;

/// Measured reflectance data shared by every shading point that uses it.
#[derive(Clone, Debug)]
pub enum MeasuredData {
    /// Irregularly spaced samples indexed in a kd-tree.
    Irregular(Arc<KdTree<IrregIsotropicBRDFSample>>),

    /// Dense half-angle table.
    RegularHalfangle(Arc<RegularHalfangleTable>),
}

/// Implements a material whose reflection is looked up from measurements.
#[derive(Clone, Debug)]
pub struct MeasuredMaterial {
    /// The measurements.
    data: MeasuredData,
}

impl MeasuredMaterial {
    /// Create a new `MeasuredMaterial` from already loaded data.
    ///
    /// * `data` - The measurements.
    pub fn new(data: MeasuredData) -> Self {
        Self { data }
    }

    /// Create a new `MeasuredMaterial` from irregularly spaced samples.
    ///
    /// * `samples` - Samples whose positions are given by `brdf_remap()`.
    pub fn irregular(samples: Vec<IrregIsotropicBRDFSample>) -> Self {
        let tree = KdTree::new(samples);
        info!("Built measured BRDF kd-tree with {} samples", tree.len());
        Self::new(MeasuredData::Irregular(Arc::new(tree)))
    }

    /// Create a new `MeasuredMaterial` from a half-angle table.
    ///
    /// * `table` - The table.
    pub fn regular_halfangle(table: RegularHalfangleTable) -> Self {
        Self::new(MeasuredData::RegularHalfangle(Arc::new(table)))
    }
}

impl Material for MeasuredMaterial {
    /// Allocates the BSDF describing the light-scattering properties of the
    /// material at the intersection point on the surface.
    ///
    /// * `arena` - The arena for memory allocations.
    /// * `si`    - The surface interaction at the intersection.
    /// * `mode`  - Transport mode (ignored).
    fn compute_bsdf<'arena>(
        &'arena self,
        arena: &'arena Bump,
        si: &SurfaceInteraction,
        _mode: TransportMode,
    ) -> &'arena mut BSDF<'arena> {
        let bsdf = BSDF::alloc(arena, &si.hit, &si.shading, None);

        match &self.data {
            MeasuredData::Irregular(tree) => bsdf.add(IrregIsotropicBRDF::alloc(arena, tree)),
            MeasuredData::RegularHalfangle(table) => {
                bsdf.add(RegularHalfangleBRDF::alloc(arena, table))
            }
        }

        bsdf
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::*;
    use float_cmp::*;
    use scatter::geometry::*;
    use scatter::pbrt::*;
    use scatter::spectrum::*;

    #[test]
    fn irregular_lookup() {
        let wo = Vector3f::new(0.0, 0.6, 0.8);
        let wi = Vector3f::new(0.6, 0.0, 0.8);
        let samples = vec![
            IrregIsotropicBRDFSample::new(brdf_remap(&wo, &wi), Spectrum::new(0.3)),
            IrregIsotropicBRDFSample::new(brdf_remap(&wi, &wo), Spectrum::new(0.3)),
            IrregIsotropicBRDFSample::new(Point3f::new(0.1, 0.2, 0.9), Spectrum::new(0.3)),
        ];
        let m = MeasuredMaterial::irregular(samples);

        let arena = Bump::new();
        let si = shading_point();
        let bsdf = m.compute_bsdf(&arena, &si, TransportMode::Radiance);
        assert_eq!(bsdf.num_components(BxDFType::BSDF_ALL_REFLECTION), 1);
        let f = bsdf.f(&wo, &wi, BxDFType::BSDF_ALL);
        assert!(approx_eq!(f32, f[0], 0.3, epsilon = 1e-5));
    }

    #[test]
    fn constant_regular_table() {
        let (nh, nd, np) = (4, 4, 8);
        let table = RegularHalfangleTable::new(nh, nd, np, vec![0.2 as Float; 3 * nh * nd * np]);
        let m = match table {
            Ok(table) => MeasuredMaterial::regular_halfangle(table),
            Err(e) => panic!("{}", e),
        };

        let arena = Bump::new();
        let si = shading_point();
        let bsdf = m.compute_bsdf(&arena, &si, TransportMode::Radiance);
        let wo = Vector3f::new(0.0, 0.6, 0.8);
        let wi = Vector3f::new(0.6, 0.0, 0.8);
        let f = bsdf.f(&wo, &wi, BxDFType::BSDF_ALL);
        assert!(approx_eq!(f32, f[1], 0.2, epsilon = 1e-5));
    }
}
