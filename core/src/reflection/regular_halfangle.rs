//! Measured isotropic BRDF tabulated in the half-angle parameterization.

use super::*;
use crate::error::*;
use bumpalo::Bump;

/// A dense table of RGB values indexed by half-vector inclination θh,
/// difference-vector inclination θd and difference-vector azimuth φd.
#[derive(Clone, Debug)]
pub struct RegularHalfangleTable {
    /// Number of θh cells.
    n_theta_h: usize,

    /// Number of θd cells.
    n_theta_d: usize,

    /// Number of φd cells.
    n_phi_d: usize,

    /// RGB triples; cell `(th, td, pd)` starts at
    /// `3 * (pd + n_phi_d * (td + th * n_theta_d))`.
    data: Vec<Float>,
}

impl RegularHalfangleTable {
    /// Create a new table.
    ///
    /// * `n_theta_h` - Number of θh cells.
    /// * `n_theta_d` - Number of θd cells.
    /// * `n_phi_d`   - Number of φd cells.
    /// * `data`      - RGB triples for every cell.
    pub fn new(n_theta_h: usize, n_theta_d: usize, n_phi_d: usize, data: Vec<Float>) -> Result<Self> {
        if n_theta_h == 0 || n_theta_d == 0 || n_phi_d == 0 {
            return Err(ScatterError::InvalidParameter(format!(
                "table dimensions must be non-zero, got {}x{}x{}",
                n_theta_h, n_theta_d, n_phi_d
            )));
        }

        let expected = 3 * n_theta_h * n_theta_d * n_phi_d;
        if data.len() != expected {
            return Err(ScatterError::TableSize {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            n_theta_h,
            n_theta_d,
            n_phi_d,
            data,
        })
    }

    /// Returns the value stored in a cell.
    ///
    /// * `th` - θh index.
    /// * `td` - θd index.
    /// * `pd` - φd index.
    pub fn cell(&self, th: usize, td: usize, pd: usize) -> Spectrum {
        let index = 3 * (pd + self.n_phi_d * (td + th * self.n_theta_d));
        Spectrum::from_rgb(&[self.data[index], self.data[index + 1], self.data[index + 2]])
    }

    /// Interpolates the table between cell centers. Coordinates outside the
    /// table clamp to the border cells.
    ///
    /// * `theta_h` - Half-vector inclination in [0, π/2].
    /// * `theta_d` - Difference-vector inclination in [0, π/2].
    /// * `phi_d`   - Difference-vector azimuth in [0, π].
    pub fn lookup(&self, theta_h: Float, theta_d: Float, phi_d: Float) -> Spectrum {
        let th = axis_weights(max(0.0, theta_h / PI_OVER_TWO).sqrt(), self.n_theta_h);
        let td = axis_weights(theta_d / PI_OVER_TWO, self.n_theta_d);
        let pd = axis_weights(phi_d / PI, self.n_phi_d);

        let mut v = Spectrum::ZERO;
        for (ih, wh) in th {
            for (id, wd) in td {
                for (ip, wp) in pd {
                    let w = wh * wd * wp;
                    if w > 0.0 {
                        v += w * self.cell(ih, id, ip);
                    }
                }
            }
        }
        v
    }
}

/// Returns the two neighbouring cells and their linear weights for a
/// coordinate in [0, 1] on an axis with `count` cells.
///
/// * `x`     - Normalized coordinate.
/// * `count` - Number of cells.
fn axis_weights(x: Float, count: usize) -> [(usize, Float); 2] {
    let c = x * count as Float - 0.5;
    let last = count - 1;
    if c <= 0.0 || c.is_nan() {
        return [(0, 1.0), (0, 0.0)];
    }
    let i0 = c.floor() as usize;
    if i0 >= last {
        return [(last, 1.0), (last, 0.0)];
    }
    let t = c - i0 as Float;
    [(i0, 1.0 - t), (i0 + 1, t)]
}

/// BRDF backed by a `RegularHalfangleTable`.
#[derive(Copy, Clone, Debug)]
pub struct RegularHalfangleBRDF<'arena> {
    /// BxDF type.
    bxdf_type: BxDFType,

    /// The tabulated values.
    table: &'arena RegularHalfangleTable,
}

impl<'arena> RegularHalfangleBRDF<'arena> {
    /// Create a new instance of `RegularHalfangleBRDF`.
    ///
    /// * `table` - The tabulated values.
    pub fn new(table: &'arena RegularHalfangleTable) -> Self {
        Self {
            bxdf_type: BxDFType::BSDF_REFLECTION | BxDFType::BSDF_GLOSSY,
            table,
        }
    }

    /// Allocate a new instance of `RegularHalfangleBRDF`.
    ///
    /// * `arena` - The arena for memory allocations.
    /// * `table` - The tabulated values.
    pub fn alloc(arena: &'arena Bump, table: &'arena RegularHalfangleTable) -> &'arena BxDF<'arena> {
        let model = arena.alloc(Self::new(table));
        arena.alloc(BxDF::RegularHalfangleBRDF(model))
    }

    /// Returns the BxDF type.
    pub fn get_type(&self) -> BxDFType {
        self.bxdf_type
    }

    /// Returns the tabulated value for the given pair of directions.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wi` - Incident direction.
    pub fn f(&self, wo: &Vector3f, wi: &Vector3f) -> Spectrum {
        if !same_hemisphere(wo, wi) {
            return Spectrum::ZERO;
        }
        let wh = *wi + *wo;
        let (wi, wh) = if wh.z < 0.0 { (-*wi, -wh) } else { (*wi, wh) };
        if wh.is_zero() {
            return Spectrum::ZERO;
        }
        let wh = wh.normalize();

        // Build a frame around the half-vector and express `wi` in it.
        let wh_theta = spherical_theta(&wh);
        let wh_cos_phi = cos_phi(&wh);
        let wh_sin_phi = sin_phi(&wh);
        let wh_cos_theta = cos_theta(&wh);
        let wh_sin_theta = sin_theta(&wh);
        let whx = Vector3f::new(
            wh_cos_phi * wh_cos_theta,
            wh_sin_phi * wh_cos_theta,
            -wh_sin_theta,
        );
        let why = Vector3f::new(-wh_sin_phi, wh_cos_phi, 0.0);
        let wd = Vector3f::new(wi.dot(&whx), wi.dot(&why), wi.dot(&wh));

        let wd_theta = spherical_theta(&wd);
        let mut wd_phi = spherical_phi(&wd);
        if wd_phi > PI {
            wd_phi -= PI;
        }

        self.table.lookup(wh_theta, wd_theta, wd_phi).clamp_default()
    }
}

impl<'arena> fmt::Display for RegularHalfangleBRDF<'arena> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RegularHalfangleBRDF {{ n_theta_h: {}, n_theta_d: {}, n_phi_d: {} }}",
            self.table.n_theta_h, self.table.n_theta_d, self.table.n_phi_d
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

    /// Table whose red channel holds θh index, green θd index and blue φd index.
    fn index_table(n_theta_h: usize, n_theta_d: usize, n_phi_d: usize) -> RegularHalfangleTable {
        let mut data = vec![];
        for th in 0..n_theta_h {
            for td in 0..n_theta_d {
                for pd in 0..n_phi_d {
                    data.extend_from_slice(&[th as Float, td as Float, pd as Float]);
                }
            }
        }
        RegularHalfangleTable::new(n_theta_h, n_theta_d, n_phi_d, data).unwrap()
    }

    #[test]
    fn rejects_bad_sizes() {
        assert_eq!(
            RegularHalfangleTable::new(2, 2, 2, vec![0.0; 10]).unwrap_err(),
            ScatterError::TableSize {
                expected: 24,
                actual: 10
            }
        );
        assert!(RegularHalfangleTable::new(0, 2, 2, vec![]).is_err());
    }

    #[test]
    fn cell_centers_are_exact() {
        let table = index_table(4, 5, 6);
        for td in 0..5 {
            for pd in 0..6 {
                let theta_d = (td as Float + 0.5) / 5.0 * PI_OVER_TWO;
                let phi_d = (pd as Float + 0.5) / 6.0 * PI;
                let v = table.lookup(0.0, theta_d, phi_d);
                assert!(approx_eq!(f32, v[1], td as Float, epsilon = 1e-4));
                assert!(approx_eq!(f32, v[2], pd as Float, epsilon = 1e-4));
            }
        }
    }

    #[test]
    fn interpolates_between_centers() {
        let table = index_table(1, 4, 1);
        // Halfway between the centers of cells 1 and 2.
        let v = table.lookup(0.0, 0.5 * PI_OVER_TWO, 0.0);
        assert!(approx_eq!(f32, v[1], 1.5, epsilon = 1e-4));
    }

    #[test]
    fn out_of_range_clamps() {
        let table = index_table(3, 3, 3);
        let high = table.lookup(10.0, 10.0, 10.0);
        assert_eq!(high.to_rgb(), [2.0, 2.0, 2.0]);
        let low = table.lookup(-1.0, -1.0, -1.0);
        assert_eq!(low.to_rgb(), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn specular_configuration_uses_first_cells() {
        let table = index_table(4, 4, 4);
        let brdf = RegularHalfangleBRDF::new(&table);
        let up = Vector3f::new(0.0, 0.0, 1.0);
        let v = brdf.f(&up, &up);
        assert_eq!(v[0], 0.0);
        assert_eq!(v[1], 0.0);
    }

    prop_hemisphere!(hemisphere);

    proptest! {
        #[test]
        fn reciprocity(wo in hemisphere(), wi in hemisphere()) {
            let table = index_table(8, 8, 8);
            let brdf = RegularHalfangleBRDF::new(&table);
            let a = brdf.f(&wo, &wi);
            let b = brdf.f(&wi, &wo);
            prop_assert!(approx_eq!(f32, a[0], b[0], epsilon = 1e-2));
            prop_assert!(approx_eq!(f32, a[1], b[1], epsilon = 1e-2));
        }
    }
}
