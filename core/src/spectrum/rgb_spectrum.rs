//! RGB Spectrum.

use super::*;
use crate::pbrt::*;
use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign};

/// Number of spectral samples to use for `RGBSpectrum`.
pub const RGB_SAMPLES: usize = 3;

/// RGBSpectrum represents an spectral power distribution (SPD) with
/// a weighted sum of red, green and blue components.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct RGBSpectrum {
    /// The sampled spectral values.
    c: [Float; RGB_SAMPLES],
}

impl RGBSpectrum {
    /// Black.
    pub const ZERO: Self = Self { c: [0.0; RGB_SAMPLES] };

    /// Unit value across all wavelengths.
    pub const ONE: Self = Self { c: [1.0; RGB_SAMPLES] };

    /// Create a new `RGBSpectrum` with a constant value across all
    /// wavelengths.
    ///
    /// * `v` - Constant value.
    pub fn new(v: Float) -> Self {
        let ret = Self { c: [v; RGB_SAMPLES] };
        assert!(!ret.has_nans(), "RGBSpectrum::new() given NaN");
        ret
    }

    /// Create a new `RGBSpectrum` from red, green and blue values.
    ///
    /// * `rgb` - RGB value.
    pub fn from_rgb(rgb: &[Float; 3]) -> Self {
        let ret = Self { c: *rgb };
        assert!(!ret.has_nans(), "RGBSpectrum::from_rgb() given NaN");
        ret
    }

    /// Convert the SPD to RGB cooefficients.
    pub fn to_rgb(&self) -> [Float; 3] {
        self.c
    }
}

impl CoefficientSpectrum for RGBSpectrum {
    /// Returns the stored samples.
    fn samples(&self) -> &[Float] {
        &self.c
    }

    /// Returns stored samples as mutable.
    fn samples_mut(&mut self) -> &mut [Float] {
        &mut self.c
    }
}

impl Add for RGBSpectrum {
    type Output = Self;

    /// Adds the corresponding sample values from another `RGBSpectrum`.
    ///
    /// * `other` - The other `RGBSpectrum`.
    fn add(self, other: Self) -> Self::Output {
        let mut ret = self;
        CoefficientSpectrum::add(&mut ret, &other);
        ret
    }
}

impl AddAssign for RGBSpectrum {
    fn add_assign(&mut self, other: Self) {
        CoefficientSpectrum::add(self, &other);
    }
}

impl Sub for RGBSpectrum {
    type Output = Self;

    /// Subtracts the corresponding sample values from another `RGBSpectrum`.
    ///
    /// * `other` - The other `RGBSpectrum`.
    fn sub(self, other: Self) -> Self::Output {
        let mut ret = self;
        CoefficientSpectrum::sub(&mut ret, &other);
        ret
    }
}

impl SubAssign for RGBSpectrum {
    fn sub_assign(&mut self, other: Self) {
        CoefficientSpectrum::sub(self, &other);
    }
}

impl Mul for RGBSpectrum {
    type Output = Self;

    /// Multiplies the corresponding sample values from another `RGBSpectrum`.
    ///
    /// * `other` - The other `RGBSpectrum`.
    fn mul(self, other: Self) -> Self::Output {
        let mut ret = self;
        CoefficientSpectrum::mul(&mut ret, &other);
        ret
    }
}

impl Mul<Float> for RGBSpectrum {
    type Output = Self;

    /// Scales the sample values with a constant factor.
    ///
    /// * `f` - Scaling factor.
    fn mul(self, f: Float) -> Self::Output {
        let mut ret = self;
        CoefficientSpectrum::scale(&mut ret, f);
        ret
    }
}

impl Mul<RGBSpectrum> for Float {
    type Output = RGBSpectrum;

    /// Scales the sample values of an `RGBSpectrum`.
    ///
    /// * `s` - Sample values.
    fn mul(self, s: RGBSpectrum) -> Self::Output {
        s * self
    }
}

impl MulAssign for RGBSpectrum {
    fn mul_assign(&mut self, other: Self) {
        CoefficientSpectrum::mul(self, &other);
    }
}

impl MulAssign<Float> for RGBSpectrum {
    fn mul_assign(&mut self, f: Float) {
        CoefficientSpectrum::scale(self, f);
    }
}

impl Div for RGBSpectrum {
    type Output = Self;

    /// Divides the corresponding sample values from another
    /// `RGBSpectrum`.
    ///
    /// * `other` - The other `RGBSpectrum`.
    fn div(self, other: Self) -> Self::Output {
        let mut ret = self;
        CoefficientSpectrum::div(&mut ret, &other);
        ret
    }
}

impl Div<Float> for RGBSpectrum {
    type Output = Self;

    /// Divides the sample values with given factor.
    ///
    /// * `f` - Scaling value.
    fn div(self, f: Float) -> Self::Output {
        let mut ret = self;
        CoefficientSpectrum::scale(&mut ret, 1.0 / f);
        ret
    }
}

impl DivAssign for RGBSpectrum {
    fn div_assign(&mut self, other: Self) {
        CoefficientSpectrum::div(self, &other);
    }
}

impl DivAssign<Float> for RGBSpectrum {
    fn div_assign(&mut self, f: Float) {
        CoefficientSpectrum::scale(self, 1.0 / f);
    }
}

impl Neg for RGBSpectrum {
    type Output = Self;

    /// Scale the values by -1.
    fn neg(self) -> Self::Output {
        self * -1.0
    }
}

impl Index<usize> for RGBSpectrum {
    type Output = Float;

    /// Index the sample value.
    ///
    /// * `i` -  The index.
    fn index(&self, i: usize) -> &Self::Output {
        &self.c[i]
    }
}

impl IndexMut<usize> for RGBSpectrum {
    /// Index the sample to get a mutable sample value.
    ///
    /// * `i` - The index.
    fn index_mut(&mut self, i: usize) -> &mut Self::Output {
        &mut self.c[i]
    }
}

impl Clamp<Float> for RGBSpectrum {
    /// Clamps the sample values.
    ///
    /// * `low`  - Low value.
    /// * `high` - High value.
    fn clamp(&self, low: Float, high: Float) -> Self {
        self.map(|v| clamp(v, low, high))
    }

    /// Clamps the values to [0.0, INFINITY].
    fn clamp_default(&self) -> Self {
        Clamp::clamp(self, 0.0, INFINITY)
    }
}

impl fmt::Display for RGBSpectrum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.c[0], self.c[1], self.c[2])
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
    fn constants() {
        assert!(RGBSpectrum::ZERO.is_black());
        assert!(!RGBSpectrum::ONE.is_black());
        assert_eq!(RGBSpectrum::ONE, RGBSpectrum::new(1.0));
    }

    #[test]
    #[should_panic]
    fn new_rejects_nan() {
        let _ = RGBSpectrum::new(Float::NAN);
    }

    #[test]
    fn clamp_default_removes_negatives() {
        let s = RGBSpectrum::from_rgb(&[-1.0, 0.5, 2.0]).clamp_default();
        assert_eq!(s.to_rgb(), [0.0, 0.5, 2.0]);
    }

    #[test]
    fn max_component() {
        let s = RGBSpectrum::from_rgb(&[0.1, 0.7, 0.3]);
        assert_eq!(s.max_component_value(), 0.7);
    }

    proptest! {
        #[test]
        fn arithmetic(a in 0.0..10.0f32, b in 0.1..10.0f32) {
            let sa = RGBSpectrum::new(a);
            let sb = RGBSpectrum::new(b);
            prop_assert_eq!((sa + sb)[0], a + b);
            prop_assert_eq!((sa - sb)[1], a - b);
            prop_assert_eq!((sa * sb)[2], a * b);
            prop_assert!(approx_eq!(f32, (sa / sb)[0], a / b, ulps = 2));
            prop_assert_eq!((b * sa)[0], a * b);
        }

        #[test]
        fn sqrt_per_sample(a in 0.0..10.0f32) {
            let s = RGBSpectrum::new(a);
            prop_assert!(approx_eq!(f32, s.sqrt()[1], a.sqrt(), ulps = 2));
        }
    }
}
