//! Common

use crate::pbrt::*;
use std::ops::{Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign};

/// Interface and helper functions for SPDs.
pub trait CoefficientSpectrum:
    Sized
    + Copy
    + Add
    + AddAssign
    + Sub
    + SubAssign
    + Mul<Self>
    + MulAssign<Self>
    + MulAssign<Float>
    + Div<Self>
    + DivAssign<Self>
    + DivAssign<Float>
    + Neg
    + Index<usize>
    + IndexMut<usize>
    + Clamp<Float>
{
    /// Returns the stored samples.
    fn samples(&self) -> &[Float];

    /// Returns stored samples as mutable.
    fn samples_mut(&mut self) -> &mut [Float];

    /// Returns true if either coordinate is NaN.
    fn has_nans(&self) -> bool {
        self.samples().iter().any(|v| v.is_nan())
    }

    /// Returns true if the values are zero everywhere.
    fn is_black(&self) -> bool {
        self.samples().iter().all(|v| *v == 0.0)
    }

    /// Returns the maximum sample value.
    fn max_component_value(&self) -> Float {
        let samples = self.samples();
        assert!(!samples.is_empty());
        samples[1..].iter().fold(samples[0], |m, v| max(m, *v))
    }

    /// Returns a copy with `op` applied to every sample value.
    ///
    /// * `op` - The function to apply.
    fn map<F: Fn(Float) -> Float>(&self, op: F) -> Self {
        let mut ret = *self;
        for s in ret.samples_mut().iter_mut() {
            *s = op(*s);
        }
        ret
    }

    /// Takes the square root of all sample values.
    fn sqrt(&self) -> Self {
        self.map(|v| v.sqrt())
    }

    /// Adds the sample values from another SPD.
    ///
    /// * `other` - The other SPD.
    fn add(&mut self, other: &Self) {
        debug_assert!(!self.has_nans());
        for (s, o) in self.samples_mut().iter_mut().zip(other.samples()) {
            *s += o;
        }
    }

    /// Subtract the sample values from another SPD.
    ///
    /// * `other` - The other SPD.
    fn sub(&mut self, other: &Self) {
        debug_assert!(!self.has_nans());
        for (s, o) in self.samples_mut().iter_mut().zip(other.samples()) {
            *s -= o;
        }
    }

    /// Multiplies the sample values from another SPD.
    ///
    /// * `other` - The other SPD.
    fn mul(&mut self, other: &Self) {
        debug_assert!(!self.has_nans());
        for (s, o) in self.samples_mut().iter_mut().zip(other.samples()) {
            *s *= o;
        }
    }

    /// Divides the sample values from another SPD.
    ///
    /// * `other` - The other SPD.
    fn div(&mut self, other: &Self) {
        debug_assert!(!self.has_nans());
        for (s, o) in self.samples_mut().iter_mut().zip(other.samples()) {
            *s /= o;
        }
    }

    /// Scales the sample values by a constant factor.
    ///
    /// * `f` - The factor.
    fn scale(&mut self, f: Float) {
        for s in self.samples_mut().iter_mut() {
            *s *= f;
        }
        debug_assert!(!self.has_nans());
    }
}
