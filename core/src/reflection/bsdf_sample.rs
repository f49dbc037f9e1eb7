//! BSDF Sample Numbers

use crate::error::*;
use crate::geometry::*;
use crate::pbrt::*;
use crate::rng::*;

/// The three uniform values used to sample an aggregate: two pick the
/// direction and one picks the scattering term. All three always lie in
/// [0, 1).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BSDFSample {
    /// Values used by the chosen term to sample a direction.
    u_dir: Point2f,

    /// Value used to choose a term.
    u_component: Float,
}

impl BSDFSample {
    /// Create a new `BSDFSample`. Panics when a value is outside [0, 1).
    ///
    /// * `up0`   - First direction value.
    /// * `up1`   - Second direction value.
    /// * `ucomp` - Component selection value.
    pub fn new(up0: Float, up1: Float, ucomp: Float) -> Self {
        match Self::try_new(up0, up1, ucomp) {
            Ok(s) => s,
            Err(e) => panic!("{}", e),
        }
    }

    /// Create a new `BSDFSample` or report which value is outside [0, 1).
    ///
    /// * `up0`   - First direction value.
    /// * `up1`   - Second direction value.
    /// * `ucomp` - Component selection value.
    pub fn try_new(up0: Float, up1: Float, ucomp: Float) -> Result<Self> {
        for (index, &value) in [up0, up1, ucomp].iter().enumerate() {
            if !(0.0..1.0).contains(&value) {
                return Err(ScatterError::SampleOutOfRange { index, value });
            }
        }
        Ok(Self {
            u_dir: Point2f::new(up0, up1),
            u_component: ucomp,
        })
    }

    /// Draw a new `BSDFSample` from a random number generator.
    ///
    /// * `rng` - The random number generator.
    pub fn from_rng(rng: &mut RNG) -> Self {
        let up0 = rng.uniform_float();
        let up1 = rng.uniform_float();
        let ucomp = rng.uniform_float();
        Self {
            u_dir: Point2f::new(up0, up1),
            u_component: ucomp,
        }
    }

    /// Returns the values used to sample a direction.
    pub fn u_dir(&self) -> Point2f {
        self.u_dir
    }

    /// Returns the value used to choose a term.
    pub fn u_component(&self) -> Float {
        self.u_component
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
