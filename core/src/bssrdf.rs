//! Bidirectional scattering surface reflectance distribution function.

use crate::pbrt::*;
use crate::spectrum::*;
use bumpalo::Bump;
use std::fmt;

/// Parameters of a homogeneous subsurface scattering medium below a surface.
#[derive(Copy, Clone, Debug)]
pub struct BSSRDF {
    /// Absorption coefficient.
    sigma_a: Spectrum,

    /// Reduced scattering coefficient.
    sigma_prime_s: Spectrum,

    /// Relative index of refraction of the medium.
    eta: Float,
}

impl BSSRDF {
    /// Create a new `BSSRDF`.
    ///
    /// * `sigma_a`       - Absorption coefficient.
    /// * `sigma_prime_s` - Reduced scattering coefficient.
    /// * `eta`           - Relative index of refraction of the medium.
    pub fn new(sigma_a: Spectrum, sigma_prime_s: Spectrum, eta: Float) -> Self {
        Self {
            sigma_a,
            sigma_prime_s,
            eta,
        }
    }

    /// Allocate a new `BSSRDF`.
    ///
    /// * `arena`         - The arena for memory allocations.
    /// * `sigma_a`       - Absorption coefficient.
    /// * `sigma_prime_s` - Reduced scattering coefficient.
    /// * `eta`           - Relative index of refraction of the medium.
    pub fn alloc(arena: &Bump, sigma_a: Spectrum, sigma_prime_s: Spectrum, eta: Float) -> &BSSRDF {
        arena.alloc(Self::new(sigma_a, sigma_prime_s, eta))
    }

    /// Returns the relative index of refraction.
    pub fn eta(&self) -> Float {
        self.eta
    }

    /// Returns the absorption coefficient.
    pub fn sigma_a(&self) -> Spectrum {
        self.sigma_a
    }

    /// Returns the reduced scattering coefficient.
    pub fn sigma_prime_s(&self) -> Spectrum {
        self.sigma_prime_s
    }

    /// Returns the diffuse Fresnel reflectance at the boundary.
    pub fn fdr(&self) -> Float {
        fdr(self.eta)
    }
}

impl fmt::Display for BSSRDF {
    /// Formats the value using the given formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BSSRDF {{ sigma_a: {}, sigma_prime_s: {}, eta: {} }}",
            self.sigma_a, self.sigma_prime_s, self.eta
        )
    }
}

/// Returns the first moment of the Fresnel reflectance over the hemisphere,
/// using a polynomial fit.
///
/// * `eta` - Relative index of refraction.
pub fn fdr(eta: Float) -> Float {
    if eta >= 1.0 {
        -1.4399 / (eta * eta) + 0.7099 / eta + 0.6681 + 0.0636 * eta
    } else {
        -0.4399 + 0.7099 / eta - 0.3319 / (eta * eta) + 0.0636 / (eta * eta * eta)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
