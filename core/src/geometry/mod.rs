//! Geometry

// Define macros for property based testing.
#[cfg(test)]
#[macro_export]
macro_rules! prop_vector3 {
    ($name: ident, $t: ty, $xr: expr, $yr: expr, $zr: expr) => {
        prop_compose! {
            fn $name()(x in $xr, y in $yr, z in $zr) -> Vector3<$t> {
                Vector3 { x, y, z }
            }
        }
    };
}

/// Generates unit vectors in the upper (`z > 0`) hemisphere from spherical
/// angles, avoiding the exact pole and horizon.
#[cfg(test)]
#[macro_export]
macro_rules! prop_hemisphere {
    ($name: ident) => {
        prop_compose! {
            fn $name()(
                theta in 0.01..(std::f32::consts::FRAC_PI_2 - 0.01),
                phi in 0.0..(2.0 * std::f32::consts::PI),
            ) -> Vector3f {
                spherical_direction(theta.sin(), theta.cos(), phi)
            }
        }
    };
}

mod common;
mod normal;
mod point2;
mod point3;
mod util;
mod vector3;

// Re-export
pub use common::*;
pub use normal::*;
pub use point2::*;
pub use point3::*;
pub use util::*;
pub use vector3::*;
