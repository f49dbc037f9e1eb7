//! Interactions

use crate::geometry::*;

/// Hit provides the geometric data of a ray-surface intersection.
#[derive(Copy, Clone, Debug, Default)]
pub struct Hit {
    /// Point of interaction.
    pub p: Point3f,

    /// The negative ray direction (outgoing direction used when computing
    /// lighting at points).
    pub wo: Vector3f,

    /// Geometric surface normal at the point `p`.
    pub n: Normal3f,
}

impl Hit {
    /// Create a new hit.
    ///
    /// * `p`  - Point of interaction.
    /// * `wo` - The negative ray direction.
    /// * `n`  - Geometric surface normal at the point `p`.
    pub fn new(p: Point3f, wo: Vector3f, n: Normal3f) -> Self {
        Self { p, wo, n }
    }
}

/// Shading geometry that may be perturbed away from the true geometry by
/// bump mapping or interpolated normals.
#[derive(Copy, Clone, Debug, Default)]
pub struct Shading {
    /// Surface normal.
    pub n: Normal3f,

    /// Parametric partial derivative of the point ∂p/∂u.
    pub dpdu: Vector3f,

    /// Parametric partial derivative of the point ∂p/∂v.
    pub dpdv: Vector3f,
}

impl Shading {
    /// Create a new shading struct.
    ///
    /// * `n`    - Surface normal.
    /// * `dpdu` - Parametric partial derivative of the point ∂p/∂u.
    /// * `dpdv` - Parametric partial derivative of the point ∂p/∂v.
    pub fn new(n: Normal3f, dpdu: Vector3f, dpdv: Vector3f) -> Self {
        Self { n, dpdu, dpdv }
    }
}

/// SurfaceInteraction represents geometry of a particular point on a surface
/// as supplied by the intersection code.
#[derive(Copy, Clone, Debug, Default)]
pub struct SurfaceInteraction {
    /// The true geometry.
    pub hit: Hit,

    /// Shading geometry used for perturbed values.
    pub shading: Shading,
}

impl SurfaceInteraction {
    /// Create a new surface interaction whose shading geometry matches the
    /// true geometry.
    ///
    /// * `p`    - Point of interaction.
    /// * `wo`   - The negative ray direction.
    /// * `dpdu` - Parametric partial derivative of the point ∂p/∂u.
    /// * `dpdv` - Parametric partial derivative of the point ∂p/∂v.
    pub fn new(p: Point3f, wo: Vector3f, dpdu: Vector3f, dpdv: Vector3f) -> Self {
        // Calculate normal n from the partial derivatives.
        let n = Normal3f::from(dpdu.cross(&dpdv).normalize());

        Self {
            hit: Hit::new(p, wo, n),
            shading: Shading::new(n, dpdu, dpdv),
        }
    }

    /// Updates the shading geometry.
    ///
    /// * `dpdu`                         - Shading ∂p/∂u.
    /// * `dpdv`                         - Shading ∂p/∂v.
    /// * `orientation_is_authoritative` - If true the geometric normal is
    ///                                    flipped towards the shading normal,
    ///                                    otherwise the other way around.
    pub fn set_shading_geometry(
        &mut self,
        dpdu: Vector3f,
        dpdv: Vector3f,
        orientation_is_authoritative: bool,
    ) {
        // Compute normal.
        self.shading.n = Normal3f::from(dpdu.cross(&dpdv)).normalize();
        if orientation_is_authoritative {
            self.hit.n = self.hit.n.face_forward(&self.shading.n);
        } else {
            self.shading.n = self.shading.n.face_forward(&self.hit.n);
        }

        self.shading.dpdu = dpdu;
        self.shading.dpdv = dpdv;
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
