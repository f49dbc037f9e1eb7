//! BxDF Type

use bitflags::bitflags;
use std::fmt;

bitflags! {
    /// Stores combinations of reflection models. Every scattering term sets
    /// exactly one of `BSDF_REFLECTION`/`BSDF_TRANSMISSION` and exactly one of
    /// `BSDF_DIFFUSE`/`BSDF_GLOSSY`/`BSDF_SPECULAR`.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct BxDFType: u8 {
        const BSDF_REFLECTION = 0b00000001;
        const BSDF_TRANSMISSION = 0b00000010;
        const BSDF_DIFFUSE = 0b00000100;
        const BSDF_GLOSSY = 0b00001000;
        const BSDF_SPECULAR = 0b00010000;

        const BSDF_ALL_TYPES = Self::BSDF_DIFFUSE.bits()
            | Self::BSDF_GLOSSY.bits()
            | Self::BSDF_SPECULAR.bits();
        const BSDF_ALL_REFLECTION = Self::BSDF_REFLECTION.bits() | Self::BSDF_ALL_TYPES.bits();
        const BSDF_ALL_TRANSMISSION = Self::BSDF_TRANSMISSION.bits() | Self::BSDF_ALL_TYPES.bits();
        const BSDF_ALL = Self::BSDF_ALL_REFLECTION.bits() | Self::BSDF_ALL_TRANSMISSION.bits();
    }
}

impl BxDFType {
    /// Returns the type with `BSDF_REFLECTION` and `BSDF_TRANSMISSION`
    /// swapped.
    pub fn flip_hemisphere(&self) -> Self {
        *self ^ (Self::BSDF_REFLECTION | Self::BSDF_TRANSMISSION)
    }

    /// Returns true for delta distributions.
    pub fn is_specular(&self) -> bool {
        self.contains(Self::BSDF_SPECULAR)
    }
}

impl fmt::Display for BxDFType {
    /// Formats the value using the given formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter_names().map(|(name, _)| name).collect();
        write!(f, "{}", names.join(" | "))
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_masks() {
        assert_eq!(BxDFType::BSDF_ALL, BxDFType::all());
        assert!(BxDFType::BSDF_ALL_REFLECTION.contains(BxDFType::BSDF_GLOSSY));
        assert!(!BxDFType::BSDF_ALL_REFLECTION.contains(BxDFType::BSDF_TRANSMISSION));
    }

    #[test]
    fn flip_hemisphere_swaps_direction_only() {
        let t = BxDFType::BSDF_REFLECTION | BxDFType::BSDF_GLOSSY;
        assert_eq!(
            t.flip_hemisphere(),
            BxDFType::BSDF_TRANSMISSION | BxDFType::BSDF_GLOSSY
        );
        assert_eq!(t.flip_hemisphere().flip_hemisphere(), t);
    }
}
