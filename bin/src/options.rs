//! Command line options

use clap::{Parser, ValueEnum};
use scatter::material::TransportMode;
use scatter::pbrt::Float;
use scatter::reflection::DEFAULT_RHO_SQRT_SAMPLES;

/// Materials the probe can build.
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq)]
pub enum MaterialKind {
    Matte,
    Plastic,
    Mirror,
    Glass,
    Metal,
    ShinyMetal,
    Substrate,
    Translucent,
    Mix,
    Measured,
}

/// Transport modes selectable on the command line.
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq)]
pub enum Mode {
    Radiance,
    Importance,
}

impl From<Mode> for TransportMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Radiance => TransportMode::Radiance,
            Mode::Importance => TransportMode::Importance,
        }
    }
}

/// Probe options.
#[derive(Parser, Clone, Debug)]
#[clap(author, version, about = "Evaluates a material's BSDF at a synthetic shading point.", long_about = None)]
pub struct Options {
    /// Material to probe.
    #[clap(long, short = 'm', value_enum, default_value_t = MaterialKind::Matte)]
    pub material: MaterialKind,

    /// Light transport mode.
    #[clap(long, value_enum, default_value_t = Mode::Radiance)]
    pub mode: Mode,

    /// Inclination of the outgoing direction.
    #[clap(
        long,
        value_name = "DEGREES",
        default_value_t = 30.0,
        help = "Angle between the outgoing direction and the normal."
    )]
    pub theta: Float,

    /// Number of stratified samples per axis for reflectance estimates.
    #[clap(
        long = "sqrt-samples",
        short = 's',
        value_name = "NUM",
        default_value_t = DEFAULT_RHO_SQRT_SAMPLES,
        help = "Stratified samples per axis used to estimate reflectance."
    )]
    pub sqrt_samples: usize,

    /// Number of sampled directions to print.
    #[clap(
        long,
        short = 'n',
        value_name = "NUM",
        default_value_t = 4,
        help = "Number of sampled directions to print."
    )]
    pub samples: usize,

    /// Random number sequence.
    #[clap(long, value_name = "NUM", default_value_t = 0)]
    pub seed: u64,

    /// Diffuse reflectance.
    #[clap(long, value_name = "FLOAT", default_value_t = 0.5)]
    pub kd: Float,

    /// Specular reflectance.
    #[clap(long, value_name = "FLOAT", default_value_t = 0.25)]
    pub ks: Float,

    /// Microfacet roughness.
    #[clap(long, value_name = "FLOAT", default_value_t = 0.1)]
    pub roughness: Float,

    /// Index of refraction.
    #[clap(long, value_name = "FLOAT", default_value_t = 1.5)]
    pub eta: Float,

    /// Oren-Nayar roughness.
    #[clap(long, value_name = "DEGREES", default_value_t = 0.0)]
    pub sigma: Float,

    /// Weight of the first material in a mix.
    #[clap(long, value_name = "FLOAT", default_value_t = 0.5)]
    pub amount: Float,
}
