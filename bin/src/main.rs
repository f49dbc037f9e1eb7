#[macro_use]
extern crate log;

mod options;

use bumpalo::Bump;
use clap::Parser;
use options::*;
use scatter::error::*;
use scatter::geometry::*;
use scatter::interaction::*;
use scatter::material::*;
use scatter::pbrt::*;
use scatter::reflection::*;
use scatter::rng::*;
use scatter::spectrum::*;
use scatter_materials::*;
use std::sync::Arc;

/// Number of cells per axis of the synthetic measured table.
const MEASURED_TABLE_RES: usize = 8;

fn main() {
    // Initialize `env_logger`.
    env_logger::init();

    let options = Options::parse();
    if let Err(e) = probe(&options) {
        error!("{e}");
        std::process::exit(1);
    }
}

/// Builds the material selected by the options.
///
/// * `options` - Probe options.
fn material(options: &Options) -> Result<ArcMaterial> {
    let kd = Spectrum::new(options.kd);
    let ks = Spectrum::new(options.ks);
    let rough = options.roughness;

    let m: ArcMaterial = match options.material {
        MaterialKind::Matte => Arc::new(MatteMaterial::new(kd, options.sigma)),
        MaterialKind::Plastic => Arc::new(PlasticMaterial::new(kd, ks, rough)),
        MaterialKind::Mirror => Arc::new(MirrorMaterial::new(kd)),
        MaterialKind::Glass => Arc::new(GlassMaterial::new(Spectrum::ONE, Spectrum::ONE, options.eta)),
        MaterialKind::Metal => Arc::new(MetalMaterial::new(
            Spectrum::from_rgb(&COPPER_ETA),
            Spectrum::from_rgb(&COPPER_K),
            rough,
        )),
        MaterialKind::ShinyMetal => Arc::new(ShinyMetalMaterial::new(ks, kd, rough)),
        MaterialKind::Substrate => Arc::new(SubstrateMaterial::new(kd, ks, rough, rough)),
        MaterialKind::Translucent => Arc::new(TranslucentMaterial::new(
            kd,
            ks,
            rough,
            Spectrum::new(0.5),
            Spectrum::new(0.5),
        )),
        MaterialKind::Mix => Arc::new(MixMaterial::new(
            Arc::new(MatteMaterial::new(kd, options.sigma)),
            Arc::new(PlasticMaterial::new(kd, ks, rough)),
            Spectrum::new(options.amount),
        )),
        MaterialKind::Measured => {
            // A table of a Lambertian surface so reflectance should be `kd`.
            let n = MEASURED_TABLE_RES;
            let data = vec![options.kd * INV_PI; 3 * n * n * n];
            let table = RegularHalfangleTable::new(n, n, n, data)?;
            Arc::new(MeasuredMaterial::regular_halfangle(table))
        }
    };
    Ok(m)
}

/// Evaluates the selected material and prints the results.
///
/// * `options` - Probe options.
fn probe(options: &Options) -> Result<()> {
    if options.sqrt_samples == 0 {
        return Err(ScatterError::InvalidParameter(String::from(
            "sqrt-samples must be positive",
        )));
    }

    let theta = clamp(options.theta, 0.0, 89.9).to_radians();
    let wo = spherical_direction(theta.sin(), theta.cos(), 0.0);
    let si = SurfaceInteraction::new(
        Point3f::zero(),
        wo,
        Vector3f::new(1.0, 0.0, 0.0),
        Vector3f::new(0.0, 1.0, 0.0),
    );
    info!("Probing {:?} at wo = {}", options.material, wo);

    let material = material(options)?;
    let arena = Bump::new();
    let bsdf = material.compute_bsdf(&arena, &si, options.mode.into());
    println!("{}", bsdf);
    println!(
        "components: {} (reflection {}, transmission {}, specular {})",
        bsdf.num_components(BxDFType::BSDF_ALL),
        bsdf.num_components(BxDFType::BSDF_ALL_REFLECTION),
        bsdf.num_components(BxDFType::BSDF_ALL_TRANSMISSION),
        bsdf.num_components(
            BxDFType::BSDF_REFLECTION | BxDFType::BSDF_TRANSMISSION | BxDFType::BSDF_SPECULAR
        ),
    );

    let n = Vector3f::new(0.0, 0.0, 1.0);
    let mirror = Vector3f::new(-wo.x, -wo.y, wo.z);
    println!("f(wo, n)      = {}", bsdf.f(&wo, &n, BxDFType::BSDF_ALL));
    println!("f(wo, mirror) = {}", bsdf.f(&wo, &mirror, BxDFType::BSDF_ALL));
    println!("f(wo, -n)     = {}", bsdf.f(&wo, &-n, BxDFType::BSDF_ALL));

    let mut rng = RNG::new(options.seed);
    for i in 0..options.samples {
        let u = BSDFSample::from_rng(&mut rng);
        let sample = bsdf.sample_f(&wo, &u, BxDFType::BSDF_ALL);
        if sample.is_valid() {
            println!(
                "sample {}: wi = {}, f = {}, pdf = {}, type = {}",
                i, sample.wi, sample.f, sample.pdf, sample.bxdf_type
            );
        } else {
            println!("sample {}: none", i);
        }
    }

    let sqrt_samples = options.sqrt_samples;
    let rho_hd = bsdf.rho_hd_rng(&wo, &mut rng, BxDFType::BSDF_ALL, sqrt_samples);
    let rho_hh = bsdf.rho_hh_rng(&mut rng, BxDFType::BSDF_ALL, sqrt_samples);
    println!("rho_hd = {}", rho_hd);
    println!("rho_hh = {}", rho_hh);
    if rho_hh.max_component_value() > 1.01 {
        warn!("Hemispherical reflectance exceeds one; material is not energy conserving");
    }

    Ok(())
}
