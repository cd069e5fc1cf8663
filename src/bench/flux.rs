//! One-dimensional flux scenario.

use crate::bench::{BenchConfig, BenchResult, Workload};
use crate::constants::C;
use crate::fdtd::{Component, Fields, GaussianSource};
use crate::geometry::{Point, Volume};
use crate::material::{Material, Permittivity};
use crate::{Error, Result};

use instant::Instant;
use log::{debug, info};

/// Time a 1D run with absorbing ends and two flux planes.
///
/// Only the phase after the source has switched off is measured. During
/// it the net flux out of the region between the planes is accumulated.
///
/// # Arguments
/// * `config` - Resolution and progress settings
/// * `zmax` - Length of the line, must be positive
/// * `eps` - Relative permittivity along the line
///
/// # Returns
/// Wall time of the measured phase and its analytic grid-step count.
pub fn bench_flux_1d(
    config: &BenchConfig,
    zmax: f64,
    eps: &dyn Permittivity,
) -> Result<BenchResult> {
    run_flux_1d(config, zmax, eps).map(|(result, _)| result)
}

/// Run the flux scenario, returning the result and the accumulated flux energy.
pub(crate) fn run_flux_1d(
    config: &BenchConfig,
    zmax: f64,
    eps: &dyn Permittivity,
) -> Result<(BenchResult, f64)> {
    if !(zmax > 0.0) {
        return Err(Error::Config(format!(
            "flux scenario needs zmax > 0, got {zmax}"
        )));
    }

    let a = config.resolution();
    let workload = Workload::flux_1d(a, zmax);

    let volume = Volume::one_d(zmax, a)?;
    let mut material = Material::new(&volume, eps)?;
    material
        .use_pml_left(zmax / 6.0)?
        .use_pml_right(zmax / 6.0)?;

    let mut fields = Fields::new(&material)?;
    fields.use_real_fields()?;
    fields.add_point_source(
        Component::Ex,
        GaussianSource::new(0.7, 2.5, 0.0, 3.0),
        Point::at_z(zmax / 2.0 + 0.3),
        1.0,
    )?;
    let left = fields.add_flux_plane(Point::at_z(zmax / 3.0), Point::at_z(zmax / 3.0))?;
    let right = fields.add_flux_plane(
        Point::at_z(2.0 * zmax / 3.0),
        Point::at_z(2.0 * zmax / 3.0),
    )?;

    // Let the source switch off before timing.
    let last_source = fields.find_last_source();
    while fields.time() <= last_source {
        fields.step();
    }
    debug!(
        "flux 1D {zmax}: settled after {} steps, ttot = {}",
        fields.timestep(),
        workload.ttot
    );

    let settled = fields.timestep();
    let remaining = ((workload.ttot - fields.time()) * a / C).ceil().max(0.0) as u64;
    let progress = config.progress_bar(remaining);

    let mut flux_energy = 0.0;
    let start = Instant::now();
    while fields.time() < workload.ttot {
        fields.step();
        flux_energy += (C / a) * (fields.flux(right)? - fields.flux(left)?);
        if let Some(ref pb) = progress {
            pb.set_position(fields.timestep() - settled);
        }
    }
    let elapsed = start.elapsed().as_secs_f64();

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }
    fields.check_finite()?;

    debug!("flux 1D {zmax}: flux energy = {flux_energy}");
    info!(
        "flux 1D {zmax}: {} timesteps in {:.3}s",
        fields.timestep() - settled,
        elapsed
    );

    Ok((BenchResult::new(elapsed, workload.grid_steps()), flux_energy))
}
