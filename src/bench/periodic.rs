//! Cylindrical periodic scenario.

use crate::bench::{BenchConfig, BenchResult, Workload};
use crate::constants::C;
use crate::fdtd::{Component, Fields, GaussianSource};
use crate::geometry::{Point, Volume};
use crate::material::{Material, Permittivity};
use crate::{Error, Result};

use instant::Instant;
use log::{debug, info};

/// Time a cylindrical `m = 0` run with a periodic axial boundary.
///
/// Two Gaussian point sources (one TE, one TM) excite the cell, then the
/// fields are stepped until `ttot`. The whole run is measured.
///
/// # Arguments
/// * `config` - Resolution and progress settings
/// * `rmax` - Cell radius, must be positive
/// * `zmax` - Cell length; zero removes the axial dimension
/// * `eps` - Relative permittivity of the cell
///
/// # Returns
/// Wall time and the analytic grid-step count of the run.
pub fn bench_periodic(
    config: &BenchConfig,
    rmax: f64,
    zmax: f64,
    eps: &dyn Permittivity,
) -> Result<BenchResult> {
    if !(rmax > 0.0) || !(zmax >= 0.0) {
        return Err(Error::Config(format!(
            "periodic scenario needs rmax > 0 and zmax >= 0, got {rmax}x{zmax}"
        )));
    }

    let a = config.resolution();
    let workload = Workload::periodic(a, rmax, zmax);

    let volume = Volume::cylindrical(rmax, zmax, a)?;
    let material = Material::new(&volume, eps)?;
    let mut fields = Fields::with_mode(&material, 0)?;
    fields.use_bloch(0.0)?;

    fields.add_point_source(
        Component::Ep,
        GaussianSource::new(0.7, 2.5, 0.0, 4.0),
        Point::new(0.5, 0.4),
        1.0,
    )?;
    fields.add_point_source(
        Component::Ez,
        GaussianSource::new(0.8, 0.6, 0.0, 4.0),
        Point::new(0.401, 0.301),
        1.0,
    )?;

    debug!(
        "periodic {rmax}x{zmax}: gridpts = {}, ttot = {}",
        workload.gridpts, workload.ttot
    );

    let progress = config.progress_bar((workload.ttot * a / C).ceil() as u64);

    let start = Instant::now();
    while fields.time() < workload.ttot {
        fields.step();
        if let Some(ref pb) = progress {
            pb.set_position(fields.timestep());
        }
    }
    let elapsed = start.elapsed().as_secs_f64();

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }
    fields.check_finite()?;

    info!(
        "periodic {rmax}x{zmax}: {} timesteps in {:.3}s",
        fields.timestep(),
        elapsed
    );

    Ok(BenchResult::new(elapsed, workload.grid_steps()))
}
