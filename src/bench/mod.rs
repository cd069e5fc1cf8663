//! Benchmark scenarios and their measurement protocol.
//!
//! Each scenario builds a fresh `Fields` instance, advances it to an
//! analytically chosen end time and reports the wall-clock time of the
//! measured phase together with the predicted workload in grid-steps.

pub mod flux;
pub mod periodic;
pub mod report;

pub use flux::bench_flux_1d;
pub use periodic::bench_periodic;
pub use report::{format_general, format_report};

use indicatif::{ProgressBar, ProgressStyle};

/// Timing of one scenario run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BenchResult {
    /// Wall-clock time of the measured phase in seconds
    pub elapsed_time: f64,
    /// Predicted grid-point updates of the measured phase
    pub grid_steps: f64,
}

impl BenchResult {
    pub fn new(elapsed_time: f64, grid_steps: f64) -> Self {
        Self {
            elapsed_time,
            grid_steps,
        }
    }

    /// Seconds per million grid-steps.
    pub fn normalized_time(&self) -> f64 {
        self.elapsed_time * 1e6 / self.grid_steps
    }
}

/// Analytic workload of a scenario.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Workload {
    /// Grid points per unit length
    pub a: f64,
    /// Resolution-scaled cell count
    pub gridpts: f64,
    /// Simulated end time
    pub ttot: f64,
}

impl Workload {
    /// Workload of the cylindrical periodic scenario.
    ///
    /// A zero axial extent collapses one dimension of the cell count.
    /// Smaller grids run longer so every scenario does comparable work.
    pub fn periodic(a: f64, rmax: f64, zmax: f64) -> Self {
        let gridpts = if zmax == 0.0 {
            a * rmax
        } else {
            a * a * rmax * zmax
        };
        Self {
            a,
            gridpts,
            ttot: 5.0 + 1e5 / gridpts,
        }
    }

    /// Workload of the one-dimensional flux scenario.
    pub fn flux_1d(a: f64, zmax: f64) -> Self {
        Self {
            a,
            gridpts: a * zmax,
            ttot: 10.0 + 1e5 / zmax,
        }
    }

    /// Grid-point updates up to `ttot`.
    ///
    /// The factor 2 counts the two staggered half steps (E and H) of
    /// every timestep.
    pub fn grid_steps(&self) -> f64 {
        self.ttot * self.a * 2.0 * self.gridpts
    }
}

/// Settings shared by all scenario runs.
#[derive(Debug, Clone)]
pub struct BenchConfig {
    /// Grid points per unit length
    resolution: f64,
    /// Draw a progress bar on stderr during each run
    show_progress: bool,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            resolution: 10.0,
            show_progress: false,
        }
    }
}

impl BenchConfig {
    /// Set the grid resolution.
    pub fn set_resolution(&mut self, resolution: f64) -> &mut Self {
        self.resolution = resolution;
        self
    }

    /// Enable/disable the progress bar.
    ///
    /// Drawing the bar costs time inside the measured phase.
    pub fn set_show_progress(&mut self, show: bool) -> &mut Self {
        self.show_progress = show;
        self
    }

    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    pub fn show_progress(&self) -> bool {
        self.show_progress
    }

    /// Progress bar over `steps` timesteps, if enabled.
    pub(crate) fn progress_bar(&self, steps: u64) -> Option<ProgressBar> {
        if !self.show_progress {
            return None;
        }
        let pb = ProgressBar::new(steps);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} ({per_sec})")
        {
            pb.set_style(style.progress_chars("##-"));
        }
        Some(pb)
    }
}
