//! Normalized unit system of the solver.
//!
//! Lengths are measured in arbitrary units `u`, the resolution `a` gives the
//! number of grid points per `u`. Vacuum permittivity and permeability are 1.

/// Speed of light in solver units, i.e. the Courant factor.
///
/// One timestep advances the time cursor by `C / a`, so a scenario that runs
/// to time `t` performs `t * a / C = 2 * t * a` steps.
pub const C: f64 = 0.5;

/// Pi.
pub const PI: f64 = std::f64::consts::PI;

/// Target normal-incidence reflection of the graded absorbing layers.
pub const PML_REFLECTION: f64 = 1e-8;

/// Polynomial grading order of the absorbing layers.
pub const PML_GRADING_ORDER: f64 = 2.0;
