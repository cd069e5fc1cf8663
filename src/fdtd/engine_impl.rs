//! Engine implementation trait.
//!
//! This module defines the core trait that every field-update engine
//! satisfies. It is used internally for compile-time dispatch via the
//! `Engine` enum.

use crate::arrays::FieldValue;
use crate::fdtd::flux::FluxPlane;
use crate::fdtd::{Component, Operator};
use crate::geometry::Point;
use crate::{Error, Result};
use num_complex::Complex64;

/// Grid location a point source injects into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLocation {
    /// Field component
    pub component: Component,
    /// Radial index (0 for 1D volumes)
    pub i: usize,
    /// Axial index
    pub k: usize,
}

/// Core trait that all engine implementations must satisfy.
///
/// An engine owns the field arrays of one volume kind and one storage
/// scalar. It knows nothing about time: the `Fields` wrapper keeps the
/// time cursor and calls the half-step updates in leapfrog order.
pub trait EngineImpl: Sized + Send {
    /// Create a new engine with all fields at zero.
    fn new(operator: &Operator) -> Result<Self>;

    /// H-field half step: `H = da*H + db*curl(E)`.
    fn update_h(&mut self);

    /// E-field half step: `E = ca*E + cb*curl(H)`.
    fn update_e(&mut self);

    /// Map a component and position to the nearest grid location.
    fn locate(&self, component: Component, position: &Point) -> Result<GridLocation>;

    /// Add `value` to the field at `location`.
    ///
    /// Real-valued engines keep only the real part.
    fn inject(&mut self, location: &GridLocation, value: Complex64);

    /// Resolve a flux plane spanning `a` to `b`.
    fn flux_plane(&self, a: &Point, b: &Point) -> Result<FluxPlane>;

    /// Energy flux through a resolved plane, towards increasing z.
    fn flux(&self, plane: &FluxPlane) -> f64;

    /// Sum of squared field magnitudes.
    fn energy(&self) -> f64;

    /// Whether all field values are finite.
    fn is_finite(&self) -> bool;

    /// Set the phase picked up across the periodic axial boundary.
    fn set_bloch_phase(&mut self, _phase: Complex64) -> Result<()> {
        Err(Error::Config(
            "this volume has no periodic boundary".into(),
        ))
    }

    /// Current Bloch phase factor (1 when not periodic).
    fn bloch_phase(&self) -> Complex64 {
        Complex64::new(1.0, 0.0)
    }

    /// Clear all fields.
    fn reset(&mut self);
}

/// Reject a phase that real-valued storage cannot represent.
pub(crate) fn check_real_phase<T: FieldValue>(phase: Complex64) -> Result<()> {
    if !T::IS_COMPLEX && phase.im.abs() > 1e-12 {
        return Err(Error::Config(format!(
            "Bloch phase {phase} needs complex fields"
        )));
    }
    Ok(())
}
