//! Unified FDTD engine with enum-based dispatch.
//!
//! The `Engine` enum selects an implementation by volume kind and storage
//! scalar, and forwards calls through a match instead of a trait object.

use crate::fdtd::engine_impl::{check_real_phase, EngineImpl, GridLocation};
use crate::fdtd::flux::FluxPlane;
use crate::fdtd::{Component, CylEngine, OneDEngine, Operator};
use crate::geometry::{Point, VolumeKind};
use crate::Result;
use num_complex::Complex64;

/// Scalar type of the field arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldStorage {
    /// Real-valued fields
    Real,
    /// Complex-valued fields
    #[default]
    Complex,
}

/// Main FDTD engine enum with compile-time dispatch.
pub enum Engine {
    /// 1D, real fields
    OneDReal(OneDEngine<f64>),
    /// 1D, complex fields
    OneDComplex(OneDEngine<Complex64>),
    /// Cylindrical, real fields
    CylReal(CylEngine<f64>),
    /// Cylindrical, complex fields
    CylComplex(CylEngine<Complex64>),
}

/// Dispatch an `EngineImpl` method to the active variant.
macro_rules! dispatch_engine {
    ($self:expr, $method:ident($($args:expr),*)) => {
        match $self {
            Engine::OneDReal(e) => e.$method($($args),*),
            Engine::OneDComplex(e) => e.$method($($args),*),
            Engine::CylReal(e) => e.$method($($args),*),
            Engine::CylComplex(e) => e.$method($($args),*),
        }
    };
}

impl Engine {
    /// Create an engine matching the operator's volume.
    ///
    /// # Arguments
    /// * `operator` - Coefficients and volume the engine updates
    /// * `storage` - Scalar type of the field arrays
    ///
    /// # Returns
    /// An engine with all fields at zero, or a config error if the volume
    /// cannot be gridded.
    pub fn new(operator: &Operator, storage: FieldStorage) -> Result<Self> {
        Ok(match (operator.volume().kind(), storage) {
            (VolumeKind::OneD, FieldStorage::Real) => Engine::OneDReal(OneDEngine::new(operator)?),
            (VolumeKind::OneD, FieldStorage::Complex) => {
                Engine::OneDComplex(OneDEngine::new(operator)?)
            }
            (VolumeKind::Cylindrical, FieldStorage::Real) => {
                Engine::CylReal(CylEngine::new(operator)?)
            }
            (VolumeKind::Cylindrical, FieldStorage::Complex) => {
                Engine::CylComplex(CylEngine::new(operator)?)
            }
        })
    }

    /// Storage scalar of the active variant.
    pub fn storage(&self) -> FieldStorage {
        match self {
            Engine::OneDReal(_) | Engine::CylReal(_) => FieldStorage::Real,
            Engine::OneDComplex(_) | Engine::CylComplex(_) => FieldStorage::Complex,
        }
    }

    /// Switch to real storage, keeping the real part of every field.
    ///
    /// Fails when a complex Bloch phase is active; the engine is left
    /// unchanged in that case.
    pub fn make_real(&mut self) -> Result<()> {
        let real = match self {
            Engine::OneDComplex(e) => Engine::OneDReal(e.map_fields(|v| v.re)),
            Engine::CylComplex(e) => {
                check_real_phase::<f64>(e.bloch_phase())?;
                Engine::CylReal(e.map_fields(|v| v.re))
            }
            Engine::OneDReal(_) | Engine::CylReal(_) => return Ok(()),
        };
        *self = real;
        Ok(())
    }

    #[inline]
    pub fn update_h(&mut self) {
        dispatch_engine!(self, update_h())
    }

    #[inline]
    pub fn update_e(&mut self) {
        dispatch_engine!(self, update_e())
    }

    pub fn locate(&self, component: Component, position: &Point) -> Result<GridLocation> {
        dispatch_engine!(self, locate(component, position))
    }

    #[inline]
    pub fn inject(&mut self, location: &GridLocation, value: Complex64) {
        dispatch_engine!(self, inject(location, value))
    }

    pub fn flux_plane(&self, a: &Point, b: &Point) -> Result<FluxPlane> {
        dispatch_engine!(self, flux_plane(a, b))
    }

    #[inline]
    pub fn flux(&self, plane: &FluxPlane) -> f64 {
        dispatch_engine!(self, flux(plane))
    }

    pub fn energy(&self) -> f64 {
        dispatch_engine!(self, energy())
    }

    pub fn is_finite(&self) -> bool {
        dispatch_engine!(self, is_finite())
    }

    pub fn set_bloch_phase(&mut self, phase: Complex64) -> Result<()> {
        dispatch_engine!(self, set_bloch_phase(phase))
    }

    pub fn bloch_phase(&self) -> Complex64 {
        dispatch_engine!(self, bloch_phase())
    }

    pub fn reset(&mut self) {
        dispatch_engine!(self, reset())
    }
}
