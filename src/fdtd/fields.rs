//! Time-stepped field evolution.
//!
//! `Fields` owns an engine, the time cursor, the registered point sources
//! and flux planes. It is the object benchmark scenarios drive.

use crate::constants::PI;
use crate::fdtd::engine_impl::GridLocation;
use crate::fdtd::flux::{FluxPlane, FluxPlaneId};
use crate::fdtd::{Component, Engine, FieldStorage, GaussianSource, Operator};
use crate::geometry::{Point, Volume, VolumeKind};
use crate::material::Material;
use crate::{Error, Result};

use log::debug;
use num_complex::Complex64;

/// A point source bound to a grid location.
#[derive(Debug, Clone)]
struct PointSource {
    location: GridLocation,
    source: GaussianSource,
    amplitude: f64,
}

/// Field evolution over a material.
pub struct Fields {
    engine: Engine,
    volume: Volume,
    /// Timestep size
    dt: f64,
    /// Number of completed steps
    timestep: u64,
    /// Azimuthal mode number
    m: i32,
    sources: Vec<PointSource>,
    flux_planes: Vec<FluxPlane>,
}

impl Fields {
    /// Create complex-valued fields with azimuthal mode 0.
    pub fn new(material: &Material) -> Result<Self> {
        Self::with_mode(material, 0)
    }

    /// Create complex-valued fields with azimuthal mode `m`.
    ///
    /// Only `m = 0` is supported for cylindrical volumes; `m` is ignored
    /// for 1D volumes.
    pub fn with_mode(material: &Material, m: i32) -> Result<Self> {
        let volume = material.volume().clone();
        if volume.kind() == VolumeKind::Cylindrical && m != 0 {
            return Err(Error::Config(format!(
                "azimuthal mode m = {m} is not supported, only m = 0"
            )));
        }

        let operator = Operator::new(material);
        let engine = Engine::new(&operator, FieldStorage::Complex)?;

        debug!(
            "fields: {:?} volume, {} cells, dt = {}",
            volume.kind(),
            volume.num_cells(),
            operator.timestep()
        );

        Ok(Self {
            engine,
            volume,
            dt: operator.timestep(),
            timestep: 0,
            m,
            sources: Vec::new(),
            flux_planes: Vec::new(),
        })
    }

    /// Use a periodic axial boundary with Bloch wavevector `k`.
    ///
    /// Fields crossing `z = zmax` pick up the phase `exp(2πi k zmax)`.
    /// `k = 0` is a plain periodic boundary.
    pub fn use_bloch(&mut self, k: f64) -> Result<()> {
        let phase = Complex64::from_polar(1.0, 2.0 * PI * k * self.volume.zmax());
        self.engine.set_bloch_phase(phase)
    }

    /// Switch to real-valued field storage.
    ///
    /// Only the real part of the sources is injected from now on.
    pub fn use_real_fields(&mut self) -> Result<()> {
        self.engine.make_real()
    }

    /// Add a point source.
    ///
    /// # Arguments
    /// * `component` - Field component the source drives
    /// * `source` - Time profile
    /// * `position` - Snapped to the nearest grid location of `component`
    /// * `amplitude` - Scale applied to the time profile
    pub fn add_point_source(
        &mut self,
        component: Component,
        source: GaussianSource,
        position: Point,
        amplitude: f64,
    ) -> Result<()> {
        let location = self.engine.locate(component, &position)?;
        debug!(
            "source {component} at ({}, {}) -> cell ({}, {}), off after t = {}",
            position.r,
            position.z,
            location.i,
            location.k,
            source.last_time()
        );
        self.sources.push(PointSource {
            location,
            source,
            amplitude,
        });
        Ok(())
    }

    /// Register a flux plane spanning `a` to `b`.
    pub fn add_flux_plane(&mut self, a: Point, b: Point) -> Result<FluxPlaneId> {
        let plane = self.engine.flux_plane(&a, &b)?;
        self.flux_planes.push(plane);
        Ok(FluxPlaneId(self.flux_planes.len() - 1))
    }

    /// Instantaneous flux through a registered plane.
    pub fn flux(&self, id: FluxPlaneId) -> Result<f64> {
        let plane = self
            .flux_planes
            .get(id.0)
            .ok_or_else(|| Error::Config(format!("unknown flux plane {}", id.0)))?;
        Ok(self.engine.flux(plane))
    }

    /// Advance one timestep.
    pub fn step(&mut self) {
        let t = self.time();

        self.engine.update_h();
        self.inject_sources(t, true);
        self.engine.update_e();
        self.inject_sources(t, false);

        self.timestep += 1;
    }

    fn inject_sources(&mut self, t: f64, magnetic: bool) {
        for src in &self.sources {
            if src.location.component.is_magnetic() != magnetic || !src.source.is_active(t) {
                continue;
            }
            let value = src.source.amplitude_at(t) * (self.dt * src.amplitude);
            self.engine.inject(&src.location, value);
        }
    }

    /// Current simulation time.
    pub fn time(&self) -> f64 {
        self.timestep as f64 * self.dt
    }

    /// Number of completed steps.
    pub fn timestep(&self) -> u64 {
        self.timestep
    }

    /// Timestep size.
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Time after which every registered source is off (0 without sources).
    pub fn find_last_source(&self) -> f64 {
        self.sources
            .iter()
            .map(|s| s.source.last_time())
            .fold(0.0, f64::max)
    }

    pub fn volume(&self) -> &Volume {
        &self.volume
    }

    /// Azimuthal mode number.
    pub fn mode(&self) -> i32 {
        self.m
    }

    pub fn storage(&self) -> FieldStorage {
        self.engine.storage()
    }

    /// Sum of squared field magnitudes.
    pub fn energy(&self) -> f64 {
        self.engine.energy()
    }

    /// Fail if any field value has become non-finite.
    pub fn check_finite(&self) -> Result<()> {
        if self.engine.is_finite() {
            Ok(())
        } else {
            Err(Error::Numerical(format!(
                "non-finite field values at t = {}",
                self.time()
            )))
        }
    }

    /// Clear the fields and rewind the time cursor. Sources and flux planes stay.
    pub fn reset(&mut self) {
        self.engine.reset();
        self.timestep = 0;
    }
}
