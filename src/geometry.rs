//! Simulation volumes and positions.

use crate::arrays::Dimensions;
use crate::{Error, Result};

/// A position in the (r, z) plane.
///
/// One-dimensional volumes only use `z`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub r: f64,
    pub z: f64,
}

impl Point {
    pub fn new(r: f64, z: f64) -> Self {
        Self { r, z }
    }

    /// Position in a one-dimensional volume.
    pub fn at_z(z: f64) -> Self {
        Self { r: 0.0, z }
    }
}

/// Kind of volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeKind {
    /// Line along z
    OneD,
    /// Cylindrical (r, z) with azimuthal symmetry
    Cylindrical,
}

/// A discretized simulation domain.
#[derive(Debug, Clone, PartialEq)]
pub struct Volume {
    kind: VolumeKind,
    rmax: f64,
    zmax: f64,
    /// Grid points per unit length
    a: f64,
    nr: usize,
    nz: usize,
}

impl Volume {
    /// One-dimensional volume of length `zmax`.
    pub fn one_d(zmax: f64, a: f64) -> Result<Self> {
        check_resolution(a)?;
        if !(zmax > 0.0) || !zmax.is_finite() {
            return Err(Error::Config(format!(
                "1D volume needs a positive extent, got {zmax}"
            )));
        }
        let nz = cells(zmax, a);
        if nz < 2 {
            return Err(Error::Config(format!(
                "1D volume of extent {zmax} at resolution {a} has fewer than two cells"
            )));
        }
        Ok(Self {
            kind: VolumeKind::OneD,
            rmax: 0.0,
            zmax,
            a,
            nr: 1,
            nz,
        })
    }

    /// Cylindrical volume `0 <= r <= rmax`, `0 <= z < zmax`.
    ///
    /// `zmax == 0` yields a volume with a single axial cell, i.e. fields
    /// without z dependence.
    pub fn cylindrical(rmax: f64, zmax: f64, a: f64) -> Result<Self> {
        check_resolution(a)?;
        if !(rmax > 0.0) || !rmax.is_finite() {
            return Err(Error::Config(format!(
                "cylindrical volume needs a positive radius, got {rmax}"
            )));
        }
        if !(zmax >= 0.0) || !zmax.is_finite() {
            return Err(Error::Config(format!(
                "cylindrical volume needs a non-negative length, got {zmax}"
            )));
        }
        let nr = cells(rmax, a);
        if nr < 2 {
            return Err(Error::Config(format!(
                "cylindrical radius {rmax} at resolution {a} has fewer than two cells"
            )));
        }
        Ok(Self {
            kind: VolumeKind::Cylindrical,
            rmax,
            zmax,
            a,
            nr,
            nz: cells(zmax, a).max(1),
        })
    }

    pub fn kind(&self) -> VolumeKind {
        self.kind
    }

    /// Grid points per unit length.
    pub fn resolution(&self) -> f64 {
        self.a
    }

    /// Grid spacing.
    pub fn inva(&self) -> f64 {
        1.0 / self.a
    }

    pub fn rmax(&self) -> f64 {
        self.rmax
    }

    pub fn zmax(&self) -> f64 {
        self.zmax
    }

    /// Number of radial cells (1 for 1D volumes).
    pub fn nr(&self) -> usize {
        self.nr
    }

    /// Number of axial cells.
    pub fn nz(&self) -> usize {
        self.nz
    }

    /// Number of grid cells.
    pub fn num_cells(&self) -> usize {
        self.nr * self.nz
    }

    /// Dimensions of the half-step grid holding every Yee location.
    ///
    /// Half index `(hi, hk)` sits at `r = hi / (2a)`, `z = hk / (2a)`.
    pub fn half_grid(&self) -> Dimensions {
        match self.kind {
            VolumeKind::OneD => Dimensions::new(1, 2 * self.nz + 1),
            VolumeKind::Cylindrical => Dimensions::new(2 * self.nr + 1, 2 * self.nz + 1),
        }
    }

    /// Position of a half-grid index.
    pub fn half_point(&self, hi: usize, hk: usize) -> Point {
        let h = 0.5 * self.inva();
        Point::new(hi as f64 * h, hk as f64 * h)
    }

    /// Whether a point lies inside the volume.
    pub fn contains(&self, p: &Point) -> bool {
        let in_z = if self.kind == VolumeKind::Cylindrical && self.nz == 1 {
            true
        } else {
            p.z >= 0.0 && p.z <= self.zmax
        };
        match self.kind {
            VolumeKind::OneD => in_z,
            VolumeKind::Cylindrical => in_z && p.r >= 0.0 && p.r <= self.rmax,
        }
    }
}

fn check_resolution(a: f64) -> Result<()> {
    if a > 0.0 && a.is_finite() {
        Ok(())
    } else {
        Err(Error::Config(format!("resolution must be positive, got {a}")))
    }
}

fn cells(extent: f64, a: f64) -> usize {
    (extent * a).round() as usize
}
