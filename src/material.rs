//! Material description: relative permittivity and absorbing layers.

use crate::arrays::Field2D;
use crate::constants::{PML_GRADING_ORDER, PML_REFLECTION};
use crate::geometry::{Point, Volume};
use crate::{Error, Result};

/// Relative permittivity as a function of position.
pub trait Permittivity {
    /// Permittivity at `p`. Must be positive and finite.
    fn permittivity(&self, p: &Point) -> f64;
}

impl<F> Permittivity for F
where
    F: Fn(&Point) -> f64,
{
    fn permittivity(&self, p: &Point) -> f64 {
        self(p)
    }
}

/// Vacuum everywhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct Vacuum;

impl Permittivity for Vacuum {
    fn permittivity(&self, _p: &Point) -> f64 {
        1.0
    }
}

/// Dielectric slab centered on a fixed z.
///
/// Returns `outside` where `|z - center| > width` and `inside` elsewhere,
/// so the slab boundary itself belongs to the slab.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bump {
    pub center: f64,
    pub width: f64,
    pub inside: f64,
    pub outside: f64,
}

impl Bump {
    /// Slab of permittivity 12 in vacuum, centered at z = 50.
    pub fn new(width: f64) -> Self {
        Self {
            center: 50.0,
            width,
            inside: 12.0,
            outside: 1.0,
        }
    }
}

impl Permittivity for Bump {
    fn permittivity(&self, p: &Point) -> f64 {
        if (p.z - self.center).abs() > self.width {
            self.outside
        } else {
            self.inside
        }
    }
}

/// Permittivity sampled on a volume, plus absorbing layers along z.
#[derive(Debug, Clone)]
pub struct Material {
    volume: Volume,
    /// Permittivity at every half-grid location
    eps: Field2D<f64>,
    /// Absorbing layer thickness at z = 0
    pml_left: f64,
    /// Absorbing layer thickness at z = zmax
    pml_right: f64,
}

impl Material {
    /// Sample `eps` over the volume.
    pub fn new(volume: &Volume, eps: &dyn Permittivity) -> Result<Self> {
        let dims = volume.half_grid();
        let mut samples = Field2D::new(dims);

        for hi in 0..dims.nr {
            for hk in 0..dims.nz {
                let p = volume.half_point(hi, hk);
                let value = eps.permittivity(&p);
                if !(value > 0.0) || !value.is_finite() {
                    return Err(Error::Config(format!(
                        "permittivity must be positive, got {value} at r={}, z={}",
                        p.r, p.z
                    )));
                }
                samples.set(hi, hk, value);
            }
        }

        Ok(Self {
            volume: volume.clone(),
            eps: samples,
            pml_left: 0.0,
            pml_right: 0.0,
        })
    }

    /// Add an absorbing layer of the given thickness at z = 0.
    pub fn use_pml_left(&mut self, thickness: f64) -> Result<&mut Self> {
        self.check_pml(thickness, self.pml_right)?;
        self.pml_left = thickness;
        Ok(self)
    }

    /// Add an absorbing layer of the given thickness at z = zmax.
    pub fn use_pml_right(&mut self, thickness: f64) -> Result<&mut Self> {
        self.check_pml(self.pml_left, thickness)?;
        self.pml_right = thickness;
        Ok(self)
    }

    fn check_pml(&self, left: f64, right: f64) -> Result<()> {
        if !(left >= 0.0) || !(right >= 0.0) {
            return Err(Error::Config(format!(
                "absorbing layer thickness must be non-negative, got {left} / {right}"
            )));
        }
        if left + right > self.volume.zmax() {
            return Err(Error::Config(format!(
                "absorbing layers ({left} + {right}) exceed the volume length {}",
                self.volume.zmax()
            )));
        }
        Ok(())
    }

    pub fn volume(&self) -> &Volume {
        &self.volume
    }

    /// Permittivity at a half-grid location.
    #[inline]
    pub fn eps_at(&self, hi: usize, hk: usize) -> f64 {
        self.eps.get(hi, hk)
    }

    /// Electric conductivity of the absorbing layers at axial position `z`.
    ///
    /// Zero outside the layers, graded polynomially to `sigma_max` at the
    /// outer wall.
    pub fn conductivity(&self, z: f64) -> f64 {
        let depth_left = self.pml_left - z;
        let depth_right = z - (self.volume.zmax() - self.pml_right);

        if self.pml_left > 0.0 && depth_left > 0.0 {
            graded_sigma(depth_left, self.pml_left)
        } else if self.pml_right > 0.0 && depth_right > 0.0 {
            graded_sigma(depth_right, self.pml_right)
        } else {
            0.0
        }
    }
}

fn graded_sigma(depth: f64, thickness: f64) -> f64 {
    let sigma_max = -(PML_GRADING_ORDER + 1.0) * PML_REFLECTION.ln() / (2.0 * thickness);
    let rho = (depth / thickness).clamp(0.0, 1.0);
    sigma_max * rho.powf(PML_GRADING_ORDER)
}
