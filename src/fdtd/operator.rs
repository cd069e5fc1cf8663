//! Update coefficients derived from a material.
//!
//! The operator turns permittivity and absorbing-layer conductivity into the
//! per-location coefficients of the leapfrog updates
//!
//!   E = ca * E + cb * curl(H)
//!   H = da * H + db * curl(E)
//!
//! where the curls are plain differences and `cb`/`db` carry `dt / Δ`.

use crate::arrays::{Dimensions, Field2D};
use crate::constants::C;
use crate::geometry::Volume;
use crate::material::Material;

/// Update coefficients of one field component.
#[derive(Debug, Clone)]
pub struct Coefficients {
    /// Decay factor applied to the old value
    pub a: Field2D<f64>,
    /// Factor applied to the curl difference
    pub b: Field2D<f64>,
}

/// FDTD operator for a material.
#[derive(Debug, Clone)]
pub struct Operator {
    material: Material,
    dt: f64,
}

impl Operator {
    /// Create an operator for the given material.
    pub fn new(material: &Material) -> Self {
        let dt = C * material.volume().inva();
        Self {
            material: material.clone(),
            dt,
        }
    }

    /// Timestep size.
    pub fn timestep(&self) -> f64 {
        self.dt
    }

    pub fn volume(&self) -> &Volume {
        self.material.volume()
    }

    /// Electric coefficients for a component array of size `dims`.
    ///
    /// `half` maps an array index `(i, k)` to its half-grid location.
    pub fn e_coefficients(
        &self,
        dims: Dimensions,
        half: impl Fn(usize, usize) -> (usize, usize),
    ) -> Coefficients {
        let a_res = self.volume().resolution();
        self.build(dims, half, |eps, sigma| {
            let loss = sigma * self.dt / (2.0 * eps);
            let ca = (1.0 - loss) / (1.0 + loss);
            let cb = self.dt * a_res / eps / (1.0 + loss);
            (ca, cb)
        })
    }

    /// Magnetic coefficients for a component array of size `dims`.
    ///
    /// The magnetic conductivity is matched to the electric one
    /// (`sigma_m / mu = sigma / eps`) so the absorbing layers are
    /// reflectionless at normal incidence.
    pub fn h_coefficients(
        &self,
        dims: Dimensions,
        half: impl Fn(usize, usize) -> (usize, usize),
    ) -> Coefficients {
        let a_res = self.volume().resolution();
        self.build(dims, half, |eps, sigma| {
            let loss = sigma / eps * self.dt / 2.0;
            let da = (1.0 - loss) / (1.0 + loss);
            let db = self.dt * a_res / (1.0 + loss);
            (da, db)
        })
    }

    fn build(
        &self,
        dims: Dimensions,
        half: impl Fn(usize, usize) -> (usize, usize),
        coeff: impl Fn(f64, f64) -> (f64, f64),
    ) -> Coefficients {
        let volume = self.volume();
        let limit = volume.half_grid();
        let mut a = Field2D::new(dims);
        let mut b = Field2D::new(dims);

        for i in 0..dims.nr {
            for k in 0..dims.nz {
                let (hi, hk) = half(i, k);
                let (hi, hk) = (hi.min(limit.nr - 1), hk.min(limit.nz - 1));
                let eps = self.material.eps_at(hi, hk);
                let sigma = self.material.conductivity(volume.half_point(hi, hk).z);
                let (ca, cb) = coeff(eps, sigma);
                a.set(i, k, ca);
                b.set(i, k, cb);
            }
        }

        Coefficients { a, b }
    }
}
