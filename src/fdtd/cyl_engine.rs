//! Cylindrical FDTD engine for azimuthal mode m = 0.
//!
//! With no φ dependence the fields split into two independent sets:
//! - TE: `Ep` at `(i, k)`, `Hr` at `(i, k+½)`, `Hz` at `(i+½, k)`
//! - TM: `Er` at `(i+½, k)`, `Ez` at `(i, k+½)`, `Hp` at `(i+½, k+½)`
//!
//! in units of the grid spacing. The outer wall `r = rmax` is a perfect
//! conductor and the axial direction is periodic with a Bloch phase.
//! All arrays are `(nr + 1) x nz`; half-offset components leave their
//! last radial row unused.

use crate::arrays::{Dimensions, Field2D, FieldValue};
use crate::constants::PI;
use crate::fdtd::engine_impl::{check_real_phase, EngineImpl, GridLocation};
use crate::fdtd::flux::FluxPlane;
use crate::fdtd::operator::{Coefficients, Operator};
use crate::fdtd::Component;
use crate::geometry::{Point, Volume, VolumeKind};
use crate::{Error, Result};
use num_complex::Complex64;

/// Value at `k + 1`, wrapping across the periodic boundary.
#[inline]
fn next_k<T: FieldValue>(f: &Field2D<T>, i: usize, k: usize, phase: Complex64) -> T {
    if k + 1 < f.dims().nz {
        f.get(i, k + 1)
    } else {
        f.get(i, 0).rotate(phase)
    }
}

/// Value at `k - 1`, wrapping across the periodic boundary.
#[inline]
fn prev_k<T: FieldValue>(f: &Field2D<T>, i: usize, k: usize, phase: Complex64) -> T {
    if k > 0 {
        f.get(i, k - 1)
    } else {
        f.get(i, f.dims().nz - 1).rotate(phase.conj())
    }
}

/// Half-grid offsets `(r, z)` of each component.
fn offsets(component: Component) -> Option<(usize, usize)> {
    match component {
        Component::Ep => Some((0, 0)),
        Component::Hr => Some((0, 1)),
        Component::Hz => Some((1, 0)),
        Component::Er => Some((1, 0)),
        Component::Ez => Some((0, 1)),
        Component::Hp => Some((1, 1)),
        _ => None,
    }
}

/// Cylindrical engine over scalar `T`.
#[derive(Debug, Clone)]
pub struct CylEngine<T> {
    ep: Field2D<T>,
    hr: Field2D<T>,
    hz: Field2D<T>,
    er: Field2D<T>,
    ez: Field2D<T>,
    hp: Field2D<T>,
    ep_coeff: Coefficients,
    hr_coeff: Coefficients,
    hz_coeff: Coefficients,
    er_coeff: Coefficients,
    ez_coeff: Coefficients,
    hp_coeff: Coefficients,
    /// Number of radial cells
    nr: usize,
    /// Number of axial cells
    nz: usize,
    /// Grid points per unit length
    a: f64,
    volume: Volume,
    /// Phase picked up when crossing z = zmax
    phase: Complex64,
}

impl<T: FieldValue> EngineImpl for CylEngine<T> {
    fn new(operator: &Operator) -> Result<Self> {
        let volume = operator.volume();
        if volume.kind() != VolumeKind::Cylindrical {
            return Err(Error::Config(
                "cylindrical engine needs a cylindrical volume".into(),
            ));
        }
        let nr = volume.nr();
        let nz = volume.nz();
        let dims = Dimensions::new(nr + 1, nz);
        let coeff = |component: Component| -> Coefficients {
            let (oi, ok) = offsets(component).unwrap_or((0, 0));
            let half = move |i: usize, k: usize| (2 * i + oi, 2 * k + ok);
            if component.is_magnetic() {
                operator.h_coefficients(dims, half)
            } else {
                operator.e_coefficients(dims, half)
            }
        };

        Ok(Self {
            ep: Field2D::new(dims),
            hr: Field2D::new(dims),
            hz: Field2D::new(dims),
            er: Field2D::new(dims),
            ez: Field2D::new(dims),
            hp: Field2D::new(dims),
            ep_coeff: coeff(Component::Ep),
            hr_coeff: coeff(Component::Hr),
            hz_coeff: coeff(Component::Hz),
            er_coeff: coeff(Component::Er),
            ez_coeff: coeff(Component::Ez),
            hp_coeff: coeff(Component::Hp),
            nr,
            nz,
            a: volume.resolution(),
            volume: volume.clone(),
            phase: Complex64::new(1.0, 0.0),
        })
    }

    fn update_h(&mut self) {
        let phase = self.phase;

        for i in 0..self.nr {
            let r_lo = i as f64;
            let r_hi = (i + 1) as f64;
            let r_mid = i as f64 + 0.5;

            for k in 0..self.nz {
                // dHr/dt = dEp/dz; Hr vanishes on the axis
                if i > 0 {
                    let curl = next_k(&self.ep, i, k, phase) - self.ep.get(i, k);
                    let hr = self.hr.get(i, k) * self.hr_coeff.a.get(i, k)
                        + curl * self.hr_coeff.b.get(i, k);
                    self.hr.set(i, k, hr);
                }

                // dHz/dt = -(1/r) d(r Ep)/dr
                let curl = (self.ep.get(i + 1, k) * r_hi - self.ep.get(i, k) * r_lo) * (1.0 / r_mid);
                let hz = self.hz.get(i, k) * self.hz_coeff.a.get(i, k)
                    - curl * self.hz_coeff.b.get(i, k);
                self.hz.set(i, k, hz);

                // dHp/dt = dEz/dr - dEr/dz
                let curl = (self.ez.get(i + 1, k) - self.ez.get(i, k))
                    - (next_k(&self.er, i, k, phase) - self.er.get(i, k));
                let hp = self.hp.get(i, k) * self.hp_coeff.a.get(i, k)
                    + curl * self.hp_coeff.b.get(i, k);
                self.hp.set(i, k, hp);
            }
        }
    }

    fn update_e(&mut self) {
        let phase = self.phase;

        for i in 0..self.nr {
            for k in 0..self.nz {
                // dEp/dt = (dHr/dz - dHz/dr) / eps; Ep vanishes on the axis
                if i > 0 {
                    let curl = (self.hr.get(i, k) - prev_k(&self.hr, i, k, phase))
                        - (self.hz.get(i, k) - self.hz.get(i - 1, k));
                    let ep = self.ep.get(i, k) * self.ep_coeff.a.get(i, k)
                        + curl * self.ep_coeff.b.get(i, k);
                    self.ep.set(i, k, ep);
                }

                // dEr/dt = -(dHp/dz) / eps
                let curl = self.hp.get(i, k) - prev_k(&self.hp, i, k, phase);
                let er = self.er.get(i, k) * self.er_coeff.a.get(i, k)
                    - curl * self.er_coeff.b.get(i, k);
                self.er.set(i, k, er);

                // dEz/dt = (1/r) d(r Hp)/dr / eps, with the Gauss-law limit on the axis
                let curl = if i == 0 {
                    self.hp.get(0, k) * 4.0
                } else {
                    let r = i as f64;
                    (self.hp.get(i, k) * (r + 0.5) - self.hp.get(i - 1, k) * (r - 0.5))
                        * (1.0 / r)
                };
                let ez = self.ez.get(i, k) * self.ez_coeff.a.get(i, k)
                    + curl * self.ez_coeff.b.get(i, k);
                self.ez.set(i, k, ez);
            }
        }
    }

    fn locate(&self, component: Component, position: &Point) -> Result<GridLocation> {
        let (oi, ok) = offsets(component).ok_or_else(|| {
            Error::Config(format!(
                "component {component} does not exist in a cylindrical volume"
            ))
        })?;
        // Any z is accepted when the volume has no axial extent.
        if !self.volume.contains(position) {
            return Err(Error::Config(format!(
                "source position ({}, {}) lies outside the {}x{} volume",
                position.r,
                position.z,
                self.volume.rmax(),
                self.volume.zmax()
            )));
        }

        // Last updated radial row: nr - 1 for Ep (wall at nr) and half-offset components.
        let i = (position.r * self.a - 0.5 * oi as f64).round().max(0.0) as usize;
        let i = i.min(self.nr - 1);
        let k = (position.z * self.a - 0.5 * ok as f64).round().max(0.0) as usize % self.nz;

        Ok(GridLocation { component, i, k })
    }

    fn inject(&mut self, location: &GridLocation, value: Complex64) {
        let value = T::from_complex(value);
        let field = match location.component {
            Component::Ep => &mut self.ep,
            Component::Hr => &mut self.hr,
            Component::Hz => &mut self.hz,
            Component::Er => &mut self.er,
            Component::Ez => &mut self.ez,
            Component::Hp => &mut self.hp,
            _ => return,
        };
        field.add(location.i, location.k, value);
    }

    fn flux_plane(&self, a: &Point, b: &Point) -> Result<FluxPlane> {
        if (a.z - b.z).abs() > 0.5 / self.a {
            return Err(Error::Config(format!(
                "cylindrical flux plane must have constant z, got z={} and z={}",
                a.z, b.z
            )));
        }
        let (r0, r1) = if a.r <= b.r { (a.r, b.r) } else { (b.r, a.r) };
        if !self.volume.contains(a) || !self.volume.contains(b) {
            return Err(Error::Config(format!(
                "flux plane r range [{r0}, {r1}] lies outside [0, {}]",
                self.volume.rmax()
            )));
        }
        let z = 0.5 * (a.z + b.z);
        let k = (z * self.a).round().max(0.0) as usize % self.nz;
        let i0 = (r0 * self.a).round() as usize;
        let i1 = ((r1 * self.a).round() as usize).clamp(i0, self.nr);

        Ok(FluxPlane::Cylindrical { k, i_range: i0..i1 })
    }

    fn flux(&self, plane: &FluxPlane) -> f64 {
        let FluxPlane::Cylindrical { k, i_range } = plane else {
            return 0.0;
        };
        let k = *k;
        let phase = self.phase;
        let da = 1.0 / self.a;
        let mut total = 0.0;

        // S_z = Er Hp* - Ep Hr*, integrated over 2πr dr
        for i in i_range.clone() {
            let hp = (self.hp.get(i, k) + prev_k(&self.hp, i, k, phase)) * 0.5;
            let hr = (self.hr.get(i, k) + prev_k(&self.hr, i, k, phase)) * 0.5;
            let r_mid = (i as f64 + 0.5) * da;
            let r = i as f64 * da;
            total += 2.0 * PI * r_mid * da * self.er.get(i, k).dot_conj(hp);
            total -= 2.0 * PI * r * da * self.ep.get(i, k).dot_conj(hr);
        }
        total
    }

    fn energy(&self) -> f64 {
        [&self.ep, &self.hr, &self.hz, &self.er, &self.ez, &self.hp]
            .iter()
            .map(|f| f.energy())
            .sum()
    }

    fn is_finite(&self) -> bool {
        [&self.ep, &self.hr, &self.hz, &self.er, &self.ez, &self.hp]
            .iter()
            .all(|f| f.is_finite())
    }

    fn set_bloch_phase(&mut self, phase: Complex64) -> Result<()> {
        check_real_phase::<T>(phase)?;
        self.phase = phase;
        Ok(())
    }

    fn bloch_phase(&self) -> Complex64 {
        self.phase
    }

    fn reset(&mut self) {
        for f in [
            &mut self.ep,
            &mut self.hr,
            &mut self.hz,
            &mut self.er,
            &mut self.ez,
            &mut self.hp,
        ] {
            f.clear();
        }
    }
}

impl<T: FieldValue> CylEngine<T> {
    /// Convert the stored fields to another scalar type.
    pub fn map_fields<U: FieldValue>(&self, f: impl Fn(T) -> U) -> CylEngine<U> {
        CylEngine {
            ep: self.ep.map(&f),
            hr: self.hr.map(&f),
            hz: self.hz.map(&f),
            er: self.er.map(&f),
            ez: self.ez.map(&f),
            hp: self.hp.map(&f),
            ep_coeff: self.ep_coeff.clone(),
            hr_coeff: self.hr_coeff.clone(),
            hz_coeff: self.hz_coeff.clone(),
            er_coeff: self.er_coeff.clone(),
            ez_coeff: self.ez_coeff.clone(),
            hp_coeff: self.hp_coeff.clone(),
            nr: self.nr,
            nz: self.nz,
            a: self.a,
            volume: self.volume.clone(),
            phase: self.phase,
        }
    }

    /// Field value of a component at grid index `(i, k)`.
    pub fn get(&self, component: Component, i: usize, k: usize) -> Option<T> {
        let field = match component {
            Component::Ep => &self.ep,
            Component::Hr => &self.hr,
            Component::Hz => &self.hz,
            Component::Er => &self.er,
            Component::Ez => &self.ez,
            Component::Hp => &self.hp,
            _ => return None,
        };
        Some(field.get(i, k))
    }
}
