//! One-dimensional FDTD engine.
//!
//! Fields are `Ex` on the integer nodes `z = k/a` (`k = 0..=n`) and `Hy`
//! on the half nodes `z = (k + 1/2)/a` (`k = 0..n`). The end nodes of `Ex`
//! are perfect conductors; open boundaries come from the material's
//! absorbing layers.

use crate::arrays::{Dimensions, Field2D, FieldValue};
use crate::fdtd::engine_impl::{EngineImpl, GridLocation};
use crate::fdtd::flux::FluxPlane;
use crate::fdtd::operator::{Coefficients, Operator};
use crate::fdtd::Component;
use crate::geometry::{Point, Volume, VolumeKind};
use crate::{Error, Result};
use num_complex::Complex64;

/// One-dimensional engine over scalar `T`.
#[derive(Debug, Clone)]
pub struct OneDEngine<T> {
    ex: Field2D<T>,
    hy: Field2D<T>,
    e_coeff: Coefficients,
    h_coeff: Coefficients,
    /// Number of cells
    n: usize,
    /// Grid points per unit length
    a: f64,
    volume: Volume,
}

impl<T: FieldValue> EngineImpl for OneDEngine<T> {
    fn new(operator: &Operator) -> Result<Self> {
        let volume = operator.volume();
        if volume.kind() != VolumeKind::OneD {
            return Err(Error::Config(
                "1D engine needs a one-dimensional volume".into(),
            ));
        }
        let n = volume.nz();
        let e_dims = Dimensions::new(1, n + 1);
        let h_dims = Dimensions::new(1, n);

        Ok(Self {
            ex: Field2D::new(e_dims),
            hy: Field2D::new(h_dims),
            e_coeff: operator.e_coefficients(e_dims, |_, k| (0, 2 * k)),
            h_coeff: operator.h_coefficients(h_dims, |_, k| (0, 2 * k + 1)),
            n,
            a: volume.resolution(),
            volume: volume.clone(),
        })
    }

    fn update_h(&mut self) {
        // dHy/dt = -dEx/dz
        for k in 0..self.n {
            let curl = self.ex.get(0, k + 1) - self.ex.get(0, k);
            let da = self.h_coeff.a.get(0, k);
            let db = self.h_coeff.b.get(0, k);
            let hy = self.hy.get(0, k) * da - curl * db;
            self.hy.set(0, k, hy);
        }
    }

    fn update_e(&mut self) {
        // dEx/dt = -(1/eps) dHy/dz
        for k in 1..self.n {
            let curl = self.hy.get(0, k) - self.hy.get(0, k - 1);
            let ca = self.e_coeff.a.get(0, k);
            let cb = self.e_coeff.b.get(0, k);
            let ex = self.ex.get(0, k) * ca - curl * cb;
            self.ex.set(0, k, ex);
        }
    }

    fn locate(&self, component: Component, position: &Point) -> Result<GridLocation> {
        if !self.volume.contains(position) {
            return Err(Error::Config(format!(
                "source position z={} lies outside the volume [0, {}]",
                position.z,
                self.volume.zmax()
            )));
        }
        let k = match component {
            Component::Ex => ((position.z * self.a).round() as usize).clamp(1, self.n - 1),
            Component::Hy => ((position.z * self.a - 0.5).round().max(0.0) as usize).min(self.n - 1),
            other => {
                return Err(Error::Config(format!(
                    "component {other} does not exist in a 1D volume"
                )))
            }
        };
        Ok(GridLocation { component, i: 0, k })
    }

    fn inject(&mut self, location: &GridLocation, value: Complex64) {
        let value = T::from_complex(value);
        match location.component {
            Component::Hy => self.hy.add(0, location.k, value),
            _ => self.ex.add(0, location.k, value),
        }
    }

    fn flux_plane(&self, a: &Point, b: &Point) -> Result<FluxPlane> {
        if (a.z - b.z).abs() > 0.5 / self.a {
            return Err(Error::Config(format!(
                "1D flux plane must be a single point, got z={} and z={}",
                a.z, b.z
            )));
        }
        let z = 0.5 * (a.z + b.z);
        if !self.volume.contains(&Point::at_z(z)) {
            return Err(Error::Config(format!(
                "flux plane z={z} lies outside the volume [0, {}]",
                self.volume.zmax()
            )));
        }
        let k = ((z * self.a).round() as usize).clamp(1, self.n - 1);
        Ok(FluxPlane::OneD { k })
    }

    fn flux(&self, plane: &FluxPlane) -> f64 {
        match plane {
            FluxPlane::OneD { k } => {
                let k = *k;
                let hy = (self.hy.get(0, k - 1) + self.hy.get(0, k)) * 0.5;
                self.ex.get(0, k).dot_conj(hy)
            }
            FluxPlane::Cylindrical { .. } => 0.0,
        }
    }

    fn energy(&self) -> f64 {
        self.ex.energy() + self.hy.energy()
    }

    fn is_finite(&self) -> bool {
        self.ex.is_finite() && self.hy.is_finite()
    }

    fn reset(&mut self) {
        self.ex.clear();
        self.hy.clear();
    }
}

impl<T: FieldValue> OneDEngine<T> {
    /// Convert the stored fields to another scalar type.
    pub fn map_fields<U: FieldValue>(&self, f: impl Fn(T) -> U) -> OneDEngine<U> {
        OneDEngine {
            ex: self.ex.map(&f),
            hy: self.hy.map(&f),
            e_coeff: self.e_coeff.clone(),
            h_coeff: self.h_coeff.clone(),
            n: self.n,
            a: self.a,
            volume: self.volume.clone(),
        }
    }

    /// Electric field at node `k`.
    pub fn ex(&self, k: usize) -> T {
        self.ex.get(0, k)
    }

    /// Magnetic field at half node `k`.
    pub fn hy(&self, k: usize) -> T {
        self.hy.get(0, k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Volume;
    use crate::material::{Material, Vacuum};

    fn create_test_engine(zmax: f64, pml: f64) -> OneDEngine<f64> {
        let volume = Volume::one_d(zmax, 10.0).unwrap();
        let mut material = Material::new(&volume, &Vacuum).unwrap();
        material.use_pml_left(pml).unwrap().use_pml_right(pml).unwrap();
        OneDEngine::new(&Operator::new(&material)).unwrap()
    }

    #[test]
    fn test_engine_creation() {
        let engine = create_test_engine(10.0, 0.0);
        assert_eq!(engine.n, 100);
        assert_eq!(engine.energy(), 0.0);
    }

    #[test]
    fn test_rejects_cylindrical_volume() {
        let volume = Volume::cylindrical(1.0, 1.0, 10.0).unwrap();
        let material = Material::new(&volume, &Vacuum).unwrap();
        assert!(OneDEngine::<f64>::new(&Operator::new(&material)).is_err());
    }

    #[test]
    fn test_locate() {
        let engine = create_test_engine(10.0, 0.0);
        let loc = engine.locate(Component::Ex, &Point::at_z(5.3)).unwrap();
        assert_eq!(loc, GridLocation { component: Component::Ex, i: 0, k: 53 });

        // End nodes are conductors; sources snap inwards.
        let loc = engine.locate(Component::Ex, &Point::at_z(0.0)).unwrap();
        assert_eq!(loc.k, 1);

        assert!(engine.locate(Component::Ez, &Point::at_z(5.0)).is_err());
        assert!(engine.locate(Component::Ex, &Point::at_z(11.0)).is_err());
        assert!(engine.locate(Component::Hy, &Point::at_z(-0.5)).is_err());
        assert!(engine.locate(Component::Hy, &Point::at_z(10.0)).is_ok());
        assert!(engine
            .flux_plane(&Point::at_z(10.5), &Point::at_z(10.5))
            .is_err());
    }

    #[test]
    fn test_pulse_propagates_both_ways() {
        let mut engine = create_test_engine(20.0, 0.0);
        let loc = engine.locate(Component::Ex, &Point::at_z(10.0)).unwrap();
        engine.inject(&loc, Complex64::new(1.0, 0.0));

        for _ in 0..40 {
            engine.update_h();
            engine.update_e();
        }

        // After 40 steps at Courant 0.5 the pulse has moved about 20 cells.
        let left: f64 = (71..91).map(|k| engine.ex(k).abs()).sum();
        let right: f64 = (110..130).map(|k| engine.ex(k).abs()).sum();
        assert!(left > 1e-3);
        assert!((left - right).abs() < 1e-9);
        assert!(engine.ex(0) == 0.0 && engine.ex(200) == 0.0);
    }

    fn inject_gaussian(engine: &mut OneDEngine<f64>, center: f64, width: f64) {
        for k in 1..engine.n {
            let z = k as f64 / engine.a;
            let arg = (z - center) / width;
            let loc = engine.locate(Component::Ex, &Point::at_z(z)).unwrap();
            engine.inject(&loc, Complex64::new((-arg * arg).exp(), 0.0));
        }
    }

    #[test]
    fn test_absorbing_layers_remove_energy() {
        let mut engine = create_test_engine(30.0, 5.0);
        inject_gaussian(&mut engine, 15.0, 1.0);
        let initial = engine.energy();

        for _ in 0..2000 {
            engine.update_h();
            engine.update_e();
        }

        assert!(engine.is_finite());
        assert!(engine.energy() < 1e-3 * initial);
    }

    #[test]
    fn test_flux_plane_resolution() {
        let engine = create_test_engine(30.0, 0.0);
        let plane = engine
            .flux_plane(&Point::at_z(10.0), &Point::at_z(10.0))
            .unwrap();
        assert_eq!(plane, FluxPlane::OneD { k: 100 });
        assert!(engine
            .flux_plane(&Point::at_z(10.0), &Point::at_z(12.0))
            .is_err());
    }

    #[test]
    fn test_rightward_flux_is_positive() {
        let mut engine = create_test_engine(30.0, 0.0);
        let plane = engine
            .flux_plane(&Point::at_z(20.0), &Point::at_z(20.0))
            .unwrap();
        inject_gaussian(&mut engine, 15.0, 1.0);

        let mut total = 0.0;
        for _ in 0..200 {
            engine.update_h();
            engine.update_e();
            total += engine.flux(&plane);
        }
        assert!(total > 0.0);
    }

    #[test]
    fn test_map_to_real_keeps_real_part() {
        let volume = Volume::one_d(10.0, 10.0).unwrap();
        let material = Material::new(&volume, &Vacuum).unwrap();
        let mut engine = OneDEngine::<Complex64>::new(&Operator::new(&material)).unwrap();
        let loc = engine.locate(Component::Ex, &Point::at_z(5.0)).unwrap();
        engine.inject(&loc, Complex64::new(2.0, 3.0));

        let real = engine.map_fields(f64::from_complex);
        assert_eq!(real.ex(50), 2.0);
        assert_eq!(real.energy(), 4.0);
    }
}
