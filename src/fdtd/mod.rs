//! FDTD field solver.
//!
//! - `Operator` derives update coefficients from a `Material`
//! - `OneDEngine` / `CylEngine` hold the fields and perform the updates
//! - `Engine` dispatches between them by volume kind and storage scalar
//! - `Fields` keeps time, sources and flux planes on top of an engine

pub mod cyl_engine;
pub mod engine;
pub mod engine_impl;
pub mod fields;
pub mod flux;
pub mod one_d_engine;
pub mod operator;
pub mod source;

pub use cyl_engine::CylEngine;
pub use engine::{Engine, FieldStorage};
pub use engine_impl::{EngineImpl, GridLocation};
pub use fields::Fields;
pub use flux::{FluxPlane, FluxPlaneId};
pub use one_d_engine::OneDEngine;
pub use operator::{Coefficients, Operator};
pub use source::{Component, GaussianSource};
