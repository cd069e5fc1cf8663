//! FDTD solver benchmark suite.
//!
//! A small finite-difference time-domain solver for cylindrical (`m = 0`)
//! and one-dimensional volumes, plus the benchmark harness that times it
//! on a fixed set of scenarios and reports seconds per million grid-steps.
//!
//! ```no_run
//! use fdtd_bench::{BenchConfig, Driver, Runtime, SolverRunner};
//!
//! let mut runtime = Runtime::initialize(std::env::args())?;
//! Driver::new(SolverRunner::new(BenchConfig::default())).run(&mut runtime)?;
//! runtime.finalize()?;
//! # Ok::<(), fdtd_bench::Error>(())
//! ```

pub mod arrays;
pub mod bench;
pub mod constants;
pub mod driver;
pub mod error;
pub mod fdtd;
pub mod geometry;
pub mod material;
pub mod runtime;

pub use bench::{BenchConfig, BenchResult, Workload};
pub use driver::{standard_suite, Driver, Scenario, ScenarioRunner, SolverRunner};
pub use error::{Error, Result};
pub use runtime::Runtime;
