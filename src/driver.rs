//! Benchmark driver.
//!
//! Runs the fixed scenario suite in order and reports each result as soon
//! as it is available.

use std::io::Write;

use log::info;

use crate::bench::{bench_flux_1d, bench_periodic, format_report, BenchConfig, BenchResult};
use crate::material::{Bump, Permittivity, Vacuum};
use crate::runtime::Runtime;
use crate::Result;

/// First line of the benchmark output.
pub const HEADER: &str = "Benchmarking...\n";
/// Last line of the benchmark output.
pub const FOOTER: &str = "\nnote: 1 Mgs = 1 million grid point time steps\n";

/// One benchmark run with its literal parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum Scenario {
    /// Cylindrical periodic cell in vacuum
    Periodic {
        label: &'static str,
        rmax: f64,
        zmax: f64,
    },
    /// 1D flux run through a dielectric bump of half-width `width`
    Flux1d {
        label: &'static str,
        zmax: f64,
        width: f64,
    },
}

impl Scenario {
    /// Report label.
    pub fn label(&self) -> &'static str {
        match self {
            Scenario::Periodic { label, .. } | Scenario::Flux1d { label, .. } => label,
        }
    }

    /// Medium the scenario runs in.
    pub fn permittivity(&self) -> Box<dyn Permittivity> {
        match *self {
            Scenario::Periodic { .. } => Box::new(Vacuum),
            Scenario::Flux1d { width, .. } => Box::new(Bump::new(width)),
        }
    }
}

/// The standard suite, in run order.
pub fn standard_suite() -> Vec<Scenario> {
    vec![
        // The trailing space is part of the label.
        Scenario::Periodic {
            label: "Periodic 6x4 ",
            rmax: 6.0,
            zmax: 4.0,
        },
        Scenario::Periodic {
            label: "Periodic 12x1",
            rmax: 12.0,
            zmax: 1.0,
        },
        Scenario::Periodic {
            label: "Periodic 1x12",
            rmax: 1.0,
            zmax: 12.0,
        },
        Scenario::Periodic {
            label: "Periodic 12x0",
            rmax: 12.0,
            zmax: 0.0,
        },
        Scenario::Periodic {
            label: "Periodic 12x12",
            rmax: 12.0,
            zmax: 12.0,
        },
        Scenario::Flux1d {
            label: "Flux 1D 100",
            zmax: 100.0,
            width: 20.0,
        },
        Scenario::Flux1d {
            label: "Flux 1D 100",
            zmax: 100.0,
            width: 10.0,
        },
        Scenario::Flux1d {
            label: "Flux 1D 100",
            zmax: 100.0,
            width: 300.0,
        },
    ]
}

/// Executes a single scenario.
pub trait ScenarioRunner {
    fn run(&mut self, scenario: &Scenario) -> Result<BenchResult>;
}

/// Runs scenarios on the FDTD solver.
#[derive(Debug, Clone, Default)]
pub struct SolverRunner {
    config: BenchConfig,
}

impl SolverRunner {
    pub fn new(config: BenchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BenchConfig {
        &self.config
    }
}

impl ScenarioRunner for SolverRunner {
    fn run(&mut self, scenario: &Scenario) -> Result<BenchResult> {
        let eps = scenario.permittivity();
        match *scenario {
            Scenario::Periodic { rmax, zmax, .. } => {
                bench_periodic(&self.config, rmax, zmax, eps.as_ref())
            }
            Scenario::Flux1d { zmax, .. } => bench_flux_1d(&self.config, zmax, eps.as_ref()),
        }
    }
}

/// Runs a scenario list and writes the report.
pub struct Driver<R> {
    runner: R,
    scenarios: Vec<Scenario>,
}

impl<R: ScenarioRunner> Driver<R> {
    /// Driver over the standard suite.
    pub fn new(runner: R) -> Self {
        Self::with_scenarios(runner, standard_suite())
    }

    pub fn with_scenarios(runner: R, scenarios: Vec<Scenario>) -> Self {
        Self { runner, scenarios }
    }

    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    /// Run every scenario in order, reporting each result immediately.
    ///
    /// The first error aborts the run; results reported so far stay written.
    pub fn run<W: Write>(&mut self, runtime: &mut Runtime<W>) -> Result<Vec<BenchResult>> {
        runtime.report(format_args!("{HEADER}"))?;

        let mut results = Vec::with_capacity(self.scenarios.len());
        for scenario in &self.scenarios {
            info!("running {:?}", scenario);
            let result = self.runner.run(scenario)?;
            runtime.report(format_args!("{}", format_report(scenario.label(), &result)))?;
            results.push(result);
        }

        runtime.report(format_args!("{FOOTER}"))?;
        Ok(results)
    }

    pub fn into_runner(self) -> R {
        self.runner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Point, Volume};
    use crate::material::Material;
    use crate::runtime::TEST_LOCK;
    use crate::Error;

    /// Returns scripted results and records the order of calls.
    struct FakeRunner {
        calls: Vec<&'static str>,
        fail_at: Option<usize>,
    }

    impl FakeRunner {
        fn new() -> Self {
            Self {
                calls: Vec::new(),
                fail_at: None,
            }
        }
    }

    impl ScenarioRunner for FakeRunner {
        fn run(&mut self, scenario: &Scenario) -> Result<BenchResult> {
            if self.fail_at == Some(self.calls.len()) {
                return Err(Error::Numerical("diverged".into()));
            }
            self.calls.push(scenario.label());
            Ok(BenchResult::new(2.0, 1e6))
        }
    }

    #[test]
    fn test_standard_suite_order() {
        let suite = standard_suite();
        let labels: Vec<&str> = suite.iter().map(Scenario::label).collect();
        assert_eq!(
            labels,
            [
                "Periodic 6x4 ",
                "Periodic 12x1",
                "Periodic 1x12",
                "Periodic 12x0",
                "Periodic 12x12",
                "Flux 1D 100",
                "Flux 1D 100",
                "Flux 1D 100",
            ]
        );
        let widths: Vec<f64> = suite
            .iter()
            .filter_map(|s| match s {
                Scenario::Flux1d { width, .. } => Some(*width),
                _ => None,
            })
            .collect();
        assert_eq!(widths, [20.0, 10.0, 300.0]);
    }

    #[test]
    fn test_flux_scenarios_carry_their_width() {
        let volume = Volume::one_d(100.0, 10.0).unwrap();
        let materials: Vec<Material> = standard_suite()
            .iter()
            .filter(|s| matches!(s, Scenario::Flux1d { .. }))
            .map(|s| Material::new(&volume, s.permittivity().as_ref()).unwrap())
            .collect();
        assert_eq!(materials.len(), 3);

        // Half index 2 * a * z: z = 50, 35 and 0.
        let eps = |m: &Material| [m.eps_at(0, 1000), m.eps_at(0, 700), m.eps_at(0, 0)];
        assert_eq!(eps(&materials[0]), [12.0, 12.0, 1.0]);
        assert_eq!(eps(&materials[1]), [12.0, 1.0, 1.0]);
        assert_eq!(eps(&materials[2]), [12.0, 12.0, 12.0]);
    }

    #[test]
    fn test_periodic_scenarios_run_in_vacuum() {
        for scenario in standard_suite() {
            if let Scenario::Periodic { .. } = scenario {
                let eps = scenario.permittivity();
                assert_eq!(eps.permittivity(&Point::new(0.5, 0.4)), 1.0);
            }
        }
    }

    #[test]
    fn test_driver_output() {
        let _guard = TEST_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let mut buf = Vec::new();
        {
            let mut runtime = Runtime::with_writer(["fdtd-bench"], &mut buf).unwrap();
            let mut driver = Driver::new(FakeRunner::new());
            let results = driver.run(&mut runtime).unwrap();
            assert_eq!(results.len(), 8);
            assert_eq!(driver.into_runner().calls.len(), 8);
            runtime.finalize().unwrap();
        }

        let out = String::from_utf8(buf).unwrap();
        assert!(out.starts_with("Benchmarking...\nPeriodic 6x4 \n  total time:    \t2 s\n"));
        assert!(out.ends_with("s/Mgs\n\nnote: 1 Mgs = 1 million grid point time steps\n"));
        assert_eq!(out.matches("  normalized time:\t2 s/Mgs\n").count(), 8);
        assert_eq!(out.matches("Flux 1D 100\n").count(), 3);
    }

    #[test]
    fn test_driver_aborts_on_error() {
        let _guard = TEST_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let mut buf = Vec::new();
        {
            let mut runtime = Runtime::with_writer(["fdtd-bench"], &mut buf).unwrap();
            let mut runner = FakeRunner::new();
            runner.fail_at = Some(2);
            let mut driver = Driver::new(runner);
            assert!(matches!(driver.run(&mut runtime), Err(Error::Numerical(_))));
        }

        let out = String::from_utf8(buf).unwrap();
        assert_eq!(out.matches("total time").count(), 2);
        assert!(!out.contains("note:"));
    }
}
