use std::process::ExitCode;

use fdtd_bench::{BenchConfig, Driver, Runtime, SolverRunner};
use log::error;

fn run() -> fdtd_bench::Result<()> {
    let mut runtime = Runtime::initialize(std::env::args())?;
    let mut driver = Driver::new(SolverRunner::new(BenchConfig::default()));
    driver.run(&mut runtime)?;
    runtime.finalize()
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("benchmark aborted: {e}");
            ExitCode::FAILURE
        }
    }
}
