//! Process runtime.
//!
//! `Runtime` brackets a benchmark session: it is created once per process,
//! owns the report stream and is finalized exactly once, either explicitly
//! or when dropped. Only the master rank writes reports.

use std::fmt;
use std::io::{self, Stdout, Write};
use std::sync::atomic::{AtomicBool, Ordering};

use env_logger::{Builder, Target};
use log::{debug, warn, LevelFilter};

use crate::{Error, Result};

/// Set while a `Runtime` is alive.
static ACTIVE: AtomicBool = AtomicBool::new(false);

/// Stderr logger at a fixed level, independent of the environment.
fn log_builder() -> Builder {
    let mut builder = Builder::new();
    builder.filter_level(LevelFilter::Warn).target(Target::Stderr);
    builder
}

/// Install the stderr logger. Later calls are no-ops.
fn init_logging() {
    let _x = log_builder().try_init();
}

/// Session runtime owning the report stream.
pub struct Runtime<W: Write = Stdout> {
    out: W,
    args: Vec<String>,
    rank: usize,
    finalized: bool,
}

impl Runtime<Stdout> {
    /// Initialize the runtime, reporting to stdout.
    pub fn initialize<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_writer(args, io::stdout())
    }
}

impl<W: Write> Runtime<W> {
    /// Initialize the runtime with a custom report stream.
    ///
    /// Fails if another runtime is still alive in this process.
    pub fn with_writer<I, S>(args: I, out: W) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        init_logging();
        if ACTIVE
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(Error::Runtime("runtime is already initialized".into()));
        }

        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        debug!("runtime initialized with {} argument(s)", args.len());

        Ok(Self {
            out,
            args,
            rank: 0,
            finalized: false,
        })
    }

    /// Command line the runtime was initialized with.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Whether this process writes reports.
    pub fn is_master(&self) -> bool {
        self.rank == 0
    }

    /// Write formatted text to the report stream.
    ///
    /// Output is flushed right away so partial results survive an abort.
    pub fn report(&mut self, args: fmt::Arguments<'_>) -> Result<()> {
        if self.finalized {
            return Err(Error::Runtime("report after finalize".into()));
        }
        if self.is_master() {
            self.out.write_fmt(args)?;
            self.out.flush()?;
        }
        Ok(())
    }

    /// Finalize the runtime.
    pub fn finalize(mut self) -> Result<()> {
        self.shutdown()
    }

    fn shutdown(&mut self) -> Result<()> {
        if self.finalized {
            return Ok(());
        }
        self.finalized = true;
        ACTIVE.store(false, Ordering::Release);
        debug!("runtime finalized");
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write> Drop for Runtime<W> {
    fn drop(&mut self) {
        if let Err(e) = self.shutdown() {
            warn!("runtime shutdown failed: {e}");
        }
    }
}

/// Serializes tests that create a `Runtime`.
#[cfg(test)]
pub(crate) static TEST_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(test)]
mod tests {
    use super::*;

    fn lock() -> std::sync::MutexGuard<'static, ()> {
        TEST_LOCK.lock().unwrap_or_else(|e| e.into_inner())
    }

    #[test]
    fn test_report_writes_to_stream() {
        let _guard = lock();
        let mut buf = Vec::new();
        {
            let mut rt = Runtime::with_writer(["fdtd-bench"], &mut buf).unwrap();
            assert!(rt.is_master());
            assert_eq!(rt.rank(), 0);
            assert_eq!(rt.args(), ["fdtd-bench".to_string()]);
            rt.report(format_args!("Benchmarking...\n")).unwrap();
            rt.report(format_args!("{} + {}\n", 1, 2)).unwrap();
            rt.finalize().unwrap();
        }
        assert_eq!(String::from_utf8(buf).unwrap(), "Benchmarking...\n1 + 2\n");
    }

    #[test]
    fn test_double_initialize_fails() {
        let _guard = lock();
        let first = Runtime::with_writer(Vec::<String>::new(), Vec::new()).unwrap();
        assert!(matches!(
            Runtime::with_writer(Vec::<String>::new(), Vec::new()),
            Err(Error::Runtime(_))
        ));
        first.finalize().unwrap();

        let again = Runtime::with_writer(Vec::<String>::new(), Vec::new()).unwrap();
        again.finalize().unwrap();
    }

    #[test]
    fn test_drop_finalizes() {
        let _guard = lock();
        {
            let _rt = Runtime::with_writer(["a", "b"], Vec::new()).unwrap();
        }
        let rt = Runtime::with_writer(["a"], Vec::new()).unwrap();
        rt.finalize().unwrap();
    }

    #[test]
    fn test_log_level_ignores_environment() {
        std::env::set_var("RUST_LOG", "off");
        let level = log_builder().build().filter();
        std::env::remove_var("RUST_LOG");
        assert_eq!(level, LevelFilter::Warn);
    }

    #[test]
    fn test_report_after_shutdown_fails() {
        let _guard = lock();
        let mut rt = Runtime::with_writer(Vec::<String>::new(), Vec::new()).unwrap();
        rt.shutdown().unwrap();
        assert!(matches!(
            rt.report(format_args!("late\n")),
            Err(Error::Runtime(_))
        ));
    }
}
