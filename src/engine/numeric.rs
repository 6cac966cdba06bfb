//! Scoped numeric-error mode
//!
//! Maps are evaluated at and near their poles on purpose, so infinities and
//! NaN are routine. In [`NumericErrorMode::Warn`] the engines report them
//! through `log::warn!`; inside a [`NumericErrorGuard`] they stay quiet.
//!
//! The mode is held per thread. A guard restores the mode it found on every
//! exit path: normal return, `?` early return and unwinding panic.
//!
//! ```rust
//! use bifurc_rs::engine::numeric::{numeric_error_mode, NumericErrorGuard, NumericErrorMode};
//!
//! assert_eq!(numeric_error_mode(), NumericErrorMode::Warn);
//! {
//!     let _quiet = NumericErrorGuard::suppress();
//!     assert_eq!(numeric_error_mode(), NumericErrorMode::Ignore);
//! }
//! assert_eq!(numeric_error_mode(), NumericErrorMode::Warn);
//! ```

use std::cell::Cell;

/// How domain errors met during iteration are reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumericErrorMode {
    /// Log a warning with the number of affected values
    #[default]
    Warn,

    /// Say nothing
    Ignore,
}

thread_local! {
    static MODE: Cell<NumericErrorMode> = const { Cell::new(NumericErrorMode::Warn) };
}

/// Current mode of the calling thread
pub fn numeric_error_mode() -> NumericErrorMode {
    MODE.with(Cell::get)
}

/// Scoped change of the numeric-error mode
#[must_use = "the previous mode is restored as soon as the guard is dropped"]
#[derive(Debug)]
pub struct NumericErrorGuard {
    previous: NumericErrorMode,
}

impl NumericErrorGuard {
    /// Switch to `mode` until the guard is dropped
    pub fn enter(mode: NumericErrorMode) -> Self {
        let previous = MODE.with(|cell| cell.replace(mode));
        Self { previous }
    }

    /// Silence domain-error reports until the guard is dropped
    pub fn suppress() -> Self {
        Self::enter(NumericErrorMode::Ignore)
    }

    /// Mode that will be restored
    pub fn previous(&self) -> NumericErrorMode {
        self.previous
    }
}

impl Drop for NumericErrorGuard {
    fn drop(&mut self) {
        MODE.with(|cell| cell.set(self.previous));
    }
}

/// Report `count` domain errors met in `context`, if the mode allows
pub(crate) fn report_domain_error(context: &str, count: usize) {
    if count > 0 && numeric_error_mode() == NumericErrorMode::Warn {
        log::warn!("{}: {} non-finite value(s) encountered", context, count);
    }
}

/// Test-only `log` sink recording warnings per thread
#[cfg(test)]
pub(crate) mod capture {
    use std::sync::{Mutex, Once};
    use std::thread::{self, ThreadId};

    static RECORDS: Mutex<Vec<(ThreadId, String)>> = Mutex::new(Vec::new());
    static INSTALL: Once = Once::new();
    static LOGGER: CaptureLogger = CaptureLogger;

    struct CaptureLogger;

    impl log::Log for CaptureLogger {
        fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
            metadata.level() <= log::Level::Warn
        }

        fn log(&self, record: &log::Record<'_>) {
            if self.enabled(record.metadata())
                && let Ok(mut records) = RECORDS.lock()
            {
                records.push((thread::current().id(), record.args().to_string()));
            }
        }

        fn flush(&self) {}
    }

    /// Install the capturing logger once per test binary
    pub(crate) fn install() {
        INSTALL.call_once(|| {
            if log::set_logger(&LOGGER).is_ok() {
                log::set_max_level(log::LevelFilter::Warn);
            }
        });
    }

    /// Warnings logged by the calling thread while running `f`
    pub(crate) fn warnings_during<T>(f: impl FnOnce() -> T) -> (T, Vec<String>) {
        let before = own_warnings().len();
        let value = f();
        let warnings = own_warnings().split_off(before);
        (value, warnings)
    }

    fn own_warnings() -> Vec<String> {
        let id = thread::current().id();
        RECORDS
            .lock()
            .map(|records| {
                records
                    .iter()
                    .filter(|(thread, _)| *thread == id)
                    .map(|(_, message)| message.clone())
                    .collect()
            })
            .unwrap_or_default()
    }
}
