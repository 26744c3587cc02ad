//! Process-wide log setup for the `clientes-api` binary and its tests.
//!
//! Output goes to stdout as JSON lines unless `LOG_FORMAT=pretty`; the filter
//! comes from `RUST_LOG` (default [`DEFAULT_FILTER`]).

mod subscriber;

pub use subscriber::{DEFAULT_FILTER, LogFormat, install};

/// Install logging using `LOG_FORMAT` from the environment.
///
/// Later calls leave the first subscriber in place.
pub fn init() {
    if !install(LogFormat::from_env()) {
        tracing::trace!("log subscriber already installed");
    }
}
