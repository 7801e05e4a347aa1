//! Logging initialisation.
//!
//! Installs a `tracing-subscriber` formatter filtered by `RUST_LOG`
//! (default `info`), e.g. `RUST_LOG=u_curriculum=debug`.

use tracing_subscriber::{fmt, EnvFilter};

/// Initialises logging for the binary.
///
/// ```no_run
/// u_curriculum::logging::init();
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .with_line_number(true)
        .init();
}

/// Initialises debug-level logging for tests; repeated calls are no-ops.
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
