//! Logging utilities and structured logging support

pub use log::{debug, error, info, trace, warn};

/// Initialize the logging system
pub fn init() {
    env_logger::init();
}

// Trace statements on the recreate path are compiled in by the
// `render-trace` feature; disabled builds expand to nothing.
#[cfg(feature = "render-trace")]
macro_rules! render_trace {
    ($($arg:tt)*) => {
        log::trace!(target: "render_lifecycle", $($arg)*)
    };
}

#[cfg(not(feature = "render-trace"))]
macro_rules! render_trace {
    ($($arg:tt)*) => {{}};
}

pub(crate) use render_trace;
