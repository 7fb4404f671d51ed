//! Logging for graph mutations.
//!
//! With the `tracing` feature the controller's events go through `tracing`;
//! without it `debug!` and `warn!` expand to nothing. The no-op macros carry
//! their own names and are re-exported under the tracing names, so a bare
//! `warn` never competes with the built-in lint attribute.

#[cfg(feature = "tracing")]
pub(crate) use tracing::{debug, warn};

#[cfg(not(feature = "tracing"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
macro_rules! log_warn {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
pub(crate) use log_debug as debug;
#[cfg(not(feature = "tracing"))]
pub(crate) use log_warn as warn;

#[cfg(test)]
mod tests {
    #[test]
    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    fn macros_accept_field_syntax() {
        let id = 7;
        crate::log::debug!(id = %id, count = 2, "node added");
        crate::log::warn!(id = %id, "duplicate node id rejected");
    }
}
