//! Logging facade.
//!
//! With the `tracing` feature the usual `tracing` macros are re-exported
//! here and at the crate root. Without it, macros of the same names expand to
//! nothing so call sites stay free of `cfg` attributes.

#[cfg(feature = "tracing")]
pub use tracing::{debug, error, info, trace, warn};

#[cfg(not(feature = "tracing"))]
mod noop {
    /// No-op stand-in for `tracing::trace!`.
    #[macro_export]
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }

    /// No-op stand-in for `tracing::debug!`.
    #[macro_export]
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    /// No-op stand-in for `tracing::info!`.
    #[macro_export]
    macro_rules! info {
        ($($arg:tt)*) => {};
    }

    /// No-op stand-in for `tracing::warn!`.
    #[macro_export]
    macro_rules! warn {
        ($($arg:tt)*) => {};
    }

    /// No-op stand-in for `tracing::error!`.
    #[macro_export]
    macro_rules! error {
        ($($arg:tt)*) => {};
    }
}
