//! Where rejected operations are reported.
//!
//! Every rejection made by [`UidManager`](crate::UidManager) is passed to a
//! [`DiagnosticSink`] before the error is returned. The default sink logs through `tracing`;
//! any `Fn(&'static str, &UidMapError)` closure can be used instead.

use crate::UidMapError;

/// Receives `(operation, error)` for every rejected manager operation.
///
/// Sinks must be `Send + Sync` so a manager can be shared behind a lock across threads.
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, operation: &'static str, error: &UidMapError);
}

impl<F> DiagnosticSink for F
where
    F: Fn(&'static str, &UidMapError) + Send + Sync,
{
    fn report(&self, operation: &'static str, error: &UidMapError) {
        self(operation, error)
    }
}

/// Logs rejections with `tracing`: input rejections at `warn`, anything else at `error`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, operation: &'static str, error: &UidMapError) {
        if error.is_rejection() {
            tracing::warn!(operation, error = %error, "uid map operation rejected");
        } else {
            tracing::error!(operation, error = %error, "uid map operation failed");
        }
    }
}

/// Discards every report.
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentSink;

impl DiagnosticSink for SilentSink {
    fn report(&self, _operation: &'static str, _error: &UidMapError) {}
}
