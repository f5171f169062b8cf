use crate::error::Rejection;

/// Receives the warnings raised while validating inbound messages.
///
/// Passed to [`AddressedSocket::connect`](crate::socket::AddressedSocket::connect)
/// so the embedding application decides where protocol noise goes.
pub trait Logger: Send + Sync {
    fn warn(&self, host: &str, rejection: &Rejection);
}

/// Forwards warnings to the `tracing` subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn warn(&self, host: &str, rejection: &Rejection) {
        tracing::warn!(host, reason = %rejection, "dropping inbound message");
    }
}
