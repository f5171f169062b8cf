use std::time::Duration;

/// Returned by [`LinkedList::pop_front`](crate::linked_list::LinkedList::pop_front)
/// when there is nothing to pop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("list is already empty")]
pub struct EmptyCollectionError;

/// Faults raised by a [`Transport`](crate::transport::Transport) endpoint.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("invalid endpoint url: {0:?}")]
    InvalidEndpoint(String),

    #[error("cannot publish a message with no frames")]
    EmptyMessage,

    #[error("transport endpoint is closed")]
    Closed,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("no message received within {0:?}")]
    Timeout(Duration),
}

/// Why an inbound message was dropped instead of delivered.
///
/// These never reach the caller of `send`; they are reported to the socket's
/// [`Logger`](crate::logger::Logger).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    /// The message had fewer than the four envelope frames.
    #[error("insufficient message parts ({count} < 4)")]
    InsufficientFrames { count: usize },

    /// One of the envelope labels was missing its terminator or was not UTF-8.
    #[error("invalid message envelope")]
    InvalidEnvelope,

    /// The destination label named a different host.
    #[error("received message addressed to some other host ({destination:?})")]
    Misaddressed { destination: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_errors_convert_into_error() {
        let err: Error = TransportError::Closed.into();
        assert!(matches!(err, Error::Transport(TransportError::Closed)));
        assert_eq!(err.to_string(), "transport error: transport endpoint is closed");
    }

    #[test]
    fn rejection_messages_name_the_cause() {
        assert_eq!(
            Rejection::InsufficientFrames { count: 2 }.to_string(),
            "insufficient message parts (2 < 4)"
        );
        assert_eq!(
            Rejection::Misaddressed {
                destination: "carol".into()
            }
            .to_string(),
            "received message addressed to some other host (\"carol\")"
        );
        assert_eq!(
            Rejection::InvalidEnvelope.to_string(),
            "invalid message envelope"
        );
    }
}
