//! Addressed messaging over a broadcast publish/subscribe bus.
//!
//! Every participant publishes to one shared bus and subscribes with its own
//! host name as the filter, which gives point-to-point delivery on top of a
//! one-to-many medium. Delivery, cross-sender ordering and sender
//! authentication are left to the layer above.
//!
//! - [`label`] encodes host, session and command names as terminated frames.
//! - [`linked_list`] and [`queue`] provide the FIFO that [`socket::Inbox`]
//!   buffers deliveries in.
//! - [`envelope`] holds the [`Envelope`] record and the multi-frame layout.
//! - [`socket`] is the protocol engine: it frames outgoing envelopes,
//!   validates inbound messages and dispatches them to [`events`] listeners.
//! - [`transport`] defines the pub/sub collaborator and ships an in-process
//!   [`MemoryBus`].
//! - [`config`], [`logger`], [`error`] and [`telemetry`] are the ambient
//!   pieces the socket is built with.

pub mod config;
pub mod envelope;
pub mod error;
pub mod events;
pub mod label;
pub mod linked_list;
pub mod logger;
pub mod queue;
pub mod socket;
pub mod telemetry;
pub mod transport;

pub use config::Config;
pub use envelope::{Delivery, Envelope, Frame};
pub use error::{EmptyCollectionError, Error, Rejection, TransportError};
pub use events::ListenerId;
pub use logger::{Logger, TracingLogger};
pub use queue::Queue;
pub use socket::{AddressedSocket, Inbox};
pub use transport::{MemoryBus, Transport};
