//! The publish/subscribe collaborator the socket runs on.
//!
//! A transport offers two kinds of endpoint: a publisher that sends a
//! multi-frame message atomically, and a subscriber that only yields messages
//! whose first frame starts with the byte prefix it was opened with.

mod memory;

use async_trait::async_trait;

pub use memory::MemoryBus;

use crate::{envelope::Frame, error::TransportError};

#[async_trait]
pub trait Transport: Send + Sync {
    /// Connects a publishing endpoint to `url`.
    async fn publisher(&self, url: &str) -> Result<Box<dyn Publisher>, TransportError>;

    /// Connects a subscribing endpoint to `url`, filtered by `prefix`.
    async fn subscriber(
        &self,
        url: &str,
        prefix: Vec<u8>,
    ) -> Result<Box<dyn Subscriber>, TransportError>;
}

#[async_trait]
pub trait Publisher: Send + Sync {
    /// Sends all `frames` as one message, in order.
    async fn send_multipart(&self, frames: Vec<Frame>) -> Result<(), TransportError>;
}

#[async_trait]
pub trait Subscriber: Send {
    /// Waits for the next matching message. `None` once the endpoint is closed.
    async fn recv_multipart(&mut self) -> Option<Vec<Frame>>;
}
