use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
};

use async_trait::async_trait;
use tokio::sync::broadcast;
use tracing::{debug, warn};

use super::{Publisher, Subscriber, Transport};
use crate::{envelope::Frame, error::TransportError};

type Message = Arc<Vec<Frame>>;

/// Messages buffered per endpoint before slow subscribers start lagging.
const DEFAULT_CAPACITY: usize = 256;

/// In-process bus: every endpoint URL names one broadcast channel that all of
/// its publishers feed and all of its subscribers read.
///
/// Clones share the same set of channels.
#[derive(Clone)]
pub struct MemoryBus {
    channels: Arc<Mutex<HashMap<String, broadcast::Sender<Message>>>>,
    capacity: usize,
}

impl MemoryBus {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            channels: Arc::default(),
            capacity: capacity.max(1),
        }
    }

    fn channel(&self, url: &str) -> Result<broadcast::Sender<Message>, TransportError> {
        if url.trim().is_empty() {
            return Err(TransportError::InvalidEndpoint(url.to_string()));
        }
        let mut channels = self.channels.lock().unwrap_or_else(PoisonError::into_inner);
        let sender = channels
            .entry(url.to_string())
            .or_insert_with(|| broadcast::channel(self.capacity).0);
        Ok(sender.clone())
    }
}

impl Default for MemoryBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for MemoryBus {
    async fn publisher(&self, url: &str) -> Result<Box<dyn Publisher>, TransportError> {
        let channel = self.channel(url)?;
        debug!(url, "publisher connected");
        Ok(Box::new(MemoryPublisher {
            url: url.to_string(),
            channel,
        }))
    }

    async fn subscriber(
        &self,
        url: &str,
        prefix: Vec<u8>,
    ) -> Result<Box<dyn Subscriber>, TransportError> {
        let inbox = self.channel(url)?.subscribe();
        debug!(url, prefix.len = prefix.len(), "subscriber connected");
        Ok(Box::new(MemorySubscriber {
            url: url.to_string(),
            prefix,
            inbox,
        }))
    }
}

struct MemoryPublisher {
    url: String,
    channel: broadcast::Sender<Message>,
}

#[async_trait]
impl Publisher for MemoryPublisher {
    async fn send_multipart(&self, frames: Vec<Frame>) -> Result<(), TransportError> {
        if frames.is_empty() {
            return Err(TransportError::EmptyMessage);
        }
        // Publishing with nobody listening is not an error on a pub/sub bus.
        if self.channel.send(Arc::new(frames)).is_err() {
            debug!(url = %self.url, "no subscribers; message discarded");
        }
        Ok(())
    }
}

struct MemorySubscriber {
    url: String,
    prefix: Vec<u8>,
    inbox: broadcast::Receiver<Message>,
}

#[async_trait]
impl Subscriber for MemorySubscriber {
    async fn recv_multipart(&mut self) -> Option<Vec<Frame>> {
        loop {
            match self.inbox.recv().await {
                Ok(message) => {
                    let wanted = message
                        .first()
                        .is_some_and(|frame| frame.starts_with(&self.prefix));
                    if wanted {
                        return Some(message.as_ref().clone());
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(url = %self.url, skipped, "subscriber lagged; messages dropped");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}
