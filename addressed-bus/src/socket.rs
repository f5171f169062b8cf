//! The addressed socket: envelope framing on top of a pub/sub transport.
//!
//! Every socket publishes to the shared bus and subscribes with its own
//! encoded host label as the prefix filter. Inbound messages are validated
//! and handed to listeners as [`Delivery`] events; anything malformed or
//! addressed elsewhere is reported to the [`Logger`] and dropped.

use std::{sync::Arc, time::Duration};

use futures::Stream;
use tokio::{task::JoinHandle, time::timeout};
use tracing::{debug, info, warn};

use crate::{
    config::Config,
    envelope::{self, Delivery, Envelope, Frame},
    error::{Error, Rejection},
    events::{ListenerId, Listeners},
    label,
    logger::Logger,
    queue::Queue,
    transport::{Publisher, Subscriber, Transport},
};

pub struct AddressedSocket {
    inbound: Arc<Inbound>,
    publisher: Box<dyn Publisher>,
    receiver: JoinHandle<()>,
    default_timeout: Option<Duration>,
}

impl AddressedSocket {
    /// Connects the publish and subscribe endpoints described by `config`.
    ///
    /// Resolves once both endpoints are connected and the subscription filter
    /// is registered; messages sent before that could be lost by the
    /// transport, which is why there is no way to get a socket earlier.
    pub async fn connect<T>(
        config: &Config,
        transport: &T,
        logger: Arc<dyn Logger>,
    ) -> Result<Self, Error>
    where
        T: Transport + ?Sized,
    {
        config.validate()?;

        let (publisher, subscriber) = tokio::try_join!(
            transport.publisher(&config.tx_url),
            transport.subscriber(&config.rx_url, label::encode(&config.host)),
        )?;

        let inbound = Arc::new(Inbound {
            host: config.host.clone(),
            listeners: Listeners::new(),
            logger,
        });
        let receiver = tokio::spawn(receive_loop(subscriber, Arc::clone(&inbound)));

        info!(
            host = %config.host,
            rx_url = %config.rx_url,
            tx_url = %config.tx_url,
            "addressed socket ready"
        );

        Ok(Self {
            inbound,
            publisher,
            receiver,
            default_timeout: config.receive_timeout(),
        })
    }

    pub fn host(&self) -> &str {
        &self.inbound.host
    }

    /// Publishes `envelope` followed by `parts` as one message, stamped with
    /// this socket's host as the sender.
    ///
    /// Anyone subscribed to the destination prefix may receive it; the
    /// addressing is a filter, not access control.
    pub async fn send<I>(&self, envelope: &Envelope, parts: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = Frame>,
    {
        let frames = envelope::to_frames(envelope, self.host(), parts);
        debug!(
            host = %self.host(),
            remote = %envelope.remote,
            command = %envelope.command,
            frames = frames.len(),
            "sending message"
        );
        self.publisher.send_multipart(frames).await?;
        Ok(())
    }

    /// Registers `listener` to be called for every delivered message.
    ///
    /// Listeners run on the receive task, one after another in registration
    /// order; a slow listener holds up every message behind it.
    pub fn add_listener<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&Delivery) + Send + Sync + 'static,
    {
        self.inbound.listeners.add(listener)
    }

    pub fn remove_listener(&self, id: ListenerId) -> bool {
        self.inbound.listeners.remove(id)
    }

    /// Buffers deliveries from now on into an [`Inbox`].
    pub fn inbox(&self) -> Inbox {
        let queue = Arc::new(Queue::new());
        let id = self.add_listener({
            let queue = Arc::clone(&queue);
            move |delivery| queue.give(delivery.clone())
        });
        Inbox {
            queue,
            inbound: Arc::clone(&self.inbound),
            id,
            default_timeout: self.default_timeout,
        }
    }
}

impl Drop for AddressedSocket {
    fn drop(&mut self) {
        self.receiver.abort();
    }
}

async fn receive_loop(mut subscriber: Box<dyn Subscriber>, inbound: Arc<Inbound>) {
    while let Some(frames) = subscriber.recv_multipart().await {
        inbound.receive(frames);
    }
    warn!(host = %inbound.host, "subscription closed; no further messages will be delivered");
}

/// The validating half of the socket, shared with the receive task.
struct Inbound {
    host: String,
    listeners: Listeners,
    logger: Arc<dyn Logger>,
}

impl Inbound {
    fn receive(&self, frames: Vec<Frame>) {
        match self.validate(frames) {
            Ok(delivery) => self.listeners.dispatch(&delivery),
            Err(rejection) => self.logger.warn(&self.host, &rejection),
        }
    }

    fn validate(&self, frames: Vec<Frame>) -> Result<Delivery, Rejection> {
        let delivery = envelope::from_frames(frames)?;
        // The prefix filter already narrows by destination, but a transport
        // may fan out more than it was asked for.
        if delivery.envelope.remote != self.host {
            return Err(Rejection::Misaddressed {
                destination: delivery.envelope.remote,
            });
        }
        Ok(delivery)
    }
}

/// Queue of deliveries fed by a listener on the socket.
///
/// Dropping the inbox unregisters its listener. Dropping the socket stops
/// the feed: deliveries already buffered can still be taken, but after that
/// [`recv`](Inbox::recv) waits forever. Use
/// [`recv_timeout`](Inbox::recv_timeout) when the inbox may outlive its
/// socket.
pub struct Inbox {
    queue: Arc<Queue<Delivery>>,
    inbound: Arc<Inbound>,
    id: ListenerId,
    default_timeout: Option<Duration>,
}

impl Inbox {
    /// Waits for the next delivery, however long that takes.
    pub async fn recv(&self) -> Delivery {
        self.queue.take().await
    }

    pub async fn recv_timeout(&self, limit: Duration) -> Result<Delivery, Error> {
        timeout(limit, self.recv())
            .await
            .map_err(|_| Error::Timeout(limit))
    }

    /// Like [`recv_timeout`](Inbox::recv_timeout) with the configured
    /// `timeout_ms`, or [`recv`](Inbox::recv) if none was configured.
    pub async fn recv_default(&self) -> Result<Delivery, Error> {
        match self.default_timeout {
            Some(limit) => self.recv_timeout(limit).await,
            None => Ok(self.recv().await),
        }
    }

    pub fn try_recv(&self) -> Option<Delivery> {
        self.queue.try_take()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn into_stream(self) -> impl Stream<Item = Delivery> {
        futures::stream::unfold(self, |inbox| async move {
            let delivery = inbox.recv().await;
            Some((delivery, inbox))
        })
    }
}

impl Drop for Inbox {
    fn drop(&mut self) {
        self.inbound.listeners.remove(self.id);
    }
}
