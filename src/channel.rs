//! In-process message channels
//!
//! A [`MessageChannel`] is a named FIFO queue of [`Message`] values with
//! multiple-producer/multiple-consumer semantics. Cloning a channel clones
//! a handle to the same queue, so wiring passes channels by identity and
//! never by name lookup.
//!
//! FIFO order is guaranteed among messages sent by a single producer. No
//! ordering is promised across channels.

use crate::config::ChannelConfig;
use crate::error::{FlowError, FlowResult};
use crate::message::Message;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex};

#[derive(Debug, Clone)]
enum ChannelSender {
    Unbounded(mpsc::UnboundedSender<Message>),
    Bounded(mpsc::Sender<Message>),
}

#[derive(Debug)]
enum ChannelReceiver {
    Unbounded(mpsc::UnboundedReceiver<Message>),
    Bounded(mpsc::Receiver<Message>),
}

impl ChannelReceiver {
    async fn recv(&mut self) -> Option<Message> {
        match self {
            ChannelReceiver::Unbounded(rx) => rx.recv().await,
            ChannelReceiver::Bounded(rx) => rx.recv().await,
        }
    }

    fn try_recv(&mut self) -> Option<Message> {
        match self {
            ChannelReceiver::Unbounded(rx) => rx.try_recv().ok(),
            ChannelReceiver::Bounded(rx) => rx.try_recv().ok(),
        }
    }
}

/// Named MPMC message queue
///
/// `send` never suspends: the unbounded variant always accepts, the bounded
/// variant fails fast with [`FlowError::ChannelFull`] at capacity. `receive`
/// suspends until a message arrives or the timeout elapses.
#[derive(Debug, Clone)]
pub struct MessageChannel {
    name: Arc<str>,
    sender: ChannelSender,
    receiver: Arc<Mutex<ChannelReceiver>>,
}

impl MessageChannel {
    /// Create an unbounded channel
    pub fn unbounded<S: Into<String>>(name: S) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            name: name.into().into(),
            sender: ChannelSender::Unbounded(tx),
            receiver: Arc::new(Mutex::new(ChannelReceiver::Unbounded(rx))),
        }
    }

    /// Create a bounded channel
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::Config`] when `capacity` is zero.
    pub fn bounded<S: Into<String>>(name: S, capacity: usize) -> FlowResult<Self> {
        if capacity == 0 {
            return Err(FlowError::invalid_config(
                "channel capacity must be non-zero; use MessageChannel::unbounded instead",
            ));
        }
        let (tx, rx) = mpsc::channel(capacity);
        Ok(Self {
            name: name.into().into(),
            sender: ChannelSender::Bounded(tx),
            receiver: Arc::new(Mutex::new(ChannelReceiver::Bounded(rx))),
        })
    }

    /// Create a channel per a [`ChannelConfig`]
    pub fn from_config<S: Into<String>>(name: S, config: &ChannelConfig) -> FlowResult<Self> {
        config.validate()?;
        match config.capacity {
            Some(capacity) => Self::bounded(name, capacity),
            None => Ok(Self::unbounded(name)),
        }
    }

    /// Channel name, used for logging and error reporting only
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Enqueue a message without suspending
    ///
    /// # Errors
    ///
    /// [`FlowError::ChannelFull`] when a bounded channel is at capacity,
    /// [`FlowError::ChannelClosed`] when the queue is gone.
    pub fn send(&self, message: Message) -> FlowResult<()> {
        match &self.sender {
            ChannelSender::Unbounded(tx) => tx
                .send(message)
                .map_err(|_| FlowError::channel_closed(self.name())),
            ChannelSender::Bounded(tx) => tx.try_send(message).map_err(|error| match error {
                mpsc::error::TrySendError::Full(_) => FlowError::channel_full(self.name()),
                mpsc::error::TrySendError::Closed(_) => FlowError::channel_closed(self.name()),
            }),
        }
    }

    /// Dequeue the next message, waiting up to `timeout`
    ///
    /// Returns `None` when the timeout elapses with nothing available;
    /// a timeout is an expected outcome, not an error.
    ///
    /// The timeout covers the wait for the queue as well as the wait for a
    /// message, so a consumer contending with another consumer still
    /// returns once its deadline expires.
    pub async fn receive(&self, timeout: Duration) -> Option<Message> {
        tokio::time::timeout(timeout, async {
            self.receiver.lock().await.recv().await
        })
        .await
        .ok()
        .flatten()
    }

    /// Dequeue the next message if one is already queued
    pub async fn try_receive(&self) -> Option<Message> {
        self.receiver.lock().await.try_recv()
    }

    /// Dequeue the next message, waiting indefinitely
    ///
    /// Used by pipeline workers; resolves to `None` only once every sender
    /// handle is gone.
    pub(crate) async fn recv(&self) -> Option<Message> {
        self.receiver.lock().await.recv().await
    }
}
