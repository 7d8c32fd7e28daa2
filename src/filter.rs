//! Content filter stage
//!
//! A [`ContentFilter`] evaluates a predicate over each message. Accepted
//! messages are forwarded unchanged to the output channel; rejected messages
//! go to the discard channel when one is configured, otherwise they are
//! dropped with a warning.

use crate::error::FlowResult;
use crate::message::Message;
use crate::pipeline::MessageHandler;
use crate::MessageChannel;
use std::sync::Arc;
use tracing::{debug, warn};

/// Predicate over a message payload
///
/// Implementors must be deterministic and side-effect free. Returning an
/// error marks the message as unprocessable (e.g. malformed payload); it is
/// never interpreted as "reject".
///
/// Any `Fn(&Message) -> FlowResult<bool>` closure is a selector.
pub trait MessageSelector: Send + Sync {
    /// Decide whether the message should be forwarded
    fn accept(&self, message: &Message) -> FlowResult<bool>;
}

impl<F> MessageSelector for F
where
    F: Fn(&Message) -> FlowResult<bool> + Send + Sync,
{
    fn accept(&self, message: &Message) -> FlowResult<bool> {
        self(message)
    }
}

/// Filter stage: forward on accept, divert on reject
pub struct ContentFilter {
    selector: Arc<dyn MessageSelector>,
    output: MessageChannel,
    discard: Option<MessageChannel>,
}

impl ContentFilter {
    /// Create a filter forwarding accepted messages to `output`
    ///
    /// Without a discard channel, rejected messages are dropped (visibly,
    /// via a `warn` log). Configure one with [`with_discard_channel`] when
    /// drop visibility matters downstream.
    ///
    /// [`with_discard_channel`]: ContentFilter::with_discard_channel
    pub fn new<S>(selector: S, output: MessageChannel) -> Self
    where
        S: MessageSelector + 'static,
    {
        Self {
            selector: Arc::new(selector),
            output,
            discard: None,
        }
    }

    /// Divert rejected messages to `channel` instead of dropping them
    pub fn with_discard_channel(mut self, channel: MessageChannel) -> Self {
        self.discard = Some(channel);
        self
    }

    /// Evaluate the predicate and forward or divert the message
    ///
    /// # Errors
    ///
    /// Propagates selector failures as [`FlowError::Processing`] and send
    /// failures from the destination channel. A failed message is not
    /// delivered anywhere.
    ///
    /// [`FlowError::Processing`]: crate::FlowError::Processing
    pub fn process(&self, message: Message) -> FlowResult<()> {
        if self.selector.accept(&message)? {
            debug!(
                message_id = %message.id(),
                output = self.output.name(),
                "message accepted by filter"
            );
            self.output.send(message)
        } else {
            match &self.discard {
                Some(channel) => {
                    debug!(
                        message_id = %message.id(),
                        discard = channel.name(),
                        "message rejected, diverting to discard channel"
                    );
                    channel.send(message)
                }
                None => {
                    warn!(
                        message_id = %message.id(),
                        "message rejected and dropped: no discard channel configured"
                    );
                    Ok(())
                }
            }
        }
    }
}

#[async_trait::async_trait]
impl MessageHandler for ContentFilter {
    async fn handle(&self, message: Message) -> FlowResult<()> {
        self.process(message)
    }
}
