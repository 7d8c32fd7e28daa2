//! Content router stage
//!
//! A [`ContentRouter`] derives a routing key from each message's payload and
//! dispatches the message to the channel mapped to that key. Unmapped keys
//! fall back to the table's default channel, or fail when the table requires
//! resolution. The router holds no state across calls: the same message
//! against the same table always lands on the same channel.

use crate::error::{FlowError, FlowResult};
use crate::message::Message;
use crate::pipeline::MessageHandler;
use crate::routing::RoutingTable;
use std::sync::Arc;
use tracing::{debug, warn};

/// Derives a routing key from a message
///
/// Implementors must be deterministic and side-effect free. Returning an
/// error marks the message as unprocessable; the message is then delivered
/// nowhere.
///
/// Any `Fn(&Message) -> FlowResult<String>` closure is an extractor.
pub trait KeyExtractor: Send + Sync {
    /// Compute the routing key for the message
    fn key(&self, message: &Message) -> FlowResult<String>;
}

impl<F> KeyExtractor for F
where
    F: Fn(&Message) -> FlowResult<String> + Send + Sync,
{
    fn key(&self, message: &Message) -> FlowResult<String> {
        self(message)
    }
}

/// Router stage: evaluate key, dispatch to exactly one channel
pub struct ContentRouter {
    extractor: Arc<dyn KeyExtractor>,
    table: RoutingTable,
}

impl ContentRouter {
    /// Create a router over an immutable table
    pub fn new<E>(extractor: E, table: RoutingTable) -> Self
    where
        E: KeyExtractor + 'static,
    {
        Self {
            extractor: Arc::new(extractor),
            table,
        }
    }

    /// The routing table this router dispatches against
    pub fn table(&self) -> &RoutingTable {
        &self.table
    }

    /// Compute the key and deliver the message to exactly one channel
    ///
    /// # Errors
    ///
    /// [`FlowError::Processing`] when the extractor fails,
    /// [`FlowError::RoutingResolution`] when the key is unmapped and the
    /// table requires resolution. In both cases no channel receives the
    /// message.
    pub fn process(&self, message: Message) -> FlowResult<()> {
        let key = self.extractor.key(&message)?;

        if let Some(channel) = self.table.resolve(&key) {
            debug!(
                message_id = %message.id(),
                key = %key,
                channel = channel.name(),
                "routing message to mapped channel"
            );
            return channel.send(message);
        }

        if self.table.resolution_required() {
            return Err(FlowError::routing_resolution(key));
        }

        match self.table.default_channel() {
            Some(channel) => {
                debug!(
                    message_id = %message.id(),
                    key = %key,
                    channel = channel.name(),
                    "no mapping for key, routing to default channel"
                );
                channel.send(message)
            }
            None => {
                warn!(
                    message_id = %message.id(),
                    key = %key,
                    "unroutable message dropped: no mapping and no default channel"
                );
                Ok(())
            }
        }
    }
}

#[async_trait::async_trait]
impl MessageHandler for ContentRouter {
    async fn handle(&self, message: Message) -> FlowResult<()> {
        self.process(message)
    }
}
