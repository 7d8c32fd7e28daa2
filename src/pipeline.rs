//! Pipeline wiring
//!
//! A [`Pipeline`] connects channels and stages into a running flow: one
//! tokio worker task per stage pulls messages from that stage's source
//! channel and hands them to the stage. Wiring is by channel identity -
//! leaf channels are constructed first, then the stages referencing them,
//! then the whole assembly exposes a single public input channel.
//!
//! A stage error aborts delivery of that one message only: the worker logs
//! the failure and keeps consuming. Retry, if desired, belongs to a layer
//! outside this crate.

use crate::error::{FlowError, FlowResult};
use crate::message::Message;
use crate::MessageChannel;
use std::sync::Arc;
use crate::stage_span;
use tokio::task::JoinHandle;
use tracing::{debug, warn, Instrument};

/// A pipeline stage driven by a worker task
///
/// [`ContentFilter`] and [`ContentRouter`] both implement this; custom
/// stages can too.
///
/// [`ContentFilter`]: crate::ContentFilter
/// [`ContentRouter`]: crate::ContentRouter
#[async_trait::async_trait]
pub trait MessageHandler: Send + Sync {
    /// Process one message; an error means the message was not delivered
    async fn handle(&self, message: Message) -> FlowResult<()>;
}

/// A running pipeline
///
/// Workers are aborted on [`shutdown`](Pipeline::shutdown) or when the
/// pipeline is dropped. Messages already delivered to output channels stay
/// there; messages in flight inside a stage are lost on abort.
#[derive(Debug)]
pub struct Pipeline {
    input: MessageChannel,
    workers: Vec<JoinHandle<()>>,
}

impl Pipeline {
    /// Start assembling a pipeline
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    /// The pipeline's single public entry point
    pub fn input(&self) -> &MessageChannel {
        &self.input
    }

    /// Send a message into the pipeline
    pub fn send(&self, message: Message) -> FlowResult<()> {
        self.input.send(message)
    }

    /// Stop all stage workers
    pub fn shutdown(mut self) {
        self.abort_workers();
    }

    fn abort_workers(&mut self) {
        for worker in self.workers.drain(..) {
            worker.abort();
        }
    }
}

impl Drop for Pipeline {
    fn drop(&mut self) {
        self.abort_workers();
    }
}

/// Collects (source channel, stage) pairs before spawning workers
#[derive(Default)]
pub struct PipelineBuilder {
    input: Option<MessageChannel>,
    stages: Vec<(MessageChannel, Arc<dyn MessageHandler>)>,
}

impl PipelineBuilder {
    /// Declare the pipeline's public input channel
    pub fn input(mut self, channel: MessageChannel) -> Self {
        self.input = Some(channel);
        self
    }

    /// Add a stage consuming from `source`
    ///
    /// Stages are independent consumers; chaining happens through the
    /// channels the stages forward into, not through declaration order.
    pub fn stage<H>(mut self, source: MessageChannel, handler: H) -> Self
    where
        H: MessageHandler + 'static,
    {
        self.stages.push((source, Arc::new(handler)));
        self
    }

    /// Spawn one worker per stage and return the running pipeline
    ///
    /// Must be called within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::Config`] when no input channel was declared.
    pub fn build(self) -> FlowResult<Pipeline> {
        let input = self.input.ok_or_else(|| {
            FlowError::invalid_config("pipeline requires an input channel before build")
        })?;

        let workers = self
            .stages
            .into_iter()
            .map(|(source, handler)| spawn_worker(source, handler))
            .collect();

        Ok(Pipeline { input, workers })
    }
}

fn spawn_worker(source: MessageChannel, handler: Arc<dyn MessageHandler>) -> JoinHandle<()> {
    tokio::spawn(async move {
        debug!(channel = source.name(), "stage worker started");
        loop {
            let Some(message) = source.recv().await else {
                debug!(channel = source.name(), "stage worker stopping: channel closed");
                break;
            };
            let message_id = message.id();
            let span = stage_span!(channel = source.name(), message_id = %message_id);
            if let Err(error) = handler.handle(message).instrument(span).await {
                warn!(
                    %message_id,
                    channel = source.name(),
                    %error,
                    "stage failed to process message"
                );
            }
        }
    })
}
