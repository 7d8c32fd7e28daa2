//! msgflow - in-process content-based message routing
//!
//! A small pipeline core built from three pieces:
//! - [`MessageChannel`]: a named FIFO queue with MPMC semantics and a
//!   timeout-bounded `receive`
//! - [`ContentFilter`]: forwards a message when a predicate accepts it,
//!   diverts it to a discard channel otherwise
//! - [`ContentRouter`]: derives a routing key from the payload and
//!   dispatches to the channel mapped to that key, with a default-channel
//!   fallback or a hard resolution requirement
//!
//! [`Pipeline`] wires the pieces together: every stage runs on its own
//! worker task consuming from that stage's source channel, and the whole
//! flow is driven through a single public input channel. All wiring is by
//! channel reference, resolved at construction time - there is no runtime
//! name lookup to fail.
//!
//! # Quick Start
//!
//! ```
//! use msgflow::{
//!     ContentFilter, ContentRouter, FlowResult, Message, MessageChannel, Pipeline, RoutingTable,
//! };
//! use std::time::Duration;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> FlowResult<()> {
//!     // Leaf channels first, then stages referencing them
//!     let input = MessageChannel::unbounded("input");
//!     let accepted = MessageChannel::unbounded("accepted");
//!     let discarded = MessageChannel::unbounded("discarded");
//!     let orders = MessageChannel::unbounded("orders");
//!     let fallback = MessageChannel::unbounded("fallback");
//!
//!     let filter = ContentFilter::new(
//!         |message: &Message| -> FlowResult<bool> { Ok(!message.payload().is_empty()) },
//!         accepted.clone(),
//!     )
//!     .with_discard_channel(discarded.clone());
//!
//!     let table = RoutingTable::builder()
//!         .route("order", orders.clone())?
//!         .default_channel(fallback.clone())
//!         .build();
//!     let router = ContentRouter::new(
//!         |message: &Message| -> FlowResult<String> {
//!             Ok(message.payload().split(':').next().unwrap_or_default().to_string())
//!         },
//!         table,
//!     );
//!
//!     let pipeline = Pipeline::builder()
//!         .input(input.clone())
//!         .stage(input, filter)
//!         .stage(accepted, router)
//!         .build()?;
//!
//!     pipeline.send(Message::new("order:42"))?;
//!     assert!(orders.receive(Duration::from_secs(1)).await.is_some());
//!     Ok(())
//! }
//! ```

pub mod channel;
pub mod config;
pub mod error;
pub mod filter;
pub mod message;
pub mod observability;
pub mod pipeline;
pub mod routing;
pub mod testing;

pub use channel::MessageChannel;
pub use config::{ChannelConfig, ConfigError, FlowConfig, RouterConfig};
pub use error::{FlowError, FlowResult};
pub use filter::{ContentFilter, MessageSelector};
pub use message::{Message, MessageBuilder};
pub use pipeline::{MessageHandler, Pipeline, PipelineBuilder};
pub use routing::{ContentRouter, KeyExtractor, RoutingTable, RoutingTableBuilder};
