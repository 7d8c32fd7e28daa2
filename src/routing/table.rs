//! Immutable routing table
//!
//! The table is compiled once through [`RoutingTableBuilder`] and read-only
//! afterwards: a given key always resolves to the same channel for the life
//! of the table.

use crate::error::{FlowError, FlowResult};
use crate::MessageChannel;
use std::collections::HashMap;

/// Key → channel mapping with a default channel and resolution policy
///
/// # Examples
/// ```
/// use msgflow::{MessageChannel, RoutingTable};
///
/// let orders = MessageChannel::unbounded("orders");
/// let fallback = MessageChannel::unbounded("fallback");
///
/// let table = RoutingTable::builder()
///     .route("order", orders)
///     .unwrap()
///     .default_channel(fallback)
///     .build();
///
/// assert!(table.resolve("order").is_some());
/// assert!(table.resolve("unknown").is_none());
/// assert!(!table.resolution_required());
/// ```
#[derive(Debug, Clone)]
pub struct RoutingTable {
    routes: HashMap<String, MessageChannel>,
    default_channel: Option<MessageChannel>,
    resolution_required: bool,
}

impl RoutingTable {
    /// Start building a table
    pub fn builder() -> RoutingTableBuilder {
        RoutingTableBuilder::default()
    }

    /// Look up the channel mapped to `key`
    pub fn resolve(&self, key: &str) -> Option<&MessageChannel> {
        self.routes.get(key)
    }

    /// Check whether `key` has an explicit mapping
    pub fn has_route(&self, key: &str) -> bool {
        self.routes.contains_key(key)
    }

    /// Fallback channel for unmapped keys
    pub fn default_channel(&self) -> Option<&MessageChannel> {
        self.default_channel.as_ref()
    }

    /// Whether an unmapped key is an error
    pub fn resolution_required(&self) -> bool {
        self.resolution_required
    }

    /// Number of explicit mappings
    pub fn route_count(&self) -> usize {
        self.routes.len()
    }
}

/// Builder enforcing key uniqueness at construction time
#[derive(Debug, Default)]
pub struct RoutingTableBuilder {
    routes: HashMap<String, MessageChannel>,
    default_channel: Option<MessageChannel>,
    resolution_required: bool,
}

impl RoutingTableBuilder {
    /// Map `key` to `channel`
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::Config`] when `key` is already mapped. Keys are
    /// unique by contract; replacing one silently would hide a wiring bug.
    pub fn route<K: Into<String>>(mut self, key: K, channel: MessageChannel) -> FlowResult<Self> {
        let key = key.into();
        if self.routes.contains_key(&key) {
            return Err(FlowError::invalid_config(format!(
                "routing key '{key}' is already mapped"
            )));
        }
        self.routes.insert(key, channel);
        Ok(self)
    }

    /// Set the fallback channel for unmapped keys
    pub fn default_channel(mut self, channel: MessageChannel) -> Self {
        self.default_channel = Some(channel);
        self
    }

    /// Treat unmapped keys as errors instead of falling back
    pub fn resolution_required(mut self, required: bool) -> Self {
        self.resolution_required = required;
        self
    }

    /// Freeze the table
    pub fn build(self) -> RoutingTable {
        RoutingTable {
            routes: self.routes,
            default_channel: self.default_channel,
            resolution_required: self.resolution_required,
        }
    }
}
