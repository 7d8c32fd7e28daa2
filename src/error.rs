//! Error types for pipeline stages and channels
//!
//! All errors are synchronous returns from the stage that detected them.
//! No retry is built in: a caller that wants retry layers it on top.

use thiserror::Error;

/// Main error type for message flow operations
#[derive(Debug, Error)]
pub enum FlowError {
    /// A selector or key extractor failed while evaluating a message.
    /// This is never treated as "predicate false" - the message is not
    /// delivered anywhere and the failure surfaces to the caller.
    #[error("Message processing failed: {message}")]
    Processing { message: String },

    /// The router required resolution but found no mapping for the key.
    #[error("No channel mapping for routing key '{key}' and resolution is required")]
    RoutingResolution { key: String },

    /// A bounded channel rejected a send because it is at capacity.
    #[error("Channel '{channel}' is at capacity")]
    ChannelFull { channel: String },

    /// All queue handles for the channel have been dropped.
    #[error("Channel '{channel}' is closed")]
    ChannelClosed { channel: String },

    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

impl FlowError {
    /// Create a processing error
    pub fn processing<S: Into<String>>(message: S) -> Self {
        Self::Processing {
            message: message.into(),
        }
    }

    /// Create a routing resolution error
    pub fn routing_resolution<S: Into<String>>(key: S) -> Self {
        Self::RoutingResolution { key: key.into() }
    }

    /// Create a channel-full error
    pub fn channel_full<S: Into<String>>(channel: S) -> Self {
        Self::ChannelFull {
            channel: channel.into(),
        }
    }

    /// Create a channel-closed error
    pub fn channel_closed<S: Into<String>>(channel: S) -> Self {
        Self::ChannelClosed {
            channel: channel.into(),
        }
    }

    /// Create an invalid-configuration error
    pub fn invalid_config<S: Into<String>>(message: S) -> Self {
        Self::Config(crate::config::ConfigError::InvalidConfig(message.into()))
    }
}

/// Result type for message flow operations
pub type FlowResult<T> = Result<T, FlowError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_processing_constructor() {
        let error = FlowError::processing("selector blew up");
        assert!(matches!(error, FlowError::Processing { .. }));
        assert_eq!(
            error.to_string(),
            "Message processing failed: selector blew up"
        );
    }

    #[test]
    fn test_routing_resolution_constructor() {
        let error = FlowError::routing_resolution("Tags");
        assert!(matches!(error, FlowError::RoutingResolution { .. }));
        assert!(error.to_string().contains("'Tags'"));
    }

    #[test]
    fn test_channel_full_constructor() {
        let error = FlowError::channel_full("orders");
        assert!(matches!(error, FlowError::ChannelFull { .. }));
        assert_eq!(error.to_string(), "Channel 'orders' is at capacity");
    }

    #[test]
    fn test_channel_closed_constructor() {
        let error = FlowError::channel_closed("orders");
        assert!(matches!(error, FlowError::ChannelClosed { .. }));
        assert_eq!(error.to_string(), "Channel 'orders' is closed");
    }

    #[test]
    fn test_invalid_config_wraps_config_error() {
        let error = FlowError::invalid_config("capacity must be non-zero");
        assert!(matches!(error, FlowError::Config(_)));
        assert!(error.to_string().contains("capacity must be non-zero"));
    }
}
