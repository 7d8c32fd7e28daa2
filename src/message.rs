//! Message envelope types
//!
//! A [`Message`] is an immutable envelope around a text payload plus optional
//! headers. It is created once by a producer and shared unchanged by every
//! stage it passes through; there are no mutators, only accessors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use uuid::Uuid;

/// Immutable message envelope
///
/// # Examples
/// ```
/// use msgflow::Message;
/// use serde_json::json;
///
/// let message = Message::builder("<Tag xmlns=\"my:namespace\"/>")
///     .header("content-type", json!("application/xml"))
///     .build();
///
/// assert_eq!(message.payload(), "<Tag xmlns=\"my:namespace\"/>");
/// assert_eq!(message.header("content-type"), Some(&json!("application/xml")));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    /// UUID v4 message identifier
    id: Uuid,
    /// UTC creation timestamp
    timestamp: DateTime<Utc>,
    /// Text payload (e.g. an XML document)
    payload: String,
    /// Optional headers attached at creation time
    #[serde(default)]
    headers: HashMap<String, Value>,
}

impl Message {
    /// Create a message with no headers
    pub fn new<S: Into<String>>(payload: S) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            payload: payload.into(),
            headers: HashMap::new(),
        }
    }

    /// Start building a message with headers
    pub fn builder<S: Into<String>>(payload: S) -> MessageBuilder {
        MessageBuilder {
            payload: payload.into(),
            headers: HashMap::new(),
        }
    }

    /// Message identifier
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Creation timestamp
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Text payload
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Look up a single header by name
    pub fn header(&self, name: &str) -> Option<&Value> {
        self.headers.get(name)
    }

    /// All headers
    pub fn headers(&self) -> &HashMap<String, Value> {
        &self.headers
    }
}

/// Builder for messages carrying headers
#[derive(Debug)]
pub struct MessageBuilder {
    payload: String,
    headers: HashMap<String, Value>,
}

impl MessageBuilder {
    /// Attach a header; a later header with the same name wins
    pub fn header<S: Into<String>, V: Into<Value>>(mut self, name: S, value: V) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Finish the envelope; id and timestamp are assigned here
    pub fn build(self) -> Message {
        Message {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            payload: self.payload,
            headers: self.headers,
        }
    }
}
