//! Mock implementations for testing
//!
//! Fixed-answer and always-failing selectors/extractors, so tests can pin
//! down stage behavior independently of payload content.

use crate::error::{FlowError, FlowResult};
use crate::filter::MessageSelector;
use crate::message::Message;
use crate::routing::KeyExtractor;

/// Selector returning a fixed verdict for every message
#[derive(Debug, Clone, Copy)]
pub struct FixedSelector {
    verdict: bool,
}

impl FixedSelector {
    /// Selector that accepts everything
    pub fn accept_all() -> Self {
        Self { verdict: true }
    }

    /// Selector that rejects everything
    pub fn reject_all() -> Self {
        Self { verdict: false }
    }
}

impl MessageSelector for FixedSelector {
    fn accept(&self, _message: &Message) -> FlowResult<bool> {
        Ok(self.verdict)
    }
}

/// Selector that always fails, simulating an unparseable payload
#[derive(Debug, Clone, Copy)]
pub struct FailingSelector;

impl MessageSelector for FailingSelector {
    fn accept(&self, _message: &Message) -> FlowResult<bool> {
        Err(FlowError::processing("mock selector failure"))
    }
}

/// Extractor returning the same key for every message
#[derive(Debug, Clone)]
pub struct FixedKeyExtractor {
    key: String,
}

impl FixedKeyExtractor {
    pub fn new<S: Into<String>>(key: S) -> Self {
        Self { key: key.into() }
    }
}

impl KeyExtractor for FixedKeyExtractor {
    fn key(&self, _message: &Message) -> FlowResult<String> {
        Ok(self.key.clone())
    }
}

/// Extractor that always fails, simulating an unevaluable payload
#[derive(Debug, Clone, Copy)]
pub struct FailingKeyExtractor;

impl KeyExtractor for FailingKeyExtractor {
    fn key(&self, _message: &Message) -> FlowResult<String> {
        Err(FlowError::processing("mock key extractor failure"))
    }
}
