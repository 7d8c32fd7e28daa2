//! Observability for pipeline flows
//!
//! Structured logging setup; the stages themselves emit tracing events for
//! every routing decision and drop.

pub mod logging;

// Re-export for convenience
pub use logging::{init_default_logging, init_logging, parse_level, LogFormat};

// Span macro for structured logging
pub use logging::stage_span;
