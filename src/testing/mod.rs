//! Testing utilities and mock implementations
//!
//! Mock selectors and key extractors for exercising filter, router, and
//! pipeline behavior without real payload evaluation.

pub mod mocks;

pub use mocks::*;
