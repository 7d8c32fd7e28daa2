//! Content-based routing
//!
//! The router pairs a pure key function with an immutable mapping table: a
//! direct substitute for evaluate-payload-then-dispatch routing, with all
//! destinations resolved at construction time.

pub mod router;
pub mod table;

pub use router::{ContentRouter, KeyExtractor};
pub use table::{RoutingTable, RoutingTableBuilder};
