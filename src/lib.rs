//! Filmgraph - catalog-and-social-graph engine
//!
//! This crate re-exports all layers of the Filmgraph system for convenient
//! access. For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 2: filmgraph_engine     — Catalog, social graph, and vocabulary services
//! Layer 1: filmgraph_storage    — Storage contracts, in-memory and SQLite backends
//! Layer 0: filmgraph_foundation — Identifiers, records, errors
//! ```

pub use filmgraph_engine as engine;
pub use filmgraph_foundation as foundation;
pub use filmgraph_storage as storage;
