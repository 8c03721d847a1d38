//! Storage contracts and backends for Filmgraph.
//!
//! This crate provides:
//! - [`FilmStore`], [`UserStore`], [`GenreStore`], [`MpaStore`] - The
//!   backend-agnostic storage contracts
//! - [`MemoryBackend`] - Transient in-process storage
//! - [`SqliteBackend`] - Persistent relational storage
//! - [`Backend`] / [`BackendConfig`] - One-time backend selection
//!
//! Both backends satisfy the same contracts with identical observable
//! behavior, except for the documented referential-integrity policy: the
//! relational backend enforces foreign keys on relationship edits, the
//! in-memory backend accepts unknown identifiers silently.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod config;
mod memory;
mod schema;
mod sqlite;
mod store;
mod vocab;

pub use config::{Backend, BackendConfig};
pub use memory::MemoryBackend;
pub use sqlite::SqliteBackend;
pub use store::{FilmStore, GenreStore, MpaStore, UserStore};
