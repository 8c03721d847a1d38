//! Catalog, social-graph, and vocabulary services for Filmgraph.
//!
//! This crate provides:
//! - [`CatalogService`] - Film records, likes, and the popularity ranking
//! - [`SocialService`] - User records, friendship edges, and graph queries
//! - [`VocabularyService`] - The fixed genre and MPA rating vocabularies
//!
//! Services are written once against the storage contracts and never learn
//! which backend is underneath. A lookup miss on a single entity is a
//! not-found error naming the entity kind; an empty multi-row result is a
//! plain success.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod catalog;
mod social;
mod vocabulary;

pub use catalog::CatalogService;
pub use social::SocialService;
pub use vocabulary::VocabularyService;
