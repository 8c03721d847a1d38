//! Identifiers, domain records, and error types for Filmgraph.
//!
//! This crate provides:
//! - Typed identifiers ([`FilmId`], [`UserId`], [`GenreId`], [`MpaId`])
//! - Domain records ([`Film`], [`User`], [`Genre`], [`Mpa`]) and their
//!   creation payloads ([`NewFilm`], [`NewUser`])
//! - [`Error`] - The error taxonomy shared by every layer

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod error;
mod id;
mod record;

pub use error::{EntityKind, Error, ErrorKind, Result};
pub use id::{FilmId, GenreId, MpaId, UserId};
pub use record::{Film, Genre, Mpa, NewFilm, NewUser, User};
