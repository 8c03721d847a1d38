//! Error types for Filmgraph operations.
//!
//! Uses `thiserror` for ergonomic error definition. The taxonomy is small
//! and recoverable at the caller boundary: a lookup miss, a relationship
//! referencing a missing entity, a rejected argument, or an opaque storage
//! fault. Absence in a multi-row query is never an error.

use thiserror::Error;

use crate::id::{FilmId, GenreId, MpaId, UserId};

/// Result alias used throughout the Filmgraph crates.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for Filmgraph operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind }
    }

    /// Creates a film-not-found error.
    #[must_use]
    pub fn film_not_found(id: FilmId) -> Self {
        Self::new(ErrorKind::NotFound {
            kind: EntityKind::Film,
            id: id.raw(),
        })
    }

    /// Creates a user-not-found error.
    #[must_use]
    pub fn user_not_found(id: UserId) -> Self {
        Self::new(ErrorKind::NotFound {
            kind: EntityKind::User,
            id: id.raw(),
        })
    }

    /// Creates a genre-not-found error.
    #[must_use]
    pub fn genre_not_found(id: GenreId) -> Self {
        Self::new(ErrorKind::NotFound {
            kind: EntityKind::Genre,
            id: i64::from(id.raw()),
        })
    }

    /// Creates an MPA-rating-not-found error.
    #[must_use]
    pub fn mpa_not_found(id: MpaId) -> Self {
        Self::new(ErrorKind::NotFound {
            kind: EntityKind::Mpa,
            id: i64::from(id.raw()),
        })
    }

    /// Creates a referential-integrity error.
    #[must_use]
    pub fn referential_integrity(detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::ReferentialIntegrity(detail.into()))
    }

    /// Creates an invalid-argument error.
    #[must_use]
    pub fn invalid_argument(detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidArgument(detail.into()))
    }

    /// Creates an opaque storage-fault error.
    #[must_use]
    pub fn storage(detail: impl std::fmt::Display) -> Self {
        Self::new(ErrorKind::Storage(detail.to_string()))
    }

    /// Returns true if this is a not-found error (any entity kind).
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self.kind, ErrorKind::NotFound { .. })
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// An entity identifier does not exist in the store.
    #[error("{kind} with id {id} not found")]
    NotFound {
        /// Which entity kind was looked up.
        kind: EntityKind,
        /// The raw identifier that missed.
        id: i64,
    },

    /// A relationship mutation referenced a nonexistent entity.
    ///
    /// Only backends that enforce referential integrity report this.
    #[error("relationship references a missing entity: {0}")]
    ReferentialIntegrity(String),

    /// An argument was rejected before reaching the storage layer.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An unexpected low-level storage fault, distinct from the domain
    /// errors above. Mapped to a generic failure by the caller.
    #[error("storage fault: {0}")]
    Storage(String),
}

/// The entity kinds a [`ErrorKind::NotFound`] can name.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum EntityKind {
    /// A film record.
    Film,
    /// A user record.
    User,
    /// A genre vocabulary entry.
    Genre,
    /// An MPA rating vocabulary entry.
    Mpa,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Film => write!(f, "film"),
            Self::User => write!(f, "user"),
            Self::Genre => write!(f, "genre"),
            Self::Mpa => write!(f, "mpa rating"),
        }
    }
}
