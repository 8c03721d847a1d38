//! One-time backend selection.
//!
//! The backend is chosen at process startup; everything above the storage
//! contracts is written once and never learns which variant is underneath.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use filmgraph_foundation::Result;

use crate::memory::MemoryBackend;
use crate::sqlite::SqliteBackend;
use crate::store::{FilmStore, GenreStore, MpaStore, UserStore};

/// Which storage variant to run on.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BackendConfig {
    /// Transient in-process storage; state is lost on shutdown.
    Memory,
    /// Persistent SQLite storage at the given path (`:memory:` for a
    /// throwaway database).
    Sqlite {
        /// Database file location.
        path: PathBuf,
    },
}

impl BackendConfig {
    /// Convenience constructor for the SQLite variant.
    #[must_use]
    pub fn sqlite(path: impl Into<PathBuf>) -> Self {
        Self::Sqlite { path: path.into() }
    }
}

/// The storage capability set handed to the query layer.
///
/// All four handles point at the same underlying backend instance.
#[derive(Clone)]
pub struct Backend {
    /// Film records and the likes relation.
    pub films: Arc<dyn FilmStore>,
    /// User records and the friendship relation.
    pub users: Arc<dyn UserStore>,
    /// The genre vocabulary.
    pub genres: Arc<dyn GenreStore>,
    /// The MPA rating vocabulary.
    pub mpa: Arc<dyn MpaStore>,
}

impl Backend {
    /// Opens the configured backend.
    ///
    /// # Errors
    ///
    /// Returns a storage error if a SQLite database cannot be opened or
    /// prepared. The in-memory variant cannot fail.
    pub fn open(config: &BackendConfig) -> Result<Self> {
        match config {
            BackendConfig::Memory => {
                info!(backend = "memory", "opening storage backend");
                Ok(Self::from_shared(Arc::new(MemoryBackend::new())))
            }
            BackendConfig::Sqlite { path } => {
                info!(backend = "sqlite", "opening storage backend");
                Ok(Self::from_shared(Arc::new(SqliteBackend::open(path)?)))
            }
        }
    }

    /// Opens an in-memory backend. Shorthand used throughout the tests.
    #[must_use]
    pub fn memory() -> Self {
        Self::from_shared(Arc::new(MemoryBackend::new()))
    }

    /// Opens a throwaway SQLite database.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the schema cannot be prepared.
    pub fn sqlite_in_memory() -> Result<Self> {
        Ok(Self::from_shared(Arc::new(SqliteBackend::open_in_memory()?)))
    }

    fn from_shared<B>(backend: Arc<B>) -> Self
    where
        B: FilmStore + UserStore + GenreStore + MpaStore + 'static,
    {
        Self {
            films: backend.clone(),
            users: backend.clone(),
            genres: backend.clone(),
            mpa: backend,
        }
    }
}
