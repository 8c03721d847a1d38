//! Read access to the fixed genre and MPA rating vocabularies.

use std::sync::Arc;

use filmgraph_foundation::{Error, Genre, GenreId, Mpa, MpaId, Result};
use filmgraph_storage::{Backend, GenreStore, MpaStore};

/// Vocabulary lookup service.
#[derive(Clone)]
pub struct VocabularyService {
    genres: Arc<dyn GenreStore>,
    mpa: Arc<dyn MpaStore>,
}

impl VocabularyService {
    /// Creates a service over explicit store handles.
    #[must_use]
    pub fn new(genres: Arc<dyn GenreStore>, mpa: Arc<dyn MpaStore>) -> Self {
        Self { genres, mpa }
    }

    /// Creates a service over an opened backend.
    #[must_use]
    pub fn from_backend(backend: &Backend) -> Self {
        Self::new(backend.genres.clone(), backend.mpa.clone())
    }

    /// Fetches a genre.
    ///
    /// # Errors
    ///
    /// Returns a genre-not-found error when the identifier is unknown.
    pub fn genre(&self, id: GenreId) -> Result<Genre> {
        self.genres
            .get(id)?
            .ok_or_else(|| Error::genre_not_found(id))
    }

    /// Returns the genre vocabulary in ascending identifier order.
    ///
    /// # Errors
    ///
    /// Propagates storage faults.
    pub fn genres(&self) -> Result<Vec<Genre>> {
        self.genres.get_all()
    }

    /// Fetches an MPA rating.
    ///
    /// # Errors
    ///
    /// Returns an mpa-not-found error when the identifier is unknown.
    pub fn mpa(&self, id: MpaId) -> Result<Mpa> {
        self.mpa.get(id)?.ok_or_else(|| Error::mpa_not_found(id))
    }

    /// Returns the MPA rating vocabulary in ascending identifier order.
    ///
    /// # Errors
    ///
    /// Propagates storage faults.
    pub fn mpa_ratings(&self) -> Result<Vec<Mpa>> {
        self.mpa.get_all()
    }
}
