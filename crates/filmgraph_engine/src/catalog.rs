//! Film catalog operations: records, likes, and the popularity ranking.

use std::sync::Arc;

use filmgraph_foundation::{Error, Film, FilmId, NewFilm, Result, UserId};
use filmgraph_storage::{Backend, FilmStore, UserStore};

/// Film catalog service.
///
/// Owns the film half of the storage capability set plus a user handle for
/// existence checks on like edits. The checks run here, in front of the
/// backend, so both backends report the same not-found errors regardless
/// of their referential-integrity policy.
#[derive(Clone)]
pub struct CatalogService {
    films: Arc<dyn FilmStore>,
    users: Arc<dyn UserStore>,
}

impl CatalogService {
    /// Creates a service over explicit store handles.
    #[must_use]
    pub fn new(films: Arc<dyn FilmStore>, users: Arc<dyn UserStore>) -> Self {
        Self { films, users }
    }

    /// Creates a service over an opened backend.
    #[must_use]
    pub fn from_backend(backend: &Backend) -> Self {
        Self::new(backend.films.clone(), backend.users.clone())
    }

    /// Adds a film to the catalog, returning the stored record with its
    /// assigned identifier.
    ///
    /// # Errors
    ///
    /// Propagates storage faults; never fails on well-formed input.
    pub fn create(&self, film: NewFilm) -> Result<Film> {
        self.films.create(film)
    }

    /// Fetches a film.
    ///
    /// # Errors
    ///
    /// Returns a film-not-found error when the identifier is unknown.
    pub fn get(&self, id: FilmId) -> Result<Film> {
        self.films
            .get(id)?
            .ok_or_else(|| Error::film_not_found(id))
    }

    /// Returns the whole catalog in ascending identifier order.
    ///
    /// # Errors
    ///
    /// Propagates storage faults.
    pub fn get_all(&self) -> Result<Vec<Film>> {
        self.films.get_all()
    }

    /// Overwrites an existing film's fields.
    ///
    /// # Errors
    ///
    /// Returns a film-not-found error when the identifier was never
    /// assigned; the catalog is left unchanged in that case.
    pub fn update(&self, film: &Film) -> Result<Film> {
        self.films.update(film)?;
        Ok(film.clone())
    }

    /// Records that a user likes a film. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns a kind-specific not-found error when either the film or the
    /// user does not exist.
    pub fn add_like(&self, film: FilmId, user: UserId) -> Result<()> {
        self.require_film(film)?;
        self.require_user(user)?;
        self.films.add_like(film, user)
    }

    /// Removes a like. Idempotent: removing a never-added pair is a no-op.
    ///
    /// # Errors
    ///
    /// Returns a kind-specific not-found error when either the film or the
    /// user does not exist.
    pub fn remove_like(&self, film: FilmId, user: UserId) -> Result<()> {
        self.require_film(film)?;
        self.require_user(user)?;
        self.films.remove_like(film, user)
    }

    /// Returns the users who like a film, in ascending identifier order.
    ///
    /// # Errors
    ///
    /// Returns a film-not-found error when the film does not exist.
    pub fn likes_of(&self, film: FilmId) -> Result<Vec<UserId>> {
        self.require_film(film)?;
        self.films.likes_of(film)
    }

    /// Returns the number of likes for a film.
    ///
    /// # Errors
    ///
    /// Returns a film-not-found error when the film does not exist.
    pub fn like_count(&self, film: FilmId) -> Result<usize> {
        self.require_film(film)?;
        self.films.like_count(film)
    }

    /// Returns up to `limit` films ranked by descending like count, ties
    /// broken by ascending identifier. An empty catalog is an empty
    /// result, not an error; the ranking is never padded.
    ///
    /// # Errors
    ///
    /// Returns an invalid-argument error when `limit` is zero.
    pub fn top_films(&self, limit: usize) -> Result<Vec<Film>> {
        if limit == 0 {
            return Err(Error::invalid_argument("ranking size must be positive"));
        }
        self.films.top_films(limit)
    }

    fn require_film(&self, id: FilmId) -> Result<()> {
        if self.films.get(id)?.is_none() {
            return Err(Error::film_not_found(id));
        }
        Ok(())
    }

    fn require_user(&self, id: UserId) -> Result<()> {
        if self.users.get(id)?.is_none() {
            return Err(Error::user_not_found(id));
        }
        Ok(())
    }
}
