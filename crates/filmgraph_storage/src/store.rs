//! Backend-agnostic storage contracts.
//!
//! The query layer is written once against these traits; the backend is
//! picked at startup and never leaks through them. Absence of a single
//! record is reported as `Ok(None)`, never as an error: the caller decides
//! whether a miss is exceptional.

use filmgraph_foundation::{
    Film, FilmId, Genre, GenreId, Mpa, MpaId, NewFilm, NewUser, Result, User, UserId,
};

/// Keyed storage for films plus the likes relation they participate in.
pub trait FilmStore: Send + Sync {
    /// Persists a new film, assigning the next unused identifier.
    fn create(&self, film: NewFilm) -> Result<Film>;

    /// Fetches a film by identifier. Absence is a normal outcome.
    fn get(&self, id: FilmId) -> Result<Option<Film>>;

    /// Returns every film, in ascending identifier order.
    fn get_all(&self) -> Result<Vec<Film>>;

    /// Overwrites all mutable fields of an existing film, including its
    /// genre set. Fails with a not-found error when the identifier was
    /// never assigned; the store is left unchanged in that case. Likes are
    /// not touched.
    fn update(&self, film: &Film) -> Result<()>;

    /// Records that a user likes a film. Idempotent: re-adding an existing
    /// pair is a no-op. Whether unknown identifiers are rejected is a
    /// backend policy (see the crate docs).
    fn add_like(&self, film: FilmId, user: UserId) -> Result<()>;

    /// Removes a like. Idempotent: removing an absent pair is a no-op.
    fn remove_like(&self, film: FilmId, user: UserId) -> Result<()>;

    /// Returns the users who like a film, in ascending identifier order.
    /// Empty for an unknown film.
    fn likes_of(&self, film: FilmId) -> Result<Vec<UserId>>;

    /// Returns the number of likes for a film.
    ///
    /// Always equal to `likes_of(film).len()`, on every backend, after any
    /// operation sequence.
    fn like_count(&self, film: FilmId) -> Result<usize>;

    /// Returns up to `limit` films ranked by descending like count, ties
    /// broken by ascending identifier. An empty catalog yields an empty
    /// vector; a limit beyond the catalog size yields the whole catalog.
    fn top_films(&self, limit: usize) -> Result<Vec<Film>>;
}

/// Keyed storage for users plus the directed friendship relation.
pub trait UserStore: Send + Sync {
    /// Persists a new user, assigning the next unused identifier.
    fn create(&self, user: NewUser) -> Result<User>;

    /// Fetches a user by identifier. Absence is a normal outcome.
    fn get(&self, id: UserId) -> Result<Option<User>>;

    /// Returns every user, in ascending identifier order.
    fn get_all(&self) -> Result<Vec<User>>;

    /// Overwrites all mutable fields of an existing user. Fails with a
    /// not-found error when the identifier was never assigned; the store is
    /// left unchanged in that case. Friendships are not touched.
    fn update(&self, user: &User) -> Result<()>;

    /// Records a directed friendship edge `user -> friend`. Idempotent.
    /// The reverse edge is not created.
    fn add_friend(&self, user: UserId, friend: UserId) -> Result<()>;

    /// Removes a directed friendship edge. Idempotent; removing an edge
    /// that was never added (a self-edge included) is a no-op.
    fn remove_friend(&self, user: UserId, friend: UserId) -> Result<()>;

    /// Returns the targets of a user's outgoing friendship edges, in
    /// ascending identifier order. Empty for an unknown user.
    fn friends_of(&self, user: UserId) -> Result<Vec<UserId>>;
}

/// Read-only access to the fixed genre vocabulary.
pub trait GenreStore: Send + Sync {
    /// Fetches a genre by identifier. Absence is a normal outcome.
    fn get(&self, id: GenreId) -> Result<Option<Genre>>;

    /// Returns the whole vocabulary, in ascending identifier order.
    fn get_all(&self) -> Result<Vec<Genre>>;
}

/// Read-only access to the fixed MPA rating vocabulary.
pub trait MpaStore: Send + Sync {
    /// Fetches a rating by identifier. Absence is a normal outcome.
    fn get(&self, id: MpaId) -> Result<Option<Mpa>>;

    /// Returns the whole vocabulary, in ascending identifier order.
    fn get_all(&self) -> Result<Vec<Mpa>>;
}
