//! Transient in-process backend.
//!
//! Collections are `im` ordered maps and sets behind one reader-writer lock
//! per logical collection. Readers run concurrently with each other; a
//! writer is exclusive on its collection only. Multi-step reads clone the
//! collection under a short read lock (O(1) for persistent structures) and
//! compute on the snapshot, so no lock is ever held across a call into
//! another component.
//!
//! Relationship edits do not check referential integrity: unknown
//! identifiers are accepted silently, matching this backend's contract.
//! Like counts are computed from the relation on demand and cannot drift.

use std::sync::atomic::{AtomicI64, Ordering};

use im::{OrdMap, OrdSet};
use parking_lot::RwLock;
use tracing::debug;

use filmgraph_foundation::{
    Error, Film, FilmId, Genre, GenreId, Mpa, MpaId, NewFilm, NewUser, Result, User, UserId,
};

use crate::store::{FilmStore, GenreStore, MpaStore, UserStore};
use crate::vocab;

/// In-memory backend implementing every storage contract.
///
/// Identifier sequences are owned by the instance and start at 1; an
/// identifier is never reused within the instance's lifetime.
#[derive(Debug)]
pub struct MemoryBackend {
    films: RwLock<OrdMap<FilmId, Film>>,
    users: RwLock<OrdMap<UserId, User>>,
    likes: RwLock<OrdMap<FilmId, OrdSet<UserId>>>,
    friendships: RwLock<OrdMap<UserId, OrdSet<UserId>>>,
    genres: OrdMap<GenreId, Genre>,
    mpa: OrdMap<MpaId, Mpa>,
    next_film_id: AtomicI64,
    next_user_id: AtomicI64,
}

impl MemoryBackend {
    /// Creates an empty backend with the vocabularies seeded.
    #[must_use]
    pub fn new() -> Self {
        Self {
            films: RwLock::new(OrdMap::new()),
            users: RwLock::new(OrdMap::new()),
            likes: RwLock::new(OrdMap::new()),
            friendships: RwLock::new(OrdMap::new()),
            genres: vocab::genres().into_iter().map(|g| (g.id, g)).collect(),
            mpa: vocab::mpa_ratings().into_iter().map(|m| (m.id, m)).collect(),
            next_film_id: AtomicI64::new(1),
            next_user_id: AtomicI64::new(1),
        }
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl FilmStore for MemoryBackend {
    fn create(&self, film: NewFilm) -> Result<Film> {
        let id = FilmId::new(self.next_film_id.fetch_add(1, Ordering::SeqCst));
        let film = film.into_film(id);
        self.films.write().insert(id, film.clone());
        debug!(film = %id, "created film");
        Ok(film)
    }

    fn get(&self, id: FilmId) -> Result<Option<Film>> {
        Ok(self.films.read().get(&id).cloned())
    }

    fn get_all(&self) -> Result<Vec<Film>> {
        Ok(self.films.read().values().cloned().collect())
    }

    fn update(&self, film: &Film) -> Result<()> {
        let mut films = self.films.write();
        if !films.contains_key(&film.id) {
            return Err(Error::film_not_found(film.id));
        }
        films.insert(film.id, film.clone());
        debug!(film = %film.id, "updated film");
        Ok(())
    }

    fn add_like(&self, film: FilmId, user: UserId) -> Result<()> {
        let mut likes = self.likes.write();
        let mut set = likes.get(&film).cloned().unwrap_or_default();
        set.insert(user);
        likes.insert(film, set);
        debug!(film = %film, user = %user, "added like");
        Ok(())
    }

    fn remove_like(&self, film: FilmId, user: UserId) -> Result<()> {
        let mut likes = self.likes.write();
        if let Some(set) = likes.get(&film) {
            let mut set = set.clone();
            set.remove(&user);
            likes.insert(film, set);
            debug!(film = %film, user = %user, "removed like");
        }
        Ok(())
    }

    fn likes_of(&self, film: FilmId) -> Result<Vec<UserId>> {
        Ok(self
            .likes
            .read()
            .get(&film)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default())
    }

    fn like_count(&self, film: FilmId) -> Result<usize> {
        Ok(self.likes.read().get(&film).map_or(0, OrdSet::len))
    }

    fn top_films(&self, limit: usize) -> Result<Vec<Film>> {
        // Snapshot both collections, then rank without holding any lock.
        let films = self.films.read().clone();
        let likes = self.likes.read().clone();

        let mut ranked: Vec<Film> = films.values().cloned().collect();
        ranked.sort_by(|a, b| {
            let count_a = likes.get(&a.id).map_or(0, OrdSet::len);
            let count_b = likes.get(&b.id).map_or(0, OrdSet::len);
            count_b.cmp(&count_a).then_with(|| a.id.cmp(&b.id))
        });
        ranked.truncate(limit);
        Ok(ranked)
    }
}

impl UserStore for MemoryBackend {
    fn create(&self, user: NewUser) -> Result<User> {
        let id = UserId::new(self.next_user_id.fetch_add(1, Ordering::SeqCst));
        let user = user.into_user(id);
        self.users.write().insert(id, user.clone());
        debug!(user = %id, "created user");
        Ok(user)
    }

    fn get(&self, id: UserId) -> Result<Option<User>> {
        Ok(self.users.read().get(&id).cloned())
    }

    fn get_all(&self) -> Result<Vec<User>> {
        Ok(self.users.read().values().cloned().collect())
    }

    fn update(&self, user: &User) -> Result<()> {
        let mut users = self.users.write();
        if !users.contains_key(&user.id) {
            return Err(Error::user_not_found(user.id));
        }
        users.insert(user.id, user.clone());
        debug!(user = %user.id, "updated user");
        Ok(())
    }

    fn add_friend(&self, user: UserId, friend: UserId) -> Result<()> {
        let mut friendships = self.friendships.write();
        let mut set = friendships.get(&user).cloned().unwrap_or_default();
        set.insert(friend);
        friendships.insert(user, set);
        debug!(user = %user, friend = %friend, "added friendship edge");
        Ok(())
    }

    fn remove_friend(&self, user: UserId, friend: UserId) -> Result<()> {
        let mut friendships = self.friendships.write();
        if let Some(set) = friendships.get(&user) {
            let mut set = set.clone();
            set.remove(&friend);
            friendships.insert(user, set);
            debug!(user = %user, friend = %friend, "removed friendship edge");
        }
        Ok(())
    }

    fn friends_of(&self, user: UserId) -> Result<Vec<UserId>> {
        Ok(self
            .friendships
            .read()
            .get(&user)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default())
    }
}

impl GenreStore for MemoryBackend {
    fn get(&self, id: GenreId) -> Result<Option<Genre>> {
        Ok(self.genres.get(&id).cloned())
    }

    fn get_all(&self) -> Result<Vec<Genre>> {
        Ok(self.genres.values().cloned().collect())
    }
}

impl MpaStore for MemoryBackend {
    fn get(&self, id: MpaId) -> Result<Option<Mpa>> {
        Ok(self.mpa.get(&id).cloned())
    }

    fn get_all(&self) -> Result<Vec<Mpa>> {
        Ok(self.mpa.values().cloned().collect())
    }
}
