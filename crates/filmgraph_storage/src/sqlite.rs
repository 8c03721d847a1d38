//! Persistent relational backend over SQLite.
//!
//! One connection behind a mutex; each storage call is one logical
//! operation. Multi-statement writes (film update with its genre rows, a
//! like edit with the counter rewrite) run inside a single transaction so a
//! concurrent reader never observes a partially-updated relation set.
//!
//! Foreign keys are enforced: a relationship edit naming a missing film or
//! user surfaces as a referential-integrity error. Any other SQLite fault
//! propagates as an opaque storage error.

use std::collections::BTreeSet;
use std::path::Path;

use parking_lot::Mutex;
use rusqlite::{Connection, OptionalExtension, Row, params};
use tracing::{debug, info};

use filmgraph_foundation::{
    Error, Film, FilmId, Genre, GenreId, Mpa, MpaId, NewFilm, NewUser, Result, User, UserId,
};

use crate::schema;
use crate::store::{FilmStore, GenreStore, MpaStore, UserStore};

/// SQLite-backed storage implementing every storage contract.
///
/// Identifiers come from `AUTOINCREMENT` columns: monotonically increasing
/// and never reused, matching the in-memory backend's allocation contract.
pub struct SqliteBackend {
    conn: Mutex<Connection>,
}

impl SqliteBackend {
    /// Opens (creating if needed) a database file and prepares the schema.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the file cannot be opened or the schema
    /// cannot be created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(&path).map_err(map_sql)?;
        info!(path = %path.as_ref().display(), "opened sqlite backend");
        Self::init(conn)
    }

    /// Opens a throwaway in-memory database. Used by tests.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the schema cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(map_sql)?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")
            .map_err(map_sql)?;
        schema::init(&conn).map_err(map_sql)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

/// Maps a SQLite fault to the domain taxonomy.
///
/// Foreign-key violations are the only constraint failures relationship
/// edits can hit (pair uniqueness goes through INSERT OR IGNORE), so they
/// map to the referential-integrity kind; everything else is opaque.
fn map_sql(err: rusqlite::Error) -> Error {
    match &err {
        rusqlite::Error::SqliteFailure(code, message)
            if code.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY =>
        {
            Error::referential_integrity(
                message
                    .clone()
                    .unwrap_or_else(|| "foreign key constraint failed".to_string()),
            )
        }
        _ => Error::storage(err),
    }
}

trait SqlResultExt<T> {
    fn sql_err(self) -> Result<T>;
}

impl<T> SqlResultExt<T> for rusqlite::Result<T> {
    fn sql_err(self) -> Result<T> {
        self.map_err(map_sql)
    }
}

const FILM_COLUMNS: &str = "id, name, description, release_date, duration, mpa_id";
const USER_COLUMNS: &str = "id, email, login, user_name, birthday";

fn film_from_row(row: &Row<'_>) -> rusqlite::Result<Film> {
    Ok(Film {
        id: FilmId::new(row.get(0)?),
        name: row.get(1)?,
        description: row.get(2)?,
        release_date: row.get(3)?,
        duration: row.get(4)?,
        mpa: row.get::<_, Option<i32>>(5)?.map(MpaId::new),
        genres: BTreeSet::new(),
    })
}

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: UserId::new(row.get(0)?),
        email: row.get(1)?,
        login: row.get(2)?,
        name: row.get(3)?,
        birthday: row.get(4)?,
    })
}

fn load_genres(conn: &Connection, film: &mut Film) -> Result<()> {
    let mut stmt = conn
        .prepare("SELECT genre_id FROM film_genres WHERE film_id = ?1 ORDER BY genre_id")
        .sql_err()?;
    let rows = stmt
        .query_map(params![film.id.raw()], |row| {
            row.get::<_, i32>(0).map(GenreId::new)
        })
        .sql_err()?;
    film.genres = rows.collect::<rusqlite::Result<BTreeSet<_>>>().sql_err()?;
    Ok(())
}

fn write_genres(conn: &Connection, id: FilmId, genres: &BTreeSet<GenreId>) -> Result<()> {
    conn.execute("DELETE FROM film_genres WHERE film_id = ?1", params![id.raw()])
        .sql_err()?;
    let mut insert = conn
        .prepare("INSERT INTO film_genres (film_id, genre_id) VALUES (?1, ?2)")
        .sql_err()?;
    for genre in genres {
        insert.execute(params![id.raw(), genre.raw()]).sql_err()?;
    }
    Ok(())
}

impl FilmStore for SqliteBackend {
    fn create(&self, film: NewFilm) -> Result<Film> {
        let mut conn = self.conn.lock();
        let tx = conn.transaction().sql_err()?;
        tx.execute(
            "INSERT INTO films (name, description, release_date, duration, mpa_id) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                film.name,
                film.description,
                film.release_date,
                film.duration,
                film.mpa.map(MpaId::raw),
            ],
        )
        .sql_err()?;
        let id = FilmId::new(tx.last_insert_rowid());
        write_genres(&tx, id, &film.genres)?;
        tx.commit().sql_err()?;
        debug!(film = %id, "created film");
        Ok(film.into_film(id))
    }

    fn get(&self, id: FilmId) -> Result<Option<Film>> {
        let conn = self.conn.lock();
        let film = conn
            .query_row(
                &format!("SELECT {FILM_COLUMNS} FROM films WHERE id = ?1"),
                params![id.raw()],
                film_from_row,
            )
            .optional()
            .sql_err()?;
        match film {
            Some(mut film) => {
                load_genres(&conn, &mut film)?;
                Ok(Some(film))
            }
            None => Ok(None),
        }
    }

    fn get_all(&self) -> Result<Vec<Film>> {
        let conn = self.conn.lock();
        let mut films = {
            let mut stmt = conn
                .prepare(&format!("SELECT {FILM_COLUMNS} FROM films ORDER BY id"))
                .sql_err()?;
            let rows = stmt.query_map([], film_from_row).sql_err()?;
            rows.collect::<rusqlite::Result<Vec<_>>>().sql_err()?
        };
        for film in &mut films {
            load_genres(&conn, film)?;
        }
        Ok(films)
    }

    fn update(&self, film: &Film) -> Result<()> {
        let mut conn = self.conn.lock();
        let tx = conn.transaction().sql_err()?;
        let changed = tx
            .execute(
                "UPDATE films SET name = ?1, description = ?2, release_date = ?3, \
                 duration = ?4, mpa_id = ?5 WHERE id = ?6",
                params![
                    film.name,
                    film.description,
                    film.release_date,
                    film.duration,
                    film.mpa.map(MpaId::raw),
                    film.id.raw(),
                ],
            )
            .sql_err()?;
        if changed == 0 {
            return Err(Error::film_not_found(film.id));
        }
        write_genres(&tx, film.id, &film.genres)?;
        tx.commit().sql_err()?;
        debug!(film = %film.id, "updated film");
        Ok(())
    }

    fn add_like(&self, film: FilmId, user: UserId) -> Result<()> {
        let mut conn = self.conn.lock();
        let tx = conn.transaction().sql_err()?;
        tx.execute(
            "INSERT OR IGNORE INTO film_likes (film_id, user_id) VALUES (?1, ?2)",
            params![film.raw(), user.raw()],
        )
        .sql_err()?;
        rewrite_like_counter(&tx, film)?;
        tx.commit().sql_err()?;
        debug!(film = %film, user = %user, "added like");
        Ok(())
    }

    fn remove_like(&self, film: FilmId, user: UserId) -> Result<()> {
        let mut conn = self.conn.lock();
        let tx = conn.transaction().sql_err()?;
        tx.execute(
            "DELETE FROM film_likes WHERE film_id = ?1 AND user_id = ?2",
            params![film.raw(), user.raw()],
        )
        .sql_err()?;
        rewrite_like_counter(&tx, film)?;
        tx.commit().sql_err()?;
        debug!(film = %film, user = %user, "removed like");
        Ok(())
    }

    fn likes_of(&self, film: FilmId) -> Result<Vec<UserId>> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare("SELECT user_id FROM film_likes WHERE film_id = ?1 ORDER BY user_id")
            .sql_err()?;
        let rows = stmt
            .query_map(params![film.raw()], |row| {
                row.get::<_, i64>(0).map(UserId::new)
            })
            .sql_err()?;
        rows.collect::<rusqlite::Result<Vec<_>>>().sql_err()
    }

    fn like_count(&self, film: FilmId) -> Result<usize> {
        // Reads the denormalized counter; the edge transactions keep it in
        // lockstep with the relation.
        let conn = self.conn.lock();
        let count: Option<i64> = conn
            .query_row(
                "SELECT likes FROM films WHERE id = ?1",
                params![film.raw()],
                |row| row.get(0),
            )
            .optional()
            .sql_err()?;
        Ok(usize::try_from(count.unwrap_or(0)).unwrap_or(0))
    }

    fn top_films(&self, limit: usize) -> Result<Vec<Film>> {
        let conn = self.conn.lock();
        let mut films = {
            let mut stmt = conn
                .prepare(&format!(
                    "SELECT {FILM_COLUMNS} FROM films ORDER BY likes DESC, id ASC LIMIT ?1"
                ))
                .sql_err()?;
            let rows = stmt
                .query_map(params![i64::try_from(limit).unwrap_or(i64::MAX)], film_from_row)
                .sql_err()?;
            rows.collect::<rusqlite::Result<Vec<_>>>().sql_err()?
        };
        for film in &mut films {
            load_genres(&conn, film)?;
        }
        Ok(films)
    }
}

/// Rewrites the denormalized counter from the relation's true cardinality.
fn rewrite_like_counter(conn: &Connection, film: FilmId) -> Result<()> {
    conn.execute(
        "UPDATE films SET likes = \
         (SELECT COUNT(*) FROM film_likes WHERE film_id = ?1) WHERE id = ?1",
        params![film.raw()],
    )
    .sql_err()?;
    Ok(())
}

impl UserStore for SqliteBackend {
    fn create(&self, user: NewUser) -> Result<User> {
        let conn = self.conn.lock();
        conn.execute(
            "INSERT INTO users (email, login, user_name, birthday) VALUES (?1, ?2, ?3, ?4)",
            params![user.email, user.login, user.name, user.birthday],
        )
        .sql_err()?;
        let id = UserId::new(conn.last_insert_rowid());
        debug!(user = %id, "created user");
        Ok(user.into_user(id))
    }

    fn get(&self, id: UserId) -> Result<Option<User>> {
        let conn = self.conn.lock();
        conn.query_row(
            &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"),
            params![id.raw()],
            user_from_row,
        )
        .optional()
        .sql_err()
    }

    fn get_all(&self) -> Result<Vec<User>> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare(&format!("SELECT {USER_COLUMNS} FROM users ORDER BY id"))
            .sql_err()?;
        let rows = stmt.query_map([], user_from_row).sql_err()?;
        rows.collect::<rusqlite::Result<Vec<_>>>().sql_err()
    }

    fn update(&self, user: &User) -> Result<()> {
        let conn = self.conn.lock();
        let changed = conn
            .execute(
                "UPDATE users SET email = ?1, login = ?2, user_name = ?3, birthday = ?4 \
                 WHERE id = ?5",
                params![user.email, user.login, user.name, user.birthday, user.id.raw()],
            )
            .sql_err()?;
        if changed == 0 {
            return Err(Error::user_not_found(user.id));
        }
        debug!(user = %user.id, "updated user");
        Ok(())
    }

    fn add_friend(&self, user: UserId, friend: UserId) -> Result<()> {
        let conn = self.conn.lock();
        conn.execute(
            "INSERT OR IGNORE INTO friendships (user_id, friend_id) VALUES (?1, ?2)",
            params![user.raw(), friend.raw()],
        )
        .sql_err()?;
        debug!(user = %user, friend = %friend, "added friendship edge");
        Ok(())
    }

    fn remove_friend(&self, user: UserId, friend: UserId) -> Result<()> {
        let conn = self.conn.lock();
        conn.execute(
            "DELETE FROM friendships WHERE user_id = ?1 AND friend_id = ?2",
            params![user.raw(), friend.raw()],
        )
        .sql_err()?;
        debug!(user = %user, friend = %friend, "removed friendship edge");
        Ok(())
    }

    fn friends_of(&self, user: UserId) -> Result<Vec<UserId>> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare("SELECT friend_id FROM friendships WHERE user_id = ?1 ORDER BY friend_id")
            .sql_err()?;
        let rows = stmt
            .query_map(params![user.raw()], |row| {
                row.get::<_, i64>(0).map(UserId::new)
            })
            .sql_err()?;
        rows.collect::<rusqlite::Result<Vec<_>>>().sql_err()
    }
}

impl GenreStore for SqliteBackend {
    fn get(&self, id: GenreId) -> Result<Option<Genre>> {
        let conn = self.conn.lock();
        conn.query_row(
            "SELECT id, name FROM genres WHERE id = ?1",
            params![id.raw()],
            |row| {
                Ok(Genre {
                    id: GenreId::new(row.get(0)?),
                    name: row.get(1)?,
                })
            },
        )
        .optional()
        .sql_err()
    }

    fn get_all(&self) -> Result<Vec<Genre>> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare("SELECT id, name FROM genres ORDER BY id")
            .sql_err()?;
        let rows = stmt
            .query_map([], |row| {
                Ok(Genre {
                    id: GenreId::new(row.get(0)?),
                    name: row.get(1)?,
                })
            })
            .sql_err()?;
        rows.collect::<rusqlite::Result<Vec<_>>>().sql_err()
    }
}

impl MpaStore for SqliteBackend {
    fn get(&self, id: MpaId) -> Result<Option<Mpa>> {
        let conn = self.conn.lock();
        conn.query_row(
            "SELECT id, name FROM mpa WHERE id = ?1",
            params![id.raw()],
            |row| {
                Ok(Mpa {
                    id: MpaId::new(row.get(0)?),
                    name: row.get(1)?,
                })
            },
        )
        .optional()
        .sql_err()
    }

    fn get_all(&self) -> Result<Vec<Mpa>> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare("SELECT id, name FROM mpa ORDER BY id")
            .sql_err()?;
        let rows = stmt
            .query_map([], |row| {
                Ok(Mpa {
                    id: MpaId::new(row.get(0)?),
                    name: row.get(1)?,
                })
            })
            .sql_err()?;
        rows.collect::<rusqlite::Result<Vec<_>>>().sql_err()
    }
}
