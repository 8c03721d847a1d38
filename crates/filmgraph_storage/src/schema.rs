//! Relational schema for the SQLite backend.
//!
//! Executed once at open. `films.likes` is the denormalized like counter;
//! it is rewritten from `film_likes` in the same transaction as every edge
//! change. The vocabulary tables are seeded here so both backends report
//! identical genres and ratings.

use rusqlite::Connection;

use crate::vocab;

const DDL: &str = "
CREATE TABLE IF NOT EXISTS mpa (
    id   INTEGER PRIMARY KEY,
    name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS genres (
    id   INTEGER PRIMARY KEY,
    name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS films (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    name         TEXT NOT NULL,
    description  TEXT,
    release_date TEXT,
    duration     INTEGER,
    mpa_id       INTEGER REFERENCES mpa (id),
    likes        INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS users (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    email     TEXT NOT NULL,
    login     TEXT NOT NULL,
    user_name TEXT NOT NULL,
    birthday  TEXT
);

CREATE TABLE IF NOT EXISTS film_likes (
    film_id INTEGER NOT NULL REFERENCES films (id),
    user_id INTEGER NOT NULL REFERENCES users (id),
    PRIMARY KEY (film_id, user_id)
);

CREATE TABLE IF NOT EXISTS friendships (
    user_id   INTEGER NOT NULL REFERENCES users (id),
    friend_id INTEGER NOT NULL REFERENCES users (id),
    PRIMARY KEY (user_id, friend_id)
);

CREATE TABLE IF NOT EXISTS film_genres (
    film_id  INTEGER NOT NULL REFERENCES films (id),
    genre_id INTEGER NOT NULL REFERENCES genres (id),
    PRIMARY KEY (film_id, genre_id)
);
";

/// Creates the tables and seeds the vocabularies.
pub(crate) fn init(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(DDL)?;

    let mut seed_genre = conn.prepare("INSERT OR IGNORE INTO genres (id, name) VALUES (?1, ?2)")?;
    for &(id, name) in vocab::GENRES {
        seed_genre.execute((id, name))?;
    }

    let mut seed_mpa = conn.prepare("INSERT OR IGNORE INTO mpa (id, name) VALUES (?1, ?2)")?;
    for &(id, name) in vocab::MPA_RATINGS {
        seed_mpa.execute((id, name))?;
    }

    Ok(())
}
