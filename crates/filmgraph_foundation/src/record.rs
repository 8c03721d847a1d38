//! Domain records and their creation payloads.
//!
//! Records are plain values: every read from a store returns a copy, and
//! mutating a copy has no effect until it is written back through the
//! store's `update`. Field-level validation (non-blank name, email shape,
//! date sanity) belongs to the layer in front of the engine and is not
//! repeated here.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::id::{FilmId, GenreId, MpaId, UserId};

/// A film in the catalog.
///
/// The like count is not stored on the record; it is derived from the likes
/// relation by the owning store and can never drift from it.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Film {
    /// Store-assigned identifier, stable for the record's lifetime.
    pub id: FilmId,
    /// Film title. Required and non-empty (caller-enforced).
    pub name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Theatrical release date.
    pub release_date: Option<NaiveDate>,
    /// Running time in minutes. Positive when present (caller-enforced).
    pub duration: Option<u32>,
    /// Reference into the fixed MPA rating vocabulary.
    pub mpa: Option<MpaId>,
    /// References into the fixed genre vocabulary, kept sorted.
    pub genres: BTreeSet<GenreId>,
}

/// A registered user.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Store-assigned identifier, stable for the record's lifetime.
    pub id: UserId,
    /// Contact email. Required (caller-enforced).
    pub email: String,
    /// Login handle, no embedded whitespace (caller-enforced).
    pub login: String,
    /// Display name. Defaults to the login upstream when absent.
    pub name: String,
    /// Date of birth.
    pub birthday: Option<NaiveDate>,
}

/// An entry in the fixed genre vocabulary.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Genre {
    /// Vocabulary identifier.
    pub id: GenreId,
    /// Genre name.
    pub name: String,
}

/// An entry in the fixed MPA rating vocabulary.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Mpa {
    /// Vocabulary identifier.
    pub id: MpaId,
    /// Rating code, e.g. `PG-13`.
    pub name: String,
}

/// Payload for creating a film; the store assigns the identifier.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct NewFilm {
    /// Film title.
    pub name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Theatrical release date.
    pub release_date: Option<NaiveDate>,
    /// Running time in minutes.
    pub duration: Option<u32>,
    /// Reference into the MPA rating vocabulary.
    pub mpa: Option<MpaId>,
    /// References into the genre vocabulary.
    pub genres: BTreeSet<GenreId>,
}

impl NewFilm {
    /// Creates a payload with only the required title set.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            release_date: None,
            duration: None,
            mpa: None,
            genres: BTreeSet::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the release date.
    #[must_use]
    pub fn with_release_date(mut self, date: NaiveDate) -> Self {
        self.release_date = Some(date);
        self
    }

    /// Sets the duration in minutes.
    #[must_use]
    pub fn with_duration(mut self, minutes: u32) -> Self {
        self.duration = Some(minutes);
        self
    }

    /// Sets the MPA rating reference.
    #[must_use]
    pub fn with_mpa(mut self, mpa: MpaId) -> Self {
        self.mpa = Some(mpa);
        self
    }

    /// Adds a genre reference.
    #[must_use]
    pub fn with_genre(mut self, genre: GenreId) -> Self {
        self.genres.insert(genre);
        self
    }

    /// Attaches a store-assigned identifier, producing the stored record.
    #[must_use]
    pub fn into_film(self, id: FilmId) -> Film {
        Film {
            id,
            name: self.name,
            description: self.description,
            release_date: self.release_date,
            duration: self.duration,
            mpa: self.mpa,
            genres: self.genres,
        }
    }
}

/// Payload for creating a user; the store assigns the identifier.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct NewUser {
    /// Contact email.
    pub email: String,
    /// Login handle.
    pub login: String,
    /// Display name.
    pub name: String,
    /// Date of birth.
    pub birthday: Option<NaiveDate>,
}

impl NewUser {
    /// Creates a payload with the required fields set.
    #[must_use]
    pub fn new(
        email: impl Into<String>,
        login: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            login: login.into(),
            name: name.into(),
            birthday: None,
        }
    }

    /// Sets the date of birth.
    #[must_use]
    pub fn with_birthday(mut self, birthday: NaiveDate) -> Self {
        self.birthday = Some(birthday);
        self
    }

    /// Attaches a store-assigned identifier, producing the stored record.
    #[must_use]
    pub fn into_user(self, id: UserId) -> User {
        User {
            id,
            email: self.email,
            login: self.login,
            name: self.name,
            birthday: self.birthday,
        }
    }
}
