//! The fixed genre and MPA rating vocabularies.
//!
//! Both backends seed from these tables so they report identical
//! vocabularies. Films reference entries by identifier; the entries
//! themselves are never created or edited at runtime.

use filmgraph_foundation::{Genre, GenreId, Mpa, MpaId};

/// Genre vocabulary, in identifier order.
pub(crate) const GENRES: &[(i32, &str)] = &[
    (1, "Comedy"),
    (2, "Drama"),
    (3, "Animation"),
    (4, "Thriller"),
    (5, "Documentary"),
    (6, "Action"),
];

/// MPA rating vocabulary, in identifier order.
pub(crate) const MPA_RATINGS: &[(i32, &str)] = &[
    (1, "G"),
    (2, "PG"),
    (3, "PG-13"),
    (4, "R"),
    (5, "NC-17"),
];

/// Materializes the genre vocabulary as records.
pub(crate) fn genres() -> Vec<Genre> {
    GENRES
        .iter()
        .map(|&(id, name)| Genre {
            id: GenreId::new(id),
            name: name.to_string(),
        })
        .collect()
}

/// Materializes the MPA rating vocabulary as records.
pub(crate) fn mpa_ratings() -> Vec<Mpa> {
    MPA_RATINGS
        .iter()
        .map(|&(id, name)| Mpa {
            id: MpaId::new(id),
            name: name.to_string(),
        })
        .collect()
}
