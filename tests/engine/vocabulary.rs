//! Integration tests for the vocabulary service
//!
//! The genre and MPA vocabularies are fixed, seeded identically on both
//! backends, and misses carry the right entity kind.

use filmgraph_foundation::{EntityKind, ErrorKind, GenreId, MpaId};

use crate::support::services;

#[test]
fn genre_lookups_resolve_on_both_backends() {
    for (name, _, _, vocab) in services() {
        assert_eq!(vocab.genre(GenreId::new(1)).unwrap().name, "Comedy", "backend {name}");
        assert_eq!(vocab.genre(GenreId::new(6)).unwrap().name, "Action", "backend {name}");
    }
}

#[test]
fn mpa_lookups_resolve_on_both_backends() {
    for (name, _, _, vocab) in services() {
        assert_eq!(vocab.mpa(MpaId::new(1)).unwrap().name, "G", "backend {name}");
        assert_eq!(vocab.mpa(MpaId::new(5)).unwrap().name, "NC-17", "backend {name}");
    }
}

#[test]
fn unknown_genre_is_a_genre_not_found_error() {
    for (name, _, _, vocab) in services() {
        let err = vocab.genre(GenreId::new(99)).unwrap_err();
        assert!(
            matches!(
                err.kind,
                ErrorKind::NotFound {
                    kind: EntityKind::Genre,
                    id: 99
                }
            ),
            "backend {name}"
        );
    }
}

#[test]
fn unknown_mpa_is_an_mpa_not_found_error() {
    for (name, _, _, vocab) in services() {
        let err = vocab.mpa(MpaId::new(99)).unwrap_err();
        assert!(
            matches!(
                err.kind,
                ErrorKind::NotFound {
                    kind: EntityKind::Mpa,
                    ..
                }
            ),
            "backend {name}"
        );
    }
}

#[test]
fn vocabulary_listings_are_identical_across_backends() {
    let all = services();
    let (_, _, _, first) = &all[0];
    for (name, _, _, vocab) in &all[1..] {
        assert_eq!(first.genres().unwrap(), vocab.genres().unwrap(), "backend {name}");
        assert_eq!(
            first.mpa_ratings().unwrap(),
            vocab.mpa_ratings().unwrap(),
            "backend {name}"
        );
    }
}
