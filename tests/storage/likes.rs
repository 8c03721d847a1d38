//! Integration tests for the likes relation
//!
//! Tests set semantics, the like-count invariant, and the popularity
//! ranking on both backends.

use filmgraph_foundation::{FilmId, UserId};
use filmgraph_storage::Backend;

use crate::support::{backends, film, user};

fn seeded_users(backend: &Backend, count: usize) -> Vec<UserId> {
    (0..count)
        .map(|i| backend.users.create(user(&format!("u{i}"))).unwrap().id)
        .collect()
}

// =============================================================================
// Set semantics
// =============================================================================

#[test]
fn add_like_twice_equals_add_like_once() {
    for (name, backend) in backends() {
        let f = backend.films.create(film("a")).unwrap();
        let users = seeded_users(&backend, 1);

        backend.films.add_like(f.id, users[0]).unwrap();
        backend.films.add_like(f.id, users[0]).unwrap();

        assert_eq!(backend.films.like_count(f.id).unwrap(), 1, "backend {name}");
        assert_eq!(backend.films.likes_of(f.id).unwrap(), users, "backend {name}");
    }
}

#[test]
fn remove_after_add_restores_the_pre_add_set() {
    for (name, backend) in backends() {
        let f = backend.films.create(film("a")).unwrap();
        let users = seeded_users(&backend, 2);

        backend.films.add_like(f.id, users[0]).unwrap();
        backend.films.add_like(f.id, users[1]).unwrap();
        backend.films.remove_like(f.id, users[1]).unwrap();

        assert_eq!(
            backend.films.likes_of(f.id).unwrap(),
            vec![users[0]],
            "backend {name}"
        );
    }
}

#[test]
fn remove_of_never_added_pair_is_a_noop() {
    for (name, backend) in backends() {
        let f = backend.films.create(film("a")).unwrap();
        let users = seeded_users(&backend, 1);

        backend.films.remove_like(f.id, users[0]).unwrap();
        assert_eq!(backend.films.like_count(f.id).unwrap(), 0, "backend {name}");
    }
}

#[test]
fn likes_of_lists_users_in_ascending_id_order() {
    for (name, backend) in backends() {
        let f = backend.films.create(film("a")).unwrap();
        let users = seeded_users(&backend, 3);

        backend.films.add_like(f.id, users[2]).unwrap();
        backend.films.add_like(f.id, users[0]).unwrap();
        backend.films.add_like(f.id, users[1]).unwrap();

        assert_eq!(backend.films.likes_of(f.id).unwrap(), users, "backend {name}");
    }
}

#[test]
fn likes_of_unknown_film_is_empty_success() {
    for (name, backend) in backends() {
        assert!(
            backend.films.likes_of(FilmId::new(99)).unwrap().is_empty(),
            "backend {name}"
        );
        assert_eq!(
            backend.films.like_count(FilmId::new(99)).unwrap(),
            0,
            "backend {name}"
        );
    }
}

// =============================================================================
// Counter invariant
// =============================================================================

#[test]
fn like_count_matches_relation_cardinality_after_mixed_edits() {
    for (name, backend) in backends() {
        let f = backend.films.create(film("a")).unwrap();
        let users = seeded_users(&backend, 4);

        for &u in &users {
            backend.films.add_like(f.id, u).unwrap();
        }
        backend.films.remove_like(f.id, users[1]).unwrap();
        backend.films.add_like(f.id, users[1]).unwrap();
        backend.films.remove_like(f.id, users[0]).unwrap();
        backend.films.remove_like(f.id, users[0]).unwrap();

        assert_eq!(
            backend.films.like_count(f.id).unwrap(),
            backend.films.likes_of(f.id).unwrap().len(),
            "backend {name}"
        );
        assert_eq!(backend.films.like_count(f.id).unwrap(), 3, "backend {name}");
    }
}

// =============================================================================
// Ranking
// =============================================================================

#[test]
fn ranking_orders_by_descending_count_then_ascending_id() {
    for (name, backend) in backends() {
        // Insert A, B, C, D in order and give them 1, 2, 3, 4 likes.
        let films: Vec<FilmId> = ["A", "B", "C", "D"]
            .iter()
            .map(|t| backend.films.create(film(t)).unwrap().id)
            .collect();
        let users = seeded_users(&backend, 4);

        for (i, &f) in films.iter().enumerate() {
            for &u in &users[..=i] {
                backend.films.add_like(f, u).unwrap();
            }
        }

        let top: Vec<FilmId> = backend
            .films
            .top_films(10)
            .unwrap()
            .iter()
            .map(|f| f.id)
            .collect();
        assert_eq!(
            top,
            vec![films[3], films[2], films[1], films[0]],
            "backend {name}"
        );

        let top3: Vec<FilmId> = backend
            .films
            .top_films(3)
            .unwrap()
            .iter()
            .map(|f| f.id)
            .collect();
        assert_eq!(top3, vec![films[3], films[2], films[1]], "backend {name}");
    }
}

#[test]
fn ranking_ties_break_by_ascending_id() {
    for (name, backend) in backends() {
        let films: Vec<FilmId> = ["x", "y", "z"]
            .iter()
            .map(|t| backend.films.create(film(t)).unwrap().id)
            .collect();
        let users = seeded_users(&backend, 1);

        // y and z tie on one like each; x has none.
        backend.films.add_like(films[2], users[0]).unwrap();
        backend.films.add_like(films[1], users[0]).unwrap();

        let top: Vec<FilmId> = backend
            .films
            .top_films(10)
            .unwrap()
            .iter()
            .map(|f| f.id)
            .collect();
        assert_eq!(top, vec![films[1], films[2], films[0]], "backend {name}");
    }
}

#[test]
fn ranking_on_empty_catalog_is_empty() {
    for (name, backend) in backends() {
        assert!(backend.films.top_films(10).unwrap().is_empty(), "backend {name}");
    }
}

#[test]
fn ranking_is_reproducible_across_calls() {
    for (name, backend) in backends() {
        for t in ["a", "b", "c"] {
            backend.films.create(film(t)).unwrap();
        }
        let first = backend.films.top_films(10).unwrap();
        let second = backend.films.top_films(10).unwrap();
        assert_eq!(first, second, "backend {name}");
    }
}
