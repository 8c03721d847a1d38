//! Property tests over arbitrary operation scripts.
//!
//! Scripts draw only from pre-seeded identifiers so they are valid on both
//! backends, letting the parity properties quantify over interleavings
//! rather than a single hand-written scenario.

use filmgraph_foundation::{FilmId, NewFilm, NewUser, UserId};
use filmgraph_storage::Backend;
use proptest::prelude::*;

const FILMS: i64 = 3;
const USERS: i64 = 4;

/// One edit against the relations.
#[derive(Clone, Debug)]
enum Op {
    AddLike(i64, i64),
    RemoveLike(i64, i64),
    AddFriend(i64, i64),
    RemoveFriend(i64, i64),
}

fn ops() -> impl Strategy<Value = Vec<Op>> {
    let op = (0u8..4, 1..=FILMS, 1..=USERS, 1..=USERS).prop_map(|(tag, f, u, v)| match tag {
        0 => Op::AddLike(f, u),
        1 => Op::RemoveLike(f, u),
        2 => Op::AddFriend(u, v),
        _ => Op::RemoveFriend(u, v),
    });
    prop::collection::vec(op, 0..60)
}

fn seeded(backend: &Backend) {
    for i in 1..=FILMS {
        backend.films.create(NewFilm::new(format!("film-{i}"))).unwrap();
    }
    for i in 1..=USERS {
        backend
            .users
            .create(NewUser::new(format!("u{i}@example.test"), format!("u{i}"), format!("u{i}")))
            .unwrap();
    }
}

fn apply(backend: &Backend, ops: &[Op]) {
    for op in ops {
        match *op {
            Op::AddLike(f, u) => backend.films.add_like(FilmId::new(f), UserId::new(u)).unwrap(),
            Op::RemoveLike(f, u) => backend
                .films
                .remove_like(FilmId::new(f), UserId::new(u))
                .unwrap(),
            Op::AddFriend(u, v) => backend
                .users
                .add_friend(UserId::new(u), UserId::new(v))
                .unwrap(),
            Op::RemoveFriend(u, v) => backend
                .users
                .remove_friend(UserId::new(u), UserId::new(v))
                .unwrap(),
        }
    }
}

proptest! {
    // SQLite-backed cases are slower than the usual in-memory proptests.
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn backends_agree_on_every_observable(script in ops()) {
        let memory = Backend::memory();
        let sqlite = Backend::sqlite_in_memory().unwrap();
        seeded(&memory);
        seeded(&sqlite);

        apply(&memory, &script);
        apply(&sqlite, &script);

        for raw in 1..=FILMS {
            let film = FilmId::new(raw);
            prop_assert_eq!(
                memory.films.likes_of(film).unwrap(),
                sqlite.films.likes_of(film).unwrap()
            );
            prop_assert_eq!(
                memory.films.like_count(film).unwrap(),
                sqlite.films.like_count(film).unwrap()
            );
        }
        for raw in 1..=USERS {
            let user = UserId::new(raw);
            prop_assert_eq!(
                memory.users.friends_of(user).unwrap(),
                sqlite.users.friends_of(user).unwrap()
            );
        }

        let top_memory: Vec<FilmId> =
            memory.films.top_films(10).unwrap().iter().map(|f| f.id).collect();
        let top_sqlite: Vec<FilmId> =
            sqlite.films.top_films(10).unwrap().iter().map(|f| f.id).collect();
        prop_assert_eq!(top_memory, top_sqlite);
    }

    #[test]
    fn like_count_equals_relation_cardinality_on_both_backends(script in ops()) {
        for backend in [Backend::memory(), Backend::sqlite_in_memory().unwrap()] {
            seeded(&backend);
            apply(&backend, &script);
            for raw in 1..=FILMS {
                let film = FilmId::new(raw);
                prop_assert_eq!(
                    backend.films.like_count(film).unwrap(),
                    backend.films.likes_of(film).unwrap().len()
                );
            }
        }
    }

    #[test]
    fn scripts_followed_by_their_inverse_restore_the_empty_relations(
        pairs in prop::collection::vec((1..=FILMS, 1..=USERS), 0..20)
    ) {
        for backend in [Backend::memory(), Backend::sqlite_in_memory().unwrap()] {
            seeded(&backend);
            for &(f, u) in &pairs {
                backend.films.add_like(FilmId::new(f), UserId::new(u)).unwrap();
            }
            for &(f, u) in &pairs {
                backend.films.remove_like(FilmId::new(f), UserId::new(u)).unwrap();
            }
            for raw in 1..=FILMS {
                prop_assert_eq!(backend.films.like_count(FilmId::new(raw)).unwrap(), 0);
            }
        }
    }
}
