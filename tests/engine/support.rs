//! Shared helpers for the engine tests.

use filmgraph_engine::{CatalogService, SocialService, VocabularyService};
use filmgraph_foundation::{NewFilm, NewUser};
use filmgraph_storage::Backend;

/// One full service set per backend.
pub fn services() -> Vec<(&'static str, CatalogService, SocialService, VocabularyService)> {
    [
        ("memory", Backend::memory()),
        ("sqlite", Backend::sqlite_in_memory().unwrap()),
    ]
    .into_iter()
    .map(|(name, backend)| {
        (
            name,
            CatalogService::from_backend(&backend),
            SocialService::from_backend(&backend),
            VocabularyService::from_backend(&backend),
        )
    })
    .collect()
}

/// A minimal film payload.
pub fn film(name: &str) -> NewFilm {
    NewFilm::new(name)
}

/// A minimal user payload.
pub fn user(login: &str) -> NewUser {
    NewUser::new(format!("{login}@example.test"), login, login)
}
