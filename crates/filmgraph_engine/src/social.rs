//! User records, friendship edges, and social-graph queries.
//!
//! Friendship is a directed relation: `add_friend(a, b)` records only the
//! `a -> b` edge, and queries traverse outgoing edges only. A symmetric
//! view is the caller's concern (two add calls).

use std::sync::Arc;

use filmgraph_foundation::{Error, NewUser, Result, User, UserId};
use filmgraph_storage::{Backend, UserStore};

/// Social-graph service.
#[derive(Clone)]
pub struct SocialService {
    users: Arc<dyn UserStore>,
}

impl SocialService {
    /// Creates a service over an explicit store handle.
    #[must_use]
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    /// Creates a service over an opened backend.
    #[must_use]
    pub fn from_backend(backend: &Backend) -> Self {
        Self::new(backend.users.clone())
    }

    /// Registers a user, returning the stored record with its assigned
    /// identifier.
    ///
    /// # Errors
    ///
    /// Propagates storage faults; never fails on well-formed input.
    pub fn create(&self, user: NewUser) -> Result<User> {
        self.users.create(user)
    }

    /// Fetches a user.
    ///
    /// # Errors
    ///
    /// Returns a user-not-found error when the identifier is unknown.
    pub fn get(&self, id: UserId) -> Result<User> {
        self.users.get(id)?.ok_or_else(|| Error::user_not_found(id))
    }

    /// Returns every user in ascending identifier order.
    ///
    /// # Errors
    ///
    /// Propagates storage faults.
    pub fn get_all(&self) -> Result<Vec<User>> {
        self.users.get_all()
    }

    /// Overwrites an existing user's fields.
    ///
    /// # Errors
    ///
    /// Returns a user-not-found error when the identifier was never
    /// assigned; the store is left unchanged in that case.
    pub fn update(&self, user: &User) -> Result<User> {
        self.users.update(user)?;
        Ok(user.clone())
    }

    /// Records the directed edge `user -> friend`. Idempotent: re-adding
    /// an existing edge leaves the edge set unchanged.
    ///
    /// # Errors
    ///
    /// Returns an invalid-argument error for a self-edge, or a
    /// user-not-found error when either identifier is unknown.
    pub fn add_friend(&self, user: UserId, friend: UserId) -> Result<()> {
        if user == friend {
            return Err(Error::invalid_argument(
                "a user cannot list themselves as a friend",
            ));
        }
        self.require(user)?;
        self.require(friend)?;
        self.users.add_friend(user, friend)
    }

    /// Removes the directed edge `user -> friend`. Idempotent; removing a
    /// never-added edge (a self-edge included) is a no-op.
    ///
    /// # Errors
    ///
    /// Returns a user-not-found error when either identifier is unknown.
    pub fn remove_friend(&self, user: UserId, friend: UserId) -> Result<()> {
        self.require(user)?;
        self.require(friend)?;
        self.users.remove_friend(user, friend)
    }

    /// Returns the user records behind `user`'s outgoing friendship edges,
    /// in ascending identifier order.
    ///
    /// # Errors
    ///
    /// Returns a user-not-found error when the identifier is unknown.
    pub fn friends(&self, user: UserId) -> Result<Vec<User>> {
        self.require(user)?;
        self.resolve(self.users.friends_of(user)?)
    }

    /// Returns the intersection of two users' friend sets, in ascending
    /// identifier order. Querying a user against themselves returns their
    /// own friend list.
    ///
    /// # Errors
    ///
    /// Returns a user-not-found error when either identifier is unknown.
    pub fn common_friends(&self, user: UserId, other: UserId) -> Result<Vec<User>> {
        self.require(user)?;
        self.require(other)?;

        let theirs = self.users.friends_of(other)?;
        let shared: Vec<UserId> = self
            .users
            .friends_of(user)?
            .into_iter()
            .filter(|id| theirs.contains(id))
            .collect();
        self.resolve(shared)
    }

    /// Resolves identifiers to records, in the order given. Edges to
    /// identifiers without a record (possible on backends that do not
    /// enforce referential integrity) are skipped rather than failing the
    /// whole query.
    fn resolve(&self, ids: Vec<UserId>) -> Result<Vec<User>> {
        let mut users = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(user) = self.users.get(id)? {
                users.push(user);
            }
        }
        Ok(users)
    }

    fn require(&self, id: UserId) -> Result<()> {
        if self.users.get(id)?.is_none() {
            return Err(Error::user_not_found(id));
        }
        Ok(())
    }
}
