//! Shared repository handle propagated to role assessors
//!
//! The engine treats repositories as inert pass-through state. The caller
//! hands a [`Repositories`] set to [`AccessControl::set_repositories`] and
//! every registered assessor receives it; assessors registered later receive
//! whatever the registry holds at that moment, which may still be `None`.
//!
//! [`AccessControl::set_repositories`]: crate::AccessControl::set_repositories

use parking_lot::RwLock;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

type Repository = Arc<dyn Any + Send + Sync>;

/// Name-keyed set of type-erased repository objects
#[derive(Clone, Default)]
pub struct Repositories {
    entries: HashMap<String, Repository>,
}

impl Repositories {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a repository under `name`
    pub fn with<T: Any + Send + Sync>(mut self, name: impl Into<String>, repository: T) -> Self {
        self.insert(name, repository);
        self
    }

    /// Add or replace a repository under `name`
    pub fn insert<T: Any + Send + Sync>(&mut self, name: impl Into<String>, repository: T) {
        self.entries.insert(name.into(), Arc::new(repository));
    }

    /// Fetch the repository under `name` if it has type `T`
    pub fn get<T: Any + Send + Sync>(&self, name: &str) -> Option<Arc<T>> {
        self.entries
            .get(name)
            .cloned()
            .and_then(|repository| repository.downcast::<T>().ok())
    }

    /// Whether a repository is registered under `name`
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered repository names
    pub fn names(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    /// Number of repositories
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for Repositories {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names = self.names();
        names.sort_unstable();
        f.debug_struct("Repositories").field("names", &names).finish()
    }
}

/// Holder an assessor embeds to receive the shared repositories
///
/// Read the handle at call time with [`RepositorySlot::get`] rather than
/// caching it, so a later rebind is always observed.
#[derive(Debug, Default)]
pub struct RepositorySlot {
    current: RwLock<Option<Arc<Repositories>>>,
}

impl RepositorySlot {
    /// Create an empty slot
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the held handle
    pub fn set(&self, repositories: Option<Arc<Repositories>>) {
        *self.current.write() = repositories;
    }

    /// Current handle, if one has been bound
    pub fn get(&self) -> Option<Arc<Repositories>> {
        self.current.read().clone()
    }

    /// Fetch a typed repository from the current handle
    pub fn repository<T: Any + Send + Sync>(&self, name: &str) -> Option<Arc<T>> {
        self.current.read().as_ref().and_then(|repos| repos.get::<T>(name))
    }
}
