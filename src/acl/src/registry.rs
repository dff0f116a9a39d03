//! Role registry: one assessor per role name
//!
//! The registry also owns the shared repository handle and forwards it to
//! assessors, both on registration and whenever the handle is rebound.

use crate::assessor::RoleAssessor;
use crate::population::{group_by_priority, PriorityTier};
use crate::repository::Repositories;
use crate::types::RoleName;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Reference-counted role assessor
pub type SharedAssessor = Arc<dyn RoleAssessor>;

/// Name-keyed role assessor registry
#[derive(Clone, Default)]
pub struct RoleRegistry {
    /// Registered assessors by role name
    assessors: HashMap<RoleName, SharedAssessor>,

    /// Handle forwarded to every assessor
    repositories: Option<Arc<Repositories>>,
}

impl RoleRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `assessor` under its role name
    ///
    /// Replaces any assessor already registered for that role and returns
    /// it. The registry's current repository handle, set or not, is
    /// forwarded to the new assessor immediately.
    pub fn register(&mut self, assessor: SharedAssessor) -> Option<SharedAssessor> {
        let role = assessor.role().to_string();
        assessor.set_repositories(self.repositories.clone());

        let replaced = self.assessors.insert(role.clone(), assessor);
        if replaced.is_some() {
            debug!("Replaced role assessor for '{}'", role);
        } else {
            debug!("Registered role assessor for '{}'", role);
        }
        replaced
    }

    /// Bind the repository handle and forward it to every assessor
    pub fn set_repositories(&mut self, repositories: Option<Arc<Repositories>>) {
        for assessor in self.assessors.values() {
            assessor.set_repositories(repositories.clone());
        }
        debug!(
            "Propagated repositories to {} role assessors",
            self.assessors.len()
        );
        self.repositories = repositories;
    }

    /// Currently bound repository handle
    pub fn repositories(&self) -> Option<Arc<Repositories>> {
        self.repositories.clone()
    }

    /// Assessor responsible for `role`, if any
    pub fn resolve(&self, role: &str) -> Option<SharedAssessor> {
        self.assessors.get(role).cloned()
    }

    /// Whether an assessor is registered for `role`
    pub fn contains(&self, role: &str) -> bool {
        self.assessors.contains_key(role)
    }

    /// Registered role names, sorted
    pub fn roles(&self) -> Vec<RoleName> {
        let mut roles: Vec<RoleName> = self.assessors.keys().cloned().collect();
        roles.sort();
        roles
    }

    /// All registered assessors, in no particular order
    pub fn assessors(&self) -> Vec<SharedAssessor> {
        self.assessors.values().cloned().collect()
    }

    /// Registered assessors grouped by priority, highest first
    pub fn tiers(&self) -> Vec<PriorityTier> {
        group_by_priority(self.assessors())
    }

    /// Number of registered assessors
    pub fn len(&self) -> usize {
        self.assessors.len()
    }

    /// Whether no assessor is registered
    pub fn is_empty(&self) -> bool {
        self.assessors.is_empty()
    }
}

impl fmt::Debug for RoleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoleRegistry")
            .field("roles", &self.roles())
            .field("repositories", &self.repositories)
            .finish()
    }
}
