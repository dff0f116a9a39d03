//! Pluggable role assessors
//!
//! A role assessor owns exactly one role name. Before any rule is evaluated
//! it may seed the request context with facts ([`RoleAssessor::init_context`]);
//! during evaluation it answers whether the context holds its role
//! ([`RoleAssessor::has_role`]).
//!
//! # Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use cretoai_acl::{AclContext, AclRequest, Credential, Result, RoleAssessor};
//! use serde_json::{json, Value};
//!
//! struct AuthedAssessor;
//!
//! #[async_trait]
//! impl RoleAssessor for AuthedAssessor {
//!     fn role(&self) -> &str {
//!         "authed"
//!     }
//!
//!     fn priority(&self) -> u32 {
//!         10
//!     }
//!
//!     async fn init_context(
//!         &self,
//!         request: &AclRequest,
//!         context: &AclContext,
//!         _remote_object: Option<&Value>,
//!     ) -> Result<()> {
//!         context.insert("authed", json!(request.principal.is_some()));
//!         Ok(())
//!     }
//!
//!     async fn has_role(&self, context: &AclContext) -> Result<Credential> {
//!         Ok(Credential::from(context.get_as::<bool>("authed").unwrap_or(false)))
//!     }
//! }
//! ```

pub mod all;

pub use all::AllAssessor;

use crate::context::{AclContext, AclRequest};
use crate::decision::Credential;
use crate::error::Result;
use crate::repository::Repositories;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Capability set every role assessor implements
#[async_trait]
pub trait RoleAssessor: Send + Sync {
    /// Unique role name, used as the registry key
    fn role(&self) -> &str;

    /// Population tier; higher tiers run first
    fn priority(&self) -> u32 {
        0
    }

    /// Seed `context` with facts derived from the request
    ///
    /// Assessors sharing a priority run concurrently and must write
    /// disjoint context keys.
    async fn init_context(
        &self,
        _request: &AclRequest,
        _context: &AclContext,
        _remote_object: Option<&Value>,
    ) -> Result<()> {
        Ok(())
    }

    /// Answer whether the populated context holds this role
    async fn has_role(&self, context: &AclContext) -> Result<Credential>;

    /// Receive (or refresh) the shared repository handle
    fn set_repositories(&self, _repositories: Option<Arc<Repositories>>) {}
}
