//! Default assessor matching every caller

use super::RoleAssessor;
use crate::context::AclContext;
use crate::decision::Credential;
use crate::error::Result;
use async_trait::async_trait;

/// Role name of [`AllAssessor`]
pub const ALL_ROLE: &str = "all";

/// Grants the `all` role to every context
#[derive(Debug, Clone, Copy, Default)]
pub struct AllAssessor;

impl AllAssessor {
    /// Create the assessor
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl RoleAssessor for AllAssessor {
    fn role(&self) -> &str {
        ALL_ROLE
    }

    async fn has_role(&self, _context: &AclContext) -> Result<Credential> {
        Ok(Credential::Granted)
    }
}
