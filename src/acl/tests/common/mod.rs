//! Shared role assessors for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use cretoai_acl::{
    AclContext, AclError, AclRequest, Credential, Repositories, RepositorySlot, Result,
    RoleAssessor,
};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

/// Initialize tracing for test visibility
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Convert a JSON object literal into a conditions map
pub fn conditions(value: Value) -> cretoai_acl::Conditions {
    value.as_object().cloned().expect("conditions must be an object")
}

/// Answers every role check with a fixed JSON credential
pub struct FixedAssessor {
    role: String,
    priority: u32,
    answer: Value,
}

impl FixedAssessor {
    pub fn new(role: &str, answer: Value) -> Arc<Self> {
        Self::with_priority(role, 0, answer)
    }

    pub fn with_priority(role: &str, priority: u32, answer: Value) -> Arc<Self> {
        Arc::new(Self {
            role: role.to_string(),
            priority,
            answer,
        })
    }
}

#[async_trait]
impl RoleAssessor for FixedAssessor {
    fn role(&self) -> &str {
        &self.role
    }

    fn priority(&self) -> u32 {
        self.priority
    }

    async fn has_role(&self, _context: &AclContext) -> Result<Credential> {
        Ok(Credential::from(self.answer.clone()))
    }
}

/// Fails in the configured phase
pub struct FailingAssessor {
    role: String,
    priority: u32,
    fail_init: bool,
}

impl FailingAssessor {
    pub fn on_init(role: &str, priority: u32) -> Arc<Self> {
        Arc::new(Self {
            role: role.to_string(),
            priority,
            fail_init: true,
        })
    }

    pub fn on_check(role: &str) -> Arc<Self> {
        Arc::new(Self {
            role: role.to_string(),
            priority: 0,
            fail_init: false,
        })
    }
}

#[async_trait]
impl RoleAssessor for FailingAssessor {
    fn role(&self) -> &str {
        &self.role
    }

    fn priority(&self) -> u32 {
        self.priority
    }

    async fn init_context(
        &self,
        _request: &AclRequest,
        _context: &AclContext,
        _remote_object: Option<&Value>,
    ) -> Result<()> {
        if self.fail_init {
            return Err(AclError::assessor(&self.role, "init failed"));
        }
        Ok(())
    }

    async fn has_role(&self, _context: &AclContext) -> Result<Credential> {
        Err(AclError::assessor(&self.role, "check failed"))
    }
}

/// Appends its role to a shared journal when `init_context` starts and ends
///
/// Optionally sleeps in between and records which context keys it could see
/// when it started.
pub struct RecordingAssessor {
    role: String,
    priority: u32,
    delay: Duration,
    journal: Arc<Mutex<Vec<String>>>,
}

impl RecordingAssessor {
    pub fn new(
        role: &str,
        priority: u32,
        delay: Duration,
        journal: Arc<Mutex<Vec<String>>>,
    ) -> Arc<Self> {
        Arc::new(Self {
            role: role.to_string(),
            priority,
            delay,
            journal,
        })
    }
}

#[async_trait]
impl RoleAssessor for RecordingAssessor {
    fn role(&self) -> &str {
        &self.role
    }

    fn priority(&self) -> u32 {
        self.priority
    }

    async fn init_context(
        &self,
        _request: &AclRequest,
        context: &AclContext,
        _remote_object: Option<&Value>,
    ) -> Result<()> {
        let mut seen: Vec<String> = context.snapshot().keys().cloned().collect();
        seen.sort();
        self.journal
            .lock()
            .push(format!("start:{} saw:{}", self.role, seen.join(",")));

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        context.insert(self.role.clone(), json!(true));
        self.journal.lock().push(format!("end:{}", self.role));
        Ok(())
    }

    async fn has_role(&self, context: &AclContext) -> Result<Credential> {
        Ok(Credential::from(context.contains(&self.role)))
    }
}

/// Marks the caller authenticated when the request carries a principal
pub struct AuthedAssessor;

#[async_trait]
impl RoleAssessor for AuthedAssessor {
    fn role(&self) -> &str {
        "authed"
    }

    fn priority(&self) -> u32 {
        10
    }

    async fn init_context(
        &self,
        request: &AclRequest,
        context: &AclContext,
        _remote_object: Option<&Value>,
    ) -> Result<()> {
        if let Some(principal) = &request.principal {
            context.insert("userId", json!(principal));
        }
        Ok(())
    }

    async fn has_role(&self, context: &AclContext) -> Result<Credential> {
        Ok(Credential::from(context.contains("userId")))
    }
}

/// In-memory record ownership table
#[derive(Debug, Default)]
pub struct OwnershipRepo {
    pub owners: Vec<(String, String)>,
}

impl OwnershipRepo {
    pub fn owner_of(&self, record: &str) -> Option<&str> {
        self.owners
            .iter()
            .find(|(id, _)| id == record)
            .map(|(_, owner)| owner.as_str())
    }
}

/// Grants `owner` scoped to the caller, using the ownership repository
///
/// Reads `userId` written by a higher tier and, when a remote record is
/// supplied, checks its owner through the shared repositories.
pub struct OwnerAssessor {
    repositories: RepositorySlot,
}

impl OwnerAssessor {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            repositories: RepositorySlot::new(),
        })
    }

    pub fn has_repositories(&self) -> bool {
        self.repositories.get().is_some()
    }
}

#[async_trait]
impl RoleAssessor for OwnerAssessor {
    fn role(&self) -> &str {
        "owner"
    }

    fn priority(&self) -> u32 {
        5
    }

    async fn init_context(
        &self,
        _request: &AclRequest,
        context: &AclContext,
        remote_object: Option<&Value>,
    ) -> Result<()> {
        let Some(user_id) = context.get_as::<String>("userId") else {
            return Ok(());
        };
        let Some(record) = remote_object
            .and_then(|obj| obj.get("id"))
            .and_then(Value::as_str)
        else {
            context.insert("ownerId", json!(user_id));
            return Ok(());
        };

        let repo = self
            .repositories
            .repository::<OwnershipRepo>("ownership")
            .ok_or_else(|| AclError::assessor("owner", "ownership repository not bound"))?;
        if repo.owner_of(record) == Some(user_id.as_str()) {
            context.insert("ownerId", json!(user_id));
        }
        Ok(())
    }

    async fn has_role(&self, context: &AclContext) -> Result<Credential> {
        Ok(match context.get("ownerId") {
            Some(owner) => Credential::Conditions(conditions(json!({ "ownerId": owner }))),
            None => Credential::Denied,
        })
    }

    fn set_repositories(&self, repositories: Option<Arc<Repositories>>) {
        self.repositories.set(repositories);
    }
}
